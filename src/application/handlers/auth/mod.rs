//! Authentication flow handlers.

mod change_password;
mod get_current_user;
mod login;
mod seed_admin;

pub use change_password::{ChangePasswordCommand, ChangePasswordHandler};
pub use get_current_user::{GetCurrentUserHandler, GetCurrentUserQuery};
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use seed_admin::{SeedAdminCommand, SeedAdminHandler, SeedOutcome};
