//! Admin module - back-office users, password hashing and auth flow errors.

mod errors;
mod user;

pub use errors::AuthFlowError;
pub use user::{
    hash_password, validate_new_password, AdminProfile, AdminUser, NewAdminUser,
    MIN_PASSWORD_LENGTH,
};
