//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` and `TokenIssuer` ports:
//!
//! - `jwt` - HS256 tokens signed with the configured secret
//! - `mock` - Test validator that doesn't require signed tokens

mod jwt;
mod mock;

pub use jwt::{JwtConfig, JwtTokenService};
pub use mock::MockSessionValidator;
