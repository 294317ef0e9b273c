//! Authentication and authorization
//!
//! - [`token`]: identity token issue/verify
//! - [`gate`]: the per-request authentication + role-policy check
//! - [`rate_limit`]: per-IP limits on login and registration

pub mod gate;
pub mod rate_limit;
pub mod token;

pub use gate::{enforce_policy, require_auth};
pub use token::{Identity, TOKEN_EXPIRY_HOURS, TokenService, VerificationError, extract_bearer};
