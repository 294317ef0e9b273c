//! HR server
//!
//! Employee-master HTTP service: registration with HR approval, JWT login,
//! a role-policy gate in front of every endpoint, and CRUD for
//! departments, designations, companies and employees.
//!
//! ```text
//! hr-server/src/
//! ├── config.rs      # environment configuration
//! ├── state.rs       # shared application state
//! ├── error.rs       # service-layer error
//! ├── auth/          # token service, gate, rate limiting
//! ├── db/            # store traits, PostgreSQL and in-memory stores
//! ├── approval.rs    # registration / login / approval workflow
//! ├── seed.rs        # reference data and bootstrap admin
//! └── api/           # HTTP routes and handlers
//! ```

pub mod api;
pub mod approval;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod seed;
pub mod state;
pub mod util;

pub use api::build_app;
pub use auth::{Identity, TokenService};
pub use config::Config;
pub use db::Stores;
pub use state::AppState;

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
