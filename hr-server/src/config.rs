//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP port
    pub http_port: u16,
    /// PostgreSQL connection URL; in-memory store when unset (development only)
    pub database_url: Option<String>,
    /// JWT signing secret
    pub jwt_secret: String,
    /// Allowed CORS origins; empty means any origin
    pub cors_allowed_origins: Vec<String>,
    /// Login attempts per minute per IP (0 disables)
    pub login_rate_limit: u32,
    /// Registrations per minute per IP (0 disables)
    pub register_rate_limit: u32,
    /// Key rate limits on the first `X-Forwarded-For` entry. Only safe
    /// behind a reverse proxy that overwrites the header.
    pub trust_proxy_headers: bool,
    /// Answer every failed login with InvalidCredentials
    pub uniform_login_errors: bool,
    /// Insert the default departments and designations at start-up
    pub seed_reference_data: bool,
    /// (email, password) of an approved admin created at start-up
    pub bootstrap_admin: Option<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".into(),
            http_port: 8080,
            database_url: None,
            jwt_secret: "dev-JWT_SECRET-not-for-production".into(),
            cors_allowed_origins: Vec::new(),
            login_rate_limit: 5,
            register_rate_limit: 3,
            trust_proxy_headers: false,
            uniform_login_errors: false,
            seed_reference_data: false,
            bootstrap_admin: None,
        }
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn flag(name: &str) -> bool {
        std::env::var(name)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
    }

    fn number<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let database_url = std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        if database_url.is_none() && environment != "development" {
            return Err(format!("DATABASE_URL must be set in {environment} environment").into());
        }

        let bootstrap_admin = match (
            std::env::var("BOOTSTRAP_ADMIN_EMAIL").ok().filter(|s| !s.is_empty()),
            std::env::var("BOOTSTRAP_ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
        ) {
            (Some(email), Some(password)) => Some((email, password)),
            (None, None) => None,
            _ => {
                return Err(
                    "BOOTSTRAP_ADMIN_EMAIL and BOOTSTRAP_ADMIN_PASSWORD must be set together"
                        .into(),
                );
            }
        };

        Ok(Self {
            http_port: Self::number("HTTP_PORT", 8080),
            database_url,
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|origin| origin.trim().to_string())
                        .filter(|origin| !origin.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            login_rate_limit: Self::number("LOGIN_RATE_LIMIT", 5),
            register_rate_limit: Self::number("REGISTER_RATE_LIMIT", 3),
            trust_proxy_headers: Self::flag("TRUST_PROXY_HEADERS"),
            uniform_login_errors: Self::flag("UNIFORM_LOGIN_ERRORS"),
            seed_reference_data: Self::flag("SEED_REFERENCE_DATA"),
            bootstrap_admin,
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_secret_fallback() {
        let secret = Config::require_secret("HR_TEST_UNSET_SECRET", "development").unwrap();
        assert_eq!(secret, "dev-HR_TEST_UNSET_SECRET-not-for-production");
    }

    #[test]
    fn test_production_requires_secret() {
        assert!(Config::require_secret("HR_TEST_UNSET_SECRET", "production").is_err());
    }

    #[test]
    fn test_default_is_development() {
        let config = Config::default();
        assert!(config.is_development());
        assert_eq!(config.login_rate_limit, 5);
        assert_eq!(config.register_rate_limit, 3);
        assert!(!config.uniform_login_errors);
        assert!(!config.trust_proxy_headers);
    }
}
