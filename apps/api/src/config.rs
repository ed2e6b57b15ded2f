/// API configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Shared secret gating the cron scheduler endpoint
    /// (`Authorization: Bearer <CRON_SECRET>`).
    pub cron_secret: String,
    /// Session lifetime in days.
    pub session_ttl_days: i64,
    /// When both are set, this account is created (or elevated) as a
    /// superadmin at startup.
    pub superadmin_email: Option<String>,
    pub superadmin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Panics with a descriptive message if a required variable is missing.
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4003),
            cron_secret: required_var("CRON_SECRET"),
            session_ttl_days: std::env::var("SESSION_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            superadmin_email: std::env::var("SUPERADMIN_EMAIL").ok(),
            superadmin_password: std::env::var("SUPERADMIN_PASSWORD").ok(),
        }
    }
}

fn required_var(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{name} env var is required"))
}
