use anyhow::Context;

/// Runtime mode, controls error verbosity and the default log filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
    Test,
}

impl RunMode {
    fn parse(value: &str) -> anyhow::Result<Self> {
        match value {
            "development" => Ok(RunMode::Development),
            "production" => Ok(RunMode::Production),
            "test" => Ok(RunMode::Test),
            other => anyhow::bail!("unknown APP_ENV value: {other}"),
        }
    }

    pub fn is_production(self) -> bool {
        self == RunMode::Production
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub run_mode: RunMode,
    pub database_url: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);
        let run_mode = match std::env::var("APP_ENV") {
            Ok(v) => RunMode::parse(&v)?,
            Err(_) => RunMode::Development,
        };
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        Ok(Self {
            host,
            port,
            run_mode,
            database_url,
        })
    }

    /// Fallback tracing filter when RUST_LOG is not set.
    pub fn default_log_filter(&self) -> String {
        let level = match self.run_mode {
            RunMode::Production => "info",
            RunMode::Development | RunMode::Test => "debug",
        };
        format!("course_catalog={level},axum=info,tower_http=info")
    }
}
