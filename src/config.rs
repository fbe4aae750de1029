use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Settings shared by the library client and the command-line front end.
#[derive(Clone, Debug, Args)]
pub struct Config {
    #[command(flatten)]
    pub api: ApiConfig,

    #[command(flatten)]
    pub session: SessionConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ApiConfig {
    /// Root URL of the TaskSaathi backend
    #[arg(long, env = "TASKSAATHI_SERVER_URL", default_value = "http://localhost:8000", global = true)]
    pub server_url: String,

    /// Endpoint layout the backend speaks
    #[arg(long, env = "TASKSAATHI_PROFILE", value_enum, default_value_t = ApiProfile::Current, global = true)]
    pub profile: ApiProfile,

    /// Per-request timeout in seconds (0 disables)
    #[arg(long, env = "TASKSAATHI_REQUEST_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_string(),
            profile: ApiProfile::Current,
            request_timeout_secs: 30,
        }
    }
}

/// The two endpoint layouts observed in deployed backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ApiProfile {
    /// Resources mounted under `/api`; registration does not sign in.
    #[default]
    Current,
    /// Resources on the server root; registration signs in immediately.
    Legacy,
}

#[derive(Clone, Debug, Args)]
pub struct SessionConfig {
    /// File holding the persisted session
    #[arg(long, env = "TASKSAATHI_SESSION_FILE", default_value = ".tasksaathi/session.json", global = true)]
    pub session_file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Default log level when RUST_LOG is unset
    #[arg(long, env = "TASKSAATHI_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "TASKSAATHI_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
