use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,

    pub data_dir: PathBuf,
    pub store_backend: StoreBackend,
    pub database_url: String,
    pub journal_file: PathBuf,

    pub assistant_timeout_secs: u64,
    pub assistant_binary: Option<PathBuf>,
    pub assistant_max_calls: u32,
    pub assistant_window_secs: u64,
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Self {
        let data_dir = non_empty("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("wellbeing-journal")
            });

        let store_backend = match env::var("STORE_BACKEND").as_deref().map(str::trim) {
            Ok("json") => StoreBackend::Json,
            _ => StoreBackend::Sqlite,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: parse_or("PORT", 4870),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
            cors_extra_origins: env::var("CORS_EXTRA_ORIGINS")
                .map(|extra| {
                    extra
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),

            database_url: non_empty("DATABASE_URL").unwrap_or_else(|| {
                format!("sqlite:{}", data_dir.join("journal.db").display())
            }),
            journal_file: non_empty("JOURNAL_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join("journal.json")),
            store_backend,
            data_dir,

            assistant_timeout_secs: parse_or("ASSISTANT_TIMEOUT_SECS", 120),
            assistant_binary: non_empty("ASSISTANT_BINARY").map(PathBuf::from),
            assistant_max_calls: parse_or("ASSISTANT_MAX_CALLS", 10),
            assistant_window_secs: parse_or("ASSISTANT_WINDOW_SECS", 600),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn assistant_timeout(&self) -> Duration {
        Duration::from_secs(self.assistant_timeout_secs)
    }
}

impl Default for Config {
    /// Defaults with storage under the current directory; used by tests and
    /// as the base for embedding the router elsewhere.
    fn default() -> Self {
        let data_dir = PathBuf::from(".");
        Self {
            host: "127.0.0.1".into(),
            port: 4870,
            frontend_url: "http://localhost:5173".into(),
            cors_extra_origins: Vec::new(),
            database_url: "sqlite::memory:".into(),
            journal_file: data_dir.join("journal.json"),
            data_dir,
            store_backend: StoreBackend::Sqlite,
            assistant_timeout_secs: 120,
            assistant_binary: None,
            assistant_max_calls: 10,
            assistant_window_secs: 600,
        }
    }
}
