pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, InputConfig, ReportConfig, TmdbConfig, DEFAULT_TMDB_BASE_URL};
pub use credentials::CredentialStore;
pub use paths::{PathManager, config_dir_override};
