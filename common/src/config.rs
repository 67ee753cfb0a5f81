use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::{env, fs};

/// Judge-wide settings, resolved once from the environment.
///
/// Exercise configs may override the check toggles per suite; these values
/// are only the process-wide defaults.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    /// Two-letter language code forwarded to the platform's renderer.
    pub language: String,
    /// Check required attributes during HTML validation.
    pub check_required: bool,
    /// Check recommended attributes during HTML validation.
    pub check_recommended: bool,
    /// Treat recommended-attribute warnings as acceptable (non-failing).
    pub allow_warnings: bool,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn init(env_path: &str) -> &'static Self {
        dotenvy::from_filename(env_path).ok();

        CONFIG.get_or_init(|| {
            let project_name = env::var("PROJECT_NAME").unwrap_or_else(|_| "html-judge".into());
            let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "debug".into());
            let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/judge.log".into());
            let language = env::var("JUDGE_LANGUAGE").unwrap_or_else(|_| "en".into());

            if let Some(parent) = std::path::Path::new(&log_file).parent() {
                fs::create_dir_all(parent).expect("Failed to create log directory");
            }

            Config {
                project_name,
                log_level,
                log_file,
                language,
                check_required: env_bool("CHECK_REQUIRED_ATTRIBUTES", true),
                check_recommended: env_bool("CHECK_RECOMMENDED_ATTRIBUTES", true),
                allow_warnings: env_bool("ALLOW_WARNINGS", true),
            }
        })
    }

    pub fn get() -> &'static Self {
        CONFIG.get().expect("Config not initialized")
    }
}
