//! Where the dashboard finds its backend, session file and log settings
//!
//! Environment variables win when both required ones are set
//! (`OPSBOARD_BACKEND_URL`, `OPSBOARD_ANON_KEY`); the optional ones are
//! `OPSBOARD_TIMEOUT_SECS`, `OPSBOARD_MAX_ATTEMPTS`, `OPSBOARD_SESSION_PATH`,
//! `OPSBOARD_TIMEZONE`, `OPSBOARD_LOG_LEVEL` and `OPSBOARD_LOG_FORMAT`.
//! Otherwise a TOML or JSON file is read: the `--config` path, or the first
//! of `opsboard.{toml,json}` / `config.{toml,json}` found in the working
//! directory, its parent, its grandparent or next to the executable.
//!
//! Whatever the source, [`validate`] runs last.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono_tz::Tz;
use opsboard_domain::{
    BackendConfig, Config, LogFormat, LoggingConfig, OpsBoardError, ReportConfig, Result,
    SessionConfig,
};
use url::Url;

const FILE_NAMES: &[&str] = &["opsboard.toml", "opsboard.json", "config.toml", "config.json"];

/// Resolve the configuration. An explicit `path` skips the environment.
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    if let Some(path) = path {
        return load_from_file(Some(path));
    }
    load_from_env()
        .inspect(|_| tracing::info!(source = "env", "configuration loaded"))
        .or_else(|reason| {
            tracing::debug!(%reason, "environment incomplete, searching for a config file");
            load_from_file(None)
        })
}

/// Build the configuration from `OPSBOARD_*` variables alone.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let backend = BackendConfig {
        url: env_var("OPSBOARD_BACKEND_URL")?,
        anon_key: env_var("OPSBOARD_ANON_KEY")?,
        timeout_secs: env_parse("OPSBOARD_TIMEOUT_SECS", defaults.backend.timeout_secs)?,
        max_attempts: env_parse("OPSBOARD_MAX_ATTEMPTS", defaults.backend.max_attempts)?,
    };
    let session = SessionConfig {
        path: std::env::var("OPSBOARD_SESSION_PATH").unwrap_or(defaults.session.path),
    };
    let report = ReportConfig {
        timezone: std::env::var("OPSBOARD_TIMEZONE").unwrap_or(defaults.report.timezone),
    };
    let logging = LoggingConfig {
        level: std::env::var("OPSBOARD_LOG_LEVEL").unwrap_or(defaults.logging.level),
        format: env_parse::<LogFormat>("OPSBOARD_LOG_FORMAT", defaults.logging.format)?,
    };

    validate(Config { backend, session, report, logging })
}

/// Read a config file; `None` searches the usual locations.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let file = match path {
        Some(file) if file.exists() => file,
        Some(file) => {
            return Err(OpsBoardError::Config(format!(
                "Config file not found: {}",
                file.display()
            )))
        }
        None => find_config_file().ok_or_else(|| {
            OpsBoardError::Config(
                "No config file found and OPSBOARD_BACKEND_URL / OPSBOARD_ANON_KEY are not set"
                    .into(),
            )
        })?,
    };

    tracing::info!(source = %file.display(), "configuration loaded");
    let contents = std::fs::read_to_string(&file)
        .map_err(|e| OpsBoardError::Config(format!("Cannot read {}: {e}", file.display())))?;
    validate(parse_config(&contents, &file)?)
}

/// Files without an extension are read as JSON.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let format = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let parsed = match format {
        "toml" => toml::from_str(contents).map_err(|e| e.to_string()),
        "json" => serde_json::from_str(contents).map_err(|e| e.to_string()),
        other => return Err(OpsBoardError::Config(format!("Unsupported config format: {other}"))),
    };
    parsed.map_err(|e| {
        OpsBoardError::Config(format!("Invalid {} config: {e}", format.to_uppercase()))
    })
}

/// Check values serde cannot: URL syntax, timezone name, attempt budget.
pub fn validate(mut config: Config) -> Result<Config> {
    let url = Url::parse(config.backend.url.trim())
        .map_err(|e| OpsBoardError::Config(format!("Invalid backend URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(OpsBoardError::Config(format!(
            "Backend URL must be http or https: {}",
            config.backend.url
        )));
    }
    config.backend.url = url.as_str().trim_end_matches('/').to_string();

    if config.backend.anon_key.trim().is_empty() {
        return Err(OpsBoardError::Config("Anon key must not be empty".into()));
    }
    if config.backend.max_attempts == 0 {
        return Err(OpsBoardError::Config("max_attempts must be at least 1".into()));
    }
    Tz::from_str(&config.report.timezone).map_err(|_| {
        OpsBoardError::Config(format!("Unknown timezone: {}", config.report.timezone))
    })?;

    Ok(config)
}

/// First existing config file in the search order, if any.
pub fn find_config_file() -> Option<PathBuf> {
    let mut dirs: Vec<PathBuf> = std::env::current_dir()
        .map(|cwd| vec![cwd.clone(), cwd.join(".."), cwd.join("../..")])
        .unwrap_or_default();
    let exe = std::env::current_exe().ok();
    if let Some(dir) = exe.as_deref().and_then(Path::parent) {
        dirs.push(dir.to_path_buf());
    }

    dirs.iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Blank counts as unset.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty()).ok_or_else(|| {
        OpsBoardError::Config(format!("Missing required environment variable: {}", key))
    })
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| OpsBoardError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;

    use super::*;

    static ENV: Lazy<Mutex<()>> = Lazy::new(Mutex::default);

    const VARS: &[&str] = &[
        "OPSBOARD_BACKEND_URL",
        "OPSBOARD_ANON_KEY",
        "OPSBOARD_TIMEOUT_SECS",
        "OPSBOARD_MAX_ATTEMPTS",
        "OPSBOARD_SESSION_PATH",
        "OPSBOARD_TIMEZONE",
        "OPSBOARD_LOG_LEVEL",
        "OPSBOARD_LOG_FORMAT",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn every_variable_is_read() {
        let _env = ENV.lock().unwrap();
        clear_env();

        std::env::set_var("OPSBOARD_BACKEND_URL", "https://abc.supabase.co/");
        std::env::set_var("OPSBOARD_ANON_KEY", "anon-key");
        std::env::set_var("OPSBOARD_TIMEOUT_SECS", "10");
        std::env::set_var("OPSBOARD_MAX_ATTEMPTS", "5");
        std::env::set_var("OPSBOARD_SESSION_PATH", "/tmp/session.json");
        std::env::set_var("OPSBOARD_TIMEZONE", "America/Lima");
        std::env::set_var("OPSBOARD_LOG_LEVEL", "debug");
        std::env::set_var("OPSBOARD_LOG_FORMAT", "JSON");

        let config = load_from_env().unwrap();
        assert_eq!(config.backend.url, "https://abc.supabase.co");
        assert_eq!(config.backend.anon_key, "anon-key");
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.backend.max_attempts, 5);
        assert_eq!(config.session.path, "/tmp/session.json");
        assert_eq!(config.report.timezone, "America/Lima");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);

        clear_env();
    }

    #[test]
    fn optional_variables_default() {
        let _env = ENV.lock().unwrap();
        clear_env();

        std::env::set_var("OPSBOARD_BACKEND_URL", "http://localhost:54321");
        std::env::set_var("OPSBOARD_ANON_KEY", "anon-key");

        let config = load_from_env().unwrap();
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.report.timezone, "America/Bogota");
        assert_eq!(config.logging.format, LogFormat::Pretty);

        clear_env();
    }

    #[test]
    fn anon_key_is_required() {
        let _env = ENV.lock().unwrap();
        clear_env();

        std::env::set_var("OPSBOARD_BACKEND_URL", "https://abc.supabase.co");

        let err = load_from_env().unwrap_err();
        assert_eq!(
            err,
            OpsBoardError::Config("Missing required environment variable: OPSBOARD_ANON_KEY".into())
        );

        clear_env();
    }

    #[test]
    fn unparsable_numbers_name_the_variable() {
        let _env = ENV.lock().unwrap();
        clear_env();

        std::env::set_var("OPSBOARD_BACKEND_URL", "https://abc.supabase.co");
        std::env::set_var("OPSBOARD_ANON_KEY", "anon-key");
        std::env::set_var("OPSBOARD_TIMEOUT_SECS", "soon");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, OpsBoardError::Config(ref m) if m.contains("OPSBOARD_TIMEOUT_SECS")));

        clear_env();
    }

    #[test]
    fn validation_checks_url_zone_and_attempts() {
        let mut config = Config::default();
        config.backend.anon_key = "anon".into();

        let mut bad_url = config.clone();
        bad_url.backend.url = "not a url".into();
        assert!(matches!(validate(bad_url), Err(OpsBoardError::Config(_))));

        let mut ftp = config.clone();
        ftp.backend.url = "ftp://abc.supabase.co".into();
        assert!(matches!(validate(ftp), Err(OpsBoardError::Config(_))));

        let mut bad_zone = config.clone();
        bad_zone.report.timezone = "Mars/Olympus".into();
        assert_eq!(
            validate(bad_zone).unwrap_err(),
            OpsBoardError::Config("Unknown timezone: Mars/Olympus".into())
        );

        let mut no_attempts = config.clone();
        no_attempts.backend.max_attempts = 0;
        assert!(validate(no_attempts).is_err());

        assert!(validate(config).is_ok());
    }

    #[test]
    fn toml_sections_override_defaults() {
        let body = r#"
[backend]
url = "https://abc.supabase.co"
anon_key = "anon"
max_attempts = 2

[logging]
format = "json"
"#;

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();

        let config = load_from_file(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.backend.max_attempts, 2);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.session.path, ".opsboard-session.json");
    }

    #[test]
    fn yaml_is_not_supported() {
        let err = parse_config("", Path::new("config.yaml")).unwrap_err();
        assert_eq!(err, OpsBoardError::Config("Unsupported config format: yaml".into()));
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load(Some(PathBuf::from("/nonexistent/opsboard.toml"))).unwrap_err();
        assert!(matches!(err, OpsBoardError::Config(ref m) if m.contains("not found")));
    }
}
