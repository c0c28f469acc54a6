use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use toml::Value;

use shopfront_core::config::{AppConfig, LoadOptions};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    let fields: [(&str, String, Option<&str>); 7] = [
        (
            "server.bind_address",
            config.server.bind_address.clone(),
            Some("SHOPFRONT_SERVER_BIND_ADDRESS"),
        ),
        ("server.port", config.server.port.to_string(), Some("SHOPFRONT_SERVER_PORT")),
        (
            "server.graceful_shutdown_secs",
            config.server.graceful_shutdown_secs.to_string(),
            Some("SHOPFRONT_SERVER_GRACEFUL_SHUTDOWN_SECS"),
        ),
        (
            "catalog.data_path",
            config.catalog.data_path.display().to_string(),
            Some("SHOPFRONT_CATALOG_DATA_PATH"),
        ),
        (
            "catalog.frontend_dir",
            config.catalog.frontend_dir.display().to_string(),
            Some("SHOPFRONT_CATALOG_FRONTEND_DIR"),
        ),
        ("logging.level", config.logging.level.clone(), Some("SHOPFRONT_LOGGING_LEVEL")),
        (
            "logging.format",
            format!("{:?}", config.logging.format).to_lowercase(),
            Some("SHOPFRONT_LOGGING_FORMAT"),
        ),
    ];

    for (field, value, env_var) in fields {
        lines.push(render_line(
            field,
            &value,
            field_source(field, env_var, config_file_doc.as_ref(), config_file_path.as_deref()),
        ));
    }

    lines.join("\n")
}

fn render_line(field: &str, value: &str, source: String) -> String {
    format!("- {field} = {value} ({source})")
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("shopfront.toml"), PathBuf::from("config/shopfront.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    field: &str,
    env_var: Option<&str>,
    doc: Option<&Value>,
    path: Option<&Path>,
) -> String {
    if let Some(var) = env_var {
        if env::var(var).map(|value| !value.trim().is_empty()).unwrap_or(false) {
            return format!("env:{var}");
        }
    }

    if let (Some(doc), Some(path)) = (doc, path) {
        if file_has_field(doc, field) {
            return format!("file:{}", path.display());
        }
    }

    "default".to_string()
}

fn file_has_field(doc: &Value, field: &str) -> bool {
    let mut current = doc;
    for part in field.split('.') {
        match current.get(part) {
            Some(next) => current = next,
            None => return false,
        }
    }
    true
}
