use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use source_interface::TransportConfig;

use crate::error::{Error, Result};

/// `config.toml` in the user's config directory, if one can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "weebcentral", "weebcentral").map(|p| p.config_dir().join("config.toml"))
}

pub fn parse_config(text: &str) -> Result<TransportConfig> {
    toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
}

/// Load transport settings. An explicit path must exist; the default path may
/// be absent, in which case built-in defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<TransportConfig> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match default_config_path() {
            Some(p) => (p, false),
            None => return Ok(TransportConfig::default()),
        },
    };

    match fs::read_to_string(&path) {
        Ok(text) => {
            let cfg = parse_config(&text)?;
            tracing::debug!(path = %path.display(), ?cfg, "loaded config");
            Ok(cfg)
        }
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => Ok(TransportConfig::default()),
        Err(e) => Err(Error::Config(format!("reading {}: {e}", path.display()))),
    }
}
