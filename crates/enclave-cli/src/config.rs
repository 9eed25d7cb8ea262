//! Configuration lookup for the CLI.
//!
//! The first file found wins: an explicit `--config` path, then
//! `enclave/config.toml` under the working directory, then `config.toml` in
//! the platform config directory. With no file the defaults apply. The
//! chosen configuration is validated before use.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use enclave::{EnclaveError, config::AppConfig};

const LOCAL_CONFIG: &str = "enclave/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for EnclaveError {
    fn from(err: ConfigError) -> Self {
        EnclaveError::Config(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    Explicit,
    Local,
    System,
}

/// Loads and validates the configuration.
///
/// # Errors
///
/// Returns `EnclaveError::Config` when an explicit file is missing, a file
/// is not valid TOML, or a value fails validation.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, EnclaveError> {
    let explicit: Option<&Path> = explicit_path.as_ref().map(|path| path.as_ref());

    let config = match locate(explicit) {
        Some((source, path)) => {
            info!(source:?, path = path.display().to_string(); "Loading configuration");
            read_config(&path)?
        }
        None => {
            debug!("No configuration file found, using default configuration");
            AppConfig::default()
        }
    };

    config.validate()?;
    Ok(config)
}

fn locate(explicit: Option<&Path>) -> Option<(ConfigSource, PathBuf)> {
    if let Some(path) = explicit {
        return Some((ConfigSource::Explicit, path.to_path_buf()));
    }

    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return Some((ConfigSource::Local, local));
    }

    let Some(dirs) = ProjectDirs::from("com", "enclave", "enclave") else {
        debug!("Could not determine platform-specific config directory");
        return None;
    };
    let system = dirs.config_dir().join("config.toml");
    if !system.exists() {
        debug!(path = system.display().to_string(); "System configuration file not found");
        return None;
    }
    Some((ConfigSource::System, system))
}

fn read_config(path: &Path) -> Result<AppConfig, EnclaveError> {
    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => EnclaveError::from(ConfigError::MissingFile(path.to_path_buf())),
        _ => EnclaveError::from(err),
    })?;

    toml::from_str(&content).map_err(|err| EnclaveError::from(ConfigError::Parse(err.to_string())))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let file = config_file(
            r##"
            [render]
            corridor_width = 24.0
            corridors = false

            [style]
            background_color = "#ffffff"
            "##,
        );

        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.render().corridor_width(), 24.0);
        assert!(!config.render().corridors());
        assert!(config.style().background_color().unwrap().is_some());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let file = config_file("[render]\ncanvas_margin = 0.0\n");

        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.render().canvas_margin(), 0.0);
        assert_eq!(config.render().corridor_width(), 16.0);
        assert_eq!(config.style().border_radius(), 8.0);
    }

    #[test]
    fn test_explicit_path_wins_without_touching_disk() {
        let located = locate(Some(Path::new("nowhere/custom.toml")));
        assert_eq!(
            located,
            Some((ConfigSource::Explicit, PathBuf::from("nowhere/custom.toml")))
        );
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = load_config(Some("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, EnclaveError::Config(_)));
        assert!(err.to_string().contains("Missing configuration file"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_toml = config_file("[render\n");
        assert!(matches!(
            load_config(Some(bad_toml.path())),
            Err(EnclaveError::Config(_))
        ));

        let bad_color = config_file("[style]\nbackground_color = \"nope\"\n");
        assert!(matches!(
            load_config(Some(bad_color.path())),
            Err(EnclaveError::Config(_))
        ));
    }
}
