//! CLI command implementations
//!
//! `init` lays out the data file and images directory; `serve` loads the
//! config and runs the HTTP server on a tokio runtime.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::http_server::{HttpServer, HttpServerConfig};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON file holding the animal collection
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Directory uploaded images are written to
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,

    /// Host to bind (default "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind (default 5380)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins (empty means permissive)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./data/animals.json")
}
fn default_images_dir() -> PathBuf {
    PathBuf::from("./data/images")
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5380
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            images_dir: default_images_dir(),
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from file. A missing file yields the defaults so
    /// the registry runs out of the box.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }
        if self.images_dir.as_os_str().is_empty() {
            return Err(CliError::config_error("images_dir must not be empty"));
        }
        Ok(())
    }

    fn to_http_config(&self, port_override: Option<u16>) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: port_override.unwrap_or(self.port),
            cors_origins: self.cors_origins.clone(),
            data_file: self.data_file.clone(),
            images_dir: self.images_dir.clone(),
        }
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Initialize the data file and images directory.
///
/// Writes an empty JSON array to the data file and creates the images
/// directory. Refuses to overwrite an existing data file.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    if config.data_file.exists() {
        return Err(CliError::already_initialized());
    }

    if let Some(parent) = config.data_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                CliError::io_error(format!("Failed to create data directory: {}", e))
            })?;
        }
    }
    fs::write(&config.data_file, "[]")
        .map_err(|e| CliError::io_error(format!("Failed to create data file: {}", e)))?;

    fs::create_dir_all(&config.images_dir)
        .map_err(|e| CliError::io_error(format!("Failed to create images directory: {}", e)))?;

    println!("{{\"initialized\": true}}");

    Ok(())
}

/// Start the registry HTTP server.
pub fn serve(config_path: &Path, port_override: Option<u16>) -> CliResult<()> {
    let config = Config::load(config_path)?;

    if !config.data_file.exists() {
        return Err(CliError::not_initialized());
    }

    let server = HttpServer::with_config(config.to_http_config(port_override));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_config(temp_dir: &TempDir) -> PathBuf {
        let config_path = temp_dir.path().join("menagerie.json");
        let config = json!({
            "data_file": temp_dir.path().join("data").join("animals.json").to_string_lossy(),
            "images_dir": temp_dir.path().join("data").join("images").to_string_lossy(),
        });
        fs::write(&config_path, config.to_string()).unwrap();
        config_path
    }

    #[test]
    fn test_init_creates_data_file_and_images_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        init(&config_path).unwrap();

        let data_file = temp_dir.path().join("data").join("animals.json");
        assert_eq!(fs::read_to_string(&data_file).unwrap(), "[]");
        assert!(temp_dir.path().join("data").join("images").is_dir());
    }

    #[test]
    fn test_init_refuses_reinit() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        init(&config_path).unwrap();

        let result = init(&config_path);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().code(),
            &CliErrorCode::AlreadyInitialized
        );
    }

    #[test]
    fn test_serve_requires_init() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        let result = serve(&config_path, None);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::NotInitialized);
    }

    #[test]
    fn test_config_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("menagerie.json");
        fs::write(&config_path, "{}").unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.port, 5380);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.data_file, PathBuf::from("./data/animals.json"));
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&temp_dir.path().join("nope.json")).unwrap();
        assert_eq!(config.port, 5380);
    }

    #[test]
    fn test_config_rejects_empty_paths() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("menagerie.json");
        fs::write(&config_path, r#"{"data_file": ""}"#).unwrap();

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_config_rejects_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("menagerie.json");
        fs::write(&config_path, "not json").unwrap();

        assert!(Config::load(&config_path).is_err());
    }
}
