//! Configuration management module.
//!
//! This module handles loading and saving the application configuration:
//! backend URL, authentication provider, data source and the display
//! strings shown on the dashboard and QR screen.

mod error;

pub use error::ConfigError;

use crate::api::Role;
use crate::error::AppError;
use log::*;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/sight-lipa";

/// Selects which authenticator checks credentials.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Remote,
    Table,
}

/// Selects where landmark data comes from.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Remote,
    Memory,
}

/// Entry of the fixed user table.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Authentication section of the configuration file.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_auth_provider")]
    pub provider: AuthProvider,
    #[serde(default)]
    pub users: Vec<Credential>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            provider: default_auth_provider(),
            users: vec![],
        }
    }
}

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub auth: AuthConfig,
    pub data_source: DataSource,
    pub qr_code_url: String,
    pub app_name: String,
    pub city: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default = "default_data_source")]
    pub data_source: DataSource,
    #[serde(default = "default_qr_code_url")]
    pub qr_code_url: String,
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_city")]
    pub city: String,
}

fn default_api_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_auth_provider() -> AuthProvider {
    AuthProvider::Remote
}

fn default_data_source() -> DataSource {
    DataSource::Remote
}

fn default_qr_code_url() -> String {
    "http://localhost:8081/touristForm".to_string()
}

fn default_app_name() -> String {
    "SIGHT-Lipa".to_string()
}

fn default_city() -> String {
    "Lipa City".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding the defaults.
    ///
    pub fn new() -> Config {
        Config {
            api_url: default_api_url(),
            auth: AuthConfig::default(),
            data_source: default_data_source(),
            qr_code_url: default_qr_code_url(),
            app_name: default_app_name(),
            city: default_city(),
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. If no file exists yet, write the defaults to
    /// it so they can be edited.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        let file_path = dir_path.join(Path::new(FILE_NAME));
        self.file_path = Some(file_path.clone());

        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            self.apply(&contents)?;
            debug!("Loaded configuration from {}", file_path.display());
        } else {
            info!("No configuration found, writing defaults to {}", file_path.display());
            self.save()?;
        }

        Ok(())
    }

    /// Replace the current values with those parsed from YAML `contents`.
    ///
    fn apply(&mut self, contents: &str) -> Result<(), ConfigError> {
        let data: FileSpec = serde_yaml::from_str(contents)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;

        if Url::parse(&data.api_url).is_err() {
            return Err(ConfigError::InvalidApiUrl(data.api_url));
        }
        if let Some(entry) = data.auth.users.iter().find(|u| u.username.trim().is_empty()) {
            return Err(ConfigError::InvalidCredential(format!(
                "empty username (role {})",
                entry.role
            )));
        }

        self.api_url = data.api_url;
        self.auth = data.auth;
        self.data_source = data.data_source;
        self.qr_code_url = data.qr_code_url;
        self.app_name = data.app_name;
        self.city = data.city;
        Ok(())
    }

    /// Serialize the configuration and write it to the disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            api_url: self.api_url.clone(),
            auth: self.auth.clone(),
            data_source: self.data_source,
            qr_code_url: self.qr_code_url.clone(),
            app_name: self.app_name.clone(),
            city: self.city.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Switch to the user table and the in-memory store for this run only.
    ///
    pub fn force_offline(&mut self) {
        self.auth.provider = AuthProvider::Table;
        self.data_source = DataSource::Memory;
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}
