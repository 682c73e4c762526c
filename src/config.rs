//! Configuration file handling.
//!
//! The configuration file is stored at `$FUNDBOOK_HOME/config.json` and holds
//! the Google Sheet URL. Credentials live next to it under `.secrets/`.

use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

const APP_NAME: &str = "fundbook";
const CONFIG_VERSION: u8 = 1;
const SECRETS: &str = ".secrets";
const CREDENTIALS_JSON: &str = "credentials.json";
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app. You
/// instantiate it by providing the path to `$FUNDBOOK_HOME`, from which it
/// loads `config.json` and resolves the paths of the other expected files.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    secrets: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    spreadsheet_id: String,
}

impl Config {
    /// Creates the data directory and its contents:
    /// - an initial `config.json` using `sheet_url`
    /// - the `.secrets` subdirectory, into which `credentials_file` is moved.
    pub async fn create(
        dir: impl Into<PathBuf>,
        credentials_file: &Path,
        sheet_url: &str,
    ) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the fundbook home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let secrets = root.join(SECRETS);
        utils::make_dir(&secrets).await?;
        utils::rename(credentials_file, secrets.join(CREDENTIALS_JSON)).await?;

        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            sheet_url: sheet_url.to_string(),
        };
        let config_path = root.join(CONFIG_JSON);
        config_file.save(&config_path).await?;

        let spreadsheet_id = extract_spreadsheet_id(sheet_url)?;
        Ok(Self {
            root,
            secrets,
            config_path,
            config_file,
            spreadsheet_id,
        })
    }

    /// Validates that the home directory and config file exist, then loads the
    /// configuration.
    pub async fn load(fundbook_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = fundbook_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Fundbook home is missing, run 'fundbook init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display());
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let spreadsheet_id = extract_spreadsheet_id(&config_file.sheet_url)?;

        let config = Self {
            root: root.clone(),
            secrets: root.join(SECRETS),
            config_path,
            config_file,
            spreadsheet_id,
        };
        if !config.secrets.is_dir() {
            bail!(
                "The secrets directory is missing '{}'",
                config.secrets.display()
            );
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn sheet_url(&self) -> &str {
        &self.config_file.sheet_url
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.secrets.join(CREDENTIALS_JSON)
    }
}

/// The subset of configuration that is persisted as `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    app_name: String,
    config_version: u8,
    sheet_url: String,
}

impl ConfigFile {
    async fn save(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize the config file")?;
        utils::write(path, json).await
    }

    async fn load(path: &Path) -> Result<Self> {
        utils::deserialize(path).await
    }
}

/// Extracts the spreadsheet ID from a Google Sheets URL, which looks like
/// `https://docs.google.com/spreadsheets/d/<id>/edit`.
fn extract_spreadsheet_id(sheet_url: &str) -> Result<String> {
    let url = Url::parse(sheet_url)
        .with_context(|| format!("The sheet URL could not be parsed '{sheet_url}'"))?;
    let mut segments = url
        .path_segments()
        .with_context(|| format!("The sheet URL has no path '{sheet_url}'"))?;
    segments
        .by_ref()
        .find(|segment| *segment == "d")
        .and_then(|_| segments.next())
        .filter(|id| !id.is_empty())
        .map(|id| id.to_string())
        .with_context(|| format!("No spreadsheet ID found in the sheet URL '{sheet_url}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_credentials(dir: &Path) -> PathBuf {
        let path = dir.join("credentials.json");
        let content = r#"{
            "client_id": "test-client-id",
            "client_secret": "test-secret",
            "access_token": "test-token",
            "refresh_token": ""
        }"#;
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_extract_spreadsheet_id() {
        let id = extract_spreadsheet_id(
            "https://docs.google.com/spreadsheets/d/14BiC6WpAd0UyWae6Efg1AQTwnCWpDTR9dla7FbhzHB8/edit",
        )
        .unwrap();
        assert_eq!(id, "14BiC6WpAd0UyWae6Efg1AQTwnCWpDTR9dla7FbhzHB8");
    }

    #[test]
    fn test_extract_spreadsheet_id_no_edit_suffix() {
        let id = extract_spreadsheet_id("https://docs.google.com/spreadsheets/d/abc123").unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn test_extract_spreadsheet_id_invalid() {
        assert!(extract_spreadsheet_id("https://docs.google.com/spreadsheets/").is_err());
        assert!(extract_spreadsheet_id("not a url").is_err());
    }

    #[tokio::test]
    async fn test_create_then_load() {
        let temp = TempDir::new().unwrap();
        let credentials = write_credentials(temp.path());
        let home = temp.path().join("fundbook");

        let created = Config::create(
            &home,
            &credentials,
            "https://docs.google.com/spreadsheets/d/abc123/edit",
        )
        .await
        .unwrap();
        assert_eq!(created.spreadsheet_id(), "abc123");
        assert!(created.credentials_path().is_file());

        let loaded = Config::load(&home).await.unwrap();
        assert_eq!(loaded.spreadsheet_id(), "abc123");
        assert_eq!(
            loaded.sheet_url(),
            "https://docs.google.com/spreadsheets/d/abc123/edit"
        );
    }

    #[tokio::test]
    async fn test_load_missing_home_fails() {
        let temp = TempDir::new().unwrap();
        assert!(Config::load(temp.path().join("nope")).await.is_err());
    }
}
