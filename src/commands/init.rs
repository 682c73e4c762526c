use crate::commands::Out;
use crate::{Config, Result};
use std::path::Path;

/// Creates the fundbook home directory, moves the credentials file into it,
/// and writes the initial config file.
pub async fn init(home: &Path, credentials: &Path, sheet_url: &str) -> Result<Out<()>> {
    let config = Config::create(home, credentials, sheet_url).await?;
    Ok(Out::new_message(format!(
        "Initialized fundbook home at '{}' for spreadsheet {}",
        config.root().display(),
        config.spreadsheet_id()
    )))
}
