use serde::Deserialize;
use std::path::PathBuf;

use super::errors::ConfigError;

/// On-disk shape of the ticker list resource
#[derive(Debug, Deserialize)]
struct TickerListFile {
    tickers: Vec<String>,
}

/// Loads the ordered list of tracked tickers from a JSON resource
///
/// The file is re-read on every call so edits take effect on the next
/// ingestion run without a restart.
#[derive(Debug, Clone)]
pub struct TickerListLoader {
    path: PathBuf,
}

impl TickerListLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and validate the ticker list
    ///
    /// Symbols are trimmed and returned in file order. A missing `tickers`
    /// key, a non-string entry or a blank symbol rejects the whole file.
    pub fn load(&self) -> Result<Vec<String>, ConfigError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|source| ConfigError::TickerListUnreadable {
                path: self.path.clone(),
                source,
            })?;

        let file: TickerListFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::TickerListMalformed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        let mut tickers = Vec::with_capacity(file.tickers.len());
        for (index, raw) in file.tickers.into_iter().enumerate() {
            let ticker = raw.trim();
            if ticker.is_empty() {
                return Err(ConfigError::TickerListMalformed {
                    path: self.path.clone(),
                    reason: format!("entry {} is blank", index),
                });
            }
            tickers.push(ticker.to_string());
        }

        tracing::debug!("Loaded {} tickers from {}", tickers.len(), self.path.display());

        Ok(tickers)
    }
}
