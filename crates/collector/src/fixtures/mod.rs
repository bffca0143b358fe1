//! Fixture collection and output.
//!
//! One collector per fixture file. Each collector queries the admin API,
//! projects the response into the fixture shape, and writes the result
//! through [`FixtureWriter`] as compact JSON.

pub mod catalog;
pub mod keywords;
pub mod sales_channel;
pub mod seo_url;

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::admin::AdminApiError;

/// Result limit shared by all bounded fixture queries.
pub const DEFAULT_LIMIT: u32 = 500;

/// Errors that can occur while collecting fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Admin API call failed.
    #[error("Admin API error: {0}")]
    Api(#[from] AdminApiError),

    /// The filtered sales-channel search returned no records.
    #[error("No sales channel matched the fixture query")]
    NoSalesChannel,

    /// A sales channel has no domain to derive URLs from.
    #[error("Sales channel {0} has no domains")]
    MissingDomain(String),

    /// Fixture serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Fixture file write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes fixture files into the output directory.
#[derive(Debug, Clone)]
pub struct FixtureWriter {
    dir: PathBuf,
}

impl FixtureWriter {
    /// Create a writer, creating the output directory if missing.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Io` if the directory cannot be created.
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, FixtureError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    /// Path a fixture file will be written to.
    #[must_use]
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Write a fixture as compact JSON, overwriting any previous version.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Json` if serialization fails and
    /// `FixtureError::Io` if the write fails.
    pub async fn write<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        fixture: &T,
    ) -> Result<(), FixtureError> {
        let json = serde_json::to_vec(fixture)?;
        tokio::fs::write(self.dir.join(file_name), json).await?;
        Ok(())
    }
}
