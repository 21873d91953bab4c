//! Dataset providers: where the pool of countries comes from.

use super::error::FetchError;
use super::record::{CountryRecord, RawCountry, usable_records};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Query string selecting the only fields the game needs.
pub const COUNTRY_FIELDS: &str = "name,capital,flags,cca2";

/// Public REST Countries endpoint.
pub const DEFAULT_API_URL: &str = "https://restcountries.com";

/// One-shot source of usable country records.
///
/// Implementations return only records that already satisfy the
/// [`CountryRecord`] invariants.
#[async_trait]
pub trait DatasetProvider: Send + Sync {
    /// Loads the dataset.
    async fn load(&self) -> Result<Vec<CountryRecord>, FetchError>;

    /// Short description for logs and the loading screen.
    fn describe(&self) -> String;
}

/// REST Countries HTTP client.
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    base_url: String,
    client: reqwest::Client,
}

impl RestCountriesClient {
    /// Creates a client for `base_url` (without the `/v3.1` suffix).
    #[instrument(skip_all, fields(base_url = %base_url.as_ref(), ?timeout))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::from_reqwest(&base_url, &e))?;
        Ok(Self { base_url, client })
    }

    /// Full URL of the countries listing.
    pub fn endpoint(&self) -> String {
        format!("{}/v3.1/all?fields={}", self.base_url, COUNTRY_FIELDS)
    }
}

#[async_trait]
impl DatasetProvider for RestCountriesClient {
    #[instrument(skip(self), fields(url = %self.endpoint()))]
    async fn load(&self) -> Result<Vec<CountryRecord>, FetchError> {
        let url = self.endpoint();
        info!("Fetching countries");

        let response = self.client.get(&url).send().await.map_err(|e| {
            let err = FetchError::from_reqwest(&url, &e);
            error!(error = %err, "Country request failed");
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            let err = FetchError::Status {
                url,
                status: status.as_u16(),
            };
            error!(error = %err, "Country request rejected");
            return Err(err);
        }

        let raw: Vec<RawCountry> = response.json().await.map_err(|e| {
            let err = FetchError::from_reqwest(&url, &e);
            error!(error = %err, "Country payload unreadable");
            err
        })?;

        debug!(raw = raw.len(), "Received countries");
        Ok(usable_records(raw))
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Reads a REST Countries JSON payload from disk.
#[derive(Debug, Clone)]
pub struct JsonFileDataset {
    path: PathBuf,
}

impl JsonFileDataset {
    /// Creates a provider for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetProvider for JsonFileDataset {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Vec<CountryRecord>, FetchError> {
        info!("Reading countries from file");
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            let err = FetchError::Io {
                path: self.path.display().to_string(),
                message: e.to_string(),
            };
            error!(error = %err, "Dataset file unreadable");
            err
        })?;

        let raw: Vec<RawCountry> = serde_json::from_str(&content).map_err(|e| {
            let err = FetchError::from(e);
            error!(error = %err, "Dataset file malformed");
            err
        })?;

        Ok(usable_records(raw))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Dataset already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticDataset {
    records: Vec<CountryRecord>,
}

impl StaticDataset {
    /// Wraps the given records.
    pub fn new(records: Vec<CountryRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DatasetProvider for StaticDataset {
    async fn load(&self) -> Result<Vec<CountryRecord>, FetchError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("{} built-in countries", self.records.len())
    }
}
