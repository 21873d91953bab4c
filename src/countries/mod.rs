mod error;
mod provider;
mod record;

pub use error::FetchError;
pub use provider::{
    COUNTRY_FIELDS, DEFAULT_API_URL, DatasetProvider, JsonFileDataset, RestCountriesClient,
    StaticDataset,
};
pub use record::{CountryRecord, RawCountry, RawFlags, RawName, usable_records};
pub(crate) use record::flag_emoji;
