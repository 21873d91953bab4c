//! Country records and the REST Countries wire format.

use derive_getters::Getters;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument};

/// A country eligible for question generation.
///
/// Always has a non-empty display name, at least one non-blank capital,
/// and a non-empty flag image reference. Construct through
/// [`CountryRecord::new`] or [`RawCountry::into_record`]; deserialization
/// goes through the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct CountryRecord {
    /// Common name shown to the player.
    display_name: String,
    /// Capitals in source order. Never empty.
    capitals: Vec<String>,
    /// Flag image reference (SVG URL).
    flag_ref: String,
    /// ISO 3166-1 alpha-2 code, when the source provides one.
    country_code: Option<String>,
}

impl CountryRecord {
    /// Creates a record, returning `None` when it would violate the record invariants.
    ///
    /// Blank capitals are discarded before the check.
    pub fn new(
        display_name: impl Into<String>,
        capitals: impl IntoIterator<Item = impl Into<String>>,
        flag_ref: impl Into<String>,
    ) -> Option<Self> {
        let display_name = display_name.into().trim().to_string();
        let flag_ref = flag_ref.into().trim().to_string();
        let capitals: Vec<String> = capitals
            .into_iter()
            .map(Into::into)
            .map(|c: String| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        if display_name.is_empty() || flag_ref.is_empty() || capitals.is_empty() {
            return None;
        }

        Some(Self {
            display_name,
            capitals,
            flag_ref,
            country_code: None,
        })
    }

    /// Attaches a two-letter country code. Anything else is ignored.
    #[must_use]
    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into().trim().to_ascii_uppercase();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            self.country_code = Some(code);
        }
        self
    }

    /// The capital used as the correct answer: the first one listed.
    pub fn capital(&self) -> &str {
        self.capitals.first().map(String::as_str).unwrap_or_default()
    }

    /// Flag emoji built from the country code's regional indicator symbols.
    pub fn flag_emoji(&self) -> Option<String> {
        self.country_code.as_deref().and_then(flag_emoji)
    }
}

/// Serialized shape of a [`CountryRecord`], before validation.
#[derive(Deserialize)]
struct RecordFields {
    display_name: String,
    capitals: Vec<String>,
    flag_ref: String,
    #[serde(default)]
    country_code: Option<String>,
}

impl<'de> Deserialize<'de> for CountryRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = RecordFields::deserialize(deserializer)?;
        let record = CountryRecord::new(fields.display_name, fields.capitals, fields.flag_ref)
            .ok_or_else(|| {
                serde::de::Error::custom(
                    "country record needs a name, a flag and at least one capital",
                )
            })?;
        Ok(match fields.country_code {
            Some(code) => record.with_country_code(code),
            None => record,
        })
    }
}

/// Converts a two-letter code into its regional-indicator flag emoji.
///
/// Returns `None` unless `code` is exactly two ASCII letters.
pub(crate) fn flag_emoji(code: &str) -> Option<String> {
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    code.chars()
        .map(|c| char::from_u32(0x1F1E6 + (c.to_ascii_uppercase() as u32 - 'A' as u32)))
        .collect()
}

/// Country as served by REST Countries v3.1 (`fields=name,capital,flags,cca2`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCountry {
    /// Country names.
    #[serde(default)]
    pub name: RawName,
    /// Capitals, absent for some territories.
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    /// Flag image URLs.
    #[serde(default)]
    pub flags: Option<RawFlags>,
    /// ISO 3166-1 alpha-2 code.
    #[serde(default)]
    pub cca2: Option<String>,
}

/// Name block of a [`RawCountry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawName {
    /// Common English name.
    #[serde(default)]
    pub common: String,
    /// Official English name.
    #[serde(default)]
    pub official: Option<String>,
}

/// Flag block of a [`RawCountry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFlags {
    /// SVG flag URL.
    #[serde(default)]
    pub svg: Option<String>,
    /// PNG flag URL.
    #[serde(default)]
    pub png: Option<String>,
    /// Alt text describing the flag.
    #[serde(default)]
    pub alt: Option<String>,
}

impl RawCountry {
    /// Converts to a [`CountryRecord`] if it has an SVG flag and a capital.
    pub fn into_record(self) -> Option<CountryRecord> {
        let flag = self.flags.and_then(|f| f.svg)?;
        let capitals = self.capital?;
        let record = CountryRecord::new(self.name.common, capitals, flag)?;
        Some(match self.cca2 {
            Some(code) => record.with_country_code(code),
            None => record,
        })
    }
}

/// Keeps the countries usable for questions, in source order.
#[instrument(skip_all, fields(raw = raw.len()))]
pub fn usable_records(raw: Vec<RawCountry>) -> Vec<CountryRecord> {
    let total = raw.len();
    let records: Vec<CountryRecord> = raw.into_iter().filter_map(RawCountry::into_record).collect();
    debug!(
        usable = records.len(),
        dropped = total - records.len(),
        "Filtered country records"
    );
    records
}
