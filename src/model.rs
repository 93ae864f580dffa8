//! Input records produced by the search-fetch collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Results of one keyword search at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultBatch {
    pub keyword: String,
    #[serde(with = "iso_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub results: Vec<ResultItem>,
}

/// A single search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
}

impl ResultItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: description.into(),
        }
    }
}

impl SearchResultBatch {
    pub fn new(keyword: impl Into<String>, timestamp: DateTime<Utc>, results: Vec<ResultItem>) -> Self {
        Self {
            keyword: keyword.into(),
            timestamp,
            results,
        }
    }

    /// Parse and validate a JSON array of batches.
    pub fn from_json_str(json: &str) -> Result<Vec<Self>, InputError> {
        let batches: Vec<Self> = serde_json::from_str(json)?;
        Self::validate_all(&batches)?;
        Ok(batches)
    }

    /// Parse and validate a JSON array of batches from raw bytes.
    pub fn from_json_slice(json: &[u8]) -> Result<Vec<Self>, InputError> {
        let batches: Vec<Self> = serde_json::from_slice(json)?;
        Self::validate_all(&batches)?;
        Ok(batches)
    }

    /// Structural checks serde cannot express.
    pub fn validate_all(batches: &[Self]) -> Result<(), InputError> {
        for (index, batch) in batches.iter().enumerate() {
            if batch.keyword.trim().is_empty() {
                return Err(InputError::EmptyKeyword { index });
            }
        }
        Ok(())
    }

    /// Number of result items, usable or not.
    pub fn document_count(&self) -> usize {
        self.results.len()
    }
}

/// ISO-8601 timestamps. The upstream store writes naive local timestamps
/// (no offset); those are read as UTC.
mod iso_timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid ISO-8601 timestamp: {raw}")))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }
}
