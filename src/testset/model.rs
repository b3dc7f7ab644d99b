//! Test set records as stored for the evaluation harness

use crate::config::TestSetIdentity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One evaluable unit: a prompt and the response expected for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// `<test set id>-T<row index>`
    pub id: String,
    /// `<prefix> #<row index + 1>`
    pub name: String,
    pub prompt: String,
    /// Reserved for expected intermediate activations; always empty on import
    pub expected_activations: Vec<serde_json::Value>,
    pub expected_response: String,
}

impl TestCase {
    /// Build the test case for the row at zero-based `index`
    pub fn new(identity: &TestSetIdentity, index: usize, prompt: &str, response: &str) -> Self {
        Self {
            id: format!("{}-T{}", identity.id, index),
            name: format!("{} #{}", identity.case_prefix, index + 1),
            prompt: prompt.to_string(),
            expected_activations: Vec::new(),
            expected_response: response.to_string(),
        }
    }
}

/// A named collection of test cases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSet {
    pub id: String,
    pub name: String,
    pub description: String,
    /// In source row order
    pub tests: Vec<TestCase>,
    #[serde(with = "utc_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "utc_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl TestSet {
    /// Assemble a freshly imported test set; both timestamps are `now`
    pub fn new(identity: &TestSetIdentity, tests: Vec<TestCase>, now: DateTime<Utc>) -> Self {
        Self {
            id: identity.id.clone(),
            name: identity.name.clone(),
            description: identity.description.clone(),
            tests,
            created_at: now,
            updated_at: now,
        }
    }

    /// Compact JSON as written to the store
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// ISO-8601 UTC with microseconds and a literal `Z`, e.g.
/// `2024-05-01T12:00:00.000000Z`
pub mod utc_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

    pub fn format(dt: &DateTime<Utc>) -> String {
        dt.format(FORMAT).to_string()
    }

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
