use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier assigned to a template by the listing API.
///
/// Imgflip serves ids as strings, but the shape is not contractual, so both
/// JSON strings and integers are accepted and normalized to text. Uniqueness
/// is assumed from the API and not enforced locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TemplateId(String);

impl TemplateId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TemplateId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self(number.to_string()),
        })
    }
}

/// One meme template entry as returned by the listing API.
///
/// Records are immutable once loaded; unknown response fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub id: TemplateId,
    pub name: String,
    pub url: String,
}

impl TemplateRecord {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: TemplateId::new(id),
            name: name.into(),
            url: url.into(),
        }
    }
}
