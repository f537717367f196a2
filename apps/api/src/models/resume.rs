//! Canonical resume schema shared by structuring, override merging and rendering.
//!
//! Field names serialize in camelCase because this is the exact shape the
//! structuring model is asked to emit and the shape API clients receive.

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder the model (and the decoder) use for contact fields it could not find.
pub const UNKNOWN: &str = "Unknown";

fn unknown() -> String {
    UNKNOWN.to_string()
}

/// Accepts a missing, `null` or blank string and turns it into [`UNKNOWN`].
fn string_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(unknown))
}

/// Treats `null` like an absent field for plain string/list fields.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default = "unknown", deserialize_with = "string_or_unknown")]
    pub name: String,
    #[serde(default = "unknown", deserialize_with = "string_or_unknown")]
    pub email: String,
    #[serde(default = "unknown", deserialize_with = "string_or_unknown")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            name: unknown(),
            email: unknown(),
            phone: unknown(),
            location: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    /// Chronological-of-mention order. Never re-sorted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact_info: ContactInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub professional_summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<String>,
}

impl ResumeData {
    /// Drops blank and case-insensitively repeated skills, keeping first-seen order.
    pub fn dedup_skills(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.skills.retain(|skill| {
            let key = skill.trim().to_lowercase();
            !key.is_empty() && seen.insert(key)
        });
    }
}

/// Caller-supplied contact values. Lives only for the duration of one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactOverrides {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ContactOverrides {
    /// True when no field carries a usable (non-blank) value.
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.phone, &self.email]
            .iter()
            .all(|field| field.as_deref().map_or(true, |v| v.trim().is_empty()))
    }
}
