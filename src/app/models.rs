//! Data models for the Magazine Store reconciler
//!
//! The catalog service speaks JSON. Every endpoint has exactly one response
//! shape defined here, so a body that does not match is rejected by serde
//! instead of being coerced.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::token::VISIBLE_PREFIX;

/// Catalog partition name (e.g. "News")
pub type Category = String;

/// Magazine identifier, unique across the catalog
pub type MagazineId = u64;

/// Subscriber identifier as issued by the service
pub type SubscriberId = String;

/// Session credential substituted into every endpoint after the token call
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw token value for path substitution
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.0.chars().take(VISIBLE_PREFIX).collect();
        write!(f, "{}…", visible)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self)
    }
}

/// A single magazine as listed under its category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Magazine {
    pub id: MagazineId,
    #[serde(default)]
    pub name: String,
    pub category: Category,
}

/// A subscriber and the magazines they own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: SubscriberId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Weak references into the catalog, resolved by the coverage matcher
    #[serde(default, deserialize_with = "deserialize_magazine_ids")]
    pub magazine_ids: Vec<MagazineId>,
}

/// Accepts a missing or null list, integer ids and numeric strings.
///
/// Anything else in the list is dropped: a subscriber with a broken reference
/// should fail the coverage test, not abort the whole pass.
fn deserialize_magazine_ids<'de, D>(deserializer: D) -> Result<Vec<MagazineId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    let ids = raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match &value {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .collect();
    Ok(ids)
}

/// Response of the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub success: bool,
    pub token: Token,
}

/// Common `{ success, data, token }` wrapper of the data endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of the category list endpoint
pub type CategoryResponse = ApiEnvelope<Vec<Category>>;

/// Response of the per-category magazine endpoint
pub type MagazineListResponse = ApiEnvelope<Vec<Magazine>>;

/// Response of the subscriber list endpoint
pub type SubscriberListResponse = ApiEnvelope<Vec<Subscriber>>;

/// Response of the answer endpoint
pub type AnswerResponse = ApiEnvelope<CoverageResult>;

/// Body posted to the answer endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub subscribers: Vec<SubscriberId>,
}

/// Verdict returned by the answer endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageResult {
    pub answer_correct: bool,
    /// Elapsed time as reported by the service (e.g. "00:00:01.2345")
    #[serde(default)]
    pub total_time: String,
    /// Expected subscriber ids, when the service chooses to reveal them
    #[serde(default)]
    pub should_be: Option<Vec<SubscriberId>>,
}
