//! Suspects
//!
//! Persons of interest produced by the suspect-ranking stage. Guilt
//! probabilities are independent per suspect and are not normalized.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::evidence::{canonical_board_id, suspect_board_id};
use crate::lenient;

/// Guilt probability assumed when the agent names a suspect but gives no score.
pub const DEFAULT_GUILT_PROBABILITY: u8 = 10;

fn default_guilt() -> u8 {
    DEFAULT_GUILT_PROBABILITY
}

/// Clamp a raw score into the 0-100 integer range.
pub fn clamp_guilt(raw: f64) -> u8 {
    if raw.is_nan() {
        return DEFAULT_GUILT_PROBABILITY;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

fn guilt<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(lenient::value_to_f64)
        .map(clamp_guilt)
        .unwrap_or(DEFAULT_GUILT_PROBABILITY))
}

/// One justification for suspecting someone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SuspicionReason {
    #[serde(default, deserialize_with = "lenient::string")]
    pub reason: String,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub evidence_ids: Vec<String>,
}

/// Descriptive attributes; each may be unknown.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KeyAttributes {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub vehicle: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub last_seen: Option<String>,
}

/// A link from one suspect to another.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuspectRelationship {
    #[serde(alias = "target_id", deserialize_with = "lenient::string")]
    pub target_suspect_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub evidence_ids: Vec<String>,
}

/// A person of interest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suspect {
    #[serde(default, alias = "id", deserialize_with = "lenient::string")]
    pub suspect_id: String,
    #[serde(default, alias = "name", deserialize_with = "lenient::string")]
    pub display_name: String,
    #[serde(default = "default_guilt", deserialize_with = "guilt")]
    pub guilt_probability: u8,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub why_suspected: Vec<SuspicionReason>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub key_attributes: KeyAttributes,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub relationships: Vec<SuspectRelationship>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub recommended_next_action: Option<String>,
}

impl Suspect {
    pub fn new(suspect_id: impl Into<String>, display_name: impl Into<String>, guilt: u8) -> Self {
        Self {
            suspect_id: suspect_id.into(),
            display_name: display_name.into(),
            guilt_probability: guilt.min(100),
            why_suspected: Vec::new(),
            key_attributes: KeyAttributes::default(),
            relationships: Vec::new(),
            recommended_next_action: None,
        }
    }

    /// Board title, e.g. `Unknown Male #1 (20%)`.
    pub fn board_title(&self) -> String {
        format!("{} ({}%)", self.display_name, self.guilt_probability)
    }
}

/// Fill in ids and placeholder names the agent left blank.
///
/// Given ids are trimmed and canonicalized first. A blank id then takes the
/// lowest `SUS-NN` no other suspect uses, so two suspects never share an id.
pub fn normalize_suspects(suspects: Vec<Suspect>) -> Vec<Suspect> {
    let mut suspects: Vec<Suspect> = suspects
        .into_iter()
        .map(|mut suspect| {
            suspect.suspect_id = canonical_board_id(&suspect.suspect_id);
            suspect
        })
        .collect();
    let mut taken: HashSet<String> = suspects
        .iter()
        .filter(|s| !s.suspect_id.is_empty())
        .map(|s| s.suspect_id.clone())
        .collect();

    let mut next = 0;
    for (index, suspect) in suspects.iter_mut().enumerate() {
        if suspect.suspect_id.is_empty() {
            while taken.contains(&suspect_board_id(next)) {
                next += 1;
            }
            suspect.suspect_id = suspect_board_id(next);
            taken.insert(suspect.suspect_id.clone());
        }
        if suspect.display_name.trim().is_empty() {
            suspect.display_name = format!("Unknown Person #{}", index + 1);
        }
    }
    suspects
}
