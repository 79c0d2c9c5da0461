//! Agent Stage Outputs
//!
//! One record per pipeline stage. Every field is optional or defaulted, since
//! a stage that failed degrades to `{}` and still has to produce a record.
//! Coercion happens here, once, when the parsed agent object enters the
//! pipeline; later code works with typed values only.

use crimeboard_core::lenient;
use crimeboard_core::{BoardNode, Connection, Suspect};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Conversion from a parsed agent object into a stage record.
pub trait StageOutput: DeserializeOwned + Default {
    /// Stage name used in log lines.
    const STAGE: &'static str;

    /// Coerce a parsed agent object. Never fails: an object that cannot be
    /// read at all yields the default record.
    fn from_agent_json(map: Map<String, Value>) -> Self {
        match serde_json::from_value(Value::Object(map)) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("[{}] Discarding unreadable output: {}", Self::STAGE, e);
                Self::default()
            }
        }
    }
}

// ── Stage 1: ForensicTagger ────────────────────────────────────────────

/// Structured tags extracted for one evidence item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EvidenceTagSet {
    #[serde(default, deserialize_with = "lenient::string")]
    pub evidence_id: String,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub objects: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub locations: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub timestamps: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub people_descriptors: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub vehicles: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub forensic_notes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ForensicTags {
    #[serde(default, deserialize_with = "lenient::vec")]
    pub evidence_tags: Vec<EvidenceTagSet>,
}

impl StageOutput for ForensicTags {
    const STAGE: &'static str = "ForensicTagger";
}

// ── Stage 2: WitnessAnalyst ────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PhysicalDescription {
    #[serde(default, deserialize_with = "lenient::string")]
    pub height: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub build: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub hair: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub age_range: String,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub distinguishing: Vec<String>,
}

/// A description of a possible suspect given by a witness.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SuspectDescriptor {
    #[serde(default, deserialize_with = "lenient::string")]
    pub source_evidence_id: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub physical: PhysicalDescription,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub clothing: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub behavior: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TimelineHint {
    #[serde(default, deserialize_with = "lenient::string")]
    pub time_estimate: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub event: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub source_evidence_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KeyClaim {
    #[serde(default, deserialize_with = "lenient::string")]
    pub claim: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub source_evidence_id: String,
    #[serde(
        default,
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WitnessAnalysis {
    #[serde(default, deserialize_with = "lenient::vec")]
    pub suspect_descriptors: Vec<SuspectDescriptor>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub timeline_hints: Vec<TimelineHint>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub key_claims: Vec<KeyClaim>,
}

impl StageOutput for WitnessAnalysis {
    const STAGE: &'static str = "WitnessAnalyst";
}

// ── Stage 3: PsychoProfiler ────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BehavioralHypothesis {
    #[serde(default, deserialize_with = "lenient::string")]
    pub hypothesis: String,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub supporting_evidence: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModusOperandi {
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub indicators: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PsychoProfile {
    #[serde(default, deserialize_with = "lenient::vec")]
    pub behavioral_hypotheses: Vec<BehavioralHypothesis>,
    #[serde(
        default,
        deserialize_with = "lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub modus_operandi: Option<ModusOperandi>,
}

impl StageOutput for PsychoProfile {
    const STAGE: &'static str = "PsychoProfiler";
}

// ── Stage 4: SuspectRanker ─────────────────────────────────────────────

/// `suspects` is `None` when the agent did not produce the list at all, which
/// lets graph assembly fall back to the merge stage's list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SuspectRanking {
    #[serde(
        default,
        deserialize_with = "lenient::opt_vec",
        skip_serializing_if = "Option::is_none"
    )]
    pub suspects: Option<Vec<Suspect>>,
}

impl StageOutput for SuspectRanking {
    const STAGE: &'static str = "SuspectRanker";
}

// ── Stage 5: ConnectionMapper ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConnectionMap {
    #[serde(
        default,
        deserialize_with = "lenient::opt_vec",
        skip_serializing_if = "Option::is_none"
    )]
    pub nodes: Option<Vec<BoardNode>>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_vec",
        skip_serializing_if = "Option::is_none"
    )]
    pub edges: Option<Vec<Connection>>,
}

impl StageOutput for ConnectionMap {
    const STAGE: &'static str = "ConnectionMapper";
}

// ── Stage 6: DeskSergeant ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TimelineEvent {
    #[serde(default, deserialize_with = "lenient::string")]
    pub t: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub event: String,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub evidence_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardTheme {
    #[serde(default = "default_bg", deserialize_with = "lenient::string")]
    pub bg: String,
    #[serde(default = "default_node_glow", deserialize_with = "lenient::string")]
    pub node_glow: String,
    #[serde(default = "default_laser", deserialize_with = "lenient::string")]
    pub laser: String,
}

fn default_bg() -> String {
    "#0B0B12".to_string()
}

fn default_node_glow() -> String {
    "#5EE7FF".to_string()
}

fn default_laser() -> String {
    "#FF3D81".to_string()
}

impl Default for BoardTheme {
    fn default() -> Self {
        Self {
            bg: default_bg(),
            node_glow: default_node_glow(),
            laser: default_laser(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardPhysics {
    #[serde(default = "default_float_strength", deserialize_with = "physics_value")]
    pub float_strength: f64,
    #[serde(default = "default_repel", deserialize_with = "physics_value")]
    pub repel: f64,
}

fn default_float_strength() -> f64 {
    0.6
}

fn default_repel() -> f64 {
    0.8
}

fn physics_value<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient::opt_f64(deserializer)?.unwrap_or(0.0))
}

impl Default for BoardPhysics {
    fn default() -> Self {
        Self {
            float_strength: default_float_strength(),
            repel: default_repel(),
        }
    }
}

/// Rendering hints for the board client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BoardUi {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub theme: BoardTheme,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub physics: BoardPhysics,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MergedAnalysis {
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub case_title: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub master_summary: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_vec",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeline: Option<Vec<TimelineEvent>>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_vec",
        skip_serializing_if = "Option::is_none"
    )]
    pub suspects: Option<Vec<Suspect>>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_vec",
        skip_serializing_if = "Option::is_none"
    )]
    pub evidence_nodes: Option<Vec<BoardNode>>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_vec",
        skip_serializing_if = "Option::is_none"
    )]
    pub connections: Option<Vec<Connection>>,
    #[serde(
        default,
        deserialize_with = "lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub ui: Option<BoardUi>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_step: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub prosecutor_notes: Option<String>,
}

impl StageOutput for MergedAnalysis {
    const STAGE: &'static str = "DeskSergeant";
}

// ── Stage 7: CaseFileWriter ────────────────────────────────────────────

/// Prosecutor-facing narrative sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CaseFile {
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub executive_summary: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub evidence_narrative: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub suspect_analysis: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeline_narrative: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub chain_of_custody_notes: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub recommended_charges: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub gaps_and_next_steps: Option<String>,
}

impl StageOutput for CaseFile {
    const STAGE: &'static str = "CaseFileWriter";
}

/// Treat blank agent strings the same as missing ones.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
