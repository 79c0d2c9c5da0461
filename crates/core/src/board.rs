//! Board Graph Types
//!
//! Nodes and edges of the murder board. A node's `kind` is the only semantic
//! discriminator between evidence and suspects; its `id` is a display label.
//! When an agent omits `kind`, it is inferred once, here, from the node type
//! and the `SUS-` id convention.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::evidence::{canonical_board_id, EvidenceKind, SUSPECT_ID_PREFIX};
use crate::lenient;
use crate::suspect::{clamp_guilt, Suspect};

/// Confidence assumed for an edge that does not state one.
pub const DEFAULT_EDGE_CONFIDENCE: f64 = 0.5;

/// Whether a node stands for evidence or for a person of interest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Evidence,
    Suspect,
}

/// Visual node type.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeType {
    Photo,
    Statement,
    Timeline,
    Composite,
    Note,
    Pdf,
    Text,
    Suspect,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Photo => "PHOTO",
            NodeType::Statement => "STATEMENT",
            NodeType::Timeline => "TIMELINE",
            NodeType::Composite => "COMPOSITE",
            NodeType::Note => "NOTE",
            NodeType::Pdf => "PDF",
            NodeType::Text => "TEXT",
            NodeType::Suspect => "SUSPECT",
        }
    }

    /// Parse an agent-supplied type label.
    ///
    /// Agents sometimes echo the schema hint (`"PHOTO|STATEMENT|PDF"`); the
    /// first alternative wins. Unknown labels become `Note`.
    pub fn from_label(label: &str) -> Self {
        let first = label.split('|').next().unwrap_or("").trim().to_uppercase();
        match first.as_str() {
            "PHOTO" | "IMAGE" => NodeType::Photo,
            "STATEMENT" => NodeType::Statement,
            "TIMELINE" => NodeType::Timeline,
            "COMPOSITE" => NodeType::Composite,
            "PDF" | "DOCUMENT" => NodeType::Pdf,
            "TEXT" => NodeType::Text,
            "SUSPECT" | "POI" | "PERSON_OF_INTEREST" => NodeType::Suspect,
            _ => NodeType::Note,
        }
    }

    /// Node type used when synthesizing a node straight from an evidence item.
    pub fn for_evidence(kind: EvidenceKind, filename: &str) -> Self {
        match kind {
            EvidenceKind::Photo => NodeType::Photo,
            EvidenceKind::Statement => NodeType::Statement,
            EvidenceKind::Document if filename.to_lowercase().ends_with(".pdf") => NodeType::Pdf,
            EvidenceKind::Document => NodeType::Text,
            EvidenceKind::Other => NodeType::Note,
        }
    }
}

impl<'de> Deserialize<'de> for NodeType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(NodeType::from_label(&label))
    }
}

/// Board coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Position {
    #[serde(default, deserialize_with = "coordinate")]
    pub x: f64,
    #[serde(default, deserialize_with = "coordinate")]
    pub y: f64,
}

fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient::opt_f64(deserializer)?
        .filter(|v| v.is_finite())
        .unwrap_or(0.0))
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_origin(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Pixel-rounded key used for overlap detection.
    pub fn pixel_key(&self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }
}

/// Free-form node payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeData {
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub tags: Vec<String>,
    /// Evidence kind label of the linked evidence item
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(
        default,
        deserialize_with = "guilt_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub guilt_probability: Option<u8>,
    #[serde(
        default,
        deserialize_with = "lenient::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub suspect_data: Option<Suspect>,
    /// Keys this model does not know about, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn guilt_opt<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient::opt_f64(deserializer)?.map(clamp_guilt))
}

/// A board vertex.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawNode")]
pub struct BoardNode {
    pub id: String,
    pub kind: NodeKind,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub title: String,
    pub data: NodeData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl BoardNode {
    pub fn evidence(id: impl Into<String>, node_type: NodeType, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Evidence,
            node_type,
            title: title.into(),
            data: NodeData::default(),
            position: None,
        }
    }

    pub fn suspect(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Suspect,
            node_type: NodeType::Suspect,
            title: title.into(),
            data: NodeData::default(),
            position: None,
        }
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    pub fn is_suspect(&self) -> bool {
        self.kind == NodeKind::Suspect
    }
}

/// Wire shape of a node as agents emit it.
#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt")]
    kind: Option<NodeKind>,
    #[serde(default, rename = "type", deserialize_with = "lenient::opt_string")]
    node_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    data: NodeData,
    #[serde(default, deserialize_with = "lenient::opt")]
    position: Option<Position>,
}

impl TryFrom<RawNode> for BoardNode {
    type Error = String;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .map(|id| canonical_board_id(&id))
            .filter(|id| !id.is_empty())
            .ok_or_else(|| "node without id".to_string())?;

        let mut node_type = NodeType::from_label(raw.node_type.as_deref().unwrap_or(""));
        let kind = raw.kind.unwrap_or_else(|| {
            if node_type == NodeType::Suspect || id.starts_with(SUSPECT_ID_PREFIX) {
                NodeKind::Suspect
            } else {
                NodeKind::Evidence
            }
        });
        if kind == NodeKind::Suspect {
            node_type = NodeType::Suspect;
        }

        let title = raw
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| id.clone());

        Ok(BoardNode {
            id,
            kind,
            node_type,
            title,
            data: raw.data,
            position: raw.position,
        })
    }
}

/// Kind of relationship an edge expresses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    Supports,
    Contradicts,
    SeenWith,
    Relates,
}

impl RelationshipKind {
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "supports" | "support" => Some(RelationshipKind::Supports),
            "contradicts" | "contradict" => Some(RelationshipKind::Contradicts),
            "seen_with" => Some(RelationshipKind::SeenWith),
            "relates" | "relates_to" | "related" => Some(RelationshipKind::Relates),
            _ => None,
        }
    }
}

/// A board edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawConnection")]
pub struct Connection {
    pub source_id: String,
    pub target_id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<RelationshipKind>,
    pub confidence: f64,
}

impl Connection {
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            label: label.into(),
            relationship: None,
            confidence: DEFAULT_EDGE_CONFIDENCE,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConnection {
    #[serde(default, alias = "source", deserialize_with = "lenient::opt_string")]
    source_id: Option<String>,
    #[serde(default, alias = "target", deserialize_with = "lenient::opt_string")]
    target_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    label: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    relationship: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    confidence: Option<f64>,
}

impl TryFrom<RawConnection> for Connection {
    type Error = String;

    fn try_from(raw: RawConnection) -> Result<Self, Self::Error> {
        let source_id = raw
            .source_id
            .map(|s| canonical_board_id(&s))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "edge without source".to_string())?;
        let target_id = raw
            .target_id
            .map(|s| canonical_board_id(&s))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "edge without target".to_string())?;

        // "supports: matching tread" carries its kind in the label prefix
        let relationship = raw
            .relationship
            .as_deref()
            .and_then(RelationshipKind::from_label)
            .or_else(|| {
                raw.label
                    .split_once(':')
                    .and_then(|(prefix, _)| RelationshipKind::from_label(prefix))
            });

        let confidence = raw
            .confidence
            .filter(|c| c.is_finite())
            .map(|c| c.clamp(0.0, 1.0))
            .unwrap_or(DEFAULT_EDGE_CONFIDENCE);

        Ok(Connection {
            source_id,
            target_id,
            label: raw.label,
            relationship,
            confidence,
        })
    }
}
