//! Cases and the case status machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Lifecycle status of a case.
///
/// `open -> analyzing -> analyzed | error`; analyzed and errored cases may be
/// analyzed again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    #[default]
    Open,
    Analyzing,
    Analyzed,
    Error,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Open => "open",
            CaseStatus::Analyzing => "analyzing",
            CaseStatus::Analyzed => "analyzed",
            CaseStatus::Error => "error",
        }
    }

    pub fn can_transition_to(&self, next: CaseStatus) -> bool {
        matches!(
            (self, next),
            (CaseStatus::Open, CaseStatus::Analyzing)
                | (CaseStatus::Analyzed, CaseStatus::Analyzing)
                | (CaseStatus::Error, CaseStatus::Analyzing)
                | (CaseStatus::Analyzing, CaseStatus::Analyzed)
                | (CaseStatus::Analyzing, CaseStatus::Error)
        )
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A case under investigation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub id: String,
    pub title: String,
    pub status: CaseStatus,
    /// Latest board analysis, stored as JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// Create an open case. The title is trimmed and must not be empty.
    pub fn new(id: impl Into<String>, title: &str) -> CoreResult<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoreError::validation("Title is required"));
        }
        let now = Utc::now();
        Ok(Self {
            id: id.into(),
            title: title.to_string(),
            status: CaseStatus::Open,
            analysis: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Move the case to `next`, rejecting transitions the status machine does not allow.
    pub fn transition(&mut self, next: CaseStatus) -> CoreResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::validation(format!(
                "case {} cannot move from {} to {}",
                self.id, self.status, next
            )));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}
