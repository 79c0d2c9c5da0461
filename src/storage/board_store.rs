//! Board Store
//!
//! Trait-based persistence for cases, evidence, and board graphs. The
//! application only depends on [`BoardStore`]; a relational backend can be
//! plugged in behind it.
//!
//! ## Implementations
//! - `InMemoryBoardStore` - for the CLI and tests

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use crimeboard_core::{BoardNode, Case, CaseStatus, Connection, EvidenceItem};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::utils::error::{AppError, AppResult};

/// The persisted graph of a case.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoredBoard {
    pub nodes: Vec<BoardNode>,
    pub edges: Vec<Connection>,
}

// ============================================================================
// BoardStore Trait
// ============================================================================

/// Persistence operations used by the analysis service.
///
/// Implementations must be thread-safe (Send + Sync). Writes are not
/// transactional across calls.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Insert a new case. Fails if a case with the same id exists.
    async fn insert_case(&self, case: Case) -> AppResult<()>;

    /// Load a case by id.
    async fn get_case(&self, case_id: &str) -> AppResult<Option<Case>>;

    /// Move a case to `status`, enforcing the status machine.
    async fn update_case_status(&self, case_id: &str, status: CaseStatus) -> AppResult<()>;

    /// Store the latest analysis JSON of a case.
    async fn save_analysis(&self, case_id: &str, analysis: serde_json::Value) -> AppResult<()>;

    /// Register an evidence item against a case.
    async fn insert_evidence(&self, case_id: &str, item: EvidenceItem) -> AppResult<()>;

    /// Evidence of a case in registration order.
    async fn list_evidence(&self, case_id: &str) -> AppResult<Vec<EvidenceItem>>;

    /// Delete every node and edge of a case, then insert `nodes` and `edges`.
    ///
    /// Nodes are keyed by (case id, node id) and edges by (case id, source,
    /// target); a repeated key overwrites the earlier row in place.
    async fn replace_board(
        &self,
        case_id: &str,
        nodes: Vec<BoardNode>,
        edges: Vec<Connection>,
    ) -> AppResult<()>;

    /// The persisted graph of a case (empty if none was stored).
    async fn board(&self, case_id: &str) -> AppResult<StoredBoard>;
}

// ============================================================================
// InMemoryBoardStore
// ============================================================================

#[derive(Debug)]
struct CaseRecord {
    case: Case,
    evidence: Vec<EvidenceItem>,
    board: StoredBoard,
}

/// In-memory implementation of `BoardStore`.
///
/// Data is lost when the process exits.
#[derive(Clone, Default)]
pub struct InMemoryBoardStore {
    cases: Arc<RwLock<HashMap<String, CaseRecord>>>,
}

impl InMemoryBoardStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored cases.
    pub async fn case_count(&self) -> usize {
        self.cases.read().await.len()
    }
}

fn missing_case(case_id: &str) -> AppError {
    AppError::not_found(format!("Case {} not found", case_id))
}

#[async_trait]
impl BoardStore for InMemoryBoardStore {
    async fn insert_case(&self, case: Case) -> AppResult<()> {
        let mut cases = self.cases.write().await;
        if cases.contains_key(&case.id) {
            return Err(AppError::store(format!("Case {} already exists", case.id)));
        }
        cases.insert(
            case.id.clone(),
            CaseRecord {
                case,
                evidence: Vec::new(),
                board: StoredBoard::default(),
            },
        );
        Ok(())
    }

    async fn get_case(&self, case_id: &str) -> AppResult<Option<Case>> {
        let cases = self.cases.read().await;
        Ok(cases.get(case_id).map(|record| record.case.clone()))
    }

    async fn update_case_status(&self, case_id: &str, status: CaseStatus) -> AppResult<()> {
        let mut cases = self.cases.write().await;
        let record = cases.get_mut(case_id).ok_or_else(|| missing_case(case_id))?;
        record.case.transition(status)?;
        Ok(())
    }

    async fn save_analysis(&self, case_id: &str, analysis: serde_json::Value) -> AppResult<()> {
        let mut cases = self.cases.write().await;
        let record = cases.get_mut(case_id).ok_or_else(|| missing_case(case_id))?;
        record.case.analysis = Some(analysis);
        record.case.updated_at = Utc::now();
        Ok(())
    }

    async fn insert_evidence(&self, case_id: &str, item: EvidenceItem) -> AppResult<()> {
        let mut cases = self.cases.write().await;
        let record = cases.get_mut(case_id).ok_or_else(|| missing_case(case_id))?;
        record.evidence.push(item);
        Ok(())
    }

    async fn list_evidence(&self, case_id: &str) -> AppResult<Vec<EvidenceItem>> {
        let cases = self.cases.read().await;
        let record = cases.get(case_id).ok_or_else(|| missing_case(case_id))?;
        Ok(record.evidence.clone())
    }

    async fn replace_board(
        &self,
        case_id: &str,
        nodes: Vec<BoardNode>,
        edges: Vec<Connection>,
    ) -> AppResult<()> {
        let mut cases = self.cases.write().await;
        let record = cases.get_mut(case_id).ok_or_else(|| missing_case(case_id))?;

        record.board = StoredBoard {
            nodes: upsert_by_key(nodes, |node| node.id.clone()),
            edges: upsert_by_key(edges, |edge| (edge.source_id.clone(), edge.target_id.clone())),
        };
        Ok(())
    }

    async fn board(&self, case_id: &str) -> AppResult<StoredBoard> {
        let cases = self.cases.read().await;
        let record = cases.get(case_id).ok_or_else(|| missing_case(case_id))?;
        Ok(record.board.clone())
    }
}

/// Collapse items sharing a key: the first occurrence keeps its slot, the last one's value wins.
fn upsert_by_key<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut stored: Vec<T> = Vec::with_capacity(items.len());
    let mut slots: HashMap<K, usize> = HashMap::with_capacity(items.len());
    for item in items {
        match slots.get(&key(&item)) {
            Some(&index) => stored[index] = item,
            None => {
                slots.insert(key(&item), stored.len());
                stored.push(item);
            }
        }
    }
    stored
}
