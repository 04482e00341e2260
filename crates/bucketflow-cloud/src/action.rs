//! Action, plan and report types for bucket reconciliation

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One independently managed configuration dimension of a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Existence,
    Encryption,
    Versioning,
    Acceleration,
    Policy,
}

impl std::fmt::Display for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Facet::Existence => write!(f, "existence"),
            Facet::Encryption => write!(f, "encryption"),
            Facet::Versioning => write!(f, "versioning"),
            Facet::Acceleration => write!(f, "acceleration"),
            Facet::Policy => write!(f, "policy"),
        }
    }
}

/// Represents a planned action for one facet of a bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Unique identifier for the action
    pub id: String,

    /// Type of action to perform
    pub action_type: ActionType,

    /// Facet the action touches
    pub facet: Facet,

    /// Bucket name
    pub bucket: String,

    /// Description of the action
    pub description: String,

    /// Additional details about the action
    pub details: HashMap<String, serde_json::Value>,
}

impl Action {
    pub fn new(
        action_type: ActionType,
        facet: Facet,
        bucket: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let bucket = bucket.into();
        Self {
            id: format!("{}-{}-{}", action_type, facet, bucket),
            action_type,
            facet,
            bucket,
            description: description.into(),
            details: HashMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.details.insert(key.into(), value);
        self
    }
}

/// Type of action to perform
///
/// There is no delete: nothing this engine manages is ever removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Create a new resource
    Create,
    /// Update an existing resource
    Update,
    /// No changes needed
    NoOp,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Create => write!(f, "create"),
            ActionType::Update => write!(f, "update"),
            ActionType::NoOp => write!(f, "no-op"),
        }
    }
}

/// Plan containing all actions a reconciliation would issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// List of actions, in reconciliation order
    pub actions: Vec<Action>,

    /// Whether the plan has any changes
    pub has_changes: bool,
}

impl Plan {
    pub fn new(actions: Vec<Action>) -> Self {
        let has_changes = actions.iter().any(|a| a.action_type != ActionType::NoOp);
        Self {
            actions,
            has_changes,
        }
    }

    pub fn empty() -> Self {
        Self {
            actions: Vec::new(),
            has_changes: false,
        }
    }

    /// Get actions by type
    pub fn actions_by_type(&self, action_type: ActionType) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|a| a.action_type == action_type)
            .collect()
    }

    /// The planned action for a facet, if the facet is managed
    pub fn action_for(&self, facet: Facet) -> Option<&Action> {
        self.actions.iter().find(|a| a.facet == facet)
    }

    /// Summary of the plan
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            create: self.actions_by_type(ActionType::Create).len(),
            update: self.actions_by_type(ActionType::Update).len(),
            no_change: self.actions_by_type(ActionType::NoOp).len(),
        }
    }
}

/// Summary of planned actions
#[derive(Debug, Clone)]
pub struct PlanSummary {
    pub create: usize,
    pub update: usize,
    pub no_change: usize,
}

impl std::fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to create, {} to update, {} unchanged",
            self.create, self.update, self.no_change
        )
    }
}

/// A mutation that was applied during a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedChange {
    pub facet: Facet,

    /// Human-readable status line
    pub message: String,
}

/// The step that ended a run early
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetFailure {
    pub facet: Facet,
    pub error: String,
}

/// Result of one reconciliation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Target bucket; `None` when the run was skipped
    pub bucket: Option<String>,

    /// Changes applied before the run ended, in order
    pub changes: Vec<AppliedChange>,

    /// Failure that aborted the remaining steps
    pub failure: Option<FacetFailure>,

    /// Outcome of the post-create wait; `None` when no bucket was created
    pub waited: Option<bool>,

    /// Total execution time in milliseconds
    pub duration_ms: u64,
}

impl ReconcileReport {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: Some(bucket.into()),
            ..Default::default()
        }
    }

    /// Report for a run with no bucket name to reconcile
    pub fn skipped() -> Self {
        Self::default()
    }

    pub fn is_skipped(&self) -> bool {
        self.bucket.is_none()
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn add_change(&mut self, facet: Facet, message: impl Into<String>) {
        self.changes.push(AppliedChange {
            facet,
            message: message.into(),
        });
    }

    pub fn set_failure(&mut self, facet: Facet, error: impl Into<String>) {
        self.failure = Some(FacetFailure {
            facet,
            error: error.into(),
        });
    }
}
