//! bucketflow cloud
//!
//! Converges the configuration of an object-storage bucket toward a
//! declared desired state.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 Activation Gate                 │
//! │        (enabled? desired state? package?)       │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                   Reconciler                    │
//! │ existence → encryption → versioning → accel →   │
//! │ policy                                          │
//! └───────┬─────────────────┬─────────────┬─────────┘
//!         │                 │             │
//! ┌───────▼──────┐ ┌────────▼─────┐ ┌─────▼───────┐
//! │ StateReader  │ │ StateMutator │ │   waiter    │
//! └───────┬──────┘ └────────┬─────┘ └─────┬───────┘
//!         └─────────────────┼─────────────┘
//!                 ┌─────────▼─────────┐
//!                 │  trait BucketApi  │
//!                 └───────────────────┘
//! ```

pub mod action;
pub mod error;
pub mod gate;
pub mod mutator;
pub mod provider;
pub mod reader;
pub mod reconciler;
pub mod waiter;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use action::{
    Action, ActionType, AppliedChange, Facet, FacetFailure, Plan, PlanSummary, ReconcileReport,
};
pub use error::{CloudError, Result};
pub use gate::{Activation, Operation, PRE_VALIDATE_HOOK, SkipReason, evaluate};
pub use mutator::StateMutator;
pub use provider::{BucketApi, FacetStatus};
pub use reader::StateReader;
pub use reconciler::{Reconciler, plan_actions};
