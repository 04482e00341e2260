//! Activation gate
//!
//! Decides once, at configuration time, whether the reconciler is
//! registered against the lifecycle hook at all.

use bucketflow_core::PluginConfig;
use serde::{Deserialize, Serialize};

/// Lifecycle hook the reconciler runs at: before deployment validation
pub const PRE_VALIDATE_HOOK: &str = "before:deploy:validate";

/// Operation the orchestrator is currently performing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Full deployment
    Deploy,
    /// Read-only dry run
    Plan,
    /// Build artifacts only; must not touch live cloud resources
    Package,
}

impl Operation {
    pub fn is_package_only(self) -> bool {
        self == Operation::Package
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Deploy => write!(f, "deploy"),
            Operation::Plan => write!(f, "plan"),
            Operation::Package => write!(f, "package"),
        }
    }
}

/// Why the reconciler was not registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// `enabled #false` in bucket-config
    Disabled,
    /// No bucket-config section
    NoDesiredState,
    /// The current operation only packages
    PackageOnly,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Disabled => write!(f, "plugin is disabled"),
            SkipReason::NoDesiredState => write!(f, "no bucket configuration declared"),
            SkipReason::PackageOnly => write!(f, "package-only operation"),
        }
    }
}

/// Gate decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Register the reconciler at the given hook
    Register { hook: &'static str },
    Skip(SkipReason),
}

impl Activation {
    pub fn is_registered(&self) -> bool {
        matches!(self, Activation::Register { .. })
    }
}

/// Evaluate whether the reconciler should run for this invocation
pub fn evaluate(config: &PluginConfig, operation: Operation) -> Activation {
    let activation = if !config.enabled {
        Activation::Skip(SkipReason::Disabled)
    } else if config.desired.is_none() {
        Activation::Skip(SkipReason::NoDesiredState)
    } else if operation.is_package_only() {
        Activation::Skip(SkipReason::PackageOnly)
    } else {
        Activation::Register {
            hook: PRE_VALIDATE_HOOK,
        }
    };

    match activation {
        Activation::Register { hook } => {
            tracing::debug!(%operation, hook, "Bucket reconciler registered");
        }
        Activation::Skip(reason) => {
            tracing::debug!(%operation, %reason, "Bucket reconciler not registered");
        }
    }

    activation
}
