//! Bucket reconciler
//!
//! Single pass over the facets in a fixed order:
//! existence → encryption → versioning → acceleration → policy.
//! Each facet is read right before its decision and never cached, so a
//! mutation made by an earlier step is never hidden by a stale read.

use crate::action::{Action, ActionType, Facet, Plan, ReconcileReport};
use crate::error::CloudError;
use crate::mutator::StateMutator;
use crate::provider::BucketApi;
use crate::reader::StateReader;
use crate::waiter;
use bucketflow_core::{DesiredState, ObservedState};
use std::sync::Arc;
use std::time::Instant;

/// Failure of a single step; ends the run
struct StepFailure {
    facet: Facet,
    error: CloudError,
}

trait StepResultExt<T> {
    fn at(self, facet: Facet) -> std::result::Result<T, StepFailure>;
}

impl<T> StepResultExt<T> for crate::error::Result<T> {
    fn at(self, facet: Facet) -> std::result::Result<T, StepFailure> {
        self.map_err(|error| StepFailure { facet, error })
    }
}

/// Drives a bucket's remote configuration toward a desired state
#[derive(Clone)]
pub struct Reconciler {
    api: Arc<dyn BucketApi>,
}

impl Reconciler {
    pub fn new(api: Arc<dyn BucketApi>) -> Self {
        Self { api }
    }

    /// Provider name of the underlying API
    pub fn provider_name(&self) -> &str {
        self.api.name()
    }

    /// Run one reconciliation pass
    ///
    /// Never returns an error: the first failing step aborts the remaining
    /// steps, is logged once, and is recorded in the report. A desired state
    /// without a bucket name yields a skipped report.
    pub async fn reconcile(&self, desired: &DesiredState) -> ReconcileReport {
        let Some(bucket) = desired.bucket() else {
            tracing::info!("No bucket name configured, skipping reconciliation");
            return ReconcileReport::skipped();
        };

        let start = Instant::now();
        let mut report = ReconcileReport::new(bucket);

        if let Err(failure) = self.run(bucket, desired, &mut report).await {
            tracing::error!(
                bucket,
                facet = %failure.facet,
                error = %failure.error,
                detail = ?failure.error,
                "Bucket reconciliation failed, remaining steps skipped"
            );
            report.set_failure(failure.facet, failure.error.to_string());
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        report
    }

    async fn run(
        &self,
        bucket: &str,
        desired: &DesiredState,
        report: &mut ReconcileReport,
    ) -> std::result::Result<(), StepFailure> {
        let api = self.api.as_ref();
        let reader = StateReader::new(api);
        let mutator = StateMutator::new(api);

        // 1. Existence
        if reader.exists(bucket).await {
            tracing::info!(bucket, "Using existing bucket");
        } else {
            mutator.create(bucket).await.at(Facet::Existence)?;
            let message = format!("Created bucket {}", bucket);
            tracing::info!(bucket, "{}", message);
            report.add_change(Facet::Existence, message);
            report.waited = Some(waiter::wait_until_exists(api, bucket).await);
        }

        // 2. Encryption (additive only)
        if let Some(algorithm) = desired.encryption() {
            if reader.has_encryption(bucket).await {
                tracing::debug!(bucket, "Encryption already configured, leaving as is");
            } else {
                mutator
                    .apply_encryption(bucket, algorithm)
                    .await
                    .at(Facet::Encryption)?;
                let message = format!("Applied {} encryption to {}", algorithm, bucket);
                tracing::info!(bucket, "{}", message);
                report.add_change(Facet::Encryption, message);
            }
        }

        // 3. Versioning
        if reader.has_versioning(bucket).await != desired.versioning_enabled {
            mutator
                .set_versioning(bucket, desired.versioning_enabled)
                .await
                .at(Facet::Versioning)?;
            let message = format!(
                "{} versioning on {}",
                toggle_verb(desired.versioning_enabled),
                bucket
            );
            tracing::info!(bucket, "{}", message);
            report.add_change(Facet::Versioning, message);
        }

        // 4. Acceleration
        if reader.has_acceleration(bucket).await != desired.acceleration_enabled {
            mutator
                .set_acceleration(bucket, desired.acceleration_enabled)
                .await
                .at(Facet::Acceleration)?;
            let message = format!(
                "{} transfer acceleration on {}",
                toggle_verb(desired.acceleration_enabled),
                bucket
            );
            tracing::info!(bucket, "{}", message);
            report.add_change(Facet::Acceleration, message);
        }

        // 5. Policy (unconditional overwrite)
        if let Some(policy) = desired.policy_document.as_ref() {
            mutator.apply_policy(bucket, policy).await.at(Facet::Policy)?;
            let message = format!("Applied bucket policy to {}", bucket);
            tracing::info!(bucket, "{}", message);
            report.add_change(Facet::Policy, message);
        }

        Ok(())
    }

    /// Compute the actions a reconciliation would issue, without mutating
    ///
    /// A missing bucket is planned as an empty one; its other facets are not
    /// probed.
    pub async fn plan(&self, desired: &DesiredState) -> Plan {
        let Some(bucket) = desired.bucket() else {
            return Plan::empty();
        };

        let observed = self.observe(bucket).await;
        plan_actions(bucket, desired, &observed)
    }

    /// Read every facet once. Only used for planning.
    pub async fn observe(&self, bucket: &str) -> ObservedState {
        let reader = StateReader::new(self.api.as_ref());
        if !reader.exists(bucket).await {
            return ObservedState::absent();
        }

        ObservedState {
            exists: true,
            encryption_configured: reader.has_encryption(bucket).await,
            versioning_enabled: reader.has_versioning(bucket).await,
            acceleration_enabled: reader.has_acceleration(bucket).await,
        }
    }
}

/// Apply the reconciliation decision rules to an observed snapshot
pub fn plan_actions(bucket: &str, desired: &DesiredState, observed: &ObservedState) -> Plan {
    let mut actions = Vec::new();

    actions.push(if observed.exists {
        Action::new(
            ActionType::NoOp,
            Facet::Existence,
            bucket,
            format!("Bucket {} already exists", bucket),
        )
    } else {
        Action::new(
            ActionType::Create,
            Facet::Existence,
            bucket,
            format!("Create bucket {}", bucket),
        )
    });

    if let Some(algorithm) = desired.encryption() {
        let action = if observed.encryption_configured {
            Action::new(
                ActionType::NoOp,
                Facet::Encryption,
                bucket,
                "Encryption already configured",
            )
        } else {
            Action::new(
                ActionType::Update,
                Facet::Encryption,
                bucket,
                format!("Apply {} encryption", algorithm),
            )
        };
        actions.push(action.with_detail("algorithm", serde_json::json!(algorithm)));
    }

    actions.push(toggle_action(
        bucket,
        Facet::Versioning,
        "versioning",
        observed.versioning_enabled,
        desired.versioning_enabled,
    ));
    actions.push(toggle_action(
        bucket,
        Facet::Acceleration,
        "transfer acceleration",
        observed.acceleration_enabled,
        desired.acceleration_enabled,
    ));

    if desired.policy_document.is_some() {
        actions.push(Action::new(
            ActionType::Update,
            Facet::Policy,
            bucket,
            "Overwrite bucket policy",
        ));
    }

    Plan::new(actions)
}

fn toggle_action(bucket: &str, facet: Facet, label: &str, current: bool, desired: bool) -> Action {
    let action = if current == desired {
        Action::new(
            ActionType::NoOp,
            facet,
            bucket,
            format!("{} already {}", capitalize(label), state_word(desired)),
        )
    } else {
        Action::new(
            ActionType::Update,
            facet,
            bucket,
            format!("{} {}", toggle_verb(desired), label),
        )
    };
    action.with_detail("enabled", serde_json::json!(desired))
}

fn toggle_verb(enabled: bool) -> &'static str {
    if enabled { "Enabled" } else { "Suspended" }
}

fn state_word(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "suspended" }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FacetStatus;
    use crate::testing::FakeBucketApi;
    use serde_json::json;

    fn reconciler(api: &Arc<FakeBucketApi>) -> Reconciler {
        Reconciler::new(api.clone())
    }

    #[tokio::test]
    async fn test_versioning_converges_and_is_idempotent() {
        for wanted in [true, false] {
            let api = Arc::new(FakeBucketApi::new().with_bucket("b1", |b| {
                b.versioning = Some(FacetStatus::from_enabled(!wanted));
            }));
            let desired = DesiredState::for_bucket("b1").with_versioning(wanted);

            let report = reconciler(&api).reconcile(&desired).await;
            assert!(report.is_success());
            assert_eq!(api.calls_to("put_versioning").len(), 1);
            assert_eq!(
                api.bucket("b1").unwrap().versioning.map(FacetStatus::is_enabled),
                Some(wanted)
            );

            api.clear_calls();
            let report = reconciler(&api).reconcile(&desired).await;
            assert!(report.is_success());
            assert!(api.calls_to("put_versioning").is_empty());
        }
    }

    #[tokio::test]
    async fn test_acceleration_converges_and_is_idempotent() {
        for wanted in [true, false] {
            let api = Arc::new(FakeBucketApi::new().with_bucket("b1", |b| {
                b.acceleration = Some(FacetStatus::from_enabled(!wanted));
            }));
            let desired = DesiredState::for_bucket("b1").with_acceleration(wanted);

            let report = reconciler(&api).reconcile(&desired).await;
            assert!(report.is_success());
            assert_eq!(
                api.calls_to("put_acceleration"),
                vec![format!(
                    "put_acceleration:b1:{}",
                    FacetStatus::from_enabled(wanted)
                )]
            );
            assert_eq!(
                api.bucket("b1").unwrap().acceleration.map(FacetStatus::is_enabled),
                Some(wanted)
            );

            api.clear_calls();
            let report = reconciler(&api).reconcile(&desired).await;
            assert!(report.is_success());
            assert!(api.calls_to("put_acceleration").is_empty());
        }
    }

    #[tokio::test]
    async fn test_missing_bucket_creates_then_waits_first() {
        let api = Arc::new(FakeBucketApi::new());
        let desired = DesiredState::for_bucket("b1")
            .with_encryption("AES256")
            .with_versioning(true)
            .with_policy(json!({"Version": "2012-10-17"}));

        let report = reconciler(&api).reconcile(&desired).await;
        assert!(report.is_success());
        assert_eq!(report.waited, Some(true));

        let calls = api.calls();
        assert_eq!(calls[0], "head_bucket:b1");
        assert_eq!(calls[1], "create_bucket:b1");
        assert_eq!(calls[2], "wait_until_exists:b1");
        assert_eq!(api.calls_to("create_bucket").len(), 1);
        assert_eq!(api.calls_to("wait_until_exists").len(), 1);
    }

    #[tokio::test]
    async fn test_existing_encryption_is_never_reapplied() {
        let api = Arc::new(FakeBucketApi::new().with_bucket("b1", |b| {
            b.encryption = vec!["aws:kms".to_string()];
        }));
        let desired = DesiredState::for_bucket("b1").with_encryption("AES256");

        let report = reconciler(&api).reconcile(&desired).await;
        assert!(report.is_success());
        assert!(api.calls_to("put_encryption").is_empty());
        assert_eq!(api.bucket("b1").unwrap().encryption, vec!["aws:kms"]);
    }

    #[tokio::test]
    async fn test_missing_encryption_is_applied() {
        let api = Arc::new(FakeBucketApi::new().with_bucket("b1", |_| {}));
        let desired = DesiredState::for_bucket("b1").with_encryption("AES256");

        let report = reconciler(&api).reconcile(&desired).await;
        assert_eq!(api.calls_to("put_encryption"), vec!["put_encryption:b1:AES256"]);
        assert_eq!(report.changes[0].facet, Facet::Encryption);
    }

    #[tokio::test]
    async fn test_unmanaged_encryption_is_not_read() {
        let api = Arc::new(FakeBucketApi::new().with_bucket("b1", |_| {}));
        reconciler(&api)
            .reconcile(&DesiredState::for_bucket("b1"))
            .await;
        assert!(api.calls_to("get_encryption").is_empty());
    }

    #[tokio::test]
    async fn test_empty_encryption_is_left_unmanaged() {
        let config = bucketflow_core::parse_kdl_string(
            r#"
            deployment-bucket {
                name "b1"
                server-side-encryption ""
            }
            bucket-config {
                versioning #true
            }
            "#,
        )
        .unwrap();
        let desired = config.desired.unwrap();
        let api = Arc::new(
            FakeBucketApi::new()
                .with_bucket("b1", |_| {})
                .failing("put_encryption"),
        );

        let report = reconciler(&api).reconcile(&desired).await;

        assert!(report.is_success());
        assert!(api.calls_to("get_encryption").is_empty());
        assert!(api.calls_to("put_encryption").is_empty());
        assert_eq!(api.mutations(), vec!["put_versioning:b1:Enabled"]);

        let plan = reconciler(&api).plan(&desired).await;
        assert!(plan.action_for(Facet::Encryption).is_none());
    }

    #[tokio::test]
    async fn test_policy_applied_every_run() {
        let api = Arc::new(FakeBucketApi::new().with_bucket("b1", |b| {
            b.policy = Some("{}".to_string());
        }));
        let desired =
            DesiredState::for_bucket("b1").with_policy(json!({"Version": "2012-10-17"}));

        reconciler(&api).reconcile(&desired).await;
        assert_eq!(api.calls_to("put_policy").len(), 1);

        api.clear_calls();
        reconciler(&api).reconcile(&desired).await;
        assert_eq!(api.calls_to("put_policy").len(), 1);
    }

    #[tokio::test]
    async fn test_create_failure_aborts_remaining_steps() {
        let api = Arc::new(FakeBucketApi::new().failing("create_bucket"));
        let desired = DesiredState::for_bucket("b1")
            .with_encryption("AES256")
            .with_versioning(true)
            .with_acceleration(true)
            .with_policy(json!({}));

        let report = reconciler(&api).reconcile(&desired).await;

        let failure = report.failure.as_ref().unwrap();
        assert_eq!(failure.facet, Facet::Existence);
        assert!(failure.error.contains("create_bucket rejected"));
        assert!(report.changes.is_empty());
        assert_eq!(report.waited, None);
        assert_eq!(api.calls(), vec!["head_bucket:b1", "create_bucket:b1"]);
    }

    #[tokio::test]
    async fn test_mid_run_failure_keeps_earlier_changes() {
        let api = Arc::new(
            FakeBucketApi::new()
                .with_bucket("b1", |_| {})
                .failing("put_acceleration"),
        );
        let desired = DesiredState::for_bucket("b1")
            .with_versioning(true)
            .with_acceleration(true)
            .with_policy(json!({}));

        let report = reconciler(&api).reconcile(&desired).await;

        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.changes[0].facet, Facet::Versioning);
        assert_eq!(report.failure.unwrap().facet, Facet::Acceleration);
        assert!(api.calls_to("put_policy").is_empty());
    }

    #[tokio::test]
    async fn test_wait_failure_is_not_fatal() {
        let api = Arc::new(FakeBucketApi::new().failing("wait_until_exists"));
        let desired = DesiredState::for_bucket("b1");

        let report = reconciler(&api).reconcile(&desired).await;
        assert_eq!(report.waited, Some(false));
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_bucket_visible_only_after_wait() {
        let api = Arc::new(FakeBucketApi::new().with_delayed_visibility());
        let desired = DesiredState::for_bucket("b1").with_versioning(true);

        let report = reconciler(&api).reconcile(&desired).await;
        assert!(report.is_success());
        assert_eq!(report.waited, Some(true));
        assert_eq!(api.calls_to("put_versioning").len(), 1);
    }

    #[tokio::test]
    async fn test_scenario_existing_bucket_enable_versioning() {
        let api = Arc::new(FakeBucketApi::new().with_bucket("b1", |b| {
            b.versioning = Some(FacetStatus::Suspended);
            b.acceleration = Some(FacetStatus::Suspended);
        }));
        let desired = DesiredState::for_bucket("b1")
            .with_versioning(true)
            .with_acceleration(false);

        let report = reconciler(&api).reconcile(&desired).await;

        assert!(report.is_success());
        assert_eq!(api.mutations(), vec!["put_versioning:b1:Enabled"]);
        assert!(api.calls_to("create_bucket").is_empty());
        assert!(api.calls_to("put_acceleration").is_empty());
    }

    #[tokio::test]
    async fn test_scenario_new_bucket_with_defaults() {
        let api = Arc::new(FakeBucketApi::new());
        let desired = DesiredState::for_bucket("b2");

        let report = reconciler(&api).reconcile(&desired).await;

        assert!(report.is_success());
        assert_eq!(api.mutations(), vec!["create_bucket:b2"]);
        assert_eq!(api.calls_to("wait_until_exists"), vec!["wait_until_exists:b2"]);
        assert_eq!(report.changes.len(), 1);
    }

    #[test]
    fn test_provider_name_comes_from_api() {
        let api = Arc::new(FakeBucketApi::new());
        assert_eq!(reconciler(&api).provider_name(), "fake");
    }

    #[tokio::test]
    async fn test_no_bucket_name_is_a_noop() {
        let api = Arc::new(FakeBucketApi::new());
        let desired = DesiredState {
            versioning_enabled: true,
            ..Default::default()
        };

        let report = reconciler(&api).reconcile(&desired).await;
        assert!(report.is_skipped());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_plan_does_not_mutate() {
        let api = Arc::new(FakeBucketApi::new().with_bucket("b1", |b| {
            b.versioning = Some(FacetStatus::Enabled);
        }));
        let desired = DesiredState::for_bucket("b1")
            .with_encryption("AES256")
            .with_versioning(true)
            .with_acceleration(true)
            .with_policy(json!({}));

        let plan = reconciler(&api).plan(&desired).await;

        assert!(api.mutations().is_empty());
        assert!(plan.has_changes);
        let kind = |facet| plan.action_for(facet).map(|a| a.action_type);
        assert_eq!(kind(Facet::Existence), Some(ActionType::NoOp));
        assert_eq!(kind(Facet::Encryption), Some(ActionType::Update));
        assert_eq!(kind(Facet::Versioning), Some(ActionType::NoOp));
        assert_eq!(kind(Facet::Acceleration), Some(ActionType::Update));
        assert_eq!(kind(Facet::Policy), Some(ActionType::Update));
    }

    #[tokio::test]
    async fn test_plan_for_missing_bucket_skips_probes() {
        let api = Arc::new(FakeBucketApi::new());
        let desired = DesiredState::for_bucket("b2");

        let plan = reconciler(&api).plan(&desired).await;

        assert_eq!(api.calls(), vec!["head_bucket:b2"]);
        assert_eq!(plan.summary().create, 1);
        assert_eq!(plan.summary().update, 0);
    }

    #[test]
    fn test_plan_actions_converged_state() {
        let desired = DesiredState::for_bucket("b1")
            .with_encryption("AES256")
            .with_versioning(true);
        let observed = ObservedState {
            exists: true,
            encryption_configured: true,
            versioning_enabled: true,
            acceleration_enabled: false,
        };

        let plan = plan_actions("b1", &desired, &observed);
        assert!(!plan.has_changes);
        assert_eq!(plan.actions.len(), 4);
    }
}
