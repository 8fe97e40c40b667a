use anyhow::Result;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::llm::Rewriter;
use crate::models::{MappingReport, RewriteResult};

/// Execute one mapping run: resolve a regulation, ask the rewriter for a
/// compliance rewrite of every policy in catalog order, and keep only the
/// results whose proposed text differs from the current text after trimming.
///
/// Policies are processed strictly one at a time; a rewriter failure on any
/// policy aborts the whole run with that error and no partial list. An
/// unknown regulation id is not an error: the run returns `("", [])` without
/// invoking the rewriter.
pub async fn run_pipeline<R: Rewriter>(
    catalog: &Catalog,
    rewriter: &R,
    reg_id: &str,
) -> Result<(String, Vec<RewriteResult>)> {
    let regulation_text = catalog.fetch_regulation(reg_id);
    if regulation_text.is_empty() {
        info!("Unknown regulation id {:?}, nothing to map", reg_id);
        return Ok((String::new(), Vec::new()));
    }

    let policies = catalog.list_policies();
    info!(
        "Mapping regulation {} against {} policies",
        reg_id,
        policies.len()
    );

    let mut mapped = Vec::new();
    for policy in policies {
        let result = rewriter.rewrite(regulation_text, policy).await?;

        if result.is_changed() {
            info!("Policy {}: rewrite proposed", policy.id);
            mapped.push(result);
        } else {
            debug!("Policy {}: no change needed", policy.id);
        }
    }

    info!(
        "Mapping complete: {} of {} policies changed",
        mapped.len(),
        policies.len()
    );

    Ok((regulation_text.to_string(), mapped))
}

/// Wrap a pipeline run's output in a machine-readable report
pub fn build_report(
    catalog: &Catalog,
    reg_id: &str,
    regulation_text: String,
    mapped: Vec<RewriteResult>,
    model: &str,
) -> MappingReport {
    let policies_considered = if regulation_text.is_empty() {
        0
    } else {
        catalog.list_policies().len()
    };
    MappingReport::new(reg_id, regulation_text, mapped, policies_considered, model)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::bail;

    use super::*;
    use crate::models::Policy;

    /// Echoes every policy back verbatim and counts invocations
    struct EchoRewriter {
        calls: AtomicUsize,
    }

    impl EchoRewriter {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Rewriter for EchoRewriter {
        async fn rewrite(&self, _regulation_text: &str, policy: &Policy) -> Result<RewriteResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RewriteResult::from_policy(policy, policy.text.clone()))
        }
    }

    /// Appends a marker to any policy whose text contains a keyword,
    /// echoes everything else back unchanged
    struct KeywordRewriter {
        keyword: &'static str,
    }

    impl Rewriter for KeywordRewriter {
        async fn rewrite(&self, _regulation_text: &str, policy: &Policy) -> Result<RewriteResult> {
            let proposed = if policy.text.to_lowercase().contains(self.keyword) {
                format!("{} [UPDATED FOR COMPLIANCE]", policy.text)
            } else {
                policy.text.clone()
            };
            Ok(RewriteResult::from_policy(policy, proposed))
        }
    }

    /// Fails on the nth invocation, echoes before that
    struct FailingRewriter {
        fail_on: usize,
        calls: AtomicUsize,
    }

    impl Rewriter for FailingRewriter {
        async fn rewrite(&self, _regulation_text: &str, policy: &Policy) -> Result<RewriteResult> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call == self.fail_on {
                bail!("simulated service failure on policy {}", policy.id);
            }
            Ok(RewriteResult::from_policy(policy, policy.text.clone()))
        }
    }

    #[tokio::test]
    async fn test_unknown_regulation_short_circuits() {
        let catalog = Catalog::builtin();
        let rewriter = EchoRewriter::new();

        let (text, mapped) = run_pipeline(&catalog, &rewriter, "reg-999").await.unwrap();

        assert_eq!(text, "");
        assert!(mapped.is_empty());
        assert_eq!(rewriter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_known_regulation_returns_stored_text() {
        let catalog = Catalog::builtin();
        let rewriter = EchoRewriter::new();

        let (text, _) = run_pipeline(&catalog, &rewriter, "reg-002").await.unwrap();

        assert_eq!(text, catalog.fetch_regulation("reg-002"));
    }

    #[tokio::test]
    async fn test_echo_rewriter_yields_empty_list() {
        let catalog = Catalog::builtin();
        let rewriter = EchoRewriter::new();

        let (_, mapped) = run_pipeline(&catalog, &rewriter, "reg-001").await.unwrap();

        assert!(mapped.is_empty());
        assert_eq!(rewriter.call_count(), catalog.list_policies().len());
    }

    #[tokio::test]
    async fn test_filter_invariant_and_order_preserved() {
        let catalog = Catalog::builtin();
        let rewriter = KeywordRewriter { keyword: "incident" };

        let (_, mapped) = run_pipeline(&catalog, &rewriter, "reg-003").await.unwrap();

        assert!(!mapped.is_empty());
        for result in &mapped {
            assert_ne!(result.current.trim(), result.proposed.trim());
        }

        // The mapped list must be a subsequence of catalog order
        let catalog_ids: Vec<&str> = catalog.list_policies().iter().map(|p| p.id.as_str()).collect();
        let mut cursor = 0;
        for result in &mapped {
            let pos = catalog_ids[cursor..]
                .iter()
                .position(|id| *id == result.id)
                .expect("mapped id missing from catalog tail");
            cursor += pos + 1;
        }
    }

    #[tokio::test]
    async fn test_idempotent_under_deterministic_stub() {
        let catalog = Catalog::builtin();
        let rewriter = KeywordRewriter { keyword: "biometric" };

        let (text_a, mapped_a) = run_pipeline(&catalog, &rewriter, "reg-001").await.unwrap();
        let (text_b, mapped_b) = run_pipeline(&catalog, &rewriter, "reg-001").await.unwrap();

        assert_eq!(text_a, text_b);
        assert_eq!(mapped_a.len(), mapped_b.len());
        for (a, b) in mapped_a.iter().zip(mapped_b.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.proposed, b.proposed);
        }
    }

    #[tokio::test]
    async fn test_biometric_scenario() {
        let catalog = Catalog::builtin();
        let rewriter = KeywordRewriter { keyword: "biometric" };

        let (_, mapped) = run_pipeline(&catalog, &rewriter, "reg-001").await.unwrap();

        let ids: Vec<&str> = mapped.iter().map(|r| r.id.as_str()).collect();
        assert!(ids.contains(&"pol-privacy-01"));
        assert!(ids.contains(&"pol-privacy-02"));
        assert!(!ids.contains(&"pol-governance-01"));
    }

    #[tokio::test]
    async fn test_empty_catalog_returns_regulation_only() {
        let catalog = Catalog::new(
            vec![crate::models::Regulation::new("reg-001", "Some obligation.")],
            vec![],
        )
        .unwrap();
        let rewriter = EchoRewriter::new();

        let (text, mapped) = run_pipeline(&catalog, &rewriter, "reg-001").await.unwrap();

        assert_eq!(text, "Some obligation.");
        assert!(mapped.is_empty());
        assert_eq!(rewriter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_aborts_without_partial_results() {
        let catalog = Catalog::builtin();
        let rewriter = FailingRewriter {
            fail_on: 3,
            calls: AtomicUsize::new(0),
        };

        let result = run_pipeline(&catalog, &rewriter, "reg-001").await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("simulated service failure"));
        // Aborted on the third call: no further policies were attempted
        assert_eq!(rewriter.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_build_report_unknown_regulation() {
        let catalog = Catalog::builtin();
        let report = build_report(&catalog, "reg-999", String::new(), vec![], "test-model");

        assert_eq!(report.metadata.policies_considered, 0);
        assert_eq!(report.metadata.policies_changed, 0);
        assert!(report.regulation_text.is_empty());
    }
}
