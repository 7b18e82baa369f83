//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - determinism and chunk-order independence
//! - advisory-only adapter suggestions
//! - precedence of the decision-request block
//! - reason-code presence per outcome

use crate::engine::{decide, evaluate};
use crate::evidence::summarize;
use crate::model::{AdapterSuggestion, Candidate, EvidenceChunk, RequestFacts};
use crate::policy::{GlobalPolicy, Policy, RolePolicy};
use proptest::prelude::*;
use serde_json::{json, Map};
use stopgate_types::{Outcome, ReasonCode};

// ============================================================================
// Strategies
// ============================================================================

const TAGS: &[&str] = &["a", "b", "c", "d", "e", "f"];
const ROLES: &[&str] = &["analyst", "engineer", "triage"];
const LINKS: &[&str] = &["link", "consent"];

fn arb_tag() -> impl Strategy<Value = String> {
    prop::sample::select(TAGS).prop_map(str::to_string)
}

fn arb_tag_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_tag(), 0..4).prop_map(|mut tags| {
        tags.dedup();
        tags
    })
}

fn arb_role_policy() -> impl Strategy<Value = RolePolicy> {
    (arb_tag_list(), arb_tag_list(), arb_tag_list()).prop_map(|(must, must_not, should)| {
        let must_not = must_not
            .into_iter()
            .filter(|t| !must.contains(t))
            .collect();
        RolePolicy {
            must,
            must_not,
            should,
        }
    })
}

fn arb_policy() -> impl Strategy<Value = Policy> {
    (
        prop::collection::btree_map(
            prop::sample::select(ROLES).prop_map(str::to_string),
            arb_role_policy(),
            0..3,
        ),
        prop::collection::vec(prop::sample::select(LINKS).prop_map(str::to_string), 0..2),
        any::<bool>(),
    )
        .prop_map(|(roles, must_links, require_permission)| Policy {
            global: GlobalPolicy {
                must_links,
                require_permission,
            },
            roles,
        })
}

fn arb_suggestion() -> impl Strategy<Value = AdapterSuggestion> {
    prop_oneof![
        Just(AdapterSuggestion::None),
        Just(AdapterSuggestion::Allow),
        Just(AdapterSuggestion::Stop),
    ]
}

fn arb_candidate() -> impl Strategy<Value = Candidate> {
    (
        prop::sample::select(ROLES),
        any::<bool>(),
        prop::option::of(any::<bool>()),
        arb_suggestion(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(role, is_decision_request, permission_to_answer, adapter_suggestion, link, consent)| {
                let mut evidence = Map::new();
                evidence.insert("link".to_string(), json!(link));
                if consent {
                    evidence.insert("consent".to_string(), json!("signed"));
                }
                Candidate {
                    candidate_id: "c-1".to_string(),
                    name: "Test".to_string(),
                    applied_role: role.to_string(),
                    evidence,
                    request: RequestFacts {
                        is_decision_request,
                        permission_to_answer,
                        adapter_suggestion,
                    },
                }
            },
        )
}

fn arb_chunks() -> impl Strategy<Value = Vec<EvidenceChunk>> {
    prop::collection::vec(arb_tag_list().prop_map(|tags| EvidenceChunk::with_tags(tags)), 0..4)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn evaluation_is_deterministic(c in arb_candidate(), chunks in arb_chunks(), p in arb_policy()) {
        let first = decide(&c, &chunks, &p);
        let second = decide(&c, &chunks, &p);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn chunk_order_does_not_matter(c in arb_candidate(), chunks in arb_chunks(), p in arb_policy()) {
        let mut reversed = chunks.clone();
        reversed.reverse();
        prop_assert_eq!(decide(&c, &chunks, &p), decide(&c, &reversed, &p));
    }

    #[test]
    fn suggestion_never_changes_outcome_or_reason(
        c in arb_candidate(),
        chunks in arb_chunks(),
        p in arb_policy(),
        suggestion in arb_suggestion(),
    ) {
        let summary = summarize(&chunks);
        let baseline = {
            let mut plain = c.clone();
            plain.request.adapter_suggestion = AdapterSuggestion::None;
            evaluate(&plain, &summary, &p)
        };
        let mut suggested = c.clone();
        suggested.request.adapter_suggestion = suggestion;
        let d = evaluate(&suggested, &summary, &p);

        prop_assert_eq!(d.outcome(), baseline.outcome());
        prop_assert_eq!(d.reason_code(), baseline.reason_code());
    }

    #[test]
    fn decision_requests_are_always_blocked_for_known_roles(
        c in arb_candidate(),
        chunks in arb_chunks(),
        p in arb_policy(),
    ) {
        prop_assume!(p.role(&c.applied_role).is_some());
        let mut request = c.clone();
        request.request.is_decision_request = true;

        let d = decide(&request, &chunks, &p);
        prop_assert_eq!(d.reason_code(), Some(ReasonCode::DecisionAutomationBlocked));
    }

    #[test]
    fn denied_permission_is_never_allowed(
        c in arb_candidate(),
        chunks in arb_chunks(),
        p in arb_policy(),
        suggestion in arb_suggestion(),
    ) {
        let mut denied = c.clone();
        denied.request.permission_to_answer = Some(false);
        denied.request.adapter_suggestion = suggestion;

        let d = decide(&denied, &chunks, &p);
        prop_assert_eq!(d.outcome(), Outcome::Stop);
    }

    #[test]
    fn non_allow_outcomes_carry_a_matching_reason(
        c in arb_candidate(),
        chunks in arb_chunks(),
        p in arb_policy(),
    ) {
        let d = decide(&c, &chunks, &p);
        match d.outcome() {
            Outcome::Allow => prop_assert_eq!(d.reason_code(), None),
            outcome => {
                let code = d.reason_code();
                prop_assert!(code.is_some());
                prop_assert_eq!(code.map(ReasonCode::outcome), Some(outcome));
            }
        }
    }
}
