//! Refinement node: deepen the most recent LOW evaluation.

use epic_core::{CompletionModel, PacingPolicy};
use tracing::info;

use crate::error::Result;
use crate::state::{ElementKind, EpicState, Quality};

/// Requests concrete remediation steps for the last evaluation and
/// replaces that record with one carrying the feedback. A no-op unless the
/// evaluator flagged refinement and the last record really is LOW. One
/// generation call, no retry: a service failure here halts the epic.
///
/// The flag is cleared before anything else so the router is never
/// re-entered with it stale.
pub(crate) async fn run(
    model: &dyn CompletionModel,
    pacing: &PacingPolicy,
    state: &mut EpicState,
) -> Result<()> {
    let needed = state.refinement_needed;
    state.refinement_needed = false;

    if !needed {
        return Ok(());
    }
    let Some(last) = state.evaluations.last().cloned() else {
        return Ok(());
    };
    if last.quality != Quality::Low {
        return Ok(());
    }

    let content = state
        .elements
        .as_ref()
        .map(|elements| elements.get(last.element).to_string())
        .unwrap_or_default();

    let prompt = refinement_prompt(last.element, &content, &last.explanation, &last.recommendations);
    let feedback = model.complete(&prompt).await;
    pacing.settle_after_call().await;
    let feedback = feedback?;

    info!(element = %last.element, "attached refinement feedback");

    if let Some(slot) = state.evaluations.last_mut() {
        *slot = last.with_feedback(feedback.trim().to_string());
    }
    Ok(())
}

fn refinement_prompt(
    kind: ElementKind,
    content: &str,
    explanation: &str,
    recommendations: &str,
) -> String {
    format!(
        r#"Given the following evaluation for an epic element, provide more detailed, actionable suggestions for improvement.

Element: {kind}
Content: {content}
Quality: LOW
Explanation: {explanation}
Current Recommendations: {recommendations}

Provide specific, concrete steps or examples that the team can follow to improve this element to a HIGH quality. Ensure the suggestions are actionable and clear."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowError;
    use crate::state::{ElementEvaluation, ElementSet, EpicDocument};
    use epic_model::MockModel;

    fn state_with_last(quality: Quality, refinement_needed: bool) -> EpicState {
        let mut state = EpicState::new(EpicDocument::new(1, "raw"));
        let mut elements = ElementSet::default();
        elements.set(ElementKind::Title, "Make things better".to_string());
        state.elements = Some(elements);
        state.evaluations.push(ElementEvaluation::new(
            ElementKind::Title,
            quality,
            "The title is vague and does not hint at scope.",
            "Name the product area.",
        ));
        state.refinement_needed = refinement_needed;
        state
    }

    #[tokio::test]
    async fn test_low_evaluation_gets_feedback() {
        let mock = MockModel::new("mock").with_response("1. Name the product area explicitly.");
        let mut state = state_with_last(Quality::Low, true);

        run(&mock, &PacingPolicy::zero(), &mut state).await.unwrap();

        assert_eq!(mock.call_count(), 1);
        assert_eq!(
            state.evaluations[0].feedback.as_deref(),
            Some("1. Name the product area explicitly.")
        );
        assert!(!state.refinement_needed);
    }

    #[tokio::test]
    async fn test_noop_without_flag() {
        let mock = MockModel::new("mock");
        let mut state = state_with_last(Quality::Low, false);

        run(&mock, &PacingPolicy::zero(), &mut state).await.unwrap();

        assert_eq!(mock.call_count(), 0);
        assert!(state.evaluations[0].feedback.is_none());
    }

    #[tokio::test]
    async fn test_noop_for_non_low_quality() {
        // A stale flag must not trigger refinement for other tiers.
        let mock = MockModel::new("mock");
        let mut state = state_with_last(Quality::Error, true);

        run(&mock, &PacingPolicy::zero(), &mut state).await.unwrap();

        assert_eq!(mock.call_count(), 0);
        assert!(state.evaluations[0].feedback.is_none());
        assert!(!state.refinement_needed);
    }

    #[tokio::test]
    async fn test_service_failure_propagates() {
        let mock = MockModel::new("mock").with_error("HTTP 500 internal");
        let mut state = state_with_last(Quality::Low, true);

        let err = run(&mock, &PacingPolicy::zero(), &mut state).await.unwrap_err();
        assert!(matches!(err, FlowError::Model(_)));
        assert!(state.evaluations[0].feedback.is_none());
        assert!(!state.refinement_needed);
    }
}
