//! Evaluation node: score the current element against the rubric behind a
//! bounded retry/validation guardrail.

use epic_core::{CompletionModel, PacingPolicy};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::decode::decode_json_object;
use crate::error::{FlowError, Result};
use crate::rubric::QUALITY_STANDARDS;
use crate::state::{CurrentElement, ElementEvaluation, ElementKind, EpicState, Quality};

/// Fresh generation calls per element before degrading to an ERROR record.
const MAX_ATTEMPTS: usize = 3;

/// Shorter explanations do not justify a score and fail the attempt.
const MIN_EXPLANATION_WORDS: usize = 20;

#[derive(Debug, Deserialize)]
struct EvalPayload {
    quality: String,
    explanation: String,
    recommendations: String,
}

/// Produces exactly one evaluation for the current element and decides
/// whether a refinement pass is warranted. Never fails the pipeline: retry
/// exhaustion degrades to an ERROR-tier record instead.
pub(crate) async fn run(
    model: &dyn CompletionModel,
    pacing: &PacingPolicy,
    state: &mut EpicState,
) {
    let Some(current) = state.current.clone() else {
        return;
    };

    let evaluation = if current.content.is_empty() {
        not_found(current.kind)
    } else {
        score_with_retries(model, pacing, &current).await
    };

    state.refinement_needed = evaluation.quality == Quality::Low;
    state.evaluations.push(evaluation);
}

/// Sentinel for sections absent from the source text. No generation call
/// is made for these.
fn not_found(kind: ElementKind) -> ElementEvaluation {
    ElementEvaluation::new(
        kind,
        Quality::NotFound,
        format!("The '{kind}' section is absent from the epic text, so there is nothing to score."),
        format!("Add a '{kind}' section so it can be assessed against the quality standards."),
    )
}

async fn score_with_retries(
    model: &dyn CompletionModel,
    pacing: &PacingPolicy,
    current: &CurrentElement,
) -> ElementEvaluation {
    let prompt = evaluation_prompt(current.kind, &current.content);
    let mut last_error = String::new();

    for attempt in 1..=MAX_ATTEMPTS {
        match score_once(model, pacing, &prompt).await {
            Ok((quality, explanation, recommendations)) => {
                return ElementEvaluation::new(current.kind, quality, explanation, recommendations);
            }
            Err(error) => {
                warn!(
                    element = %current.kind,
                    attempt,
                    max_attempts = MAX_ATTEMPTS,
                    transient = matches!(&error, FlowError::Model(inner) if inner.is_transient()),
                    error = %error,
                    "evaluation attempt failed"
                );
                last_error = error.to_string();
            }
        }
    }

    ElementEvaluation::new(
        current.kind,
        Quality::Error,
        format!(
            "Evaluation failed after {MAX_ATTEMPTS} attempts: {last_error}. \
             This may be caused by service quota exhaustion or an invalid response."
        ),
        "Check the generation service quota and confirm it returns the expected JSON shape, \
         then rerun the evaluation.",
    )
}

/// One attempt: call, decode, validate. Every failure abandons the attempt
/// entirely; there is no partial reuse across attempts.
async fn score_once(
    model: &dyn CompletionModel,
    pacing: &PacingPolicy,
    prompt: &str,
) -> Result<(Quality, String, String)> {
    let raw = model.complete(prompt).await;
    pacing.settle_after_call().await;

    let parsed = decode_json_object(&raw?)?;
    let payload: EvalPayload = serde_json::from_value(Value::Object(parsed))?;

    let quality = Quality::from_tier(&payload.quality).ok_or_else(|| {
        FlowError::Validation(format!("invalid quality tier: {:?}", payload.quality))
    })?;

    let words = payload.explanation.split_whitespace().count();
    if words < MIN_EXPLANATION_WORDS {
        return Err(FlowError::Validation(format!(
            "explanation too short: {words} words, need {MIN_EXPLANATION_WORDS}"
        )));
    }

    Ok((quality, payload.explanation, payload.recommendations))
}

fn evaluation_prompt(kind: ElementKind, content: &str) -> String {
    format!(
        r#"Evaluate the element based on standards.

Standards:
{QUALITY_STANDARDS}

Element: {kind}
Content: {content}

Return in this exact JSON format:
{{
    "quality": "HIGH, MEDIUM, or LOW",
    "explanation": "why this score",
    "recommendations": "how to improve"
}}

IMPORTANT:
1. Quality MUST be one of: HIGH, MEDIUM, LOW
2. Explanation must be at least {MIN_EXPLANATION_WORDS} words and justify the quality score
3. Recommendations must be specific and actionable"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EpicDocument;
    use epic_model::MockModel;

    const LONG_EXPLANATION: &str = "The statement names the affected users, quantifies the \
        revenue impact, and anchors the problem in a concrete checkout context that the team \
        can act on directly.";

    fn state_with_current(content: &str) -> EpicState {
        let mut state = EpicState::new(EpicDocument::new(1, "raw"));
        state.current = Some(CurrentElement {
            kind: ElementKind::ProblemStatement,
            content: content.to_string(),
        });
        state
    }

    fn valid_response(quality: &str) -> String {
        format!(
            r#"{{"quality": "{quality}", "explanation": "{LONG_EXPLANATION}", "recommendations": "Quantify the drop-off rate."}}"#
        )
    }

    #[tokio::test]
    async fn test_valid_score_on_first_attempt() {
        let mock = MockModel::new("mock").with_response(valid_response("HIGH"));
        let mut state = state_with_current("Checkout abandonment is rising.");

        run(&mock, &PacingPolicy::zero(), &mut state).await;

        assert_eq!(mock.call_count(), 1);
        assert_eq!(state.evaluations.len(), 1);
        assert_eq!(state.evaluations[0].quality, Quality::High);
        assert!(!state.refinement_needed);
    }

    #[tokio::test]
    async fn test_low_score_requests_refinement() {
        let mock = MockModel::new("mock").with_response(valid_response("LOW"));
        let mut state = state_with_current("Things are bad.");

        run(&mock, &PacingPolicy::zero(), &mut state).await;

        assert_eq!(state.evaluations[0].quality, Quality::Low);
        assert!(state.refinement_needed);
    }

    #[tokio::test]
    async fn test_empty_content_short_circuits_without_calls() {
        let mock = MockModel::new("mock");
        let mut state = state_with_current("");

        run(&mock, &PacingPolicy::zero(), &mut state).await;

        assert_eq!(mock.call_count(), 0);
        assert_eq!(state.evaluations[0].quality, Quality::NotFound);
        assert!(!state.refinement_needed);
    }

    #[tokio::test]
    async fn test_retry_bound_is_exactly_three_attempts() {
        // Every response parses but fails the explanation-length rule.
        let short = r#"{"quality": "HIGH", "explanation": "too short", "recommendations": "r"}"#;
        let mock = MockModel::new("mock")
            .with_response(short)
            .with_response(short)
            .with_response(short)
            .with_response(short);
        let mut state = state_with_current("Some content.");

        run(&mock, &PacingPolicy::zero(), &mut state).await;

        assert_eq!(mock.call_count(), 3);
        assert_eq!(state.evaluations[0].quality, Quality::Error);
        assert!(state.evaluations[0].explanation.contains("after 3 attempts"));
        assert!(!state.refinement_needed);
    }

    #[tokio::test]
    async fn test_invalid_tier_is_retried_then_recovers() {
        let bad_tier = r#"{"quality": "EXCELLENT", "explanation": "irrelevant", "recommendations": "r"}"#;
        let mock = MockModel::new("mock")
            .with_response(bad_tier)
            .with_response(valid_response("MEDIUM"));
        let mut state = state_with_current("Some content.");

        run(&mock, &PacingPolicy::zero(), &mut state).await;

        assert_eq!(mock.call_count(), 2);
        assert_eq!(state.evaluations[0].quality, Quality::Medium);
    }

    #[tokio::test]
    async fn test_service_failures_count_against_the_budget() {
        let mock = MockModel::new("mock")
            .with_error("HTTP 429 rate limit")
            .with_error("HTTP 429 rate limit")
            .with_response(valid_response("HIGH"));
        let mut state = state_with_current("Some content.");

        run(&mock, &PacingPolicy::zero(), &mut state).await;

        assert_eq!(mock.call_count(), 3);
        assert_eq!(state.evaluations[0].quality, Quality::High);
    }

    #[test]
    fn test_prompt_embeds_rubric_and_content() {
        let prompt = evaluation_prompt(ElementKind::Title, "Checkout revamp");
        assert!(prompt.contains("Quality Standards for Epic Elements"));
        assert!(prompt.contains("Element: Title"));
        assert!(prompt.contains("Checkout revamp"));
    }
}
