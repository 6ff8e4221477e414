//! Static grading configuration.
//!
//! The standards text is supplied verbatim inside every evaluation prompt.
//! It is data, not logic: editing it changes grading behavior without
//! touching the state machine.

/// Per-element criteria distinguishing HIGH, MEDIUM, and LOW quality.
pub const QUALITY_STANDARDS: &str = "\
Quality Standards for Epic Elements:

Title:
- HIGH: Clear, concise, specific, and memorable
- MEDIUM: Clear but could be more specific or engaging
- LOW: Vague, too long, or unclear

Problem Statement:
- HIGH: Clear problem, quantified impact, specific context
- MEDIUM: Problem identified but impact or context unclear
- LOW: Vague problem, no context or impact stated

Product Outcome & Instrumentation:
- HIGH: Specific, measurable outcomes with clear metrics
- MEDIUM: Outcomes stated but metrics unclear
- LOW: No clear outcomes or measurements

Requirements - User Stories:
- HIGH: Complete user stories (As a..., I want..., So that...)
- MEDIUM: Basic user stories with some missing elements
- LOW: Incomplete or unclear user stories

Non-Functional Requirements:
- HIGH: Specific, measurable, testable requirements
- MEDIUM: Requirements stated but not fully measurable
- LOW: Vague or missing requirements";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ElementKind;

    #[test]
    fn test_standards_cover_every_element() {
        for kind in ElementKind::ALL {
            assert!(
                QUALITY_STANDARDS.contains(kind.as_str()),
                "standards missing criteria for {kind}"
            );
        }
    }
}
