//! Typed workflow state: the five epic elements, quality tiers, and the
//! mutable context threaded through one epic's pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of elements an epic is expected to contain.
///
/// `ALL` is the canonical rubric order; the router walks it so element
/// selection is reproducible across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    #[serde(rename = "Title")]
    Title,
    #[serde(rename = "Problem Statement")]
    ProblemStatement,
    #[serde(rename = "Product Outcome & Instrumentation")]
    ProductOutcome,
    #[serde(rename = "Requirements - User Stories")]
    UserStories,
    #[serde(rename = "Non-Functional Requirements")]
    NonFunctional,
}

impl ElementKind {
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Title,
        ElementKind::ProblemStatement,
        ElementKind::ProductOutcome,
        ElementKind::UserStories,
        ElementKind::NonFunctional,
    ];

    /// Exact key wording used in extraction payloads and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Title => "Title",
            ElementKind::ProblemStatement => "Problem Statement",
            ElementKind::ProductOutcome => "Product Outcome & Instrumentation",
            ElementKind::UserStories => "Requirements - User Stories",
            ElementKind::NonFunctional => "Non-Functional Requirements",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The extracted content of one epic, keyed by element.
///
/// All five entries exist from construction onward; elements missing from
/// the source text are empty strings. Created once by the extractor and
/// read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ElementSet {
    contents: [String; 5],
}

impl ElementSet {
    pub fn get(&self, kind: ElementKind) -> &str {
        &self.contents[kind.index()]
    }

    pub fn set(&mut self, kind: ElementKind, content: String) {
        self.contents[kind.index()] = content;
    }

    /// Entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementKind, &str)> {
        ElementKind::ALL.iter().map(|kind| (*kind, self.get(*kind)))
    }
}

/// Ordinal quality score plus the two degraded-outcome sentinels.
///
/// Only the three ordinal tiers are ever accepted from the generation
/// service; `NotFound` and `Error` are produced locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "Element Not Found")]
    NotFound,
    #[serde(rename = "ERROR")]
    Error,
}

impl Quality {
    /// Parse one of the three ordinal tiers. Exact match on the uppercase
    /// wording; anything else is a validation failure at the call site.
    pub fn from_tier(raw: &str) -> Option<Quality> {
        match raw.trim() {
            "HIGH" => Some(Quality::High),
            "MEDIUM" => Some(Quality::Medium),
            "LOW" => Some(Quality::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::High => "HIGH",
            Quality::Medium => "MEDIUM",
            Quality::Low => "LOW",
            Quality::NotFound => "Element Not Found",
            Quality::Error => "ERROR",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element's evaluation record.
///
/// `feedback` is attached only when a refinement pass ran, which happens
/// exactly for LOW-tier scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementEvaluation {
    pub element: ElementKind,
    pub quality: Quality,
    pub explanation: String,
    pub recommendations: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl ElementEvaluation {
    pub fn new(
        element: ElementKind,
        quality: Quality,
        explanation: impl Into<String>,
        recommendations: impl Into<String>,
    ) -> Self {
        Self {
            element,
            quality,
            explanation: explanation.into(),
            recommendations: recommendations.into(),
            feedback: None,
        }
    }

    #[must_use]
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }
}

/// Raw input text for one epic. The caller-supplied index is used only
/// for artifact naming.
#[derive(Debug, Clone)]
pub struct EpicDocument {
    pub index: usize,
    pub text: String,
}

impl EpicDocument {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self { index, text: text.into() }
    }
}

/// The element currently selected by the router.
#[derive(Debug, Clone)]
pub(crate) struct CurrentElement {
    pub kind: ElementKind,
    pub content: String,
}

/// Mutable context threaded through one epic's pipeline.
///
/// Exactly one exists per epic, owned by the driver for the epic's whole
/// lifetime; nothing is shared across epics.
#[derive(Debug)]
pub(crate) struct EpicState {
    pub doc: EpicDocument,
    pub elements: Option<ElementSet>,
    pub evaluations: Vec<ElementEvaluation>,
    pub current: Option<CurrentElement>,
    pub refinement_needed: bool,
    pub done: bool,
}

impl EpicState {
    pub fn new(doc: EpicDocument) -> Self {
        Self {
            doc,
            elements: None,
            evaluations: Vec::new(),
            current: None,
            refinement_needed: false,
            done: false,
        }
    }

    pub fn is_evaluated(&self, kind: ElementKind) -> bool {
        self.evaluations.iter().any(|e| e.element == kind)
    }
}
