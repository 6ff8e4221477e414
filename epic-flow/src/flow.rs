//! Phase state machine driving one epic through the pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use epic_core::{CompletionModel, PacingPolicy};
use tracing::{info, warn};

use crate::error::{FlowError, Result};
use crate::report::EpicReport;
use crate::state::{EpicDocument, EpicState};
use crate::{evaluate, extract, refine, route};

/// Generous for five elements; terminates the loop if routing ever stops
/// converging.
const STEP_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Extract,
    Route,
    Evaluate,
    Refine,
    Aggregate,
}

/// Evaluation pipeline for epic documents.
///
/// Holds the generation-service client, pacing policy, and report
/// directory. Each call to [`EpicFlow::run`] drives one epic through
/// extract → route → (evaluate → refine → route)* → aggregate; epics are
/// strictly sequential, each owning its state for its whole lifetime.
pub struct EpicFlow {
    model: Arc<dyn CompletionModel>,
    pacing: PacingPolicy,
    out_dir: PathBuf,
}

impl EpicFlow {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self {
            model,
            pacing: PacingPolicy::default(),
            out_dir: PathBuf::from("evaluation_results"),
        }
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: PacingPolicy) -> Self {
        self.pacing = pacing;
        self
    }

    #[must_use]
    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    pub fn pacing(&self) -> &PacingPolicy {
        &self.pacing
    }

    /// Drive one epic to completion and return its report.
    pub async fn run(&self, doc: EpicDocument) -> Result<EpicReport> {
        info!(epic = doc.index, model = self.model.name(), "starting evaluation workflow");

        let mut state = EpicState::new(doc);
        let mut phase = Phase::Extract;

        for _ in 0..STEP_LIMIT {
            phase = match phase {
                Phase::Extract => {
                    extract::run(self.model.as_ref(), &self.pacing, &mut state).await?;
                    Phase::Route
                }
                Phase::Route => {
                    route::run(&mut state);
                    if state.done { Phase::Aggregate } else { Phase::Evaluate }
                }
                Phase::Evaluate => {
                    evaluate::run(self.model.as_ref(), &self.pacing, &mut state).await;
                    Phase::Refine
                }
                Phase::Refine => {
                    refine::run(self.model.as_ref(), &self.pacing, &mut state).await?;
                    Phase::Route
                }
                Phase::Aggregate => {
                    return Ok(self.aggregate(state).await);
                }
            };
        }

        Err(FlowError::StepLimit(STEP_LIMIT))
    }

    /// Terminal step: build the report and persist it. A write failure is
    /// logged but does not fail the workflow; the caller still gets the
    /// in-memory report.
    async fn aggregate(&self, state: EpicState) -> EpicReport {
        let mut report = EpicReport::new(state.doc.index, state.evaluations);

        match report.persist(&self.out_dir).await {
            Ok(path) => {
                info!(epic = report.epic_index, path = %path.display(), "report saved");
                report.saved_to = Some(path);
            }
            Err(error) => {
                warn!(
                    epic = report.epic_index,
                    error = %error,
                    "failed to persist report, returning in-memory result"
                );
            }
        }

        report
    }
}
