//! # epic-flow
//!
//! Rubric-driven evaluation workflow for epic planning documents.
//!
//! One epic document goes in, one persisted evaluation report comes out.
//! A small state machine drives five node behaviors in sequence:
//!
//! 1. **Extract**: the generation service splits the raw text into the
//!    five fixed elements (missing ones become empty strings)
//! 2. **Route**: pick the next unevaluated element, or finish
//! 3. **Evaluate**: score the element against the rubric behind a
//!    bounded retry/validation guardrail
//! 4. **Refine**: for LOW scores only, attach deeper remediation feedback
//! 5. **Aggregate**: persist the full evaluation list as a timestamped
//!    JSON artifact
//!
//! Epics are processed strictly one at a time; every generation call is
//! awaited to completion and followed by a quota-protecting pacing delay.
//!
//! ```rust,ignore
//! use epic_flow::{EpicDocument, EpicFlow};
//!
//! let flow = EpicFlow::new(model).with_out_dir("evaluation_results");
//! let report = flow.run(EpicDocument::new(1, epic_text)).await?;
//! println!("{}", report.to_json()?);
//! ```

mod decode;
mod evaluate;
mod extract;
mod refine;
mod route;

pub mod error;
pub mod flow;
pub mod report;
pub mod rubric;
pub mod state;

pub use error::{FlowError, Result};
pub use flow::EpicFlow;
pub use report::EpicReport;
pub use state::{ElementEvaluation, ElementKind, ElementSet, EpicDocument, Quality};
