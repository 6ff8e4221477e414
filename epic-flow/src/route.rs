//! Routing node: select the next unevaluated element or signal completion.

use crate::state::{CurrentElement, ElementKind, EpicState};

/// Pure selection over the canonical element order. Picks the first kind
/// with no evaluation yet; when none remain, clears the current slot and
/// marks the workflow terminal.
pub(crate) fn run(state: &mut EpicState) {
    let next = state.elements.as_ref().and_then(|elements| {
        ElementKind::ALL
            .iter()
            .copied()
            .find(|kind| !state.is_evaluated(*kind))
            .map(|kind| CurrentElement { kind, content: elements.get(kind).to_string() })
    });

    match next {
        Some(current) => {
            state.current = Some(current);
            state.done = false;
        }
        None => {
            state.current = None;
            state.done = true;
        }
    }
}
