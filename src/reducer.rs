//! Reducer - pure function: (state, action) -> DispatchResult
//!
//! This is the only place the selection changes.

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::selection::Selection;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            if let Some(error) = state.catalog.error() {
                let error = error.to_string();
                state.message = Some(format!("Catalog unavailable: {error}"));
                return DispatchResult::changed_with(Effect::ReportUnavailable { error });
            }
            let rejected = state
                .catalog()
                .map(|catalog| catalog.rejected().to_vec())
                .unwrap_or_default();
            if rejected.is_empty() {
                return DispatchResult::unchanged();
            }
            state.message = Some(format!("{} record(s) skipped", rejected.len()));
            DispatchResult::changed_with(Effect::ReportRejected { rejected })
        }

        Action::SelectionActivate(id) => activate(state, id),

        Action::SelectionClear => {
            if state.selection.id().is_none() {
                return DispatchResult::unchanged();
            }
            state.selection = Selection::NoSelection;
            DispatchResult::changed_with(Effect::SelectionDidChange { id: None })
        }

        Action::CursorMove(delta) => {
            let len = state.catalog_len();
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let target = (state.cursor as i64 + delta as i64).clamp(0, len as i64 - 1);
            if state.set_cursor(target as usize) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::CursorActivate => match state.cursor_descriptor().map(|entry| entry.id) {
            Some(id) => activate(state, id),
            None => DispatchResult::unchanged(),
        },

        Action::UiResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn activate(state: &mut AppState, id: u32) -> DispatchResult<Effect> {
    let Some(index) = state
        .catalog()
        .and_then(|catalog| catalog.lookup(id).ok())
        .map(|entry| entry.index)
    else {
        // Ids come from the catalog itself, so this is a consistency bug.
        state.message = Some(format!("Unknown pokemon #{id}"));
        return DispatchResult::changed_with(Effect::ReportMissingEntry { id });
    };

    let cursor_moved = state.set_cursor(index);
    let next = state.selection.activate(id, state.repeat_policy);
    if next == state.selection {
        return if cursor_moved {
            DispatchResult::changed()
        } else {
            DispatchResult::unchanged()
        };
    }

    state.selection = next;
    state.message = None;
    DispatchResult::changed_with(Effect::SelectionDidChange { id: next.id() })
}
