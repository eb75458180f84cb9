//! Actions - every event the app reacts to

use serde::{Deserialize, Serialize};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    /// A cell was activated (click, Enter) with this pokemon id
    SelectionActivate(u32),

    // ===== Selection category =====
    /// Drop the current selection
    SelectionClear,

    // ===== Cursor category =====
    /// Move the keyboard cursor by a signed number of cells
    CursorMove(i32),

    /// Activate the cell under the cursor
    CursorActivate,

    // ===== UI category =====
    UiResize(u16, u16),

    Quit,
}
