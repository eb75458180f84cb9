//! Effects - side effects declared by the reducer
//!
//! After startup there is no I/O left; effects only carry diagnostics out of
//! the pure reducer.

use crate::catalog::RejectedRecord;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Records skipped while building the catalog
    ReportRejected { rejected: Vec<RejectedRecord> },
    /// The catalog could not be loaded at all
    ReportUnavailable { error: String },
    /// A selection event named an id the catalog does not have
    ReportMissingEntry { id: u32 },
    /// Selection moved to a new value
    SelectionDidChange { id: Option<u32> },
}
