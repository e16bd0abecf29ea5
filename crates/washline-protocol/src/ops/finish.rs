//! Report-stop ("finish") operation types.
//!
//! The request carries no body.

use serde::{Deserialize, Serialize};

use crate::phase::Phase;

/// Finish response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishResponse {
    /// Phase after the stop was recorded.
    pub phase: Phase,
    /// True when the stop came before the countdown ran out.
    pub aborted: bool,
}
