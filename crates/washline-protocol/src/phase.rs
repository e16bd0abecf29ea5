//! Appliance lifecycle phase.
//!
//! Idle → Running → {Finished | Aborted}, Aborted → Locked after the grace
//! window, and every terminal phase back to Idle through scan-out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle phase of the appliance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No cycle outstanding
    #[default]
    Idle,
    /// A cycle is counting down
    Running,
    /// The cycle ran to completion
    #[serde(alias = "Complete")]
    Finished,
    /// The appliance stopped with time still on the clock
    Aborted,
    /// An aborted cycle was left unclaimed past the grace window
    Locked,
}

impl Phase {
    /// Check if this phase needs a scan-out before the machine is reusable.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Finished | Phase::Aborted | Phase::Locked)
    }

    /// Wire name of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Running => "Running",
            Phase::Finished => "Finished",
            Phase::Aborted => "Aborted",
            Phase::Locked => "Locked",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase text reported by a device could not be recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePhaseError(pub String);

impl fmt::Display for ParsePhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown phase '{}'", self.0)
    }
}

impl std::error::Error for ParsePhaseError {}

impl FromStr for Phase {
    type Err = ParsePhaseError;

    /// Case-insensitive; the controller firmware reports `Complete` for a finished cycle.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "idle" => Ok(Phase::Idle),
            "running" => Ok(Phase::Running),
            "finished" | "complete" => Ok(Phase::Finished),
            "aborted" => Ok(Phase::Aborted),
            "locked" => Ok(Phase::Locked),
            _ => Err(ParsePhaseError(s.to_string())),
        }
    }
}
