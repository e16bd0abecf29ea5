//! Washline Protocol Types
//!
//! Defines the JSON bodies exchanged between the server, the appliance
//! controller and the web UI.

pub mod error;
pub mod ops;
pub mod phase;
pub mod response;

pub use error::{ApiError, ErrorCode};
pub use phase::{ParsePhaseError, Phase};
pub use response::ApiResponse;

/// Sentinel a device sends as `owner` in a heartbeat to clear the bound identifier.
pub const OWNER_CLEAR_SENTINEL: &str = "";
