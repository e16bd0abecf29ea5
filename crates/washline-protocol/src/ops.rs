//! Operation-specific types.

pub mod finish;
pub mod heartbeat;
pub mod log;
pub mod scan_out;
pub mod start;
pub mod state;

pub use finish::FinishResponse;
pub use heartbeat::{HeartbeatRequest, HeartbeatResponse};
pub use log::{EventKind, EventLogEntry};
pub use scan_out::{ScanOutRequest, ScanOutResponse};
pub use start::{StartRequest, StartResponse};
pub use state::{LegacyStatus, StateView};

