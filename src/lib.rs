//! Washline - shared washer/dryer state server
//!
//! Keeps the authoritative phase, countdown and ownership of one shared
//! appliance. The device reports starts, stops and heartbeats; residents read
//! the state and scan out to release the machine. Time-based transitions are
//! reconciled lazily at the start of every request.

pub mod clock;
pub mod config;
pub mod handlers;
pub mod machine;
pub mod notify;
pub mod server;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{EffectiveConfig, ServerConfig};
pub use machine::{Laundry, MachineState, TimingPolicy};
pub use notify::{Notice, Notifier, RecordingNotifier};
pub use washline_protocol::{ApiError, ErrorCode, Phase};
