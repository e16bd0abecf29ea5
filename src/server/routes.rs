//! Route handlers
//!
//! Thin adapters: decode the body, run the command against the machine
//! context, wrap the outcome in the response envelope.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use washline_protocol::ops::{
    EventLogEntry, FinishResponse, HeartbeatRequest, HeartbeatResponse, ScanOutRequest,
    ScanOutResponse, StartRequest, StartResponse, StateView,
};

use super::error::{decode_body, Reply};
use super::AppState;

/// Liveness text.
pub async fn health() -> &'static str {
    "washline ok"
}

pub async fn get_state(State(state): State<AppState>) -> Json<StateView> {
    Json(state.laundry.state())
}

pub async fn get_log(State(state): State<AppState>) -> Json<Vec<EventLogEntry>> {
    Json(state.laundry.log())
}

pub async fn start(State(state): State<AppState>, body: Bytes) -> Reply<StartResponse> {
    Reply(decode_body::<StartRequest>(&body).and_then(|request| state.laundry.start(&request)))
}

/// Any body is ignored.
pub async fn finish(State(state): State<AppState>) -> Reply<FinishResponse> {
    Reply(state.laundry.finish())
}

pub async fn scan_out(State(state): State<AppState>, body: Bytes) -> Reply<ScanOutResponse> {
    Reply(decode_body::<ScanOutRequest>(&body).and_then(|request| state.laundry.scan_out(&request)))
}

pub async fn heartbeat(State(state): State<AppState>, body: Bytes) -> Reply<HeartbeatResponse> {
    Reply(decode_body::<HeartbeatRequest>(&body).and_then(|request| state.laundry.heartbeat(&request)))
}
