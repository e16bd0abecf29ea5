//! Shared application state

use std::sync::Arc;

use crate::machine::Laundry;

/// State handed to every route.
#[derive(Clone)]
pub struct AppState {
    /// The single machine context
    pub laundry: Arc<Laundry>,
}

impl AppState {
    pub fn new(laundry: Arc<Laundry>) -> Self {
        Self { laundry }
    }
}
