//! Web layer for the road trip planner.
//!
//! Provides HTTP endpoints for listing paces and planning itineraries.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, MAX_DAYS, create_router};
pub use state::{AppState, PoiBackend};
