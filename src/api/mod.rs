//! HTTP API module for the shift engine.
//!
//! Exposes the slot catalog, the current slot, hourly output aggregation
//! and form statistics over REST.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CurrentSlotQuery, FormStatsRequest, HourlyOutputRequest, parse_evaluation_time,
};
pub use response::{
    ApiError, ApiErrorResponse, CurrentSlotResponse, FormStatsResponse, HourlyOutputResponse,
    SlotsResponse,
};
pub use state::AppState;
