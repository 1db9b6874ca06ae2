//! HTTP API module for the tea estate payroll engine.
//!
//! This module provides the REST endpoints for pricing work entries,
//! aggregating payroll and rolling up estate finances.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AggregateRequest, MonthlyRollupRequest, PeriodRequest, RollupRequest, WageRequest,
    WorkEntryRequest,
};
pub use response::{
    AggregateResponse, ApiError, HealthResponse, MonthlyRollupResponse, RollupResponse,
    WageResponse,
};
pub use state::AppState;
