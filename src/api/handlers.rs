//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_wage, classify_strict, monthly_rollups, price_in_period, rollup_with_comparison,
    summarize, summarize_by_day, summarize_by_worker, validate_entry,
};
use crate::config::{ConfigLoader, RollupPolicy};
use crate::error::EngineResult;
use crate::models::{AuditWarning, ReportingPeriod, WorkEntry};

use super::request::{
    AggregateRequest, MonthlyRollupRequest, RollupRequest, WageRequest, into_entries, into_ledger,
};
use super::response::{
    AggregateResponse, ApiError, ApiErrorResponse, HealthResponse, MonthlyRollupResponse,
    RollupResponse, WageResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/wage", post(wage_handler))
        .route("/aggregate", post(aggregate_handler))
        .route("/rollup", post(rollup_handler))
        .route("/rollup/monthly", post(monthly_rollup_handler))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        estate: state.config().estate().code.clone(),
    })
}

/// Handler for POST /wage.
///
/// Prices a single work entry and returns its audit step.
async fn wage_handler(
    State(state): State<AppState>,
    payload: Result<Json<WageRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing wage request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let organization_id = request.tenant.organization_id.clone();
    match perform_wage(request, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                organization_id = %organization_id,
                kind = result.kind.as_str(),
                computed_amount = %result.computed_amount,
                duration_us = start_time.elapsed().as_micros(),
                "Wage calculated"
            );
            json_response(result)
        }
        Err(err) => error_response(correlation_id, err.into()),
    }
}

/// Handler for POST /aggregate.
///
/// Returns period, per-worker and per-day payroll totals.
async fn aggregate_handler(
    State(state): State<AppState>,
    payload: Result<Json<AggregateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing aggregate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let organization_id = request.tenant.organization_id.clone();
    let entries_count = request.entries.len();
    match perform_aggregate(request, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                organization_id = %organization_id,
                entries_count,
                worker_count = result.totals.worker_count,
                total_paid = %result.totals.total_paid,
                duration_us = start_time.elapsed().as_micros(),
                "Aggregation completed"
            );
            json_response(result)
        }
        Err(err) => error_response(correlation_id, err.into()),
    }
}

/// Handler for POST /rollup.
///
/// Returns the financial rollup of a period next to the preceding period.
async fn rollup_handler(
    State(state): State<AppState>,
    payload: Result<Json<RollupRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing rollup request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let organization_id = request.tenant.organization_id.clone();
    match perform_rollup(request, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                organization_id = %organization_id,
                revenue = %result.report.current.revenue,
                profit = %result.report.current.profit,
                duration_us = start_time.elapsed().as_micros(),
                "Rollup completed"
            );
            json_response(result)
        }
        Err(err) => error_response(correlation_id, err.into()),
    }
}

/// Handler for POST /rollup/monthly.
async fn monthly_rollup_handler(
    State(state): State<AppState>,
    payload: Result<Json<MonthlyRollupRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing monthly rollup request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let organization_id = request.tenant.organization_id.clone();
    match perform_monthly_rollup(request, state.config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                organization_id = %organization_id,
                year = result.year,
                duration_us = start_time.elapsed().as_micros(),
                "Monthly rollup completed"
            );
            json_response(result)
        }
        Err(err) => error_response(correlation_id, err.into()),
    }
}

/// Prices the entry of a wage request.
fn perform_wage(request: WageRequest, config: &ConfigLoader) -> EngineResult<WageResponse> {
    let entry = request.entry.into_entry(config)?;
    let warnings = classification_warnings(std::slice::from_ref(&entry), config);
    let calculation = calculate_wage(&entry, 1)?;

    Ok(WageResponse {
        tenant: request.tenant,
        kind: calculation.priced.kind(),
        computed_amount: calculation.priced.computed_amount,
        entry: calculation.priced,
        audit_step: calculation.audit_step,
        warnings,
    })
}

/// Aggregates the entries of an aggregate request.
fn perform_aggregate(
    request: AggregateRequest,
    config: &ConfigLoader,
) -> EngineResult<AggregateResponse> {
    let period = request.period.to_period()?;
    let entries = into_entries(request.entries, &period, config)?;

    let priced = price_in_period(&entries, &period)?;
    let totals = summarize(&priced)?;
    let workers = summarize_by_worker(&priced)?;
    let days = summarize_by_day(&priced)?;
    let warnings = classification_warnings(&entries, config);

    Ok(AggregateResponse {
        tenant: request.tenant,
        period,
        totals,
        workers,
        days,
        warnings,
    })
}

/// Rolls up the ledger of a rollup request.
fn perform_rollup(request: RollupRequest, config: &ConfigLoader) -> EngineResult<RollupResponse> {
    let period = request.period.to_period()?;
    let policy = effective_policy(request.policy, config);

    // Both the period and the one it is compared with are rolled up.
    let window = ReportingPeriod::new(period.preceding()?.start_date, period.end_date)?;
    let ledger = into_ledger(
        request.work_entries,
        request.sales,
        request.bonuses,
        &window,
        config,
    )?;

    let report = rollup_with_comparison(
        &ledger,
        &period,
        &policy,
        config.policy().change_precision,
    )?;

    Ok(RollupResponse {
        tenant: request.tenant,
        policy,
        report,
    })
}

/// Charts the ledger of a monthly rollup request.
fn perform_monthly_rollup(
    request: MonthlyRollupRequest,
    config: &ConfigLoader,
) -> EngineResult<MonthlyRollupResponse> {
    let policy = effective_policy(request.policy, config);

    let year = ReportingPeriod::new(
        ReportingPeriod::month(request.year, 1)?.start_date,
        ReportingPeriod::month(request.year, 12)?.end_date,
    )?;
    let ledger = into_ledger(
        request.work_entries,
        request.sales,
        request.bonuses,
        &year,
        config,
    )?;
    let months = monthly_rollups(&ledger, request.year, &policy)?;

    Ok(MonthlyRollupResponse {
        tenant: request.tenant,
        year: request.year,
        policy,
        months,
    })
}

/// The request override when present, otherwise the configured rule.
fn effective_policy(requested: Option<RollupPolicy>, config: &ConfigLoader) -> RollupPolicy {
    requested.unwrap_or(config.policy().rollup)
}

/// Collects missing-flag warnings when strict classification is enabled.
fn classification_warnings(entries: &[WorkEntry], config: &ConfigLoader) -> Vec<AuditWarning> {
    if !config.policy().strict_classification {
        return Vec::new();
    }

    entries
        .iter()
        .filter(|entry| validate_entry(entry).is_ok())
        .filter_map(|entry| classify_strict(entry).warning)
        .collect()
}

fn json_response<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, api_error: ApiErrorResponse) -> Response {
    warn!(
        correlation_id = %correlation_id,
        code = %api_error.error.code,
        error = %api_error.error.message,
        "Request failed"
    );
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Turns a JSON extraction failure into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
