use axum::extract::{Path, Query, State};
use axum::response::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::services::aggregation::{self, CategorySummary, ChartWindow};
use crate::services::presentation::{self, ChartPoint, RecentRow};
use crate::services::ranking;
use crate::state::AppState;

/// The dashboard's stat cards. The sum of per-category budgets and the
/// owner's overall budget are different quantities; both are reported,
/// each with its own remaining figure.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_spent_cents: i64,
    pub expense_count: usize,
    pub largest_expense_cents: i64,
    pub category_budget_cents: i64,
    pub budget_count: usize,
    pub category_budget_remaining_cents: i64,
    pub overall_budget_cents: i64,
    pub overall_budget_remaining_cents: i64,
}

pub async fn summary(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> AppResult<Json<DashboardSummary>> {
    debug!(owner_id = %owner_id, "Loading dashboard summary");

    let expenses = state.store.list_expenses(&owner_id).await?;
    let budgets = state.store.list_budgets(&owner_id).await?;
    let user = state.store.get_user(&owner_id).await?;

    let total_spent_cents = aggregation::total_spent(&expenses);
    let category_budget_cents = aggregation::sum_budgets(&budgets);

    debug!(
        expense_count = expenses.len(),
        total_spent_cents = total_spent_cents,
        category_budget_cents = category_budget_cents,
        "Dashboard summary computed"
    );

    Ok(Json(DashboardSummary {
        total_spent_cents,
        expense_count: expenses.len(),
        largest_expense_cents: aggregation::largest_expense(&expenses),
        category_budget_cents,
        budget_count: budgets.len(),
        category_budget_remaining_cents: aggregation::budget_remaining(
            category_budget_cents,
            total_spent_cents,
        ),
        overall_budget_cents: user.overall_budget_cents,
        overall_budget_remaining_cents: aggregation::budget_remaining(
            user.overall_budget_cents,
            total_spent_cents,
        ),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct OverviewParams {
    pub window: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub window: &'static str,
    pub title: &'static str,
    pub points: Vec<ChartPoint>,
}

pub async fn overview(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    Query(params): Query<OverviewParams>,
) -> AppResult<Json<OverviewResponse>> {
    let raw_window = params.window.as_deref().unwrap_or("week");
    let window = raw_window.parse::<ChartWindow>().map_err(|_| {
        AppError::Validation(format!(
            "Invalid chart window '{}': expected week, month or year",
            raw_window
        ))
    })?;

    let expenses = state.store.list_expenses(&owner_id).await?;
    let series = aggregation::time_series(&expenses, window, Utc::now());
    let points = presentation::chart_points(&series, window);

    Ok(Json(OverviewResponse {
        window: window.as_str(),
        title: window.title(),
        points,
    }))
}

pub async fn category_breakdown(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> AppResult<Json<Vec<CategorySummary>>> {
    let expenses = state.store.list_expenses(&owner_id).await?;
    let categories = state.store.list_categories(&owner_id).await?;
    let budgets = state.store.list_budgets(&owner_id).await?;

    let summaries = aggregation::category_summaries(&categories, &expenses, &budgets);
    Ok(Json(ranking::sort_by_percentage_desc(&summaries)))
}

#[derive(Debug, Default, Deserialize)]
pub struct RecentParams {
    pub limit: Option<usize>,
}

pub async fn recent(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    Query(params): Query<RecentParams>,
) -> AppResult<Json<Vec<RecentRow>>> {
    let limit = params.limit.unwrap_or(ranking::DEFAULT_RECENT_LIMIT);

    let expenses = state.store.list_expenses(&owner_id).await?;
    let categories = state.store.list_categories(&owner_id).await?;

    Ok(Json(presentation::recent_rows(&expenses, &categories, limit)))
}
