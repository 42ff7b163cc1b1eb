pub mod budgets;
pub mod categories;
pub mod dashboard;
pub mod expenses;
pub mod users;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Dashboard views
        .route("/api/dashboard/:owner_id", get(dashboard::summary))
        .route("/api/dashboard/:owner_id/overview", get(dashboard::overview))
        .route(
            "/api/dashboard/:owner_id/categories",
            get(dashboard::category_breakdown),
        )
        .route("/api/dashboard/:owner_id/recent", get(dashboard::recent))
        // Expense CRUD (create nests owner and category ids, as the
        // record-keeping API does)
        .route("/api/expenses/user/:owner_id", get(expenses::list))
        .route("/api/expenses/:id/:category_id", post(expenses::create))
        .route(
            "/api/expenses/:id",
            get(expenses::show)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        // Category management
        .route("/api/categories", post(categories::create))
        .route("/api/categories/user/:owner_id", get(categories::list))
        .route(
            "/api/categories/:id",
            get(categories::show)
                .put(categories::update)
                .delete(categories::delete),
        )
        // Per-category budgets
        .route("/api/budgets", post(budgets::create))
        .route("/api/budgets/user/:owner_id", get(budgets::list))
        .route(
            "/api/budgets/:id",
            get(budgets::show).put(budgets::update).delete(budgets::delete),
        )
        // Users (registration + profile)
        .route("/api/users", post(users::create))
        .route("/api/users/:id", get(users::show).put(users::update))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
