use crate::models::Expense;
use crate::services::aggregation::CategorySummary;

/// Default size of the dashboard's recent-expenses list.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// The `n` newest expenses, newest first. Ties keep their input order.
pub fn most_recent(expenses: &[Expense], n: usize) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

/// Stable sort of summaries by percentage of budget used, descending, so
/// the most-over-budget categories lead the breakdown.
pub fn sort_by_percentage_desc(summaries: &[CategorySummary]) -> Vec<CategorySummary> {
    let mut sorted = summaries.to_vec();
    sorted.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted
}
