use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::date_utils::{month_start, shift_months, week_start, year_start};
use crate::models::{Category, CategoryBudget, Expense};

/// Time window for the overview chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartWindow {
    Week,
    Month,
    Year,
}

impl FromStr for ChartWindow {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(()),
        }
    }
}

impl ChartWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Week => "Last 7 Days",
            Self::Month => "Last 30 Days",
            Self::Year => "This Year",
        }
    }
}

/// Per-category spend measured against its budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category_id: String,
    pub name: String,
    pub spent_cents: i64,
    pub budget_cents: i64,
    /// Share of budget used, clamped to [0, 100]. 0 when no budget is set.
    pub percentage: f64,
}

/// One time bucket of the overview chart. `date` is the bucket's
/// representative date (its first day); labels are derived downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesBucket {
    pub date: NaiveDate,
    pub total_cents: i64,
}

/// Sum of expense amounts; 0 for an empty collection.
pub fn total_spent(expenses: &[Expense]) -> i64 {
    expenses.iter().map(|e| e.amount_cents).sum()
}

/// Sum of per-category budget amounts. This is not the owner's overall
/// budget, which lives on the [`crate::models::User`] record.
pub fn sum_budgets(budgets: &[CategoryBudget]) -> i64 {
    budgets.iter().map(|b| b.amount_cents).sum()
}

/// Negative means over budget; the sign alone is the signal.
pub fn budget_remaining(total_budget_cents: i64, total_spent_cents: i64) -> i64 {
    total_budget_cents - total_spent_cents
}

/// Largest single expense amount, or 0 for an empty collection.
pub fn largest_expense(expenses: &[Expense]) -> i64 {
    expenses.iter().map(|e| e.amount_cents).max().unwrap_or(0)
}

/// One summary per category, in category input order. Callers wanting
/// "most over budget first" sort separately with
/// [`crate::services::ranking::sort_by_percentage_desc`].
pub fn category_summaries(
    categories: &[Category],
    expenses: &[Expense],
    budgets: &[CategoryBudget],
) -> Vec<CategorySummary> {
    categories
        .iter()
        .map(|category| {
            let spent_cents: i64 = expenses
                .iter()
                .filter(|e| e.category_id == category.id)
                .map(|e| e.amount_cents)
                .sum();

            // First match wins; duplicate budgets for a category are not merged.
            let budget_cents = budgets
                .iter()
                .find(|b| b.category_id == category.id)
                .map(|b| b.amount_cents)
                .unwrap_or(0);

            let percentage = if budget_cents > 0 {
                ((spent_cents as f64 / budget_cents as f64) * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            };

            CategorySummary {
                category_id: category.id.clone(),
                name: category.name.clone(),
                spent_cents,
                budget_cents,
                percentage,
            }
        })
        .collect()
}

/// Bucket expense totals over the chart window ending at `reference`.
///
/// Pre-built buckets start at zero and survive empty, keeping chart axes
/// stable. Expenses dated before the window start are discarded; an
/// expense past the pre-built range still gets a bucket of its own rather
/// than being dropped. Buckets come back ascending by date.
pub fn time_series(
    expenses: &[Expense],
    window: ChartWindow,
    reference: DateTime<Utc>,
) -> Vec<SeriesBucket> {
    let today = reference.date_naive();

    let window_start = match window {
        ChartWindow::Week => week_start(today - chrono::Duration::days(7)),
        ChartWindow::Month => month_start(shift_months(today, -1)),
        ChartWindow::Year => year_start(shift_months(today, -12)),
    };

    let mut totals: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    match window {
        ChartWindow::Week => {
            for i in 0..7 {
                totals.insert(window_start + chrono::Duration::days(i), 0);
            }
        }
        ChartWindow::Month => {
            for i in 0..30 {
                let day = window_start + chrono::Duration::days(i);
                if day <= today {
                    totals.insert(day, 0);
                }
            }
        }
        ChartWindow::Year => {
            for month in 1..=12 {
                let first = NaiveDate::from_ymd_opt(today.year(), month, 1)
                    .expect("first of month is valid");
                totals.insert(first, 0);
            }
        }
    }

    for expense in expenses {
        let day = expense.date.date_naive();
        if day < window_start {
            continue;
        }
        let key = match window {
            ChartWindow::Year => month_start(day),
            _ => day,
        };
        *totals.entry(key).or_insert(0) += expense.amount_cents;
    }

    totals
        .into_iter()
        .map(|(date, total_cents)| SeriesBucket { date, total_cents })
        .collect()
}
