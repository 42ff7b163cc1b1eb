use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::date_utils::flexible_datetime;
use crate::models::{Category, Expense};
use crate::services::aggregation::{ChartWindow, SeriesBucket};
use crate::services::ranking;

/// One bar of the overview chart: a derived label next to the raw values
/// so other display collaborators can reformat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub total_cents: i64,
    pub date: NaiveDate,
}

/// One line of the recent-expenses table.
#[derive(Debug, Clone, Serialize)]
pub struct RecentRow {
    pub id: String,
    pub description: String,
    pub category_name: String,
    pub amount_cents: i64,
    pub amount_display: String,
    #[serde(with = "flexible_datetime")]
    pub date: DateTime<Utc>,
    pub date_display: String,
}

/// Attach display labels to a bucket series: weekday abbreviation for the
/// week window, "Mon DD" for the month window, month abbreviation for the
/// year window.
pub fn chart_points(series: &[SeriesBucket], window: ChartWindow) -> Vec<ChartPoint> {
    let pattern = match window {
        ChartWindow::Week => "%a",
        ChartWindow::Month => "%b %d",
        ChartWindow::Year => "%b",
    };

    series
        .iter()
        .map(|bucket| ChartPoint {
            label: bucket.date.format(pattern).to_string(),
            total_cents: bucket.total_cents,
            date: bucket.date,
        })
        .collect()
}

/// The `n` newest expenses shaped for the recent-expenses table, with
/// category names resolved ("Uncategorized" when the reference dangles).
pub fn recent_rows(expenses: &[Expense], categories: &[Category], n: usize) -> Vec<RecentRow> {
    ranking::most_recent(expenses, n)
        .into_iter()
        .map(|expense| {
            let category_name = categories
                .iter()
                .find(|c| c.id == expense.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "Uncategorized".into());

            RecentRow {
                category_name,
                description: expense.description_text().to_string(),
                amount_cents: expense.amount_cents,
                amount_display: expense.amount_display(),
                date_display: format_date(&expense.date),
                date: expense.date,
                id: expense.id,
            }
        })
        .collect()
}

pub fn format_cents(cents: i64) -> String {
    let is_negative = cents < 0;
    let abs_cents = cents.abs();
    let dollars = abs_cents / 100;
    let remainder = abs_cents % 100;

    if is_negative {
        format!("-{}.{:02}", dollars, remainder)
    } else {
        format!("{}.{:02}", dollars, remainder)
    }
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: &str, amount_cents: i64, date: &str, category_id: &str) -> Expense {
        Expense {
            id: id.into(),
            description: Some("Coffee".into()),
            amount_cents,
            date: crate::date_utils::parse_flexible_datetime(date).unwrap(),
            category_id: category_id.into(),
            owner_id: "user-1".into(),
        }
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(123456), "1234.56");
        assert_eq!(format_cents(-9050), "-90.50");
    }

    #[test]
    fn test_format_date() {
        let date = crate::date_utils::parse_flexible_datetime("2026-03-05").unwrap();
        assert_eq!(format_date(&date), "Mar 5, 2026");
    }

    #[test]
    fn test_chart_labels_per_window() {
        let buckets = vec![SeriesBucket {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            total_cents: 1200,
        }];

        assert_eq!(chart_points(&buckets, ChartWindow::Week)[0].label, "Mon");
        assert_eq!(chart_points(&buckets, ChartWindow::Month)[0].label, "Mar 02");
        assert_eq!(chart_points(&buckets, ChartWindow::Year)[0].label, "Mar");
    }

    #[test]
    fn test_chart_points_keep_raw_values() {
        let buckets = vec![SeriesBucket {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            total_cents: 1200,
        }];
        let points = chart_points(&buckets, ChartWindow::Week);
        assert_eq!(points[0].total_cents, 1200);
        assert_eq!(points[0].date, buckets[0].date);
    }

    #[test]
    fn test_recent_rows_resolve_category_names() {
        let categories = vec![Category {
            id: "cat-a".into(),
            name: "Groceries".into(),
            description: None,
            owner_id: "user-1".into(),
        }];
        let expenses = vec![
            expense("e1", 1000, "2026-03-01", "cat-a"),
            expense("e2", 2500, "2026-03-02", "cat-gone"),
        ];

        let rows = recent_rows(&expenses, &categories, 10);
        assert_eq!(rows.len(), 2);
        // Newest first.
        assert_eq!(rows[0].id, "e2");
        assert_eq!(rows[0].category_name, "Uncategorized");
        assert_eq!(rows[0].amount_display, "25.00");
        assert_eq!(rows[1].category_name, "Groceries");
    }

    #[test]
    fn test_recent_rows_bounded() {
        let expenses: Vec<Expense> = (0..5)
            .map(|i| expense(&format!("e{}", i), 100, "2026-03-01", "cat-a"))
            .collect();
        assert_eq!(recent_rows(&expenses, &[], 3).len(), 3);
    }
}
