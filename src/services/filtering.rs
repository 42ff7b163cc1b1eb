use chrono::NaiveDate;

use crate::models::Expense;

/// Narrow to a single category; `None` means no category filter. Ids are
/// canonical strings, so equality is a plain string compare.
pub fn filter_by_category(expenses: &[Expense], category_id: Option<&str>) -> Vec<Expense> {
    match category_id {
        None => expenses.to_vec(),
        Some(id) => expenses
            .iter()
            .filter(|e| e.category_id == id)
            .cloned()
            .collect(),
    }
}

/// Keep expenses dated within `[from, to]`, both bounds inclusive and
/// either side open. Composes with [`filter_by_category`] in any order.
pub fn filter_by_date_range(
    expenses: &[Expense],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| {
            let day = e.date.date_naive();
            from.map_or(true, |f| day >= f) && to.map_or(true, |t| day <= t)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: &str, date: &str, category_id: &str) -> Expense {
        Expense {
            id: id.into(),
            description: None,
            amount_cents: 1000,
            date: crate::date_utils::parse_flexible_datetime(date).unwrap(),
            category_id: category_id.into(),
            owner_id: "user-1".into(),
        }
    }

    fn fixture() -> Vec<Expense> {
        vec![
            expense("e1", "2026-01-10", "cat-a"),
            expense("e2", "2026-02-15", "cat-b"),
            expense("e3", "2026-03-20", "cat-a"),
            expense("e4", "2026-04-25", "cat-b"),
        ]
    }

    fn ids(expenses: &[Expense]) -> Vec<&str> {
        expenses.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_category_filter() {
        let expenses = fixture();
        assert_eq!(ids(&filter_by_category(&expenses, Some("cat-a"))), vec!["e1", "e3"]);
        assert_eq!(filter_by_category(&expenses, Some("cat-z")).len(), 0);
    }

    #[test]
    fn test_category_filter_none_is_identity() {
        let expenses = fixture();
        assert_eq!(ids(&filter_by_category(&expenses, None)), ids(&expenses));
    }

    #[test]
    fn test_date_range_bounds_inclusive() {
        let expenses = fixture();
        let from = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
        assert_eq!(ids(&filter_by_date_range(&expenses, Some(from), Some(to))), vec!["e2", "e3"]);
    }

    #[test]
    fn test_date_range_open_ended_from() {
        let expenses = fixture();
        let from = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        // No upper bound: everything on or after `from`, however far out.
        assert_eq!(ids(&filter_by_date_range(&expenses, Some(from), None)), vec!["e3", "e4"]);
    }

    #[test]
    fn test_date_range_open_ended_to() {
        let expenses = fixture();
        let to = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
        assert_eq!(ids(&filter_by_date_range(&expenses, None, Some(to))), vec!["e1", "e2"]);
    }

    #[test]
    fn test_date_range_unbounded_is_identity() {
        let expenses = fixture();
        assert_eq!(ids(&filter_by_date_range(&expenses, None, None)), ids(&expenses));
    }

    #[test]
    fn test_filters_commute() {
        let expenses = fixture();
        let from = Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        let to = Some(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());

        let category_first =
            filter_by_date_range(&filter_by_category(&expenses, Some("cat-a")), from, to);
        let dates_first =
            filter_by_category(&filter_by_date_range(&expenses, from, to), Some("cat-a"));

        assert_eq!(ids(&category_first), ids(&dates_first));
        assert_eq!(ids(&category_first), vec!["e1", "e3"]);
    }
}
