pub mod budget;
pub mod category;
pub mod expense;
pub mod user;

/// Missing and null amounts both read as zero; a bad amount on one
/// record must never fail a whole payload.
pub(crate) fn cents_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

pub use budget::{BudgetPeriod, CategoryBudget, NewCategoryBudget, UpdateCategoryBudget};
pub use category::{Category, NewCategory, UpdateCategory};
pub use expense::{Expense, NewExpense, UpdateExpense};
pub use user::{NewUser, UpdateUser, User};
