use serde::{Deserialize, Serialize};

/// Budget period labels as the record-keeping API spells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetPeriod {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub id: String,
    pub category_id: String,
    pub owner_id: String,
    #[serde(default, deserialize_with = "crate::models::cents_or_zero")]
    pub amount_cents: i64,
    /// Snapshot reported by the record-keeping API. Informational only:
    /// dashboard spend is always recomputed from the expense list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spent_cents: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<BudgetPeriod>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategoryBudget {
    pub category_id: String,
    pub owner_id: String,
    #[serde(default)]
    pub amount_cents: i64,
    #[serde(default)]
    pub period: Option<BudgetPeriod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategoryBudget {
    pub amount_cents: Option<i64>,
    pub period: Option<BudgetPeriod>,
}
