use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Owner-level overall budget. Distinct from the sum of per-category
    /// budgets; the two are reported side by side and never substituted.
    #[serde(default)]
    pub overall_budget_cents: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub overall_budget_cents: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub overall_budget_cents: Option<i64>,
}
