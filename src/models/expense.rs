use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date_utils::{flexible_datetime, flexible_datetime_opt};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Missing or null amounts on the wire deserialize to 0.
    #[serde(default, deserialize_with = "crate::models::cents_or_zero")]
    pub amount_cents: i64,
    #[serde(with = "flexible_datetime")]
    pub date: DateTime<Utc>,
    /// May reference a category that no longer exists; such expenses are
    /// shown as "Uncategorized".
    pub category_id: String,
    pub owner_id: String,
}

impl Expense {
    pub fn amount_display(&self) -> String {
        let is_negative = self.amount_cents < 0;
        let abs_cents = self.amount_cents.abs();
        let dollars = abs_cents / 100;
        let cents = abs_cents % 100;
        if is_negative {
            format!("-{}.{:02}", dollars, cents)
        } else {
            format!("{}.{:02}", dollars, cents)
        }
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::models::cents_or_zero")]
    pub amount_cents: i64,
    #[serde(with = "flexible_datetime")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateExpense {
    pub description: Option<String>,
    pub amount_cents: Option<i64>,
    #[serde(default, with = "flexible_datetime_opt")]
    pub date: Option<DateTime<Utc>>,
    pub category_id: Option<String>,
}
