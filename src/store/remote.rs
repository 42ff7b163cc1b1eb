use std::time::Duration;

use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::date_utils::parse_flexible_datetime;
use crate::error::{AppError, AppResult};
use crate::models::{
    BudgetPeriod, Category, CategoryBudget, Expense, NewCategory, NewCategoryBudget, NewExpense,
    NewUser, UpdateCategory, UpdateCategoryBudget, UpdateExpense, UpdateUser, User,
};
use crate::store::RecordStore;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the remote record-keeping API. The wire format speaks
/// decimal dollars and camelCase, and is loose about id types; everything
/// is normalized to the internal model (cents, string ids) here at the
/// boundary.
pub struct RemoteStore {
    base_url: String,
    client: Client,
}

impl RemoteStore {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_list(&self, path: &str) -> AppResult<Vec<serde_json::Value>> {
        debug!(path = %path, "Fetching record list");
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    async fn get_record(&self, path: &str, what: &str, id: &str) -> AppResult<serde_json::Value> {
        let resp = self.client.get(self.url(path)).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("{} {} not found", what, id)));
        }
        Ok(resp.error_for_status()?.json().await?)
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> AppResult<serde_json::Value> {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    async fn put_json<B: Serialize>(
        &self,
        path: &str,
        what: &str,
        id: &str,
        body: &B,
    ) -> AppResult<serde_json::Value> {
        let resp = self.client.put(self.url(path)).json(body).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("{} {} not found", what, id)));
        }
        Ok(resp.error_for_status()?.json().await?)
    }

    async fn delete(&self, path: &str, what: &str, id: &str) -> AppResult<()> {
        let resp = self.client.delete(self.url(path)).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("{} {} not found", what, id)));
        }
        resp.error_for_status()?;
        Ok(())
    }
}

fn dollars_to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn cents_to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}

fn rfc3339(date: &chrono::DateTime<chrono::Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Ids arrive as strings or bare numbers depending on the endpoint;
/// normalize to the canonical string form before anything compares them.
fn wire_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireId {
        Text(String),
        Int(i64),
    }

    Ok(match WireId::deserialize(deserializer)? {
        WireId::Text(s) => s,
        WireId::Int(n) => n.to_string(),
    })
}

fn parse_period(s: &str) -> Option<BudgetPeriod> {
    match s {
        "Daily" => Some(BudgetPeriod::Daily),
        "Weekly" => Some(BudgetPeriod::Weekly),
        "Monthly" => Some(BudgetPeriod::Monthly),
        "Yearly" => Some(BudgetPeriod::Yearly),
        _ => None,
    }
}

/// Deserialize every record in `raw`, dropping (with a warning) the ones
/// that do not convert. One bad upstream record must never blank a
/// dashboard render.
fn collect_records<A, M, F>(raw: Vec<serde_json::Value>, what: &str, convert: F) -> Vec<M>
where
    A: serde::de::DeserializeOwned,
    F: Fn(A) -> Option<M>,
{
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<A>(value) {
            Ok(api) => convert(api),
            Err(e) => {
                warn!(record = %what, error = %e, "Skipping malformed record from upstream");
                None
            }
        })
        .collect()
}

fn decode<A: serde::de::DeserializeOwned>(value: serde_json::Value, what: &str) -> AppResult<A> {
    serde_json::from_value(value)
        .map_err(|e| AppError::Internal(format!("Malformed {} record from upstream: {}", what, e)))
}

// ---------------------------------------------------------------------------
// Wire DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiExpense {
    #[serde(deserialize_with = "wire_id")]
    id: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    amount: Option<f64>,
    date: String,
    #[serde(deserialize_with = "wire_id")]
    category_id: String,
    #[serde(deserialize_with = "wire_id")]
    user_id: String,
}

impl ApiExpense {
    fn into_expense(self) -> Option<Expense> {
        let Some(date) = parse_flexible_datetime(&self.date) else {
            warn!(id = %self.id, date = %self.date, "Skipping expense with unparsable date");
            return None;
        };
        Some(Expense {
            id: self.id,
            description: self.description,
            amount_cents: dollars_to_cents(self.amount.unwrap_or(0.0)),
            date,
            category_id: self.category_id,
            owner_id: self.user_id,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCategory {
    #[serde(deserialize_with = "wire_id")]
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(deserialize_with = "wire_id")]
    user_id: String,
}

impl ApiCategory {
    fn into_category(self) -> Category {
        Category {
            id: self.id,
            name: self.name,
            description: self.description,
            owner_id: self.user_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiBudget {
    #[serde(deserialize_with = "wire_id")]
    id: String,
    #[serde(deserialize_with = "wire_id")]
    category_id: String,
    #[serde(deserialize_with = "wire_id")]
    user_id: String,
    #[serde(default)]
    amount: Option<f64>,
    #[serde(default)]
    spent: Option<f64>,
    #[serde(default)]
    period: Option<String>,
}

impl ApiBudget {
    fn into_budget(self) -> CategoryBudget {
        CategoryBudget {
            id: self.id,
            category_id: self.category_id,
            owner_id: self.user_id,
            amount_cents: dollars_to_cents(self.amount.unwrap_or(0.0)),
            spent_cents: self.spent.map(dollars_to_cents),
            period: self.period.as_deref().and_then(parse_period),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiUser {
    #[serde(deserialize_with = "wire_id")]
    id: String,
    name: String,
    email: String,
    #[serde(default)]
    over_all_budget: Option<f64>,
}

impl ApiUser {
    fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            overall_budget_cents: dollars_to_cents(self.over_all_budget.unwrap_or(0.0)),
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    period: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    over_all_budget: Option<f64>,
}

fn period_str(period: BudgetPeriod) -> String {
    match period {
        BudgetPeriod::Daily => "Daily",
        BudgetPeriod::Weekly => "Weekly",
        BudgetPeriod::Monthly => "Monthly",
        BudgetPeriod::Yearly => "Yearly",
    }
    .to_string()
}

#[async_trait]
impl RecordStore for RemoteStore {
    async fn list_expenses(&self, owner_id: &str) -> AppResult<Vec<Expense>> {
        let raw = self.get_list(&format!("/api/Expense/user/{}", owner_id)).await?;
        Ok(collect_records(raw, "expense", ApiExpense::into_expense))
    }

    async fn get_expense(&self, id: &str) -> AppResult<Expense> {
        let value = self
            .get_record(&format!("/api/Expense/{}", id), "Expense", id)
            .await?;
        let api: ApiExpense = decode(value, "expense")?;
        api.into_expense()
            .ok_or_else(|| AppError::Internal(format!("Expense {} has an unparsable date", id)))
    }

    async fn create_expense(
        &self,
        owner_id: &str,
        category_id: &str,
        new: NewExpense,
    ) -> AppResult<Expense> {
        let body = ExpenseBody {
            description: new.description,
            amount: Some(cents_to_dollars(new.amount_cents)),
            date: Some(rfc3339(&new.date)),
            category_id: None,
        };
        let value = self
            .post_json(&format!("/api/Expense/{}/{}", owner_id, category_id), &body)
            .await?;
        let api: ApiExpense = decode(value, "expense")?;
        api.into_expense()
            .ok_or_else(|| AppError::Internal("Created expense has an unparsable date".into()))
    }

    async fn update_expense(&self, id: &str, update: UpdateExpense) -> AppResult<Expense> {
        let body = ExpenseBody {
            description: update.description,
            amount: update.amount_cents.map(cents_to_dollars),
            date: update.date.as_ref().map(rfc3339),
            category_id: update.category_id,
        };
        let value = self
            .put_json(&format!("/api/Expense/{}", id), "Expense", id, &body)
            .await?;
        let api: ApiExpense = decode(value, "expense")?;
        api.into_expense()
            .ok_or_else(|| AppError::Internal(format!("Expense {} has an unparsable date", id)))
    }

    async fn delete_expense(&self, id: &str) -> AppResult<()> {
        self.delete(&format!("/api/Expense/{}", id), "Expense", id).await
    }

    async fn list_categories(&self, owner_id: &str) -> AppResult<Vec<Category>> {
        let raw = self
            .get_list(&format!("/api/categories/user/{}", owner_id))
            .await?;
        Ok(collect_records(raw, "category", |api: ApiCategory| {
            Some(api.into_category())
        }))
    }

    async fn get_category(&self, id: &str) -> AppResult<Category> {
        let value = self
            .get_record(&format!("/api/categories/{}", id), "Category", id)
            .await?;
        let api: ApiCategory = decode(value, "category")?;
        Ok(api.into_category())
    }

    async fn create_category(&self, new: NewCategory) -> AppResult<Category> {
        let body = CategoryBody {
            name: Some(new.name),
            description: new.description,
            user_id: Some(new.owner_id),
        };
        let value = self.post_json("/api/categories", &body).await?;
        let api: ApiCategory = decode(value, "category")?;
        Ok(api.into_category())
    }

    async fn update_category(&self, id: &str, update: UpdateCategory) -> AppResult<Category> {
        let body = CategoryBody {
            name: update.name,
            description: update.description,
            user_id: None,
        };
        let value = self
            .put_json(&format!("/api/categories/{}", id), "Category", id, &body)
            .await?;
        let api: ApiCategory = decode(value, "category")?;
        Ok(api.into_category())
    }

    async fn delete_category(&self, id: &str) -> AppResult<()> {
        self.delete(&format!("/api/categories/{}", id), "Category", id)
            .await
    }

    async fn list_budgets(&self, owner_id: &str) -> AppResult<Vec<CategoryBudget>> {
        let raw = self
            .get_list(&format!("/api/CategoryBudget/user/{}", owner_id))
            .await?;
        Ok(collect_records(raw, "budget", |api: ApiBudget| {
            Some(api.into_budget())
        }))
    }

    async fn get_budget(&self, id: &str) -> AppResult<CategoryBudget> {
        let value = self
            .get_record(&format!("/api/CategoryBudget/{}", id), "Budget", id)
            .await?;
        let api: ApiBudget = decode(value, "budget")?;
        Ok(api.into_budget())
    }

    async fn create_budget(&self, new: NewCategoryBudget) -> AppResult<CategoryBudget> {
        let body = BudgetBody {
            category_id: Some(new.category_id),
            user_id: Some(new.owner_id),
            amount: Some(cents_to_dollars(new.amount_cents)),
            period: new.period.map(period_str),
        };
        let value = self.post_json("/api/CategoryBudget", &body).await?;
        let api: ApiBudget = decode(value, "budget")?;
        Ok(api.into_budget())
    }

    async fn update_budget(
        &self,
        id: &str,
        update: UpdateCategoryBudget,
    ) -> AppResult<CategoryBudget> {
        let body = BudgetBody {
            category_id: None,
            user_id: None,
            amount: update.amount_cents.map(cents_to_dollars),
            period: update.period.map(period_str),
        };
        let value = self
            .put_json(&format!("/api/CategoryBudget/{}", id), "Budget", id, &body)
            .await?;
        let api: ApiBudget = decode(value, "budget")?;
        Ok(api.into_budget())
    }

    async fn delete_budget(&self, id: &str) -> AppResult<()> {
        self.delete(&format!("/api/CategoryBudget/{}", id), "Budget", id)
            .await
    }

    async fn get_user(&self, id: &str) -> AppResult<User> {
        let value = self
            .get_record(&format!("/api/users/{}", id), "User", id)
            .await?;
        let api: ApiUser = decode(value, "user")?;
        Ok(api.into_user())
    }

    async fn create_user(&self, new: NewUser) -> AppResult<User> {
        let body = UserBody {
            name: Some(new.name),
            email: Some(new.email),
            over_all_budget: Some(cents_to_dollars(new.overall_budget_cents)),
        };
        let value = self.post_json("/api/users", &body).await?;
        let api: ApiUser = decode(value, "user")?;
        Ok(api.into_user())
    }

    async fn update_user(&self, id: &str, update: UpdateUser) -> AppResult<User> {
        let body = UserBody {
            name: update.name,
            email: update.email,
            over_all_budget: update.overall_budget_cents.map(cents_to_dollars),
        };
        let value = self
            .put_json(&format!("/api/users/{}", id), "User", id, &body)
            .await?;
        let api: ApiUser = decode(value, "user")?;
        Ok(api.into_user())
    }
}
