use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    BudgetPeriod, Category, CategoryBudget, Expense, NewCategory, NewCategoryBudget, NewExpense,
    NewUser, UpdateCategory, UpdateCategoryBudget, UpdateExpense, UpdateUser, User,
};
use crate::store::RecordStore;

/// In-memory stand-in for the remote record-keeping API. Used for demo
/// runs and for tests; records live only as long as the process.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    expenses: Vec<Expense>,
    categories: Vec<Category>,
    budgets: Vec<CategoryBudget>,
    users: Vec<User>,
}

const DEMO_OWNER: &str = "user-1";

const DEMO_CATEGORIES: &[(&str, &str, &str)] = &[
    ("cat-1", "Groceries", "Food and household items"),
    ("cat-2", "Transportation", "Gas, public transit, and car maintenance"),
    ("cat-3", "Entertainment", "Movies, games, and other fun activities"),
    ("cat-4", "Utilities", "Electricity, water, internet, etc."),
    ("cat-5", "Dining Out", "Restaurants and takeout"),
];

const DEMO_DESCRIPTIONS: &[&str] = &[
    "Grocery shopping",
    "Gas station",
    "Movie tickets",
    "Electricity bill",
    "Restaurant dinner",
];

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the demo fixture: one user, five
    /// categories with monthly budgets, and expenses spread over the 60
    /// days leading up to now.
    pub fn with_demo_data() -> Self {
        let mut inner = Inner::default();

        inner.users.push(User {
            id: DEMO_OWNER.into(),
            name: "Demo User".into(),
            email: "demo@example.com".into(),
            overall_budget_cents: 200_000,
        });

        for (i, (id, name, description)) in DEMO_CATEGORIES.iter().enumerate() {
            inner.categories.push(Category {
                id: (*id).into(),
                name: (*name).into(),
                description: Some((*description).into()),
                owner_id: DEMO_OWNER.into(),
            });
            inner.budgets.push(CategoryBudget {
                id: format!("budget-{}", i + 1),
                category_id: (*id).into(),
                owner_id: DEMO_OWNER.into(),
                amount_cents: 40_000 - (i as i64) * 5_000,
                spent_cents: None,
                period: Some(BudgetPeriod::Monthly),
            });
        }

        let now = Utc::now();
        let mut serial: usize = 0;
        for days_ago in 0..60i64 {
            // One or two expenses per day, cycling through the categories.
            let per_day = 1 + days_ago % 2;
            for _ in 0..per_day {
                serial += 1;
                let slot = serial % DEMO_CATEGORIES.len();
                inner.expenses.push(Expense {
                    id: format!("exp-{}", serial),
                    description: Some(DEMO_DESCRIPTIONS[slot].into()),
                    amount_cents: 500 + ((serial as i64 * 137) % 9_000),
                    date: now - chrono::Duration::days(days_ago),
                    category_id: DEMO_CATEGORIES[slot].0.into(),
                    owner_id: DEMO_OWNER.into(),
                });
            }
        }

        Self {
            inner: Mutex::new(inner),
        }
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_expenses(&self, owner_id: &str) -> AppResult<Vec<Expense>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .expenses
            .iter()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get_expense(&self, id: &str) -> AppResult<Expense> {
        let inner = self.inner.lock().await;
        inner
            .expenses
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Expense {} not found", id)))
    }

    async fn create_expense(
        &self,
        owner_id: &str,
        category_id: &str,
        new: NewExpense,
    ) -> AppResult<Expense> {
        let mut inner = self.inner.lock().await;
        let expense = Expense {
            id: new_id(),
            description: new.description,
            amount_cents: new.amount_cents,
            date: new.date,
            category_id: category_id.into(),
            owner_id: owner_id.into(),
        };
        inner.expenses.push(expense.clone());
        Ok(expense)
    }

    async fn update_expense(&self, id: &str, update: UpdateExpense) -> AppResult<Expense> {
        let mut inner = self.inner.lock().await;
        let expense = inner
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Expense {} not found", id)))?;

        if let Some(description) = update.description {
            expense.description = Some(description);
        }
        if let Some(amount_cents) = update.amount_cents {
            expense.amount_cents = amount_cents;
        }
        if let Some(date) = update.date {
            expense.date = date;
        }
        if let Some(category_id) = update.category_id {
            expense.category_id = category_id;
        }
        Ok(expense.clone())
    }

    async fn delete_expense(&self, id: &str) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        let before = inner.expenses.len();
        inner.expenses.retain(|e| e.id != id);
        if inner.expenses.len() == before {
            return Err(AppError::NotFound(format!("Expense {} not found", id)));
        }
        Ok(())
    }

    async fn list_categories(&self, owner_id: &str) -> AppResult<Vec<Category>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .categories
            .iter()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get_category(&self, id: &str) -> AppResult<Category> {
        let inner = self.inner.lock().await;
        inner
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    async fn create_category(&self, new: NewCategory) -> AppResult<Category> {
        let mut inner = self.inner.lock().await;
        let category = Category {
            id: new_id(),
            name: new.name,
            description: new.description,
            owner_id: new.owner_id,
        };
        inner.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: &str, update: UpdateCategory) -> AppResult<Category> {
        let mut inner = self.inner.lock().await;
        let category = inner
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        if let Some(name) = update.name {
            category.name = name;
        }
        if let Some(description) = update.description {
            category.description = Some(description);
        }
        Ok(category.clone())
    }

    async fn delete_category(&self, id: &str) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        let before = inner.categories.len();
        inner.categories.retain(|c| c.id != id);
        if inner.categories.len() == before {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }
        Ok(())
    }

    async fn list_budgets(&self, owner_id: &str) -> AppResult<Vec<CategoryBudget>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .budgets
            .iter()
            .filter(|b| b.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get_budget(&self, id: &str) -> AppResult<CategoryBudget> {
        let inner = self.inner.lock().await;
        inner
            .budgets
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Budget {} not found", id)))
    }

    async fn create_budget(&self, new: NewCategoryBudget) -> AppResult<CategoryBudget> {
        let mut inner = self.inner.lock().await;
        let budget = CategoryBudget {
            id: new_id(),
            category_id: new.category_id,
            owner_id: new.owner_id,
            amount_cents: new.amount_cents,
            spent_cents: None,
            period: new.period,
        };
        inner.budgets.push(budget.clone());
        Ok(budget)
    }

    async fn update_budget(
        &self,
        id: &str,
        update: UpdateCategoryBudget,
    ) -> AppResult<CategoryBudget> {
        let mut inner = self.inner.lock().await;
        let budget = inner
            .budgets
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Budget {} not found", id)))?;

        if let Some(amount_cents) = update.amount_cents {
            budget.amount_cents = amount_cents;
        }
        if let Some(period) = update.period {
            budget.period = Some(period);
        }
        Ok(budget.clone())
    }

    async fn delete_budget(&self, id: &str) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        let before = inner.budgets.len();
        inner.budgets.retain(|b| b.id != id);
        if inner.budgets.len() == before {
            return Err(AppError::NotFound(format!("Budget {} not found", id)));
        }
        Ok(())
    }

    async fn get_user(&self, id: &str) -> AppResult<User> {
        let inner = self.inner.lock().await;
        inner
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    async fn create_user(&self, new: NewUser) -> AppResult<User> {
        let mut inner = self.inner.lock().await;
        let user = User {
            id: new_id(),
            name: new.name,
            email: new.email,
            overall_budget_cents: new.overall_budget_cents,
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: &str, update: UpdateUser) -> AppResult<User> {
        let mut inner = self.inner.lock().await;
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(overall_budget_cents) = update.overall_budget_cents {
            user.overall_budget_cents = overall_budget_cents;
        }
        Ok(user.clone())
    }
}
