use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{
    Category, CategoryBudget, Expense, NewCategory, NewCategoryBudget, NewExpense, NewUser,
    UpdateCategory, UpdateCategoryBudget, UpdateExpense, UpdateUser, User,
};

pub mod memory;
pub mod remote;

pub use memory::MemoryStore;
pub use remote::RemoteStore;

/// The record-keeping collaborator. Every operation takes an explicit
/// owner or record id; nothing here reads ambient session state. The
/// lists returned are already scoped to the owner; no authorization
/// happens on this side of the boundary.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // Expenses
    async fn list_expenses(&self, owner_id: &str) -> AppResult<Vec<Expense>>;
    async fn get_expense(&self, id: &str) -> AppResult<Expense>;
    async fn create_expense(
        &self,
        owner_id: &str,
        category_id: &str,
        new: NewExpense,
    ) -> AppResult<Expense>;
    async fn update_expense(&self, id: &str, update: UpdateExpense) -> AppResult<Expense>;
    async fn delete_expense(&self, id: &str) -> AppResult<()>;

    // Categories
    async fn list_categories(&self, owner_id: &str) -> AppResult<Vec<Category>>;
    async fn get_category(&self, id: &str) -> AppResult<Category>;
    async fn create_category(&self, new: NewCategory) -> AppResult<Category>;
    async fn update_category(&self, id: &str, update: UpdateCategory) -> AppResult<Category>;
    async fn delete_category(&self, id: &str) -> AppResult<()>;

    // Category budgets
    async fn list_budgets(&self, owner_id: &str) -> AppResult<Vec<CategoryBudget>>;
    async fn get_budget(&self, id: &str) -> AppResult<CategoryBudget>;
    async fn create_budget(&self, new: NewCategoryBudget) -> AppResult<CategoryBudget>;
    async fn update_budget(
        &self,
        id: &str,
        update: UpdateCategoryBudget,
    ) -> AppResult<CategoryBudget>;
    async fn delete_budget(&self, id: &str) -> AppResult<()>;

    // Users
    async fn get_user(&self, id: &str) -> AppResult<User>;
    async fn create_user(&self, new: NewUser) -> AppResult<User>;
    async fn update_user(&self, id: &str, update: UpdateUser) -> AppResult<User>;
}
