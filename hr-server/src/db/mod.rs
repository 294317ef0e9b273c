//! Storage layer
//!
//! The credential store ([`AccountStore`]) and the resource stores
//! ([`Repository`]) are async traits with two implementations:
//! [`PgStore`] for PostgreSQL and [`MemoryStore`] for development and
//! tests. Uniqueness is enforced inside the store in both cases; callers
//! may pre-check, but only the store's `Duplicate` is authoritative.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use std::sync::Arc;

use async_trait::async_trait;
use shared::client::EmployeeCount;
use shared::models::{
    Account, ApprovalStatus, Company, CompanyCreate, CompanyUpdate, Department, DepartmentCreate,
    DepartmentUpdate, Designation, DesignationCreate, DesignationUpdate, Employee, EmployeeCreate,
    EmployeeUpdate,
};
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A unique key is already taken; carries the field name
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            let field = db_err
                .constraint()
                .map(field_for_constraint)
                .unwrap_or("unique key");
            return StoreError::Duplicate(field.to_string());
        }
        StoreError::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Database(err.to_string())
    }
}

fn field_for_constraint(constraint: &str) -> &'static str {
    match constraint {
        "accounts_email_key" | "employees_email_key" => "email",
        "departments_code_key" => "department_code",
        "designations_code_key" => "designation_code",
        "companies_code_key" => "company_code",
        _ => "unique key",
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Credential store
// =============================================================================

/// Account row including the password hash. Never serialized.
#[derive(Clone)]
pub struct AccountRecord {
    pub account: Account,
    pub password_hash: String,
}

impl std::fmt::Debug for AccountRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountRecord")
            .field("account", &self.account)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Insert payload for the credential store
#[derive(Clone)]
pub struct NewAccount {
    pub account: Account,
    pub password_hash: String,
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fails with `Duplicate("email")` when the email is taken.
    async fn insert(&self, account: NewAccount) -> StoreResult<Account>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<AccountRecord>>;
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Account>>;
    /// Oldest first
    async fn list_by_status(&self, status: ApprovalStatus) -> StoreResult<Vec<Account>>;
    /// Returns `None` when no account has this id.
    async fn set_status(&self, id: &str, status: ApprovalStatus) -> StoreResult<Option<Account>>;
    async fn count_by_status(&self, status: ApprovalStatus) -> StoreResult<u64>;
}

// =============================================================================
// Resource stores
// =============================================================================

/// Common CRUD contract for departments, designations, companies and
/// employees. Updates are last-write-wins.
#[async_trait]
pub trait Repository<T, CreateDto, UpdateDto>: Send + Sync
where
    T: Send + 'static,
    CreateDto: Send + 'static,
    UpdateDto: Send + 'static,
{
    /// Oldest first
    async fn list(&self) -> StoreResult<Vec<T>>;
    async fn find(&self, id: i64) -> StoreResult<Option<T>>;
    async fn create(&self, data: CreateDto) -> StoreResult<T>;
    /// Returns `None` when no row has this id.
    async fn update(&self, id: i64, data: UpdateDto) -> StoreResult<Option<T>>;
    /// Flip active/inactive. Returns `None` when no row has this id.
    async fn toggle_status(&self, id: i64) -> StoreResult<Option<T>>;
    /// Returns `false` when no row has this id.
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

pub type DepartmentRepo = dyn Repository<Department, DepartmentCreate, DepartmentUpdate>;
pub type DesignationRepo = dyn Repository<Designation, DesignationCreate, DesignationUpdate>;
pub type CompanyRepo = dyn Repository<Company, CompanyCreate, CompanyUpdate>;

/// Employee store: the CRUD contract plus the head-count query
#[async_trait]
pub trait EmployeeStore: Repository<Employee, EmployeeCreate, EmployeeUpdate> {
    async fn count(&self) -> StoreResult<EmployeeCount>;
}

/// All stores the API needs, behind trait objects
#[derive(Clone)]
pub struct Stores {
    pub accounts: Arc<dyn AccountStore>,
    pub departments: Arc<DepartmentRepo>,
    pub designations: Arc<DesignationRepo>,
    pub companies: Arc<CompanyRepo>,
    pub employees: Arc<dyn EmployeeStore>,
}

impl Stores {
    /// Process-local stores (development without a database, tests)
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            accounts: store.clone(),
            departments: store.clone(),
            designations: store.clone(),
            companies: store.clone(),
            employees: store,
        }
    }

    /// PostgreSQL-backed stores. Runs pending migrations first.
    pub async fn postgres(database_url: &str) -> StoreResult<Self> {
        let pool = sqlx::PgPool::connect(database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        let store = Arc::new(PgStore::new(pool));
        Ok(Self {
            accounts: store.clone(),
            departments: store.clone(),
            designations: store.clone(),
            companies: store.clone(),
            employees: store,
        })
    }
}
