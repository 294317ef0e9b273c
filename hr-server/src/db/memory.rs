//! In-process store
//!
//! Used when no `DATABASE_URL` is configured in development, and by the
//! test suite. Unique keys are checked under the same lock as the write,
//! so concurrent duplicate submissions resolve to exactly one row.

use std::collections::BTreeMap;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use shared::client::EmployeeCount;
use shared::models::{
    Account, ApprovalStatus, Company, CompanyCreate, CompanyUpdate, Department, DepartmentCreate,
    DepartmentUpdate, Designation, DesignationCreate, DesignationUpdate, Employee, EmployeeCreate,
    EmployeeStatus, EmployeeUpdate,
};
use shared::util::{now_millis, snowflake_id};
use tokio::sync::RwLock;

use super::{
    AccountRecord, AccountStore, EmployeeStore, NewAccount, Repository, StoreError, StoreResult,
};

/// Rows keyed by snowflake id; iteration order is creation order.
struct Table<T> {
    rows: RwLock<BTreeMap<i64, T>>,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    async fn list(&self) -> Vec<T> {
        self.rows.read().await.values().cloned().collect()
    }

    async fn get(&self, id: i64) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    /// Insert `row` unless its id is taken or another row already has the
    /// same unique key.
    async fn insert_unique(
        &self,
        id: i64,
        row: T,
        key: fn(&T) -> &str,
        field: &str,
    ) -> StoreResult<T> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&id) {
            return Err(StoreError::Duplicate("id".to_string()));
        }
        if rows.values().any(|existing| key(existing) == key(&row)) {
            return Err(StoreError::Duplicate(field.to_string()));
        }
        rows.insert(id, row.clone());
        Ok(row)
    }

    /// Apply `change` to a copy of the row, re-check the unique key
    /// against every other row, then swap the copy in.
    async fn modify(
        &self,
        id: i64,
        key: fn(&T) -> &str,
        field: &str,
        change: impl FnOnce(&mut T) -> StoreResult<()>,
    ) -> StoreResult<Option<T>> {
        let mut rows = self.rows.write().await;
        let Some(current) = rows.get(&id) else {
            return Ok(None);
        };
        let mut updated = current.clone();
        change(&mut updated)?;

        let clash = rows
            .iter()
            .any(|(other_id, other)| *other_id != id && key(other) == key(&updated));
        if clash {
            return Err(StoreError::Duplicate(field.to_string()));
        }

        rows.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn remove(&self, id: i64) -> bool {
        self.rows.write().await.remove(&id).is_some()
    }
}

pub struct MemoryStore {
    /// account id -> record
    accounts: DashMap<String, AccountRecord>,
    /// email -> account id; the uniqueness guard
    emails: DashMap<String, String>,
    departments: Table<Department>,
    designations: Table<Designation>,
    companies: Table<Company>,
    employees: Table<Employee>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            emails: DashMap::new(),
            departments: Table::new(),
            designations: Table::new(),
            companies: Table::new(),
            employees: Table::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

// ── Accounts ──

#[async_trait]
impl AccountStore for MemoryStore {
    async fn insert(&self, new: NewAccount) -> StoreResult<Account> {
        match self.emails.entry(new.account.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate("email".into())),
            Entry::Vacant(slot) => {
                let account = new.account.clone();
                self.accounts.insert(
                    account.id.clone(),
                    AccountRecord {
                        account: new.account,
                        password_hash: new.password_hash,
                    },
                );
                slot.insert(account.id.clone());
                Ok(account)
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<AccountRecord>> {
        let Some(id) = self.emails.get(email).map(|entry| entry.value().clone()) else {
            return Ok(None);
        };
        Ok(self.accounts.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Account>> {
        Ok(self.accounts.get(id).map(|entry| entry.account.clone()))
    }

    async fn list_by_status(&self, status: ApprovalStatus) -> StoreResult<Vec<Account>> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .filter(|entry| entry.account.status == status)
            .map(|entry| entry.account.clone())
            .collect();
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(accounts)
    }

    async fn set_status(&self, id: &str, status: ApprovalStatus) -> StoreResult<Option<Account>> {
        Ok(self.accounts.get_mut(id).map(|mut entry| {
            entry.account.status = status;
            entry.account.clone()
        }))
    }

    async fn count_by_status(&self, status: ApprovalStatus) -> StoreResult<u64> {
        Ok(self
            .accounts
            .iter()
            .filter(|entry| entry.account.status == status)
            .count() as u64)
    }
}

// ── Departments ──

fn department_code(d: &Department) -> &str {
    &d.department_code
}

#[async_trait]
impl Repository<Department, DepartmentCreate, DepartmentUpdate> for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Department>> {
        Ok(self.departments.list().await)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Department>> {
        Ok(self.departments.get(id).await)
    }

    async fn create(&self, data: DepartmentCreate) -> StoreResult<Department> {
        let id = snowflake_id();
        let now = now_millis();
        let row = Department {
            id,
            department_code: data.department_code,
            department_name: data.department_name,
            description: data.description,
            status: data.status,
            created_at: now,
            updated_at: now,
        };
        self.departments
            .insert_unique(id, row, department_code, "department_code")
            .await
    }

    async fn update(&self, id: i64, data: DepartmentUpdate) -> StoreResult<Option<Department>> {
        self.departments
            .modify(id, department_code, "department_code", |d| {
                if let Some(name) = data.department_name {
                    d.department_name = name;
                }
                if let Some(description) = data.description {
                    d.description = Some(description);
                }
                if let Some(status) = data.status {
                    d.status = status;
                }
                d.updated_at = now_millis();
                Ok(())
            })
            .await
    }

    async fn toggle_status(&self, id: i64) -> StoreResult<Option<Department>> {
        self.departments
            .modify(id, department_code, "department_code", |d| {
                d.status = d.status.toggled();
                d.updated_at = now_millis();
                Ok(())
            })
            .await
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.departments.remove(id).await)
    }
}

// ── Designations ──

fn designation_code(d: &Designation) -> &str {
    &d.designation_code
}

#[async_trait]
impl Repository<Designation, DesignationCreate, DesignationUpdate> for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Designation>> {
        Ok(self.designations.list().await)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Designation>> {
        Ok(self.designations.get(id).await)
    }

    async fn create(&self, data: DesignationCreate) -> StoreResult<Designation> {
        let id = snowflake_id();
        let now = now_millis();
        let row = Designation {
            id,
            designation_code: data.designation_code,
            designation_name: data.designation_name,
            department_code: data.department_code,
            level: data.level,
            description: data.description,
            status: data.status,
            created_at: now,
            updated_at: now,
        };
        self.designations
            .insert_unique(id, row, designation_code, "designation_code")
            .await
    }

    async fn update(&self, id: i64, data: DesignationUpdate) -> StoreResult<Option<Designation>> {
        self.designations
            .modify(id, designation_code, "designation_code", |d| {
                if let Some(name) = data.designation_name {
                    d.designation_name = name;
                }
                if let Some(department_code) = data.department_code {
                    d.department_code = department_code;
                }
                if let Some(level) = data.level {
                    d.level = Some(level);
                }
                if let Some(description) = data.description {
                    d.description = Some(description);
                }
                if let Some(status) = data.status {
                    d.status = status;
                }
                d.updated_at = now_millis();
                Ok(())
            })
            .await
    }

    async fn toggle_status(&self, id: i64) -> StoreResult<Option<Designation>> {
        self.designations
            .modify(id, designation_code, "designation_code", |d| {
                d.status = d.status.toggled();
                d.updated_at = now_millis();
                Ok(())
            })
            .await
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.designations.remove(id).await)
    }
}

// ── Companies ──

fn company_code(c: &Company) -> &str {
    &c.company_code
}

#[async_trait]
impl Repository<Company, CompanyCreate, CompanyUpdate> for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Company>> {
        Ok(self.companies.list().await)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Company>> {
        Ok(self.companies.get(id).await)
    }

    async fn create(&self, data: CompanyCreate) -> StoreResult<Company> {
        let id = snowflake_id();
        let now = now_millis();
        let row = Company {
            id,
            company_code: data.company_code,
            company_name: data.company_name,
            email: data.email,
            phone: data.phone,
            address: data.address,
            city: data.city,
            state: data.state,
            country: data.country,
            pincode: data.pincode,
            gst_number: data.gst_number,
            pan_number: data.pan_number,
            date_of_incorporation: data.date_of_incorporation,
            status: data.status,
            created_by: data.created_by,
            created_at: now,
            updated_at: now,
        };
        self.companies
            .insert_unique(id, row, company_code, "company_code")
            .await
    }

    async fn update(&self, id: i64, data: CompanyUpdate) -> StoreResult<Option<Company>> {
        self.companies
            .modify(id, company_code, "company_code", |c| {
                if let Some(v) = data.company_name {
                    c.company_name = v;
                }
                if let Some(v) = data.email {
                    c.email = v;
                }
                if let Some(v) = data.phone {
                    c.phone = v;
                }
                if let Some(v) = data.address {
                    c.address = v;
                }
                if let Some(v) = data.city {
                    c.city = v;
                }
                if let Some(v) = data.state {
                    c.state = v;
                }
                if let Some(v) = data.country {
                    c.country = v;
                }
                if let Some(v) = data.pincode {
                    c.pincode = v;
                }
                if let Some(v) = data.gst_number {
                    c.gst_number = Some(v);
                }
                if let Some(v) = data.pan_number {
                    c.pan_number = Some(v);
                }
                if let Some(v) = data.date_of_incorporation {
                    c.date_of_incorporation = v;
                }
                if let Some(v) = data.status {
                    c.status = v;
                }
                c.updated_at = now_millis();
                Ok(())
            })
            .await
    }

    async fn toggle_status(&self, id: i64) -> StoreResult<Option<Company>> {
        self.companies
            .modify(id, company_code, "company_code", |c| {
                c.status = c.status.toggled();
                c.updated_at = now_millis();
                Ok(())
            })
            .await
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.companies.remove(id).await)
    }
}

// ── Employees ──

fn employee_email(e: &Employee) -> &str {
    &e.email
}

#[async_trait]
impl Repository<Employee, EmployeeCreate, EmployeeUpdate> for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.employees.list().await)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Employee>> {
        Ok(self.employees.get(id).await)
    }

    async fn create(&self, data: EmployeeCreate) -> StoreResult<Employee> {
        let id = snowflake_id();
        let now = now_millis();
        let row = Employee {
            id,
            full_name: data.full_name,
            email: data.email,
            phone: data.phone,
            gender: data.gender,
            dob: data.dob,
            joining_date: data.joining_date,
            department: data.department,
            designation: data.designation,
            address: data.address,
            profile_pic_url: data.profile_pic_url,
            status: data.status,
            created_at: now,
            updated_at: now,
        };
        self.employees
            .insert_unique(id, row, employee_email, "email")
            .await
    }

    async fn update(&self, id: i64, data: EmployeeUpdate) -> StoreResult<Option<Employee>> {
        self.employees
            .modify(id, employee_email, "email", |e| {
                if let Some(v) = data.full_name {
                    e.full_name = v;
                }
                if let Some(v) = data.email {
                    e.email = v;
                }
                if let Some(v) = data.phone {
                    e.phone = v;
                }
                if let Some(v) = data.gender {
                    e.gender = Some(v);
                }
                if let Some(v) = data.dob {
                    e.dob = Some(v);
                }
                if let Some(v) = data.joining_date {
                    e.joining_date = v;
                }
                if let Some(v) = data.department {
                    e.department = v;
                }
                if let Some(v) = data.designation {
                    e.designation = v;
                }
                if let Some(v) = data.address {
                    e.address = Some(v);
                }
                if let Some(v) = data.profile_pic_url {
                    e.profile_pic_url = Some(v);
                }
                if let Some(v) = data.status {
                    e.status = v;
                }
                e.updated_at = now_millis();
                Ok(())
            })
            .await
    }

    async fn toggle_status(&self, id: i64) -> StoreResult<Option<Employee>> {
        self.employees
            .modify(id, employee_email, "email", |e| {
                e.status = e.status.toggled().ok_or_else(|| {
                    StoreError::Validation(format!("cannot toggle {} employee", e.status))
                })?;
                e.updated_at = now_millis();
                Ok(())
            })
            .await
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.employees.remove(id).await)
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn count(&self) -> StoreResult<EmployeeCount> {
        let employees = self.employees.list().await;
        Ok(EmployeeCount {
            total: employees.len() as u64,
            active: employees
                .iter()
                .filter(|e| e.status == EmployeeStatus::Active)
                .count() as u64,
            onboarding: employees
                .iter()
                .filter(|e| e.status == EmployeeStatus::Onboarding)
                .count() as u64,
        })
    }
}
