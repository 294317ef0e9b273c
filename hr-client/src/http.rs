//! Typed HTTP client for the HR server

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::client::{
    DecisionRequest, DeleteResponse, DesignationFilter, EmployeeCount, LoginRequest,
    LoginResponse, RegisterResponse,
};
use shared::models::{
    Account, Company, CompanyCreate, CompanyUpdate, Department, DepartmentCreate,
    DepartmentUpdate, Designation, DesignationCreate, DesignationUpdate, Employee,
    EmployeeCreate, EmployeeUpdate, RegisterRequest,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::{SessionContext, SessionIdentity};

/// HTTP client bound to one session
#[derive(Debug, Clone)]
pub struct HrClient {
    client: Client,
    base_url: String,
    session: Arc<SessionContext>,
}

impl HrClient {
    pub fn new(config: &ClientConfig, session: Arc<SessionContext>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Attach the session token, send, and decode. A 401 on an
    /// authenticated call ends the session.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let token = self.session.token();
        let request = match &token {
            Some(token) => request.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            if status == StatusCode::UNAUTHORIZED && token.is_some() {
                tracing::warn!("Server rejected session token, signing out");
                self.session.logout();
            }
            return Err(ClientError::from_response(status, &text));
        }

        Ok(response.json().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    async fn patch<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::PATCH, path)).await
    }

    async fn delete(&self, path: &str) -> ClientResult<bool> {
        let response: DeleteResponse = self.send(self.request(Method::DELETE, path)).await?;
        Ok(response.deleted)
    }

    // ========== Auth API ==========

    pub async fn health(&self) -> ClientResult<serde_json::Value> {
        self.get("/health").await
    }

    /// Submit a registration; the account starts out pending
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisterResponse> {
        self.post("/register", request).await
    }

    /// Sign in and adopt the issued token into the session
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<SessionIdentity> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post("/login", &request).await?;
        self.session.login(response.token)
    }

    /// Local sign-out; tokens are stateless on the server
    pub fn logout(&self) {
        self.session.logout();
    }

    pub async fn me(&self) -> ClientResult<Account> {
        self.get("/me").await
    }

    // ========== Approval API ==========

    pub async fn pending(&self) -> ClientResult<Vec<Account>> {
        self.get("/pending").await
    }

    /// `status` is `approved` or `rejected`; anything else is refused by
    /// the server
    pub async fn decide(&self, account_id: &str, status: &str) -> ClientResult<Account> {
        let body = DecisionRequest {
            status: status.to_string(),
        };
        let path = format!("/user/{account_id}/status");
        self.send(self.request(Method::PATCH, &path).json(&body)).await
    }

    // ========== Departments ==========

    pub async fn departments(&self) -> ClientResult<Vec<Department>> {
        self.get("/departments").await
    }

    pub async fn department(&self, id: i64) -> ClientResult<Department> {
        self.get(&format!("/departments/{id}")).await
    }

    pub async fn create_department(&self, data: &DepartmentCreate) -> ClientResult<Department> {
        self.post("/departments", data).await
    }

    pub async fn update_department(
        &self,
        id: i64,
        data: &DepartmentUpdate,
    ) -> ClientResult<Department> {
        self.put(&format!("/departments/{id}"), data).await
    }

    pub async fn toggle_department(&self, id: i64) -> ClientResult<Department> {
        self.patch(&format!("/departments/{id}/status")).await
    }

    pub async fn delete_department(&self, id: i64) -> ClientResult<bool> {
        self.delete(&format!("/departments/{id}")).await
    }

    // ========== Designations ==========

    /// All designations, or those of one department code
    pub async fn designations(&self, department: Option<&str>) -> ClientResult<Vec<Designation>> {
        let filter = DesignationFilter {
            department: department.map(str::to_string),
        };
        self.send(self.request(Method::GET, "/designations").query(&filter))
            .await
    }

    pub async fn designation(&self, id: i64) -> ClientResult<Designation> {
        self.get(&format!("/designations/{id}")).await
    }

    pub async fn create_designation(&self, data: &DesignationCreate) -> ClientResult<Designation> {
        self.post("/designations", data).await
    }

    pub async fn update_designation(
        &self,
        id: i64,
        data: &DesignationUpdate,
    ) -> ClientResult<Designation> {
        self.put(&format!("/designations/{id}"), data).await
    }

    pub async fn toggle_designation(&self, id: i64) -> ClientResult<Designation> {
        self.patch(&format!("/designations/{id}/status")).await
    }

    pub async fn delete_designation(&self, id: i64) -> ClientResult<bool> {
        self.delete(&format!("/designations/{id}")).await
    }

    // ========== Companies (admin) ==========

    pub async fn companies(&self) -> ClientResult<Vec<Company>> {
        self.get("/companies").await
    }

    pub async fn company(&self, id: i64) -> ClientResult<Company> {
        self.get(&format!("/companies/{id}")).await
    }

    pub async fn create_company(&self, data: &CompanyCreate) -> ClientResult<Company> {
        self.post("/companies", data).await
    }

    pub async fn update_company(&self, id: i64, data: &CompanyUpdate) -> ClientResult<Company> {
        self.put(&format!("/companies/{id}"), data).await
    }

    pub async fn toggle_company(&self, id: i64) -> ClientResult<Company> {
        self.patch(&format!("/companies/{id}/status")).await
    }

    pub async fn delete_company(&self, id: i64) -> ClientResult<bool> {
        self.delete(&format!("/companies/{id}")).await
    }

    // ========== Employees ==========

    pub async fn employees(&self) -> ClientResult<Vec<Employee>> {
        self.get("/employees").await
    }

    pub async fn employee_count(&self) -> ClientResult<EmployeeCount> {
        self.get("/employees/count").await
    }

    pub async fn employee(&self, id: i64) -> ClientResult<Employee> {
        self.get(&format!("/employee/{id}")).await
    }

    pub async fn create_employee(&self, data: &EmployeeCreate) -> ClientResult<Employee> {
        self.post("/employees", data).await
    }

    pub async fn update_employee(&self, id: i64, data: &EmployeeUpdate) -> ClientResult<Employee> {
        self.put(&format!("/employee/{id}"), data).await
    }

    /// Active/inactive only; onboarding and resigned records are refused
    pub async fn toggle_employee(&self, id: i64) -> ClientResult<Employee> {
        self.patch(&format!("/employee/{id}/status")).await
    }

    pub async fn delete_employee(&self, id: i64) -> ClientResult<bool> {
        self.delete(&format!("/employee/{id}")).await
    }
}
