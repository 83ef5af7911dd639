//! Employee REST endpoints.

use shared::{Employee, EmployeeDraft, EmployeeId};

use crate::client::HttpClient;
use crate::error::ClientResult;

/// Collection path, relative to the base URL
pub const EMPLOYEES_PATH: &str = "api/employees";

fn item_path(id: EmployeeId) -> String {
    format!("{EMPLOYEES_PATH}/{id}")
}

/// Typed access to `/api/employees`
#[derive(Debug, Clone)]
pub struct EmployeeApi<C> {
    http: C,
}

impl<C: HttpClient> EmployeeApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn http_mut(&mut self) -> &mut C {
        &mut self.http
    }

    /// GET /api/employees
    pub async fn list(&self) -> ClientResult<Vec<Employee>> {
        self.http.get(EMPLOYEES_PATH).await
    }

    /// GET /api/employees/{id}
    pub async fn fetch(&self, id: EmployeeId) -> ClientResult<Employee> {
        self.http.get(&item_path(id)).await
    }

    /// POST /api/employees
    pub async fn create(&self, draft: &EmployeeDraft) -> ClientResult<Employee> {
        self.http.post(EMPLOYEES_PATH, draft).await
    }

    /// PUT /api/employees/{id}
    pub async fn update(&self, id: EmployeeId, draft: &EmployeeDraft) -> ClientResult<Employee> {
        self.http.put(&item_path(id), draft).await
    }

    /// DELETE /api/employees/{id}
    pub async fn delete(&self, id: EmployeeId) -> ClientResult<()> {
        self.http.delete(&item_path(id)).await
    }
}
