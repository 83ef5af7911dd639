//! Employee list view-model.
//!
//! Owns the client-side copy of the employee list plus the transient form
//! state, and keeps both in step with the backend one action at a time.
//!
//! The local list is a cache. A failed mutation leaves it untouched, and
//! nothing refetches it after a failure.

use shared::{Employee, EmployeeDraft, EmployeeId};

use crate::client::HttpClient;
use crate::employees::EmployeeApi;
use crate::error::{ClientError, ClientResult};
use crate::render::{ListView, delete_details};
use crate::validation::{FormErrors, validate_draft};

/// Which modal, if any, is open and what it targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Closed,
    /// Add form
    Add,
    /// Edit form for this id
    Edit(EmployeeId),
    /// Delete confirmation for this id
    Delete(EmployeeId),
}

/// Result of the last `load()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loaded,
    Failed,
}

/// View-model over `/api/employees`
#[derive(Debug)]
pub struct EmployeeViewModel<C> {
    api: EmployeeApi<C>,
    employees: Vec<Employee>,
    filter: String,
    modal: Modal,
    load_state: LoadState,
}

impl<C: HttpClient> EmployeeViewModel<C> {
    pub fn new(http: C) -> Self {
        Self::with_api(EmployeeApi::new(http))
    }

    pub fn with_api(api: EmployeeApi<C>) -> Self {
        Self {
            api,
            employees: Vec::new(),
            filter: String::new(),
            modal: Modal::Closed,
            load_state: LoadState::NotLoaded,
        }
    }

    pub fn api(&self) -> &EmployeeApi<C> {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut EmployeeApi<C> {
        &mut self.api
    }

    /// Cached employees in display order
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    // ========== Sync with backend ==========

    /// Replace the cache with the server list. One attempt, no retry.
    pub async fn load(&mut self) -> ClientResult<usize> {
        match self.api.list().await {
            Ok(employees) => {
                tracing::info!(count = employees.len(), "employees loaded");
                self.employees = employees;
                self.load_state = LoadState::Loaded;
                Ok(self.employees.len())
            }
            Err(e) => {
                tracing::warn!("failed to load employees: {e}");
                self.load_state = LoadState::Failed;
                Err(e)
            }
        }
    }

    /// Fetch one record from the server without touching the cache
    pub async fn fetch(&self, id: EmployeeId) -> ClientResult<Employee> {
        self.api.fetch(id).await
    }

    /// Validate, POST, and append the returned record
    pub async fn create(&mut self, draft: &EmployeeDraft) -> ClientResult<Employee> {
        let draft = self.validate(draft, None).map_err(ClientError::Validation)?;
        let created = self.api.create(&draft).await?;
        tracing::info!(id = created.id, "employee created");
        self.employees.push(created.clone());
        self.mark_rendered();
        Ok(created)
    }

    /// Validate, PUT, and replace the first cached record with that id.
    ///
    /// If the id is not cached the server's record is still returned but the
    /// cache is left as it was.
    pub async fn update(&mut self, id: EmployeeId, draft: &EmployeeDraft) -> ClientResult<Employee> {
        let draft = self
            .validate(draft, Some(id))
            .map_err(ClientError::Validation)?;
        let updated = self.api.update(id, &draft).await?;
        match self.employees.iter_mut().find(|e| e.id == id) {
            Some(slot) => *slot = updated.clone(),
            None => tracing::warn!(id, "updated employee is not in the local list"),
        }
        tracing::info!(id, "employee updated");
        self.mark_rendered();
        Ok(updated)
    }

    /// DELETE and drop the first cached record with that id
    pub async fn delete(&mut self, id: EmployeeId) -> ClientResult<()> {
        self.api.delete(id).await?;
        if let Some(pos) = self.employees.iter().position(|e| e.id == id) {
            self.employees.remove(pos);
        }
        tracing::info!(id, "employee deleted");
        self.mark_rendered();
        Ok(())
    }

    // A successful mutation redraws the list, even after a failed load
    fn mark_rendered(&mut self) {
        self.load_state = LoadState::Loaded;
    }

    // ========== Local queries ==========

    /// Case-insensitive substring search on names and email.
    ///
    /// A blank term returns every cached record in order.
    pub fn search(&self, term: &str) -> Vec<&Employee> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.employees.iter().collect();
        }
        self.employees
            .iter()
            .filter(|e| e.matches_lowercase(&needle))
            .collect()
    }

    /// Whether another cached record already uses this email.
    ///
    /// Only checks the local cache, which may be stale; the server has the
    /// final say.
    pub fn is_email_taken(&self, email: &str, excluding: Option<EmployeeId>) -> bool {
        let email = email.to_lowercase();
        self.employees
            .iter()
            .any(|e| Some(e.id) != excluding && e.email.to_lowercase() == email)
    }

    /// Run form validation against the current cache
    pub fn validate(
        &self,
        draft: &EmployeeDraft,
        excluding: Option<EmployeeId>,
    ) -> Result<EmployeeDraft, FormErrors> {
        validate_draft(draft, |email| self.is_email_taken(email, excluding))
    }

    // ========== Display ==========

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Remember the search term used for subsequent renders
    pub fn set_filter(&mut self, term: impl Into<String>) {
        self.filter = term.into();
    }

    /// Records the list area should show right now.
    ///
    /// Empty after a failed load until the next successful load or mutation.
    pub fn view(&self) -> ListView<'_> {
        if self.load_state == LoadState::Failed {
            return ListView::Empty;
        }
        ListView::from_rows(self.search(&self.filter))
    }

    // ========== Form state ==========

    /// Open the add form
    pub fn open_add(&mut self) {
        self.modal = Modal::Add;
    }

    /// Open the edit form, returning the prefilled draft.
    ///
    /// Unknown ids leave the form state unchanged.
    pub fn open_edit(&mut self, id: EmployeeId) -> Option<EmployeeDraft> {
        let draft = self.get(id).map(EmployeeDraft::from)?;
        self.modal = Modal::Edit(id);
        Some(draft)
    }

    /// Open the delete confirmation, returning `First Last (email)`
    pub fn open_delete(&mut self, id: EmployeeId) -> Option<String> {
        let details = self.get(id).map(delete_details)?;
        self.modal = Modal::Delete(id);
        Some(details)
    }

    pub fn close(&mut self) {
        self.modal = Modal::Closed;
    }

    /// Submit the open add/edit form. The form closes only on success.
    pub async fn submit(&mut self, draft: &EmployeeDraft) -> ClientResult<Employee> {
        let saved = match self.modal {
            Modal::Add => self.create(draft).await?,
            Modal::Edit(id) => self.update(id, draft).await?,
            Modal::Closed | Modal::Delete(_) => {
                return Err(ClientError::InvalidState("no employee form is open".into()));
            }
        };
        self.close();
        Ok(saved)
    }

    /// Confirm the open delete dialog. The dialog closes only on success.
    pub async fn confirm_delete(&mut self) -> ClientResult<EmployeeId> {
        let Modal::Delete(id) = self.modal else {
            return Err(ClientError::InvalidState("no delete is pending".into()));
        };
        self.delete(id).await?;
        self.close();
        Ok(id)
    }
}
