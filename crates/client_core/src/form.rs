//! Modal form dialogs for create/edit, independent of any rendering layer.
//! A dialog owns its draft; persistence is delegated to the parent
//! controller through an async callback.

use std::future::Future;

use shared::{
    domain::{Company, CompanyDraft, Contact, ContactDraft},
    error::MissingField,
};
use tracing::warn;

use crate::api::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

pub struct CompanyFormDialog {
    mode: FormMode,
    draft: CompanyDraft,
    open: bool,
}

impl CompanyFormDialog {
    /// Create mode: empty draft with the fixed default country.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: CompanyDraft::new(),
            open: true,
        }
    }

    /// Edit mode, seeded from the entity being edited.
    pub fn edit(initial: &Company) -> Self {
        Self {
            mode: FormMode::Edit,
            draft: CompanyDraft::from_company(initial),
            open: true,
        }
    }

    /// Re-seeds the draft whenever the backing entity changes under an open
    /// dialog.
    pub fn reset_from(&mut self, initial: &Company) {
        self.mode = FormMode::Edit;
        self.draft = CompanyDraft::from_company(initial);
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &CompanyDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut CompanyDraft {
        &mut self.draft
    }

    /// Validates required fields, then hands the draft to `persist`.
    /// `Ok(true)`: persisted, dialog closed. `Ok(false)`: persistence was
    /// rejected, dialog stays open with the draft intact. `Err`: a required
    /// field is empty and nothing was attempted.
    pub async fn submit<F, Fut>(&mut self, persist: F) -> Result<bool, MissingField>
    where
        F: FnOnce(CompanyDraft) -> Fut,
        Fut: Future<Output = bool>,
    {
        self.draft.validate()?;
        if persist(self.draft.clone()).await {
            self.open = false;
            Ok(true)
        } else {
            warn!("company form submit rejected; dialog stays open");
            Ok(false)
        }
    }
}

pub struct ContactFormDialog {
    mode: FormMode,
    draft: ContactDraft,
    companies: Vec<Company>,
    open: bool,
}

impl ContactFormDialog {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: ContactDraft::new(),
            companies: Vec::new(),
            open: true,
        }
    }

    pub fn edit(initial: &Contact) -> Self {
        Self {
            mode: FormMode::Edit,
            draft: ContactDraft::from_contact(initial),
            companies: Vec::new(),
            open: true,
        }
    }

    pub fn reset_from(&mut self, initial: &Contact) {
        self.mode = FormMode::Edit;
        self.draft = ContactDraft::from_contact(initial);
    }

    /// Loads the company dropdown options. A failure is logged and leaves
    /// the options empty; the dialog still renders.
    pub async fn load_company_options(&mut self, api: &ApiClient) {
        match api.list_companies().await {
            Ok(companies) => self.companies = companies,
            Err(err) => warn!("company options fetch failed: {err}"),
        }
    }

    pub fn company_options(&self) -> &[Company] {
        &self.companies
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &ContactDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ContactDraft {
        &mut self.draft
    }

    pub async fn submit<F, Fut>(&mut self, persist: F) -> Result<bool, MissingField>
    where
        F: FnOnce(ContactDraft) -> Fut,
        Fut: Future<Output = bool>,
    {
        self.draft.validate()?;
        if persist(self.draft.clone()).await {
            self.open = false;
            Ok(true)
        } else {
            warn!("contact form submit rejected; dialog stays open");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use shared::domain::{CompanyId, ContactId, DEFAULT_COUNTRY};

    use super::*;

    fn acme() -> Company {
        Company {
            id: CompanyId(7),
            name: "Acme Corp".to_string(),
            email: Some("info@acme.example".to_string()),
            phone: None,
            address: None,
            city: Some("Vancouver".to_string()),
            state: None,
            country: Some("Canada".to_string()),
            postal_code: None,
            created_at: "2024-01-01T00:00:00Z".parse().expect("timestamp"),
            updated_at: "2024-01-01T00:00:00Z".parse().expect("timestamp"),
        }
    }

    fn jane() -> Contact {
        Contact {
            id: ContactId(3),
            name: "Jane".to_string(),
            email: None,
            phone: Some("604-555-0101".to_string()),
            city: Some("Vancouver".to_string()),
            company_id: CompanyId(7),
            company: None,
            created_at: "2024-01-01T00:00:00Z".parse().expect("timestamp"),
            updated_at: "2024-01-01T00:00:00Z".parse().expect("timestamp"),
        }
    }

    #[test]
    fn create_mode_preselects_the_default_country() {
        let dialog = CompanyFormDialog::create();
        assert_eq!(dialog.mode(), FormMode::Create);
        assert_eq!(dialog.draft().country.as_deref(), Some(DEFAULT_COUNTRY));
        assert!(dialog.draft().name.is_empty());
    }

    #[test]
    fn edit_mode_seeds_and_reseeds_from_the_entity() {
        let mut dialog = CompanyFormDialog::edit(&acme());
        assert_eq!(dialog.mode(), FormMode::Edit);
        assert_eq!(dialog.draft().name, "Acme Corp");

        let mut renamed = acme();
        renamed.name = "Acme Holdings".to_string();
        dialog.reset_from(&renamed);
        assert_eq!(dialog.draft().name, "Acme Holdings");
    }

    #[tokio::test]
    async fn submit_requires_a_name_before_calling_the_callback() {
        let mut dialog = CompanyFormDialog::create();
        let called = Arc::new(Mutex::new(false));
        let seen = Arc::clone(&called);

        let err = dialog
            .submit(move |_| {
                let seen = Arc::clone(&seen);
                async move {
                    *seen.lock().expect("lock") = true;
                    true
                }
            })
            .await
            .expect_err("empty name must fail validation");

        assert_eq!(err.field, "name");
        assert!(!*called.lock().expect("lock"));
        assert!(dialog.is_open());
    }

    #[tokio::test]
    async fn contact_submit_requires_a_selected_company() {
        let mut dialog = ContactFormDialog::create();
        dialog.draft_mut().name = "Jane".to_string();

        let err = dialog
            .submit(|_| async { true })
            .await
            .expect_err("missing company must fail validation");

        assert_eq!(err.field, "company_id");
        assert!(dialog.is_open());
    }

    #[tokio::test]
    async fn successful_submit_closes_the_dialog() {
        let mut dialog = ContactFormDialog::edit(&jane());
        let saved = dialog
            .submit(|draft| async move { draft.name == "Jane" })
            .await
            .expect("valid draft");
        assert!(saved);
        assert!(!dialog.is_open());
    }

    #[tokio::test]
    async fn rejected_submit_keeps_the_dialog_open_with_the_draft_intact() {
        let mut dialog = CompanyFormDialog::create();
        dialog.draft_mut().name = "Globex".to_string();
        dialog.draft_mut().city = Some("Toronto".to_string());

        let saved = dialog
            .submit(|_| async { false })
            .await
            .expect("valid draft");

        assert!(!saved);
        assert!(dialog.is_open());
        assert_eq!(dialog.draft().name, "Globex");
        assert_eq!(dialog.draft().city.as_deref(), Some("Toronto"));
    }
}
