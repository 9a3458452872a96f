//! Detail view controllers: load one entity plus its related collection,
//! hold an editable draft, submit whole-draft partial updates.

use shared::domain::{
    Company, CompanyDraft, CompanyId, Contact, ContactDraft, ContactId,
};
use tracing::{info, warn};

use crate::api::ApiClient;

/// View phase for a detail page. `NotFound` is terminal for the id; there is
/// no way back to `Loading` short of constructing a fresh controller.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState<T, D> {
    Loading,
    NotFound,
    Loaded { entity: T, draft: D },
}

impl<T, D> DetailState<T, D> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn entity(&self) -> Option<&T> {
        match self {
            Self::Loaded { entity, .. } => Some(entity),
            _ => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match self {
            Self::Loaded { draft, .. } => Some(draft),
            _ => None,
        }
    }
}

pub struct CompanyDetailController {
    api: ApiClient,
    company_id: CompanyId,
    state: DetailState<Company, CompanyDraft>,
    contacts: Vec<Contact>,
}

impl CompanyDetailController {
    pub fn new(api: ApiClient, company_id: CompanyId) -> Self {
        Self {
            api,
            company_id,
            state: DetailState::Loading,
            contacts: Vec::new(),
        }
    }

    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    pub fn state(&self) -> &DetailState<Company, CompanyDraft> {
        &self.state
    }

    /// Contacts belonging to this company, shown as the child table.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn draft_mut(&mut self) -> Option<&mut CompanyDraft> {
        self.state.draft_mut()
    }

    /// Fetches the company and its contacts concurrently. Any failure is
    /// logged and settles the view as `NotFound`.
    pub async fn load(&mut self) {
        let (company, contacts) = tokio::join!(
            self.api.get_company(self.company_id),
            self.api.list_company_contacts(self.company_id),
        );
        match (company, contacts) {
            (Ok(company), Ok(contacts)) => {
                let draft = CompanyDraft::from_company(&company);
                self.contacts = contacts;
                self.state = DetailState::Loaded {
                    entity: company,
                    draft,
                };
            }
            (company, contacts) => {
                if let Err(err) = company {
                    warn!(company_id = self.company_id.0, "company fetch failed: {err}");
                }
                if let Err(err) = contacts {
                    warn!(
                        company_id = self.company_id.0,
                        "related contacts fetch failed: {err}"
                    );
                }
                self.state = DetailState::NotFound;
            }
        }
    }

    /// Sends the entire draft as a partial update. `true` means the backend
    /// accepted it; either way the draft stays exactly as typed.
    pub async fn submit(&mut self) -> bool {
        let DetailState::Loaded { draft, .. } = &self.state else {
            return false;
        };
        match self.api.update_company(self.company_id, draft).await {
            Ok(_) => {
                info!(company_id = self.company_id.0, "company updated");
                true
            }
            Err(err) => {
                warn!(company_id = self.company_id.0, "company update failed: {err}");
                false
            }
        }
    }

    /// Only called after the user confirmed. `true` means the caller should
    /// navigate back to the company list.
    pub async fn delete(&mut self) -> bool {
        match self.api.delete_company(self.company_id).await {
            Ok(()) => {
                info!(company_id = self.company_id.0, "company deleted");
                true
            }
            Err(err) => {
                warn!(company_id = self.company_id.0, "company delete failed: {err}");
                false
            }
        }
    }
}

pub struct ContactDetailController {
    api: ApiClient,
    contact_id: ContactId,
    state: DetailState<Contact, ContactDraft>,
    companies: Vec<Company>,
}

impl ContactDetailController {
    pub fn new(api: ApiClient, contact_id: ContactId) -> Self {
        Self {
            api,
            contact_id,
            state: DetailState::Loading,
            companies: Vec::new(),
        }
    }

    pub fn contact_id(&self) -> ContactId {
        self.contact_id
    }

    pub fn state(&self) -> &DetailState<Contact, ContactDraft> {
        &self.state
    }

    /// The full company list, backing the company dropdown.
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn draft_mut(&mut self) -> Option<&mut ContactDraft> {
        self.state.draft_mut()
    }

    pub async fn load(&mut self) {
        let (contact, companies) = tokio::join!(
            self.api.get_contact(self.contact_id),
            self.api.list_companies(),
        );
        match (contact, companies) {
            (Ok(contact), Ok(companies)) => {
                let draft = ContactDraft::from_contact(&contact);
                self.companies = companies;
                self.state = DetailState::Loaded {
                    entity: contact,
                    draft,
                };
            }
            (contact, companies) => {
                if let Err(err) = contact {
                    warn!(contact_id = self.contact_id.0, "contact fetch failed: {err}");
                }
                if let Err(err) = companies {
                    warn!(
                        contact_id = self.contact_id.0,
                        "company list fetch failed: {err}"
                    );
                }
                self.state = DetailState::NotFound;
            }
        }
    }

    pub async fn submit(&mut self) -> bool {
        let DetailState::Loaded { draft, .. } = &self.state else {
            return false;
        };
        match self.api.update_contact(self.contact_id, draft).await {
            Ok(_) => {
                info!(contact_id = self.contact_id.0, "contact updated");
                true
            }
            Err(err) => {
                warn!(contact_id = self.contact_id.0, "contact update failed: {err}");
                false
            }
        }
    }

    pub async fn delete(&mut self) -> bool {
        match self.api.delete_contact(self.contact_id).await {
            Ok(()) => {
                info!(contact_id = self.contact_id.0, "contact deleted");
                true
            }
            Err(err) => {
                warn!(contact_id = self.contact_id.0, "contact delete failed: {err}");
                false
            }
        }
    }
}
