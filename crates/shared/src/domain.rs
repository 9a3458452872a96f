use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MissingField;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(CompanyId);
id_newtype!(ContactId);

/// Country preselected for newly created companies.
pub const DEFAULT_COUNTRY: &str = "Canada";

/// Countries offered by the company form.
pub const COUNTRY_OPTIONS: [&str; 2] = ["Canada", "United States"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub company_id: CompanyId,
    /// Denormalized snapshot attached by the backend on reads; never sent on
    /// writes and not authoritative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-writable company fields, used for both create and update payloads.
/// `None` fields are omitted from the wire, which the backend treats as
/// "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl CompanyDraft {
    /// Empty draft with the fixed default country, for create mode.
    pub fn new() -> Self {
        Self {
            country: Some(DEFAULT_COUNTRY.to_string()),
            ..Self::default()
        }
    }

    /// Draft seeded from an existing company, for edit mode.
    pub fn from_company(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            email: company.email.clone(),
            phone: company.phone.clone(),
            address: company.address.clone(),
            city: company.city.clone(),
            state: company.state.clone(),
            country: company.country.clone(),
            postal_code: company.postal_code.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), MissingField> {
        if self.name.trim().is_empty() {
            return Err(MissingField::new("name"));
        }
        Ok(())
    }
}

/// Client-writable contact fields. `company_id` stays `None` until the user
/// picks a company; submission requires it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
}

impl ContactDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            city: contact.city.clone(),
            company_id: Some(contact.company_id),
        }
    }

    pub fn validate(&self) -> Result<(), MissingField> {
        if self.name.trim().is_empty() {
            return Err(MissingField::new("name"));
        }
        if self.company_id.is_none() {
            return Err(MissingField::new("company_id"));
        }
        Ok(())
    }
}
