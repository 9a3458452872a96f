//! HTTP entity client: translates company/contact operations into REST calls.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Company, CompanyDraft, CompanyId, Contact, ContactDraft, ContactId},
    error::ErrorBody,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("backend rejected payload: {detail}")]
    Validation { detail: String },
    #[error("unexpected status {status} from backend")]
    Unexpected { status: StatusCode },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Issues HTTP requests for the two entity collections and returns parsed
/// results. No caching, no retries; transport-default timeouts only.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_companies(&self) -> Result<Vec<Company>, ClientError> {
        let response = self
            .http
            .get(format!("{}/companies", self.base_url))
            .send()
            .await?;
        decode(response, "company", None).await
    }

    pub async fn get_company(&self, id: CompanyId) -> Result<Company, ClientError> {
        let response = self
            .http
            .get(format!("{}/companies/{}", self.base_url, id.0))
            .send()
            .await?;
        decode(response, "company", Some(id.0)).await
    }

    pub async fn create_company(&self, draft: &CompanyDraft) -> Result<Company, ClientError> {
        let response = self
            .http
            .post(format!("{}/companies", self.base_url))
            .json(draft)
            .send()
            .await?;
        decode(response, "company", None).await
    }

    pub async fn update_company(
        &self,
        id: CompanyId,
        draft: &CompanyDraft,
    ) -> Result<Company, ClientError> {
        let response = self
            .http
            .put(format!("{}/companies/{}", self.base_url, id.0))
            .json(draft)
            .send()
            .await?;
        decode(response, "company", Some(id.0)).await
    }

    /// A second delete of the same id fails with `NotFound`; callers surface
    /// that as a non-fatal error.
    pub async fn delete_company(&self, id: CompanyId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(format!("{}/companies/{}", self.base_url, id.0))
            .send()
            .await?;
        // The backend echoes the deleted row; any 2xx counts as done.
        check_status(response, "company", Some(id.0)).await?;
        Ok(())
    }

    /// Related contacts for one company, used only by the company detail view.
    pub async fn list_company_contacts(
        &self,
        id: CompanyId,
    ) -> Result<Vec<Contact>, ClientError> {
        let response = self
            .http
            .get(format!("{}/companies/{}/contacts", self.base_url, id.0))
            .send()
            .await?;
        decode(response, "company", Some(id.0)).await
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ClientError> {
        let response = self
            .http
            .get(format!("{}/contacts", self.base_url))
            .send()
            .await?;
        decode(response, "contact", None).await
    }

    pub async fn get_contact(&self, id: ContactId) -> Result<Contact, ClientError> {
        let response = self
            .http
            .get(format!("{}/contacts/{}", self.base_url, id.0))
            .send()
            .await?;
        decode(response, "contact", Some(id.0)).await
    }

    pub async fn create_contact(&self, draft: &ContactDraft) -> Result<Contact, ClientError> {
        let response = self
            .http
            .post(format!("{}/contacts", self.base_url))
            .json(draft)
            .send()
            .await?;
        decode(response, "contact", None).await
    }

    pub async fn update_contact(
        &self,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Contact, ClientError> {
        let response = self
            .http
            .put(format!("{}/contacts/{}", self.base_url, id.0))
            .json(draft)
            .send()
            .await?;
        decode(response, "contact", Some(id.0)).await
    }

    pub async fn delete_contact(&self, id: ContactId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(format!("{}/contacts/{}", self.base_url, id.0))
            .send()
            .await?;
        check_status(response, "contact", Some(id.0)).await?;
        Ok(())
    }
}

/// Maps a non-success response onto the error taxonomy. `NotFound` is only
/// produced for id-addressed resources; a 404 on a bare collection is
/// unexpected.
async fn check_status(
    response: Response,
    entity: &'static str,
    id: Option<i64>,
) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(ClientError::NotFound { entity, id });
        }
        return Err(ClientError::Unexpected { status });
    }
    if status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY {
        let detail = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.detail)
            .unwrap_or_else(|_| status.to_string());
        return Err(ClientError::Validation { detail });
    }
    Err(ClientError::Unexpected { status })
}

async fn decode<T: DeserializeOwned>(
    response: Response,
    entity: &'static str,
    id: Option<i64>,
) -> Result<T, ClientError> {
    Ok(check_status(response, entity, id).await?.json().await?)
}

/// One entity collection as seen by the list controller: the CRUD operations
/// parameterized by record, draft and id type.
#[async_trait]
pub trait EntityResource: Send + Sync {
    type Entity: Clone + Send + Sync;
    type Draft: Send + Sync;
    type Id: Copy + Send + Sync + std::fmt::Debug;

    /// Lowercase singular name, used in log lines.
    fn entity_name(&self) -> &'static str;

    async fn list_all(&self) -> Result<Vec<Self::Entity>, ClientError>;
    async fn get(&self, id: Self::Id) -> Result<Self::Entity, ClientError>;
    async fn create(&self, draft: &Self::Draft) -> Result<Self::Entity, ClientError>;
    async fn update(&self, id: Self::Id, draft: &Self::Draft)
        -> Result<Self::Entity, ClientError>;
    async fn delete(&self, id: Self::Id) -> Result<(), ClientError>;
}

#[derive(Clone)]
pub struct CompanyResource(pub ApiClient);

#[async_trait]
impl EntityResource for CompanyResource {
    type Entity = Company;
    type Draft = CompanyDraft;
    type Id = CompanyId;

    fn entity_name(&self) -> &'static str {
        "company"
    }

    async fn list_all(&self) -> Result<Vec<Company>, ClientError> {
        self.0.list_companies().await
    }

    async fn get(&self, id: CompanyId) -> Result<Company, ClientError> {
        self.0.get_company(id).await
    }

    async fn create(&self, draft: &CompanyDraft) -> Result<Company, ClientError> {
        self.0.create_company(draft).await
    }

    async fn update(&self, id: CompanyId, draft: &CompanyDraft) -> Result<Company, ClientError> {
        self.0.update_company(id, draft).await
    }

    async fn delete(&self, id: CompanyId) -> Result<(), ClientError> {
        self.0.delete_company(id).await
    }
}

#[derive(Clone)]
pub struct ContactResource(pub ApiClient);

#[async_trait]
impl EntityResource for ContactResource {
    type Entity = Contact;
    type Draft = ContactDraft;
    type Id = ContactId;

    fn entity_name(&self) -> &'static str {
        "contact"
    }

    async fn list_all(&self) -> Result<Vec<Contact>, ClientError> {
        self.0.list_contacts().await
    }

    async fn get(&self, id: ContactId) -> Result<Contact, ClientError> {
        self.0.get_contact(id).await
    }

    async fn create(&self, draft: &ContactDraft) -> Result<Contact, ClientError> {
        self.0.create_contact(draft).await
    }

    async fn update(&self, id: ContactId, draft: &ContactDraft) -> Result<Contact, ClientError> {
        self.0.update_contact(id, draft).await
    }

    async fn delete(&self, id: ContactId) -> Result<(), ClientError> {
        self.0.delete_contact(id).await
    }
}
