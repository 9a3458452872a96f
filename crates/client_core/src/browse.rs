//! Browse pipeline: client-side filtering and pagination over the last
//! fetched collection, plus the controller owning one entity list.

use shared::domain::{Company, Contact};
use tracing::warn;

use crate::api::EntityResource;

/// Items shown per page in every list view.
pub const PAGE_SIZE: usize = 10;

/// Case-insensitive substring match over an entity's searchable fields.
pub trait Searchable {
    fn matches(&self, query: &str) -> bool;
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

impl Searchable for Company {
    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        contains_ci(&self.name, &query)
            || self.city.as_deref().is_some_and(|city| contains_ci(city, &query))
            || self.phone.as_deref().is_some_and(|phone| contains_ci(phone, &query))
    }
}

impl Searchable for Contact {
    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        contains_ci(&self.name, &query)
            || self.city.as_deref().is_some_and(|city| contains_ci(city, &query))
            || self.phone.as_deref().is_some_and(|phone| contains_ci(phone, &query))
            || self
                .company
                .as_ref()
                .is_some_and(|company| contains_ci(&company.name, &query))
    }
}

/// Keeps every item matching `query`, in original order. An empty query
/// matches everything.
pub fn filter<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }
    items.iter().filter(|item| item.matches(query)).collect()
}

pub fn total_pages(filtered_len: usize) -> usize {
    filtered_len.div_ceil(PAGE_SIZE)
}

/// 1-indexed page slice of an already filtered collection. Pages past the
/// end yield an empty slice rather than an error; the view renders it as an
/// empty table.
pub fn page<'a, 'b, T>(filtered: &'b [&'a T], current_page: usize) -> &'b [&'a T] {
    let start = current_page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    if start >= filtered.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(filtered.len());
    &filtered[start..end]
}

/// Owns the browse experience for one entity type: the full collection last
/// fetched, the free-text filter and the page cursor. Mutations refetch the
/// whole collection on success rather than patching local state.
pub struct ListController<R: EntityResource> {
    resource: R,
    items: Vec<R::Entity>,
    search_query: String,
    current_page: usize,
}

impl<R: EntityResource> ListController<R>
where
    R::Entity: Searchable,
{
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            items: Vec::new(),
            search_query: String::new(),
            current_page: 1,
        }
    }

    /// Refetches the whole collection. On failure the previous collection is
    /// kept as-is (possibly empty on first load) and the error only reaches
    /// the log.
    pub async fn load(&mut self) {
        match self.resource.list_all().await {
            Ok(items) => self.items = items,
            Err(err) => warn!(
                entity = self.resource.entity_name(),
                "list fetch failed: {err}"
            ),
        }
    }

    pub fn items(&self) -> &[R::Entity] {
        &self.items
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Changing the query deliberately leaves the page cursor alone; a query
    /// that shrinks the collection below the cursor renders an empty page
    /// until the user moves it.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn filtered(&self) -> Vec<&R::Entity> {
        filter(&self.items, &self.search_query)
    }

    /// The page currently in view.
    pub fn visible(&self) -> Vec<&R::Entity> {
        let filtered = self.filtered();
        page(&filtered, self.current_page).to_vec()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len())
    }

    /// `true` means the entity was persisted and the collection refreshed.
    pub async fn create(&mut self, draft: &R::Draft) -> bool {
        match self.resource.create(draft).await {
            Ok(_) => {
                self.load().await;
                true
            }
            Err(err) => {
                warn!(
                    entity = self.resource.entity_name(),
                    "create failed: {err}"
                );
                false
            }
        }
    }

    pub async fn update(&mut self, id: R::Id, draft: &R::Draft) -> bool {
        match self.resource.update(id, draft).await {
            Ok(_) => {
                self.load().await;
                true
            }
            Err(err) => {
                warn!(
                    entity = self.resource.entity_name(),
                    ?id,
                    "update failed: {err}"
                );
                false
            }
        }
    }

    /// Callers prompt for confirmation before getting here.
    pub async fn delete(&mut self, id: R::Id) -> bool {
        match self.resource.delete(id).await {
            Ok(()) => {
                self.load().await;
                true
            }
            Err(err) => {
                warn!(
                    entity = self.resource.entity_name(),
                    ?id,
                    "delete failed: {err}"
                );
                false
            }
        }
    }
}
