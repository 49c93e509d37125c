//! Query collaborators for autocomplete fields

use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result};
use futures::future::BoxFuture;

use crate::domain::{autocomplete::AutocompleteItem, contact::Contact, text};

/// Data source behind an autocomplete field
pub trait QueryService<A: AutocompleteItem>: Send + Sync {
    /// Rows matching `text`
    fn query(&self, text: String) -> BoxFuture<'static, Result<Vec<A>>>;

    /// The row whose internal value is `value`, if any
    fn fetch(&self, value: A::Value) -> BoxFuture<'static, Result<Option<A>>>;
}

/// In-memory contact directory with an artificial lookup latency
#[derive(Debug, Clone)]
pub struct CatalogQueryService {
    contacts: Arc<Vec<Contact>>,
    latency: Duration,
    limit: usize,
}

impl CatalogQueryService {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: Arc::new(contacts),
            latency: Duration::ZERO,
            limit: usize::MAX,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn search(contacts: &[Contact], text: &str, limit: usize) -> Vec<Contact> {
        contacts
            .iter()
            .filter(|contact| contact.matches(text))
            .take(limit)
            .cloned()
            .collect()
    }
}

impl QueryService<Contact> for CatalogQueryService {
    fn query(&self, text: String) -> BoxFuture<'static, Result<Vec<Contact>>> {
        let contacts = Arc::clone(&self.contacts);
        let latency = self.latency;
        let limit = self.limit;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            if text::is_blank(&text) {
                return Err(eyre!("refusing to search for blank text"));
            }
            Ok(Self::search(&contacts, &text, limit))
        })
    }

    fn fetch(&self, value: String) -> BoxFuture<'static, Result<Option<Contact>>> {
        let contacts = Arc::clone(&self.contacts);
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            Ok(contacts
                .iter()
                .find(|contact| contact.value() == value)
                .cloned())
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn service() -> CatalogQueryService {
        CatalogQueryService::new(vec![
            Contact::new("adalovelace", "Ada Lovelace"),
            Contact::new("aturing", "Alan Turing"),
            Contact::new("ghopper", "Grace Hopper"),
        ])
    }

    #[tokio::test]
    async fn test_query_matches_case_insensitively() {
        let rows = service().query("AL".into()).await.unwrap();
        let names: Vec<_> = rows.iter().map(|c| c.username.as_str()).collect();
        assert_eq!(names, vec!["adalovelace", "aturing"]);
    }

    #[tokio::test]
    async fn test_query_respects_limit() {
        let rows = service().with_limit(1).query("a".into()).await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_query_is_an_error() {
        assert!(service().query("  ".into()).await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_by_value() {
        let found = service().fetch("ghopper".into()).await.unwrap();
        assert_eq!(found, Some(Contact::new("ghopper", "Grace Hopper")));
        assert_eq!(service().fetch("nobody".into()).await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let start = tokio::time::Instant::now();
        service()
            .with_latency(Duration::from_millis(200))
            .query("ada".into())
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(200));
    }
}
