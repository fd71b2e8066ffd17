//! Observable rule listing.

use std::sync::Arc;

use tokio::sync::watch;

use crate::api::{ApiResult, ControllerClient};
use crate::rules::book::RuleBook;
use crate::server::Server;

/// Fetches rules and providers and publishes them as a [`RuleBook`].
#[derive(Debug, Clone)]
pub struct RuleBrowser {
    client: ControllerClient,
    book: Arc<watch::Sender<RuleBook>>,
}

impl RuleBrowser {
    pub fn new(client: ControllerClient) -> Self {
        let (book, _) = watch::channel(RuleBook::default());
        Self {
            client,
            book: Arc::new(book),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RuleBook> {
        self.book.subscribe()
    }

    pub fn book(&self) -> RuleBook {
        self.book.borrow().clone()
    }

    /// Fetch rules and providers concurrently; publish only if both succeed.
    pub async fn try_fetch_data(&self, server: &Server) -> ApiResult<()> {
        let (rules, providers) = tokio::join!(
            self.client.get_rules(server),
            self.client.get_rule_providers(server)
        );
        let book = RuleBook::new(rules?, providers?);

        tracing::debug!(
            server = %server.display_name(),
            rules = book.rules.len(),
            providers = book.providers.len(),
            "Rule book published"
        );
        self.book.send_replace(book);
        Ok(())
    }

    pub async fn fetch_data(&self, server: &Server) {
        if let Err(e) = self.try_fetch_data(server).await {
            tracing::warn!(
                server = %server.display_name(),
                kind = ?e.kind(),
                error = %e,
                "Failed to fetch rules"
            );
        }
    }

    /// Ask the controller to refresh one provider, then re-fetch.
    pub async fn try_refresh_provider(&self, name: &str, server: &Server) -> ApiResult<()> {
        self.client.refresh_rule_provider(server, name).await?;
        tracing::info!(server = %server.display_name(), provider = %name, "Rule provider refreshed");
        self.try_fetch_data(server).await
    }

    pub async fn refresh_provider(&self, name: &str, server: &Server) {
        if let Err(e) = self.try_refresh_provider(name, server).await {
            tracing::warn!(
                server = %server.display_name(),
                provider = %name,
                kind = ?e.kind(),
                error = %e,
                "Failed to refresh rule provider"
            );
        }
    }
}
