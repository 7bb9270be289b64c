use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::cache::{QueryData, QueryKey, RemoteData};
use crate::config::PageWindow;
use crate::models::{ApiMessage, ItemsPage, Notification, NotificationsPage, UnreadCount};

use super::error::ApiError;

/// HTTP client for the remote data service.
///
/// Holds the access token for the current session; a new session means a
/// new client.
pub struct ApiClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Retrieve one page of notifications, newest first.
    pub async fn list_notifications(
        &self,
        page: PageWindow,
    ) -> Result<NotificationsPage, ApiError> {
        let request = self
            .client
            .get(format!("{}/notifications/", self.base_url))
            .query(&[("skip", page.skip), ("limit", page.limit)]);
        self.send(request).await
    }

    /// Unread total for the bell badge.
    pub async fn unread_count(&self) -> Result<UnreadCount, ApiError> {
        let request = self
            .client
            .get(format!("{}/notifications/unread-count", self.base_url));
        self.send(request).await
    }

    /// Mark one notification as read.
    pub async fn mark_read(&self, id: Uuid) -> Result<Notification, ApiError> {
        let request = self
            .client
            .put(format!("{}/notifications/{}/read", self.base_url, id));
        self.send(request).await
    }

    /// Mark every unread notification as read.
    pub async fn mark_all_read(&self) -> Result<ApiMessage, ApiError> {
        let request = self
            .client
            .put(format!("{}/notifications/read-all", self.base_url));
        self.send(request).await
    }

    pub async fn delete_notification(&self, id: Uuid) -> Result<ApiMessage, ApiError> {
        let request = self
            .client
            .delete(format!("{}/notifications/{}", self.base_url, id));
        self.send(request).await
    }

    /// Retrieve one page of items.
    pub async fn list_items(&self, page: PageWindow) -> Result<ItemsPage, ApiError> {
        let request = self
            .client
            .get(format!("{}/items/", self.base_url))
            .query(&[("skip", page.skip), ("limit", page.limit)]);
        self.send(request).await
    }

    pub async fn delete_item(&self, id: Uuid) -> Result<ApiMessage, ApiError> {
        let request = self
            .client
            .delete(format!("{}/items/{}", self.base_url, id));
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        response.json::<T>().await.map_err(ApiError::from)
    }
}

impl RemoteData for ApiClient {
    fn fetch(
        &self,
        key: QueryKey,
        page: PageWindow,
    ) -> BoxFuture<'static, Result<QueryData, ApiError>> {
        // The key/payload pairing is fixed here; the cache treats payloads
        // opaquely.
        let client = self.client.clone();
        let base_url = self.base_url.clone();
        let token = self.token.clone();
        Box::pin(async move {
            let this = ApiClient {
                base_url,
                token,
                client,
            };
            match key {
                QueryKey::Notifications => this
                    .list_notifications(page)
                    .await
                    .map(QueryData::Notifications),
                QueryKey::NotificationsUnreadCount => {
                    this.unread_count().await.map(QueryData::UnreadCount)
                }
                QueryKey::Items => this.list_items(page).await.map(QueryData::Items),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed_from_the_base_url() {
        let client = ApiClient::new("http://localhost:8000/api/v1/", "token");
        assert_eq!(client.base_url, "http://localhost:8000/api/v1");
    }

    #[tokio::test]
    #[ignore] // Requires a running API service
    async fn lists_notifications_against_live_service() {
        let token = std::env::var("COURIER_API_TOKEN").expect("COURIER_API_TOKEN not set");
        let client = ApiClient::new("http://localhost:8000/api/v1", token);
        let page = client
            .list_notifications(PageWindow::default())
            .await
            .unwrap();
        assert!(page.count >= page.data.len() as i64);
    }
}
