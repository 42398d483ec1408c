//! Request helpers shared by every endpoint.

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;

use super::ContentedClient;

impl ContentedClient {
    /// GET `path` with `query` and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let url = self.url(path);
        let request = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(query);

        let body = HttpUtils::execute_request(request, "GET", &url).await?;
        HttpUtils::parse_json(&body, &url)
    }

    /// GET `path` and return the body as text.
    pub(crate) async fn get_text(&self, path: &str) -> Result<String> {
        let url = self.url(path);
        let request = self.client.get(&url).header("Accept", "text/plain, */*");
        HttpUtils::execute_request(request, "GET", &url).await
    }
}
