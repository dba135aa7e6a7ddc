use crate::{
    error::{CreatorError, Result},
    models::{CreatePostRequest, CreatePostResponse},
};
use reqwest::Client;

#[derive(Clone)]
pub struct PostClient {
    client: Client,
    url: String,
}

impl PostClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn create(&self, post: CreatePostRequest) -> Result<CreatePostResponse> {
        log::info!("Sharing post by '{}' to {}", post.name, self.url);

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(&post)
            .send()
            .await
            .map_err(|e| CreatorError::RequestError(format!("Post request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("Post creation returned {}: {}", status, error_text);
            return Err(CreatorError::ResponseError(format!(
                "Post creation failed ({}): {}",
                status, error_text
            )));
        }

        response
            .json::<CreatePostResponse>()
            .await
            .map_err(|e| CreatorError::ResponseError(e.to_string()))
    }
}
