use crate::{
    error::{CreatorError, Result},
    models::{GenerateImageRequest, GenerateImageResponse},
};
use reqwest::Client;

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    url: String,
}

impl ImageClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn generate(&self, prompt: &str) -> Result<GenerateImageResponse> {
        let request = GenerateImageRequest {
            prompt: prompt.to_string(),
        };

        log::info!("Requesting image from {}", self.url);
        log::debug!("Image prompt: {}", request.prompt);

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CreatorError::RequestError(format!("Image request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("Image generation returned {}: {}", status, error_text);
            return Err(CreatorError::ResponseError(format!(
                "Image generation failed ({}): {}",
                status, error_text
            )));
        }

        let body: GenerateImageResponse = response
            .json()
            .await
            .map_err(|e| CreatorError::ResponseError(e.to_string()))?;

        log::debug!("Image payload length: {} characters", body.photo.len());

        Ok(body)
    }
}
