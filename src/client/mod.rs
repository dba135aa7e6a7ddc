pub mod image_client;
pub mod post_client;
pub mod traits;

use crate::{
    config::CreatorConfig,
    error::{CreatorError, Result},
    models::{CreatePostRequest, CreatePostResponse, GenerateImageResponse},
};
use async_trait::async_trait;
use reqwest::Client;

pub use image_client::ImageClient;
pub use post_client::PostClient;
pub use traits::CreatorBackend;

/// HTTP access to the image-generation and post-creation endpoints.
#[derive(Clone)]
pub struct CreatorClient {
    image_client: ImageClient,
    post_client: PostClient,
}

impl CreatorClient {
    pub fn new(config: &CreatorConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| CreatorError::ConfigError(e.to_string()))?;

        Self::with_http_client(config, client)
    }

    /// Builds the client on top of an existing `reqwest::Client` (shared pools, custom proxies).
    pub fn with_http_client(config: &CreatorConfig, client: Client) -> Result<Self> {
        if config.api_url.trim().is_empty() {
            return Err(CreatorError::ConfigError("API URL is required".into()));
        }

        Ok(Self {
            image_client: ImageClient::new(client.clone(), config.generate_url()),
            post_client: PostClient::new(client, config.post_url()),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn post(&self) -> &PostClient {
        &self.post_client
    }
}

#[async_trait]
impl CreatorBackend for CreatorClient {
    async fn generate_image(&self, prompt: &str) -> Result<GenerateImageResponse> {
        self.image_client.generate(prompt).await
    }

    async fn create_post(&self, post: CreatePostRequest) -> Result<CreatePostResponse> {
        self.post_client.create(post).await
    }
}
