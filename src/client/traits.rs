use crate::{
    error::Result,
    models::{CreatePostRequest, CreatePostResponse, GenerateImageResponse},
};
use async_trait::async_trait;

/// The two remote collaborators the post form talks to.
#[async_trait]
pub trait CreatorBackend: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<GenerateImageResponse>;

    async fn create_post(&self, post: CreatePostRequest) -> Result<CreatePostResponse>;
}
