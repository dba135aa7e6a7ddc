pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod logger;
pub mod models;
pub mod surprise;

pub use client::{CreatorBackend, CreatorClient, ImageClient, PostClient};
pub use config::CreatorConfig;
pub use error::{CreatorError, Result};
pub use form::{FormView, Navigator, PostCreationForm, Preview, Route};
pub use models::{
    CreatePostRequest, CreatePostResponse, Draft, DraftField, GenerateImageRequest,
    GenerateImageResponse, ImageData,
};
