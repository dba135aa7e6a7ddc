use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatePostRequest {
    pub name: String,
    pub prompt: String,
    pub photo: String, // data URI
}

/// The backend's reply is only parsed to confirm the post was accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatePostResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}
