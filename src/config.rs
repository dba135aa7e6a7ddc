use std::env;

pub const DEFAULT_API_URL: &str = "https://dall-e-creator.onrender.com/api/v1";
pub const DEFAULT_GENERATE_PATH: &str = "/dalle";
pub const DEFAULT_POST_PATH: &str = "/post";
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq)]
pub struct CreatorConfig {
    pub api_url: String,
    pub generate_path: String,
    pub post_path: String,
    pub image_mime: String,
}

impl Default for CreatorConfig {
    fn default() -> Self {
        CreatorConfig {
            api_url: DEFAULT_API_URL.to_string(),
            generate_path: DEFAULT_GENERATE_PATH.to_string(),
            post_path: DEFAULT_POST_PATH.to_string(),
            image_mime: DEFAULT_IMAGE_MIME.to_string(),
        }
    }
}

impl CreatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `CREATOR_*` variables, falling back to the defaults for anything unset or blank.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let read = |key: &str, fallback: String| {
            env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
        };

        CreatorConfig {
            api_url: read("CREATOR_API_URL", defaults.api_url),
            generate_path: read("CREATOR_GENERATE_PATH", defaults.generate_path),
            post_path: read("CREATOR_POST_PATH", defaults.post_path),
            image_mime: read("CREATOR_IMAGE_MIME", defaults.image_mime),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_paths(
        mut self,
        generate_path: impl Into<String>,
        post_path: impl Into<String>,
    ) -> Self {
        self.generate_path = generate_path.into();
        self.post_path = post_path.into();
        self
    }

    pub fn with_image_mime(mut self, mime: impl Into<String>) -> Self {
        self.image_mime = mime.into();
        self
    }

    pub fn generate_url(&self) -> String {
        join_url(&self.api_url, &self.generate_path)
    }

    pub fn post_url(&self) -> String {
        join_url(&self.api_url, &self.post_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
