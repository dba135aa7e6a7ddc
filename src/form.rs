use crate::{
    client::CreatorBackend,
    config::DEFAULT_IMAGE_MIME,
    error::{CreatorError, Result},
    logger,
    models::{CreatePostRequest, Draft, DraftField, ImageData},
    surprise,
};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The community listing.
    Root,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
        }
    }
}

/// Whatever owns the page stack. The form only ever asks to leave.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Placeholder,
    Image { src: String, alt: String },
}

/// Everything a presentation layer needs to draw the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub draft: Draft,
    pub preview: Preview,
    pub show_loader: bool,
    pub generate_label: &'static str,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
}

#[derive(Debug, Default)]
struct FormState {
    draft: Draft,
    is_generating: bool,
    is_submitting: bool,
}

#[derive(Debug, Clone, Copy)]
enum Flag {
    Generating,
    Submitting,
}

impl FormState {
    fn flag_mut(&mut self, flag: Flag) -> &mut bool {
        match flag {
            Flag::Generating => &mut self.is_generating,
            Flag::Submitting => &mut self.is_submitting,
        }
    }
}

/// Clears an in-flight flag when the request finishes, fails or is dropped.
struct InFlight {
    state: Arc<Mutex<FormState>>,
    flag: Flag,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        *state.flag_mut(self.flag) = false;
    }
}

/// View-model for drafting, generating and sharing a post.
#[derive(Clone)]
pub struct PostCreationForm {
    state: Arc<Mutex<FormState>>,
    backend: Arc<dyn CreatorBackend>,
    navigator: Arc<dyn Navigator>,
    image_mime: String,
}

impl PostCreationForm {
    pub fn new(backend: Arc<dyn CreatorBackend>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState::default())),
            backend,
            navigator,
            image_mime: DEFAULT_IMAGE_MIME.to_string(),
        }
    }

    pub fn with_image_mime(mut self, mime: impl Into<String>) -> Self {
        self.image_mime = mime.into();
        self
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn raise(&self, state: &mut FormState, flag: Flag) -> InFlight {
        *state.flag_mut(flag) = true;
        InFlight {
            state: Arc::clone(&self.state),
            flag,
        }
    }

    pub fn draft(&self) -> Draft {
        self.lock().draft.clone()
    }

    pub fn is_generating(&self) -> bool {
        self.lock().is_generating
    }

    pub fn is_submitting(&self) -> bool {
        self.lock().is_submitting
    }

    pub fn update_field(&self, field: DraftField, value: impl Into<String>) {
        let mut state = self.lock();
        state.draft = state.draft.with_field(field, value);
    }

    /// Same as [`update_field`](Self::update_field) for input events that carry the field name.
    pub fn update_named_field(&self, name: &str, value: impl Into<String>) -> Result<()> {
        let field: DraftField = name.parse()?;
        self.update_field(field, value);
        Ok(())
    }

    pub fn request_surprise_prompt(&self) {
        let mut state = self.lock();
        let prompt = surprise::random_prompt(&state.draft.prompt);
        log::debug!("Surprise prompt: {}", prompt);
        state.draft = state.draft.with_field(DraftField::Prompt, prompt);
    }

    /// Asks the generation service for an image of the current prompt and stores it as the photo.
    ///
    /// On failure the photo is left as it was. `is_generating` is cleared before this returns.
    pub async fn generate_image(&self) -> Result<()> {
        let (prompt, _in_flight) = {
            let mut state = self.lock();
            if !state.draft.has_prompt() {
                log::warn!("Generate requested without a prompt");
                return Err(CreatorError::MissingPrompt);
            }
            let prompt = state.draft.prompt.clone();
            let in_flight = self.raise(&mut state, Flag::Generating);
            (prompt, in_flight)
        };

        let _timer = logger::timer("generate_image");
        let photo = match self.fetch_photo(&prompt).await {
            Ok(photo) => photo,
            Err(e) => {
                log::error!("Image generation failed: {}", e);
                return Err(e);
            }
        };

        let mut state = self.lock();
        state.draft = state.draft.with_field(DraftField::Photo, photo);
        log::info!("Image generated for prompt '{}'", prompt);
        Ok(())
    }

    async fn fetch_photo(&self, prompt: &str) -> Result<String> {
        let response = self.backend.generate_image(prompt).await?;
        ImageData::wrap_base64(&self.image_mime, &response.photo)
    }

    /// Shares the draft with the community and navigates to the listing on success.
    ///
    /// Rejected without a request while another submission is in flight.
    pub async fn submit_post(&self) -> Result<()> {
        let (post, _in_flight) = {
            let mut state = self.lock();
            if !state.draft.is_ready_to_share() {
                log::warn!("Share requested before a prompt and image were ready");
                return Err(CreatorError::MissingPromptOrPhoto);
            }
            if state.is_submitting {
                return Err(CreatorError::SubmissionInProgress);
            }
            let post = CreatePostRequest {
                name: state.draft.name.clone(),
                prompt: state.draft.prompt.clone(),
                photo: state.draft.photo.clone(),
            };
            let in_flight = self.raise(&mut state, Flag::Submitting);
            (post, in_flight)
        };

        let _timer = logger::timer("submit_post");
        if let Err(e) = self.backend.create_post(post).await {
            log::error!("Sharing post failed: {}", e);
            return Err(e);
        }

        log::info!("Post shared, returning to {}", Route::Root.path());
        self.navigator.navigate(Route::Root);
        Ok(())
    }

    pub fn view(&self) -> FormView {
        let state = self.lock();
        let preview = if state.draft.has_photo() {
            Preview::Image {
                src: state.draft.photo.clone(),
                alt: state.draft.prompt.clone(),
            }
        } else {
            Preview::Placeholder
        };

        FormView {
            draft: state.draft.clone(),
            preview,
            show_loader: state.is_generating,
            generate_label: if state.is_generating {
                "Generating..."
            } else {
                "Generate"
            },
            submit_label: if state.is_submitting {
                "Sharing..."
            } else {
                "Share with the community"
            },
            submit_disabled: state.is_submitting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreatePostResponse, GenerateImageResponse};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    #[derive(Default)]
    struct FakeBackend {
        photo: Option<String>,
        fail_post: bool,
        hold_post: Option<Arc<Notify>>,
        generate_calls: AtomicUsize,
        post_calls: AtomicUsize,
        posted: Mutex<Vec<CreatePostRequest>>,
    }

    #[async_trait]
    impl CreatorBackend for FakeBackend {
        async fn generate_image(&self, _prompt: &str) -> Result<GenerateImageResponse> {
            self.generate_calls.fetch_add(1, Ordering::SeqCst);
            match &self.photo {
                Some(photo) => Ok(GenerateImageResponse {
                    photo: photo.clone(),
                }),
                None => Err(CreatorError::RequestError("connection refused".into())),
            }
        }

        async fn create_post(&self, post: CreatePostRequest) -> Result<CreatePostResponse> {
            self.post_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.hold_post {
                gate.notified().await;
            }
            if self.fail_post {
                return Err(CreatorError::ResponseError("500".into()));
            }
            self.posted.lock().unwrap().push(post);
            Ok(CreatePostResponse {
                success: Some(true),
                data: None,
            })
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        routes: Mutex<Vec<Route>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: Route) {
            self.routes.lock().unwrap().push(route);
        }
    }

    fn form_with(backend: FakeBackend) -> (PostCreationForm, Arc<FakeBackend>, Arc<RecordingNavigator>) {
        let backend = Arc::new(backend);
        let navigator = Arc::new(RecordingNavigator::default());
        let form = PostCreationForm::new(backend.clone(), navigator.clone());
        (form, backend, navigator)
    }

    fn ready_form(backend: FakeBackend) -> (PostCreationForm, Arc<FakeBackend>, Arc<RecordingNavigator>) {
        let (form, backend, navigator) = form_with(backend);
        form.update_field(DraftField::Name, "Ada");
        form.update_field(DraftField::Prompt, "cats");
        form.update_field(DraftField::Photo, "data:image/jpeg;base64,abcd");
        (form, backend, navigator)
    }

    #[test]
    fn test_update_fields() {
        let (form, _, _) = form_with(FakeBackend::default());
        form.update_field(DraftField::Name, "Ada");
        form.update_field(DraftField::Prompt, "cats");
        assert_eq!(
            form.draft(),
            Draft {
                name: "Ada".into(),
                prompt: "cats".into(),
                photo: "".into(),
            }
        );
    }

    #[test]
    fn test_update_named_field() {
        let (form, _, _) = form_with(FakeBackend::default());
        form.update_named_field("prompt", "dogs").unwrap();
        assert_eq!(form.draft().prompt, "dogs");
        assert!(matches!(
            form.update_named_field("title", "x"),
            Err(CreatorError::UnknownField(_))
        ));
    }

    #[test]
    fn test_surprise_prompt_changes_prompt() {
        let (form, _, _) = form_with(FakeBackend::default());
        let first = surprise::SURPRISE_PROMPTS[0];
        form.update_field(DraftField::Prompt, first);
        form.request_surprise_prompt();
        let prompt = form.draft().prompt;
        assert_ne!(prompt, first);
        assert!(surprise::SURPRISE_PROMPTS.contains(&prompt.as_str()));
    }

    #[tokio::test]
    async fn test_generate_without_prompt_skips_network() {
        let (form, backend, _) = form_with(FakeBackend {
            photo: Some("abcd".into()),
            ..Default::default()
        });
        let result = form.generate_image().await;
        assert!(matches!(result, Err(CreatorError::MissingPrompt)));
        assert_eq!(backend.generate_calls.load(Ordering::SeqCst), 0);
        assert!(!form.is_generating());
    }

    #[tokio::test]
    async fn test_generate_stores_data_uri() {
        let (form, backend, _) = form_with(FakeBackend {
            photo: Some("abcd".into()),
            ..Default::default()
        });
        form.update_field(DraftField::Prompt, "cats");
        form.generate_image().await.unwrap();

        assert_eq!(form.draft().photo, "data:image/jpeg;base64,abcd");
        assert_eq!(backend.generate_calls.load(Ordering::SeqCst), 1);
        assert!(!form.is_generating());
    }

    #[tokio::test]
    async fn test_generate_uses_configured_mime() {
        let (form, _, _) = form_with(FakeBackend {
            photo: Some("abcd".into()),
            ..Default::default()
        });
        let form = form.with_image_mime("image/png");
        form.update_field(DraftField::Prompt, "cats");
        form.generate_image().await.unwrap();
        assert_eq!(form.draft().photo, "data:image/png;base64,abcd");
    }

    #[tokio::test]
    async fn test_failed_generation_keeps_photo() {
        let (form, _, _) = form_with(FakeBackend::default());
        form.update_field(DraftField::Prompt, "cats");
        form.update_field(DraftField::Photo, "data:image/jpeg;base64,old=");

        let result = form.generate_image().await;
        assert!(matches!(result, Err(CreatorError::RequestError(_))));
        assert!(!form.is_generating());
        assert_eq!(form.draft().photo, "data:image/jpeg;base64,old=");
    }

    #[tokio::test]
    async fn test_undecodable_payload_keeps_photo() {
        let (form, _, _) = form_with(FakeBackend {
            photo: Some("%%% not an image %%%".into()),
            ..Default::default()
        });
        form.update_field(DraftField::Prompt, "cats");

        let result = form.generate_image().await;
        assert!(matches!(result, Err(CreatorError::DecodeError(_))));
        assert!(!form.is_generating());
        assert_eq!(form.draft().photo, "");
    }

    #[tokio::test]
    async fn test_submit_without_photo_skips_network() {
        let (form, backend, navigator) = form_with(FakeBackend::default());
        form.update_field(DraftField::Prompt, "cats");

        let result = form.submit_post().await;
        assert!(matches!(result, Err(CreatorError::MissingPromptOrPhoto)));
        assert!(result.unwrap_err().is_warning());
        assert_eq!(backend.post_calls.load(Ordering::SeqCst), 0);
        assert!(navigator.routes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_prompt_skips_network() {
        let (form, backend, _) = form_with(FakeBackend::default());
        form.update_field(DraftField::Photo, "data:image/jpeg;base64,abcd");

        let result = form.submit_post().await;
        assert!(matches!(result, Err(CreatorError::MissingPromptOrPhoto)));
        assert_eq!(backend.post_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_submit_navigates_once() {
        let (form, backend, navigator) = ready_form(FakeBackend::default());
        form.submit_post().await.unwrap();

        assert_eq!(*navigator.routes.lock().unwrap(), vec![Route::Root]);
        assert!(!form.is_submitting());
        let posted = backend.posted.lock().unwrap();
        assert_eq!(
            posted.as_slice(),
            &[CreatePostRequest {
                name: "Ada".into(),
                prompt: "cats".into(),
                photo: "data:image/jpeg;base64,abcd".into(),
            }]
        );
    }

    #[tokio::test]
    async fn test_failed_submit_stays_on_form() {
        let (form, _, navigator) = ready_form(FakeBackend {
            fail_post: true,
            ..Default::default()
        });
        let result = form.submit_post().await;

        assert!(matches!(result, Err(CreatorError::ResponseError(_))));
        assert!(navigator.routes.lock().unwrap().is_empty());
        assert!(!form.is_submitting());
        assert_eq!(form.draft().name, "Ada");
    }

    #[tokio::test]
    async fn test_submit_disabled_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let (form, backend, navigator) = ready_form(FakeBackend {
            hold_post: Some(gate.clone()),
            ..Default::default()
        });

        let pending = tokio::spawn({
            let form = form.clone();
            async move { form.submit_post().await }
        });

        while !form.is_submitting() {
            tokio::task::yield_now().await;
        }

        let view = form.view();
        assert!(view.submit_disabled);
        assert_eq!(view.submit_label, "Sharing...");

        let second = form.submit_post().await;
        assert!(matches!(second, Err(CreatorError::SubmissionInProgress)));

        gate.notify_one();
        pending.await.unwrap().unwrap();

        assert_eq!(backend.post_calls.load(Ordering::SeqCst), 1);
        assert_eq!(navigator.routes.lock().unwrap().len(), 1);
        assert!(!form.view().submit_disabled);
    }

    #[test]
    fn test_view_rendering() {
        let (form, _, _) = form_with(FakeBackend::default());
        let view = form.view();
        assert_eq!(view.preview, Preview::Placeholder);
        assert!(!view.show_loader);
        assert_eq!(view.generate_label, "Generate");
        assert_eq!(view.submit_label, "Share with the community");
        assert!(!view.submit_disabled);

        form.update_field(DraftField::Prompt, "cats");
        form.update_field(DraftField::Photo, "data:image/jpeg;base64,abcd");
        {
            let mut state = form.lock();
            state.is_generating = true;
        }
        let view = form.view();
        assert_eq!(
            view.preview,
            Preview::Image {
                src: "data:image/jpeg;base64,abcd".into(),
                alt: "cats".into(),
            }
        );
        assert!(view.show_loader);
        assert_eq!(view.generate_label, "Generating...");
    }

    #[test]
    fn test_root_route_path() {
        assert_eq!(Route::Root.path(), "/");
    }
}
