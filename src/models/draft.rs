use crate::error::{CreatorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The user's in-progress post: display name, prompt and generated image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub name: String,
    pub prompt: String,
    pub photo: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Name,
    Prompt,
    Photo,
}

impl DraftField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Prompt => "prompt",
            DraftField::Photo => "photo",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = CreatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(DraftField::Name),
            "prompt" => Ok(DraftField::Prompt),
            "photo" => Ok(DraftField::Photo),
            other => Err(CreatorError::UnknownField(other.to_string())),
        }
    }
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Prompt => &self.prompt,
            DraftField::Photo => &self.photo,
        }
    }

    /// Returns a copy with one field replaced.
    pub fn with_field(&self, field: DraftField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            DraftField::Name => Self {
                name: value,
                ..self.clone()
            },
            DraftField::Prompt => Self {
                prompt: value,
                ..self.clone()
            },
            DraftField::Photo => Self {
                photo: value,
                ..self.clone()
            },
        }
    }

    pub fn has_prompt(&self) -> bool {
        !self.prompt.is_empty()
    }

    pub fn has_photo(&self) -> bool {
        !self.photo.is_empty()
    }

    pub fn is_ready_to_share(&self) -> bool {
        self.has_prompt() && self.has_photo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_field_replaces_one_field() {
        let draft = Draft::new()
            .with_field(DraftField::Name, "Ada")
            .with_field(DraftField::Prompt, "cats");
        assert_eq!(
            draft,
            Draft {
                name: "Ada".into(),
                prompt: "cats".into(),
                photo: "".into(),
            }
        );
        assert_eq!(draft.get(DraftField::Prompt), "cats");
    }

    #[test]
    fn test_field_names() {
        assert_eq!("name".parse::<DraftField>().unwrap(), DraftField::Name);
        assert_eq!("photo".parse::<DraftField>().unwrap(), DraftField::Photo);
        assert!(matches!(
            "email".parse::<DraftField>(),
            Err(CreatorError::UnknownField(ref f)) if f == "email"
        ));
        assert_eq!(DraftField::Prompt.to_string(), "prompt");
    }

    #[test]
    fn test_readiness() {
        let draft = Draft::new().with_field(DraftField::Prompt, "cats");
        assert!(draft.has_prompt());
        assert!(!draft.is_ready_to_share());
        let draft = draft.with_field(DraftField::Photo, "data:image/jpeg;base64,abcd");
        assert!(draft.is_ready_to_share());
    }
}
