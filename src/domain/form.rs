use std::fmt;

use thiserror::Error;

use crate::domain::post::{Post, PostDraft, PostId};

/// What a submit of the post form will do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Intent {
    #[default]
    Create,
    Update(PostId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Content,
    Author,
    ImageUrl,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Content => "content",
            Self::Author => "author",
            Self::ImageUrl => "imageUrl",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(FormField),
}

/// The single post form shared by the create and edit flows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    draft: PostDraft,
    intent: Intent,
}

impl PostForm {
    pub fn draft(&self) -> &PostDraft {
        &self.draft
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn editing_id(&self) -> Option<PostId> {
        match self.intent {
            Intent::Create => None,
            Intent::Update(id) => Some(id),
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Content => self.draft.content = value,
            FormField::Author => self.draft.author = value,
            FormField::ImageUrl => self.draft.image_url = value,
        }
    }

    /// Seeds the form from an existing post and targets it for update.
    /// Likes and comments are not part of the form.
    pub fn begin_edit(&mut self, post: &Post) {
        self.draft = PostDraft::from_post(post);
        self.intent = Intent::Update(post.id);
    }

    pub fn reset(&mut self) {
        self.draft = PostDraft::default();
        self.intent = Intent::Create;
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.draft.author.trim().is_empty() {
            return Err(FormError::MissingField(FormField::Author));
        }
        if self.draft.content.trim().is_empty() {
            return Err(FormError::MissingField(FormField::Content));
        }
        Ok(())
    }

    /// Hands out the buffer and intent, leaving the form empty in create mode.
    pub fn take(&mut self) -> (Intent, PostDraft) {
        let draft = std::mem::take(&mut self.draft);
        let intent = std::mem::take(&mut self.intent);
        (intent, draft)
    }

    pub fn submit_label(&self) -> &'static str {
        match self.intent {
            Intent::Create => "Create Post",
            Intent::Update(_) => "Update Post",
        }
    }
}
