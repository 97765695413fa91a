use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

pub type PostId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub content: String,
    pub image_url: String,
    pub author: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub likes: i64,
    pub comments: Vec<String>,
}

/// Timestamps further apart than this mark a post as edited.
const EDIT_THRESHOLD: Duration = Duration::SECOND;

impl Post {
    pub fn is_edited(&self) -> bool {
        (self.updated_at - self.created_at).abs() > EDIT_THRESHOLD
    }

    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }
}

/// The user-editable fields of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub content: String,
    pub author: String,
    pub image_url: String,
}

impl PostDraft {
    pub fn from_post(post: &Post) -> Self {
        Self {
            content: post.content.clone(),
            author: post.author.clone(),
            image_url: post.image_url.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.author.is_empty() && self.image_url.is_empty()
    }
}
