use anyhow::Result;

use crate::domain::post::{Post, PostDraft, PostId};
use crate::infra::api::{FeedApiClient, PostPayload, RemotePost};

#[derive(Clone)]
pub struct FeedRepository {
    api: FeedApiClient,
}

impl FeedRepository {
    pub fn new(api: FeedApiClient) -> Self {
        Self { api }
    }

    /// Full collection, newest first. The service delivers posts in insertion
    /// order, so the list is reversed.
    pub async fn fetch_all(&self) -> Result<Vec<Post>> {
        let remote = self.api.list_posts().await?;
        Ok(remote.into_iter().rev().map(normalize).collect())
    }

    pub async fn create(&self, draft: &PostDraft) -> Result<()> {
        self.api.create_post(&PostPayload::from_draft(draft)).await
    }

    pub async fn update(&self, id: PostId, draft: &PostDraft) -> Result<()> {
        self.api
            .update_post(id, &PostPayload::from_draft(draft))
            .await
    }

    pub async fn delete(&self, id: PostId) -> Result<()> {
        self.api.delete_post(id).await
    }
}

pub fn normalize(remote: RemotePost) -> Post {
    Post {
        id: remote.id,
        content: remote.content,
        image_url: remote.image_url.unwrap_or_default(),
        author: remote.author,
        created_at: remote.created_at,
        updated_at: remote.updated_at,
        likes: remote.likes.unwrap_or(0),
        comments: remote.comments.unwrap_or_default(),
    }
}
