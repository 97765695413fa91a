use anyhow::{anyhow, Result};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use url::Url;

use crate::domain::post::{PostDraft, PostId};

/// A post exactly as the remote service returns it. Counters the service does
/// not track come back missing or null.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePost {
    pub id: PostId,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub author: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(default)]
    pub likes: Option<i64>,
    #[serde(default)]
    pub comments: Option<Vec<String>>,
}

/// Body of create and update requests.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload<'a> {
    pub content: &'a str,
    pub author: &'a str,
    pub image_url: &'a str,
    pub likes: i64,
    pub comments: &'a [String],
}

impl<'a> PostPayload<'a> {
    pub fn from_draft(draft: &'a PostDraft) -> Self {
        Self {
            content: &draft.content,
            author: &draft.author,
            image_url: &draft.image_url,
            likes: 0,
            comments: &[],
        }
    }
}

#[derive(Clone)]
pub struct FeedApiClient {
    http: Client,
    base_url: Url,
}

impl FeedApiClient {
    pub fn new(base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("feed api url cannot be a base: {}", base_url));
        }
        let http = Client::builder().build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn list_posts(&self) -> Result<Vec<RemotePost>> {
        let response = self.http.get(self.posts_url(None)?).send().await?;
        let posts = ensure_success(response)?.json::<Vec<RemotePost>>().await?;
        Ok(posts)
    }

    pub async fn create_post(&self, payload: &PostPayload<'_>) -> Result<()> {
        let response = self
            .http
            .post(self.posts_url(None)?)
            .json(payload)
            .send()
            .await?;
        ensure_success(response)?;
        Ok(())
    }

    pub async fn update_post(&self, id: PostId, payload: &PostPayload<'_>) -> Result<()> {
        let response = self
            .http
            .put(self.posts_url(Some(id))?)
            .json(payload)
            .send()
            .await?;
        ensure_success(response)?;
        Ok(())
    }

    pub async fn delete_post(&self, id: PostId) -> Result<()> {
        let response = self.http.delete(self.posts_url(Some(id))?).send().await?;
        ensure_success(response)?;
        Ok(())
    }

    fn posts_url(&self, id: Option<PostId>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow!("feed api url cannot be a base: {}", self.base_url))?;
            segments.pop_if_empty().push("posts");
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        Ok(url)
    }
}

fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("feed api {} returned {}", response.url(), status));
    }
    Ok(response)
}
