use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::post::PostId;
use crate::infra::prefs::{PreferenceStore, PrefsError};

pub const LIKED_POSTS_KEY: &str = "likedPosts";

/// The set of posts the local user has liked, mirrored to a preference store
/// as a JSON array of ids.
pub struct LikedPosts {
    ids: BTreeSet<PostId>,
    store: Arc<dyn PreferenceStore>,
}

impl LikedPosts {
    pub fn load(store: Arc<dyn PreferenceStore>) -> Result<Self, PrefsError> {
        let ids = match store.get(LIKED_POSTS_KEY)? {
            Some(raw) => serde_json::from_slice::<Vec<PostId>>(&raw)
                .map_err(|e| PrefsError::Serialization(e.to_string()))?
                .into_iter()
                .collect(),
            None => BTreeSet::new(),
        };
        Ok(Self { ids, store })
    }

    /// Starts from an empty set when the stored value cannot be read.
    pub fn load_or_empty(store: Arc<dyn PreferenceStore>) -> Self {
        match Self::load(store.clone()) {
            Ok(likes) => likes,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read liked posts, starting empty");
                Self {
                    ids: BTreeSet::new(),
                    store,
                }
            }
        }
    }

    pub fn contains(&self, id: PostId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = PostId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flips membership of `id`, writes the set through, and returns whether
    /// the post is now liked. A failed write is logged; memory stays flipped.
    pub fn toggle(&mut self, id: PostId) -> bool {
        let now_liked = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };
        if let Err(err) = self.persist() {
            tracing::warn!(error = %err, post_id = id, "failed to persist liked posts");
        }
        now_liked
    }

    fn persist(&self) -> Result<(), PrefsError> {
        let ids: Vec<PostId> = self.ids.iter().copied().collect();
        let raw = serde_json::to_vec(&ids).map_err(|e| PrefsError::Serialization(e.to_string()))?;
        self.store.set(LIKED_POSTS_KEY, &raw)
    }
}
