use std::collections::{HashMap, HashSet};

use crate::domain::post::PostId;

/// Per-post visibility toggles. The delete confirmation has its own variant so
/// it never shares a slot with the comment box of the same post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagKey {
    CommentBox(PostId),
    DeleteConfirm(PostId),
}

/// Transient, per-session UI state. Nothing in here is persisted.
#[derive(Debug, Clone, Default)]
pub struct UiFlags {
    visible: HashSet<FlagKey>,
    open_menu: Option<PostId>,
    comment_inputs: HashMap<PostId, String>,
}

impl UiFlags {
    pub fn is_set(&self, key: FlagKey) -> bool {
        self.visible.contains(&key)
    }

    pub fn set(&mut self, key: FlagKey) {
        self.visible.insert(key);
    }

    pub fn clear(&mut self, key: FlagKey) {
        self.visible.remove(&key);
    }

    /// Flips the flag and returns its new value.
    pub fn toggle(&mut self, key: FlagKey) -> bool {
        if self.visible.remove(&key) {
            false
        } else {
            self.visible.insert(key);
            true
        }
    }

    pub fn open_menu(&self) -> Option<PostId> {
        self.open_menu
    }

    // At most one author menu is open at a time.
    pub fn toggle_menu(&mut self, id: PostId) {
        self.open_menu = match self.open_menu {
            Some(open) if open == id => None,
            _ => Some(id),
        };
    }

    pub fn close_menu(&mut self) {
        self.open_menu = None;
    }

    pub fn comment_input(&self, id: PostId) -> &str {
        self.comment_inputs.get(&id).map(String::as_str).unwrap_or("")
    }

    pub fn set_comment_input(&mut self, id: PostId, text: impl Into<String>) {
        self.comment_inputs.insert(id, text.into());
    }

    pub fn clear_comment_input(&mut self, id: PostId) {
        self.comment_inputs.remove(&id);
    }
}
