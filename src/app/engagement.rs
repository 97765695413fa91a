//! Local-only engagement. Nothing here talks to the remote service; the
//! effects last until the next feed fetch replaces the collection.

use crate::app::likes::LikedPosts;
use crate::domain::flags::{FlagKey, UiFlags};
use crate::domain::post::{Post, PostId};

/// Flips the like on `id` and moves its counter by one in the same step.
/// Returns whether the post is now liked.
pub fn toggle_like(posts: &mut [Post], liked: &mut LikedPosts, id: PostId) -> bool {
    let now_liked = liked.toggle(id);
    let delta = if now_liked { 1 } else { -1 };
    if let Some(post) = posts.iter_mut().find(|post| post.id == id) {
        post.likes += delta;
    }
    now_liked
}

/// Appends the trimmed comment. Blank input is ignored and returns false.
pub fn add_comment(posts: &mut [Post], id: PostId, text: &str) -> bool {
    let comment = text.trim();
    if comment.is_empty() {
        return false;
    }
    match posts.iter_mut().find(|post| post.id == id) {
        Some(post) => {
            post.comments.push(comment.to_string());
            true
        }
        None => false,
    }
}

/// Posts the comment typed into the box of `id`. On success the draft is
/// cleared and the box closed; otherwise nothing changes.
pub fn submit_comment(posts: &mut [Post], flags: &mut UiFlags, id: PostId) -> bool {
    let text = flags.comment_input(id).to_string();
    if !add_comment(posts, id, &text) {
        return false;
    }
    flags.clear_comment_input(id);
    flags.clear(FlagKey::CommentBox(id));
    true
}

pub fn toggle_comment_box(flags: &mut UiFlags, id: PostId) -> bool {
    flags.toggle(FlagKey::CommentBox(id))
}
