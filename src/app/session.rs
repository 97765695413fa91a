use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::app::compose::{self, Submission};
use crate::app::deletion::{self, DeleteState};
use crate::app::engagement;
use crate::app::feed::FeedRepository;
use crate::app::likes::LikedPosts;
use crate::domain::flags::{FlagKey, UiFlags};
use crate::domain::form::{FormError, FormField, Intent, PostForm};
use crate::domain::post::{Post, PostId};
use crate::infra::prefs::PreferenceStore;

/// Result of a remote call, sent back to the session when the spawned request
/// finishes. Failures have already been logged by the task.
#[derive(Debug, Clone)]
pub enum Completion {
    Fetched(Option<Vec<Post>>),
    Created { ok: bool },
    Updated { id: PostId, ok: bool },
    Deleted { id: PostId, ok: bool },
}

/// One post as the feed presents it.
#[derive(Debug, Clone, Copy)]
pub struct PostView<'a> {
    pub post: &'a Post,
    pub liked: bool,
    pub edited: bool,
    pub comment_box_open: bool,
    pub menu_open: bool,
    pub delete_pending: bool,
    pub comment_input: &'a str,
}

/// Owns all client state for one session and routes user actions.
///
/// Remote calls are spawned on the current tokio runtime and never awaited by
/// the action that issued them. Their completions are applied in arrival order
/// through [`FeedSession::next_completion`], so the last fetch to arrive wins.
pub struct FeedSession {
    repo: Arc<FeedRepository>,
    posts: Vec<Post>,
    likes: LikedPosts,
    form: PostForm,
    flags: UiFlags,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl FeedSession {
    pub fn new(repo: FeedRepository, likes: LikedPosts) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            repo: Arc::new(repo),
            posts: Vec::new(),
            likes,
            form: PostForm::default(),
            flags: UiFlags::default(),
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    /// Reads the liked set once from `store`; an unreadable value starts empty.
    pub fn open(repo: FeedRepository, store: Arc<dyn PreferenceStore>) -> Self {
        Self::new(repo, LikedPosts::load_or_empty(store))
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn form(&self) -> &PostForm {
        &self.form
    }

    pub fn flags(&self) -> &UiFlags {
        &self.flags
    }

    pub fn likes(&self) -> &LikedPosts {
        &self.likes
    }

    pub fn is_liked(&self, id: PostId) -> bool {
        self.likes.contains(id)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn view(&self) -> Vec<PostView<'_>> {
        self.posts
            .iter()
            .map(|post| PostView {
                post,
                liked: self.likes.contains(post.id),
                edited: post.is_edited(),
                comment_box_open: self.flags.is_set(FlagKey::CommentBox(post.id)),
                menu_open: self.flags.open_menu() == Some(post.id),
                delete_pending: deletion::state(&self.flags, post.id)
                    == DeleteState::ConfirmPending,
                comment_input: self.flags.comment_input(post.id),
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Local-only actions
    // ------------------------------------------------------------------

    pub fn toggle_like(&mut self, id: PostId) -> bool {
        engagement::toggle_like(&mut self.posts, &mut self.likes, id)
    }

    pub fn toggle_comment_box(&mut self, id: PostId) -> bool {
        engagement::toggle_comment_box(&mut self.flags, id)
    }

    pub fn set_comment_input(&mut self, id: PostId, text: impl Into<String>) {
        self.flags.set_comment_input(id, text);
    }

    pub fn add_comment(&mut self, id: PostId, text: &str) -> bool {
        engagement::add_comment(&mut self.posts, id, text)
    }

    pub fn submit_comment(&mut self, id: PostId) -> bool {
        engagement::submit_comment(&mut self.posts, &mut self.flags, id)
    }

    pub fn toggle_menu(&mut self, id: PostId) {
        self.flags.toggle_menu(id);
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    /// Returns false when `id` is not in the current collection.
    pub fn begin_edit(&mut self, id: PostId) -> bool {
        match self.posts.iter().find(|post| post.id == id) {
            Some(post) => {
                compose::begin_edit(&mut self.form, &mut self.flags, post);
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.form.reset();
    }

    pub fn request_delete(&mut self, id: PostId) {
        deletion::request(&mut self.flags, id);
    }

    pub fn cancel_delete(&mut self, id: PostId) {
        deletion::cancel(&mut self.flags, id);
    }

    pub fn delete_state(&self, id: PostId) -> DeleteState {
        deletion::state(&self.flags, id)
    }

    // ------------------------------------------------------------------
    // Remote-backed actions
    // ------------------------------------------------------------------

    pub fn load(&mut self) {
        self.spawn_fetch();
    }

    /// Issues a create or update depending on the form's intent and resets the
    /// form. Nothing is sent when a required field is blank.
    pub fn submit(&mut self) -> Result<Intent, FormError> {
        let submission = compose::resolve(&mut self.form)?;
        let intent = submission.intent();
        self.spawn_submission(submission);
        Ok(intent)
    }

    /// Issues the delete for a post awaiting confirmation. Returns false, and
    /// sends nothing, when no confirmation is pending for `id`.
    pub fn confirm_delete(&mut self, id: PostId) -> bool {
        if !deletion::can_confirm(&self.flags, id) {
            debug!(post_id = id, "delete confirmed without a pending request");
            return false;
        }
        self.spawn_delete(id);
        true
    }

    // ------------------------------------------------------------------
    // Completions
    // ------------------------------------------------------------------

    /// Waits for the next outstanding request to finish and applies it.
    /// Returns `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.completions_rx.recv().await?;
        self.in_flight -= 1;
        self.apply(&completion);
        Some(completion)
    }

    /// Applies completions until no request is outstanding, including the
    /// fetches that remote-backed mutations trigger.
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    fn apply(&mut self, completion: &Completion) {
        match completion {
            Completion::Fetched(Some(posts)) => {
                debug!(count = posts.len(), "feed replaced");
                self.posts = posts.clone();
            }
            Completion::Fetched(None) => {}
            Completion::Created { .. } | Completion::Updated { .. } => self.spawn_fetch(),
            Completion::Deleted { id, .. } => {
                deletion::complete(&mut self.flags, *id);
                self.spawn_fetch();
            }
        }
    }

    fn spawn_fetch(&mut self) {
        let repo = self.repo.clone();
        let tx = self.completions_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let posts = match repo.fetch_all().await {
                Ok(posts) => Some(posts),
                Err(err) => {
                    warn!(error = ?err, "failed to fetch posts");
                    None
                }
            };
            let _ = tx.send(Completion::Fetched(posts));
        });
    }

    fn spawn_submission(&mut self, submission: Submission) {
        let repo = self.repo.clone();
        let tx = self.completions_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let completion = match submission {
                Submission::Create(draft) => {
                    let ok = match repo.create(&draft).await {
                        Ok(()) => true,
                        Err(err) => {
                            warn!(error = ?err, "failed to create post");
                            false
                        }
                    };
                    Completion::Created { ok }
                }
                Submission::Update(id, draft) => {
                    let ok = match repo.update(id, &draft).await {
                        Ok(()) => true,
                        Err(err) => {
                            warn!(error = ?err, post_id = id, "failed to update post");
                            false
                        }
                    };
                    Completion::Updated { id, ok }
                }
            };
            let _ = tx.send(completion);
        });
    }

    fn spawn_delete(&mut self, id: PostId) {
        let repo = self.repo.clone();
        let tx = self.completions_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let ok = match repo.delete(id).await {
                Ok(()) => true,
                Err(err) => {
                    warn!(error = ?err, post_id = id, "failed to delete post");
                    false
                }
            };
            let _ = tx.send(Completion::Deleted { id, ok });
        });
    }
}
