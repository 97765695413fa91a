pub mod app;
pub mod config;
pub mod domain;
pub mod infra;

pub use crate::app::session::{Completion, FeedSession, PostView};
pub use crate::domain::form::{FormError, FormField, Intent};
pub use crate::domain::post::{Post, PostDraft, PostId};
