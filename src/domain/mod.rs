pub mod flags;
pub mod form;
pub mod post;
