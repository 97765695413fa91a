pub mod compose;
pub mod deletion;
pub mod engagement;
pub mod feed;
pub mod likes;
pub mod session;
