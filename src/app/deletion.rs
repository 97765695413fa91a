use crate::domain::flags::{FlagKey, UiFlags};
use crate::domain::post::PostId;

/// Delete confirmation for a single post. A confirmed delete stays
/// `ConfirmPending` until the request completes; the post then leaves the
/// collection with the next fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteState {
    Idle,
    ConfirmPending,
}

pub fn state(flags: &UiFlags, id: PostId) -> DeleteState {
    if flags.is_set(FlagKey::DeleteConfirm(id)) {
        DeleteState::ConfirmPending
    } else {
        DeleteState::Idle
    }
}

pub fn request(flags: &mut UiFlags, id: PostId) {
    flags.set(FlagKey::DeleteConfirm(id));
    flags.close_menu();
}

pub fn cancel(flags: &mut UiFlags, id: PostId) {
    flags.clear(FlagKey::DeleteConfirm(id));
}

/// Whether a confirm for `id` should issue the delete request.
pub fn can_confirm(flags: &UiFlags, id: PostId) -> bool {
    state(flags, id) == DeleteState::ConfirmPending
}

pub fn complete(flags: &mut UiFlags, id: PostId) {
    flags.clear(FlagKey::DeleteConfirm(id));
}
