use crate::domain::flags::UiFlags;
use crate::domain::form::{FormError, Intent, PostForm};
use crate::domain::post::{Post, PostDraft, PostId};

/// The remote call a form submit resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(PostDraft),
    Update(PostId, PostDraft),
}

impl Submission {
    pub fn intent(&self) -> Intent {
        match self {
            Self::Create(_) => Intent::Create,
            Self::Update(id, _) => Intent::Update(*id),
        }
    }
}

/// Loads `post` into the form for editing and closes the author menu it was
/// opened from.
pub fn begin_edit(form: &mut PostForm, flags: &mut UiFlags, post: &Post) {
    form.begin_edit(post);
    flags.close_menu();
}

/// Validates the form and turns it into a submission. The form is reset only
/// when validation passes.
pub fn resolve(form: &mut PostForm) -> Result<Submission, FormError> {
    form.validate()?;
    let submission = match form.take() {
        (Intent::Create, draft) => Submission::Create(draft),
        (Intent::Update(id), draft) => Submission::Update(id, draft),
    };
    Ok(submission)
}
