/// UI state of one form's submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SubmissionState {
    /// Editable and ready to submit (possibly showing field errors).
    #[default]
    Idle,
    /// One request is in flight; submit is disabled.
    Submitting,
    /// The last submit succeeded; the success banner is showing.
    Succeeded,
}

impl SubmissionState {
    /// Returns `true` if a submit may start from this state.
    pub fn can_submit(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
