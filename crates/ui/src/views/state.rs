/// User-facing failure categories. Details from the backend are shown
/// underneath the fixed message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Load,
    Submit,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Load => "Could not load this quiz.",
            Self::Submit => "Could not submit your answers. Please try again.",
        }
    }
}
