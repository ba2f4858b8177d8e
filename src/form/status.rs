use crate::state_enum;

state_enum! {
    /// Lifecycle of a form submission.
    ///
    /// `Success` returns to `Idle` on its own after the reset delay; `Error`
    /// persists until the next submission.
    pub enum FormStatus {
        Idle,
        Submitting,
        Success,
        Error,
    }
    error: [Error]
    busy: [Submitting]
}

impl Default for FormStatus {
    fn default() -> Self {
        Self::Idle
    }
}

impl FormStatus {
    /// Whether a submission may start from here.
    pub fn accepts_submit(&self) -> bool {
        matches!(self, Self::Idle | Self::Error)
    }
}
