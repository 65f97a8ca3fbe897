//! Per-run mutable state owned by the run loop

/// Where the cast cycle is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Nothing cast yet; the first cast is checked for an error banner
    #[default]
    Initial,
    Working,
}

#[derive(Debug, Clone, Default)]
pub struct RuntimeState {
    pub status: Status,
}

impl RuntimeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_working(&self) -> bool {
        self.status == Status::Working
    }
}
