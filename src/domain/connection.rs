/// Lifecycle of the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotState {
    /// Consuming events from the live stream.
    #[default]
    Listening,
    /// The stream closed; no further events will be handled.
    Terminated,
}

impl BotState {
    #[must_use]
    pub const fn is_listening(self) -> bool {
        matches!(self, Self::Listening)
    }
}

impl std::fmt::Display for BotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Listening => write!(f, "Listening"),
            Self::Terminated => write!(f, "Terminated"),
        }
    }
}
