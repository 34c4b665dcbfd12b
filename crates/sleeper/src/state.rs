use std::fmt;

/// Lifecycle of a sleeper task.
///
/// `Created → Running → Stopped`. `Running` is entered at most once and
/// `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Created,
    Running,
    Stopped,
}

impl TaskState {
    /// Transition to `Running`. Only valid from `Created`.
    pub(crate) fn start(&mut self) -> bool {
        match self {
            Self::Created => {
                *self = Self::Running;
                true
            }
            Self::Running | Self::Stopped => false,
        }
    }

    /// Transition to `Stopped`. Only valid from `Running`.
    pub(crate) fn stop(&mut self) -> bool {
        match self {
            Self::Running => {
                *self = Self::Stopped;
                true
            }
            Self::Created | Self::Stopped => false,
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut state = TaskState::Created;
        assert!(!state.stop());
        assert_eq!(state, TaskState::Created);

        assert!(state.start());
        assert_eq!(state, TaskState::Running);
        assert!(!state.start());

        assert!(state.stop());
        assert_eq!(state, TaskState::Stopped);
        assert!(!state.stop());
        assert!(!state.start());
        assert_eq!(state, TaskState::Stopped);
    }
}
