//! # Access State
//!
//! Named states for the access control machine. Modeled as an explicit
//! enum rather than ad hoc flags so the Granted/Denied invariants stay
//! mechanically checkable.

use shared_types::AccessCode;

/// Session-scoped access state. Never persisted; recomputed from the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AccessState {
    /// Initial state, before the first store read.
    #[default]
    Unknown,
    /// A store read is in flight.
    Checking,
    /// The session is authorized; `code` is the current session pointer.
    Granted {
        /// The code backing this grant, in canonical form.
        code: AccessCode,
    },
    /// The session is not authorized.
    Denied,
}

impl AccessState {
    /// Whether the session is currently authorized.
    #[must_use]
    pub fn has_access(&self) -> bool {
        matches!(self, Self::Granted { .. })
    }

    /// Whether the initial check has not yet produced a terminal answer.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Unknown | Self::Checking)
    }

    /// The code backing the current grant, if any.
    #[must_use]
    pub fn current_code(&self) -> Option<&AccessCode> {
        match self {
            Self::Granted { code } => Some(code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_loading() {
        let state = AccessState::default();
        assert!(state.is_loading());
        assert!(!state.has_access());
        assert!(state.current_code().is_none());
    }

    #[test]
    fn test_checking_is_loading() {
        assert!(AccessState::Checking.is_loading());
    }

    #[test]
    fn test_granted_exposes_code() {
        let code = AccessCode::parse("AC-DEADBEEF-123456789").unwrap();
        let state = AccessState::Granted { code: code.clone() };

        assert!(state.has_access());
        assert!(!state.is_loading());
        assert_eq!(state.current_code(), Some(&code));
    }

    #[test]
    fn test_denied_is_terminal_without_access() {
        let state = AccessState::Denied;
        assert!(!state.has_access());
        assert!(!state.is_loading());
    }
}
