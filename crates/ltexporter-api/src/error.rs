use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the `ltexporter-api` crate.
///
/// Covers every failure a management session can report back to a caller:
/// device-side rejections, transport breakage, and fixture loading for the
/// replay session. `ltexporter-core` wraps these into `CoreError::Transport`.
#[derive(Debug, Error)]
pub enum Error {
    // ── Device replies ──────────────────────────────────────────────
    /// The device rejected the command (`!trap` sentence).
    #[error("Device trap{}: {message}", .category.map(|c| format!(" (category {c})")).unwrap_or_default())]
    Trap {
        category: Option<u8>,
        message: String,
    },

    /// The device closed the session with a `!fatal` sentence.
    #[error("Device fatal: {message}")]
    Fatal { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// The session was closed underneath the caller.
    #[error("Session closed")]
    ConnectionClosed,

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Socket-level I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ── Replay fixtures ─────────────────────────────────────────────
    /// A replay fixture could not be read or is structurally invalid.
    #[error("Invalid replay fixture {}: {message}", .path.display())]
    Fixture { path: PathBuf, message: String },

    /// Reply payload could not be decoded.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// Nothing in this workspace retries; transport failures are logged with
    /// this flag.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::ConnectionClosed => true,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Returns `true` if the device itself rejected the command.
    pub fn is_trap(&self) -> bool {
        matches!(self, Self::Trap { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trap_display_includes_category() {
        let err = Error::Trap {
            category: Some(2),
            message: "no such item".into(),
        };
        assert_eq!(err.to_string(), "Device trap (category 2): no such item");
    }

    #[test]
    fn trap_display_without_category() {
        let err = Error::Trap {
            category: None,
            message: "no such command".into(),
        };
        assert_eq!(err.to_string(), "Device trap: no such command");
        assert!(err.is_trap());
        assert!(!err.is_transient());
    }

    #[test]
    fn timeouts_and_resets_are_transient() {
        assert!(Error::Timeout { timeout_secs: 5 }.is_transient());
        assert!(Error::ConnectionClosed.is_transient());
        let reset = Error::Io(std::io::Error::from(std::io::ErrorKind::ConnectionReset));
        assert!(reset.is_transient());
        let denied = Error::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(!denied.is_transient());
    }
}
