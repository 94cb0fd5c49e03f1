//! Shared-passphrase check guarding every command.

use thiserror::Error;

/// Passphrase used when none is configured.
pub const DEFAULT_PASSPHRASE: &str = "admin";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid passphrase")]
    InvalidPassphrase,
}

/// Compares candidates against one configured passphrase.
#[derive(Clone)]
pub struct PassphraseGate {
    passphrase: String,
}

impl PassphraseGate {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    pub fn verify(&self, candidate: &str) -> bool {
        constant_time_eq(self.passphrase.as_bytes(), candidate.as_bytes())
    }

    /// Like [`verify`](Self::verify), but as a `Result` for `?` at call sites.
    pub fn require(&self, candidate: &str) -> Result<(), AuthError> {
        if self.verify(candidate) {
            Ok(())
        } else {
            tracing::warn!("passphrase rejected");
            Err(AuthError::InvalidPassphrase)
        }
    }
}

impl Default for PassphraseGate {
    fn default() -> Self {
        Self::new(DEFAULT_PASSPHRASE)
    }
}

// The configured passphrase must never reach logs.
impl core::fmt::Debug for PassphraseGate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PassphraseGate").finish_non_exhaustive()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gate_accepts_admin_only() {
        let gate = PassphraseGate::default();
        assert!(gate.verify("admin"));
        assert!(!gate.verify("Admin"));
        assert!(!gate.verify(""));
        assert!(!gate.verify("admin "));
    }

    #[test]
    fn require_reports_rejection() {
        let gate = PassphraseGate::new("s3cret");
        assert_eq!(gate.require("s3cret"), Ok(()));
        assert_eq!(gate.require("admin"), Err(AuthError::InvalidPassphrase));
    }

    #[test]
    fn debug_hides_passphrase() {
        let gate = PassphraseGate::new("s3cret");
        assert!(!format!("{gate:?}").contains("s3cret"));
    }
}
