//! `stockroom-auth`: the single shared-passphrase gate.
//!
//! No sessions, no tokens, no rate limiting: a check either passes or it does
//! not.

pub mod gate;

pub use gate::{AuthError, PassphraseGate, DEFAULT_PASSPHRASE};
