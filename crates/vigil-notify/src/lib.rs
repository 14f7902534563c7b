//! vigil-notify — posts messages to a chat channel, best-effort.
//!
//! Delivery never fails the caller: a broken chat integration must not stop
//! an incident from being re-checked. Every failure mode (no credential,
//! transport error, non-success acknowledgment) is logged and folded into a
//! `false` return.

pub mod chat;
pub mod error;

pub use chat::{ChatNotifier, ChatSettings, Notifier};
pub use error::NotifyError;
