//! Capability seams the escalation controller drives.
//!
//! Both capabilities are fire-and-forget: a failure is logged by the
//! controller and never blocks a phase transition.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CallError {
    #[error("no dialer available on this platform")]
    Unsupported,
    #[error("dialing {number} failed: {reason}")]
    Failed { number: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ToneError {
    #[error("audio output unavailable: {0}")]
    OutputUnavailable(String),
}

/// Places an emergency call to a dialed number.
pub trait CallPlacer {
    fn place_emergency_call(&mut self, number: &str) -> Result<(), CallError>;
}

/// Audible alert cue. `stop` is best-effort and must be safe to call
/// whether or not the matching `start` succeeded.
pub trait AlertTone {
    fn start(&mut self) -> Result<(), ToneError>;
    fn stop(&mut self);
}
