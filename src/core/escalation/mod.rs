// Emergency escalation module.
//
// Architecture:
// - session.rs: tick-based AlertSession state machine (pure, clock-free)
// - capability.rs: call-placement and alert-tone seams
// - controller.rs: session lifecycle over real capabilities

pub mod capability;
pub mod controller;
pub mod session;
