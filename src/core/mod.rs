pub mod checkin;
pub mod config;
pub mod contacts;
pub mod datasets;
pub mod dialer;
pub mod escalation;
pub mod geo;
pub mod model;
pub mod tone;
