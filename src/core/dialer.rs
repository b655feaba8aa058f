//! Emergency call placement.
//!
//! The library does not own a telephony stack; it hands a `tel:` URI to the
//! platform opener and treats the attempt as fire-and-forget. No retry on
//! failure, the escalation phase change stands either way.

use std::process::Command;

use log::{info, warn};

use super::escalation::capability::{CallError, CallPlacer};

fn tel_uri(number: &str) -> String {
    format!("tel:{}", number.trim())
}

/// Dialer that asks the desktop opener to handle a `tel:` URI.
pub struct TelUriDialer;

impl CallPlacer for TelUriDialer {
    fn place_emergency_call(&mut self, number: &str) -> Result<(), CallError> {
        let uri = tel_uri(number);
        info!("placing emergency call via {}", uri);

        let opener = if cfg!(target_os = "macos") {
            "open"
        } else if cfg!(target_os = "windows") {
            "start"
        } else {
            "xdg-open"
        };

        match Command::new(opener).arg(&uri).spawn() {
            Ok(_) => Ok(()),
            Err(e) => Err(CallError::Failed {
                number: number.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Dialer that only logs. Used where no opener should run, e.g. the demo
/// binary on a headless machine.
pub struct LoggingDialer;

impl CallPlacer for LoggingDialer {
    fn place_emergency_call(&mut self, number: &str) -> Result<(), CallError> {
        warn!("EMERGENCY CALL (logged only): {}", tel_uri(number));
        Ok(())
    }
}
