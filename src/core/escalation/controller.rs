//! Orchestrates alert sessions over the call and tone capabilities.

use anyhow::{anyhow, Result};
use log::{error, info, warn};

use crate::core::model::Coordinate;

use super::capability::{AlertTone, CallPlacer};
use super::session::{AlertSession, Effect, Phase};

/// Terminal outcome of a session, reported exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub marked_safe: bool,
}

type OutcomeCallback = Box<dyn FnMut(Outcome) + Send>;

/// Owns at most one live [`AlertSession`] and its capabilities. Each
/// controller holds its own tone handle, so two controllers cannot fight
/// over a shared player.
pub struct EscalationController<C: CallPlacer, T: AlertTone> {
    dialer: C,
    tone: T,
    emergency_number: String,
    session: Option<AlertSession>,
    on_closed: Option<OutcomeCallback>,
}

impl<C: CallPlacer, T: AlertTone> EscalationController<C, T> {
    pub fn new(dialer: C, tone: T, emergency_number: impl Into<String>) -> Self {
        Self {
            dialer,
            tone,
            emergency_number: emergency_number.into(),
            session: None,
            on_closed: None,
        }
    }

    /// Register the outcome callback. Invoked once per session, at the
    /// terminal transition or at `close()`.
    pub fn on_closed(&mut self, callback: impl FnMut(Outcome) + Send + 'static) {
        self.on_closed = Some(Box::new(callback));
    }

    /// Begin a new alert session. Errors while the previous session is
    /// still live; the trigger source must wait for its outcome.
    pub fn start(&mut self, location: Option<Coordinate>) -> Result<SessionHandle<'_, C, T>> {
        if self.session.is_some() {
            return Err(anyhow!("alert session already active"));
        }
        match location {
            Some(loc) => info!("alert session started at {:.4}, {:.4}", loc.lat, loc.lng),
            None => info!("alert session started without location"),
        }
        self.session = Some(AlertSession::new(location));
        Ok(SessionHandle { controller: self })
    }

    /// True while a session exists and has not reported its outcome.
    pub fn session_active(&self) -> bool {
        self.session.is_some()
    }

    /// Re-borrow the live session, if any. Lets a driving loop drop the
    /// handle between ticks without losing the session.
    pub fn handle(&mut self) -> Option<SessionHandle<'_, C, T>> {
        if self.session.is_some() {
            Some(SessionHandle { controller: self })
        } else {
            None
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartTone => {
                    if let Err(e) = self.tone.start() {
                        error!("failed to start alert tone: {}", e);
                    }
                }
                Effect::StopTone => self.tone.stop(),
                Effect::PlaceEmergencyCall => {
                    info!("SOS triggered, calling {}", self.emergency_number);
                    if let Err(e) = self.dialer.place_emergency_call(&self.emergency_number) {
                        // The phase change is authoritative regardless.
                        error!("emergency call to {} failed: {}", self.emergency_number, e);
                    }
                }
                Effect::Closed { marked_safe } => {
                    if marked_safe {
                        info!("session closed, user marked safe");
                    } else {
                        warn!("session closed without safety confirmation");
                    }
                    self.session = None;
                    if let Some(callback) = self.on_closed.as_mut() {
                        callback(Outcome { marked_safe });
                    }
                }
            }
        }
    }
}

/// Mutable view over the controller's live session. All methods are no-ops
/// once the session has closed.
pub struct SessionHandle<'a, C: CallPlacer, T: AlertTone> {
    controller: &'a mut EscalationController<C, T>,
}

macro_rules! forward_signal {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        pub fn $name(&mut self) {
            let effects = match self.controller.session.as_mut() {
                Some(session) => session.$name(),
                None => return,
            };
            self.controller.apply(effects);
        }
    };
}

impl<C: CallPlacer, T: AlertTone> SessionHandle<'_, C, T> {
    /// Advance the session by one tick.
    pub fn tick(&mut self) {
        let effects = match self.controller.session.as_mut() {
            Some(session) => session.tick(),
            None => return,
        };
        self.controller.apply(effects);
    }

    forward_signal!(
        /// "I'm safe" response to the countdown.
        signal_safe
    );
    forward_signal!(
        /// Proactive distress signal; sounds the alarm immediately.
        signal_need_help
    );
    forward_signal!(
        /// Stop the alarm and confirm safety.
        signal_stop_alarm
    );
    forward_signal!(
        /// Place the emergency call now.
        signal_trigger_sos
    );
    forward_signal!(
        /// Tear the session down, cancelling all timers.
        close
    );

    pub fn phase(&self) -> Option<Phase> {
        self.controller.session.as_ref().map(AlertSession::phase)
    }

    pub fn is_closed(&self) -> bool {
        self.controller.session.is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::super::capability::{CallError, ToneError};
    use super::*;

    #[derive(Clone, Default)]
    struct RecordingDialer {
        calls: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl CallPlacer for RecordingDialer {
        fn place_emergency_call(&mut self, number: &str) -> Result<(), CallError> {
            self.calls.lock().unwrap().push(number.to_string());
            if self.fail {
                Err(CallError::Failed {
                    number: number.to_string(),
                    reason: "line busy".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[derive(Clone, Default)]
    struct RecordingTone {
        starts: Arc<Mutex<u32>>,
        stops: Arc<Mutex<u32>>,
        fail_start: bool,
    }

    impl AlertTone for RecordingTone {
        fn start(&mut self) -> Result<(), ToneError> {
            *self.starts.lock().unwrap() += 1;
            if self.fail_start {
                Err(ToneError::OutputUnavailable("no device".to_string()))
            } else {
                Ok(())
            }
        }

        fn stop(&mut self) {
            *self.stops.lock().unwrap() += 1;
        }
    }

    fn controller(
        dialer: RecordingDialer,
        tone: RecordingTone,
    ) -> EscalationController<RecordingDialer, RecordingTone> {
        EscalationController::new(dialer, tone, "112")
    }

    #[test]
    fn test_auto_escalation_places_one_call() {
        let dialer = RecordingDialer::default();
        let tone = RecordingTone::default();
        let mut ctrl = controller(dialer.clone(), tone.clone());

        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let sink = outcomes.clone();
        ctrl.on_closed(move |o| sink.lock().unwrap().push(o));

        let mut handle = ctrl.start(None).unwrap();
        for _ in 0..50 {
            handle.tick();
        }
        assert!(handle.is_closed());

        assert_eq!(dialer.calls.lock().unwrap().as_slice(), ["112"]);
        assert_eq!(*tone.starts.lock().unwrap(), 1);
        assert!(*tone.stops.lock().unwrap() >= 1);
        assert_eq!(
            outcomes.lock().unwrap().as_slice(),
            [Outcome { marked_safe: false }]
        );
    }

    #[test]
    fn test_marked_safe_outcome_once_no_call() {
        let dialer = RecordingDialer::default();
        let tone = RecordingTone::default();
        let mut ctrl = controller(dialer.clone(), tone.clone());

        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let sink = outcomes.clone();
        ctrl.on_closed(move |o| sink.lock().unwrap().push(o));

        let mut handle = ctrl.start(None).unwrap();
        for _ in 0..5 {
            handle.tick();
        }
        handle.signal_safe();
        handle.tick();
        assert!(handle.is_closed());

        // Ticks after close stay silent.
        for _ in 0..60 {
            handle.tick();
        }

        assert!(dialer.calls.lock().unwrap().is_empty());
        assert_eq!(
            outcomes.lock().unwrap().as_slice(),
            [Outcome { marked_safe: true }]
        );
    }

    #[test]
    fn test_call_failure_does_not_block_transition() {
        let dialer = RecordingDialer {
            fail: true,
            ..RecordingDialer::default()
        };
        let tone = RecordingTone::default();
        let mut ctrl = controller(dialer.clone(), tone);

        let mut handle = ctrl.start(None).unwrap();
        for _ in 0..30 {
            handle.tick();
        }
        handle.signal_trigger_sos();

        // Call failed, transition happened anyway and no retry occurred.
        assert!(handle.is_closed());
        assert_eq!(dialer.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_tone_stop_follows_failed_start() {
        let tone = RecordingTone {
            fail_start: true,
            ..RecordingTone::default()
        };
        let mut ctrl = controller(RecordingDialer::default(), tone.clone());

        let mut handle = ctrl.start(None).unwrap();
        handle.signal_need_help();
        handle.close();

        assert_eq!(*tone.starts.lock().unwrap(), 1);
        assert!(*tone.stops.lock().unwrap() >= 1);
    }

    #[test]
    fn test_start_rejected_while_session_live() {
        let mut ctrl = controller(RecordingDialer::default(), RecordingTone::default());
        {
            let mut handle = ctrl.start(None).unwrap();
            handle.tick();
        }
        assert!(ctrl.start(None).is_err());
    }

    #[test]
    fn test_start_allowed_after_close() {
        let mut ctrl = controller(RecordingDialer::default(), RecordingTone::default());
        {
            let mut handle = ctrl.start(None).unwrap();
            handle.close();
            assert!(handle.is_closed());
        }
        assert!(ctrl.start(None).is_ok());
    }
}
