//! Tick-based state machine for a single emergency-alert session.
//!
//! The session never reads a clock. Callers deliver discrete 1-unit ticks
//! via [`AlertSession::tick`] and user signals via the `signal_*` methods;
//! every method returns the side effects the transition demands as plain
//! values. The controller maps those onto real capabilities, which keeps
//! this module total and deterministic under test.

use serde::{Deserialize, Serialize};

use crate::core::model::Coordinate;

/// Ticks the user has to respond before the alarm starts.
pub const RESPONSE_TICKS: u32 = 30;
/// Ticks of active alarm before the SOS call is placed automatically.
pub const AUTO_SOS_TICKS: u32 = 20;
/// Tone auto-stop when the alarm was reached by the response countdown expiring.
pub const TONE_TIMEOUT_EXPIRY_TICKS: u32 = 20;
/// Tone auto-stop on the proactive "I need help" path. Deliberately not equal
/// to `TONE_TIMEOUT_EXPIRY_TICKS`; both literal values are load-bearing.
pub const TONE_TIMEOUT_HELP_TICKS: u32 = 30;
/// Delay between "I'm safe" and the outcome report.
pub const SAFE_SETTLE_TICKS: u32 = 1;

/// Lifecycle phase of an alert session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Waiting for the user to respond to "are you safe?".
    Pending,
    /// Alarm sounding; auto-SOS countdown running.
    AlarmActive,
    /// User confirmed safety. Terminal.
    MarkedSafe,
    /// Emergency call placed, manually or by timeout. Terminal.
    SosPlaced,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::MarkedSafe | Self::SosPlaced)
    }
}

/// Side effect requested by a transition. Ordering within the returned
/// list is the order the controller must apply them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartTone,
    StopTone,
    /// Place the emergency call. Emitted exactly once per session.
    PlaceEmergencyCall,
    /// Session is done; report the outcome. Emitted exactly once per session.
    Closed { marked_safe: bool },
}

pub struct AlertSession {
    phase: Phase,
    response_remaining: u32,
    auto_sos_remaining: u32,
    tone_active: bool,
    /// Ticks until the tone auto-stops, while it is playing.
    tone_timeout: Option<u32>,
    /// Ticks until the marked-safe outcome is reported.
    safe_settle: Option<u32>,
    location: Option<Coordinate>,
    closed_reported: bool,
}

impl AlertSession {
    pub fn new(location: Option<Coordinate>) -> Self {
        Self {
            phase: Phase::Pending,
            response_remaining: RESPONSE_TICKS,
            auto_sos_remaining: AUTO_SOS_TICKS,
            tone_active: false,
            tone_timeout: None,
            safe_settle: None,
            location,
            closed_reported: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn response_remaining(&self) -> u32 {
        self.response_remaining
    }

    pub fn auto_sos_remaining(&self) -> u32 {
        self.auto_sos_remaining
    }

    pub fn tone_active(&self) -> bool {
        self.tone_active
    }

    pub fn tone_timeout_remaining(&self) -> Option<u32> {
        self.tone_timeout
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }

    /// True once the outcome has been reported; no further effect can occur.
    pub fn is_closed(&self) -> bool {
        self.closed_reported
    }

    /// Advance the session by one tick. Total: cannot fail, and every
    /// countdown clamps at zero instead of going negative. Ticks after the
    /// outcome report are no-ops, so a dangling timer cannot re-fire an
    /// already-handled transition.
    pub fn tick(&mut self) -> Vec<Effect> {
        if self.closed_reported {
            return Vec::new();
        }

        let mut effects = Vec::new();

        // Pending marked-safe report settles first.
        if let Some(settle) = self.safe_settle {
            let settle = settle.saturating_sub(1);
            if settle == 0 {
                self.safe_settle = None;
                effects.push(self.close_with(true));
            } else {
                self.safe_settle = Some(settle);
            }
            return effects;
        }

        match self.phase {
            Phase::Pending => {
                self.response_remaining = self.response_remaining.saturating_sub(1);
                if self.response_remaining == 0 {
                    effects.extend(self.enter_alarm(TONE_TIMEOUT_EXPIRY_TICKS));
                }
            }
            Phase::AlarmActive => {
                self.auto_sos_remaining = self.auto_sos_remaining.saturating_sub(1);
                if self.auto_sos_remaining == 0 {
                    effects.push(Effect::PlaceEmergencyCall);
                    self.phase = Phase::SosPlaced;
                    effects.extend(self.silence_tone());
                    effects.push(self.close_with(false));
                    return effects;
                }

                // Tone timeout runs independently of the auto-SOS countdown.
                if let Some(timeout) = self.tone_timeout {
                    let timeout = timeout.saturating_sub(1);
                    if timeout == 0 {
                        self.tone_timeout = None;
                        effects.extend(self.silence_tone());
                    } else {
                        self.tone_timeout = Some(timeout);
                    }
                }
            }
            Phase::MarkedSafe | Phase::SosPlaced => {}
        }

        effects
    }

    /// User answered "I'm safe" during the response countdown.
    pub fn signal_safe(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Pending || self.safe_settle.is_some() {
            return Vec::new();
        }
        self.phase = Phase::MarkedSafe;
        self.auto_sos_remaining = AUTO_SOS_TICKS;
        self.safe_settle = Some(SAFE_SETTLE_TICKS);
        Vec::new()
    }

    /// User asked for help without waiting out the countdown. The tone
    /// starts immediately and the alarm-phase countdowns arm as usual,
    /// except the tone timeout is the longer "help" value.
    pub fn signal_need_help(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Pending || self.safe_settle.is_some() {
            return Vec::new();
        }
        self.enter_alarm(TONE_TIMEOUT_HELP_TICKS)
    }

    /// User stopped the alarm and confirmed safety.
    pub fn signal_stop_alarm(&mut self) -> Vec<Effect> {
        if self.phase != Phase::AlarmActive {
            return Vec::new();
        }
        self.phase = Phase::MarkedSafe;
        self.auto_sos_remaining = AUTO_SOS_TICKS;
        let mut effects = self.silence_tone();
        effects.push(self.close_with(true));
        effects
    }

    /// User requested the SOS call directly.
    pub fn signal_trigger_sos(&mut self) -> Vec<Effect> {
        if self.phase != Phase::AlarmActive {
            return Vec::new();
        }
        self.phase = Phase::SosPlaced;
        let mut effects = vec![Effect::PlaceEmergencyCall];
        effects.extend(self.silence_tone());
        effects.push(self.close_with(false));
        effects
    }

    /// Hosting surface went away. Cancels every countdown; reports a
    /// not-marked-safe outcome if none was reported yet.
    pub fn close(&mut self) -> Vec<Effect> {
        if self.closed_reported {
            return Vec::new();
        }
        self.safe_settle = None;
        self.tone_timeout = None;
        let marked_safe = self.phase == Phase::MarkedSafe;
        let mut effects = self.silence_tone();
        effects.push(self.close_with(marked_safe));
        effects
    }

    fn enter_alarm(&mut self, tone_timeout: u32) -> Vec<Effect> {
        self.phase = Phase::AlarmActive;
        self.auto_sos_remaining = AUTO_SOS_TICKS;
        self.tone_active = true;
        self.tone_timeout = Some(tone_timeout);
        vec![Effect::StartTone]
    }

    /// Stop the tone if it is playing. Terminal transitions call this
    /// unconditionally so the stop request reaches the capability even when
    /// the earlier start failed.
    fn silence_tone(&mut self) -> Vec<Effect> {
        self.tone_active = false;
        self.tone_timeout = None;
        vec![Effect::StopTone]
    }

    fn close_with(&mut self, marked_safe: bool) -> Effect {
        self.closed_reported = true;
        Effect::Closed { marked_safe }
    }
}
