//! Siren tone playback.
//!
//! A generated two-pitch sweep fed into a rodio sink. The sink lives on a
//! dedicated thread because rodio's output types are not Send; the handle
//! owns the thread's command channel, so each handle controls exactly one
//! tone and nothing else.

use std::f32::consts::PI;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use log::{error, info};
use rodio::{OutputStream, Sink, Source};

use super::escalation::capability::{AlertTone, ToneError};

/// Infinite siren: sine wave sweeping between two pitches, roughly a
/// police-siren contour.
pub struct SirenWave {
    sample_rate: u32,
    num_sample: usize,
}

const LOW_HZ: f32 = 650.0;
const HIGH_HZ: f32 = 1250.0;
const SWEEP_HZ: f32 = 0.7;

impl SirenWave {
    pub fn new() -> Self {
        Self {
            sample_rate: 44100,
            num_sample: 0,
        }
    }
}

impl Default for SirenWave {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for SirenWave {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        self.num_sample = self.num_sample.wrapping_add(1);
        let t = self.num_sample as f32 / self.sample_rate as f32;

        // Triangle sweep between the two pitches.
        let phase = (t * SWEEP_HZ).fract();
        let blend = if phase < 0.5 { phase * 2.0 } else { 2.0 - phase * 2.0 };
        let freq = LOW_HZ + (HIGH_HZ - LOW_HZ) * blend;

        Some((2.0 * PI * freq * t).sin() * 0.6)
    }
}

impl Source for SirenWave {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

enum ToneCommand {
    Start,
    Stop,
}

/// Rodio-backed [`AlertTone`]. Spawns its audio thread lazily on first
/// start; a machine with no audio device reports the failure and the
/// session carries on without sound.
pub struct SirenTone {
    tx: Option<Sender<ToneCommand>>,
}

impl SirenTone {
    pub fn new() -> Self {
        Self { tx: None }
    }

    fn ensure_thread(&mut self) -> Result<Sender<ToneCommand>, ToneError> {
        if let Some(tx) = &self.tx {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<ToneCommand>();
        let spawned = thread::Builder::new()
            .name("siren-tone".to_string())
            .spawn(move || {
                // Stream must outlive the sink; both stay on this thread.
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        ToneCommand::Start => {
                            if let Some(old) = sink.take() {
                                old.stop();
                            }
                            match OutputStream::try_default() {
                                Ok((s, handle)) => match Sink::try_new(&handle) {
                                    Ok(new_sink) => {
                                        new_sink.append(SirenWave::new());
                                        _stream = Some(s);
                                        sink = Some(new_sink);
                                    }
                                    Err(e) => error!("failed to create audio sink: {}", e),
                                },
                                Err(e) => error!("failed to open audio output: {}", e),
                            }
                        }
                        ToneCommand::Stop => {
                            if let Some(old) = sink.take() {
                                old.stop();
                            }
                            _stream = None;
                        }
                    }
                }
            });

        match spawned {
            Ok(_) => {
                self.tx = Some(tx.clone());
                Ok(tx)
            }
            Err(e) => Err(ToneError::OutputUnavailable(e.to_string())),
        }
    }
}

impl Default for SirenTone {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertTone for SirenTone {
    fn start(&mut self) -> Result<(), ToneError> {
        let tx = self.ensure_thread()?;
        info!("starting alert siren");
        tx.send(ToneCommand::Start)
            .map_err(|e| ToneError::OutputUnavailable(e.to_string()))
    }

    fn stop(&mut self) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(ToneCommand::Stop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_siren_wave_stays_in_range() {
        let wave = SirenWave::new();
        for sample in wave.take(44100) {
            assert!(sample.abs() <= 1.0);
        }
    }

    #[test]
    fn test_siren_wave_is_mono_infinite() {
        let wave = SirenWave::new();
        assert_eq!(wave.channels(), 1);
        assert_eq!(wave.sample_rate(), 44100);
        assert!(wave.total_duration().is_none());
    }

    #[test]
    fn test_stop_without_start_is_safe() {
        let mut tone = SirenTone::new();
        tone.stop();
    }
}
