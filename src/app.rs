//! Runtime wiring: config, datasets, and the live check-in loop.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};
use tokio::time;

use crate::core::{
    checkin::CheckinScheduler,
    config::ConfigManager,
    contacts,
    datasets::{crime, disaster, schemes},
    dialer::LoggingDialer,
    escalation::controller::{EscalationController, Outcome},
    geo,
    model::Coordinate,
    tone::SirenTone,
};

pub async fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config_dir = std::env::var_os("RAKSHA_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let config_manager = ConfigManager::new(config_dir);
    let settings = config_manager.load();
    info!("settings loaded, data dir {:?}", settings.data_dir);

    // Dataset load. Every loader degrades gracefully, so a bare checkout
    // still comes up with the fallback sets.
    let schemes = schemes::load_schemes(&settings.data_dir.join("schemes.csv"));
    let crimes = crime::load_crime_csv(&settings.data_dir.join("crimes_against_women_2001-2014.csv"));
    let disasters = disaster::load_disasters(&settings.data_dir.join("disasters.csv"));
    info!(
        "loaded {} schemes, {} crime records, {} disaster records",
        schemes.len(),
        crimes.len(),
        disasters.len()
    );

    for record in crimes.iter().filter(|r| r.risk_level == crime::CrimeRisk::Critical) {
        let coord = match record.district.as_deref() {
            Some(district) => geo::district_coordinates(&record.state, district),
            None => geo::state_coordinates(&record.state),
        };
        warn!(
            "critical-risk region {} at {:.4}, {:.4} (dominant: {})",
            record.state, coord.lat, coord.lng, record.highest_crime_type
        );
    }

    for contact in contacts::all() {
        info!("emergency contact: {} {}", contact.name, contact.number);
    }

    let mut controller = EscalationController::new(
        LoggingDialer,
        SirenTone::new(),
        settings.emergency_number.clone(),
    );

    let last_outcome: Arc<Mutex<Option<Outcome>>> = Arc::new(Mutex::new(None));
    let outcome_sink = last_outcome.clone();
    controller.on_closed(move |outcome| {
        *outcome_sink.lock().unwrap() = Some(outcome);
    });

    let mut scheduler =
        CheckinScheduler::new(settings.checkin_interval_ticks, settings.checkin_enabled);

    // One tick per second. A live session consumes the tick; otherwise the
    // scheduler decides whether the next check is due.
    let mut interval = time::interval(Duration::from_secs(1));
    loop {
        interval.tick().await;

        if let Some(mut handle) = controller.handle() {
            handle.tick();
            if handle.is_closed() {
                if let Some(Outcome { marked_safe: true }) = last_outcome.lock().unwrap().take() {
                    scheduler.mark_safe();
                }
            }
        } else if scheduler.advance(1) {
            // Without a UI attached nothing answers the check, so the
            // session runs its fail-safe course: alarm, then auto-SOS.
            let location = Some(Coordinate::new(28.7041, 77.1025));
            if let Err(e) = controller.start(location) {
                warn!("could not start safety check: {}", e);
            }
        }
    }
}
