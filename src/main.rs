//! Campus Survivors entry point
//!
//! Native builds run a headless session: the autopilot plays a full run at a
//! simulated frame rate and the outcome is logged. A renderer embeds the
//! library and drives [`campus_survivors::Driver`] itself.
//!
//! Usage: `campus-survivors [settings.json]` (verbosity via `RUST_LOG`).

use std::path::Path;

use campus_survivors::sim::{GameEvent, GamePhase};
use campus_survivors::{Driver, Key, Settings};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Campus Survivors (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let seed = settings.resolve_seed();
    log::info!("Seed: {}", seed);

    let mut driver = Driver::from_settings(&Settings {
        seed: Some(seed),
        ..settings.clone()
    });
    if !settings.autopilot {
        log::warn!("Autopilot disabled: the headless player will stand still");
    }

    // Press start
    driver.key_down(Key::Space);
    driver.frame(0.0);
    driver.key_up(Key::Space);

    let frame_dt = 1.0 / settings.frame_rate;
    let mut next_summary = settings.summary_interval_secs;
    let mut wall_time = 0.0_f32;

    while !driver.phase().is_terminal() && wall_time < settings.max_run_secs {
        driver.frame(frame_dt);
        wall_time += frame_dt;

        for event in driver.events() {
            match event {
                GameEvent::LevelUp { level } => log::debug!("Reached level {}", level),
                GameEvent::UpgradeApplied { option } => {
                    log::info!("Picked {} {}", option.icon, option.name)
                }
                _ => {}
            }
        }

        if settings.summary_interval_secs > 0.0 && driver.state.elapsed >= next_summary {
            log::info!("{}", driver.snapshot().summary());
            next_summary += settings.summary_interval_secs;
        }
    }

    let snapshot = driver.snapshot();
    match snapshot.phase {
        GamePhase::Victory => log::info!("Victory! {}", snapshot.summary()),
        GamePhase::GameOver => log::info!("Game over. {}", snapshot.summary()),
        _ => log::info!("Stopped after {:.0}s. {}", wall_time, snapshot.summary()),
    }

    if settings.print_final_snapshot {
        if let Some(json) = snapshot.to_json() {
            println!("{}", json);
        }
    }
}
