//! Wave Survivor headless driver
//!
//! Runs the simulation in demo mode at a fixed frame rate and logs what
//! happens. Usage: `wave-survivor [seed] [seconds] [tuning.json]`

use std::process::ExitCode;

use wave_survivor::audio::{AudioSink, SoundCue, dispatch_events};
use wave_survivor::sim::{GameEvent, GamePhase, GameState, TickInput};
use wave_survivor::Tuning;

/// Frame time of the driver loop (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;

/// Audio sink that only logs cues
#[derive(Default)]
struct LogAudio {
    cues: u32,
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        self.cues += 1;
        log::trace!("cue {:?} @ {:.2}", cue, volume);
    }

    fn start_music(&mut self, volume: f32) {
        log::debug!("music on @ {:.2}", volume);
    }

    fn stop_all(&mut self) {
        log::debug!("music off");
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42u64);
    let seconds = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0f32);

    let tuning = match args.next() {
        Some(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
            match loaded {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("Could not load tuning from {}: {}", path, e);
                    return ExitCode::FAILURE;
                }
            }
        }
        None => Tuning::default(),
    };

    let mut state = match GameState::with_tuning(seed, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut audio = LogAudio::default();
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let frames = (seconds / FRAME_DT).round() as u64;
    let mut kills = 0u32;
    let mut deaths = 0u32;
    let mut best_wave = 1u32;

    log::info!("Running {} frames in demo mode (seed {})", frames, seed);
    for _ in 0..frames {
        let events = state.update(&input, FRAME_DT);
        dispatch_events(&mut audio, &state.settings, &events);

        for event in &events {
            match event {
                GameEvent::EnemyKilled { .. } => kills += 1,
                GameEvent::PlayerDied { wave } => {
                    deaths += 1;
                    best_wave = best_wave.max(*wave);
                }
                GameEvent::UpgradeApplied(upgrade) => log::info!("Upgrade: {}", upgrade.label()),
                _ => {}
            }
        }
        if state.phase == GamePhase::Playing {
            best_wave = best_wave.max(state.wave.wave);
        }
    }

    let snap = state.snapshot();
    println!(
        "seed {}: {} kills, {} deaths, best wave {}, {} cues; final {:?} on wave {} ({}/{} hp)",
        seed,
        kills,
        deaths,
        best_wave,
        audio.cues,
        snap.phase,
        snap.hud.wave,
        snap.hud.health.max(0.0),
        snap.hud.max_health
    );
    ExitCode::SUCCESS
}
