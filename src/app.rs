use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDateTime;
use instant::Instant;

use mascot::config::PetConfig;
use mascot::host::Host;
use mascot::mode::BehaviorMode;
use mascot::pet::Pet;
use mascot::platform;
use mascot::routine::{GreetingKind, ReminderKind};
use mascot::schedule::TimerQueue;

/// Frame size of the default sprite sheet.
const SPRITE_SIZE: (i32, i32) = (128, 128);
/// Longest we sleep between hotkey polls (ms).
const MAX_IDLE_SLEEP_MS: u64 = 50;
/// Timers fired per poll before we yield back to hotkeys.
const MAX_FIRES_PER_POLL: usize = 64;
/// How often to log tick stats (seconds).
const STATS_LOG_INTERVAL: f64 = 5.0;

// ---------------------------------------------------------------------------
// Tick stats
// ---------------------------------------------------------------------------

struct TickStats {
    tick_count: u64,
    ticks_since_log: u32,
    late_ms_sum: u64,
    late_ms_max: u64,
    last_log_time: Instant,
}

impl TickStats {
    fn new() -> Self {
        Self {
            tick_count: 0,
            ticks_since_log: 0,
            late_ms_sum: 0,
            late_ms_max: 0,
            last_log_time: Instant::now(),
        }
    }

    /// `late_ms`: how far past its due time the timer actually ran.
    fn record_tick(&mut self, late_ms: u64) {
        self.tick_count += 1;
        self.ticks_since_log += 1;
        self.late_ms_sum += late_ms;
        self.late_ms_max = self.late_ms_max.max(late_ms);

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= STATS_LOG_INTERVAL {
            let rate = self.ticks_since_log as f64 / elapsed;
            let avg_late = self.late_ms_sum as f64 / self.ticks_since_log.max(1) as f64;
            log::info!(
                "Ticks/s: {:.1} | avg late: {:.1}ms | max late: {}ms | total ticks: {}",
                rate,
                avg_late,
                self.late_ms_max,
                self.tick_count,
            );
            self.last_log_time = Instant::now();
            self.ticks_since_log = 0;
            self.late_ms_sum = 0;
            self.late_ms_max = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// Desktop host
// ---------------------------------------------------------------------------

/// Host without a window: reads the desktop, logs what a renderer would draw,
/// and writes preference changes back to the config file.
struct DesktopHost {
    config: PetConfig,
    config_path: PathBuf,
}

impl DesktopHost {
    fn save(&self) {
        if let Err(e) = self.config.save_to(&self.config_path) {
            log::warn!("Failed to save config to {}: {e}", self.config_path.display());
        }
    }
}

impl Host for DesktopHost {
    fn screen_size(&self) -> (i32, i32) {
        platform::screen_size()
    }

    fn pointer_position(&self) -> (i32, i32) {
        platform::pointer_position()
    }

    fn local_time(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }

    fn on_position_changed(&mut self, x: i32, y: i32) {
        log::trace!("Move window to ({x}, {y})");
    }

    fn on_facing_changed(&mut self, right: bool) {
        log::debug!("Facing {}", if right { "right" } else { "left" });
    }

    fn on_enter_idle(&mut self) {
        log::debug!("Animation: idle");
    }

    fn on_enter_move(&mut self) {
        log::debug!("Animation: move");
    }

    fn on_reminder(&mut self, kind: ReminderKind, message: &str) {
        log::info!("[{}] {message}", kind.label());
    }

    fn on_greeting(&mut self, kind: GreetingKind, message: &str) {
        log::info!("[{}] {message}", kind.label());
    }

    fn persist_behavior_mode(&mut self, mode: BehaviorMode) {
        self.config.behavior_mode = mode;
        self.save();
    }

    fn persist_follow_mouse(&mut self, enabled: bool) {
        self.config.follow_mouse = enabled;
        self.save();
    }
}

// ---------------------------------------------------------------------------
// Driver loop
// ---------------------------------------------------------------------------

/// Entry point: load config, start the pet, drive its timers until ESC.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = PetConfig::default_path()?;
    let config = PetConfig::load_or_default(&config_path);
    log::info!(
        "Config: {} (mode {}, follow {})",
        config_path.display(),
        config.behavior_mode,
        config.follow_mouse
    );

    let host = DesktopHost {
        config: config.clone(),
        config_path,
    };
    let mut pet = Pet::new(host, TimerQueue::new(), &config, SPRITE_SIZE, fastrand::Rng::new());
    pet.start();

    let started = Instant::now();
    let mut stats = TickStats::new();

    loop {
        let hotkeys = platform::poll_hotkeys();
        if hotkeys.quit {
            log::info!("ESC pressed, exiting");
            break;
        }
        if hotkeys.cycle_mode {
            let next = pet.motion().mode().next();
            pet.set_behavior_mode(next);
        }
        if hotkeys.toggle_follow {
            pet.toggle_follow_mouse();
        }
        if hotkeys.toggle_pause {
            pet.toggle_pause();
        }

        let now_ms = started.elapsed().as_millis() as u64;
        pet.scheduler_mut().advance_to(now_ms);
        for _ in 0..MAX_FIRES_PER_POLL {
            let Some(due) = pet.scheduler().next_due().filter(|&due| due <= now_ms) else {
                break;
            };
            let Some(task) = pet.scheduler_mut().pop_due() else {
                break;
            };
            pet.fire(task);
            stats.record_tick(now_ms - due);
        }

        let wait = pet
            .scheduler()
            .next_due()
            .map_or(MAX_IDLE_SLEEP_MS, |due| due.saturating_sub(now_ms))
            .min(MAX_IDLE_SLEEP_MS);
        std::thread::sleep(Duration::from_millis(wait));
    }

    pet.dispose();
    pet.host().save();
    Ok(())
}
