use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::daynight::TimePeriod;

/// Routine tuning. Deserialized from the `[routine]` config table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutineConfig {
    /// Tick interval (ms).
    pub interval_ms: u32,
    /// Speed multiplier applied during sleep hours.
    pub sleep_speed_multiplier: f32,
    /// Chance per tick that any message fires.
    pub reminder_chance: f32,
    /// Share of fired messages that are reminders rather than chat.
    pub reminder_share: f32,
    pub water_interval_min: i64,
    pub rest_interval_min: i64,
    pub posture_interval_min: i64,
}

impl Default for RoutineConfig {
    fn default() -> Self {
        Self {
            interval_ms: 60_000,
            sleep_speed_multiplier: 0.3,
            reminder_chance: 0.3,
            reminder_share: 0.6,
            water_interval_min: 60,
            rest_interval_min: 90,
            posture_interval_min: 120,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderKind {
    Water,
    Rest,
    Posture,
}

impl ReminderKind {
    /// Checked in this order; the first one off cooldown wins.
    pub const ALL: [ReminderKind; 3] = [ReminderKind::Water, ReminderKind::Rest, ReminderKind::Posture];

    pub fn label(self) -> &'static str {
        match self {
            ReminderKind::Water => "water",
            ReminderKind::Rest => "rest",
            ReminderKind::Posture => "posture",
        }
    }

    fn messages(self) -> &'static [&'static str] {
        match self {
            ReminderKind::Water => &[
                "Time for some water!",
                "Stay hydrated. I'm topping up too.",
                "A glass of water would do you good right now.",
                "Water break? Water break.",
            ],
            ReminderKind::Rest => &[
                "Give your eyes a break. Look at something far away.",
                "Stand up and stretch for a minute?",
                "You've been at it a while. Short rest?",
                "Breaks make the work go faster, promise.",
            ],
            ReminderKind::Posture => &[
                "Sit up straight!",
                "Shoulders back, no slouching.",
                "Quick posture check.",
                "Adjust your chair? I'll wait.",
            ],
        }
    }

    fn interval_min(self, config: &RoutineConfig) -> i64 {
        match self {
            ReminderKind::Water => config.water_interval_min,
            ReminderKind::Rest => config.rest_interval_min,
            ReminderKind::Posture => config.posture_interval_min,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreetingKind {
    Night,
    Morning,
    RandomChat,
}

impl GreetingKind {
    pub fn label(self) -> &'static str {
        match self {
            GreetingKind::Night => "night",
            GreetingKind::Morning => "morning",
            GreetingKind::RandomChat => "random_chat",
        }
    }

    fn messages(self) -> &'static [&'static str] {
        match self {
            GreetingKind::Night => &[
                "It's late... I'm getting sleepy.",
                "Good night! Don't stay up too long.",
                "Yawn. Slowing down for the night.",
            ],
            GreetingKind::Morning => &[
                "Good morning!",
                "Morning! Ready for today?",
                "I'm awake! Let's go.",
            ],
            GreetingKind::RandomChat => &[
                "What are you working on?",
                "I like it here on your screen.",
                "Just passing through.",
                "Don't mind me.",
            ],
        }
    }
}

/// Output of one routine tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoutineEvent {
    /// New multiplier for the motion base speed.
    SpeedScale(f32),
    Greeting { kind: GreetingKind, message: &'static str },
    Reminder { kind: ReminderKind, message: &'static str },
}

/// Host state that blocks reminders.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutineGate {
    pub paused: bool,
    pub chat_visible: bool,
}

/// Slow scheduler next to the motion loop: sleep-hour slowdown and
/// periodic reminders. Never touches position or velocity.
pub struct RoutineModulator {
    config: RoutineConfig,
    period: TimePeriod,
    sleeping: bool,
    last_reminder: HashMap<ReminderKind, NaiveDateTime>,
}

impl RoutineModulator {
    /// Starts awake whatever the hour; only a transition into the sleep
    /// bucket slows the sprite down.
    pub fn new(config: RoutineConfig, now: NaiveDateTime) -> Self {
        let period = TimePeriod::at(now);
        log::info!("Routine starting in period: {}", period.label());
        Self {
            config,
            period,
            sleeping: false,
            last_reminder: HashMap::new(),
        }
    }

    pub fn tick(&mut self, now: NaiveDateTime, gate: RoutineGate, rng: &mut fastrand::Rng) -> Vec<RoutineEvent> {
        let mut events = Vec::new();

        let period = TimePeriod::at(now);
        if period != self.period {
            log::debug!("Time period {} -> {}", self.period.label(), period.label());
            self.period = period;
            if period.is_sleep() {
                self.sleeping = true;
                events.push(RoutineEvent::SpeedScale(self.config.sleep_speed_multiplier));
                events.push(greeting(GreetingKind::Night, rng));
            } else if self.sleeping {
                self.sleeping = false;
                events.push(RoutineEvent::SpeedScale(1.0));
                events.push(greeting(GreetingKind::Morning, rng));
            }
        }

        if self.sleeping || gate.paused || gate.chat_visible {
            return events;
        }
        if rng.f32() >= self.config.reminder_chance {
            return events;
        }

        if rng.f32() < self.config.reminder_share {
            if let Some(event) = self.due_reminder(now, rng) {
                events.push(event);
            }
        } else {
            events.push(greeting(GreetingKind::RandomChat, rng));
        }
        events
    }

    fn due_reminder(&mut self, now: NaiveDateTime, rng: &mut fastrand::Rng) -> Option<RoutineEvent> {
        let kind = ReminderKind::ALL.into_iter().find(|&kind| match self.last_reminder.get(&kind) {
            None => true,
            Some(last) => (now - *last).num_seconds() >= kind.interval_min(&self.config) * 60,
        })?;
        self.last_reminder.insert(kind, now);
        log::debug!("Reminder fired: {}", kind.label());
        Some(RoutineEvent::Reminder {
            kind,
            message: pick(kind.messages(), rng),
        })
    }

    /// Current speed multiplier.
    pub fn speed_scale(&self) -> f32 {
        if self.sleeping {
            self.config.sleep_speed_multiplier
        } else {
            1.0
        }
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    pub fn period(&self) -> TimePeriod {
        self.period
    }

    pub fn interval_ms(&self) -> u32 {
        self.config.interval_ms
    }
}

fn greeting(kind: GreetingKind, rng: &mut fastrand::Rng) -> RoutineEvent {
    RoutineEvent::Greeting {
        kind,
        message: pick(kind.messages(), rng),
    }
}

fn pick(pool: &'static [&'static str], rng: &mut fastrand::Rng) -> &'static str {
    pool[rng.usize(0..pool.len())]
}
