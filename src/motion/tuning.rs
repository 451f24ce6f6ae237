use serde::{Deserialize, Serialize};

/// Every motion constant the controller reads.
///
/// Owned by the controller instead of living in globals, so two sprites (or
/// two tests) never share hidden state. Deserialized from the `[motion]`
/// table of the config file; missing keys fall back to these defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Base horizontal speed in px/tick.
    pub speed_x: f32,
    /// Base vertical speed in px/tick.
    pub speed_y: f32,
    /// Nominal tick interval (ms).
    pub move_interval_ms: u32,
    /// Tick interval while paused (ms).
    pub paused_interval_ms: u32,
    /// Tick interval while the host is dragging the sprite (ms).
    pub drag_interval_ms: u32,
    /// Upper bound on the tick interval while music plays (ms).
    pub music_interval_cap_ms: u32,

    /// Ticks between jitter resamples.
    pub jitter_interval: u32,
    /// Jitter amplitude in px/tick.
    pub jitter: f32,
    /// Weight kept from last tick's velocity.
    pub inertia_factor: f32,
    /// Weight given to the freshly computed desired velocity.
    pub intent_factor: f32,
    /// |vx| needed before the facing flips.
    pub facing_threshold: f32,

    /// Per-tick chance of a random stop while wandering.
    pub stop_chance: f32,
    pub stop_duration_min_ms: i32,
    pub stop_duration_max_ms: i32,

    /// Chance of resting on arrival at a waypoint.
    pub rest_chance: f32,
    /// Arrival rest chance used in Active mode.
    pub active_rest_chance: f32,
    pub rest_duration_min_ms: i32,
    pub rest_duration_max_ms: i32,
    /// Distance (px) under which the sprite counts as arrived.
    pub rest_distance: f32,

    /// Ticks between forced retargets while wandering.
    pub target_change_min: i32,
    pub target_change_max: i32,
    /// Chance that a wander waypoint lies just beyond a screen edge.
    pub outside_target_chance: f32,
    /// Off-screen margin base; waypoints land `respawn_margin + 50` px out.
    pub respawn_margin: i32,

    /// Pointer offset used when retargeting in Follow.
    pub follow_distance: i32,
    /// Pointer farther than this starts Follow.
    pub follow_start_dist: f32,
    /// Pointer closer than this starts Curious; also the Curious offset.
    pub follow_stop_dist: f32,

    pub speed_wander: f32,
    pub speed_follow: f32,
    pub speed_curious: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            speed_x: 3.0,
            speed_y: 2.0,
            move_interval_ms: 30,
            paused_interval_ms: 100,
            drag_interval_ms: 50,
            music_interval_cap_ms: 100,

            jitter_interval: 5,
            jitter: 0.15,
            inertia_factor: 0.95,
            intent_factor: 0.05,
            facing_threshold: 0.5,

            stop_chance: 0.0003,
            stop_duration_min_ms: 5000,
            stop_duration_max_ms: 5000,

            rest_chance: 0.6,
            active_rest_chance: 0.08,
            rest_duration_min_ms: 1000,
            rest_duration_max_ms: 3000,
            rest_distance: 20.0,

            target_change_min: 200,
            target_change_max: 500,
            outside_target_chance: 0.4,
            respawn_margin: 50,

            follow_distance: 80,
            follow_start_dist: 200.0,
            follow_stop_dist: 60.0,

            speed_wander: 0.8,
            speed_follow: 1.2,
            speed_curious: 0.5,
        }
    }
}

impl Tuning {
    /// Interval used while music is playing.
    pub fn music_interval_ms(&self) -> u32 {
        self.move_interval_ms.min(self.music_interval_cap_ms)
    }

    /// Distance past the screen edge for off-screen waypoints.
    pub fn outside_margin(&self) -> i32 {
        self.respawn_margin + 50
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let t: Tuning = toml::from_str("speed_x = 5.0\nrest_distance = 12.0").unwrap();
        assert_eq!(t.speed_x, 5.0);
        assert_eq!(t.rest_distance, 12.0);
        assert_eq!(t.speed_y, 2.0);
        assert_eq!(t.move_interval_ms, 30);
    }

    #[test]
    fn derived_values() {
        let t = Tuning::default();
        assert_eq!(t.music_interval_ms(), 30);
        assert_eq!(t.outside_margin(), 100);
    }
}
