pub mod components;
pub mod edge;
pub mod target;
pub mod tuning;

use glam::Vec2;

use crate::mode::{BehaviorMode, BehaviorParams};
use components::{Bounds, MotionEvent, MotionState, Sprite};
use tuning::Tuning;

/// Where the sprite appears before the host moves it.
const SPAWN_POS: Vec2 = Vec2::new(200.0, 200.0);

/// The motion/behavior state machine for one sprite.
///
/// Driven by [`MotionController::tick`] once per interval; the host reads
/// state through accessors and influences it only through the command
/// methods. Notifications queue up in an internal buffer drained with
/// [`MotionController::drain_events`].
pub struct MotionController {
    tuning: Tuning,
    mode: BehaviorMode,
    params: BehaviorParams,

    sprite: Sprite,
    state: MotionState,
    target: Vec2,

    /// Ticks until the next forced retarget (Wander only).
    target_timer: i32,
    /// Milliseconds left in Rest.
    rest_timer: i32,
    /// Ticks since the move animation last started; gates the stop roll.
    move_ticks_since_move: u32,
    /// Monotonic tick counter for jitter resampling.
    move_tick: u64,
    jitter: Vec2,

    last_pointer: Option<(i32, i32)>,
    last_notified: Option<(i32, i32)>,

    follow_mouse: bool,
    is_moving: bool,
    paused: bool,
    dragging: bool,
    music_playing: bool,
    /// (state, is_moving) saved when music started.
    pre_music: Option<(MotionState, bool)>,

    /// Routine-driven multiplier on the base speeds (1.0 = awake).
    speed_scale: f32,

    events: Vec<MotionEvent>,
}

impl MotionController {
    pub fn new(tuning: Tuning, sprite_size: (i32, i32), screen: (i32, i32), rng: &mut fastrand::Rng) -> Self {
        let mode = BehaviorMode::default();
        let params = mode.params(&tuning);
        let bounds = Bounds::new(screen, sprite_size);
        let target = target::random_target(rng, &bounds, &tuning);
        let target_timer = roll_range(rng, tuning.target_change_min, tuning.target_change_max);
        let sprite = Sprite::new(SPAWN_POS, Vec2::new(tuning.speed_x, tuning.speed_y), sprite_size);

        Self {
            tuning,
            mode,
            params,
            sprite,
            state: MotionState::Wander,
            target,
            target_timer,
            rest_timer: 0,
            move_ticks_since_move: 0,
            move_tick: 0,
            jitter: Vec2::ZERO,
            last_pointer: None,
            last_notified: None,
            follow_mouse: false,
            is_moving: true,
            paused: false,
            dragging: false,
            music_playing: false,
            pre_music: None,
            speed_scale: 1.0,
            events: Vec::with_capacity(8),
        }
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Advance one step. Returns the delay (ms) before the next tick.
    pub fn tick(&mut self, screen: (i32, i32), pointer: (i32, i32), rng: &mut fastrand::Rng) -> u32 {
        let interval = self.tuning.move_interval_ms;

        // 1. Suppression: the schedule keeps running, the sprite stays put.
        if self.music_playing {
            return self.tuning.music_interval_ms();
        }
        if self.paused {
            return self.tuning.paused_interval_ms;
        }
        if self.dragging {
            return self.tuning.drag_interval_ms;
        }

        // 2. Quiet never moves.
        if self.mode == BehaviorMode::Quiet {
            if self.is_moving {
                self.enter_idle();
            }
            return interval;
        }

        // 3. Random stop while wandering.
        if self.state == MotionState::Wander && self.is_moving {
            let stop_chance = self.params.stop_chance_or(&self.tuning);
            if self.move_ticks_since_move >= self.params.min_move_ticks && rng.f32() < stop_chance {
                let duration = roll_range(rng, self.tuning.stop_duration_min_ms, self.tuning.stop_duration_max_ms);
                self.begin_rest(duration, "random stop");
                return interval;
            }
        }

        // 4. Rest countdown.
        if self.state == MotionState::Rest {
            self.rest_timer -= interval as i32;
            if self.rest_timer <= 0 {
                self.transition(MotionState::Wander);
                let bounds = self.bounds(screen);
                self.target = target::random_target(rng, &bounds, &self.tuning);
                self.target_timer =
                    roll_range(rng, self.tuning.target_change_min, self.tuning.target_change_max);
                self.enter_move();
            }
            return interval;
        }

        let bounds = self.bounds(screen);

        // 5. Pointer sampling.
        let mouse_moved = self.last_pointer != Some(pointer);
        self.last_pointer = Some(pointer);
        let pointer_pos = Vec2::new(pointer.0 as f32, pointer.1 as f32);

        // 6. Distance to target.
        let mut delta = self.target - self.sprite.pos;
        let mut dist = delta.length().max(1.0);

        // 7. Follow resolution.
        let follow = self.effective_follow();
        if !follow && self.state.tracks_pointer() {
            self.transition(MotionState::Wander);
        }
        if follow {
            let to_pointer_sq = (pointer_pos - self.sprite.pos).length_squared();
            let start = self.tuning.follow_start_dist;
            let stop = self.tuning.follow_stop_dist;
            let next = if to_pointer_sq > start * start {
                MotionState::Follow
            } else if to_pointer_sq < stop * stop {
                MotionState::Curious
            } else {
                MotionState::Wander
            };
            self.transition(next);
        } else if self.state == MotionState::Wander && dist < self.tuning.rest_distance {
            let rest_chance = self.params.rest_chance_or(&self.tuning);
            if rng.f32() < rest_chance {
                let duration = roll_range(rng, self.tuning.rest_duration_min_ms, self.tuning.rest_duration_max_ms);
                self.begin_rest(duration, "arrived");
                return interval;
            }
            self.target = target::random_target(rng, &bounds, &self.tuning);
            self.target_timer = roll_range(rng, self.tuning.target_change_min, self.tuning.target_change_max);
        }

        // 8. Retarget countdown.
        if self.state == MotionState::Wander {
            self.target_timer -= 1;
            if self.target_timer <= 0 {
                self.target = target::random_target(rng, &bounds, &self.tuning);
                let (lo, hi) = self.params.target_range(&self.tuning);
                self.target_timer = roll_range(rng, lo, hi);
            }
        }

        // 9. Speed multiplier.
        let speed_mul = self.state_speed() * self.params.speed_mul;

        // 10. Live retarget on the pointer.
        if self.state.tracks_pointer() && mouse_moved {
            let offset = if self.state == MotionState::Follow {
                self.tuning.follow_distance
            } else {
                self.tuning.follow_stop_dist as i32
            };
            self.target = target::follow_target(rng, pointer_pos, offset, &bounds);
            delta = self.target - self.sprite.pos;
            dist = delta.length().max(1.0);
        }
        debug_assert!(dist.is_finite() && dist >= 1.0);

        // 11. Inertia/intent blend.
        let desired = delta / dist * self.base_speed() * speed_mul;
        self.sprite.vel = self.sprite.vel * self.tuning.inertia_factor + desired * self.tuning.intent_factor;

        // 12. Facing.
        if self.is_moving {
            if let Some(right) = self.sprite.update_facing(self.tuning.facing_threshold, false) {
                self.events.push(MotionEvent::FacingChanged { right });
            }
        }

        // 13. Jitter, resampled every few ticks and held in between.
        self.move_tick += 1;
        if self.tuning.jitter_interval > 0 && self.move_tick % self.tuning.jitter_interval as u64 == 0 {
            let j = self.tuning.jitter;
            self.jitter = Vec2::new(rng.f32() * 2.0 * j - j, rng.f32() * 2.0 * j - j);
        }
        self.sprite.vel += self.jitter;

        // 14. Integrate.
        self.sprite.pos += self.sprite.vel;

        // 15. Edges.
        let edge = edge::handle_edge(&mut self.sprite, &bounds, self.tuning.facing_threshold);
        if let Some(right) = edge.facing_changed {
            self.events.push(MotionEvent::FacingChanged { right });
        }

        // 16. Notify only on whole-pixel changes.
        self.notify_position();

        // 17. Bookkeeping.
        self.move_ticks_since_move += 1;
        log::trace!(
            "tick {} state={} pos=({:.1}, {:.1}) vel=({:.2}, {:.2})",
            self.move_tick,
            self.state.label(),
            self.sprite.pos.x,
            self.sprite.pos.y,
            self.sprite.vel.x,
            self.sprite.vel.y,
        );
        interval
    }

    fn bounds(&self, screen: (i32, i32)) -> Bounds {
        Bounds::new(screen, self.sprite.size)
    }

    fn effective_follow(&self) -> bool {
        if self.mode == BehaviorMode::Active {
            return false;
        }
        self.params.follow_override.unwrap_or(self.follow_mouse)
    }

    fn state_speed(&self) -> f32 {
        match self.state {
            MotionState::Wander => self.tuning.speed_wander,
            MotionState::Follow => self.tuning.speed_follow,
            MotionState::Curious => self.tuning.speed_curious,
            MotionState::Rest => 1.0,
        }
    }

    fn base_speed(&self) -> Vec2 {
        Vec2::new(self.tuning.speed_x, self.tuning.speed_y) * self.speed_scale
    }

    fn begin_rest(&mut self, duration_ms: i32, reason: &str) {
        self.transition(MotionState::Rest);
        self.rest_timer = duration_ms;
        self.enter_idle();
        log::debug!("Resting for {duration_ms}ms ({reason})");
    }

    fn transition(&mut self, next: MotionState) {
        if self.state != next {
            log::debug!("Motion state {} -> {}", self.state.label(), next.label());
            self.state = next;
        }
    }

    fn notify_position(&mut self) {
        let px = self.sprite.pixel_pos();
        if self.last_notified != Some(px) {
            self.last_notified = Some(px);
            self.events.push(MotionEvent::PositionChanged { x: px.0, y: px.1 });
        }
    }

    // -----------------------------------------------------------------------
    // Animation switching
    // -----------------------------------------------------------------------

    /// Switch to the idle animation. No-op while paused or playing music.
    fn enter_idle(&mut self) -> bool {
        if self.paused || self.music_playing {
            return false;
        }
        self.is_moving = false;
        self.move_ticks_since_move = 0;
        self.events.push(MotionEvent::EnterIdle);
        true
    }

    /// Switch to the move animation. No-op while paused, playing music, or
    /// in Quiet. Returns true when the caller should restart the tick.
    fn enter_move(&mut self) -> bool {
        if self.paused || self.music_playing || self.mode == BehaviorMode::Quiet {
            return false;
        }
        self.is_moving = true;
        self.move_ticks_since_move = 0;
        self.events.push(MotionEvent::EnterMove);
        true
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Apply a behavior mode. Returns true when the tick should restart.
    pub fn set_behavior_mode(&mut self, mode: BehaviorMode) -> bool {
        self.mode = mode;
        self.params = mode.params(&self.tuning);
        if let Some(follow) = self.params.follow_override {
            self.follow_mouse = follow;
        }
        log::info!("Behavior mode: {}", mode.label());

        if mode == BehaviorMode::Quiet {
            self.transition(MotionState::Rest);
            self.enter_idle();
            false
        } else if !self.paused && !self.dragging && !self.music_playing {
            self.transition(MotionState::Wander);
            self.enter_move()
        } else {
            false
        }
    }

    pub fn set_follow_mouse(&mut self, enabled: bool) {
        self.follow_mouse = enabled;
    }

    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.is_moving = false;
        self.events.push(MotionEvent::EnterIdle);
    }

    /// Returns true when the tick should restart.
    pub fn resume(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        self.enter_move()
    }

    pub fn drag_start(&mut self) {
        self.dragging = true;
    }

    /// Follow the host's drag. Edges re-clamp on the next tick.
    pub fn drag_move(&mut self, x: f32, y: f32) {
        if self.dragging {
            self.sprite.pos = Vec2::new(x, y);
            self.notify_position();
        }
    }

    pub fn drag_stop(&mut self) {
        self.dragging = false;
    }

    pub fn music_start(&mut self) {
        if self.music_playing {
            return;
        }
        self.pre_music = Some((self.state, self.is_moving));
        self.transition(MotionState::Rest);
        self.is_moving = false;
        self.music_playing = true;
    }

    /// Restore the pre-music state. Returns true when the tick should restart.
    pub fn music_stop(&mut self) -> bool {
        if !self.music_playing {
            return false;
        }
        self.music_playing = false;
        let (state, was_moving) = self.pre_music.take().unwrap_or((MotionState::Wander, true));
        self.transition(state);
        self.is_moving = was_moving;
        self.move_ticks_since_move = 0;
        if was_moving {
            self.events.push(MotionEvent::EnterMove);
        } else {
            self.events.push(MotionEvent::EnterIdle);
        }
        was_moving
    }

    /// Frame size changed (scale change).
    pub fn set_sprite_size(&mut self, w: i32, h: i32) {
        self.sprite.size = (w, h);
    }

    /// Multiplier on the base speed, written by the routine modulator.
    pub fn set_speed_scale(&mut self, scale: f32) {
        self.speed_scale = scale;
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, MotionEvent> {
        self.events.drain(..)
    }

    pub fn state(&self) -> MotionState {
        self.state
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn mode(&self) -> BehaviorMode {
        self.mode
    }

    pub fn params(&self) -> &BehaviorParams {
        &self.params
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn rest_timer(&self) -> i32 {
        self.rest_timer
    }

    pub fn follow_mouse(&self) -> bool {
        self.follow_mouse
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn speed_scale(&self) -> f32 {
        self.speed_scale
    }
}

/// Inclusive draw that tolerates an inverted range from bad tuning.
fn roll_range(rng: &mut fastrand::Rng, lo: i32, hi: i32) -> i32 {
    rng.i32(lo..=hi.max(lo))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: (i32, i32) = (1920, 1080);
    const SIZE: (i32, i32) = (100, 100);

    fn controller(seed: u64) -> (MotionController, fastrand::Rng) {
        let mut rng = fastrand::Rng::with_seed(seed);
        let ctl = MotionController::new(Tuning::default(), SIZE, SCREEN, &mut rng);
        (ctl, rng)
    }

    fn events(ctl: &mut MotionController) -> Vec<MotionEvent> {
        ctl.drain_events().collect()
    }

    #[test]
    fn position_stays_on_screen() {
        let (mut ctl, mut rng) = controller(11);
        ctl.set_behavior_mode(BehaviorMode::Clingy);
        let bounds = Bounds::new(SCREEN, SIZE);
        for i in 0..5000 {
            let pointer = (rng.i32(-50..2000), rng.i32(-50..1150));
            ctl.tick(SCREEN, if i % 300 < 150 { pointer } else { (960, 540) }, &mut rng);
            let p = ctl.sprite().pos;
            assert!(bounds.contains(p), "tick {i}: {p:?}");
        }
    }

    #[test]
    fn wandering_stays_on_screen_with_edge_targets() {
        let (mut ctl, mut rng) = controller(12);
        ctl.tuning.outside_target_chance = 1.0;
        let bounds = Bounds::new(SCREEN, SIZE);
        for _ in 0..5000 {
            ctl.tick(SCREEN, (0, 0), &mut rng);
            assert!(bounds.contains(ctl.sprite().pos));
        }
    }

    #[test]
    fn arrival_rest() {
        let (mut ctl, mut rng) = controller(13);
        ctl.sprite.pos = Vec2::new(500.0, 500.0);
        ctl.target = Vec2::new(500.0, 500.0);
        ctl.params.rest_chance = Some(1.0);
        events(&mut ctl);

        ctl.tick(SCREEN, (0, 0), &mut rng);

        assert_eq!(ctl.state(), MotionState::Rest);
        assert!(events(&mut ctl).contains(&MotionEvent::EnterIdle));
        let t = ctl.tuning();
        assert!((t.rest_duration_min_ms..=t.rest_duration_max_ms).contains(&ctl.rest_timer()));
        assert!(!ctl.is_moving());
    }

    #[test]
    fn arrival_without_rest_picks_new_target() {
        let (mut ctl, mut rng) = controller(14);
        ctl.sprite.pos = Vec2::new(500.0, 500.0);
        ctl.target = Vec2::new(505.0, 500.0);
        ctl.params.rest_chance = Some(0.0);
        ctl.tuning.outside_target_chance = 0.0;
        ctl.tick(SCREEN, (0, 0), &mut rng);
        assert_eq!(ctl.state(), MotionState::Wander);
        assert_ne!(ctl.target(), Vec2::new(505.0, 500.0));
    }

    #[test]
    fn rest_counts_down_then_wanders() {
        let (mut ctl, mut rng) = controller(15);
        ctl.set_behavior_mode(BehaviorMode::Clingy);
        ctl.state = MotionState::Rest;
        ctl.rest_timer = 200;
        ctl.is_moving = false;

        let mut prev = ctl.rest_timer();
        loop {
            // Pointer far away: would start Follow if rest were skipped.
            ctl.tick(SCREEN, (1900, 1000), &mut rng);
            if ctl.state() != MotionState::Rest {
                break;
            }
            assert_eq!(ctl.rest_timer(), prev - 30);
            prev = ctl.rest_timer();
        }
        assert_eq!(ctl.state(), MotionState::Wander);
        assert!(prev - 30 <= 0);
        assert!(ctl.is_moving());
    }

    #[test]
    fn random_stop_respects_min_move_ticks() {
        let (mut ctl, mut rng) = controller(16);
        ctl.params.stop_chance = Some(1.0);
        ctl.params.rest_chance = Some(0.0);
        ctl.move_ticks_since_move = 0;
        for _ in 0..18 {
            ctl.tick(SCREEN, (0, 0), &mut rng);
            assert_eq!(ctl.state(), MotionState::Wander);
        }
        ctl.tick(SCREEN, (0, 0), &mut rng);
        assert_eq!(ctl.state(), MotionState::Rest);
        assert_eq!(ctl.rest_timer(), 5000);
    }

    #[test]
    fn follow_band_is_wander() {
        let (mut ctl, mut rng) = controller(17);
        ctl.set_behavior_mode(BehaviorMode::Clingy);
        ctl.params.stop_chance = Some(0.0);
        ctl.sprite.pos = Vec2::new(500.0, 500.0);
        ctl.sprite.vel = Vec2::ZERO;
        ctl.tick(SCREEN, (650, 500), &mut rng);
        assert_eq!(ctl.state(), MotionState::Wander);
    }

    #[test]
    fn far_pointer_starts_follow() {
        let (mut ctl, mut rng) = controller(18);
        ctl.set_behavior_mode(BehaviorMode::Clingy);
        ctl.params.stop_chance = Some(0.0);
        ctl.sprite.pos = Vec2::new(100.0, 100.0);
        ctl.last_pointer = Some((100, 100));
        ctl.tick(SCREEN, (800, 800), &mut rng);
        assert_eq!(ctl.state(), MotionState::Follow);
        let t = ctl.target();
        assert!((t.x - 800.0).abs() <= 80.0 && (t.y - 800.0).abs() <= 80.0);
    }

    #[test]
    fn close_pointer_is_curious() {
        let (mut ctl, mut rng) = controller(19);
        ctl.set_behavior_mode(BehaviorMode::Clingy);
        ctl.params.stop_chance = Some(0.0);
        ctl.sprite.pos = Vec2::new(500.0, 500.0);
        ctl.tick(SCREEN, (530, 520), &mut rng);
        assert_eq!(ctl.state(), MotionState::Curious);
    }

    #[test]
    fn active_mode_ignores_follow_flag() {
        let (mut ctl, mut rng) = controller(20);
        ctl.set_follow_mouse(true);
        ctl.params.stop_chance = Some(0.0);
        ctl.sprite.pos = Vec2::new(100.0, 100.0);
        ctl.tick(SCREEN, (1800, 1000), &mut rng);
        assert_eq!(ctl.state(), MotionState::Wander);
    }

    #[test]
    fn follow_off_drops_back_to_wander() {
        let (mut ctl, mut rng) = controller(21);
        ctl.set_behavior_mode(BehaviorMode::Clingy);
        ctl.params.stop_chance = Some(0.0);
        ctl.state = MotionState::Follow;
        ctl.params.follow_override = None;
        ctl.set_follow_mouse(false);
        ctl.tick(SCREEN, (1800, 1000), &mut rng);
        assert_eq!(ctl.state(), MotionState::Wander);
    }

    #[test]
    fn quiet_mid_wander_goes_idle_without_moving() {
        let (mut ctl, mut rng) = controller(22);
        ctl.tick(SCREEN, (0, 0), &mut rng);
        events(&mut ctl);
        ctl.mode = BehaviorMode::Quiet;
        ctl.sprite.vel = Vec2::new(3.0, 2.0);
        let before = ctl.sprite().pos;

        ctl.tick(SCREEN, (0, 0), &mut rng);

        assert_eq!(events(&mut ctl), vec![MotionEvent::EnterIdle]);
        assert_eq!(ctl.sprite().pos, before);
        ctl.tick(SCREEN, (0, 0), &mut rng);
        assert!(events(&mut ctl).is_empty());
        assert_eq!(ctl.sprite().pos, before);
    }

    #[test]
    fn suppressed_ticks_freeze_position() {
        let (mut ctl, mut rng) = controller(23);
        let before = ctl.sprite().pos;

        ctl.music_start();
        assert_eq!(ctl.tick(SCREEN, (0, 0), &mut rng), 30);
        ctl.music_stop();

        ctl.pause();
        assert_eq!(ctl.tick(SCREEN, (0, 0), &mut rng), 100);
        ctl.resume();

        ctl.drag_start();
        assert_eq!(ctl.tick(SCREEN, (0, 0), &mut rng), 50);
        ctl.drag_stop();

        assert_eq!(ctl.sprite().pos, before);
    }

    #[test]
    fn music_restores_previous_state() {
        let (mut ctl, _) = controller(24);
        events(&mut ctl);
        ctl.music_start();
        assert_eq!(ctl.state(), MotionState::Rest);
        assert!(!ctl.is_moving());
        assert!(ctl.music_stop());
        assert_eq!(ctl.state(), MotionState::Wander);
        assert!(ctl.is_moving());
        assert_eq!(events(&mut ctl), vec![MotionEvent::EnterMove]);
    }

    #[test]
    fn position_events_only_on_pixel_change() {
        let (mut ctl, mut rng) = controller(25);
        ctl.tuning.jitter = 0.0;
        ctl.tuning.speed_x = 0.0;
        ctl.tuning.speed_y = 0.0;
        ctl.sprite.vel = Vec2::new(0.3, 0.0);
        ctl.sprite.pos = Vec2::new(500.0, 500.0);
        ctl.params.stop_chance = Some(0.0);
        ctl.tick(SCREEN, (0, 0), &mut rng);
        let first = events(&mut ctl);
        assert!(first.contains(&MotionEvent::PositionChanged { x: 500, y: 500 }));
        ctl.tick(SCREEN, (0, 0), &mut rng);
        assert!(events(&mut ctl)
            .iter()
            .all(|e| !matches!(e, MotionEvent::PositionChanged { .. })));
    }

    #[test]
    fn jitter_is_held_between_resamples() {
        let (mut ctl, mut rng) = controller(29);
        ctl.tuning.speed_x = 0.0;
        ctl.tuning.speed_y = 0.0;
        ctl.params.stop_chance = Some(0.0);
        ctl.params.rest_chance = Some(0.0);
        ctl.sprite.pos = Vec2::new(900.0, 500.0);
        ctl.sprite.vel = Vec2::ZERO;
        let j = ctl.tuning.jitter;

        let mut prev = ctl.jitter;
        let mut resamples = 0;
        for _ in 0..20 {
            ctl.tick(SCREEN, (0, 0), &mut rng);
            let cur = ctl.jitter;
            assert!(cur.x.abs() <= j && cur.y.abs() <= j, "{cur:?}");
            if ctl.move_tick % 5 != 0 {
                assert_eq!(cur, prev, "resampled on tick {}", ctl.move_tick);
            } else if cur != prev {
                resamples += 1;
            }
            prev = cur;
        }
        assert!(resamples >= 3);
        assert_ne!(ctl.jitter, Vec2::ZERO);
    }

    #[test]
    fn tick_flips_facing_once() {
        let (mut ctl, mut rng) = controller(30);
        ctl.tuning.jitter = 0.0;
        ctl.tuning.speed_x = 0.0;
        ctl.tuning.speed_y = 0.0;
        ctl.params.stop_chance = Some(0.0);
        ctl.params.rest_chance = Some(0.0);
        ctl.sprite.pos = Vec2::new(900.0, 500.0);
        ctl.sprite.vel = Vec2::new(-1.0, 0.0);
        assert!(ctl.sprite().moving_right);
        events(&mut ctl);

        ctl.tick(SCREEN, (0, 0), &mut rng);
        let flips: Vec<_> = events(&mut ctl)
            .into_iter()
            .filter(|e| matches!(e, MotionEvent::FacingChanged { .. }))
            .collect();
        assert_eq!(flips, vec![MotionEvent::FacingChanged { right: false }]);
        assert!(!ctl.sprite().moving_right);

        ctl.tick(SCREEN, (0, 0), &mut rng);
        assert!(!events(&mut ctl)
            .iter()
            .any(|e| matches!(e, MotionEvent::FacingChanged { .. })));
    }

    #[test]
    fn velocity_lags_behind_intent() {
        let (mut ctl, mut rng) = controller(26);
        ctl.tuning.jitter = 0.0;
        ctl.params.stop_chance = Some(0.0);
        ctl.sprite.pos = Vec2::new(100.0, 500.0);
        ctl.sprite.vel = Vec2::ZERO;
        ctl.target = Vec2::new(1500.0, 500.0);
        ctl.tick(SCREEN, (0, 0), &mut rng);
        // desired = 3.0 * 0.8, blended in at 5%.
        assert!((ctl.sprite().vel.x - 0.12).abs() < 1e-4);
        assert_eq!(ctl.sprite().vel.y, 0.0);
    }

    #[test]
    fn speed_scale_slows_intent() {
        let (mut ctl, mut rng) = controller(27);
        ctl.tuning.jitter = 0.0;
        ctl.params.stop_chance = Some(0.0);
        ctl.set_speed_scale(0.5);
        ctl.sprite.pos = Vec2::new(100.0, 500.0);
        ctl.sprite.vel = Vec2::ZERO;
        ctl.target = Vec2::new(1500.0, 500.0);
        ctl.tick(SCREEN, (0, 0), &mut rng);
        assert!((ctl.sprite().vel.x - 0.06).abs() < 1e-4);
    }

    #[test]
    fn quiet_mode_forces_rest_and_follow_off() {
        let (mut ctl, _) = controller(28);
        ctl.set_follow_mouse(true);
        assert!(!ctl.set_behavior_mode(BehaviorMode::Quiet));
        assert_eq!(ctl.state(), MotionState::Rest);
        assert!(!ctl.follow_mouse());
        assert!(!ctl.resume());
    }
}
