use glam::Vec2;

/// The mascot as the motion loop sees it.
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    /// Top-left corner in screen pixels.
    pub pos: Vec2,
    /// Velocity in px/tick. Persists across ticks.
    pub vel: Vec2,
    /// Current frame size (w, h).
    pub size: (i32, i32),
    /// Facing; only flips once |vx| passes the facing threshold.
    pub moving_right: bool,
}

impl Sprite {
    pub fn new(pos: Vec2, vel: Vec2, size: (i32, i32)) -> Self {
        Self {
            pos,
            vel,
            size,
            moving_right: true,
        }
    }

    /// Flip facing if `vx` crossed the threshold. Returns the new facing when
    /// it changed. `strict` selects `>`/`<` instead of `>=`/`<=`.
    pub fn update_facing(&mut self, threshold: f32, strict: bool) -> Option<bool> {
        let vx = self.vel.x;
        let (right, left) = if strict {
            (vx > threshold, vx < -threshold)
        } else {
            (vx >= threshold, vx <= -threshold)
        };
        if right && !self.moving_right {
            self.moving_right = true;
            Some(true)
        } else if left && self.moving_right {
            self.moving_right = false;
            Some(false)
        } else {
            None
        }
    }

    /// Position as the host sees it (truncated to whole pixels).
    pub fn pixel_pos(&self) -> (i32, i32) {
        (self.pos.x as i32, self.pos.y as i32)
    }
}

/// Screen and sprite extents for one tick, sanitized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub screen_w: i32,
    pub screen_h: i32,
    pub sprite_w: i32,
    pub sprite_h: i32,
}

impl Bounds {
    /// Non-positive extents are a host bug; clamp them to 1 px and log
    /// rather than produce empty ranges.
    pub fn new(screen: (i32, i32), sprite: (i32, i32)) -> Self {
        if screen.0 <= 0 || screen.1 <= 0 || sprite.0 <= 0 || sprite.1 <= 0 {
            log::warn!(
                "Degenerate bounds from host: screen {}x{}, sprite {}x{} (clamping to 1px)",
                screen.0,
                screen.1,
                sprite.0,
                sprite.1
            );
        }
        Self {
            screen_w: screen.0.max(1),
            screen_h: screen.1.max(1),
            sprite_w: sprite.0.max(1),
            sprite_h: sprite.1.max(1),
        }
    }

    /// Largest valid x for the sprite's top-left corner (never negative).
    pub fn max_x(&self) -> i32 {
        (self.screen_w - self.sprite_w).max(0)
    }

    /// Largest valid y for the sprite's top-left corner (never negative).
    pub fn max_y(&self) -> i32 {
        (self.screen_h - self.sprite_h).max(0)
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= self.max_x() as f32 && pos.y <= self.max_y() as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MotionState {
    /// Roaming between random waypoints.
    Wander,
    /// Heading for the pointer because it is far away.
    Follow,
    /// Hovering near the pointer because it is close.
    Curious,
    /// Standing still with a countdown.
    Rest,
}

impl MotionState {
    pub fn label(self) -> &'static str {
        match self {
            MotionState::Wander => "wander",
            MotionState::Follow => "follow",
            MotionState::Curious => "curious",
            MotionState::Rest => "rest",
        }
    }

    pub fn tracks_pointer(self) -> bool {
        matches!(self, MotionState::Follow | MotionState::Curious)
    }
}

/// Notifications queued by the controller for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    PositionChanged { x: i32, y: i32 },
    FacingChanged { right: bool },
    EnterIdle,
    EnterMove,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_hysteresis() {
        let mut s = Sprite::new(Vec2::ZERO, Vec2::new(0.4, 0.0), (10, 10));
        s.moving_right = false;
        assert_eq!(s.update_facing(0.5, false), None);
        s.vel.x = 0.5;
        assert_eq!(s.update_facing(0.5, true), None);
        assert_eq!(s.update_facing(0.5, false), Some(true));
        s.vel.x = -0.3;
        assert_eq!(s.update_facing(0.5, false), None);
        assert!(s.moving_right);
    }

    #[test]
    fn degenerate_bounds_clamp() {
        let b = Bounds::new((0, -5), (100, 0));
        assert_eq!(b.screen_w, 1);
        assert_eq!(b.screen_h, 1);
        assert_eq!(b.sprite_h, 1);
        assert_eq!(b.max_x(), 0);
        assert_eq!(b.max_y(), 0);
    }
}
