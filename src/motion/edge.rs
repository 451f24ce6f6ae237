use super::components::{Bounds, Sprite};

/// Result of one edge pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeOutcome {
    /// Some axis was clamped and bounced.
    pub hit: bool,
    /// Sprite was fully off-screen before clamping.
    pub escaped: bool,
    /// Facing flipped because of the bounce.
    pub facing_changed: Option<bool>,
}

/// Clamp the sprite on-screen and reflect velocity off whichever walls it
/// touched. Each axis bounces independently, so corners flip both.
///
/// `escaped` is reported but never acted on: the sprite always bounces.
pub fn handle_edge(sprite: &mut Sprite, bounds: &Bounds, facing_threshold: f32) -> EdgeOutcome {
    let (w, h) = (bounds.sprite_w as f32, bounds.sprite_h as f32);
    let (sw, sh) = (bounds.screen_w as f32, bounds.screen_h as f32);
    let mut out = EdgeOutcome::default();

    let p = sprite.pos;
    if p.x < -w || p.x > sw || p.y < -h || p.y > sh {
        out.escaped = true;
        log::trace!("Sprite off-screen at ({:.0}, {:.0}); bouncing back", p.x, p.y);
    }

    if sprite.pos.x <= 0.0 {
        sprite.pos.x = 0.0;
        sprite.vel.x = sprite.vel.x.abs();
        out.hit = true;
    } else if sprite.pos.x + w >= sw {
        sprite.pos.x = bounds.max_x() as f32;
        sprite.vel.x = -sprite.vel.x.abs();
        out.hit = true;
    }

    if sprite.pos.y <= 0.0 {
        sprite.pos.y = 0.0;
        sprite.vel.y = sprite.vel.y.abs();
        out.hit = true;
    } else if sprite.pos.y + h >= sh {
        sprite.pos.y = bounds.max_y() as f32;
        sprite.vel.y = -sprite.vel.y.abs();
        out.hit = true;
    }

    if out.hit {
        out.facing_changed = sprite.update_facing(facing_threshold, true);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn bounds() -> Bounds {
        Bounds::new((1920, 1080), (100, 100))
    }

    #[test]
    fn left_wall_reflects_velocity() {
        let mut s = Sprite::new(Vec2::new(0.0, 500.0), Vec2::new(-5.0, 0.0), (100, 100));
        s.moving_right = false;
        let out = handle_edge(&mut s, &bounds(), 0.5);
        assert_eq!(s.pos.x, 0.0);
        assert_eq!(s.vel.x, 5.0);
        assert!(out.hit);
        assert_eq!(out.facing_changed, Some(true));
    }

    #[test]
    fn corner_bounces_both_axes() {
        let mut s = Sprite::new(Vec2::new(1830.0, 990.0), Vec2::new(3.0, 2.0), (100, 100));
        let out = handle_edge(&mut s, &bounds(), 0.5);
        assert_eq!(s.pos, Vec2::new(1820.0, 980.0));
        assert_eq!(s.vel, Vec2::new(-3.0, -2.0));
        assert_eq!(out.facing_changed, Some(false));
    }

    #[test]
    fn slow_bounce_keeps_facing() {
        let mut s = Sprite::new(Vec2::new(-1.0, 10.0), Vec2::new(-0.5, 0.0), (100, 100));
        s.moving_right = false;
        let out = handle_edge(&mut s, &bounds(), 0.5);
        assert!(out.hit);
        assert_eq!(out.facing_changed, None);
        assert!(!s.moving_right);
    }

    #[test]
    fn far_off_screen_is_flagged_but_clamped() {
        let mut s = Sprite::new(Vec2::new(-250.0, 300.0), Vec2::new(-1.0, 0.0), (100, 100));
        let out = handle_edge(&mut s, &bounds(), 0.5);
        assert!(out.escaped);
        assert!(bounds().contains(s.pos));
    }

    #[test]
    fn oversized_sprite_pins_to_origin() {
        let b = Bounds::new((50, 40), (100, 100));
        let mut s = Sprite::new(Vec2::new(3.0, 2.0), Vec2::new(1.0, 1.0), (100, 100));
        let out = handle_edge(&mut s, &b, 0.5);
        assert!(out.hit);
        assert_eq!(s.pos, Vec2::ZERO);
        assert!(b.contains(s.pos));
    }

    #[test]
    fn interior_is_untouched() {
        let mut s = Sprite::new(Vec2::new(400.0, 300.0), Vec2::new(-2.0, 1.0), (100, 100));
        let out = handle_edge(&mut s, &bounds(), 0.5);
        assert_eq!(out, EdgeOutcome::default());
        assert_eq!(s.vel, Vec2::new(-2.0, 1.0));
    }
}
