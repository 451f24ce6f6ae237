use glam::Vec2;

use super::components::Bounds;
use super::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

const SIDES: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

/// Next wander waypoint.
///
/// With `outside_target_chance` the point sits `outside_margin()` px past a
/// random edge, which walks the sprite into the wall and makes it bounce.
pub fn random_target(rng: &mut fastrand::Rng, bounds: &Bounds, tuning: &Tuning) -> Vec2 {
    if rng.f32() < tuning.outside_target_chance {
        let margin = tuning.outside_margin();
        let (x, y) = match SIDES[rng.usize(0..SIDES.len())] {
            Side::Left => (-margin, rng.i32(0..=bounds.max_y())),
            Side::Right => (bounds.screen_w + margin, rng.i32(0..=bounds.max_y())),
            Side::Top => (rng.i32(0..=bounds.max_x()), -margin),
            Side::Bottom => (rng.i32(0..=bounds.max_x()), bounds.screen_h + margin),
        };
        return Vec2::new(x as f32, y as f32);
    }

    Vec2::new(
        rng.i32(0..=bounds.max_x()) as f32,
        rng.i32(0..=bounds.max_y()) as f32,
    )
}

/// A point near the pointer, `offset` px of slack on each axis, kept on-screen.
pub fn follow_target(rng: &mut fastrand::Rng, pointer: Vec2, offset: i32, bounds: &Bounds) -> Vec2 {
    let offset = offset.max(0);
    let x = pointer.x + rng.i32(-offset..=offset) as f32;
    let y = pointer.y + rng.i32(-offset..=offset) as f32;
    Vec2::new(
        x.clamp(0.0, bounds.max_x() as f32),
        y.clamp(0.0, bounds.max_y() as f32),
    )
}
