use chrono::NaiveDateTime;

use crate::mode::BehaviorMode;
use crate::routine::{GreetingKind, ReminderKind};

/// Everything the core needs from the application hosting the sprite.
///
/// Reads are synchronous and must never block. Callbacks are invoked from
/// inside [`crate::pet::Pet::fire`] and the command methods, on the same
/// thread, in the order the core produced them.
pub trait Host {
    /// Display bounds in pixels.
    fn screen_size(&self) -> (i32, i32);
    /// Pointer position in screen coordinates.
    fn pointer_position(&self) -> (i32, i32);
    /// Local wall-clock time for the routine buckets.
    fn local_time(&self) -> NaiveDateTime;
    /// Reminders stay quiet while the chat panel is open.
    fn chat_panel_visible(&self) -> bool {
        false
    }

    /// Integer position changed; move the window.
    fn on_position_changed(&mut self, x: i32, y: i32);
    /// Swap to the mirrored frame set and restart the animation.
    fn on_facing_changed(&mut self, right: bool);
    fn on_enter_idle(&mut self);
    fn on_enter_move(&mut self);
    fn on_reminder(&mut self, kind: ReminderKind, message: &str);
    fn on_greeting(&mut self, kind: GreetingKind, message: &str);

    fn persist_behavior_mode(&mut self, _mode: BehaviorMode) {}
    fn persist_follow_mouse(&mut self, _enabled: bool) {}
}
