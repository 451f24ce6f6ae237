//! Desktop reads for the host driver. Only Windows talks to the OS; other
//! targets get a fixed screen and a parked pointer so the core still runs.

#[cfg(windows)]
pub mod win32;

/// Used when the OS gives us nothing better.
pub const FALLBACK_SCREEN: (i32, i32) = (1920, 1080);

pub fn screen_size() -> (i32, i32) {
    #[cfg(windows)]
    {
        let (w, h) = win32::get_screen_size();
        if w > 0 && h > 0 {
            return (w, h);
        }
    }
    FALLBACK_SCREEN
}

pub fn pointer_position() -> (i32, i32) {
    #[cfg(windows)]
    {
        win32::get_mouse_pos()
    }
    #[cfg(not(windows))]
    {
        (0, 0)
    }
}

/// Hotkeys polled once per driver iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hotkeys {
    pub quit: bool,
    pub cycle_mode: bool,
    pub toggle_follow: bool,
    pub toggle_pause: bool,
}

pub fn poll_hotkeys() -> Hotkeys {
    #[cfg(windows)]
    {
        Hotkeys {
            quit: win32::is_escape_pressed(),
            cycle_mode: win32::is_f11_pressed(),
            toggle_follow: win32::is_f10_pressed(),
            toggle_pause: win32::is_f9_pressed(),
        }
    }
    #[cfg(not(windows))]
    {
        Hotkeys::default()
    }
}
