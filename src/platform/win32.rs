use windows::Win32::Foundation::POINT;
use windows::Win32::UI::Input::KeyboardAndMouse::GetAsyncKeyState;
use windows::Win32::UI::WindowsAndMessaging::{GetCursorPos, GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

/// Get the current global mouse cursor position in screen pixels.
pub fn get_mouse_pos() -> (i32, i32) {
    let mut point = POINT::default();
    unsafe {
        let _ = GetCursorPos(&mut point);
    }
    (point.x, point.y)
}

/// Primary monitor size in pixels.
pub fn get_screen_size() -> (i32, i32) {
    unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) }
}

/// Check if the ESC key is currently pressed (works regardless of window focus).
pub fn is_escape_pressed() -> bool {
    // VK_ESCAPE = 0x1B. High bit set = key is currently down.
    unsafe { GetAsyncKeyState(0x1B) & (0x8000u16 as i16) != 0 }
}

/// Check if F11 was pressed since last call (mode cycle hotkey).
pub fn is_f11_pressed() -> bool {
    // VK_F11 = 0x7A
    unsafe { GetAsyncKeyState(0x7A) & 1 != 0 }
}

/// Check if F10 was pressed since last call (follow toggle hotkey).
pub fn is_f10_pressed() -> bool {
    // VK_F10 = 0x79
    unsafe { GetAsyncKeyState(0x79) & 1 != 0 }
}

/// Check if F9 was pressed since last call (pause toggle hotkey).
pub fn is_f9_pressed() -> bool {
    // VK_F9 = 0x78
    unsafe { GetAsyncKeyState(0x78) & 1 != 0 }
}
