use raylib::prelude::*;

/// What the player asked for this tick, independent of the device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub turn: i8,
    pub walk: i8,
    pub use_door: bool,
    pub fire: bool,
    pub quit: bool,
}

/// Collapses a pair of opposing keys into -1, 0 or 1.
#[inline]
pub fn axis(negative: bool, positive: bool) -> i8 {
    i8::from(positive) - i8::from(negative)
}

pub fn process_events(window: &RaylibHandle) -> Intents {
    let down = |k| window.is_key_down(k);
    Intents {
        turn: axis(
            down(KeyboardKey::KEY_A) || down(KeyboardKey::KEY_LEFT),
            down(KeyboardKey::KEY_D) || down(KeyboardKey::KEY_RIGHT),
        ),
        walk: axis(
            down(KeyboardKey::KEY_S) || down(KeyboardKey::KEY_DOWN),
            down(KeyboardKey::KEY_W) || down(KeyboardKey::KEY_UP),
        ),
        use_door: window.is_key_pressed(KeyboardKey::KEY_F),
        fire: window.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT),
        quit: window.is_key_pressed(KeyboardKey::KEY_Q),
    }
}
