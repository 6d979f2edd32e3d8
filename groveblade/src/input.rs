use std::collections::HashSet;

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Set of keys currently held, fed from winit key events.
pub struct InputState {
    keys_down: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
        }
    }

    /// Handle a keyboard input event from winit.
    pub fn handle_key(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(keycode) = event.physical_key {
            match event.state {
                ElementState::Pressed => self.press(keycode),
                ElementState::Released => self.release(keycode),
            }
        }
    }

    pub fn press(&mut self, key: KeyCode) {
        self.keys_down.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Returns true if the key is currently held down.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Attack,
    Cast,
    SwitchWeapon,
    SwitchMagic,
}

/// Key bindings for player actions.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: Vec<(KeyCode, Action)>,
}

impl Keymap {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    #[must_use]
    pub fn bind(mut self, key: KeyCode, action: Action) -> Self {
        self.bindings.push((key, action));
        self
    }

    /// True if any key bound to `action` is held.
    pub fn is_held(&self, input: &InputState, action: Action) -> bool {
        self.bindings
            .iter()
            .any(|(key, bound)| *bound == action && input.is_key_down(*key))
    }
}

impl Default for Keymap {
    /// Arrow keys to move, space to attack, left control to cast, Q and E to
    /// cycle weapon and magic.
    fn default() -> Self {
        Self::new()
            .bind(KeyCode::ArrowUp, Action::Up)
            .bind(KeyCode::ArrowDown, Action::Down)
            .bind(KeyCode::ArrowLeft, Action::Left)
            .bind(KeyCode::ArrowRight, Action::Right)
            .bind(KeyCode::Space, Action::Attack)
            .bind(KeyCode::ControlLeft, Action::Cast)
            .bind(KeyCode::KeyQ, Action::SwitchWeapon)
            .bind(KeyCode::KeyE, Action::SwitchMagic)
    }
}

/// Held-state snapshot of every player action, taken once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub attack: bool,
    pub cast: bool,
    pub switch_weapon: bool,
    pub switch_magic: bool,
}

impl ControlState {
    pub fn capture(input: &InputState, keymap: &Keymap) -> Self {
        Self {
            up: keymap.is_held(input, Action::Up),
            down: keymap.is_held(input, Action::Down),
            left: keymap.is_held(input, Action::Left),
            right: keymap.is_held(input, Action::Right),
            attack: keymap.is_held(input, Action::Attack),
            cast: keymap.is_held(input, Action::Cast),
            switch_weapon: keymap.is_held(input, Action::SwitchWeapon),
            switch_magic: keymap.is_held(input, Action::SwitchMagic),
        }
    }

    pub fn idle() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_until_released() {
        let mut input = InputState::new();
        input.press(KeyCode::Space);
        input.press(KeyCode::Space);
        assert!(input.is_key_down(KeyCode::Space));
        input.release(KeyCode::Space);
        assert!(!input.is_key_down(KeyCode::Space));
        input.release(KeyCode::Space);
        assert!(!input.is_key_down(KeyCode::Space));
    }

    #[test]
    fn capture_uses_default_bindings() {
        let mut input = InputState::new();
        input.press(KeyCode::ArrowLeft);
        input.press(KeyCode::Space);
        let controls = ControlState::capture(&input, &Keymap::default());
        assert_eq!(
            controls,
            ControlState {
                left: true,
                attack: true,
                ..ControlState::default()
            }
        );
    }

    #[test]
    fn custom_bindings_are_respected() {
        let keymap = Keymap::new().bind(KeyCode::KeyW, Action::Up);
        let mut input = InputState::new();
        input.press(KeyCode::ArrowUp);
        assert!(!ControlState::capture(&input, &keymap).up);
        input.press(KeyCode::KeyW);
        assert!(ControlState::capture(&input, &keymap).up);
    }
}
