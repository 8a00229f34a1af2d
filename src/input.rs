//! Per-frame input snapshots.
//!
//! The host records device events in an `InputTracker`/`MouseTracker` and takes exactly one
//! snapshot per frame. Scenes only ever see the snapshots, which are read-only:
//!
//! ```
//! use chessframe::input::{Action, InputState, InputTracker};
//!
//! let mut tracker = InputTracker::new();
//! tracker.press(Action::Start);
//! let actions = tracker.snapshot();
//! assert!(actions[Action::Start][InputState::Pressed]);
//! assert!(!actions[Action::Back][InputState::Pressed]);
//! ```

use crate::surface::Point;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::ops::Index;

/// Logical, keyboard-mapped actions.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum Action {
    Start,
    Back,
}

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// What happened to an input during one frame.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum InputState {
    /// Went down this frame.
    Pressed,
    /// Down this frame and the frame before.
    Held,
    /// Went up this frame.
    Released,
}

/// The `InputState -> bool` row of one input. At most one flag is ever set.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub struct InputFlags {
    pressed: bool,
    held: bool,
    released: bool,
}

static IDLE: InputFlags = InputFlags {
    pressed: false,
    held: false,
    released: false,
};

impl InputFlags {
    pub fn from_levels(down_now: bool, down_before: bool) -> Self {
        Self {
            pressed: down_now && !down_before,
            held: down_now && down_before,
            released: !down_now && down_before,
        }
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn held(&self) -> bool {
        self.held
    }

    pub fn released(&self) -> bool {
        self.released
    }

    pub fn is_idle(&self) -> bool {
        *self == IDLE
    }
}

impl Index<InputState> for InputFlags {
    type Output = bool;

    fn index(&self, state: InputState) -> &bool {
        match state {
            InputState::Pressed => &self.pressed,
            InputState::Held => &self.held,
            InputState::Released => &self.released,
        }
    }
}

/// Immutable snapshot of a set of inputs for one frame.
///
/// Only inputs with activity are stored. Everything else reads as idle.
#[derive(Clone, Debug)]
pub struct InputBuffer<K: Eq + Hash> {
    entries: HashMap<K, InputFlags>,
}

impl<K: Copy + Eq + Hash> InputBuffer<K> {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Derives the edges from what is down now and what was down the frame before.
    pub fn from_levels(down_now: &HashSet<K>, down_before: &HashSet<K>) -> Self {
        let entries = down_now
            .union(down_before)
            .map(|key| {
                let flags = InputFlags::from_levels(down_now.contains(key), down_before.contains(key));
                (*key, flags)
            })
            .collect();
        Self { entries }
    }

    pub fn flags(&self, key: K) -> InputFlags {
        self[key]
    }

    pub fn is(&self, key: K, state: InputState) -> bool {
        self[key][state]
    }

    pub fn pressed(&self, key: K) -> bool {
        self[key].pressed
    }

    pub fn held(&self, key: K) -> bool {
        self[key].held
    }

    pub fn released(&self, key: K) -> bool {
        self[key].released
    }

    /// Inputs that saw any activity this frame.
    pub fn active(&self) -> impl Iterator<Item = (K, InputFlags)> + '_ {
        self.entries.iter().map(|(key, flags)| (*key, *flags))
    }
}

impl<K: Copy + Eq + Hash> Default for InputBuffer<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: Eq + Hash> Index<K> for InputBuffer<K> {
    type Output = InputFlags;

    fn index(&self, key: K) -> &InputFlags {
        self.entries.get(&key).unwrap_or(&IDLE)
    }
}

pub type ActionBuffer = InputBuffer<Action>;

/// Mouse buttons of one frame plus where the cursor was.
#[derive(Clone, Debug, Default)]
pub struct MouseBuffer {
    pub buttons: InputBuffer<MouseButton>,
    pub position: Point,
}

impl MouseBuffer {
    pub fn new(buttons: InputBuffer<MouseButton>, position: Point) -> Self {
        Self { buttons, position }
    }

    pub fn pressed(&self, button: MouseButton) -> bool {
        self.buttons.pressed(button)
    }
}

impl Index<MouseButton> for MouseBuffer {
    type Output = InputFlags;

    fn index(&self, button: MouseButton) -> &InputFlags {
        &self.buttons[button]
    }
}

/// Host side: accumulates device events between two frames.
///
/// An input that goes down and up again before the next snapshot still reports `Pressed`
/// in that snapshot; its release shows up one frame later.
#[derive(Clone, Debug)]
pub struct InputTracker<K: Eq + Hash> {
    down: HashSet<K>,
    down_before: HashSet<K>,
    deferred_release: HashSet<K>,
}

impl<K: Copy + Eq + Hash> InputTracker<K> {
    pub fn new() -> Self {
        Self {
            down: HashSet::new(),
            down_before: HashSet::new(),
            deferred_release: HashSet::new(),
        }
    }

    pub fn press(&mut self, key: K) {
        self.down.insert(key);
        self.deferred_release.remove(&key);
    }

    pub fn release(&mut self, key: K) {
        if self.down.contains(&key) && !self.down_before.contains(&key) {
            // Went down after the last snapshot. Keep it for one frame.
            self.deferred_release.insert(key);
        } else {
            self.down.remove(&key);
        }
    }

    pub fn is_down(&self, key: K) -> bool {
        self.down.contains(&key)
    }

    /// Closes the current frame.
    pub fn snapshot(&mut self) -> InputBuffer<K> {
        let buffer = InputBuffer::from_levels(&self.down, &self.down_before);
        self.down_before = self.down.clone();
        // Taps of this frame count as released from the next snapshot on
        for key in self.deferred_release.drain() {
            self.down.remove(&key);
        }
        buffer
    }
}

impl<K: Copy + Eq + Hash> Default for InputTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MouseTracker {
    buttons: InputTracker<MouseButton>,
    position: Point,
}

impl MouseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, position: Point) {
        self.position = position;
    }

    pub fn press(&mut self, button: MouseButton) {
        self.buttons.press(button);
    }

    pub fn release(&mut self, button: MouseButton) {
        self.buttons.release(button);
    }

    pub fn snapshot(&mut self) -> MouseBuffer {
        MouseBuffer::new(self.buttons.snapshot(), self.position)
    }
}
