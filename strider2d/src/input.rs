use std::collections::HashSet;

/// Logical actions the core reacts to. How they map onto physical keys is
/// the embedding application's business.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    ChargeJump,
}

/// Tracks held and freshly-pressed actions across frames.
///
/// Actions are level-triggered booleans, except the initial jump launch
/// which reads the edge-triggered `is_pressed` set so a held key does not
/// repeat-jump.
#[derive(Debug, Default)]
pub struct ActionState {
    down: HashSet<Action>,
    pressed: HashSet<Action>,
}

impl ActionState {
    pub fn new() -> Self {
        Self {
            down: HashSet::new(),
            pressed: HashSet::new(),
        }
    }

    /// Clear per-frame pressed flags. Call once at the top of each frame,
    /// before feeding this frame's events.
    pub fn begin_frame(&mut self) {
        self.pressed.clear();
    }

    /// Record that an action's key went down.
    pub fn press(&mut self, action: Action) {
        if self.down.insert(action) {
            self.pressed.insert(action);
        }
    }

    /// Record that an action's key was released.
    pub fn release(&mut self, action: Action) {
        self.down.remove(&action);
    }

    /// Returns true while the action's key is held.
    pub fn is_down(&self, action: Action) -> bool {
        self.down.contains(&action)
    }

    /// Returns true only on the frame the action's key went down.
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }
}
