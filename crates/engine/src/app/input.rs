use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicalButton {
    A,
    B,
    X,
    Y,
    Up,
    Down,
    Left,
    Right,
    L,
    R,
    Zl,
    Zr,
    L3,
    R3,
    Plus,
    Minus,
    Home,
    Capture,
}

pub const BUTTON_COUNT: usize = 18;

impl LogicalButton {
    pub const ALL: [LogicalButton; BUTTON_COUNT] = [
        LogicalButton::A,
        LogicalButton::B,
        LogicalButton::X,
        LogicalButton::Y,
        LogicalButton::Up,
        LogicalButton::Down,
        LogicalButton::Left,
        LogicalButton::Right,
        LogicalButton::L,
        LogicalButton::R,
        LogicalButton::Zl,
        LogicalButton::Zr,
        LogicalButton::L3,
        LogicalButton::R3,
        LogicalButton::Plus,
        LogicalButton::Minus,
        LogicalButton::Home,
        LogicalButton::Capture,
    ];

    const fn index(self) -> usize {
        match self {
            LogicalButton::A => 0,
            LogicalButton::B => 1,
            LogicalButton::X => 2,
            LogicalButton::Y => 3,
            LogicalButton::Up => 4,
            LogicalButton::Down => 5,
            LogicalButton::Left => 6,
            LogicalButton::Right => 7,
            LogicalButton::L => 8,
            LogicalButton::R => 9,
            LogicalButton::Zl => 10,
            LogicalButton::Zr => 11,
            LogicalButton::L3 => 12,
            LogicalButton::R3 => 13,
            LogicalButton::Plus => 14,
            LogicalButton::Minus => 15,
            LogicalButton::Home => 16,
            LogicalButton::Capture => 17,
        }
    }

    /// Same spelling as the serialized form used in binding files.
    pub const fn name(self) -> &'static str {
        match self {
            LogicalButton::A => "A",
            LogicalButton::B => "B",
            LogicalButton::X => "X",
            LogicalButton::Y => "Y",
            LogicalButton::Up => "UP",
            LogicalButton::Down => "DOWN",
            LogicalButton::Left => "LEFT",
            LogicalButton::Right => "RIGHT",
            LogicalButton::L => "L",
            LogicalButton::R => "R",
            LogicalButton::Zl => "ZL",
            LogicalButton::Zr => "ZR",
            LogicalButton::L3 => "L3",
            LogicalButton::R3 => "R3",
            LogicalButton::Plus => "PLUS",
            LogicalButton::Minus => "MINUS",
            LogicalButton::Home => "HOME",
            LogicalButton::Capture => "CAPTURE",
        }
    }
}

/// Session-wide button state. Built once by the loop runner and mutated only by
/// input sources (key bindings and on-screen controls); consumers only ever see
/// the [`InputSnapshot`] taken for their tick.
///
/// A press edge is latched on the up -> down transition and kept until the next
/// [`ButtonStore::snapshot_for_tick`], even if the button is released first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonStore {
    down: [bool; BUTTON_COUNT],
    pressed_edge: [bool; BUTTON_COUNT],
}

impl ButtonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: LogicalButton) {
        let index = button.index();
        if !self.down[index] {
            self.pressed_edge[index] = true;
        }
        self.down[index] = true;
    }

    pub fn release(&mut self, button: LogicalButton) {
        self.down[button.index()] = false;
    }

    pub fn is_pressed(&self, button: LogicalButton) -> bool {
        self.down[button.index()]
    }

    pub fn release_all(&mut self) {
        self.down = [false; BUTTON_COUNT];
    }

    pub fn pressed_buttons(&self) -> impl Iterator<Item = LogicalButton> + '_ {
        LogicalButton::ALL
            .into_iter()
            .filter(|button| self.is_pressed(*button))
    }

    pub fn snapshot_for_tick(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            down: self.down,
            pressed_edge: self.pressed_edge,
        };
        self.pressed_edge = [false; BUTTON_COUNT];
        snapshot
    }
}

/// Input as seen by one simulation tick.
///
/// `is_down` is level-triggered: true every tick the button is held.
/// `just_pressed` is edge-triggered: true in exactly one tick per press. Both
/// are pure reads, so the shell and the active game observe the same edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    down: [bool; BUTTON_COUNT],
    pressed_edge: [bool; BUTTON_COUNT],
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_down(&self, button: LogicalButton) -> bool {
        self.down[button.index()]
    }

    pub fn just_pressed(&self, button: LogicalButton) -> bool {
        self.pressed_edge[button.index()]
    }

    pub fn any_down(&self) -> bool {
        self.down.iter().any(|is_down| *is_down)
    }

    pub fn with_button_down(mut self, button: LogicalButton, is_down: bool) -> Self {
        self.down[button.index()] = is_down;
        self
    }

    /// Marks a fresh press: the button is down and its edge is set.
    pub fn with_just_pressed(mut self, button: LogicalButton) -> Self {
        self.down[button.index()] = true;
        self.pressed_edge[button.index()] = true;
        self
    }
}
