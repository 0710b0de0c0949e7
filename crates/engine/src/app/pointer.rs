use super::input::{ButtonStore, LogicalButton};

/// Axis-aligned rectangle in logical buffer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ControlRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && py >= self.y && px < self.x + self.width && py < self.y + self.height
    }
}

/// On-screen buttons. Later controls are drawn over, and hit-tested before,
/// earlier ones.
#[derive(Debug, Clone, Default)]
pub struct ControlSurface {
    controls: Vec<(ControlRect, LogicalButton)>,
}

impl ControlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rect: ControlRect, button: LogicalButton) {
        self.controls.push((rect, button));
    }

    pub fn with_control(mut self, rect: ControlRect, button: LogicalButton) -> Self {
        self.add(rect, button);
        self
    }

    pub fn button_at(&self, px: i32, py: i32) -> Option<LogicalButton> {
        self.controls
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(px, py))
            .map(|(_, button)| *button)
    }

    pub fn rect_of(&self, button: LogicalButton) -> Option<ControlRect> {
        self.controls
            .iter()
            .rev()
            .find(|(_, candidate)| *candidate == button)
            .map(|(rect, _)| *rect)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ControlRect, LogicalButton)> + '_ {
        self.controls.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

/// Translates pointer press/release into store mutations, bypassing key
/// bindings. At most one control is held by the pointer at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    position_px: Option<(i32, i32)>,
    held: Option<LogicalButton>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position_px(&self) -> Option<(i32, i32)> {
        self.position_px
    }

    pub fn held(&self) -> Option<LogicalButton> {
        self.held
    }

    pub fn pointer_down(
        &mut self,
        surface: &ControlSurface,
        store: &mut ButtonStore,
    ) -> Option<LogicalButton> {
        let (px, py) = self.position_px?;
        let button = surface.button_at(px, py)?;
        if let Some(previous) = self.held.replace(button) {
            if previous != button {
                store.release(previous);
            }
        }
        store.press(button);
        Some(button)
    }

    pub fn pointer_up(&mut self, store: &mut ButtonStore) -> Option<LogicalButton> {
        let button = self.held.take()?;
        store.release(button);
        Some(button)
    }

    /// Moving off the held control counts as pointer-leave for that control.
    pub fn pointer_moved(
        &mut self,
        position_px: Option<(i32, i32)>,
        surface: &ControlSurface,
        store: &mut ButtonStore,
    ) -> Option<LogicalButton> {
        self.position_px = position_px;
        let held = self.held?;
        let still_inside = match (position_px, surface.rect_of(held)) {
            (Some((px, py)), Some(rect)) => rect.contains(px, py),
            _ => false,
        };
        if still_inside {
            return None;
        }
        self.pointer_up(store)
    }

    pub fn pointer_left(&mut self, store: &mut ButtonStore) -> Option<LogicalButton> {
        self.position_px = None;
        self.pointer_up(store)
    }
}
