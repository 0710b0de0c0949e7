use std::collections::HashMap;

use super::input::{ButtonStore, LogicalButton};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Raw key identifier -> logical button.
///
/// Identifiers spell named keys by name (`"ArrowUp"`, `"Enter"`) and character
/// keys by their text (`"w"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    map: HashMap<String, LogicalButton>,
}

const STANDARD_BINDINGS: [(&str, LogicalButton); 18] = [
    ("ArrowUp", LogicalButton::Up),
    ("ArrowDown", LogicalButton::Down),
    ("ArrowLeft", LogicalButton::Left),
    ("ArrowRight", LogicalButton::Right),
    ("w", LogicalButton::Up),
    ("s", LogicalButton::Down),
    ("a", LogicalButton::Left),
    ("d", LogicalButton::Right),
    ("l", LogicalButton::A),
    ("k", LogicalButton::B),
    ("i", LogicalButton::X),
    ("j", LogicalButton::Y),
    ("Enter", LogicalButton::Plus),
    ("Backspace", LogicalButton::Minus),
    ("h", LogicalButton::Home),
    ("c", LogicalButton::Capture),
    ("q", LogicalButton::L),
    ("e", LogicalButton::R),
];

impl Default for KeyBindings {
    fn default() -> Self {
        Self::standard()
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn standard() -> Self {
        STANDARD_BINDINGS
            .iter()
            .map(|(key, button)| ((*key).to_string(), *button))
            .collect()
    }

    /// Returns the button previously bound to `key`, if any.
    pub fn bind(&mut self, key: impl Into<String>, button: LogicalButton) -> Option<LogicalButton> {
        self.map.insert(key.into(), button)
    }

    pub fn unbind(&mut self, key: &str) -> Option<LogicalButton> {
        self.map.remove(key)
    }

    pub fn lookup(&self, key: &str) -> Option<LogicalButton> {
        if let Some(button) = self.map.get(key) {
            return Some(*button);
        }
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(single), None) if single.is_uppercase() => {
                let lowered: String = single.to_lowercase().collect();
                self.map.get(lowered.as_str()).copied()
            }
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, LogicalButton)> + '_ {
        self.map.iter().map(|(key, button)| (key.as_str(), *button))
    }

    /// Applies one raw key transition to the store. Unmapped keys are ignored;
    /// releasing a key that was never pressed is harmless.
    pub fn apply(
        &self,
        key: &str,
        state: KeyState,
        store: &mut ButtonStore,
    ) -> Option<LogicalButton> {
        let button = self.lookup(key)?;
        match state {
            KeyState::Pressed => store.press(button),
            KeyState::Released => store.release(button),
        }
        Some(button)
    }
}

impl FromIterator<(String, LogicalButton)> for KeyBindings {
    fn from_iter<T: IntoIterator<Item = (String, LogicalButton)>>(iter: T) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}
