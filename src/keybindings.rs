use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    ClosePanel,
    MinimizePanel,
    ToggleFullscreen,
    NewNote,
    OpenHelp,
    OpenLog,
    /// Activate the n-th desktop icon (zero based).
    Launch(u8),
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    GrowWidth,
    ShrinkWidth,
    GrowHeight,
    ShrinkHeight,
    LeaveFullscreen,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Quit => write!(f, "Quit"),
            Action::FocusNext => write!(f, "Focus next panel"),
            Action::FocusPrev => write!(f, "Focus previous panel"),
            Action::ClosePanel => write!(f, "Close panel"),
            Action::MinimizePanel => write!(f, "Minimize panel"),
            Action::ToggleFullscreen => write!(f, "Toggle fullscreen"),
            Action::NewNote => write!(f, "New note"),
            Action::OpenHelp => write!(f, "Open help"),
            Action::OpenLog => write!(f, "Open system log"),
            Action::Launch(n) => write!(f, "Open desktop icon {}", n + 1),
            Action::MoveLeft => write!(f, "Move panel left"),
            Action::MoveRight => write!(f, "Move panel right"),
            Action::MoveUp => write!(f, "Move panel up"),
            Action::MoveDown => write!(f, "Move panel down"),
            Action::GrowWidth => write!(f, "Widen panel"),
            Action::ShrinkWidth => write!(f, "Narrow panel"),
            Action::GrowHeight => write!(f, "Heighten panel"),
            Action::ShrinkHeight => write!(f, "Shorten panel"),
            Action::LeaveFullscreen => write!(f, "Leave fullscreen"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let ctrl = KeyModifiers::CONTROL;
        let alt = KeyModifiers::ALT;
        let alt_shift = KeyModifiers::ALT | KeyModifiers::SHIFT;
        let none = KeyModifiers::NONE;

        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), ctrl));
        kb.add(FocusNext, KeyCombo::new(KeyCode::Tab, none));
        kb.add(FocusPrev, KeyCombo::new(KeyCode::BackTab, none));
        kb.add(ClosePanel, KeyCombo::new(KeyCode::Char('w'), ctrl));
        kb.add(MinimizePanel, KeyCombo::new(KeyCode::Char('m'), alt));
        kb.add(ToggleFullscreen, KeyCombo::new(KeyCode::F(11), none));
        kb.add(ToggleFullscreen, KeyCombo::new(KeyCode::Char('f'), alt));
        kb.add(NewNote, KeyCombo::new(KeyCode::Char('n'), ctrl));
        kb.add(OpenHelp, KeyCombo::new(KeyCode::F(1), none));
        kb.add(OpenLog, KeyCombo::new(KeyCode::F(12), none));
        for n in 0..9u8 {
            kb.add(
                Launch(n),
                KeyCombo::new(KeyCode::Char(char::from(b'1' + n)), alt),
            );
        }
        kb.add(MoveLeft, KeyCombo::new(KeyCode::Left, alt));
        kb.add(MoveRight, KeyCombo::new(KeyCode::Right, alt));
        kb.add(MoveUp, KeyCombo::new(KeyCode::Up, alt));
        kb.add(MoveDown, KeyCombo::new(KeyCode::Down, alt));
        kb.add(GrowWidth, KeyCombo::new(KeyCode::Right, alt_shift));
        kb.add(ShrinkWidth, KeyCombo::new(KeyCode::Left, alt_shift));
        kb.add(GrowHeight, KeyCombo::new(KeyCode::Down, alt_shift));
        kb.add(ShrinkHeight, KeyCombo::new(KeyCode::Up, alt_shift));
        kb.add(LeaveFullscreen, KeyCombo::new(KeyCode::Esc, none));
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    /// Global action bound to `key`. `LeaveFullscreen` is excluded: Esc goes
    /// to the focused content first and is checked with [`KeyBindings::matches`]
    /// only when the content ignores it.
    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        self.map
            .iter()
            .filter(|(act, _)| **act != Action::LeaveFullscreen)
            .find(|(_, list)| list.iter().any(|c| c.matches(key)))
            .map(|(act, _)| *act)
    }

    /// Return the display strings for all combos mapped to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(KeyCombo::display).collect())
            .unwrap_or_default()
    }
}
