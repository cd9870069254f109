//! User configuration: service endpoint, display settings, keybindings.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/carrent/config.toml` (default `~/.config/carrent/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_CURRENCY: &str = "₹";
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/800x450?text=Car+Image";

// ───────────────────────────────────────── actions ───────────

/// Catalog-view actions that can be rebound.  Text entry inside forms and
/// the search box is not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    Activate,
    Search,
    AddCar,
    RentCar,
    Refresh,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::MoveUp,
        Action::MoveDown,
        Action::Activate,
        Action::Search,
        Action::AddCar,
        Action::RentCar,
        Action::Refresh,
        Action::Quit,
    ];

    /// Short verb for the status-bar hint.
    pub fn label(self) -> &'static str {
        match self {
            Action::MoveUp => "up",
            Action::MoveDown => "down",
            Action::Activate => "delete/return",
            Action::Search => "search",
            Action::AddCar => "add",
            Action::RentCar => "rent",
            Action::Refresh => "refresh",
            Action::Quit => "quit",
        }
    }

    fn config_key(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::Activate => "activate",
            Action::Search => "search",
            Action::AddCar => "add_car",
            Action::RentCar => "rent_car",
            Action::Refresh => "refresh",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    const MASK: KeyModifiers = KeyModifiers::CONTROL
        .union(KeyModifiers::ALT)
        .union(KeyModifiers::SHIFT);

    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT are compared strictly; SHIFT is ignored for characters
    /// since the terminal already folds it into the char (`?`, `R`).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = match event.code {
            KeyCode::Char(_) => KeyModifiers::CONTROL | KeyModifiers::ALT,
            _ => Self::MASK,
        };
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => key_name(other),
        });
        s
    }

    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => key_name(other),
        });
        s
    }

    /// Parse `"Ctrl+r"`, `"F5"`, `"Up"`, `"/"`.
    fn parse(s: &str) -> Option<Self> {
        let (mods, key_part) = match s.rsplit_once('+') {
            // A bare "+" is the plus key, not an empty modifier list.
            Some((mods, key)) if !key.is_empty() => (Some(mods), key),
            _ => (None, s),
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in mods.into_iter().flat_map(|m| m.split('+')) {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root of the rental service, without the `/api` suffix.
    pub base_url: String,
    /// Prefix for every displayed amount.
    pub currency: String,
    /// Image shown by the markup renderer when a car's own image fails.
    pub placeholder_image: String,
    pub bindings: HashMap<Action, Vec<KeyBind>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            bindings: Self::default_bindings(),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Activate, vec![KeyBind::new(Enter, n), KeyBind::new(Char('x'), n)]);
        m.insert(Search, vec![KeyBind::new(Char('/'), n)]);
        m.insert(AddCar, vec![KeyBind::new(Char('a'), n)]);
        m.insert(RentCar, vec![KeyBind::new(Char('r'), n)]);
        m.insert(Refresh, vec![KeyBind::new(F(5), n), KeyBind::new(Char('g'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// The action bound to a key event.  With overlapping bindings the one
    /// with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, b)| b.matches(event))
            .max_by_key(|(_, b)| b.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Status-bar hint built from the current bindings.
    pub fn status_bar_hint(&self) -> String {
        [
            Action::Activate,
            Action::Search,
            Action::AddCar,
            Action::RentCar,
            Action::Refresh,
            Action::Quit,
        ]
        .iter()
        .map(|&a| format!("{}: {}", self.short_binding(a), a.label()))
        .collect::<Vec<_>>()
        .join(" | ")
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "base_url" if !value.is_empty() => {
                    config.base_url = value.trim_end_matches('/').to_string();
                    continue;
                }
                "currency" => {
                    config.currency = value.to_string();
                    continue;
                }
                "placeholder_image" if !value.is_empty() => {
                    config.placeholder_image = value.to_string();
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };
            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    pub fn serialise(&self) -> String {
        let mut lines = vec![
            "# carrent configuration".to_string(),
            String::new(),
            "# Service".to_string(),
            format!("base_url = \"{}\"", self.base_url),
            String::new(),
            "# Display".to_string(),
            format!("currency = \"{}\"", self.currency),
            format!("placeholder_image = \"{}\"", self.placeholder_image),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// `$XDG_CONFIG_HOME/carrent/config.toml`.
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("carrent").join("config.toml")
}
