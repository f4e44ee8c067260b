//! User configuration — scroller settings, keybindings, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/tui-marquee/config.toml` (default
//! `~/.config/tui-marquee/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::core::bounce::{BounceDirection, BounceOptions};
use crate::core::loop_scroll::{LoopConfig, MoveDirection};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    PauseAll,
    ResumeAll,
    SpeedUp,
    SpeedDown,
    ToggleScrollbar,
    StopReader,
}

impl Action {
    /// Ordered list of all actions (used when serialising the config).
    pub const ALL: &[Action] = &[
        Action::Quit,
        Action::PauseAll,
        Action::ResumeAll,
        Action::SpeedUp,
        Action::SpeedDown,
        Action::ToggleScrollbar,
        Action::StopReader,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::Quit => "quit",
            Action::PauseAll => "pause_all",
            Action::ResumeAll => "resume_all",
            Action::SpeedUp => "speed_up",
            Action::SpeedDown => "speed_down",
            Action::ToggleScrollbar => "toggle_scrollbar",
            Action::StopReader => "stop_reader",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "quit" => Some(Action::Quit),
            "pause_all" => Some(Action::PauseAll),
            "resume_all" => Some(Action::ResumeAll),
            "speed_up" => Some(Action::SpeedUp),
            "speed_down" => Some(Action::SpeedDown),
            "toggle_scrollbar" => Some(Action::ToggleScrollbar),
            "stop_reader" => Some(Action::StopReader),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Ctrl+p"`, `"Space"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Esc => "Esc".into(),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+p"`, `"Space"`, `"q"`, `"+"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        // A trailing empty part means the key itself was '+'.
        let key_part = match parts.last() {
            Some(&"") => "+",
            Some(&part) => part,
            None => return None,
        };

        let modifier_parts = if key_part == "+" && parts.len() >= 2 {
            &parts[..parts.len() - 2]
        } else {
            &parts[..parts.len() - 1]
        };
        for &part in modifier_parts {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "space" => KeyCode::Char(' '),
            "esc" | "escape" => KeyCode::Esc,
            s if s.chars().count() == 1 => KeyCode::Char(s.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }

    fn to_config_string(&self) -> String {
        self.display()
    }
}

// ───────────────────────────────────────── errors ────────────

/// Per-line problems found while parsing the config file.  These never
/// abort startup — the offending line is skipped with a warning.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown config key `{0}`")]
    UnknownKey(String),
    #[error("bad value `{value}` for `{key}`")]
    BadValue { key: String, value: String },
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — scroller settings and keybindings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,

    // Marquee (offset-loop) settings.
    pub loop_speed: f64,
    pub loop_direction: MoveDirection,
    pub loop_gap: u16,
    pub duplicate_times: usize,
    pub pause_delay_ms: u64,

    // Bouncing reader settings.
    pub bounce_speed: f64,
    pub bounce_direction: BounceDirection,
    pub start_delay_ms: u64,
    pub pause_on_hover: bool,
    pub pause_on_parent_hover: bool,
    pub hide_scrollbar: bool,
    /// Comma-separated pane names whose hover also pauses the reader.
    pub extra_hover_targets: Vec<String>,

    /// Animation frames per second.
    pub fps: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            loop_speed: 0.5,
            loop_direction: MoveDirection::Forward,
            loop_gap: 2,
            duplicate_times: 5,
            pause_delay_ms: 2000,
            bounce_speed: 1.0,
            bounce_direction: BounceDirection::Forward,
            start_delay_ms: 1000,
            pause_on_hover: true,
            pause_on_parent_hover: false,
            hide_scrollbar: true,
            extra_hover_targets: Vec::new(),
            fps: 30,
        }
    }
}

impl AppConfig {
    /// Hard-coded default keybindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);
        m.insert(PauseAll, vec![KeyBind::new(Char(' '), n), KeyBind::new(Char('p'), n)]);
        m.insert(ResumeAll, vec![KeyBind::new(Char('r'), n)]);
        m.insert(SpeedUp, vec![KeyBind::new(Char('+'), n), KeyBind::new(Char('='), n)]);
        m.insert(SpeedDown, vec![KeyBind::new(Char('-'), n)]);
        m.insert(ToggleScrollbar, vec![KeyBind::new(Char('s'), n)]);
        m.insert(StopReader, vec![KeyBind::new(Char('x'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: quit | {}: pause | {}: resume | {}/{}: speed | {}: scrollbar",
            self.short_binding(Action::Quit),
            self.short_binding(Action::PauseAll),
            self.short_binding(Action::ResumeAll),
            self.short_binding(Action::SpeedUp),
            self.short_binding(Action::SpeedDown),
            self.short_binding(Action::ToggleScrollbar),
        )
    }

    /// The marquee settings as a core [`LoopConfig`].
    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            speed: self.loop_speed,
            direction: self.loop_direction,
            gap: self.loop_gap,
            duplicate_times: self.duplicate_times,
            pause_delay: Duration::from_millis(self.pause_delay_ms),
            ..Default::default()
        }
    }

    /// The reader settings as core [`BounceOptions`].
    pub fn bounce_options(&self) -> BounceOptions {
        BounceOptions {
            speed: self.bounce_speed,
            direction: self.bounce_direction,
            start_delay: Duration::from_millis(self.start_delay_ms),
            pause_on_hover: self.pause_on_hover,
            pause_on_parent_hover: self.pause_on_parent_hover,
            hide_scrollbar: self.hide_scrollbar,
            extra_hover_targets: self.extra_hover_targets.clone(),
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.  Bad lines are
    /// skipped with a warning; they never abort startup.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(path) {
                let (config, errors) = Self::parse_config(&contents);
                for err in errors {
                    tracing::warn!("{}: {err}", path.display());
                }
                return config;
            }
        }
        Self::default()
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            let bad = || ConfigError::BadValue {
                key: key.to_string(),
                value: value.to_string(),
            };

            match key {
                "loop_speed" => match value.parse::<f64>() {
                    Ok(v) if v > 0.0 => config.loop_speed = v.clamp(0.05, 20.0),
                    _ => errors.push(bad()),
                },
                "loop_direction" => match value {
                    "forward" => config.loop_direction = MoveDirection::Forward,
                    "backward" => config.loop_direction = MoveDirection::Backward,
                    _ => errors.push(bad()),
                },
                "loop_gap" => match value.parse::<u16>() {
                    Ok(v) => config.loop_gap = v.min(8),
                    Err(_) => errors.push(bad()),
                },
                "duplicate_times" => match value.parse::<usize>() {
                    Ok(v) => config.duplicate_times = v.clamp(1, 12),
                    Err(_) => errors.push(bad()),
                },
                "pause_delay_ms" => match value.parse::<u64>() {
                    // Keep this bounded for predictable UX.
                    Ok(v) => config.pause_delay_ms = v.clamp(200, 10_000),
                    Err(_) => errors.push(bad()),
                },
                "bounce_speed" => match value.parse::<f64>() {
                    Ok(v) if v > 0.0 => config.bounce_speed = v.clamp(0.05, 20.0),
                    _ => errors.push(bad()),
                },
                "bounce_direction" => match value {
                    "forward" => config.bounce_direction = BounceDirection::Forward,
                    "backward" => config.bounce_direction = BounceDirection::Backward,
                    _ => errors.push(bad()),
                },
                "start_delay_ms" => match value.parse::<u64>() {
                    Ok(v) => config.start_delay_ms = v.min(30_000),
                    Err(_) => errors.push(bad()),
                },
                "pause_on_hover" => config.pause_on_hover = value == "true",
                "pause_on_parent_hover" => config.pause_on_parent_hover = value == "true",
                "hide_scrollbar" => config.hide_scrollbar = value == "true",
                "extra_hover_targets" => {
                    config.extra_hover_targets = value
                        .split(',')
                        .map(|p| p.trim().to_string())
                        .filter(|p| !p.is_empty())
                        .collect();
                }
                "fps" => match value.parse::<u16>() {
                    Ok(v) => config.fps = v.clamp(10, 120),
                    Err(_) => errors.push(bad()),
                },
                _ => {
                    if let Some(action) = Action::from_config_key(key) {
                        let mut parsed = Vec::new();
                        for part in value.split(',') {
                            let part = part.trim().trim_matches('"');
                            if let Some(bind) = KeyBind::parse(part) {
                                parsed.push(bind);
                            } else {
                                errors.push(ConfigError::BadValue {
                                    key: key.to_string(),
                                    value: part.to_string(),
                                });
                            }
                        }
                        if !parsed.is_empty() {
                            config.bindings.insert(action, parsed);
                        }
                    } else {
                        errors.push(ConfigError::UnknownKey(key.to_string()));
                    }
                }
            }
        }

        (config, errors)
    }

    fn serialise(&self) -> String {
        let dir = |d: MoveDirection| match d {
            MoveDirection::Forward => "forward",
            MoveDirection::Backward => "backward",
        };
        let bdir = |d: BounceDirection| match d {
            BounceDirection::Forward => "forward",
            BounceDirection::Backward => "backward",
        };
        let mut lines = vec![
            "# tui-marquee configuration".to_string(),
            String::new(),
            "# Marquee panes".to_string(),
            format!("loop_speed = {}", self.loop_speed),
            format!("loop_direction = {}", dir(self.loop_direction)),
            format!("loop_gap = {}", self.loop_gap),
            format!("duplicate_times = {}", self.duplicate_times),
            format!("pause_delay_ms = {}", self.pause_delay_ms),
            String::new(),
            "# Bouncing reader pane".to_string(),
            format!("bounce_speed = {}", self.bounce_speed),
            format!("bounce_direction = {}", bdir(self.bounce_direction)),
            format!("start_delay_ms = {}", self.start_delay_ms),
            format!("pause_on_hover = {}", self.pause_on_hover),
            format!("pause_on_parent_hover = {}", self.pause_on_parent_hover),
            format!("hide_scrollbar = {}", self.hide_scrollbar),
            format!("extra_hover_targets = {}", self.extra_hover_targets.join(", ")),
            format!("fps = {}", self.fps),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix); Space and Esc are special".to_string(),
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

/// Return the config file path (`$XDG_CONFIG_HOME/tui-marquee/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("tui-marquee").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = AppConfig::default();
        assert_eq!(c.loop_speed, 0.5);
        assert_eq!(c.duplicate_times, 5);
        assert_eq!(c.pause_delay_ms, 2000);
        assert_eq!(c.bounce_speed, 1.0);
        assert!(c.hide_scrollbar);
    }

    #[test]
    fn parse_reads_scroller_settings() {
        let text = "loop_speed = 1.5\nduplicate_times = 3\nbounce_direction = backward\n";
        let (c, errors) = AppConfig::parse_config(text);
        assert!(errors.is_empty());
        assert_eq!(c.loop_speed, 1.5);
        assert_eq!(c.duplicate_times, 3);
        assert_eq!(c.bounce_direction, BounceDirection::Backward);
    }

    #[test]
    fn bad_values_are_reported_and_skipped() {
        let text = "loop_speed = fast\nmystery_key = 1\nfps = 60\n";
        let (c, errors) = AppConfig::parse_config(text);
        assert_eq!(errors.len(), 2);
        assert_eq!(c.loop_speed, 0.5); // default kept
        assert_eq!(c.fps, 60);
    }

    #[test]
    fn numeric_values_are_clamped() {
        let text = "duplicate_times = 99\npause_delay_ms = 1\nfps = 500\n";
        let (c, _) = AppConfig::parse_config(text);
        assert_eq!(c.duplicate_times, 12);
        assert_eq!(c.pause_delay_ms, 200);
        assert_eq!(c.fps, 120);
    }

    #[test]
    fn keybind_roundtrip() {
        for raw in ["q", "Space", "Ctrl+p", "+", "Ctrl++"] {
            let bind = KeyBind::parse(raw).unwrap();
            let back = KeyBind::parse(&bind.to_config_string()).unwrap();
            assert_eq!(bind, back, "roundtrip failed for {raw}");
        }
    }

    #[test]
    fn parse_rebinds_actions() {
        let text = "pause_all = Ctrl+p\n";
        let (c, errors) = AppConfig::parse_config(text);
        assert!(errors.is_empty());
        let binds = &c.bindings[&Action::PauseAll];
        assert_eq!(binds.len(), 1);
        assert_eq!(binds[0].code, KeyCode::Char('p'));
        assert!(binds[0].modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn serialise_then_parse_is_stable() {
        let c = AppConfig::default();
        let (back, errors) = AppConfig::parse_config(&c.serialise());
        assert!(errors.is_empty());
        assert_eq!(back.loop_speed, c.loop_speed);
        assert_eq!(back.fps, c.fps);
        assert_eq!(back.bindings[&Action::Quit], c.bindings[&Action::Quit]);
    }
}
