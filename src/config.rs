/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
/// Problems are collected in `warnings` and logged once logging is up,
/// since the terminal is not ours to print on during play.
///
/// Grid size, entity layout and cadences are not configurable: they are
/// compiled-in constants (see `domain::rules`).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::entity::{Command, MoveDir};

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub keys: KeyBindings,
    pub seed: Option<u64>,
    pub color: bool,
    pub sound: bool,
    pub log: LogConfig,
    pub warnings: Vec<String>,
}

/// One lower-case character per action. Matching is case-insensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    pub up: char,
    pub down: char,
    pub left: char,
    pub right: char,
    pub quit: char,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    /// No file → no logging at all.
    pub file: Option<PathBuf>,
    pub level: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings { up: 'w', down: 's', left: 'a', right: 'd', quit: 'q' }
    }
}

impl KeyBindings {
    pub fn command_for(&self, key: char) -> Command {
        let key = key.to_lowercase().next().unwrap_or(key);
        if key == self.quit {
            Command::Quit
        } else if key == self.up {
            Command::Move(MoveDir::Up)
        } else if key == self.down {
            Command::Move(MoveDir::Down)
        } else if key == self.left {
            Command::Move(MoveDir::Left)
        } else if key == self.right {
            Command::Move(MoveDir::Right)
        } else {
            Command::Other(key)
        }
    }

    /// Help line shown under the board.
    pub fn hint(&self) -> String {
        format!(
            " [{}/{}/{}/{}] move   [{}] quit   collect every $ and dodge the walls",
            self.up, self.left, self.down, self.right, self.quit,
        )
    }

    fn all(&self) -> [char; 5] {
        [self.up, self.down, self.left, self.right, self.quit]
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    keys: TomlKeys,
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug)]
struct TomlKeys {
    #[serde(default = "default_up")]
    up: String,
    #[serde(default = "default_down")]
    down: String,
    #[serde(default = "default_left")]
    left: String,
    #[serde(default = "default_right")]
    right: String,
    #[serde(default = "default_quit")]
    quit: String,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default = "default_true")]
    color: bool,
    #[serde(default = "default_true")]
    sound: bool,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default)]
    file: Option<String>,
    #[serde(default = "default_log_level")]
    level: String,
}

// ── Defaults ──

fn default_up() -> String { "w".into() }
fn default_down() -> String { "s".into() }
fn default_left() -> String { "a".into() }
fn default_right() -> String { "d".into() }
fn default_quit() -> String { "q".into() }
fn default_true() -> bool { true }
fn default_log_level() -> String { "info".into() }

impl Default for TomlKeys {
    fn default() -> Self {
        TomlKeys {
            up: default_up(),
            down: default_down(),
            left: default_left(),
            right: default_right(),
            quit: default_quit(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { seed: None, color: true, sound: true }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog { file: None, level: default_log_level() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let mut warnings = Vec::new();
        let toml_cfg = load_toml(&candidate_dirs(), &mut warnings);
        GameConfig::from_toml(toml_cfg, warnings)
    }

    /// Parse config text directly. Parse errors fall back to defaults.
    #[cfg(test)]
    pub fn parse(text: &str) -> Self {
        let mut warnings = Vec::new();
        let toml_cfg = parse_toml(text, Path::new("config.toml"), &mut warnings);
        GameConfig::from_toml(toml_cfg, warnings)
    }

    fn from_toml(cfg: TomlConfig, mut warnings: Vec<String>) -> Self {
        let keys = resolve_keys(&cfg.keys, &mut warnings);
        GameConfig {
            keys,
            seed: cfg.general.seed,
            color: cfg.general.color,
            sound: cfg.general.sound,
            log: LogConfig {
                file: cfg.log.file.map(PathBuf::from),
                level: cfg.log.level,
            },
            warnings,
        }
    }
}

fn resolve_keys(raw: &TomlKeys, warnings: &mut Vec<String>) -> KeyBindings {
    let defaults = KeyBindings::default();
    let mut key = |name: &str, value: &str, fallback: char| -> char {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => c.to_lowercase().next().unwrap_or(c),
            _ => {
                warnings.push(format!(
                    "keys.{name} = {value:?} is not a single character, using '{fallback}'"
                ));
                fallback
            }
        }
    };
    let bindings = KeyBindings {
        up: key("up", &raw.up, defaults.up),
        down: key("down", &raw.down, defaults.down),
        left: key("left", &raw.left, defaults.left),
        right: key("right", &raw.right, defaults.right),
        quit: key("quit", &raw.quit, defaults.quit),
    };

    let all = bindings.all();
    let clash = all.iter().enumerate().any(|(i, c)| all[i + 1..].contains(c));
    if clash {
        warnings.push("key bindings overlap, using defaults".to_string());
        return defaults;
    }
    bindings
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf], warnings: &mut Vec<String>) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => return parse_toml(&text, &path, warnings),
            Err(e) => warnings.push(format!("could not read {}: {e}", path.display())),
        }
    }
    TomlConfig::default()
}

fn parse_toml(text: &str, path: &Path, warnings: &mut Vec<String>) -> TomlConfig {
    match toml::from_str::<TomlConfig>(text) {
        Ok(cfg) => cfg,
        Err(e) => {
            warnings.push(format!("{} parse error, using default settings: {e}", path.display()));
            TomlConfig::default()
        }
    }
}
