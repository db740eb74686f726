use crate::input::handler::DeferredAction;
use crate::model::menu::MenuEntry;
use crate::view::theme::{Theme, DEFAULT_THEME_NAME};
use crate::view::ui::menu::POPUP_LEVELS;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Color theme name ("high-contrast", "dark" or "light")
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Capture mouse events while the application runs (default: true)
    #[serde(default = "default_true")]
    pub mouse_support: bool,

    /// Enable bracketed paste while the application runs (default: true)
    #[serde(default = "default_true")]
    pub bracketed_paste: bool,

    /// Menu bar layout
    #[serde(default)]
    pub menu: MenuConfig,
}

fn default_theme_name() -> String {
    DEFAULT_THEME_NAME.to_string()
}

fn default_true() -> bool {
    true
}

/// Menu bar configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MenuConfig {
    /// List of top-level menus in the menu bar
    #[serde(default)]
    pub menus: Vec<Menu>,
}

/// A top-level menu in the menu bar
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Menu {
    /// Display label for the menu (e.g., "File", "Edit")
    pub label: String,
    /// Menu items (actions, separators, or submenus)
    pub items: Vec<MenuItem>,
}

/// A menu item (action, separator, or submenu)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum MenuItem {
    /// A separator line
    Separator { separator: bool },
    /// An action item
    Action {
        label: String,
        action: String,
        /// Key combination shown as a hint (bound elsewhere)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shortcut: Option<String>,
        #[serde(default, skip_serializing_if = "is_false")]
        disabled: bool,
    },
    /// A nested submenu
    Submenu { label: String, items: Vec<MenuItem> },
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl MenuItem {
    fn action(label: &str, action: &str) -> Self {
        MenuItem::Action {
            label: label.to_string(),
            action: action.to_string(),
            shortcut: None,
            disabled: false,
        }
    }

    fn separator() -> Self {
        MenuItem::Separator { separator: true }
    }

    fn submenu(label: &str, items: Vec<MenuItem>) -> Self {
        MenuItem::Submenu {
            label: label.to_string(),
            items,
        }
    }

    /// Build the menu entry for this item.
    ///
    /// Action entries defer [`DeferredAction::ExecuteMenuAction`] with the
    /// configured action name; the application decides what it means.
    pub fn to_entry(&self) -> MenuEntry {
        match self {
            MenuItem::Separator { .. } => MenuEntry::separator(),
            MenuItem::Action {
                label,
                action,
                shortcut,
                disabled,
            } => {
                let action = action.clone();
                let mut entry = MenuEntry::new(label.as_str())
                    .with_disabled(*disabled)
                    .with_handler(move |ctx| {
                        ctx.defer(DeferredAction::ExecuteMenuAction {
                            action: action.clone(),
                        })
                    });
                if let Some(shortcut) = shortcut {
                    entry = entry.with_shortcut(shortcut.as_str());
                }
                entry
            }
            MenuItem::Submenu { label, items } => MenuEntry::new(label.as_str())
                .with_children(items.iter().map(MenuItem::to_entry).collect()),
        }
    }
}

impl MenuConfig {
    /// Build the top-level entries for a [`crate::view::ui::menu::MenuContainer`]
    pub fn build_entries(&self) -> Vec<MenuEntry> {
        self.menus
            .iter()
            .map(|menu| {
                MenuEntry::new(menu.label.as_str())
                    .with_children(menu.items.iter().map(MenuItem::to_entry).collect())
            })
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            mouse_support: true,
            bracketed_paste: true,
            menu: MenuConfig::default(),
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            menus: Config::default_menus(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("menubar").join("config.json"))
    }

    /// Load configuration from the default location, falling back to defaults if not found
    pub fn load_or_default() -> Self {
        if let Some(config_path) = Self::default_config_path() {
            if config_path.exists() {
                match Self::load_from_file(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load config from {}: {}, using defaults",
                            config_path.display(),
                            e
                        );
                    }
                }
            }
        }
        Self::default()
    }

    /// Load and validate configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path.as_ref(), self.to_json_pretty()?)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// JSON schema of the configuration file
    pub fn json_schema() -> Result<String, ConfigError> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// The theme named by `theme`
    pub fn resolve_theme(&self) -> Result<Theme, ConfigError> {
        Theme::from_name(&self.theme).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "unknown theme '{}' (available: {})",
                self.theme,
                Theme::available_themes().join(", ")
            ))
        })
    }

    /// Create default menu bar configuration
    fn default_menus() -> Vec<Menu> {
        vec![
            Menu {
                label: "File".to_string(),
                items: vec![
                    MenuItem::action("New", "new"),
                    MenuItem::action("Open...", "open"),
                    MenuItem::submenu(
                        "Open Recent",
                        vec![
                            MenuItem::action("notes.md", "open_recent_notes"),
                            MenuItem::action("todo.txt", "open_recent_todo"),
                        ],
                    ),
                    MenuItem::separator(),
                    MenuItem::Action {
                        label: "Quit".to_string(),
                        action: "quit".to_string(),
                        shortcut: Some("Esc".to_string()),
                        disabled: false,
                    },
                ],
            },
            Menu {
                label: "Edit".to_string(),
                items: vec![
                    MenuItem::Action {
                        label: "Undo".to_string(),
                        action: "undo".to_string(),
                        shortcut: None,
                        disabled: true,
                    },
                    MenuItem::action("Redo", "redo"),
                    MenuItem::separator(),
                    MenuItem::submenu(
                        "Find",
                        vec![
                            MenuItem::action("Find...", "find"),
                            MenuItem::action("Replace...", "replace"),
                            MenuItem::submenu(
                                "Options",
                                vec![
                                    MenuItem::action("Match Case", "find_match_case"),
                                    MenuItem::action("Whole Word", "find_whole_word"),
                                ],
                            ),
                        ],
                    ),
                ],
            },
            Menu {
                label: "View".to_string(),
                items: vec![MenuItem::action("Toggle Mouse", "toggle_mouse")],
            },
            Menu {
                label: "Help".to_string(),
                items: vec![MenuItem::action("About", "about")],
            },
        ]
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve_theme()?;

        if self.menu.menus.is_empty() {
            return Err(ConfigError::ValidationError(
                "menu bar must have at least one menu".to_string(),
            ));
        }

        for menu in &self.menu.menus {
            if menu.label.is_empty() {
                return Err(ConfigError::ValidationError(
                    "menu label cannot be empty".to_string(),
                ));
            }
            validate_items(&menu.label, &menu.items, 0)?;
        }

        Ok(())
    }
}

/// Check labels and nesting; items at `level` are shown in popup `level`.
fn validate_items(parent: &str, items: &[MenuItem], level: usize) -> Result<(), ConfigError> {
    for item in items {
        match item {
            MenuItem::Separator { .. } => {}
            MenuItem::Action { label, action, .. } => {
                if label.is_empty() {
                    return Err(ConfigError::ValidationError(format!(
                        "item in '{parent}' has an empty label"
                    )));
                }
                if action.is_empty() {
                    return Err(ConfigError::ValidationError(format!(
                        "item '{label}' has an empty action"
                    )));
                }
            }
            MenuItem::Submenu { label, items } => {
                if label.is_empty() {
                    return Err(ConfigError::ValidationError(format!(
                        "submenu in '{parent}' has an empty label"
                    )));
                }
                if level + 1 >= POPUP_LEVELS {
                    return Err(ConfigError::ValidationError(format!(
                        "submenu '{label}' is nested deeper than {POPUP_LEVELS} levels"
                    )));
                }
                validate_items(label, items, level + 1)?;
            }
        }
    }
    Ok(())
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Serialize error: {0}")]
    SerializeError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}
