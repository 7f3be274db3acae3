//! Console output styling

use std::time::Duration;

use console::{style, Emoji};
use indicatif::{ProgressBar, ProgressStyle};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static ROBOT: Emoji<'_, '_> = Emoji("🤖 ", "");
static LINK: Emoji<'_, '_> = Emoji("🔗 ", "");
static NOTE: Emoji<'_, '_> = Emoji("📝 ", "");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");

/// Output formatting utilities
#[derive(Debug, Clone)]
pub struct Formatter {
    pub use_colors: bool,
    pub use_emojis: bool,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            use_colors: console::colors_enabled(),
            use_emojis: true,
        }
    }
}

impl Formatter {
    pub fn with_settings(use_colors: bool, use_emojis: bool) -> Self {
        Self {
            use_colors,
            use_emojis,
        }
    }

    fn emoji(&self, emoji: &Emoji<'_, '_>) -> String {
        if self.use_emojis {
            emoji.to_string()
        } else {
            String::new()
        }
    }

    /// Banner shown above every menu
    pub fn title(&self, message: &str) -> String {
        let line = format!("=== {} ===", message);
        if self.use_colors {
            format!("{}", style(line).bold().cyan())
        } else {
            line
        }
    }

    pub fn success(&self, message: &str) -> String {
        if self.use_colors {
            format!("{}{}", self.emoji(&CHECKMARK), style(message).green().bold())
        } else {
            format!("{}{}", self.emoji(&CHECKMARK), message)
        }
    }

    pub fn info(&self, message: &str) -> String {
        if self.use_colors {
            format!("{}{}", self.emoji(&INFO), style(message).blue())
        } else {
            format!("{}{}", self.emoji(&INFO), message)
        }
    }

    pub fn error(&self, message: &str) -> String {
        if self.use_colors {
            format!("{}{}", self.emoji(&CROSS), style(message).red().bold())
        } else {
            format!("ERROR: {}{}", self.emoji(&CROSS), message)
        }
    }

    /// Text produced by the workflow's assistant
    pub fn assistant(&self, message: &str) -> String {
        if self.use_colors {
            format!("{}{} {}", self.emoji(&ROBOT), style("Piki:").magenta().bold(), message)
        } else {
            format!("{}Piki: {}", self.emoji(&ROBOT), message)
        }
    }

    pub fn link(&self, url: &str) -> String {
        if self.use_colors {
            format!("{}Acceso directo: {}", self.emoji(&LINK), style(url).underlined().cyan())
        } else {
            format!("{}Acceso directo: {}", self.emoji(&LINK), url)
        }
    }

    pub fn note(&self, message: &str) -> String {
        format!("{}{}", self.emoji(&NOTE), message)
    }

    pub fn saved_file(&self, path: &str) -> String {
        if self.use_colors {
            format!("{}Archivo guardado en: {}", self.emoji(&FOLDER), style(path).bold())
        } else {
            format!("{}Archivo guardado en: {}", self.emoji(&FOLDER), path)
        }
    }

    /// One `key: value` line of a displayed record
    pub fn field(&self, key: &str, value: &str) -> String {
        if self.use_colors {
            format!("{}: {}", style(key).bold(), value)
        } else {
            format!("{}: {}", key, value)
        }
    }

    pub fn section(&self, message: &str) -> String {
        if self.use_colors {
            format!("{}", style(format!("--- {} ---", message)).dim())
        } else {
            format!("--- {} ---", message)
        }
    }

    /// Spinner shown while a webhook call is in flight
    pub fn spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();

        let template = if self.use_colors {
            "{spinner:.green} [{elapsed_precise}] {msg}"
        } else {
            "[{elapsed_precise}] {msg}"
        };
        if let Ok(style) = ProgressStyle::with_template(template) {
            pb.set_style(style);
        }

        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}
