//! Core domain logic for the chat platform.

pub mod chat;
pub mod commands;
pub mod dispatch;
pub mod responder;
pub mod session;

pub use chat::{ChatStore, Message, Role, Thread};
pub use commands::{
    CommandContext, CommandRegistry, CommandResult, DeleteCommand, ExitCommand, LogoutCommand,
    ModeCommand, ModelCommand, NewCommand, SettingsCommand, SlashCommand, parse_slash_command,
};
pub use dispatch::{fan_out, recipients};
pub use responder::{MockResponder, ModelResponder};
pub use session::{AuthError, Identity, IdentityProvider, MockIdentityProvider};

use ratatui::style::Color;

/// The compiled-in model registry.
///
/// Exactly five models are supported; adding one means extending this enum.
/// Per-session enablement and API keys live in settings, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ModelId {
    /// OpenAI ChatGPT.
    #[default]
    ChatGpt,
    /// Anthropic Claude.
    Claude,
    /// Google Gemini.
    Gemini,
    /// DeepSeek.
    DeepSeek,
    /// xAI Grok.
    Grok,
}

impl ModelId {
    /// Returns the symbolic identifier used in settings files and messages.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::ChatGpt => "chatgpt",
            Self::Claude => "claude",
            Self::Gemini => "gemini",
            Self::DeepSeek => "deepseek",
            Self::Grok => "grok",
        }
    }

    /// Returns the display name for the model.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ChatGpt => "ChatGPT",
            Self::Claude => "Claude",
            Self::Gemini => "Gemini",
            Self::DeepSeek => "DeepSeek",
            Self::Grok => "Grok",
        }
    }

    /// Returns the icon glyph shown next to the model name.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::ChatGpt => "🤖",
            Self::Claude => "🧠",
            Self::Gemini => "💎",
            Self::DeepSeek => "🔍",
            Self::Grok => "⚡",
        }
    }

    /// Returns the color tag used for badges and message headers.
    #[must_use]
    pub const fn color(&self) -> Color {
        match self {
            Self::ChatGpt => Color::Green,
            Self::Claude => Color::Yellow,
            Self::Gemini => Color::Blue,
            Self::DeepSeek => Color::Magenta,
            Self::Grok => Color::Red,
        }
    }

    /// Parses a symbolic identifier back into a registry entry.
    ///
    /// Returns `None` for identifiers outside the registry, which lets
    /// callers drop unknown entries found in persisted settings.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.id() == s)
    }

    /// Returns the next model in the registry cycle.
    #[must_use]
    pub const fn next(&self) -> Self {
        match self {
            Self::ChatGpt => Self::Claude,
            Self::Claude => Self::Gemini,
            Self::Gemini => Self::DeepSeek,
            Self::DeepSeek => Self::Grok,
            Self::Grok => Self::ChatGpt,
        }
    }

    /// Returns the previous model in the registry cycle.
    #[must_use]
    pub const fn prev(&self) -> Self {
        match self {
            Self::ChatGpt => Self::Grok,
            Self::Claude => Self::ChatGpt,
            Self::Gemini => Self::Claude,
            Self::DeepSeek => Self::Gemini,
            Self::Grok => Self::DeepSeek,
        }
    }

    /// Returns all registry entries in display/enumeration order.
    ///
    /// This order is semantic: the fan-out dispatcher appends replies in
    /// this order regardless of which responder finishes first.
    #[must_use]
    pub const fn all() -> &'static [ModelId] {
        &[
            Self::ChatGpt,
            Self::Claude,
            Self::Gemini,
            Self::DeepSeek,
            Self::Grok,
        ]
    }
}

/// How a send operation picks its recipients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatMode {
    /// One prompt goes to every configured model (or the full registry
    /// when nothing is configured).
    #[default]
    Multi,
    /// One prompt goes to exactly the selected model.
    Single,
}

impl ChatMode {
    /// Toggles between the two modes.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Multi => Self::Single,
            Self::Single => Self::Multi,
        }
    }

    /// Returns the display name for this mode.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Multi => "Multi-AI",
            Self::Single => "Single AI",
        }
    }
}
