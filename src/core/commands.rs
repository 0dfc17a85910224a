//! Slash command system.
//!
//! Trait-based command architecture for composer commands like `/new`,
//! `/mode` and `/logout`. Commands are looked up in a [`CommandRegistry`]
//! and return a [`CommandResult`] describing how the app should react.
//!
//! Adding a command means implementing [`SlashCommand`], registering it in
//! [`CommandRegistry::with_builtins`], and handling any new result variant
//! in the app's `handle_command_result`.

use crate::app::AppMode;
use crate::core::ModelId;

/// Result of executing a slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Command requests application exit.
    Exit,
    /// Command requests opening the settings panel.
    OpenSettings,
    /// Command requests a fresh chat thread.
    NewThread,
    /// Command requests deleting the active thread.
    DeleteActiveThread,
    /// Command requests toggling between multi and single chat mode.
    ToggleMode,
    /// Command requests a separate single-model thread for the given model.
    SplitOffModel(ModelId),
    /// Command requests signing the user out.
    SignOut,
    /// Command executed with a message to show on the status line.
    Message(String),
}

/// Context provided to commands during execution.
#[derive(Debug)]
pub struct CommandContext<'a> {
    /// Whether a send operation is currently in flight.
    pub is_loading: bool,
    /// Current application mode.
    pub mode: &'a AppMode,
    /// Argument text following the command name, trimmed.
    pub args: &'a str,
}

/// Trait for implementing slash commands.
pub trait SlashCommand: Send + Sync {
    /// Returns the command name (without the leading slash).
    fn name(&self) -> &'static str;

    /// Returns a short description for help text.
    fn description(&self) -> &'static str;

    /// Executes the command and returns the result.
    fn execute(&self, ctx: &CommandContext) -> CommandResult;

    /// Returns true if this command can execute in the current context.
    ///
    /// The default blocks commands while a send is dispatching.
    fn can_execute(&self, ctx: &CommandContext) -> bool {
        !ctx.is_loading
    }
}

/// Registry of available slash commands.
pub struct CommandRegistry {
    commands: Vec<Box<dyn SlashCommand>>,
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Creates a registry with all built-in commands pre-registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(NewCommand));
        registry.register(Box::new(DeleteCommand));
        registry.register(Box::new(ModeCommand));
        registry.register(Box::new(ModelCommand));
        registry.register(Box::new(SettingsCommand));
        registry.register(Box::new(LogoutCommand));
        registry.register(Box::new(ExitCommand));
        registry
    }

    /// Registers a new command with the registry.
    pub fn register(&mut self, cmd: Box<dyn SlashCommand>) {
        self.commands.push(cmd);
    }

    /// Finds a command by exact name match.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&dyn SlashCommand> {
        self.commands
            .iter()
            .find(|cmd| cmd.name() == name)
            .map(AsRef::as_ref)
    }

    /// Returns all registered commands.
    #[must_use]
    pub fn all(&self) -> &[Box<dyn SlashCommand>] {
        &self.commands
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Parses composer input as a slash command.
///
/// Returns the command name and any argument text, or `None` when the
/// input is not a command.
#[must_use]
pub fn parse_slash_command(input: &str) -> Option<(&str, &str)> {
    let rest = input.trim().strip_prefix('/')?;
    if rest.is_empty() {
        return None;
    }
    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next()?;
    let args = parts.next().unwrap_or("").trim();
    Some((name, args))
}

// =============================================================================
// Built-in Commands
// =============================================================================

/// `/new` - start a fresh chat thread.
pub struct NewCommand;

impl SlashCommand for NewCommand {
    fn name(&self) -> &'static str {
        "new"
    }

    fn description(&self) -> &'static str {
        "Start a new chat thread"
    }

    fn execute(&self, _ctx: &CommandContext) -> CommandResult {
        CommandResult::NewThread
    }
}

/// `/delete` - delete the active chat thread.
pub struct DeleteCommand;

impl SlashCommand for DeleteCommand {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn description(&self) -> &'static str {
        "Delete the active chat thread"
    }

    fn execute(&self, _ctx: &CommandContext) -> CommandResult {
        CommandResult::DeleteActiveThread
    }
}

/// `/mode` - toggle between multi and single chat mode.
pub struct ModeCommand;

impl SlashCommand for ModeCommand {
    fn name(&self) -> &'static str {
        "mode"
    }

    fn description(&self) -> &'static str {
        "Toggle between Multi-AI and Single AI mode"
    }

    fn execute(&self, _ctx: &CommandContext) -> CommandResult {
        CommandResult::ToggleMode
    }
}

/// `/model <id>` - split off a single-model thread for the named model.
pub struct ModelCommand;

impl SlashCommand for ModelCommand {
    fn name(&self) -> &'static str {
        "model"
    }

    fn description(&self) -> &'static str {
        "Start a separate chat with one model, e.g. /model grok"
    }

    fn execute(&self, ctx: &CommandContext) -> CommandResult {
        match ModelId::parse(ctx.args) {
            Some(model) => CommandResult::SplitOffModel(model),
            None => CommandResult::Message(format!("Unknown model: {}", ctx.args)),
        }
    }
}

/// `/settings` - open the settings panel.
pub struct SettingsCommand;

impl SlashCommand for SettingsCommand {
    fn name(&self) -> &'static str {
        "settings"
    }

    fn description(&self) -> &'static str {
        "Open the API settings panel"
    }

    fn execute(&self, _ctx: &CommandContext) -> CommandResult {
        CommandResult::OpenSettings
    }
}

/// `/logout` - sign out and return to the auth screen.
pub struct LogoutCommand;

impl SlashCommand for LogoutCommand {
    fn name(&self) -> &'static str {
        "logout"
    }

    fn description(&self) -> &'static str {
        "Sign out of the session"
    }

    fn execute(&self, _ctx: &CommandContext) -> CommandResult {
        CommandResult::SignOut
    }
}

/// `/exit` - quit the application.
pub struct ExitCommand;

impl SlashCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static str {
        "Exit the application"
    }

    fn execute(&self, _ctx: &CommandContext) -> CommandResult {
        CommandResult::Exit
    }

    fn can_execute(&self, _ctx: &CommandContext) -> bool {
        // Quitting is always allowed, even mid-dispatch.
        true
    }
}
