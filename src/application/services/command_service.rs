use async_trait::async_trait;

use crate::application::context::BotContext;
use crate::application::errors::CommandError;
use crate::domain::entities::{CommandHandler, CommandRegistry, Message, ParsedCommand};

/// Registry holding the commands every bot ships with
pub fn builtin_commands() -> CommandRegistry {
    CommandRegistry::new()
        .on("help", HelpCommand)
        .on("version", VersionCommand)
}

/// Render the help reply: the configured hint, then one line per command
pub fn help_text(ctx: &BotContext, command: Option<&str>) -> String {
    let prefix = ctx.prefix();

    if let Some(name) = command {
        if !ctx.commands.contains(name) {
            return format!("Command {}{} not found", prefix, name);
        }
        let desc = ctx.commands.description(name).unwrap_or("No description");
        return format!("{}{} - {}", prefix, name, desc);
    }

    let mut help = format!("{}\nAvailable commands:\n", ctx.config.bot.help_text);
    for name in ctx.commands.names() {
        match ctx.commands.description(name) {
            Some(desc) => help.push_str(&format!("  {}{} - {}\n", prefix, name, desc)),
            None => help.push_str(&format!("  {}{}\n", prefix, name)),
        }
    }
    help
}

pub struct HelpCommand;

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn handle(
        &self,
        parsed: &ParsedCommand,
        message: &Message,
        ctx: &BotContext,
    ) -> Result<(), CommandError> {
        let text = help_text(ctx, parsed.args.first().map(String::as_str));
        ctx.reply(message, &text).await?;
        Ok(())
    }

    fn description(&self) -> Option<&str> {
        Some("Show help message")
    }
}

pub struct VersionCommand;

#[async_trait]
impl CommandHandler for VersionCommand {
    async fn handle(
        &self,
        _parsed: &ParsedCommand,
        message: &Message,
        ctx: &BotContext,
    ) -> Result<(), CommandError> {
        let text = format!("{} v{}", ctx.config.bot.name, env!("CARGO_PKG_VERSION"));
        ctx.reply(message, &text).await?;
        Ok(())
    }

    fn description(&self) -> Option<&str> {
        Some("Show bot version")
    }
}
