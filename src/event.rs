//! The Serenity crate we're using for the Discord API is designed around callbacks to handle
//! events.  However, this does not mesh well with our plugin framework here.  To resolve this,
//! the handler translates the callbacks to a distinct Event enum.

use crate::{context::Context, log_error};
use serenity::all::{GuildId, Message, Reaction, Ready};

/// A Discord event
pub enum Event {
    Ready(Ready),
    Message(Message),
    ReactionAdd(Reaction),
}

impl Event {
    // When an event occurs, iterate over all the plugins to see if any can/should handle it.
    pub async fn handle(self, ctx: Context<'_>) {
        for plugin in crate::plugin::plugins() {
            match plugin.handle(&ctx, &self).await {
                Ok(EventHandled::Yes) => return,
                Ok(EventHandled::No) => continue,
                Err(err) => log_error!("Error in plugin {}: {}", plugin.name(), err),
            }
        }
    }

    pub fn guild_id(&self) -> Option<GuildId> {
        match self {
            Event::Ready(_) => None,
            Event::Message(msg) => msg.guild_id,
            Event::ReactionAdd(reaction) => reaction.guild_id,
        }
    }

    // Check if a message should be interpreted as a special bot command.
    //
    // These are prefixed with the configured command prefix, e.g. `;cmd foo bar baz`.  Returns the
    // message and the arguments after the command name.
    pub async fn is_bot_cmd(&self, ctx: &Context<'_>, cmd: &str) -> Option<(&Message, Vec<&str>)> {
        let Event::Message(msg) = self else {
            return None;
        };

        let prefix = ctx.cfg.read().await.general.command_prefix.clone();
        parse_bot_cmd(&msg.content, &prefix, cmd).map(|args| (msg, args))
    }
}

fn parse_bot_cmd<'a>(content: &'a str, prefix: &str, cmd: &str) -> Option<Vec<&'a str>> {
    let mut words = content.split_ascii_whitespace();
    let first = words.next()?;
    match first.strip_prefix(prefix) {
        Some(name) if name == cmd => Some(words.collect()),
        _ => None,
    }
}

/// Whether the message invokes any of the `commands`, so jokes can leave it alone.
pub fn looks_like_bot_cmd(content: &str, prefix: &str, commands: &[&str]) -> bool {
    commands
        .iter()
        .any(|cmd| parse_bot_cmd(content, prefix, cmd).is_some())
}

#[derive(Debug, PartialEq, Eq)]
pub enum EventHandled {
    Yes,
    No,
}
