use crate::{event::*, helper::emoji_name, log_event, logging::*, plugin::*};
use anyhow::Result;

/// Prints debug information about event to stdout
pub struct Debug;

#[serenity::async_trait]
impl Plugin for Debug {
    fn name(&self) -> &'static str {
        "debug"
    }

    async fn usage(&self, _ctx: &Context) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        match event {
            Event::Ready(ready) => {
                log_event!(
                    "Connected to {} server(s) as {}",
                    ready.guilds.len(),
                    ctx.cache.current_user().color(),
                );
            }
            Event::Message(msg) => {
                log_event!(
                    "{}{}{}{}{}{} {}",
                    msg.guild_id.color(ctx.http).await,
                    Glue.color(),
                    msg.channel_id.color(ctx.http).await,
                    Glue.color(),
                    msg.author.color(),
                    Glue.color(),
                    msg.content,
                );
            }
            Event::ReactionAdd(reaction) => {
                let emoji =
                    emoji_name(&reaction.emoji).unwrap_or_else(|| "<unknown-emoji>".to_owned());
                log_event!(
                    "{}{}{} reacted to message {} with \"{}\"",
                    reaction.guild_id.color(ctx.http).await,
                    Glue.color(),
                    reaction.user_id.color(ctx.http).await,
                    reaction.message_id,
                    emoji
                );
            }
        }

        Ok(EventHandled::No)
    }
}
