use crate::{event::*, helper::MessageHelper, plugin::*};
use anyhow::Result;

/// Drops events Dad has no business responding to: bots (himself included), direct messages,
/// and immune users.
pub struct Ignore;

#[serenity::async_trait]
impl Plugin for Ignore {
    fn name(&self) -> &'static str {
        "ignore"
    }

    async fn usage(&self, _ctx: &Context) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let ignore = match event {
            Event::Ready(_) => false,
            Event::Message(msg) => {
                msg.author.bot || msg.guild_id.is_none() || msg.is_from_immune(ctx).await
            }
            Event::ReactionAdd(reaction) => {
                let my_id = ctx.cache.current_user().id;
                let from_bot = reaction
                    .member
                    .as_ref()
                    .is_some_and(|member| member.user.bot);
                reaction.guild_id.is_none()
                    || from_bot
                    || reaction.user_id.map_or(true, |user_id| user_id == my_id)
            }
        };

        if ignore {
            Ok(EventHandled::Yes)
        } else {
            Ok(EventHandled::No)
        }
    }
}
