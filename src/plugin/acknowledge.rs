use crate::{event::*, helper::MessageHelper, plugin::*};
use anyhow::Result;
use serenity::all::ReactionType;

/// Dad always notices when he's talked about
pub struct Acknowledge;

#[serenity::async_trait]
impl Plugin for Acknowledge {
    fn name(&self) -> &'static str {
        "acknowledge"
    }

    async fn usage(&self, _ctx: &Context) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Message(msg) = event else {
            return Ok(EventHandled::No);
        };

        if msg.mentions_dad(ctx).await {
            let reaction = ReactionType::Unicode("\u{1F609}".to_owned()); // winking face
            msg.react(ctx.cache_http, reaction).await?;
        }

        // Jokes still get their turn
        Ok(EventHandled::No)
    }
}
