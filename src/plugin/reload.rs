use crate::{event::*, helper::UserIdHelper, log_internal, plugin::*};
use anyhow::Result;

pub struct Reload;

#[serenity::async_trait]
impl Plugin for Reload {
    fn name(&self) -> &'static str {
        "reload"
    }

    fn is_command(&self) -> bool {
        true
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        let prefix = &ctx.cfg.read().await.general.command_prefix;
        Some(format!(
            "{}{} - reload config (bot owner only)",
            prefix,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some((msg, _)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };

        let response = if msg.author.id.is_owner(ctx).await {
            ctx.cfg.write().await.reload().await?;
            log_internal!("Configuration reloaded");
            "Configuration reloaded successfully"
        } else {
            "No son, only the bot owner can do that"
        };

        msg.reply(ctx.cache_http, response).await?;
        Ok(EventHandled::Yes)
    }
}
