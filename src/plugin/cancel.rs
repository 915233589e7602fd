use crate::{
    event::*,
    joke::canceled::{cancel, Party},
    plugin::*,
};
use anyhow::Result;
use serenity::utils::parse_user_mention;

/// Lets members cancel each other, at a cost.
pub struct Cancel;

#[serenity::async_trait]
impl Plugin for Cancel {
    fn name(&self) -> &'static str {
        "cancel"
    }

    fn is_command(&self) -> bool {
        true
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        let prefix = &ctx.cfg.read().await.general.command_prefix;
        Some(format!(
            "{}{} <@member> <reason> - cancel someone, tattletales lose points too",
            prefix,
            self.name()
        ))
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some((msg, args)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };
        let Some(guild_id) = msg.guild_id else {
            return Ok(EventHandled::Yes);
        };

        let target = args.first().and_then(|mention| parse_user_mention(mention));
        let reason = args.get(1..).unwrap_or_default().join(" ");
        let Some(target) = target.filter(|_| !reason.is_empty()) else {
            let usage = self.usage(ctx).await.unwrap_or_default();
            msg.reply(ctx.cache_http, format!("Usage: {}", usage))
                .await?;
            return Ok(EventHandled::Yes);
        };

        let canceled = target.to_user(ctx.cache_http).await?;
        cancel(
            ctx,
            guild_id,
            msg.channel_id,
            Party::from(&msg.author),
            Party::from(&canceled),
            &reason,
        )
        .await?;
        Ok(EventHandled::Yes)
    }
}
