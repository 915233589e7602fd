use crate::{
    event::*,
    helper::{contains_shut_up, UserIdHelper},
    log_internal,
    logging::AsyncPrintColor,
    plugin::*,
    volatile_state::shut_up_duration,
};
use anyhow::Result;

/// Admins can tell Dad to be quiet for a while.  While he is, nothing after this plugin runs in
/// that guild.
pub struct ShutUp;

#[serenity::async_trait]
impl Plugin for ShutUp {
    fn name(&self) -> &'static str {
        "shut_up"
    }

    async fn usage(&self, _ctx: &Context) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some(guild_id) = event.guild_id() else {
            return Ok(EventHandled::No);
        };

        if let Event::Message(msg) = event {
            let my_id = ctx.cache.current_user().id;
            if msg.mentions_user_id(my_id) && contains_shut_up(&msg.content) {
                let response = if msg.author.id.is_admin_in(ctx, guild_id).await {
                    let duration = shut_up_duration(ctx.cfg.read().await.dad.shut_up_minutes);
                    let minutes = duration.as_secs() / 60;
                    ctx.vstate.write().await.shut_up.shut_up(guild_id, duration);
                    log_internal!(
                        "Told to shut up in {} for {} minutes",
                        guild_id.color(ctx.http).await,
                        minutes
                    );
                    format!("Okay son, I'll leave you alone for {} minutes", minutes)
                } else {
                    "No son, I am the boss".to_owned()
                };
                msg.channel_id.say(ctx.cache_http, response).await?;
            }
        }

        if ctx.vstate.write().await.shut_up.is_shut_up(guild_id) {
            Ok(EventHandled::Yes)
        } else {
            Ok(EventHandled::No)
        }
    }
}
