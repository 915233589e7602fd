//! Cancel culture.  Dad allows it, but he doesn't like tattletales.

use super::{favoritism::add_points_to_member, send_image_embed, Joke, JokeMade};
use crate::{context::Context, log_internal, log_joke, logging::AsyncPrintColor};
use anyhow::Result;
use serenity::all::{ChannelId, CreateEmbed, GuildId, Mentionable, Message, User, UserId};

pub const CANCELED_POINTS: i64 = -25;
/// For the one who did the canceling
pub const TATTLING_POINTS: i64 = -10;

/// Someone on either end of a cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Party {
    pub id: UserId,
    pub bot: bool,
}

impl From<&User> for Party {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            bot: user.bot,
        }
    }
}

/// Who actually gets canceled and what gets said.
#[derive(Debug, PartialEq, Eq)]
pub struct Cancellation {
    pub canceled: Party,
    pub description: String,
    /// Points for the canceled member, then for the canceler
    pub points: Vec<(UserId, i64)>,
}

/// Bots can't be canceled.  Trying gets the canceler canceled instead.
pub fn plan(canceler: Party, canceled: Party, reason: &str) -> Cancellation {
    let (canceled, description) = if canceled.bot {
        (
            canceler,
            format!(
                "You can't cancel a bot. {}, you're canceled.",
                canceler.id.mention()
            ),
        )
    } else {
        (
            canceled,
            format!(
                "{}, you're canceled because:\n**{}**.",
                canceled.id.mention(),
                reason
            ),
        )
    };

    let mut points = Vec::new();
    if !canceled.bot {
        points.push((canceled.id, CANCELED_POINTS));
    }
    if !canceler.bot {
        points.push((canceler.id, TATTLING_POINTS));
    }

    Cancellation {
        canceled,
        description,
        points,
    }
}

/// Cancel someone in `guild_id`, announcing it in `channel_id`.
pub async fn cancel(
    ctx: &Context<'_>,
    guild_id: GuildId,
    channel_id: ChannelId,
    canceler: Party,
    canceled: Party,
    reason: &str,
) -> Result<()> {
    let cancellation = plan(canceler, canceled, reason);

    let counter = {
        let mut pstate = ctx.pstate.write().await;
        let counter = pstate
            .guild_mut(guild_id)
            .increment_cancel_counter(cancellation.canceled.id);
        pstate.save().await?;
        counter
    };
    log_internal!(
        "{} canceled {} times",
        cancellation.canceled.id.color(ctx.http).await,
        counter
    );

    for (user_id, points) in &cancellation.points {
        add_points_to_member(ctx, guild_id, *user_id, *points).await?;
    }

    let embed = CreateEmbed::new()
        .title("Canceled!")
        .description(cancellation.description);
    send_image_embed(ctx, channel_id, embed, "cancelled").await
}

pub struct Canceled;

#[serenity::async_trait]
impl Joke for Canceled {
    fn name(&self) -> &'static str {
        "canceled"
    }

    fn default_chance(&self) -> f64 {
        0.01
    }

    async fn make_verbal_joke(&self, ctx: &Context, msg: &Message) -> Result<JokeMade> {
        let Some(guild_id) = msg.guild_id else {
            return Ok(JokeMade::No);
        };
        log_joke!(ctx, guild_id, msg.author.id, self.name(), "RNGesus");

        let dad = Party {
            id: ctx.cache.current_user().id,
            bot: true,
        };
        cancel(
            ctx,
            guild_id,
            msg.channel_id,
            dad,
            Party::from(&msg.author),
            "RNGesus",
        )
        .await?;
        Ok(JokeMade::Verbal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human(id: u64) -> Party {
        Party {
            id: UserId::new(id),
            bot: false,
        }
    }

    fn bot(id: u64) -> Party {
        Party {
            id: UserId::new(id),
            bot: true,
        }
    }

    #[test]
    fn dad_cancels_a_member() {
        let cancellation = plan(bot(1), human(2), "RNGesus");
        assert_eq!(cancellation.canceled, human(2));
        assert_eq!(
            cancellation.description,
            "<@2>, you're canceled because:\n**RNGesus**."
        );
        assert_eq!(cancellation.points, vec![(UserId::new(2), -25)]);
    }

    #[test]
    fn tattletales_lose_points_too() {
        let cancellation = plan(human(1), human(2), "being late");
        assert_eq!(
            cancellation.points,
            vec![(UserId::new(2), -25), (UserId::new(1), -10)]
        );
    }

    #[test]
    fn canceling_a_bot_backfires() {
        let cancellation = plan(human(1), bot(3), "beep");
        assert_eq!(cancellation.canceled, human(1));
        assert_eq!(
            cancellation.description,
            "You can't cancel a bot. <@1>, you're canceled."
        );
        assert_eq!(
            cancellation.points,
            vec![(UserId::new(1), -25), (UserId::new(1), -10)]
        );
    }
}
