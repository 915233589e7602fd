//! Dad is a gamer.  He understands the need to rise up.

use super::{react, send_image, Joke, JokeMade};
use crate::{context::Context, log_joke};
use anyhow::Result;
use regex::{Regex, RegexBuilder};
use serenity::all::Message;
use std::sync::LazyLock;

/// Used when the guild has no custom emoji by this name
const SOCIETY_EMOJI: &str = "society";
const FALLBACK_EMOJI: &str = "🤡";

static SOCIETY_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"society|gamer|rise up|rising up|bottom text|fortnite|v(-)?bucks")
        .case_insensitive(true)
        .build()
        .unwrap()
});

pub fn find_society(content: &str) -> Option<&str> {
    SOCIETY_RE.find(content).map(|m| m.as_str())
}

pub struct Society;

#[serenity::async_trait]
impl Joke for Society {
    fn name(&self) -> &'static str {
        "society"
    }

    fn default_chance(&self) -> f64 {
        100.0
    }

    async fn make_verbal_joke(&self, ctx: &Context, msg: &Message) -> Result<JokeMade> {
        let Some(matched) = find_society(&msg.content) else {
            return Ok(JokeMade::No);
        };
        log_joke!(ctx, msg.guild_id, msg.author.id, self.name(), matched);

        // Cache guard must not live across an await
        let custom = msg.guild_id.and_then(|guild_id| {
            ctx.cache.guild(guild_id).and_then(|guild| {
                guild
                    .emojis
                    .values()
                    .find(|emoji| emoji.name == SOCIETY_EMOJI)
                    .cloned()
            })
        });
        match custom {
            Some(emoji) => {
                msg.react(ctx.cache_http, emoji).await?;
            }
            None => react(ctx, msg, FALLBACK_EMOJI).await?,
        }

        send_image(ctx, msg.channel_id, None, None, "society").await?;
        Ok(JokeMade::Verbal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn society_phrases() {
        assert_eq!(find_society("we live in a Society"), Some("Society"));
        assert_eq!(find_society("free v-bucks"), Some("v-bucks"));
        assert_eq!(find_society("VBUCKS"), Some("VBUCKS"));
        assert_eq!(find_society("gamers rise up"), Some("gamer"));
        assert_eq!(find_society("top text"), None);
    }
}
