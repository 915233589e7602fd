//! Probability-gated jokes.
//!
//! Every joke is asked in random order.  A joke only gets to look at a message when a uniform
//! draw in `[0, 100)` falls under the guild's configured chance for it.

use crate::{
    context::Context,
    options::{GuildOption, OptionValue},
};
use anyhow::Result;
use rand::Rng;
use serenity::all::{
    ChannelId, CreateEmbed, CreateMessage, GuildId, Message, Reaction, ReactionType,
};
use std::sync::LazyLock;

pub mod canceled;
pub mod chore;
pub mod cowsay;
pub mod favoritism;
pub mod her;
pub mod i_am_dad;
pub mod phrase;
pub mod rank;
pub mod society;
pub mod spongebob_chicken;

/// What a joke did with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JokeMade {
    /// A message was sent.  No other joke should go.
    Verbal,
    /// Only reactions were added.  Other jokes may still go.
    NonVerbal,
    No,
}

#[serenity::async_trait]
pub trait Joke: Sync + Send {
    /// Name, also the name of the guild option holding its chance
    fn name(&self) -> &'static str;
    /// Percent chance [0.0, 100.0] used until an admin changes it
    fn default_chance(&self) -> f64;
    /// Extra guild options beyond the chance
    fn options(&self) -> Vec<GuildOption> {
        Vec::new()
    }
    /// Attempt the joke on a message
    async fn make_verbal_joke(&self, ctx: &Context, msg: &Message) -> Result<JokeMade>;
    /// Whether `make_reaction_joke` does anything, so the reacted message is worth fetching
    fn handles_reactions(&self) -> bool {
        false
    }
    /// Attempt the joke on a reaction to `msg`
    async fn make_reaction_joke(
        &self,
        _ctx: &Context,
        _reaction: &Reaction,
        _msg: &Message,
    ) -> Result<JokeMade> {
        Ok(JokeMade::No)
    }
}

static JOKES: LazyLock<Vec<Box<dyn Joke>>> = LazyLock::new(|| {
    let mut jokes: Vec<Box<dyn Joke>> = vec![
        Box::new(i_am_dad::IAmDad),
        Box::new(her::Her),
        Box::new(rank::Rank),
        Box::new(cowsay::CowSay),
        Box::new(spongebob_chicken::SpongebobChicken),
        Box::new(society::Society),
        Box::new(canceled::Canceled),
        Box::new(chore::Chore),
        Box::new(favoritism::Favoritism),
    ];
    for joke in phrase::table() {
        jokes.push(Box::new(joke));
    }
    jokes
});

static GUILD_OPTIONS: LazyLock<Vec<GuildOption>> = LazyLock::new(|| {
    let mut options = Vec::new();
    for joke in jokes() {
        options.push(chance_option(joke.as_ref()));
        options.extend(joke.options());
    }
    options.sort_by(|a, b| a.name.cmp(&b.name));
    options
});

/// Every registered joke
pub fn jokes() -> &'static [Box<dyn Joke>] {
    &JOKES
}

/// Every guild option any joke registers, sorted by name
pub fn guild_options() -> &'static [GuildOption] {
    &GUILD_OPTIONS
}

pub fn find_option(name: &str) -> Option<&'static GuildOption> {
    guild_options().iter().find(|option| option.name == name)
}

pub fn chance_option(joke: &dyn Joke) -> GuildOption {
    GuildOption::percentage(joke.name(), joke.default_chance())
}

pub fn should_attempt(chance: f64, draw: f64) -> bool {
    draw < chance
}

/// Uniform draw in `[0, 100)`
pub fn roll() -> f64 {
    rand::thread_rng().gen_range(0.0..100.0)
}

pub async fn option_value(ctx: &Context<'_>, guild_id: GuildId, option: &GuildOption) -> OptionValue {
    ctx.pstate.read().await.option(guild_id, option)
}

/// Roll against a percentage option
pub async fn chance_passes(ctx: &Context<'_>, guild_id: GuildId, option: &GuildOption) -> bool {
    let chance = option_value(ctx, guild_id, option).await.as_f64();
    should_attempt(chance, roll())
}

/// Roll against the joke's own chance in this guild
pub async fn gate(ctx: &Context<'_>, guild_id: GuildId, joke: &dyn Joke) -> bool {
    chance_passes(ctx, guild_id, &chance_option(joke)).await
}

pub async fn say(ctx: &Context<'_>, channel_id: ChannelId, text: impl Into<String>) -> Result<()> {
    channel_id.say(ctx.cache_http, text).await?;
    Ok(())
}

/// Send an embed with a random image from `category`.  Missing images leave the embed bare.
pub async fn send_image(
    ctx: &Context<'_>,
    channel_id: ChannelId,
    title: Option<&str>,
    description: Option<&str>,
    category: &str,
) -> Result<()> {
    let mut embed = CreateEmbed::new();
    if let Some(title) = title {
        embed = embed.title(title);
    }
    if let Some(description) = description {
        embed = embed.description(description);
    }
    send_image_embed(ctx, channel_id, embed, category).await
}

/// Send `embed` after attaching a random image from `category`, if there is one.
pub async fn send_image_embed(
    ctx: &Context<'_>,
    channel_id: ChannelId,
    mut embed: CreateEmbed,
    category: &str,
) -> Result<()> {
    let url = ctx.images.read().await.random_url(category);
    if let Some(url) = url {
        embed = embed.image(url);
    }

    channel_id
        .send_message(ctx.cache_http, CreateMessage::new().embed(embed))
        .await?;
    Ok(())
}

pub async fn react(ctx: &Context<'_>, msg: &Message, emoji: &str) -> Result<()> {
    msg.react(ctx.cache_http, ReactionType::Unicode(emoji.to_owned()))
        .await?;
    Ok(())
}

/// Cut `s` to at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Everything after the first `n` characters.
pub fn skip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_comparison() {
        assert!(!should_attempt(0.0, 0.0));
        assert!(should_attempt(100.0, 99.999));
        assert!(should_attempt(25.0, 24.9));
        assert!(!should_attempt(25.0, 25.0));
    }

    #[test]
    fn roll_in_range() {
        for _ in 0..1000 {
            let draw = roll();
            assert!((0.0..100.0).contains(&draw));
        }
    }

    #[test]
    fn joke_names_are_unique() {
        let mut names: Vec<&str> = jokes().iter().map(|joke| joke.name()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn default_chances_are_percentages() {
        for joke in jokes() {
            let chance = joke.default_chance();
            assert!((0.0..=100.0).contains(&chance), "{}", joke.name());
        }
    }

    #[test]
    fn registered_options() {
        assert_eq!(
            find_option("her").map(|option| option.default),
            Some(OptionValue::Percentage(25.0))
        );
        assert_eq!(
            find_option("i_am_dad_change_nickname").map(|option| option.default),
            Some(OptionValue::Boolean(true))
        );
        assert!(find_option("favoritism_praise_chance").is_some());
        assert!(find_option("chore_timeout").is_some());
        assert!(find_option("nope").is_none());
    }

    #[test]
    fn char_slicing() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 5), "hi");
        assert_eq!(skip_chars("héllo", 2), "llo");
        assert_eq!(skip_chars("hi", 5), "");
    }
}
