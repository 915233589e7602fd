//! Dad plays favorites.
//!
//! Members earn points for being nice to Dad and lose them for being rude.  The member with the
//! most points is the favorite child and gets praised; the one with the fewest is the hated child
//! and gets punished.

use super::{chance_passes, react, say, Joke, JokeMade};
use crate::{
    context::Context,
    helper::{emoji_eq, emoji_name, Members, MessageHelper},
    log_internal, log_joke,
    logging::AsyncPrintColor,
    options::GuildOption,
};
use anyhow::Result;
use rand::{seq::SliceRandom, Rng};
use regex::{Regex, RegexBuilder};
use serenity::all::{ChannelId, GuildId, Mentionable, Message, Reaction, UserId};
use std::sync::LazyLock;

pub const NAME: &str = "favoritism";
pub const PRAISE_CHANCE: &str = "favoritism_praise_chance";
pub const PUNISHMENT_CHANCE: &str = "favoritism_punishment_chance";

/// Points for a nice emoji on one of Dad's messages
pub const NICE_REACTION_POINTS: i64 = 1;
pub const THANK_POINTS: i64 = 3;
pub const PUNISH_POINTS: i64 = -3;

pub const PUNISHMENTS: &[&str] = &[
    "go to your room",
    ", I'm taking your GameCube",
    ", I'm taking your phone",
    ", I'm turning off the WiFi",
    "you're grounded",
    "you're in time out",
    "you're not getting your allowance",
];

pub const FAVORITE_CHILD_EMOJIS: &[&str] = &["⭐", "🌠", "🌟"];

pub const HATED_CHILD_EMOJIS: &[&str] = &["🤬", "🖕", "🚫", "⛔", "💩"];

pub const NICE_EMOJIS: &[&str] = &[
    "😇", "☺️", "😊", "🙂", "😍", "🥰", "😘", "😗", "😙", "😉", "😄", "😆", "👍", "🤣", "😂", "😹",
    "😻", "😽", "❤️", "🧡", "💛", "💚", "💙", "💜", "🖤", "🤎", "🤍", "❣️", "💕", "💞", "💓", "💗",
    "💖", "💘", "💝", "💟",
];

pub const RUDE_EMOJIS: &[&str] = &[
    "😒", "😡", "🤬", "💀", "😴", "😾", "☠️", "🖕", "👊", "🤛", "🤜", "✊", "🚫", "⛔", "💩", "💔",
];

const NICE_PHRASES: &[&str] = &[
    "amazing",
    "best",
    "fair",
    "fav",
    "fun",
    "good",
    "great",
    "like",
    "love",
    "sorry",
    "thank",
    "ty",
    "welcome",
    "wonderful",
];

const RUDE_PHRASES: &[&str] = &[
    "abuse",
    "abusive",
    "ass",
    "awful",
    "bad",
    "ban",
    "boo",
    "detestable",
    "embarrass",
    "exterminate",
    "extinguish",
    "fail",
    "fuck",
    "hate",
    "heck",
    "hell",
    "horrible",
    "get out",
    "kick",
    "kill",
    "loathe",
    "murder",
    "petty",
    "piss",
    "remove",
    "screw",
    "stink",
    "suck",
    "thief",
    "tosser",
];

fn word_pattern(words: &[&str]) -> String {
    format!(r"\b(?:{})\b", words.join("|"))
}

/// Pattern matching any rude word, also used by the naughty joke
pub fn rude_pattern() -> String {
    word_pattern(RUDE_PHRASES)
}

static NICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(&word_pattern(NICE_PHRASES))
        .case_insensitive(true)
        .build()
        .unwrap()
});

static RUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(&rude_pattern())
        .case_insensitive(true)
        .build()
        .unwrap()
});

static PRAISE: LazyLock<GuildOption> =
    LazyLock::new(|| GuildOption::percentage(PRAISE_CHANCE, 100.0));
static PUNISHMENT: LazyLock<GuildOption> =
    LazyLock::new(|| GuildOption::percentage(PUNISHMENT_CHANCE, 100.0));

pub fn is_message_nice(content: &str) -> bool {
    NICE_RE.is_match(content)
}

/// The rude word, if any
pub fn is_message_rude(content: &str) -> Option<&str> {
    RUDE_RE.find(content).map(|m| m.as_str())
}

pub fn is_emoji_nice(emoji: &str) -> bool {
    NICE_EMOJIS
        .iter()
        .chain(FAVORITE_CHILD_EMOJIS)
        .any(|nice| emoji_eq(nice, emoji))
}

pub fn is_emoji_rude(emoji: &str) -> bool {
    RUDE_EMOJIS.iter().any(|rude| emoji_eq(rude, emoji))
}

/// `"<@1> go to your room."` or `"<@1>, I'm taking your phone."`
pub fn punishment_text(mention: &str, punishment: &str) -> String {
    if punishment.starts_with(',') {
        format!("{}{}.", mention, punishment)
    } else {
        format!("{} {}.", mention, punishment)
    }
}

/// Adjust a member's points, recompute the favorite and hated child, and save.
pub async fn add_points_to_member(
    ctx: &Context<'_>,
    guild_id: GuildId,
    user_id: UserId,
    points: i64,
) -> Result<()> {
    let members = Members::of(ctx, guild_id);
    let (old, new) = {
        let mut pstate = ctx.pstate.write().await;
        let change = pstate
            .guild_mut(guild_id)
            .add_points(user_id, points, |id| members.contains(id));
        pstate.save().await?;
        change
    };

    log_internal!(
        "{} points in {}: {}->{}",
        user_id.color(ctx.http).await,
        guild_id.color(ctx.http).await,
        old,
        new
    );
    Ok(())
}

/// The favorite and hated child of a guild
async fn children(ctx: &Context<'_>, guild_id: GuildId) -> (Option<UserId>, Option<UserId>) {
    let pstate = ctx.pstate.read().await;
    pstate
        .guild(guild_id)
        .map_or((None, None), |guild| (guild.favorite_child, guild.hated_child))
}

/// Something Dad does to a member
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Treatment {
    /// A star-eyed emoji for the favorite child
    Adore,
    /// A disapproving emoji for the hated child
    Scorn,
    /// Points off and a scolding
    Punish,
    /// Points on and thanks
    Thank,
}

impl Treatment {
    /// The guild option whose chance this has to pass
    fn chance(self) -> &'static GuildOption {
        match self {
            Treatment::Adore | Treatment::Thank => &PRAISE,
            Treatment::Scorn | Treatment::Punish => &PUNISHMENT,
        }
    }
}

/// What Dad knows about a message and its author
#[derive(Clone, Copy, Debug, Default)]
pub struct Judgement {
    pub is_favorite: bool,
    pub is_hated: bool,
    pub mentions_dad: bool,
    pub rude: bool,
    pub nice: bool,
}

impl Judgement {
    /// Treatment owed for who the author is
    pub fn standing(&self) -> Option<Treatment> {
        if self.is_favorite {
            Some(Treatment::Adore)
        } else if self.is_hated {
            Some(Treatment::Scorn)
        } else {
            None
        }
    }

    /// Treatment owed for what the author said to Dad.  Rudeness outweighs niceness.
    pub fn reply(&self) -> Option<Treatment> {
        match (self.mentions_dad, self.rude, self.nice) {
            (false, _, _) => None,
            (true, true, _) => Some(Treatment::Punish),
            (true, false, true) => Some(Treatment::Thank),
            (true, false, false) => None,
        }
    }
}

/// Treatment owed for reacting to Dad with `emoji`
pub fn treatment_for_emoji(emoji: &str) -> Option<Treatment> {
    if is_emoji_rude(emoji) {
        Some(Treatment::Punish)
    } else if is_emoji_nice(emoji) {
        Some(Treatment::Thank)
    } else {
        None
    }
}

/// Take points and scold them in `channel_id`.  Always verbal.
pub async fn punish_user(
    ctx: &Context<'_>,
    guild_id: GuildId,
    user_id: UserId,
    channel_id: ChannelId,
) -> Result<JokeMade> {
    log_joke!(ctx, guild_id, user_id, NAME, "Punished");
    add_points_to_member(ctx, guild_id, user_id, PUNISH_POINTS).await?;

    let punishment = PUNISHMENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(PUNISHMENTS[0]);
    let text = punishment_text(&user_id.mention().to_string(), punishment);
    say(ctx, channel_id, text).await?;
    Ok(JokeMade::Verbal)
}

/// Give points, then usually an emoji, occasionally a thank you.
pub async fn thank_message_author(
    ctx: &Context<'_>,
    guild_id: GuildId,
    msg: &Message,
) -> Result<JokeMade> {
    add_points_to_member(ctx, guild_id, msg.author.id, THANK_POINTS).await?;

    let verbal = rand::thread_rng().gen_range(0..20) == 0;
    if verbal {
        log_joke!(ctx, guild_id, msg.author.id, NAME, "Thank you message");
        say(ctx, msg.channel_id, format!("Thank you {}.", msg.author.mention())).await?;
        Ok(JokeMade::Verbal)
    } else {
        log_joke!(ctx, guild_id, msg.author.id, NAME, "Thank you emoji");
        let emoji = NICE_EMOJIS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(NICE_EMOJIS[0]);
        react(ctx, msg, emoji).await?;
        Ok(JokeMade::NonVerbal)
    }
}

pub struct Favoritism;

#[serenity::async_trait]
impl Joke for Favoritism {
    fn name(&self) -> &'static str {
        NAME
    }

    fn default_chance(&self) -> f64 {
        15.0
    }

    fn options(&self) -> Vec<GuildOption> {
        vec![PRAISE.clone(), PUNISHMENT.clone()]
    }

    fn handles_reactions(&self) -> bool {
        true
    }

    async fn make_verbal_joke(&self, ctx: &Context, msg: &Message) -> Result<JokeMade> {
        let Some(guild_id) = msg.guild_id else {
            return Ok(JokeMade::No);
        };
        let author = msg.author.id;

        let (favorite, hated) = children(ctx, guild_id).await;
        let judgement = Judgement {
            is_favorite: favorite == Some(author),
            is_hated: hated == Some(author),
            mentions_dad: msg.mentions_dad(ctx).await,
            rude: is_message_rude(&msg.content).is_some(),
            nice: is_message_nice(&msg.content),
        };

        if let Some(treatment) = judgement.standing() {
            if chance_passes(ctx, guild_id, treatment.chance()).await {
                let emojis = if treatment == Treatment::Adore {
                    FAVORITE_CHILD_EMOJIS
                } else {
                    HATED_CHILD_EMOJIS
                };
                let emoji = emojis
                    .choose(&mut rand::thread_rng())
                    .copied()
                    .unwrap_or(emojis[0]);
                react(ctx, msg, emoji).await?;
            }
        }

        let Some(treatment) = judgement.reply() else {
            return Ok(JokeMade::No);
        };
        if !chance_passes(ctx, guild_id, treatment.chance()).await {
            return Ok(JokeMade::No);
        }
        match treatment {
            Treatment::Punish => punish_user(ctx, guild_id, author, msg.channel_id).await,
            Treatment::Thank => thank_message_author(ctx, guild_id, msg).await,
            Treatment::Adore | Treatment::Scorn => Ok(JokeMade::No),
        }
    }

    async fn make_reaction_joke(
        &self,
        ctx: &Context,
        reaction: &Reaction,
        msg: &Message,
    ) -> Result<JokeMade> {
        let (Some(guild_id), Some(user_id)) = (reaction.guild_id, reaction.user_id) else {
            return Ok(JokeMade::No);
        };

        // Only reactions to Dad himself count
        if msg.author.id != ctx.cache.current_user().id {
            return Ok(JokeMade::No);
        }

        let Some(emoji) = emoji_name(&reaction.emoji) else {
            return Ok(JokeMade::No);
        };

        match treatment_for_emoji(&emoji) {
            Some(Treatment::Punish) => punish_user(ctx, guild_id, user_id, msg.channel_id).await,
            Some(Treatment::Thank) => {
                log_joke!(ctx, guild_id, user_id, NAME, emoji);
                add_points_to_member(ctx, guild_id, user_id, NICE_REACTION_POINTS).await?;
                Ok(JokeMade::NonVerbal)
            }
            _ => Ok(JokeMade::No),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_messages() {
        assert!(is_message_nice("Thank you dad"));
        assert!(is_message_nice("ty"));
        assert!(is_message_nice("you're the BEST"));
        assert!(!is_message_nice("typical"));
        assert!(!is_message_nice("hello dad"));
    }

    #[test]
    fn rude_messages() {
        assert_eq!(is_message_rude("dad you suck"), Some("suck"));
        assert_eq!(is_message_rude("GET OUT dad"), Some("GET OUT"));
        assert_eq!(is_message_rude("I'd like a bandana"), None);
        assert_eq!(is_message_rude("hello"), None);
    }

    #[test]
    fn emoji_moods() {
        assert!(is_emoji_nice("👍"));
        assert!(is_emoji_nice("❤"));
        assert!(is_emoji_nice("🌟"));
        assert!(is_emoji_rude("💩"));
        assert!(!is_emoji_rude("👍"));
        assert!(!is_emoji_nice("🐕"));
    }

    #[test]
    fn favorites_and_hated_get_looks() {
        let favorite = Judgement {
            is_favorite: true,
            ..Default::default()
        };
        assert_eq!(favorite.standing(), Some(Treatment::Adore));

        let hated = Judgement {
            is_hated: true,
            ..Default::default()
        };
        assert_eq!(hated.standing(), Some(Treatment::Scorn));

        assert_eq!(Judgement::default().standing(), None);
    }

    #[test]
    fn replies_need_dad_mentioned() {
        let rude = Judgement {
            rude: true,
            nice: true,
            ..Default::default()
        };
        assert_eq!(rude.reply(), None);

        let mentioned = Judgement {
            mentions_dad: true,
            ..rude
        };
        assert_eq!(mentioned.reply(), Some(Treatment::Punish));

        let nice = Judgement {
            rude: false,
            ..mentioned
        };
        assert_eq!(nice.reply(), Some(Treatment::Thank));

        let plain = Judgement {
            nice: false,
            ..nice
        };
        assert_eq!(plain.reply(), None);
    }

    #[test]
    fn favorites_can_still_be_punished() {
        let judgement = Judgement {
            is_favorite: true,
            mentions_dad: true,
            rude: true,
            ..Default::default()
        };
        assert_eq!(judgement.standing(), Some(Treatment::Adore));
        assert_eq!(judgement.reply(), Some(Treatment::Punish));
    }

    #[test]
    fn reactions_to_dad() {
        assert_eq!(treatment_for_emoji("💩"), Some(Treatment::Punish));
        assert_eq!(treatment_for_emoji("👍"), Some(Treatment::Thank));
        assert_eq!(treatment_for_emoji("🐕"), None);
    }

    #[test]
    fn punishments_read_naturally() {
        assert_eq!(
            punishment_text("<@1>", "go to your room"),
            "<@1> go to your room."
        );
        assert_eq!(
            punishment_text("<@1>", ", I'm taking your phone"),
            "<@1>, I'm taking your phone."
        );
    }
}
