//! "Major Tom" gets a salute.

use super::{send_image, Joke, JokeMade};
use crate::{context::Context, log_joke};
use anyhow::Result;
use regex::{Regex, RegexBuilder};
use serenity::all::Message;
use std::sync::LazyLock;

const RANKS: &[&str] = &[
    "admiral",
    "brigadier",
    "cadet",
    "captain",
    "colonel",
    "commander",
    "general",
    "marshal",
    "major",
    "officer",
    "lieutenant",
    "private",
    "sergeant",
];

static RANK_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r".*(?P<rank>\b({})\b)(ly)?\s+(?P<title>\b\w+\b)",
        RANKS.join("|")
    );
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .unwrap()
});

/// First letter upper, the rest lower
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// "Rank Title" if the message has a rank followed by a word.
pub fn find_title(content: &str) -> Option<String> {
    let caps = RANK_RE.captures(content)?;
    Some(format!(
        "{} {}",
        capitalize(caps.name("rank")?.as_str()),
        capitalize(caps.name("title")?.as_str())
    ))
}

pub struct Rank;

#[serenity::async_trait]
impl Joke for Rank {
    fn name(&self) -> &'static str {
        "rank"
    }

    fn default_chance(&self) -> f64 {
        100.0
    }

    async fn make_verbal_joke(&self, ctx: &Context, msg: &Message) -> Result<JokeMade> {
        let Some(title) = find_title(&msg.content) else {
            return Ok(JokeMade::No);
        };
        log_joke!(ctx, msg.guild_id, msg.author.id, self.name(), title);

        send_image(ctx, msg.channel_id, Some(title.as_str()), None, "salute").await?;
        Ok(JokeMade::Verbal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_and_title() {
        assert_eq!(find_title("Major Tom"), Some("Major Tom".to_owned()));
        assert_eq!(
            find_title("that was a major EXPLANATION"),
            Some("Major Explanation".to_owned())
        );
        assert_eq!(find_title("general   kenobi"), Some("General Kenobi".to_owned()));
    }

    #[test]
    fn no_rank() {
        assert_eq!(find_title("Tomato"), None);
        assert_eq!(find_title("Major"), None);
        assert_eq!(find_title("majority rules"), None);
    }

    #[test]
    fn capitalization() {
        assert_eq!(capitalize("sERGEANT"), "Sergeant");
        assert_eq!(capitalize(""), "");
    }
}
