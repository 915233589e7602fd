use super::{say, Joke, JokeMade};
use crate::{context::Context, log_joke};
use anyhow::Result;
use regex::{Regex, RegexBuilder};
use serenity::all::Message;
use std::sync::LazyLock;

const STEM_MAX_CHARS: usize = 1960;

static HER_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^.*(?P<her>\b((\w*[^h])|(\w+h))er[s]?\b).*")
        .case_insensitive(true)
        .build()
        .unwrap()
});

/// The last word ending in "er" or "ers", minus the "er" and any "h" before it.
pub fn find_stem(content: &str) -> Option<String> {
    let caps = HER_RE.captures(content)?;
    let stem = caps.get(2)?.as_str();
    let stem = stem
        .strip_suffix(['h', 'H'])
        .unwrap_or(stem);
    Some(stem.to_owned())
}

/// Uppercase the first letter of every run of letters, lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Keep the reply under Discord's limit by cutting out the middle.  The result is at most
/// `STEM_MAX_CHARS` long.
fn shorten(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() <= STEM_MAX_CHARS {
        return stem.to_owned();
    }

    let keep = (STEM_MAX_CHARS - "...".len()) / 2;
    let head: String = chars[..keep].iter().collect();
    let tail: String = chars[chars.len() - keep..].iter().collect();
    format!("{}...{}", head, tail)
}

pub fn response(stem: &str) -> String {
    format!("{}*her*, I barely know her!", title_case(&shorten(stem)))
}

pub struct Her;

#[serenity::async_trait]
impl Joke for Her {
    fn name(&self) -> &'static str {
        "her"
    }

    fn default_chance(&self) -> f64 {
        25.0
    }

    async fn make_verbal_joke(&self, ctx: &Context, msg: &Message) -> Result<JokeMade> {
        let Some(stem) = find_stem(&msg.content) else {
            return Ok(JokeMade::No);
        };
        log_joke!(ctx, msg.guild_id, msg.author.id, self.name(), stem);

        say(ctx, msg.channel_id, response(&stem)).await?;
        Ok(JokeMade::Verbal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems() {
        assert_eq!(find_stem("I'll water the plants"), Some("wat".to_owned()));
        assert_eq!(find_stem("look at the flowers"), Some("flow".to_owned()));
        assert_eq!(find_stem("my brother"), Some("brot".to_owned()));
        assert_eq!(find_stem("nothing to see"), None);
    }

    #[test]
    fn last_word_wins() {
        assert_eq!(find_stem("water and butter"), Some("butt".to_owned()));
    }

    #[test]
    fn barely_know_her() {
        assert_eq!(response("wat"), "Wat*her*, I barely know her!");
        assert_eq!(response("SUP"), "Sup*her*, I barely know her!");
    }

    #[test]
    fn long_stems_lose_their_middle() {
        let stem = format!("b{}c", "a".repeat(2998));
        let short = shorten(&stem);
        assert!(short.chars().count() <= STEM_MAX_CHARS);
        assert!(short.starts_with("baa"));
        assert!(short.ends_with("aac"));
        assert!(short.contains("a...a"));
        assert!(response(&stem).chars().count() <= 2000);

        let exact = "a".repeat(STEM_MAX_CHARS);
        assert_eq!(shorten(&exact), exact);
        assert_eq!(shorten("short"), "short");
    }
}
