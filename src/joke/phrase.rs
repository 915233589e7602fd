//! Jokes that are nothing more than "see this phrase, send that response".

use super::{favoritism, react, say, send_image, Joke, JokeMade};
use crate::{context::Context, log_joke};
use anyhow::Result;
use regex::{Regex, RegexBuilder};
use serenity::all::{Mentionable, Message};

pub enum Response {
    /// Text where `{author}` becomes a mention of the message author
    Text(&'static str),
    /// Embed with a random image from a category
    Image {
        title: Option<&'static str>,
        category: &'static str,
    },
    /// Reactions added in order.  Non-verbal.
    Reactions(&'static [&'static str]),
}

pub struct PhraseJoke {
    name: &'static str,
    default_chance: f64,
    pattern: Regex,
    response: Response,
}

const OK_ZOOMER: &[&str] = &["🆗", "🇿", "🇴", "0️⃣", "🇲", "🇪", "🇷"];

fn phrases(phrases: &[&str]) -> String {
    phrases.join("|")
}

/// The table of phrase jokes.
pub fn table() -> Vec<PhraseJoke> {
    vec![
        PhraseJoke::new(
            "becky",
            100.0,
            &phrases(&["becky", "let me", "lemme", "smash"]),
            Response::Text("https://www.youtube.com/watch?v=qSJ5I5v8zwQ"),
        ),
        PhraseJoke::new(
            "bonk",
            100.0,
            "bonk",
            Response::Image {
                title: None,
                category: "bonk",
            },
        ),
        PhraseJoke::new(
            "byeah",
            100.0,
            &phrases(&[
                "byeah",
                "cheeseburger",
                "hot dog",
                "bug collect",
                "bar fighting",
                "doughnut",
            ]),
            Response::Text("{author} byeah"),
        ),
        PhraseJoke::new(
            "naughty",
            5.0,
            &favoritism::rude_pattern(),
            Response::Image {
                title: Some("Children shouldn't swear"),
                category: "naughty",
            },
        ),
        PhraseJoke::new(
            "ok_boomer",
            100.0,
            r"(o)?k(ay)? boomer",
            Response::Reactions(OK_ZOOMER),
        ),
        PhraseJoke::new(
            "senpai",
            100.0,
            &phrases(&["senpai", "notice me"]),
            Response::Image {
                title: None,
                category: "senpai",
            },
        ),
        PhraseJoke::new(
            "simply",
            100.0,
            &phrases(&["simply", "one does not", "one doesn't"]),
            Response::Image {
                title: None,
                category: "simply",
            },
        ),
        PhraseJoke::new(
            "smashing",
            100.0,
            "smash",
            Response::Image {
                title: None,
                category: "smashing",
            },
        ),
        PhraseJoke::new(
            "stickbug",
            100.0,
            &phrases(&["stick", "bug"]),
            Response::Image {
                title: None,
                category: "stickbug",
            },
        ),
        // Matches anything
        PhraseJoke::new("thats_fair", 1.0, "", Response::Text("{author} that's fair")),
    ]
}

impl PhraseJoke {
    /// Panics on a bad pattern, which only the table above supplies.
    fn new(name: &'static str, default_chance: f64, pattern: &str, response: Response) -> Self {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .unwrap_or_else(|e| panic!("invalid pattern for joke {}: {}", name, e));
        Self {
            name,
            default_chance,
            pattern,
            response,
        }
    }

    pub fn matches<'a>(&self, content: &'a str) -> Option<&'a str> {
        self.pattern.find(content).map(|m| m.as_str())
    }
}

pub fn render_text(template: &str, author_mention: &str) -> String {
    template.replace("{author}", author_mention)
}

#[serenity::async_trait]
impl Joke for PhraseJoke {
    fn name(&self) -> &'static str {
        self.name
    }

    fn default_chance(&self) -> f64 {
        self.default_chance
    }

    async fn make_verbal_joke(&self, ctx: &Context, msg: &Message) -> Result<JokeMade> {
        let Some(matched) = self.matches(&msg.content) else {
            return Ok(JokeMade::No);
        };
        log_joke!(ctx, msg.guild_id, msg.author.id, self.name, matched);

        match &self.response {
            Response::Text(template) => {
                let mention = msg.author.mention().to_string();
                say(ctx, msg.channel_id, render_text(template, &mention)).await?;
                Ok(JokeMade::Verbal)
            }
            Response::Image { title, category } => {
                send_image(ctx, msg.channel_id, *title, None, category).await?;
                Ok(JokeMade::Verbal)
            }
            Response::Reactions(emojis) => {
                for emoji in emojis.iter() {
                    react(ctx, msg, emoji).await?;
                }
                Ok(JokeMade::NonVerbal)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joke(name: &str) -> PhraseJoke {
        table()
            .into_iter()
            .find(|joke| joke.name == name)
            .unwrap()
    }

    #[test]
    fn phrases_match_case_insensitively() {
        assert_eq!(joke("bonk").matches("BONK him"), Some("BONK"));
        assert_eq!(joke("becky").matches("Lemme see"), Some("Lemme"));
        assert_eq!(joke("stickbug").matches("a Bug!"), Some("Bug"));
    }

    #[test]
    fn ok_boomer_variants() {
        let boomer = joke("ok_boomer");
        assert!(boomer.matches("ok boomer").is_some());
        assert!(boomer.matches("Okay Boomer").is_some());
        assert!(boomer.matches("k boomer").is_some());
        assert!(boomer.matches("boomer").is_none());
    }

    #[test]
    fn naughty_uses_rude_words() {
        let naughty = joke("naughty");
        assert!(naughty.matches("that was awful").is_some());
        assert!(naughty.matches("a classic bass line").is_none());
    }

    #[test]
    fn thats_fair_matches_anything() {
        assert!(joke("thats_fair").matches("").is_some());
        assert!(joke("thats_fair").matches("whatever").is_some());
    }

    #[test]
    fn text_templates() {
        assert_eq!(render_text("{author} byeah", "<@1>"), "<@1> byeah");
        assert_eq!(
            render_text("https://example.com", "<@1>"),
            "https://example.com"
        );
    }
}
