//! A little `cowsay` of whatever was said.

use super::{say, Joke, JokeMade};
use crate::{context::Context, log_joke};
use anyhow::Result;
use rand::seq::SliceRandom;
use serenity::all::Message;

const BUBBLE_WIDTH: usize = 50;

const COW: &str = r"
    \   ^__^
     \  (oo)\_______
        (__)\       )\/\
            ||----w |
            ||     ||
";

const TUX: &str = r"
    \   .--.
     \ |o_o |
       |:_/ |
      //   \ \
     (|     | )
    /'\_   _/`\
    \___)=(___/
";

const CHARACTERS: &[(&str, &str)] = &[("cow", COW), ("tux", TUX)];

/// Split on whitespace and pack words into lines no wider than `width`.  A single word wider
/// than `width` gets a line to itself.
pub fn slice_message(message: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for word in message.split_whitespace() {
        match lines.last_mut() {
            Some(line) if line.chars().count() + word.chars().count() < width => {
                line.push(' ');
                line.push_str(word);
            }
            _ => lines.push(word.to_owned()),
        }
    }
    lines
}

pub fn speech_bubble(message: &str, width: usize) -> String {
    let len = message.chars().count();
    let (text_width, bubble_width) = if len < width - 2 {
        (len, len + 2)
    } else {
        (width - 2, width)
    };

    let mut bubble = format!("/{}\\\n", "-".repeat(bubble_width));
    for line in slice_message(message, text_width) {
        bubble.push_str(&format!("|{:<bubble_width$}|\n", line));
    }
    bubble.push('\\');
    bubble.push_str(&"-".repeat(bubble_width));
    bubble.push('/');
    bubble
}

pub struct CowSay;

#[serenity::async_trait]
impl Joke for CowSay {
    fn name(&self) -> &'static str {
        "cowsay"
    }

    fn default_chance(&self) -> f64 {
        1.0
    }

    async fn make_verbal_joke(&self, ctx: &Context, msg: &Message) -> Result<JokeMade> {
        if msg.content.trim().is_empty() {
            return Ok(JokeMade::No);
        }

        let (name, art) = *CHARACTERS
            .choose(&mut rand::thread_rng())
            .unwrap_or(&CHARACTERS[0]);
        log_joke!(ctx, msg.guild_id, msg.author.id, self.name(), name);

        let text = format!(
            "```{}{}```",
            speech_bubble(&msg.content, BUBBLE_WIDTH),
            art
        );
        say(ctx, msg.channel_id, text).await?;
        Ok(JokeMade::Verbal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_packed() {
        assert_eq!(
            slice_message("the quick brown fox", 9),
            vec!["the quick", "brown fox"]
        );
        assert_eq!(slice_message("a b c", 100), vec!["a b c"]);
        assert_eq!(slice_message("enormousword hi", 4), vec!["enormousword", "hi"]);
        assert!(slice_message("   ", 10).is_empty());
    }

    #[test]
    fn short_bubble() {
        assert_eq!(speech_bubble("moo", 50), "/-----\\\n|moo  |\n\\-----/");
    }

    #[test]
    fn wide_bubble_wraps() {
        let message = "word ".repeat(30);
        let bubble = speech_bubble(message.trim(), 50);
        let lines: Vec<&str> = bubble.lines().collect();
        assert!(lines.len() > 3);
        for line in &lines {
            assert_eq!(line.chars().count(), 52);
        }
    }
}
