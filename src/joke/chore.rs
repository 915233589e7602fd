//! Dad asks for help around the house, and waits to see if it gets done.
//!
//! The author finishes the chore by reacting to Dad's request with a fitting emoji before the
//! guild's `chore_timeout` runs out.

use super::{option_value, react, Joke, JokeMade};
use crate::{
    context::Context,
    helper::{emoji_eq, emoji_name},
    log_joke,
    options::GuildOption,
};
use anyhow::Result;
use rand::seq::SliceRandom;
use serenity::all::{Mentionable, Message, Reaction};
use std::{sync::LazyLock, time::Duration};

pub const TIMEOUT: &str = "chore_timeout";
const DEFAULT_TIMEOUT_SECS: i64 = 60;

/// How Dad asks, and the emoji he rewards with
const METHODS: &[(&str, &str)] = &[
    ("before dinner, please", "👍"),
    ("go", "👍"),
    ("help me", "👍"),
    ("if you want your allowance, ", "💵"),
];

/// The chore, and the emoji that count as doing it
const TASKS: &[(&str, &[&str])] = &[
    ("clean up the yard", &["🧹", "🍂", "🍃", "🍁"]),
    ("clean your room", &["🧹", "🧼", "🧽", "🧴"]),
    ("fold the laundry", &["👕", "🎽", "👚"]),
    ("mow the lawn", &["🪓", "🗡️", "⚔️", "🌿", "🔪", "🪒"]),
    ("rake the leaves", &["🧹", "🍂", "🍃", "🍁"]),
    ("walk the dog", &["🐶", "🐕", "🦮", "🐕‍🦺"]),
    ("wash the car", &["🚗", "🚙", "🧼", "🧽", "🧴"]),
];

const FAILED: &str = "👎";

static TIMEOUT_OPTION: LazyLock<GuildOption> =
    LazyLock::new(|| GuildOption::positive_int(TIMEOUT, DEFAULT_TIMEOUT_SECS));

pub fn request_text(mention: &str, method: &str, task: &str) -> String {
    format!("{} {} {}.", mention, method, task)
}

pub fn is_solution(solutions: &[&str], emoji: &str) -> bool {
    solutions.iter().any(|solution| emoji_eq(solution, emoji))
}

fn reaction_solves(solutions: &[&str], reaction: &Reaction) -> bool {
    emoji_name(&reaction.emoji).is_some_and(|emoji| is_solution(solutions, &emoji))
}

pub struct Chore;

#[serenity::async_trait]
impl Joke for Chore {
    fn name(&self) -> &'static str {
        "chore"
    }

    fn default_chance(&self) -> f64 {
        0.1
    }

    fn options(&self) -> Vec<GuildOption> {
        vec![TIMEOUT_OPTION.clone()]
    }

    async fn make_verbal_joke(&self, ctx: &Context, msg: &Message) -> Result<JokeMade> {
        let ((method, reward), (task, solutions)) = {
            let mut rng = rand::thread_rng();
            (
                *METHODS.choose(&mut rng).unwrap_or(&METHODS[0]),
                *TASKS.choose(&mut rng).unwrap_or(&TASKS[0]),
            )
        };
        log_joke!(ctx, msg.guild_id, msg.author.id, self.name(), task);

        let timeout = match msg.guild_id {
            Some(guild_id) => option_value(ctx, guild_id, &TIMEOUT_OPTION).await.as_i64(),
            None => DEFAULT_TIMEOUT_SECS,
        };
        let timeout = Duration::from_secs(timeout.max(1) as u64);

        let text = request_text(&msg.author.mention().to_string(), method, task);
        let request = msg.channel_id.say(ctx.cache_http, text).await?;

        // Any other emoji is ignored until time runs out
        let done = request
            .await_reaction(ctx.cache_http)
            .author_id(msg.author.id)
            .timeout(timeout)
            .filter(move |reaction| reaction_solves(solutions, reaction))
            .await;

        let answer = if done.is_some() { reward } else { FAILED };
        react(ctx, &request, answer).await?;
        Ok(JokeMade::Verbal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_reads_naturally() {
        assert_eq!(
            request_text("<@1>", "help me", "walk the dog"),
            "<@1> help me walk the dog."
        );
        assert_eq!(
            request_text("<@1>", "if you want your allowance, ", "wash the car"),
            "<@1> if you want your allowance,  wash the car."
        );
    }

    #[test]
    fn solutions() {
        let (_, mow) = TASKS[3];
        assert!(is_solution(mow, "🗡"));
        assert!(is_solution(mow, "⚔️"));
        assert!(!is_solution(mow, "🐶"));
    }

    #[test]
    fn every_task_can_be_done() {
        for (task, solutions) in TASKS {
            assert!(!solutions.is_empty(), "{}", task);
        }
    }
}
