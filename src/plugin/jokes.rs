use crate::{
    event::*,
    joke::{self, Joke, JokeMade},
    log_error,
    plugin::*,
};
use anyhow::Result;
use rand::seq::SliceRandom;
use std::future::Future;

/// Offers the event to every joke in a random order until one of them says something.
pub struct Jokes;

impl Jokes {
    fn shuffled() -> Vec<&'static dyn Joke> {
        let mut order: Vec<&dyn Joke> = joke::jokes().iter().map(|joke| joke.as_ref()).collect();
        order.shuffle(&mut rand::thread_rng());
        order
    }

    /// Take each joke's turn in order, stopping after the first verbal one.  Non-verbal jokes
    /// leave room for more.
    async fn dispatch<F>(turns: impl IntoIterator<Item = F>) -> EventHandled
    where
        F: Future<Output = JokeMade>,
    {
        for turn in turns {
            if turn.await == JokeMade::Verbal {
                return EventHandled::Yes;
            }
        }
        EventHandled::No
    }

    fn made(joke: &dyn Joke, made: Result<JokeMade>) -> JokeMade {
        made.unwrap_or_else(|err| {
            log_error!("Error in joke {}: {}", joke.name(), err);
            JokeMade::No
        })
    }
}

#[serenity::async_trait]
impl Plugin for Jokes {
    fn name(&self) -> &'static str {
        "jokes"
    }

    async fn usage(&self, _ctx: &Context) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some(guild_id) = event.guild_id() else {
            return Ok(EventHandled::No);
        };

        match event {
            Event::Ready(_) => Ok(EventHandled::No),
            Event::Message(msg) => {
                let prefix = ctx.cfg.read().await.general.command_prefix.clone();
                if looks_like_bot_cmd(&msg.content, &prefix, &command_names()) {
                    return Ok(EventHandled::No);
                }

                let turns = Self::shuffled().into_iter().map(|joke| async move {
                    if !joke::gate(ctx, guild_id, joke).await {
                        return JokeMade::No;
                    }
                    Self::made(joke, joke.make_verbal_joke(ctx, msg).await)
                }).collect::<Vec<_>>();
                Ok(Self::dispatch(turns).await)
            }
            Event::ReactionAdd(reaction) => {
                // Roll first so most reactions never cost a fetch
                let mut passed: Vec<&dyn Joke> = Vec::new();
                for joke in Self::shuffled() {
                    if joke.handles_reactions() && joke::gate(ctx, guild_id, joke).await {
                        passed.push(joke);
                    }
                }
                if passed.is_empty() {
                    return Ok(EventHandled::No);
                }

                let msg = reaction.message(ctx.cache_http).await?;
                let msg = &msg;
                let turns = passed.into_iter().map(|joke| async move {
                    Self::made(joke, joke.make_reaction_joke(ctx, reaction, msg).await)
                }).collect::<Vec<_>>();
                Ok(Self::dispatch(turns).await)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Dispatch over fixed outcomes, returning the result and how many turns were taken.
    async fn run(outcomes: &[JokeMade]) -> (EventHandled, usize) {
        let taken = Cell::new(0);
        let turns = outcomes.iter().map(|&made| {
            let taken = &taken;
            async move {
                taken.set(taken.get() + 1);
                made
            }
        });
        let handled = Jokes::dispatch(turns).await;
        (handled, taken.get())
    }

    #[tokio::test]
    async fn first_verbal_joke_ends_the_turn() {
        let outcomes = [
            JokeMade::No,
            JokeMade::NonVerbal,
            JokeMade::Verbal,
            JokeMade::Verbal,
        ];
        assert_eq!(run(&outcomes).await, (EventHandled::Yes, 3));
        assert_eq!(run(&[JokeMade::Verbal]).await, (EventHandled::Yes, 1));
    }

    #[tokio::test]
    async fn non_verbal_jokes_keep_going() {
        let outcomes = [JokeMade::NonVerbal, JokeMade::No, JokeMade::NonVerbal];
        assert_eq!(run(&outcomes).await, (EventHandled::No, 3));
        assert_eq!(run(&[]).await, (EventHandled::No, 0));
    }

    #[test]
    fn only_favoritism_needs_reacted_messages() {
        let names: Vec<&str> = joke::jokes()
            .iter()
            .filter(|joke| joke.handles_reactions())
            .map(|joke| joke.name())
            .collect();
        assert_eq!(names, ["favoritism"]);
    }
}
