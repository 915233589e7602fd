use crate::{event::*, joke, log_internal, plugin::*};
use anyhow::Result;
use rand::seq::SliceRandom;
use serenity::all::ActivityData;

/// Things dads do
const DAD_ACTIVITIES: &[&str] = &[
    "Balance the check book 🏦",
    "Go to work 🏢",
    "Grill some steaks 🥩",
    "Mow the lawn 🌿",
    "Rake the leaves 🍁",
    "Sleep in chair 😴",
    "Sort the ties 👔",
    "Spray for weeds 🌿",
    "Trim the hedges 🪚",
    "Walk the dog 🐕",
    "Wash the car 🚗",
    "Wear socks with sandals 🧦",
    "Watch the History Channel 📺",
];

/// Sets what Dad is up to when connected, and now and then as people talk.
pub struct Presence;

impl Presence {
    fn change(ctx: &Context<'_>) {
        let Some(activity) = DAD_ACTIVITIES.choose(&mut rand::thread_rng()) else {
            return;
        };
        ctx.cache_http
            .set_activity(Some(ActivityData::playing(*activity)));
        log_internal!("Presence changed to \"{}\"", activity);
    }
}

#[serenity::async_trait]
impl Plugin for Presence {
    fn name(&self) -> &'static str {
        "presence"
    }

    async fn usage(&self, _ctx: &Context) -> Option<String> {
        None
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        match event {
            Event::Ready(_) => Self::change(ctx),
            Event::Message(_) => {
                let chance = ctx.cfg.read().await.dad.presence_change_chance;
                if joke::should_attempt(chance, joke::roll()) {
                    Self::change(ctx);
                }
            }
            Event::ReactionAdd(_) => {}
        }

        Ok(EventHandled::No)
    }
}
