//! Miscellaneous convenience methods

use crate::context::Context;
use serenity::all::{GuildId, ReactionType, UserId};
use std::collections::HashSet;

/// Words that count as talking about Dad
const DAD_VARIANTS: [&str; 4] = ["dad", "father", "daddy", "papa"];

/// Ways of telling Dad to be quiet
const SHUT_UP_VARIANTS: [&str; 3] = ["shut up", "be quiet", "not now"];

pub fn mentions_dad_variant(content: &str) -> bool {
    let content = content.to_lowercase();
    DAD_VARIANTS.iter().any(|variant| content.contains(variant))
}

pub fn contains_shut_up(content: &str) -> bool {
    let content = content.to_lowercase();
    SHUT_UP_VARIANTS.iter().any(|variant| content.contains(variant))
}

/// The text of a unicode emoji, or the name of a custom one.
pub fn emoji_name(emoji: &ReactionType) -> Option<String> {
    match emoji {
        ReactionType::Custom { name, .. } => name.clone(),
        ReactionType::Unicode(s) => Some(s.clone()),
        _ => None,
    }
}

/// Compare emoji ignoring the variation selector, which clients add or drop at will.
pub fn emoji_eq(a: &str, b: &str) -> bool {
    let strip = |s: &str| s.trim().replace('\u{FE0F}', "");
    strip(a) == strip(b)
}

/// The people in a guild right now, bots excluded.  Unknown when the guild isn't cached, in
/// which case everyone counts.
pub struct Members(Option<HashSet<UserId>>);

impl Members {
    pub fn of(ctx: &Context, guild_id: GuildId) -> Self {
        Self(ctx.cache.guild(guild_id).map(|guild| {
            guild
                .members
                .values()
                .filter(|member| !member.user.bot)
                .map(|member| member.user.id)
                .collect()
        }))
    }

    pub fn contains(&self, user_id: UserId) -> bool {
        self.0.as_ref().map_or(true, |members| members.contains(&user_id))
    }
}

#[serenity::async_trait]
pub trait UserIdHelper {
    async fn is_admin_in(&self, ctx: &Context, guild_id: GuildId) -> bool;
    async fn is_owner(&self, ctx: &Context) -> bool;
}

#[serenity::async_trait]
impl UserIdHelper for UserId {
    /// Bot owners, the guild owner, and members with the Administrator permission.
    async fn is_admin_in(&self, ctx: &Context, guild_id: GuildId) -> bool {
        if self.is_owner(ctx).await {
            return true;
        }

        // Cache guard must not live across an await
        let cached = ctx.cache.guild(guild_id).map(|guild| {
            guild.owner_id == *self
                || guild
                    .members
                    .get(self)
                    .is_some_and(|member| guild.member_permissions(member).administrator())
        });

        match cached {
            Some(is_admin) => is_admin,
            None => match guild_id.to_partial_guild(ctx.cache_http).await {
                Ok(guild) => guild.owner_id == *self,
                Err(_) => false,
            },
        }
    }

    async fn is_owner(&self, ctx: &Context) -> bool {
        let user = match self.to_user(ctx.cache_http).await {
            Ok(user) => user,
            Err(_) => return false,
        };
        let owners = &ctx.cfg.read().await.general.bot_owners;
        owners.contains(&user.name)
    }
}

#[serenity::async_trait]
pub trait MessageHelper {
    async fn mentions_dad(&self, ctx: &Context) -> bool;
    async fn is_from_immune(&self, ctx: &Context) -> bool;
}

#[serenity::async_trait]
impl MessageHelper for serenity::all::Message {
    /// Dad is @-mentioned, or called by one of his names.
    async fn mentions_dad(&self, ctx: &Context) -> bool {
        let my_id = ctx.cache.current_user().id;
        self.mentions_user_id(my_id) || mentions_dad_variant(&self.content)
    }

    async fn is_from_immune(&self, ctx: &Context) -> bool {
        let immune = &ctx.cfg.read().await.general.immune_users;
        immune.contains(&self.author.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dad_variants() {
        assert!(mentions_dad_variant("Thanks DAD"));
        assert!(mentions_dad_variant("my grandfather"));
        assert!(!mentions_dad_variant("hello mom"));
    }

    #[test]
    fn shut_up_variants() {
        assert!(contains_shut_up("@Dad SHUT UP"));
        assert!(contains_shut_up("dad, not now please"));
        assert!(!contains_shut_up("shut the door"));
    }

    #[test]
    fn uncached_guilds_count_everyone() {
        let unknown = Members(None);
        assert!(unknown.contains(UserId::new(1)));

        let known = Members(Some(HashSet::from([UserId::new(1)])));
        assert!(known.contains(UserId::new(1)));
        assert!(!known.contains(UserId::new(2)));
    }

    #[test]
    fn emoji_comparison() {
        assert!(emoji_eq("❤️", "❤"));
        assert!(emoji_eq("☺️ ", "☺️"));
        assert!(!emoji_eq("👍", "👎"));
    }

    #[test]
    fn names_of_emoji() {
        assert_eq!(
            emoji_name(&ReactionType::Unicode("👍".to_owned())),
            Some("👍".to_owned())
        );
    }
}
