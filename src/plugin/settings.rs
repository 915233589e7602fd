//! `dad` admin commands for tuning Dad in a guild.

use crate::{
    event::*,
    helper::{Members, UserIdHelper},
    joke::{find_option, guild_options},
    log_internal,
    logging::AsyncPrintColor,
    options::{parse_positive_int, OptionError, OptionType, OptionValue},
    plugin::*,
    volatile_state::shut_up_duration,
};
use anyhow::Result;
use serenity::all::{CreateEmbed, CreateMessage, GuildId, Mentionable, Message, UserId};
use serenity::utils::parse_user_mention;

const NOT_ADMIN: &str = "No son, I am the boss";

#[derive(Debug, PartialEq)]
enum DadCommand<'a> {
    List,
    Set { name: &'a str, value: &'a str },
    Toggle { name: &'a str },
    ShutUp { minutes: &'a str },
    Points { member: Option<UserId> },
    Reset { member: UserId },
    Image { url: &'a str, categories: Vec<&'a str> },
}

/// None if the arguments don't form a command
fn parse<'a>(args: &[&'a str]) -> Option<DadCommand<'a>> {
    let (sub, rest) = args.split_first()?;
    let cmd = match (*sub, rest) {
        ("list", &[]) => DadCommand::List,
        ("set", &[name, value]) => DadCommand::Set { name, value },
        ("toggle", &[name]) => DadCommand::Toggle { name },
        ("shutup", &[minutes]) => DadCommand::ShutUp { minutes },
        ("points", &[]) => DadCommand::Points { member: None },
        ("points", &[member]) => DadCommand::Points {
            member: Some(parse_user_mention(member)?),
        },
        ("reset", &[member]) => DadCommand::Reset {
            member: parse_user_mention(member)?,
        },
        ("image", &[url, ref categories @ ..]) if !categories.is_empty() => DadCommand::Image {
            url,
            categories: categories.to_vec(),
        },
        _ => return None,
    };
    Some(cmd)
}

fn child_text(child: Option<UserId>) -> String {
    match child {
        Some(user_id) => user_id.mention().to_string(),
        None => "nobody".to_owned(),
    }
}

pub struct Settings;

impl Settings {
    async fn list(ctx: &Context<'_>, msg: &Message, guild_id: GuildId) -> Result<()> {
        let description = {
            let pstate = ctx.pstate.read().await;
            guild_options()
                .iter()
                .filter(|option| option.kind != OptionType::Hidden)
                .map(|option| format!("{}: {}", option.name, pstate.option(guild_id, option)))
                .collect::<Vec<_>>()
                .join("\n")
        };

        let embed = CreateEmbed::new()
            .title("Guild Options")
            .description(description);
        msg.channel_id
            .send_message(ctx.cache_http, CreateMessage::new().embed(embed))
            .await?;
        Ok(())
    }

    async fn set(
        ctx: &Context<'_>,
        guild_id: GuildId,
        name: &str,
        value: &str,
    ) -> Result<Result<OptionValue, OptionError>> {
        let Some(option) = find_option(name) else {
            return Ok(Err(OptionError::Unknown(name.to_owned())));
        };
        let value = match option.parse(value) {
            Ok(value) => value,
            Err(err) => return Ok(Err(err)),
        };

        let mut pstate = ctx.pstate.write().await;
        pstate.guild_mut(guild_id).set_option(&option.name, value);
        pstate.save().await?;
        Ok(Ok(value))
    }

    async fn toggle(
        ctx: &Context<'_>,
        guild_id: GuildId,
        name: &str,
    ) -> Result<Result<OptionValue, OptionError>> {
        let Some(option) = find_option(name) else {
            return Ok(Err(OptionError::Unknown(name.to_owned())));
        };
        if option.kind != OptionType::Boolean {
            return Ok(Err(OptionError::NotToggleable(name.to_owned())));
        }

        let mut pstate = ctx.pstate.write().await;
        let value = OptionValue::Boolean(!pstate.option(guild_id, option).as_bool());
        pstate.guild_mut(guild_id).set_option(&option.name, value);
        pstate.save().await?;
        Ok(Ok(value))
    }

    async fn points(ctx: &Context<'_>, guild_id: GuildId, member: UserId) -> String {
        let pstate = ctx.pstate.read().await;
        let (points, favorite, hated) = match pstate.guild(guild_id) {
            Some(guild) => (guild.points(member), guild.favorite_child, guild.hated_child),
            None => (0, None, None),
        };
        format!(
            "{} has {} points.\nFavorite child: {}\nHated child: {}",
            member.mention(),
            points,
            child_text(favorite),
            child_text(hated)
        )
    }

    async fn reset(ctx: &Context<'_>, guild_id: GuildId, member: UserId) -> Result<()> {
        let members = Members::of(ctx, guild_id);
        let mut pstate = ctx.pstate.write().await;
        pstate
            .guild_mut(guild_id)
            .reset_points(member, |id| members.contains(id));
        pstate.save().await
    }
}

#[serenity::async_trait]
impl Plugin for Settings {
    fn name(&self) -> &'static str {
        "dad"
    }

    fn is_command(&self) -> bool {
        true
    }

    async fn usage(&self, ctx: &Context) -> Option<String> {
        let prefix = &ctx.cfg.read().await.general.command_prefix;
        let name = self.name();
        Some(
            [
                format!("{prefix}{name} list - show guild options"),
                format!("{prefix}{name} set <option> <value> - change an option (admin)"),
                format!("{prefix}{name} toggle <option> - flip a true/false option (admin)"),
                format!("{prefix}{name} shutup <minutes> - make Dad be quiet (admin)"),
                format!("{prefix}{name} points [@member] - show favoritism points"),
                format!("{prefix}{name} reset <@member> - reset a member's points (admin)"),
                format!("{prefix}{name} image <url> <category>... - add an image (bot owner only)"),
            ]
            .join("\n"),
        )
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Some((msg, args)) = event.is_bot_cmd(ctx, self.name()).await else {
            return Ok(EventHandled::No);
        };
        let Some(guild_id) = msg.guild_id else {
            return Ok(EventHandled::Yes);
        };

        let Some(cmd) = parse(&args) else {
            let prefix = ctx.cfg.read().await.general.command_prefix.clone();
            msg.reply(
                ctx.cache_http,
                format!("I don't know that one, son. Try `{}help`", prefix),
            )
            .await?;
            return Ok(EventHandled::Yes);
        };

        let needs_admin = !matches!(
            cmd,
            DadCommand::List | DadCommand::Points { .. } | DadCommand::Image { .. }
        );
        if needs_admin && !msg.author.id.is_admin_in(ctx, guild_id).await {
            msg.reply(ctx.cache_http, NOT_ADMIN).await?;
            return Ok(EventHandled::Yes);
        }

        let response = match cmd {
            DadCommand::List => {
                Self::list(ctx, msg, guild_id).await?;
                return Ok(EventHandled::Yes);
            }
            DadCommand::Set { name, value } => match Self::set(ctx, guild_id, name, value).await? {
                Ok(value) => {
                    log_internal!(
                        "{} set to {} in {}",
                        name,
                        value,
                        guild_id.color(ctx.http).await
                    );
                    format!("`{}` set to {}", name, value)
                }
                Err(err) => err.to_string(),
            },
            DadCommand::Toggle { name } => match Self::toggle(ctx, guild_id, name).await? {
                Ok(value) => format!("`{}` set to {}", name, value),
                Err(err) => err.to_string(),
            },
            DadCommand::ShutUp { minutes } => match parse_positive_int(minutes) {
                Ok(minutes) => {
                    let duration = shut_up_duration(minutes as u64);
                    let minutes = duration.as_secs() / 60;
                    ctx.vstate.write().await.shut_up.shut_up(guild_id, duration);
                    let embed = CreateEmbed::new()
                        .title("Okay Boomer")
                        .description(format!("Dad will be quiet for {} minutes", minutes));
                    msg.channel_id
                        .send_message(ctx.cache_http, CreateMessage::new().embed(embed))
                        .await?;
                    return Ok(EventHandled::Yes);
                }
                Err(err) => err.to_string(),
            },
            DadCommand::Points { member } => {
                Self::points(ctx, guild_id, member.unwrap_or(msg.author.id)).await
            }
            DadCommand::Reset { member } => {
                Self::reset(ctx, guild_id, member).await?;
                format!("{} is back to 0 points", member.mention())
            }
            DadCommand::Image { url, categories } => {
                if !msg.author.id.is_owner(ctx).await {
                    NOT_ADMIN.to_owned()
                } else {
                    let mut images = ctx.images.write().await;
                    images.add_url(url, &categories);
                    images.save().await?;
                    format!("Added to {}", categories.join(", "))
                }
            }
        };

        msg.reply(ctx.cache_http, response).await?;
        Ok(EventHandled::Yes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subcommands() {
        assert_eq!(parse(&["list"]), Some(DadCommand::List));
        assert_eq!(
            parse(&["set", "her", "50%"]),
            Some(DadCommand::Set {
                name: "her",
                value: "50%"
            })
        );
        assert_eq!(
            parse(&["toggle", "i_am_dad_change_nickname"]),
            Some(DadCommand::Toggle {
                name: "i_am_dad_change_nickname"
            })
        );
        assert_eq!(
            parse(&["shutup", "10"]),
            Some(DadCommand::ShutUp { minutes: "10" })
        );
    }

    #[test]
    fn member_arguments() {
        assert_eq!(
            parse(&["points"]),
            Some(DadCommand::Points { member: None })
        );
        assert_eq!(
            parse(&["points", "<@5>"]),
            Some(DadCommand::Points {
                member: Some(UserId::new(5))
            })
        );
        assert_eq!(
            parse(&["reset", "<@!7>"]),
            Some(DadCommand::Reset {
                member: UserId::new(7)
            })
        );
        assert_eq!(parse(&["reset", "bob"]), None);
        assert_eq!(parse(&["reset"]), None);
    }

    #[test]
    fn images_need_a_category() {
        assert_eq!(
            parse(&["image", "https://example.com/a.gif", "bonk", "society"]),
            Some(DadCommand::Image {
                url: "https://example.com/a.gif",
                categories: vec!["bonk", "society"]
            })
        );
        assert_eq!(parse(&["image", "https://example.com/a.gif"]), None);
    }

    #[test]
    fn unknown_subcommands() {
        assert_eq!(parse(&[]), None);
        assert_eq!(parse(&["dance"]), None);
        assert_eq!(parse(&["set", "her"]), None);
    }

    #[test]
    fn children() {
        assert_eq!(child_text(None), "nobody");
        assert_eq!(child_text(Some(UserId::new(3))), "<@3>");
    }
}
