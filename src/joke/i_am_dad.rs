use super::{option_value, say, skip_chars, truncate_chars, Joke, JokeMade};
use crate::{
    context::Context, log_internal, log_joke, logging::AsyncPrintColor, options::GuildOption,
};
use anyhow::Result;
use regex::{Regex, RegexBuilder};
use serenity::all::{EditMember, Mentionable, Message};
use std::sync::LazyLock;

pub const CHANGE_NICKNAME: &str = "i_am_dad_change_nickname";

/// Discord's nickname length limit
const NICKNAME_MAX_CHARS: usize = 32;
/// Leaves room for the rest of the reply under Discord's 2000 character limit
const NAME_MAX_CHARS: usize = 1975;

/// Things that look enough like an "I"
const I_VARIANTS: &str = "ℹ\u{FE0F}ⁱîỉᶧĨꟷḭꞮᶤÌ𐌉İᵢIⲓǏł1ꞼȉlịḯꞽĪıᵻ\u{2009}ǐіɨ\u{301}\u{303}ĬȋḮĩįɪÎᶦ𐤉ìỈІ𐌹¡ꟾÍᴉ|ïí\u{300}ȊᵎⲒιȈᴵΙḬỊiᛁÏĭīΐϊίΓाjƗ";
/// Things that look enough like an "m"
const M_VARIANTS: &str = "ꟽℳ₥𐌼Ɯ𐤌mΜṃɯᶭṁⲘṂⱮⲙḾᵯₘMɱꟺḿꬺ™Мᵚᴹмɰᵐᴟᶆᴍ𐌌ᛗμᶬṀꟿ\u{303}℠ल♏\u{FE0F}";

fn char_class(chars: &str) -> String {
    let escaped: String = chars
        .chars()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect();
    format!("[{}]", escaped)
}

static IAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?P<iam>\b{}\W*[ae]*{}\b)\s*(?P<name>.*)",
        char_class(I_VARIANTS),
        char_class(M_VARIANTS)
    );
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .unwrap()
});

static CHANGE_NICKNAME_OPTION: LazyLock<GuildOption> =
    LazyLock::new(|| GuildOption::boolean(CHANGE_NICKNAME, true));

/// The "I'm" as written, and what follows it.
pub fn find_iam(content: &str) -> Option<(&str, &str)> {
    let caps = IAM_RE.captures(content)?;
    Some((caps.name("iam")?.as_str(), caps.name("name")?.as_str()))
}

pub fn response(name: &str, iam: &str) -> String {
    let name = if name.chars().count() > NAME_MAX_CHARS {
        format!("{}...", truncate_chars(name, NAME_MAX_CHARS))
    } else {
        name.to_owned()
    };
    format!("Hello \"{}\", {} Dad!", name, iam)
}

pub struct IAmDad;

impl IAmDad {
    /// Rename the author.  Without permission the name is returned untouched, otherwise it
    /// becomes their mention plus whatever didn't fit in a nickname.
    async fn update_sons_nickname(ctx: &Context<'_>, msg: &Message, nickname: &str) -> String {
        let Some(guild_id) = msg.guild_id else {
            return nickname.to_owned();
        };

        let builder = EditMember::new()
            .nickname(truncate_chars(nickname, NICKNAME_MAX_CHARS))
            .audit_log_reason("I'm Dad");
        match guild_id
            .edit_member(ctx.cache_http, msg.author.id, builder)
            .await
        {
            Ok(_) => format!(
                "{}{}",
                msg.author.mention(),
                skip_chars(nickname, NICKNAME_MAX_CHARS)
            ),
            Err(err) => {
                log_internal!(
                    "Couldn't rename {}: {}",
                    msg.author.id.color(ctx.http).await,
                    err
                );
                nickname.to_owned()
            }
        }
    }
}

#[serenity::async_trait]
impl Joke for IAmDad {
    fn name(&self) -> &'static str {
        "i_am_dad"
    }

    fn default_chance(&self) -> f64 {
        5.0
    }

    fn options(&self) -> Vec<GuildOption> {
        vec![CHANGE_NICKNAME_OPTION.clone()]
    }

    async fn make_verbal_joke(&self, ctx: &Context, msg: &Message) -> Result<JokeMade> {
        let Some((iam, their_name)) = find_iam(&msg.content) else {
            return Ok(JokeMade::No);
        };
        log_joke!(ctx, msg.guild_id, msg.author.id, self.name(), their_name);

        let change_nickname = match msg.guild_id {
            Some(guild_id) => option_value(ctx, guild_id, &CHANGE_NICKNAME_OPTION)
                .await
                .as_bool(),
            None => false,
        };
        let their_name = if change_nickname {
            Self::update_sons_nickname(ctx, msg, their_name).await
        } else {
            their_name.to_owned()
        };

        say(ctx, msg.channel_id, response(&their_name, iam)).await?;
        Ok(JokeMade::Verbal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn im_variants() {
        assert_eq!(find_iam("I'm hungry"), Some(("I'm", "hungry")));
        assert_eq!(find_iam("i am so tired"), Some(("i am", "so tired")));
        assert_eq!(find_iam("well Im done"), Some(("Im", "done")));
        assert_eq!(find_iam("ɪ'ᴍ fine"), Some(("ɪ'ᴍ", "fine")));
    }

    #[test]
    fn not_im() {
        assert_eq!(find_iam("Imagine that"), None);
        assert_eq!(find_iam("him and her"), None);
        assert_eq!(find_iam("nothing here"), None);
    }

    #[test]
    fn hello_im_dad() {
        let (iam, name) = find_iam("I'm hungry").unwrap();
        assert_eq!(response(name, iam), "Hello \"hungry\", I'm Dad!");
    }

    #[test]
    fn long_names_are_cut() {
        let name = "a".repeat(3000);
        let reply = response(&name, "I'm");
        assert!(reply.len() < 2000);
        assert!(reply.contains("aaa...\""));
    }
}
