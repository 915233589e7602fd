use super::{send_image, Joke, JokeMade};
use crate::{context::Context, log_joke};
use anyhow::Result;
use serenity::all::Message;

/// AlTeRnAtE tHe CaSe Of EvErY lEtTeR, sTaRtInG uPpEr
pub fn chicken_case(s: &str) -> String {
    let mut upper = true;
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_alphabetic() {
            if upper {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            upper = !upper;
        } else {
            out.push(c);
        }
    }
    out
}

pub struct SpongebobChicken;

#[serenity::async_trait]
impl Joke for SpongebobChicken {
    fn name(&self) -> &'static str {
        "spongebob_chicken"
    }

    fn default_chance(&self) -> f64 {
        1.0
    }

    async fn make_verbal_joke(&self, ctx: &Context, msg: &Message) -> Result<JokeMade> {
        if msg.content.is_empty() {
            return Ok(JokeMade::No);
        }
        log_joke!(ctx, msg.guild_id, msg.author.id, self.name(), "GoTeM");

        let mocked = chicken_case(&msg.content);
        send_image(ctx, msg.channel_id, None, Some(mocked.as_str()), "spongebob_chicken").await?;
        Ok(JokeMade::Verbal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chicken() {
        assert_eq!(chicken_case("spongebob chicken"), "SpOnGeBoB cHiCkEn");
        assert_eq!(chicken_case("I'M 100% SURE"), "I'm 100% SuRe");
        assert_eq!(chicken_case(""), "");
    }
}
