//! Logging to the terminal with colors
//!
//! Lines go through `tracing`, so `RUST_LOG` decides what is shown.

use serenity::all::Http;
use std::borrow::Cow;
use std::io::IsTerminal;
use std::sync::{Arc, LazyLock};

const DEFAULT: &str = "\x1b[0m";
const FG_BLUE: &str = "\x1b[38;5;33m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GRAY: &str = "\x1b[90m";
const FG_GREEN: &str = "\x1b[32m";
const FG_MAGENTA: &str = "\x1b[35m";
const FG_RED: &str = "\x1b[31m";
const FG_YELLOW: &str = "\x1b[33m";

pub enum Color {
    Default,
    Event,
    Internal,
    Error,
    Joke,
    User,
    Channel,
    Guild,
    Glue,
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        // Only print colors when printing to a terminal
        //
        // This won't change during the program's execution, so we can cache it.
        static STDOUT_IS_TERMINAL: LazyLock<bool> =
            LazyLock::new(|| std::io::stdout().is_terminal());

        if !*STDOUT_IS_TERMINAL {
            return Ok(());
        }

        write!(
            f,
            "{}",
            match self {
                Color::Default => DEFAULT,
                Color::Event => FG_YELLOW,
                Color::Internal => FG_MAGENTA,
                Color::Error => FG_RED,
                Color::Joke => FG_YELLOW,
                Color::User => FG_GREEN,
                Color::Channel => FG_CYAN,
                Color::Guild => FG_BLUE,
                Color::Glue => FG_GRAY,
            }
        )
    }
}

/// Set up the `tracing` subscriber the logging macros write to.
pub fn init() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

#[macro_export]
macro_rules! log_event {
    // Case: Only format string, no arguments
    ($fmtstr:expr) => {{
        let line = format!(
            concat!("{}*{} ", $fmtstr),
            $crate::logging::Color::Event,
            $crate::logging::Color::Default
        );
        tracing::info!("{}", line)
    }};

    // Case: Format string with arguments, with optional trailing comma
    ($fmtstr:expr, $($args:expr),* $(,)?) => {{
        let line = format!(
            concat!("{}*{} ", $fmtstr),
            $crate::logging::Color::Event,
            $crate::logging::Color::Default,
            $($args),*
        );
        tracing::info!("{}", line)
    }};
}

#[macro_export]
macro_rules! log_internal {
    // Case: Only format string, no arguments
    ($fmtstr:expr) => {{
        let line = format!(
            concat!("{}+{} ", $fmtstr),
            $crate::logging::Color::Internal,
            $crate::logging::Color::Default
        );
        tracing::info!("{}", line)
    }};

    // Case: Format string with arguments, with optional trailing comma
    ($fmtstr:expr, $($args:expr),* $(,)?) => {{
        let line = format!(
            concat!("{}+{} ", $fmtstr),
            $crate::logging::Color::Internal,
            $crate::logging::Color::Default,
            $($args),*
        );
        tracing::info!("{}", line)
    }};
}

#[macro_export]
macro_rules! log_error {
    // Case: Only format string, no arguments
    ($fmtstr:expr) => {{
        let line = format!(
            concat!("{}!{} ", $fmtstr),
            $crate::logging::Color::Error,
            $crate::logging::Color::Default
        );
        tracing::error!("{}", line)
    }};

    // Case: Format string with arguments, with optional trailing comma
    ($fmtstr:expr, $($args:expr),* $(,)?) => {{
        let line = format!(
            concat!("{}!{} ", $fmtstr),
            $crate::logging::Color::Error,
            $crate::logging::Color::Default,
            $($args),*
        );
        tracing::error!("{}", line)
    }};
}

/// A joke was made.  Logged as `guild:user joke detail`.
#[macro_export]
macro_rules! log_joke {
    ($ctx:expr, $guild_id:expr, $user:expr, $joke:expr, $detail:expr $(,)?) => {{
        use $crate::logging::{AsyncPrintColor, PrintColor};
        let line = format!(
            "{}~{} {}{}{} {}{}{} {}",
            $crate::logging::Color::Joke,
            $crate::logging::Color::Default,
            $guild_id.color($ctx.http).await,
            $crate::logging::Glue.color(),
            $user.color($ctx.http).await,
            $crate::logging::Color::Joke,
            $joke,
            $crate::logging::Color::Default,
            $detail,
        );
        tracing::info!("{}", line)
    }};
}

pub trait PrintColor {
    fn color(&self) -> String;
}

#[serenity::async_trait]
pub trait AsyncPrintColor {
    async fn color(&self, http: &Arc<Http>) -> String;
}

// Field separator
pub struct Glue;
impl PrintColor for Glue {
    fn color(&self) -> String {
        format!("{}{}{}", Color::Glue, ":", Color::Default)
    }
}

impl PrintColor for serenity::all::CurrentUser {
    fn color(&self) -> String {
        format!("{}{}{}", Color::User, self.name.as_str(), Color::Default)
    }
}

impl PrintColor for serenity::all::User {
    fn color(&self) -> String {
        format!("{}{}{}", Color::User, self.name.as_str(), Color::Default)
    }
}

#[serenity::async_trait]
impl AsyncPrintColor for serenity::all::UserId {
    async fn color(&self, http: &Arc<Http>) -> String {
        let name = match self.to_user(http).await {
            Ok(user) => Cow::Owned(user.name),
            Err(_) => Cow::Borrowed("<unknown-user>"),
        };

        format!("{}{}{}", Color::User, name, Color::Default)
    }
}

#[serenity::async_trait]
impl AsyncPrintColor for Option<serenity::all::UserId> {
    async fn color(&self, http: &Arc<Http>) -> String {
        match self {
            Some(user_id) => user_id.color(http).await,
            None => format!("{}{}{}", Color::User, "<unknown-user>", Color::Default),
        }
    }
}

#[serenity::async_trait]
impl AsyncPrintColor for serenity::all::ChannelId {
    async fn color(&self, http: &Arc<Http>) -> String {
        match self.name(http).await {
            Ok(name) => format!("{}{}{}", Color::Channel, name, Color::Default),
            Err(_) => format!(
                "{}{}{}",
                Color::Channel,
                "<unknown-channel>",
                Color::Default
            ),
        }
    }
}

#[serenity::async_trait]
impl AsyncPrintColor for serenity::all::GuildId {
    async fn color(&self, http: &Arc<Http>) -> String {
        Some(*self).color(http).await
    }
}

#[serenity::async_trait]
impl AsyncPrintColor for Option<serenity::all::GuildId> {
    async fn color(&self, http: &Arc<Http>) -> String {
        let name = match self {
            Some(guild_id) => match guild_id.to_partial_guild(http).await {
                Ok(guild) => Cow::Owned(guild.name),
                Err(_) => Cow::Borrowed("<unknown-guild>"),
            },
            None => Cow::Borrowed("<direct-message>"),
        };

        format!("{}{}{}", Color::Guild, name, Color::Default)
    }
}
