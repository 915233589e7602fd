mod config;
mod context;
mod event;
mod handler;
mod helper;
mod images;
mod joke;
mod logging;
mod options;
mod persistent_state;
mod plugin;
mod volatile_state;

use serenity::{all::GatewayIntents, Client};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let cfg = crate::config::Config::load().await?;
    let token = cfg.general.discord_token.clone();
    let pstate = crate::persistent_state::PersistentState::load(&cfg.dad.state_path()?).await?;
    let images = crate::images::ImageCatalog::load(&cfg.dad.images_path()?).await?;
    log_internal!(
        "Loaded {} guild(s) and {} image(s)",
        pstate.guilds.len(),
        images.len()
    );
    let vstate = crate::volatile_state::VolatileState::new().await;
    let handler = handler::Handler::new(cfg, pstate, vstate, images);

    // Things we want discord to tell us about.
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::GUILD_EMOJIS_AND_STICKERS
        | GatewayIntents::MESSAGE_CONTENT;

    Client::builder(&token, intents)
        .event_handler(handler)
        .await?
        .start()
        .await
        .map_err(Into::into)
}
