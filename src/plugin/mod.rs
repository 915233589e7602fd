pub use crate::context::Context;
use crate::event::{Event, EventHandled};
use anyhow::Result;

mod acknowledge;
mod cancel;
mod debug;
mod help;
mod ignore;
mod jokes;
mod presence;
mod reload;
mod settings;
mod shut_up;

#[serenity::async_trait]
pub trait Plugin: Sync + Send {
    /// Plugin name.  Used for debug, and as the command name for command plugins
    fn name(&self) -> &'static str;
    /// Whether `name` is a prefixed command
    fn is_command(&self) -> bool {
        false
    }
    /// Help message line.  None if no help message
    async fn usage(&self, ctx: &Context) -> Option<String>;
    /// Potentially handle event.  Returns:
    /// - Ok(EventHandled::Yes) if the event has been handled and no other plugin should attempt to
    ///   handle it
    /// - Ok(EventHandled::No) if another plugin should attempt to handle the event
    /// - Err if an error occurred
    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled>;
}

/// Ordered list of available plugins
pub fn plugins() -> Vec<Box<dyn Plugin>> {
    vec![
        // Core bot operations
        Box::new(debug::Debug),
        Box::new(ignore::Ignore),
        Box::new(presence::Presence),
        // Commands
        Box::new(help::Help),
        Box::new(reload::Reload),
        Box::new(settings::Settings),
        Box::new(cancel::Cancel),
        // Dad himself
        Box::new(shut_up::ShutUp),
        Box::new(acknowledge::Acknowledge),
        // Keep last
        Box::new(jokes::Jokes),
    ]
}

/// Names of the prefixed commands
pub fn command_names() -> Vec<&'static str> {
    plugins()
        .iter()
        .filter(|plugin| plugin.is_command())
        .map(|plugin| plugin.name())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_registered() {
        let mut names = command_names();
        names.sort_unstable();
        assert_eq!(names, ["cancel", "dad", "help", "reload"]);
    }
}
