use serenity::all::GuildId;
use std::{collections::HashMap, time::Duration};
use tokio::time::Instant;

/// State which is lost across sessions
pub struct VolatileState {
    pub shut_up: ShutUp,
}

/// Longest time out Dad will agree to, a year.
pub const MAX_SHUT_UP_MINUTES: u64 = 60 * 24 * 365;

/// Minutes of quiet as a duration, capped at [`MAX_SHUT_UP_MINUTES`].
pub fn shut_up_duration(minutes: u64) -> Duration {
    Duration::from_secs(minutes.min(MAX_SHUT_UP_MINUTES) * 60)
}

/// Guilds in which Dad has been told to be quiet, and until when.
pub struct ShutUp(HashMap<GuildId, Instant>);

impl VolatileState {
    pub async fn new() -> Self {
        Self {
            shut_up: ShutUp::new(),
        }
    }
}

impl ShutUp {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn shut_up(&mut self, guild_id: GuildId, duration: Duration) {
        self.shut_up_at(guild_id, duration, Instant::now());
    }

    /// Whether Dad is still in time out.  Expired entries are forgotten.
    pub fn is_shut_up(&mut self, guild_id: GuildId) -> bool {
        self.is_shut_up_at(guild_id, Instant::now())
    }

    fn shut_up_at(&mut self, guild_id: GuildId, duration: Duration, now: Instant) {
        self.0.insert(guild_id, now + duration);
    }

    fn is_shut_up_at(&mut self, guild_id: GuildId, now: Instant) -> bool {
        match self.0.get(&guild_id) {
            Some(until) if now < *until => true,
            Some(_) => {
                self.0.remove(&guild_id);
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shut_up_expires() {
        let guild_id = GuildId::new(1);
        let other = GuildId::new(2);
        let start = Instant::now();
        let mut shut_up = ShutUp::new();

        shut_up.shut_up_at(guild_id, Duration::from_secs(300), start);
        assert!(shut_up.is_shut_up_at(guild_id, start));
        assert!(shut_up.is_shut_up_at(guild_id, start + Duration::from_secs(299)));
        assert!(!shut_up.is_shut_up_at(other, start));

        assert!(!shut_up.is_shut_up_at(guild_id, start + Duration::from_secs(300)));
        assert!(shut_up.0.is_empty());
    }

    #[test]
    fn huge_time_outs_are_capped() {
        assert_eq!(shut_up_duration(5), Duration::from_secs(300));
        assert_eq!(
            shut_up_duration(i64::MAX as u64),
            Duration::from_secs(MAX_SHUT_UP_MINUTES * 60)
        );
        assert_eq!(
            shut_up_duration(u64::MAX),
            shut_up_duration(MAX_SHUT_UP_MINUTES)
        );

        let guild_id = GuildId::new(1);
        let start = Instant::now();
        let mut shut_up = ShutUp::new();
        shut_up.shut_up_at(guild_id, shut_up_duration(u64::MAX), start);
        assert!(shut_up.is_shut_up_at(guild_id, start + Duration::from_secs(3600)));
    }
}
