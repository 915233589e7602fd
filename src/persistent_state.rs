use crate::options::{GuildOption, OptionValue};
use anyhow::{anyhow, Result};
use serenity::all::{GuildId, UserId};
use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
};

/// State which persists across sessions
#[derive(Default, serde::Serialize, serde::Deserialize)]
pub struct PersistentState {
    #[serde(default)]
    pub guilds: HashMap<GuildId, GuildState>,
    #[serde(skip)]
    path: PathBuf,
}

/// Everything Dad remembers about one guild.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct GuildState {
    pub favorite_child: Option<UserId>,
    pub hated_child: Option<UserId>,
    /// Options an admin has changed from their defaults
    #[serde(default)]
    pub options: BTreeMap<String, OptionValue>,
    #[serde(default)]
    pub members: HashMap<UserId, MemberState>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MemberState {
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub cancel_counter: u64,
}

impl PersistentState {
    /// Load from `path`.  A missing file yields empty state.
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self {
                    guilds: HashMap::new(),
                    path: path.to_path_buf(),
                })
            }
            Err(e) => {
                return Err(anyhow!(
                    "Could not read state at `{}`: {}",
                    path.to_string_lossy(),
                    e
                ))
            }
        };

        let mut pstate: PersistentState = toml::from_str(&contents).map_err(|e| {
            anyhow!(
                "Could not parse state at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;
        pstate.path = path.to_path_buf();

        Ok(pstate)
    }

    pub async fn save(&self) -> Result<()> {
        let path = &self.path;
        let pstate_str = toml::to_string_pretty(&self)
            .map_err(|e| anyhow!("Could not serialize state: {}", e))?;

        write_atomically(path, pstate_str).await
    }

    pub fn guild(&self, guild_id: GuildId) -> Option<&GuildState> {
        self.guilds.get(&guild_id)
    }

    pub fn guild_mut(&mut self, guild_id: GuildId) -> &mut GuildState {
        self.guilds.entry(guild_id).or_default()
    }

    /// Current value of an option, falling back to its default.
    pub fn option(&self, guild_id: GuildId, option: &GuildOption) -> OptionValue {
        self.guild(guild_id)
            .map(|guild| guild.option(option))
            .unwrap_or(option.default)
    }
}

/// Write `contents` next to `path` and rename it into place, creating parent directories.
pub async fn write_atomically(path: &Path, contents: String) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            anyhow!(
                "Could not create directory `{}`: {}",
                parent.to_string_lossy(),
                e
            )
        })?;
    }

    // Create a temporary file in the same directory.
    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".new");
    let tmp_path = PathBuf::from(tmp_path);

    tokio::fs::write(&tmp_path, contents).await.map_err(|e| {
        anyhow!(
            "Could not write temporary file `{}`: {}",
            tmp_path.to_string_lossy(),
            e
        )
    })?;

    // Atomically rename the temporary file over the target file.
    tokio::fs::rename(&tmp_path, path).await.map_err(|e| {
        anyhow!(
            "Could not rename temporary file `{}` to `{}`: {}",
            tmp_path.to_string_lossy(),
            path.to_string_lossy(),
            e
        )
    })?;

    Ok(())
}

impl GuildState {
    pub fn option(&self, option: &GuildOption) -> OptionValue {
        self.options
            .get(&option.name)
            .copied()
            .unwrap_or(option.default)
    }

    pub fn set_option(&mut self, name: &str, value: OptionValue) {
        self.options.insert(name.to_owned(), value);
    }

    pub fn points(&self, user_id: UserId) -> i64 {
        self.members
            .get(&user_id)
            .map(|member| member.points)
            .unwrap_or(0)
    }

    /// Adjust a member's points and recompute the favorite and hated child among those who pass
    /// `is_member`.  Returns the points before and after.
    pub fn add_points(
        &mut self,
        user_id: UserId,
        delta: i64,
        is_member: impl Fn(UserId) -> bool,
    ) -> (i64, i64) {
        let member = self.members.entry(user_id).or_default();
        let old = member.points;
        member.points = old.saturating_add(delta);
        let new = member.points;
        self.recalculate_favoritism(is_member);
        (old, new)
    }

    pub fn reset_points(&mut self, user_id: UserId, is_member: impl Fn(UserId) -> bool) {
        if let Some(member) = self.members.get_mut(&user_id) {
            member.points = 0;
        }
        self.recalculate_favoritism(is_member);
    }

    pub fn increment_cancel_counter(&mut self, user_id: UserId) -> u64 {
        let member = self.members.entry(user_id).or_default();
        member.cancel_counter += 1;
        member.cancel_counter
    }

    /// Linear scan over the current members for the highest positive and lowest negative score.
    /// Ties go to the smaller user id so the result doesn't depend on hash order.
    pub fn recalculate_favoritism(&mut self, is_member: impl Fn(UserId) -> bool) {
        let mut favorite: Option<(UserId, i64)> = None;
        let mut hated: Option<(UserId, i64)> = None;

        let mut members: Vec<(&UserId, &MemberState)> = self
            .members
            .iter()
            .filter(|(user_id, _)| is_member(**user_id))
            .collect();
        members.sort_by_key(|(user_id, _)| **user_id);

        for (&user_id, member) in members {
            let points = member.points;
            if points > favorite.map_or(0, |(_, best)| best) {
                favorite = Some((user_id, points));
            }
            if points < hated.map_or(0, |(_, worst)| worst) {
                hated = Some((user_id, points));
            }
        }

        self.favorite_child = favorite.map(|(user_id, _)| user_id);
        self.hated_child = hated.map(|(user_id, _)| user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64) -> UserId {
        UserId::new(id)
    }

    fn everyone(_: UserId) -> bool {
        true
    }

    #[test]
    fn favorite_needs_positive_points() {
        let mut guild = GuildState::default();
        guild.add_points(user(1), 0, everyone);
        assert_eq!(guild.favorite_child, None);
        assert_eq!(guild.hated_child, None);

        guild.add_points(user(1), 3, everyone);
        guild.add_points(user(2), -3, everyone);
        assert_eq!(guild.favorite_child, Some(user(1)));
        assert_eq!(guild.hated_child, Some(user(2)));
    }

    #[test]
    fn favorite_follows_points() {
        let mut guild = GuildState::default();
        guild.add_points(user(1), 3, everyone);
        guild.add_points(user(2), 1, everyone);
        assert_eq!(guild.favorite_child, Some(user(1)));

        let (old, new) = guild.add_points(user(2), 3, everyone);
        assert_eq!((old, new), (1, 4));
        assert_eq!(guild.favorite_child, Some(user(2)));
    }

    #[test]
    fn ties_go_to_smaller_id() {
        let mut guild = GuildState::default();
        guild.add_points(user(20), 5, everyone);
        guild.add_points(user(10), 5, everyone);
        guild.add_points(user(30), -5, everyone);
        guild.add_points(user(15), -5, everyone);
        assert_eq!(guild.favorite_child, Some(user(10)));
        assert_eq!(guild.hated_child, Some(user(15)));
    }

    #[test]
    fn departed_members_lose_their_place() {
        let mut guild = GuildState::default();
        guild.add_points(user(1), 50, everyone);
        guild.add_points(user(2), -50, everyone);
        guild.add_points(user(3), 3, everyone);
        guild.add_points(user(4), -3, everyone);
        assert_eq!(guild.favorite_child, Some(user(1)));
        assert_eq!(guild.hated_child, Some(user(2)));

        let still_here = |user_id: UserId| user_id != user(1) && user_id != user(2);
        guild.add_points(user(3), 1, still_here);
        assert_eq!(guild.favorite_child, Some(user(3)));
        assert_eq!(guild.hated_child, Some(user(4)));
        assert_eq!(guild.points(user(1)), 50);

        guild.recalculate_favoritism(|_| false);
        assert_eq!(guild.favorite_child, None);
        assert_eq!(guild.hated_child, None);
    }

    #[test]
    fn reset_clears_favorite() {
        let mut guild = GuildState::default();
        guild.add_points(user(1), 3, everyone);
        guild.reset_points(user(1), everyone);
        assert_eq!(guild.points(user(1)), 0);
        assert_eq!(guild.favorite_child, None);
    }

    #[test]
    fn options_fall_back_to_default() {
        let option = GuildOption::percentage("her", 25.0);
        let mut pstate = PersistentState::default();
        let guild_id = GuildId::new(7);
        assert_eq!(pstate.option(guild_id, &option), OptionValue::Percentage(25.0));

        pstate
            .guild_mut(guild_id)
            .set_option("her", OptionValue::Percentage(50.0));
        assert_eq!(pstate.option(guild_id, &option), OptionValue::Percentage(50.0));
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.toml");

        let mut pstate = PersistentState::load(&path).await.unwrap();
        assert!(pstate.guilds.is_empty());

        let guild = pstate.guild_mut(GuildId::new(42));
        guild.add_points(user(1), 3, everyone);
        guild.increment_cancel_counter(user(2));
        guild.set_option("i_am_dad_change_nickname", OptionValue::Boolean(false));
        guild.set_option("chore", OptionValue::Percentage(0.5));
        pstate.save().await.unwrap();

        let loaded = PersistentState::load(&path).await.unwrap();
        let guild = loaded.guild(GuildId::new(42)).unwrap();
        assert_eq!(guild.points(user(1)), 3);
        assert_eq!(guild.favorite_child, Some(user(1)));
        assert_eq!(guild.members[&user(2)].cancel_counter, 1);
        assert_eq!(
            guild.options["i_am_dad_change_nickname"],
            OptionValue::Boolean(false)
        );
        assert_eq!(guild.options["chore"], OptionValue::Percentage(0.5));
    }

    #[tokio::test]
    async fn atomic_write_replaces_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");

        write_atomically(&path, "old".to_owned()).await.unwrap();
        write_atomically(&path, "new".to_owned()).await.unwrap();
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "new");
        assert!(!dir.path().join("state.toml.new").exists());
    }

    #[tokio::test]
    async fn atomic_write_names_the_bad_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        tokio::fs::write(&blocker, "").await.unwrap();

        let err = write_atomically(&blocker.join("state.toml"), String::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("blocker"));
    }
}
