use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

const CONFIG_PATH_REL_HOME: &str = ".config/dadbot/config.toml";

/// Bot configuration
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Config {
    pub general: General,
    #[serde(default)]
    pub dad: Dad,
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct General {
    pub discord_token: String,
    pub bot_owners: Vec<String>,
    pub command_prefix: String,
    /// Global usernames Dad never jokes with, e.g. moderators.
    #[serde(default)]
    pub immune_users: Vec<String>,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Dad {
    /// Percent chance per message of switching to a new presence.
    pub presence_change_chance: f64,
    /// How long Dad stays quiet when an admin tells him to shut up.
    pub shut_up_minutes: u64,
    /// State file, relative to the home directory unless absolute.
    pub state_path: PathBuf,
    /// Image catalog, relative to the home directory unless absolute.
    pub images_path: PathBuf,
}

impl Default for Dad {
    fn default() -> Self {
        Self {
            presence_change_chance: 1.0,
            shut_up_minutes: 5,
            state_path: PathBuf::from(".config/dadbot/state.toml"),
            images_path: PathBuf::from(".config/dadbot/images.json"),
        }
    }
}

impl Config {
    fn config_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|p| p.join(CONFIG_PATH_REL_HOME))
            .ok_or(anyhow!("Could not find home directory"))
    }

    pub async fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        let mut file = tokio::fs::File::open(path).await.map_err(|e| {
            anyhow!(
                "Could not open configuration at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).await.map_err(|e| {
            anyhow!(
                "Could not read configuration at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow!(
                "Could not parse configuration at `{}`: {}",
                path.to_string_lossy(),
                e
            )
        })?;

        Ok(config)
    }

    pub async fn reload(&mut self) -> Result<()> {
        let new = Self::load().await?;
        *self = new;
        Ok(())
    }
}

impl Dad {
    pub fn state_path(&self) -> Result<PathBuf> {
        resolve_home(&self.state_path)
    }

    pub fn images_path(&self) -> Result<PathBuf> {
        resolve_home(&self.images_path)
    }
}

fn resolve_home(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    dirs::home_dir()
        .map(|p| p.join(path))
        .ok_or(anyhow!("Could not find home directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dad_section_is_optional() {
        let cfg: Config = toml::from_str(
            r#"
            [general]
            discord_token = "token"
            bot_owners = ["owner"]
            command_prefix = ";"
            "#,
        )
        .unwrap();

        assert!(cfg.general.immune_users.is_empty());
        assert_eq!(cfg.dad.shut_up_minutes, 5);
        assert_eq!(cfg.dad.presence_change_chance, 1.0);
    }

    #[test]
    fn absolute_paths_are_kept() {
        let dad = Dad {
            state_path: PathBuf::from("/var/lib/dadbot/state.toml"),
            ..Dad::default()
        };
        assert_eq!(
            dad.state_path().unwrap(),
            PathBuf::from("/var/lib/dadbot/state.toml")
        );
    }

    #[tokio::test]
    async fn load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "not = [valid").await.unwrap();

        let err = Config::load_from(&path).await.err().unwrap();
        assert!(err.to_string().contains("Could not parse configuration"));
    }
}
