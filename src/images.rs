//! Catalog of image URLs Dad replies with, grouped by category.

use crate::persistent_state::write_atomically;
use anyhow::{anyhow, Result};
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Image {
    pub url: String,
    pub categories: Vec<String>,
}

#[derive(Default)]
pub struct ImageCatalog {
    images: Vec<Image>,
    path: PathBuf,
}

impl ImageCatalog {
    /// Load from `path`.  A missing file yields an empty catalog.
    pub async fn load(path: &Path) -> Result<Self> {
        let images = match tokio::fs::read(path).await {
            Ok(data) => serde_json::from_slice(&data).map_err(|e| {
                anyhow!(
                    "Could not parse image catalog at `{}`: {}",
                    path.to_string_lossy(),
                    e
                )
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(anyhow!(
                    "Could not read image catalog at `{}`: {}",
                    path.to_string_lossy(),
                    e
                ))
            }
        };

        Ok(Self {
            images,
            path: path.to_path_buf(),
        })
    }

    pub async fn save(&self) -> Result<()> {
        let serialized = serde_json::to_string_pretty(&self.images)
            .map_err(|e| anyhow!("Could not serialize image catalog: {}", e))?;
        write_atomically(&self.path, serialized).await
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn urls_in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a str> {
        self.images
            .iter()
            .filter(move |img| img.categories.iter().any(|c| c == category))
            .map(|img| img.url.as_str())
    }

    pub fn random_url(&self, category: &str) -> Option<String> {
        let urls: Vec<&str> = self.urls_in_category(category).collect();
        urls.choose(&mut rand::thread_rng())
            .map(|url| (*url).to_owned())
    }

    /// Add an image, or merge categories into an existing entry with the same URL.
    pub fn add_url(&mut self, url: &str, categories: &[&str]) {
        match self.images.iter_mut().find(|img| img.url == url) {
            Some(img) => {
                for category in categories {
                    if !img.categories.iter().any(|c| c == category) {
                        img.categories.push((*category).to_owned());
                    }
                }
            }
            None => {
                let mut new_categories: Vec<String> = Vec::new();
                for category in categories {
                    if !new_categories.iter().any(|c| c == category) {
                        new_categories.push((*category).to_owned());
                    }
                }
                self.images.push(Image {
                    url: url.to_owned(),
                    categories: new_categories,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_merges_categories() {
        let mut catalog = ImageCatalog::default();
        catalog.add_url("https://example.com/salute.gif", &["salute"]);
        catalog.add_url("https://example.com/salute.gif", &["salute", "senpai"]);
        catalog.add_url("https://example.com/bonk.gif", &["bonk", "bonk"]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.images[0].categories,
            vec!["salute".to_owned(), "senpai".to_owned()]
        );
        assert_eq!(catalog.images[1].categories, vec!["bonk".to_owned()]);
    }

    #[test]
    fn random_url_stays_in_category() {
        let mut catalog = ImageCatalog::default();
        catalog.add_url("a", &["salute"]);
        catalog.add_url("b", &["bonk"]);
        catalog.add_url("c", &["salute"]);

        for _ in 0..20 {
            let url = catalog.random_url("salute").unwrap();
            assert!(url == "a" || url == "c");
        }
        assert_eq!(catalog.random_url("stickbug"), None);
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("images.json");

        let mut catalog = ImageCatalog::load(&path).await.unwrap();
        assert_eq!(catalog.len(), 0);
        catalog.add_url("https://example.com/society.png", &["society"]);
        catalog.save().await.unwrap();

        let loaded = ImageCatalog::load(&path).await.unwrap();
        assert_eq!(
            loaded.urls_in_category("society").collect::<Vec<_>>(),
            vec!["https://example.com/society.png"]
        );

        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(leftovers, vec!["images.json"]);
    }
}
