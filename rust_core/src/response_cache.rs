//! On-disk cache of upstream API responses.
//!
//! This module provides:
//! - Keyed JSON entries per (season, round, session) and per season schedule
//! - Atomic replace-on-write so concurrent processes never read a torn entry
//! - Corrupt or unreadable entries treated as misses

use crate::models::{RoundNumber, Season, SessionKind};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Cache location and switch, injected by whoever builds the provider.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub dir: PathBuf,
    pub enabled: bool,
}

impl CacheConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            dir: PathBuf::new(),
            enabled: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Schedule {
        season: Season,
    },
    Session {
        season: Season,
        round: RoundNumber,
        kind: SessionKind,
    },
}

impl CacheKey {
    /// Path of this entry relative to the cache root.
    pub fn relative_path(&self) -> PathBuf {
        match self {
            CacheKey::Schedule { season } => Path::new(&season.to_string()).join("schedule.json"),
            CacheKey::Session {
                season,
                round,
                kind,
            } => Path::new(&season.to_string()).join(format!("{:02}_{}.json", round, kind)),
        }
    }
}

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
pub struct ResponseCache {
    root: Option<PathBuf>,
}

impl ResponseCache {
    /// Open (and create if needed) the cache directory.
    pub fn open(config: &CacheConfig) -> io::Result<Self> {
        if !config.enabled {
            return Ok(Self::disabled());
        }
        fs::create_dir_all(&config.dir)?;
        debug!("Response cache enabled at {}", config.dir.display());
        Ok(Self {
            root: Some(config.dir.clone()),
        })
    }

    pub fn disabled() -> Self {
        Self { root: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.root.is_some()
    }

    fn path_for(&self, key: &CacheKey) -> Option<PathBuf> {
        self.root.as_ref().map(|root| root.join(key.relative_path()))
    }

    pub fn load<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let path = self.path_for(key)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => {
                debug!("Cache hit: {}", path.display());
                Some(value)
            }
            Err(e) => {
                warn!("Ignoring corrupt cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Write an entry by renaming a fully written temp file over it.
    pub fn store<T: Serialize>(&self, key: &CacheKey, value: &T) -> io::Result<()> {
        let Some(path) = self.path_for(key) else {
            return Ok(());
        };
        let dir = path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "cache path has no parent"))?;
        fs::create_dir_all(dir)?;

        let content = serde_json::to_vec_pretty(value)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp = dir.join(format!(
            ".{}.{}.{}.tmp",
            file_name,
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        if let Err(e) = fs::write(&tmp, &content).and_then(|_| fs::rename(&tmp, &path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        debug!("Cached {}", path.display());
        Ok(())
    }
}
