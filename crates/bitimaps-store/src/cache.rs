//! Offline response cache.
//!
//! The browser build of this product runs a service worker with two named
//! cache partitions: the static application shell (cache-first) and the API
//! responses (network-first, fall back to cache when offline). This module is
//! the same layer as an on-disk store: entries are files keyed by the
//! sha256-hex of the request URL, partition directories carry a single
//! version tag, and activation sweeps every partition that does not match the
//! current tag.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use bitimaps_model::{Result, StoreError};

/// Current cache version tag; bump to invalidate everything on activation.
pub const CACHE_VERSION: &str = "v1";

/// The two named cache partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Static application shell assets.
    AppShell,
    /// API responses, populated opportunistically per successful response.
    Api,
}

impl Partition {
    fn name(self) -> &'static str {
        match self {
            Self::AppShell => "app",
            Self::Api => "api",
        }
    }
}

/// Cache strategy applied per request class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Try the network; on success store and return, on network failure serve
    /// the cached entry, and fail with `Offline` when both miss.
    NetworkFirst,
    /// Serve the cached entry when present, otherwise fetch and store.
    CacheFirst,
}

/// A versioned two-partition response cache rooted at a directory.
#[derive(Debug)]
pub struct OfflineCache {
    root: PathBuf,
    version: String,
}

impl OfflineCache {
    /// Open (creating if needed) a cache rooted at `root` with the given
    /// version tag.
    pub fn open(root: impl Into<PathBuf>, version: &str) -> Result<Self> {
        let cache = Self {
            root: root.into(),
            version: version.to_string(),
        };
        fs::create_dir_all(cache.partition_dir(Partition::AppShell))?;
        fs::create_dir_all(cache.partition_dir(Partition::Api))?;
        Ok(cache)
    }

    /// Open at `root` with [`CACHE_VERSION`].
    pub fn open_current(root: impl Into<PathBuf>) -> Result<Self> {
        Self::open(root, CACHE_VERSION)
    }

    fn partition_dir(&self, partition: Partition) -> PathBuf {
        self.root
            .join(format!("bitimaps-{}-{}", partition.name(), self.version))
    }

    fn entry_path(&self, partition: Partition, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.partition_dir(partition).join(hex::encode(digest))
    }

    /// Store a response body for a key.
    pub fn put(&self, partition: Partition, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.entry_path(partition, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        debug!(key, partition = partition.name(), "cached response");
        Ok(())
    }

    /// Fetch the stored body for a key, if any.
    pub fn lookup(&self, partition: Partition, key: &str) -> Option<Vec<u8>> {
        fs::read(self.entry_path(partition, key)).ok()
    }

    /// Seed the application shell partition with its fixed asset list.
    pub fn precache(&self, entries: &[(&str, &[u8])]) -> Result<()> {
        for (key, bytes) in entries {
            self.put(Partition::AppShell, key, bytes)?;
        }
        info!(count = entries.len(), "app shell cached");
        Ok(())
    }

    /// Delete every partition directory whose version tag differs from the
    /// current one.
    pub fn activate(&self) -> Result<()> {
        let keep = [
            self.partition_dir(Partition::AppShell),
            self.partition_dir(Partition::Api),
        ];
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.starts_with("bitimaps-") {
                continue;
            }
            if keep.iter().any(|kept| kept == &path) {
                continue;
            }
            info!(cache = %name, "deleting old cache");
            fs::remove_dir_all(&path)?;
        }
        Ok(())
    }

    /// Run a request through the cache with the given strategy.
    pub fn fetch<F>(
        &self,
        partition: Partition,
        strategy: Strategy,
        key: &str,
        fetch: F,
    ) -> Result<Vec<u8>>
    where
        F: FnOnce() -> Result<Vec<u8>>,
    {
        match strategy {
            Strategy::CacheFirst => {
                if let Some(bytes) = self.lookup(partition, key) {
                    return Ok(bytes);
                }
                let bytes = fetch()?;
                if let Err(error) = self.put(partition, key, &bytes) {
                    warn!(key, %error, "failed to cache response");
                }
                Ok(bytes)
            }
            Strategy::NetworkFirst => match fetch() {
                Ok(bytes) => {
                    if let Err(error) = self.put(partition, key, &bytes) {
                        warn!(key, %error, "failed to cache response");
                    }
                    Ok(bytes)
                }
                Err(StoreError::Network(reason)) => match self.lookup(partition, key) {
                    Some(bytes) => {
                        debug!(key, reason, "network failed, serving cached response");
                        Ok(bytes)
                    }
                    None => Err(StoreError::Offline),
                },
                Err(error) => Err(error),
            },
        }
    }

    /// Cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
