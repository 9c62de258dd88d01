//! # tt-session-file
//!
//! JSON-file implementation of `SessionStore`.
//! The file is a flat object of string keys to string values. Writes go to a
//! sibling temp file first and are renamed into place, so another process
//! reading the file never sees half a write.

use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tokio::sync::watch;
use tt_core::traits::SessionStore;

type Values = BTreeMap<String, String>;

pub struct FileSessionStore {
    path: PathBuf,
    values: RwLock<Values>,
    /// Bumped after every observed change
    version: watch::Sender<u64>,
}

impl FileSessionStore {
    /// Opens the store at `path`. A missing file is an empty session.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let values = read_values(&path)?;
        log::info!("Session store at {} ({} keys)", path.display(), values.len());
        Ok(Self {
            path,
            values: RwLock::new(values),
            version: watch::channel(0).0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` on top of the file's current contents. Memory is
    /// only updated once the new map is on disk.
    fn write_with<F>(&self, change: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut Values),
    {
        {
            let mut values = self
                .values
                .write()
                .map_err(|_| anyhow::anyhow!("session lock poisoned"))?;
            let mut next = read_values(&self.path)?;
            change(&mut next);
            persist(&self.path, &next)?;
            *values = next;
        }
        self.version.send_modify(|v| *v += 1);
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.write_with(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, keys: &[&'static str]) -> anyhow::Result<()> {
        self.write_with(|values| {
            for key in keys {
                values.remove(*key);
            }
        })
    }

    fn reload(&self) -> anyhow::Result<()> {
        let fresh = read_values(&self.path)?;
        let changed = {
            let mut values = self
                .values
                .write()
                .map_err(|_| anyhow::anyhow!("session lock poisoned"))?;
            if *values == fresh {
                false
            } else {
                *values = fresh;
                true
            }
        };
        if changed {
            log::debug!("Session file {} changed externally", self.path.display());
            self.version.send_modify(|v| *v += 1);
        }
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }
}

fn read_values(path: &Path) -> anyhow::Result<Values> {
    match fs::read_to_string(path) {
        Ok(raw) if raw.trim().is_empty() => Ok(Values::new()),
        Ok(raw) => serde_json::from_str(&raw)
            .with_context(|| format!("parsing session file {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Values::new()),
        Err(e) => Err(e).with_context(|| format!("reading session file {}", path.display())),
    }
}

fn persist(path: &Path, values: &Values) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(values)?)
        .with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}
