use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::ValueEnum;
use hl_core::{Error, Result};
use rand::Rng;

/// How the next API key is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Rotation {
    #[default]
    RoundRobin,
    Random,
}

/// The configured NewsAPI keys. Shared by every request.
pub struct KeyRing {
    keys: Vec<String>,
    rotation: Rotation,
    cursor: AtomicUsize,
}

impl KeyRing {
    pub fn new<I, S>(keys: I, rotation: Rotation) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: Vec<String> = keys
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if keys.is_empty() {
            return Err(Error::Config("at least one NewsAPI key is required".to_string()));
        }
        Ok(Self {
            keys,
            rotation,
            cursor: AtomicUsize::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn next_key(&self) -> &str {
        let index = match self.rotation {
            Rotation::RoundRobin => self.cursor.fetch_add(1, Ordering::Relaxed) % self.keys.len(),
            Rotation::Random => rand::thread_rng().gen_range(0..self.keys.len()),
        };
        &self.keys[index]
    }
}

impl fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRing")
            .field("keys", &format!("<{} redacted>", self.keys.len()))
            .field("rotation", &self.rotation)
            .finish()
    }
}
