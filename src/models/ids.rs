//! Identifier types
//!
//! `SessionId` is a locally generated UUID. `ItemKey` is an opaque key
//! assigned by the list store when an entry is pushed; the local file store
//! mints keys in the same shape as Firebase push ids so the two backends are
//! interchangeable.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifies one user session (the scope of a `SessionMirror`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Short form used in prompts and listings
    pub fn short(&self) -> String {
        format!("ses-{}", &self.0.to_string()[..8])
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

/// Alphabet of Firebase push ids, in ASCII order so keys sort chronologically
const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// Store-generated key of one item inside a folder
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    /// Wrap a key handed out by the store
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Mint a 20-character push key: 8 chars of millisecond timestamp
    /// followed by 12 random chars
    pub fn generate() -> Self {
        let mut key = String::with_capacity(20);

        let mut millis = Utc::now().timestamp_millis().max(0) as u64;
        let mut time_chars = [0u8; 8];
        for slot in time_chars.iter_mut().rev() {
            *slot = PUSH_CHARS[(millis % 64) as usize];
            millis /= 64;
        }
        key.extend(time_chars.iter().map(|&c| c as char));

        let random = Uuid::new_v4();
        key.extend(
            random.as_bytes()[..12]
                .iter()
                .map(|b| PUSH_CHARS[(b % 64) as usize] as char),
        );

        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}
