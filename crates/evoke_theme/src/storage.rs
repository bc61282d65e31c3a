//! Persisted theme preference storage
//!
//! Preferences are stored as a small JSON envelope:
//!
//! ```json
//! {"theme":"dark","timestamp":1718000000000,"systemPreference":"light"}
//! ```
//!
//! Nothing here fails loudly. An unavailable or misbehaving store degrades to
//! "no stored preference" and a warning.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use evoke_platform::{Clock, Environment, KeyValueStore, SystemClock};
use serde::{Deserialize, Serialize};

use crate::theme::ColorScheme;

/// Default age after which a preference counts as stale
pub const DEFAULT_STALE_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Default age after which the startup sweep deletes a preference
pub const DEFAULT_CLEANUP_AGE: Duration = Duration::from_secs(90 * 24 * 60 * 60);

const PROBE_KEY: &str = "__evoke_storage_probe__";

/// The persisted envelope
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredThemePreference {
    pub theme: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_preference: Option<ColorScheme>,
}

impl StoredThemePreference {
    fn decode(raw: &str) -> Option<Self> {
        let stored: Self = serde_json::from_str(raw).ok()?;
        if stored.theme.trim().is_empty() {
            return None;
        }
        Some(stored)
    }

    /// Age relative to `now_ms`; future timestamps count as fresh
    pub fn age(&self, now_ms: u64) -> Duration {
        Duration::from_millis(now_ms.saturating_sub(self.timestamp))
    }
}

/// Theme preference storage over an optional key-value store
#[derive(Clone)]
pub struct ThemeStorage {
    store: Option<Rc<dyn KeyValueStore>>,
    clock: Rc<dyn Clock>,
}

impl fmt::Debug for ThemeStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStorage")
            .field("store", &self.store.is_some())
            .finish()
    }
}

impl ThemeStorage {
    pub fn new(store: Option<Rc<dyn KeyValueStore>>, clock: Rc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Storage with no backing store; every read is empty
    pub fn disabled() -> Self {
        Self::new(None, Rc::new(SystemClock))
    }

    pub fn from_env(env: &Environment) -> Self {
        Self::new(env.store.clone(), env.clock.clone())
    }

    /// Whether a throwaway write and delete succeed
    pub fn is_available(&self) -> bool {
        let Some(store) = &self.store else {
            return false;
        };
        match store
            .set_item(PROBE_KEY, PROBE_KEY)
            .and_then(|()| store.remove_item(PROBE_KEY))
        {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!("theme storage unavailable: {}", err);
                false
            }
        }
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        let store = self.store.as_ref()?;
        match store.get_item(key) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!("failed to read theme preference `{}`: {}", key, err);
                None
            }
        }
    }

    fn remove_raw(&self, key: &str) -> bool {
        let Some(store) = &self.store else {
            return false;
        };
        match store.remove_item(key) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("failed to remove theme preference `{}`: {}", key, err);
                false
            }
        }
    }

    fn write(&self, key: &str, stored: &StoredThemePreference) -> bool {
        let Some(store) = &self.store else {
            return false;
        };
        let raw = match serde_json::to_string(stored) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!("failed to encode theme preference: {}", err);
                return false;
            }
        };
        match store.set_item(key, &raw) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("failed to store theme preference `{}`: {}", key, err);
                false
            }
        }
    }

    /// Read a stored preference
    ///
    /// Entries that are not a valid envelope are deleted.
    pub fn get(&self, key: &str) -> Option<StoredThemePreference> {
        let raw = self.read_raw(key)?;
        match StoredThemePreference::decode(&raw) {
            Some(stored) => Some(stored),
            None => {
                tracing::debug!("discarding invalid theme preference `{}`", key);
                self.remove_raw(key);
                None
            }
        }
    }

    /// Store a preference stamped with the current time
    pub fn set(&self, theme: &str, key: &str, system_preference: Option<ColorScheme>) -> bool {
        let stored = StoredThemePreference {
            theme: theme.to_string(),
            timestamp: self.clock.now_ms(),
            system_preference,
        };
        self.write(key, &stored)
    }

    pub fn clear(&self, key: &str) -> bool {
        self.remove_raw(key)
    }

    /// Age of a stored preference, `None` when there is none
    pub fn age(&self, key: &str) -> Option<Duration> {
        self.get(key)
            .map(|stored| stored.age(self.clock.now_ms()))
    }

    /// Whether a preference is older than `max_age`; a missing one is stale
    pub fn is_stale(&self, key: &str, max_age: Duration) -> bool {
        self.age(key).map_or(true, |age| age > max_age)
    }

    /// Rewrap a bare theme string into an envelope
    ///
    /// Legacy entries are either raw text (`dark`) or a JSON string literal
    /// (`"dark"`). Returns whether a migration happened.
    pub fn migrate_legacy(&self, key: &str) -> bool {
        let Some(raw) = self.read_raw(key) else {
            return false;
        };

        let theme = match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::String(theme)) => theme,
            // Envelopes and other JSON are left to `get`
            Ok(_) => return false,
            Err(_) => raw,
        };
        let theme = theme.trim();
        if theme.is_empty() || theme.contains(&['{', '}', '"'][..]) {
            return false;
        }

        let migrated = self.set(theme, key, None);
        if migrated {
            tracing::debug!("migrated legacy theme preference `{}` -> `{}`", key, theme);
        }
        migrated
    }

    /// Delete preferences under `key_prefix` older than `max_age`
    ///
    /// Returns the number of entries removed. Entries that are not envelopes
    /// are left alone.
    pub fn cleanup_stale(&self, max_age: Duration, key_prefix: &str) -> usize {
        let Some(store) = &self.store else {
            return 0;
        };
        let keys = match store.keys() {
            Ok(keys) => keys,
            Err(err) => {
                tracing::warn!("failed to list stored keys: {}", err);
                return 0;
            }
        };

        let now = self.clock.now_ms();
        let mut removed = 0;
        for key in keys.iter().filter(|key| key.starts_with(key_prefix)) {
            let Some(stored) = self
                .read_raw(key)
                .and_then(|raw| StoredThemePreference::decode(&raw))
            else {
                continue;
            };
            if stored.age(now) > max_age && self.remove_raw(key) {
                tracing::debug!("removed stale theme preference `{}`", key);
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evoke_platform::{ManualClock, MemoryStore};
    use pretty_assertions::assert_eq;

    const KEY: &str = "evoke-ui-theme";
    const NOW: u64 = 1_700_000_000_000;
    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn storage() -> (ThemeStorage, Rc<MemoryStore>, Rc<ManualClock>) {
        let store = Rc::new(MemoryStore::new());
        let clock = Rc::new(ManualClock::new(NOW));
        let storage = ThemeStorage::new(Some(store.clone()), clock.clone());
        (storage, store, clock)
    }

    #[test]
    fn set_then_get_round_trips() {
        let (storage, store, _) = storage();
        assert!(storage.set("dark", KEY, Some(ColorScheme::Light)));

        assert_eq!(
            storage.get(KEY),
            Some(StoredThemePreference {
                theme: "dark".to_string(),
                timestamp: NOW,
                system_preference: Some(ColorScheme::Light),
            })
        );
        assert_eq!(
            store.raw(KEY).unwrap(),
            r#"{"theme":"dark","timestamp":1700000000000,"systemPreference":"light"}"#
        );
    }

    #[test]
    fn invalid_entries_are_deleted_on_read() {
        let (storage, store, _) = storage();
        store.set_item(KEY, r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(storage.get(KEY), None);
        assert_eq!(store.raw(KEY), None);

        store.set_item(KEY, r#"{"theme":"","timestamp":1}"#).unwrap();
        assert_eq!(storage.get(KEY), None);
        assert_eq!(store.raw(KEY), None);
    }

    #[test]
    fn bare_strings_migrate_to_envelopes() {
        let (storage, store, _) = storage();

        store.set_item(KEY, "dark").unwrap();
        assert!(storage.migrate_legacy(KEY));
        let stored = storage.get(KEY).unwrap();
        assert_eq!(stored.theme, "dark");
        assert_eq!(stored.timestamp, NOW);

        store.set_item(KEY, r#""light""#).unwrap();
        assert!(storage.migrate_legacy(KEY));
        assert_eq!(storage.get(KEY).unwrap().theme, "light");

        // Already an envelope
        assert!(!storage.migrate_legacy(KEY));
        assert!(!storage.migrate_legacy("missing"));
    }

    #[test]
    fn staleness_uses_max_age() {
        let (storage, _, clock) = storage();
        assert!(storage.is_stale(KEY, DEFAULT_STALE_AGE));

        storage.set("dark", KEY, None);
        clock.advance(Duration::from_secs(60 * 60));
        assert!(!storage.is_stale(KEY, DEFAULT_STALE_AGE));
        assert_eq!(storage.age(KEY), Some(Duration::from_secs(60 * 60)));

        clock.set(NOW + 31 * DAY.as_millis() as u64);
        assert!(storage.is_stale(KEY, DEFAULT_STALE_AGE));
    }

    #[test]
    fn cleanup_removes_only_old_prefixed_envelopes() {
        let (storage, store, clock) = storage();
        storage.set("dark", "evoke-ui-theme", None);
        storage.set("dark", "evoke-ui-theme-admin", None);
        storage.set("dark", "unrelated", None);
        store.set_item("evoke-ui-theme-legacy", "dark").unwrap();

        clock.advance(91 * DAY);
        storage.set("light", "evoke-ui-theme-admin", None);

        assert_eq!(storage.cleanup_stale(DEFAULT_CLEANUP_AGE, "evoke-ui-theme"), 1);
        assert_eq!(store.raw("evoke-ui-theme"), None);
        assert!(store.raw("evoke-ui-theme-admin").is_some());
        assert!(store.raw("evoke-ui-theme-legacy").is_some());
        assert!(store.raw("unrelated").is_some());
    }

    #[test]
    fn unavailable_store_degrades_quietly() {
        let (storage, store, _) = storage();
        assert!(storage.is_available());

        store.set_denied(true);
        assert!(!storage.is_available());
        assert!(!storage.set("dark", KEY, None));
        assert_eq!(storage.get(KEY), None);
        assert!(!storage.clear(KEY));
        assert_eq!(storage.cleanup_stale(DEFAULT_CLEANUP_AGE, ""), 0);

        let disabled = ThemeStorage::disabled();
        assert!(!disabled.is_available());
        assert_eq!(disabled.get(KEY), None);
        assert!(!disabled.migrate_legacy(KEY));
    }

    #[test]
    fn quota_failures_report_false() {
        let store = Rc::new(MemoryStore::new().with_quota(8));
        let storage = ThemeStorage::new(Some(store), Rc::new(ManualClock::new(NOW)));
        assert!(!storage.set("dark", KEY, None));
    }
}
