//! Browser storage state.
//!
//! A signed-in session is captured once (cookies plus per-origin
//! `localStorage`) and replayed into every fresh browser context. The file
//! layout matches Playwright's `auth.json`, so a state saved by either tool
//! can be loaded by the other.

use crate::result::{ProbeError, ProbeResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cookies and local storage captured from a browser context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageState {
    /// Cookies
    #[serde(default)]
    pub cookies: Vec<Cookie>,
    /// Local storage, one entry per origin
    #[serde(default)]
    pub origins: Vec<OriginState>,
}

impl StorageState {
    /// Create empty storage state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cookie
    #[must_use]
    pub fn with_cookie(mut self, cookie: Cookie) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Add a local storage item
    #[must_use]
    pub fn with_local_storage(mut self, origin: &str, key: &str, value: &str) -> Self {
        self.set_local_storage(origin, key, value);
        self
    }

    /// Insert or replace a local storage item
    pub fn set_local_storage(&mut self, origin: &str, key: &str, value: &str) {
        let entry = match self.origins.iter_mut().position(|o| o.origin == origin) {
            Some(idx) => &mut self.origins[idx],
            None => {
                self.origins.push(OriginState {
                    origin: origin.to_string(),
                    local_storage: Vec::new(),
                });
                let last = self.origins.len() - 1;
                &mut self.origins[last]
            }
        };
        match entry.local_storage.iter_mut().find(|item| item.name == key) {
            Some(item) => item.value = value.to_string(),
            None => entry.local_storage.push(NameValue {
                name: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Local storage items for `origin`
    #[must_use]
    pub fn local_storage(&self, origin: &str) -> &[NameValue] {
        self.origins
            .iter()
            .find(|o| o.origin == origin)
            .map_or(&[], |o| o.local_storage.as_slice())
    }

    /// Check if storage is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty() && self.origins.iter().all(|o| o.local_storage.is_empty())
    }

    /// Clear all storage
    pub fn clear(&mut self) {
        self.cookies.clear();
        self.origins.clear();
    }

    /// Write the state as pretty JSON, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written
    pub fn save(&self, path: &Path) -> ProbeResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::debug!(path = %path.display(), cookies = self.cookies.len(), "storage state saved");
        Ok(())
    }

    /// Read a state written by [`StorageState::save`] or by Playwright
    ///
    /// # Errors
    ///
    /// Returns error if the file is missing or malformed
    pub fn load(path: &Path) -> ProbeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ProbeError::StorageState {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        serde_json::from_str(&content).map_err(|e| ProbeError::StorageState {
            message: format!("malformed {}: {e}", path.display()),
        })
    }
}

/// Local storage of one origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginState {
    /// Origin, e.g. `https://app.example.com`
    pub origin: String,
    /// Items
    #[serde(default)]
    pub local_storage: Vec<NameValue>,
}

/// `sessionStorage` key recording that an origin was already seeded
pub const SEEDED_MARKER: &str = "__vsh_storage_seeded";

impl OriginState {
    /// Script that writes this origin's items into `localStorage`.
    ///
    /// Meant to run on every new document. Only the first document of the
    /// origin in a tab writes the items; later loads see [`SEEDED_MARKER`]
    /// in `sessionStorage` and leave whatever the app stored since alone.
    ///
    /// # Errors
    ///
    /// Returns error if the items cannot be encoded as JSON
    pub fn seed_script(&self) -> ProbeResult<String> {
        let origin = serde_json::to_string(&self.origin)?;
        let items: Vec<(&str, &str)> = self
            .local_storage
            .iter()
            .map(|NameValue { name, value }| (name.as_str(), value.as_str()))
            .collect();
        let items = serde_json::to_string(&items)?;
        let marker = serde_json::to_string(SEEDED_MARKER)?;
        Ok(format!(
            "(() => {{ \
             if (location.origin !== {origin}) return; \
             if (sessionStorage.getItem({marker}) !== null) return; \
             for (const [k, v] of {items}) localStorage.setItem(k, v); \
             sessionStorage.setItem({marker}, \"1\"); \
             }})();"
        ))
    }
}

/// A local storage item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValue {
    /// Key
    pub name: String,
    /// Value
    pub value: String,
}

/// A browser cookie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Domain
    pub domain: String,
    /// Path
    #[serde(default = "default_path")]
    pub path: String,
    /// Expiration (seconds since epoch, `-1` for session cookies)
    #[serde(default = "session_expiry")]
    pub expires: f64,
    /// HTTP only flag
    #[serde(default)]
    pub http_only: bool,
    /// Secure flag
    #[serde(default)]
    pub secure: bool,
    /// Same site setting
    #[serde(default)]
    pub same_site: SameSite,
}

fn default_path() -> String {
    "/".to_string()
}

const fn session_expiry() -> f64 {
    -1.0
}

impl Cookie {
    /// Create a new session cookie
    #[must_use]
    pub fn new(name: &str, value: &str, domain: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            domain: domain.to_string(),
            path: default_path(),
            expires: session_expiry(),
            http_only: false,
            secure: false,
            same_site: SameSite::Lax,
        }
    }

    /// Set path
    #[must_use]
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Set expiration
    #[must_use]
    pub const fn with_expires(mut self, expires: f64) -> Self {
        self.expires = expires;
        self
    }

    /// Set HTTP only
    #[must_use]
    pub const fn http_only(mut self) -> Self {
        self.http_only = true;
        self
    }

    /// Set secure
    #[must_use]
    pub const fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    /// Set same site
    #[must_use]
    pub const fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// Whether the cookie lives only as long as the browser session
    #[must_use]
    pub fn is_session(&self) -> bool {
        self.expires < 0.0
    }
}

/// Same site cookie setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SameSite {
    /// Strict same site
    Strict,
    /// Lax same site
    #[default]
    Lax,
    /// No same site restriction
    None,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod storage_state_tests {
        use super::*;

        #[test]
        fn test_new_is_empty() {
            assert!(StorageState::new().is_empty());
        }

        #[test]
        fn test_local_storage_upsert() {
            let mut state = StorageState::new().with_local_storage("https://a", "token", "1");
            state.set_local_storage("https://a", "token", "2");
            state.set_local_storage("https://a", "org", "7");
            state.set_local_storage("https://b", "token", "3");
            assert_eq!(state.origins.len(), 2);
            let items = state.local_storage("https://a");
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].value, "2");
            assert!(state.local_storage("https://c").is_empty());
        }

        #[test]
        fn test_clear() {
            let mut state = StorageState::new().with_cookie(Cookie::new("sid", "x", "a.com"));
            state.clear();
            assert!(state.is_empty());
        }
    }

    mod seed_script_tests {
        use super::*;

        fn origin() -> OriginState {
            StorageState::new()
                .with_local_storage("https://hub.test", "okta-token", "{\"a\":1}")
                .origins
                .remove(0)
        }

        #[test]
        fn test_writes_items_for_its_origin_only() {
            let script = origin().seed_script().unwrap();
            assert!(script.contains(r#"location.origin !== "https://hub.test""#));
            assert!(script.contains(r#"[["okta-token","{\"a\":1}"]]"#));
        }

        #[test]
        fn test_seeds_once_per_tab() {
            let script = origin().seed_script().unwrap();
            let marker = format!("{SEEDED_MARKER:?}");
            let guard = script
                .find(&format!("sessionStorage.getItem({marker}) !== null) return"))
                .unwrap();
            let write = script.find("localStorage.setItem").unwrap();
            let mark = script.find(&format!("sessionStorage.setItem({marker}")).unwrap();
            assert!(guard < write, "marker must be checked before writing");
            assert!(write < mark, "marker is set after the items are written");
        }
    }

    mod serialization_tests {
        use super::*;

        #[test]
        fn test_playwright_layout() {
            let state = StorageState::new()
                .with_cookie(Cookie::new("sid", "abc", ".example.com").http_only().secure())
                .with_local_storage("https://app.example.com", "auth", "{}");
            let json = serde_json::to_value(&state).unwrap();
            assert_eq!(json["cookies"][0]["httpOnly"], true);
            assert_eq!(json["cookies"][0]["sameSite"], "Lax");
            assert_eq!(json["cookies"][0]["expires"], -1.0);
            assert_eq!(
                json["origins"][0]["localStorage"][0]["name"],
                serde_json::Value::from("auth")
            );
        }

        #[test]
        fn test_parses_playwright_auth_file() {
            let raw = r#"{
                "cookies": [{
                    "name": "appSession", "value": "v", "domain": "app.example.com",
                    "path": "/", "expires": 1767225600.5, "httpOnly": true,
                    "secure": true, "sameSite": "None"
                }],
                "origins": [{
                    "origin": "https://app.example.com",
                    "localStorage": [{ "name": "@@auth0spajs@@", "value": "{}" }]
                }]
            }"#;
            let state: StorageState = serde_json::from_str(raw).unwrap();
            assert_eq!(state.cookies[0].same_site, SameSite::None);
            assert!(!state.cookies[0].is_session());
            assert_eq!(state.local_storage("https://app.example.com").len(), 1);
        }

        #[test]
        fn test_missing_fields_default() {
            let raw = r#"{"cookies":[{"name":"a","value":"b","domain":"c"}]}"#;
            let state: StorageState = serde_json::from_str(raw).unwrap();
            assert_eq!(state.cookies[0].path, "/");
            assert!(state.cookies[0].is_session());
            assert!(state.origins.is_empty());
        }
    }

    mod file_tests {
        use super::*;

        #[test]
        fn test_save_and_load() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("auth.json");
            let state = StorageState::new().with_cookie(Cookie::new("sid", "1", "a.com"));
            state.save(&path).unwrap();
            assert_eq!(StorageState::load(&path).unwrap(), state);
        }

        #[test]
        fn test_load_missing_file() {
            let dir = tempfile::tempdir().unwrap();
            let err = StorageState::load(&dir.path().join("auth.json")).unwrap_err();
            assert!(matches!(err, ProbeError::StorageState { .. }));
        }

        #[test]
        fn test_load_malformed_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("auth.json");
            std::fs::write(&path, "not json").unwrap();
            let err = StorageState::load(&path).unwrap_err();
            assert!(err.to_string().contains("malformed"));
        }
    }
}
