//! Session cookie jar backed by the secure store
//!
//! The auth backend identifies the session with cookies. They are kept as a
//! JSON name/value map under `<storage_prefix>:cookie` and replayed as a
//! single `Cookie` header by both the auth client and the API client.

use std::collections::BTreeMap;
use storage::{keys, DeviceStore};

/// Cookie jar shared by the HTTP clients
#[derive(Clone)]
pub struct SessionCookies {
    store: DeviceStore,
}

impl SessionCookies {
    /// Create a jar over a store scoped with the app's storage prefix
    pub fn new(store: DeviceStore) -> Self {
        Self { store }
    }

    fn load(&self) -> BTreeMap<String, String> {
        match self.store.get::<BTreeMap<String, String>>(keys::SESSION_COOKIE) {
            Ok(jar) => jar.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to read session cookies: {}", e);
                BTreeMap::new()
            }
        }
    }

    fn save(&self, jar: &BTreeMap<String, String>) {
        let result = if jar.is_empty() {
            self.store.remove(keys::SESSION_COOKIE).map(|_| ())
        } else {
            self.store.set(keys::SESSION_COOKIE, jar)
        };

        if let Err(e) = result {
            tracing::warn!("Failed to save session cookies: {}", e);
        }
    }

    /// The `Cookie` header value, `None` when the jar is empty
    pub fn header(&self) -> Option<String> {
        let jar = self.load();
        if jar.is_empty() {
            return None;
        }

        Some(
            jar.iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Merge `Set-Cookie` header values into the jar
    ///
    /// Cookies with an empty value or `Max-Age=0` are removed.
    pub fn absorb<'a>(&self, set_cookie_headers: impl IntoIterator<Item = &'a str>) {
        let mut jar = self.load();
        let mut changed = false;

        for header in set_cookie_headers {
            let Some((name, value, expired)) = parse_set_cookie(header) else {
                continue;
            };

            if expired || value.is_empty() {
                changed |= jar.remove(&name).is_some();
            } else {
                jar.insert(name, value);
                changed = true;
            }
        }

        if changed {
            self.save(&jar);
        }
    }

    /// Forget every cookie
    pub fn clear(&self) {
        self.save(&BTreeMap::new());
    }
}

/// Split a `Set-Cookie` value into name, value and an expired flag
fn parse_set_cookie(header: &str) -> Option<(String, String, bool)> {
    let mut parts = header.split(';');
    let (name, value) = parts.next()?.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let expired = parts.any(|attr| match attr.split_once('=') {
        Some((key, age)) if key.trim().eq_ignore_ascii_case("max-age") => {
            age.trim().parse::<i64>().map(|age| age <= 0).unwrap_or(false)
        }
        _ => false,
    });

    Some((name.to_string(), value.trim().to_string(), expired))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use storage::KvStore;

    fn jar() -> SessionCookies {
        let kv = Arc::new(KvStore::in_memory().unwrap());
        SessionCookies::new(DeviceStore::with_scope(kv, "starter"))
    }

    #[test]
    fn test_empty_jar_has_no_header() {
        assert_eq!(jar().header(), None);
    }

    #[test]
    fn test_absorb_and_render() {
        let jar = jar();
        jar.absorb([
            "better-auth.session_token=abc.def; Path=/; HttpOnly; SameSite=Lax",
            "better-auth.session_data=xyz; Path=/",
        ]);

        assert_eq!(
            jar.header().as_deref(),
            Some("better-auth.session_data=xyz; better-auth.session_token=abc.def")
        );
    }

    #[test]
    fn test_max_age_zero_removes_cookie() {
        let jar = jar();
        jar.absorb(["token=abc; Path=/"]);
        jar.absorb(["token=; Max-Age=0; Path=/"]);
        assert_eq!(jar.header(), None);
    }

    #[test]
    fn test_clear() {
        let jar = jar();
        jar.absorb(["token=abc"]);
        jar.clear();
        assert_eq!(jar.header(), None);
    }

    #[test]
    fn test_parse_set_cookie_rejects_garbage() {
        assert_eq!(parse_set_cookie("no-equals-sign"), None);
        assert_eq!(parse_set_cookie("=value"), None);
        assert_eq!(
            parse_set_cookie("a=b; max-age=3600"),
            Some(("a".to_string(), "b".to_string(), false))
        );
    }
}
