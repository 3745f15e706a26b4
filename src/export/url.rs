//! Revocable in-memory references to exported images.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

const URL_PREFIX: &str = "blob:mintcanvas/";

/// Opaque reference handed out alongside an exported image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry mapping object URLs to the bytes they reference.
///
/// Entries stay alive until revoked, so hosts should revoke URLs they no
/// longer show.
#[derive(Debug, Default)]
pub struct ObjectUrls {
    next_id: u64,
    entries: HashMap<ObjectUrl, Rc<[u8]>>,
}

impl ObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `bytes` and returns a fresh URL for them.
    pub fn create(&mut self, bytes: Rc<[u8]>) -> ObjectUrl {
        self.next_id += 1;
        let url = ObjectUrl(format!("{URL_PREFIX}{}", self.next_id));
        self.entries.insert(url.clone(), bytes);
        url
    }

    /// Returns the bytes behind `url` unless it was revoked.
    pub fn resolve(&self, url: &ObjectUrl) -> Option<Rc<[u8]>> {
        self.entries.get(url).cloned()
    }

    /// Releases `url`. Returns false if it was unknown or already revoked.
    pub fn revoke(&mut self, url: &ObjectUrl) -> bool {
        let removed = self.entries.remove(url).is_some();
        if removed {
            log::debug!("Revoked {url}");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
