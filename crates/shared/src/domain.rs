use std::fmt;

/// Key under which a cached value lives in the shared key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreKey(pub &'static str);

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const INCIDENT_COORDS: StoreKey = StoreKey("incident_coords");
pub const RECENT_NEWS: StoreKey = StoreKey("recent_news");

/// Both keys the chat handler owns, in write order.
pub const CACHED_KEYS: [StoreKey; 2] = [INCIDENT_COORDS, RECENT_NEWS];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachedField {
    Coords,
    RecentNews,
}

impl CachedField {
    pub fn key(self) -> StoreKey {
        match self {
            Self::Coords => INCIDENT_COORDS,
            Self::RecentNews => RECENT_NEWS,
        }
    }
}
