//! Bounded memoization used by the layout and shadow caches.

pub mod lru;
