//! One-shot registries caching resolved addresses.
//!
//! Each registry runs one scan+resolve pass at startup, caches the result
//! for the process lifetime, and answers per-tick queries from the cache.
//! Registries are plainly-owned objects constructed by the startup sequence
//! and passed by reference to consumers; there is no global state. Resolved
//! addresses stay valid only for the scanned process image.

mod handling;
mod timescale;

pub use handling::HandlingRegistry;
pub use timescale::TimeScaleRegistry;
