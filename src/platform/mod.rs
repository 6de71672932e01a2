//! Platform abstraction layer
//!
//! Isolates browser APIs so the rest of the crate stays target-agnostic.
//! Currently covers persistent key/value storage (LocalStorage on web).

pub mod storage;
