//! Letterpress domain logic.
//!
//! Pure building blocks shared by the store and API crates: identifier and
//! timestamp types, the domain error, the access guard, the layout renderer,
//! input validation, and upload naming rules. Nothing in here performs I/O.

pub mod access;
pub mod error;
pub mod render;
pub mod types;
pub mod uploads;
pub mod validation;
