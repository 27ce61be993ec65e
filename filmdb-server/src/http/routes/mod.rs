//! Route handlers organized by resource
//!
//! Each module exposes `router(...)` taking the repository it needs and
//! returning a stateless `Router`, so resources can be mounted (or tested)
//! one at a time.

pub mod films;
pub mod health;
pub mod people;
