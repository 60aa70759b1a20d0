//! Core scheduling engine for kennelcal.
//!
//! This crate contains the domain layer of the kennelcal scheduling
//! service: the event and series data model, the overlap predicate used
//! by calendar-window queries, the time-shift arithmetic behind drag
//! move/resize, the recurrence classifier, the dog-roster normalizer,
//! and the scoped series mutation coordinator. Persistence is abstracted
//! behind the repository traits in [`storage`].

pub mod scheduling;
pub mod serde;
pub mod storage;
