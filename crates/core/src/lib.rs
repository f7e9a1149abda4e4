//! # Scheduler Core
//!
//! Domain types shared by the store and the HTTP layer: the [`TimeSlot`]
//! model with its overlap rule, the duration expression parser, the input
//! validator and the error taxonomy.
//!
//! [`TimeSlot`]: models::time_slot::TimeSlot

pub mod duration;
pub mod errors;
pub mod models;
pub mod validators;
