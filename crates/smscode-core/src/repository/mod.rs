//! Store trait definitions (ports).
//!
//! The infrastructure layer implements these against the real message
//! database; tests implement them in memory.

pub mod message;
