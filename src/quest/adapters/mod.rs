//! Adapter implementations of the quest ports.

pub mod memory;
