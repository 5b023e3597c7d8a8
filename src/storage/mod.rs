//! Byte-level storage beneath the SQL table store

pub mod engine;
pub mod keycode;
pub mod memory;
