//! Input handling

pub mod handler;
