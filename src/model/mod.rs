//! Core data model

pub mod menu;
