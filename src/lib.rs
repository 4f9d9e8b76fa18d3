//! homecmd - keystroke-driven command resolver for smart home devices and scenes

pub mod catalog;
pub mod command;
pub mod core;
pub mod feedback;
pub mod matching;
