//! Client-side state that outlives a single command.

pub mod session;
pub mod settings;
pub mod storage;
