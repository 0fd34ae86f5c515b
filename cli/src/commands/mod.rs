//! Command implementations

pub mod inspect;
pub mod list;
pub mod migrate;
