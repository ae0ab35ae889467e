//! Command modules - one file per CLI command

pub mod doctor;
pub mod provision;
pub mod up;
pub mod watch;
