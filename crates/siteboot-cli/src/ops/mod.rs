//! Orchestration helpers behind the CLI commands.

pub mod gitignore;
pub mod launch;
pub mod prereq;
pub mod repos;
pub mod server;
