//! siteboot-core - runtime provisioning and content mirroring
//!
//! # Overview
//!
//! The library half of siteboot. It covers the two stateful parts of the
//! bootstrap:
//!
//! - **Provisioning**: resolve the host platform to an artifact suffix,
//!   fetch and parse the release checksum manifest, download the matching
//!   archive, and extract it into the runtime directory. The pipeline is
//!   idempotent: a runtime binary already on disk short-circuits the whole
//!   thing with zero network requests.
//! - **Mirroring**: a recursive filesystem watch that replays file writes
//!   from the bootstrap directory into the site's tracked `content/`
//!   subtree, under an exclusion policy that keeps checkouts, the runtime
//!   tree, and VCS metadata out of the mirror.
//!
//! Everything process-shaped (git, the dev server, browser/editor launch)
//! lives in the CLI crate; this crate only touches the network and the
//! filesystem.

pub mod io;
pub mod manifest;
pub mod platform;
pub mod provision;
pub mod search;
pub mod watch;

/// User agent string sent with every HTTP request.
pub const USER_AGENT: &str = concat!("siteboot/", env!("CARGO_PKG_VERSION"));
