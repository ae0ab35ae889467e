//! siteboot - bootstrap a local documentation-site development environment
//!
//! # Overview
//!
//! One command stands up everything needed to work on the documentation
//! site: a pinned Node.js runtime (provisioned only when missing), the
//! site framework checkout, the user's content fork mounted at
//! `<site>/content`, the dev server, and a mirror watcher that replays
//! edits from the bootstrap directory into the content checkout.
//!
//! # Directory Layout
//!
//! ```text
//! <bootstrap dir>/          # the user's working tree, watched recursively
//! ├── .gitignore            # maintained: siteboot*, node/, jaoweb/
//! ├── node/                 # provisioned runtime (excluded from the mirror)
//! ├── jaoweb/               # site checkout (excluded from the mirror)
//! │   └── content/          # the user's content fork, mirror destination
//! └── docs/...              # edits here are mirrored into jaoweb/content/
//! ```

pub mod cmd;
pub mod ops;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Bootstrap and serve the documentation site locally.
#[derive(Parser, Debug)]
#[command(name = "siteboot", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub config: Config,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Full bootstrap: runtime, checkouts, dev server, mirror watcher
    Up {
        /// GitHub account owning the content fork (prompted when omitted)
        #[arg(long, env = "SITEBOOT_OWNER")]
        owner: Option<String>,
    },
    /// Provision the pinned runtime and print its path
    Provision,
    /// Run the mirror watcher only
    Watch,
    /// Check for required and optional commands
    Doctor,
}

/// Remote endpoints and local directories, overridable per invocation.
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// Site framework repository
    #[arg(
        long,
        env = "SITEBOOT_SITE_REPO",
        default_value = "https://github.com/jaoafa/jaoweb"
    )]
    pub site_repo: String,

    /// Upstream content repository; forks carry the same name under the
    /// user's account
    #[arg(
        long,
        env = "SITEBOOT_CONTENT_REPO",
        default_value = "https://github.com/jaoafa/jaoweb-docs"
    )]
    pub content_repo: String,

    /// Checksum manifest of the pinned runtime release line
    #[arg(
        long,
        env = "SITEBOOT_MANIFEST_URL",
        default_value = "https://nodejs.org/dist/latest-v14.x/SHASUMS256.txt"
    )]
    pub manifest_url: String,

    /// Base URL the manifest's artifacts are downloaded from
    #[arg(
        long,
        env = "SITEBOOT_DIST_URL",
        default_value = "https://nodejs.org/dist/latest-v14.x"
    )]
    pub dist_url: String,

    /// Directory the runtime is provisioned into
    #[arg(long, default_value = "node")]
    pub runtime_dir: PathBuf,

    /// Directory of the site checkout
    #[arg(long, default_value = "jaoweb")]
    pub site_dir: PathBuf,

    /// Development server address opened in the browser
    #[arg(long, default_value = "http://localhost:3000")]
    pub server_url: String,
}
