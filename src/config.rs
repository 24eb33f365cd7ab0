//! Run configuration threaded into the dispatcher and transfer engine.
use std::time::Duration;

use crate::args::HarnessArgs;

pub const DEFAULT_USER_AGENT: &str = concat!("fetchplan/", env!("CARGO_PKG_VERSION"));

/// Redirect hop cap applied when redirect following is enabled.
pub const REDIRECT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    pub follow_redirects: bool,
    pub debug: bool,
    pub connect_timeout: Duration,
}

impl RunConfig {
    #[must_use]
    pub const fn from_args(args: &HarnessArgs) -> Self {
        Self {
            follow_redirects: args.follow_redirects,
            debug: args.debug,
            connect_timeout: args.connect_timeout,
        }
    }
}
