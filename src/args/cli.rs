use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use super::parsers::parse_duration_arg;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Scripted HTTP fetch verification harness - dispatches timed fetch directives concurrently and verifies each response against its expected outcome."
)]
pub struct HarnessArgs {
    /// Schedule file with one directive per line: '<startTimeMs> <URL> <method> [<kind> <value>]'
    #[arg(long = "file", short = 'f')]
    pub file: PathBuf,

    /// Follow HTTP redirects (up to 10 hops)
    #[arg(long = "follow-redirects", short = 'r')]
    pub follow_redirects: bool,

    /// Echo raw input lines and the in-memory schedule before running
    #[arg(long = "debug", short = 'd')]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = "10s",
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,
}
