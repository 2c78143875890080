//! CLI domain: parse, route and output only.
//! Single route table dispatches to the scan, the resolver and the config printer.

mod output;
mod parse;
mod route;

pub use output::{is_broken_pipe, map_error};
pub use parse::{Cli, Commands, ScanArgs};
pub use route::{apply_scan_args, RunContext};
