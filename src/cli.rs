//! CLI domain: parse, route, and output only.
//! No domain orchestration; the route table dispatches to the maker facade.

mod output;
mod parse;
mod route;

pub use output::{format_cache_status, format_make_report, map_error};
pub use parse::{CacheCommands, Cli, Commands};
pub use route::RunContext;
