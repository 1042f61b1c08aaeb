//! CLI domain: parse, route, output, and presentation only.
//! Serving and tool execution live in `mcp` and `dispatch`; this layer wires them up.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_catalog_json, format_catalog_text};
pub use route::{ConfigOverrides, RunContext};
