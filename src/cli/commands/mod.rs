pub mod finance;
pub mod session;
pub mod system;

use std::io::Write;

use crate::{app::AppContext, cli::args::ParsedArgs, errors::Result};

pub type Handler = fn(&mut AppContext, &ParsedArgs, &mut dyn Write) -> Result<()>;

/// A command reachable from the command line.
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: Handler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: Handler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub fn registry() -> Vec<CommandEntry> {
    let mut entries = finance::definitions();
    entries.extend(session::definitions());
    entries.extend(system::definitions());
    entries
}
