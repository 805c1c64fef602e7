pub mod args;
pub mod commands;
pub mod output;

use std::{
    env,
    io::{self, Write},
    path::PathBuf,
};

use onsite_config::{resolve_base_dir, ConfigManager};

use crate::{app::AppContext, errors::{CliError, Result}};
use args::ParsedArgs;

/// Entry point for the `onsite_cli` binary.
pub fn run_cli() -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_at(resolve_base_dir(), env::args().skip(1), &mut out)
}

/// Parses and runs one command line against the data kept under `base`.
/// `help`, `version` and `config` never open the stores.
pub fn run_at<I, S>(base: PathBuf, args: I, out: &mut dyn Write) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args = ParsedArgs::parse(args)?;
    match args.positional(0) {
        None | Some("help") => return commands::system::write_help(out, args.positional(1)),
        Some("version") => return commands::system::write_version(out),
        _ if args.switch("help") => {
            return commands::system::write_help(out, args.positional(0))
        }
        Some("config") => {
            let manager = ConfigManager::with_base_dir(base)?;
            return commands::system::run_config(&manager, &args, out).map(|_| ());
        }
        _ => {}
    }
    let mut context = AppContext::open_at(base)?;
    execute(&mut context, &args, out)
}

/// Runs one parsed command against an open context.
pub fn execute(context: &mut AppContext, args: &ParsedArgs, out: &mut dyn Write) -> Result<()> {
    let name = args
        .positional(0)
        .ok_or_else(|| CliError::Usage("no command given; try `help`".into()))?;
    let entry = commands::registry()
        .into_iter()
        .find(|entry| entry.name == name)
        .ok_or_else(|| CliError::Usage(format!("unknown command `{}`; try `help`", name)))?;
    (entry.handler)(context, args, out)
}
