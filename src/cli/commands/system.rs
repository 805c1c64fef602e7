use std::io::Write;

use onsite_config::{Config, ConfigManager};

use super::{registry, CommandEntry};
use crate::{
    app::{finance_options, AppContext},
    cli::{args::ParsedArgs, output},
    errors::{CliError, Result},
    utils::build_info,
};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "config",
            "Show or change settings",
            "config [get <key> | set <key> <value>]",
            cmd_config,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
    ]
}

fn cmd_config(context: &mut AppContext, args: &ParsedArgs, out: &mut dyn Write) -> Result<()> {
    if let Some(updated) = run_config(context.config_manager(), args, out)? {
        context.replace_config(updated);
    }
    Ok(())
}

/// `config` works from the settings file alone so a value that keeps the stores
/// from opening can still be corrected. Returns the new config after a `set`.
pub(crate) fn run_config(
    manager: &ConfigManager,
    args: &ParsedArgs,
    out: &mut dyn Write,
) -> Result<Option<Config>> {
    let config = manager.load()?;
    match (args.positional(1), args.positional(2)) {
        (None, _) => {
            for key in Config::KEYS {
                output::write_line(out, format!("{} = {}", key, config.get_value(key)?))?;
            }
            Ok(None)
        }
        (Some("get"), Some(key)) => {
            output::write_line(out, config.get_value(key)?)?;
            Ok(None)
        }
        (Some("set"), Some(key)) => {
            let value = args
                .positional(3)
                .ok_or_else(|| CliError::Usage("usage: config set <key> <value>".into()))?;
            let mut updated = config;
            updated.set_value(key, value)?;
            finance_options(&updated)?;
            manager.save(&updated)?;
            output::write_line(out, format!("{} = {}", key, updated.get_value(key)?))?;
            Ok(Some(updated))
        }
        _ => Err(CliError::Usage(
            "usage: config [get <key> | set <key> <value>]".into(),
        )),
    }
}

fn cmd_version(_context: &mut AppContext, _args: &ParsedArgs, out: &mut dyn Write) -> Result<()> {
    write_version(out)
}

fn cmd_help(_context: &mut AppContext, args: &ParsedArgs, out: &mut dyn Write) -> Result<()> {
    write_help(out, args.positional(1))
}

pub(crate) fn write_version(out: &mut dyn Write) -> Result<()> {
    let meta = build_info::current();
    output::write_line(out, format!("OnSite ledger {}", meta.version))?;
    output::write_line(out, format!("  Build hash  {}", meta.git_hash))?;
    output::write_line(out, format!("  Built at    {}", meta.timestamp))?;
    output::write_line(out, format!("  Target      {}", meta.target))?;
    output::write_line(out, format!("  Profile     {}", meta.profile))
}

pub(crate) fn write_help(out: &mut dyn Write, command: Option<&str>) -> Result<()> {
    let entries = registry();
    if let Some(name) = command {
        let entry = entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| CliError::Usage(format!("unknown command `{}`", name)))?;
        output::write_line(out, entry.description)?;
        return output::write_line(out, format!("usage: onsite_cli {}", entry.usage));
    }
    output::write_line(out, "Usage: onsite_cli <command> [options]")?;
    output::write_line(out, "Available commands:")?;
    for entry in &entries {
        output::write_line(out, format!("  {:<12} {}", entry.name, entry.description))?;
    }
    Ok(())
}
