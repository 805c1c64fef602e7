use std::collections::{HashMap, HashSet};

use crate::errors::{CliError, Result};

/// Options that never take a value.
const SWITCHES: [&str; 3] = ["json", "onboarding", "help"];

/// Positional words plus `--name value`, `--name=value` and bare switches.
#[derive(Debug, Default)]
pub struct ParsedArgs {
    positional: Vec<String>,
    options: HashMap<String, String>,
    switches: HashSet<String>,
}

impl ParsedArgs {
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.into_iter().map(Into::into);
        while let Some(arg) = iter.next() {
            let Some(name) = arg.strip_prefix("--") else {
                parsed.positional.push(arg);
                continue;
            };
            if let Some((key, value)) = name.split_once('=') {
                parsed.options.insert(key.to_string(), value.to_string());
            } else if SWITCHES.contains(&name) {
                parsed.switches.insert(name.to_string());
            } else {
                let value = iter
                    .next()
                    .ok_or_else(|| CliError::Usage(format!("option --{} needs a value", name)))?;
                parsed.options.insert(name.to_string(), value);
            }
        }
        Ok(parsed)
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| CliError::Usage(format!("missing required option --{}", name)))
    }

    pub fn switch(&self, name: &str) -> bool {
        self.switches.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_positionals_options_and_switches() {
        let args = ParsedArgs::parse([
            "export",
            "--amount",
            "120",
            "--job-title=Smith Job",
            "--json",
            "csv",
        ])
        .unwrap();
        assert_eq!(args.positional(0), Some("export"));
        assert_eq!(args.positional(1), Some("csv"));
        assert_eq!(args.positional(2), None);
        assert_eq!(args.get("amount"), Some("120"));
        assert_eq!(args.get("job-title"), Some("Smith Job"));
        assert!(args.switch("json"));
        assert!(!args.switch("onboarding"));
    }

    #[test]
    fn dangling_option_is_a_usage_error() {
        let err = ParsedArgs::parse(["--amount"]).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
        assert!(ParsedArgs::parse(std::iter::empty::<String>())
            .unwrap()
            .require("amount")
            .is_err());
    }
}
