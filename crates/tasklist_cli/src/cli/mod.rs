use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tasklist", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in for this session
    ///
    /// Example: signin alice
    Signin {
        name: String,
    },
    /// Sign out of this session
    Signout,
    /// Show who is signed in
    Whoami,
    /// Add a new task
    ///
    /// Example: add "Buy milk" "Two litres" --at "2024-01-05 09:00" --deadline 2024-01-06
    Add {
        title: String,
        description: String,
        /// Scheduled date-time (YYYY-MM-DD HH:MM[:SS] or YYYY-MM-DD)
        #[arg(long = "at")]
        scheduled_at: String,
        /// Deadline date
        #[arg(long)]
        deadline: String,
        /// Priority label (defaults to "Todo")
        #[arg(long)]
        priority: Option<String>,
    },
    /// Toggle a task's completion
    ///
    /// Example: toggle task-1
    Toggle {
        id: String,
    },
    /// Delete a task after confirmation
    ///
    /// Example: tasklist delete task-1
    /// Example: tasklist delete task-1 --yes
    Delete {
        id: String,
        /// Confirm without prompting
        #[arg(long)]
        yes: bool,
    },
    /// Show details of a task
    ///
    /// Example: show task-1
    Show {
        id: String,
    },
    /// List tasks, optionally filtered
    ///
    /// Example: list
    /// Example: list --search milk
    /// Example: list --from 2024-01-01 --to 2024-01-31
    List {
        /// Case-insensitive substring match against titles
        #[arg(long)]
        search: Option<String>,
        /// Inclusive lower bound on the scheduled date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Inclusive upper bound on the scheduled date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    DefaultPriority,
    Alias(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let (field, remainder) = key_raw
        .split_once('.')
        .map(|(field, rest)| (field.trim(), Some(rest.trim())))
        .unwrap_or((key_raw.trim(), None));

    let canonical_field =
        canonicalize_flag_name(field).ok_or_else(|| "override key cannot be empty".to_string())?;

    match canonical_field.as_str() {
        "theme" => {
            if remainder.is_some() {
                Err("theme override cannot have subfields".to_string())
            } else {
                Ok(ParsedConfigOverride {
                    target: ConfigOverrideTarget::Theme,
                    value,
                })
            }
        }
        "default_priority" | "priority" => {
            if remainder.is_some() {
                Err("default_priority override cannot have subfields".to_string())
            } else {
                Ok(ParsedConfigOverride {
                    target: ConfigOverrideTarget::DefaultPriority,
                    value,
                })
            }
        }
        "aliases" | "alias" => {
            let alias_name = remainder
                .filter(|segment| !segment.is_empty())
                .ok_or_else(|| "aliases override requires an alias name".to_string())?;
            Ok(ParsedConfigOverride {
                target: ConfigOverrideTarget::Alias(alias_name.to_string()),
                value,
            })
        }
        other => Err(format!("unknown config field '{other}'")),
    }
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
