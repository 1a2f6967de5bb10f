use clap::{CommandFactory, Parser};
use std::io::{self, BufRead, Write};
use tasklist_cli::cli::{Cli, Command, ConfigOverrideTarget, parse_config_override};
use tasklist_cli::render;
use tasklist_cli::session::Session;
use tasklist_core::config::{ConfigOverrides, load_config_with_fallback, merge_overrides};
use tasklist_core::error::AppError;
use tasklist_core::filter::{filter_tasks, parse_date};
use tasklist_core::model::TaskDraft;

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' if in_quotes => match chars.next() {
                Some(next @ ('"' | '\\')) => current.push(next),
                Some(next) => {
                    current.push('\\');
                    current.push(next);
                }
                None => current.push('\\'),
            },
            '"' => in_quotes = !in_quotes,
            ch if ch.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            ch => current.push(ch),
        }
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

/// Replaces a leading alias with its configured expansion, e.g.
/// `ls --search milk` becomes `list --search milk`.
fn expand_alias(args: Vec<String>, session: &Session) -> Vec<String> {
    let Some(first) = args.first() else {
        return args;
    };
    let Some(expansion) = session.config().aliases.get(first) else {
        return args;
    };

    let mut expanded: Vec<String> = expansion.split_whitespace().map(str::to_string).collect();
    expanded.extend(args.into_iter().skip(1));
    expanded
}

fn apply_overrides(session: &mut Session, raw_overrides: &[String]) -> Result<(), AppError> {
    if raw_overrides.is_empty() {
        return Ok(());
    }

    let mut overrides = ConfigOverrides::default();
    for raw in raw_overrides {
        let parsed = parse_config_override(raw).map_err(AppError::invalid_input)?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::DefaultPriority => {
                overrides.default_priority = Some(parsed.value)
            }
            ConfigOverrideTarget::Alias(name) => {
                overrides.aliases.insert(name, parsed.value);
            }
        }
    }

    let merged = merge_overrides(session.config(), &overrides);
    session.set_config(merged);
    Ok(())
}

fn confirm_delete_prompt(
    title: &str,
    input: &mut dyn BufRead,
) -> Result<bool, AppError> {
    print!("Delete task \"{title}\"? [y/N] ");
    io::stdout()
        .flush()
        .map_err(|err| AppError::io(err.to_string()))?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|err| AppError::io(err.to_string()))?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

fn run_command(session: &mut Session, cli: Cli, input: &mut dyn BufRead) -> Result<(), AppError> {
    apply_overrides(session, &cli.config_override)?;

    match cli.command {
        Command::Signin { name } => {
            let user = session.sign_in(&name)?.to_string();
            println!("Signed in as {user}");
        }
        Command::Signout => {
            session.sign_out();
            println!("Signed out");
        }
        Command::Whoami => match session.user() {
            Some(user) => println!("{user}"),
            None => println!("signed out"),
        },
        Command::Add {
            title,
            description,
            scheduled_at,
            deadline,
            priority,
        } => {
            let mut draft = TaskDraft {
                title,
                description,
                scheduled_at,
                deadline,
                priority: priority.unwrap_or_else(|| session.default_priority().to_string()),
            };

            let authorized = session.signed_in();
            let task = session.store.add_task(&draft, authorized)?;
            draft.clear();

            if cli.json {
                render::print_task_json(&task);
            } else {
                println!("Added task: {} ({})", task.title, task.id);
            }
        }
        Command::Toggle { id } => {
            let task = session.store.toggle_completion(&id)?;
            if cli.json {
                render::print_task_json(&task);
            } else if task.completed {
                println!("Completed task: {} ({})", task.title, task.id);
            } else {
                println!("Reopened task: {} ({})", task.title, task.id);
            }
        }
        Command::Delete { id, yes } => {
            let pending = session.store.request_delete(&id)?;
            let confirmed = if yes {
                true
            } else {
                let title = pending
                    .as_ref()
                    .map(|task| task.title.as_str())
                    .unwrap_or("this task");
                confirm_delete_prompt(title, input)?
            };

            if !confirmed {
                session.store.cancel_delete();
                println!("Delete cancelled");
                return Ok(());
            }

            match session.store.confirm_delete() {
                Some(removed) => {
                    if cli.json {
                        render::print_task_json(&removed);
                    } else {
                        println!("Deleted task: {} ({})", removed.title, removed.id);
                    }
                }
                None => println!("Nothing to delete"),
            }
        }
        Command::Show { id } => {
            let task = session
                .store
                .get(&id)
                .ok_or_else(|| AppError::not_found("task not found"))?
                .clone();
            if cli.json {
                render::print_task_json(&task);
            } else {
                render::print_task_plain(&task, session.palette());
            }
        }
        Command::List { search, from, to } => {
            // Filter bounds come from the user directly, so a bad
            // bound is an input error rather than a tolerated value.
            let start = match from.as_deref() {
                Some(raw) => Some(
                    parse_date(raw)
                        .ok_or_else(|| AppError::invalid_input("from must be YYYY-MM-DD"))?,
                ),
                None => None,
            };
            let end = match to.as_deref() {
                Some(raw) => Some(
                    parse_date(raw)
                        .ok_or_else(|| AppError::invalid_input("to must be YYYY-MM-DD"))?,
                ),
                None => None,
            };
            let visible = filter_tasks(
                session.store.tasks(),
                search.as_deref().unwrap_or(""),
                start,
                end,
            );

            if cli.json {
                render::print_tasks_json(&visible);
            } else {
                render::print_tasks_table(&visible, session.palette());
            }
        }
    }

    Ok(())
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_interactive(session: &mut Session) -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {err}");
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let args = expand_alias(args, session);
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("tasklist".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(session, cli, &mut stdin_lock) {
            eprintln!("ERROR: {err}");
        }
    }

    Ok(())
}

fn main() {
    let load = load_config_with_fallback();
    if let Some(err) = load.error {
        eprintln!("WARNING: {err}");
    }
    let mut session = Session::new(load.config);

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive(&mut session) {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            err.print().ok();
            return;
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();
    if let Err(err) = run_command(&mut session, cli, &mut stdin_lock) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::split_command_line;

    #[test]
    fn split_handles_quoted_arguments() {
        let args = split_command_line("add \"Buy milk\" \"Two litres\"").unwrap();
        assert_eq!(args, vec!["add", "Buy milk", "Two litres"]);
    }

    #[test]
    fn split_handles_escaped_quotes() {
        let args = split_command_line("add \"say \\\"hi\\\"\"").unwrap();
        assert_eq!(args, vec!["add", "say \"hi\""]);
    }

    #[test]
    fn split_rejects_unterminated_quotes() {
        let err = split_command_line("add \"Buy milk").unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }
}
