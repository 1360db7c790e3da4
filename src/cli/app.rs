//! Main CLI application

use crate::cli::context::{Context, Verbosity};
use crate::graph::{find_makefile, load_makefile, TaskGraph};
use crate::resolver::ExecutionPlan;
use anyhow::{Context as _, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status when the task argument is missing or ambiguous
const USAGE_EXIT_CODE: u8 = 2;

/// How the resolved plan is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Yaml,
}

/// Result of checking the positional task arguments
#[derive(Debug, PartialEq, Eq)]
enum TargetSelection<'a> {
    Missing,
    TooMany(usize),
    One(&'a str),
}

/// CLI application
pub struct App {
    /// The clap command
    command: Command,
}

impl App {
    pub fn new() -> Self {
        App {
            command: build_command(),
        }
    }

    /// Run the application with the given command line arguments
    pub fn run_from<I, T>(self, args: I) -> Result<ExitCode>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.clone().get_matches_from(args);
        let mut ctx = Context::new().with_verbosity(get_verbosity(&matches));

        if let Some(shell) = matches.get_one::<Shell>("completions") {
            let mut command = self.command;
            clap_complete::generate(*shell, &mut command, "rmake", &mut io::stdout());
            return Ok(ExitCode::SUCCESS);
        }

        let list = matches.get_flag("list");
        let target = if list {
            None
        } else {
            match select_target(&matches) {
                TargetSelection::One(target) => Some(target),
                TargetSelection::Missing => {
                    ctx.print_error("No task specified. Pass the name of the task to run.");
                    return Ok(ExitCode::from(USAGE_EXIT_CODE));
                }
                TargetSelection::TooMany(count) => {
                    ctx.print_error(&format!(
                        "Invalid invocation: expected exactly one task, got {}",
                        count
                    ));
                    return Ok(ExitCode::from(USAGE_EXIT_CODE));
                }
            }
        };

        let path = match matches.get_one::<PathBuf>("file") {
            Some(path) => path.clone(),
            None => find_makefile()?,
        };
        ctx = ctx.with_makefile_path(path.clone());
        ctx.print_debug(&format!("Using makefile: {}", ctx.makefile_name()));

        let graph = load_makefile(&path)
            .with_context(|| format!("Failed to load {}", ctx.makefile_name()))?;
        if graph.is_empty() {
            ctx.print_warn(&format!("{} declares no tasks", ctx.makefile_name()));
        }
        ctx.print_debug(&format!("Parsed {} task(s)", graph.len()));

        let Some(target) = target else {
            print_task_list(&graph, &mut io::stdout().lock())?;
            return Ok(ExitCode::SUCCESS);
        };

        let plan = ExecutionPlan::build(&graph, target)
            .with_context(|| format!("Failed to resolve task '{}'", target))?;
        ctx.print_debug(&format!(
            "Execution order: {}",
            plan.task_names().join(" -> ")
        ));

        // render fully before writing so errors never leave partial output
        let rendered = match get_format(&matches) {
            OutputFormat::Text => plan.to_text(),
            OutputFormat::Yaml => plan.to_yaml()?,
        };

        let mut stdout = io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;

        Ok(ExitCode::SUCCESS)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the clap command
fn build_command() -> Command {
    Command::new("rmake")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print the build order and actions for a task in makefile.txt")
        .arg(
            Arg::new("task")
                .value_name("TASK")
                .help("Task to resolve")
                .num_args(1..),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Path to the makefile (default: search for makefile.txt)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .help("Output format for the plan")
                .value_parser(["text", "yaml"])
                .default_value("text"),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .help("List declared tasks and their dependencies")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("completions")
                .long("completions")
                .value_name("SHELL")
                .help("Print a shell completion script")
                .value_parser(value_parser!(Shell)),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print the plan and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no diagnostics")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Get output format from matches
fn get_format(matches: &ArgMatches) -> OutputFormat {
    match matches.get_one::<String>("format").map(String::as_str) {
        Some("yaml") => OutputFormat::Yaml,
        _ => OutputFormat::Text,
    }
}

/// Exactly one task name must be given
fn select_target(matches: &ArgMatches) -> TargetSelection<'_> {
    let tasks: Vec<&String> = matches
        .get_many::<String>("task")
        .map(|values| values.collect())
        .unwrap_or_default();

    match tasks.as_slice() {
        [] => TargetSelection::Missing,
        [target] => TargetSelection::One(target.as_str()),
        many => TargetSelection::TooMany(many.len()),
    }
}

/// Print every declared task, one per line, in makefile syntax
fn print_task_list<W: Write>(graph: &TaskGraph, out: &mut W) -> io::Result<()> {
    for record in graph.records() {
        if record.dependencies().is_empty() {
            writeln!(out, "{}", record.name)?;
        } else {
            writeln!(out, "{}: {}", record.name, record.dependencies().join(" "))?;
        }
    }
    Ok(())
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<ExitCode> {
    App::new().run_from(std::env::args_os())
}
