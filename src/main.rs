//! Tab Transfer CLI - move open tabs between browser profiles via a local relay.
//!
//! Provides both human-friendly and agent-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use std::fs;
use std::io::{self, IsTerminal};
use std::net::SocketAddr;

use clap::Parser;
use colored::Colorize;
use serde::Serialize;

use tt::cli::{Cli, Commands};
use tt::error::{Result, TtError};
use tt::recreator::plan::{build_plan, PlanStep, RestorePlan};
use tt::relay::{self, RelayClient, SnapshotStore};
use tt::snapshot::TabSnapshot;
use tt::{cli, logging};

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

fn main() {
    let cli = Cli::parse();

    logging::init_logging(cli.use_json(), cli.verbose, cli.quiet);

    // Handle no-color flag or non-TTY
    if cli.no_color || !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    // Run the command
    let result = run(&cli);

    // Handle errors
    if let Err(e) = result {
        output_error(&cli, &e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        None => print_quick_start(cli),
        Some(Commands::Serve(args)) => cmd_serve(cli, args),
        Some(Commands::Status(args)) => cmd_status(cli, args),
        Some(Commands::Push(args)) => cmd_push(cli, args),
        Some(Commands::Pull(args)) => cmd_pull(cli, args),
        Some(Commands::Plan(args)) => cmd_plan(cli, args),
        Some(Commands::Version) => cmd_version(cli),
        Some(Commands::Completions(args)) => cmd_completions(cli, args),
    }
}

// === Quick Start (Robot Mode Optimized) ===

/// Prints quick-start help optimized for both humans and AI agents.
#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn print_quick_start(cli: &Cli) -> Result<()> {
    if cli.use_json() {
        print_robot_quick_start();
    } else {
        print_human_quick_start();
    }
    Ok(())
}

fn print_robot_quick_start() {
    let help = RobotQuickStart {
        tool: "tt",
        version: build_info::VERSION,
        description: "Move open tabs, tab groups, and pin state between browser profiles",
        relay: RobotRelay {
            start: "tt serve",
            check: "tt status --robot",
            default_url: relay::DEFAULT_RELAY_URL,
        },
        transfer: RobotTransfer {
            push_snapshot: "tt push <FILE>",
            pull_snapshot: "tt pull --output <FILE>",
            note: "the browser extension drives POST /export and GET /import directly",
        },
        inspection: RobotInspection {
            dry_run_plan: "tt plan --robot",
            plan_from_file: "tt plan --input <FILE> --robot",
        },
        output_modes: OutputModes {
            human: "--format=text (default)",
            robot: "--robot or --format=json",
            compact: "--format=json-compact",
        },
        relay_override: "Use --relay <URL> or TT_RELAY_URL when the relay is not on the default port",
    };

    println!("{}", serde_json::to_string_pretty(&help).unwrap());
}

fn print_human_quick_start() {
    println!(
        "{} {} - Tab Transfer CLI\n",
        "tt".bold().cyan(),
        build_info::VERSION
    );

    println!("{}", "QUICK START".bold().underline());
    println!();

    println!("  {}  Run the relay server", "tt serve".green());
    println!("  {}  Check relay status", "tt status".green());
    println!("  {}  Store a snapshot file on the relay", "tt push tabs.json".green());
    println!("  {}  Save the held snapshot", "tt pull -o tabs.json".green());
    println!("  {}  Preview the restore plan", "tt plan".green());
    println!();

    println!("{}", "TRANSFER WORKFLOW".bold().underline());
    println!();
    println!("  1. {} on this machine", "tt serve".cyan());
    println!("  2. Export from the source profile (extension popup)");
    println!("  3. Import into the target profile (extension popup)");
    println!();

    println!("{}", "ROBOT MODE (for AI agents)".bold().underline());
    println!();
    println!("  {}  JSON output", "tt --robot <command>".cyan());
    println!("  {}  Quick-start JSON", "tt --robot".cyan());
    println!();

    println!("Run {} for full help", "tt --help".yellow());
}

// === Robot Mode JSON Structures ===

#[derive(Serialize)]
struct RobotQuickStart {
    tool: &'static str,
    version: &'static str,
    description: &'static str,
    relay: RobotRelay,
    transfer: RobotTransfer,
    inspection: RobotInspection,
    output_modes: OutputModes,
    relay_override: &'static str,
}

#[derive(Serialize)]
struct RobotRelay {
    start: &'static str,
    check: &'static str,
    default_url: &'static str,
}

#[derive(Serialize)]
struct RobotTransfer {
    push_snapshot: &'static str,
    pull_snapshot: &'static str,
    note: &'static str,
}

#[derive(Serialize)]
struct RobotInspection {
    dry_run_plan: &'static str,
    plan_from_file: &'static str,
}

#[derive(Serialize)]
struct OutputModes {
    human: &'static str,
    robot: &'static str,
    compact: &'static str,
}

// === Command Implementations ===

fn cmd_serve(cli: &Cli, args: &cli::ServeArgs) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .map_err(|e| TtError::Other(format!("invalid bind address: {e}")))?;

    if !cli.quiet && !cli.use_json() {
        println!("{} Tab Transfer relay", "Starting".bold().green());
        println!("  URL: http://{addr}");
        println!("  Keep this running while transferring tabs");
    }

    let store = SnapshotStore::new();
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(relay::serve(store, addr))
}

fn cmd_status(cli: &Cli, _args: &cli::StatusArgs) -> Result<()> {
    let client = RelayClient::new(cli.relay.clone());
    let status = client.status()?;

    if cli.use_json() {
        output_json(cli, &status);
    } else {
        println!("{}: {}", "Relay".bold(), client.base_url());
        println!("{}: {}", "Status".bold(), status.status.green());
        println!(
            "{}: {}",
            "Snapshot held".bold(),
            if status.has_data { "yes".green() } else { "no".yellow() }
        );
        println!("{}: {}", "Server time".bold(), status.timestamp);
    }
    Ok(())
}

fn cmd_push(cli: &Cli, args: &cli::PushArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.file)?;
    let snapshot: TabSnapshot =
        serde_json::from_str(&raw).map_err(|e| TtError::SnapshotParse(e.to_string()))?;

    let client = RelayClient::new(cli.relay.clone());
    client.export(&snapshot)?;

    let tab_count = snapshot.total_tabs();
    if cli.use_json() {
        output_json(
            cli,
            &serde_json::json!({
                "success": true,
                "tabCount": tab_count,
                "windows": snapshot.windows.len(),
            }),
        );
    } else if !cli.quiet {
        println!(
            "Pushed {} tabs in {} windows to {}",
            tab_count,
            snapshot.windows.len(),
            client.base_url()
        );
    }
    Ok(())
}

fn cmd_pull(cli: &Cli, args: &cli::PullArgs) -> Result<()> {
    let client = RelayClient::new(cli.relay.clone());
    let snapshot = client.import()?;

    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| TtError::SnapshotParse(e.to_string()))?;

    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            if !cli.quiet && !cli.use_json() {
                println!(
                    "Saved {} tabs in {} windows to {}",
                    snapshot.total_tabs(),
                    snapshot.windows.len(),
                    path.display()
                );
            }
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_plan(cli: &Cli, args: &cli::PlanArgs) -> Result<()> {
    let snapshot: TabSnapshot = match &args.input {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str(&raw).map_err(|e| TtError::SnapshotParse(e.to_string()))?
        }
        None => RelayClient::new(cli.relay.clone()).import()?,
    };

    let plan = build_plan(&snapshot);

    if cli.use_json() {
        output_json(cli, &plan);
    } else {
        print_human_plan(&plan);
    }
    Ok(())
}

fn print_human_plan(plan: &RestorePlan) {
    println!(
        "{}: {} windows, {} tabs",
        "Restore plan".bold(),
        plan.window_count(),
        plan.tab_count
    );
    println!();

    for (i, step) in plan.steps.iter().enumerate() {
        let line = match step {
            PlanStep::CreateWindow { window, url } => {
                format!("open window {window} seeded with {url}")
            }
            PlanStep::CreateGroup {
                window,
                group,
                title,
                color,
                collapsed,
            } => format!(
                "create group {group} in window {window}: \"{title}\" ({color:?}{})",
                if *collapsed { ", collapsed" } else { "" }
            ),
            PlanStep::CreateTab {
                window,
                url,
                pinned,
                ..
            } => format!(
                "open tab {url} in window {window}{}",
                if *pinned { " (pinned)" } else { "" }
            ),
            PlanStep::AddToGroup { window, tab, group } => {
                format!("add tab {tab} of window {window} to group {group}")
            }
            PlanStep::PinTab { window, tab } => {
                format!("pin tab {tab} of window {window}")
            }
        };
        println!("  {:>3}. {line}", i + 1);
    }

    if !plan.degraded_groups.is_empty() {
        println!();
        println!(
            "{}: groups {:?} have no captured metadata; their tabs stay ungrouped",
            "warning".yellow().bold(),
            plan.degraded_groups
        );
    }
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_version(cli: &Cli) -> Result<()> {
    if cli.use_json() {
        output_json(
            cli,
            &serde_json::json!({
                "version": build_info::VERSION,
            }),
        );
    } else {
        println!("tt {}", build_info::VERSION);
    }
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_completions(_cli: &Cli, args: &cli::CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "tt", &mut io::stdout());
    Ok(())
}

// === Utility Functions ===

fn output_json<T: Serialize>(cli: &Cli, data: &T) {
    let json = if cli.use_compact_json() {
        serde_json::to_string(data).unwrap()
    } else {
        serde_json::to_string_pretty(data).unwrap()
    };
    println!("{json}");
}

fn output_error(cli: &Cli, error: &TtError) {
    if cli.use_json() {
        let json = serde_json::json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        });
        eprintln!("{}", serde_json::to_string_pretty(&json).unwrap());
    } else {
        eprintln!("{}: {}", "Error".red().bold(), error);
        if let Some(suggestion) = error.suggestion() {
            eprintln!("{}: {}", "Hint".yellow(), suggestion);
        }
    }
}
