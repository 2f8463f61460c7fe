#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! CLI for replaying mailbox scripts

use clap::{Parser, Subcommand};
use mailtree::{Delivery, Directory, DirectoryConfig, Message, Outcome, Script};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mailtree-cli")]
#[command(about = "Replay mailbox scripts against an in-memory mail directory")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Register the script's mailboxes and run its steps
    Run {
        /// Path to the JSON script
        script: PathBuf,
    },

    /// Parse and validate a script without running it
    Check {
        /// Path to the JSON script
        script: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match &args.command {
        Command::Run { script } => cmd_run(&args, script)?,
        Command::Check { script } => cmd_check(&args, script)?,
    }

    Ok(())
}

fn cmd_run(args: &Args, path: &Path) -> anyhow::Result<()> {
    let script = Script::load(path)?;
    script.validate()?;

    let config = DirectoryConfig::from_env()?;
    let mut directory = Directory::with_config(config);
    let outcomes = script.run(&mut directory)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        for (i, outcome) in outcomes.iter().enumerate() {
            print_outcome(i + 1, outcome);
        }
    }

    Ok(())
}

fn cmd_check(args: &Args, path: &Path) -> anyhow::Result<()> {
    let script = Script::load(path)?;
    script.validate()?;

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "mailboxes": script.mailboxes.len(),
                "steps": script.steps.len(),
            })
        );
    } else {
        println!(
            "OK: {} mailbox(es), {} step(s)",
            script.mailboxes.len(),
            script.steps.len()
        );
    }

    Ok(())
}

fn print_outcome(step: usize, outcome: &Outcome) {
    match outcome {
        Outcome::Sent { from, to, delivery } => match delivery {
            Delivery::Delivered => println!("[{step}] sent {from} -> {to}"),
            Delivery::UnknownRecipient(address) => {
                println!("[{step}] sent {from} -> {to} (unknown recipient {address})");
            }
        },
        Outcome::FolderCreated { address, path } => {
            println!("[{step}] {address}: folder {path}");
        }
        Outcome::Moved { address, from, to } => {
            println!("[{step}] {address}: moved {from} -> {to}");
        }
        Outcome::Messages {
            address,
            path,
            messages,
        } => {
            println!("[{step}] {address}: {path}");
            print_message_table(messages);
        }
        Outcome::SearchResults {
            address,
            criterion,
            value,
            messages,
        } => {
            println!("[{step}] {address}: search {criterion} {value:?}");
            print_message_table(messages);
        }
        Outcome::Folders { address, paths } => {
            println!("[{step}] {address}: folders");
            for path in paths {
                println!("  {path}");
            }
        }
        Outcome::Failed { error, .. } => println!("[{step}] failed: {error}"),
    }
}

fn print_message_table(messages: &[Message]) {
    if messages.is_empty() {
        println!("  No messages found.");
        return;
    }

    println!("  {:<4} {:<28} {:<28} {}", "#", "From", "To", "Subject");
    println!("  {}", "-".repeat(96));

    for (i, message) in messages.iter().enumerate() {
        println!(
            "  {:<4} {:<28} {:<28} {}",
            i,
            truncate(message.sender(), 26),
            truncate(message.recipient(), 26),
            truncate(message.subject(), 36),
        );
    }

    println!("  {} message(s)", messages.len());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
