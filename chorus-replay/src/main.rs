//! chorus-replay - Replay an event log through the Chorus store

use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use libchorus::friend::{make_get_friends_with_age_limit, Friend, FriendProps};
use libchorus::logging;
use libchorus::{Action, ChorusError, ChorusService, Config, RootState};

#[derive(Parser, Debug)]
#[command(name = "chorus-replay")]
#[command(version, about = "Replay a JSON-lines event log through the Chorus store")]
#[command(long_about = r#"Replay a JSON-lines event log through the Chorus store.

Each non-empty line is one event, {"type": "...", "payload": ...}.
Lines starting with '#' are comments. Events are dispatched in order,
pending effects are awaited, then the final state is printed together
with the friends whose age is within --age-limit.

EXAMPLES:
    # Replay a file
    chorus-replay --input events.jsonl

    # Read from stdin, only show friends aged 25 or younger
    echo '{"type":"friend/addFriend","payload":{"id":1,"name":"a","age":10}}' \
        | chorus-replay --age-limit 25

    # JSON output for scripting
    chorus-replay --input events.jsonl --format json | jq '.friendsWithAgeLimit'

EXIT CODES:
    0 - Success
    3 - Invalid event (unparseable line or rejected by the store)
    1 - Other error (unreadable input, bad configuration, etc.)
"#)]
struct Cli {
    /// Event log to replay (reads from stdin if not provided)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Age limit of the friend view (defaults to the configured maximum)
    #[arg(short, long, value_name = "N")]
    age_limit: Option<u32>,

    /// Output format
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    #[arg(value_parser = ["text", "json"])]
    format: String,

    /// Reduce intents without running their effects
    #[arg(long)]
    no_effects: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Final output of a replay
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    events: usize,
    state: &'a RootState,
    age_limit: u32,
    friends_with_age_limit: Arc<Vec<Friend>>,
}

fn main() {
    let cli = Cli::parse();

    let mut log_config = logging::config_from_env();
    log_config.verbose = cli.verbose;
    // stderr writer cannot fail to open
    let _ = log_config.init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<ChorusError>()
        .map_or(1, ChorusError::exit_code)
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let age_limit = cli.age_limit.unwrap_or(config.friend.max_age_limit);

    let mut service = if cli.no_effects {
        ChorusService::without_effects(config)?
    } else {
        ChorusService::new(config)?
    };

    let reader: Box<dyn Read> = match cli.input {
        Some(ref path) => Box::new(
            std::fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?,
        ),
        None => Box::new(std::io::stdin()),
    };

    let events = replay(&mut service, BufReader::new(reader))?;
    service.settle()?;
    tracing::debug!(events, "Replay finished");

    let mut view = make_get_friends_with_age_limit();
    let report = Report {
        events,
        state: service.state(),
        age_limit,
        friends_with_age_limit: view.select(service.state(), &FriendProps { age_limit })?,
    };

    match cli.format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
        _ => print_text(&report)?,
    }
    Ok(())
}

/// Dispatch every event line; returns how many were dispatched
fn replay(service: &mut ChorusService, reader: impl BufRead) -> Result<usize> {
    let mut events = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_no = index + 1;
        let action: Action = line.parse().map_err(|e| at_line(line_no, e))?;
        tracing::debug!(line = line_no, ?action, "Dispatching");
        service.dispatch(action).map_err(|e| at_line(line_no, e))?;
        // Keep delayed actions in order with the events that follow
        service.pump().map_err(|e| at_line(line_no, e))?;
        events += 1;
    }
    Ok(events)
}

fn at_line(line_no: usize, error: ChorusError) -> ChorusError {
    match error {
        ChorusError::InvalidEvent(msg) => {
            ChorusError::InvalidEvent(format!("line {}: {}", line_no, msg))
        }
        other => other,
    }
}

fn print_text(report: &Report<'_>) -> Result<()> {
    let friend = report.state.friend()?;
    let timeline = report.state.timeline()?;

    println!("events: {}", report.events);
    println!();
    println!("friends: {} (show limit {})", friend.friends.len(), friend.show_limit);
    for f in friend.friends.iter() {
        println!("  #{} {} age {}", f.id, f.name, f.age);
    }
    println!(
        "friends with age <= {}: {}",
        report.age_limit,
        report.friends_with_age_limit.len()
    );
    for f in report.friends_with_age_limit.iter() {
        println!("  #{} {} age {}", f.id, f.name, f.age);
    }
    println!();
    println!("timelines: {}", timeline.timelines.len());
    for entry in timeline.timelines.iter() {
        println!("  #{} {} likes {}", entry.id, entry.desc, entry.like_count);
    }
    println!("loading: {}", timeline.is_loading);
    println!("error: {}", timeline.error.as_deref().unwrap_or("-"));
    println!("text: {}", timeline.text);
    Ok(())
}
