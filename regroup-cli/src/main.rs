use anyhow::{anyhow, Context, Error};
use clap::{Parser, Subcommand};
use regroup::{distinct_labelled_groups, group_scores, members_by_label, PairWeights};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod report;
mod roster;

use config::{config_path, read_config, RegroupConfig};
use report::{pretty, print_absent, print_assignment};
use roster::Roster;

const DEFAULT_ROSTER: &str = "roster.json";

/// Assign session groups of 3 or 4 while avoiding repeat pairings
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Config file [default: regroup.toml beside the roster, if present]
    #[clap(short = 'c', long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
struct AssignCommand {
    /// Roster file
    #[clap(default_value = DEFAULT_ROSTER)]
    roster: PathBuf,

    /// Random groupings to try per worker
    #[clap(short = 'n', long)]
    attempts: Option<u32>,

    /// Seed for a reproducible grouping
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// Independent searches to run in parallel
    #[clap(short = 'w', long)]
    workers: Option<usize>,

    /// Print the grouping without saving it
    #[clap(long)]
    dry_run: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Group everyone present for the next session and save it to the roster
    Assign(AssignCommand),

    /// Show how often each pair of participants has been grouped together
    Report {
        /// Roster file
        #[clap(default_value = DEFAULT_ROSTER)]
        roster: PathBuf,
    },

    /// Create a new roster
    Init {
        /// Roster file to create
        #[clap(short = 'r', long, default_value = DEFAULT_ROSTER)]
        roster: PathBuf,

        /// Participant names, numbered from 1 in the order given
        #[clap(required = true)]
        names: Vec<String>,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("REGROUP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(explicit: Option<&Path>, roster: &Path) -> Result<RegroupConfig, Error> {
    read_config(config_path(explicit, roster).as_deref())
}

fn assign(args: &Args, command: &AssignCommand) -> Result<(), Error> {
    let mut config = load_config(args.config.as_deref(), &command.roster)?;
    if let Some(attempts) = command.attempts {
        config.search.attempts = attempts;
    }
    if let Some(seed) = command.seed {
        config.search.seed = Some(seed);
    }
    if let Some(workers) = command.workers {
        config.search.workers = workers;
    }
    config.search.validate().context("Invalid settings")?;
    let marker = config.absent_marker.as_str();

    let mut roster = Roster::load(&command.roster)?;
    let session = roster.next_session(marker);
    let session_label = roster.sessions[session].label.clone();
    let (present, absent) = roster.attendance(session, marker);
    print_absent(&roster, &absent);

    if present.is_empty() {
        pretty("Skipped", &format!("nobody is present for {}", session_label));
        return Ok(());
    }

    let weights = PairWeights::build(&roster.history(marker));
    let found = config
        .search
        .search(&present, &weights)
        .with_context(|| format!("Failed to group {}", session_label))?;
    tracing::info!(
        score = found.score,
        attempts = found.attempts,
        "chose grouping"
    );

    let groups = distinct_labelled_groups(&found.partition, &config.search.group_names)?;
    let scores = group_scores(&found.partition, &weights);
    print_assignment(&roster, &session_label, &groups, &scores, found.score);

    if command.dry_run {
        pretty("Dry run", "roster not saved");
        return Ok(());
    }
    roster.record(session, &members_by_label(groups), marker);
    roster.save(&command.roster)?;
    pretty("Saved", &command.roster.to_string_lossy());
    Ok(())
}

fn report(args: &Args, roster_path: &Path) -> Result<(), Error> {
    let config = load_config(args.config.as_deref(), roster_path)?;
    let roster = Roster::load(roster_path)?;
    let weights = PairWeights::build(&roster.history(&config.absent_marker));
    pretty("Pairings", "times each pair has shared a group");
    print!("{}", report::pairing_matrix(&roster, &weights)?);
    Ok(())
}

fn init(roster_path: &Path, names: &[String]) -> Result<(), Error> {
    if roster_path.exists() {
        return Err(anyhow!("{} already exists", roster_path.to_string_lossy()));
    }
    let roster = Roster::new(names.iter().cloned());
    roster.save(roster_path)?;
    pretty(
        "Created",
        &format!(
            "{} with {} participants",
            roster_path.to_string_lossy(),
            roster.participants.len()
        ),
    );
    Ok(())
}

fn main() -> Result<(), Error> {
    init_tracing();
    let args = Args::parse();
    match &args.command {
        Command::Assign(command) => assign(&args, command)?,
        Command::Report { roster } => report(&args, roster)?,
        Command::Init { roster, names } => init(roster, names)?,
    }
    Ok(())
}
