use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use roster::{FileSource, Roster};
use session::SwipeSession;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use swipe::{
    ActionResult, DeckView, Navigator, NotificationSink, Point, Rejection, Release,
    ReplaySampler, Route, RngSampler, Severity, SwipeConfig, classify, hint_for,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Cast Swipe - swipe through casts from the terminal
#[derive(Parser)]
#[command(name = "cast-swipe")]
#[command(about = "Swipe deck for browsing casts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive swipe session
    Play {
        /// Roster JSON files, merged in order
        #[arg(long, required = true, num_args = 1..)]
        roster: Vec<PathBuf>,

        /// Seed for the match check (random and logged if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// JSON file overriding deck settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Never match, regardless of probabilities
        #[arg(long)]
        no_matches: bool,
    },

    /// Classify a drag release offset
    Classify {
        #[arg(long, allow_hyphen_values = true)]
        dx: f64,

        #[arg(long, allow_hyphen_values = true)]
        dy: f64,

        /// Release threshold in pixels
        #[arg(long, default_value = "100")]
        threshold: f64,
    },

    /// List the casts in one or more roster files
    Roster {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            roster,
            seed,
            config,
            no_matches,
        } => handle_play(roster, seed, config, no_matches).await?,
        Commands::Classify { dx, dy, threshold } => handle_classify(dx, dy, threshold),
        Commands::Roster { files } => handle_roster(&files)?,
    }

    Ok(())
}

/// Prints notifications as colored lines
struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, message: &str, severity: Severity) {
        let line = match severity {
            Severity::Info => message.blue(),
            Severity::Success => message.green().bold(),
            Severity::Warning => message.yellow(),
            Severity::Error => message.red().bold(),
        };
        println!("{} {}", "»".dimmed(), line);
    }
}

/// Prints the route instead of switching pages
struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: &Route) {
        println!("{} navigating to {}", "→".cyan(), route.as_str().bold());
    }
}

fn load_config(path: Option<&Path>) -> Result<SwipeConfig> {
    let Some(path) = path else {
        return Ok(SwipeConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: SwipeConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Handle the 'play' command
async fn handle_play(
    roster: Vec<PathBuf>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    no_matches: bool,
) -> Result<()> {
    let config = load_config(config.as_deref())?;
    let source = FileSource::new(roster);

    let mut builder = SwipeSession::builder(config)
        .with_notifier(Arc::new(ConsoleSink))
        .with_navigator(Arc::new(ConsoleNavigator));
    builder = if no_matches {
        builder.with_sampler(Box::new(ReplaySampler::default()))
    } else {
        let seed = seed.unwrap_or_else(rand::random::<u64>);
        info!("Match sampler seed: {}", seed);
        builder.with_sampler(Box::new(RngSampler::seeded(seed)))
    };

    let start = Instant::now();
    let mut session = builder.start(&source)?;
    println!("{} Deck ready in {:?}", "✓".green(), start.elapsed());
    print_help();
    print_view(&session.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = words.first() else {
            continue;
        };

        let outcome = match command {
            "like" | "l" => session.like().await.map(|_| ()),
            "skip" | "s" => session.skip().await.map(|_| ()),
            "super" | "u" => session.superlike().await.map(|_| ()),
            "rewind" | "r" => session.rewind().await.map(|_| ()),
            "drag" | "d" => drag(&mut session, &words[1..]).await,
            "boost" | "b" => {
                session.boost();
                Ok(())
            }
            "search" => {
                if session.leave_exhausted().await {
                    break;
                }
                println!("{}", "There are still casts to swipe".dimmed());
                Ok(())
            }
            "status" => Ok(()),
            "help" | "?" => {
                print_help();
                continue;
            }
            "quit" | "q" => break,
            other => {
                println!("{} unknown command '{}'", "✗".red(), other);
                continue;
            }
        };

        if let Err(rejection) = outcome {
            println!("{} {}", "✗".red(), rejection);
        }
        session.settle().await;
        print_view(&session.view());
    }

    session.shutdown().await;
    Ok(())
}

/// `drag <dx> <dy>`: a full pointer gesture on the top card
async fn drag(session: &mut SwipeSession, args: &[&str]) -> ActionResult<()> {
    let (Some(dx), Some(dy)) = (
        args.first().and_then(|v| v.parse::<f64>().ok()),
        args.get(1).and_then(|v| v.parse::<f64>().ok()),
    ) else {
        println!("{}", "usage: drag <dx> <dy>".dimmed());
        return Ok(());
    };

    let top = session
        .inspect(|stack| stack.top().map(|c| c.id))
        .await
        .ok_or(Rejection::Exhausted)?;
    session.pointer_down(top, Point::new(0.0, 0.0)).await?;

    if let Some(feedback) = session.pointer_move(Point::new(dx, dy)).await {
        match feedback.hint {
            Some(hint) => println!(
                "  {} {} ({:.0}%)",
                feedback.transform.to_css().dimmed(),
                hint.hint.label().bold(),
                hint.opacity * 100.0
            ),
            None => println!("  {}", feedback.transform.to_css().dimmed()),
        }
    }

    match session.pointer_up().await? {
        Release::Reset => println!("  {}", "card snaps back".dimmed()),
        Release::Advance(advance) => {
            println!("  {} {}", advance.exit_hint().label().bold(), advance.candidate.name)
        }
    }
    Ok(())
}

fn print_help() {
    println!(
        "{}",
        "commands: like, skip, super, rewind, drag <dx> <dy>, boost, search, status, quit".dimmed()
    );
}

fn print_view(view: &DeckView) {
    let badges = view.badges();
    println!(
        "{} {} left · refill in {}",
        "♥".red(),
        badges.remaining.to_string().bold(),
        badges.countdown
    );

    match view {
        DeckView::Stack { cards, .. } => {
            for (i, card) in cards.iter().enumerate() {
                let age = card.age.map(|a| format!(", {}", a)).unwrap_or_default();
                let verified = if card.verified { " ✓" } else { "" };
                let header = format!("{}{}{}", card.name, age, verified);
                let header = if i == 0 { header.bold().green() } else { header.dimmed() };
                let location = card.location.as_deref().unwrap_or("-");
                println!("  [{}] {} @ {} {}", card.id, header, location, card.tags.join(" · "));
                if i == 0 {
                    if let Some(intro) = &card.introduction {
                        println!("      {}", intro.italic());
                    }
                }
            }
        }
        DeckView::Upsell { title, message, .. } => {
            println!("  {}", title.yellow().bold());
            println!("  {}", message);
        }
        DeckView::Exhausted {
            title,
            message,
            action_label,
            ..
        } => {
            println!("  {}", title.bold());
            println!("  {}", message);
            println!("  {} (type 'search')", action_label.cyan());
        }
    }
}

/// Handle the 'classify' command
fn handle_classify(dx: f64, dy: f64, threshold: f64) {
    let outcome = classify(dx, dy, threshold);
    let config = SwipeConfig::default();
    println!("{} {:?}", "Outcome:".bold(), outcome);
    if let Some(direction) = outcome.direction() {
        println!("  exit: {}", direction.exit_transform());
    }
    if let Some(hint) = hint_for(dx, dy, config.hint_threshold, config.hint_full_opacity) {
        println!("  hint while dragging: {} ({:.0}%)", hint.hint.label(), hint.opacity * 100.0);
    }
}

/// Handle the 'roster' command
fn handle_roster(files: &[PathBuf]) -> Result<()> {
    let start = Instant::now();
    let roster = Roster::load_from_files(files).context("Failed to load roster")?;
    println!(
        "{} Loaded {} casts in {:?}",
        "✓".green(),
        roster.len(),
        start.elapsed()
    );

    for (i, cast) in roster.candidates().iter().enumerate() {
        println!(
            "{}. {} [{:?}, {:.0}/h] {}",
            (i + 1).to_string().green(),
            cast.name.bold(),
            cast.rank,
            cast.rank.hourly_rate(),
            cast.location().unwrap_or("-")
        );
    }
    Ok(())
}
