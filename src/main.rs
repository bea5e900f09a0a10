//! Polycube Matching Game
//!
//! Shows a grid of random 3D block shapes; exactly two of them are the same
//! shape in different orientations. Find the pair before the timer runs out.

mod visualization;

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use polymatch::{build_round, grid, session_rng, survey, Game, GameConfig, MirrorPolicy};

/// Find the matching pair of 3D shapes before the clock runs out.
#[derive(Parser)]
#[command(name = "polymatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for the session RNG (random if omitted).
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of shapes per round.
    #[arg(long, global = true, default_value_t = polymatch::config::SHAPE_COUNT)]
    shapes: usize,

    /// Number of walk segments per shape.
    #[arg(long, global = true, default_value_t = polymatch::shape::SEGMENT_COUNT)]
    segments: usize,

    /// How mirror images are treated when filling a round.
    #[arg(long, global = true, value_enum, default_value_t = Mirrors::Distinct)]
    mirrors: Mirrors,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mirrors {
    /// Mirror images are different shapes.
    Distinct,
    /// Never put a shape and its mirror image in one round.
    Avoid,
}

impl From<Mirrors> for MirrorPolicy {
    fn from(mirrors: Mirrors) -> Self {
        match mirrors {
            Mirrors::Distinct => MirrorPolicy::Distinct,
            Mirrors::Avoid => MirrorPolicy::Avoid,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Play the game in an interactive 3D window.
    Play {
        /// Total play time in seconds.
        #[arg(long, default_value_t = 120.0)]
        play_time: f32,
    },
    /// Build one round and print its shapes.
    Round {
        /// Mark the matching pair.
        #[arg(long)]
        reveal: bool,
    },
    /// Sample the shape generator and print statistics.
    Survey {
        /// Number of walks to sample.
        #[arg(long, default_value_t = 10_000)]
        samples: usize,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("polymatch=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = GameConfig::default();
    config.round.shape_count = cli.shapes;
    config.round.segment_count = cli.segments;
    config.round.mirror_policy = cli.mirrors.into();
    if let Some(Command::Play { play_time }) = cli.command {
        config.total_play_time = play_time;
    }
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    let (mut rng, seed) = session_rng(cli.seed);
    info!(seed, "session started");

    match cli.command {
        Some(Command::Round { reveal }) => {
            let round = build_round(&mut rng, &config.round);
            print!("{}", grid::format_round(&round, reveal));
        }
        Some(Command::Survey { samples }) => {
            let report = survey::run(&mut rng, config.round.segment_count, samples);
            print!("{}", report);
        }
        Some(Command::Play { .. }) | None => {
            println!("Controls: Space start, 1-{} select, Escape quit", config.round.shape_count);
            visualization::play(Game::new(config, rng));
        }
    }

    ExitCode::SUCCESS
}
