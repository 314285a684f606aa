use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use slider_search::render::{render_grid, render_report};
use slider_search::{load_from_file, Outcome, Puzzle, SearchConfig, Solver, Strategy};

#[derive(Parser)]
#[command(name = "slider-search")]
#[command(version)]
#[command(about = "Solve sliding-tile puzzles with BFS, DFS or bidirectional BFS")]
struct Cli {
    /// Grid file: size on the first line, then tab-separated rows, `*` for the blank
    #[arg(required_unless_present = "random")]
    file: Option<PathBuf>,

    /// Solve a random solvable grid of this size instead of reading a file
    #[arg(long, conflicts_with = "file")]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Search strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::Bds)]
    strategy: StrategyArg,

    /// Abort a search after this many expansions
    #[arg(long, env = "SLIDER_MAX_EXPANSIONS")]
    max_expansions: Option<usize>,

    /// Print every intermediate grid of the solution
    #[arg(long)]
    replay: bool,

    /// Disable terminal colors
    #[arg(long)]
    no_color: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Bfs,
    Dfs,
    Bds,
    All,
}

impl StrategyArg {
    fn strategies(self) -> Vec<Strategy> {
        match self {
            StrategyArg::Bfs => vec![Strategy::Bfs],
            StrategyArg::Dfs => vec![Strategy::Dfs],
            StrategyArg::Bds => vec![Strategy::Bds],
            StrategyArg::All => Strategy::ALL.to_vec(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    let puzzle = match (&cli.file, cli.random) {
        (Some(path), _) => load_from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        (None, Some(size)) => {
            if size == 0 {
                bail!("--random needs a size of at least 1");
            }
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Puzzle::shuffled(size, &mut rng)
        }
        (None, None) => bail!("either a grid file or --random is required"),
    };

    let color = !cli.no_color;
    println!("Start grid:\n{}", render_grid(&puzzle, None, color));
    if !puzzle.is_solvable() {
        warn!("permutation parity says this grid cannot reach the goal");
    }

    let mut config = SearchConfig::default();
    if let Some(limit) = cli.max_expansions {
        config = config.with_max_expansions(limit);
    }
    let mut solver = Solver::new(config);

    for strategy in cli.strategy.strategies() {
        let report = solver.run(strategy, &puzzle)?;
        println!("{}", render_report(&report));

        if let Outcome::Solved(moves) = &report.outcome {
            let end = puzzle
                .apply_moves(moves)
                .context("solution does not replay")?;
            if !end.is_goal() {
                bail!("{strategy} returned a path that does not end at the goal");
            }
            if cli.replay {
                replay(&puzzle, moves, color)?;
            }
        }
    }

    info!("done");
    Ok(())
}

fn replay(start: &Puzzle, moves: &[String], color: bool) -> Result<()> {
    let mut current = start.clone();
    for (step, mv) in moves.iter().enumerate() {
        let label: u32 = mv.parse().with_context(|| format!("bad move {mv:?}"))?;
        current = current
            .slide(label)
            .with_context(|| format!("tile {label} cannot slide at step {}", step + 1))?;
        println!("{}. {}\n{}", step + 1, label, render_grid(&current, Some(label), color));
    }
    Ok(())
}
