//! Equilibrium Solver Binary
//!
//! Reads a JSON game (or draws a random bimatrix game), runs one
//! algorithm and prints every equilibrium found.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use nashpivot::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON-serialized game; omit with --random
    #[arg(required_unless_present = "random")]
    game: Option<std::path::PathBuf>,
    #[arg(short, long, value_enum, default_value_t = Algorithm::LemkeHowson)]
    algorithm: Algorithm,
    #[arg(short, long, value_enum, default_value_t = Mode::Exact)]
    mode: Mode,
    #[arg(short, long, value_enum, default_value_t = Resolve::Dense)]
    resolve: Resolve,
    /// Lemke-Howson starting label, 1-based; every label if omitted
    #[arg(short, long)]
    label: Option<usize>,
    /// Initial subdivision grid size
    #[arg(long, default_value_t = SUBDIVISION_GRID)]
    grid: usize,
    /// Subdivision grid doublings before giving up
    #[arg(long, default_value_t = SUBDIVISION_REFINEMENTS)]
    refinements: usize,
    /// Accepted subdivision regret on payoffs scaled to [0, 1]
    #[arg(long, default_value_t = SUBDIVISION_TOLERANCE)]
    tolerance: f64,
    /// Solve a random two-player game instead of reading one
    #[arg(long)]
    random: bool,
    /// Print solutions as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn game(&self) -> anyhow::Result<Game> {
        match &self.game {
            _ if self.random => Ok(Game::from(NormalFormGame::random())),
            None => anyhow::bail!("no game given"),
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("read {}", path.display()))?;
                let game = serde_json::from_str::<Game>(&text)
                    .with_context(|| format!("parse {}", path.display()))?;
                game.validate().context("validate game")?;
                Ok(game)
            }
        }
    }
    fn config(&self) -> anyhow::Result<Config> {
        let label = match self.label {
            Some(0) => anyhow::bail!("labels start at 1"),
            Some(label) => Some(label - 1),
            None => None,
        };
        Ok(Config {
            mode: self.mode,
            resolve: self.resolve,
            label,
            grid: self.grid,
            refinements: self.refinements,
            tolerance: self.tolerance,
            ..Config::default()
        })
    }
}

fn main() -> anyhow::Result<()> {
    log()?;
    let args = Args::parse();
    let game = args.game()?;
    let config = args.config()?;
    if args.random {
        println!("{}", game);
    }
    let solutions = args
        .algorithm
        .run(&game, &config)
        .with_context(|| format!("{} failed", args.algorithm))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&solutions)?);
        return Ok(());
    }
    let header = format!("{} equilibria ({})", solutions.len(), args.algorithm);
    match solutions.is_empty() {
        true => println!("{}", header.red()),
        false => println!("{}", header.green().bold()),
    }
    print!("{}", solutions);
    Ok(())
}
