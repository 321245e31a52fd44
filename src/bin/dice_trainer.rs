//! Trains the dice learner for a number of games and prints each result.

use clap::Parser;
use colored::Colorize;

use dice_bandit::{GameConfig, GameResult, Trainer};

#[derive(Parser, Debug)]
#[command(author, version, about = "Dice game simulation", long_about = None)]
struct Args {
    /// Number of sides on each die
    #[arg(short = 's', long = "sides")]
    num_sides: u32,

    /// Maximum number of dice to choose from
    #[arg(short = 'd', long = "max-dice")]
    max_dice: u32,

    /// Low winning score (inclusive)
    #[arg(short = 'L', long = "low")]
    low_score: u32,

    /// High winning score (inclusive)
    #[arg(short = 'H', long = "high")]
    high_score: u32,

    /// Number of games to train against
    #[arg(short = 'g', long = "games")]
    num_games: usize,

    /// Exploration parameter
    #[arg(short = 'm', long = "exploration")]
    exploration_param: f64,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose mode
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(args) {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(2);
    }
}

fn run(args: Args) -> dice_bandit::Result<()> {
    let config = GameConfig::default()
        .with_num_sides(args.num_sides)
        .with_max_dice(args.max_dice)
        .with_score_range(args.low_score, args.high_score)
        .with_exploration_param(args.exploration_param);
    config.validate()?;
    if args.num_games < 1 {
        return Err(dice_bandit::DiceError::InvalidConfiguration(
            "number of games must be at least 1".to_string(),
        ));
    }

    if args.verbose {
        println!("{}", "\nChosen settings:".magenta());
        println!("Number of sides on each die: {}", config.num_sides);
        println!("Maximum number of dice: {}", config.max_dice);
        println!("Low winning score: {}", config.low_score);
        println!("High winning score: {}", config.high_score);
        println!("Number of games: {}", args.num_games);
        println!("Exploration parameter: {}", config.exploration_param);
        if let Some(seed) = args.seed {
            println!("Seed: {}", seed);
        }
    }

    let mut trainer = match args.seed {
        Some(seed) => Trainer::with_seed(config, seed)?,
        None => Trainer::new(config)?,
    };

    let verbose = args.verbose;
    trainer.train_with(args.num_games, |i, summary, learner| {
        println!("{}", format!("\nPlaying game #{}:", i).magenta());
        for turn in &summary.rolls {
            let faces: Vec<String> = turn.roll.dice.iter().map(|d| d.to_string()).collect();
            println!(
                "{}",
                format!(
                    "\n{} rolls {} dice ({}) for a score of {}",
                    turn.player,
                    turn.roll.dice.len(),
                    faces.join(", "),
                    turn.roll.total
                )
                .cyan()
            );
            println!(
                "{}",
                format!("Scores: A = {}, B = {}", turn.score_a, turn.score_b).cyan()
            );
        }

        let label = summary.outcome.to_string();
        match summary.outcome.result {
            GameResult::Wins => println!("\n{}", label.green()),
            GameResult::Loses => println!("\n{}", label.yellow()),
        }

        if verbose {
            println!();
            println!("{}", learner.table().summary().magenta());
        }
    })?;

    println!("\n{}", trainer.statistics().summary());
    Ok(())
}
