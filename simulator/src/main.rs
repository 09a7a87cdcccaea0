use anyhow::Context;
use clap::Parser;
use dicebattle_execution::{GameError, GameRng};
use dicebattle_simulator::{
    Config, GameTable, MockLineAuth, SessionError, SessionStore, ValidatedConfig,
};
use dicebattle_types::casino::{Bet, GameResultRecord, GameType, Player, RankInfo};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::{path::PathBuf, time::Duration};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// sicbo, chinchirorin, chohan or oddeven
    #[arg(short, long, default_value = "sicbo")]
    game: GameType,

    /// Side to bet on (not used by chinchirorin)
    #[arg(short, long)]
    bet: Option<Bet>,

    #[arg(short, long, default_value_t = 5)]
    rounds: u32,

    /// 32-byte hex seed, overrides the config
    #[arg(long)]
    seed: Option<String>,

    /// Session id mixed into seeded rolls
    #[arg(long, default_value_t = 0)]
    session: u64,

    /// Skip the roll animation delay
    #[arg(long)]
    no_delay: bool,

    /// Print a JSON summary instead of text
    #[arg(long)]
    json: bool,

    /// Display name for the mock LINE login
    #[arg(short, long, default_value = "LINE User")]
    name: String,
}

#[derive(Serialize)]
struct Summary<'a> {
    player: &'a Player,
    rank: RankInfo,
    position: Option<u32>,
    results: &'a [GameResultRecord],
}

fn load_config(args: &Args) -> anyhow::Result<ValidatedConfig> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(seed) = &args.seed {
        config.seed = Some(seed.clone());
    }
    config.validate().context("invalid config")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();
    let config = load_config(&args)?;

    // Create logger
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    // Sign in
    let mut store = SessionStore::with_sample_players();
    let player = store
        .sign_in(&mut MockLineAuth::new(args.name.clone()))
        .context("sign in failed")?;
    info!(player = %player.id, "starting session");

    // Prepare the table
    let delay = if args.no_delay {
        Duration::ZERO
    } else {
        config.roll_delays.delay(args.game)
    };
    let mut table = GameTable::with_delay(args.game, delay);
    if let Some(bet) = args.bet {
        table.select_bet(bet).context("invalid bet")?;
    }

    // Play
    let mut entropy = StdRng::from_entropy();
    for roll_number in 0..args.rounds {
        let result = match config.seed {
            Some(seed) => {
                let mut rng = GameRng::new(&seed, args.game, args.session, roll_number);
                table.roll(&mut store, &mut rng).await
            }
            None => table.roll(&mut store, &mut entropy).await,
        };
        match result {
            Ok(Some(record)) => {
                if !args.json {
                    println!(
                        "#{:<3} {:?} {:<18} {:>+4} {:?}",
                        roll_number + 1,
                        record.dice,
                        record.bet,
                        record.score,
                        record.outcome
                    );
                }
            }
            Ok(None) => break,
            Err(SessionError::Game(GameError::RollLimitReached(limit))) => {
                warn!(limit, "round over");
                break;
            }
            Err(err) => return Err(err).context("roll failed"),
        }
    }

    // Report
    let player = store
        .current_player()
        .context("player signed out mid-session")?;
    let rank = store.rank_info().context("missing rank")?;
    let position = store.current_position(config.leaderboard_limit);
    if args.json {
        let summary = Summary {
            player,
            rank,
            position,
            results: store.history(),
        };
        let output = serde_json::to_string_pretty(&summary).context("failed to encode summary")?;
        println!("{output}");
    } else {
        println!(
            "{} {}: total {} over {} matches, average {:.1}, win rate {:.1}%",
            rank.icon,
            player.name,
            player.total_score,
            player.matches_played,
            player.average_score,
            player.win_rate
        );
        println!(
            "rank {} (division {}), {:.0}% to next tier: {}",
            rank.tier,
            rank.division,
            rank.progress() * 100.0,
            rank.tier.description()
        );
        match position {
            Some(position) => println!("leaderboard position #{position}"),
            None => println!("outside the top {}", config.leaderboard_limit),
        }
    }

    Ok(())
}
