use std::{io, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use hotseat_tictactoe::{
    config::Config,
    game::{play, Game},
    source::ScriptedSource,
    term::{Screen, Terminal},
    Players,
};
use log::warn;
use rand::{rngs::StdRng, SeedableRng};

/// Two-player tic-tac-toe at one keyboard
#[derive(Parser)]
#[command(name = "tictactoe")]
struct Cli {
    /// RON config file with players, seed and retry limit
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for the coin that picks the first player
    #[arg(short, long)]
    seed: Option<u64>,

    /// Play a fixed list of moves instead of reading the terminal, e.g. "11 22 13"
    #[arg(long, value_name = "LIST")]
    moves: Option<ScriptedSource>,

    /// Invalid moves allowed in a row before the game is abandoned
    #[arg(long)]
    max_retries: Option<u32>,

    /// Print the final result as RON
    #[arg(long)]
    ron: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(max_retries) = cli.max_retries {
        config.max_retries = max_retries;
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = io::stdin();
    let mut term = Terminal::new(stdin.lock(), io::stdout());

    let players = match (config.players(), &cli.moves) {
        (Some(players), _) => players,
        (None, Some(_)) => Players::default(),
        (None, None) => {
            let Some(players) = term.prompt_players()? else {
                anyhow::bail!("input closed before both players were set up");
            };
            players
        }
    };

    let game = Game::new(players);
    term.say("Initializing new Tic Tac Toe Game!\n")?;
    for (i, player) in game.players().iter().enumerate() {
        term.say(format!("Player {} is {player}", i + 1))?;
    }

    let game = game.start(&mut rng);
    term.say(format!("\n{} is first!", game.current_player()))?;

    let mut screen = Screen::new(io::stdout());
    let done = match cli.moves {
        Some(mut script) => {
            let done = play(game, &mut script, &mut screen, config.max_retries)?;
            if script.remaining() > 0 {
                warn!("game ended with {} scripted moves unused", script.remaining());
            }
            done
        }
        None => play(game, &mut term, &mut screen, config.max_retries)?,
    };
    let report = done.report();

    if cli.ron {
        println!("{}", report.to_ron().context("serializing result")?);
    } else {
        println!("\n{report}\n");
    }
    Ok(())
}
