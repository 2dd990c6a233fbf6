//! Self-play demo: every game, AI against AI
//!
//! Runs one match per game with a hard first player and a normal second
//! player, logging moves and outcomes through `tracing`. Log verbosity
//! follows `RUST_LOG`; the default level is `info`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use parlor::engine::{match_result, Rules};
use parlor::error::EngineError;
use parlor::games::battleship::Battleship;
use parlor::games::checkers::Checkers;
use parlor::games::connect4::Connect4;
use parlor::games::dots_and_boxes::DotsAndBoxes;
use parlor::games::mancala::Mancala;
use parlor::games::omok::Omok;
use parlor::games::othello::Othello;
use parlor::search::{AiPlayer, Difficulty};
use parlor::types::Side;

const SEED: u64 = 2024;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    play("connect-four", &Connect4, 60);
    play("othello", &Othello, 140);
    play("omok", &Omok, 400);
    play("checkers", &Checkers, 200);
    play("mancala", &Mancala, 200);
    play("battleship", &Battleship::random(&mut StdRng::seed_from_u64(SEED)), 200);
    play("dots-and-boxes", &DotsAndBoxes, 60);
}

fn play<R: Rules>(name: &str, rules: &R, ply_cap: u32) {
    match run_match(rules, ply_cap) {
        Ok(state) => match match_result(rules, &state, Side::First) {
            Some(result) => info!(game = name, ?result, "match finished"),
            None => info!(game = name, "match stopped at the ply cap"),
        },
        Err(err) => error!(game = name, %err, "match aborted"),
    }
}

fn run_match<R: Rules>(rules: &R, ply_cap: u32) -> Result<R::State, EngineError> {
    let mut players = [
        AiPlayer::with_seed(Difficulty::Hard, SEED),
        AiPlayer::with_seed(Difficulty::Normal, SEED + 1),
    ];
    let mut state = rules.initial();
    let mut plies = 0;

    while rules.winner(&state).is_none() && plies < ply_cap {
        let side = rules.side_to_move(&state);
        let mv = players[side.index()].choose_move(rules, &state)?;
        state = rules.apply(&state, &mv)?;
        plies += 1;
    }
    info!(game = ?rules.kind(), plies, "self-play complete");
    Ok(state)
}
