//! Self-play demo: a random player (Red) against the tree search (Black).

use engine::{Agent, Game, MctsAgent, MctsConfig, Player, RandomAgent, Winner};

const MAX_PLIES: usize = 400;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(0);
    log::info!("self-play with seed {seed}");

    let mut red = RandomAgent::with_seed(seed);
    let mut black = MctsAgent::new(
        MctsConfig {
            iterations: 300,
            playout_threads: 4,
            ..MctsConfig::default()
        },
        seed.wrapping_add(1),
    );

    let mut game = Game::new();
    println!("--- Xiangqi self-play ---");
    println!("{}", game.current_board());

    while game.winner() == Winner::None && game.moves_count() < MAX_PLIES {
        let player = game.current_player();
        let agent: &mut dyn Agent = match player {
            Player::Red => &mut red,
            Player::Black => &mut black,
        };
        let Some(mv) = agent.make_move(game.current_board(), player) else {
            println!("{player:?} has no move left.");
            break;
        };
        let captured = game.move_piece(mv);
        if captured.is_empty() {
            println!("{:>3}. {player:?} {mv}", game.moves_count());
        } else {
            println!("{:>3}. {player:?} {mv} takes {captured:?}", game.moves_count());
        }
        println!("{}", game.current_board());
    }

    match game.winner() {
        Winner::Red => println!("Red wins."),
        Winner::Black => println!("Black wins."),
        Winner::Draw | Winner::None => println!("No winner after {} moves.", game.moves_count()),
    }
}
