//! Monte-Carlo tree search agent: UCT selection over an index-based node arena,
//! with random playouts that can run on several threads at once.

use crate::agent::{Agent, candidate_moves};
use crate::board::Board;
use crate::config::MctsConfig;
use crate::constants::{PieceKind, Player, Winner};
use crate::r#move::Movement;
use crate::rules::{MoveFilter, get_winner, possible_moves};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use std::thread;

/// One position in the search tree.
#[derive(Debug, Clone)]
struct Node {
    board: Board,
    /// Side to move on `board`.
    player: Player,
    /// The movement that led here from the parent.
    movement: Option<Movement>,
    parent: Option<usize>,
    children: Vec<usize>,
    untried: Vec<Movement>,
    /// Decided outcome, `Winner::None` while the game goes on.
    winner: Winner,
    /// Reward collected for the player who moved into this node.
    wins: f64,
    visits: f64,
}

impl Node {
    fn new(board: Board, player: Player, movement: Option<Movement>, parent: Option<usize>) -> Self {
        let mut winner = get_winner(&board);
        let mut untried = Vec::new();
        if winner == Winner::None {
            untried = possible_moves(&board, player, MoveFilter::AvoidSelfCheck);
            // No way out of check (or no move at all) loses.
            if untried.is_empty() {
                winner = Winner::from(player.opponent());
            }
        }
        Self {
            board,
            player,
            movement,
            parent,
            children: Vec::new(),
            untried,
            winner,
            wins: 0.0,
            visits: 0.0,
        }
    }

    fn is_terminal(&self) -> bool {
        self.winner != Winner::None
    }
}

/// Flat node storage; nodes refer to each other by index.
#[derive(Debug, Default)]
struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    fn allocate(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn get(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    fn get_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.nodes[idx]
    }
}

/// Playout outcomes, summed over all threads of one simulation.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Tally {
    red: f64,
    black: f64,
    even: f64,
}

impl Tally {
    fn record(&mut self, winner: Winner) {
        match winner {
            Winner::Red => self.red += 1.0,
            Winner::Black => self.black += 1.0,
            Winner::Draw | Winner::None => self.even += 1.0,
        }
    }

    fn total(&self) -> f64 {
        self.red + self.black + self.even
    }

    /// A win is worth 1, a draw or undecided playout 0.5.
    fn reward_for(&self, player: Player) -> f64 {
        let wins = match player {
            Player::Red => self.red,
            Player::Black => self.black,
        };
        wins + 0.5 * self.even
    }
}

/// Plays random pseudo-legal moves until a general falls or `max_steps` plies pass.
pub fn random_playout<R: Rng + ?Sized>(board: &Board, player: Player, rng: &mut R, max_steps: usize) -> Winner {
    let mut board = board.clone();
    let mut player = player;
    for _ in 0..max_steps {
        let winner = get_winner(&board);
        if winner != Winner::None {
            return winner;
        }
        let moves = possible_moves(&board, player, MoveFilter::AllowSelfCheck);
        let Some(&mv) = moves.choose(rng) else {
            return Winner::from(player.opponent());
        };
        board.move_piece(mv);
        player = player.opponent();
    }
    get_winner(&board)
}

pub struct MctsAgent {
    config: MctsConfig,
    rng: StdRng,
}

impl MctsAgent {
    pub fn new(config: MctsConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy(config: MctsConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Chooses the most visited root move after `config.iterations` iterations.
    /// A move that captures the enemy general is played without searching.
    pub fn search(&mut self, board: &Board, player: Player) -> Option<Movement> {
        let candidates = candidate_moves(board, player);
        if let Some(&winning) = candidates.iter().find(|mv| captures_general(board, **mv)) {
            log::debug!("{player:?} captures the general with {winning}");
            return Some(winning);
        }

        let mut arena = Arena::default();
        let root = arena.allocate(Node::new(board.clone(), player, None, None));
        if arena.get(root).is_terminal() {
            // Lost or finished: any move will do.
            return candidates.choose(&mut self.rng).copied();
        }
        if candidates.len() == 1 {
            return candidates.first().copied();
        }

        self.run(&mut arena, root);

        let root_node = arena.get(root);
        let best = root_node
            .children
            .iter()
            .map(|&idx| arena.get(idx))
            .max_by(|a, b| a.visits.total_cmp(&b.visits));
        let Some(best) = best else {
            // No iteration ran, so the tree has no children to pick from.
            return candidates.choose(&mut self.rng).copied();
        };
        log::info!(
            "mcts {player:?}: {} iterations, {} nodes, best {} ({} visits, win rate {:.3})",
            self.config.iterations,
            arena.nodes.len(),
            best.movement.map(|m| m.to_string()).unwrap_or_default(),
            best.visits,
            best.wins / best.visits.max(1.0),
        );
        best.movement
    }

    fn run(&mut self, arena: &mut Arena, root: usize) {
        for iteration in 0..self.config.iterations {
            let leaf = self.select(arena, root);
            let tally = self.simulate(arena.get(leaf));
            backpropagate(arena, leaf, &tally);
            log::trace!(
                "iteration {iteration}: leaf depth {}, root visits {}",
                depth(arena, leaf),
                arena.get(root).visits
            );
        }
    }

    /// Descends by UCT until a node with untried moves (expanded here) or a terminal node.
    fn select(&mut self, arena: &mut Arena, root: usize) -> usize {
        let mut idx = root;
        loop {
            let node = arena.get(idx);
            if node.is_terminal() {
                return idx;
            }
            if !node.untried.is_empty() {
                return self.expand(arena, idx);
            }
            match best_child(arena, idx, self.config.exploration) {
                Some(child) => idx = child,
                None => return idx,
            }
        }
    }

    fn expand(&mut self, arena: &mut Arena, idx: usize) -> usize {
        let node = arena.get_mut(idx);
        let pick = self.rng.gen_range(0..node.untried.len());
        let mv = node.untried.swap_remove(pick);
        let mut board = node.board.clone();
        board.move_piece(mv);
        let child = Node::new(board, node.player.opponent(), Some(mv), Some(idx));
        let child_idx = arena.allocate(child);
        arena.get_mut(idx).children.push(child_idx);
        child_idx
    }

    /// Runs one random playout per thread from `node`, each thread on its own
    /// board copy with its own generator seeded from the agent's.
    fn simulate(&mut self, node: &Node) -> Tally {
        let threads = self.config.playout_threads.max(1);
        let mut tally = Tally::default();
        if node.is_terminal() {
            for _ in 0..threads {
                tally.record(node.winner);
            }
            return tally;
        }

        let max_steps = self.config.max_playout_steps;
        let seeds: Vec<u64> = (0..threads).map(|_| self.rng.next_u64()).collect();
        if threads == 1 {
            let mut rng = StdRng::seed_from_u64(seeds[0]);
            tally.record(random_playout(&node.board, node.player, &mut rng, max_steps));
            return tally;
        }

        let (board, player) = (&node.board, node.player);
        thread::scope(|scope| {
            let workers: Vec<_> = seeds
                .into_iter()
                .map(|seed| {
                    scope.spawn(move || {
                        let mut rng = StdRng::seed_from_u64(seed);
                        random_playout(board, player, &mut rng, max_steps)
                    })
                })
                .collect();
            for worker in workers {
                match worker.join() {
                    Ok(winner) => tally.record(winner),
                    Err(_) => log::warn!("playout thread panicked, result dropped"),
                }
            }
        });
        tally
    }
}

impl Agent for MctsAgent {
    fn make_move(&mut self, board: &Board, player: Player) -> Option<Movement> {
        self.search(board, player)
    }
}

fn captures_general(board: &Board, mv: Movement) -> bool {
    board.piece_at(mv.dest()).kind() == Some(PieceKind::General)
}

fn uct(child: &Node, parent_visits: f64, exploration: f64) -> f64 {
    let win_rate = if child.visits > 0.0 { child.wins / child.visits } else { 0.0 };
    win_rate + exploration * ((parent_visits + 1.0).ln() / (child.visits + 1e-4)).sqrt()
}

fn best_child(arena: &Arena, idx: usize, exploration: f64) -> Option<usize> {
    let parent_visits = arena.get(idx).visits;
    arena
        .get(idx)
        .children
        .iter()
        .copied()
        .max_by(|&a, &b| {
            uct(arena.get(a), parent_visits, exploration).total_cmp(&uct(arena.get(b), parent_visits, exploration))
        })
}

fn backpropagate(arena: &mut Arena, leaf: usize, tally: &Tally) {
    let mut current = Some(leaf);
    while let Some(idx) = current {
        let node = arena.get_mut(idx);
        node.visits += tally.total();
        node.wins += tally.reward_for(node.player.opponent());
        current = node.parent;
    }
}

fn depth(arena: &Arena, mut idx: usize) -> usize {
    let mut d = 0;
    while let Some(parent) = arena.get(idx).parent {
        idx = parent;
        d += 1;
    }
    d
}
