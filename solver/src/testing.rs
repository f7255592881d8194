//! Fixtures and brute force oracles shared by the solver tests.

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::{EdgeId, Game, GameGraph, Player, VertexId};
use crate::strategy::StrategyVector;
use crate::weights::{DoubleWeights, SingleWeights};
use crate::{Number, VertexMap};

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn payoff_game<T: Number>(
    owners: &[Player],
    edges: &[(usize, usize, T)],
) -> (GameGraph, SingleWeights<T>) {
    let mut graph = GameGraph::new();
    for &owner in owners {
        graph.add_vertex(owner);
    }
    let mut weights = SingleWeights::new();
    for &(u, v, w) in edges {
        let e = graph.add_edge(VertexId(u), VertexId(v)).unwrap();
        weights.add_weight(e, w).unwrap();
    }
    (graph, weights)
}

pub fn ratio_game<T: Number>(
    owners: &[Player],
    edges: &[(usize, usize, T, T)],
) -> (GameGraph, DoubleWeights<T>) {
    let mut graph = GameGraph::new();
    for &owner in owners {
        graph.add_vertex(owner);
    }
    let mut weights = DoubleWeights::new();
    for &(u, v, w1, w2) in edges {
        let e = graph.add_edge(VertexId(u), VertexId(v)).unwrap();
        weights.add_weight(e, w1, w2).unwrap();
    }
    (graph, weights)
}

fn random_shape(rng: &mut StdRng, vertices: usize) -> (Vec<Player>, Vec<(usize, usize)>) {
    let owners =
        (0..vertices).map(|_| if rng.gen_bool(0.5) { Player::P0 } else { Player::P1 }).collect();
    let edges = (0..vertices)
        .flat_map(|u| {
            let degree = rng.gen_range(1..=3);
            (0..degree).map(|_| (u, rng.gen_range(0..vertices))).collect::<Vec<_>>()
        })
        .collect();
    (owners, edges)
}

/// Small random games with integer weights in `-max..=max`, every vertex having
/// between one and three successors.
pub fn random_payoff_games(seed: u64, count: usize, max: i64) -> Vec<(GameGraph, SingleWeights<i64>)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let vertices = rng.gen_range(1..=5);
            let (owners, shape) = random_shape(&mut rng, vertices);
            let edges = shape
                .into_iter()
                .map(|(u, v)| (u, v, rng.gen_range(-max..=max)))
                .collect::<Vec<_>>();
            payoff_game(&owners, &edges)
        })
        .collect()
}

/// Small random ratio games with numerators in `0..=max` and denominators in
/// `1..=max`.
pub fn random_ratio_games(seed: u64, count: usize, max: i64) -> Vec<(GameGraph, DoubleWeights<i64>)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let vertices = rng.gen_range(1..=5);
            let (owners, shape) = random_shape(&mut rng, vertices);
            let edges = shape
                .into_iter()
                .map(|(u, v)| (u, v, rng.gen_range(0..=max), rng.gen_range(1..=max)))
                .collect::<Vec<_>>();
            ratio_game(&owners, &edges)
        })
        .collect()
}

/// Every positional strategy of `player`, as one edge per owned vertex.
fn strategies(graph: &GameGraph, player: Player) -> Vec<Vec<EdgeId>> {
    let choices =
        graph.owned_by(player).map(|v| graph.outgoing(v).collect::<Vec<_>>()).collect::<Vec<_>>();
    match choices.is_empty() {
        true => vec![Vec::new()],
        false => choices.into_iter().multi_cartesian_product().collect(),
    }
}

/// Enumerates every pair of positional strategies and returns, for each vertex,
/// the minimum over Player-0 strategies of the maximum over Player-1 strategies of
/// `outcome` applied to the edges of the cycle the play ends in.
pub fn brute_force<V: Number>(
    graph: &GameGraph,
    outcome: impl Fn(&[EdgeId]) -> V,
) -> VertexMap<V> {
    let p0_strategies = strategies(graph, Player::P0);
    let p1_strategies = strategies(graph, Player::P1);

    let mut values = VertexMap::default();
    for v in graph.vertices() {
        let value = p0_strategies
            .iter()
            .map(|sigma| {
                p1_strategies
                    .iter()
                    .map(|tau| {
                        let mut strategy = StrategyVector::default();
                        for &e in sigma.iter().chain(tau) {
                            strategy.set_edge(graph, e);
                        }
                        let cycle = strategy
                            .extract_cycle(v)
                            .into_iter()
                            .map(|u| strategy.edge(u))
                            .collect::<Vec<_>>();
                        outcome(&cycle)
                    })
                    .reduce(|a, b| a.larger(b))
                    .unwrap()
            })
            .reduce(|a, b| a.smaller(b))
            .unwrap();
        values.insert(v, value);
    }
    values
}
