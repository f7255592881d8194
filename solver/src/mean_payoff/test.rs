use crate::game::PayoffGame;
use crate::graph::{Game, GameGraph, Player, VertexId};
use crate::number::{Fraction, Number, Precision};
use crate::testing::{brute_force, init_logging, payoff_game, random_payoff_games};
use crate::weights::SingleWeights;

use super::{energy_reduction, policy_iteration};

use Player::{P0, P1};

fn four_cycle<T: Number>(weight: impl Fn(i64) -> T) -> (GameGraph, SingleWeights<T>) {
    // u -> v -> w -> x -> v
    let edges = [(0, 1, 1), (1, 2, 2), (2, 3, 3), (3, 1, 4)].map(|(s, t, w)| (s, t, weight(w)));
    payoff_game(&[P1; 4], &edges)
}

fn to_real(graph: &GameGraph, weights: &SingleWeights<i64>) -> SingleWeights<f64> {
    let mut real = SingleWeights::new();
    for e in graph.edge_ids() {
        real.add_weight(e, weights.weight(e) as f64 / 2.0).unwrap();
    }
    real
}

#[test]
fn four_cycle_has_value_three() {
    init_logging();
    let (graph, weights) = four_cycle(|w| w);
    let game = PayoffGame::new(&graph, &weights).unwrap();

    let (values, strategy) = policy_iteration(&game, Precision::default());
    let reduced = energy_reduction(&game, Precision::default());

    for v in graph.vertices() {
        assert_eq!(values[&v], Fraction::from_int(3), "vertex {v}");
        assert_eq!(reduced[&v], Fraction::from_int(3), "vertex {v}");
    }
    assert_eq!(strategy.extract_cycle(VertexId(0)), vec![VertexId(1), VertexId(2), VertexId(3)]);
}

#[test]
fn four_cycle_with_real_weights() {
    let (graph, weights) = four_cycle(|w| w as f64);
    let game = PayoffGame::new(&graph, &weights).unwrap();
    let precision = Precision::default();

    let (values, _) = policy_iteration(&game, precision);
    let reduced = energy_reduction(&game, precision);

    for v in graph.vertices() {
        assert!((values[&v] - 3.0).abs() < 1e-9, "vertex {v}: {}", values[&v]);
        assert!((reduced[&v] - 3.0).abs() < 1e-9, "vertex {v}: {}", reduced[&v]);
    }
}

#[test]
fn parallel_self_loops_follow_the_owner() {
    let (graph, weights) = payoff_game(&[P0, P1], &[(0, 0, 5), (0, 0, 1), (1, 1, 1), (1, 1, 5)]);
    let game = PayoffGame::new(&graph, &weights).unwrap();

    let (values, strategy) = policy_iteration(&game, Precision::default());
    assert_eq!(values[&VertexId(0)], Fraction::from_int(1));
    assert_eq!(values[&VertexId(1)], Fraction::from_int(5));
    assert_eq!(weights.weight(strategy.edge(VertexId(0))), 1);
    assert_eq!(weights.weight(strategy.edge(VertexId(1))), 5);

    assert_eq!(energy_reduction(&game, Precision::default()), values);
}

#[test]
fn minimizer_escapes_to_the_cheaper_cycle() {
    // 0 (P0) chooses between a loop of 4 and moving to 1 (P1), which picks between
    // a loop of -2 and going back to 0 with weight 6.
    let (graph, weights) =
        payoff_game(&[P0, P1], &[(0, 0, 4), (0, 1, 0), (1, 1, -2), (1, 0, 6)]);
    let game = PayoffGame::new(&graph, &weights).unwrap();

    let (values, _) = policy_iteration(&game, Precision::default());
    // Going to 1 lets Player-1 close 0 -> 1 -> 0 with mean 3, below the loop of 4.
    assert_eq!(values[&VertexId(0)], Fraction::from_int(3));
    assert_eq!(values[&VertexId(1)], Fraction::from_int(3));
    assert_eq!(energy_reduction(&game, Precision::default()), values);
}

#[test]
fn solvers_match_brute_force() {
    for (graph, weights) in random_payoff_games(3, 50, 5) {
        let game = PayoffGame::new(&graph, &weights).unwrap();

        let expected = brute_force(&graph, |cycle| {
            let total = cycle.iter().map(|&e| weights.weight(e) as i128).sum::<i128>();
            Fraction::new(total, cycle.len() as i128)
        });
        let (values, _) = policy_iteration(&game, Precision::default());
        let reduced = energy_reduction(&game, Precision::default());

        assert_eq!(values, expected, "policy iteration on {graph:?}");
        assert_eq!(reduced, expected, "energy reduction on {graph:?}");
    }
}

#[test]
fn optimal_strategies_realize_the_values() {
    for (graph, weights) in random_payoff_games(19, 30, 6) {
        let game = PayoffGame::new(&graph, &weights).unwrap();
        let (values, strategy) = policy_iteration(&game, Precision::default());

        for v in graph.vertices() {
            let cycle = strategy.extract_cycle(v);
            let total = cycle.iter().map(|&u| weights.weight(strategy.edge(u)) as i128).sum();
            assert_eq!(values[&v], Fraction::new(total, cycle.len() as i128), "vertex {v}");
        }
    }
}

#[test]
fn real_solvers_agree_within_precision() {
    let precision = Precision::default();
    for (graph, weights) in random_payoff_games(5, 10, 4) {
        let real = to_real(&graph, &weights);
        let game = PayoffGame::new(&graph, &real).unwrap();

        let (values, _) = policy_iteration(&game, precision);
        let reduced = energy_reduction(&game, precision);

        for v in graph.vertices() {
            assert!(
                (values[&v] - reduced[&v]).abs() < 1e-6,
                "vertex {v}: {} against {}",
                values[&v],
                reduced[&v]
            );
        }
    }
}

#[test]
fn solving_twice_gives_the_same_values() {
    for (graph, weights) in random_payoff_games(23, 10, 5) {
        let game = PayoffGame::new(&graph, &weights).unwrap();
        assert_eq!(policy_iteration(&game, Precision::default()), policy_iteration(&game, Precision::default()));
        assert_eq!(energy_reduction(&game, Precision::default()), energy_reduction(&game, Precision::default()));
    }
}
