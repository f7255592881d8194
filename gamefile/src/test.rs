use solver::energy::{self, Measure};
use solver::{
    ratio, DoubleWeights, EdgeId, Fraction, Game, GameGraph, PayoffGame, Player, Precision,
    RatioGame, SingleWeights, VertexId,
};

use crate::{
    parse_payoff_game, parse_ratio_game, read_payoff_game, read_ratio_game, write_payoff_game,
    write_ratio_game,
};

fn payoff_text<T: solver::Weight>(graph: &GameGraph, weights: &SingleWeights<T>) -> String {
    let game = PayoffGame::new(graph, weights).unwrap();
    let mut out = Vec::new();
    write_payoff_game(&mut out, &game).unwrap();
    String::from_utf8(out).unwrap()
}

fn ratio_text<T: solver::Weight>(graph: &GameGraph, weights: &DoubleWeights<T>) -> String {
    let game = RatioGame::new(graph, weights).unwrap();
    let mut out = Vec::new();
    write_ratio_game(&mut out, &game).unwrap();
    String::from_utf8(out).unwrap()
}

const BRIM_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/brim.payoff");
const BRIM: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/brim.payoff"));
const TWO_FIFTHS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/two_fifths.ratio");
const TWO_FIFTHS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/two_fifths.ratio"));

#[test]
fn integer_payoff_round_trip() {
    let source = BRIM;
    let (graph, weights) = parse_payoff_game::<i64>(source).unwrap().build().unwrap();

    assert_eq!(graph.vertex_count(), 5);
    assert_eq!(graph.edge_count(), 8);
    assert_eq!(graph.owner(VertexId(0)), Player::P1);
    assert_eq!(weights.weight(EdgeId(5)), -4);
    assert_eq!(payoff_text(&graph, &weights), source);
}

#[test]
fn real_payoff_round_trip() {
    let mut graph = GameGraph::new();
    let a = graph.add_vertex(Player::P0);
    let b = graph.add_vertex(Player::P1);
    let mut weights = SingleWeights::new();
    let samples = [0.1, -2.5e-7, 1e20, 1.0 / 3.0];
    for (i, &w) in samples.iter().enumerate() {
        let (s, t) = if i % 2 == 0 { (a, b) } else { (b, a) };
        let e = graph.add_edge(s, t).unwrap();
        weights.add_weight(e, w).unwrap();
    }

    let text = payoff_text(&graph, &weights);
    let (parsed_graph, parsed) = parse_payoff_game::<f64>(&text).unwrap().build().unwrap();

    for e in graph.edge_ids() {
        assert_eq!(parsed_graph.edge(e), graph.edge(e));
        assert_eq!(parsed.weight(e).to_bits(), weights.weight(e).to_bits());
    }
    assert_eq!(payoff_text(&parsed_graph, &parsed), text);
}

#[test]
fn parsed_games_can_be_solved() {
    let (graph, weights) = read_payoff_game::<i64>(BRIM_PATH).unwrap();
    let game = PayoffGame::new(&graph, &weights).unwrap();
    let measure = energy::solve(&game, Precision::default());
    assert_eq!(measure[&VertexId(2)], Measure::Finite(3));
    assert!(measure[&VertexId(3)].is_top());

    let (graph, weights) = read_ratio_game::<i64>(TWO_FIFTHS_PATH).unwrap();
    let game = RatioGame::new(&graph, &weights).unwrap();
    let (values, _) = ratio::policy_iteration(&game, Precision::default());
    assert!(values.values().all(|&value| value == Fraction::new(2, 5)));
}

#[test]
fn ratio_round_trip() {
    let source = TWO_FIFTHS;
    let (graph, weights) = parse_ratio_game::<i64>(source).unwrap().build().unwrap();

    assert_eq!(weights.weight(EdgeId(3)), (0, 4));
    assert_eq!(ratio_text(&graph, &weights), source);
}

#[test]
fn wrong_header_is_a_syntax_error() {
    let source = TWO_FIFTHS;
    assert!(parse_payoff_game::<i64>(source).is_err());
    assert!(parse_ratio_game::<i64>("ratio 1 1;\nv 0 2;\ne 0 0 1 1;\n").is_err());
    assert!(parse_payoff_game::<i64>("payoff 1 1;\nv 0 0;\ne 0 0 x;\n").is_err());
}

#[test]
fn inconsistent_files_are_rejected() {
    let wrong_count = parse_payoff_game::<i64>("payoff 1 2;\nv 0 0;\ne 0 0 1;\n").unwrap();
    let error = wrong_count.build().unwrap_err();
    assert!(error.to_string().contains("Wrong number of edges"), "{error}");

    let out_of_order = parse_payoff_game::<i64>("payoff 2 0;\nv 1 0;\nv 0 1;\n").unwrap();
    assert!(out_of_order.build().is_err());

    let dangling = parse_payoff_game::<i64>("payoff 1 1;\nv 0 0;\ne 0 3 1;\n").unwrap();
    let error = dangling.build().unwrap_err();
    assert_eq!(
        error.downcast_ref::<solver::Error>(),
        Some(&solver::Error::DanglingEdge { endpoint: 3, vertex_count: 1 })
    );
}

#[test]
fn missing_file_reports_the_path() {
    let error = read_payoff_game::<i64>("/nonexistent/game.payoff").unwrap_err();
    assert!(error.to_string().contains("/nonexistent/game.payoff"), "{error}");
}
