use crate::error::Error;
use crate::strategy::StrategyVector;
use crate::Set;

use super::{Game, GameGraph, GameView, Player, VertexId};

use Player::{P0, P1};

// 0 <-> 1 -> 2 -> 2, with a parallel edge 0 -> 1 and 2 -> 0.
fn sample() -> GameGraph {
    let mut graph = GameGraph::new();
    for owner in [P0, P1, P0] {
        graph.add_vertex(owner);
    }
    for (u, v) in [(0, 1), (0, 1), (1, 0), (1, 2), (2, 2), (2, 0)] {
        graph.add_edge(VertexId(u), VertexId(v)).unwrap();
    }
    graph
}

fn vertices(game: &impl Game) -> Vec<VertexId> {
    game.vertices().collect()
}

#[test]
fn dangling_edge_is_rejected() {
    let mut graph = sample();
    assert_eq!(
        graph.add_edge(VertexId(1), VertexId(3)),
        Err(Error::DanglingEdge { endpoint: 3, vertex_count: 3 })
    );
    assert_eq!(graph.edge_count(), 6);
}

#[test]
fn dead_end_is_reported() {
    let mut graph = sample();
    assert!(graph.all_vertices_have_successor());
    let lonely = graph.add_vertex(P1);
    assert_eq!(graph.check_successors(), Err(Error::DeadEnd(lonely)));
}

#[test]
fn parallel_edges_stay_distinct() {
    let graph = sample();
    let edges = graph.outgoing(VertexId(0)).collect::<Vec<_>>();
    assert_eq!(edges.len(), 2);
    assert_ne!(edges[0], edges[1]);
    assert_eq!(graph.edge_between(VertexId(0), VertexId(1)), Some(edges[0]));
    assert_eq!(graph.edge_between(VertexId(0), VertexId(2)), None);
    assert_eq!(graph.incoming(VertexId(1)).count(), 2);
}

#[test]
fn induced_subgraph_keeps_inner_edges() {
    let graph = sample();
    let view = graph.view().induced_subgraph([VertexId(2), VertexId(1)]);

    assert_eq!(vertices(&view), vec![VertexId(1), VertexId(2)]);
    assert_eq!(view.vertex_count(), 2);
    assert!(!view.contains(VertexId(0)));
    assert_eq!(view.successors(VertexId(1)).collect::<Vec<_>>(), vec![VertexId(2)]);
    assert_eq!(view.incoming(VertexId(2)).count(), 2);
    // Vertex 1 lost its only edge to 0, vertex 2 still loops.
    assert_eq!(view.dead_end(), None);

    let smaller = view.induced_subgraph([VertexId(1), VertexId(0)]);
    assert_eq!(vertices(&smaller), vec![VertexId(1)]);
    assert_eq!(smaller.dead_end(), Some(VertexId(1)));
}

#[test]
fn induced_on_every_vertex_is_the_full_view() {
    let graph = sample();
    let full = graph.view();
    assert_eq!(full.induced_subgraph(graph.vertices()), full);
    assert_eq!(full.edges().collect::<Set<_>>(), graph.edge_ids().collect::<Set<_>>());
}

#[test]
fn swapping_exchanges_owners() {
    let graph = sample();
    let full = graph.view();
    let swapped = full.swapped(graph.vertices());

    assert!(swapped.is_swapped());
    for v in graph.vertices() {
        assert_eq!(swapped.owner(v), graph.owner(v).opponent());
    }
    assert_ne!(swapped, full);
    assert_eq!(swapped.swapped(graph.vertices()), full);
    assert_eq!(swapped.owned_by(P0).collect::<Vec<_>>(), vec![VertexId(1)]);
}

#[test]
fn swapped_subset_keeps_the_swap_when_restricted() {
    let graph = sample();
    let view: GameView<'_> = graph.view().swapped([VertexId(0), VertexId(1)]);
    let inner = view.induced_subgraph([VertexId(0)]);

    assert!(inner.is_swapped());
    assert_eq!(inner.owner(VertexId(0)), P1);
    assert_eq!(inner.vertex_count(), 1);
}

#[test]
fn strategy_induced_view_has_one_edge_per_vertex() {
    let graph = sample();
    let mut strategy = StrategyVector::first_successors(&graph);
    strategy.set_successor(&graph, VertexId(2), VertexId(0)).unwrap();
    let view = graph.view().strategy_induced(&strategy);

    for v in graph.vertices() {
        let edges = view.outgoing(v).collect::<Vec<_>>();
        assert_eq!(edges, vec![strategy.edge(v)]);
    }
    assert_eq!(view.incoming(VertexId(0)).count(), 2);
    assert_eq!(view.incoming(VertexId(1)).count(), 1);
    assert_eq!(view.incoming(VertexId(2)).count(), 0);
}

#[test]
fn strategy_edges_outside_the_view_are_dropped() {
    let graph = sample();
    let strategy = StrategyVector::first_successors(&graph);
    let view = graph.view().induced_subgraph([VertexId(1), VertexId(2)]).strategy_induced(&strategy);

    // Vertex 1 chose the edge back to 0, which the view does not contain.
    assert_eq!(view.outgoing(VertexId(1)).count(), 0);
    assert_eq!(view.successors(VertexId(2)).collect::<Vec<_>>(), vec![VertexId(2)]);
}

#[test]
fn fixing_one_player_leaves_the_other_free() {
    let graph = sample();
    let strategy = StrategyVector::first_successors(&graph);
    let view = graph.view().fixing(P0, &strategy);

    assert_eq!(view.outgoing(VertexId(0)).collect::<Vec<_>>(), vec![strategy.edge(VertexId(0))]);
    assert_eq!(view.outgoing(VertexId(1)).count(), 2);
    assert_eq!(view.outgoing(VertexId(2)).collect::<Vec<_>>(), vec![strategy.edge(VertexId(2))]);
    assert_eq!(view.incoming(VertexId(0)).count(), 1);
    assert_eq!(view.incoming(VertexId(1)).count(), 1);

    // Vertex 1 belongs to Player-0 once the players are exchanged.
    let swapped = graph.view().swapped(graph.vertices()).fixing(P0, &strategy);
    assert_eq!(swapped.outgoing(VertexId(0)).count(), 2);
    assert_eq!(swapped.outgoing(VertexId(1)).collect::<Vec<_>>(), vec![strategy.edge(VertexId(1))]);
}
