use std::io::{self, Write};

use solver::index::AsIndex;
use solver::{Game, GameGraph, PayoffGame, Player, RatioGame, Weight};

fn write_vertices(out: &mut impl Write, graph: &GameGraph) -> io::Result<()> {
    for v in graph.vertices() {
        let player = match graph.owner(v) {
            Player::P0 => 0,
            Player::P1 => 1,
        };
        writeln!(out, "v {} {player};", v.to_usize())?;
    }
    Ok(())
}

/// Writes `game` in the `payoff` text format. Weights use their shortest
/// representation that parses back to the same value.
pub fn write_payoff_game<T: Weight>(out: &mut impl Write, game: &PayoffGame<'_, T>) -> io::Result<()> {
    let graph = game.graph;
    writeln!(out, "payoff {} {};", graph.vertex_count(), graph.edge_count())?;
    write_vertices(out, graph)?;
    for e in graph.edge_ids() {
        let edge = graph.edge(e);
        let w = game.weight(e);
        writeln!(out, "e {} {} {w};", edge.source.to_usize(), edge.target.to_usize())?;
    }
    Ok(())
}

/// Writes `game` in the `ratio` text format.
pub fn write_ratio_game<T: Weight>(out: &mut impl Write, game: &RatioGame<'_, T>) -> io::Result<()> {
    let graph = game.graph;
    writeln!(out, "ratio {} {};", graph.vertex_count(), graph.edge_count())?;
    write_vertices(out, graph)?;
    for e in graph.edge_ids() {
        let edge = graph.edge(e);
        let (w1, w2) = game.weight(e);
        writeln!(out, "e {} {} {w1} {w2};", edge.source.to_usize(), edge.target.to_usize())?;
    }
    Ok(())
}
