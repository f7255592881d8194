
use indexmap::IndexSet;
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::error::{Error, Result};
use crate::graph::{EdgeId, Game, VertexId};
use crate::index::{AsIndex, IndexedVec};

/// The edge chosen at a vertex, together with its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub edge: EdgeId,
    pub target: VertexId,
}

/// A positional strategy profile: one chosen edge per vertex, whoever owns it.
/// Following the choices from any vertex describes a functional graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrategyVector {
    moves: IndexedVec<VertexId, Option<Move>>,
}

impl StrategyVector {
    /// Every vertex takes its first outgoing edge.
    pub fn first_successors(game: &impl Game) -> Self {
        Self::choose_with(game, |game, v| game.outgoing(v).next())
    }

    /// Every vertex takes a uniformly random outgoing edge.
    pub fn randomize(game: &impl Game, rng: &mut impl Rng) -> Self {
        Self::choose_with(game, |game, v| game.outgoing(v).choose(rng))
    }

    fn choose_with<G: Game>(
        game: &G,
        mut choose: impl FnMut(&G, VertexId) -> Option<EdgeId>,
    ) -> Self {
        let mut moves = IndexedVec::filled(game.graph().vertex_count(), None);
        for v in game.vertices() {
            moves[v] = choose(game, v).map(|edge| Move { edge, target: game.target(edge) });
        }
        Self { moves }
    }

    /// Points `v` at `target` through the first edge between them.
    pub fn set_successor(
        &mut self,
        game: &impl Game,
        v: VertexId,
        target: VertexId,
    ) -> Result<()> {
        let edge =
            game.edge_between(v, target).ok_or(Error::NoSuchEdge { from: v, to: target })?;
        self.set_edge(game, edge);
        Ok(())
    }

    /// Makes `edge` the choice of its source vertex.
    pub fn set_edge(&mut self, game: &impl Game, edge: EdgeId) {
        let source = game.source(edge);
        if self.moves.len() <= source.to_usize() {
            self.moves.resize(source.to_usize() + 1, None);
        }
        self.moves[source] = Some(Move { edge, target: game.target(edge) });
    }

    pub fn get(&self, v: VertexId) -> Option<Move> {
        self.moves.get(v).copied().flatten()
    }

    /// The chosen move at `v`. Panics if `v` has no choice.
    pub fn choice(&self, v: VertexId) -> Move {
        match self.get(v) {
            Some(m) => m,
            None => panic!("vertex {v} has no move in this strategy"),
        }
    }

    pub fn successor(&self, v: VertexId) -> VertexId {
        self.choice(v).target
    }

    pub fn edge(&self, v: VertexId) -> EdgeId {
        self.choice(v).edge
    }

    /// The vertices with a move, in increasing order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.moves.enumerate().filter(|(_, m)| m.is_some()).map(|(v, _)| v)
    }

    /// Follows the moves from `start` until a vertex repeats. Returns the distinct
    /// vertices in visitation order, `start` included, and the first repeated one.
    pub fn extract_path(&self, start: VertexId) -> (Vec<VertexId>, VertexId) {
        let (seen, recurring) = self.walk(start);
        (seen.into_iter().collect(), recurring)
    }

    /// The cycle eventually reached from `start`, beginning at its entry vertex.
    /// The closing vertex is not repeated, so a self-loop gives `[v]`.
    pub fn extract_cycle(&self, start: VertexId) -> Vec<VertexId> {
        let (seen, recurring) = self.walk(start);
        let entry = seen.get_index_of(&recurring).unwrap_or(0);
        seen[entry..].iter().copied().collect()
    }

    fn walk(&self, start: VertexId) -> (IndexSet<VertexId>, VertexId) {
        let (mut curr, mut seen) = (start, IndexSet::new());
        while seen.insert(curr) {
            curr = self.successor(curr);
        }
        (seen, curr)
    }
}
