use either::Either::{Left, Right};

use crate::index::IndexedVec;
use crate::strategy::StrategyVector;
use crate::Set;

use super::{EdgeId, Game, GameGraph, Player, VertexId};

/// A read-only subgame of a [`GameGraph`]: a vertex filter over the shared arena,
/// optionally with the players exchanged and with vertices restricted to a single
/// chosen edge.
#[derive(Clone, Debug)]
pub struct GameView<'g> {
    graph: &'g GameGraph,
    members: IndexedVec<VertexId, bool>,
    vertices: Vec<VertexId>,
    swapped: bool,
    choice: Option<IndexedVec<VertexId, Option<EdgeId>>>,
    /// The player whose vertices `choice` restricts, or `None` for both.
    fixed: Option<Player>,
}

impl<'g> GameView<'g> {
    pub(super) fn full(graph: &'g GameGraph) -> Self {
        Self {
            graph,
            members: IndexedVec::filled(graph.vertex_count(), true),
            vertices: graph.vertices().collect(),
            swapped: false,
            choice: None,
            fixed: None,
        }
    }

    /// Keeps the vertices of `subset` that are in this view, and the edges between
    /// them.
    pub fn induced_subgraph(&self, subset: impl IntoIterator<Item = VertexId>) -> GameView<'g> {
        let mut members = IndexedVec::filled(self.graph.vertex_count(), false);
        for v in subset {
            if self.contains(v) {
                members[v] = true;
            }
        }
        let vertices = members.enumerate().filter(|(_, &m)| m).map(|(v, _)| v).collect();

        Self {
            graph: self.graph,
            members,
            vertices,
            swapped: self.swapped,
            choice: self.choice.clone(),
            fixed: self.fixed,
        }
    }

    /// Like [`GameView::induced_subgraph`], with the two players exchanged.
    pub fn swapped(&self, subset: impl IntoIterator<Item = VertexId>) -> GameView<'g> {
        let mut view = self.induced_subgraph(subset);
        view.swapped = !view.swapped;
        view
    }

    /// Restricts every vertex to the edge chosen for it by `strategy`.
    pub fn strategy_induced(&self, strategy: &StrategyVector) -> GameView<'g> {
        let choice = self
            .graph
            .vertices()
            .map(|v| match self.contains(v) {
                true => strategy.get(v).map(|m| m.edge).filter(|&e| self.has_edge(v, e)),
                false => None,
            })
            .collect();

        Self { choice: Some(choice), fixed: None, ..self.clone() }
    }

    /// Restricts the vertices of `player` to the edge chosen for them by
    /// `strategy`, leaving the opponent free to move.
    pub fn fixing(&self, player: Player, strategy: &StrategyVector) -> GameView<'g> {
        Self { fixed: Some(player), ..self.strategy_induced(strategy) }
    }

    pub fn is_swapped(&self) -> bool {
        self.swapped
    }

    fn has_edge(&self, v: VertexId, e: EdgeId) -> bool {
        self.outgoing(v).any(|f| f == e)
    }

    fn restricts(&self, v: VertexId) -> bool {
        self.fixed.map_or(true, |player| self.owner(v) == player)
    }

    fn allows(&self, e: EdgeId) -> bool {
        let edge = self.graph.edge(e);
        let chosen = match &self.choice {
            Some(choice) if self.restricts(edge.source) => choice[edge.source] == Some(e),
            _ => true,
        };
        chosen && self.members[edge.source] && self.members[edge.target]
    }
}

impl Game for GameView<'_> {
    fn graph(&self) -> &GameGraph {
        self.graph
    }

    fn view(&self) -> GameView<'_> {
        self.clone()
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn contains(&self, v: VertexId) -> bool {
        self.members.get(v).copied().unwrap_or(false)
    }

    fn vertices(&self) -> impl Iterator<Item = VertexId> {
        self.vertices.iter().copied()
    }

    fn owner(&self, v: VertexId) -> Player {
        match self.swapped {
            true => self.graph.owner(v).opponent(),
            false => self.graph.owner(v),
        }
    }

    fn outgoing(&self, v: VertexId) -> impl Iterator<Item = EdgeId> {
        match &self.choice {
            Some(choice) if self.restricts(v) => {
                Left(choice[v].into_iter().filter(|&e| self.allows(e)))
            }
            _ => Right(self.graph.outgoing(v).filter(|&e| self.allows(e))),
        }
    }

    fn incoming(&self, v: VertexId) -> impl Iterator<Item = EdgeId> {
        self.graph.incoming(v).filter(|&e| self.allows(e))
    }
}

/// Two views are equal when they describe the same subgame of the same arena:
/// same vertices, same owners and same edges.
impl PartialEq for GameView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph)
            && self.vertices == other.vertices
            && self.vertices().all(|v| self.owner(v) == other.owner(v))
            && self.edges().collect::<Set<_>>() == other.edges().collect::<Set<_>>()
    }
}
