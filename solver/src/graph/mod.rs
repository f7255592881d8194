mod view;

#[cfg(test)]
mod test;

use crate::error::{Error, Result};
use crate::index::{new_index, AsIndex, IndexedVec};

pub use view::GameView;

new_index!(pub index VertexId = "v");
new_index!(pub index EdgeId = "e");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    P0,
    P1,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::P0 => Player::P1,
            Player::P1 => Player::P0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub source: VertexId,
    pub target: VertexId,
}

/// Read access shared by the full graph and its views. Every solver is written
/// against this trait.
pub trait Game {
    /// The arena every vertex and edge id refers to.
    fn graph(&self) -> &GameGraph;

    /// A view over exactly the vertices and edges of this game.
    fn view(&self) -> GameView<'_>;

    fn vertex_count(&self) -> usize;

    fn contains(&self, v: VertexId) -> bool;

    fn vertices(&self) -> impl Iterator<Item = VertexId>;

    fn owner(&self, v: VertexId) -> Player;

    fn outgoing(&self, v: VertexId) -> impl Iterator<Item = EdgeId>;

    fn incoming(&self, v: VertexId) -> impl Iterator<Item = EdgeId>;

    fn source(&self, e: EdgeId) -> VertexId {
        self.graph().edges[e].source
    }

    fn target(&self, e: EdgeId) -> VertexId {
        self.graph().edges[e].target
    }

    fn edges(&self) -> impl Iterator<Item = EdgeId> {
        self.vertices().flat_map(|v| self.outgoing(v))
    }

    fn successors(&self, v: VertexId) -> impl Iterator<Item = VertexId> {
        self.outgoing(v).map(|e| self.target(e))
    }

    fn owned_by(&self, player: Player) -> impl Iterator<Item = VertexId> {
        self.vertices().filter(move |&v| self.owner(v) == player)
    }

    /// The first edge from `source` to `target`, if any.
    fn edge_between(&self, source: VertexId, target: VertexId) -> Option<EdgeId> {
        self.outgoing(source).find(|&e| self.target(e) == target)
    }

    fn all_vertices_have_successor(&self) -> bool {
        self.dead_end().is_none()
    }

    fn dead_end(&self) -> Option<VertexId> {
        self.vertices().find(|&v| self.outgoing(v).next().is_none())
    }

    fn check_successors(&self) -> Result<()> {
        match self.dead_end() {
            Some(v) => Err(Error::DeadEnd(v)),
            None => Ok(()),
        }
    }
}

/// Arena owning every vertex and edge. Views only filter it.
#[derive(Clone, Debug, Default)]
pub struct GameGraph {
    owners: IndexedVec<VertexId, Player>,
    edges: IndexedVec<EdgeId, Edge>,
    outgoing: IndexedVec<VertexId, Vec<EdgeId>>,
    incoming: IndexedVec<VertexId, Vec<EdgeId>>,
}

impl GameGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, owner: Player) -> VertexId {
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        self.owners.push(owner)
    }

    pub fn add_edge(&mut self, source: VertexId, target: VertexId) -> Result<EdgeId> {
        let vertex_count = self.owners.len();
        for endpoint in [source, target] {
            if endpoint.to_usize() >= vertex_count {
                return Err(Error::DanglingEdge { endpoint: endpoint.to_usize(), vertex_count });
            }
        }

        let e = self.edges.push(Edge { source, target });
        self.outgoing[source].push(e);
        self.incoming[target].push(e);
        Ok(e)
    }

    pub fn edge(&self, e: EdgeId) -> Edge {
        self.edges[e]
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Every edge id of the arena, in insertion order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.indexes()
    }
}

impl Game for GameGraph {
    fn graph(&self) -> &GameGraph {
        self
    }

    fn view(&self) -> GameView<'_> {
        GameView::full(self)
    }

    fn vertex_count(&self) -> usize {
        self.owners.len()
    }

    fn contains(&self, v: VertexId) -> bool {
        v.to_usize() < self.owners.len()
    }

    fn vertices(&self) -> impl Iterator<Item = VertexId> {
        self.owners.indexes()
    }

    fn owner(&self, v: VertexId) -> Player {
        self.owners[v]
    }

    fn outgoing(&self, v: VertexId) -> impl Iterator<Item = EdgeId> {
        self.outgoing[v].iter().copied()
    }

    fn incoming(&self, v: VertexId) -> impl Iterator<Item = EdgeId> {
        self.incoming[v].iter().copied()
    }
}
