use crate::error::{Error, Result};
use crate::graph::{EdgeId, Game, GameGraph, VertexId};
use crate::index::IndexedVec;
use crate::number::{Number, Weight};
use crate::weights::{DoubleWeights, SingleWeights};

/// A game graph with one weight per edge, solved as an energy game or as a
/// mean-payoff game.
#[derive(Clone, Copy, Debug)]
pub struct PayoffGame<'g, T> {
    pub graph: &'g GameGraph,
    pub weights: &'g SingleWeights<T>,
}

impl<'g, T: Weight> PayoffGame<'g, T> {
    /// Checks that every vertex can move and every edge is weighted.
    pub fn new(graph: &'g GameGraph, weights: &'g SingleWeights<T>) -> Result<Self> {
        graph.check_successors()?;
        if let Some(e) = graph.edge_ids().find(|&e| weights.get(e).is_none()) {
            return Err(Error::MissingWeight(e));
        }
        Ok(Self { graph, weights })
    }

    pub fn weight(&self, e: EdgeId) -> T {
        self.weights.weight(e)
    }
}

/// A game graph with a (numerator, denominator) weight pair per edge.
#[derive(Clone, Copy, Debug)]
pub struct RatioGame<'g, T> {
    pub graph: &'g GameGraph,
    pub weights: &'g DoubleWeights<T>,
}

impl<'g, T: Weight> RatioGame<'g, T> {
    /// Checks that every vertex can move, every edge is weighted, both weight
    /// components are non-negative and every cycle has a positive denominator.
    pub fn new(graph: &'g GameGraph, weights: &'g DoubleWeights<T>) -> Result<Self> {
        graph.check_successors()?;
        for e in graph.edge_ids() {
            let (w1, w2) = weights.get(e).ok_or(Error::MissingWeight(e))?;
            for (component, w) in [w1, w2].into_iter().enumerate() {
                if w < T::zero() {
                    return Err(Error::NegativeWeight { edge: e, component });
                }
            }
        }
        if let Some(v) = zero_denominator_cycle(graph, weights) {
            return Err(Error::ZeroDenominatorCycle(v));
        }
        Ok(Self { graph, weights })
    }

    pub fn weight(&self, e: EdgeId) -> (T, T) {
        self.weights.weight(e)
    }

    /// The smallest positive denominator weight.
    pub(crate) fn min_positive_denominator(&self) -> T {
        self.graph
            .edge_ids()
            .map(|e| self.weights.denominator(e))
            .filter(|&w2| w2 > T::zero())
            .reduce(|a, b| a.smaller(b))
            .unwrap_or_else(T::zero)
    }
}

/// Finds a vertex on a cycle made only of edges with a zero denominator weight.
fn zero_denominator_cycle<T: Number>(
    graph: &GameGraph,
    weights: &DoubleWeights<T>,
) -> Option<VertexId> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        Open,
        Done,
    }

    let zero_succs = move |v: VertexId| {
        graph
            .outgoing(v)
            .filter(move |&e| weights.denominator(e) == T::zero())
            .map(move |e| graph.target(e))
    };

    let mut marks = IndexedVec::filled(graph.vertex_count(), Mark::New);
    for root in graph.vertices() {
        if marks[root] != Mark::New {
            continue;
        }

        // Iterative depth first search; a back edge to an open vertex closes a cycle.
        marks[root] = Mark::Open;
        let mut stack = vec![(root, zero_succs(root).collect::<Vec<_>>())];
        while let Some((v, succs)) = stack.last_mut() {
            match succs.pop() {
                Some(w) if marks[w] == Mark::Open => return Some(w),
                Some(w) if marks[w] == Mark::New => {
                    marks[w] = Mark::Open;
                    stack.push((w, zero_succs(w).collect()));
                }
                Some(_) => {}
                None => {
                    marks[*v] = Mark::Done;
                    stack.pop();
                }
            }
        }
    }

    debug_assert!(marks.iter().all(|&m| m == Mark::Done));
    None
}
