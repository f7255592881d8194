pub mod energy;
pub mod error;
pub mod game;
pub mod graph;
pub mod index;
pub mod mean_payoff;
pub mod number;
mod policy;
pub mod ratio;
mod search;
pub mod strategy;
pub mod weights;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
pub use game::{PayoffGame, RatioGame};
pub use graph::{Edge, EdgeId, Game, GameGraph, GameView, Player, VertexId};
pub use number::{Bracket, Field, Fraction, Number, Precision, Weight};
pub use strategy::{Move, StrategyVector};
pub use weights::{DoubleWeights, SingleWeights};

pub type Set<T> = indexmap::IndexSet<T, rustc_hash::FxBuildHasher>;
pub type Map<K, V> = rustc_hash::FxHashMap<K, V>;
/// Per-vertex result of a solver.
pub type VertexMap<T> = Map<VertexId, T>;
