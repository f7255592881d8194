mod value_iteration;


use tracing::instrument;

use crate::game::RatioGame;
use crate::graph::{EdgeId, Game};
use crate::number::{Number, Precision, Weight};
use crate::policy::{self, Objective};
use crate::search::{energy_oracle, lattice_search};
use crate::strategy::StrategyVector;
use crate::VertexMap;

pub use value_iteration::value_iteration;

impl<T: Weight> Objective for RatioGame<'_, T> {
    type Value = T::Value;

    fn cycle_value(&self, cycle: &[EdgeId]) -> T::Value {
        let (num, den) = cycle.iter().fold((T::zero(), T::zero()), |(num, den), &e| {
            let (w1, w2) = self.weight(e);
            (num + w1, den + w2)
        });
        num.to_value() / den.to_value()
    }

    fn reduced_cost(&self, edge: EdgeId, gain: T::Value) -> T::Value {
        let (w1, w2) = self.weight(edge);
        w1.to_value() - gain * w2.to_value()
    }
}

impl<T: Weight> RatioGame<'_, T> {
    /// Every ratio lies between zero and `n * max(w1) / min(w2 > 0)`.
    fn value_bounds(&self) -> (T::Value, T::Value) {
        let max = self.weights.range(0).map_or(T::zero(), |range| range.max);
        let n = T::from_i64(self.graph.vertex_count() as i64);
        let hi = (n * max).to_value() / self.min_positive_denominator().to_value();
        (T::Value::zero(), hi)
    }

    /// Ratios of a subgame on `n` vertices have denominators up to `n * max(w2)`.
    fn max_denominator(&self, n: usize) -> T {
        let max = self.weights.range(1).map_or(T::zero(), |range| range.max);
        T::from_i64(n as i64) * max
    }

    /// Tolerance of the energy games, shrunk when denominators below one would
    /// magnify their error.
    fn energy_precision(&self, precision: Precision) -> Precision {
        precision.scaled(self.min_positive_denominator().to_f64().min(1.0))
    }
}

/// Ratio value of every vertex, with a pair of optimal positional strategies
/// (Player-0 minimizing, Player-1 maximizing), computed by strategy improvement.
pub fn policy_iteration<T: Weight>(
    game: &RatioGame<'_, T>,
    precision: Precision,
) -> (VertexMap<T::Value>, StrategyVector) {
    let (valuation, strategy) = policy::solve(game, game.graph, precision);
    (policy::gains(game.graph, &valuation), strategy)
}

/// Ratio value of every vertex, by bisecting the candidate values with energy games
/// over the weights `a * w2 - w1` as the comparison oracle.
#[instrument(skip_all, fields(vertices = game.graph.vertex_count()))]
pub fn energy_reduction<T: Weight>(
    game: &RatioGame<'_, T>,
    precision: Precision,
) -> VertexMap<T::Value> {
    let energy_precision = game.energy_precision(precision);
    let cost = |e: EdgeId, a: T::Value| {
        let (w1, w2) = game.weight(e);
        T::ratio_cost(w1, w2, a)
    };
    lattice_search(
        game,
        &game.graph.view(),
        game.value_bounds(),
        |n| game.max_denominator(n),
        |view, a| energy_oracle(view, |e| cost(e, a), energy_precision),
        precision,
    )
}
