#[cfg(test)]
mod test;

use tracing::instrument;

use crate::game::PayoffGame;
use crate::graph::{EdgeId, Game};
use crate::number::{Number, Precision, Weight};
use crate::policy::{self, Objective};
use crate::search::{energy_oracle, lattice_search};
use crate::strategy::StrategyVector;
use crate::VertexMap;

impl<T: Weight> Objective for PayoffGame<'_, T> {
    type Value = T::Value;

    fn cycle_value(&self, cycle: &[EdgeId]) -> T::Value {
        let total = cycle.iter().fold(T::Value::zero(), |sum, &e| sum + self.weight(e).to_value());
        total / T::Value::from_i64(cycle.len() as i64)
    }

    fn reduced_cost(&self, edge: EdgeId, gain: T::Value) -> T::Value {
        self.weight(edge).to_value() - gain
    }
}

/// Mean-payoff value of every vertex, with a pair of optimal positional strategies
/// (Player-0 minimizing, Player-1 maximizing), computed by strategy improvement.
pub fn policy_iteration<T: Weight>(
    game: &PayoffGame<'_, T>,
    precision: Precision,
) -> (VertexMap<T::Value>, StrategyVector) {
    let (valuation, strategy) = policy::solve(game, game.graph, precision);
    (policy::gains(game.graph, &valuation), strategy)
}

/// Mean-payoff value of every vertex, by bisecting the candidate values with energy
/// games as the comparison oracle.
#[instrument(skip_all, fields(vertices = game.graph.vertex_count()))]
pub fn energy_reduction<T: Weight>(
    game: &PayoffGame<'_, T>,
    precision: Precision,
) -> VertexMap<T::Value> {
    let bound = game.weights.max_abs_value().to_value();
    lattice_search(
        game,
        &game.graph.view(),
        (-bound, bound),
        |n| T::from_i64(n as i64),
        |view, a| energy_oracle(view, |e| T::mean_payoff_cost(game.weight(e), a), precision),
        precision,
    )
}
