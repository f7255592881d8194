//! Strategy improvement shared by the mean-payoff and ratio solvers.
//!
//! A joint strategy is valued by a gain (the value of the cycle each play ends in)
//! and a bias (the reduced cost accumulated until the cycle). Player-1 first plays
//! a best response by improving its own choices until stable, then Player-0 makes
//! one improvement step against that response. The loop ends once Player-0 cannot
//! improve either.

use std::cmp::Ordering;

use tracing::{debug, instrument, trace};

use crate::graph::{EdgeId, Game, Player, VertexId};
use crate::index::IndexedVec;
use crate::number::{Field, Number, Precision};
use crate::strategy::StrategyVector;
use crate::{Set, VertexMap};

/// What a play is worth: the value of a cycle and the reduced costs leading to it.
pub(crate) trait Objective {
    type Value: Field;

    fn cycle_value(&self, cycle: &[EdgeId]) -> Self::Value;

    /// Cost of taking `edge` in excess of the long-run gain.
    fn reduced_cost(&self, edge: EdgeId, gain: Self::Value) -> Self::Value;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Label<V> {
    pub gain: V,
    pub bias: V,
}

impl<V: Number> Label<V> {
    fn compare(self, other: Self, precision: Precision) -> Ordering {
        self.gain.compare(other.gain, precision).then(self.bias.compare(other.bias, precision))
    }
}

pub(crate) type Valuation<V> = IndexedVec<VertexId, Option<Label<V>>>;

/// Runs strategy improvement on `game` from the first-successor strategy. Returns
/// the final labels and the optimal strategy of both players.
#[instrument(skip_all, fields(vertices = game.vertex_count()))]
pub(crate) fn solve<O: Objective>(
    objective: &O,
    game: &impl Game,
    precision: Precision,
) -> (Valuation<O::Value>, StrategyVector) {
    let mut strategy = StrategyVector::first_successors(game);
    let mut valuation = IndexedVec::filled(game.graph().vertex_count(), None);

    let mut rounds = 0usize;
    loop {
        // Best response of Player-1 to the current choices of Player-0.
        loop {
            valuation = evaluate(objective, &strategy, game, &valuation);
            rounds += 1;
            if !improve(objective, game, Player::P1, &mut strategy, &valuation, precision) {
                break;
            }
        }

        if !improve(objective, game, Player::P0, &mut strategy, &valuation, precision) {
            break;
        }
    }

    debug!(rounds, "strategy improvement stable");
    (valuation, strategy)
}

/// Labels every vertex of `game` under `strategy`. Each cycle is anchored at its
/// smallest vertex, whose bias is carried over from `previous`.
fn evaluate<O: Objective>(
    objective: &O,
    strategy: &StrategyVector,
    game: &impl Game,
    previous: &Valuation<O::Value>,
) -> Valuation<O::Value> {
    let mut labels: Valuation<O::Value> = IndexedVec::filled(previous.len(), None);

    let settle = |labels: &mut Valuation<O::Value>, u: VertexId| {
        let next = strategy.successor(u);
        if let Some(Label { gain, bias }) = labels[next] {
            let bias = objective.reduced_cost(strategy.edge(u), gain) + bias;
            labels[u] = Some(Label { gain, bias });
        }
    };

    for start in game.vertices() {
        if labels[start].is_some() {
            continue;
        }

        let mut path = Set::default();
        let mut curr = start;
        while labels[curr].is_none() && path.insert(curr) {
            curr = strategy.successor(curr);
        }

        // Either the walk reached a labelled vertex or it closed a new cycle.
        let entry = path.get_index_of(&curr).filter(|_| labels[curr].is_none());
        let path = path.into_iter().collect::<Vec<_>>();
        let stem = match entry {
            Some(entry) => {
                let cycle = &path[entry..];
                let edges = cycle.iter().map(|&v| strategy.edge(v)).collect::<Vec<_>>();
                let gain = objective.cycle_value(&edges);

                let anchor = (0..cycle.len()).min_by_key(|&i| cycle[i]).unwrap_or(0);
                let bias = previous[cycle[anchor]].map_or(O::Value::zero(), |label| label.bias);
                labels[cycle[anchor]] = Some(Label { gain, bias });
                trace!(anchor = %cycle[anchor], %gain, len = cycle.len(), "cycle");

                for i in 1..cycle.len() {
                    settle(&mut labels, cycle[(anchor + cycle.len() - i) % cycle.len()]);
                }
                entry
            }
            None => path.len(),
        };

        for &u in path[..stem].iter().rev() {
            settle(&mut labels, u);
        }
    }

    labels
}

/// Switches vertices of `player` to their best successor when that is strictly
/// better than the current choice. Gain improvements take precedence: bias-only
/// switches are made only when no vertex can improve its gain. Returns whether
/// anything changed.
fn improve<O: Objective>(
    objective: &O,
    game: &impl Game,
    player: Player,
    strategy: &mut StrategyVector,
    valuation: &Valuation<O::Value>,
    precision: Precision,
) -> bool {
    let better = match player {
        Player::P0 => Ordering::Less,
        Player::P1 => Ordering::Greater,
    };
    let label = |v: VertexId| match valuation[v] {
        Some(label) => label,
        None => panic!("vertex {v} was not evaluated"),
    };

    let (mut gain_steps, mut bias_steps) = (Vec::new(), Vec::new());
    for v in game.owned_by(player) {
        let candidates = game.outgoing(v).map(|e| {
            let Label { gain, bias } = label(game.target(e));
            (e, Label { gain, bias: objective.reduced_cost(e, gain) + bias })
        });
        let best = candidates.reduce(|best, next| match next.1.compare(best.1, precision) {
            ord if ord == better => next,
            _ => best,
        });

        let Some((e, candidate)) = best else { continue };
        let current = label(v);
        match candidate.gain.compare(current.gain, precision) {
            ord if ord == better => gain_steps.push(e),
            Ordering::Equal if candidate.compare(current, precision) == better => {
                bias_steps.push(e)
            }
            _ => {}
        }
    }

    trace!(?player, gains = gain_steps.len(), biases = bias_steps.len(), "improve");
    let steps = match gain_steps.is_empty() {
        true => bias_steps,
        false => gain_steps,
    };
    for &e in &steps {
        strategy.set_edge(game, e);
    }
    !steps.is_empty()
}

/// The gain of every vertex of `game`.
pub(crate) fn gains<V: Number>(game: &impl Game, valuation: &Valuation<V>) -> VertexMap<V> {
    game.vertices().filter_map(|v| Some((v, valuation[v]?.gain))).collect()
}
