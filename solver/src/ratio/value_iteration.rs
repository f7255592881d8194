use std::cmp::Ordering;

use tracing::{instrument, trace};

use crate::game::RatioGame;
use crate::graph::{EdgeId, Game, GameView, Player};
use crate::index::IndexedVec;
use crate::number::{Number, Precision, Weight};
use crate::search::{lattice_search, Verdict};
use crate::strategy::StrategyVector;
use crate::VertexMap;

/// Ratio value of every vertex, by bisecting the candidate values and deciding each
/// comparison with bounded value iteration (Zwick and Paterson) on the mean-payoff
/// game with weights `a * w2 - w1`.
#[instrument(skip_all, fields(vertices = game.graph.vertex_count()))]
pub fn value_iteration<T: Weight>(
    game: &RatioGame<'_, T>,
    precision: Precision,
) -> VertexMap<T::Value> {
    let horizon_precision = game.energy_precision(precision);
    let cost = |e: EdgeId, a: T::Value| {
        let (w1, w2) = game.weight(e);
        T::ratio_cost(w1, w2, a)
    };
    lattice_search(
        game,
        &game.graph.view(),
        game.value_bounds(),
        |n| game.max_denominator(n),
        |view, a| horizon_oracle::<T>(view, |e| cost(e, a), horizon_precision),
        precision,
    )
}

/// Player-0 maximizes `cost` over a growing horizon: a positive value means the
/// ratio is below the threshold, a negative one means it is above. The totals of
/// `k` rounds stay within `2nW'` of `k` times the value, so the rounds stop as soon
/// as every total is further than that from zero.
fn horizon_oracle<T: Weight>(
    game: &GameView<'_>,
    cost: impl Fn(EdgeId) -> T::Energy,
    precision: Precision,
) -> Verdict {
    let n = game.vertex_count();
    let max_cost =
        game.edges().map(|e| cost(e).magnitude()).fold(T::Energy::zero(), |a, b| a.larger(b));
    let margin = T::Energy::from_i64(2 * n as i64) * max_cost;
    let horizon = T::horizon(n, max_cost, precision);

    let size = game.graph().vertex_count();
    let mut totals = IndexedVec::filled(size, T::Energy::zero());
    let mut next = totals.clone();
    let mut witness = StrategyVector::first_successors(game);
    let mut rounds = 0;
    while rounds < horizon {
        for v in game.vertices() {
            let steps = game.outgoing(v).map(|e| (e, cost(e) + totals[game.target(e)]));
            let best = match game.owner(v) {
                Player::P0 => steps.reduce(|best, step| if step.1 > best.1 { step } else { best }),
                Player::P1 => steps.reduce(|best, step| if step.1 < best.1 { step } else { best }),
            };
            next[v] = match best {
                Some((e, total)) => {
                    witness.set_edge(game, e);
                    total
                }
                None => totals[v],
            };
        }
        std::mem::swap(&mut totals, &mut next);
        rounds += 1;

        if game.vertices().all(|v| totals[v].magnitude() > margin) {
            break;
        }
    }
    trace!(vertices = n, %max_cost, horizon, rounds, "value iteration");

    let order = game
        .vertices()
        .map(|v| {
            let total = totals[v];
            let sign = match total.magnitude() > margin {
                true if total > T::Energy::zero() => Ordering::Greater,
                true => Ordering::Less,
                false => T::horizon_sign(total, horizon, n, precision),
            };
            (v, sign.reverse())
        })
        .collect();
    Verdict { order, witness }
}
