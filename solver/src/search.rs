//! Divide and conquer over the candidate values of a game: compare every vertex
//! against thresholds, fix the vertices that hit one, and recurse on the two
//! subgames strictly below and strictly above.
//!
//! Every oracle call also yields a positional choice for both players. Fixing the
//! choices of one player and solving what is left bounds the value from one side,
//! and once both bounds meet the value is known without narrowing any further.

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::energy::{cheapest_edges, progress_measure};
use crate::graph::{EdgeId, Game, GameView, Player, VertexId};
use crate::index::IndexedVec;
use crate::number::{Bracket, Number, Precision, Weight};
use crate::policy::{self, Objective};
use crate::strategy::StrategyVector;
use crate::VertexMap;

/// What an oracle learned about a subgame at one threshold.
pub(crate) struct Verdict {
    /// How the value of every vertex compares to the threshold.
    pub order: VertexMap<Ordering>,
    /// A choice at every vertex, for whichever player owns it.
    pub witness: StrategyVector,
}

/// Computes the value of every vertex of `game`, given that the values lie in
/// `[lo, hi]`, that a subgame on `n` vertices has values with denominators at most
/// `max_den(n)`, and an `oracle` comparing each vertex of a subgame against a
/// threshold.
///
/// The vertices strictly below (above) a threshold form a trap for the maximizer
/// (minimizer), so their values are the same in the induced subgame.
pub(crate) fn lattice_search<T, B, O>(
    objective: &B,
    game: &GameView<'_>,
    (lo, hi): (T::Value, T::Value),
    max_den: impl Fn(usize) -> T,
    oracle: O,
    precision: Precision,
) -> VertexMap<T::Value>
where
    T: Weight,
    B: Objective<Value = T::Value>,
    O: Fn(&GameView<'_>, T::Value) -> Verdict,
{
    let mut search = Search {
        objective,
        bracket: |lo, hi, n| T::bracket(lo, hi, max_den(n), precision),
        oracle,
        precision,
        bounds: IndexedVec::filled(game.graph().vertex_count(), (lo, hi)),
        values: VertexMap::default(),
    };
    search.run(game, lo, hi, 0);
    search.values
}

struct Search<'a, B: Objective, K, O> {
    objective: &'a B,
    bracket: K,
    oracle: O,
    precision: Precision,
    /// Lower and upper bound on the value of every vertex.
    bounds: IndexedVec<VertexId, (B::Value, B::Value)>,
    values: VertexMap<B::Value>,
}

impl<B, K, O> Search<'_, B, K, O>
where
    B: Objective,
    K: Fn(B::Value, B::Value, usize) -> Bracket<B::Value>,
    O: Fn(&GameView<'_>, B::Value) -> Verdict,
{
    fn run(&mut self, game: &GameView<'_>, lo: B::Value, hi: B::Value, depth: usize) {
        if game.vertex_count() == 0 {
            return;
        }

        if game.vertices().all(|v| self.is_pinned(v)) {
            trace!(depth, vertices = game.vertex_count(), "pinned");
            let bounds = &self.bounds;
            self.values.extend(game.vertices().map(|v| (v, bounds[v].1)));
            return;
        }

        let (a1, a2) = match (self.bracket)(lo, hi, game.vertex_count()) {
            Bracket::Resolved(value) => {
                trace!(depth, %value, vertices = game.vertex_count(), "resolved");
                self.values.extend(game.vertices().map(|v| (v, value)));
                return;
            }
            Bracket::Split(a1, a2) => (a1, a2),
        };

        let first = (self.oracle)(game, a1);
        self.tighten(game, &first.witness);
        let second = match a1 == a2 {
            true => None,
            false => {
                let verdict = (self.oracle)(game, a2);
                self.tighten(game, &verdict.witness);
                Some(verdict)
            }
        };
        let second = second.as_ref().unwrap_or(&first);

        let (mut below, mut above) = (Vec::new(), Vec::new());
        for v in game.vertices() {
            match (first.order[&v], second.order[&v]) {
                (Ordering::Equal, _) => {
                    self.values.insert(v, a1);
                }
                (_, Ordering::Equal) => {
                    self.values.insert(v, a2);
                }
                (Ordering::Less, Ordering::Less) => below.push(v),
                (Ordering::Greater, Ordering::Greater) => above.push(v),
                (c1, c2) => panic!("oracle disagreement at {v}: {c1:?} against {a1}, {c2:?} against {a2}"),
            }
        }

        debug!(depth, %lo, %hi, %a1, %a2, below = below.len(), above = above.len(), "split");

        let (below_lo, below_hi) = self.span(&below, lo, a1);
        let (above_lo, above_hi) = self.span(&above, a2, hi);
        self.run(&game.induced_subgraph(below), below_lo, below_hi, depth + 1);
        self.run(&game.induced_subgraph(above), above_lo, above_hi, depth + 1);
    }

    fn is_pinned(&self, v: VertexId) -> bool {
        let (lower, upper) = self.bounds[v];
        upper.compare(lower, self.precision) != Ordering::Greater
    }

    /// Bounds every vertex of `game` by what each player can enforce alone with
    /// its choices in `witness`.
    fn tighten(&mut self, game: &GameView<'_>, witness: &StrategyVector) {
        let fixed = |player| game.fixing(player, witness);
        let (upper, _) = policy::solve(self.objective, &fixed(Player::P0), self.precision);
        let (lower, _) = policy::solve(self.objective, &fixed(Player::P1), self.precision);

        for v in game.vertices() {
            let (lo, hi) = self.bounds[v];
            let lo = lower[v].map_or(lo, |label| label.gain.larger(lo));
            let hi = upper[v].map_or(hi, |label| label.gain.smaller(hi));
            self.bounds[v] = (lo, hi);
        }
    }

    /// Narrows `[lo, hi]` to the bounds of `vertices`.
    fn span(&self, vertices: &[VertexId], lo: B::Value, hi: B::Value) -> (B::Value, B::Value) {
        let lower = vertices.iter().map(|&v| self.bounds[v].0).reduce(|a, b| a.smaller(b));
        let upper = vertices.iter().map(|&v| self.bounds[v].1).reduce(|a, b| a.larger(b));
        (lower.map_or(lo, |l| l.larger(lo)), upper.map_or(hi, |u| u.smaller(hi)))
    }
}

/// Compares the value of every vertex of `game` against the threshold encoded in
/// `cost` by solving two energy games: Player-0 keeping `cost` non-negative on
/// `game` proves the value is at most the threshold, Player-1 keeping `-cost`
/// non-negative on the swapped game proves it is at least the threshold.
///
/// The witness takes the cheapest edge of each player in its own energy game.
pub(crate) fn energy_oracle<E: Number>(
    game: &GameView<'_>,
    cost: impl Fn(EdgeId) -> E,
    precision: Precision,
) -> Verdict {
    let negative_sum = |sign: E| {
        game.edges()
            .map(|e| sign * cost(e))
            .filter(|&c| c < E::zero())
            .fold(E::zero(), |sum, c| sum - c)
    };
    let gain = |e| -cost(e);

    let bound = negative_sum(E::from_i64(1));
    let at_most = progress_measure(game, &cost, bound, precision);
    let swapped = game.swapped(game.vertices());
    let swapped_bound = negative_sum(E::from_i64(-1));
    let at_least = progress_measure(&swapped, &gain, swapped_bound, precision);

    let mut witness = StrategyVector::first_successors(game);
    for e in cheapest_edges(game, &at_most, &cost, bound, precision) {
        witness.set_edge(game, e);
    }
    for e in cheapest_edges(&swapped, &at_least, &gain, swapped_bound, precision) {
        witness.set_edge(game, e);
    }

    let order = game
        .vertices()
        .map(|v| (v, classify(v, !at_most[v].is_top(), !at_least[v].is_top())))
        .collect();
    Verdict { order, witness }
}

fn classify(v: VertexId, at_most: bool, at_least: bool) -> Ordering {
    match (at_most, at_least) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => panic!("oracle disagreement at {v}: neither below nor above"),
    }
}
