
use std::cmp::Ordering;
use std::collections::VecDeque;

use tracing::{debug, instrument, trace};

use crate::game::PayoffGame;
use crate::graph::{EdgeId, Game, Player, VertexId};
use crate::index::IndexedVec;
use crate::number::{Number, Precision, Weight};
use crate::VertexMap;

/// Value of a small progress measure: a finite energy credit, or `Top` when no
/// credit is enough.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Measure<T> {
    Finite(T),
    Top,
}

impl<T: Number> Measure<T> {
    pub fn is_top(self) -> bool {
        self == Measure::Top
    }

    pub fn finite(self) -> Option<T> {
        match self {
            Measure::Finite(credit) => Some(credit),
            Measure::Top => None,
        }
    }

    fn compare(self, other: Self, precision: Precision) -> Ordering {
        match (self, other) {
            (Measure::Finite(a), Measure::Finite(b)) => a.compare(b, precision),
            (Measure::Finite(_), Measure::Top) => Ordering::Less,
            (Measure::Top, Measure::Finite(_)) => Ordering::Greater,
            (Measure::Top, Measure::Top) => Ordering::Equal,
        }
    }
}

/// Solves the energy game: the minimal initial credit with which Player-0 keeps
/// the accumulated weight non-negative forever, or `Top` where Player-1 wins.
#[instrument(skip_all, fields(vertices = game.graph.vertex_count()))]
pub fn solve<T: Weight>(game: &PayoffGame<'_, T>, precision: Precision) -> VertexMap<Measure<T>> {
    let bound = game.weights.sum_negative_weights();
    let measure = progress_measure(game.graph, |e| game.weight(e), bound, precision);
    game.graph.vertices().map(|v| (v, measure[v])).collect()
}

/// Least fixpoint of the lifting operator over the vertices of `game`, with
/// finite values capped at `bound`. Entries of vertices outside `game` stay zero.
pub(crate) fn progress_measure<G: Game, T: Number>(
    game: &G,
    weight: impl Fn(EdgeId) -> T,
    bound: T,
    precision: Precision,
) -> IndexedVec<VertexId, Measure<T>> {
    let size = game.graph().vertex_count();
    let mut measure = IndexedVec::filled(size, Measure::Finite(T::zero()));
    let mut queued = IndexedVec::filled(size, false);
    let mut queue = game.vertices().collect::<VecDeque<_>>();
    for &v in &queue {
        queued[v] = true;
    }

    let mut lifts = 0usize;
    while let Some(v) = queue.pop_front() {
        queued[v] = false;

        let lifted = lift(game, &measure, &weight, bound, precision, v);
        if lifted.compare(measure[v], precision) != Ordering::Greater {
            continue;
        }

        trace!(%v, ?lifted, "lift");
        measure[v] = lifted;
        lifts += 1;

        // Only predecessors can see the change.
        for u in game.incoming(v).map(|e| game.source(e)) {
            if !queued[u] && !measure[u].is_top() {
                queued[u] = true;
                queue.push_back(u);
            }
        }
    }

    debug!(lifts, "progress measure stable");
    measure
}

fn lift<G: Game, T: Number>(
    game: &G,
    measure: &IndexedVec<VertexId, Measure<T>>,
    weight: &impl Fn(EdgeId) -> T,
    bound: T,
    precision: Precision,
    v: VertexId,
) -> Measure<T> {
    let progs = game.outgoing(v).map(|e| prog(game, measure, weight, bound, precision, e));

    // Player-0 picks the cheapest edge, Player-1 the most expensive one.
    let best = match game.owner(v) {
        Player::P0 => progs.min_by(|a, b| a.compare(*b, precision)),
        Player::P1 => progs.max_by(|a, b| a.compare(*b, precision)),
    };
    best.unwrap_or(Measure::Top)
}

/// Credit needed at the source of `e` to move along it.
fn prog<G: Game, T: Number>(
    game: &G,
    measure: &IndexedVec<VertexId, Measure<T>>,
    weight: &impl Fn(EdgeId) -> T,
    bound: T,
    precision: Precision,
    e: EdgeId,
) -> Measure<T> {
    let credit = match measure[game.target(e)] {
        Measure::Finite(credit) => (credit - weight(e)).larger(T::zero()),
        Measure::Top => return Measure::Top,
    };
    match credit.compare(bound, precision) {
        Ordering::Greater => Measure::Top,
        _ => Measure::Finite(credit),
    }
}

/// The cheapest edge of every Player-0 vertex of `game` under a stable `measure`.
/// Where the measure is finite, always moving along these edges keeps the
/// accumulated weight above minus the credit.
pub(crate) fn cheapest_edges<G: Game, T: Number>(
    game: &G,
    measure: &IndexedVec<VertexId, Measure<T>>,
    weight: impl Fn(EdgeId) -> T,
    bound: T,
    precision: Precision,
) -> Vec<EdgeId> {
    let need = |e: EdgeId| prog(game, measure, &weight, bound, precision, e);
    game.owned_by(Player::P0)
        .filter_map(|v| game.outgoing(v).min_by(|&e, &f| need(e).compare(need(f), precision)))
        .collect()
}
