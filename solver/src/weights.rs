use crate::error::{Error, Result};
use crate::graph::EdgeId;
use crate::index::{AsIndex, IndexedVec};
use crate::number::Number;

/// Running bounds of one weight component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

impl<T: Number> Range<T> {
    fn include(range: Option<Self>, w: T) -> Option<Self> {
        Some(match range {
            Some(Range { min, max }) => Range { min: min.smaller(w), max: max.larger(w) },
            None => Range { min: w, max: w },
        })
    }
}

/// The bounds solvers read off a weight function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aggregates<T> {
    /// Bounds per component. `None` until the first weight is added.
    pub ranges: [Option<Range<T>>; 2],
    /// Largest absolute value over every component.
    pub max_abs_value: T,
    /// Sum of the magnitudes of every negative weight, over every component.
    pub sum_negative_weights: T,
}

impl<T: Number> Aggregates<T> {
    fn empty() -> Self {
        Self { ranges: [None; 2], max_abs_value: T::zero(), sum_negative_weights: T::zero() }
    }

    fn include(&mut self, component: usize, w: T) {
        self.ranges[component] = Range::include(self.ranges[component], w);
        self.max_abs_value = self.max_abs_value.larger(w.magnitude());
        if w < T::zero() {
            self.sum_negative_weights = self.sum_negative_weights + w.magnitude();
        }
    }
}

/// Edge weights of an energy or mean-payoff game.
#[derive(Clone, Debug)]
pub struct SingleWeights<T> {
    weights: IndexedVec<EdgeId, Option<T>>,
    /// Edges in insertion order, so that recomputed sums round the same way.
    order: Vec<EdgeId>,
    aggregates: Aggregates<T>,
}

impl<T: Number> Default for SingleWeights<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Number> SingleWeights<T> {
    pub fn new() -> Self {
        Self { weights: IndexedVec::new(), order: Vec::new(), aggregates: Aggregates::empty() }
    }

    pub fn add_weight(&mut self, edge: EdgeId, w: T) -> Result<()> {
        let slot = slot(&mut self.weights, edge)?;
        *slot = Some(w);
        self.order.push(edge);
        self.aggregates.include(0, w);
        Ok(())
    }

    pub fn get(&self, edge: EdgeId) -> Option<T> {
        self.weights.get(edge).copied().flatten()
    }

    /// The weight of `edge`. Panics if it was never added; games check this on
    /// construction.
    pub fn weight(&self, edge: EdgeId) -> T {
        match self.get(edge) {
            Some(w) => w,
            None => panic!("edge {edge} has no weight"),
        }
    }

    pub fn min(&self) -> Option<T> {
        self.aggregates.ranges[0].map(|r| r.min)
    }

    pub fn max(&self) -> Option<T> {
        self.aggregates.ranges[0].map(|r| r.max)
    }

    pub fn max_abs_value(&self) -> T {
        self.aggregates.max_abs_value
    }

    pub fn sum_negative_weights(&self) -> T {
        self.aggregates.sum_negative_weights
    }

    /// The incrementally maintained aggregates.
    pub fn aggregates(&self) -> Aggregates<T> {
        self.aggregates
    }

    /// The aggregates recomputed from the stored weights, in insertion order.
    pub fn recompute_aggregates(&self) -> Aggregates<T> {
        let mut aggregates = Aggregates::empty();
        for &e in &self.order {
            aggregates.include(0, self.weight(e));
        }
        aggregates
    }
}

/// Numerator and denominator weights of a ratio game.
#[derive(Clone, Debug)]
pub struct DoubleWeights<T> {
    weights: IndexedVec<EdgeId, Option<(T, T)>>,
    order: Vec<EdgeId>,
    aggregates: Aggregates<T>,
}

impl<T: Number> Default for DoubleWeights<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Number> DoubleWeights<T> {
    pub fn new() -> Self {
        Self { weights: IndexedVec::new(), order: Vec::new(), aggregates: Aggregates::empty() }
    }

    pub fn add_weight(&mut self, edge: EdgeId, w1: T, w2: T) -> Result<()> {
        let slot = slot(&mut self.weights, edge)?;
        *slot = Some((w1, w2));
        self.order.push(edge);
        self.aggregates.include(0, w1);
        self.aggregates.include(1, w2);
        Ok(())
    }

    pub fn get(&self, edge: EdgeId) -> Option<(T, T)> {
        self.weights.get(edge).copied().flatten()
    }

    /// Both weights of `edge`. Panics if they were never added.
    pub fn weight(&self, edge: EdgeId) -> (T, T) {
        match self.get(edge) {
            Some(w) => w,
            None => panic!("edge {edge} has no weight"),
        }
    }

    pub fn numerator(&self, edge: EdgeId) -> T {
        self.weight(edge).0
    }

    pub fn denominator(&self, edge: EdgeId) -> T {
        self.weight(edge).1
    }

    pub fn range(&self, component: usize) -> Option<Range<T>> {
        self.aggregates.ranges[component]
    }

    pub fn max_abs_value(&self) -> T {
        self.aggregates.max_abs_value
    }

    pub fn sum_negative_weights(&self) -> T {
        self.aggregates.sum_negative_weights
    }

    pub fn aggregates(&self) -> Aggregates<T> {
        self.aggregates
    }

    pub fn recompute_aggregates(&self) -> Aggregates<T> {
        let mut aggregates = Aggregates::empty();
        for &e in &self.order {
            let (w1, w2) = self.weight(e);
            aggregates.include(0, w1);
            aggregates.include(1, w2);
        }
        aggregates
    }
}

fn slot<W>(weights: &mut IndexedVec<EdgeId, Option<W>>, edge: EdgeId) -> Result<&mut Option<W>> {
    if weights.len() <= edge.to_usize() {
        weights.resize_with(edge.to_usize() + 1, || None);
    }
    match &mut weights[edge] {
        Some(_) => Err(Error::DuplicateWeight(edge)),
        slot => Ok(slot),
    }
}
