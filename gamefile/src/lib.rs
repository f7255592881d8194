mod conv;
mod parser;
mod writer;

#[cfg(test)]
mod test;

use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use solver::{DoubleWeights, GameGraph, Player, SingleWeights, Weight};

pub use parser::{parse_payoff_game, parse_ratio_game};
pub use writer::{write_payoff_game, write_ratio_game};

#[derive(Debug)]
pub struct VertexRow {
    pub id: usize,
    pub player: Player,
}

#[derive(Debug)]
pub struct EdgeRow<W> {
    pub source: usize,
    pub target: usize,
    pub weight: W,
}

/// A parsed `payoff` file: one weight per edge.
#[derive(Debug)]
pub struct PayoffFile<T> {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub vertices: Vec<VertexRow>,
    pub edges: Vec<EdgeRow<T>>,
}

/// A parsed `ratio` file: a numerator and a denominator weight per edge.
#[derive(Debug)]
pub struct RatioFile<T> {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub vertices: Vec<VertexRow>,
    pub edges: Vec<EdgeRow<(T, T)>>,
}

pub fn read_payoff_game<T: Weight + FromStr>(
    path: impl AsRef<Path>,
) -> Result<(GameGraph, SingleWeights<T>)> {
    let source = read(path.as_ref())?;
    let file = parse_payoff_game(&source).map_err(syntax_error)?;
    file.build().with_context(|| format!("Invalid game in {}", path.as_ref().display()))
}

pub fn read_ratio_game<T: Weight + FromStr>(
    path: impl AsRef<Path>,
) -> Result<(GameGraph, DoubleWeights<T>)> {
    let source = read(path.as_ref())?;
    let file = parse_ratio_game(&source).map_err(syntax_error)?;
    file.build().with_context(|| format!("Invalid game in {}", path.as_ref().display()))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn syntax_error(errors: Vec<chumsky::error::Simple<char>>) -> anyhow::Error {
    let messages = errors.iter().map(|e| format!("{e} at {:?}", e.span())).collect::<Vec<_>>();
    anyhow!("Failed to parse game: {}", messages.join("; "))
}
