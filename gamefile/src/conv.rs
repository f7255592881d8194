use anyhow::{bail, ensure, Context, Result};
use solver::{DoubleWeights, EdgeId, GameGraph, SingleWeights, VertexId, Weight};

use crate::{EdgeRow, PayoffFile, RatioFile, VertexRow};

impl<T: Weight> PayoffFile<T> {
    /// Rebuilds the graph and its weights. Vertex and edge ids follow the row order.
    pub fn build(&self) -> Result<(GameGraph, SingleWeights<T>)> {
        let mut graph = build_vertices(self.vertex_count, &self.vertices)?;
        let mut weights = SingleWeights::new();
        for (e, edge) in add_edges(&mut graph, self.edge_count, &self.edges)? {
            weights.add_weight(e, edge.weight)?;
        }
        Ok((graph, weights))
    }
}

impl<T: Weight> RatioFile<T> {
    /// Rebuilds the graph and both weight components. Vertex and edge ids follow the
    /// row order.
    pub fn build(&self) -> Result<(GameGraph, DoubleWeights<T>)> {
        let mut graph = build_vertices(self.vertex_count, &self.vertices)?;
        let mut weights = DoubleWeights::new();
        for (e, edge) in add_edges(&mut graph, self.edge_count, &self.edges)? {
            let (w1, w2) = edge.weight;
            weights.add_weight(e, w1, w2)?;
        }
        Ok((graph, weights))
    }
}

fn build_vertices(vertex_count: usize, rows: &[VertexRow]) -> Result<GameGraph> {
    ensure!(
        rows.len() == vertex_count,
        "Wrong number of vertices: got {}, expected {vertex_count}",
        rows.len()
    );

    let mut graph = GameGraph::new();
    for (i, row) in rows.iter().enumerate() {
        if row.id != i {
            bail!("Vertex {} is out of order, expected vertex {i}", row.id)
        }
        graph.add_vertex(row.player);
    }
    Ok(graph)
}

fn add_edges<'r, W>(
    graph: &mut GameGraph,
    edge_count: usize,
    rows: &'r [EdgeRow<W>],
) -> Result<Vec<(EdgeId, &'r EdgeRow<W>)>> {
    ensure!(rows.len() == edge_count, "Wrong number of edges: got {}, expected {edge_count}", rows.len());

    rows.iter()
        .enumerate()
        .map(|(i, row)| -> Result<_> {
            let e = graph
                .add_edge(VertexId(row.source), VertexId(row.target))
                .with_context(|| format!("Edge {i} is invalid"))?;
            Ok((e, row))
        })
        .collect()
}
