//! Standard graph families. Vertices are labelled `1` through `n`.

use super::{Graph, GraphError, Vertex};

fn label(i: usize) -> Vertex {
    Vertex::new(i.to_string())
}

/// `N_n`: `n` isolated vertices
pub fn edgeless(n: usize) -> Graph {
    let mut graph = Graph::new();
    for i in 1..=n {
        graph.try_add_vertex(label(i));
    }
    graph
}

/// `K_n`: every pair of vertices adjacent
pub fn complete(n: usize) -> Graph {
    let mut graph = edgeless(n);
    for i in 1..=n {
        for j in i + 1..=n {
            graph.try_add_edge(label(i), label(j));
        }
    }
    graph
}

/// `K_{m,n}`, with parts labelled `1..m` and `1'..n'`
pub fn complete_bipartite(m: usize, n: usize) -> Graph {
    let right = |j: usize| Vertex::new(format!("{}'", j));
    let mut graph = edgeless(m);
    for j in 1..=n {
        graph.try_add_vertex(right(j));
    }
    for i in 1..=m {
        for j in 1..=n {
            graph.try_add_edge(label(i), right(j));
        }
    }
    graph
}

/// `P_n`: a path through `n` vertices
pub fn path(n: usize) -> Result<Graph, GraphError> {
    if n < 1 {
        return Err(GraphError::InvalidSize(
            "A path graph must have at least 1 vertex".to_string(),
        ));
    }
    let mut graph = edgeless(n);
    for i in 1..n {
        graph.add_edge(label(i), label(i + 1))?;
    }
    Ok(graph)
}

/// `C_n`
pub fn cycle(n: usize) -> Result<Graph, GraphError> {
    if n < 3 {
        return Err(GraphError::InvalidSize(
            "A cycle graph must have at least 3 vertices".to_string(),
        ));
    }
    let mut graph = path(n)?;
    graph.add_edge(label(1), label(n))?;
    Ok(graph)
}
