//! Finite simple undirected graphs
//!
//! Vertices keep their insertion order, and a vertex's position in that order
//! is its [`VertexId`]. The model checker addresses vertices only by id.

mod algorithms;
mod subsets;
pub mod standard;

pub use subsets::{VertexSet, VertexSubsets};

use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Position of a vertex in insertion order
pub type VertexId = usize;

/// A vertex, identified by its label
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex(pub String);

impl Vertex {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Vertex {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Vertex {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An undirected edge between two distinct vertices.
/// `{a, b}` and `{b, a}` are the same edge.
#[derive(Clone, Debug)]
pub struct Edge {
    from: Vertex,
    to: Vertex,
}

impl Edge {
    pub fn new(from: impl Into<Vertex>, to: impl Into<Vertex>) -> Result<Self, GraphError> {
        let (from, to) = (from.into(), to.into());
        if from == to {
            return Err(GraphError::SelfLoop(from));
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> &Vertex {
        &self.from
    }

    pub fn to(&self) -> &Vertex {
        &self.to
    }

    pub fn contains(&self, vertex: &Vertex) -> bool {
        &self.from == vertex || &self.to == vertex
    }

    /// The endpoints in a fixed order, independent of orientation
    fn key(&self) -> (&Vertex, &Vertex) {
        if self.from <= self.to {
            (&self.from, &self.to)
        } else {
            (&self.to, &self.from)
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.from, self.to)
    }
}

/// Invalid graph construction or modification
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Vertex '{0}' already exists")]
    DuplicateVertex(Vertex),

    #[error("Vertex '{0}' does not exist")]
    UnknownVertex(Vertex),

    #[error("Edge must be between two different vertices, found loop at '{0}'")]
    SelfLoop(Vertex),

    #[error("Edge '{0}' already exists")]
    DuplicateEdge(Edge),

    #[error("Edge '{0}' does not exist")]
    MissingEdge(Edge),

    #[error("{0}")]
    InvalidSize(String),
}

/// A simple, finite, undirected graph
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    /// Each vertex with its neighbours, in insertion order
    adjacency: IndexMap<Vertex, IndexSet<Vertex>>,
    edges: IndexSet<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from vertex and edge lists, failing on the first invalid
    /// entry
    pub fn from_parts<V, E>(vertices: V, edges: E) -> Result<Self, GraphError>
    where
        V: IntoIterator,
        V::Item: Into<Vertex>,
        E: IntoIterator<Item = (Vertex, Vertex)>,
    {
        let mut graph = Self::new();
        for vertex in vertices {
            graph.add_vertex(vertex)?;
        }
        for (from, to) in edges {
            graph.add_edge(from, to)?;
        }
        Ok(graph)
    }

    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &Vertex> + '_ {
        self.adjacency.keys()
    }

    pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn has_vertex(&self, vertex: &Vertex) -> bool {
        self.adjacency.contains_key(vertex)
    }

    pub fn has_edge(&self, from: &Vertex, to: &Vertex) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|neighbors| neighbors.contains(to))
    }

    /// Neighbours of `vertex` in the order their edges were added
    pub fn neighbors(&self, vertex: &Vertex) -> Result<impl Iterator<Item = &Vertex> + '_, GraphError> {
        self.adjacency
            .get(vertex)
            .map(|neighbors| neighbors.iter())
            .ok_or_else(|| GraphError::UnknownVertex(vertex.clone()))
    }

    pub fn degree(&self, vertex: &Vertex) -> Option<usize> {
        self.adjacency.get(vertex).map(IndexSet::len)
    }

    pub fn vertex_id(&self, vertex: &Vertex) -> Option<VertexId> {
        self.adjacency.get_index_of(vertex)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.adjacency.get_index(id).map(|(vertex, _)| vertex)
    }

    /// Whether the vertices at positions `i` and `j` are adjacent
    pub fn adjacent(&self, i: VertexId, j: VertexId) -> bool {
        match (self.adjacency.get_index(i), self.vertex(j)) {
            (Some((_, neighbors)), Some(other)) => neighbors.contains(other),
            _ => false,
        }
    }

    /// Add an isolated vertex
    pub fn add_vertex(&mut self, vertex: impl Into<Vertex>) -> Result<VertexId, GraphError> {
        let vertex = vertex.into();
        if self.has_vertex(&vertex) {
            return Err(GraphError::DuplicateVertex(vertex));
        }
        let (id, _) = self.adjacency.insert_full(vertex, IndexSet::new());
        Ok(id)
    }

    /// Add a vertex unless it already exists. Returns whether it was added.
    pub fn try_add_vertex(&mut self, vertex: impl Into<Vertex>) -> bool {
        self.add_vertex(vertex).is_ok()
    }

    pub fn add_edge(&mut self, from: impl Into<Vertex>, to: impl Into<Vertex>) -> Result<(), GraphError> {
        let edge = Edge::new(from, to)?;
        for endpoint in [&edge.from, &edge.to] {
            if !self.has_vertex(endpoint) {
                return Err(GraphError::UnknownVertex(endpoint.clone()));
            }
        }
        if self.edges.contains(&edge) {
            return Err(GraphError::DuplicateEdge(edge));
        }
        self.link(edge);
        Ok(())
    }

    /// Add an edge if it is valid and new. Returns whether it was added.
    pub fn try_add_edge(&mut self, from: impl Into<Vertex>, to: impl Into<Vertex>) -> bool {
        self.add_edge(from, to).is_ok()
    }

    /// Remove a vertex together with all its incident edges
    pub fn remove_vertex(&mut self, vertex: &Vertex) -> Result<(), GraphError> {
        let neighbors = self
            .adjacency
            .shift_remove(vertex)
            .ok_or_else(|| GraphError::UnknownVertex(vertex.clone()))?;
        for neighbor in &neighbors {
            if let Some(adjacent) = self.adjacency.get_mut(neighbor) {
                adjacent.shift_remove(vertex);
            }
        }
        self.edges.retain(|edge| !edge.contains(vertex));
        Ok(())
    }

    /// Remove an edge, keeping its endpoints
    pub fn remove_edge(&mut self, from: &Vertex, to: &Vertex) -> Result<(), GraphError> {
        let edge = Edge::new(from.clone(), to.clone())?;
        if !self.edges.shift_remove(&edge) {
            return Err(GraphError::MissingEdge(edge));
        }
        for (a, b) in [(from, to), (to, from)] {
            if let Some(neighbors) = self.adjacency.get_mut(a) {
                neighbors.shift_remove(b);
            }
        }
        Ok(())
    }

    pub fn try_remove_vertex(&mut self, vertex: &Vertex) -> bool {
        self.remove_vertex(vertex).is_ok()
    }

    pub fn try_remove_edge(&mut self, from: &Vertex, to: &Vertex) -> bool {
        self.remove_edge(from, to).is_ok()
    }

    /// Every subset of the vertices. See [`VertexSubsets`] for the order.
    pub fn all_vertex_subsets(&self) -> VertexSubsets {
        VertexSubsets::new(self.vertex_count())
    }

    /// Record an edge already known to be valid and new
    fn link(&mut self, edge: Edge) {
        if let Some(neighbors) = self.adjacency.get_mut(&edge.from) {
            neighbors.insert(edge.to.clone());
        }
        if let Some(neighbors) = self.adjacency.get_mut(&edge.to) {
            neighbors.insert(edge.from.clone());
        }
        self.edges.insert(edge);
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vertices: Vec<String> = self.vertices().map(ToString::to_string).collect();
        let edges: Vec<String> = self.edges().map(ToString::to_string).collect();
        write!(f, "V = {{{}}}, E = {{{}}}", vertices.join(", "), edges.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_equality_ignores_orientation() {
        let ab = Edge::new("a", "b").unwrap();
        let ba = Edge::new("b", "a").unwrap();
        assert_eq!(ab, ba);

        let mut set = IndexSet::new();
        set.insert(ab);
        assert!(set.contains(&ba));
    }

    #[test]
    fn removing_a_vertex_shifts_later_ids() {
        let mut graph = Graph::from_parts(["a", "b", "c"], []).unwrap();
        graph.remove_vertex(&Vertex::new("a")).unwrap();
        assert_eq!(graph.vertex_id(&Vertex::new("b")), Some(0));
        assert_eq!(graph.vertex(1), Some(&Vertex::new("c")));
    }
}
