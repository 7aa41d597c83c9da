//! Structural operations and properties

use std::collections::VecDeque;

use super::{Edge, Graph, GraphError, Vertex, VertexId};

impl Graph {
    /// Connect all neighbours of `vertex` pairwise, then delete it
    pub fn eliminate_vertex(&mut self, vertex: &Vertex) -> Result<(), GraphError> {
        let neighborhood: Vec<Vertex> = self.neighbors(vertex)?.cloned().collect();
        for (i, a) in neighborhood.iter().enumerate() {
            for b in &neighborhood[i + 1..] {
                self.try_add_edge(a.clone(), b.clone());
            }
        }
        self.remove_vertex(vertex)
    }

    /// Merge the endpoints of the edge `{from, to}` into one new vertex
    ///
    /// The new vertex is named `from` followed by `to`, plus as many `'` as
    /// needed to be unique, and is adjacent to every other neighbour of either
    /// endpoint. Returns the new vertex.
    pub fn contract_edge(&mut self, from: &Vertex, to: &Vertex) -> Result<Vertex, GraphError> {
        if !self.has_edge(from, to) {
            return Err(GraphError::MissingEdge(Edge::new(from.clone(), to.clone())?));
        }

        let mut neighborhood: Vec<Vertex> = Vec::new();
        for endpoint in [from, to] {
            for neighbor in self.neighbors(endpoint)? {
                if neighbor != from && neighbor != to && !neighborhood.contains(neighbor) {
                    neighborhood.push(neighbor.clone());
                }
            }
        }
        self.remove_vertex(to)?;
        self.remove_vertex(from)?;

        let mut name = format!("{}{}", from, to);
        while self.has_vertex(&Vertex::new(name.as_str())) {
            name.push('\'');
        }
        let merged = Vertex::new(name);
        self.add_vertex(merged.clone())?;
        for neighbor in neighborhood {
            self.add_edge(merged.clone(), neighbor)?;
        }
        Ok(merged)
    }

    /// Mark every id reachable from `start`
    fn reachable(&self, start: VertexId, visited: &mut [bool]) {
        let mut queue = VecDeque::from([start]);
        visited[start] = true;
        while let Some(id) = queue.pop_front() {
            for next in 0..self.vertex_count() {
                if !visited[next] && self.adjacent(id, next) {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
    }

    /// Number of connected components
    pub fn component_count(&self) -> usize {
        let mut visited = vec![false; self.vertex_count()];
        let mut components = 0;
        for start in 0..self.vertex_count() {
            if !visited[start] {
                self.reachable(start, &mut visited);
                components += 1;
            }
        }
        components
    }

    /// Whether every pair of vertices is joined by a path. The empty graph
    /// is connected.
    pub fn is_connected(&self) -> bool {
        self.component_count() <= 1
    }

    /// Whether the graph is a forest
    pub fn is_acyclic(&self) -> bool {
        self.edge_count() + self.component_count() == self.vertex_count()
    }

    /// Connected, acyclic and nonempty
    pub fn is_tree(&self) -> bool {
        !self.is_empty() && self.is_connected() && self.is_acyclic()
    }

    /// Same vertices; two distinct vertices are adjacent exactly when they are
    /// not adjacent here
    pub fn complement(&self) -> Graph {
        let mut complement = Graph::new();
        for vertex in self.vertices() {
            complement.try_add_vertex(vertex.clone());
        }
        let vertices: Vec<&Vertex> = self.vertices().collect();
        for (i, a) in vertices.iter().enumerate() {
            for (j, b) in vertices.iter().enumerate().skip(i + 1) {
                if !self.adjacent(i, j) {
                    complement.try_add_edge((*a).clone(), (*b).clone());
                }
            }
        }
        complement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(vertices: &[&str], edges: &[(&str, &str)]) -> Graph {
        Graph::from_parts(
            vertices.iter().copied(),
            edges.iter().map(|(a, b)| (Vertex::new(*a), Vertex::new(*b))),
        )
        .unwrap()
    }

    #[test]
    fn contraction_unions_both_neighbourhoods() {
        // a - b - c, with d hanging off a
        let mut g = graph(&["a", "b", "c", "d"], &[("a", "b"), ("b", "c"), ("a", "d")]);
        let merged = g.contract_edge(&Vertex::new("a"), &Vertex::new("b")).unwrap();
        assert_eq!(merged, Vertex::new("ab"));
        assert!(g.has_edge(&merged, &Vertex::new("c")));
        assert!(g.has_edge(&merged, &Vertex::new("d")));
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn contraction_name_gets_primes_until_unique() {
        let mut g = graph(&["a", "b", "ab"], &[("a", "b")]);
        let merged = g.contract_edge(&Vertex::new("a"), &Vertex::new("b")).unwrap();
        assert_eq!(merged, Vertex::new("ab'"));
    }

    #[test]
    fn elimination_makes_neighbourhood_a_clique() {
        let mut g = graph(&["c", "1", "2", "3"], &[("c", "1"), ("c", "2"), ("c", "3")]);
        g.eliminate_vertex(&Vertex::new("c")).unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3);
    }
}
