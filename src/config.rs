//! Graph configuration files
//!
//! A config describes the graph to check formulas against, either as explicit
//! vertex and edge lists or as one of the standard families:
//!
//! ```toml
//! vertices = ["a", "b", "c"]
//! edges = [["a", "b"], ["b", "c"]]
//!
//! [report]
//! color = false
//! ```
//!
//! ```toml
//! [standard]
//! kind = "complete-bipartite"
//! m = 2
//! n = 3
//! ```
//!
//! When both are given, the standard graph is built first and the explicit
//! vertices and edges are added to it.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::graph::{standard, Graph, GraphError, Vertex};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid TOML: {message}")]
    Parse { message: String },
    #[error("Invalid graph: {0}")]
    Graph(#[from] GraphError),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub graph: GraphConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GraphConfig {
    pub vertices: Vec<String>,
    pub edges: Vec<(String, String)>,
    pub standard: Option<StandardGraph>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StandardGraph {
    Edgeless { n: usize },
    Complete { n: usize },
    CompleteBipartite { m: usize, n: usize },
    Path { n: usize },
    Cycle { n: usize },
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    /// Colored diagnostics
    pub color: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl StandardGraph {
    pub fn build(self) -> Result<Graph, GraphError> {
        match self {
            StandardGraph::Edgeless { n } => Ok(standard::edgeless(n)),
            StandardGraph::Complete { n } => Ok(standard::complete(n)),
            StandardGraph::CompleteBipartite { m, n } => Ok(standard::complete_bipartite(m, n)),
            StandardGraph::Path { n } => standard::path(n),
            StandardGraph::Cycle { n } => standard::cycle(n),
        }
    }
}

impl GraphConfig {
    pub fn build(&self) -> Result<Graph, ConfigError> {
        let mut graph = match self.standard {
            Some(standard) => standard.build()?,
            None => Graph::new(),
        };
        for vertex in &self.vertices {
            graph.add_vertex(vertex.as_str())?;
        }
        for (from, to) in &self.edges {
            graph.add_edge(Vertex::new(from.as_str()), Vertex::new(to.as_str()))?;
        }
        Ok(graph)
    }
}

pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::Parse {
        message: e.message().to_string(),
    })
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&content)
}
