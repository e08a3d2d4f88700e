//! Binary linear block codes and the Adinkra graph mapping
//!
//! The code engine derives a parity-check matrix and minimum distance from
//! any binary generator matrix. The graph layer models Adinkras (bipartite
//! graphs with colored, optionally dashed edges) and flattens them into
//! generator matrices for the engine.

pub mod adinkra;
pub mod config;
pub mod constructions;
pub mod dense_matrix;
pub mod linear_code;
pub mod parity_check;

// Re-export main types
pub use adinkra::{
    hypercube, simple_bipartite, Color, FieldKind, Graph, GraphEdge, GraphNode, RuleReport,
    PALETTE,
};
pub use config::EngineConfig;
pub use constructions::{hamming, repetition, single_parity_check};
pub use dense_matrix::{BinaryMatrix, DenseError};
pub use linear_code::{CodeInfo, Codewords, LinearCode};
pub use parity_check::EchelonForm;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Color {color} not available for dimension {dimension}")]
    InvalidColor { color: Color, dimension: usize },
    #[error("Edge connects two {0} nodes")]
    InvalidEdgeEndpoints(FieldKind),
    #[error("Graph has no edges to build a code from")]
    EmptyGraph,
    #[error("Message length {k} exceeds the enumeration limit of {limit} bits")]
    TooManyMessageBits { k: usize, limit: usize },
    #[error("Dense matrix error: {0}")]
    DenseMatrix(#[from] dense_matrix::DenseError),
}

pub type Result<T> = std::result::Result<T, CodeError>;
