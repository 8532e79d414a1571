use std::path::PathBuf;

use thiserror::Error;

use crate::graph::node::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed graph file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
    #[error("Edge {from} -- {to} has unusable weight {weight}")]
    InvalidWeight { from: NodeId, to: NodeId, weight: String },
    #[error("Negative weight {weight} on edge {from} -- {to}")]
    NegativeWeight { from: NodeId, to: NodeId, weight: f64 },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    #[error("Invalid scene: {0}")]
    Svg(#[from] usvg::Error),
    #[error("Cannot allocate a {0}x{1} canvas")]
    Raster(u32, u32),
    #[error("Encoding failed: {0}")]
    Encode(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_input() {
        let err = Error::InvalidWeight {
            from: NodeId::Int(3),
            to: NodeId::Text("b".into()),
            weight: "1e999".to_string(),
        };
        assert_eq!(err.to_string(), "Edge 3 -- b has unusable weight 1e999");
        assert_eq!(
            Error::UnknownNode(NodeId::Int(2)).to_string(),
            "Unknown node: 2"
        );
    }
}
