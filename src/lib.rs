pub mod config;
pub mod core;
pub mod error;
pub mod handlers;
pub mod knowledge_graph;
pub mod utils;

pub use config::Configuration;
pub use crate::core::{
    add_common_elements, build_generic_graph, generate_generic_graph, DatasetMetadata, EntityRecord, Kind,
    Namespaces,
};
pub use error::{Error, Result};
pub use handlers::ManifestProcessor;
pub use knowledge_graph::KnowledgeGraph;
