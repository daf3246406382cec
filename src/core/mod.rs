pub mod entity;
pub mod generator;
pub mod kind;
pub mod metadata;
pub mod namespaces;
pub mod vocab;

pub use entity::EntityRecord;
pub use generator::{build_generic_graph, generate_generic_graph};
pub use kind::Kind;
pub use metadata::{add_common_elements, DatasetMetadata};
pub use namespaces::Namespaces;
