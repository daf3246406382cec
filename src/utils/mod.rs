pub mod filesystem;

pub use filesystem::{create_dir, find_turtle_files, write_graph};
