use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::knowledge_graph::KnowledgeGraph;

/// Create the directory tree up to `dirpath`; existing directories are fine.
pub fn create_dir(dirpath: &Path) -> Result<&Path> {
    if dirpath.exists() && !dirpath.is_dir() {
        return Err(Error::NotADirectory(dirpath.to_path_buf()));
    }
    fs::create_dir_all(dirpath)?;
    Ok(dirpath)
}

/// Path of the Turtle file written for `dirpath`: `<dirpath>/<last segment>.ttl`.
pub fn graph_file_path(dirpath: &Path) -> Result<PathBuf> {
    let name = dirpath
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "output directory has no final path segment: {}",
                dirpath.display()
            ))
        })?;
    Ok(dirpath.join(format!("{}.ttl", name)))
}

/// Write `graph` as UTF-8 Turtle to `<dirpath>/<last segment>.ttl`, replacing any existing file.
///
/// The Turtle is written to a temporary file next to the target and renamed
/// into place once complete.
pub fn write_graph(dirpath: &Path, graph: &KnowledgeGraph) -> Result<PathBuf> {
    let target = graph_file_path(dirpath)?;
    create_dir(dirpath)?;

    let temp = NamedTempFile::new_in(dirpath)?;
    let mut writer = graph.write_turtle(BufWriter::new(temp))?;
    writer.flush()?;
    let temp = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;

    // Temporary files are created owner-only; published graphs are world-readable.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(temp.path(), fs::Permissions::from_mode(0o644))?;
    }

    temp.persist(&target).map_err(|e| Error::Io(e.error))?;

    info!("Wrote {} triples to {}", graph.len(), target.display());
    Ok(target)
}

/// Every `.ttl` file under `root` (or `root` itself), sorted by path.
pub fn find_turtle_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().and_then(|e| e.to_str()) == Some("ttl") {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    debug!("Found {} Turtle files under {}", files.len(), root.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::model::vocab::rdfs;
    use oxigraph::model::{Literal, NamedNode};

    fn sample_graph() -> KnowledgeGraph {
        let mut graph = KnowledgeGraph::new();
        graph.bind("rdfs", "http://www.w3.org/2000/01/rdf-schema#").unwrap();
        graph.add(
            &NamedNode::new_unchecked("http://rdf.bonsai.uno/unit/mass/kilogram"),
            rdfs::LABEL,
            Literal::new_simple_literal("Kilogram"),
        );
        graph
    }

    #[test]
    fn test_create_dir_is_idempotent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("a").join("b");
        create_dir(&path).unwrap();
        create_dir(&path).unwrap();
        assert!(path.is_dir());
    }

    #[test]
    fn test_create_dir_over_file_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("unit");
        fs::write(&path, "occupied").unwrap();

        assert!(matches!(create_dir(&path), Err(Error::NotADirectory(_))));
    }

    #[test]
    fn test_write_graph_names_file_after_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("unit").join("mass");

        let written = write_graph(&dir, &sample_graph()).unwrap();
        assert_eq!(written, dir.join("mass.ttl"));

        let content = fs::read_to_string(&written).unwrap();
        assert!(content.contains("\"Kilogram\""));
        // Only the final file remains; the temporary has been renamed away.
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
    }

    #[test]
    fn test_write_graph_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("mass");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("mass.ttl"), "stale content").unwrap();

        write_graph(&dir, &sample_graph()).unwrap();
        let content = fs::read_to_string(dir.join("mass.ttl")).unwrap();
        assert!(!content.contains("stale content"));
    }

    #[test]
    fn test_find_turtle_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_graph(&temp_dir.path().join("unit").join("mass"), &sample_graph()).unwrap();
        write_graph(&temp_dir.path().join("location").join("world"), &sample_graph()).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let files = find_turtle_files(temp_dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("location/world/world.ttl"));
        assert!(files[1].ends_with("unit/mass/mass.ttl"));
    }
}
