use oxigraph::model::vocab::{rdf, rdfs};
use oxigraph::model::Literal;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::entity::EntityRecord;
use super::kind::Kind;
use super::metadata::{add_common_elements, DatasetMetadata};
use super::namespaces::Namespaces;
use crate::error::{Error, Result};
use crate::knowledge_graph::{named_node, KnowledgeGraph};
use crate::utils::filesystem::write_graph;

/// Check that every segment can be used both as a URI path segment and a directory name.
pub fn validate_directory_structure(directory_structure: &[String]) -> Result<()> {
    for segment in directory_structure {
        if segment.is_empty()
            || segment == "."
            || segment == ".."
            || segment.contains(['/', '\\'])
        {
            return Err(Error::InvalidArgument(format!(
                "invalid directory segment {:?} in {:?}",
                segment, directory_structure
            )));
        }
    }
    Ok(())
}

/// `<rdf_base><kind>/<seg1>/.../<segN>/`
pub fn base_uri_for(kind: Kind, directory_structure: &[String], namespaces: &Namespaces) -> String {
    let mut base_uri = format!("{}{}/", namespaces.rdf_base, kind.uri_segment());
    for segment in directory_structure {
        base_uri.push_str(segment);
        base_uri.push('/');
    }
    base_uri
}

/// `<output_base_dir>/<kind>/<seg1>/.../<segN>`
pub fn output_dir_for(output_base_dir: &Path, kind: Kind, directory_structure: &[String]) -> PathBuf {
    let mut output_dir = output_base_dir.join(kind.uri_segment());
    for segment in directory_structure {
        output_dir.push(segment);
    }
    output_dir
}

/// Build the dataset graph for `data` without writing it.
///
/// The graph holds the dataset header plus one `rdf:type` and one
/// `rdfs:label` triple per record. Custom bindings are applied after the
/// standard and kind prefixes, so they can override them.
pub fn build_generic_graph(
    kind: &str,
    data: &[EntityRecord],
    directory_structure: &[String],
    metadata: &DatasetMetadata,
    custom_binds: Option<&BTreeMap<String, String>>,
    namespaces: &Namespaces,
) -> Result<KnowledgeGraph> {
    let kind: Kind = kind.parse()?;
    validate_directory_structure(directory_structure)?;

    let base_uri = base_uri_for(kind, directory_structure, namespaces);
    let mut graph = KnowledgeGraph::new();
    add_common_elements(&mut graph, &base_uri, metadata, namespaces)?;

    graph.bind(kind.prefix(), &base_uri)?;
    if let Some(binds) = custom_binds {
        for (prefix, iri) in binds {
            graph.bind(prefix, iri)?;
        }
    }

    let default_type = named_node(namespaces.kind_class(kind))?;

    for record in data {
        let node = named_node(format!("{}{}", base_uri, record.uri_suffix()))?;
        let entity_type = match &record.entity_type {
            Some(explicit) => graph.resolve(explicit)?,
            None => default_type.clone(),
        };

        let added_type = graph.add(&node, rdf::TYPE, entity_type);
        let added_label = graph.add(&node, rdfs::LABEL, Literal::new_simple_literal(&record.label));
        if !added_type && !added_label {
            debug!("Duplicate entity record for <{}>", node.as_str());
        }
    }

    debug!(
        "Built {} graph <{}> with {} entities ({} triples)",
        kind,
        base_uri,
        data.len(),
        graph.len()
    );
    Ok(graph)
}

/// Build the dataset graph and write it to
/// `<output_base_dir>/<kind>/<segments...>/<last segment>.ttl`.
///
/// Returns the path of the written file. Nothing is written when any input fails validation.
pub fn generate_generic_graph(
    output_base_dir: &Path,
    kind: &str,
    data: &[EntityRecord],
    directory_structure: &[String],
    metadata: &DatasetMetadata,
    custom_binds: Option<&BTreeMap<String, String>>,
    namespaces: &Namespaces,
) -> Result<PathBuf> {
    let graph = build_generic_graph(kind, data, directory_structure, metadata, custom_binds, namespaces)?;

    let kind: Kind = kind.parse()?;
    let output_dir = output_dir_for(output_base_dir, kind, directory_structure);
    let path = write_graph(&output_dir, &graph)?;

    info!("Generated {} {} entities in {}", data.len(), kind, path.display());
    Ok(path)
}
