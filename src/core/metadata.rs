use chrono::{Local, NaiveDate};
use oxigraph::model::vocab::{rdf, xsd};
use oxigraph::model::Literal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::namespaces::Namespaces;
use super::vocab::{cc, dc, foaf, owl};
use crate::error::{Error, Result};
use crate::knowledge_graph::{named_node, KnowledgeGraph};

/// Descriptive properties written into every dataset header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub title: String,
    pub description: String,
    pub author: String,
    pub version: String,
    /// Written as `dc:modified`; defaults to today when built with [`DatasetMetadata::new`].
    pub modified: NaiveDate,
}

impl DatasetMetadata {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        author: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            author: author.into(),
            version: version.into(),
            modified: Local::now().date_naive(),
        }
    }

    pub fn with_modified(mut self, modified: NaiveDate) -> Self {
        self.modified = modified;
        self
    }
}

/// Add the standard prefix bindings and a `dtype:Dataset` description of `base_uri`.
///
/// `base_uri` must end with `/`. Nothing is added to the graph when validation fails.
pub fn add_common_elements<'g>(
    graph: &'g mut KnowledgeGraph,
    base_uri: &str,
    metadata: &DatasetMetadata,
    namespaces: &Namespaces,
) -> Result<&'g mut KnowledgeGraph> {
    if !base_uri.ends_with('/') {
        return Err(Error::InvalidBaseUri(base_uri.to_string()));
    }

    // Resolve every IRI before touching the graph.
    let node = named_node(base_uri)?;
    let dataset_class = named_node(namespaces.dataset_class())?;
    let homepage = named_node(format!("{}documentation.html", base_uri))?;
    let preferred_namespace = named_node(namespaces.preferred_namespace_uri())?;
    let namespace_uri = named_node(format!("{}#", base_uri))?;
    let creator = named_node(namespaces.creator.as_str())?;
    let license = named_node(namespaces.license.as_str())?;
    let bindings = namespaces.common_bindings();
    for (_, iri) in &bindings {
        named_node(iri.as_str())?;
    }

    for (prefix, iri) in &bindings {
        graph.bind(prefix, iri)?;
    }

    let modified = metadata.modified.format("%Y-%m-%d").to_string();

    graph.add(&node, rdf::TYPE, dataset_class);
    graph.add(&node, dc::TITLE, Literal::new_simple_literal(&metadata.title));
    graph.add(&node, dc::DESCRIPTION, Literal::new_simple_literal(&metadata.description));
    graph.add(&node, foaf::HOMEPAGE, homepage);
    graph.add(&node, preferred_namespace.as_ref(), namespace_uri);
    graph.add(&node, owl::VERSION_INFO, Literal::new_simple_literal(&metadata.version));
    graph.add(&node, dc::MODIFIED, Literal::new_typed_literal(modified, xsd::DATE));
    graph.add(&node, dc::PUBLISHER, Literal::new_simple_literal(&namespaces.publisher));
    graph.add(&node, dc::CREATOR, creator);
    graph.add(&node, dc::CONTRIBUTOR, Literal::new_simple_literal(&metadata.author));
    graph.add(&node, cc::LICENSE, license);

    debug!("Added dataset header for <{}>", base_uri);
    Ok(graph)
}

/// Number of triples [`add_common_elements`] contributes.
pub const HEADER_TRIPLES: usize = 11;

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::model::{NamedNode, Term};

    fn metadata() -> DatasetMetadata {
        DatasetMetadata::new("Units of mass", "Mass units", "BONSAI team", "0.3")
            .with_modified(NaiveDate::from_ymd_opt(2019, 5, 1).unwrap())
    }

    #[test]
    fn test_rejects_base_without_trailing_slash() {
        let mut graph = KnowledgeGraph::new();
        let result = add_common_elements(
            &mut graph,
            "http://rdf.bonsai.uno/unit/mass",
            &metadata(),
            &Namespaces::default(),
        );

        assert!(matches!(result, Err(Error::InvalidBaseUri(_))));
        assert!(graph.is_empty());
        assert!(graph.prefixes().is_empty());
    }

    #[test]
    fn test_adds_header_triples_and_bindings() {
        let mut graph = KnowledgeGraph::new();
        add_common_elements(
            &mut graph,
            "http://rdf.bonsai.uno/unit/mass/",
            &metadata(),
            &Namespaces::default(),
        )
        .unwrap();

        assert_eq!(graph.len(), HEADER_TRIPLES);
        for prefix in ["bont", "dc", "foaf", "xsd", "owl", "skos", "ot", "dtype"] {
            assert!(graph.prefixes().contains_key(prefix), "missing {}", prefix);
        }

        let node = named_node("http://rdf.bonsai.uno/unit/mass/").unwrap();
        assert_eq!(
            graph.objects_for(&node, dc::MODIFIED),
            vec![Term::from(Literal::new_typed_literal("2019-05-01", xsd::DATE))]
        );
        assert_eq!(
            graph.objects_for(&node, rdf::TYPE),
            vec![Term::from(NamedNode::new_unchecked("http://purl.org/dc/dcmitype/Dataset"))]
        );
        assert_eq!(
            graph.objects_for(&node, foaf::HOMEPAGE),
            vec![Term::from(NamedNode::new_unchecked(
                "http://rdf.bonsai.uno/unit/mass/documentation.html"
            ))]
        );
        assert_eq!(
            graph.objects_for(&node, dc::CONTRIBUTOR),
            vec![Term::from(Literal::new_simple_literal("BONSAI team"))]
        );
    }

    #[test]
    fn test_same_date_gives_identical_output() {
        let build = || {
            let mut graph = KnowledgeGraph::new();
            add_common_elements(&mut graph, "http://rdf.bonsai.uno/x/", &metadata(), &Namespaces::default())
                .unwrap();
            graph.to_turtle_string().unwrap()
        };
        assert_eq!(build(), build());
    }
}
