use oxigraph::io::{RdfFormat, RdfSerializer};
use oxigraph::model::{Graph, NamedNode, NamedNodeRef, Term, Triple, TripleRef};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::{Error, Result};

pub mod turtle_reader;

pub use turtle_reader::{load_turtle, parse_turtle};

static PREFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]([A-Za-z0-9_.\-]*[A-Za-z0-9_\-])?$").unwrap());

/// Parse an absolute IRI, keeping the offending text in the error.
pub fn named_node(iri: impl Into<String>) -> Result<NamedNode> {
    let iri = iri.into();
    NamedNode::new(iri.clone()).map_err(|e| Error::invalid_iri(iri, e))
}

/// In-memory RDF graph plus the namespace prefixes used when it is written out.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    graph: Graph,
    prefixes: BTreeMap<String, String>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_graph(graph: Graph) -> Self {
        Self {
            graph,
            prefixes: BTreeMap::new(),
        }
    }

    /// Bind `prefix` to `iri`. Rebinding a prefix replaces the previous IRI.
    pub fn bind(&mut self, prefix: &str, iri: &str) -> Result<()> {
        if !PREFIX_PATTERN.is_match(prefix) {
            return Err(Error::InvalidPrefix(prefix.to_string()));
        }
        named_node(iri)?;

        if let Some(previous) = self.prefixes.insert(prefix.to_string(), iri.to_string()) {
            if previous != iri {
                debug!("Rebound prefix {}: <{}> -> <{}>", prefix, previous, iri);
            }
        }
        Ok(())
    }

    pub fn prefixes(&self) -> &BTreeMap<String, String> {
        &self.prefixes
    }

    /// Expand `prefix:local` against the bound prefixes, or parse `term` as an absolute IRI.
    pub fn resolve(&self, term: &str) -> Result<NamedNode> {
        if let Some((prefix, local)) = term.split_once(':') {
            if let Some(namespace) = self.prefixes.get(prefix) {
                return named_node(format!("{}{}", namespace, local));
            }
        }
        named_node(term)
    }

    /// Returns false when the triple was already present.
    pub fn insert(&mut self, triple: &Triple) -> bool {
        self.graph.insert(triple)
    }

    pub fn add(&mut self, subject: &NamedNode, predicate: NamedNodeRef<'_>, object: impl Into<Term>) -> bool {
        let triple = Triple::new(subject.clone(), predicate, object);
        self.insert(&triple)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.graph.contains(triple)
    }

    pub fn objects_for(&self, subject: &NamedNode, predicate: NamedNodeRef<'_>) -> Vec<Term> {
        self.graph
            .objects_for_subject_predicate(subject.as_ref(), predicate)
            .map(|term| term.into_owned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TripleRef<'_>> {
        self.graph.iter()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Serialize as Turtle, declaring every bound prefix.
    pub fn write_turtle<W: Write>(&self, writer: W) -> Result<W> {
        let mut serializer = RdfSerializer::from_format(RdfFormat::Turtle);
        for (prefix, iri) in &self.prefixes {
            serializer = serializer
                .with_prefix(prefix.as_str(), iri.as_str())
                .map_err(|e| Error::invalid_iri(iri.as_str(), e))?;
        }

        let mut writer = serializer.for_writer(writer);
        for triple in self.graph.iter() {
            writer
                .serialize_triple(triple)
                .map_err(|e| Error::Serialization(e.to_string()))?;
        }

        writer
            .finish()
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn to_turtle_string(&self) -> Result<String> {
        let buffer = self.write_turtle(Vec::new())?;
        String::from_utf8(buffer)
            .map_err(|e| Error::Serialization(format!("Invalid UTF-8 in output: {}", e)))
    }

    pub fn stats(&self) -> KnowledgeGraphStats {
        let mut unique_subjects = HashSet::new();
        let mut unique_predicates = HashSet::new();
        let mut unique_objects = HashSet::new();

        for triple in self.graph.iter() {
            unique_subjects.insert(triple.subject.to_string());
            unique_predicates.insert(triple.predicate.to_string());
            unique_objects.insert(triple.object.to_string());
        }

        KnowledgeGraphStats {
            total_triples: self.graph.len(),
            unique_subjects: unique_subjects.len(),
            unique_predicates: unique_predicates.len(),
            unique_objects: unique_objects.len(),
            prefixes: self.prefixes.len(),
        }
    }
}

impl PartialEq for KnowledgeGraph {
    /// Compares triples only; prefix bindings are presentation.
    fn eq(&self, other: &Self) -> bool {
        self.graph == other.graph
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeGraphStats {
    pub total_triples: usize,
    pub unique_subjects: usize,
    pub unique_predicates: usize,
    pub unique_objects: usize,
    pub prefixes: usize,
}

impl std::fmt::Display for KnowledgeGraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,
            "Total Triples: {}\n\
             Unique Subjects: {}\n\
             Unique Predicates: {}\n\
             Unique Objects: {}",
            self.total_triples,
            self.unique_subjects,
            self.unique_predicates,
            self.unique_objects
        )
    }
}
