use oxigraph::model::{BlankNode, Graph, Literal, Term, Triple};
use rio_api::model as rio;
use rio_api::parser::TriplesParser;
use rio_turtle::TurtleParser;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use super::{named_node, KnowledgeGraph};
use crate::error::{Error, Result};

/// Parse a Turtle document into a graph.
///
/// Prefix declarations are expanded by the parser and are not kept as bindings.
pub fn parse_turtle<R: BufRead>(reader: R) -> Result<KnowledgeGraph> {
    let mut graph = Graph::new();
    let mut parser = TurtleParser::new(reader, None);

    parser.parse_all(&mut |t: rio::Triple<'_>| -> Result<()> {
        graph.insert(&convert_triple(&t)?);
        Ok(())
    })?;

    debug!("Parsed {} triples from Turtle input", graph.len());
    Ok(KnowledgeGraph::from_graph(graph))
}

pub fn load_turtle(path: &Path) -> Result<KnowledgeGraph> {
    let file = File::open(path)?;
    parse_turtle(BufReader::new(file))
}

fn convert_triple(t: &rio::Triple<'_>) -> Result<Triple> {
    let predicate = named_node(t.predicate.iri)?;
    let object = convert_term(&t.object)?;

    match t.subject {
        rio::Subject::NamedNode(n) => Ok(Triple::new(named_node(n.iri)?, predicate, object)),
        rio::Subject::BlankNode(b) => Ok(Triple::new(BlankNode::new_unchecked(b.id), predicate, object)),
        #[allow(unreachable_patterns)]
        _ => Err(Error::Unsupported(format!("quoted triple subject: {}", t.subject))),
    }
}

fn convert_term(term: &rio::Term<'_>) -> Result<Term> {
    let converted = match term {
        rio::Term::NamedNode(n) => Term::from(named_node(n.iri)?),
        rio::Term::BlankNode(b) => Term::from(BlankNode::new_unchecked(b.id)),
        rio::Term::Literal(rio::Literal::Simple { value }) => {
            Term::from(Literal::new_simple_literal(*value))
        }
        rio::Term::Literal(rio::Literal::LanguageTaggedString { value, language }) => {
            let literal = Literal::new_language_tagged_literal(*value, *language)
                .map_err(|e| Error::Unsupported(format!("language tag {}: {}", language, e)))?;
            Term::from(literal)
        }
        rio::Term::Literal(rio::Literal::Typed { value, datatype }) => {
            Term::from(Literal::new_typed_literal(*value, named_node(datatype.iri)?))
        }
        #[allow(unreachable_patterns)]
        _ => return Err(Error::Unsupported(format!("quoted triple object: {}", term))),
    };
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::model::vocab::{rdf, rdfs, xsd};
    use oxigraph::model::NamedNode;

    const SAMPLE: &str = r#"
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
@prefix brdfun: <http://rdf.bonsai.uno/unit/mass/> .

brdfun:kilogram a <http://ontology.bonsai.uno/core#Unit> ;
    rdfs:label "Kilogram" , "Kilogramm"@de .
<http://rdf.bonsai.uno/unit/mass/> <http://purl.org/dc/elements/1.1/modified> "2019-05-01"^^xsd:date .
"#;

    #[test]
    fn test_parse_expands_prefixes_and_literals() {
        let graph = parse_turtle(SAMPLE.as_bytes()).unwrap();
        assert_eq!(graph.len(), 4);

        let kilogram = NamedNode::new_unchecked("http://rdf.bonsai.uno/unit/mass/kilogram");
        assert!(graph.contains(&Triple::new(
            kilogram.clone(),
            rdf::TYPE,
            NamedNode::new_unchecked("http://ontology.bonsai.uno/core#Unit"),
        )));
        assert!(graph.contains(&Triple::new(
            kilogram.clone(),
            rdfs::LABEL,
            Literal::new_language_tagged_literal("Kilogramm", "de").unwrap(),
        )));
        assert!(graph.contains(&Triple::new(
            NamedNode::new_unchecked("http://rdf.bonsai.uno/unit/mass/"),
            NamedNode::new_unchecked("http://purl.org/dc/elements/1.1/modified"),
            Literal::new_typed_literal("2019-05-01", xsd::DATE),
        )));
        assert!(graph.prefixes().is_empty());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = parse_turtle("<http://example.org/s> <http://example.org/p> .".as_bytes());
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_turtle(Path::new("/definitely/not/here.ttl"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
