use serde::{Deserialize, Serialize};

use super::kind::Kind;
use super::vocab;

/// BONSAI namespace table and publisher details.
///
/// Built once by the caller (usually from the manifest) and passed by
/// reference to every builder that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Namespaces {
    /// BONSAI core ontology; generic kind classes live here.
    pub bont: String,
    /// Root under which every generated dataset URI is minted.
    pub rdf_base: String,
    pub owltime: String,
    pub dcmitype: String,
    pub vann: String,
    pub publisher: String,
    pub creator: String,
    pub license: String,
}

impl Default for Namespaces {
    fn default() -> Self {
        Self {
            bont: "http://ontology.bonsai.uno/core#".to_string(),
            rdf_base: "http://rdf.bonsai.uno/".to_string(),
            owltime: "https://www.w3.org/TR/owl-time/".to_string(),
            dcmitype: "http://purl.org/dc/dcmitype/".to_string(),
            vann: "http://purl.org/vocab/vann/".to_string(),
            publisher: "bonsai.uno".to_string(),
            creator: "http://bonsai.uno/foaf/bonsai.rdf#bonsai".to_string(),
            license: "http://creativecommons.org/licenses/by/3.0/".to_string(),
        }
    }
}

impl Namespaces {
    /// Generic class URI used for entities that carry no explicit type.
    pub fn kind_class(&self, kind: Kind) -> String {
        format!("{}{}", self.bont, kind.name())
    }

    pub fn dataset_class(&self) -> String {
        format!("{}Dataset", self.dcmitype)
    }

    pub fn preferred_namespace_uri(&self) -> String {
        format!("{}preferredNamespaceUri", self.vann)
    }

    /// Prefix bindings registered on every dataset graph, in output order.
    pub fn common_bindings(&self) -> Vec<(&'static str, String)> {
        vec![
            ("rdf", vocab::RDF_NAMESPACE.to_string()),
            ("rdfs", vocab::RDFS_NAMESPACE.to_string()),
            ("bont", self.bont.clone()),
            ("dc", vocab::dc::NAMESPACE.to_string()),
            ("foaf", vocab::foaf::NAMESPACE.to_string()),
            ("xsd", vocab::XSD_NAMESPACE.to_string()),
            ("owl", vocab::owl::NAMESPACE.to_string()),
            ("skos", vocab::SKOS_NAMESPACE.to_string()),
            ("ot", self.owltime.clone()),
            ("dtype", self.dcmitype.clone()),
        ]
    }
}
