//! Fixed terms from the standard vocabularies used in dataset headers.

pub mod dc {
    use oxigraph::model::NamedNodeRef;

    pub const NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

    pub const TITLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/elements/1.1/title");

    pub const DESCRIPTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/elements/1.1/description");

    pub const MODIFIED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/elements/1.1/modified");

    pub const PUBLISHER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/elements/1.1/publisher");

    pub const CREATOR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/elements/1.1/creator");

    pub const CONTRIBUTOR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/elements/1.1/contributor");
}

pub mod foaf {
    use oxigraph::model::NamedNodeRef;

    pub const NAMESPACE: &str = "http://xmlns.com/foaf/0.1/";

    pub const HOMEPAGE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://xmlns.com/foaf/0.1/homepage");
}

pub mod owl {
    use oxigraph::model::NamedNodeRef;

    pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";

    pub const VERSION_INFO: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#versionInfo");
}

pub mod cc {
    use oxigraph::model::NamedNodeRef;

    pub const LICENSE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://creativecommons.org/ns#license");
}

pub const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";
pub const SKOS_NAMESPACE: &str = "http://www.w3.org/2004/02/skos/core#";
