use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// BONSAI base ontology categories that can be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    ActivityType,
    FlowObject,
    Location,
    Unit,
}

impl Kind {
    pub const ALL: [Kind; 4] = [
        Kind::ActivityType,
        Kind::FlowObject,
        Kind::Location,
        Kind::Unit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Kind::ActivityType => "ActivityType",
            Kind::FlowObject => "FlowObject",
            Kind::Location => "Location",
            Kind::Unit => "Unit",
        }
    }

    /// Namespace prefix bound to the dataset base URI in generated files.
    pub fn prefix(self) -> &'static str {
        match self {
            Kind::ActivityType => "brdfat",
            Kind::FlowObject => "brdffo",
            Kind::Location => "brdflo",
            Kind::Unit => "brdfun",
        }
    }

    /// Lower-cased name, used both as URI path segment and output directory.
    pub fn uri_segment(self) -> String {
        self.name().to_lowercase()
    }

    pub fn valid_names() -> String {
        Kind::ALL
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| Error::InvalidKind {
                kind: s.to_string(),
                valid: Kind::valid_names(),
            })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
