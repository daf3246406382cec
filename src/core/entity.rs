use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One row of tabular input: a label plus optional URI suffix and type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Absolute IRI or `prefix:local` name; defaults to the generic kind class.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
}

impl EntityRecord {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            suffix: None,
            entity_type: None,
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn with_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Explicit suffix, or the label lower-cased with spaces turned into underscores.
    pub fn uri_suffix(&self) -> String {
        match &self.suffix {
            Some(suffix) => suffix.clone(),
            None => derive_suffix(&self.label),
        }
    }
}

pub fn derive_suffix(label: &str) -> String {
    label.to_lowercase().replace(' ', "_")
}

impl TryFrom<Vec<String>> for EntityRecord {
    type Error = Error;

    /// Positional rows: `[label]`, `[label, suffix]` or `[label, suffix, type]`.
    fn try_from(row: Vec<String>) -> Result<Self> {
        if row.is_empty() || row.len() > 3 {
            return Err(Error::InvalidArgument(format!(
                "entity rows need 1 to 3 fields (label, suffix, type), got {}",
                row.len()
            )));
        }

        let mut fields = row.into_iter();
        let label = fields.next().unwrap_or_default();
        Ok(Self {
            label,
            suffix: fields.next(),
            entity_type: fields.next(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_derived_suffix() {
        assert_eq!(EntityRecord::new("Kilogram").uri_suffix(), "kilogram");
        assert_eq!(EntityRecord::new("Cubic Metre").uri_suffix(), "cubic_metre");
        assert_eq!(EntityRecord::new("Net  Heat Value").uri_suffix(), "net__heat_value");
    }

    #[test]
    fn test_explicit_suffix_wins() {
        let record = EntityRecord::new("Kilogram").with_suffix("kg");
        assert_eq!(record.uri_suffix(), "kg");
    }

    #[test]
    fn test_positional_rows() {
        let one = EntityRecord::try_from(row(&["Tonne"])).unwrap();
        assert_eq!(one, EntityRecord::new("Tonne"));

        let two = EntityRecord::try_from(row(&["Tonne", "t"])).unwrap();
        assert_eq!(two.suffix.as_deref(), Some("t"));
        assert_eq!(two.entity_type, None);

        let three = EntityRecord::try_from(row(&["Tonne", "t", "bont:Unit"])).unwrap();
        assert_eq!(three.entity_type.as_deref(), Some("bont:Unit"));
    }

    #[test]
    fn test_row_arity_is_checked() {
        assert!(matches!(
            EntityRecord::try_from(Vec::new()),
            Err(Error::InvalidArgument(_))
        ));
        assert!(EntityRecord::try_from(row(&["a", "b", "c", "d"])).is_err());
    }

    #[test]
    fn test_deserialize_map_form() {
        let record: EntityRecord =
            serde_yaml::from_str("label: Tonne\nsuffix: t\ntype: bont:Unit\n").unwrap();
        assert_eq!(record, EntityRecord::new("Tonne").with_suffix("t").with_type("bont:Unit"));
    }
}
