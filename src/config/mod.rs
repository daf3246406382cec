use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::generator::validate_directory_structure;
use crate::core::{DatasetMetadata, EntityRecord, Kind, Namespaces};

/// A batch of datasets to generate, loaded from YAML or JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub author: String,
    pub version: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub namespaces: Namespaces,
    /// Extra prefix bindings applied to every dataset.
    #[serde(default)]
    pub custom_namespaces: BTreeMap<String, String>,
    pub datasets: Vec<DatasetConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub kind: String,
    #[serde(default)]
    pub directory: Vec<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_namespaces: BTreeMap<String, String>,
    pub entities: Vec<EntityRow>,
}

/// An entity either as a map (`label`, `suffix`, `type`) or as a positional row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRow {
    Record(EntityRecord),
    Row(Vec<String>),
}

fn default_output_dir() -> PathBuf { PathBuf::from("output") }

impl EntityRow {
    pub fn to_record(&self) -> crate::Result<EntityRecord> {
        match self {
            EntityRow::Record(record) => Ok(record.clone()),
            EntityRow::Row(fields) => EntityRecord::try_from(fields.clone()),
        }
    }
}

impl DatasetConfig {
    pub fn records(&self) -> Result<Vec<EntityRecord>> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.to_record()
                    .with_context(|| format!("Entity {} of dataset '{}'", i + 1, self.title))
            })
            .collect()
    }

    /// Header metadata, falling back to the manifest-wide author and version.
    pub fn metadata(&self, config: &Configuration, modified: NaiveDate) -> DatasetMetadata {
        DatasetMetadata::new(
            self.title.clone(),
            self.description.clone(),
            self.author.clone().unwrap_or_else(|| config.author.clone()),
            self.version.clone().unwrap_or_else(|| config.version.clone()),
        )
        .with_modified(modified)
    }
}

impl Configuration {
    /// Load configuration from a YAML or JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest file: {}", path.display()))?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON manifest: {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML manifest: {}", path.display()))?
        };

        Ok(config)
    }

    /// Validate the manifest without building any graph
    pub fn validate(&self) -> Result<()> {
        if self.datasets.is_empty() {
            anyhow::bail!("No datasets defined");
        }

        if !self.namespaces.rdf_base.ends_with('/') {
            anyhow::bail!("Namespace rdf_base must end with '/': {}", self.namespaces.rdf_base);
        }

        for dataset in &self.datasets {
            if dataset.title.trim().is_empty() {
                anyhow::bail!("Dataset of kind '{}' is missing a title", dataset.kind);
            }

            dataset
                .kind
                .parse::<Kind>()
                .with_context(|| format!("Dataset '{}'", dataset.title))?;
            validate_directory_structure(&dataset.directory)
                .with_context(|| format!("Dataset '{}'", dataset.title))?;
            dataset.records()?;
        }

        Ok(())
    }

    /// Global custom prefixes overlaid with the dataset's own.
    pub fn custom_binds_for(&self, dataset: &DatasetConfig) -> BTreeMap<String, String> {
        let mut binds = self.custom_namespaces.clone();
        binds.extend(dataset.custom_namespaces.clone());
        binds
    }

    /// Create an example manifest
    pub fn example() -> Self {
        Configuration {
            author: "BONSAI team".to_string(),
            version: "0.3".to_string(),
            output_dir: default_output_dir(),
            namespaces: Namespaces::default(),
            custom_namespaces: BTreeMap::new(),
            datasets: vec![
                DatasetConfig {
                    kind: "Unit".to_string(),
                    directory: vec!["mass".to_string()],
                    title: "Units of mass".to_string(),
                    description: "Mass units used in BONSAI datasets".to_string(),
                    author: None,
                    version: None,
                    custom_namespaces: BTreeMap::new(),
                    entities: vec![
                        EntityRow::Record(EntityRecord::new("Kilogram")),
                        EntityRow::Record(EntityRecord::new("Tonne").with_suffix("tonne")),
                        EntityRow::Row(vec!["Gram".to_string(), "g".to_string()]),
                    ],
                },
                DatasetConfig {
                    kind: "FlowObject".to_string(),
                    directory: vec!["lcia".to_string(), "climate_change".to_string()],
                    title: "Climate change flow objects".to_string(),
                    description: "Flow objects for climate change impact assessment".to_string(),
                    author: None,
                    version: None,
                    custom_namespaces: BTreeMap::new(),
                    entities: vec![
                        EntityRow::Record(
                            EntityRecord::new("Global warming potential 100")
                                .with_suffix("gwp100")
                                .with_type("bont:FlowObject"),
                        ),
                    ],
                },
            ],
        }
    }
}
