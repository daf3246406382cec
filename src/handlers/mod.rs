use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Configuration;
use crate::core::generator::{build_generic_graph, output_dir_for};
use crate::core::Kind;
use crate::utils::filesystem::write_graph;

/// Outcome of generating one dataset from a manifest.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub kind: Kind,
    pub title: String,
    pub path: PathBuf,
    pub entities: usize,
    pub triples: usize,
}

/// Runs every dataset of a manifest through the graph generator.
pub struct ManifestProcessor {
    output_dir: PathBuf,
    modified: NaiveDate,
}

impl ManifestProcessor {
    pub fn new(output_dir: impl Into<PathBuf>, modified: NaiveDate) -> Self {
        Self {
            output_dir: output_dir.into(),
            modified,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Validate the whole manifest, then write one Turtle file per dataset.
    ///
    /// Graphs are built for every dataset before the first file is written.
    pub fn process(&self, config: &Configuration) -> Result<Vec<GenerationReport>> {
        config.validate()?;

        let mut pending = Vec::with_capacity(config.datasets.len());
        for dataset in &config.datasets {
            let records = dataset.records()?;
            let metadata = dataset.metadata(config, self.modified);
            let binds = config.custom_binds_for(dataset);

            let graph = build_generic_graph(
                &dataset.kind,
                &records,
                &dataset.directory,
                &metadata,
                Some(&binds),
                &config.namespaces,
            )
            .with_context(|| format!("Failed to build dataset '{}'", dataset.title))?;

            debug!("Prepared dataset '{}' ({} triples)", dataset.title, graph.len());
            pending.push((dataset, records.len(), graph));
        }

        let mut reports = Vec::with_capacity(pending.len());
        for (dataset, entities, graph) in pending {
            let kind: Kind = dataset.kind.parse()?;
            let output_dir = output_dir_for(&self.output_dir, kind, &dataset.directory);
            let path = write_graph(&output_dir, &graph)
                .with_context(|| format!("Failed to write dataset '{}'", dataset.title))?;

            reports.push(GenerationReport {
                kind,
                title: dataset.title.clone(),
                path,
                entities,
                triples: graph.len(),
            });
        }

        info!("Generated {} datasets under {}", reports.len(), self.output_dir.display());
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::HEADER_TRIPLES;
    use crate::knowledge_graph::load_turtle;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 5, 1).unwrap()
    }

    #[test]
    fn test_process_example_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        let processor = ManifestProcessor::new(temp_dir.path(), date());

        let reports = processor.process(&Configuration::example()).unwrap();
        assert_eq!(reports.len(), 2);

        let units = &reports[0];
        assert_eq!(units.kind, Kind::Unit);
        assert_eq!(units.path, temp_dir.path().join("unit").join("mass").join("mass.ttl"));
        assert_eq!(units.entities, 3);
        assert_eq!(units.triples, HEADER_TRIPLES + 6);

        let climate = &reports[1];
        assert_eq!(
            climate.path,
            temp_dir
                .path()
                .join("flowobject")
                .join("lcia")
                .join("climate_change")
                .join("climate_change.ttl")
        );

        let reloaded = load_turtle(&climate.path).unwrap();
        assert_eq!(reloaded.len(), climate.triples);
    }

    #[test]
    fn test_invalid_dataset_writes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = Configuration::example();
        config.datasets[1].kind = "Invalid".to_string();

        let processor = ManifestProcessor::new(temp_dir.path(), date());
        assert!(processor.process(&config).is_err());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_bad_entity_iri_in_later_dataset_writes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = Configuration::example();
        config.datasets[1].entities = vec![crate::config::EntityRow::Row(vec![
            "Bad".to_string(),
            "has space".to_string(),
        ])];

        let processor = ManifestProcessor::new(temp_dir.path(), date());
        assert!(processor.process(&config).is_err());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
