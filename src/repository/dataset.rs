use super::parser::parse_row;
use crate::error::{IrrigationError, Result};
use crate::models::CropSoilRecord;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Crop/soil records in load order plus the selector indices built over them.
///
/// A dataset is immutable once built, so the indices are computed up front and
/// can never go stale.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<CropSoilRecord>,
    unique_crops: Vec<String>,
    unique_soil_types: Vec<String>,
    crops_by_category: BTreeMap<String, Vec<String>>,
}

impl Dataset {
    pub fn from_records(records: Vec<CropSoilRecord>) -> Self {
        let unique_crops = sorted_distinct(records.iter().map(|r| r.crop_name.as_str()));
        let unique_soil_types = sorted_distinct(records.iter().map(|r| r.soil_type.as_str()));

        let mut grouped: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for record in &records {
            grouped
                .entry(record.category.as_str())
                .or_default()
                .insert(record.crop_name.as_str());
        }
        let crops_by_category = grouped
            .into_iter()
            .map(|(category, crops)| {
                (
                    category.to_string(),
                    crops.into_iter().map(str::to_string).collect(),
                )
            })
            .collect();

        Self {
            records,
            unique_crops,
            unique_soil_types,
            crops_by_category,
        }
    }

    /// Build a dataset from raw lines. The first line is the header and is
    /// skipped. Malformed rows are dropped, never reported as errors.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut total = 0usize;
        let records: Vec<CropSoilRecord> = lines
            .into_iter()
            .skip(1)
            .filter_map(|line| {
                total += 1;
                let line = line.as_ref();
                let parsed = parse_row(line);
                if parsed.is_none() {
                    tracing::debug!("Dropping malformed crop data row: {:?}", line);
                }
                parsed
            })
            .collect();

        if records.len() < total {
            tracing::debug!("Dropped {} of {} data rows", total - records.len(), total);
        }

        Self::from_records(records)
    }

    pub fn parse(content: &str) -> Self {
        Self::from_lines(content.lines())
    }

    /// Read every line before parsing so a read failure part way through never
    /// yields a partial dataset.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let lines = reader
            .lines()
            .collect::<std::io::Result<Vec<String>>>()
            .map_err(|e| IrrigationError::DataUnavailable(format!("Failed to read: {}", e)))?;
        Ok(Self::from_lines(lines))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            IrrigationError::DataUnavailable(format!("{}: {}", path.display(), e))
        })?;
        Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            IrrigationError::DataUnavailable(msg) => {
                IrrigationError::DataUnavailable(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn records(&self) -> &[CropSoilRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record in load order matching both fields exactly.
    pub fn get_crop_data(&self, crop_name: &str, soil_type: &str) -> Option<&CropSoilRecord> {
        self.records.iter().find(|r| r.matches(crop_name, soil_type))
    }

    pub fn get_crops_for_category(&self, category: &str) -> Vec<String> {
        self.crops_by_category
            .get(category)
            .cloned()
            .unwrap_or_default()
    }

    pub fn unique_crops(&self) -> &[String] {
        &self.unique_crops
    }

    pub fn unique_soil_types(&self) -> &[String] {
        &self.unique_soil_types
    }

    pub fn crops_by_category(&self) -> &BTreeMap<String, Vec<String>> {
        &self.crops_by_category
    }

    pub fn categories(&self) -> Vec<String> {
        self.crops_by_category.keys().cloned().collect()
    }
}

fn sorted_distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
