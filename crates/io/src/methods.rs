//! Per-basin, per-month correction method table.

use std::collections::BTreeMap;
use std::path::Path;

use prbias_quantile_map::CorrectionMethod;
use serde::Deserialize;
use tracing::debug;

use crate::error::IoError;

/// Read-only lookup of the correction method for a basin and run month.
pub trait MethodLookup: Send + Sync {
    /// Method for `basin_id` when the forecast was initialised in `month`
    /// (1..=12).
    fn method(&self, basin_id: &str, month: u8) -> CorrectionMethod;
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MethodTableToml {
    #[serde(default)]
    basins: BTreeMap<String, Vec<String>>,
}

/// Method tags per basin, indexed by run month.
///
/// Only `eqm_des` cells select quantile mapping; any other tag passes the
/// forecast through. Basins absent from the table, and out-of-range months,
/// fall back to `fallback`.
#[derive(Debug, Clone)]
pub struct MethodTable {
    basins: BTreeMap<String, [CorrectionMethod; 12]>,
    fallback: CorrectionMethod,
}

impl MethodTable {
    /// Creates an empty table answering `fallback` for every basin.
    pub fn new(fallback: CorrectionMethod) -> Self {
        Self {
            basins: BTreeMap::new(),
            fallback,
        }
    }

    /// Adds or replaces the twelve monthly methods of `basin_id`.
    pub fn with_basin(mut self, basin_id: impl Into<String>, months: [CorrectionMethod; 12]) -> Self {
        self.basins.insert(basin_id.into(), months);
        self
    }

    /// Reads a table from a TOML file with a `[basins]` section mapping
    /// basin ids to twelve method tags (January first).
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] or [`IoError::Table`] if the file
    /// cannot be read or parsed, or a row does not have twelve entries.
    pub fn from_path(path: &Path, fallback: CorrectionMethod) -> Result<Self, IoError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => IoError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => IoError::Table {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;
        Self::from_toml_str(&text, fallback).map_err(|reason| IoError::Table {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn from_toml_str(text: &str, fallback: CorrectionMethod) -> Result<Self, String> {
        let parsed: MethodTableToml = toml::from_str(text).map_err(|e| e.to_string())?;
        let mut table = Self::new(fallback);
        for (basin, tags) in parsed.basins {
            if tags.len() != 12 {
                return Err(format!(
                    "basin '{basin}' has {} method entries, expected 12",
                    tags.len()
                ));
            }
            let mut months = [fallback; 12];
            for (month, (slot, tag)) in (1u8..).zip(months.iter_mut().zip(&tags)) {
                *slot = CorrectionMethod::from_table_tag(tag);
                if *slot == CorrectionMethod::None && !tag.eq_ignore_ascii_case("none") {
                    debug!(basin = %basin, month, tag = %tag, "method tag passes through uncorrected");
                }
            }
            table.basins.insert(basin, months);
        }
        Ok(table)
    }

    /// Returns `true` if `basin_id` has an explicit row.
    pub fn contains(&self, basin_id: &str) -> bool {
        self.basins.contains_key(basin_id)
    }
}

impl MethodLookup for MethodTable {
    fn method(&self, basin_id: &str, month: u8) -> CorrectionMethod {
        if !(1..=12).contains(&month) {
            return self.fallback;
        }
        self.basins
            .get(basin_id)
            .map_or(self.fallback, |row| row[usize::from(month - 1)])
    }
}
