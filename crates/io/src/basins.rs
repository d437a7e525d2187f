//! Basin metadata table and scope expansion.

use std::path::Path;

use serde::Deserialize;

use crate::error::IoError;

/// Hierarchy level of a basin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasinKind {
    /// A top-level hydrological basin.
    Macro,
    /// A sub-basin of a macro-basin.
    Micro,
}

/// Identity and archive names of one basin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Basin {
    id: String,
    dir_name: String,
    full_name: String,
    kind: BasinKind,
    parent: Option<String>,
}

impl Basin {
    /// Creates a basin record.
    pub fn new(
        id: impl Into<String>,
        dir_name: impl Into<String>,
        full_name: impl Into<String>,
        kind: BasinKind,
        parent: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            dir_name: dir_name.into(),
            full_name: full_name.into(),
            kind,
            parent,
        }
    }

    /// Identifier used on the command line and in the method table.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Short name used as the archive directory.
    pub fn dir_name(&self) -> &str {
        &self.dir_name
    }

    /// Full name used in file names.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Hierarchy level.
    pub fn kind(&self) -> BasinKind {
        self.kind
    }

    /// Parent macro-basin id, for micro-basins.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

/// Which basins a run covers, beyond the named one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasinScope {
    /// Every macro-basin.
    pub macro_basins: bool,
    /// Every micro-basin of the named basin.
    pub micro_basins: bool,
    /// Every macro-basin followed by its micro-basins.
    pub all_basins: bool,
}

impl BasinScope {
    /// Returns `true` if no scope flag is set.
    pub fn is_single(&self) -> bool {
        !(self.macro_basins || self.micro_basins || self.all_basins)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BasinTableToml {
    #[serde(default)]
    basin: Vec<BasinToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BasinToml {
    id: String,
    #[serde(default)]
    dir: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    kind: BasinKind,
    #[serde(default)]
    parent: Option<String>,
}

/// Ordered table of known basins.
#[derive(Debug, Clone, Default)]
pub struct BasinTable {
    basins: Vec<Basin>,
}

impl BasinTable {
    /// Builds a table from basin records, keeping their order.
    pub fn new(basins: Vec<Basin>) -> Self {
        Self { basins }
    }

    /// Reads a table from a TOML file of `[[basin]]` entries.
    ///
    /// `dir` and `full_name` default to the `id`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] or [`IoError::Table`] if the file
    /// cannot be read, parsed, or references an unknown parent.
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => IoError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => IoError::Table {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;
        Self::from_toml_str(&text).map_err(|reason| IoError::Table {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn from_toml_str(text: &str) -> Result<Self, String> {
        let parsed: BasinTableToml = toml::from_str(text).map_err(|e| e.to_string())?;
        let basins: Vec<Basin> = parsed
            .basin
            .into_iter()
            .map(|b| {
                let dir = b.dir.unwrap_or_else(|| b.id.clone());
                let full = b.full_name.unwrap_or_else(|| b.id.clone());
                Basin::new(b.id, dir, full, b.kind, b.parent)
            })
            .collect();

        for b in &basins {
            if b.kind == BasinKind::Micro {
                let parent = b
                    .parent()
                    .ok_or_else(|| format!("micro-basin '{}' has no parent", b.id))?;
                if !basins
                    .iter()
                    .any(|p| p.id == parent && p.kind == BasinKind::Macro)
                {
                    return Err(format!(
                        "micro-basin '{}' references unknown macro-basin '{parent}'",
                        b.id
                    ));
                }
            }
        }
        Ok(Self { basins })
    }

    /// Number of basins in the table.
    pub fn len(&self) -> usize {
        self.basins.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.basins.is_empty()
    }

    /// Looks up a basin by id.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnknownBasin`] if the id is absent.
    pub fn get(&self, id: &str) -> Result<&Basin, IoError> {
        self.basins
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| IoError::UnknownBasin {
                name: id.to_string(),
            })
    }

    /// Macro-basins in table order.
    pub fn macro_basins(&self) -> impl Iterator<Item = &Basin> {
        self.basins.iter().filter(|b| b.kind == BasinKind::Macro)
    }

    /// Micro-basins of `parent` in table order.
    pub fn micro_basins_of<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a Basin> {
        self.basins
            .iter()
            .filter(move |b| b.kind == BasinKind::Micro && b.parent() == Some(parent))
    }

    /// Expands `name` under `scope` into the list of basins to process.
    ///
    /// Flags combine; the result keeps table order within each group and
    /// contains no duplicates. `name` may be empty when only `macro_basins`
    /// or `all_basins` is set.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnknownBasin`] if `name` is required and absent.
    pub fn expand(&self, name: &str, scope: BasinScope) -> Result<Vec<Basin>, IoError> {
        if scope.is_single() {
            return Ok(vec![self.get(name)?.clone()]);
        }

        let mut out: Vec<Basin> = Vec::new();
        let mut push = |b: &Basin| {
            if !out.iter().any(|o| o.id == b.id) {
                out.push(b.clone());
            }
        };

        if scope.all_basins {
            for m in self.macro_basins() {
                push(m);
                for micro in self.micro_basins_of(&m.id) {
                    push(micro);
                }
            }
        }
        if scope.macro_basins {
            for m in self.macro_basins() {
                push(m);
            }
        }
        if scope.micro_basins {
            let basin = self.get(name)?;
            let parent = match basin.kind {
                BasinKind::Macro => basin.id.as_str(),
                BasinKind::Micro => basin.parent().unwrap_or(basin.id.as_str()),
            };
            for micro in self.micro_basins_of(parent) {
                push(micro);
            }
        }
        Ok(out)
    }
}
