//! Coefficient table loader.

use std::collections::BTreeSet;
use std::path::Path;

use loadout_core::Tables;

use crate::formats::TableFile;
use crate::loaders::{LoadResult, parse_ron};

/// Loader for rank-indexed tables from RON files.
pub struct TablesLoader;

impl TablesLoader {
    /// Load every table in the file.
    ///
    /// Fails if two tables share an id.
    pub fn load(path: &Path) -> LoadResult<Tables> {
        let file: TableFile = parse_ron(path, "table")?;

        let mut seen = BTreeSet::new();
        for table in &file.tables {
            if !seen.insert(table.id.clone()) {
                anyhow::bail!("Duplicate table id `{}` in {}", table.id, path.display());
            }
        }

        tracing::debug!(count = file.tables.len(), path = %path.display(), "loaded tables");
        Ok(file.tables.into_iter().collect())
    }
}
