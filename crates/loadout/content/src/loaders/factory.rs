//! Content factory for building a catalogue from data files.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use loadout_core::{ActiveEffect, Catalogue, CharacterData, EngineConfig, Tables, WeaponData};

use crate::loaders::{
    CharacterLoader, ConfigLoader, EffectLoader, LoadResult, TablesLoader, WeaponLoader,
};

/// Content factory that loads all engine data from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── characters.ron
/// ├── weapons.ron
/// ├── effects.ron
/// └── tables.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`, or defaults if the file is absent.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(EngineConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load characters from `characters.ron`.
    pub fn load_characters(&self) -> LoadResult<Vec<CharacterData>> {
        CharacterLoader::load(&self.data_dir.join("characters.ron"))
    }

    /// Load weapons from `weapons.ron`.
    pub fn load_weapons(&self) -> LoadResult<Vec<WeaponData>> {
        WeaponLoader::load(&self.data_dir.join("weapons.ron"))
    }

    /// Load effects from `effects.ron`.
    pub fn load_effects(&self) -> LoadResult<Vec<ActiveEffect>> {
        EffectLoader::load(&self.data_dir.join("effects.ron"))
    }

    /// Load tables from `tables.ron`.
    pub fn load_tables(&self) -> LoadResult<Tables> {
        TablesLoader::load(&self.data_dir.join("tables.ron"))
    }

    /// Load every file and assemble a validated catalogue.
    ///
    /// Fails on duplicate ids within a file and on any validation issue; the
    /// [`loadout_core::ValidationReport`] stays reachable through
    /// `anyhow::Error::downcast_ref`.
    pub fn load_catalogue(&self) -> LoadResult<Catalogue> {
        let mut catalogue = Catalogue::new(self.load_config()?);

        let characters = self.load_characters()?;
        ensure_unique("character", characters.iter().map(|c| &c.id))?;
        let weapons = self.load_weapons()?;
        ensure_unique("weapon", weapons.iter().map(|w| &w.id))?;
        let effects = self.load_effects()?;
        ensure_unique("effect", effects.iter().map(|e| &e.id))?;
        let tables = self.load_tables()?;

        let counts = (characters.len(), weapons.len(), effects.len(), tables.len());
        for character in characters {
            catalogue.insert_character(character);
        }
        for weapon in weapons {
            catalogue.insert_weapon(weapon);
        }
        for effect in effects {
            catalogue.insert_effect(effect);
        }
        for table in tables.iter() {
            catalogue.insert_table(table.clone());
        }

        loadout_core::validate(&catalogue).map_err(|report| {
            anyhow::Error::new(report).context(format!(
                "Content in {} failed validation",
                self.data_dir.display()
            ))
        })?;

        tracing::info!(
            data_dir = %self.data_dir.display(),
            characters = counts.0,
            weapons = counts.1,
            effects = counts.2,
            tables = counts.3,
            "catalogue loaded"
        );
        Ok(catalogue)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn ensure_unique<'a, T>(kind: &str, ids: impl Iterator<Item = &'a T>) -> LoadResult<()>
where
    T: Ord + Display + 'a,
{
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            anyhow::bail!("Duplicate {} id `{}`", kind, id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadout_core::{StatKey, ValidationIssue};

    const CHARACTERS: &str = r#"(
        characters: [
            (
                id: "venti",
                name: "Venti",
                element: Anemo,
                base_stats: {"base_atk": 263.0, "crit_rate": 0.05},
            ),
        ],
    )"#;

    const WEAPONS: &str = r#"(
        weapons: [
            (
                id: "the_viridescent_hunt",
                name: "The Viridescent Hunt",
                base_stats: {"base_atk": 510.0},
                documents: [
                    (
                        title: "Verdant Wind",
                        fields: [
                            (
                                label: "Cyclone DMG",
                                value: Product([Stat("total_atk"), Table(table: "hunt_dmg", rank: Refinement)]),
                                template: [TableValue(table: "hunt_dmg", rank: Refinement), Text(" "), DmgTag],
                                base_type: Some(Physical),
                            ),
                        ],
                    ),
                ],
            ),
        ],
    )"#;

    const EFFECTS: &str = r#"(
        effects: [
            (id: "pyro_infusion", priority: 5, directive: Some((targets: Physical, into: Pyro))),
        ],
    )"#;

    const TABLES: &str = r#"(
        tables: [
            (id: "hunt_dmg", unit: Percent, values: [40.0, 50.0, 60.0, 70.0, 80.0]),
        ],
    )"#;

    fn write_data_dir(weapons: &str, tables: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("characters.ron"), CHARACTERS).unwrap();
        std::fs::write(dir.path().join("weapons.ron"), weapons).unwrap();
        std::fs::write(dir.path().join("effects.ron"), EFFECTS).unwrap();
        std::fs::write(dir.path().join("tables.ron"), tables).unwrap();
        dir
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_catalogue_without_config() {
        let dir = write_data_dir(WEAPONS, TABLES);
        let catalogue = ContentFactory::new(dir.path()).load_catalogue().unwrap();

        assert_eq!(catalogue.config, EngineConfig::default());
        let venti = catalogue.character(&"venti".into()).unwrap();
        assert_eq!(venti.base_stats[&StatKey::BaseAtk], 263.0);
        assert_eq!(catalogue.effect(&"pyro_infusion".into()).unwrap().priority, 5);
        assert_eq!(catalogue.tables().len(), 1);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = write_data_dir(WEAPONS, TABLES);
        std::fs::write(dir.path().join("config.toml"), "max_refinement = 3\n").unwrap();
        let catalogue = ContentFactory::new(dir.path()).load_catalogue().unwrap();
        assert_eq!(catalogue.config.max_refinement, 3);
    }

    #[test]
    fn unknown_stat_key_is_rejected() {
        let dir = write_data_dir(&WEAPONS.replace("base_atk", "base_attack"), TABLES);
        let err = ContentFactory::new(dir.path()).load_catalogue().unwrap_err();
        assert!(format!("{err:#}").contains("unknown stat key `base_attack`"));
    }

    #[test]
    fn validation_report_is_downcastable() {
        let short = r#"(tables: [(id: "hunt_dmg", values: [40.0, 50.0, 60.0])])"#;
        let dir = write_data_dir(WEAPONS, short);
        let err = ContentFactory::new(dir.path()).load_catalogue().unwrap_err();

        let report = err
            .downcast_ref::<loadout_core::ValidationReport>()
            .expect("validation report");
        assert_eq!(report.issues.len(), 1);
        assert!(matches!(
            report.issues[0],
            ValidationIssue::TableTooShort { needed: 5, len: 3, .. }
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let duplicated = r#"(tables: [
            (id: "hunt_dmg", values: [40.0, 50.0, 60.0, 70.0, 80.0]),
            (id: "hunt_dmg", values: [40.0, 50.0, 60.0, 70.0, 80.0]),
        ])"#;
        let dir = write_data_dir(WEAPONS, duplicated);
        let err = ContentFactory::new(dir.path()).load_catalogue().unwrap_err();
        assert!(err.to_string().contains("Duplicate table id `hunt_dmg`"));
    }
}
