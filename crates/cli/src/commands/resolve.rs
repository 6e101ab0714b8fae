//! Show which damage type a talent resolves to under each build.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use clap::Parser;
use console::style;
use loadout_core::{
    Build, Catalogue, DamageType, EngineError, Resolution, StatContextBuilder, TalentBaseType,
    resolve_with_source,
};

use super::{describe, load_builds, load_catalogue};

/// Show which damage type a talent resolves to
#[derive(Parser)]
pub struct Resolve {
    /// Build file (JSON or RON, one build or a list)
    #[arg(value_name = "BUILD")]
    build: PathBuf,

    /// Declared talent type: `physical`, `elemental` or a damage type such as `pyro`.
    /// Defaults to physical and elemental.
    #[arg(short, long = "base", value_name = "TYPE", value_parser = parse_base_type)]
    bases: Vec<TalentBaseType>,
}

impl Resolve {
    pub fn execute(self, data_dir: &Path) -> Result<()> {
        let catalogue = load_catalogue(data_dir)?;
        let builds = load_builds(&self.build)?;

        let bases = if self.bases.is_empty() {
            vec![TalentBaseType::Physical, TalentBaseType::Elemental]
        } else {
            self.bases
        };

        let outcomes = resolve_builds(&catalogue, &builds, &bases);
        for (index, (build, outcome)) in builds.iter().zip(outcomes).enumerate() {
            println!(
                "{} {}",
                style(format!("=== Build #{index} ===")).bold().green(),
                describe(build)
            );
            match outcome {
                Ok(resolutions) => {
                    for (base, resolution) in bases.iter().zip(resolutions) {
                        let source = match &resolution.source {
                            Some(effect) => format!("overridden by {effect}"),
                            None => "default".to_string(),
                        };
                        println!(
                            "  {:<12} -> {:<10} {}",
                            base.to_string(),
                            style(resolution.effective.name()).bold(),
                            style(source).dim()
                        );
                    }
                }
                Err(err) => println!(
                    "  {} {} ({})",
                    style("✗").red(),
                    err,
                    style(err.error_code()).dim()
                ),
            }
            println!();
        }
        Ok(())
    }
}

/// Resolve every base type for each build; a failing build does not stop the others.
fn resolve_builds(
    catalogue: &Catalogue,
    builds: &[Build],
    bases: &[TalentBaseType],
) -> Vec<Result<Vec<Resolution>, EngineError>> {
    let builder = StatContextBuilder::new(catalogue);
    builds
        .iter()
        .map(|build| {
            let ctx = builder.build(build)?;
            Ok(bases
                .iter()
                .map(|base| resolve_with_source(*base, &ctx))
                .collect())
        })
        .collect()
}

/// Parse `physical`, `elemental`, `fixed(pyro)` or a bare damage type (`pyro`).
fn parse_base_type(raw: &str) -> Result<TalentBaseType, String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("physical") {
        return Ok(TalentBaseType::Physical);
    }
    if raw.eq_ignore_ascii_case("elemental") {
        return Ok(TalentBaseType::Elemental);
    }
    let inner = raw
        .strip_prefix("fixed(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(raw);
    DamageType::from_str(inner)
        .map(TalentBaseType::Fixed)
        .map_err(|_| format!("unknown talent type `{raw}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_base_types() {
        assert_eq!(parse_base_type("physical"), Ok(TalentBaseType::Physical));
        assert_eq!(parse_base_type("Elemental"), Ok(TalentBaseType::Elemental));
        assert_eq!(
            parse_base_type("pyro"),
            Ok(TalentBaseType::Fixed(DamageType::Pyro))
        );
        assert_eq!(
            parse_base_type("fixed(cryo)"),
            Ok(TalentBaseType::Fixed(DamageType::Cryo))
        );
        assert!(parse_base_type("plasma").is_err());
    }

    #[test]
    fn display_round_trips() {
        for base in [
            TalentBaseType::Physical,
            TalentBaseType::Elemental,
            TalentBaseType::Fixed(DamageType::Dendro),
        ] {
            assert_eq!(parse_base_type(&base.to_string()), Ok(base));
        }
    }

    #[test]
    fn failing_build_does_not_stop_the_others() {
        let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../loadout/content/data");
        let catalogue = load_catalogue(&data).unwrap();
        let builds = [
            Build::new("venti", "the_viridescent_hunt", 3).with_effect("pyro_infusion"),
            Build::new("venti", "the_viridescent_hunt", 9),
            Build::new("amber", "skyward_harp", 1),
        ];
        let bases = [TalentBaseType::Physical, TalentBaseType::Elemental];

        let outcomes = resolve_builds(&catalogue, &builds, &bases);
        assert_eq!(outcomes.len(), 3);

        let infused = outcomes[0].as_ref().unwrap();
        assert_eq!(infused[0].effective, DamageType::Pyro);
        assert_eq!(infused[0].source, Some("pyro_infusion".into()));
        assert_eq!(infused[1].effective, DamageType::Anemo);

        assert_eq!(outcomes[1].as_ref().unwrap_err().error_code(), "INVALID_RANK");

        let amber = outcomes[2].as_ref().unwrap();
        assert_eq!(amber[0].effective, DamageType::Physical);
        assert_eq!(amber[1].effective, DamageType::Pyro);
        assert_eq!(amber[1].source, None);
    }
}
