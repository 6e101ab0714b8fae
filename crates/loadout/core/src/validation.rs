//! Load-time checks over a whole catalogue.
//!
//! Every defect that would otherwise surface as a render-time error for some
//! build (a missing table, a table too short for the configured ranks, a
//! damage tag on an untyped field) is reported here once, up front.

use std::collections::BTreeMap;

use crate::catalogue::{Catalogue, TableId};
use crate::document::Document;
use crate::formula::Node;
use crate::stats::StatKey;
use crate::tables::{RankKey, Tables};

/// A single catalogue defect. `owner` names where it was found
/// (`weapon:the_viridescent_hunt`, `effect:pyro_infusion`, ...).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationIssue {
    #[error("{owner}: references unknown table `{table}`")]
    MissingTable { owner: String, table: TableId },

    #[error("table `{table}` has {len} entries but {rank} ranks go up to {needed}")]
    TableTooShort {
        table: TableId,
        rank: RankKey,
        needed: u8,
        len: usize,
    },

    #[error("table `{0}` has no entries")]
    EmptyTable(TableId),

    #[error("{owner}: contributes to derived stat `{key}`")]
    DerivedContribution { owner: String, key: StatKey },

    #[error("{owner}: non-finite value {value}")]
    NonFinite { owner: String, value: f64 },

    #[error("{owner}: prints a damage type but declares no base type")]
    UntypedField { owner: String },
}

/// Every issue found in a catalogue.
#[derive(Clone, Debug, Default, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("catalogue failed validation with {} issue(s)", issues.len())]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }
}

/// Check `catalogue` for data defects.
///
/// # Errors
/// Returns every issue found, not just the first.
pub fn validate(catalogue: &Catalogue) -> Result<(), ValidationReport> {
    let mut report = ValidationReport::default();
    let tables = catalogue.tables();
    let limits = RankLimits {
        refinement: catalogue.config.max_refinement,
        talent: catalogue.config.max_talent_level,
    };

    for table in tables.iter() {
        if table.values.is_empty() {
            report.push(ValidationIssue::EmptyTable(table.id.clone()));
        }
        let owner = format!("table:{}", table.id);
        check_finite(&mut report, &owner, table.values.iter().copied());
    }

    for character in catalogue.characters() {
        let owner = format!("character:{}", character.id);
        check_base_stats(&mut report, &owner, &character.base_stats);
        for doc in &character.documents {
            check_document(&mut report, &owner, doc, tables, limits);
        }
    }

    for weapon in catalogue.weapons() {
        let owner = format!("weapon:{}", weapon.id);
        check_base_stats(&mut report, &owner, &weapon.base_stats);
        for passive in &weapon.refinement_stats {
            if passive.key.is_derived() {
                report.push(ValidationIssue::DerivedContribution {
                    owner: owner.clone(),
                    key: passive.key,
                });
            }
            check_table(&mut report, &owner, tables, &passive.table, RankKey::Refinement, limits);
        }
        for doc in &weapon.documents {
            check_document(&mut report, &owner, doc, tables, limits);
        }
    }

    for effect in catalogue.effects() {
        let owner = format!("effect:{}", effect.id);
        for contribution in &effect.contributions {
            if contribution.key.is_derived() {
                report.push(ValidationIssue::DerivedContribution {
                    owner: owner.clone(),
                    key: contribution.key,
                });
            }
        }
        check_finite(
            &mut report,
            &owner,
            effect.contributions.iter().map(|c| c.value),
        );
    }

    if report.is_empty() {
        tracing::debug!(
            characters = catalogue.characters().count(),
            weapons = catalogue.weapons().count(),
            effects = catalogue.effects().count(),
            tables = tables.len(),
            "catalogue validated"
        );
        Ok(())
    } else {
        Err(report)
    }
}

#[derive(Clone, Copy)]
struct RankLimits {
    refinement: u8,
    talent: u8,
}

impl RankLimits {
    fn of(self, rank: RankKey) -> u8 {
        match rank {
            RankKey::Refinement => self.refinement,
            RankKey::Talent(_) => self.talent,
        }
    }
}

fn check_base_stats(
    report: &mut ValidationReport,
    owner: &str,
    stats: &BTreeMap<StatKey, f64>,
) {
    for key in stats.keys().filter(|k| k.is_derived()) {
        report.push(ValidationIssue::DerivedContribution {
            owner: owner.to_string(),
            key: *key,
        });
    }
    check_finite(report, owner, stats.values().copied());
}

fn check_finite(report: &mut ValidationReport, owner: &str, values: impl Iterator<Item = f64>) {
    for value in values.filter(|v| !v.is_finite()) {
        report.push(ValidationIssue::NonFinite {
            owner: owner.to_string(),
            value,
        });
    }
}

fn check_document(
    report: &mut ValidationReport,
    owner: &str,
    doc: &Document,
    tables: &Tables,
    limits: RankLimits,
) {
    for field in &doc.fields {
        let field_owner = format!("{owner}/{}/{}", doc.title, field.label);
        let refs = field.value.table_refs().into_iter().chain(field.template.table_refs());
        for (table, rank) in refs {
            check_table(report, &field_owner, tables, table, rank, limits);
        }

        let mut constants = Vec::new();
        field.value.walk(&mut |node| {
            if let Node::Constant(value) = node {
                constants.push(*value);
            }
        });
        check_finite(report, &field_owner, constants.into_iter());

        if field.base_type.is_none() && field.template.needs_type() {
            report.push(ValidationIssue::UntypedField { owner: field_owner });
        }
    }
}

fn check_table(
    report: &mut ValidationReport,
    owner: &str,
    tables: &Tables,
    id: &TableId,
    rank: RankKey,
    limits: RankLimits,
) {
    let Ok(table) = tables.get(id) else {
        report.push(ValidationIssue::MissingTable {
            owner: owner.to_string(),
            table: id.clone(),
        });
        return;
    };
    let needed = limits.of(rank);
    // Empty tables are reported once on their own.
    if !table.values.is_empty() && table.max_rank() < usize::from(needed) {
        let issue = ValidationIssue::TableTooShort {
            table: id.clone(),
            rank,
            needed,
            len: table.max_rank(),
        };
        if !report.issues.contains(&issue) {
            report.push(issue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{ActiveEffect, CharacterData, RefinementStat, WeaponData};
    use crate::config::EngineConfig;
    use crate::document::{DisplayTemplate, Field};
    use crate::stats::{Contribution, DamageType, TalentBaseType};
    use crate::tables::{DataTable, TalentSlot};

    fn weapon(documents: Vec<Document>) -> WeaponData {
        WeaponData {
            id: "hunt".into(),
            name: "The Viridescent Hunt".into(),
            base_stats: BTreeMap::from([(StatKey::BaseAtk, 510.0)]),
            refinement_stats: vec![RefinementStat {
                key: StatKey::CritRate,
                table: "hunt_crit".into(),
            }],
            documents,
        }
    }

    fn passive(template: DisplayTemplate, base_type: Option<TalentBaseType>) -> Document {
        let mut field = Field::new(
            "Cyclone DMG",
            Node::table("hunt_dmg", RankKey::Refinement),
            template,
        );
        field.base_type = base_type;
        Document::new("Passive").with_field(field)
    }

    fn catalogue(documents: Vec<Document>) -> Catalogue {
        Catalogue::new(EngineConfig::default())
            .with_table(DataTable::percent("hunt_dmg", [40.0, 50.0, 60.0, 70.0, 80.0]))
            .with_table(DataTable::percent("hunt_crit", [27.6, 27.6, 27.6, 27.6, 27.6]))
            .with_weapon(weapon(documents))
            .with_character(CharacterData {
                id: "venti".into(),
                name: "Venti".into(),
                element: DamageType::Anemo,
                base_stats: BTreeMap::from([(StatKey::BaseAtk, 263.0)]),
                documents: Vec::new(),
            })
    }

    #[test]
    fn well_formed_catalogue_passes() {
        let doc = passive(
            DisplayTemplate::new()
                .table_value("hunt_dmg", RankKey::Refinement)
                .text(" ")
                .dmg_tag(),
            Some(TalentBaseType::Physical),
        );
        assert_eq!(validate(&catalogue(vec![doc])), Ok(()));
    }

    #[test]
    fn untyped_tag_is_flagged() {
        let doc = passive(DisplayTemplate::new().dmg_tag(), None);
        let report = validate(&catalogue(vec![doc])).unwrap_err();
        assert_eq!(
            report.issues,
            vec![ValidationIssue::UntypedField {
                owner: "weapon:hunt/Passive/Cyclone DMG".into(),
            }]
        );
        assert_eq!(
            report.issues[0].to_string(),
            "weapon:hunt/Passive/Cyclone DMG: prints a damage type but declares no base type"
        );
    }

    #[test]
    fn missing_and_short_tables_are_flagged() {
        let doc = Document::new("Burst").with_field(Field::new(
            "DMG",
            Node::sum([
                Node::table("absent", RankKey::Refinement),
                Node::table("hunt_dmg", RankKey::Talent(TalentSlot::Burst)),
            ]),
            DisplayTemplate::new(),
        ));
        let report = validate(&catalogue(vec![doc])).unwrap_err();
        assert_eq!(report.issues.len(), 2);
        assert!(matches!(
            &report.issues[0],
            ValidationIssue::MissingTable { table, .. } if table.as_str() == "absent"
        ));
        assert_eq!(
            report.issues[1],
            ValidationIssue::TableTooShort {
                table: "hunt_dmg".into(),
                rank: RankKey::Talent(TalentSlot::Burst),
                needed: 15,
                len: 5,
            }
        );
    }

    #[test]
    fn derived_and_non_finite_contributions_are_flagged() {
        let catalogue = catalogue(Vec::new())
            .with_effect(
                ActiveEffect::new("bad", 0)
                    .with_contribution(Contribution::add(StatKey::TotalAtk, 100.0))
                    .with_contribution(Contribution::add(StatKey::Atk, f64::NAN)),
            )
            .with_table(DataTable::flat("empty", Vec::<f64>::new()));

        let report = validate(&catalogue).unwrap_err();
        assert!(report.issues.contains(&ValidationIssue::EmptyTable("empty".into())));
        assert!(report.issues.contains(&ValidationIssue::DerivedContribution {
            owner: "effect:bad".into(),
            key: StatKey::TotalAtk,
        }));
        assert!(
            report
                .issues
                .iter()
                .any(|i| matches!(i, ValidationIssue::NonFinite { owner, .. } if owner == "effect:bad"))
        );
        assert_eq!(report.to_string(), "catalogue failed validation with 3 issue(s)");
    }

    #[test]
    fn template_only_table_reference_is_checked() {
        let doc = passive(
            DisplayTemplate::new()
                .table_value("hunt_cooldown", RankKey::Refinement)
                .text("s"),
            None,
        );
        let report = validate(&catalogue(vec![doc])).unwrap_err();
        assert_eq!(
            report.issues,
            vec![ValidationIssue::MissingTable {
                owner: "weapon:hunt/Passive/Cyclone DMG".into(),
                table: "hunt_cooldown".into(),
            }]
        );
    }

    #[test]
    fn non_finite_formula_constant_is_flagged() {
        let doc = Document::new("Passive").with_field(Field::new(
            "Cyclone DMG",
            Node::product([
                Node::table("hunt_dmg", RankKey::Refinement),
                Node::constant(f64::INFINITY),
            ]),
            DisplayTemplate::new(),
        ));
        let report = validate(&catalogue(vec![doc])).unwrap_err();
        assert_eq!(
            report.issues,
            vec![ValidationIssue::NonFinite {
                owner: "weapon:hunt/Passive/Cyclone DMG".into(),
                value: f64::INFINITY,
            }]
        );
    }
}
