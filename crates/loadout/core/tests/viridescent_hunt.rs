use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use loadout_core::{
    ActiveEffect, Build, BuildKind, Catalogue, CharacterData, Contribution, DamageType,
    DisplayTemplate, Document, EngineConfig, Equipment, EquipmentPiece, EquipmentSlot, Field,
    Node, RankKey, StatContextBuilder, StatKey, TalentBaseType, TalentLevels, TalentSlot,
    ValueFormat, WeaponData, render, render_build, resolve_with_source, validate,
};
use loadout_core::{DataTable, EffectId};

fn cyclone_field() -> Field {
    Field::new(
        "Cyclone DMG",
        Node::product([
            Node::stat(StatKey::TotalAtk),
            Node::table("hunt_dmg", RankKey::Refinement),
        ]),
        DisplayTemplate::new()
            .table_value("hunt_dmg", RankKey::Refinement)
            .text(" ATK as ")
            .dmg_tag(),
    )
    .typed(TalentBaseType::Physical)
}

fn catalogue() -> Catalogue {
    let normal_attack = Document::new("Normal Attack: Divine Marksmanship").with_field(
        Field::new(
            "Aimed Shot",
            Node::product([
                Node::stat(StatKey::TotalAtk),
                Node::table("aimed_shot", RankKey::Talent(TalentSlot::Auto)),
                Node::sum([Node::constant(1.0), Node::dmg_bonus(TalentBaseType::Physical)]),
            ]),
            DisplayTemplate::new().value(ValueFormat::Flat).text(" ").dmg_tag(),
        )
        .typed(TalentBaseType::Physical),
    );

    let passive = Document::new("Verdant Wind")
        .with_field(cyclone_field())
        .with_field(Field::new(
            "CRIT Rate",
            Node::stat(StatKey::CritRate),
            DisplayTemplate::new().stat(StatKey::CritRate),
        ));

    let aimed: Vec<f64> = (1..=15).map(|lvl| 40.0 + f64::from(lvl) * 2.0).collect();

    Catalogue::new(EngineConfig::default())
        .with_table(DataTable::percent("hunt_dmg", [40.0, 50.0, 60.0, 70.0, 80.0]))
        .with_table(DataTable::percent("hunt_crit", [6.0, 6.0, 6.0, 6.0, 6.0]))
        .with_table(DataTable::percent("aimed_shot", aimed))
        .with_character(CharacterData {
            id: "venti".into(),
            name: "Venti".into(),
            element: DamageType::Anemo,
            base_stats: BTreeMap::from([
                (StatKey::BaseHp, 10531.0),
                (StatKey::BaseAtk, 263.0),
                (StatKey::BaseDef, 669.0),
                (StatKey::CritRate, 0.05),
                (StatKey::CritDmg, 0.5),
                (StatKey::EnergyRecharge, 1.0),
            ]),
            documents: vec![normal_attack],
        })
        .with_weapon(WeaponData {
            id: "the_viridescent_hunt".into(),
            name: "The Viridescent Hunt".into(),
            base_stats: BTreeMap::from([(StatKey::BaseAtk, 510.0)]),
            refinement_stats: vec![loadout_core::RefinementStat {
                key: StatKey::CritRate,
                table: "hunt_crit".into(),
            }],
            documents: vec![passive],
        })
        .with_effect(
            ActiveEffect::new("pyro_infusion", 5)
                .with_directive(TalentBaseType::Physical, DamageType::Pyro),
        )
        .with_effect(
            ActiveEffect::new("noblesse_oblige", 0)
                .with_contribution(Contribution::add(StatKey::AtkPercent, 0.2)),
        )
}

#[test]
fn sample_catalogue_validates() {
    assert_eq!(validate(&catalogue()), Ok(()));
}

#[test]
fn passive_renders_refinement_value_and_physical_tag() {
    let catalogue = catalogue();
    let build = Build::new("venti", "the_viridescent_hunt", 3);
    let ctx = StatContextBuilder::new(&catalogue).build(&build).unwrap();

    let doc = &catalogue
        .weapon(&"the_viridescent_hunt".into())
        .unwrap()
        .documents[0];
    let outcomes = render(doc, &ctx, catalogue.tables());

    let cyclone = outcomes[0].as_ref().unwrap();
    assert_eq!(cyclone.text, "60% ATK as Physical DMG");
    assert_eq!(cyclone.effective_type, Some(DamageType::Physical));
    assert!((cyclone.value - 773.0 * 0.6).abs() < 1e-9);

    let crit = outcomes[1].as_ref().unwrap();
    assert_eq!(crit.text, "11.0%");
    assert_eq!(crit.effective_type, None);
}

#[test]
fn infusion_switches_tag_but_not_value() {
    let catalogue = catalogue();
    let plain = render_build(&catalogue, &Build::new("venti", "the_viridescent_hunt", 3)).unwrap();
    let infused = render_build(
        &catalogue,
        &Build::new("venti", "the_viridescent_hunt", 3).with_effect("pyro_infusion"),
    )
    .unwrap();

    let cyclone = |report: &loadout_core::BuildReport| {
        report.documents[1].fields[0].clone().unwrap()
    };
    assert_eq!(cyclone(&infused).text, "60% ATK as Pyro DMG");
    assert_eq!(cyclone(&infused).effective_type, Some(DamageType::Pyro));
    assert_eq!(cyclone(&plain).value.to_bits(), cyclone(&infused).value.to_bits());
    assert_ne!(plain.fingerprint, infused.fingerprint);
}

#[test]
fn dmg_bonus_reads_resolved_type() {
    let catalogue = catalogue();
    let pyro_goblet = EquipmentPiece::new(EquipmentSlot::Goblet)
        .with_stat(StatKey::PyroDmgBonus, 0.466);
    let pieces: ArrayVec<EquipmentPiece, 5> = [pyro_goblet].into_iter().collect();
    let build = Build::new("venti", "the_viridescent_hunt", 1)
        .with_talents(TalentLevels::new(10, 1, 1))
        .with_equipment(Equipment::Pieces(pieces));

    let ctx = StatContextBuilder::new(&catalogue).build(&build).unwrap();
    let aimed = |report: loadout_core::BuildReport| report.documents[0].fields[0].clone().unwrap();

    let plain = aimed(render_build(&catalogue, &build).unwrap());
    let expected = ctx.get(StatKey::TotalAtk).unwrap() * 0.6;
    assert!((plain.value - expected).abs() < 1e-9);
    assert!(plain.text.ends_with("Physical DMG"));

    let infused = aimed(render_build(&catalogue, &build.clone().with_effect("pyro_infusion")).unwrap());
    assert!((infused.value - expected * 1.466).abs() < 1e-9);
    assert!(infused.text.ends_with("Pyro DMG"));
}

#[test]
fn resolver_reports_winning_effect() {
    let catalogue = catalogue();
    let build = Build::new("venti", "the_viridescent_hunt", 1).with_effect("pyro_infusion");
    let ctx = StatContextBuilder::new(&catalogue).build(&build).unwrap();

    let resolution = resolve_with_source(TalentBaseType::Physical, &ctx);
    assert_eq!(resolution.effective, DamageType::Pyro);
    assert_eq!(resolution.source, Some(EffectId::new("pyro_infusion")));

    let elemental = resolve_with_source(TalentBaseType::Elemental, &ctx);
    assert_eq!(elemental.effective, DamageType::Anemo);
    assert_eq!(elemental.source, None);
}

#[test]
fn theorycraft_totals_match_real_pieces() {
    let catalogue = catalogue();
    let pieces: ArrayVec<EquipmentPiece, 5> = [
        EquipmentPiece::new(EquipmentSlot::Flower).with_stat(StatKey::Hp, 4780.0),
        EquipmentPiece::new(EquipmentSlot::Plume).with_stat(StatKey::Atk, 311.0),
        EquipmentPiece::new(EquipmentSlot::Sands).with_stat(StatKey::Atk, 19.0),
    ]
    .into_iter()
    .collect();

    let real = Build::new("venti", "the_viridescent_hunt", 2)
        .with_kind(BuildKind::Real)
        .with_equipment(Equipment::Pieces(pieces));
    let theorycraft = Build::new("venti", "the_viridescent_hunt", 2)
        .with_kind(BuildKind::Theorycraft)
        .with_equipment(Equipment::Theorycraft(BTreeMap::from([
            (StatKey::Hp, 4780.0),
            (StatKey::Atk, 330.0),
        ])));

    let builder = StatContextBuilder::new(&catalogue);
    let real = builder.build(&real).unwrap();
    let theorycraft = builder.build(&theorycraft).unwrap();
    assert_eq!(real.get(StatKey::TotalAtk), Ok(773.0 + 330.0));
    assert_eq!(real.fingerprint(), theorycraft.fingerprint());
}

#[test]
fn percent_buff_feeds_derived_attack() {
    let catalogue = catalogue();
    let build = Build::new("venti", "the_viridescent_hunt", 1).with_effect("noblesse_oblige");
    let ctx = StatContextBuilder::new(&catalogue).build(&build).unwrap();
    assert!((ctx.get(StatKey::TotalAtk).unwrap() - 773.0 * 1.2).abs() < 1e-9);
}
