//! Stat resolution and formula evaluation for character builds.
//!
//! `loadout-core` turns a build (character, weapon + refinement, equipment and
//! toggled effects) into an immutable [`StatContext`], resolves the damage type
//! each talent actually deals, and renders declarative [`Document`]s against
//! that context. Every entry point is a pure function of its inputs: static data
//! lives in a [`Catalogue`] that is loaded once and shared read-only.
//!
//! ```text
//! Build ──► StatContextBuilder ──► StatContext ──► document::render ──► FieldOutcome*
//!                                       │                 │
//!                                       └──► resolver ◄───┘
//! ```
pub mod batch;
pub mod build;
pub mod catalogue;
pub mod config;
pub mod document;
pub mod error;
pub mod formula;
pub mod resolver;
pub mod stats;
pub mod tables;
pub mod validation;

pub use batch::{BuildReport, DocumentOwner, RenderedDocument, render_build, render_builds};
pub use build::{Build, BuildKind, Equipment, EquipmentPiece, EquipmentSlot, TalentLevels};
pub use catalogue::{
    ActiveEffect, Catalogue, CharacterData, CharacterId, EffectId, OverrideDirective,
    RefinementStat, TableId, WeaponData, WeaponId,
};
pub use config::EngineConfig;
pub use document::{
    DisplayTemplate, Document, Field, FieldFailure, FieldOutcome, RenderedField, Segment,
    ValueFormat, render,
};
pub use error::{EngineError, EntityKind, ErrorSeverity};
pub use formula::{Comparison, Node, Threshold, evaluate};
pub use resolver::{Resolution, resolve, resolve_with_source};
pub use stats::{
    ActiveOverride, Contribution, ContributionStack, DamageType, MergeOp, Ranks, StatContext,
    StatContextBuilder, StatKey, TalentBaseType,
};
pub use tables::{DataTable, RankKey, TableUnit, Tables, TalentSlot};
pub use validation::{ValidationIssue, ValidationReport, validate};
