//! Whole-build rendering, one build or many.
//!
//! Builds share nothing but the read-only catalogue, so a batch of candidate
//! builds is evaluated independently. With the `parallel` feature the batch
//! runs on the rayon pool; results always come back in input order.

use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::build::Build;
use crate::catalogue::{Catalogue, CharacterId, WeaponId};
use crate::document::{Document, FieldOutcome, render};
use crate::error::EngineError;
use crate::stats::{StatContext, StatContextBuilder, StatKey};

/// Which catalogue entry a rendered document belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DocumentOwner {
    Character(CharacterId),
    Weapon(WeaponId),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedDocument {
    pub owner: DocumentOwner,
    pub title: String,
    pub fields: Vec<FieldOutcome>,
}

impl RenderedDocument {
    /// Number of fields that failed to render.
    pub fn failures(&self) -> usize {
        self.fields.iter().filter(|f| f.is_err()).count()
    }
}

/// Everything rendered for one build.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildReport {
    /// Fingerprint of the stat context the documents were rendered against.
    pub fingerprint: [u8; 32],
    pub stats: BTreeMap<StatKey, f64>,
    /// Character documents first, then weapon documents, each in authored order.
    pub documents: Vec<RenderedDocument>,
}

/// Build the stat context for `build` and render its character and weapon documents.
///
/// # Errors
/// Only context construction can fail; field failures are reported inside
/// the documents.
pub fn render_build(catalogue: &Catalogue, build: &Build) -> Result<BuildReport, EngineError> {
    let ctx = StatContextBuilder::new(catalogue).build(build)?;
    let character = catalogue.character(&build.character)?;
    let weapon = catalogue.weapon(&build.weapon)?;

    let owned = character
        .documents
        .iter()
        .map(|doc| (DocumentOwner::Character(character.id.clone()), doc))
        .chain(
            weapon
                .documents
                .iter()
                .map(|doc| (DocumentOwner::Weapon(weapon.id.clone()), doc)),
        );

    let documents = owned
        .map(|(owner, doc)| render_document(owner, doc, &ctx, catalogue))
        .collect();

    Ok(BuildReport {
        fingerprint: ctx.fingerprint(),
        stats: ctx.entries().collect(),
        documents,
    })
}

/// Render many builds independently, preserving input order.
pub fn render_builds(
    catalogue: &Catalogue,
    builds: &[Build],
) -> Vec<Result<BuildReport, EngineError>> {
    tracing::debug!(builds = builds.len(), "rendering build batch");

    #[cfg(feature = "parallel")]
    let reports = builds
        .par_iter()
        .map(|build| render_build(catalogue, build))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let reports = builds
        .iter()
        .map(|build| render_build(catalogue, build))
        .collect();

    reports
}

fn render_document(
    owner: DocumentOwner,
    doc: &Document,
    ctx: &StatContext,
    catalogue: &Catalogue,
) -> RenderedDocument {
    RenderedDocument {
        owner,
        title: doc.title.clone(),
        fields: render(doc, ctx, catalogue.tables()),
    }
}
