//! Stat system - from raw build attributes to an immutable stat context.
//!
//! # Architecture
//!
//! ```text
//! [ Stat vocabulary (StatKey, DamageType) ]
//!      ↓
//! [ Contributions (Add / Multiply / Override) ]
//!      ↓
//! [ ContributionStack per key ]
//!      ↓
//! [ Derived totals (TotalHp / TotalAtk / TotalDef) ]
//!      ↓
//! [ StatContext ]
//! ```
//!
//! ## Principles
//!
//! 1. **Closed vocabulary**: every stat is a [`StatKey`] variant
//! 2. **Order independence**: any permutation of the same inputs yields the same context
//! 3. **Fractions inside**: percentages are stored as fractions (0.15 for 15%)
//! 4. **Deterministic**: pure functions, no I/O, no hidden state

pub mod bonus;
pub mod builder;
pub mod context;
pub mod damage;
pub mod key;

pub use bonus::{Contribution, ContributionStack, MergeOp};
pub use builder::StatContextBuilder;
pub use context::{ActiveOverride, Ranks, StatContext};
pub use damage::{DamageType, TalentBaseType};
pub use key::StatKey;
