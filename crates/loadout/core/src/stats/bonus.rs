//! Contribution merging following a fixed application order.
//!
//! Every stat key is computed from the contributions that target it:
//! Add → Multiply → Override
//!
//! The stack is order independent: contributions are sorted into a canonical
//! order before they are folded, so the same multiset of contributions always
//! produces a bit-identical value no matter how the caller assembled it.

use core::cmp::Ordering;

use super::key::StatKey;

/// How a contribution combines with the value accumulated so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MergeOp {
    /// Summed with every other additive contribution (applied first).
    Add,
    /// Multiplies the additive total (applied in priority order).
    Multiply,
    /// Replaces the value outright; the highest priority wins.
    Override,
}

/// One `(key, op, value)` triple contributed by a stat source.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contribution {
    pub key: StatKey,
    pub op: MergeOp,
    pub value: f64,
}

impl Contribution {
    /// Additive contribution.
    pub const fn add(key: StatKey, value: f64) -> Self {
        Self {
            key,
            op: MergeOp::Add,
            value,
        }
    }

    /// Multiplicative contribution (`1.2` = ×1.2).
    pub const fn multiply(key: StatKey, factor: f64) -> Self {
        Self {
            key,
            op: MergeOp::Multiply,
            value: factor,
        }
    }

    /// Overriding contribution.
    pub const fn set(key: StatKey, value: f64) -> Self {
        Self {
            key,
            op: MergeOp::Override,
            value,
        }
    }
}

/// A contribution tagged with the source it came from.
#[derive(Clone, Debug, PartialEq)]
struct StackEntry {
    priority: i32,
    source: String,
    op: MergeOp,
    value: f64,
}

impl StackEntry {
    /// Canonical order for non-commutative ops: priority descending, then source, then value.
    fn canonical_cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.value.total_cmp(&other.value))
    }
}

/// Contributions targeting a single stat key.
///
/// # Example
/// ```
/// # use loadout_core::stats::bonus::ContributionStack;
/// # use loadout_core::stats::MergeOp;
/// let mut stack = ContributionStack::new();
/// stack.push("weapon", 0, MergeOp::Add, 0.2);
/// stack.push("artifact", 0, MergeOp::Add, 0.1);
/// stack.push("buff", 3, MergeOp::Multiply, 2.0);
///
/// let value = stack.apply();
/// assert!((value - 0.6).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContributionStack {
    entries: Vec<StackEntry>,
}

impl ContributionStack {
    /// Create a new empty stack
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a contribution from `source` at `priority`.
    pub fn push(&mut self, source: impl Into<String>, priority: i32, op: MergeOp, value: f64) {
        self.entries.push(StackEntry {
            priority,
            source: source.into(),
            op,
            value,
        });
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the number of contributions in the stack
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Fold the stack into a single value.
    ///
    /// # Formula
    /// ```text
    /// result = override.unwrap_or(sum(adds) × Π(multiplies))
    /// ```
    pub fn apply(&self) -> f64 {
        // Step 1: Sum additive terms in total order so the sum is permutation invariant
        let mut adds: Vec<f64> = self
            .entries
            .iter()
            .filter(|e| e.op == MergeOp::Add)
            .map(|e| e.value)
            .collect();
        adds.sort_by(f64::total_cmp);
        let sum = adds.into_iter().fold(0.0, |acc, v| acc + v);

        // Step 2: Multiply in declared priority order
        let mut multiplies: Vec<&StackEntry> = self
            .entries
            .iter()
            .filter(|e| e.op == MergeOp::Multiply)
            .collect();
        multiplies.sort_by(|a, b| a.canonical_cmp(b));
        let product = multiplies.into_iter().fold(sum, |acc, e| acc * e.value);

        // Step 3: Highest priority override wins, ties go to the smallest source id
        self.entries
            .iter()
            .filter(|e| e.op == MergeOp::Override)
            .min_by(|a, b| a.canonical_cmp(b))
            .map_or(product, |e| e.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_is_zero() {
        assert_eq!(ContributionStack::new().apply(), 0.0);
    }

    #[test]
    fn additive_sum_ignores_insertion_order() {
        let values = [0.1, 0.2, 0.3, 1e-17, 46.6, -0.05];

        let mut forward = ContributionStack::new();
        for (i, v) in values.iter().enumerate() {
            forward.push(format!("s{i}"), 0, MergeOp::Add, *v);
        }
        let mut backward = ContributionStack::new();
        for (i, v) in values.iter().enumerate().rev() {
            backward.push(format!("s{i}"), 0, MergeOp::Add, *v);
        }

        assert_eq!(forward.apply().to_bits(), backward.apply().to_bits());
    }

    #[test]
    fn multiply_applies_after_add() {
        let mut stack = ContributionStack::new();
        stack.push("buff", 1, MergeOp::Multiply, 1.5);
        stack.push("base", 0, MergeOp::Add, 100.0);
        assert_eq!(stack.apply(), 150.0);
    }

    #[test]
    fn override_priority_then_source_tie_break() {
        let mut stack = ContributionStack::new();
        stack.push("zeta", 2, MergeOp::Override, 3.0);
        stack.push("alpha", 2, MergeOp::Override, 7.0);
        stack.push("omega", 1, MergeOp::Override, 9.0);
        stack.push("base", 0, MergeOp::Add, 100.0);

        // Priority 2 beats 1; between the two priority-2 sources "alpha" sorts first.
        assert_eq!(stack.apply(), 7.0);
    }
}
