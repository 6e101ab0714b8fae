//! Formula system for talent and weapon values.
//!
//! Formulas are immutable expression trees authored as static data and shared
//! by every evaluation. They read from a [`crate::StatContext`] and the loaded
//! [`crate::Tables`], nothing else, so identical inputs always produce
//! bit-identical results.
//!
//! ## Examples
//!
//! ```
//! use loadout_core::{Node, RankKey, StatKey};
//!
//! // Total ATK × the refinement-indexed percentage of `hunt_dmg`
//! let dmg = Node::product([
//!     Node::stat(StatKey::TotalAtk),
//!     Node::table("hunt_dmg", RankKey::Refinement),
//! ]);
//! # let _ = dmg;
//! ```

pub mod evaluate;

pub use evaluate::evaluate;

use crate::catalogue::TableId;
use crate::stats::{StatKey, TalentBaseType};
use crate::tables::RankKey;

/// How a [`Threshold`] compares its node against the threshold value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparison {
    Gt,
    Ge,
    Lt,
    Le,
}

impl Comparison {
    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
        }
    }
}

/// Boolean condition of a [`Node::Select`]: `node <comparison> value`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Threshold {
    pub node: Box<Node>,
    pub comparison: Comparison,
    pub value: f64,
}

/// Numeric expression evaluated against a stat context.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// Fixed value.
    Constant(f64),

    /// Value of a stat in the context.
    Stat(StatKey),

    /// Table value at the context's rank for `rank` (fraction for percentage tables).
    Table { table: TableId, rank: RankKey },

    /// DMG bonus stat of the effective type the talent resolves to.
    DmgBonus(TalentBaseType),

    /// Sum of sub-formulas, in authored order.
    Sum(Vec<Node>),

    /// Product of sub-formulas, in authored order.
    Product(Vec<Node>),

    /// Minimum of sub-formulas.
    Min(Vec<Node>),

    /// Maximum of sub-formulas.
    Max(Vec<Node>),

    /// `then` if the condition holds, `otherwise` if not.
    Select {
        condition: Threshold,
        then: Box<Node>,
        otherwise: Box<Node>,
    },
}

impl Node {
    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    pub fn stat(key: StatKey) -> Self {
        Self::Stat(key)
    }

    pub fn table(table: impl Into<TableId>, rank: RankKey) -> Self {
        Self::Table {
            table: table.into(),
            rank,
        }
    }

    pub fn dmg_bonus(base: TalentBaseType) -> Self {
        Self::DmgBonus(base)
    }

    pub fn sum(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self::Sum(nodes.into_iter().collect())
    }

    pub fn product(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self::Product(nodes.into_iter().collect())
    }

    pub fn min(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self::Min(nodes.into_iter().collect())
    }

    pub fn max(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self::Max(nodes.into_iter().collect())
    }

    pub fn select(
        node: Node,
        comparison: Comparison,
        value: f64,
        then: Node,
        otherwise: Node,
    ) -> Self {
        Self::Select {
            condition: Threshold {
                node: Box::new(node),
                comparison,
                value,
            },
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    /// Depth of the expression tree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        match self {
            Self::Constant(_) | Self::Stat(_) | Self::Table { .. } | Self::DmgBonus(_) => 1,
            Self::Sum(nodes) | Self::Product(nodes) | Self::Min(nodes) | Self::Max(nodes) => {
                1 + nodes.iter().map(Node::depth).max().unwrap_or(0)
            }
            Self::Select {
                condition,
                then,
                otherwise,
            } => 1 + condition.node.depth().max(then.depth()).max(otherwise.depth()),
        }
    }

    /// Visit every node of the tree, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        match self {
            Self::Constant(_) | Self::Stat(_) | Self::Table { .. } | Self::DmgBonus(_) => {}
            Self::Sum(nodes) | Self::Product(nodes) | Self::Min(nodes) | Self::Max(nodes) => {
                for node in nodes {
                    node.walk(visit);
                }
            }
            Self::Select {
                condition,
                then,
                otherwise,
            } => {
                condition.node.walk(visit);
                then.walk(visit);
                otherwise.walk(visit);
            }
        }
    }

    /// Every `(table, rank)` pair the tree reads.
    pub fn table_refs(&self) -> Vec<(&TableId, RankKey)> {
        let mut refs = Vec::new();
        self.walk(&mut |node| {
            if let Node::Table { table, rank } = node {
                refs.push((table, *rank));
            }
        });
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_and_table_refs() {
        let node = Node::select(
            Node::stat(StatKey::ElementalMastery),
            Comparison::Gt,
            0.0,
            Node::product([
                Node::stat(StatKey::TotalAtk),
                Node::table("a", RankKey::Refinement),
            ]),
            Node::table("b", RankKey::Refinement),
        );

        assert_eq!(node.depth(), 3);
        let refs: Vec<&str> = node.table_refs().iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(refs, ["a", "b"]);
    }
}
