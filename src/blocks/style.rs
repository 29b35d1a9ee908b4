//! Style classes for blocks.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::partition::Block;

/// Visual class of a block, named after the kind of token it imitates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleClass {
    Parenthesis,
    Space,
    Comment,
    Function,
    AccessModifier,
    PrimitiveType,
    ConditionalStatement,
    JumpStatement,
    VariableDeclarationConst,
    VariableDeclarationLet,
}

/// Classes for blocks exactly `min_width` wide.
pub const MIN_WIDTH_POOL: &[StyleClass] = &[StyleClass::Parenthesis, StyleClass::Space];

/// Classes for blocks exactly `max_width` wide.
pub const MAX_WIDTH_POOL: &[StyleClass] = &[StyleClass::Comment, StyleClass::Function];

/// Classes for every other width.
pub const GENERAL_POOL: &[StyleClass] = &[
    StyleClass::AccessModifier,
    StyleClass::PrimitiveType,
    StyleClass::ConditionalStatement,
    StyleClass::JumpStatement,
    StyleClass::VariableDeclarationConst,
    StyleClass::VariableDeclarationLet,
];

impl StyleClass {
    /// Every class, in declaration order.
    pub const ALL: [StyleClass; 10] = [
        StyleClass::Parenthesis,
        StyleClass::Space,
        StyleClass::Comment,
        StyleClass::Function,
        StyleClass::AccessModifier,
        StyleClass::PrimitiveType,
        StyleClass::ConditionalStatement,
        StyleClass::JumpStatement,
        StyleClass::VariableDeclarationConst,
        StyleClass::VariableDeclarationLet,
    ];

    /// CSS class name.
    pub fn name(&self) -> &'static str {
        match self {
            StyleClass::Parenthesis => "parenthesis",
            StyleClass::Space => "space",
            StyleClass::Comment => "comment",
            StyleClass::Function => "function",
            StyleClass::AccessModifier => "access-modifier",
            StyleClass::PrimitiveType => "primitive-type",
            StyleClass::ConditionalStatement => "conditional-statement",
            StyleClass::JumpStatement => "jump-statement",
            StyleClass::VariableDeclarationConst => "variable-declaration-const",
            StyleClass::VariableDeclarationLet => "variable-declaration-let",
        }
    }

    /// Look a class up by its CSS name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.name() == name)
    }

    /// The pool a block of `width` draws from. The minimum pool wins when
    /// `min_width == max_width`.
    pub fn pool_for(width: u32, min_width: u32, max_width: u32) -> &'static [StyleClass] {
        if width == min_width {
            MIN_WIDTH_POOL
        } else if width == max_width {
            MAX_WIDTH_POOL
        } else {
            GENERAL_POOL
        }
    }
}

impl std::fmt::Display for StyleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A block with its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledBlock {
    pub block: Block,
    pub class: StyleClass,
}

/// Pick a class for a block of `width`.
///
/// `previous` is excluded from the draw whenever the pool has another
/// member; a single-member pool repeats rather than failing.
pub fn class_for<R: Rng + ?Sized>(
    width: u32,
    min_width: u32,
    max_width: u32,
    previous: Option<StyleClass>,
    rng: &mut R,
) -> StyleClass {
    let pool = StyleClass::pool_for(width, min_width, max_width);
    let candidates: Vec<StyleClass> = pool
        .iter()
        .copied()
        .filter(|class| Some(*class) != previous)
        .collect();
    let candidates = if candidates.is_empty() {
        pool
    } else {
        &candidates[..]
    };

    candidates.choose(rng).copied().unwrap_or(pool[0])
}

/// Assign a class to each block in order, never repeating the previous one
/// where the pool allows it.
pub fn assign_styles<R: Rng + ?Sized>(
    blocks: &[Block],
    min_width: u32,
    max_width: u32,
    rng: &mut R,
) -> Vec<StyledBlock> {
    let mut previous = None;

    blocks
        .iter()
        .map(|&block| {
            let class = class_for(block.width, min_width, max_width, previous, rng);
            previous = Some(class);
            StyledBlock { block, class }
        })
        .collect()
}
