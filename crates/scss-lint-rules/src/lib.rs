//! # scss-lint-rules
//!
//! Built-in style rules for scss-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | SL001 | `indentation` | Indents nested lines by a fixed unit per block level |
//! | SL002 | `selector-spacing` | One space before `{` and after selector commas |
//! | SL003 | `color-literal` | Lowercase, shortest hex colors; `rgba(#hex, a)` for alpha |
//! | SL004 | `quote-style` | Uses the configured string quote |
//! | SL005 | `declaration-grouping` | One-line single-declaration rules, one declaration per line otherwise |
//! | SL006 | `max-nesting-depth` | Limits selector nesting depth |
//! | SL007 | `property-order` | Orders declarations by category table |
//! | SL008 | `selector-naming` | Class names follow a naming pattern (BEM by default) |
//! | SL009 | `zero-unit` | No unit on zero lengths |
//! | SL010 | `no-important` | Forbids `!important` |
//! | SL011 | `banned-functions` | Forbids listed functions (legacy color helpers by default) |
//! | SL012 | `declaration-spacing` | No space before `:`, one after |
//! | SL013 | `declaration-semicolon` | Every declaration ends with `;` |
//! | SL014 | `shorthand-values` | Shortest form of box shorthands |
//! | SL015 | `empty-line-between-rules` | One blank line before a nested or following rule |
//! | SL016 | `comment-style` | `//` comments instead of `/* */`, except headings |
//!
//! ## Usage
//!
//! ```ignore
//! use scss_lint_core::{Analyzer, Config};
//! use scss_lint_rules::build_rules;
//!
//! let config = Config::default();
//! let analyzer = Analyzer::builder()
//!     .rules(build_rules(&config)?)
//!     .config(config)
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod banned_functions;
mod color_literal;
mod comment_style;
mod declaration_grouping;
mod declaration_semicolon;
mod declaration_spacing;
mod empty_line_between_rules;
mod indentation;
mod max_nesting_depth;
mod no_important;
mod presets;
mod property_order;
mod quote_style;
mod registry;
mod selector_naming;
mod selector_spacing;
mod shorthand_values;
mod zero_unit;

#[cfg(test)]
mod test_util;

pub use banned_functions::BannedFunctions;
pub use color_literal::{ColorLiteral, HexCase};
pub use comment_style::CommentStyle;
pub use declaration_grouping::DeclarationGrouping;
pub use declaration_semicolon::DeclarationSemicolon;
pub use declaration_spacing::DeclarationSpacing;
pub use empty_line_between_rules::EmptyLineBetweenRules;
pub use indentation::{IndentStyle, Indentation};
pub use max_nesting_depth::MaxNestingDepth;
pub use no_important::NoImportant;
pub use presets::{all_rules, Preset};
pub use property_order::{PropertyCategory, PropertyOrder};
pub use quote_style::{Quote, QuoteStyle};
pub use registry::{build_rules, build_selected_rules, resolve_rule, ConfigurableRule, RuleInfo, RULES};
pub use selector_naming::SelectorNaming;
pub use selector_spacing::SelectorSpacing;
pub use shorthand_values::ShorthandValues;
pub use zero_unit::ZeroUnit;

/// Re-export core types for convenience.
pub use scss_lint_core::{Rule, Severity, Violation};
