//! Rule ordering the statements of a block by category.
//!
//! # Rationale
//!
//! A predictable order makes it easy to find a property and to spot
//! duplicates. Declarations are grouped by category:
//!
//! 1. positioning (`position`, `top`, `z-index`, ...)
//! 2. box model (`display`, `width`, `margin`, `border`, ...)
//! 3. typography (`font`, `color`, `text-align`, ...)
//! 4. other visual properties (`background`, `opacity`, ...)
//!
//! Properties the table does not know come last. Inside a category the
//! written order is kept, except that directional longhands follow their
//! shorthand in top, right, bottom, left order (clockwise from top-left for
//! radii). With `include_first`, `@extend` and then `@include` statements
//! precede all declarations.
//!
//! Comments, variables, nested rules and other at-rules split a block into
//! independently sorted runs, so nothing moves across them.
//!
//! # Configuration
//!
//! - `include_first`: Sort `@extend`/`@include` before declarations (default: true)
//! - `groups`: Category table as an array of property-name arrays
//!   (default: the four categories above)
//!
//! The rule is not part of the `recommended` preset.

use crate::registry::ConfigurableRule;
use scss_lint_core::syntax::token::{join_text, trim_trivia};
use scss_lint_core::syntax::visit::walk_block;
use scss_lint_core::syntax::{Block, Node, Stylesheet, Visit};
use scss_lint_core::{ConfigError, Edit, FileContext, Fix, Rule, RuleOptions, Severity, Violation};

/// Rule code for property-order.
pub const CODE: &str = "SL007";

/// Rule name for property-order.
pub const NAME: &str = "property-order";

/// Shorthands followed by their longhands in canonical order.
const DIRECTIONAL: &[&[&str]] = &[
    &["inset", "top", "right", "bottom", "left"],
    &["margin", "margin-top", "margin-right", "margin-bottom", "margin-left"],
    &["padding", "padding-top", "padding-right", "padding-bottom", "padding-left"],
    &[
        "border-width",
        "border-top-width",
        "border-right-width",
        "border-bottom-width",
        "border-left-width",
    ],
    &[
        "border-style",
        "border-top-style",
        "border-right-style",
        "border-bottom-style",
        "border-left-style",
    ],
    &[
        "border-color",
        "border-top-color",
        "border-right-color",
        "border-bottom-color",
        "border-left-color",
    ],
    &[
        "border-radius",
        "border-top-left-radius",
        "border-top-right-radius",
        "border-bottom-right-radius",
        "border-bottom-left-radius",
    ],
];

/// Default property categories, in sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyCategory {
    /// Where the box is placed.
    Positioning,
    /// Layout and size of the box.
    BoxModel,
    /// Text rendering.
    Typography,
    /// Everything else that changes how the box looks.
    Other,
}

impl PropertyCategory {
    /// All categories in sort order.
    pub const ALL: [Self; 4] = [Self::Positioning, Self::BoxModel, Self::Typography, Self::Other];

    /// Category name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Positioning => "positioning",
            Self::BoxModel => "box-model",
            Self::Typography => "typography",
            Self::Other => "other",
        }
    }

    /// Properties of this category.
    #[must_use]
    pub const fn properties(self) -> &'static [&'static str] {
        match self {
            Self::Positioning => &[
                "position", "inset", "top", "right", "bottom", "left", "z-index",
            ],
            Self::BoxModel => &[
                "display",
                "flex",
                "flex-basis",
                "flex-direction",
                "flex-flow",
                "flex-grow",
                "flex-shrink",
                "flex-wrap",
                "grid",
                "grid-area",
                "grid-template",
                "grid-template-areas",
                "grid-template-rows",
                "grid-template-columns",
                "grid-row",
                "grid-column",
                "grid-auto-flow",
                "gap",
                "row-gap",
                "column-gap",
                "align-content",
                "align-items",
                "align-self",
                "justify-content",
                "justify-items",
                "justify-self",
                "order",
                "float",
                "clear",
                "box-sizing",
                "width",
                "min-width",
                "max-width",
                "height",
                "min-height",
                "max-height",
                "margin",
                "margin-top",
                "margin-right",
                "margin-bottom",
                "margin-left",
                "padding",
                "padding-top",
                "padding-right",
                "padding-bottom",
                "padding-left",
                "border",
                "border-top",
                "border-right",
                "border-bottom",
                "border-left",
                "border-width",
                "border-top-width",
                "border-right-width",
                "border-bottom-width",
                "border-left-width",
                "border-style",
                "border-top-style",
                "border-right-style",
                "border-bottom-style",
                "border-left-style",
                "border-color",
                "border-top-color",
                "border-right-color",
                "border-bottom-color",
                "border-left-color",
                "border-radius",
                "border-top-left-radius",
                "border-top-right-radius",
                "border-bottom-right-radius",
                "border-bottom-left-radius",
                "overflow",
                "overflow-x",
                "overflow-y",
            ],
            Self::Typography => &[
                "color",
                "font",
                "font-family",
                "font-size",
                "font-style",
                "font-weight",
                "font-variant",
                "line-height",
                "letter-spacing",
                "word-spacing",
                "text-align",
                "text-decoration",
                "text-indent",
                "text-overflow",
                "text-shadow",
                "text-transform",
                "vertical-align",
                "white-space",
                "word-break",
                "overflow-wrap",
                "list-style",
            ],
            Self::Other => &[
                "background",
                "background-color",
                "background-image",
                "background-position",
                "background-repeat",
                "background-size",
                "box-shadow",
                "outline",
                "opacity",
                "visibility",
                "cursor",
                "pointer-events",
                "content",
                "transform",
                "transition",
                "animation",
            ],
        }
    }
}

/// Orders declarations by category.
#[derive(Debug, Clone)]
pub struct PropertyOrder {
    /// Property groups in sort order.
    pub groups: Vec<Vec<String>>,
    /// Whether `@extend` and `@include` come before declarations.
    pub include_first: bool,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for PropertyOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyOrder {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        let groups = PropertyCategory::ALL
            .iter()
            .map(|category| {
                category
                    .properties()
                    .iter()
                    .map(|p| (*p).to_string())
                    .collect()
            })
            .collect();
        Self {
            groups,
            include_first: true,
            severity: Severity::Warning,
        }
    }

    /// Replaces the category table.
    #[must_use]
    pub fn groups(mut self, groups: Vec<Vec<String>>) -> Self {
        self.groups = groups
            .into_iter()
            .map(|group| group.iter().map(|p| p.to_ascii_lowercase()).collect())
            .collect();
        self
    }

    /// Sets whether `@extend` and `@include` sort first.
    #[must_use]
    pub fn include_first(mut self, include_first: bool) -> Self {
        self.include_first = include_first;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sort rank of a statement, or `None` if it ends a run.
    fn rank(&self, node: &Node<'_>) -> Option<Rank> {
        match node {
            Node::Declaration(decl) if !decl.is_variable() => {
                let property = decl.normalized_property();
                let group = self
                    .groups
                    .iter()
                    .position(|group| group.iter().any(|p| *p == property))
                    .unwrap_or(self.groups.len());
                Some(Rank {
                    group: 2 + group,
                    directional: directional(&property),
                })
            }
            Node::AtRule(at) if self.include_first && at.block.is_none() => {
                let group = match at.name().as_str() {
                    "extend" => 0,
                    "include" => 1,
                    _ => return None,
                };
                Some(Rank {
                    group,
                    directional: None,
                })
            }
            _ => None,
        }
    }
}

impl Rule for PropertyOrder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Orders declarations by category, with includes first"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, ctx: &FileContext<'_>, sheet: &Stylesheet<'_>) -> Vec<Violation> {
        let mut visitor = OrderVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        visitor.visit_stylesheet(sheet);
        visitor.violations
    }
}

impl ConfigurableRule for PropertyOrder {
    fn from_options(options: &mut RuleOptions<'_>) -> Result<Self, ConfigError> {
        let include_first = options.bool("include_first", true)?;
        let mut rule = Self::new().include_first(include_first);
        if let Some(groups) = options.string_groups("groups")? {
            if groups.is_empty() {
                return Err(options.invalid("groups", "expected at least one group"));
            }
            rule = rule.groups(groups);
        }
        Ok(rule)
    }

    fn with_severity(self, severity: Severity) -> Self {
        self.severity(severity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rank {
    group: usize,
    /// Directional family and position within it.
    directional: Option<(usize, usize)>,
}

fn directional(property: &str) -> Option<(usize, usize)> {
    DIRECTIONAL.iter().enumerate().find_map(|(family, members)| {
        members
            .iter()
            .position(|m| *m == property)
            .map(|position| (family, position))
    })
}

/// Sorted permutation of a run: stable by group, then directional
/// families rearranged within the slots they occupy.
fn sorted_order(ranks: &[Rank]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..ranks.len()).collect();
    order.sort_by_key(|&i| ranks[i].group);

    let mut families: Vec<(usize, usize)> = Vec::new();
    for rank in ranks {
        if let Some((family, _)) = rank.directional {
            if !families.contains(&(rank.group, family)) {
                families.push((rank.group, family));
            }
        }
    }
    for (group, family) in families {
        let in_family = |i: usize| {
            ranks[i].group == group && ranks[i].directional.map(|(f, _)| f) == Some(family)
        };
        let slots: Vec<usize> = (0..order.len()).filter(|&p| in_family(order[p])).collect();
        let mut members: Vec<usize> = slots.iter().map(|&p| order[p]).collect();
        members.sort_by_key(|&i| ranks[i].directional.map_or(0, |(_, position)| position));
        for (slot, member) in slots.into_iter().zip(members) {
            order[slot] = member;
        }
    }
    order
}

fn label(node: &Node<'_>) -> String {
    match node {
        Node::Declaration(decl) => decl.property_name(),
        Node::AtRule(at) => {
            let target = join_text(trim_trivia(&at.prelude));
            if target.is_empty() {
                at.keyword.text.to_string()
            } else {
                format!("{} {target}", at.keyword.text)
            }
        }
        _ => String::new(),
    }
}

fn has_semicolon(node: &Node<'_>) -> bool {
    match node {
        Node::Declaration(decl) => decl.semicolon.is_some(),
        Node::AtRule(at) => at.semicolon.is_some(),
        _ => false,
    }
}

struct OrderVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a PropertyOrder,
    violations: Vec<Violation>,
}

impl OrderVisitor<'_> {
    fn check_run(&mut self, run: &[(&Node<'_>, Rank)]) {
        if run.len() < 2 {
            return;
        }
        let ranks: Vec<Rank> = run.iter().map(|(_, rank)| *rank).collect();
        let order = sorted_order(&ranks);
        let Some(first) = order.iter().enumerate().position(|(slot, &i)| slot != i) else {
            return;
        };
        let (misplaced, _) = run[first];
        let (expected, _) = run[order[first]];
        let Some(span) = misplaced.content_span() else {
            return;
        };
        let message = format!(
            "Expected `{}` before `{}`",
            label(expected),
            label(misplaced)
        );
        let mut violation = self.rule.violation(self.ctx, span, message);

        if run.iter().all(|(node, _)| has_semicolon(node)) {
            let edits: Vec<Edit> = order
                .iter()
                .enumerate()
                .filter(|&(slot, &i)| slot != i)
                .filter_map(|(slot, &i)| {
                    let (target, _) = run[slot];
                    let (source, _) = run[i];
                    target
                        .content_span()
                        .map(|span| Edit::replace(span.range(), source.content_text()))
                })
                .collect();
            violation = violation.with_fix(Fix::new("Reorder declarations", edits));
        }
        self.violations.push(violation);
    }
}

impl<'ast> Visit<'ast> for OrderVisitor<'_> {
    fn visit_block(&mut self, node: &'ast Block<'ast>) {
        let mut run = Vec::new();
        for child in &node.children {
            match self.rule.rank(child) {
                Some(rank) => run.push((child, rank)),
                None => {
                    self.check_run(&run);
                    run.clear();
                }
            }
        }
        self.check_run(&run);
        walk_block(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{check, fix, messages};

    fn fix_code(code: &str) -> String {
        fix(&PropertyOrder::new(), code)
    }

    #[test]
    fn test_orders_by_category() {
        let code = ".a {\n  color: red;\n  position: absolute;\n  display: block;\n}";
        assert_eq!(
            messages(&check(&PropertyOrder::new(), code)),
            vec!["Expected `position` before `color`"]
        );
        assert_eq!(
            fix_code(code),
            ".a {\n  position: absolute;\n  display: block;\n  color: red;\n}"
        );
    }

    #[test]
    fn test_keeps_written_order_within_category() {
        let rule = PropertyOrder::new();
        assert!(check(&rule, ".a { height: 1px; width: 2px; display: block; }").is_empty());
    }

    #[test]
    fn test_directional_order() {
        assert_eq!(
            fix_code(".a { margin-left: 0; width: 1px; margin-top: 0; }"),
            ".a { margin-top: 0; width: 1px; margin-left: 0; }"
        );
        assert_eq!(
            fix_code(".a { margin-top: 1px; margin: 0; }"),
            ".a { margin: 0; margin-top: 1px; }"
        );
    }

    #[test]
    fn test_includes_first() {
        let code = ".a {\n  color: red;\n  @include button;\n  @extend %base;\n}";
        let violations = check(&PropertyOrder::new(), code);
        assert_eq!(
            messages(&violations),
            vec!["Expected `@extend %base` before `color`"]
        );
        assert_eq!(
            fix_code(code),
            ".a {\n  @extend %base;\n  @include button;\n  color: red;\n}"
        );
    }

    #[test]
    fn test_include_first_disabled() {
        let rule = PropertyOrder::new().include_first(false);
        assert!(check(&rule, ".a { color: red; @include x; }").is_empty());
    }

    #[test]
    fn test_unknown_properties_last() {
        assert_eq!(
            fix_code(".a { foo: 1; color: red; }"),
            ".a { color: red; foo: 1; }"
        );
    }

    #[test]
    fn test_runs_split_by_comments_and_variables() {
        let rule = PropertyOrder::new();
        assert!(check(&rule, ".a {\n  color: red;\n  // layout\n  position: absolute;\n}").is_empty());
        assert!(check(&rule, ".a { color: red; $x: 1; position: absolute; }").is_empty());
        assert!(check(&rule, ".a { color: red; .b { c: d; } position: absolute; }").is_empty());
    }

    #[test]
    fn test_missing_semicolon_is_report_only() {
        let violations = check(&PropertyOrder::new(), ".a { color: red; position: absolute }");
        assert_eq!(violations.len(), 1);
        assert!(!violations[0].is_fixable());
    }

    #[test]
    fn test_custom_groups() {
        let rule = PropertyOrder::new().groups(vec![
            vec!["Color".to_string()],
            vec!["display".to_string()],
        ]);
        assert_eq!(
            messages(&check(&rule, ".a { display: block; color: red; }")),
            vec!["Expected `color` before `display`"]
        );
    }

    #[test]
    fn test_vendor_prefixes_share_a_slot() {
        let rule = PropertyOrder::new();
        assert!(check(&rule, ".a { -webkit-transition: a; transition: a; opacity: 1; }").is_empty());
    }
}
