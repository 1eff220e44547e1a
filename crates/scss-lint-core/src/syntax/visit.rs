//! Read-only traversal of the syntax tree.
//!
//! Modelled on `syn::visit`: each `visit_*` method defaults to the matching
//! `walk_*` function, so an implementation overrides only the nodes it cares
//! about and calls `walk_*` to keep descending.

use super::cst::{AtRule, Block, Bogus, Comment, Declaration, Empty, Node, RuleSet, Stylesheet};

/// Visitor over a borrowed [`Stylesheet`].
pub trait Visit<'ast> {
    /// Visits the root.
    fn visit_stylesheet(&mut self, node: &'ast Stylesheet<'ast>) {
        walk_stylesheet(self, node);
    }

    /// Visits any statement.
    fn visit_node(&mut self, node: &'ast Node<'ast>) {
        walk_node(self, node);
    }

    /// Visits a rule set.
    fn visit_rule_set(&mut self, node: &'ast RuleSet<'ast>) {
        walk_rule_set(self, node);
    }

    /// Visits a `{ ... }` body.
    fn visit_block(&mut self, node: &'ast Block<'ast>) {
        walk_block(self, node);
    }

    /// Visits an at-rule.
    fn visit_at_rule(&mut self, node: &'ast AtRule<'ast>) {
        walk_at_rule(self, node);
    }

    /// Visits a declaration.
    fn visit_declaration(&mut self, _node: &'ast Declaration<'ast>) {}

    /// Visits a stand-alone comment.
    fn visit_comment(&mut self, _node: &'ast Comment<'ast>) {}

    /// Visits a stray semicolon.
    fn visit_empty(&mut self, _node: &'ast Empty<'ast>) {}

    /// Visits tokens skipped by error recovery.
    fn visit_bogus(&mut self, _node: &'ast Bogus<'ast>) {}
}

/// Visits every top-level statement.
pub fn walk_stylesheet<'ast, V>(v: &mut V, node: &'ast Stylesheet<'ast>)
where
    V: Visit<'ast> + ?Sized,
{
    for child in &node.children {
        v.visit_node(child);
    }
}

/// Dispatches on the node variant.
pub fn walk_node<'ast, V>(v: &mut V, node: &'ast Node<'ast>)
where
    V: Visit<'ast> + ?Sized,
{
    match node {
        Node::RuleSet(n) => v.visit_rule_set(n),
        Node::Declaration(n) => v.visit_declaration(n),
        Node::AtRule(n) => v.visit_at_rule(n),
        Node::Comment(n) => v.visit_comment(n),
        Node::Empty(n) => v.visit_empty(n),
        Node::Bogus(n) => v.visit_bogus(n),
    }
}

/// Visits the body of a rule set.
pub fn walk_rule_set<'ast, V>(v: &mut V, node: &'ast RuleSet<'ast>)
where
    V: Visit<'ast> + ?Sized,
{
    v.visit_block(&node.block);
}

/// Visits every statement in a block.
pub fn walk_block<'ast, V>(v: &mut V, node: &'ast Block<'ast>)
where
    V: Visit<'ast> + ?Sized,
{
    for child in &node.children {
        v.visit_node(child);
    }
}

/// Visits the body of a block at-rule.
pub fn walk_at_rule<'ast, V>(v: &mut V, node: &'ast AtRule<'ast>)
where
    V: Visit<'ast> + ?Sized,
{
    if let Some(block) = &node.block {
        v.visit_block(block);
    }
}
