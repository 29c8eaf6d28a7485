//! Section tree construction and token rollup.
//!
//! Converts the flat, heading-ordered section list produced by the parser
//! into a forest of nested sections, then computes cumulative token counts
//! bottom-up. The two phases are deliberately separate: own-content token
//! estimates exist only before [`rollup_tokens`] overwrites them, so
//! callers needing both must capture the flat sum first (see
//! [`own_token_sum`]).

use crate::Section;

/// Builds a section forest from a flat, heading-ordered list.
///
/// Single left-to-right pass with an explicit stack of currently open
/// ancestors: each section is popped under the nearest preceding section
/// of strictly lower level, regardless of skipped levels (an h3 directly
/// after an h1 becomes the h1's child). After shaping, pre-order positions
/// and parent links are assigned and cumulative tokens are rolled up.
pub fn build_tree(flat: Vec<Section>) -> Vec<Section> {
    let mut roots: Vec<Section> = Vec::new();
    let mut stack: Vec<Section> = Vec::new();

    for section in flat {
        // Pop until the stack top can be this section's parent.
        while stack.last().is_some_and(|top| top.level >= section.level) {
            attach_top(&mut stack, &mut roots);
        }
        stack.push(section);
    }

    while !stack.is_empty() {
        attach_top(&mut stack, &mut roots);
    }

    assign_positions(&mut roots);
    for root in &mut roots {
        rollup_tokens(root);
    }
    roots
}

/// Pops the stack top and attaches it to the new top, or to the roots
/// when the stack empties.
fn attach_top(stack: &mut Vec<Section>, roots: &mut Vec<Section>) {
    let Some(child) = stack.pop() else {
        return;
    };
    match stack.last_mut() {
        Some(parent) => parent.children.push(child),
        None => roots.push(child),
    }
}

/// Assigns pre-order positions and weak parent links across a forest.
pub fn assign_positions(sections: &mut [Section]) {
    let mut next = 0;
    for section in sections {
        assign(section, None, &mut next);
    }
}

/// Recursively numbers one subtree in pre-order.
fn assign(section: &mut Section, parent: Option<usize>, next: &mut usize) {
    section.position = *next;
    section.parent = parent;
    *next += 1;

    let position = section.position;
    for child in &mut section.children {
        assign(child, Some(position), next);
    }
}

/// Recursively rewrites `tokens` as own estimate plus all descendants'.
///
/// Destructive: the own-content estimate is not retained. Returns the
/// cumulative total for the subtree.
pub fn rollup_tokens(section: &mut Section) -> usize {
    let mut total = section.tokens;
    for child in &mut section.children {
        total += rollup_tokens(child);
    }
    section.tokens = total;
    total
}

/// Sums `tokens` over a forest in pre-order.
///
/// Meaningful as an own-content total only before [`rollup_tokens`] runs.
pub fn own_token_sum(sections: &[Section]) -> usize {
    sections
        .iter()
        .map(|s| s.tokens + own_token_sum(&s.children))
        .sum()
}
