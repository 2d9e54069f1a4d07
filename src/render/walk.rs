//! Two-phase traversal of a document tree.
//!
//! Container nodes are visited twice, once entering and once exiting. Leaf
//! nodes are visited once, entering.

use crate::error::Result;
use crate::model::Node;

/// What the walk should do after a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkStatus {
    /// Continue with the next node in document order.
    #[default]
    GoToNext,

    /// Do not descend into the children. The exit visit still happens.
    SkipChildren,

    /// Stop the walk without error.
    Terminate,
}

/// Walk `root` depth first, calling `visit(node, entering)` for every
/// visit. An error from the visitor aborts the walk.
pub fn walk<F>(root: &Node, visit: &mut F) -> Result<()>
where
    F: FnMut(&Node, bool) -> Result<WalkStatus>,
{
    walk_node(root, visit)?;
    Ok(())
}

fn walk_node<F>(node: &Node, visit: &mut F) -> Result<WalkStatus>
where
    F: FnMut(&Node, bool) -> Result<WalkStatus>,
{
    let status = visit(node, true)?;
    if status == WalkStatus::Terminate {
        return Ok(status);
    }
    if !node.is_container() {
        return Ok(WalkStatus::GoToNext);
    }

    if status != WalkStatus::SkipChildren {
        for child in &node.children {
            if walk_node(child, visit)? == WalkStatus::Terminate {
                return Ok(WalkStatus::Terminate);
            }
        }
    }

    match visit(node, false)? {
        WalkStatus::Terminate => Ok(WalkStatus::Terminate),
        _ => Ok(WalkStatus::GoToNext),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LinkData, NodeKind};

    fn events(root: &Node, stop_at: Option<&str>) -> Vec<String> {
        let mut seen = Vec::new();
        walk(root, &mut |node: &Node, entering: bool| {
            let tag = format!(
                "{}{}",
                if entering { "+" } else { "-" },
                if node.literal.is_empty() { node.kind.name() } else { node.literal.as_str() }
            );
            seen.push(tag);
            if matches!(node.kind, NodeKind::Image(_)) {
                return Ok(WalkStatus::SkipChildren);
            }
            if stop_at == Some(node.literal.as_str()) {
                return Ok(WalkStatus::Terminate);
            }
            Ok(WalkStatus::GoToNext)
        })
        .unwrap();
        seen
    }

    fn sample() -> Node {
        Node::with_children(
            NodeKind::Paragraph,
            vec![
                Node::text("a"),
                Node::with_children(NodeKind::Image(LinkData::default()), vec![Node::text("alt")]),
                Node::with_children(NodeKind::Emph, vec![Node::text("b")]),
            ],
        )
    }

    #[test]
    fn test_enter_exit_order() {
        assert_eq!(
            events(&sample(), None),
            vec!["+paragraph", "+a", "+image", "-image", "+emphasis", "+b", "-emphasis", "-paragraph"]
        );
    }

    #[test]
    fn test_terminate_stops_walk() {
        assert_eq!(events(&sample(), Some("a")), vec!["+paragraph", "+a"]);
    }

    #[test]
    fn test_error_aborts_walk() {
        let mut count = 0;
        let result = walk(&sample(), &mut |_: &Node, _| {
            count += 1;
            Err(crate::Error::Other("stop".into()))
        });
        assert!(result.is_err());
        assert_eq!(count, 1);
    }
}
