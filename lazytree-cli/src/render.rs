//! Plain-text tree output.

use lazytree_lib::model::FlatRow;
use lazytree_lib::model::NodeRef;
use lazytree_lib::model::TreeModel;

/// Formats one visible row.
pub fn row(row: &FlatRow) -> String {
    let indent = "  ".repeat(row.depth as usize);
    let marker = match (&row.node, row.has_children, row.is_expanded) {
        (NodeRef::Sentinel(_), _, _) => "»",
        (_, true, true) => "▾",
        (_, true, false) => "▸",
        (_, false, _) => "·",
    };
    format!("{indent}{marker} {}", row.label)
}

/// Prints the visible part of the tree, eliding the middle of long runs.
pub fn print_tree(model: &TreeModel, max_rows: usize) {
    let rows = model.flatten();
    if rows.len() <= max_rows {
        for r in &rows {
            println!("{}", row(r));
        }
        return;
    }

    let head = max_rows / 2;
    let tail = max_rows - head;
    for r in &rows[..head] {
        println!("{}", row(r));
    }
    println!("  ... {} rows ...", rows.len() - max_rows);
    for r in &rows[rows.len() - tail..] {
        println!("{}", row(r));
    }
}

#[cfg(test)]
mod tests {
    use lazytree_lib::model::ParentKey;
    use lazytree_lib::model::RegularNode;
    use lazytree_lib::model::SentinelNode;

    use super::*;

    #[test]
    fn test_row_markers() {
        let model = TreeModel::with_roots(vec![
            RegularNode::with_children(
                "a",
                "A",
                vec![
                    RegularNode::leaf("a1", "a1").into(),
                    SentinelNode::new(ParentKey::node("a"), 4).into(),
                ],
            )
            .expanded()
            .into(),
            RegularNode::lazy("b", "B").into(),
        ]);

        let lines: Vec<String> = model.flatten().iter().map(row).collect();
        assert_eq!(
            lines,
            ["▾ A", "  · a1", "  » Load more (4 remaining)", "▸ B"]
        );
    }
}
