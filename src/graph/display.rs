use super::{NodeId, Workspace};
use itertools::Itertools;
use std::fmt;

/// A wrapper to display a workspace as an indented tree of blocks.
///
/// Each root chain is printed at top level; inputs hang below their block,
/// labelled with the input name, and chained statements are siblings.
pub struct WorkspaceTree<'a> {
    pub workspace: &'a Workspace,
}

impl<'a> fmt::Display for WorkspaceTree<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roots = self.workspace.roots();
        for (i, root) in roots.iter().enumerate() {
            self.fmt_chain(*root, None, f, "", i + 1 == roots.len())?;
        }
        Ok(())
    }
}

impl<'a> WorkspaceTree<'a> {
    fn fmt_chain(
        &self,
        first: NodeId,
        label: Option<&str>,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let mut current = Some(first);
        let mut label = label;
        while let Some(id) = current {
            let next = self.workspace.node(id).and_then(|n| n.next);
            self.fmt_node(id, label, f, prefix, is_last && next.is_none())?;
            label = None;
            current = next;
        }
        Ok(())
    }

    fn fmt_node(
        &self,
        id: NodeId,
        label: Option<&str>,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let Some(node) = self.workspace.node(id) else {
            return writeln!(f, "{}└── <missing {}>", prefix, id);
        };
        let marker = if is_last { "└── " } else { "├── " };
        write!(f, "{}{}", prefix, marker)?;
        if let Some(label) = label {
            write!(f, "{}: ", label)?;
        }
        write!(f, "{} {}", node.block_type, id)?;

        if !node.fields.is_empty() {
            let rendered = node
                .fields
                .iter()
                .sorted()
                .map(|(k, v)| format!("{}={:?}", k, v))
                .join(", ");
            write!(f, " [{}]", rendered)?;
        }
        writeln!(f)?;

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        for (i, (input, link)) in node.inputs.iter().enumerate() {
            let last_input = i + 1 == node.inputs.len();
            self.fmt_chain(link.target, Some(input), f, &child_prefix, last_input)?;
        }
        Ok(())
    }
}
