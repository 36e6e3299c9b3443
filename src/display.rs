use std::fmt::Write;

use tracing::error;

use crate::{iterator::NodeRefIter, NodeRef};

/// Walks a tree in pre-order and hands each node to a line formatter.
///
/// Returns `fmt::Error` if a node turns up again below itself, which can only
/// happen when deeper cycles were linked past the one-level insertion check.
struct TreeDisplay;

impl TreeDisplay {
    fn format<V, F>(
        node: &NodeRef<V>,
        f: &mut std::fmt::Formatter<'_>,
        mut line: F,
    ) -> std::fmt::Result
    where
        F: FnMut(&mut std::fmt::Formatter<'_>, Line<'_, V>) -> std::fmt::Result,
    {
        let mut iter = NodeRefIter::new(node.clone()).peekable();

        while let Some(current) = iter.next() {
            if current.is_repeat() {
                error!("Cycle detected while rendering tree");
                return Err(std::fmt::Error);
            }

            // Peek at the next node to see if there are siblings
            let has_siblings = iter
                .peek()
                .map(|next| next.depth() == current.depth())
                .unwrap_or(false);

            let inner = current.node();
            line(
                f,
                Line {
                    depth: current.depth(),
                    value: inner.value(),
                    has_children: inner.num_children() > 0,
                    has_siblings,
                },
            )?;
        }

        Ok(())
    }
}

struct Line<'a, V> {
    depth: usize,
    value: Option<&'a V>,
    has_children: bool,
    has_siblings: bool,
}

const COLUMN_WIDTH: usize = 2;

/// One line per node, pre-order, indented two spaces per level. An absent
/// value renders as an empty line.
impl<V> std::fmt::Display for NodeRef<V>
where
    V: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        TreeDisplay::format(self, f, |f, line| {
            for _ in 0..line.depth * COLUMN_WIDTH {
                f.write_char(' ')?;
            }
            if let Some(value) = line.value {
                write!(f, "{}", value)?;
            }
            f.write_char('\n')
        })
    }
}

/// Outline rendering with box-drawing guides, see [`NodeRef::pretty`]
pub struct Pretty<'a, V>(&'a NodeRef<V>);

impl<V> NodeRef<V> {
    /// Display adapter drawing the tree as an outline:
    ///
    /// ```text
    /// ┏3
    /// ┃ ┣11
    /// ┃ ┣42
    /// ┃ ┃ ┗110
    /// ```
    pub fn pretty(&self) -> Pretty<'_, V> {
        Pretty(self)
    }
}

impl<V> std::fmt::Display for Pretty<'_, V>
where
    V: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        TreeDisplay::format(self.0, f, |f, line| {
            if line.depth == 0 {
                if line.has_children {
                    f.write_char('┏')?;
                } else {
                    f.write_char('━')?;
                }
            } else {
                // The position of the first character of the payload from the previous row
                let pos = line.depth * COLUMN_WIDTH;
                for i in 0..pos {
                    if i % COLUMN_WIDTH == 0 {
                        f.write_char('┃')?;
                    } else {
                        f.write_char(' ')?;
                    }
                }

                if line.has_children || line.has_siblings {
                    f.write_char('┣')?;
                } else {
                    f.write_char('┗')?;
                }
            }

            if let Some(value) = line.value {
                write!(f, "{}", value)?;
            }
            f.write_char('\n')
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write as _;

    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::{test::example_tree, NodeRef};

    #[test]
    fn canonical_rendering() {
        assert_eq!(example_tree().to_string(), "3\n  11\n  42\n    110\n  24\n  35\n");
    }

    #[test]
    fn leaf_renders_single_line() {
        assert_eq!(NodeRef::new(7).to_string(), "7\n");
        assert_eq!(NodeRef::<u8>::empty().to_string(), "\n");
    }

    #[test]
    fn absent_values_render_empty() {
        let root: NodeRef<&str> = NodeRef::empty();
        root.add_child(NodeRef::empty()).unwrap();
        root.add_child(NodeRef::new("x")).unwrap();
        assert_eq!(root.to_string(), "\n  \n  x\n");
    }

    #[test]
    fn pretty_outline() {
        let root = NodeRef::from_parts(Some("a"), [NodeRef::new("b"), NodeRef::new("c")]).unwrap();
        assert_eq!(root.pretty().to_string(), "┏a\n┃ ┣b\n┃ ┗c\n");

        assert_eq!(NodeRef::new("solo").pretty().to_string(), "━solo\n");
    }

    #[traced_test]
    #[test]
    fn deep_cycle_is_an_error() {
        let a = NodeRef::new("a");
        let b = NodeRef::new("b");
        let c = NodeRef::new("c");
        a.add_child(b.clone()).unwrap();
        b.add_child(c.clone()).unwrap();
        c.add_child(a.clone()).unwrap();

        let mut out = String::new();
        assert!(write!(out, "{}", a).is_err());
        assert!(logs_contain("Cycle detected"));

        c.remove_child(0).unwrap();
        out.clear();
        write!(out, "{}", a).unwrap();
        assert_eq!(out, "a\n  b\n    c\n");
    }
}
