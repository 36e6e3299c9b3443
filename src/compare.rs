use crate::{iterator::AncestorPath, NodeRef};

/// Structural comparison.
///
/// Two nodes are equal when their values are equal (an absent value only
/// equals another absent value), they have the same number of children, and
/// the children are pairwise equal. A leaf therefore never equals a node with
/// children, even when the values match. Handles to the same node are always
/// equal.
///
/// The walk uses an explicit stack, so depth is not limited by the call stack.
/// Distinct nodes are unequal once either side reaches a node below itself.
impl<V> PartialEq for NodeRef<V>
where
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        let mut lhs_path: AncestorPath<V> = AncestorPath::new();
        let mut rhs_path: AncestorPath<V> = AncestorPath::new();
        let mut stack = vec![(0, self.clone(), other.clone())];

        while let Some((depth, lhs, rhs)) = stack.pop() {
            if lhs.ptr_eq(&rhs) {
                continue;
            }

            lhs_path.truncate(depth);
            rhs_path.truncate(depth);
            if lhs_path.contains(&lhs) || rhs_path.contains(&rhs) {
                return false;
            }

            {
                let (l, r) = (lhs.node(), rhs.node());
                if l.value() != r.value() || l.num_children() != r.num_children() {
                    return false;
                }

                // Reversed so the first pair of children is compared next
                stack.extend(
                    l.children()
                        .iter()
                        .zip(r.children())
                        .rev()
                        .map(|(a, b)| (depth + 1, a.clone(), b.clone())),
                );
            }

            lhs_path.push(lhs, ());
            rhs_path.push(rhs, ());
        }

        true
    }
}

impl<V> Eq for NodeRef<V> where V: Eq {}
