//! Conversion of a store into a printable `termtree` forest.

use std::collections::HashMap;

use termtree::Tree;
use tracing::instrument;

use crate::domain::{ItemId, TreeItem, TreeStore};

pub trait TreeRender {
    /// Renders every root as a branch under a synthetic `title` node.
    fn to_tree(&self, title: &str) -> Tree<String>;
}

fn node_label<T: TreeItem>(item: &T) -> String {
    format!("{} [{}]", item.label(), item.id())
}

impl<T: TreeItem> TreeRender for TreeStore<T> {
    /// Built bottom-up with an explicit post-order stack, so deep chains do
    /// not recurse.
    #[instrument(level = "debug", skip(self))]
    fn to_tree(&self, title: &str) -> Tree<String> {
        let roots = self.roots();
        let mut built: HashMap<ItemId, Tree<String>> = HashMap::new();
        let mut stack: Vec<(&T, bool)> = roots.iter().rev().map(|&root| (root, false)).collect();

        while let Some((item, visited)) = stack.pop() {
            let children = self.children(item.id());
            if !visited {
                stack.push((item, true));
                for &child in children.iter().rev() {
                    stack.push((child, false));
                }
            } else {
                let leaves: Vec<Tree<String>> = children
                    .iter()
                    .filter_map(|child| built.remove(child.id()))
                    .collect();
                built.insert(
                    item.id().clone(),
                    Tree::new(node_label(item)).with_leaves(leaves),
                );
            }
        }

        let branches: Vec<Tree<String>> = roots
            .iter()
            .filter_map(|root| built.remove(root.id()))
            .collect();
        Tree::new(title.to_string()).with_leaves(branches)
    }
}
