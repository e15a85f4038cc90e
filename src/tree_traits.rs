//! Conversion of trees into `termtree` for display.

use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::config::RenderSettings;
use crate::domain::{Head, TreeBuilder, TreeNode};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String> {
        self.render_with(&RenderSettings::default())
    }

    fn render_with(&self, settings: &RenderSettings) -> Tree<String>;
}

impl<T: Display> TreeNodeConvert for TreeNode<T> {
    #[instrument(level = "trace", skip_all)]
    fn render_with(&self, settings: &RenderSettings) -> Tree<String> {
        // Recursively construct the children
        let leaves: Vec<_> = self
            .children()
            .iter()
            .map(|child| child.render_with(settings))
            .collect();

        Tree::new(node_label(self, settings)).with_leaves(leaves)
    }
}

impl<T: Display> TreeNodeConvert for TreeBuilder<T> {
    fn render_with(&self, settings: &RenderSettings) -> Tree<String> {
        match self.head() {
            Ok(head) => head.render_with(settings),
            Err(_) => Tree::new(settings.empty_label.clone()),
        }
    }
}

fn node_label<T: Display>(node: &TreeNode<T>, settings: &RenderSettings) -> String {
    let mut label = node.value().to_string();
    if settings.show_prefix {
        if let Some(prefix) = node.prefix() {
            label.push_str(&format!(" [{prefix}]"));
        }
    }
    if settings.show_identity {
        let identity = node.identity();
        label.push_str(&format!(" #{}", identity.short(settings.identity_width)));
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_identity_shown_when_rendering_then_label_has_short_hash() {
        let node = TreeNode::new("leaf");
        let settings = RenderSettings {
            show_identity: true,
            identity_width: 4,
            ..RenderSettings::default()
        };

        let rendered = node.render_with(&settings).to_string();

        let expected = format!("leaf #{}", node.identity().short(4));
        assert_eq!(rendered.lines().next(), Some(expected.as_str()));
    }
}
