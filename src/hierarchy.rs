//! Weighted, ordered tree built from a [`DataNode`] dataset.
//!
//! Nodes live in a flat arena indexed by [`NodeId`]; the root is always id 0
//! and ids are assigned in input pre-order. Sibling lists are sorted by
//! descending height, then descending value, keeping input order on ties.

use crate::ir::DataNode;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::{debug, warn};

pub type NodeId = usize;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HierarchyError {
    #[error("dataset root `{name}` has no children")]
    EmptyRoot { name: String },
    #[error("leaf `{path}` has no numeric value")]
    MissingValue { path: String },
    #[error("leaf `{path}` has invalid value {value}")]
    InvalidValue { path: String, value: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    pub name: String,
    pub category: Option<String>,
    /// Sum of the leaf values in this subtree.
    pub value: f64,
    pub depth: usize,
    /// Longest path to a leaf; leaves are 0.
    pub height: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Position among its siblings in the input; final sort tie-breaker.
    pub input_index: usize,
}

impl HierarchyNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
}

pub fn build(root: &DataNode) -> Result<Hierarchy, HierarchyError> {
    if root.children.is_empty() {
        return Err(HierarchyError::EmptyRoot {
            name: root.name.clone(),
        });
    }

    let mut nodes = Vec::new();
    let mut path = Vec::new();
    insert_node(root, None, 0, 0, &mut path, &mut nodes)?;

    for id in 0..nodes.len() {
        let mut children = std::mem::take(&mut nodes[id].children);
        children.sort_by(|&a, &b| compare_siblings(&nodes[a], &nodes[b]));
        nodes[id].children = children;
    }

    let hierarchy = Hierarchy { nodes };
    debug!(
        root = %root.name,
        nodes = hierarchy.len(),
        leaves = hierarchy.leaves().len(),
        total = hierarchy.root().value,
        "built hierarchy"
    );
    Ok(hierarchy)
}

fn insert_node(
    data: &DataNode,
    parent: Option<NodeId>,
    depth: usize,
    input_index: usize,
    path: &mut Vec<String>,
    nodes: &mut Vec<HierarchyNode>,
) -> Result<NodeId, HierarchyError> {
    let id = nodes.len();
    path.push(data.name.clone());
    nodes.push(HierarchyNode {
        name: data.name.clone(),
        category: data.category.clone(),
        value: 0.0,
        depth,
        height: 0,
        parent,
        children: Vec::new(),
        input_index,
    });

    if data.is_leaf() {
        let value = match data.value {
            None => {
                return Err(HierarchyError::MissingValue {
                    path: path.join("/"),
                });
            }
            Some(value) if !value.is_finite() || value < 0.0 => {
                return Err(HierarchyError::InvalidValue {
                    path: path.join("/"),
                    value,
                });
            }
            Some(value) => value,
        };
        nodes[id].value = value;
    } else {
        if let Some(value) = data.value {
            warn!(path = %path.join("/"), value, "ignoring value on internal node");
        }
        let mut value = 0.0;
        let mut height = 0;
        for (index, child) in data.children.iter().enumerate() {
            let child_id = insert_node(child, Some(id), depth + 1, index, path, nodes)?;
            value += nodes[child_id].value;
            height = height.max(nodes[child_id].height + 1);
            nodes[id].children.push(child_id);
        }
        nodes[id].value = value;
        nodes[id].height = height;
    }

    path.pop();
    Ok(id)
}

fn compare_siblings(a: &HierarchyNode, b: &HierarchyNode) -> Ordering {
    b.height
        .cmp(&a.height)
        .then_with(|| b.value.total_cmp(&a.value))
        .then_with(|| a.input_index.cmp(&b.input_index))
}

impl Hierarchy {
    pub const ROOT: NodeId = 0;

    pub fn root(&self) -> &HierarchyNode {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, id: NodeId) -> &HierarchyNode {
        &self.nodes[id]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &HierarchyNode)> {
        self.nodes.iter().enumerate()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Top-level categories in sibling order.
    pub fn top_level(&self) -> &[NodeId] {
        self.children(Self::ROOT)
    }

    /// Every node in pre-order, following the sorted sibling order.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![Self::ROOT];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id].children.iter().rev().copied());
        }
        out
    }

    pub fn leaves(&self) -> Vec<NodeId> {
        self.descendants()
            .into_iter()
            .filter(|&id| self.nodes[id].is_leaf())
            .collect()
    }

    /// The ancestor of `id` sitting at `depth` (or `id` itself when it is
    /// already at that depth).
    pub fn ancestor_at_depth(&self, id: NodeId, depth: usize) -> Option<NodeId> {
        let mut current = id;
        loop {
            let node = &self.nodes[current];
            match node.depth.cmp(&depth) {
                Ordering::Equal => return Some(current),
                Ordering::Less => return None,
                Ordering::Greater => current = node.parent?,
            }
        }
    }

    /// Top-level category node a node belongs to.
    pub fn category_of(&self, id: NodeId) -> Option<NodeId> {
        self.ancestor_at_depth(id, 1)
    }

    pub fn path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            names.push(self.nodes[node_id].name.as_str());
            current = self.nodes[node_id].parent;
        }
        names.reverse();
        names.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataNode {
        DataNode::branch(
            "root",
            vec![
                DataNode::branch(
                    "Small",
                    vec![DataNode::leaf("s1", "Small", 1.0), DataNode::leaf("s2", "Small", 2.0)],
                ),
                DataNode::leaf("Loose", "Loose", 50.0),
                DataNode::branch(
                    "Big",
                    vec![
                        DataNode::leaf("b1", "Big", 10.0),
                        DataNode::leaf("b2", "Big", 30.0),
                        DataNode::leaf("b3", "Big", 10.0),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn aggregates_values_bottom_up() {
        let tree = build(&sample()).unwrap();
        assert_eq!(tree.root().value, 103.0);
        for (id, node) in tree.iter() {
            if node.is_leaf() {
                continue;
            }
            let sum: f64 = tree.children(id).iter().map(|&c| tree.node(c).value).sum();
            assert_eq!(node.value, sum, "node {}", node.name);
        }
    }

    #[test]
    fn computes_height_and_depth() {
        let tree = build(&sample()).unwrap();
        assert_eq!(tree.root().height, 2);
        assert_eq!(tree.root().depth, 0);
        let loose = tree.iter().find(|(_, n)| n.name == "Loose").unwrap().1;
        assert_eq!(loose.height, 0);
        assert_eq!(loose.depth, 1);
    }

    #[test]
    fn orders_by_height_then_value_stably() {
        let tree = build(&sample()).unwrap();
        let names: Vec<&str> = tree
            .top_level()
            .iter()
            .map(|&id| tree.node(id).name.as_str())
            .collect();
        assert_eq!(names, ["Big", "Small", "Loose"]);

        let big = tree.top_level()[0];
        let leaves: Vec<&str> = tree
            .children(big)
            .iter()
            .map(|&id| tree.node(id).name.as_str())
            .collect();
        // b1 and b3 tie on value; input order wins.
        assert_eq!(leaves, ["b2", "b1", "b3"]);
    }

    #[test]
    fn full_ties_fall_back_to_input_position() {
        let data = DataNode::branch(
            "root",
            vec![DataNode::branch(
                "Even",
                ["d", "a", "c", "b"]
                    .into_iter()
                    .map(|name| DataNode::leaf(name, "Even", 4.0))
                    .collect(),
            )],
        );
        let tree = build(&data).unwrap();
        let even = tree.top_level()[0];
        let order: Vec<(&str, usize)> = tree
            .children(even)
            .iter()
            .map(|&id| (tree.node(id).name.as_str(), tree.node(id).input_index))
            .collect();
        assert_eq!(order, [("d", 0), ("a", 1), ("c", 2), ("b", 3)]);

        let first = tree.node(tree.children(even)[0]);
        let last = tree.node(tree.children(even)[3]);
        assert_eq!(compare_siblings(first, last), Ordering::Less);
        assert_eq!(compare_siblings(last, first), Ordering::Greater);
    }

    #[test]
    fn leaves_follow_sorted_order() {
        let tree = build(&sample()).unwrap();
        let names: Vec<&str> = tree
            .leaves()
            .into_iter()
            .map(|id| tree.node(id).name.as_str())
            .collect();
        assert_eq!(names, ["b2", "b1", "b3", "s2", "s1", "Loose"]);
    }

    #[test]
    fn category_of_walks_to_depth_one() {
        let tree = build(&sample()).unwrap();
        let leaf = tree.iter().find(|(_, n)| n.name == "s1").unwrap().0;
        let category = tree.category_of(leaf).unwrap();
        assert_eq!(tree.node(category).name, "Small");
        assert_eq!(tree.category_of(Hierarchy::ROOT), None);
        assert_eq!(tree.path(leaf), "root/Small/s1");
    }

    #[test]
    fn rejects_empty_root() {
        let err = build(&DataNode::branch("root", Vec::new())).unwrap_err();
        assert_eq!(
            err,
            HierarchyError::EmptyRoot {
                name: "root".to_string()
            }
        );
    }

    #[test]
    fn rejects_leaf_without_value() {
        let mut data = sample();
        data.children[0].children[1].value = None;
        let err = build(&data).unwrap_err();
        assert_eq!(
            err,
            HierarchyError::MissingValue {
                path: "root/Small/s2".to_string()
            }
        );
    }

    #[test]
    fn rejects_negative_and_nan_values() {
        let mut data = sample();
        data.children[1].value = Some(-1.0);
        assert!(matches!(
            build(&data),
            Err(HierarchyError::InvalidValue { .. })
        ));
        data.children[1].value = Some(f64::NAN);
        assert!(matches!(
            build(&data),
            Err(HierarchyError::InvalidValue { .. })
        ));
    }

    #[test]
    fn internal_input_values_are_recomputed() {
        let mut data = sample();
        data.children[2].value = Some(999.0);
        let tree = build(&data).unwrap();
        let big = tree.top_level()[0];
        assert_eq!(tree.node(big).value, 50.0);
    }
}
