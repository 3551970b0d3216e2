use crate::hierarchy::Hierarchy;
use crate::layout::TreemapLayout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f64,
    pub height: f64,
    pub padding_inner: f64,
    pub nodes: Vec<NodeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: usize,
    pub path: String,
    pub name: String,
    pub category: Option<String>,
    pub depth: usize,
    pub height: usize,
    pub value: f64,
    pub leaf: bool,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl LayoutDump {
    pub fn from_layout(layout: &TreemapLayout, hierarchy: &Hierarchy) -> Self {
        let nodes = hierarchy
            .descendants()
            .into_iter()
            .map(|id| {
                let node = hierarchy.node(id);
                let rect = layout.rect(id);
                NodeDump {
                    id,
                    path: hierarchy.path(id),
                    name: node.name.clone(),
                    category: node.category.clone(),
                    depth: node.depth,
                    height: node.height,
                    value: node.value,
                    leaf: node.is_leaf(),
                    x0: rect.x0,
                    y0: rect.y0,
                    x1: rect.x1,
                    y1: rect.y1,
                }
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            padding_inner: layout.padding_inner,
            nodes,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &TreemapLayout, hierarchy: &Hierarchy) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, hierarchy);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreemapConfig;
    use crate::hierarchy::build;
    use crate::ir::DataNode;
    use crate::layout::compute_layout;

    #[test]
    fn dump_lists_every_node_in_preorder() {
        let data = DataNode::branch(
            "root",
            vec![DataNode::branch("C", vec![DataNode::leaf("a", "C", 2.0)])],
        );
        let tree = build(&data).unwrap();
        let layout = compute_layout(&tree, &TreemapConfig::default());
        let dump = LayoutDump::from_layout(&layout, &tree);
        let paths: Vec<&str> = dump.nodes.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, ["root", "root/C", "root/C/a"]);
        assert!(dump.nodes[2].leaf);

        let json = serde_json::to_value(&dump).unwrap();
        assert_eq!(json["width"], 960.0);
        assert_eq!(json["nodes"][2]["category"], "C");
    }
}
