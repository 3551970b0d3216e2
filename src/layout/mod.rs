mod treemap;
pub(crate) mod types;
pub use types::*;

use crate::config::TreemapConfig;
use crate::hierarchy::{Hierarchy, NodeId};
use tracing::debug;

/// Lays the hierarchy out on a `width` x `height` canvas.
///
/// Inner padding is split in half: a parent's children are tiled into the
/// parent's rectangle grown by `padding_inner / 2`, and every non-root node
/// then shrinks by the same half. Siblings end up `padding_inner` apart and
/// outermost children sit flush with their parent's edges.
pub fn compute_layout(hierarchy: &Hierarchy, config: &TreemapConfig) -> TreemapLayout {
    let width = config.width.max(0.0);
    let height = config.height.max(0.0);
    let padding = config.padding_inner.max(0.0);
    let half = padding / 2.0;

    let mut rects = vec![LayoutRect::default(); hierarchy.len()];
    rects[Hierarchy::ROOT] = LayoutRect::new(0.0, 0.0, width, height);

    let mut items: Vec<(NodeId, f64)> = Vec::new();
    for id in hierarchy.descendants() {
        let node = hierarchy.node(id);
        let inset = if node.depth == 0 { 0.0 } else { half };
        let rect = rects[id].inset(inset);
        rects[id] = rect;

        if node.is_leaf() {
            continue;
        }
        items.clear();
        items.extend(
            node.children
                .iter()
                .map(|&child| (child, hierarchy.node(child).value)),
        );
        treemap::tile(
            config.tiling,
            config.ratio,
            node.depth,
            &items,
            node.value,
            rect.inset(-half),
            &mut rects,
        );
    }

    debug!(
        width,
        height,
        padding,
        tiling = ?config.tiling,
        nodes = rects.len(),
        "computed treemap layout"
    );

    TreemapLayout {
        width,
        height,
        padding_inner: padding,
        rects,
    }
}
