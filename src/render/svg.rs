use super::{LegendEntry, RenderContext, Tile, escape_xml};

pub(super) fn treemap_svg(width: f64, height: f64, tiles: &[Tile], ctx: &RenderContext) -> String {
    let theme = &ctx.theme;
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"treemap-svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    for tile in tiles {
        let id = escape_xml(&tile.dom_id);
        // Size comes from the snapped corners so neighbours share an edge.
        let (x0, y0) = (snap(tile.rect.x0), snap(tile.rect.y0));
        let (x1, y1) = (snap(tile.rect.x1), snap(tile.rect.y1));
        svg.push_str(&format!("<g transform=\"translate({x0:.2}, {y0:.2})\">"));
        svg.push_str(&format!(
            "<rect class=\"tile\" id=\"{id}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" data-name=\"{}\" data-category=\"{}\" data-value=\"{}\"/>",
            x1 - x0,
            y1 - y0,
            tile.fill,
            escape_xml(&tile.name),
            escape_xml(&tile.category),
            tile.value
        ));
        svg.push_str(&format!(
            "<clipPath id=\"clip-{id}\"><use href=\"#{id}\"/></clipPath>"
        ));
        svg.push_str(&format!(
            "<text clip-path=\"url(#clip-{id})\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">",
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.text_color
        ));
        for (idx, line) in tile.lines.iter().enumerate() {
            let y = ctx.label.y + idx as f64 * ctx.label.line_height;
            svg.push_str(&format!(
                "<tspan x=\"{}\" y=\"{y}\">{}</tspan>",
                ctx.label.x,
                escape_xml(line)
            ));
        }
        svg.push_str("</text></g>");
    }

    svg.push_str("</svg>");
    svg
}

fn snap(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(super) fn legend_svg(entries: &[LegendEntry], ctx: &RenderContext) -> String {
    let theme = &ctx.theme;
    let legend = &ctx.legend;
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"legend-svg\" width=\"{0}\" height=\"{1}\" viewBox=\"0 0 {0} {1}\">",
        legend.width, legend.height
    ));
    svg.push_str(&format!(
        "<g id=\"legend\" transform=\"translate({}, {})\">",
        legend.offset_x, legend.offset_y
    ));
    for entry in entries {
        svg.push_str(&format!(
            "<rect class=\"legend-item\" x=\"{}\" y=\"{}\" width=\"{size}\" height=\"{size}\" fill=\"{}\"/>",
            entry.x,
            entry.y,
            entry.fill,
            size = legend.swatch_size
        ));
    }
    for entry in entries {
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            entry.x + legend.label_offset_x,
            entry.y + legend.label_offset_y,
            escape_xml(&theme.font_family),
            theme.legend_font_size,
            theme.legend_text_color,
            escape_xml(&entry.name)
        ));
    }
    svg.push_str("</g></svg>");
    svg
}
