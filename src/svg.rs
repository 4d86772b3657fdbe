use crate::layout::{EdgePath, Layout, LayoutEdge, LayoutNode, LineageLayout, NodeKind};
use crate::measure::TextMetrics;
use crate::scene::{EdgeKind, Role};
use std::collections::HashMap;
use std::fmt::Write;

/// Box size in the lineage view, centered on each placed person.
const LINEAGE_BOX: (f64, f64) = (140.0, 50.0);

pub struct SvgRenderer {
    metrics: TextMetrics,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::default(),
        }
    }
}

impl SvgRenderer {
    pub fn render(&self, layout: &Layout) -> String {
        let mut svg = String::new();
        open_svg(&mut svg, layout.width, layout.height);

        writeln!(
            &mut svg,
            r#"<style>
  .person {{ fill: #fff; stroke: #555; stroke-width: 1.5; cursor: pointer; }}
  .person.selected {{ fill: #fff6d5; stroke: #c90; stroke-width: 2.5; }}
  .person.more {{ fill: #f2f2f2; stroke-dasharray: 4 3; cursor: default; }}
  .person-name {{ font-family: sans-serif; font-size: 14px; font-weight: bold; }}
  .person-info {{ font-family: sans-serif; font-size: 11px; fill: #444; }}
  .union-bar.married, .relationship-line.married {{ fill: #b03a48; stroke: #b03a48; }}
  .union-bar.partnered, .relationship-line.partnered {{ fill: #3a6fb0; stroke: #3a6fb0; stroke-dasharray: 6 4; }}
  .union-bar.unknown, .relationship-line.unknown {{ fill: #999; stroke: #999; stroke-dasharray: 2 3; }}
  .relationship-line {{ stroke-width: 2; }}
  .family-line {{ stroke: #777; stroke-width: 1.5; fill: none; }}
</style>"#
        )
        .unwrap();

        // Edges first (behind boxes)
        for edge in &layout.edges {
            self.render_edge(&mut svg, edge);
        }

        for node in &layout.nodes {
            self.render_node(&mut svg, node);
        }

        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }

    fn render_node(&self, svg: &mut String, node: &LayoutNode) {
        let (x, y, w, h) = (node.x, node.y, node.width, node.height);
        let text_x = x + self.metrics.padding_x;

        match &node.kind {
            NodeKind::Person { id, role, card } => {
                let class = match role {
                    Role::Focus => "person selected",
                    Role::Spouse(_) => "person spouse",
                    Role::Relative => "person",
                };
                writeln!(svg, r#"<g data-person-id="{}">"#, escape_xml(id)).unwrap();
                writeln!(
                    svg,
                    r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}" rx="6" />"#,
                    class, x, y, w, h
                )
                .unwrap();

                if let Role::Spouse(kind) = role {
                    writeln!(
                        svg,
                        r#"<rect class="union-bar {}" x="{}" y="{}" width="{}" height="4" />"#,
                        escape_xml(kind.as_str()),
                        x,
                        y,
                        w
                    )
                    .unwrap();
                }

                let mut line_y = y + self.metrics.padding_y + self.metrics.name_line_height * 0.75;
                writeln!(
                    svg,
                    r#"<text class="person-name" x="{}" y="{}">{}</text>"#,
                    text_x,
                    line_y,
                    escape_xml(&card.name)
                )
                .unwrap();
                line_y += self.metrics.name_line_height * 0.25;

                for detail in &card.details {
                    line_y += self.metrics.line_height;
                    writeln!(
                        svg,
                        r#"<text class="person-info" x="{}" y="{}">{}</text>"#,
                        text_x,
                        line_y,
                        escape_xml(detail)
                    )
                    .unwrap();
                }
                writeln!(svg, "</g>").unwrap();
            }
            NodeKind::Summary(summary) => {
                writeln!(
                    svg,
                    r#"<g data-more-of="{}"><title>{}</title>"#,
                    escape_xml(&summary.parent),
                    escape_xml(&summary.label())
                )
                .unwrap();
                writeln!(
                    svg,
                    r#"<rect class="person more" x="{}" y="{}" width="{}" height="{}" rx="6" />"#,
                    x, y, w, h
                )
                .unwrap();
                writeln!(
                    svg,
                    r#"<text class="person-info" x="{}" y="{}" text-anchor="middle">+ more descendants</text>"#,
                    x + w / 2.0,
                    y + h / 2.0 + 4.0
                )
                .unwrap();
                writeln!(svg, "</g>").unwrap();
            }
        }
    }

    fn render_edge(&self, svg: &mut String, edge: &LayoutEdge) {
        match (&edge.kind, &edge.path) {
            (EdgeKind::Spouse, EdgePath::Line { from, to }) => {
                let kind = edge.union_kind.as_ref().map(|k| k.as_str()).unwrap_or("unknown");
                writeln!(
                    svg,
                    r#"<line class="relationship-line {}" x1="{}" y1="{}" x2="{}" y2="{}" />"#,
                    escape_xml(kind),
                    from.0,
                    from.1,
                    to.0,
                    to.1
                )
                .unwrap();
            }
            (_, EdgePath::Curve { from, control, to }) => {
                writeln!(
                    svg,
                    r#"<path class="family-line" d="M {} {} Q {} {}, {} {}" data-parent-id="{}" data-child-id="{}" />"#,
                    from.0,
                    from.1,
                    control.0,
                    control.1,
                    to.0,
                    to.1,
                    escape_xml(&edge.from),
                    escape_xml(&edge.to)
                )
                .unwrap();
            }
            (_, EdgePath::Line { from, to }) => {
                writeln!(
                    svg,
                    r#"<line class="family-line" x1="{}" y1="{}" x2="{}" y2="{}" />"#,
                    from.0, from.1, to.0, to.1
                )
                .unwrap();
            }
        }
    }

    /// Render the generation grid of a lineage.
    pub fn render_lineage(&self, layout: &LineageLayout) -> String {
        let (bw, bh) = LINEAGE_BOX;
        let mut svg = String::new();
        open_svg(&mut svg, layout.width, layout.height);

        writeln!(
            &mut svg,
            r#"<style>
  .person {{ fill: #fff; stroke: #555; stroke-width: 1.5; cursor: pointer; }}
  .name {{ font-family: sans-serif; font-size: 13px; text-anchor: middle; }}
  .line {{ stroke: #777; stroke-width: 1.5; }}
</style>"#
        )
        .unwrap();

        let positions: HashMap<&str, (f64, f64)> =
            layout.people.iter().map(|p| (p.id.as_str(), (p.x, p.y))).collect();

        for (parent, child) in &layout.links {
            let (Some(&(px, py)), Some(&(cx, cy))) =
                (positions.get(parent.as_str()), positions.get(child.as_str()))
            else {
                continue;
            };
            writeln!(
                &mut svg,
                r#"<line class="line" x1="{}" y1="{}" x2="{}" y2="{}" />"#,
                px,
                py + bh / 2.0,
                cx,
                cy - bh / 2.0
            )
            .unwrap();
        }

        for person in &layout.people {
            writeln!(
                &mut svg,
                r#"<g data-person-id="{}"><rect class="person" x="{}" y="{}" width="{}" height="{}" rx="6" /><text class="name" x="{}" y="{}">{}</text></g>"#,
                escape_xml(&person.id),
                person.x - bw / 2.0,
                person.y - bh / 2.0,
                bw,
                bh,
                person.x,
                person.y + 5.0,
                escape_xml(&person.name)
            )
            .unwrap();
        }

        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }
}

fn open_svg(svg: &mut String, width: f64, height: f64) {
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, height, width, height
    )
    .unwrap();
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::FamilyIndex;
    use crate::layout::{GenerationSpacing, LayoutEngine};
    use crate::loader::{load_dataset, load_lineage};
    use crate::resolver::TraversalLimits;
    use crate::scene::TreeAssembler;

    fn render(json: &str, focus: &str) -> String {
        let dataset = load_dataset(json).unwrap();
        let index = FamilyIndex::build(&dataset);
        let scene = TreeAssembler::new(&dataset, &index, TraversalLimits::default())
            .assemble(focus)
            .unwrap();
        let layout = LayoutEngine::default().with_current_year(2024).layout(&scene, &dataset);
        SvgRenderer::default().render(&layout)
    }

    #[test]
    fn test_render_basic() {
        let svg = render(r#"{ "people": { "a": { "name": "Ana" } } }"#, "a");

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Ana"));
        assert!(svg.contains(r#"class="person selected""#));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_render_spouse_and_child() {
        let svg = render(
            r#"{
            "people": { "a": { "name": "Ana" }, "b": { "name": "Bo" }, "c": { "name": "Cy" } },
            "unions": [ { "id": "u1", "partner1": "a", "partner2": "b", "type": "married", "children": ["c"] } ]
        }"#,
            "a",
        );

        assert!(svg.contains(r#"class="union-bar married""#));
        assert!(svg.contains(r#"class="relationship-line married""#));
        assert!(svg.contains(r#"data-parent-id="a" data-child-id="c""#));
        assert!(svg.contains(r#"data-parent-id="b" data-child-id="c""#));
    }

    #[test]
    fn test_render_summary() {
        let svg = render(
            r#"{
            "people": { "a": { "name": "A" }, "b": { "name": "B" }, "c": { "name": "C" }, "d": { "name": "D" } },
            "unions": [
                { "id": "u1", "partner1": "a", "children": ["b"] },
                { "id": "u2", "partner1": "b", "children": ["c"] },
                { "id": "u3", "partner1": "c", "children": ["d"] }
            ]
        }"#,
            "a",
        );

        assert!(svg.contains("+ more descendants"));
        assert!(svg.contains("<title>+1 more</title>"));
    }

    #[test]
    fn test_render_escapes() {
        let svg = render(r#"{ "people": { "a": { "name": "Tom & \"Jerry\" <x>" } } }"#, "a");
        assert!(svg.contains("Tom &amp; &quot;Jerry&quot; &lt;x&gt;"));
    }

    #[test]
    fn test_render_unicode() {
        let svg = render(r#"{ "people": { "a": { "name": "山田太郎" } } }"#, "a");
        assert!(svg.contains("山田太郎"));
    }

    #[test]
    fn test_render_lineage() {
        let lineage = load_lineage(
            r#"{ "people": [ { "id": "p", "name": "Parent" }, { "id": "c", "name": "Child", "parents": ["p"] } ] }"#,
        )
        .unwrap();
        let layout = LineageLayout::compute(&lineage, &GenerationSpacing::default());
        let svg = SvgRenderer::default().render_lineage(&layout);

        // parent box bottom edge to child box top edge
        assert!(svg.contains(r#"x1="150" y1="125" x2="150" y2="225""#));
        assert!(svg.contains(r#"<rect class="person" x="80" y="75""#));
        assert!(svg.contains("Child"));
    }
}
