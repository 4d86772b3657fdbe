pub mod card;
pub mod index;
pub mod layout;
pub mod loader;
pub mod measure;
pub mod model;
pub mod resolver;
pub mod scene;
pub mod svg;
pub mod view;

use wasm_bindgen::prelude::*;

use layout::{GenerationSpacing, Layout, LayoutEngine, LineageLayout};
use loader::{load_dataset, load_lineage};
use resolver::TraversalLimits;
use scene::Session;
use svg::SvgRenderer;
use view::Viewport;

/// Initialize logging and the panic hook for the WASM target.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = console_log::init_with_level(log::Level::Info);
        console_error_panic_hook::set_once();
    }
}

/// Render the family tree around `focus` to SVG
#[wasm_bindgen(js_name = "familyTreeToSvg")]
pub fn render_family_tree(source: &str, focus: Option<String>) -> Result<String, String> {
    let dataset = load_dataset(source).map_err(|e| e.to_string())?;
    let focus = match focus {
        Some(id) => id,
        None => dataset.default_focus().ok_or("Dataset has no people")?.to_string(),
    };
    let session =
        Session::new(dataset, &focus, TraversalLimits::default()).map_err(|e| e.to_string())?;
    let layout = LayoutEngine::default().layout(session.scene(), session.dataset());

    Ok(SvgRenderer::default().render(&layout))
}

/// Render a flat parent-linked lineage to SVG
#[wasm_bindgen(js_name = "lineageToSvg")]
pub fn render_lineage(source: &str) -> Result<String, String> {
    let lineage = load_lineage(source).map_err(|e| e.to_string())?;
    let layout = LineageLayout::compute(&lineage, &GenerationSpacing::default());

    Ok(SvgRenderer::default().render_lineage(&layout))
}

/// Interactive tree: the host registers its pointer and wheel listeners once,
/// forwards events here, and redraws from `svg()` / `transform()`.
#[wasm_bindgen]
pub struct TreeView {
    session: Session,
    engine: LayoutEngine,
    layout: Layout,
    viewport: Viewport,
}

#[wasm_bindgen]
impl TreeView {
    #[wasm_bindgen(constructor)]
    pub fn new(source: &str, focus: Option<String>) -> Result<TreeView, String> {
        let dataset = load_dataset(source).map_err(|e| e.to_string())?;
        let focus = match focus {
            Some(id) => id,
            None => dataset.default_focus().ok_or("Dataset has no people")?.to_string(),
        };
        let session =
            Session::new(dataset, &focus, TraversalLimits::default()).map_err(|e| e.to_string())?;
        let engine = LayoutEngine::default();
        let layout = engine.layout(session.scene(), session.dataset());

        Ok(Self {
            session,
            engine,
            layout,
            viewport: Viewport::default(),
        })
    }

    pub fn focus(&self) -> String {
        self.session.focus().to_string()
    }

    /// Returns false (and changes nothing) for unknown ids.
    pub fn refocus(&mut self, id: &str) -> bool {
        if !self.session.refocus(id) {
            return false;
        }
        self.layout = self.engine.layout(self.session.scene(), self.session.dataset());
        true
    }

    /// Selection at screen coordinates; refocuses on the person under the pointer.
    pub fn click(&mut self, sx: f64, sy: f64) -> bool {
        let (x, y) = self.viewport.screen_to_world(sx, sy);
        match self.layout.node_at(x, y).map(str::to_string) {
            Some(id) => self.refocus(&id),
            None => false,
        }
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.viewport.zoom(delta_y);
    }

    #[wasm_bindgen(js_name = "pointerDown")]
    pub fn pointer_down(&mut self, sx: f64, sy: f64) {
        self.viewport.begin_pan(sx, sy);
    }

    #[wasm_bindgen(js_name = "pointerMove")]
    pub fn pointer_move(&mut self, sx: f64, sy: f64) -> bool {
        self.viewport.drag_to(sx, sy)
    }

    #[wasm_bindgen(js_name = "pointerUp")]
    pub fn pointer_up(&mut self) {
        self.viewport.end_pan();
    }

    pub fn svg(&self) -> String {
        SvgRenderer::default().render(&self.layout)
    }

    pub fn transform(&self) -> String {
        self.viewport.css()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILY: &str = r#"{
        "people": {
            "root": { "name": "Root" },
            "spouse": { "name": "Spouse" },
            "c": { "name": "Child" }
        },
        "unions": [ { "id": "u1", "partner1": "root", "partner2": "spouse", "type": "married", "children": ["c"] } ]
    }"#;

    #[test]
    fn test_render_family_tree() {
        let svg = render_family_tree(FAMILY, Some("root".to_string())).unwrap();
        assert!(svg.contains(r#"data-person-id="spouse""#));
    }

    #[test]
    fn test_render_default_focus() {
        let svg = render_family_tree(FAMILY, None).unwrap();
        assert!(svg.contains(r#"<g data-person-id="root">"#));
    }

    #[test]
    fn test_render_unknown_focus() {
        let err = render_family_tree(FAMILY, Some("ghost".to_string())).unwrap_err();
        assert_eq!(err, "Unknown person: ghost");
    }

    #[test]
    fn test_tree_view_click_refocuses() {
        let mut view = TreeView::new(FAMILY, Some("root".to_string())).unwrap();
        let (x, y) = view.layout.node("c").unwrap().center();

        assert!(view.click(x, y));
        assert_eq!(view.focus(), "c");
        assert!(!view.click(-50.0, -50.0));
        assert!(!view.refocus("ghost"));
        assert_eq!(view.focus(), "c");
    }

    #[test]
    fn test_sample_dataset() {
        let dataset = load_dataset(include_str!("../data/family.json")).unwrap();
        assert_eq!(dataset.default_focus(), Some("ion"));

        let session = Session::new(dataset, "mihai", TraversalLimits::default()).unwrap();
        let scene = session.scene();

        let center: Vec<&str> = scene
            .center()
            .unwrap()
            .entries
            .iter()
            .filter_map(|e| e.person_id())
            .collect();
        assert_eq!(center, vec!["mihai", "carmen", "ioana"]);

        let summary = scene.rows.last().unwrap();
        assert_eq!(
            summary.entries,
            vec![scene::Entry::More(resolver::Summary {
                parent: "luca".to_string(),
                depth: 3,
                count: 1,
            })]
        );
        assert!(session.index().unions_of("ghost").is_empty());
    }

    #[test]
    fn test_sample_lineage() {
        let svg = render_lineage(include_str!("../data/lineage.json")).unwrap();
        assert!(svg.contains(r#"data-person-id="sofia""#));
    }

    #[test]
    fn test_tree_view_click_after_pan() {
        let mut view = TreeView::new(FAMILY, Some("root".to_string())).unwrap();
        view.pointer_down(0.0, 0.0);
        view.pointer_move(25.0, 10.0);
        view.pointer_up();

        let (x, y) = view.layout.node("spouse").unwrap().center();
        assert!(view.click(x + 25.0, y + 10.0));
        assert_eq!(view.focus(), "spouse");
    }
}
