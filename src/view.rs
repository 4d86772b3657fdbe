//! Pan and zoom state for an interactive view. Holds no listeners; the host
//! feeds pointer and wheel input in and reads the transform back out.

const ZOOM_IN: f64 = 1.1;
const ZOOM_OUT: f64 = 0.9;

#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, k: 1.0 }
    }
}

#[derive(Clone, Debug, Default)]
struct PanState {
    active: bool,
    start_x: f64,
    start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Viewport {
    pub transform: ViewTransform,
    pan: PanState,
}

impl Viewport {
    /// Wheel input: scrolling up zooms in.
    pub fn zoom(&mut self, delta_y: f64) {
        self.transform.k *= if delta_y < 0.0 { ZOOM_IN } else { ZOOM_OUT };
    }

    pub fn begin_pan(&mut self, sx: f64, sy: f64) {
        self.pan = PanState {
            active: true,
            start_x: sx - self.transform.x,
            start_y: sy - self.transform.y,
        };
    }

    /// Returns whether the transform changed.
    pub fn drag_to(&mut self, sx: f64, sy: f64) -> bool {
        if !self.pan.active {
            return false;
        }
        self.transform.x = sx - self.pan.start_x;
        self.transform.y = sy - self.pan.start_y;
        true
    }

    pub fn end_pan(&mut self) {
        self.pan.active = false;
    }

    pub fn is_panning(&self) -> bool {
        self.pan.active
    }

    pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
        (
            (sx - self.transform.x) / self.transform.k,
            (sy - self.transform.y) / self.transform.k,
        )
    }

    /// CSS `transform` value for the drawing.
    pub fn css(&self) -> String {
        format!(
            "translate({}px,{}px) scale({})",
            self.transform.x, self.transform.y, self.transform.k
        )
    }
}
