//! Bezier edge routing and rendering.
//!
//! Connections leave an output anchor horizontally and arrive at an input
//! anchor horizontally, so the curve is a cubic with both control points
//! offset along x.

use egui::{Color32, Pos2, Stroke, Vec2};

/// Horizontal control-point offset cap.
const MAX_CONTROL_OFFSET: f32 = 150.0;

/// Segments used to flatten a curve for drawing and hit testing.
const BEZIER_SEGMENTS: usize = 24;

/// World-space distance within which a click selects a connection.
pub const EDGE_HIT_BAND: f32 = 20.0;

/// Cubic bezier from an output anchor to an input anchor.
#[derive(Debug, Clone, Copy)]
pub struct EdgeCurve {
    pub from: Pos2,
    pub to: Pos2,
    pub c1: Pos2,
    pub c2: Pos2,
}

impl EdgeCurve {
    /// Route between anchors with horizontal tangents at both ends. The
    /// offset scales with horizontal separation and is capped so long
    /// edges stay readable.
    pub fn between(from: Pos2, to: Pos2) -> Self {
        let offset = ((to.x - from.x).abs() * 0.5).min(MAX_CONTROL_OFFSET);
        Self {
            from,
            to,
            c1: Pos2::new(from.x + offset, from.y),
            c2: Pos2::new(to.x - offset, to.y),
        }
    }

    /// Point on the curve at parameter t in [0, 1].
    pub fn point_at(&self, t: f32) -> Pos2 {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Pos2::new(
            a * self.from.x + b * self.c1.x + c * self.c2.x + d * self.to.x,
            a * self.from.y + b * self.c1.y + c * self.c2.y + d * self.to.y,
        )
    }

    /// Direction at the end of the curve, for the arrow head.
    pub fn end_direction(&self) -> Vec2 {
        (self.to - self.c2).normalized()
    }

    pub fn midpoint(&self) -> Pos2 {
        self.point_at(0.5)
    }

    /// Flatten into polyline points.
    pub fn flatten(&self) -> Vec<Pos2> {
        (0..=BEZIER_SEGMENTS)
            .map(|i| self.point_at(i as f32 / BEZIER_SEGMENTS as f32))
            .collect()
    }

    /// Shortest distance from `pos` to the flattened curve.
    pub fn distance_to(&self, pos: Pos2) -> f32 {
        let points = self.flatten();
        points
            .windows(2)
            .map(|w| distance_to_segment(pos, w[0], w[1]))
            .fold(f32::INFINITY, f32::min)
    }
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq < 1e-10 {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}

// =============================================================================
// RENDERING
// =============================================================================

/// Render an already-projected polyline, solid or dashed. Curves are
/// routed in world units and projected by the caller, so painting and
/// hit testing always trace the same path.
pub fn paint_polyline(painter: &egui::Painter, points: &[Pos2], stroke: Stroke, dashed: bool) {
    if dashed {
        paint_dashed(painter, points, stroke);
    } else {
        painter.add(egui::Shape::line(points.to_vec(), stroke));
    }
}

fn paint_dashed(painter: &egui::Painter, points: &[Pos2], stroke: Stroke) {
    let dash_len = 8.0;
    let gap_len = 4.0;

    let mut drawing = true;
    let mut remaining: f32 = dash_len;
    for window in points.windows(2) {
        let mut a = window[0];
        let b = window[1];
        let mut seg_len = (b - a).length();
        while seg_len > f32::EPSILON {
            let dir = (b - a) / seg_len;
            let step = remaining.min(seg_len);
            let next = a + dir * step;
            if drawing {
                painter.line_segment([a, next], stroke);
            }
            a = next;
            seg_len -= step;
            remaining -= step;
            if remaining <= 0.0 {
                drawing = !drawing;
                remaining = if drawing { dash_len } else { gap_len };
            }
        }
    }
}

const ARROW_SIZE: f32 = 8.0;

/// Arrow head at the input end of an edge.
pub fn paint_arrow_head(
    painter: &egui::Painter,
    tip: Pos2,
    direction: Vec2,
    zoom: f32,
    color: Color32,
) {
    let size = ARROW_SIZE * zoom;
    let dir = direction.normalized();
    let perp = Vec2::new(-dir.y, dir.x);

    painter.add(egui::Shape::convex_polygon(
        vec![
            tip,
            tip - dir * size + perp * size * 0.5,
            tip - dir * size - perp * size * 0.5,
        ],
        color,
        Stroke::NONE,
    ));
}

/// Label pill at an edge midpoint.
pub fn paint_edge_label(
    painter: &egui::Painter,
    position: Pos2,
    label: &str,
    zoom: f32,
    bg_color: Color32,
    text_color: Color32,
) {
    let font_size = 9.0 * zoom;
    let padding = Vec2::new(6.0 * zoom, 3.0 * zoom);

    let galley = painter.layout_no_wrap(
        label.to_string(),
        egui::FontId::proportional(font_size),
        text_color,
    );

    let text_size = galley.size();
    let pill_size = text_size + padding * 2.0;
    let pill_rect = egui::Rect::from_center_size(position, pill_size);

    painter.rect_filled(pill_rect, pill_size.y / 2.0, bg_color);
    painter.galley(
        Pos2::new(
            position.x - text_size.x / 2.0,
            position.y - text_size.y / 2.0,
        ),
        galley,
        text_color,
    );
}

/// Labels fade out when the view is zoomed far back.
pub fn should_show_edge_label(has_label: bool, zoom: f32) -> bool {
    has_label && zoom > 0.6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_starts_and_ends_on_its_anchors() {
        let curve = EdgeCurve::between(Pos2::new(0.0, 0.0), Pos2::new(200.0, 80.0));
        assert!((curve.point_at(0.0) - curve.from).length() < 0.001);
        assert!((curve.point_at(1.0) - curve.to).length() < 0.001);
    }

    #[test]
    fn control_offset_is_capped_on_long_edges() {
        let curve = EdgeCurve::between(Pos2::new(0.0, 0.0), Pos2::new(1000.0, 0.0));
        assert_eq!(curve.c1.x, MAX_CONTROL_OFFSET);
        assert_eq!(curve.c2.x, 1000.0 - MAX_CONTROL_OFFSET);
    }

    #[test]
    fn tangents_are_horizontal_at_both_ends() {
        let curve = EdgeCurve::between(Pos2::new(0.0, 0.0), Pos2::new(300.0, 120.0));
        assert_eq!(curve.c1.y, curve.from.y);
        assert_eq!(curve.c2.y, curve.to.y);
    }

    #[test]
    fn distance_is_zero_on_the_curve_and_grows_away_from_it() {
        let curve = EdgeCurve::between(Pos2::new(0.0, 0.0), Pos2::new(200.0, 0.0));
        let mid = curve.midpoint();
        assert!(curve.distance_to(mid) < 0.5);
        assert!(curve.distance_to(mid + Vec2::new(0.0, 50.0)) > EDGE_HIT_BAND);
    }

    #[test]
    fn backward_edge_still_leaves_the_output_rightward() {
        // Target is to the left of the source; the curve must still exit
        // the output side heading right.
        let curve = EdgeCurve::between(Pos2::new(200.0, 0.0), Pos2::new(0.0, 100.0));
        assert!(curve.c1.x > curve.from.x);
        assert!(curve.c2.x < curve.to.x);
    }
}
