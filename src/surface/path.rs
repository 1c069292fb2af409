use std::collections::BTreeMap;

use kurbo::{ParamCurve, ParamCurveArclen, PathSeg, Shape};

use crate::{
    foundation::color::StrokeColor,
    foundation::core::{Affine, BezPath, Point, Rect},
    foundation::error::{GlyphPenError, GlyphPenResult},
    graph::address::StructuralAddress,
    surface::RenderSurface,
    tree::glyph::{PrimitiveKind, attr, numeric_attr},
};

const ARCLEN_ACCURACY: f64 = 1e-3;

/// Visible state of one stroke.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum StrokeVisibility {
    /// Not drawn at all.
    Hidden,
    /// First `ratio` of the path drawn.
    Partial(f64),
    /// Fully drawn.
    Shown,
}

/// Visibility-changing call recorded by [`PathSurface`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceCall {
    /// `enable_stroke(id)`.
    Enable(String),
    /// `disable_stroke(id)`.
    Disable(String),
}

#[derive(Clone, Debug)]
struct SurfaceStroke {
    segments: Vec<(PathSeg, f64)>,
    length: f64,
    bounds: Rect,
    color: StrokeColor,
    visibility: StrokeVisibility,
    opacity: f64,
    address: Option<StructuralAddress>,
}

impl SurfaceStroke {
    fn from_path(path: &BezPath) -> Self {
        let segments: Vec<(PathSeg, f64)> = path
            .segments()
            .map(|seg| (seg, seg.arclen(ARCLEN_ACCURACY)))
            .collect();
        let length = segments.iter().map(|(_, len)| len).sum();
        Self {
            segments,
            length,
            bounds: path.bounding_box(),
            color: StrokeColor::BLACK,
            visibility: StrokeVisibility::Shown,
            opacity: 1.0,
            address: None,
        }
    }

    fn point_at(&self, ratio: f64) -> Option<Point> {
        let (first, _) = self.segments.first()?;
        if self.length <= 0.0 {
            return Some(first.eval(0.0));
        }
        let target = ratio.clamp(0.0, 1.0) * self.length;
        let mut walked = 0.0;
        for (seg, len) in &self.segments {
            if walked + len >= target {
                let t = seg.inv_arclen(target - walked, ARCLEN_ACCURACY);
                return Some(seg.eval(t));
            }
            walked += len;
        }
        self.segments.last().map(|(seg, _)| seg.eval(1.0))
    }
}

/// In-memory [`RenderSurface`] backed by `kurbo` paths.
///
/// Samples by arc-length ratio, so equal ratio steps move the pen equal distances. Also
/// records every enable/disable call, which makes it usable as a test double.
#[derive(Clone, Debug)]
pub struct PathSurface {
    strokes: BTreeMap<String, SurfaceStroke>,
    transform: Affine,
    calls: Vec<SurfaceCall>,
}

impl Default for PathSurface {
    fn default() -> Self {
        Self {
            strokes: BTreeMap::new(),
            transform: Affine::IDENTITY,
            calls: Vec::new(),
        }
    }
}

impl PathSurface {
    /// Empty surface with an identity local-to-screen mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `transform` as the local-to-screen mapping.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// Register a stroke directly from a path.
    pub fn insert_path(&mut self, id: impl Into<String>, path: &BezPath) {
        self.strokes.insert(id.into(), SurfaceStroke::from_path(path));
    }

    /// Known stroke ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.strokes.keys().map(String::as_str)
    }

    /// Current visibility of a stroke.
    pub fn visibility(&self, id: &str) -> Option<StrokeVisibility> {
        self.strokes.get(id).map(|s| s.visibility)
    }

    /// Current color of a stroke.
    pub fn color(&self, id: &str) -> Option<StrokeColor> {
        self.strokes.get(id).map(|s| s.color)
    }

    /// Current opacity of a stroke.
    pub fn opacity(&self, id: &str) -> Option<f64> {
        self.strokes.get(id).map(|s| s.opacity)
    }

    /// Address recorded for a stroke.
    pub fn address(&self, id: &str) -> Option<&StructuralAddress> {
        self.strokes.get(id).and_then(|s| s.address.as_ref())
    }

    /// Enable/disable calls in the order they were made.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Forget recorded calls.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn stroke(&self, id: &str) -> GlyphPenResult<&SurfaceStroke> {
        self.strokes
            .get(id)
            .ok_or_else(|| GlyphPenError::geometry(format!("unknown stroke \"{id}\"")))
    }
}

fn primitive_path(kind: PrimitiveKind, attrs: &BTreeMap<String, String>) -> GlyphPenResult<BezPath> {
    match kind {
        PrimitiveKind::OutlineFill => {
            let d = attrs
                .get(attr::PATH_DATA)
                .ok_or_else(|| GlyphPenError::geometry("path element has no \"d\" attribute"))?;
            BezPath::from_svg(d).map_err(|e| GlyphPenError::geometry(format!("bad path data: {e}")))
        }
        PrimitiveKind::Line => {
            let mut path = BezPath::new();
            path.move_to((numeric_attr(attrs, "x1")?, numeric_attr(attrs, "y1")?));
            path.line_to((numeric_attr(attrs, "x2")?, numeric_attr(attrs, "y2")?));
            Ok(path)
        }
        PrimitiveKind::Rectangle => {
            let x = numeric_attr(attrs, "x")?;
            let y = numeric_attr(attrs, "y")?;
            let w = numeric_attr(attrs, "width")?;
            let h = numeric_attr(attrs, "height")?;
            Ok(Rect::new(x, y, x + w, y + h).to_path(ARCLEN_ACCURACY))
        }
    }
}

impl RenderSurface for PathSurface {
    fn attach(
        &mut self,
        id: &str,
        kind: PrimitiveKind,
        attrs: &BTreeMap<String, String>,
    ) -> GlyphPenResult<()> {
        let path = primitive_path(kind, attrs)?;
        self.insert_path(id, &path);
        Ok(())
    }

    fn set_address(&mut self, id: &str, address: &StructuralAddress) {
        if let Some(s) = self.strokes.get_mut(id) {
            s.address = Some(address.clone());
        }
    }

    fn set_stroke_color(&mut self, id: &str, color: StrokeColor) {
        if let Some(s) = self.strokes.get_mut(id) {
            s.color = color;
        }
    }

    fn enable_stroke(&mut self, id: &str) {
        if let Some(s) = self.strokes.get_mut(id) {
            s.visibility = StrokeVisibility::Shown;
            s.opacity = 1.0;
            self.calls.push(SurfaceCall::Enable(id.to_owned()));
        }
    }

    fn disable_stroke(&mut self, id: &str) {
        if let Some(s) = self.strokes.get_mut(id) {
            s.visibility = StrokeVisibility::Hidden;
            self.calls.push(SurfaceCall::Disable(id.to_owned()));
        }
    }

    fn set_draw_progress(&mut self, id: &str, ratio: f64) {
        if let Some(s) = self.strokes.get_mut(id) {
            let ratio = ratio.clamp(0.0, 1.0);
            s.visibility = if ratio >= 1.0 {
                StrokeVisibility::Shown
            } else {
                StrokeVisibility::Partial(ratio)
            };
        }
    }

    fn set_opacity(&mut self, id: &str, alpha: f64) {
        if let Some(s) = self.strokes.get_mut(id) {
            s.opacity = alpha.clamp(0.0, 1.0);
        }
    }

    fn sample_local_point(&self, id: &str, ratio: f64) -> GlyphPenResult<Point> {
        self.stroke(id)?
            .point_at(ratio)
            .ok_or_else(|| GlyphPenError::geometry(format!("stroke \"{id}\" has no path segments")))
    }

    fn total_path_length(&self, id: &str) -> GlyphPenResult<f64> {
        Ok(self.stroke(id)?.length)
    }

    fn local_to_screen(&self) -> Affine {
        self.transform
    }

    fn stroke_bounds(&self, id: &str) -> Option<Rect> {
        let s = self.strokes.get(id)?;
        Some(self.transform.transform_rect_bbox(s.bounds))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/path.rs"]
mod tests;
