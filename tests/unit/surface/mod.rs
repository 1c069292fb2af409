use super::*;

#[derive(Default)]
struct NullSurface;

impl RenderSurface for NullSurface {
    fn attach(
        &mut self,
        _id: &str,
        _kind: PrimitiveKind,
        _attrs: &BTreeMap<String, String>,
    ) -> GlyphPenResult<()> {
        Ok(())
    }
    fn set_address(&mut self, _id: &str, _address: &StructuralAddress) {}
    fn set_stroke_color(&mut self, _id: &str, _color: StrokeColor) {}
    fn enable_stroke(&mut self, _id: &str) {}
    fn disable_stroke(&mut self, _id: &str) {}
    fn set_draw_progress(&mut self, _id: &str, _ratio: f64) {}
    fn set_opacity(&mut self, _id: &str, _alpha: f64) {}
    fn sample_local_point(&self, _id: &str, ratio: f64) -> GlyphPenResult<Point> {
        Ok(Point::new(ratio, 0.0))
    }
    fn total_path_length(&self, _id: &str) -> GlyphPenResult<f64> {
        Ok(1.0)
    }
}

#[test]
fn defaults_are_identity_and_unmeasured() {
    let s = NullSurface;
    assert_eq!(s.local_to_screen(), Affine::IDENTITY);
    assert!(s.stroke_bounds("x").is_none());
}

#[test]
fn shared_handle_allows_trait_object_access() {
    let surface = shared(NullSurface);
    assert_eq!(
        surface.borrow().sample_local_point("x", 0.5).unwrap(),
        Point::new(0.5, 0.0)
    );
    surface.borrow_mut().enable_stroke("x");
}
