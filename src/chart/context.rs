use crate::core::{ChartValues, HorizontalDimensions, Rect};
use crate::render::RenderFrame;

/// Pass-local state handed to every drawing contributor.
///
/// `dimensions` are already scaled by `zoom`. Pixel mapping accounts for the
/// scroll offset, so scrollable content can draw in absolute surface pixels.
#[derive(Debug)]
pub struct DrawContext<'a> {
    pub frame: &'a mut RenderFrame,
    pub content_bounds: Rect,
    pub values: ChartValues,
    pub dimensions: HorizontalDimensions,
    pub scroll: f64,
    pub zoom: f64,
}

impl<'a> DrawContext<'a> {
    #[must_use]
    pub fn new(
        frame: &'a mut RenderFrame,
        content_bounds: Rect,
        values: ChartValues,
        dimensions: HorizontalDimensions,
        scroll: f64,
        zoom: f64,
    ) -> Self {
        Self {
            frame,
            content_bounds,
            values,
            dimensions: dimensions.scaled(zoom),
            scroll,
            zoom,
        }
    }

    /// Surface x of data value `x`.
    #[must_use]
    pub fn x_to_pixel(&self, x: f64) -> f64 {
        let steps = (x - self.values.min_x) / self.values.x_step;
        self.content_bounds.left + self.dimensions.start_padding() - self.scroll
            + steps * self.dimensions.x_spacing
    }

    /// Surface y of data value `y`; `min_y` maps to the content bottom.
    #[must_use]
    pub fn y_to_pixel(&self, y: f64) -> f64 {
        let length_y = self.values.length_y();
        let length_y = if length_y > 0.0 { length_y } else { 1.0 };
        self.content_bounds.bottom
            - (y - self.values.min_y) / length_y * self.content_bounds.height()
    }
}

#[cfg(test)]
mod tests {
    use super::DrawContext;
    use crate::core::{ChartValues, HorizontalDimensions, Rect, Viewport};
    use crate::render::RenderFrame;

    #[test]
    fn mapping_accounts_for_padding_zoom_and_scroll() {
        let mut frame = RenderFrame::new(Viewport::new(300, 100));
        let values = ChartValues {
            min_x: 0.0,
            max_x: 2.0,
            x_step: 1.0,
            min_y: 0.0,
            max_y: 4.0,
            model_id: 1,
        };
        let dims = HorizontalDimensions {
            x_spacing: 100.0,
            scalable_start_padding: 50.0,
            scalable_end_padding: 50.0,
            unscalable_start_padding: 5.0,
            unscalable_end_padding: 0.0,
        };
        let ctx = DrawContext::new(
            &mut frame,
            Rect::new(10.0, 0.0, 310.0, 100.0),
            values,
            dims,
            30.0,
            2.0,
        );
        // left + (50 * 2 + 5) + 1 * 200 - scroll
        assert_eq!(ctx.x_to_pixel(1.0), 10.0 + 105.0 + 200.0 - 30.0);
        assert_eq!(ctx.x_to_pixel(0.0), 10.0 + 105.0 - 30.0);
        assert_eq!(ctx.y_to_pixel(0.0), 100.0);
        assert_eq!(ctx.y_to_pixel(2.0), 50.0);
    }
}
