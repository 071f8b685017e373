mod frame;
mod null_renderer;
mod primitives;

pub use frame::{DrawCommand, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, FadeEdgePrimitive, FadeSide, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use crate::core::Viewport;
use crate::error::ChartResult;

/// Contract implemented by any drawing surface.
///
/// The surface reports its pixel size at the start of every draw pass and then
/// receives one fully materialized `RenderFrame`, so platform drawing code
/// stays isolated from chart geometry and interaction logic.
pub trait Renderer {
    fn surface_size(&self) -> Viewport;

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
