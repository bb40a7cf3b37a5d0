//! The per-draw pipeline shared by every painting operator:
//! coverage, paint, filter, shadow, composite.

use super::Canvas2dContext;
use crate::composite::{composite, CompositeOperation, CompositeParams};
use crate::drawing_state::DrawingState;
use crate::filter::{content_bounds, shadow_layer};
use crate::paint::PaintSource;
use crate::raster::{fill_coverage, Coverage};
use crate::style::CanvasFillRule;
use crate::surface::Surface;

/// Which style of the current state paints a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PaintKind {
    Fill,
    Stroke,
}

impl Canvas2dContext {
    /// Fill a device-space outline with the current fill or stroke style.
    pub(crate) fn render_path(&mut self, device: &tiny_skia::Path, rule: CanvasFillRule, kind: PaintKind) {
        let coverage = fill_coverage(device, rule, self.surface.width(), self.surface.height());
        let style = match kind {
            PaintKind::Fill => &self.state.fill_style,
            PaintKind::Stroke => &self.state.stroke_style,
        };
        let paint = crate::paint::resolve(
            style,
            &self.state.transform,
            self.state.image_smoothing_enabled,
        );
        render(&mut self.surface, &self.state, coverage.as_ref(), paint.as_ref());
    }
}

/// Paint `coverage` into a fresh layer, run the filter chain over it, draw
/// its shadow, then composite it onto `surface` with the state's operator,
/// global alpha and clip.
///
/// Without coverage or paint the layer stays empty. Bounded operators then
/// leave the surface alone; unbounded ones still clear inside the clip.
pub(crate) fn render(
    surface: &mut Surface,
    state: &DrawingState,
    coverage: Option<&Coverage>,
    paint: Option<&PaintSource>,
) {
    let mut layer = Surface::blank(surface.width(), surface.height());
    match (coverage, paint) {
        (Some(coverage), Some(paint)) => {
            paint.paint_into(&mut layer, coverage);
            if !state.filter.is_identity() {
                state.filter.apply(&mut layer);
            }
        }
        _ if state.global_composite_operation.is_bounded() => return,
        _ => {}
    }

    let params = CompositeParams {
        op: state.global_composite_operation,
        global_alpha: state.global_alpha,
        clip: state.clip.as_ref(),
    };
    if state.has_shadow() {
        let shadow = shadow_layer(
            &layer,
            state.shadow_offset_x,
            state.shadow_offset_y,
            state.shadow_blur / 2.0,
            state.shadow_color,
        );
        composite(surface, &shadow, content_bounds(&shadow), params);
    }
    composite(surface, &layer, content_bounds(&layer), params);
}

/// Erase `coverage` to transparent black inside the clip. Alpha, operator,
/// shadow and filter do not apply.
pub(crate) fn erase(surface: &mut Surface, state: &DrawingState, coverage: &Coverage) {
    let mut layer = Surface::blank(surface.width(), surface.height());
    PaintSource::Solid([1.0; 4]).paint_into(&mut layer, coverage);
    composite(
        surface,
        &layer,
        Some(coverage.bounds),
        CompositeParams {
            op: CompositeOperation::DestinationOut,
            global_alpha: 1.0,
            clip: state.clip.as_ref(),
        },
    );
}
