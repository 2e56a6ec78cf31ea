use crate::core::{PlotModel, Rect};
use crate::interaction::{InteractionSnapshot, PopoverView, resolve_vertical_marker};
use crate::render::{
    Color, LinePrimitive, OverlayFrame, PointMarker, RectPrimitive, TextHAlign, TextPrimitive,
};

const MARKER_LINE_COLOR: Color = Color::rgba(0.35, 0.35, 0.35, 0.8);
const GROUP_FILL: Color = Color::rgba(0.5, 0.5, 0.5, 0.15);
const POPOVER_FILL: Color = Color::rgb(1.0, 1.0, 1.0);
const POPOVER_TEXT: Color = Color::rgb(0.1, 0.1, 0.1);
const POINT_RADIUS_PX: f64 = 3.0;
const EMPHASIZED_RADIUS_PX: f64 = 5.0;
const FONT_SIZE_PX: f64 = 12.0;
const LINE_HEIGHT_PX: f64 = 16.0;
const TEXT_PADDING_PX: f64 = 8.0;

/// Materializes interaction state into plot-space draw commands.
pub(super) fn build_overlay_frame(
    model: &PlotModel,
    snapshot: &InteractionSnapshot,
    popover: &PopoverView,
    plot: Rect,
) -> OverlayFrame {
    let mut frame = OverlayFrame::new(model.viewport());

    if let Some(group) = snapshot
        .highlighted_group()
        .and_then(|index| model.bar_groups().get(index))
    {
        let rect = group.rect;
        frame.rects.push(RectPrimitive::new(
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            GROUP_FILL,
        ));
    }

    if let Some(marker) = resolve_vertical_marker(model, &snapshot.highlight) {
        if marker.x.is_finite() {
            frame.lines.push(LinePrimitive::new(
                marker.x,
                0.0,
                marker.x,
                plot.height,
                1.0,
                MARKER_LINE_COLOR,
            ));
        }
        let emphasized = snapshot.highlighted_point();
        for point in marker.points.iter().filter(|point| point.x.is_finite() && point.y.is_finite())
        {
            let radius = if emphasized.is_some_and(|target| target == *point) {
                EMPHASIZED_RADIUS_PX
            } else {
                POINT_RADIUS_PX
            };
            frame
                .markers
                .push(PointMarker::new(point.x, point.y, radius, point.color));
        }
    }

    if let (true, Some(placement), Some(details)) =
        (popover.open, popover.placement, popover.details.as_ref())
    {
        // Popover placement is in client coordinates; the frame is plot-relative.
        let x = placement.rect.x - plot.x;
        let y = placement.rect.y - plot.y;
        frame.rects.push(RectPrimitive::new(
            x,
            y,
            placement.rect.width,
            placement.rect.height,
            POPOVER_FILL,
        ));

        let text_x = x + TEXT_PADDING_PX;
        let mut text_y = y + TEXT_PADDING_PX + FONT_SIZE_PX;
        if !details.title.is_empty() {
            frame.texts.push(TextPrimitive::new(
                details.title.clone(),
                text_x,
                text_y,
                FONT_SIZE_PX,
                POPOVER_TEXT,
                TextHAlign::Left,
            ));
            text_y += LINE_HEIGHT_PX;
        }
        for row in &details.rows {
            let text = match (row.label.is_empty(), row.value.is_empty()) {
                (true, true) => continue,
                (false, true) => row.label.clone(),
                (true, false) => row.value.clone(),
                (false, false) => format!("{}: {}", row.label, row.value),
            };
            frame.texts.push(TextPrimitive::new(
                text,
                text_x,
                text_y,
                FONT_SIZE_PX,
                row.color,
                TextHAlign::Left,
            ));
            text_y += LINE_HEIGHT_PX;
        }
    }

    frame
}
