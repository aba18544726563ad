//! Cairo rendering of the dial face.
//!
//! A pure function of the gauge's current state: the colored speed arc, a
//! face disk masking its center down to an annular ring, the needle, the
//! outline strokes, and the tick labels. The caller supplies a square
//! drawing region of side `size`; all stroke widths and the font size
//! scale off that side.

use cairo::Context;
use speedo_types::{
    label_anchors, needle_angle, polar_point, sweep_angle, Color, Gauge, LabelAnchor, TextAlign,
    FACE_START_DEG, FACE_SWEEP_DEG,
};

/// Face disk color masking the center of the speed arc.
const FACE_COLOR: Color = Color {
    r: 184.0 / 255.0,
    g: 213.0 / 255.0,
    b: 205.0 / 255.0,
    a: 1.0,
};

/// The needle is always pure red, independent of the zone color.
const NEEDLE_COLOR: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

const OUTLINE_COLOR: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

const TAU: f64 = 2.0 * std::f64::consts::PI;

/// Render the full dial into a `size` x `size` region at the origin.
pub fn render_dial(cr: &Context, gauge: &Gauge, size: f64) -> Result<(), cairo::Error> {
    let center = size / 2.0;
    let outer_radius = size / 2.0;
    // The ring is one eighth of the side wide on each edge.
    let face_radius = size * 3.0 / 8.0;
    let start_rad = FACE_START_DEG.to_radians();
    let end_rad = (FACE_START_DEG + FACE_SWEEP_DEG).to_radians();

    // Speed arc: a filled pie slice from the face start, swept in
    // proportion to the current speed, in the current gauge color.
    let sweep_rad = sweep_angle(gauge.speed(), gauge.max_speed()).to_radians();
    gauge.color().apply_to_cairo(cr);
    cr.new_path();
    cr.move_to(center, center);
    cr.arc(center, center, outer_radius, start_rad, start_rad + sweep_rad);
    cr.close_path();
    cr.fill()?;

    // Face disk, leaving only the outer ring of the arc visible.
    FACE_COLOR.apply_to_cairo(cr);
    cr.new_path();
    cr.arc(center, center, face_radius, 0.0, TAU);
    cr.fill()?;

    // Needle: hub disk plus a line out to the rim along the speed angle.
    NEEDLE_COLOR.apply_to_cairo(cr);
    cr.new_path();
    cr.arc(center, center, size / 32.0, 0.0, TAU);
    cr.fill()?;

    let (tip_x, tip_y) = polar_point(
        center,
        center,
        outer_radius,
        needle_angle(gauge.speed(), gauge.max_speed()),
    );
    cr.set_line_width(size / 64.0);
    cr.move_to(center, center);
    cr.line_to(tip_x, tip_y);
    cr.stroke()?;

    // Outline strokes retracing the full face on both ring edges.
    OUTLINE_COLOR.apply_to_cairo(cr);
    cr.set_line_width(size / 128.0);
    cr.new_path();
    cr.arc(center, center, outer_radius, start_rad, end_rad);
    cr.stroke()?;
    cr.new_path();
    cr.arc(center, center, face_radius, start_rad, end_rad);
    cr.stroke()?;

    draw_labels(cr, gauge, size)?;

    Ok(())
}

fn draw_labels(cr: &Context, gauge: &Gauge, size: f64) -> Result<(), cairo::Error> {
    let text_size = size / 26.0;
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(text_size);
    OUTLINE_COLOR.apply_to_cairo(cr);

    let anchors = label_anchors(size, text_size);

    // Anchor 0 carries the literal zero at the face opening; the rest take
    // the six tick labels in order around the ring.
    draw_aligned_text(cr, "0", &anchors[0])?;
    for (label, anchor) in gauge.tick_labels().iter().zip(&anchors[1..]) {
        draw_aligned_text(cr, label, anchor)?;
    }

    Ok(())
}

/// The cairo toy text API has no alignment; measure and shift instead.
fn draw_aligned_text(cr: &Context, text: &str, anchor: &LabelAnchor) -> Result<(), cairo::Error> {
    let extents = cr.text_extents(text)?;
    let x = match anchor.align {
        TextAlign::Right => anchor.x - extents.width(),
        TextAlign::Center => anchor.x - extents.width() / 2.0,
        TextAlign::Left => anchor.x,
    };
    cr.move_to(x, anchor.y);
    cr.show_text(text)?;
    Ok(())
}
