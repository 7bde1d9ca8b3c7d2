use super::model::{Phase, State};
use super::{
    CHILD_FONT_SIZE, DESCRIPTION_FONT_SIZE, DESCRIPTION_OFFSET, HIGHLIGHT_MIX, LABEL_FONT_SIZE,
    LABEL_RADIUS_FACTOR, SECTOR_LINE_WIDTH,
};
use crate::gui::theme::{lighten, MenuPalette};
use cairo::Context;
use palette::Srgba;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn draw(cr: &Context, state: &State) -> Result<(), cairo::Error> {
    if !state.is_active() || state.sectors.is_empty() {
        return Ok(());
    }

    draw_inner_wheel(cr, state)?;
    draw_sector_labels(cr, state)?;

    if let Some(sector) = state.revealed_sector() {
        draw_child_fan(cr, state, sector)?;
    }

    draw_description(cr, state)?;
    Ok(())
}

fn draw_inner_wheel(cr: &Context, state: &State) -> Result<(), cairo::Error> {
    let palette = &state.palette;
    let hovered = state.hovered_sector();
    let step = state.wheel.step().to_radians();

    for index in 0..state.sectors.len() {
        let start =
            (state.wheel.center_angle(index) - state.wheel.step() / 2.0).to_radians();

        cr.move_to(state.center.x, state.center.y);
        cr.arc(
            state.center.x,
            state.center.y,
            state.layout.radius,
            start,
            start + step,
        );
        cr.close_path();

        let fill = if hovered == Some(index) {
            palette.inner_highlight
        } else {
            palette.inner
        };
        set_source(cr, fill);
        cr.fill_preserve()?;

        set_source(cr, palette.inner_line);
        cr.set_line_width(SECTOR_LINE_WIDTH);
        cr.stroke()?;
    }
    Ok(())
}

fn draw_sector_labels(cr: &Context, state: &State) -> Result<(), cairo::Error> {
    set_source(cr, state.palette.child_text);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(LABEL_FONT_SIZE);

    let label_radius = state.layout.radius * LABEL_RADIUS_FACTOR;
    for (index, sector) in state.sectors.iter().enumerate() {
        let angle = state.wheel.center_angle(index).to_radians();
        let (x, y) = (
            state.center.x + label_radius * angle.cos(),
            state.center.y + label_radius * angle.sin(),
        );
        let text = sector.label.as_str();
        if let Ok(ext) = cr.text_extents(text) {
            cr.move_to(x - ext.width() / 2.0, y + ext.height() / 2.0);
            cr.show_text(text)?;
        }
    }
    Ok(())
}

fn draw_child_fan(cr: &Context, state: &State, sector: usize) -> Result<(), cairo::Error> {
    let Some(fan) = state.child_fan(sector) else {
        return Ok(());
    };
    let palette = &state.palette;
    let hovered_child = match state.phase {
        Phase::ChildRevealed { child, .. } => child,
        _ => None,
    };

    let inner = state.layout.outer_inner_radius();
    let outer = state.layout.outer_radius();

    for index in 0..fan.count {
        let start = fan.child_start(index).to_radians();
        let end = start + fan.step_deg.to_radians();

        // annulus wedge: outer arc forward, inner arc back
        cr.arc(state.center.x, state.center.y, outer, start, end);
        cr.arc_negative(state.center.x, state.center.y, inner, end, start);
        cr.close_path();

        let fill = if hovered_child == Some(index) {
            lighten(palette.child, HIGHLIGHT_MIX)
        } else {
            palette.child
        };
        set_source(cr, fill);
        cr.fill_preserve()?;

        set_source(cr, palette.child_line);
        cr.set_line_width(SECTOR_LINE_WIDTH);
        cr.stroke()?;
    }

    for (index, child) in state.sectors[sector].children.iter().enumerate() {
        draw_child_label(cr, state, &fan, index, child.label.as_str(), palette)?;
    }
    Ok(())
}

/// Child labels follow the annulus but stay upright: the baseline rotates
/// with the wedge, flipped on the left half of the circle so text never
/// renders upside down.
fn draw_child_label(
    cr: &Context,
    state: &State,
    fan: &super::ChildFan,
    index: usize,
    text: &str,
    palette: &MenuPalette,
) -> Result<(), cairo::Error> {
    let center_deg = fan.child_center(index);
    let angle = center_deg.to_radians();
    let mid_radius = (state.layout.outer_inner_radius() + state.layout.outer_radius()) / 2.0;
    let (x, y) = (
        state.center.x + mid_radius * angle.cos(),
        state.center.y + mid_radius * angle.sin(),
    );

    cr.save()?;
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(CHILD_FONT_SIZE);
    cr.translate(x, y);

    let on_left_half = (90.0..270.0).contains(&center_deg);
    let rotation = if on_left_half {
        angle + std::f64::consts::PI
    } else {
        angle
    };
    cr.rotate(rotation);

    if let Ok(ext) = cr.text_extents(text) {
        cr.move_to(-ext.width() / 2.0, ext.height() / 2.0);
        // outline first so the fill stays crisp on any wedge color
        cr.text_path(text);
        set_source(cr, palette.child_text_outline);
        cr.set_line_width(palette.child_outline_thickness * 2.0);
        cr.stroke_preserve()?;
        set_source(cr, palette.child_text);
        cr.fill()?;
    }
    cr.restore()
}

fn draw_description(cr: &Context, state: &State) -> Result<(), cairo::Error> {
    let Some(text) = state.hovered_description() else {
        return Ok(());
    };

    set_source(cr, state.palette.child_text);
    cr.select_font_face("Sans", cairo::FontSlant::Italic, cairo::FontWeight::Normal);
    cr.set_font_size(DESCRIPTION_FONT_SIZE);

    if let Ok(ext) = cr.text_extents(text) {
        cr.move_to(
            state.center.x - ext.width() / 2.0,
            state.center.y + state.layout.outer_radius() + DESCRIPTION_OFFSET,
        );
        cr.show_text(text)?;
    }
    Ok(())
}
