use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::chart::{PieSlice, SCATTER_X_LABEL, SCATTER_Y_LABEL, ScatterChart, SummaryChart};
use crate::state::DashboardState;

/// Angular step used to approximate pie wedges with triangles.
const WEDGE_STEP: f32 = 0.05;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render both charts in the central panel.
pub fn dashboard(ui: &mut Ui, state: &DashboardState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("SpaceX Launch Records Dashboard").size(26.0));
    });
    ui.separator();

    let summary_height = (ui.available_height() * 0.45).max(200.0);
    ui.allocate_ui(egui::vec2(ui.available_width(), summary_height), |ui: &mut Ui| {
        summary_section(ui, state.summary());
    });

    ui.separator();
    scatter_section(ui, state.scatter());
}

fn placeholder(ui: &mut Ui, text: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(RichText::new(text).weak());
    });
}

// ---------------------------------------------------------------------------
// Summary chart
// ---------------------------------------------------------------------------

fn summary_section(ui: &mut Ui, chart: &SummaryChart) {
    ui.strong(&chart.title);

    if chart.is_empty() {
        placeholder(ui, "No successful launches for the current selection.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let diameter = (ui.available_height() - 8.0).clamp(120.0, 320.0);
        pie(ui, chart, diameter);
        ui.add_space(24.0);
        ui.vertical(|ui: &mut Ui| breakdown_table(ui, &chart.slices));
    });
}

/// Paint the slices clockwise from twelve o'clock, with a hover tooltip.
fn pie(ui: &mut Ui, chart: &SummaryChart, diameter: f32) {
    let (response, painter) = ui.allocate_painter(Vec2::splat(diameter), Sense::hover());
    let center = response.rect.center();
    let radius = diameter * 0.5 - 2.0;

    let mut wedges: Vec<(f32, f32, &PieSlice)> = Vec::with_capacity(chart.slices.len());
    let mut start = -FRAC_PI_2;
    for slice in &chart.slices {
        let sweep = slice.fraction as f32 * TAU;
        let steps = (sweep / WEDGE_STEP).ceil() as usize;
        for i in 0..steps {
            let a0 = start + sweep * i as f32 / steps as f32;
            let a1 = start + sweep * (i + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![
                    center,
                    center + radius * Vec2::angled(a0),
                    center + radius * Vec2::angled(a1),
                ],
                slice.color,
                Stroke::NONE,
            ));
        }
        wedges.push((start, start + sweep, slice));
        start += sweep;
    }

    let visible = wedges.iter().filter(|(a0, a1, _)| a1 > a0).count();
    if visible > 1 {
        let border = Stroke::new(1.5, ui.visuals().panel_fill);
        for (a0, a1, _) in &wedges {
            if a1 > a0 {
                painter.line_segment([center, center + radius * Vec2::angled(*a0)], border);
            }
        }
    }

    if let Some(pos) = response.hover_pos() {
        let offset = pos - center;
        if offset.length() <= radius {
            let mut angle = offset.y.atan2(offset.x);
            if angle < -FRAC_PI_2 {
                angle += TAU;
            }
            let hovered = wedges
                .iter()
                .find(|(a0, a1, _)| angle >= *a0 && angle < *a1)
                .map(|(_, _, slice)| *slice);
            if let Some(slice) = hovered {
                response.on_hover_text(format!(
                    "{}: {} ({:.1}%)",
                    slice.label,
                    slice.count,
                    slice.fraction * 100.0
                ));
            }
        }
    }
}

fn breakdown_table(ui: &mut Ui, slices: &[PieSlice]) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::exact(16.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(60.0))
        .header(20.0, |mut header| {
            header.col(|_| {});
            header.col(|ui| {
                ui.strong("Category");
            });
            header.col(|ui| {
                ui.strong("Launches");
            });
            header.col(|ui| {
                ui.strong("Share");
            });
        })
        .body(|mut body| {
            for slice in slices {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
                        ui.painter().rect_filled(rect, 2.0, slice.color);
                    });
                    row.col(|ui| {
                        ui.label(&slice.label);
                    });
                    row.col(|ui| {
                        ui.label(slice.count.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.1}%", slice.fraction * 100.0));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

fn scatter_section(ui: &mut Ui, chart: &ScatterChart) {
    ui.strong(&chart.title);
    if chart.is_empty() {
        ui.label(RichText::new("No launches in the selected payload range.").weak());
    }

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label(SCATTER_X_LABEL)
        .y_axis_label(SCATTER_Y_LABEL)
        .include_x(0.0)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points = Points::new(PlotPoints::from(series.points.clone()))
                    .name(&series.category)
                    .color(series.color)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(4.0);
                plot_ui.points(points);
            }
        });
}
