use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::DashboardConfig;
use crate::data::filter::{ALL_SITES, SiteFilter};
use crate::state::DashboardState;

const ALL_SITES_LABEL: &str = "All Sites";
const SITE_PLACEHOLDER: &str = "Select a Launch Site here";

// ---------------------------------------------------------------------------
// Left side panel – selector widgets
// ---------------------------------------------------------------------------

/// Render the left control panel: site selector and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState, config: &DashboardConfig) {
    ui.heading("Filters");
    ui.separator();

    site_selector(ui, state);
    ui.add_space(12.0);
    payload_selector(ui, state, config);
}

fn site_selector(ui: &mut Ui, state: &mut DashboardState) {
    ui.strong("Launch site");

    // Selector options as (value, label); the sentinel value comes first.
    let options: Vec<(String, String)> =
        std::iter::once((ALL_SITES.to_string(), ALL_SITES_LABEL.to_string()))
            .chain(state.store().sites().iter().map(|s| (s.clone(), s.clone())))
            .collect();
    let current = state.selection().site_filter.as_str().to_string();
    let selected_text = options
        .iter()
        .find(|(value, _)| *value == current)
        .map(|(_, label)| label.clone())
        .unwrap_or_else(|| SITE_PLACEHOLDER.to_string());

    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.site_query).hint_text(SITE_PLACEHOLDER),
            );

            let visible: Vec<&(String, String)> = options
                .iter()
                .filter(|(_, label)| site_matches(label, &state.site_query))
                .collect();
            if visible.is_empty() {
                ui.weak("No matching site");
            }
            for (value, label) in visible {
                if ui.selectable_label(*value == current, label).clicked() {
                    state.select_site(SiteFilter::parse(value));
                    state.site_query.clear();
                }
            }
        });
}

/// Case-insensitive substring match of an option label against the search text.
fn site_matches(label: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || label.to_lowercase().contains(&query.to_lowercase())
}

fn payload_selector(ui: &mut Ui, state: &mut DashboardState, config: &DashboardConfig) {
    ui.strong("Payload range (Kg)");

    let domain_max = config.slider_max.max(state.store().max_payload_mass());
    let range = state.selection().payload_range;
    let (mut low, mut high) = (range.low, range.high);

    let rail_width = (ui.available_width() - 90.0).max(120.0);
    ui.spacing_mut().slider_width = rail_width;

    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, config.slider_min..=domain_max)
                .step_by(config.slider_step)
                .text("min"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, config.slider_min..=domain_max)
                .step_by(config.slider_step)
                .text("max"),
        )
        .changed();

    if low_changed || high_changed {
        state.adjust_range(low, high);
    }

    tick_ruler(ui, &config.ticks(domain_max), config.slider_min, domain_max, rail_width);

    if state.selection().payload_range.is_inverted() {
        ui.label(
            RichText::new("Minimum is above maximum: no launches match.").color(Color32::YELLOW),
        );
    }
}

/// Labelled tick marks drawn under the sliders, aligned with their rails.
fn tick_ruler(ui: &mut Ui, ticks: &[f64], min: f64, max: f64, width: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 22.0), egui::Sense::hover());
    let painter = ui.painter();
    let stroke = ui.visuals().widgets.noninteractive.fg_stroke;
    let span = (max - min).max(f64::EPSILON);

    for &tick in ticks {
        let t = ((tick - min) / span) as f32;
        let x = egui::lerp(rect.left()..=rect.right(), t);
        painter.line_segment(
            [egui::pos2(x, rect.top()), egui::pos2(x, rect.top() + 5.0)],
            stroke,
        );
        painter.text(
            egui::pos2(x, rect.top() + 7.0),
            egui::Align2::CENTER_TOP,
            format!("{tick:.0}"),
            egui::FontId::proportional(11.0),
            stroke.color,
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let source = state
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        ui.label(format!(
            "{} launches loaded from {source}, {} shown",
            state.store().len(),
            state.scatter().point_count()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut DashboardState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(store) => {
                log::info!(
                    "Loaded {} launches from {} with sites {:?}",
                    store.len(),
                    path.display(),
                    store.sites()
                );
                state.replace_store(Arc::new(store), Some(path));
            }
            Err(e) => {
                // The current store stays in place.
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
