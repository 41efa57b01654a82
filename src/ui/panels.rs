use std::collections::BTreeSet;

use eframe::egui::{self, emath::Numeric, Color32, RichText, ScrollArea, Slider, Ui};

use crate::config::{DashboardConfig, SliderBounds};
use crate::data::filter::Interval;
use crate::data::model::{Category, CategoryColumn, Day, Sex, Smoker, Time};
use crate::data::stats::{format_count, format_tip};
use crate::state::{AppState, DerivedView, FilterEvent};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel. Changes are posted as [`FilterEvent`]s and
/// take effect when the caller drains the session's event queue.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, config: &DashboardConfig) {
    ui.heading("Filters");
    ui.separator();

    let input = state.input();
    let filters = state.filters().clone();
    let money = config.currency_symbol.as_str();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if let Some(r) = range_sliders(ui, "Bill amount", filters.bill_range, config.bill_slider, money) {
                input.send(FilterEvent::BillRange(r));
            }
            ui.separator();

            if let Some(s) = category_group::<Time>(ui, CategoryColumn::Time, &filters.time_selection) {
                input.send(FilterEvent::Time(s));
            }
            if let Some(s) = category_group::<Sex>(ui, CategoryColumn::Sex, &filters.sex_selection) {
                input.send(FilterEvent::Sex(s));
            }
            if let Some(s) = category_group::<Smoker>(ui, CategoryColumn::Smoker, &filters.smoker_selection) {
                input.send(FilterEvent::Smoker(s));
            }
            if let Some(s) = category_group::<Day>(ui, CategoryColumn::Day, &filters.day_selection) {
                input.send(FilterEvent::Day(s));
            }
            ui.separator();

            if let Some(r) = range_sliders(ui, "Party Size", filters.size_range, config.size_slider, "") {
                input.send(FilterEvent::SizeRange(r));
            }
            ui.separator();

            // ---- Colour-by selector ----
            ui.strong("Color by");
            let current = state.color_column;
            egui::ComboBox::from_id_salt("color_by")
                .selected_text(current.map_or("None", |c| c.title()))
                .show_ui(ui, |ui: &mut Ui| {
                    if ui.selectable_label(current.is_none(), "None").clicked() {
                        state.set_color_column(None);
                    }
                    for col in CategoryColumn::ALL {
                        if ui.selectable_label(current == Some(col), col.title()).clicked() {
                            state.set_color_column(Some(col));
                        }
                    }
                });
            ui.separator();

            if ui.button("Reset filter").clicked() {
                input.reset();
            }
        });
}

/// A min and a max slider over one range. Dragging one handle past the
/// other carries the other along. Returns the new range if either moved.
fn range_sliders<T: Numeric>(
    ui: &mut Ui,
    title: &str,
    current: Interval<T>,
    bounds: SliderBounds<T>,
    prefix: &str,
) -> Option<Interval<T>> {
    ui.strong(title);
    let (mut lo, mut hi) = (current.min, current.max);
    let lo_changed = ui
        .add(Slider::new(&mut lo, bounds.min..=bounds.max).prefix(prefix).text("min"))
        .changed();
    let hi_changed = ui
        .add(Slider::new(&mut hi, bounds.min..=bounds.max).prefix(prefix).text("max"))
        .changed();

    if !lo_changed && !hi_changed {
        return None;
    }
    if lo_changed && lo > hi {
        hi = lo;
    }
    if hi_changed && hi < lo {
        lo = hi;
    }
    Some(Interval::new(lo, hi))
}

/// Inline checkbox group for one categorical column. Returns the new
/// selection if it changed.
fn category_group<C: Category>(
    ui: &mut Ui,
    column: CategoryColumn,
    selected: &BTreeSet<C>,
) -> Option<BTreeSet<C>> {
    let mut next = selected.clone();

    ui.horizontal(|ui: &mut Ui| {
        ui.strong(format!("{}  ({}/{})", column.title(), selected.len(), C::ALL.len()));
        if ui.small_button("All").clicked() {
            next = C::ALL.iter().copied().collect();
        }
        if ui.small_button("None").clicked() {
            next.clear();
        }
    });

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for value in C::ALL {
            let mut checked = selected.contains(value);
            if ui.checkbox(&mut checked, value.as_str()).changed() {
                if checked {
                    next.insert(*value);
                } else {
                    next.remove(value);
                }
            }
        }
    });
    ui.add_space(4.0);

    (next != *selected).then_some(next)
}

// ---------------------------------------------------------------------------
// Summary cards
// ---------------------------------------------------------------------------

/// Render the four "Sales Summary" cards for the current view.
pub fn summary_cards(ui: &mut Ui, view: &DerivedView, config: &DashboardConfig) {
    ui.heading("Sales Summary");

    let stats = view.summary.as_ref();
    let money = config.currency_symbol.as_str();
    let cards = [
        ("Total Sales", format_count(stats)),
        ("Average Tip", format_tip(stats, money, |s| s.average_tip)),
        ("Highest Tip", format_tip(stats, money, |s| s.max_tip)),
        ("Lowest Tip", format_tip(stats, money, |s| s.min_tip)),
    ];

    ui.columns(cards.len(), |cols: &mut [Ui]| {
        for (col, (title, value)) in cols.iter_mut().zip(cards) {
            egui::Frame::group(col.style()).show(col, |ui: &mut Ui| {
                ui.set_min_width(ui.available_width());
                ui.label(RichText::new(title).strong());
                ui.label(RichText::new(value).size(20.0));
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} rows loaded, {} visible",
            state.dataset().len(),
            state.view().rows.len()
        ));
        if let Some(path) = state.source_path() {
            ui.weak(path.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open tips data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open_path(&path);
    }
}
