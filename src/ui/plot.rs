use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::config::DashboardConfig;
use crate::data::model::Row;
use crate::data::stats::NO_DATA;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Scatter plot with best-fit line (central panel)
// ---------------------------------------------------------------------------

fn to_points<'a>(rows: impl Iterator<Item = &'a Row>) -> Vec<[f64; 2]> {
    rows.map(|r| [r.total_bill, r.tip]).collect()
}

/// Render "Total Bill vs Tip" for the filtered rows.
pub fn scatter_plot(ui: &mut Ui, state: &AppState, config: &DashboardConfig) {
    let view = state.view();
    if view.rows.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(NO_DATA);
        });
        return;
    }

    let money = &config.currency_symbol;
    Plot::new("tips_scatter")
        .legend(Legend::default())
        .x_axis_label(format!("Total Bill ({money})"))
        .y_axis_label(format!("Tip ({money})"))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            match &state.color_map {
                Some(cm) => {
                    for (label, color) in cm.legend_entries() {
                        let points = to_points(
                            view.rows
                                .iter()
                                .filter(|r| cm.column.label_of(r) == label),
                        );
                        plot_ui.points(
                            Points::new(PlotPoints::from(points))
                                .name(label)
                                .color(color)
                                .radius(config.point_radius),
                        );
                    }
                }
                None => {
                    plot_ui.points(
                        Points::new(PlotPoints::from(to_points(view.rows.iter())))
                            .name("Sales")
                            .color(Color32::LIGHT_BLUE)
                            .radius(config.point_radius),
                    );
                }
            }

            // Absent when the fit is degenerate; the points still show.
            if let Some(trend) = &view.trend {
                let line = Line::new(PlotPoints::from(trend.points.clone()))
                    .name("Line of Best Fit")
                    .color(Color32::RED)
                    .width(2.0);
                plot_ui.line(line);
            }
        });
}
