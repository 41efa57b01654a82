use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::config::DashboardConfig;
use crate::data::model::{Row, REQUIRED_COLUMNS};
use crate::data::stats::format_currency;

const ROW_HEIGHT: f32 = 18.0;

/// Scrollable table of the filtered rows.
pub fn rows_table(ui: &mut Ui, rows: &[Row], config: &DashboardConfig) {
    let money = config.currency_symbol.as_str();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(220.0)
        .columns(Column::auto().at_least(60.0), REQUIRED_COLUMNS.len())
        .header(20.0, |mut header| {
            for name in REQUIRED_COLUMNS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut table_row| {
                let r = &rows[table_row.index()];
                let cells = [
                    format_currency(money, r.total_bill),
                    format_currency(money, r.tip),
                    r.sex.to_string(),
                    r.smoker.to_string(),
                    r.day.to_string(),
                    r.time.to_string(),
                    r.size.to_string(),
                ];
                for cell in cells {
                    table_row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
