use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use mak_catalogue::data::loader::Severity;
use mak_catalogue::data::model::{Choice, Dimension};
use mak_catalogue::data::source::open_source;
use mak_catalogue::locale::Locale;
use mak_catalogue::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the menu, title and language switch.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open workbook…").clicked() {
                open_source_dialog(state, false);
                ui.close_menu();
            }
            if ui.button("Open CSV folder…").clicked() {
                open_source_dialog(state, true);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(diag) = &state.status {
            let color = match diag.severity {
                Severity::Error => Color32::RED,
                Severity::Warning => Color32::ORANGE,
            };
            ui.label(RichText::new(&diag.message).color(color));
        }
    });

    let texts = state.texts();
    let current = state.locale();
    let mut chosen = current;

    ui.horizontal(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.heading(RichText::new("MAK").strong());
            ui.label(RichText::new(texts.title).size(16.0));
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            // right_to_left: add in reverse so the radios read left to right
            for locale in Locale::ALL.iter().rev() {
                ui.radio_value(&mut chosen, *locale, locale.display_name_in(current));
            }
            ui.strong(texts.language_label);
        });
    });

    if chosen != current {
        state.set_locale(chosen);
    }
}

// ---------------------------------------------------------------------------
// Filter bar
// ---------------------------------------------------------------------------

/// Four facet selectors plus the clear button.
pub fn filter_bar(ui: &mut Ui, state: &mut AppState) {
    if state.records().is_empty() {
        return;
    }

    let labels = state.labels();
    let texts = state.texts();
    let mut picked: Option<(Dimension, Choice)> = None;
    let mut clear = false;

    ui.horizontal(|ui: &mut Ui| {
        for dim in Dimension::ALL {
            let current = state.selection().get(dim);
            let options = state.view().options.for_dimension(dim);

            ui.vertical(|ui: &mut Ui| {
                ui.strong(labels.for_dimension(dim));
                egui::ComboBox::from_id_salt(("facet", dim.index()))
                    .width(200.0)
                    .selected_text(current.to_string())
                    .show_ui(ui, |ui: &mut Ui| {
                        for opt in options {
                            if ui.selectable_label(opt == current, opt.to_string()).clicked() {
                                picked = Some((dim, opt.clone()));
                            }
                        }
                    });
            });
        }

        ui.vertical(|ui: &mut Ui| {
            ui.add_space(18.0);
            if ui.button(texts.clear_button).clicked() {
                clear = true;
            }
        });
    });

    if clear {
        state.reset();
    } else if let Some((dim, choice)) = picked {
        state.select(dim, choice);
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Render the filtered records with localized headers.
pub fn results_table(ui: &mut Ui, state: &AppState) {
    let texts = state.texts();

    if state.records().is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(texts.no_data);
        });
        return;
    }
    if state.view().is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(texts.no_results);
        });
        return;
    }

    let headers = state.labels().table_headers();
    let rows = &state.view().rows;
    let records = state.records();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(80.0), headers.len() - 1)
        .column(Column::remainder())
        .header(22.0, |mut header| {
            for h in headers {
                header.col(|ui: &mut Ui| {
                    ui.strong(h);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let Some(record) = records.get(rows[row.index()]) else {
                    return;
                };
                for cell in record.table_cells() {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

/// "Results: N" under the table.
pub fn results_caption(ui: &mut Ui, state: &AppState) {
    if state.records().is_empty() || state.view().is_empty() {
        return;
    }
    ui.label(state.texts().results_caption(state.view().len()));
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_source_dialog(state: &mut AppState, folder: bool) {
    let picked = if folder {
        rfd::FileDialog::new()
            .set_title("Open folder of CSV sections")
            .pick_folder()
    } else {
        rfd::FileDialog::new()
            .set_title("Open catalogue workbook")
            .add_filter("Workbook", &["json"])
            .pick_file()
    };

    if let Some(path) = picked {
        match open_source(&path) {
            Ok(source) => state.set_source(source),
            Err(e) => {
                log::error!("Failed to open {}: {e}", path.display());
                state.status = Some((&e).into());
            }
        }
    }
}
