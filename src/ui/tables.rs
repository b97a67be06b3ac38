use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::color::SpeciesPalette;
use crate::data::store::FilteredView;
use crate::data::table::{Column, GridFilters, SortDirection, SortState};
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;
const TABLE_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Data table – sortable, read-only
// ---------------------------------------------------------------------------

pub fn data_table(ui: &mut Ui, state: &mut AppState) {
    let view = state.store.filtered_view();
    if view.is_empty() {
        ui.label("No penguins to show.");
        return;
    }
    let rows = state.table_rows(&view);
    ui.label(format!("{} rows", rows.len()));

    ui.push_id("penguin_data_table", |ui: &mut Ui| {
        penguin_table(ui, &view, &rows, &mut state.table_sort, None, &state.palette);
    });
}

// ---------------------------------------------------------------------------
// Data grid – sortable, with a filter box per column
// ---------------------------------------------------------------------------

pub fn data_grid(ui: &mut Ui, state: &mut AppState) {
    let view = state.store.filtered_view();
    let rows = state.grid_rows(&view);
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{} of {} rows", rows.len(), view.len()));
        if state.grid_filters.is_active() && ui.small_button("Clear filters").clicked() {
            state.grid_filters.clear();
        }
    });

    ui.push_id("penguin_data_grid", |ui: &mut Ui| {
        penguin_table(
            ui,
            &view,
            &rows,
            &mut state.grid_sort,
            Some(&mut state.grid_filters),
            &state.palette,
        );
    });
}

// ---------------------------------------------------------------------------
// Shared table body
// ---------------------------------------------------------------------------

fn penguin_table(
    ui: &mut Ui,
    view: &FilteredView,
    rows: &[usize],
    sort: &mut SortState,
    mut filters: Option<&mut GridFilters>,
    palette: &SpeciesPalette,
) {
    let header_height = if filters.is_some() { 44.0 } else { 20.0 };

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(TABLE_HEIGHT)
        .columns(TableColumn::auto().at_least(56.0), Column::ALL.len())
        .header(header_height, |mut header| {
            for column in Column::ALL {
                header.col(|ui: &mut Ui| {
                    ui.vertical(|ui: &mut Ui| {
                        let arrow = match sort.direction_of(column) {
                            Some(SortDirection::Ascending) => " ⏶",
                            Some(SortDirection::Descending) => " ⏷",
                            None => "",
                        };
                        let label = RichText::new(format!("{}{arrow}", column.header())).strong();
                        if ui.add(egui::Button::new(label).frame(false)).clicked() {
                            sort.cycle(column);
                        }
                        if let Some(filters) = filters.as_deref_mut() {
                            let hint = if column.is_numeric() { "lo..hi" } else { "filter" };
                            ui.add(
                                egui::TextEdit::singleline(filters.query_mut(column))
                                    .hint_text(hint)
                                    .desired_width(f32::INFINITY),
                            );
                        }
                    });
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let Some(penguin) = view.get(rows[row.index()]) else {
                    return;
                };
                for column in Column::ALL {
                    row.col(|ui: &mut Ui| {
                        let text = column.format(penguin);
                        if column == Column::Species {
                            ui.colored_label(palette.color_for(penguin.species), text);
                        } else {
                            ui.label(text);
                        }
                    });
                }
            });
        });
}
