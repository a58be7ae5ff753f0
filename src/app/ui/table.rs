use eframe::egui::{self, RichText, Ui};

use convo_visualizer::conversation::{NodeKind, SortDirection, SortField};

use crate::util::{format_timestamp, truncate_chars};

use super::super::render_utils::category_color;
use super::super::ViewModel;

const SORTABLE_COLUMNS: [(SortField, &str); 4] = [
    (SortField::Position, "#"),
    (SortField::Timestamp, "Time"),
    (SortField::Author, "Author"),
    (SortField::Type, "Type"),
];

impl ViewModel {
    pub(in crate::app) fn draw_table(&mut self, ui: &mut Ui) {
        let matches = self.cached_search_matches();
        let rows = self.view.table_rows(self.table_sort, matches.as_deref());
        let selected = self.view.selected_id().map(str::to_owned);

        if rows.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.label("No rows match the current filter and search.");
            });
            return;
        }

        let mut toggled = None;
        let mut clicked = None;

        egui::ScrollArea::both()
            .id_salt("table_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("conversation_table")
                    .num_columns(6)
                    .striped(true)
                    .spacing([14.0, 6.0])
                    .show(ui, |ui| {
                        for (field, title) in SORTABLE_COLUMNS {
                            if ui.button(self.header_label(field, title)).clicked() {
                                toggled = Some(field);
                            }
                            if field == SortField::Timestamp {
                                ui.label(RichText::new("Event").strong());
                            }
                        }
                        ui.label(RichText::new("Content").strong());
                        ui.end_row();

                        for row in &rows {
                            let is_selected = selected.as_deref() == Some(row.node_id.as_str());
                            if ui
                                .selectable_label(is_selected, row.position.to_string())
                                .clicked()
                            {
                                clicked = Some(row.node_id.clone());
                            }
                            ui.label(format_timestamp(row.timestamp, &row.timestamp_raw));
                            let label = match row.kind {
                                NodeKind::Workflow => RichText::new(row.label.as_str()).strong(),
                                NodeKind::Event => RichText::new(row.label.as_str()),
                            };
                            ui.label(label.color(category_color(row.category)));
                            ui.label(row.author.as_str());
                            ui.monospace(row.part_type.as_str());
                            ui.vertical(|ui| {
                                ui.label(truncate_chars(&row.content, 80))
                                    .on_hover_text(row.content.as_str());
                                if !row.summary.is_empty() {
                                    ui.small(row.summary.as_str());
                                }
                            });
                            ui.end_row();
                        }
                    });
            });

        if let Some(field) = toggled {
            self.table_sort.toggle(field);
        }
        if let Some(id) = clicked {
            if selected.as_deref() == Some(id.as_str()) {
                self.set_selected(None);
            } else {
                self.set_selected(Some(id.as_str()));
            }
        }
    }

    fn header_label(&self, field: SortField, title: &str) -> RichText {
        let text = if self.table_sort.field == field {
            let arrow = match self.table_sort.direction {
                SortDirection::Ascending => "\u{25B2}",
                SortDirection::Descending => "\u{25BC}",
            };
            format!("{title} {arrow}")
        } else {
            title.to_owned()
        };
        RichText::new(text).strong()
    }
}
