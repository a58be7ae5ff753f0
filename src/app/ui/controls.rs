use eframe::egui::{self, RichText, Ui};

use convo_visualizer::conversation::{Category, CategoryFilter, ViewMode};

use super::super::render_utils::category_color;
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui, is_importing: bool) {
        egui::ScrollArea::vertical()
            .id_salt("controls_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.draw_summary(ui);
                ui.separator();
                self.draw_filters(ui);
                ui.separator();
                self.draw_view_modes(ui);
                ui.separator();
                self.draw_search(ui);
                ui.separator();
                self.draw_import_export(ui, is_importing);
            });
    }

    fn draw_summary(&self, ui: &mut Ui) {
        let stats = self.view.stats();
        ui.heading("Summary");
        egui::Grid::new("summary_grid")
            .num_columns(2)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                ui.label("Total events");
                ui.label(RichText::new(stats.total.to_string()).strong());
                ui.end_row();
                for category in Category::ALL {
                    ui.colored_label(category_color(category), category.label());
                    ui.label(stats.count(category).to_string());
                    ui.end_row();
                }
            });
    }

    fn draw_filters(&mut self, ui: &mut Ui) {
        let stats = self.view.stats();
        ui.heading("Category");

        let mut requested = None;
        let current = self.view.category_filter();
        if ui
            .selectable_label(
                current == CategoryFilter::All,
                format!("All ({})", stats.total),
            )
            .clicked()
        {
            requested = Some(CategoryFilter::All);
        }
        for category in Category::ALL {
            let filter = CategoryFilter::Only(category);
            let label = RichText::new(format!("{} ({})", category.label(), stats.count(category)))
                .color(category_color(category));
            if ui.selectable_label(current == filter, label).clicked() {
                requested = Some(filter);
            }
        }

        if let Some(filter) = requested {
            self.set_category_filter(filter);
        }
    }

    fn draw_view_modes(&mut self, ui: &mut Ui) {
        ui.heading("View");
        let mut mode = self.view.view_mode();
        ui.horizontal(|ui| {
            for candidate in ViewMode::ALL {
                ui.selectable_value(&mut mode, candidate, candidate.label())
                    .on_hover_text(view_mode_hint(candidate));
            }
        });
        self.set_view_mode(mode);

        if mode.is_graph() {
            ui.horizontal(|ui| {
                if ui.button("Fit view").clicked() {
                    self.fit_requested = true;
                }
                ui.checkbox(&mut self.animate_edges, "Animate workflow edges");
            });
        }
    }

    fn draw_search(&mut self, ui: &mut Ui) {
        ui.heading("Search");
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.search)
                .on_hover_text("Fuzzy match on title, type, author and content");
            if !self.search.is_empty() && ui.small_button("Clear").clicked() {
                self.search.clear();
            }
        });

        if let Some(matches) = self.cached_search_matches() {
            ui.small(format!("{} matching nodes", matches.len()));
        }
    }

    fn draw_import_export(&mut self, ui: &mut Ui, is_importing: bool) {
        ui.heading("File");
        ui.label("Import a conversation JSON file (or drop one on the window).");
        ui.horizontal(|ui| {
            let response = ui.text_edit_singleline(&mut self.import_path);
            let submitted =
                response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
            let clicked = ui
                .add_enabled(!is_importing, egui::Button::new("Import"))
                .clicked();
            if (submitted || clicked) && !is_importing {
                self.request_import();
            }
        });

        ui.add_space(4.0);
        if ui
            .button("Export JSON")
            .on_hover_text("Write the current conversation to the working directory")
            .clicked()
        {
            self.export_current();
        }
    }
}

fn view_mode_hint(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Compact => "Grid of events in document order",
        ViewMode::Flow => "Events alternate across two columns with workflows alongside",
        ViewMode::Table => "Sortable rows for events and workflows",
    }
}
