use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use eframe::egui::{self, Align, Context, Layout, RichText, Vec2};
use tracing::{debug, info};

use convo_visualizer::conversation::{
    CategoryFilter, Document, TableSort, ViewMode, ViewState, export_file_name, search_matches,
    write_document,
};

use super::super::render_utils::blend_color;
use super::super::{SearchMatchCache, StatusMessage, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(view: ViewState, source: String) -> Self {
        Self {
            view,
            source,
            search: String::new(),
            table_sort: TableSort::default(),
            pan: Vec2::ZERO,
            zoom: 1.0,
            fit_requested: true,
            animate_edges: true,
            import_path: String::new(),
            import_requested: None,
            status: None,
            search_match_cache: None,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, is_importing: bool) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Conversation Visualizer");
                    ui.separator();
                    let document = self.view.document();
                    ui.label(format!("conversation: {}", display_id(document)));
                    ui.label(format!("events: {}", document.parts.len()));
                    ui.label(format!("state: {}", document.state_label()));
                    if let Some(channel) = document.channel.as_deref() {
                        ui.label(format!("channel: {channel}"));
                    }
                    ui.label(format!("source: {}", self.source));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let graph = self.view.graph();
                        ui.label(format!(
                            "{} nodes, {} edges",
                            graph.node_count(),
                            graph.edge_count()
                        ));
                        if is_importing {
                            ui.spinner();
                        }
                    });
                });

                if let Some(status) = &self.status {
                    let color = if status.is_error {
                        ui.visuals().error_fg_color
                    } else {
                        blend_color(ui.visuals().text_color(), ui.visuals().weak_text_color(), 0.5)
                    };
                    ui.label(RichText::new(status.text.as_str()).small().color(color));
                }
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui, is_importing));

        if self.view.selected_id().is_some() {
            egui::SidePanel::right("details")
                .resizable(true)
                .default_width(380.0)
                .show(ctx, |ui| self.draw_details(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.view.view_mode() {
            ViewMode::Table => self.draw_table(ui),
            ViewMode::Compact | ViewMode::Flow => self.draw_graph(ui),
        });
    }

    pub(in crate::app) fn install_document(&mut self, document: Document, source: String) {
        self.view.set_document(document);
        self.source = source;
        self.search.clear();
        self.search_match_cache = None;
        self.fit_requested = true;
        self.status = Some(StatusMessage::info(format!(
            "Loaded {} events from {}",
            self.view.stats().total,
            self.source
        )));
    }

    pub(in crate::app) fn set_category_filter(&mut self, filter: CategoryFilter) {
        if self.view.category_filter() == filter {
            return;
        }
        self.view.set_category_filter(filter);
    }

    pub(in crate::app) fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view.view_mode() == mode {
            return;
        }
        self.view.set_view_mode(mode);
        self.fit_requested = true;
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<&str>) {
        if self.view.select_node(selected) {
            debug!(selected = ?self.view.selected_id(), "selection changed");
        }
    }

    pub(in crate::app) fn request_import(&mut self) {
        let path = self.import_path.trim();
        if path.is_empty() {
            self.status = Some(StatusMessage::error("Enter a path to a conversation JSON file"));
            return;
        }
        self.import_requested = Some(PathBuf::from(path));
    }

    pub(in crate::app) fn export_current(&mut self) {
        match self.write_export() {
            Ok(path) => {
                info!(path = %path.display(), "conversation exported");
                self.status = Some(StatusMessage::info(format!("Exported {}", path.display())));
            }
            Err(error) => {
                self.status = Some(StatusMessage::error(format!("{error:#}")));
            }
        }
    }

    fn write_export(&self) -> anyhow::Result<PathBuf> {
        let path = PathBuf::from(export_file_name(self.view.document()));
        write_document(&path, self.view.document())
            .with_context(|| format!("Failed to export conversation to {}", path.display()))?;
        Ok(path)
    }

    pub(in crate::app) fn cached_search_matches(&mut self) -> Option<Arc<HashSet<String>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.revision == self.view.revision()
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matches = Arc::new(search_matches(
            self.view.graph(),
            self.view.document(),
            query,
        )?);

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            revision: self.view.revision(),
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }
}

fn display_id(document: &Document) -> &str {
    if document.id.is_empty() {
        "untitled"
    } else {
        document.id.as_str()
    }
}
