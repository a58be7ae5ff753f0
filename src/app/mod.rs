use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{Context, Vec2};
use tracing::{info, warn};

use convo_visualizer::conversation::{Document, TableSort, ViewState, read_document};

mod graph;
mod render_utils;
mod ui;

type ImportResult = Result<(PathBuf, Document), String>;

pub struct ConvoApp {
    model: ViewModel,
    import_rx: Option<Receiver<ImportResult>>,
}

struct ViewModel {
    view: ViewState,
    source: String,
    search: String,
    table_sort: TableSort,
    pan: Vec2,
    zoom: f32,
    fit_requested: bool,
    animate_edges: bool,
    import_path: String,
    import_requested: Option<PathBuf>,
    status: Option<StatusMessage>,
    search_match_cache: Option<SearchMatchCache>,
}

struct SearchMatchCache {
    query: String,
    revision: u64,
    matches: Arc<HashSet<String>>,
}

struct StatusMessage {
    text: String,
    is_error: bool,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

impl ConvoApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, view: ViewState, source: String) -> Self {
        Self {
            model: ViewModel::new(view, source),
            import_rx: None,
        }
    }

    fn spawn_import(path: PathBuf) -> Receiver<ImportResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = read_document(&path)
                .map(|document| (path, document))
                .map_err(|error| error.to_string());
            let _ = tx.send(result);
        });

        rx
    }

    fn poll_import(&mut self, ctx: &Context) {
        let Some(rx) = self.import_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(Ok((path, document))) => {
                info!(path = %path.display(), parts = document.parts.len(), "conversation imported");
                self.model.install_document(document, path.display().to_string());
            }
            Ok(Err(error)) => {
                warn!(%error, "conversation import rejected");
                self.model.status = Some(StatusMessage::error(format!(
                    "Import failed, keeping the current conversation: {error}"
                )));
            }
            Err(TryRecvError::Empty) => {
                self.import_rx = Some(rx);
                ctx.request_repaint();
            }
            Err(TryRecvError::Disconnected) => {
                self.model.status = Some(StatusMessage::error(
                    "Background import worker disconnected",
                ));
            }
        }
    }
}

impl eframe::App for ConvoApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_import(ctx);

        let dropped = ctx.input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        });
        if let Some(path) = dropped {
            self.model.import_requested = Some(path);
        }

        let is_importing = self.import_rx.is_some();
        self.model.show(ctx, is_importing);

        if let Some(path) = self.model.import_requested.take()
            && self.import_rx.is_none()
        {
            self.model.status = Some(StatusMessage::info(format!(
                "Importing {}...",
                path.display()
            )));
            self.import_rx = Some(Self::spawn_import(path));
        }
    }
}
