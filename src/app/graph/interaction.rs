use eframe::egui::{self, Pos2, Rect, Ui, Vec2, vec2};

use convo_visualizer::conversation::Layout;

use super::super::render_utils::{EVENT_NODE_HEIGHT, NODE_WIDTH, WORKFLOW_NODE_HEIGHT, screen_to_world};
use super::super::ViewModel;

const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 3.0;
const FIT_PADDING: f32 = 48.0;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    /// Centres the layout in `rect`, zooming out until every node fits.
    pub(in crate::app) fn fit_to_layout(&mut self, rect: Rect, layout: &Layout) {
        let Some((min, max)) = layout.bounds() else {
            self.pan = Vec2::ZERO;
            self.zoom = 1.0;
            return;
        };

        let tallest = EVENT_NODE_HEIGHT.max(WORKFLOW_NODE_HEIGHT);
        let world_min = vec2(min.x, min.y);
        let world_max = vec2(max.x + NODE_WIDTH, max.y + tallest);
        let extent = (world_max - world_min).max(vec2(1.0, 1.0));
        let available = (rect.size() - Vec2::splat(FIT_PADDING * 2.0)).max(vec2(1.0, 1.0));

        self.zoom = (available.x / extent.x)
            .min(available.y / extent.y)
            .clamp(MIN_ZOOM, 1.0);
        let world_center = (world_min + world_max) * 0.5;
        self.pan = -world_center * self.zoom;
    }

    /// Topmost node rect under the pointer. Later entries draw on top.
    pub(in crate::app) fn hovered_node(
        &self,
        ui: &Ui,
        node_rects: &[(usize, Rect)],
    ) -> Option<usize> {
        let pointer: Pos2 = ui.input(|input| input.pointer.hover_pos())?;
        node_rects
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(pointer))
            .map(|(index, _)| *index)
    }
}
