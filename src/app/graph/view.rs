use eframe::egui::{
    self, Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Shape, Stroke, StrokeKind, Ui,
    Vec2, pos2, vec2,
};

use convo_visualizer::conversation::{
    ConversationGraph, Document, EdgeKind, GraphNode, NodePayload,
};

use crate::util::truncate_chars;

use super::super::render_utils::{
    NODE_WIDTH, blend_color, dim_color, draw_background, edge_stroke, edge_visible, node_height,
    payload_color, rect_visible, world_to_screen,
};
use super::super::ViewModel;

const TEXT_MIN_ZOOM: f32 = 0.35;
const CARD_FILL: Color32 = Color32::from_rgb(32, 37, 45);
const SEQUENTIAL_EDGE: Color32 = Color32::from_rgb(120, 130, 145);
const ATTACHMENT_EDGE: Color32 = Color32::from_rgb(46, 160, 96);
const SEARCH_OUTLINE: Color32 = Color32::from_rgb(240, 200, 80);

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);

        if self.fit_requested {
            if let Some(layout) = self.view.layout().cloned() {
                self.fit_to_layout(rect, &layout);
            }
            self.fit_requested = false;
        }

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let matches = self.cached_search_matches();
        let pan = self.pan;
        let zoom = self.zoom;
        let graph = self.view.graph();
        let document = self.view.document();

        if graph.nodes.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "This conversation has no events.",
                FontId::proportional(16.0),
                ui.visuals().weak_text_color(),
            );
            return;
        }

        let node_rects = graph
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let point = self.view.layout()?.position(&node.id)?;
                let min = world_to_screen(rect, pan, zoom, vec2(point.x, point.y));
                let size = vec2(NODE_WIDTH, node_height(node)) * zoom;
                Some((index, Rect::from_min_size(min, size)))
            })
            .collect::<Vec<_>>();
        let mut rect_by_index = vec![None; graph.nodes.len()];
        for (index, node_rect) in &node_rects {
            rect_by_index[*index] = Some(*node_rect);
        }

        let time = ui.input(|input| input.time) as f32;
        let mut animating = false;
        for edge in &graph.edges {
            let (Some(&source), Some(&target)) = (
                graph.index_by_id.get(&edge.source),
                graph.index_by_id.get(&edge.target),
            ) else {
                continue;
            };
            let (Some(source_rect), Some(target_rect)) = (rect_by_index[source], rect_by_index[target])
            else {
                continue;
            };

            let searched_out = matches.as_ref().is_some_and(|matches| {
                !matches.contains(&edge.source) && !matches.contains(&edge.target)
            });
            let dimmed = edge.dimmed || searched_out;

            match edge.kind {
                EdgeKind::Sequential => {
                    let path = elbow_path(source_rect, target_rect);
                    if !path_visible(rect, &path) {
                        continue;
                    }
                    let stroke = edge_stroke(dimmed, zoom, SEQUENTIAL_EDGE);
                    painter.add(Shape::line(path.clone(), stroke));
                    draw_arrow_head(&painter, &path, stroke);
                }
                EdgeKind::WorkflowAttachment => {
                    let start = source_rect.left_center();
                    let end = target_rect.right_center();
                    if !edge_visible(rect, start, end, 8.0) {
                        continue;
                    }
                    let stroke = edge_stroke(dimmed, zoom, ATTACHMENT_EDGE);
                    let dash = (10.0 * zoom).max(3.0);
                    let offset = if self.animate_edges && !dimmed {
                        animating = true;
                        (time * 24.0 * zoom).rem_euclid(dash * 2.0)
                    } else {
                        0.0
                    };
                    painter.extend(Shape::dashed_line_with_offset(
                        &[start, end],
                        stroke,
                        &[dash],
                        &[dash],
                        dash * 2.0 - offset,
                    ));
                    draw_arrow_head(&painter, &[start, end], stroke);
                }
            }
        }

        let hovered = self.hovered_node(ui, &node_rects);
        let selected = self.view.selected_id();
        for (index, node_rect) in &node_rects {
            if !rect_visible(rect, *node_rect) {
                continue;
            }
            let node = &graph.nodes[*index];
            draw_node(
                &painter,
                *node_rect,
                node,
                graph,
                document,
                NodeDecoration {
                    zoom,
                    selected: selected == Some(node.id.as_str()),
                    hovered: hovered == Some(*index),
                    matched: matches.as_ref().map(|matches| matches.contains(&node.id)),
                },
            );
        }

        if hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }

        let hovered_id = hovered.map(|index| graph.nodes[index].id.clone());
        if animating || response.dragged() {
            ui.ctx().request_repaint();
        }

        if response.clicked_by(egui::PointerButton::Primary) {
            self.set_selected(hovered_id.as_deref());
        }
    }
}

#[derive(Clone, Copy)]
struct NodeDecoration {
    zoom: f32,
    selected: bool,
    hovered: bool,
    /// `None` while no search is active.
    matched: Option<bool>,
}

fn draw_node(
    painter: &Painter,
    rect: Rect,
    node: &GraphNode,
    graph: &ConversationGraph,
    document: &Document,
    decoration: NodeDecoration,
) {
    let payload = graph.payload(document, node);
    let faded = node.dimmed || decoration.matched == Some(false);
    let accent = payload_color(node, payload);
    let radius = 6.0 * decoration.zoom;

    let mut fill = blend_color(CARD_FILL, accent, 0.12);
    let mut border = accent;
    if decoration.hovered {
        fill = blend_color(fill, Color32::WHITE, 0.06);
    }
    if faded {
        fill = dim_color(fill, 0.45);
        border = dim_color(border, 0.35);
    }

    painter.rect_filled(rect, radius, fill);
    let header = Rect::from_min_size(rect.min, vec2(rect.width(), (4.0 * decoration.zoom).max(1.5)));
    painter.rect_filled(header, radius, border);

    let border_stroke = if decoration.selected {
        Stroke::new(2.5, Color32::WHITE)
    } else {
        Stroke::new(1.0, border)
    };
    painter.rect_stroke(rect, radius, border_stroke, StrokeKind::Inside);
    if decoration.matched == Some(true) {
        painter.rect_stroke(
            rect.expand(3.0),
            radius + 3.0,
            Stroke::new(1.5, SEARCH_OUTLINE),
            StrokeKind::Outside,
        );
    }

    if decoration.zoom < TEXT_MIN_ZOOM {
        return;
    }

    let text = if faded {
        Color32::from_gray(120)
    } else {
        Color32::from_gray(225)
    };
    let weak = if faded {
        Color32::from_gray(90)
    } else {
        Color32::from_gray(160)
    };
    let zoom = decoration.zoom;
    let left = rect.left() + 10.0 * zoom;
    let mut y = rect.top() + 10.0 * zoom;
    let mut line = |painter: &Painter, content: String, size: f32, color: Color32| {
        painter.text(
            pos2(left, y),
            Align2::LEFT_TOP,
            content,
            FontId::proportional(size * zoom),
            color,
        );
        y += (size + 6.0) * zoom;
    };

    line(painter, truncate_chars(&node.title, 28), 14.0, text);
    match payload {
        Some(NodePayload::Event(event)) => {
            line(
                painter,
                format!("#{}  {}", node.sequence_index, event.part_type.as_str()),
                11.0,
                weak,
            );
            line(
                painter,
                event.author.as_deref().unwrap_or("System").to_owned(),
                11.0,
                weak,
            );
            if let Some(content) = event.content.as_deref().filter(|content| !content.is_empty()) {
                line(painter, truncate_chars(content, 34), 12.0, text);
            }
        }
        Some(NodePayload::Workflow(workflow)) => {
            line(painter, workflow.state.label(), 12.0, accent);
            if let Some(step) = workflow.latest_step() {
                line(painter, truncate_chars(step, 32), 11.0, weak);
            }
            line(
                painter,
                format!("{} related parts", workflow.related_parts.len()),
                11.0,
                weak,
            );
        }
        None => {}
    }
}

/// Right-angled connector between two node cards. Cards in the same row
/// connect side to side, otherwise bottom to top.
fn elbow_path(source: Rect, target: Rect) -> Vec<Pos2> {
    let same_row = (source.center().y - target.center().y).abs() < source.height() * 0.5;
    if same_row {
        let (start, end) = if target.center().x >= source.center().x {
            (source.right_center(), target.left_center())
        } else {
            (source.left_center(), target.right_center())
        };
        let mid_x = (start.x + end.x) * 0.5;
        vec![start, pos2(mid_x, start.y), pos2(mid_x, end.y), end]
    } else {
        let start = source.center_bottom();
        let end = target.center_top();
        let mid_y = (start.y + end.y) * 0.5;
        vec![start, pos2(start.x, mid_y), pos2(end.x, mid_y), end]
    }
}

fn path_visible(rect: Rect, path: &[Pos2]) -> bool {
    path.windows(2)
        .any(|segment| edge_visible(rect, segment[0], segment[1], 8.0))
}

fn draw_arrow_head(painter: &Painter, path: &[Pos2], stroke: Stroke) {
    let [.., from, tip] = path else {
        return;
    };
    let direction = (*tip - *from).normalized();
    if !direction.is_finite() || direction == Vec2::ZERO {
        return;
    }

    let size = (stroke.width * 3.5).max(5.0);
    let normal = direction.rot90();
    let base = *tip - direction * size;
    painter.add(Shape::convex_polygon(
        vec![*tip, base + normal * (size * 0.5), base - normal * (size * 0.5)],
        stroke.color,
        Stroke::NONE,
    ));
}

