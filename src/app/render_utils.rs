use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use convo_visualizer::conversation::{
    Category, GraphNode, NodePayload, PartType, WorkflowState,
};

pub(super) const NODE_WIDTH: f32 = 240.0;
pub(super) const EVENT_NODE_HEIGHT: f32 = 96.0;
pub(super) const WORKFLOW_NODE_HEIGHT: f32 = 120.0;

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (20.0 * zoom.clamp(0.6, 1.8)).max(10.0);
    let origin = rect.center() + pan;
    let dot = Color32::from_rgba_unmultiplied(70, 80, 92, 90);

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
        while y < rect.bottom() {
            painter.circle_filled(Pos2::new(x, y), 1.0, dot);
            y += step;
        }
        x += step;
    }
}

pub(super) fn rect_visible(viewport: Rect, rect: Rect) -> bool {
    viewport.intersects(rect)
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    !(max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom())
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

pub(super) fn node_height(node: &GraphNode) -> f32 {
    match node.category {
        Category::Workflows => WORKFLOW_NODE_HEIGHT,
        _ => EVENT_NODE_HEIGHT,
    }
}

pub(super) fn category_color(category: Category) -> Color32 {
    match category {
        Category::Assignments => Color32::from_rgb(147, 97, 230),
        Category::Comments => Color32::from_rgb(72, 136, 236),
        Category::Workflows => Color32::from_rgb(46, 160, 96),
        Category::System => Color32::from_rgb(110, 118, 130),
    }
}

pub(super) fn workflow_state_color(state: &WorkflowState) -> Color32 {
    match state {
        WorkflowState::Completed => Color32::from_rgb(46, 160, 96),
        WorkflowState::Running => Color32::from_rgb(72, 136, 236),
        WorkflowState::Failed => Color32::from_rgb(214, 72, 72),
        WorkflowState::Pending | WorkflowState::Other(_) => Color32::from_rgb(110, 118, 130),
    }
}

/// Accent for a node: part type first, falling back to its category.
pub(super) fn payload_color(node: &GraphNode, payload: Option<NodePayload<'_>>) -> Color32 {
    match payload {
        Some(NodePayload::Workflow(workflow)) => workflow_state_color(&workflow.state),
        Some(NodePayload::Event(event)) => match event.part_type {
            PartType::CustomerInitiated
            | PartType::LanguageDetection
            | PartType::CustomActionStarted
            | PartType::CustomActionFinished => Color32::from_rgb(32, 160, 150),
            PartType::ConversationAttributeUpdated => Color32::from_rgb(226, 128, 52),
            _ => category_color(node.category),
        },
        None => category_color(node.category),
    }
}

pub(super) fn edge_stroke(dimmed: bool, zoom: f32, base: Color32) -> Stroke {
    let width = (2.0 * zoom.sqrt()).clamp(0.8, 3.6);
    if dimmed {
        Stroke::new(width * 0.6, dim_color(base, 0.35))
    } else {
        Stroke::new(width, base)
    }
}
