use eframe::egui::{self, RichText, Ui};
use serde_json::{Map, Value};

use convo_visualizer::conversation::{Event, NodePayload, Workflow, parse_timestamp};

use crate::util::{format_date, format_detail_value, format_duration, format_timestamp, humanize_key};

use super::super::render_utils::{category_color, workflow_state_color};
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        let mut close = false;
        let mut follow = None;
        let sequence_index = self.view.selected_node().map(|node| node.sequence_index);

        ui.horizontal(|ui| {
            ui.heading("Details");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                close = ui.button("Close").clicked();
            });
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .id_salt("details_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| match self.view.selected_payload() {
                Some(NodePayload::Event(event)) => draw_event(ui, event, sequence_index),
                Some(NodePayload::Workflow(workflow)) => {
                    follow = draw_workflow(ui, workflow, |id| self.view.graph().contains(id));
                }
                None => {
                    ui.label("The selected node is not part of the current view.");
                }
            });

        if close {
            self.set_selected(None);
        } else if let Some(id) = follow {
            self.set_selected(Some(id.as_str()));
        }
    }
}

fn draw_event(ui: &mut Ui, event: &Event, sequence_index: Option<usize>) {
    let info = event.part_type.info();
    let category = event.category();

    ui.label(RichText::new(info.label).strong().size(18.0));
    ui.label(RichText::new(info.description).italics());
    ui.horizontal(|ui| {
        ui.colored_label(category_color(category), category.label());
        ui.separator();
        ui.monospace(event.part_type.as_str());
    });
    if let Some(index) = sequence_index {
        ui.small(format!("Event #{index} in flow"));
    }
    ui.add_space(6.0);

    egui::Grid::new("event_fields")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            ui.label("Event ID");
            ui.horizontal(|ui| {
                ui.monospace(event.id.as_str());
                if ui.small_button("Copy").clicked() {
                    ui.ctx().copy_text(event.id.to_string());
                }
            });
            ui.end_row();

            ui.label("Time");
            ui.label(format_timestamp(event.timestamp(), event.created_at.as_str()));
            ui.end_row();

            ui.label("Author");
            ui.label(event.author.as_deref().unwrap_or("System"));
            ui.end_row();

            if let Some(channel) = event.channel.as_deref() {
                ui.label("Channel");
                ui.label(channel);
                ui.end_row();
            }
        });

    if let Some(content) = event.content.as_deref().filter(|content| !content.is_empty()) {
        ui.add_space(6.0);
        ui.label(RichText::new("Content").strong());
        ui.label(content);
    }

    match (event.details_map(), event.details.as_ref()) {
        (Some(details), _) if !details.is_empty() => {
            ui.add_space(6.0);
            ui.label(RichText::new("Details").strong());
            draw_fields(ui, "event_details", details);
        }
        (None, Some(details)) if !details.is_null() => {
            ui.add_space(6.0);
            ui.label(RichText::new("Details").strong());
            ui.monospace(format_detail_value(details));
        }
        _ => {}
    }

    if !event.extra.is_empty() {
        ui.add_space(6.0);
        ui.collapsing("Other fields", |ui| draw_fields(ui, "event_extra", &event.extra));
    }
}

/// Returns the related part the user asked to jump to.
fn draw_workflow(
    ui: &mut Ui,
    workflow: &Workflow,
    in_view: impl Fn(&str) -> bool,
) -> Option<String> {
    let mut follow = None;

    ui.label(RichText::new(workflow.title()).strong().size(18.0));
    ui.colored_label(
        workflow_state_color(&workflow.state),
        workflow.state.label(),
    );
    ui.add_space(6.0);

    egui::Grid::new("workflow_fields")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            ui.label("Workflow ID");
            ui.monospace(workflow.id.as_str());
            ui.end_row();

            ui.label("Started");
            ui.label(format_timestamp(workflow.started(), workflow.started_at.as_str()));
            ui.end_row();

            if let Some(finished_at) = workflow.finished_at.non_empty() {
                ui.label("Finished");
                ui.label(format_timestamp(parse_timestamp(finished_at), finished_at));
                ui.end_row();
            }

            ui.label("Duration");
            ui.label(format_duration(workflow.duration_seconds()));
            ui.end_row();

            if let Some(entity) = workflow.entity.as_deref() {
                ui.label("Entity");
                ui.label(entity);
                ui.end_row();
            }
        });

    ui.add_space(6.0);
    ui.label(RichText::new(format!("Steps ({})", workflow.executed_controls.len())).strong());
    if workflow.executed_controls.is_empty() {
        ui.label("No steps recorded.");
    }
    for (index, control) in workflow.executed_controls.iter().enumerate() {
        ui.label(format!("{}. {}", index + 1, control.step));
    }

    ui.add_space(6.0);
    ui.label(RichText::new(format!("Related parts ({})", workflow.related_parts.len())).strong());
    for part in &workflow.related_parts {
        if in_view(part.as_str()) {
            if ui.link(part.as_str()).clicked() {
                follow = Some(part.to_string());
            }
        } else {
            ui.label(RichText::new(part.as_str()).weak())
                .on_hover_text("Not present in the current view");
        }
    }

    if !workflow.extra.is_empty() {
        ui.add_space(6.0);
        ui.collapsing("Other fields", |ui| draw_fields(ui, "workflow_extra", &workflow.extra));
    }

    ui.add_space(6.0);
    ui.small(format!("Started on {}", format_date(workflow.started(), workflow.started_at.as_str())));

    follow
}

fn draw_fields(ui: &mut Ui, id: &str, fields: &Map<String, Value>) {
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([12.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            for (key, value) in fields {
                ui.label(humanize_key(key));
                match value {
                    Value::Array(_) | Value::Object(_) => {
                        ui.monospace(format_detail_value(value));
                    }
                    _ => {
                        ui.label(format_detail_value(value));
                    }
                }
                ui.end_row();
            }
        });
}
