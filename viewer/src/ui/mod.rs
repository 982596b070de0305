mod status;

pub use status::{LoadingOverlay, StatusFeed};

use crate::input::ViewerAction;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};
use motion::{Action, Severity};

const CONTROLS_HINT: &str =
    "Arrows / WASD: move   Space: jump   E: dance   R: reset   Drag: orbit   Wheel: zoom";

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StatusFeed>()
            .init_resource::<LoadingOverlay>()
            .add_message::<ViewerAction>()
            .add_systems(EguiPrimaryContextPass, draw_hud_egui);
    }
}

fn draw_hud_egui(
    mut contexts: EguiContexts,
    time: Res<Time>,
    status: Res<StatusFeed>,
    mut loading: ResMut<LoadingOverlay>,
    mut action_writer: MessageWriter<ViewerAction>,
    mut theme_initialized: Local<bool>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    if !*theme_initialized {
        apply_hud_theme(ctx);
        *theme_initialized = true;
    }

    let now = time.elapsed();

    for action in draw_control_bar(ctx) {
        action_writer.write(ViewerAction(action));
    }

    egui::Area::new(egui::Id::new("hud_controls_hint"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(14.0, 14.0))
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(CONTROLS_HINT)
                    .color(egui::Color32::from_white_alpha(180))
                    .small(),
            );
        });

    if let Some(entry) = status.visible(now) {
        draw_status_toast(ctx, &entry.message, entry.severity);
    }

    let opacity = loading.opacity(now);
    if opacity > 0.0 {
        draw_loading_overlay(ctx, opacity);
    }
}

fn apply_hud_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(14);
    style.visuals.window_corner_radius = egui::CornerRadius::same(12);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(8);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(8);
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(8);
    ctx.set_style(style);
}

/// On-screen buttons; each click yields exactly one action.
fn draw_control_bar(ctx: &egui::Context) -> Vec<Action> {
    let mut clicked = Vec::new();
    let button_size = egui::vec2(64.0, 36.0);

    egui::TopBottomPanel::bottom("hud_control_bar")
        .resizable(false)
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(0, 0, 0, 128))
                    .corner_radius(egui::CornerRadius::same(12))
                    .inner_margin(egui::Margin::symmetric(12, 10))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            let moves =
                                [Action::Left, Action::Forward, Action::Back, Action::Right];
                            for action in moves {
                                if ui
                                    .add_sized(button_size, egui::Button::new(action.label()))
                                    .clicked()
                                {
                                    clicked.push(action);
                                }
                            }
                            ui.separator();
                            for action in [Action::Jump, Action::Dance, Action::Reset] {
                                if ui
                                    .add_sized(button_size, egui::Button::new(action.label()))
                                    .clicked()
                                {
                                    clicked.push(action);
                                }
                            }
                        });
                    });
            });
            ui.add_space(8.0);
        });

    clicked
}

fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Info => egui::Color32::from_rgb(52, 94, 148),
        Severity::Success => egui::Color32::from_rgb(46, 125, 80),
        Severity::Warning => egui::Color32::from_rgb(168, 118, 30),
        Severity::Error => egui::Color32::from_rgb(150, 44, 44),
    }
}

fn draw_status_toast(ctx: &egui::Context, message: &str, severity: Severity) {
    egui::Area::new(egui::Id::new("hud_status_toast"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 18.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(severity_color(severity))
                .corner_radius(egui::CornerRadius::same(8))
                .inner_margin(egui::Margin::symmetric(14, 8))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                });
        });
}

fn draw_loading_overlay(ctx: &egui::Context, opacity: f32) {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0) as u8;
    egui::Area::new(egui::Id::new("hud_loading_overlay"))
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(egui::Color32::from_rgba_unmultiplied(10, 12, 18, alpha / 4 * 3))
                .corner_radius(egui::CornerRadius::same(12))
                .inner_margin(egui::Margin::symmetric(24, 18))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if opacity >= 1.0 {
                            ui.spinner();
                        }
                        ui.label(
                            egui::RichText::new("Loading robot...")
                                .color(egui::Color32::from_white_alpha(alpha))
                                .size(18.0),
                        );
                    });
                });
        });
}
