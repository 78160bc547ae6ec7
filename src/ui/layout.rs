// Main application layout
// Menu bar, chat header, message list and input area

use eframe::egui;

use crate::state::ChatSession;
use crate::ui::components::*;

/// What the user asked for during this frame
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UiActions {
    /// Text submitted for sending
    pub send: Option<String>,
    /// The conversation should be cleared
    pub clear: bool,
}

/// Render the main application layout
pub fn render_app_layout(ctx: &egui::Context, session: &mut ChatSession) -> UiActions {
    let mut actions = UiActions::default();

    render_menu_bar(ctx, &mut actions);
    render_header(ctx, session, &mut actions);
    render_input_panel(ctx, session, &mut actions);

    egui::CentralPanel::default().show(ctx, |ui| {
        render_messages(ui, session);
    });

    actions
}

/// Render the top menu bar
fn render_menu_bar(ctx: &egui::Context, actions: &mut UiActions) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            // File menu
            ui.menu_button("Arquivo", |ui| {
                if ui.button("Nova conversa").clicked() {
                    actions.clear = true;
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Sair").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            // View menu
            ui.menu_button("Exibir", |ui| {
                let mut dark_mode = ctx.style().visuals.dark_mode;
                if ui.checkbox(&mut dark_mode, "Modo escuro").changed() {
                    ctx.set_visuals(if dark_mode {
                        egui::Visuals::dark()
                    } else {
                        egui::Visuals::light()
                    });
                }
            });
        });
    });
}

/// Render the chat header with title, status and clear button
fn render_header(ctx: &egui::Context, session: &ChatSession, actions: &mut UiActions) {
    egui::TopBottomPanel::top("chat_header").show(ctx, |ui| {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.vertical(|ui| {
                ui.heading("🤖 SUS Virtual Assistant");
                status_indicator(ui, session.is_connected());
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(8.0);
                if ui.button("🗑 Limpar conversa").clicked() {
                    actions.clear = true;
                }
            });
        });
        ui.add_space(8.0);
    });
}

/// Render the scrolling message list
fn render_messages(ui: &mut egui::Ui, session: &ChatSession) {
    egui::ScrollArea::vertical()
        .id_source("chat_messages_scroll")
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.add_space(8.0);
            for message in session.messages() {
                message_bubble(ui, message);
            }
            if session.is_typing() {
                typing_indicator(ui);
            }
        });
}

/// Render quick replies and the input line
fn render_input_panel(ctx: &egui::Context, session: &mut ChatSession, actions: &mut UiActions) {
    egui::TopBottomPanel::bottom("chat_input").show(ctx, |ui| {
        ui.add_space(8.0);

        if quick_replies_header(ui, session.show_quick_replies).clicked() {
            session.toggle_quick_replies();
        }
        if session.show_quick_replies {
            ui.horizontal_wrapped(|ui| {
                for reply in QUICK_REPLIES {
                    if ui.button(reply).clicked() {
                        session.input = reply.to_string();
                    }
                }
            });
        }
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let can_send = !session.is_busy() && !session.input.trim().is_empty();
            let button_width = 90.0;

            let input = ui.add_sized(
                [ui.available_width() - button_width, 28.0],
                egui::TextEdit::singleline(&mut session.input)
                    .hint_text("Digite sua pergunta sobre saúde..."),
            );
            let enter_pressed =
                input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            if send_button(ui, can_send).clicked() || (enter_pressed && can_send) {
                if let Some(text) = session.submit_input() {
                    actions.send = Some(text);
                }
                input.request_focus();
            }
        });

        ui.add_space(4.0);
        ui.label(
            egui::RichText::new("Em emergências, ligue 192 (SAMU).")
                .weak()
                .small(),
        );
        ui.add_space(4.0);
    });
}
