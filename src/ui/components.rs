// Reusable UI components
// Message bubbles, status indicator and small widgets for the chat window

use eframe::egui;
use eframe::egui::text::{LayoutJob, TextFormat};

use crate::state::{ConversationMessage, MessageKind, Sender};

/// Suggested questions shown under the welcome message
pub const QUICK_REPLIES: [&str; 6] = [
    "Como marcar consulta?",
    "Onde fica a UPA mais próxima?",
    "Quais documentos preciso?",
    "Febre e dor de cabeça",
    "Medicamentos gratuitos",
    "Direitos do paciente",
];

const EMERGENCY_RED: egui::Color32 = egui::Color32::from_rgb(200, 30, 30);
const ONLINE_GREEN: egui::Color32 = egui::Color32::from_rgb(0, 180, 0);

/// Render the connected/offline indicator
pub fn status_indicator(ui: &mut egui::Ui, connected: bool) {
    let (text, color) = if connected {
        ("● Conectado", ONLINE_GREEN)
    } else {
        ("● Offline", EMERGENCY_RED)
    };
    ui.colored_label(color, text);
}

/// Split text on `**` markers into (segment, is_bold) pairs
///
/// An unmatched trailing marker leaves the rest of the text bold.
pub fn split_bold(text: &str) -> Vec<(&str, bool)> {
    text.split("**")
        .enumerate()
        .filter(|(_, segment)| !segment.is_empty())
        .map(|(i, segment)| (segment, i % 2 == 1))
        .collect()
}

/// Build a layout job with `**bold**` segments drawn in the strong color
fn message_job(ui: &egui::Ui, text: &str, color: egui::Color32) -> LayoutJob {
    let font_id = egui::TextStyle::Body.resolve(ui.style());
    let strong = ui.visuals().strong_text_color();
    let mut job = LayoutJob::default();
    for (segment, bold) in split_bold(text) {
        job.append(
            segment,
            0.0,
            TextFormat {
                font_id: font_id.clone(),
                color: if bold { strong } else { color },
                ..Default::default()
            },
        );
    }
    job.wrap.max_width = ui.available_width() * 0.75;
    job
}

/// Render one message as a bubble, user messages on the right
pub fn message_bubble(ui: &mut egui::Ui, message: &ConversationMessage) {
    let visuals = ui.visuals().clone();
    let (fill, text_color) = match message.kind {
        MessageKind::User => (visuals.selection.bg_fill, visuals.strong_text_color()),
        MessageKind::Emergency => (
            egui::Color32::from_rgba_unmultiplied(200, 30, 30, 40),
            visuals.text_color(),
        ),
        MessageKind::Offline | MessageKind::System => {
            (visuals.faint_bg_color, visuals.weak_text_color())
        }
        _ => (visuals.extreme_bg_color, visuals.text_color()),
    };

    let layout = match message.sender {
        Sender::User => egui::Layout::right_to_left(egui::Align::TOP),
        Sender::Bot => egui::Layout::left_to_right(egui::Align::TOP),
    };

    ui.with_layout(layout, |ui| {
        let mut frame = egui::Frame::none().fill(fill).inner_margin(egui::Margin::same(10.0));
        frame.rounding = egui::Rounding::same(8.0);
        if message.kind == MessageKind::Emergency {
            frame.stroke = egui::Stroke::new(1.5, EMERGENCY_RED);
        }

        frame.show(ui, |ui| {
            ui.vertical(|ui| {
                if message.kind == MessageKind::Emergency {
                    ui.label(egui::RichText::new("🚨 Emergência").color(EMERGENCY_RED).strong());
                }
                let job = message_job(ui, &message.text, text_color);
                ui.label(job);
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(message.timestamp.format("%H:%M").to_string())
                            .weak()
                            .small(),
                    );
                    if message.sender == Sender::Bot
                        && ui.small_button("📋").on_hover_text("Copiar").clicked()
                    {
                        ui.output_mut(|o| o.copied_text = message.text.clone());
                    }
                });
            });
        });
    });
    ui.add_space(6.0);
}

/// Render the "typing" placeholder bubble
pub fn typing_indicator(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.add(egui::Spinner::new());
        ui.label(egui::RichText::new("SUS Virtual está digitando...").italics().weak());
    });
}

/// Header text for the quick-reply section
pub fn quick_replies_label(shown: bool) -> &'static str {
    if shown {
        "▾ Perguntas rápidas (ocultar)"
    } else {
        "▸ Perguntas rápidas (mostrar)"
    }
}

/// Clickable header that shows or hides the quick replies
pub fn quick_replies_header(ui: &mut egui::Ui, shown: bool) -> egui::Response {
    ui.add(
        egui::Label::new(egui::RichText::new(quick_replies_label(shown)).small().strong())
            .sense(egui::Sense::click()),
    )
    .on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Render the send button
pub fn send_button(ui: &mut egui::Ui, enabled: bool) -> egui::Response {
    ui.add_enabled(
        enabled,
        egui::Button::new(egui::RichText::new("Enviar ➤").strong()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_bold_plain() {
        assert_eq!(split_bold("sem negrito"), vec![("sem negrito", false)]);
    }

    #[test]
    fn test_split_bold_segments() {
        assert_eq!(
            split_bold("Ligue **192** agora"),
            vec![("Ligue ", false), ("192", true), (" agora", false)]
        );
        assert_eq!(split_bold("**Título**"), vec![("Título", true)]);
    }

    #[test]
    fn test_quick_replies_label_follows_state() {
        assert!(quick_replies_label(true).ends_with("(ocultar)"));
        assert!(quick_replies_label(false).ends_with("(mostrar)"));
    }

    #[test]
    fn test_split_bold_unmatched_marker() {
        assert_eq!(split_bold("a **b"), vec![("a ", false), ("b", true)]);
        assert!(split_bold("").is_empty());
    }
}
