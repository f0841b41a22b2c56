use crate::PaintApp;
use egui::{Color32, PointerButton, Pos2, Rect, Sense, Vec2};

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let available = ui.available_size();
            let (response, painter) = ui.allocate_painter(available, Sense::drag());
            let rect = response.rect;
            app.fit_canvas(rect.width() as u32, rect.height() as u32);

            let to_canvas = |pos: Pos2| (pos - rect.min).to_pos2();

            // Leaving the canvas mid-gesture cancels it
            if !app.store().tool().is_idle() {
                let inside = ctx.pointer_hover_pos().is_some_and(|pos| rect.contains(pos));
                if !inside {
                    app.cancel_gesture();
                }
            }

            if let Some(pos) = response.interact_pointer_pos().map(to_canvas) {
                if response.drag_started_by(PointerButton::Primary) {
                    app.pointer_down(pos);
                } else if response.dragged_by(PointerButton::Primary) {
                    app.pointer_move(pos);
                }
            }
            if response.drag_stopped_by(PointerButton::Primary) {
                let pos = response
                    .interact_pointer_pos()
                    .map(to_canvas)
                    .unwrap_or(app.store().tool().last_pos);
                app.pointer_up(pos);
            }

            let texture = app.canvas_texture(ctx);
            let size = Vec2::new(app.canvas().width() as f32, app.canvas().height() as f32);
            painter.image(
                texture,
                Rect::from_min_size(rect.min, size),
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        });
}
