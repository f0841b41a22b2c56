use crate::PaintApp;
use crate::tool::{ToolKind, to_hex_color};
use egui::Color32;

const SIZE_MIN: f32 = 1.0;
const SIZE_MAX: f32 = 64.0;

/// Slider bounds that always contain `size`, so showing a saved size never rewrites it.
pub(crate) fn size_range(size: f32) -> std::ops::RangeInclusive<f32> {
    if !size.is_finite() {
        return SIZE_MIN..=SIZE_MAX;
    }
    SIZE_MIN.min(size)..=SIZE_MAX.max(size)
}

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.store().tool().name;
            for kind in ToolKind::ALL {
                if ui.selectable_label(active == kind, kind.as_str()).clicked() && active != kind {
                    log::info!("Tool selected from UI: {}", kind);
                    app.select_tool(kind);
                }
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Color");
                let mut color = app.store().tool().color32().unwrap_or(Color32::BLACK);
                if ui.color_edit_button_srgba(&mut color).changed() {
                    app.store_mut().set_color(to_hex_color(color));
                }
            });

            let mut size = app.store().tool().size;
            let range = size_range(size);
            let slider = egui::Slider::new(&mut size, range).text("Size");
            if ui.add(slider).changed() {
                app.store_mut().set_active_size(size);
            }
            ui.separator();

            egui::Grid::new("tool_sizes_grid")
                .num_columns(2)
                .spacing([40.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.strong("Tool");
                    ui.strong("Size");
                    ui.end_row();

                    for kind in ToolKind::ALL {
                        ui.label(kind.as_str());
                        ui.label(format!("{}", app.store().size_for(kind)));
                        ui.end_row();
                    }
                });
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Clear canvas").clicked() {
                    app.clear_canvas();
                }
                if ui.button("Reset tools").clicked() {
                    app.cancel_gesture();
                    app.store_mut().reset();
                }
            });

            ui.label(format!("State: {:?}", app.store().tool().phase()));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_range_contains_saved_size() {
        assert_eq!(size_range(8.0), 1.0..=64.0);
        assert_eq!(size_range(100.0), 1.0..=100.0);
        assert_eq!(size_range(0.5), 0.5..=64.0);
        assert_eq!(size_range(f32::INFINITY), 1.0..=64.0);
    }
}
