//! Paints a rendered [`OrderView`] with egui widgets.

use crate::render::{ItemsBody, ItemsSection, OrderView};

pub fn show_order_view(ui: &mut egui::Ui, view: &OrderView) {
    ui.heading(format!("📦 Order {}", view.order_id));
    ui.add_space(8.0);

    ui.columns(view.sections.len().max(1), |columns| {
        for (column, section) in columns.iter_mut().zip(&view.sections) {
            egui::Frame::group(column.style())
                .inner_margin(egui::Margin::same(10))
                .show(column, |ui| {
                    ui.strong(section.title);
                    ui.add_space(4.0);
                    egui::Grid::new(("order_section", section.kind))
                        .num_columns(2)
                        .spacing(egui::vec2(12.0, 4.0))
                        .show(ui, |ui| {
                            for field in &section.fields {
                                ui.weak(field.label);
                                ui.label(field.value.as_str());
                                ui.end_row();
                            }
                        });
                });
        }
    });

    ui.add_space(16.0);
    show_items(ui, &view.items);

    ui.add_space(16.0);
    egui::CollapsingHeader::new("📄 Full record (JSON)")
        .default_open(false)
        .show(ui, |ui| {
            let mut dump = view.raw_json.as_str();
            ui.add(
                egui::TextEdit::multiline(&mut dump)
                    .code_editor()
                    .desired_width(f32::INFINITY),
            );
        });
}

fn show_items(ui: &mut egui::Ui, items: &ItemsSection) {
    ui.heading(format!("🛍 {}", items.heading()));
    ui.add_space(4.0);

    match &items.body {
        ItemsBody::Placeholder(text) => {
            ui.label(*text);
        }
        ItemsBody::Table(rows) => {
            egui::ScrollArea::horizontal()
                .id_salt("order_items")
                .show(ui, |ui| {
                    egui::Grid::new("order_items_grid")
                        .striped(true)
                        .num_columns(ItemsSection::COLUMNS.len())
                        .spacing(egui::vec2(18.0, 6.0))
                        .show(ui, |ui| {
                            for column in ItemsSection::COLUMNS {
                                ui.strong(column);
                            }
                            ui.end_row();

                            for row in rows {
                                ui.label(row.name.as_str());
                                ui.label(row.brand.as_str());
                                ui.label(row.price.as_str());
                                ui.label(row.quantity.as_str());
                                ui.label(row.size.as_str());
                                ui.label(row.total.as_str());
                                ui.end_row();
                            }
                        });
                });
        }
    }
}
