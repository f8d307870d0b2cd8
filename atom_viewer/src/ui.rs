//! Control panel for the atom viewer
//!
//! Element picker, element facts, ion controls and a short reference of the
//! counting rules the model uses, drawn with egui.

use egui::{Color32, Context, RichText};

use crate::atom::AtomState;
use crate::elements::{self, ELEMENTS};
use crate::ion::ChargeKind;
use crate::shells::{MAX_ELECTRONS, SHELL_CAPACITIES};

/// A counting rule shown in the reference section
pub struct Rule {
    pub name: &'static str,
    pub formula: &'static str,
    pub description: &'static str,
}

pub const ATOM_RULES: &[Rule] = &[
    Rule {
        name: "Mass Number",
        formula: "A = Z + N",
        description: "Protons plus neutrons",
    },
    Rule {
        name: "Ionic Charge",
        formula: "q = Z - e",
        description: "Positive: cation, negative: anion",
    },
    Rule {
        name: "Shell Capacity",
        formula: "2, 8, 8, 8",
        description: "Inner shells fill before outer ones",
    },
];

/// What the panel changed this frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelResponse {
    pub element_changed: bool,
    pub reset_camera: bool,
}

/// Draw the control panel and apply the user's edits to `atom`
pub fn draw_control_panel(ctx: &Context, atom: &mut AtomState) -> PanelResponse {
    let mut response = PanelResponse::default();

    egui::SidePanel::right("atom_panel")
        .resizable(true)
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.heading(RichText::new("Atom Viewer").color(Color32::LIGHT_BLUE));
            ui.separator();

            let current = atom.element();
            let mut selected = current.atomic_number;
            egui::ComboBox::from_label("Element")
                .selected_text(current.name)
                .show_ui(ui, |ui| {
                    for element in &ELEMENTS {
                        ui.selectable_value(&mut selected, element.atomic_number, element.name);
                    }
                });

            if selected != current.atomic_number {
                if let Some(element) = elements::by_atomic_number(selected) {
                    match atom.set_element(element) {
                        Ok(()) => response.element_changed = true,
                        Err(e) => log::error!("Failed to select {}: {e}", element.name),
                    }
                }
            }

            ui.add_space(6.0);
            draw_element_facts(ui, atom);

            ui.add_space(6.0);
            ui.separator();
            draw_ion_controls(ui, atom);

            ui.add_space(6.0);
            ui.separator();
            ui.horizontal(|ui| {
                ui.checkbox(&mut atom.paused, "Paused");
                if ui.button("Reset view").clicked() {
                    response.reset_camera = true;
                }
            });
            let mut speed = atom.speed();
            ui.add(egui::Slider::new(&mut speed, 0.0..=4.0).text("Speed"));
            if let Err(e) = atom.set_speed(speed) {
                log::warn!("Ignoring speed change: {e}");
            }

            ui.add_space(8.0);
            ui.collapsing(RichText::new("📐 Rules").strong(), |ui| {
                for rule in ATOM_RULES {
                    ui.group(|ui| {
                        ui.label(RichText::new(rule.name).strong().color(Color32::YELLOW));
                        ui.label(RichText::new(rule.formula).monospace().color(Color32::WHITE));
                        ui.label(RichText::new(rule.description).small().italics());
                    });
                    ui.add_space(4.0);
                }
            });
        });

    response
}

fn draw_element_facts(ui: &mut egui::Ui, atom: &AtomState) {
    let element = atom.element();
    let ion = atom.ion();

    ui.label(
        RichText::new(format!("{} ({})", element.name, element.symbol))
            .size(18.0)
            .color(rgba(element.group_color())),
    );

    egui::Grid::new("element_grid")
        .num_columns(2)
        .spacing([10.0, 4.0])
        .show(ui, |ui| {
            let rows = [
                ("Atomic number", element.atomic_number.to_string()),
                ("Group", format!("{} ({})", element.group, element.group_name)),
                ("Period", element.period.to_string()),
                ("Protons", ion.protons.to_string()),
                ("Neutrons", ion.neutrons.to_string()),
                ("Mass number", ion.mass_number().to_string()),
            ];
            for (label, value) in rows {
                ui.label(RichText::new(label).color(Color32::LIGHT_GREEN));
                ui.label(value);
                ui.end_row();
            }
        });
}

fn draw_ion_controls(ui: &mut egui::Ui, atom: &mut AtomState) {
    let mut electrons = atom.electron_count();
    ui.horizontal(|ui| {
        ui.add(egui::Slider::new(&mut electrons, 0..=MAX_ELECTRONS).text("Electrons"));
        if ui.button("Neutral").clicked() {
            electrons = atom.element().electrons();
        }
    });
    atom.set_electron_count(electrons);

    let shells = atom
        .shells()
        .iter()
        .zip(SHELL_CAPACITIES.iter())
        .map(|(count, capacity)| format!("{count}/{capacity}"))
        .collect::<Vec<_>>()
        .join("  ");
    ui.label(format!("Shells: {}", if shells.is_empty() { "none".to_string() } else { shells }));

    let ion = atom.ion();
    let color = match ion.kind() {
        ChargeKind::Cation => Color32::LIGHT_RED,
        ChargeKind::Anion => Color32::LIGHT_BLUE,
        ChargeKind::Neutral => Color32::GRAY,
    };
    ui.label(RichText::new(format!("{} (charge {})", ion.kind(), ion.charge_label())).color(color));
}

fn rgba(color: [f32; 4]) -> Color32 {
    let [r, g, b, a] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgba_unmultiplied(r, g, b, a)
}
