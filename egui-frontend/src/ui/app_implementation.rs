use eframe::egui;
use shared::{TagIcon, VocabularyEntry, VocabularyKind};

use crate::ui::app_state::PetItchApp;
use crate::ui::components::itch_slider::ItchSlider;
use crate::ui::components::protocol_ring::ProtocolRing;
use crate::ui::components::styling::colors;
use crate::ui::components::weekly_chart::WeeklyChart;

impl eframe::App for PetItchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Slider commits from the previous frame land before anything reads the draft
        self.drain_itch_commits();

        if self.error_message.is_some() || self.success_message.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_secs(5));
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.render_header(ui);
        });

        egui::SidePanel::right("protocol_panel").min_width(260.0).show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_protocol_section(ui);
                ui.separator();
                self.render_weekly_section(ui);
                ui.separator();
                self.render_settings_section(ui);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_messages(ui);
            egui::ScrollArea::vertical().show(ui, |ui| {
                if self.active_pet.is_none() {
                    self.render_add_pet_card(ui);
                    return;
                }
                self.render_check_in_card(ui);
                ui.add_space(10.0);
                self.render_history(ui);
            });
        });
    }
}

impl PetItchApp {
    /// Title, pet selector and streak
    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("🐾 Pet Itch Tracker");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let streak = egui::RichText::new(format!("🔥 {} day streak", self.streak)).color(colors::STREAK_TEXT);
                ui.label(streak.strong());
                if self.checked_in_today {
                    ui.label("✅ Checked in today");
                }

                let mut selected = None;
                let current = self
                    .active_pet
                    .as_ref()
                    .map(|pet| pet.name.clone())
                    .unwrap_or_else(|| "No pet".to_string());
                egui::ComboBox::from_id_source("pet_selector")
                    .selected_text(current)
                    .show_ui(ui, |ui| {
                        for pet in &self.pets {
                            if ui.selectable_label(pet.active, pet.name.as_str()).clicked() && !pet.active {
                                selected = Some(pet.id.clone());
                            }
                        }
                    });
                if let Some(pet_id) = selected {
                    self.select_pet(&pet_id);
                }
            });
        });
    }

    fn render_messages(&mut self, ui: &mut egui::Ui) {
        if let Some(error) = &self.error_message {
            ui.colored_label(egui::Color32::RED, format!("❌ {}", error));
        }
        if let Some(success) = &self.success_message {
            ui.colored_label(egui::Color32::DARK_GREEN, format!("✅ {}", success));
        }
    }

    fn render_add_pet_card(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label(egui::RichText::new("Add a pet").strong());
            ui.horizontal(|ui| {
                ui.label("Name");
                ui.text_edit_singleline(&mut self.forms.new_pet_name);
            });
            ui.horizontal(|ui| {
                ui.radio_value(&mut self.forms.new_pet_species, shared::Species::Dog, "🐶 Dog");
                ui.radio_value(&mut self.forms.new_pet_species, shared::Species::Cat, "🐱 Cat");
            });
            if ui.button("Add pet").clicked() {
                self.add_pet();
            }
        });
    }

    fn render_check_in_card(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            let title = if self.draft.editing.is_some() { "Edit check-in" } else { "Today's check-in" };
            ui.label(egui::RichText::new(title).strong().size(20.0));

            ui.label(format!("Itch level: {}", self.draft.itch_level));
            ui.add(ItchSlider::new(self.draft.itch_level, &mut self.itch_commits, &self.config.slider));

            let body_parts = self.vocabulary.body_parts.clone();
            let skin_signs = self.vocabulary.skin_signs.clone();
            let exposures = self.vocabulary.exposures.clone();
            self.render_tag_chips(ui, VocabularyKind::BodyPart, "Where is it itchy?", &body_parts);
            self.render_tag_chips(ui, VocabularyKind::SkinSign, "Skin signs", &skin_signs);
            self.render_tag_chips(ui, VocabularyKind::Exposure, "Exposures", &exposures);

            ui.label("Notes");
            ui.text_edit_multiline(&mut self.draft.notes);
            ui.horizontal(|ui| {
                ui.label("Photo URI");
                ui.text_edit_singleline(&mut self.draft.image_uri);
            });

            ui.horizontal(|ui| {
                if ui.button("💾 Save").clicked() {
                    self.save_check_in();
                }
                if ui.button("⚡ Log as flare").clicked() {
                    self.log_flare();
                }
                if self.draft.editing.is_some() && ui.button("Cancel edit").clicked() {
                    self.draft = Default::default();
                }
            });
        });
    }

    fn render_tag_chips(&mut self, ui: &mut egui::Ui, kind: VocabularyKind, title: &str, entries: &[VocabularyEntry]) {
        ui.label(title);
        let mut removed = None;
        ui.horizontal_wrapped(|ui| {
            for entry in entries {
                let selected = self.draft.tags(kind).contains(&entry.label);
                let text = match &entry.icon {
                    Some(TagIcon::CustomEmoji(emoji)) => format!("{} {}", emoji, entry.label),
                    _ => entry.label.clone(),
                };
                let chip = ui.selectable_label(selected, text);
                if chip.clicked() {
                    self.draft.toggle(kind, &entry.label);
                }
                if !entry.is_default {
                    chip.context_menu(|ui| {
                        if ui.button("Remove").clicked() {
                            removed = Some(entry.label.clone());
                            ui.close_menu();
                        }
                    });
                }
            }
        });
        if let Some(label) = removed {
            self.remove_custom_tag(kind, &label);
        }
    }

    fn render_history(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Recent check-ins").strong());
        if self.recent_check_ins.is_empty() {
            ui.label("Nothing logged yet");
            return;
        }

        let mut edit = None;
        let mut delete = None;
        egui::Grid::new("check_in_history").striped(true).show(ui, |ui| {
            for check_in in &self.recent_check_ins {
                let local = check_in.date.with_timezone(&chrono::Local);
                ui.label(local.format("%a %d %b %H:%M").to_string());
                ui.colored_label(
                    colors::itch_level_color(check_in.itch_level),
                    format!("Itch {}", check_in.itch_level),
                );
                let parts: Vec<&str> = check_in.selected_parts.iter().map(String::as_str).collect();
                ui.label(parts.join(", "));
                if ui.small_button("✏").clicked() {
                    edit = Some(check_in.clone());
                }
                if ui.small_button("🗑").clicked() {
                    delete = Some(check_in.id.clone());
                }
                ui.end_row();
            }
        });

        if let Some(check_in) = edit {
            self.edit_check_in(&check_in);
        }
        if let Some(check_in_id) = delete {
            self.delete_check_in(&check_in_id);
        }
    }

    fn render_protocol_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Protocol").strong());
        match self.protocol.clone() {
            Some(progress) => {
                ui.vertical_centered(|ui| {
                    ui.add(ProtocolRing::new(&progress));
                });
                ui.horizontal(|ui| {
                    if ui.button("Next day").clicked() {
                        self.advance_protocol_day();
                    }
                    if ui.button("Complete").clicked() {
                        self.complete_protocol();
                    }
                    if ui.button("Cancel").clicked() {
                        self.cancel_protocol();
                    }
                });
            }
            None => {
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut self.forms.new_protocol_name);
                    if ui.button("Start").clicked() {
                        self.start_protocol();
                    }
                });
            }
        }
    }

    fn render_weekly_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("This week").strong());
        if let Some(summary) = &self.weekly_summary {
            ui.add(WeeklyChart::new(summary));
        }
    }

    fn render_settings_section(&mut self, ui: &mut egui::Ui) {
        ui.collapsing("Pets", |ui| {
            let mut delete = None;
            for pet in &self.pets {
                ui.horizontal(|ui| {
                    ui.label(pet.name.as_str());
                    if ui.small_button("🗑").clicked() {
                        delete = Some(pet.id.clone());
                    }
                });
            }
            if let Some(pet_id) = delete {
                self.delete_pet(&pet_id);
            }
            ui.separator();
            self.render_add_pet_card(ui);
        });

        ui.collapsing("Custom tags", |ui| {
            ui.horizontal(|ui| {
                ui.label("Label");
                ui.text_edit_singleline(&mut self.forms.custom_label);
            });
            ui.horizontal(|ui| {
                ui.label("Emoji");
                ui.text_edit_singleline(&mut self.forms.custom_emoji);
            });
            ui.horizontal(|ui| {
                if ui.button("+ Body part").clicked() {
                    self.add_custom_tag(VocabularyKind::BodyPart);
                }
                if ui.button("+ Skin sign").clicked() {
                    self.add_custom_tag(VocabularyKind::SkinSign);
                }
                if ui.button("+ Exposure").clicked() {
                    self.add_custom_tag(VocabularyKind::Exposure);
                }
            });
        });

        ui.collapsing("Data", |ui| {
            let mut premium = self.is_premium;
            if ui.checkbox(&mut premium, "Premium").changed() {
                self.toggle_premium();
            }
            if ui.button("Export JSON").clicked() {
                self.export_store();
            }
            if let Some(json) = &self.export_json {
                let mut preview = json.as_str();
                ui.add(egui::TextEdit::multiline(&mut preview).desired_rows(6));
            }
            ui.label("Import JSON");
            ui.text_edit_multiline(&mut self.forms.import_json);
            if ui.button("Import").clicked() {
                self.import_store();
            }
        });
    }
}
