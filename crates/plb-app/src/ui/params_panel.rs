use egui::{Color32, Context, RichText, TextEdit, Ui};
use plb_core::{ChoiceList, ParamName};

use crate::session::ParamForm;
use crate::ui::{UiComponent, UiContext, UiEvent};

const MAIN_NUMBERS: [ParamName; 7] = [
    ParamName::Seed,
    ParamName::BatchSize,
    ParamName::NIter,
    ParamName::Steps,
    ParamName::CfgScale,
    ParamName::Width,
    ParamName::Height,
];

const ADVANCED_NUMBERS: [ParamName; 5] = [
    ParamName::SamplerIndex,
    ParamName::Subseed,
    ParamName::SubseedStrength,
    ParamName::SeedResizeFromW,
    ParamName::SeedResizeFromH,
];

/// Parameter form plus the add/clear buttons
#[derive(Default)]
pub struct ParamsPanel;

impl UiComponent for ParamsPanel {
    fn show(&mut self, ctx: &Context, ui_ctx: &mut UiContext<'_>) {
        let scroll_id = ui_ctx.id("params_scroll");
        let advanced_id = ui_ctx.id("advanced");
        let combo_ids = [ui_ctx.id("sd_model"), ui_ctx.id("sampler_name"), ui_ctx.id("styles")];

        let choices = ui_ctx.choices;
        let form = &mut ui_ctx.session.form;
        let mut emitted = Vec::new();

        egui::SidePanel::left("params_panel")
            .resizable(true)
            .default_width(440.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().id_salt(scroll_id).show(ui, |ui| {
                    ui.label("Line prompt (prompt)");
                    ui.add(
                        TextEdit::multiline(form.input_mut(ParamName::Prompt))
                            .desired_rows(3)
                            .desired_width(f32::INFINITY),
                    );
                    ui.label("Line negative prompt (negative_prompt)");
                    ui.add(
                        TextEdit::multiline(form.input_mut(ParamName::NegativePrompt))
                            .desired_rows(3)
                            .desired_width(f32::INFINITY),
                    );

                    let line = form.to_params().to_line();

                    ui.add_space(4.0);
                    ui.horizontal(|ui| {
                        if ui.add_enabled(!line.is_empty(), egui::Button::new("Add line")).clicked() {
                            emitted.push(UiEvent::AddLine);
                        }
                        if ui.button("Clear all lines").clicked() {
                            emitted.push(UiEvent::ClearLines);
                        }
                        if ui.button("Reset form").clicked() {
                            form.reset();
                        }
                    });

                    ui.separator();

                    let [model_id, sampler_id, styles_id] = &combo_ids;
                    egui::Grid::new(ui.id().with("choices"))
                        .num_columns(2)
                        .spacing([8.0, 4.0])
                        .show(ui, |ui| {
                            choice_row(ui, model_id, ParamName::SdModel, form, &choices.sd_models);
                            choice_row(ui, sampler_id, ParamName::SamplerName, form, &choices.samplers);
                            choice_row(ui, styles_id, ParamName::Styles, form, &choices.styles);
                        });

                    ui.add_space(4.0);
                    ui.horizontal_wrapped(|ui| {
                        for name in MAIN_NUMBERS {
                            number_field(ui, form, name);
                        }
                    });
                    ui.horizontal(|ui| {
                        ui.checkbox(form.flag_mut(ParamName::RestoreFaces), "restore_faces");
                        ui.checkbox(form.flag_mut(ParamName::Tiling), "tiling");
                    });

                    egui::CollapsingHeader::new("Advanced")
                        .id_salt(advanced_id)
                        .default_open(false)
                        .show(ui, |ui| {
                            ui.horizontal_wrapped(|ui| {
                                for name in ADVANCED_NUMBERS {
                                    number_field(ui, form, name);
                                }
                            });

                            for name in [ParamName::PromptForDisplay, ParamName::OutpathGrids] {
                                ui.label(name.name());
                                ui.add(
                                    TextEdit::singleline(form.input_mut(name))
                                        .desired_width(f32::INFINITY),
                                );
                            }

                            ui.horizontal(|ui| {
                                ui.checkbox(
                                    form.flag_mut(ParamName::DoNotSaveSamples),
                                    "do_not_save_samples",
                                );
                                ui.checkbox(form.flag_mut(ParamName::DoNotSaveGrid), "do_not_save_grid");
                            });
                        });

                    ui.separator();

                    let invalid = form.invalid_numbers();
                    if !invalid.is_empty() {
                        let names: Vec<&str> = invalid.iter().map(|n| n.name()).collect();
                        ui.label(
                            RichText::new(format!("Not a number, skipped: {}", names.join(", ")))
                                .small()
                                .color(Color32::LIGHT_RED),
                        );
                    }

                    ui.label(RichText::new("Next line").strong());
                    if line.is_empty() {
                        ui.label(RichText::new("(nothing set)").small().color(Color32::GRAY));
                    } else {
                        ui.label(RichText::new(line).monospace());
                    }
                });
            });

        for event in emitted {
            ui_ctx.send_event(event);
        }
    }
}

fn choice_row(ui: &mut Ui, id: &str, name: ParamName, form: &mut ParamForm, choices: &ChoiceList) {
    ui.label(name.name());

    let value = form.input_mut(name);
    egui::ComboBox::from_id_salt(id)
        .selected_text(value.as_str())
        .width(240.0)
        .show_ui(ui, |ui| {
            for item in choices.items() {
                ui.selectable_value(value, item.clone(), item.as_str());
            }
        });

    ui.end_row();
}

fn number_field(ui: &mut Ui, form: &mut ParamForm, name: ParamName) {
    let valid = form.is_valid(name);

    ui.vertical(|ui| {
        ui.label(RichText::new(name.name()).small());

        let mut edit = TextEdit::singleline(form.input_mut(name)).desired_width(72.0);
        if !valid {
            edit = edit.text_color(Color32::LIGHT_RED);
        }
        ui.add(edit);
    });
}
