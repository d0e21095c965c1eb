//! Main application window
//!
//! Four pickers feed the build: the LaTeX template, the title image, the
//! background image and the asset directory. The directory is rescanned as
//! soon as all four are set; "Build PDF" stays disabled until a scan has
//! succeeded. Scan and build both run synchronously on the GUI thread, so
//! the window blocks for the duration of a LaTeX run.

use std::path::PathBuf;

use anyhow::Result;
use eframe::egui;
use egui::{CentralPanel, RichText, Vec2};
use tracing::{error, info};

use crate::scanner::{normalize_path, Catalog};
use crate::{pdf, template};

use super::log::UiLog;
use super::theme::{dark_theme, Colors};

/// One of the four user selections.
#[derive(Clone, Copy)]
enum Selection {
    Tex,
    Title,
    Bg,
    Dir,
}

/// Application state.
pub struct CatalogBuilderApp {
    /// LaTeX template file.
    tex_path: Option<PathBuf>,
    /// Title/logo image.
    title_path: Option<PathBuf>,
    /// Page background image.
    bg_path: Option<PathBuf>,
    /// Asset root holding the model folders.
    dir_path: Option<PathBuf>,
    /// Result of the last scan; present only while a build is possible.
    catalog: Option<Catalog>,
    /// Folder the last PDF was written to.
    last_output: Option<PathBuf>,
    /// Whether the LaTeX engine answered the startup probe.
    engine_available: bool,
    /// Status bar text.
    status: String,
    /// Shared buffer behind the log panel.
    ui_log: UiLog,
}

impl CatalogBuilderApp {
    pub fn new(ui_log: UiLog) -> Self {
        Self {
            tex_path: None,
            title_path: None,
            bg_path: None,
            dir_path: None,
            catalog: None,
            last_output: None,
            engine_available: pdf::is_engine_available(),
            status: "Select a template, title, background and directory".to_string(),
            ui_log,
        }
    }

    /// Open the matching dialog and store the result. Cancelling a dialog
    /// clears the selection, like picking nothing.
    fn pick(&mut self, selection: Selection) {
        let picked = match selection {
            Selection::Tex => rfd::FileDialog::new()
                .add_filter("latex files", &["tex"])
                .add_filter("all files", &["*"])
                .pick_file(),
            Selection::Title | Selection::Bg => rfd::FileDialog::new()
                .add_filter("png images", &["png"])
                .add_filter("all files", &["*"])
                .pick_file(),
            Selection::Dir => rfd::FileDialog::new().pick_folder(),
        };

        *self.selection_slot(selection) = picked;
        self.refresh_scan();
    }

    fn selection_slot(&mut self, selection: Selection) -> &mut Option<PathBuf> {
        match selection {
            Selection::Tex => &mut self.tex_path,
            Selection::Title => &mut self.title_path,
            Selection::Bg => &mut self.bg_path,
            Selection::Dir => &mut self.dir_path,
        }
    }

    /// Rescan the asset directory once every input is in place.
    fn refresh_scan(&mut self) {
        self.catalog = None;

        if self.tex_path.is_none() || self.title_path.is_none() || self.bg_path.is_none() {
            self.status = "Select a template, title, background and directory".to_string();
            return;
        }
        let Some(dir) = self.dir_path.clone() else {
            self.status = "Select a template, title, background and directory".to_string();
            return;
        };

        match Catalog::scan(&dir) {
            Ok(catalog) => {
                info!(root = %catalog.root_name, models = catalog.len(), "scan finished");
                self.status = format!("{} models scanned, ready to build", catalog.len());
                self.catalog = Some(catalog);
            }
            Err(err) => {
                self.status = "Scan failed, see log".to_string();
                self.report_error(err.into());
            }
        }
    }

    /// Ask for a destination, then render, compile and save.
    fn build_pdf(&mut self) {
        if let Err(err) = self.try_build() {
            self.status = "Build failed, see log".to_string();
            self.report_error(err);
        }
    }

    fn try_build(&mut self) -> Result<()> {
        let (Some(tex), Some(title), Some(bg), Some(catalog)) = (
            &self.tex_path,
            &self.title_path,
            &self.bg_path,
            &self.catalog,
        ) else {
            return Ok(());
        };

        let Some(out_path) = rfd::FileDialog::new()
            .add_filter("PDF files", &["pdf"])
            .set_file_name(format!("{}.pdf", catalog.root_name))
            .save_file()
        else {
            return Ok(());
        };

        // The template wants forward slashes in every path, same as the
        // scanned model images.
        let logo = normalize_path(title);
        let bg_image = normalize_path(bg);

        info!(output = %out_path.display(), "building catalog PDF");

        let document = template::render_catalog(tex, &logo, &bg_image, catalog)?;
        let compiled = pdf::build_pdf(&document)?;
        compiled.save_to(&out_path)?;

        info!(bytes = compiled.len(), "catalog PDF written");
        self.status = format!("Saved {}", out_path.display());
        self.last_output = out_path.parent().map(|p| p.to_path_buf());
        Ok(())
    }

    /// Single top-level error handler: the full chain goes to the log, the
    /// user gets the traditional dialog.
    fn report_error(&self, err: anyhow::Error) {
        error!("{err:?}");

        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title("Troll error")
            .set_description("Total Troll ERROR:\n NO VAS!")
            .show();
    }

    fn picker_row(&mut self, ui: &mut egui::Ui, label: &str, selection: Selection) {
        ui.horizontal(|ui| {
            if ui
                .add_sized([170.0, 26.0], egui::Button::new(label))
                .clicked()
            {
                self.pick(selection);
            }

            let text = match self.selection_slot(selection) {
                Some(path) => path.display().to_string(),
                None => "None".to_string(),
            };
            ui.label(RichText::new(text).size(13.0).color(Colors::TEXT_SECONDARY));
        });
    }
}

impl eframe::App for CatalogBuilderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        CentralPanel::default().show(ctx, |ui| {
            ui.spacing_mut().item_spacing = Vec2::new(8.0, 10.0);

            // Header
            ui.horizontal(|ui| {
                ui.heading(
                    RichText::new("TurBoCB3K")
                        .size(26.0)
                        .color(Colors::TEXT_PRIMARY),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(
                            self.last_output.is_some(),
                            egui::Button::new("📁 Open output folder"),
                        )
                        .clicked()
                    {
                        if let Some(ref folder) = self.last_output {
                            let _ = open::that(folder);
                        }
                    }
                });
            });

            ui.label(
                RichText::new("Pick inputs → scan models → build the PDF catalog")
                    .size(14.0)
                    .color(Colors::TEXT_SECONDARY),
            );

            ui.add_space(6.0);

            if !self.engine_available {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("⚠").size(22.0).color(Colors::WARNING));
                        ui.label(
                            RichText::new(
                                "No LaTeX engine found on PATH; building will fail",
                            )
                            .color(Colors::WARNING),
                        );
                    });
                });
            }

            // Input pickers
            self.picker_row(ui, "Open Latex", Selection::Tex);
            self.picker_row(ui, "Open Title", Selection::Title);
            self.picker_row(ui, "Open Background", Selection::Bg);
            self.picker_row(ui, "Open Directory", Selection::Dir);

            // Small preview of the chosen title image
            if let Some(ref title) = self.title_path {
                ui.add(
                    egui::Image::new(format!("file://{}", title.display()))
                        .max_height(70.0)
                        .corner_radius(6.0),
                );
            }

            ui.add_space(6.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(
                        self.catalog.is_some(),
                        egui::Button::new(
                            RichText::new("Build PDF").color(Colors::SUCCESS),
                        ),
                    )
                    .clicked()
                {
                    self.build_pdf();
                }

                if ui
                    .button(RichText::new("Quit").color(Colors::ERROR))
                    .clicked()
                {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.add_space(6.0);

            // Log panel
            ui.label(
                RichText::new("Log")
                    .size(15.0)
                    .color(Colors::TEXT_PRIMARY),
            );

            egui::Frame::new()
                .fill(Colors::BG_CARD)
                .corner_radius(8.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .stick_to_bottom(true)
                        .max_height(ui.available_height() - 50.0)
                        .show(ui, |ui| {
                            for line in self.ui_log.lines() {
                                ui.label(
                                    RichText::new(line)
                                        .monospace()
                                        .size(11.0)
                                        .color(Colors::TEXT_SECONDARY),
                                );
                            }
                        });
                });

            // Status bar
            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                egui::Frame::new()
                    .fill(Colors::BG_CARD)
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(&self.status)
                                .size(13.0)
                                .color(Colors::TEXT_SECONDARY),
                        );
                    });
            });
        });
    }
}

/// Start the application.
pub fn run(ui_log: UiLog) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_resizable(false)
            .with_title("TurBoCB3K"),
        ..Default::default()
    };

    eframe::run_native(
        "TurBoCB3K",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_style(dark_theme());
            egui_extras::install_image_loaders(&cc.egui_ctx);

            Ok(Box::new(CatalogBuilderApp::new(ui_log)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("application error: {}", e))
}
