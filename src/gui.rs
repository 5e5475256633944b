// src/gui.rs
use eframe::egui;
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};
use crate::drivers::plot::stacked_panels;
use crate::drivers::{channel_palette, Derived, Histogram, SampleArchive, MAX_BINS};
use crate::types::RenderOptions;

const TIME_AXIS_GROUP: &str = "pad_time_axis";
const HISTOGRAM_COLUMNS: usize = 2;

struct PanelLines {
    title: &'static str,
    traces: Vec<Vec<[f64; 2]>>,
}

pub struct PadScopeApp {
    panels: Vec<PanelLines>,
    histograms: Vec<Histogram>,
    colors: Vec<Color32>,
    options: RenderOptions,
}

impl PadScopeApp {
    pub fn new(archive: &SampleArchive, derived: &Derived, options: RenderOptions) -> Self {
        let panels = stacked_panels(archive, derived)
            .into_iter()
            .map(|panel| PanelLines {
                title: panel.title,
                traces: panel
                    .traces
                    .into_iter()
                    .map(|t| t.into_iter().map(|(x, y)| [x, y]).collect())
                    .collect(),
            })
            .collect();
        let histograms = if options.show_histograms {
            archive
                .channels
                .columns()
                .into_iter()
                .map(|col| Histogram::of_channel(col, MAX_BINS))
                .collect()
        } else {
            Vec::new()
        };
        let colors = channel_palette(archive.num_channels())
            .into_iter()
            .map(|[r, g, b]| Color32::from_rgb(r, g, b))
            .collect();
        Self {
            panels,
            histograms,
            colors,
            options,
        }
    }

    fn color(&self, channel: usize) -> Color32 {
        self.colors.get(channel).copied().unwrap_or(Color32::WHITE)
    }

    fn draw_lines(&self, plot_ui: &mut egui_plot::PlotUi, traces: &[Vec<[f64; 2]>]) {
        for (ch, points) in traces.iter().enumerate() {
            plot_ui.line(
                Line::new(PlotPoints::new(points.clone()))
                    .name(format!("Ch{ch}"))
                    .color(self.color(ch)),
            );
        }
    }

    // 三个上下排列、共享时间轴的图
    fn stacked(&self, ui: &mut egui::Ui) {
        let spacing = ui.spacing().item_spacing.y;
        let per_panel = (ui.available_height() / self.panels.len().max(1) as f32 - spacing * 2.0 - 14.0)
            .max(80.0);
        for (idx, panel) in self.panels.iter().enumerate() {
            ui.label(egui::RichText::new(panel.title).strong());
            Plot::new(format!("stacked_{idx}"))
                .height(per_panel)
                .link_axis(TIME_AXIS_GROUP, true, false)
                .link_cursor(TIME_AXIS_GROUP, true, false)
                .legend(Legend::default())
                .show(ui, |plot_ui| self.draw_lines(plot_ui, &panel.traces));
        }
    }

    fn overlay(&self, ui: &mut egui::Ui) {
        if let Some(raw) = self.panels.first() {
            Plot::new("overlay")
                .view_aspect(2.0)
                .legend(Legend::default())
                .show(ui, |plot_ui| self.draw_lines(plot_ui, &raw.traces));
        }
    }

    fn histogram_grid(&self, ui: &mut egui::Ui) {
        egui::Grid::new("histograms")
            .num_columns(HISTOGRAM_COLUMNS)
            .show(ui, |ui| {
                for (ch, hist) in self.histograms.iter().enumerate() {
                    let width = hist.bin_width();
                    let bars = hist
                        .bin_centers()
                        .zip(&hist.counts)
                        .map(|(x, &n)| Bar::new(x, n as f64).width(width))
                        .collect();
                    ui.vertical(|ui| {
                        ui.label(format!("Ch{ch}"));
                        Plot::new(format!("histogram_{ch}"))
                            .width(320.0)
                            .height(180.0)
                            .show(ui, |plot_ui| {
                                plot_ui.bar_chart(BarChart::new(bars).color(self.color(ch)));
                            });
                    });
                    if (ch + 1) % HISTOGRAM_COLUMNS == 0 {
                        ui.end_row();
                    }
                }
            });
    }
}

impl eframe::App for PadScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| self.stacked(ui));

        let mut show_overlay = self.options.show_overlay;
        egui::Window::new("ADC time values")
            .open(&mut show_overlay)
            .default_width(700.0)
            .show(ctx, |ui| self.overlay(ui));
        self.options.show_overlay = show_overlay;

        let mut show_histograms = self.options.show_histograms;
        egui::Window::new("Sample histograms")
            .open(&mut show_histograms)
            .show(ctx, |ui| self.histogram_grid(ui));
        self.options.show_histograms = show_histograms;
    }
}

/// Opens the plot window and blocks until the user closes it.
pub fn show(archive: &SampleArchive, derived: &Derived, options: RenderOptions) -> anyhow::Result<()> {
    let app = PadScopeApp::new(archive, derived, options);
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 900.0])
        .with_title("padscope");
    let native = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native("padscope", native, Box::new(move |_cc| Box::new(app)))
        .map_err(|e| anyhow::anyhow!("plot window failed: {e}"))
}
