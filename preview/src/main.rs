//! Desktop preview app for myrtio-level-meter
//!
//! Renders the 5x5 matrix and the pixel strip in a window. Levels are set
//! with sliders or typed as raw protocol lines, and always travel through the
//! same serial line path as on the device.

use std::time::Instant as StdInstant;

use eframe::egui::{self};
use myrtio_level_meter::{
    HighStripMode, Instant, LevelChannel, LevelRenderer, LevelRendererConfig, LevelSample,
    LevelSender, LineReader, OverlayMode, TailDecayMode, encode_line, matrix::MATRIX_SIZE,
};

/// Number of pixels in the simulated strip
const STRIP_LEN: usize = 24;

/// Sample channel size
const CHANNEL_SIZE: usize = 8;

/// Size of each LED rectangle in pixels
const LED_SIZE: f32 = 18.0;

/// Gap between LEDs
const LED_GAP: f32 = 4.0;

/// Static sample channel between the UI ("serial port") and the renderer
static LEVEL_CHANNEL: LevelChannel<CHANNEL_SIZE> = LevelChannel::<CHANNEL_SIZE>::new();

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 480.0])
            .with_title("Level Meter Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "myrtio-level-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    /// The renderer instance
    renderer: LevelRenderer<'static, STRIP_LEN, CHANNEL_SIZE>,
    /// Sample sender, fed by the simulated serial line
    sender: LevelSender<'static, CHANNEL_SIZE>,
    /// Serial framing, fed with encoded lines
    reader: LineReader,

    /// Renderer configuration edited by the UI
    config: LevelRendererConfig,
    /// Low band slider value
    low: u8,
    /// High band slider value
    high: u8,
    /// Whether the high band is sent at all
    include_high: bool,
    /// Raw line typed by the user
    raw_line: String,
    /// Wall-clock reference for the renderer clock
    started: StdInstant,
}

impl PreviewApp {
    fn new() -> Self {
        let config = LevelRendererConfig::default();
        Self {
            renderer: LevelRenderer::new(LEVEL_CHANNEL.receiver(), &config),
            sender: LEVEL_CHANNEL.sender(),
            reader: LineReader::new(),
            config,
            low: 0,
            high: 0,
            include_high: false,
            raw_line: String::new(),
            started: StdInstant::now(),
        }
    }

    /// Send the slider values the way the audio monitor would
    fn send_levels(&mut self) {
        let sample = LevelSample::new(self.low, self.include_high.then_some(self.high));
        if let Ok(line) = encode_line(&sample) {
            self.reader.forward(line.as_bytes(), &self.sender);
        }
    }

    /// Send the typed line verbatim
    fn send_raw_line(&mut self) {
        let mut bytes = self.raw_line.clone().into_bytes();
        bytes.push(b'\n');
        self.reader.forward(&bytes, &self.sender);
    }

    fn now(&self) -> Instant {
        #[allow(clippy::cast_possible_truncation)]
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        Instant::from_millis(elapsed_ms)
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.now();
        let frame = self.renderer.render(now);
        let matrix = *frame.matrix;
        let strip = frame.strip.to_vec();
        let strobing = frame.strobing;

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            // <LevelControls>
            ui.horizontal(|ui| {
                ui.label("Low:");
                let low_changed = ui.add(egui::Slider::new(&mut self.low, 0..=255)).changed();

                ui.add_space(8.0);

                ui.checkbox(&mut self.include_high, "High:");
                let high_changed = ui
                    .add_enabled(self.include_high, egui::Slider::new(&mut self.high, 0..=255))
                    .changed();

                if low_changed || high_changed {
                    self.send_levels();
                }
            });

            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.label("Line:");
                let response = ui.text_edit_singleline(&mut self.raw_line);
                if ui.button("Send").clicked()
                    || (response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)))
                {
                    self.send_raw_line();
                }
            });
            // </LevelControls>

            ui.add_space(8.0);

            // <ModeSelector>
            let old_config = self.config.clone();
            ui.horizontal(|ui| {
                ui.label("Matrix overlay:");
                ui.selectable_value(&mut self.config.overlay, OverlayMode::SingleRow, "row");
                ui.selectable_value(&mut self.config.overlay, OverlayMode::Column, "column");

                ui.add_space(8.0);

                ui.label("Strip high band:");
                ui.selectable_value(
                    &mut self.config.high_strip,
                    HighStripMode::Symmetric,
                    "symmetric",
                );
                ui.selectable_value(
                    &mut self.config.high_strip,
                    HighStripMode::FromTail,
                    "from tail",
                );

                ui.add_space(8.0);

                ui.label("Tail:");
                ui.selectable_value(&mut self.config.tail_decay, TailDecayMode::Instant, "instant");
                ui.selectable_value(&mut self.config.tail_decay, TailDecayMode::Gradual, "gradual");
            });
            if self.config != old_config {
                self.renderer.set_config(&self.config);
            }
            // </ModeSelector>

            ui.add_space(8.0);

            let input = self.renderer.input();
            ui.label(format!(
                "low {} | high {} | strobe {}",
                input.low(),
                input
                    .high_level()
                    .map_or_else(|| "-".to_owned(), |high| high.to_string()),
                if strobing { "on" } else { "off" },
            ));

            ui.add_space(16.0);

            // === Matrix ===
            let led_pitch = LED_SIZE + LED_GAP;
            #[allow(clippy::cast_precision_loss)]
            let matrix_side = MATRIX_SIZE as f32 * led_pitch;
            let (response, painter) = ui.allocate_painter(
                egui::vec2(matrix_side, matrix_side),
                egui::Sense::hover(),
            );
            let origin = response.rect.min;

            #[allow(clippy::cast_precision_loss)]
            for (y, row) in matrix.iter().enumerate() {
                for (x, &brightness) in row.iter().enumerate() {
                    let rect = egui::Rect::from_min_size(
                        egui::pos2(
                            origin.x + x as f32 * led_pitch,
                            origin.y + y as f32 * led_pitch,
                        ),
                        egui::vec2(LED_SIZE, LED_SIZE),
                    );
                    painter.rect_filled(rect, 3.0, egui::Color32::from_rgb(brightness, 0, 0));
                }
            }

            ui.add_space(16.0);

            // === Strip ===
            #[allow(clippy::cast_precision_loss)]
            let strip_width = STRIP_LEN as f32 * led_pitch;
            let (response, painter) = ui.allocate_painter(
                egui::vec2(strip_width, LED_SIZE),
                egui::Sense::hover(),
            );
            let origin = response.rect.min;

            #[allow(clippy::cast_precision_loss)]
            for (i, pixel) in strip.iter().enumerate() {
                let rect = egui::Rect::from_min_size(
                    egui::pos2(origin.x + i as f32 * led_pitch, origin.y),
                    egui::vec2(LED_SIZE, LED_SIZE),
                );
                painter.rect_filled(rect, 3.0, egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b));
            }
        });
    }
}
