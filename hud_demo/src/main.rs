//! HUD demo application
//!
//! Lays out a few HUD lines with a sprite-sheet font and draws them through
//! the headless backend, logging what reached the "GPU". Pass a `.toml` or
//! `.ron` settings file as the first argument to override the defaults.

use serde::{Deserialize, Serialize};
use sprite_text::prelude::*;
use sprite_text::foundation::logging;
use sprite_text::text::GridLayout;
use thiserror::Error;

#[derive(Debug, Error)]
enum DemoError {
    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DemoConfig {
    window_width: u32,
    window_height: u32,
    /// PNG sprite sheet; a blank sheet sized to the grid is used when absent
    sprite_sheet: Option<String>,
    /// Explicit font configuration; the grid below is used when absent
    font_config: Option<String>,
    grid: GridLayout,
    first_rune: char,
    end_rune: char,
    vertical: bool,
    margin: f32,
    line_spacing: f32,
}

impl Config for DemoConfig {}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            sprite_sheet: None,
            font_config: None,
            grid: GridLayout { cell_width: 8, cell_height: 12, columns: 16, advance: 8 },
            first_rune: ' ',
            end_rune: '\u{7f}',
            vertical: false,
            margin: 20.0,
            line_spacing: 4.0,
        }
    }
}

impl DemoConfig {
    fn direction(&self) -> RenderDirection {
        if self.vertical {
            RenderDirection::TopToBottom
        } else {
            RenderDirection::LeftToRight
        }
    }

    fn font_config(&self) -> Result<FontConfig, DemoError> {
        match &self.font_config {
            Some(path) => Ok(FontConfig::load_from_file(path)?),
            None => Ok(FontConfig::from_grid(self.first_rune, self.end_rune, self.direction(), &self.grid)?),
        }
    }

    fn sprite_sheet(&self, config: &FontConfig) -> Result<ImageData, DemoError> {
        if let Some(path) = &self.sprite_sheet {
            return Ok(ImageData::from_file(path)?);
        }

        let (width, height) = config
            .glyphs
            .iter()
            .fold((1, 1), |(w, h), g| (w.max(g.x + g.width), h.max(g.y + g.height)));
        log::info!("No sprite sheet configured, using a blank {}x{} sheet", width, height);
        Ok(ImageData::solid_color(width, height, [255, 255, 255, 255]))
    }
}

fn run(settings: &DemoConfig) -> Result<(), DemoError> {
    let mut backend = HeadlessBackend::new();
    let world = World::new(settings.window_width, settings.window_height);

    let font_config = settings.font_config()?;
    let sheet = settings.sprite_sheet(&font_config)?;
    let font = load_sprite_font(&mut backend, &sheet, font_config)?;

    let lines = [
        font.printf(format_args!("SCORE {:>8}", 48_250))?,
        font.printf(format_args!("LIVES {}", 3))?,
        font.printf(format_args!("FPS {:.1}", 59.94))?,
    ];

    let (_, line_height) = font.glyph_bounds();
    let mut y = settings.window_height as f32 - settings.margin - line_height as f32;
    for mut line in lines.into_iter().flatten() {
        let (width, height) = line.size();
        line.attach_to_world(&world);
        line.move_to(settings.margin, y);
        line.draw(&mut backend)?;
        log::info!("Placed {}x{} line at y={} ({} glyphs)", width, height, y, line.len());
        y -= line_height as f32 + settings.line_spacing;
    }

    let draws = backend.take_draw_calls();
    log::info!("Submitted {} draw calls against {} glyph quads", draws.len(), backend.quad_count());

    font.release(&mut backend);
    if !backend.is_empty() {
        log::warn!("Backend still holds resources after release");
    }
    Ok(())
}

fn main() {
    logging::init_with_default("info");
    log::info!("Starting HUD demo...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match DemoConfig::load_from_file(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => DemoConfig::default(),
    };

    if let Err(e) = run(&settings) {
        log::error!("HUD demo failed: {}", e);
        std::process::exit(1);
    }
    log::info!("HUD demo finished");
}
