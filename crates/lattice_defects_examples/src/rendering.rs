use std::f64::consts::TAU;
use std::path::Path;

use glam::DVec2;
use image::{Rgb, RgbImage};
use lattice_defects::prelude::*;

/// Pixel layout for rendering an ensemble on its lattice.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Pixels per plaquette edge.
    pub cell_px: u32,
    pub background: [u8; 3],
    pub grid: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_px: 24,
            background: [24, 24, 28],
            grid: [52, 52, 60],
        }
    }
}

impl RenderConfig {
    pub fn with_cell_px(mut self, cell_px: u32) -> Self {
        self.cell_px = cell_px.max(4);
        self
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }
}

/// Draws each dislocation as a dot on its plaquette with a stroke along its Burgers
/// vector, colored by the vector's direction.
pub fn render_ensemble_to_png(
    ensemble: &DislocationEnsemble,
    extent: &LatticeExtent,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let cell = config.cell_px;
    let width = extent.lx() * cell;
    let height = extent.ly() * cell;
    let mut img = RgbImage::from_pixel(width, height, Rgb(config.background));

    for x in (0..width).step_by(cell as usize) {
        for y in 0..height {
            img.put_pixel(x, y, Rgb(config.grid));
        }
    }
    for y in (0..height).step_by(cell as usize) {
        for x in 0..width {
            img.put_pixel(x, y, Rgb(config.grid));
        }
    }

    for d in ensemble {
        let Some((u, v)) = extent.cell_of(d.origin) else {
            continue;
        };
        // Cell (1, 1) is the first column/row; flip y so +y points up.
        let cx = ((u - 1) * cell + cell / 2) as f64;
        let cy = ((extent.ly() - v) * cell + cell / 2) as f64;
        let color = direction_color(d.burgers_vector);
        let radius = (cell as f64 * 0.18).max(1.5);
        fill_disk(&mut img, cx, cy, radius, color);

        let dir = d.burgers_vector.normalize_or_zero();
        let reach = cell as f64 * 0.45;
        draw_segment(
            &mut img,
            cx,
            cy,
            cx + dir.x * reach,
            cy - dir.y * reach,
            color,
        );
    }

    img.save(path)?;
    Ok(())
}

fn direction_color(b: DVec2) -> Rgb<u8> {
    let hue = (b.y.atan2(b.x).rem_euclid(TAU)) / TAU;
    let channel = |offset: f64| {
        let t = ((hue + offset) * TAU).cos() * 0.5 + 0.5;
        (60.0 + t * 195.0) as u8
    };
    Rgb([channel(0.0), channel(2.0 / 3.0), channel(1.0 / 3.0)])
}

fn fill_disk(img: &mut RgbImage, cx: f64, cy: f64, r: f64, color: Rgb<u8>) {
    let (w, h) = img.dimensions();
    let x0 = (cx - r).floor().max(0.0) as u32;
    let x1 = ((cx + r).ceil() as u32).min(w.saturating_sub(1));
    let y0 = (cy - r).floor().max(0.0) as u32;
    let y1 = ((cy + r).ceil() as u32).min(h.saturating_sub(1));
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            if dx * dx + dy * dy <= r * r {
                img.put_pixel(x, y, color);
            }
        }
    }
}

fn draw_segment(img: &mut RgbImage, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb<u8>) {
    let (w, h) = img.dimensions();
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = x0 + (x1 - x0) * t;
        let y = y0 + (y1 - y0) * t;
        if x >= 0.0 && y >= 0.0 && (x as u32) < w && (y as u32) < h {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}
