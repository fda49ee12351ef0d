use anyhow::{Context, Result};
use minifb::{Key, Scale, ScaleMode, WindowOptions};

use render::{Display, Figure};

/// Shows a figure in a window until it's closed or Escape is pressed
pub struct Window;

impl Display for Window {
    fn show(&mut self, figure: &Figure, pixels: &[u8]) -> Result<()> {
        let (w, h) = figure.size();
        let (w, h) = (w as usize, h as usize);
        let buffer: Vec<u32> = pixels
            .chunks_exact(3)
            .map(|px| 0xFF00_0000u32 | (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32)
            .collect();

        let mut window = minifb::Window::new(
            &figure.options().title,
            w,
            h,
            WindowOptions {
                resize: true,
                scale: Scale::FitScreen,
                scale_mode: ScaleMode::AspectRatioStretch,
                ..WindowOptions::default()
            },
        )
        .context("Failed to open a window; pass --save to write a PNG instead")?;
        window.set_target_fps(30);

        info!("Showing the figure; close the window or press Escape to continue");
        while window.is_open() && !window.is_key_down(Key::Escape) {
            window.update_with_buffer(&buffer, w, h)?;
        }
        Ok(())
    }
}
