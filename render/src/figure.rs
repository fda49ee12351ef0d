use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Deserialize, Serialize};

use model::{Bounds, FlowField};

use crate::artist::{Artist, Chart};
use crate::layers::{draw_field, FieldStyle};
use crate::style::{format_value, px};

/// Size, resolution, and text of one figure
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FigureOptions {
    pub title: String,
    /// Width and height in inches
    pub figsize: (f64, f64),
    pub dpi: u32,
    pub title_pt: f64,
    pub x_label: String,
    pub y_label: String,
    pub label_pt: f64,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            figsize: (11.0, 7.0),
            dpi: 250,
            title_pt: 12.0,
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            label_pt: 10.0,
        }
    }
}

impl FigureOptions {
    pub fn pixel_size(&self) -> Result<(u32, u32)> {
        let (w, h) = self.figsize;
        if !(w > 0.0 && h > 0.0) || self.dpi == 0 {
            bail!(
                "A figure of {w}x{h} inches at {} dpi has no pixels",
                self.dpi
            );
        }
        let w = (w * self.dpi as f64).round() as u32;
        let h = (h * self.dpi as f64).round() as u32;
        Ok((w.max(1), h.max(1)))
    }
}

/// Handle to an artist owned by a figure
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtistID(pub(crate) usize);

/// One set of axes on a canvas. Everything that never changes (title, axes, the flow field) is
/// rasterized once into a background; artists are drawn over a copy of it on every render.
pub struct Figure {
    options: FigureOptions,
    size: (u32, u32),
    bounds: Bounds,
    background: Vec<u8>,
    artists: Vec<Artist>,
}

impl Figure {
    /// `bounds` are the data limits of the axes.
    pub fn new(options: FigureOptions, bounds: Bounds) -> Result<Self> {
        let size = options.pixel_size()?;
        let mut figure = Self {
            options,
            size,
            bounds: bounds.plottable(),
            background: vec![255; size.0 as usize * size.1 as usize * 3],
            artists: Vec::new(),
        };
        figure.draw_axes()?;
        Ok(figure)
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn options(&self) -> &FigureOptions {
        &self.options
    }

    pub fn add_artist(&mut self, artist: Artist) -> ArtistID {
        self.artists.push(artist);
        ArtistID(self.artists.len() - 1)
    }

    pub fn artist(&self, id: ArtistID) -> &Artist {
        &self.artists[id.0]
    }

    pub fn artist_mut(&mut self, id: ArtistID) -> &mut Artist {
        &mut self.artists[id.0]
    }

    /// Adds the flow field to the background, beneath all artists.
    pub fn draw_field(&mut self, field: &FlowField, style: &FieldStyle) -> Result<()> {
        let mut pixels = std::mem::take(&mut self.background);
        let result = self.paint_field(&mut pixels, field, style);
        self.background = pixels;
        result
    }

    /// Rasterizes the figure as it currently stands: the background, then artists from the lowest
    /// zorder up, then the legend. Returns RGB8 pixels, row by row.
    pub fn render(&self) -> Result<Vec<u8>> {
        let mut pixels = self.background.clone();
        {
            let root = BitMapBackend::with_buffer(&mut pixels, self.size).into_drawing_area();
            let (_, body) = self.split(&root);
            let mut chart = self.chart(&body)?;

            for artist in self.draw_order() {
                artist.draw(&mut chart, self.options.dpi)?;
            }
            if self.artists.iter().any(|a| a.label.is_some()) {
                let font_px = px(self.options.label_pt, self.options.dpi);
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::LowerLeft)
                    .margin(font_px as u32)
                    .label_font(("sans-serif", font_px))
                    .background_style(&WHITE.mix(0.8))
                    .border_style(&BLACK)
                    .draw()?;
            }
            root.present()?;
        }
        Ok(pixels)
    }

    /// Stable, so artists sharing a zorder stack in the order they were added
    fn draw_order(&self) -> Vec<&Artist> {
        let mut order: Vec<&Artist> = self.artists.iter().collect();
        order.sort_by_key(|a| a.zorder);
        order
    }

    fn draw_axes(&mut self) -> Result<()> {
        let mut pixels = std::mem::take(&mut self.background);
        let result = self.paint_axes(&mut pixels);
        self.background = pixels;
        result
    }

    fn paint_axes(&self, pixels: &mut [u8]) -> Result<()> {
        let root = BitMapBackend::with_buffer(pixels, self.size).into_drawing_area();
        root.fill(&WHITE)?;
        let (title, body) = self.split(&root);

        let (w, h) = title.dim_in_pixel();
        let style =
            TextStyle::from(("sans-serif", px(self.options.title_pt, self.options.dpi)).into_font())
                .pos(Pos::new(HPos::Center, VPos::Center));
        title.draw_text(&self.options.title, &style, (w as i32 / 2, h as i32 / 2))?;

        let mut chart = self.chart(&body)?;
        let label_px = px(self.options.label_pt, self.options.dpi);
        let tick_px = px(10.0, self.options.dpi);
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(self.options.x_label.clone())
            .y_desc(self.options.y_label.clone())
            .axis_desc_style(("sans-serif", label_px))
            .label_style(("sans-serif", tick_px))
            .x_labels(8)
            .y_labels(8)
            .x_label_formatter(&|v| format_value(*v))
            .y_label_formatter(&|v| format_value(*v))
            .draw()?;
        root.present()?;
        Ok(())
    }

    fn paint_field(&self, pixels: &mut [u8], field: &FlowField, style: &FieldStyle) -> Result<()> {
        let root = BitMapBackend::with_buffer(pixels, self.size).into_drawing_area();
        let (_, body) = self.split(&root);
        let mut chart = self.chart(&body)?;
        draw_field(&mut chart, field, style, &self.bounds, self.options.dpi)?;
        root.present()?;
        Ok(())
    }

    fn split<'b>(
        &self,
        root: &DrawingArea<BitMapBackend<'b>, Shift>,
    ) -> (
        DrawingArea<BitMapBackend<'b>, Shift>,
        DrawingArea<BitMapBackend<'b>, Shift>,
    ) {
        let title_px = 2.5 * px(self.options.title_pt, self.options.dpi);
        root.split_vertically(title_px.round() as u32)
    }

    /// The same layout every time, so artists land exactly on the background's axes.
    fn chart<'a, 'b>(
        &self,
        body: &'a DrawingArea<BitMapBackend<'b>, Shift>,
    ) -> Result<Chart<'a, 'b>> {
        let dpi = self.options.dpi;
        let chart = ChartBuilder::on(body)
            .margin_right(px(18.0, dpi) as u32)
            .margin_bottom(px(6.0, dpi) as u32)
            .x_label_area_size(px(self.options.label_pt * 3.5, dpi) as u32)
            .y_label_area_size(px(self.options.label_pt * 5.0, dpi) as u32)
            .build_cartesian_2d(
                self.bounds.min_x..self.bounds.max_x,
                self.bounds.min_y..self.bounds.max_y,
            )?;
        Ok(chart)
    }
}
