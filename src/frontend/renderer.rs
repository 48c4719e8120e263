use std::error::Error as StdError;
use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

use crate::backend::engine::Outcome;
use crate::backend::mathphysics::Millisecond;
use crate::backend::series::{SignalSample, TimeSeriesBuffer};
use crate::backend::signal::{MAX_RSSI, MIN_RSSI};

pub use plotcfg::{
    font_size, Pixel, PlotResolution, DEFAULT_PLOT_RESOLUTION,
    LABEL_AREA_SIZE, PLOT_MARGIN
};


mod plotcfg;


const FONT: &str = "sans-serif";

const LEGEND_LINE_LENGTH: i32 = 20;
const SERIES_COLOR: RGBColor  = BLUE;


#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to create `{filename}`: {reason}")]
    Backend { filename: String, reason: String },
    #[error("Failed to convert frame delay `{0}`")]
    FrameDelay(Millisecond),
    #[error("Failed to draw a frame: {0}")]
    Drawing(String),
}

fn drawing_error(error: impl StdError) -> RenderError {
    RenderError::Drawing(error.to_string())
}


fn time_range(samples: &[SignalSample]) -> Range<f64> {
    let start = samples.first().map_or(0, SignalSample::time);
    let end   = samples
        .last()
        .map_or(start, SignalSample::time)
        .max(start + 1);

    (start as f64)..(end as f64)
}


/// Draws the RSSI chart into an animated GIF, one frame per call to
/// `render`.
pub struct PlottersRenderer<'a> {
    output_filename: String,
    caption: String,
    font_size: Pixel,
    area: DrawingArea<BitMapBackend<'a>, Shift>,
}

impl PlottersRenderer<'_> {
    /// # Errors
    ///
    /// Will return `Err` if the GIF file cannot be created.
    pub fn new(
        output_filename: &str,
        caption: &str,
        plot_resolution: PlotResolution,
        frame_delay: Millisecond,
    ) -> Result<Self, RenderError> {
        let frame_delay = u32::try_from(frame_delay)
            .map_err(|_| RenderError::FrameDelay(frame_delay))?;
        let area = BitMapBackend::gif(
            Path::new(output_filename),
            plot_resolution.into(),
            frame_delay,
        )
            .map_err(|error| RenderError::Backend {
                filename: output_filename.to_string(),
                reason: error.to_string(),
            })?
            .into_drawing_area();

        Ok(Self {
            output_filename: output_filename.to_string(),
            caption: caption.to_string(),
            font_size: font_size(plot_resolution),
            area,
        })
    }

    #[must_use]
    pub fn output_filename(&self) -> &str {
        &self.output_filename
    }

    /// # Errors
    ///
    /// Will return `Err` if an error occurs during drawing.
    pub fn render(
        &mut self,
        series: &TimeSeriesBuffer,
        outcome: &Outcome,
    ) -> Result<(), RenderError> {
        self.area
            .fill(&WHITE)
            .map_err(drawing_error)?;

        self.draw_series(&series.to_series(), outcome)?;

        self.area
            .present()
            .map_err(drawing_error)
    }

    fn draw_series(
        &self,
        samples: &[SignalSample],
        outcome: &Outcome,
    ) -> Result<(), RenderError> {
        let mut chart_builder = ChartBuilder::on(&self.area);

        if !self.caption.is_empty() {
            chart_builder.caption(&self.caption, (FONT, self.font_size));
        }

        let mut chart_context = chart_builder
            .margin(PLOT_MARGIN)
            .x_label_area_size(LABEL_AREA_SIZE)
            .y_label_area_size(LABEL_AREA_SIZE)
            .build_cartesian_2d(time_range(samples), MIN_RSSI..MAX_RSSI)
            .map_err(drawing_error)?;

        chart_context
            .configure_mesh()
            .x_desc("Tick")
            .y_desc("RSSI (dBm)")
            .label_style((FONT, self.font_size / 2))
            .draw()
            .map_err(drawing_error)?;

        let points = samples
            .iter()
            .map(|sample| (sample.time() as f64, sample.rssi().value()));

        chart_context
            .draw_series(LineSeries::new(points, SERIES_COLOR))
            .map_err(drawing_error)?
            .label(format!(
                "{}, {}, {}",
                outcome.rssi(),
                outcome.quality(),
                outcome.throughput(),
            ))
            .legend(|(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + LEGEND_LINE_LENGTH, y)],
                    SERIES_COLOR
                )
            });

        chart_context
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT, self.font_size / 2))
            .draw()
            .map_err(drawing_error)
    }
}
