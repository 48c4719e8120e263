pub type Pixel = u32;


pub const PLOT_MARGIN: Pixel     = 10;
pub const LABEL_AREA_SIZE: Pixel = 40;

pub const DEFAULT_PLOT_RESOLUTION: PlotResolution = PlotResolution {
    width: 640,
    height: 360,
};

const MIN_FONT_SIZE: Pixel     = 10;
const FONT_SIZE_DIVISOR: Pixel = 20;


#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlotResolution {
    width: Pixel,
    height: Pixel,
}

impl PlotResolution {
    #[must_use]
    pub fn new(width: Pixel, height: Pixel) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn width(&self) -> Pixel {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> Pixel {
        self.height
    }
}

impl Default for PlotResolution {
    fn default() -> Self {
        DEFAULT_PLOT_RESOLUTION
    }
}

impl From<PlotResolution> for (Pixel, Pixel) {
    fn from(plot_resolution: PlotResolution) -> Self {
        (plot_resolution.width, plot_resolution.height)
    }
}


#[must_use]
pub fn font_size(plot_resolution: PlotResolution) -> Pixel {
    (plot_resolution.width.min(plot_resolution.height) / FONT_SIZE_DIVISOR)
        .max(MIN_FONT_SIZE)
}
