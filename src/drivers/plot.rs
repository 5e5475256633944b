use std::io::Cursor;
use std::path::Path;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::drivers::error::PadError;
use crate::drivers::palette::channel_palette;
use crate::drivers::{Derived, SampleArchive};
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    /// Draw captions and axes. Needs a system font.
    pub annotate: bool,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            background: RGBColor(10, 10, 10),
            annotate: true,
        }
    }
}
/// One panel of the stacked figure: a title and one trace per channel.
pub struct Panel {
    pub title: &'static str,
    pub traces: Vec<Vec<(f64, f64)>>,
}
impl Panel {
    fn y_bounds(&self) -> (f64, f64) {
        let (lo, hi) = self
            .traces
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
                (lo.min(y), hi.max(y))
            });
        if !lo.is_finite() || !hi.is_finite() {
            (-1.0, 1.0)
        } else if (hi - lo).abs() < f64::EPSILON {
            (lo - 1.0, hi + 1.0)
        } else {
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        }
    }
}
/// Raw values, their strided difference and the button indicator, top to bottom.
pub fn stacked_panels(archive: &SampleArchive, derived: &Derived) -> [Panel; 3] {
    let time: Vec<f64> = archive.timestamps.iter().map(|&t| f64::from(t)).collect();
    let diff_time = &time[derived.stride.min(time.len())..];
    let raw: Vec<Vec<(f64, f64)>> = archive
        .channels
        .columns()
        .into_iter()
        .map(|col| time.iter().zip(col).map(|(&t, &v)| (t, f64::from(v))).collect())
        .collect();
    let diff: Vec<Vec<(f64, f64)>> = derived
        .diff
        .columns()
        .into_iter()
        .map(|col| diff_time.iter().zip(col).map(|(&t, &v)| (t, f64::from(v))).collect())
        .collect();
    let button_on: Vec<Vec<(f64, f64)>> = derived
        .button_on
        .columns()
        .into_iter()
        .map(|col| time.iter().zip(col).map(|(&t, &v)| (t, f64::from(v))).collect())
        .collect();
    [
        Panel {
            title: "ADC values",
            traces: raw,
        },
        Panel {
            title: "ADC dif values",
            traces: diff,
        },
        Panel {
            title: "Button state",
            traces: button_on,
        },
    ]
}
/// Renders the three stacked panels with a shared time axis into PNG bytes.
pub fn render_stacked_png(
    archive: &SampleArchive,
    derived: &Derived,
    style: &PlotStyle,
) -> Result<Vec<u8>, PadError> {
    if archive.is_empty() {
        return Err(PadError::Plot("archive has no samples".into()));
    }
    let panels = stacked_panels(archive, derived);
    let palette: Vec<RGBColor> = channel_palette(archive.num_channels())
        .into_iter()
        .map(|[r, g, b]| RGBColor(r, g, b))
        .collect();
    let t_min = archive.timestamps.iter().copied().min().unwrap_or(0);
    let t_max = archive.timestamps.iter().copied().max().unwrap_or(0);
    let x_range = f64::from(t_min)..f64::from(t_max).max(f64::from(t_min) + 1.0);
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let areas = root.split_evenly((panels.len(), 1));
        for (area, panel) in areas.iter().zip(&panels) {
            let (y_lo, y_hi) = panel.y_bounds();
            let mut builder = ChartBuilder::on(area);
            builder.margin(10);
            if style.annotate {
                builder
                    .caption(panel.title, ("sans-serif", 18).into_font().color(&WHITE))
                    .set_label_area_size(LabelAreaPosition::Left, 55)
                    .set_label_area_size(LabelAreaPosition::Bottom, 30);
            }
            let mut chart = builder.build_cartesian_2d(x_range.clone(), y_lo..y_hi)?;
            if style.annotate {
                chart
                    .configure_mesh()
                    .light_line_style(&WHITE.mix(0.1))
                    .axis_style(&WHITE.mix(0.6))
                    .label_style(("sans-serif", 12).into_font().color(&WHITE))
                    .draw()?;
            }
            for (idx, trace) in panel.traces.iter().enumerate() {
                let color = palette[idx % palette.len()];
                chart.draw_series(LineSeries::new(trace.iter().copied(), &color))?;
            }
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
pub fn write_stacked_png(
    path: &Path,
    archive: &SampleArchive,
    derived: &Derived,
    style: &PlotStyle,
) -> Result<(), PadError> {
    let png = render_stacked_png(archive, derived, style)?;
    std::fs::write(path, png)
        .map_err(|e| PadError::Plot(format!("writing {}: {e}", path.display())))?;
    log::info!("plots written to {}", path.display());
    Ok(())
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, PadError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| PadError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
