use charming::{
    Chart, ImageFormat, ImageRenderer,
    component::{Axis, Legend, Title},
    element::{AxisLabel, AxisType, LineStyle, SplitLine, Symbol, TextStyle},
    series::Line,
};

use crate::error::{Error, Result};
use crate::indicators::{IndicatorSeries, RSI_OVERBOUGHT, RSI_OVERSOLD};
use crate::series::{Column, PriceSeries};

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 600;

const BACKGROUND: &str = "#0b0c17";
const GRID: &str = "#2d2f45";
const LABEL: &str = "#a0a0a0";
const PRICE: &str = "#0064FF";
const OVERLAY: &str = "#FF6400";
const THRESHOLD: &str = "#ff4d4f";

/// Adjusted close over the full date range.
pub fn history_chart(symbol: &str, series: &PriceSeries) -> Result<Vec<u8>> {
    ensure_data(series)?;

    let chart = base_chart(
        format!("{} Historical Adjusted Close Price", symbol.to_uppercase()),
        series,
    )
    .y_axis(price_axis())
    .series(line("Adjusted Close Price", series.column(Column::AdjustedClose), PRICE, 2));

    render(&chart)
}

/// Adjusted close with the moving average laid over it.
pub fn sma_chart(
    symbol: &str,
    series: &PriceSeries,
    sma: &IndicatorSeries,
    window: usize,
) -> Result<Vec<u8>> {
    ensure_data(series)?;

    let label = format!("SMA {window}");
    let chart = base_chart(
        format!("{} Adjusted Close with {}", symbol.to_uppercase(), label),
        series,
    )
    .y_axis(price_axis())
    .series(line("Adjusted Close Price", series.column(Column::AdjustedClose), PRICE, 2))
    .series(line(&label, sma.aligned_to(&series.dates()), OVERLAY, 1));

    render(&chart)
}

/// RSI on a fixed 0-100 axis with the 70/30 bands drawn across it.
pub fn rsi_chart(
    symbol: &str,
    series: &PriceSeries,
    rsi: &IndicatorSeries,
    window: usize,
) -> Result<Vec<u8>> {
    ensure_data(series)?;

    let n = series.len();
    let chart = base_chart(format!("{} RSI ({window})", symbol.to_uppercase()), series)
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name("RSI")
                .min(0.0)
                .max(100.0)
                .axis_label(AxisLabel::new().color(LABEL))
                .split_line(SplitLine::new().line_style(LineStyle::new().color(GRID))),
        )
        .series(line("RSI", rsi.aligned_to(&series.dates()), PRICE, 2))
        .series(line("Overbought (70)", vec![RSI_OVERBOUGHT; n], THRESHOLD, 1))
        .series(line("Oversold (30)", vec![RSI_OVERSOLD; n], THRESHOLD, 1));

    render(&chart)
}

fn ensure_data(series: &PriceSeries) -> Result<()> {
    if series.is_empty() {
        return Err(Error::EmptySeries);
    }
    Ok(())
}

fn base_chart(title: String, series: &PriceSeries) -> Chart {
    let dates: Vec<String> = series
        .dates()
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    let interval = (dates.len() / 12).max(1);

    Chart::new()
        .background_color(BACKGROUND)
        .title(
            Title::new()
                .text(title)
                .left("center")
                .top("2%")
                .text_style(TextStyle::new().color("#ffffff").font_size(14)),
        )
        .legend(
            Legend::new()
                .bottom("2%")
                .text_style(TextStyle::new().color(LABEL)),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name("Date")
                .data(dates)
                .axis_label(
                    AxisLabel::new()
                        .rotate(45)
                        .interval(interval as f64)
                        .color(LABEL),
                )
                .split_line(SplitLine::new().line_style(LineStyle::new().color(GRID))),
        )
}

fn price_axis() -> Axis {
    Axis::new()
        .type_(AxisType::Value)
        .name("Price (USD)")
        .scale(true)
        .axis_label(AxisLabel::new().color(LABEL))
        .split_line(SplitLine::new().line_style(LineStyle::new().color(GRID)))
}

fn line(name: &str, data: Vec<f64>, color: &str, width: u32) -> Line {
    Line::new()
        .name(name)
        .data(data)
        .symbol(Symbol::None)
        .line_style(LineStyle::new().width(width).color(color))
}

fn render(chart: &Chart) -> Result<Vec<u8>> {
    let mut renderer = ImageRenderer::new(WIDTH, HEIGHT);
    renderer
        .render_format(ImageFormat::Png, chart)
        .map_err(|e| Error::Chart(format!("{e:?}")))
}
