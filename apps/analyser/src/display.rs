use std::fmt::Write;

use stock::{IndicatorKind, IndicatorSeries, PriceSeries, Quote, is_available};

const TAIL: usize = 5;

fn dollars(value: &str) -> String {
    if is_available(value) {
        format!("${value}")
    } else {
        value.to_string()
    }
}

fn number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.2}")
    }
}

pub fn quote(quote: &Quote) -> String {
    let mut out = String::from("\n--- Stock Information ---\n");
    let rows = [
        ("Symbol", quote.symbol.clone()),
        ("Current Price", dollars(&quote.price)),
        ("Open", dollars(&quote.open)),
        ("High", dollars(&quote.high)),
        ("Low", dollars(&quote.low)),
        ("Volume", quote.volume.clone()),
        ("Latest Trading Day", quote.latest_trading_day.clone()),
        ("Previous Close", dollars(&quote.previous_close)),
        ("Change", dollars(&quote.change)),
        ("Change Percent", quote.change_percent.clone()),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{label}: {value}");
    }
    out
}

pub fn history(symbol: &str, series: &PriceSeries) -> String {
    let mut out = String::new();
    let (Some(first), Some(last)) = (series.first_date(), series.last_date()) else {
        let _ = writeln!(out, "No historical data for {symbol}.");
        return out;
    };

    let _ = writeln!(
        out,
        "\n--- {symbol} Daily History ---\n{} bars from {first} to {last}",
        series.len()
    );
    let _ = writeln!(
        out,
        "{:<12}{:>12}{:>12}{:>12}{:>12}{:>14}",
        "Date", "Open", "High", "Low", "Close", "Volume"
    );

    let bars = series.bars();
    for bar in &bars[bars.len().saturating_sub(TAIL)..] {
        let volume = bar.volume.map_or_else(|| "NaN".to_string(), |v| v.to_string());
        let _ = writeln!(
            out,
            "{:<12}{:>12}{:>12}{:>12}{:>12}{:>14}",
            bar.date.format("%Y-%m-%d").to_string(),
            number(bar.open),
            number(bar.high),
            number(bar.low),
            number(bar.close),
            volume
        );
    }
    out
}

pub fn indicator(symbol: &str, kind: IndicatorKind, window: usize, series: &IndicatorSeries) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\n--- {symbol} {kind}({window}) ---\n{} points",
        series.len()
    );

    if series.is_empty() {
        let _ = writeln!(out, "Not enough data to fill a window of {window} bars.");
        return out;
    }

    let points = series.points();
    for point in &points[points.len().saturating_sub(TAIL)..] {
        let _ = writeln!(out, "{}  {}", point.date.format("%Y-%m-%d"), number(point.value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stock::parse_daily_series;

    fn quote_with(change_percent: &str) -> Quote {
        Quote {
            symbol: "IBM".into(),
            open: "182.4500".into(),
            high: "184.1700".into(),
            low: "181.9200".into(),
            price: "183.7300".into(),
            volume: "3452148".into(),
            latest_trading_day: "2024-03-15".into(),
            previous_close: "182.6100".into(),
            change: "1.1200".into(),
            change_percent: change_percent.into(),
        }
    }

    #[test]
    fn quote_prints_all_fields() {
        let text = quote(&quote_with("0.6133%"));
        assert!(text.contains("Symbol: IBM"));
        assert!(text.contains("Current Price: $183.7300"));
        assert!(text.contains("Volume: 3452148"));
        assert!(text.contains("Change Percent: 0.6133%"));
        assert_eq!(text.lines().filter(|l| l.contains(": ")).count(), 10);
    }

    #[test]
    fn not_available_has_no_dollar_sign() {
        let mut q = quote_with(stock::NOT_AVAILABLE);
        q.previous_close = stock::NOT_AVAILABLE.into();
        let text = quote(&q);
        assert!(text.contains("Change Percent: N/A"));
        assert!(text.contains("Previous Close: N/A"));
    }

    #[test]
    fn history_shows_range_and_nan() {
        let raw = serde_json::json!({
            "2024-01-01": {"1. open": "1", "4. close": "90", "5. volume": "10"},
            "2024-01-02": {"1. open": "2", "4. close": "N/A", "5. volume": "x"},
        });
        let series = parse_daily_series(raw.as_object().unwrap()).unwrap();
        let text = history("IBM", &series);
        assert!(text.contains("2 bars from 2024-01-01 to 2024-01-02"));
        assert!(text.contains("NaN"));
    }

    #[test]
    fn empty_history_says_so() {
        let text = history("IBM", &PriceSeries::default());
        assert!(text.contains("No historical data for IBM"));
    }

    #[test]
    fn empty_indicator_explains_window() {
        let text = indicator("IBM", IndicatorKind::Rsi, 14, &IndicatorSeries::default());
        assert!(text.contains("0 points"));
        assert!(text.contains("window of 14"));
    }
}
