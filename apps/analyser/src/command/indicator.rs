use stock::{
    IndicatorKind, OutputSize,
    chart::{rsi_chart, sma_chart},
};
use tracing::{debug, error, info};

use crate::{Data, Error, display};

use super::save_chart;

/// Compact history covers the default windows; longer windows need the full history.
pub(crate) fn history_size(kind: IndicatorKind, window: usize) -> OutputSize {
    OutputSize::for_bars(kind.bars_needed(window))
}

pub async fn indicator(
    data: &Data,
    symbol: &str,
    kind: IndicatorKind,
    window: usize,
) -> Result<(), Error> {
    info!("Received {} command for symbol: {} (window {})", kind, symbol, window);

    let series = match data
        .facade
        .fetch_history(symbol, history_size(kind, window))
        .await
    {
        Ok(s) => {
            info!("Fetched {} bars for {}", s.len(), symbol);
            s
        }
        Err(e) => {
            error!("Failed to fetch price data for {}: {:?}", symbol, e);
            return Err(e.into());
        }
    };

    debug!("Calculating {} for {}", kind, symbol);
    let values = data.facade.compute_indicator(&series, kind, window)?;

    print!("{}", display::indicator(symbol, kind, window, &values));

    if values.is_empty() {
        return Ok(());
    }

    debug!("Generating {} chart for {}", kind, symbol);
    let owned = symbol.to_string();
    match kind {
        IndicatorKind::Sma => {
            save_chart(data, symbol, "sma", move || {
                sma_chart(&owned, &series, &values, window)
            })
            .await
        }
        IndicatorKind::Rsi => {
            save_chart(data, symbol, "rsi", move || {
                rsi_chart(&owned, &series, &values, window)
            })
            .await
        }
    }
}
