use stock::{OutputSize, chart::history_chart};
use tracing::{debug, error, info};

use crate::{Data, Error, display};

use super::save_chart;

pub async fn history(data: &Data, symbol: &str, size: OutputSize) -> Result<(), Error> {
    info!("Fetching {} daily history for symbol: {}", size.as_str(), symbol);

    let series = match data.facade.fetch_history(symbol, size).await {
        Ok(s) => {
            info!("Fetched {} bars for {}", s.len(), symbol);
            s
        }
        Err(e) => {
            error!("Failed to fetch history for {}: {:?}", symbol, e);
            return Err(e.into());
        }
    };

    print!("{}", display::history(symbol, &series));

    if series.is_empty() {
        return Ok(());
    }

    debug!("Generating history chart for {}", symbol);
    let owned = symbol.to_string();
    save_chart(data, symbol, "history", move || history_chart(&owned, &series)).await
}
