use tracing::{error, info};

use crate::{Data, Error, display};

pub async fn quote(data: &Data, symbol: &str) -> Result<(), Error> {
    info!("Fetching data for symbol: {} from Alpha Vantage...", symbol);

    let quote = match data.facade.fetch_quote(symbol).await {
        Ok(q) => q,
        Err(e) => {
            error!("Failed to fetch quote for {}: {:?}", symbol, e);
            return Err(e.into());
        }
    };

    print!("{}", display::quote(&quote));
    Ok(())
}
