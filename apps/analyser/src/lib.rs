use std::sync::Arc;

use stock::QueryFacade;

pub mod command;
pub mod config;
pub mod display;

use config::Config;

pub struct Data {
    pub facade: Arc<QueryFacade>,
    pub config: Config,
}

pub type Error = anyhow::Error;
