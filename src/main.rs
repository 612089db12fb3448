mod api;
mod app;
mod components;
mod config;
mod currency;
mod error;
mod filter;
mod form;
mod ledger;
mod models;

use tracing_wasm::WASMLayerConfigBuilder;

use crate::{
    app::{AccountingEntries, AccountingEntriesProps},
    config::Config,
};

fn main() {
    let config = Config::from_env();

    tracing_wasm::set_as_global_default_with_config(
        WASMLayerConfigBuilder::new()
            .set_max_level(config.log_level)
            .build(),
    );
    tracing::info!("Using transaction service at {}", config.api_base_url);

    yew::Renderer::<AccountingEntries>::with_props(AccountingEntriesProps { config }).render();
}
