mod app;
mod modules;
mod types;
mod utils;

use crate::{
    app::App,
    types::{Config, ToContext},
};
use std::{process, sync::Arc};
use tracing_subscriber::prelude::*;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Invalid configuration: {}", err);
            process::exit(1);
        }
    };

    let ctx = match config.to_context().await {
        Ok(ctx) => Arc::new(ctx),
        Err(err) => {
            tracing::error!("Failed to start: {}", err);
            process::exit(1);
        }
    };

    // A server error or a panic inside the server task ends the process.
    match tokio::spawn(App::new(ctx).serve()).await {
        Ok(Ok(())) => (),
        Ok(Err(err)) => {
            tracing::error!("Server error: {}", err);
            process::exit(1);
        }
        Err(err) => {
            tracing::error!("Server task failed: {}", err);
            process::exit(1);
        }
    }
}
