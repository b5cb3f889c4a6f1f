mod api;
mod blockchain;
mod config;
mod error;
mod network;
mod node;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;
use std::io;

use api::AppState;
use config::NodeConfig;
use network::HttpChainFetcher;
use node::Node;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = NodeConfig::from_env().map_err(io::Error::other)?;
    let node = Node::from_config(&config).map_err(io::Error::other)?;
    let fetcher = HttpChainFetcher::new(config.peer_timeout).map_err(io::Error::other)?;

    println!(
        "⛓️ Starting node {} at http://{}:{}",
        node.id(),
        config.host,
        config.port
    );
    info!(
        "difficulty={} max_iterations={:?} reward={} peers={:?}",
        config.difficulty,
        config.max_iterations,
        config.reward,
        node.peers()
    );

    let state = web::Data::new(AppState::new(node, fetcher));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
