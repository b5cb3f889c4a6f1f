mod chain;
mod health;
mod mining;
pub mod models;
mod nodes;
mod tx;

use actix_web::web::ServiceConfig;

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(health::health_check)
        .service(chain::get_chain)
        .service(chain::validate_chain)
        .service(mining::mine_block)
        .service(tx::post_transaction)
        .service(nodes::register_nodes)
        .service(nodes::resolve_conflicts);
}

#[cfg(test)]
pub(crate) mod test_support {
    use actix_web::web;

    use super::AppState;
    use crate::blockchain::ProofOfWork;
    use crate::network::fetch::testing::StaticFetcher;
    use crate::node::Node;

    pub const NODE_ID: &str = "test-node";

    pub fn state(fetcher: StaticFetcher) -> web::Data<AppState> {
        let node = Node::new(NODE_ID, ProofOfWork::with_difficulty(2), 1);
        web::Data::new(AppState::new(node, fetcher))
    }
}
