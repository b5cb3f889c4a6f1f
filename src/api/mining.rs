use actix_web::{HttpResponse, Responder, get, web};
use log::{error, info, warn};

use super::models::{AppState, MineResponse};

/// Mine a new block: solve the puzzle on the blocking pool, credit the
/// reward to this node and seal the pending pool.
#[get("/mine")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let worker = state.clone();
    let block = match web::block(move || worker.node.mine()).await {
        Ok(Ok(block)) => block,
        Ok(Err(e)) => {
            warn!("MINER - gave up: {e}");
            return HttpResponse::ServiceUnavailable().body(e.to_string());
        }
        Err(e) => {
            error!("MINER - worker failed: {e}");
            return HttpResponse::InternalServerError().body("mining worker failed");
        }
    };

    info!(
        "MINER - served block #{} ({} txs)",
        block.index,
        block.transactions.len()
    );
    HttpResponse::Ok().json(MineResponse {
        message: "New Block Forged".to_string(),
        index: block.index,
        transactions: block.transactions,
        proof: block.proof,
        previous_hash: block.previous_hash,
    })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};

    use crate::api::init_routes;
    use crate::api::models::AppState;
    use crate::api::test_support::{NODE_ID, state};
    use crate::blockchain::{ProofOfWork, hasher};
    use crate::network::fetch::testing::StaticFetcher;
    use crate::node::Node;

    #[actix_web::test]
    async fn mine_forges_rewarded_block() {
        let data = state(StaticFetcher::default());
        let genesis = data.node.last_block().unwrap();
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/mine").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["message"], "New Block Forged");
        assert_eq!(body["index"], 2);
        assert_eq!(body["previous_hash"], hasher::digest(&genesis));
        assert_eq!(
            body["transactions"],
            serde_json::json!([{"sender": "0", "recipient": NODE_ID, "amount": 1}])
        );
        assert!(data.node.is_chain_valid());
    }

    #[actix_web::test]
    async fn exhausted_search_is_unavailable() {
        let node = Node::new("n", ProofOfWork::new(8, Some(1)), 1);
        let data = web::Data::new(AppState::new(node, StaticFetcher::default()));
        let app = test::init_service(App::new().app_data(data).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/mine").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 503);
    }
}
