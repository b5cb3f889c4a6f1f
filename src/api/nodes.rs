use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse};

/// Register peers from `{"nodes": [...]}`; only host:port of each is kept.
#[post("/nodes/register")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    let Some(nodes) = body.into_inner().nodes else {
        return HttpResponse::BadRequest().body("Error: Please supply a valid list of nodes");
    };

    match state.node.register_peers(&nodes) {
        Ok(total_nodes) => {
            info!("POST /nodes/register - {} peers known", total_nodes.len());
            HttpResponse::Created().json(RegisterNodesResponse {
                message: "New nodes have been added".to_string(),
                total_nodes,
            })
        }
        Err(e) => {
            warn!("POST /nodes/register - rejected: {e}");
            HttpResponse::BadRequest().body(format!("Error: {e}"))
        }
    }
}

/// Apply the longest-valid-chain rule against every registered peer.
#[get("/nodes/resolve")]
pub async fn resolve_conflicts(state: web::Data<AppState>) -> impl Responder {
    let replaced = state.node.resolve(&*state.fetcher).await;
    let (chain, _) = state.node.chain_snapshot();

    let resp = if replaced {
        ResolveResponse::Replaced {
            message: "Our chain was replaced".to_string(),
            new_chain: chain,
        }
    } else {
        ResolveResponse::Authoritative {
            message: "Our chain is authoritative".to_string(),
            chain,
        }
    };
    HttpResponse::Ok().json(resp)
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};
    use serde_json::json;

    use crate::api::init_routes;
    use crate::api::test_support::state;
    use crate::blockchain::{Block, ProofOfWork};
    use crate::network::fetch::testing::{StaticFetcher, mined_chain};

    #[actix_web::test]
    async fn register_deduplicates_locations() {
        let app = test::init_service(
            App::new()
                .app_data(state(StaticFetcher::default()))
                .configure(init_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/nodes/register")
            .set_json(json!({"nodes": ["http://192.168.0.5:5000/", "192.168.0.5:5000"]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["total_nodes"], json!(["192.168.0.5:5000"]));
    }

    #[actix_web::test]
    async fn register_requires_node_list() {
        let app = test::init_service(
            App::new()
                .app_data(state(StaticFetcher::default()))
                .configure(init_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/nodes/register")
            .set_json(json!({}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);

        let req = test::TestRequest::post()
            .uri("/nodes/register")
            .set_json(json!({"nodes": ["http://"]}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }

    #[actix_web::test]
    async fn resolve_adopts_longer_peer_chain() {
        let remote = mined_chain(ProofOfWork::with_difficulty(2), 3);
        let data = state(StaticFetcher::default().with_chain("peer:5000", remote.clone()));
        data.node.register_peers(["http://peer:5000"]).unwrap();
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/nodes/resolve").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Our chain was replaced");
        let new_chain: Vec<Block> = serde_json::from_value(body["new_chain"].clone()).unwrap();
        assert_eq!(new_chain, remote);
    }

    #[actix_web::test]
    async fn resolve_keeps_local_chain_without_better_peer() {
        let data = state(StaticFetcher::default());
        data.node.register_peers(["unreachable:5000"]).unwrap();
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/nodes/resolve").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Our chain is authoritative");
        assert_eq!(body["chain"].as_array().map(Vec::len), Some(1));
    }
}
