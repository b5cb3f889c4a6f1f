use actix_web::{HttpResponse, Responder, post, web};
use log::{debug, warn};

use super::models::{AppState, MessageResponse, NewTxRequest};

/// Queue a transaction for the next block. Amounts and senders are not checked.
#[post("/transactions/new")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let NewTxRequest {
        sender,
        recipient,
        amount,
    } = body.into_inner();

    let (sender, recipient, amount) = match (sender, recipient, amount) {
        (Some(s), Some(r), Some(a)) => (s, r, a),
        (s, r, a) => {
            let missing: Vec<&str> = [
                ("sender", s.is_none()),
                ("recipient", r.is_none()),
                ("amount", a.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            warn!("POST /transactions/new - rejected, missing {missing:?}");
            return HttpResponse::BadRequest().body(format!("Missing values {missing:?}"));
        }
    };

    debug!("POST /transactions/new - {sender} -> {recipient} ({amount})");
    let index = state.node.submit_transaction(sender, recipient, amount);

    HttpResponse::Created().json(MessageResponse {
        message: format!("Transaction will be added to Block {index}"),
    })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use serde_json::json;

    use crate::api::init_routes;
    use crate::api::test_support::state;
    use crate::network::fetch::testing::StaticFetcher;
    use crate::transaction::Transaction;

    #[actix_web::test]
    async fn accepts_transaction_and_predicts_block() {
        let data = state(StaticFetcher::default());
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/transactions/new")
            .set_json(json!({"sender": "alice", "recipient": "bob", "amount": 5}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Transaction will be added to Block 2");
        assert_eq!(
            data.node.pending_snapshot(),
            vec![Transaction::new("alice", "bob", 5)]
        );
    }

    #[actix_web::test]
    async fn reports_missing_fields() {
        let data = state(StaticFetcher::default());
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/transactions/new")
            .set_json(json!({"sender": "alice"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body = test::read_body(resp).await;
        assert_eq!(
            body,
            web::Bytes::from_static(br#"Missing values ["recipient", "amount"]"#)
        );
        assert!(data.node.pending_snapshot().is_empty());
    }
}
