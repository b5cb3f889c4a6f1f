use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ValidateResponse};
use crate::network::RemoteChain;

/// Full chain and its length; peers read this during consensus.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let (chain, _) = state.node.chain_snapshot();
    HttpResponse::Ok().json(RemoteChain::new(chain))
}

/// Validate the node's own chain.
#[get("/validate")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let valid = state.node.is_chain_valid();
    let (_, length) = state.node.chain_snapshot();
    HttpResponse::Ok().json(ValidateResponse { valid, length })
}
