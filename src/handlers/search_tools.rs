// POST /tools/search handler

use crate::models::{ErrorResponse, SearchRequest};
use std::convert::Infallible;
use std::sync::Arc;
use toolvault::Toolbox;
use tracing::debug;
use warp::http::StatusCode;

pub async fn search_tools_handler(
    toolbox: Arc<Toolbox>,
    request: SearchRequest,
) -> Result<warp::reply::Response, Infallible> {
    debug!(query = %request.query, k = ?request.k, "POST /tools/search");

    let result = match request.k {
        Some(k) => toolbox.retrieve(&request.query, k).await,
        None => toolbox.retrieve_default(&request.query).await,
    };

    let reply = match result {
        Ok(specs) => warp::reply::with_status(warp::reply::json(&specs), StatusCode::OK),
        Err(e) => warp::reply::with_status(
            warp::reply::json(&ErrorResponse::new(e)),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    };
    Ok(warp::reply::Reply::into_response(reply))
}
