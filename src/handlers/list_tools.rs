// GET /tools handler

use crate::models::ToolListResponse;
use std::convert::Infallible;
use std::sync::Arc;
use toolvault::Toolbox;
use tracing::debug;

pub async fn list_tools_handler(toolbox: Arc<Toolbox>) -> Result<impl warp::Reply, Infallible> {
    debug!("GET /tools");

    let response = ToolListResponse {
        tools: toolbox.registry().names(),
    };
    Ok(warp::reply::json(&response))
}
