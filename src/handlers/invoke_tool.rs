// POST /tools/{name}/invoke handler

use crate::models::{ErrorResponse, InvokeResponse};
use std::convert::Infallible;
use std::sync::Arc;
use toolvault::{ToolError, Toolbox};
use tracing::{debug, warn};
use warp::http::StatusCode;

pub async fn invoke_tool_handler(
    name: String,
    toolbox: Arc<Toolbox>,
    arguments: serde_json::Value,
) -> Result<warp::reply::Response, Infallible> {
    debug!(tool = %name, "POST /tools/{}/invoke", name);

    let reply = match toolbox.invoke(&name, arguments).await {
        Ok(result) => warp::reply::with_status(
            warp::reply::json(&InvokeResponse { result }),
            StatusCode::OK,
        ),
        Err(e) => {
            warn!(tool = %name, "Tool invocation failed: {}", e);
            warp::reply::with_status(warp::reply::json(&ErrorResponse::new(&e)), status_for(&e))
        }
    };
    Ok(warp::reply::Reply::into_response(reply))
}

fn status_for(error: &ToolError) -> StatusCode {
    match error {
        ToolError::UnknownTool(_) => StatusCode::NOT_FOUND,
        ToolError::Parameter(_) => StatusCode::BAD_REQUEST,
        ToolError::Execution(_) | ToolError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
