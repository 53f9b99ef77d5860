// Route definitions and handlers

use crate::handlers;
use std::convert::Infallible;
use std::sync::Arc;
use toolvault::Toolbox;
use warp::Filter;

pub fn configure_routes(
    toolbox: Arc<Toolbox>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let api = warp::path("api").and(warp::path("v1"));

    // POST /tools/search
    let search = api
        .and(warp::path("tools"))
        .and(warp::path("search"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_toolbox(Arc::clone(&toolbox)))
        .and(warp::body::json())
        .and_then(handlers::search_tools_handler);

    // POST /tools/{name}/invoke
    let invoke = api
        .and(warp::path("tools"))
        .and(warp::path::param::<String>())
        .and(warp::path("invoke"))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_toolbox(Arc::clone(&toolbox)))
        .and(warp::body::json())
        .and_then(handlers::invoke_tool_handler);

    // GET /tools
    let list = api
        .and(warp::path("tools"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_toolbox(toolbox))
        .and_then(handlers::list_tools_handler);

    // Combine routes
    search.or(invoke).or(list)
}

fn with_toolbox(
    toolbox: Arc<Toolbox>,
) -> impl Filter<Extract = (Arc<Toolbox>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&toolbox))
}
