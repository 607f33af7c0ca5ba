//! Preview server for the secondary deployment.
//!
//! Serves the static output locally with the edge routing rules applied:
//! a request the router would rewrite resolves against the output tree,
//! anything else is answered with a pass-through notice since those paths
//! belong to the primary application in production.

mod lifecycle;
mod path;
mod response;

use crate::{
    config::SiteConfig,
    core,
    log,
    router::{self, RouteAction},
};
use anyhow::Result;
use std::sync::Arc;
use tiny_http::Request;

/// Bind the server and run the request loop until shutdown.
pub fn serve(config: &SiteConfig) -> Result<()> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    core::register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);
    log!("serve"; "rewrites resolve against {}", config.build.output.display());

    for request in server.incoming_requests() {
        if core::is_shutdown() {
            response::respond_unavailable(request)?;
            continue;
        }
        if let Err(e) = handle_request(request, config) {
            log!("serve"; "request error: {e}");
        }
    }

    log!("serve"; "stopped");
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    match router::decide(request.url(), &config.router.secondary_origin) {
        RouteAction::Rewrite { .. } => {
            match path::resolve_path(request.url(), &config.build.output) {
                Some(file) => response::respond_file(request, &file),
                None => response::respond_not_found(request, config),
            }
        }
        RouteAction::PassThrough => response::respond_pass_through(request),
    }
}
