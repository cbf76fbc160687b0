//! Handlers that do not depend on a provider.

use schemata_core::{QueryParams, Response, RouteTable, Status};
use serde::Serialize;

/// The status string reported by [`health`].
pub const HEALTH_STATUS: &str = "Server running and routing";

#[derive(Serialize)]
struct HealthEntry {
    status: &'static str,
}

/// Constant health payload: `[{"status": "Server running and routing"}]`.
pub fn health() -> Response {
    Response::json(Status::OK, &[HealthEntry { status: HEALTH_STATUS }], false)
}

/// The public route list, indented when `query.pretty` is set.
///
/// Encoding failures are answered with a `500` diagnostic.
pub fn list_routes(table: &RouteTable, query: QueryParams) -> Response {
    match table.to_json(query.pretty) {
        Ok(body) => Response::new(Status::OK, body),
        Err(e) => Response::text(
            Status::INTERNAL_SERVER_ERROR,
            format!("failed to marshal routes: {e}"),
        ),
    }
}
