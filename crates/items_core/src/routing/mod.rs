mod cors;
mod types;

pub use cors::{add_cors_options, CorsHeader, CorsTemplate, PREFLIGHT_REQUEST_TEMPLATE};
pub use types::{
    HttpMethod, Integration, MockIntegration, PassthroughBehavior, RestApiDescriptor, RouteNode,
};
