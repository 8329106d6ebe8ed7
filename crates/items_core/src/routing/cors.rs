//! Cross-origin preflight handling.
//!
//! Preflight requests are answered by the gateway itself through a mock
//! integration, so no function is invoked for `OPTIONS`.

use std::collections::BTreeMap;

use serde::Serialize;

use super::types::{HttpMethod, Integration, MockIntegration, PassthroughBehavior, RouteNode};

/// Request mapping template that makes the mock integration answer 200.
pub const PREFLIGHT_REQUEST_TEMPLATE: &str = "{\"statusCode\": 200}";

/// The closed set of headers a preflight response carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CorsHeader {
    AllowHeaders,
    AllowMethods,
    AllowOrigin,
    AllowCredentials,
}

impl CorsHeader {
    pub const ALL: [CorsHeader; 4] = [
        CorsHeader::AllowHeaders,
        CorsHeader::AllowMethods,
        CorsHeader::AllowOrigin,
        CorsHeader::AllowCredentials,
    ];

    pub fn header_name(self) -> &'static str {
        match self {
            CorsHeader::AllowHeaders => "Access-Control-Allow-Headers",
            CorsHeader::AllowMethods => "Access-Control-Allow-Methods",
            CorsHeader::AllowOrigin => "Access-Control-Allow-Origin",
            CorsHeader::AllowCredentials => "Access-Control-Allow-Credentials",
        }
    }

    /// Gateway response parameter key, e.g.
    /// `method.response.header.Access-Control-Allow-Origin`.
    pub fn response_parameter(self) -> String {
        format!("method.response.header.{}", self.header_name())
    }
}

/// Literal values for the four preflight headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorsTemplate {
    pub allow_headers: Vec<String>,
    pub allow_methods: Vec<HttpMethod>,
    pub allow_origin: String,
    pub allow_credentials: bool,
}

impl Default for CorsTemplate {
    fn default() -> Self {
        Self {
            allow_headers: [
                "Content-Type",
                "X-Amz-Date",
                "Authorization",
                "X-Api-Key",
                "X-Amz-Security-Token",
                "X-Amz-User-Agent",
            ]
            .iter()
            .map(|h| h.to_string())
            .collect(),
            allow_methods: vec![
                HttpMethod::Options,
                HttpMethod::Get,
                HttpMethod::Put,
                HttpMethod::Post,
                HttpMethod::Delete,
            ],
            allow_origin: "*".to_string(),
            allow_credentials: false,
        }
    }
}

impl CorsTemplate {
    /// Literal value of one header.
    pub fn value(&self, header: CorsHeader) -> String {
        match header {
            CorsHeader::AllowHeaders => self.allow_headers.join(","),
            CorsHeader::AllowMethods => self
                .allow_methods
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(","),
            CorsHeader::AllowOrigin => self.allow_origin.clone(),
            CorsHeader::AllowCredentials => self.allow_credentials.to_string(),
        }
    }

    /// All four headers with their values.
    pub fn headers(&self) -> BTreeMap<CorsHeader, String> {
        CorsHeader::ALL
            .into_iter()
            .map(|header| (header, self.value(header)))
            .collect()
    }

    /// The mock integration that answers a preflight request.
    pub fn preflight_integration(&self) -> MockIntegration {
        MockIntegration {
            status_code: 200,
            response_headers: self.headers(),
            request_template: PREFLIGHT_REQUEST_TEMPLATE.to_string(),
            passthrough: PassthroughBehavior::Never,
        }
    }
}

/// Attaches an `OPTIONS` entry answering preflight requests to `node`.
///
/// Applying it again overwrites the entry with an identical one.
pub fn add_cors_options(node: &mut RouteNode, template: &CorsTemplate) {
    node.add_method(
        HttpMethod::Options,
        Integration::Mock(template.preflight_integration()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_header_values() {
        let template = CorsTemplate::default();

        assert_eq!(
            template.value(CorsHeader::AllowHeaders),
            "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token,X-Amz-User-Agent"
        );
        assert_eq!(
            template.value(CorsHeader::AllowMethods),
            "OPTIONS,GET,PUT,POST,DELETE"
        );
        assert_eq!(template.value(CorsHeader::AllowOrigin), "*");
        assert_eq!(template.value(CorsHeader::AllowCredentials), "false");
    }

    #[test]
    fn test_response_parameter_key() {
        assert_eq!(
            CorsHeader::AllowOrigin.response_parameter(),
            "method.response.header.Access-Control-Allow-Origin"
        );
    }

    #[test]
    fn test_add_cors_options_adds_mock_with_four_headers() {
        let mut node = RouteNode::new("items");

        add_cors_options(&mut node, &CorsTemplate::default());

        match node.methods.get(&HttpMethod::Options) {
            Some(Integration::Mock(mock)) => {
                assert_eq!(mock.status_code, 200);
                assert_eq!(mock.response_headers.len(), 4);
                assert_eq!(mock.request_template, PREFLIGHT_REQUEST_TEMPLATE);
                assert_eq!(mock.passthrough, PassthroughBehavior::Never);
            }
            other => panic!("expected mock OPTIONS entry, got {other:?}"),
        }
    }

    #[test]
    fn test_add_cors_options_is_idempotent() {
        let template = CorsTemplate::default();
        let mut node = RouteNode::new("items");
        node.add_method(HttpMethod::Get, Integration::function("getAllItemsFunction"));

        add_cors_options(&mut node, &template);
        let once = node.clone();
        add_cors_options(&mut node, &template);

        assert_eq!(node, once);
        assert_eq!(node.methods.len(), 2);
    }
}
