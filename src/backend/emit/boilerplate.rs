//! Runtime helpers emitted once at the top of every generated module.
//!
//! Every helper is `#[allow(dead_code)]`: a module with only GET endpoints never reads a body, a module without
//! endpoints uses almost nothing.

use proc_macro2::TokenStream;
use quote::quote;

use super::ApiEmitter;

impl ApiEmitter<'_> {
    /// `use` lines, auth constants, envelope and helper functions.
    ///
    /// `write_business_error` names the user's `ApiError`, so it is only emitted when `with_business_errors` is set.
    pub(super) fn emit_boilerplate(&self, with_business_errors: bool) -> TokenStream {
        let auth_header = self.config.auth_header.as_str();
        let auth_secret = self.config.auth_secret.as_str();

        let business_errors = if with_business_errors {
            quote! {
                /// Map a business method error to a response: `ApiError` keeps its status and message, anything
                /// else is a 500.
                #[allow(dead_code)]
                fn write_business_error(err: Box<dyn std::error::Error + Send + Sync>) -> Response<Vec<u8>> {
                    match err.downcast::<ApiError>() {
                        Ok(api_err) => {
                            let status = StatusCode::from_u16(api_err.http_status)
                                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                            write_error_message(api_err.err.to_string(), status)
                        }
                        Err(_) => write_error_message("internal server error", StatusCode::INTERNAL_SERVER_ERROR),
                    }
                }
            }
        } else {
            TokenStream::new()
        };

        quote! {
            #[allow(unused_imports)]
            use super::*;
            use std::collections::HashMap;
            use http::{Method, Request, Response, StatusCode};

            #[allow(dead_code)]
            const AUTH_HEADER: &str = #auth_header;
            #[allow(dead_code)]
            const AUTH_SECRET: &str = #auth_secret;

            /// JSON envelope of every response.
            #[derive(serde::Serialize)]
            #[allow(dead_code)]
            struct ApiResult<T> {
                error: String,
                #[serde(skip_serializing_if = "Option::is_none")]
                response: Option<T>,
            }

            /// Failure of a generated `validate` routine; the message is sent back with a 400.
            #[derive(Debug, Clone, PartialEq, Eq)]
            #[allow(dead_code)]
            pub struct ValidationError {
                message: String,
            }

            #[allow(dead_code)]
            impl ValidationError {
                pub fn new(message: impl Into<String>) -> Self {
                    Self { message: message.into() }
                }

                pub fn message(&self) -> &str {
                    &self.message
                }
            }

            impl std::fmt::Display for ValidationError {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&self.message)
                }
            }

            impl std::error::Error for ValidationError {}

            #[allow(dead_code)]
            fn write_response<T: serde::Serialize>(
                payload: Option<T>,
                error: Option<String>,
                status: StatusCode,
            ) -> Response<Vec<u8>> {
                let result = ApiResult {
                    error: error.unwrap_or_default(),
                    response: payload,
                };
                let (body, status) = match serde_json::to_vec(&result) {
                    Ok(body) => (body, status),
                    Err(err) => {
                        let failure = ApiResult::<()> {
                            error: err.to_string(),
                            response: None,
                        };
                        (
                            serde_json::to_vec(&failure).unwrap_or_default(),
                            StatusCode::INTERNAL_SERVER_ERROR,
                        )
                    }
                };
                let mut response = Response::new(body);
                *response.status_mut() = status;
                response.headers_mut().insert(
                    http::header::CONTENT_TYPE,
                    http::HeaderValue::from_static("application/json"),
                );
                response
            }

            #[allow(dead_code)]
            fn write_error_message(message: impl Into<String>, status: StatusCode) -> Response<Vec<u8>> {
                write_response::<()>(None, Some(message.into()), status)
            }

            #business_errors

            /// Reject requests whose method is not in `allowed` with a 406.
            #[allow(dead_code)]
            fn check_method_middleware<'a, F>(
                next: F,
                allowed: Vec<Method>,
            ) -> impl Fn(&Request<Vec<u8>>) -> Response<Vec<u8>> + 'a
            where
                F: Fn(&Request<Vec<u8>>) -> Response<Vec<u8>> + 'a,
            {
                move |r: &Request<Vec<u8>>| {
                    if !allowed.contains(r.method()) {
                        return write_error_message("bad method", StatusCode::NOT_ACCEPTABLE);
                    }
                    next(r)
                }
            }

            /// Reject requests without the shared secret in the auth header with a 403.
            #[allow(dead_code)]
            fn auth_middleware<'a, F>(next: F) -> impl Fn(&Request<Vec<u8>>) -> Response<Vec<u8>> + 'a
            where
                F: Fn(&Request<Vec<u8>>) -> Response<Vec<u8>> + 'a,
            {
                move |r: &Request<Vec<u8>>| {
                    let authorized = r
                        .headers()
                        .get(AUTH_HEADER)
                        .is_some_and(|value| value.as_bytes() == AUTH_SECRET.as_bytes());
                    if !authorized {
                        return write_error_message("unauthorized", StatusCode::FORBIDDEN);
                    }
                    next(r)
                }
            }

            /// Decode a URL-encoded body; the last occurrence of a key wins.
            #[allow(dead_code)]
            fn body_to_map(body: &[u8]) -> HashMap<String, String> {
                url::form_urlencoded::parse(body).into_owned().collect()
            }

            /// Decode a query string; the first occurrence of a key wins.
            #[allow(dead_code)]
            fn query_to_map(query: Option<&str>) -> HashMap<String, String> {
                let mut map = HashMap::new();
                for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()).into_owned() {
                    map.entry(key).or_insert(value);
                }
                map
            }

            #[allow(dead_code)]
            fn string_param(map: &HashMap<String, String>, key: &str) -> String {
                map.get(key).cloned().unwrap_or_default()
            }

            /// Missing and empty values read as 0.
            #[allow(dead_code)]
            fn int_param(map: &HashMap<String, String>, key: &str) -> Result<i64, std::num::ParseIntError> {
                match map.get(key).map(String::as_str) {
                    None | Some("") => Ok(0),
                    Some(value) => value.parse(),
                }
            }
        }
    }
}
