//! Example service built on apigen-generated handlers.
//!
//! Each receiver in [`api`] answers requests through its generated `serve_http`:
//!
//! ```rust,ignore
//! let api = apigen_demo::api::MyApi::new();
//! let request = http::Request::get("/user/profile?login=rvasily").body(Vec::new())?;
//! let response = api.serve_http(&request);
//! ```

pub mod api;
