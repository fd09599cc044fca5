//! User accounts behind three receivers.
//!
//! `MyApi` stores users in memory, `OtherApi` only validates and echoes its input, and `SearchApi` is GET-only.
//! Handlers, dispatchers and `validate` routines are generated from this file at build time into [`handlers`].

use std::collections::HashMap;
use std::sync::Mutex;

use apigen_derive::ApiParams;
use serde::Serialize;

/// Business error carrying its own HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{err}")]
pub struct ApiError {
    pub http_status: u16,
    pub err: String,
}

impl ApiError {
    pub fn new(http_status: u16, err: impl Into<String>) -> Self {
        Self {
            http_status,
            err: err.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u64,
    pub login: String,
    pub full_name: String,
    pub status: String,
    pub age: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub id: u64,
}

#[derive(Debug, Clone, Default, ApiParams)]
pub struct ProfileParams {
    #[apivalidator("required")]
    pub login: String,
}

#[derive(Debug, Clone, Default, ApiParams)]
pub struct CreateParams {
    #[apivalidator("required,min=10")]
    pub login: String,
    #[apivalidator("paramname=full_name")]
    pub name: String,
    #[apivalidator("enum=user|moderator|admin,default=user")]
    pub status: String,
    #[apivalidator = "min=0,max=128"]
    pub age: i64,
}

#[derive(Default)]
pub struct MyApi {
    users: Mutex<HashMap<String, User>>,
}

impl MyApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look a user up by login.
    /// apigen:api {"url": "/user/profile", "auth": false}
    pub fn profile(&self, _ctx: &http::Extensions, params: ProfileParams) -> Result<User, ApiError> {
        if params.login == "bad_user" {
            return Err(ApiError::new(500, "bad user"));
        }
        let users = self
            .users
            .lock()
            .map_err(|_| ApiError::new(500, "user store unavailable"))?;
        users
            .get(&params.login)
            .cloned()
            .ok_or_else(|| ApiError::new(404, "user not exist"))
    }

    /// Register a new user.
    /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
    pub fn create(&self, _ctx: &http::Extensions, params: CreateParams) -> Result<NewUser, ApiError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| ApiError::new(500, "user store unavailable"))?;
        if users.contains_key(&params.login) {
            return Err(ApiError::new(409, "user exists"));
        }

        let id = users.len() as u64 + 1;
        users.insert(
            params.login.clone(),
            User {
                id,
                login: params.login,
                full_name: params.name,
                status: params.status,
                age: params.age,
            },
        );
        Ok(NewUser { id })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtherUser {
    pub id: u64,
    pub login: String,
    pub full_name: String,
    pub level: i64,
}

#[derive(Debug, Clone, Default, ApiParams)]
pub struct OtherCreateParams {
    #[apivalidator("required,min=3")]
    pub username: String,
    #[apivalidator("paramname=account_name")]
    pub name: String,
    #[apivalidator("enum=warrior|sorcerer|rouge,default=warrior")]
    pub class: String,
    #[apivalidator("min=1,max=50")]
    pub level: i64,
}

pub struct OtherApi;

impl OtherApi {
    /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
    pub fn create(
        &self,
        _ctx: &http::Extensions,
        params: OtherCreateParams,
    ) -> Result<OtherUser, Box<dyn std::error::Error + Send + Sync>> {
        if params.username == "bad_username" {
            return Err("bad user".into());
        }
        Ok(OtherUser {
            id: 12,
            login: params.username,
            full_name: params.name,
            level: params.level,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPage {
    pub tier: i64,
    pub page_size: i64,
}

#[derive(Debug, Clone, Default, ApiParams)]
pub struct SearchParams {
    #[apivalidator("required,enum=1|2|3")]
    pub tier: i64,
    #[apivalidator("paramname=page_size,default=20,min=5")]
    pub limit: i64,
}

/// Read-only listing; parameters come from the query string.
pub struct SearchApi;

impl SearchApi {
    /// apigen:api {"url": "/user/search", "method": "GET"}
    pub fn search(&self, _ctx: &http::Extensions, params: SearchParams) -> Result<SearchPage, ApiError> {
        Ok(SearchPage {
            tier: params.tier,
            page_size: params.limit,
        })
    }
}

pub mod handlers {
    include!(concat!(env!("OUT_DIR"), "/api_handlers.rs"));
}
