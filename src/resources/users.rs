//! Users

use super::item_path;
use crate::http::{ApiClient, ApiResult, RequestDescriptor};
use crate::types::JsonValue;
use std::fmt::Display;

const USERS: &str = "/users";

impl ApiClient {
    /// `GET /users`
    pub async fn get_users(&self) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::get(USERS)).await
    }

    /// `POST /users`
    pub async fn create_user(&self, user: JsonValue) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::post(USERS, user)).await
    }

    /// `PUT /users/{id}`
    pub async fn update_user(&self, id: impl Display, user: JsonValue) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::put(item_path(USERS, id), user))
            .await
    }

    /// `DELETE /users/{id}`
    pub async fn delete_user(&self, id: impl Display) -> ApiResult<JsonValue> {
        self.send(RequestDescriptor::delete(item_path(USERS, id)))
            .await
    }
}
