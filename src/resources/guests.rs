//! Short-stay guests

use super::{action_path, item_path};
use crate::http::{ApiClient, ApiResult, RequestDescriptor};
use crate::types::{JsonValue, Method};
use std::fmt::Display;

const GUESTS: &str = "/airbnb/guests";

impl ApiClient {
    /// `GET /airbnb/guests`
    pub async fn get_guests(&self) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::get(GUESTS)).await
    }

    /// `GET /airbnb/guests/active`
    pub async fn get_active_guests(&self) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::get(format!("{GUESTS}/active")))
            .await
    }

    /// `POST /airbnb/guests`
    pub async fn create_guest(&self, guest: JsonValue) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::post(GUESTS, guest)).await
    }

    /// `PUT /airbnb/guests/{id}`
    pub async fn update_guest(&self, id: impl Display, guest: JsonValue) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::put(item_path(GUESTS, id), guest))
            .await
    }

    /// `PUT /airbnb/guests/{id}/checkin`
    pub async fn check_in_guest(&self, id: impl Display) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::new(
            Method::PUT,
            action_path(GUESTS, id, "checkin"),
        ))
        .await
    }

    /// `PUT /airbnb/guests/{id}/checkout`
    pub async fn check_out_guest(&self, id: impl Display) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::new(
            Method::PUT,
            action_path(GUESTS, id, "checkout"),
        ))
        .await
    }

    /// `DELETE /airbnb/guests/{id}`
    pub async fn delete_guest(&self, id: impl Display) -> ApiResult<JsonValue> {
        self.send(RequestDescriptor::delete(item_path(GUESTS, id)))
            .await
    }
}
