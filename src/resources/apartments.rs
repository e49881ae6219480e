//! Apartments

use super::item_path;
use crate::http::{ApiClient, ApiResult, RequestDescriptor};
use crate::types::JsonValue;
use std::fmt::Display;

const APARTMENTS: &str = "/apartments";

impl ApiClient {
    /// `GET /apartments`
    pub async fn get_apartments(&self) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::get(APARTMENTS)).await
    }

    /// `POST /apartments`
    pub async fn create_apartment(&self, apartment: JsonValue) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::post(APARTMENTS, apartment))
            .await
    }

    /// `PUT /apartments/{id}`
    pub async fn update_apartment(
        &self,
        id: impl Display,
        apartment: JsonValue,
    ) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::put(item_path(APARTMENTS, id), apartment))
            .await
    }

    /// `DELETE /apartments/{id}`
    pub async fn delete_apartment(&self, id: impl Display) -> ApiResult<JsonValue> {
        self.send(RequestDescriptor::delete(item_path(APARTMENTS, id)))
            .await
    }
}
