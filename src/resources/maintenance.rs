//! Maintenance events

use super::{action_path, item_path};
use crate::http::{ApiClient, ApiResult, RequestDescriptor};
use crate::types::JsonValue;
use serde_json::json;
use std::fmt::Display;

const MAINTENANCE: &str = "/maintenance";

impl ApiClient {
    /// `GET /maintenance`
    pub async fn get_maintenance_events(&self) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::get(MAINTENANCE)).await
    }

    /// `POST /maintenance`
    pub async fn create_maintenance_event(&self, event: JsonValue) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::post(MAINTENANCE, event)).await
    }

    /// `PUT /maintenance/{id}`
    pub async fn update_maintenance_event(
        &self,
        id: impl Display,
        event: JsonValue,
    ) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::put(item_path(MAINTENANCE, id), event))
            .await
    }

    /// `PUT /maintenance/{id}/status {status}`
    pub async fn update_maintenance_status(
        &self,
        id: impl Display,
        status: &str,
    ) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::put(
            action_path(MAINTENANCE, id, "status"),
            json!({ "status": status }),
        ))
        .await
    }

    /// `DELETE /maintenance/{id}`
    pub async fn delete_maintenance_event(&self, id: impl Display) -> ApiResult<JsonValue> {
        self.send(RequestDescriptor::delete(item_path(MAINTENANCE, id)))
            .await
    }
}
