//! Notifications

use super::{action_path, item_path};
use crate::http::{ApiClient, ApiResult, RequestDescriptor};
use crate::types::{JsonValue, Method};
use std::fmt::Display;

const NOTIFICATIONS: &str = "/notifications";

impl ApiClient {
    /// `GET /notifications`
    pub async fn get_notifications(&self) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::get(NOTIFICATIONS)).await
    }

    /// `POST /notifications`
    pub async fn create_notification(&self, notification: JsonValue) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::post(NOTIFICATIONS, notification))
            .await
    }

    /// `PUT /notifications/{id}`
    pub async fn update_notification(
        &self,
        id: impl Display,
        notification: JsonValue,
    ) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::put(
            item_path(NOTIFICATIONS, id),
            notification,
        ))
        .await
    }

    /// `PUT /notifications/{id}/read`
    pub async fn mark_notification_read(&self, id: impl Display) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::new(
            Method::PUT,
            action_path(NOTIFICATIONS, id, "read"),
        ))
        .await
    }

    /// `DELETE /notifications/{id}`
    pub async fn delete_notification(&self, id: impl Display) -> ApiResult<JsonValue> {
        self.send(RequestDescriptor::delete(item_path(NOTIFICATIONS, id)))
            .await
    }
}
