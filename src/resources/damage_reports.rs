//! Damage reports

use super::{action_path, item_path};
use crate::http::{ApiClient, ApiResult, RequestDescriptor};
use crate::types::JsonValue;
use serde_json::json;
use std::fmt::Display;

const DAMAGE_REPORTS: &str = "/damage-reports";

impl ApiClient {
    /// `GET /damage-reports/my-reports`
    pub async fn get_my_damage_reports(&self) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::get(format!("{DAMAGE_REPORTS}/my-reports")))
            .await
    }

    /// `POST /damage-reports`
    pub async fn create_damage_report(&self, report: JsonValue) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::post(DAMAGE_REPORTS, report))
            .await
    }

    /// `PUT /damage-reports/{id}`
    pub async fn update_damage_report(
        &self,
        id: impl Display,
        report: JsonValue,
    ) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::put(item_path(DAMAGE_REPORTS, id), report))
            .await
    }

    /// `PUT /damage-reports/{id}/status {status}`
    pub async fn update_damage_report_status(
        &self,
        id: impl Display,
        status: &str,
    ) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::put(
            action_path(DAMAGE_REPORTS, id, "status"),
            json!({ "status": status }),
        ))
        .await
    }

    /// `DELETE /damage-reports/{id}`
    pub async fn delete_damage_report(&self, id: impl Display) -> ApiResult<JsonValue> {
        self.send(RequestDescriptor::delete(item_path(DAMAGE_REPORTS, id)))
            .await
    }
}
