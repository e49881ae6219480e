//! Payments

use super::{action_path, item_path};
use crate::http::{ApiClient, ApiResult, RequestDescriptor};
use crate::types::{JsonValue, Method};
use std::fmt::Display;

const PAYMENTS: &str = "/payments";

impl ApiClient {
    /// `GET /payments[?month=]`
    pub async fn get_payments(&self, month: Option<&str>) -> ApiResult<JsonValue> {
        let mut request = RequestDescriptor::get(PAYMENTS);
        if let Some(month) = month.filter(|m| !m.is_empty()) {
            request = request.query("month", month);
        }
        self.fetch(request).await
    }

    /// `POST /payments`
    pub async fn create_payment(&self, payment: JsonValue) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::post(PAYMENTS, payment)).await
    }

    /// `PUT /payments/{id}`
    pub async fn update_payment(
        &self,
        id: impl Display,
        payment: JsonValue,
    ) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::put(item_path(PAYMENTS, id), payment))
            .await
    }

    /// `PUT /payments/{id}/pay`
    pub async fn mark_payment_paid(&self, id: impl Display) -> ApiResult<JsonValue> {
        self.fetch(RequestDescriptor::new(
            Method::PUT,
            action_path(PAYMENTS, id, "pay"),
        ))
        .await
    }

    /// `DELETE /payments/{id}`
    pub async fn delete_payment(&self, id: impl Display) -> ApiResult<JsonValue> {
        self.send(RequestDescriptor::delete(item_path(PAYMENTS, id)))
            .await
    }
}
