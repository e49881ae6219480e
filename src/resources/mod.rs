//! Resource operations
//!
//! One method on [`ApiClient`](crate::http::ApiClient) per resource and verb.
//! Each builds a [`RequestDescriptor`](crate::http::RequestDescriptor) and
//! runs it through the pipeline. Reads and writes return the envelope's
//! `data`; deletes return the whole response body.
//!
//! | Resource | Paths |
//! |----------|-------|
//! | Auth | `/auth/login` |
//! | Apartments | `/apartments` |
//! | Payments | `/payments`, `/payments/{id}/pay` |
//! | Users | `/users` |
//! | Maintenance | `/maintenance`, `/maintenance/{id}/status` |
//! | Notifications | `/notifications`, `/notifications/{id}/read` |
//! | Damage reports | `/damage-reports/my-reports`, `/damage-reports/{id}/status` |
//! | Guests | `/airbnb/guests`, `/airbnb/guests/active`, `/airbnb/guests/{id}/checkin`, `/airbnb/guests/{id}/checkout` |

mod apartments;
mod auth;
mod damage_reports;
mod guests;
mod maintenance;
mod notifications;
mod payments;
mod users;

pub use auth::LoginResponse;

use std::fmt::Display;
use url::form_urlencoded;

/// `{collection}/{id}`
fn item_path(collection: &str, id: impl Display) -> String {
    format!("{collection}/{}", encode_segment(id))
}

/// `{collection}/{id}/{action}`
fn action_path(collection: &str, id: impl Display, action: &str) -> String {
    format!("{collection}/{}/{action}", encode_segment(id))
}

/// Percent-encode an id so it stays a single path segment
fn encode_segment(id: impl Display) -> String {
    let raw = id.to_string();
    // byte_serialize writes a space as '+' and a literal '+' as %2B
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod path_tests {
    use super::*;

    #[test]
    fn test_numeric_ids_are_unchanged() {
        assert_eq!(item_path("/apartments", 5), "/apartments/5");
        assert_eq!(action_path("/payments", 12, "pay"), "/payments/12/pay");
    }

    #[test]
    fn test_ids_cannot_escape_their_segment() {
        assert_eq!(item_path("/users", "a/b?c#d"), "/users/a%2Fb%3Fc%23d");
        assert_eq!(
            action_path("/maintenance", "x y+z", "status"),
            "/maintenance/x%20y%2Bz/status"
        );
    }
}
