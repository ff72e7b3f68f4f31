use anyhow::Context;
use hotel_allocator::Room;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct RoomsRequest {
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsResponse {
    pub success: bool,
    pub message: Option<String>,
    #[serde(default)]
    pub booked_room_ids: Vec<u32>,
    pub travel_time: Option<u32>,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self) -> String {
        format!("{}/api/rooms", self.base_url)
    }

    pub async fn rooms(&self) -> anyhow::Result<RoomsResponse> {
        let url = self.url();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send rooms request to {}", url))?;

        response
            .json()
            .await
            .context("Failed to parse rooms response JSON")
    }

    pub async fn book(&self, count: i64) -> anyhow::Result<RoomsResponse> {
        self.post(RoomsRequest {
            action: "book",
            count: Some(count),
            probability: None,
        })
        .await
    }

    pub async fn reset(&self) -> anyhow::Result<RoomsResponse> {
        self.post(RoomsRequest {
            action: "reset",
            count: None,
            probability: None,
        })
        .await
    }

    pub async fn random(&self, probability: Option<f64>) -> anyhow::Result<RoomsResponse> {
        self.post(RoomsRequest {
            action: "random",
            count: None,
            probability,
        })
        .await
    }

    async fn post(&self, request: RoomsRequest) -> anyhow::Result<RoomsResponse> {
        let url = self.url();
        tracing::debug!(request = %serde_json::to_string(&request)?, "POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to send {} request to {}", request.action, url))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read response body")?;

        // Rejections still carry a JSON body with a message.
        match serde_json::from_str::<RoomsResponse>(&text) {
            Ok(result) if status.is_success() && result.success => Ok(result),
            Ok(result) => anyhow::bail!(
                "{} request failed with status {}: {}",
                request.action,
                status,
                result.message.unwrap_or_default()
            ),
            Err(_) => anyhow::bail!(
                "{} request failed with status {}: {}",
                request.action,
                status,
                text
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_unused_fields() {
        let request = RoomsRequest {
            action: "reset",
            count: None,
            probability: None,
        };
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"action":"reset"}"#);
    }

    #[test]
    fn parses_error_responses_without_rooms() {
        let response: RoomsResponse = serde_json::from_str(
            r#"{"success": false, "message": "Invalid room count (1-5)."}"#,
        )
        .unwrap();
        assert!(!response.success);
        assert!(response.rooms.is_empty());
        assert!(response.booked_room_ids.is_empty());
    }

    #[test]
    fn parses_booking_responses() {
        let response: RoomsResponse = serde_json::from_str(
            r#"{"success": true, "bookedRoomIds": [101, 102], "travelTime": 1,
                "rooms": [{"id": 101, "floor": 1, "index": 1, "isBooked": true}]}"#,
        )
        .unwrap();
        assert_eq!(response.booked_room_ids, vec![101, 102]);
        assert_eq!(response.travel_time, Some(1));
        assert!(response.rooms[0].is_booked);
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = ApiClient::new("http://localhost:8080/".to_string());
        assert_eq!(client.url(), "http://localhost:8080/api/rooms");
    }
}
