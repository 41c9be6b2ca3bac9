// VK client: lists the photos of one album through `photos.get`.
// Blocking and single-shot, one request per run with no retries.
// Items that do not match the expected shape are skipped one by one.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::model::{Album, PhotoRecord, PhotoVariant};

/// Largest page `photos.get` will return in one call.
const MAX_PAGE: usize = 1000;

#[derive(Clone)]
pub struct VkClient {
    client: Client,
    base_url: String,
    token: String,
    api_version: String,
}

/// Wire shape of one listing item. Only the fields we use are read.
#[derive(Deserialize, Debug)]
struct RawPhoto {
    #[serde(default)]
    likes: Likes,
    date: i64,
    sizes: Vec<PhotoVariant>,
}

#[derive(Deserialize, Debug, Default)]
struct Likes {
    count: u64,
}

impl From<RawPhoto> for PhotoRecord {
    fn from(raw: RawPhoto) -> Self {
        PhotoRecord {
            likes_count: raw.likes.count,
            upload_date: raw.date,
            variants: raw.sizes,
        }
    }
}

impl VkClient {
    pub fn new(base_url: &str, token: &str, api_version: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(VkClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            api_version: api_version.to_string(),
        })
    }

    /// Fetch the photos of `album` owned by `owner_id`, with likes and
    /// size variants. An error payload in the response becomes
    /// `FetchError::RemoteApi`; a response without items becomes
    /// `FetchError::NoPhotos`.
    pub fn fetch(
        &self,
        owner_id: &str,
        album: Album,
        max_count: usize,
    ) -> Result<Vec<PhotoRecord>, FetchError> {
        let url = format!("{}/method/photos.get", self.base_url);
        let count = max_count.clamp(1, MAX_PAGE).to_string();
        debug!(owner_id, album = %album, count = %count, "requesting photo list");

        let res = self
            .client
            .get(&url)
            .query(&[
                ("access_token", self.token.as_str()),
                ("v", self.api_version.as_str()),
                ("owner_id", owner_id),
                ("album_id", album.as_str()),
                ("extended", "1"),
                ("photo_sizes", "1"),
                ("count", count.as_str()),
            ])
            .send()?;
        let body: Value = res.json()?;
        parse_listing(body)
    }
}

/// Interpret a `photos.get` response body.
fn parse_listing(mut body: Value) -> Result<Vec<PhotoRecord>, FetchError> {
    if let Some(error) = body.get("error") {
        let message = error["error_msg"]
            .as_str()
            .unwrap_or("unknown error")
            .to_string();
        return Err(FetchError::RemoteApi { message });
    }

    let items = match body.pointer_mut("/response/items") {
        Some(Value::Array(items)) if !items.is_empty() => std::mem::take(items),
        _ => return Err(FetchError::NoPhotos),
    };

    let records: Vec<PhotoRecord> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<RawPhoto>(item) {
            Ok(raw) => Some(PhotoRecord::from(raw)),
            Err(e) => {
                warn!(index, "skipping malformed photo: {e}");
                None
            }
        })
        .collect();
    if records.is_empty() {
        return Err(FetchError::NoPhotos);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn parses_items() {
        let body = json!({"response": {"count": 1, "items": [{
            "id": 1, "date": 100, "likes": {"count": 3, "user_likes": 0},
            "sizes": [{"width": 100, "height": 50, "type": "m", "url": "A"}]
        }]}});
        let records = parse_listing(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].likes_count, 3);
        assert_eq!(records[0].upload_date, 100);
        assert_eq!(records[0].variants[0].url, "A");
    }

    #[test]
    fn missing_likes_defaults_to_zero() {
        let body = json!({"response": {"items": [{"date": 5, "sizes": []}]}});
        assert_eq!(parse_listing(body).unwrap()[0].likes_count, 0);
    }

    #[test]
    fn malformed_item_is_skipped() {
        let body = json!({"response": {"items": [
            {"date": 1, "likes": {"count": 4}, "sizes": [
                {"width": 10, "height": 10, "type": "s", "url": "good"}
            ]},
            {"date": 2, "likes": {"count": 5}, "sizes": [{"type": "s", "url": "bad"}]}
        ]}});
        let records = parse_listing(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].likes_count, 4);
    }

    #[test]
    fn error_payload_carries_message() {
        let body = json!({"error": {"error_code": 30, "error_msg": "This profile is private"}});
        match parse_listing(body) {
            Err(FetchError::RemoteApi { message }) => assert_eq!(message, "This profile is private"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_or_missing_items_is_no_photos() {
        for body in [
            json!({"response": {"count": 0, "items": []}}),
            json!({"response": {}}),
            json!({}),
            json!({"response": {"items": [{"date": "oops"}, {"sizes": []}]}}),
        ] {
            assert!(matches!(parse_listing(body), Err(FetchError::NoPhotos)));
        }
    }

    #[test]
    fn fetch_sends_listing_query() {
        let rt = runtime();
        let server = rt.block_on(MockServer::start());
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/method/photos.get"))
                .and(query_param("access_token", "vk-token"))
                .and(query_param("v", "5.131"))
                .and(query_param("owner_id", "42"))
                .and(query_param("album_id", "saved"))
                .and(query_param("extended", "1"))
                .and(query_param("photo_sizes", "1"))
                .and(query_param("count", "7"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "response": {"items": [
                        {"date": 1, "likes": {"count": 2}, "sizes": [
                            {"width": 10, "height": 10, "type": "s", "url": "u"}
                        ]}
                    ]}
                })))
                .expect(1)
                .mount(&server),
        );

        let client = VkClient::new(&server.uri(), "vk-token", "5.131").unwrap();
        let records = client.fetch("42", Album::Saved, 7).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].likes_count, 2);
    }

    #[test]
    fn fetch_rejects_non_json_body() {
        let rt = runtime();
        let server = rt.block_on(MockServer::start());
        rt.block_on(
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
                .mount(&server),
        );

        let client = VkClient::new(&server.uri(), "t", "5.131").unwrap();
        assert!(matches!(
            client.fetch("1", Album::Wall, 5),
            Err(FetchError::Http(_))
        ));
    }
}
