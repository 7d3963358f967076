use crate::error::FetchError;
use crate::model::{GenreCount, TimeWindow};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::COOKIE;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const TOP_GENRES_PATH: &str = "/api/top-genres";

pub trait GenreDataSource: Send + Sync {
    fn fetch(&self, window: TimeWindow) -> Result<Vec<GenreCount>, FetchError>;
}

pub struct HttpGenreSource {
    client: Client,
    base_url: String,
    session_cookie: Option<String>,
}

impl HttpGenreSource {
    pub fn new(base_url: &str, timeout: Duration, session_cookie: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie: session_cookie.filter(|cookie| !cookie.trim().is_empty()),
        })
    }

    pub fn endpoint(&self, window: TimeWindow) -> String {
        format!(
            "{}{}?time_range={}",
            self.base_url,
            TOP_GENRES_PATH,
            window.query_value()
        )
    }
}

impl GenreDataSource for HttpGenreSource {
    fn fetch(&self, window: TimeWindow) -> Result<Vec<GenreCount>, FetchError> {
        let url = self.endpoint(window);
        let mut request = self.client.get(&url);
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        decode_genres(&body)
    }
}

#[derive(Deserialize)]
struct TopGenresResponse {
    genres: Vec<serde_json::Value>,
}

pub fn decode_genres(body: &str) -> Result<Vec<GenreCount>, FetchError> {
    let payload: TopGenresResponse =
        serde_json::from_str(body).map_err(|err| FetchError::Decode(err.to_string()))?;

    let received = payload.genres.len();
    let genres: Vec<GenreCount> = payload
        .genres
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    if genres.len() < received {
        debug!(
            dropped = received - genres.len(),
            "skipped undecodable genre entries"
        );
    }
    Ok(genres)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_canonical_genres_field() {
        let genres =
            decode_genres(r#"{"genres":[{"name":"indie","count":50},{"name":"pop","count":30}]}"#)
                .expect("decode");
        assert_eq!(
            genres,
            vec![GenreCount::new("indie", 50), GenreCount::new("pop", 30)]
        );
    }

    #[test]
    fn items_field_is_not_silently_empty() {
        let err = decode_genres(r#"{"items":[{"name":"indie","count":50}]}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn skips_entries_with_wrong_shape() {
        let genres = decode_genres(
            r#"{"genres":[{"name":"ok","count":3},{"count":4},{"name":"x","count":"many"},{"name":"neg","count":-2}]}"#,
        )
        .expect("decode");
        assert_eq!(
            genres,
            vec![GenreCount::new("ok", 3), GenreCount::new("neg", -2)]
        );
    }

    #[test]
    fn non_json_body_is_decode_error() {
        assert!(matches!(
            decode_genres("<html>login</html>"),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn endpoint_uses_wire_window_value() {
        let source = HttpGenreSource::new("http://127.0.0.1:5001/", Duration::from_secs(1), None)
            .expect("client");
        assert_eq!(
            source.endpoint(TimeWindow::Short),
            "http://127.0.0.1:5001/api/top-genres?time_range=short_term"
        );
    }
}
