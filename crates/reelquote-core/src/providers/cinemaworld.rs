use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::config::ProviderSettings;
use crate::http_client::{HttpAuth, HttpClient, HttpRequest};
use crate::movie_source::{
    FetchDetailFuture, ListTitlesFuture, MovieSource, RawDetail, RawListing, UpstreamError,
    DEFAULT_LOGO,
};
use crate::{MovieId, ProviderId};

const MOVIES_URL: &str = "http://webjetapitest.azurewebsites.net/api/cinemaworld/movies";
const MOVIE_URL: &str = "http://webjetapitest.azurewebsites.net/api/cinemaworld/movie";

/// Binding to the cinemaworld backend.
pub struct CinemaWorldSource {
    http_client: Arc<dyn HttpClient>,
    auth: HttpAuth,
    logo_url: Option<String>,
}

impl CinemaWorldSource {
    pub fn new(settings: &ProviderSettings, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            auth: HttpAuth::Header {
                name: String::from("x-access-token"),
                value: settings.access_token.clone(),
            },
            logo_url: settings.logo_url.clone(),
        }
    }

    async fn fetch_body(&self, url: &str) -> Result<String, UpstreamError> {
        let request = HttpRequest::get(url).with_auth(&self.auth);
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| UpstreamError::transport(url, error))?;

        // The upstream contract is 200-or-error; other 2xx are not expected.
        if response.status != 200 {
            return Err(UpstreamError::from_status(url, response.status));
        }

        Ok(response.body)
    }
}

impl MovieSource for CinemaWorldSource {
    fn id(&self) -> ProviderId {
        ProviderId::Cinemaworld
    }

    fn logo(&self) -> String {
        self.logo_url
            .clone()
            .unwrap_or_else(|| DEFAULT_LOGO.to_owned())
    }

    fn list_titles<'a>(&'a self) -> ListTitlesFuture<'a> {
        Box::pin(async move {
            let body = self.fetch_body(MOVIES_URL).await?;
            let response: CinemaWorldMoviesResponse =
                serde_json::from_str(&body).map_err(|error| {
                    UpstreamError::malformed_payload(format!(
                        "cinemaworld listing did not parse: {error}"
                    ))
                })?;
            let movies = response.movies.ok_or_else(|| {
                UpstreamError::malformed_payload(
                    "cinemaworld listing is missing the 'Movies' envelope",
                )
            })?;

            Ok(movies
                .into_iter()
                .map(CinemaWorldListing::into_raw)
                .collect())
        })
    }

    fn fetch_detail<'a>(&'a self, movie_id: &'a MovieId) -> FetchDetailFuture<'a> {
        Box::pin(async move {
            let url = format!("{MOVIE_URL}/{}", urlencoding::encode(movie_id.as_str()));
            let body = self.fetch_body(&url).await?;
            let value: Value = serde_json::from_str(&body).map_err(|error| {
                UpstreamError::malformed_payload(format!(
                    "cinemaworld detail did not parse: {error}"
                ))
            })?;

            match value {
                Value::Object(fields) => Ok(RawDetail { fields }),
                _ => Err(UpstreamError::malformed_payload(
                    "cinemaworld detail is not a JSON object",
                )),
            }
        })
    }
}

// Cinemaworld wire shapes. The field names belong to this backend and stop
// here; the aggregator only ever sees the normalized representation.
#[derive(Debug, Deserialize)]
struct CinemaWorldMoviesResponse {
    #[serde(rename = "Movies")]
    movies: Option<Vec<CinemaWorldListing>>,
}

#[derive(Debug, Deserialize)]
struct CinemaWorldListing {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "ID")]
    id: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

impl CinemaWorldListing {
    fn into_raw(self) -> RawListing {
        RawListing {
            title: self.title,
            id: self.id,
            poster: self.poster,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpError, HttpResponse};
    use crate::movie_source::UpstreamErrorKind;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    #[derive(Debug)]
    struct RecordingHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn with_response(response: Result<HttpResponse, HttpError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }

        fn is_mock(&self) -> bool {
            true
        }
    }

    fn source_with(client: Arc<RecordingHttpClient>) -> CinemaWorldSource {
        let settings =
            ProviderSettings::new(ProviderId::Cinemaworld, "cw-token", None).expect("valid");
        CinemaWorldSource::new(&settings, client)
    }

    #[test]
    fn listing_sends_access_token_header_and_normalizes_rows() {
        let client = Arc::new(RecordingHttpClient::with_response(Ok(HttpResponse::ok_json(
            r#"{"Movies":[{"ID":"cw1","Title":"Star Wars","Poster":"p1","Year":"1977"}]}"#,
        ))));
        let source = source_with(Arc::clone(&client));

        let listings = block_on(source.list_titles()).expect("listing should succeed");

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title.as_deref(), Some("Star Wars"));
        assert_eq!(listings[0].id.as_deref(), Some("cw1"));

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, MOVIES_URL);
        assert_eq!(
            requests[0].headers.get("x-access-token").map(String::as_str),
            Some("cw-token")
        );
    }

    #[test]
    fn forbidden_status_maps_to_auth_rejected() {
        let client = Arc::new(RecordingHttpClient::with_response(Ok(HttpResponse {
            status: 403,
            body: String::new(),
        })));
        let source = source_with(client);

        let error = block_on(source.list_titles()).expect_err("403 must fail");
        assert_eq!(error.kind(), UpstreamErrorKind::AuthRejected);
    }

    #[test]
    fn listing_without_movies_envelope_is_malformed() {
        let client = Arc::new(RecordingHttpClient::with_response(Ok(HttpResponse::ok_json(
            r#"{"Films":[]}"#,
        ))));
        let source = source_with(client);

        let error = block_on(source.list_titles()).expect_err("must fail");
        assert_eq!(error.kind(), UpstreamErrorKind::MalformedPayload);
    }

    #[test]
    fn detail_url_escapes_opaque_ids() {
        let client = Arc::new(RecordingHttpClient::with_response(Ok(HttpResponse::ok_json(
            r#"{"ID":"cw 1","Title":"X","Poster":"p","Price":"10.0"}"#,
        ))));
        let source = source_with(Arc::clone(&client));
        let movie_id = MovieId::new("cw 1").expect("valid id");

        let detail = block_on(source.fetch_detail(&movie_id)).expect("detail should succeed");
        assert_eq!(detail.fields.get("Title").and_then(Value::as_str), Some("X"));

        let requests = client.recorded_requests();
        assert!(requests[0].url.ends_with("/movie/cw%201"));
    }

    fn block_on<F>(future: F) -> F::Output
    where
        F: Future,
    {
        let waker = noop_waker();
        let mut context = Context::from_waker(&waker);
        let mut future = std::pin::pin!(future);

        loop {
            match future.as_mut().poll(&mut context) {
                Poll::Ready(output) => return output,
                Poll::Pending => std::thread::yield_now(),
            }
        }
    }

    fn noop_waker() -> Waker {
        // SAFETY: The vtable functions never dereference the data pointer and are no-op operations.
        unsafe { Waker::from_raw(noop_raw_waker()) }
    }

    fn noop_raw_waker() -> RawWaker {
        RawWaker::new(std::ptr::null(), &NOOP_RAW_WAKER_VTABLE)
    }

    unsafe fn noop_raw_waker_clone(_: *const ()) -> RawWaker {
        noop_raw_waker()
    }

    unsafe fn noop_raw_waker_wake(_: *const ()) {}

    unsafe fn noop_raw_waker_wake_by_ref(_: *const ()) {}

    unsafe fn noop_raw_waker_drop(_: *const ()) {}

    static NOOP_RAW_WAKER_VTABLE: RawWakerVTable = RawWakerVTable::new(
        noop_raw_waker_clone,
        noop_raw_waker_wake,
        noop_raw_waker_wake_by_ref,
        noop_raw_waker_drop,
    );
}
