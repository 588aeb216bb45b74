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

const MOVIES_URL: &str = "http://webjetapitest.azurewebsites.net/api/filmworld/movies";
const MOVIE_URL: &str = "http://webjetapitest.azurewebsites.net/api/filmworld/movie";

/// Binding to the filmworld backend.
///
/// Today filmworld's wire shape happens to mirror cinemaworld's, but each
/// binding owns its response types so the backends stay free to diverge.
pub struct FilmWorldSource {
    http_client: Arc<dyn HttpClient>,
    auth: HttpAuth,
    logo_url: Option<String>,
}

impl FilmWorldSource {
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

        if response.status != 200 {
            return Err(UpstreamError::from_status(url, response.status));
        }

        Ok(response.body)
    }
}

impl MovieSource for FilmWorldSource {
    fn id(&self) -> ProviderId {
        ProviderId::Filmworld
    }

    fn logo(&self) -> String {
        self.logo_url
            .clone()
            .unwrap_or_else(|| DEFAULT_LOGO.to_owned())
    }

    fn list_titles<'a>(&'a self) -> ListTitlesFuture<'a> {
        Box::pin(async move {
            let body = self.fetch_body(MOVIES_URL).await?;
            let response: FilmWorldMoviesResponse =
                serde_json::from_str(&body).map_err(|error| {
                    UpstreamError::malformed_payload(format!(
                        "filmworld listing did not parse: {error}"
                    ))
                })?;
            let movies = response.movies.ok_or_else(|| {
                UpstreamError::malformed_payload(
                    "filmworld listing is missing the 'Movies' envelope",
                )
            })?;

            Ok(movies.into_iter().map(FilmWorldListing::into_raw).collect())
        })
    }

    fn fetch_detail<'a>(&'a self, movie_id: &'a MovieId) -> FetchDetailFuture<'a> {
        Box::pin(async move {
            let url = format!("{MOVIE_URL}/{}", urlencoding::encode(movie_id.as_str()));
            let body = self.fetch_body(&url).await?;
            let value: Value = serde_json::from_str(&body).map_err(|error| {
                UpstreamError::malformed_payload(format!(
                    "filmworld detail did not parse: {error}"
                ))
            })?;

            match value {
                Value::Object(fields) => Ok(RawDetail { fields }),
                _ => Err(UpstreamError::malformed_payload(
                    "filmworld detail is not a JSON object",
                )),
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct FilmWorldMoviesResponse {
    #[serde(rename = "Movies")]
    movies: Option<Vec<FilmWorldListing>>,
}

#[derive(Debug, Deserialize)]
struct FilmWorldListing {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "ID")]
    id: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

impl FilmWorldListing {
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
    use crate::http_client::NoopHttpClient;

    #[test]
    fn reports_its_identity() {
        let settings =
            ProviderSettings::new(ProviderId::Filmworld, "fw-token", None).expect("valid");
        let source = FilmWorldSource::new(&settings, Arc::new(NoopHttpClient));
        assert_eq!(source.id(), ProviderId::Filmworld);
    }

    #[test]
    fn logo_falls_back_to_crate_default() {
        let settings =
            ProviderSettings::new(ProviderId::Filmworld, "fw-token", None).expect("valid");
        let source = FilmWorldSource::new(&settings, Arc::new(NoopHttpClient));
        assert_eq!(source.logo(), DEFAULT_LOGO);
    }

    #[test]
    fn configured_logo_wins_over_default() {
        let settings = ProviderSettings::new(
            ProviderId::Filmworld,
            "fw-token",
            Some(String::from("/static/filmworld.png")),
        )
        .expect("valid");
        let source = FilmWorldSource::new(&settings, Arc::new(NoopHttpClient));
        assert_eq!(source.logo(), "/static/filmworld.png");
    }
}
