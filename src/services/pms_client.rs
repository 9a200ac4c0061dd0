use std::{error::Error, fmt, time::Duration};

use chrono::NaiveDate;
use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize};
use url::Url;

use crate::config::AppConfig;
use crate::models::{
    arrangement::{Arrangement, BoardType},
    availability::{
        ArrangementOptions, ArrangementQuery, AvailabilityRequest, AvailabilityResponse,
        InitialSetup, InitialSetupQuery, PricedArrangement, PricingRequest,
    },
    booking::BookingRequest,
    pricing::NightlyPricing,
};

#[derive(Debug)]
pub enum PmsError {
    /// The PMS could not be reached or answered with something unreadable.
    HttpError(reqwest::Error),
    /// The PMS answered with a non-success status.
    StatusError { status: u16, message: Option<String> },
    /// The optimizer found no arrangement for the query.
    NoArrangement,
    UrlError(String),
}

impl fmt::Display for PmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PmsError::HttpError(err) => write!(f, "HTTP error: {}", err),
            PmsError::StatusError { status, message } => match message {
                Some(message) => write!(f, "PMS returned {}: {}", status, message),
                None => write!(f, "PMS returned {}", status),
            },
            PmsError::NoArrangement => write!(f, "No arrangement available for this query"),
            PmsError::UrlError(msg) => write!(f, "URL error: {}", msg),
        }
    }
}

impl Error for PmsError {}

impl From<reqwest::Error> for PmsError {
    fn from(err: reqwest::Error) -> Self {
        PmsError::HttpError(err)
    }
}

/// Error body shapes the PMS is known to send.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Client for the external PMS / channel manager reservation endpoints.
#[derive(Clone)]
pub struct PmsClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl PmsClient {
    pub fn new(
        mut base_url: Url,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, PmsError> {
        // relative joins drop the last path segment unless it ends in a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, PmsError> {
        Self::new(
            config.pms_base_url.clone(),
            config.pms_api_key.clone(),
            config.pms_timeout,
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, PmsError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| PmsError::UrlError(e.to_string()))?;

        let builder = self.http.request(method, url);
        Ok(match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        })
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, PmsError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message.or(b.error).or(b.detail))
                .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()));

            log::warn!("PMS request failed with {}: {:?}", status, message);
            return Err(PmsError::StatusError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }

    pub async fn initial_setup(
        &self,
        start_date: NaiveDate,
        length: u32,
    ) -> Result<InitialSetup, PmsError> {
        let query = InitialSetupQuery { start_date, length };
        let builder = self
            .request(Method::GET, "reservations/initial-setup/")?
            .query(&query);
        self.send(builder).await
    }

    pub async fn availability(
        &self,
        request: &AvailabilityRequest,
    ) -> Result<AvailabilityResponse, PmsError> {
        let builder = self
            .request(Method::POST, "reservations/availability/")?
            .json(request);
        self.send(builder).await
    }

    pub async fn pricing(&self, arrangement: &Arrangement) -> Result<Vec<NightlyPricing>, PmsError> {
        let body = PricingRequest {
            selected_arrangement: arrangement.clone(),
        };
        let builder = self
            .request(Method::POST, "reservations/pricing/")?
            .json(&body);
        self.send(builder).await
    }

    pub async fn book(&self, request: &BookingRequest) -> Result<serde_json::Value, PmsError> {
        let builder = self
            .request(Method::POST, "reservations/book/")?
            .json(request);
        self.send(builder).await
    }

    async fn priced(
        &self,
        arrangement: Option<Arrangement>,
    ) -> Result<Option<PricedArrangement>, PmsError> {
        match arrangement {
            Some(arrangement) => {
                let pricing = self.pricing(&arrangement).await?;
                Ok(Some(PricedArrangement {
                    arrangement,
                    pricing,
                }))
            }
            None => Ok(None),
        }
    }

    /// Fetches the breakfast and half board variants of a query side by side.
    ///
    /// Both availability calls run in parallel, then both pricing calls. A
    /// failure of any call fails the whole fetch.
    pub async fn arrangement_options(
        &self,
        query: &ArrangementQuery,
    ) -> Result<ArrangementOptions, PmsError> {
        let breakfast_request = query.availability_request(false);
        let halfboard_request = query.availability_request(true);

        let (breakfast, halfboard) = futures::try_join!(
            self.availability(&breakfast_request),
            self.availability(&halfboard_request)
        )?;

        let breakfast =
            breakfast.into_arrangement(query.length, query.travel_mode, BoardType::Breakfast);
        let halfboard =
            halfboard.into_arrangement(query.length, query.travel_mode, BoardType::HalfBoard);

        if breakfast.is_none() && halfboard.is_none() {
            log::info!(
                "No arrangement for {} nights from {} ({} guests)",
                query.length,
                query.start_date,
                query.guests.total()
            );
            return Err(PmsError::NoArrangement);
        }

        let (breakfast, halfboard) =
            futures::try_join!(self.priced(breakfast), self.priced(halfboard))?;

        Ok(ArrangementOptions {
            breakfast,
            halfboard,
        })
    }
}
