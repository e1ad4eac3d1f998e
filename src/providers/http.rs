//! HTTP prediction service client

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::provider::PredictionService;
use crate::types::{
    DriverStrategy, PredictRequest, PredictResponse, RaceDetail, RaceKey, RaceSummary,
};
use crate::{Operation, Result, StrategistError};

/// Prediction service reached over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpService {
    client: Client,
    base_url: String,
}

impl HttpService {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| StrategistError::config(format!("HTTP client: {e}")))?;

        debug!("HTTP prediction service at {}", config.base_url);
        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, operation: Operation, path: &str) -> Result<T> {
        trace!("GET {}", path);
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| send_failed(operation, e))?;
        decode(operation, response).await
    }
}

fn send_failed(operation: Operation, error: reqwest::Error) -> StrategistError {
    let reason = if error.is_timeout() {
        "request timed out"
    } else if error.is_connect() {
        "service unreachable"
    } else {
        "request failed"
    };
    StrategistError::transport_with_source(operation, reason, Box::new(error))
}

/// Map the status to a transport failure, the body to a contract violation.
async fn decode<T: DeserializeOwned>(operation: Operation, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(StrategistError::http_status(operation, status.as_u16()));
    }

    let body = response.bytes().await.map_err(|e| send_failed(operation, e))?;
    trace!("{} response: {} bytes", operation, body.len());
    serde_json::from_slice(&body).map_err(|e| StrategistError::contract(operation, e.to_string()))
}

#[async_trait::async_trait]
impl PredictionService for HttpService {
    async fn races(&self, year: u32) -> Result<Vec<RaceSummary>> {
        self.get(Operation::RaceList, &format!("/races/{year}")).await
    }

    async fn race(&self, key: RaceKey) -> Result<RaceDetail> {
        self.get(Operation::RaceLoad, &format!("/race/{}/{}", key.year, key.round)).await
    }

    async fn strategy(&self, key: RaceKey) -> Result<Vec<DriverStrategy>> {
        self.get(Operation::StrategyLoad, &format!("/race/{}/{}/strategy", key.year, key.round))
            .await
    }

    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse> {
        let operation = Operation::Simulation;
        trace!("POST /predict ({} drivers)", request.drivers.len());
        let response = self
            .client
            .post(self.url("/predict"))
            .json(request)
            .send()
            .await
            .map_err(|e| send_failed(operation, e))?;
        decode(operation, response).await
    }
}
