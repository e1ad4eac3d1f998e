//! Prediction service trait

use crate::Result;
use crate::types::{DriverStrategy, PredictRequest, PredictResponse, RaceDetail, RaceKey, RaceSummary};

/// The remote prediction service.
///
/// Implementations own transport concerns (URLs, timeouts, decoding) and tag
/// every error with the [`crate::Operation`] it belongs to. Methods take
/// `&self` so a controller can keep several requests in flight at once.
#[async_trait::async_trait]
pub trait PredictionService: Send + Sync + 'static {
    /// `GET /races/{year}`
    async fn races(&self, year: u32) -> Result<Vec<RaceSummary>>;

    /// `GET /race/{year}/{round}`
    async fn race(&self, key: RaceKey) -> Result<RaceDetail>;

    /// `GET /race/{year}/{round}/strategy`
    ///
    /// An empty list is a valid answer: the service has no stint data for
    /// races it only simulates.
    async fn strategy(&self, key: RaceKey) -> Result<Vec<DriverStrategy>>;

    /// `POST /predict`
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse>;
}
