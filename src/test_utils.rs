//! Test utilities: a scripted prediction service and payload builders
//!
//! [`ScriptedService`] answers each call from a script registered up front,
//! optionally after a delay, so tests can stage overlapping requests and
//! out-of-order arrivals deterministically under paused tokio time.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use crate::provider::PredictionService;
use crate::types::{
    ClassificationEntry, Compound, Driver, DriverStrategy, PredictRequest, PredictResponse,
    RaceDetail, RaceKey, RaceSummary, RadioMessage,
};
use crate::{Operation, Result, StrategistError};

/// One scripted answer.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    delay: Duration,
    outcome: Outcome<T>,
}

#[derive(Debug, Clone)]
enum Outcome<T> {
    Ok(T),
    Transport(String),
    Contract(String),
}

impl<T> Reply<T> {
    pub fn ok(value: T) -> Self {
        Self { delay: Duration::ZERO, outcome: Outcome::Ok(value) }
    }

    pub fn transport(reason: &str) -> Self {
        Self { delay: Duration::ZERO, outcome: Outcome::Transport(reason.to_string()) }
    }

    pub fn contract(details: &str) -> Self {
        Self { delay: Duration::ZERO, outcome: Outcome::Contract(details.to_string()) }
    }

    /// Answer only after `delay` has elapsed.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn resolve(self, operation: Operation) -> Result<T> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.outcome {
            Outcome::Ok(value) => Ok(value),
            Outcome::Transport(reason) => Err(StrategistError::transport(operation, reason)),
            Outcome::Contract(details) => Err(StrategistError::contract(operation, details)),
        }
    }
}

/// In-memory [`PredictionService`] driven by registered replies.
///
/// Race and strategy replies are keyed and reused on every call. Prediction
/// replies are queued and consumed in order. Unscripted calls fail as transport
/// errors.
#[derive(Debug, Default)]
pub struct ScriptedService {
    calendars: Mutex<HashMap<u32, Reply<Vec<RaceSummary>>>>,
    races: Mutex<HashMap<RaceKey, Reply<RaceDetail>>>,
    strategies: Mutex<HashMap<RaceKey, Reply<Vec<DriverStrategy>>>>,
    predictions: Mutex<VecDeque<Reply<PredictResponse>>>,
    requests: Mutex<Vec<PredictRequest>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_races(&self, year: u32, reply: Reply<Vec<RaceSummary>>) -> &Self {
        self.calendars.lock().unwrap().insert(year, reply);
        self
    }

    pub fn on_race(&self, key: RaceKey, reply: Reply<RaceDetail>) -> &Self {
        self.races.lock().unwrap().insert(key, reply);
        self
    }

    pub fn on_strategy(&self, key: RaceKey, reply: Reply<Vec<DriverStrategy>>) -> &Self {
        self.strategies.lock().unwrap().insert(key, reply);
        self
    }

    pub fn on_predict(&self, reply: Reply<PredictResponse>) -> &Self {
        self.predictions.lock().unwrap().push_back(reply);
        self
    }

    /// Every prediction request received so far.
    pub fn predict_requests(&self) -> Vec<PredictRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn not_scripted<T>(operation: Operation) -> Reply<T> {
    Reply { delay: Duration::ZERO, outcome: Outcome::Transport(format!("{operation} not scripted")) }
}

#[async_trait::async_trait]
impl PredictionService for ScriptedService {
    async fn races(&self, year: u32) -> Result<Vec<RaceSummary>> {
        let reply = self.calendars.lock().unwrap().get(&year).cloned();
        reply.unwrap_or_else(|| not_scripted(Operation::RaceList)).resolve(Operation::RaceList).await
    }

    async fn race(&self, key: RaceKey) -> Result<RaceDetail> {
        let reply = self.races.lock().unwrap().get(&key).cloned();
        reply.unwrap_or_else(|| not_scripted(Operation::RaceLoad)).resolve(Operation::RaceLoad).await
    }

    async fn strategy(&self, key: RaceKey) -> Result<Vec<DriverStrategy>> {
        let reply = self.strategies.lock().unwrap().get(&key).cloned();
        reply
            .unwrap_or_else(|| not_scripted(Operation::StrategyLoad))
            .resolve(Operation::StrategyLoad)
            .await
    }

    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.predictions.lock().unwrap().pop_front();
        reply
            .unwrap_or_else(|| not_scripted(Operation::Simulation))
            .resolve(Operation::Simulation)
            .await
    }
}

/// Driver with neutral strategy parameters.
pub fn driver(code: &str, grid: u32) -> Driver {
    Driver {
        code: code.to_string(),
        name: None,
        team: format!("{code} Racing"),
        grid,
        start_compound: Compound::Medium,
        stops: 1,
        pace_delta: 0.0,
        consistency: 0.0,
    }
}

/// Dry race detail with the given drivers.
pub fn race_detail(drivers: Vec<Driver>) -> RaceDetail {
    RaceDetail { drivers, is_wet: false, circuit_info: None, year: None, round: None, event: None }
}

/// Prediction report with a classification given as `(code, rank, start)`.
pub fn report(rows: &[(&str, u32, u32)], story: &[&str], radio: Vec<RadioMessage>) -> PredictResponse {
    PredictResponse::Report {
        classification: rows
            .iter()
            .map(|&(code, rank, start)| ClassificationEntry::new(code, rank, start))
            .collect(),
        story: story.iter().map(|line| line.to_string()).collect(),
        radio,
    }
}
