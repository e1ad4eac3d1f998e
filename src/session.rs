//! Session controller: race selection, driver edits, weather and simulation.
//!
//! The controller owns the current [`RaceSession`] and publishes every change
//! through a watch channel as a [`SessionState`] snapshot. A host UI
//! subscribes to those snapshots; nothing here pushes into views.
//!
//! ## Overlapping loads
//!
//! Every `select_race` call takes a ticket from a monotonically increasing
//! generation counter. A response is committed only if its ticket is still the
//! newest when it arrives, so a slow load for round 1 can never overwrite a
//! session that has since moved on to round 2. Simulations are tied to the
//! generation of the session they were computed from in the same way.
//!
//! ## Failures
//!
//! Transport and contract failures leave the session in its last-known-good
//! state, record a one-shot [`Notice`], and are returned to the caller. Every
//! operation is safe to retry.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};

use crate::classification::annotate;
use crate::config::ClientConfig;
use crate::layout::StrategyLayout;
use crate::provider::PredictionService;
use crate::radio::RadioScheduler;
use crate::types::{DriverEdit, Prediction, RaceKey, RaceSession, RaceSummary};
use crate::validation::{validate_classification, validate_race_detail, validate_strategy};
use crate::{Notice, Result, StrategistError};

/// Snapshot published after every state change.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// The loaded race, if any
    pub session: Option<Arc<RaceSession>>,
    /// Failure waiting to be shown to the user
    pub notice: Option<Notice>,
    in_flight: usize,
}

impl SessionState {
    /// Whether any network operation is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

/// What happened to a completed network operation's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// The result is now part of the session
    Applied,
    /// A newer race selection superseded the request; the result was dropped
    Superseded,
}

/// Keeps the loading flag raised for as long as it lives.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<SessionState>,
}

impl<'a> LoadingGuard<'a> {
    fn enter(state: &'a watch::Sender<SessionState>) -> Self {
        state.send_modify(|s| s.in_flight += 1);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.in_flight = s.in_flight.saturating_sub(1));
    }
}

/// Owns a race session and mediates every call to the prediction service.
pub struct SessionController<S: PredictionService> {
    service: S,
    state: watch::Sender<SessionState>,
    generation: AtomicU64,
    radio: RadioScheduler,
}

impl<S: PredictionService> SessionController<S> {
    /// Create an empty controller. Must be called within a tokio runtime, since
    /// the radio scheduler task is spawned here.
    pub fn new(service: S, config: &ClientConfig) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            service,
            state,
            generation: AtomicU64::new(0),
            radio: RadioScheduler::spawn(config.radio_display),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Current snapshot.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// The loaded session, if any.
    pub fn session(&self) -> Option<Arc<RaceSession>> {
        self.state.borrow().session.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Stream of snapshots, starting with the current one.
    pub fn subscribe(&self) -> impl Stream<Item = SessionState> + 'static {
        WatchStream::new(self.state.subscribe())
    }

    /// Consume the pending notice, if any.
    pub fn take_notice(&self) -> Option<Notice> {
        let mut taken = None;
        self.state.send_if_modified(|s| {
            taken = s.notice.take();
            taken.is_some()
        });
        taken
    }

    /// Team radio feed.
    pub fn radio(&self) -> &RadioScheduler {
        &self.radio
    }

    /// Tyre timeline of the loaded session.
    pub fn timeline(&self) -> Option<StrategyLayout> {
        self.state.borrow().session.as_ref().map(|session| session.timeline())
    }

    /// List the races of a season. Does not touch the session.
    pub async fn list_races(&self, year: u32) -> Result<Vec<RaceSummary>> {
        debug!("Listing races for {}", year);
        match self.service.races(year).await {
            Ok(races) => {
                debug!("{} races in {}", races.len(), year);
                Ok(races)
            }
            Err(err) => {
                self.report(&err);
                Err(err)
            }
        }
    }

    /// Load a race: detail and strategy are fetched concurrently and committed
    /// together as a fresh session, drivers in grid order.
    pub async fn select_race(&self, key: RaceKey) -> Result<Commit> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _loading = LoadingGuard::enter(&self.state);
        info!("Loading {} (generation {})", key, ticket);

        let fetched = tokio::try_join!(self.service.race(key), self.service.strategy(key))
            .and_then(|(detail, strategy)| {
                validate_race_detail(&detail)?;
                validate_strategy(&strategy)?;
                Ok((detail, strategy))
            });

        let (detail, strategy) = match fetched {
            Ok(payloads) => payloads,
            Err(err) => {
                if self.generation.load(Ordering::SeqCst) != ticket {
                    debug!("Dropping failure of superseded load {}: {}", key, err);
                    return Ok(Commit::Superseded);
                }
                self.report(&err);
                return Err(err);
            }
        };

        let session = Arc::new(RaceSession::new(key, ticket, detail, strategy));
        // The ticket is checked under the channel lock so a newer commit can
        // never be overwritten by this one.
        let applied = self.state.send_if_modified(|s| {
            let newest = self.generation.load(Ordering::SeqCst) == ticket;
            let newer_committed =
                s.session.as_ref().is_some_and(|current| current.generation() > ticket);
            if !newest || newer_committed {
                return false;
            }
            s.session = Some(Arc::clone(&session));
            true
        });

        if !applied {
            debug!("Discarding {} result from superseded generation {}", key, ticket);
            return Ok(Commit::Superseded);
        }

        info!(
            "Loaded {}: {} drivers, {} strategies",
            key,
            session.drivers().len(),
            session.strategy().len()
        );
        Ok(Commit::Applied)
    }

    /// Replace one field of the driver at `index`.
    pub fn update_driver(&self, index: usize, edit: DriverEdit) -> Result<()> {
        self.modify_session(|session| session.with_driver_edit(index, edit))?;
        debug!("Driver {} edited: {:?}", index, edit);
        Ok(())
    }

    /// Flip the weather flag; returns the new value.
    pub fn toggle_weather(&self) -> Result<bool> {
        let session = self.modify_session(|session| Ok(session.with_weather_toggled()))?;
        debug!("Conditions now {}", session.conditions());
        Ok(session.is_wet())
    }

    /// Submit the current drivers and weather for a prediction.
    ///
    /// The result lands on whatever the session looks like when it arrives
    /// (edits made meanwhile are kept), unless a different race was loaded in
    /// the meantime.
    pub async fn run_simulation(&self) -> Result<Commit> {
        let session = self.session().ok_or(StrategistError::NoSession)?;
        let generation = session.generation();
        let request = session.prediction_request();
        let _loading = LoadingGuard::enter(&self.state);
        info!("Simulating {} ({} drivers, wet: {})", session.key(), request.drivers.len(), request.weather.is_wet);

        let result = self.service.predict(&request).await.and_then(|response| {
            let (classification, story, radio) = response.into_parts();
            validate_classification(&classification)?;
            Ok((classification, story, radio))
        });

        let (classification, story, radio) = match result {
            Ok(parts) => parts,
            Err(err) => {
                if self.current_generation() != Some(generation) {
                    debug!("Dropping failure of superseded simulation: {}", err);
                    return Ok(Commit::Superseded);
                }
                self.report(&err);
                return Err(err);
            }
        };

        let prediction = Prediction { classification: annotate(&classification), story };
        let applied = self.state.send_if_modified(|s| match &s.session {
            Some(current) if current.generation() == generation => {
                s.session = Some(Arc::new(current.with_prediction(prediction)));
                true
            }
            _ => false,
        });

        if !applied {
            debug!("Discarding simulation for superseded generation {}", generation);
            return Ok(Commit::Superseded);
        }

        info!("Simulation committed for {}", session.key());
        self.radio.push(radio);
        Ok(Commit::Applied)
    }

    fn current_generation(&self) -> Option<u64> {
        self.state.borrow().session.as_ref().map(|session| session.generation())
    }

    /// Apply a pure transformation to the session and publish the result.
    fn modify_session<F>(&self, transform: F) -> Result<Arc<RaceSession>>
    where
        F: FnOnce(&RaceSession) -> Result<RaceSession>,
    {
        let mut outcome = Err(StrategistError::NoSession);
        self.state.send_if_modified(|s| {
            let Some(current) = s.session.as_ref() else {
                return false;
            };
            match transform(current) {
                Ok(next) => {
                    let next = Arc::new(next);
                    s.session = Some(Arc::clone(&next));
                    outcome = Ok(next);
                    true
                }
                Err(err) => {
                    outcome = Err(err);
                    false
                }
            }
        });
        outcome
    }

    fn report(&self, err: &StrategistError) {
        warn!("{}", err);
        if let Some(notice) = Notice::from_error(err) {
            self.state.send_modify(|s| s.notice = Some(notice));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::Movement;
    use crate::test_utils::{Reply, ScriptedService, driver, race_detail, report};
    use crate::types::{Compound, DriverStrategy, RadioMessage, Stint, StoryTone};
    use crate::{Operation, StrategistError};
    use std::time::Duration;

    fn controller(service: ScriptedService) -> SessionController<ScriptedService> {
        let _ = tracing_subscriber::fmt::try_init();
        SessionController::new(service, &ClientConfig::default())
    }

    fn round(n: u32) -> RaceKey {
        RaceKey::new(2023, n)
    }

    fn scripted_round(service: &ScriptedService, n: u32, codes: &[&str], delay: Duration) {
        let drivers =
            codes.iter().enumerate().map(|(i, code)| driver(code, i as u32 + 1)).collect();
        service
            .on_race(round(n), Reply::ok(race_detail(drivers)).after(delay))
            .on_strategy(round(n), Reply::ok(Vec::new()).after(delay));
    }

    #[tokio::test(start_paused = true)]
    async fn select_race_sorts_by_grid_and_loads_strategy() {
        let service = ScriptedService::new();
        let strategy = vec![DriverStrategy {
            driver: "1".into(),
            stints: vec![Stint::new(Compound::Soft, 1, 20), Stint::new(Compound::Medium, 21, 57)],
        }];
        service
            .on_race(round(1), Reply::ok(race_detail(vec![driver("B", 2), driver("A", 1)])))
            .on_strategy(round(1), Reply::ok(strategy));
        let controller = controller(service);

        assert_eq!(controller.select_race(round(1)).await.unwrap(), Commit::Applied);

        let session = controller.session().unwrap();
        let codes: Vec<_> = session.drivers().iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B"]);
        assert!(session.prediction().is_none());
        assert_eq!(controller.timeline().unwrap().max_laps, 57);
        assert!(!controller.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn later_selection_wins_over_slow_earlier_one() {
        let service = ScriptedService::new();
        scripted_round(&service, 1, &["R1A", "R1B"], Duration::from_millis(500));
        scripted_round(&service, 2, &["R2A", "R2B"], Duration::from_millis(50));
        let controller = controller(service);

        let (first, second) =
            tokio::join!(controller.select_race(round(1)), controller.select_race(round(2)));

        assert_eq!(first.unwrap(), Commit::Superseded);
        assert_eq!(second.unwrap(), Commit::Applied);
        let session = controller.session().unwrap();
        assert_eq!(session.key(), round(2));
        assert_eq!(session.drivers()[0].code, "R2A");
        assert!(!controller.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_failure_raises_no_notice() {
        let service = ScriptedService::new();
        service
            .on_race(round(1), Reply::transport("connection reset").after(Duration::from_millis(500)))
            .on_strategy(round(1), Reply::ok(Vec::new()).after(Duration::from_millis(500)));
        scripted_round(&service, 2, &["R2A"], Duration::from_millis(50));
        let controller = controller(service);

        let (first, second) =
            tokio::join!(controller.select_race(round(1)), controller.select_race(round(2)));

        assert_eq!(second.unwrap(), Commit::Applied);
        assert_eq!(first.unwrap(), Commit::Superseded);
        assert_eq!(controller.session().unwrap().key(), round(2));
        assert!(controller.take_notice().is_none());
        assert!(!controller.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_load_never_replaces_newer_session() {
        let service = ScriptedService::new();
        scripted_round(&service, 1, &["R1A"], Duration::from_millis(50));
        scripted_round(&service, 2, &["R2A"], Duration::ZERO);
        let controller = Arc::new(controller(service));

        // Round 1 takes its ticket first, round 2 resolves while it is in flight.
        let slow = Arc::clone(&controller);
        let first = tokio::spawn(async move { slow.select_race(round(1)).await });
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(controller.select_race(round(2)).await.unwrap(), Commit::Applied);

        assert_eq!(first.await.unwrap().unwrap(), Commit::Superseded);
        let session = controller.session().unwrap();
        assert_eq!(session.key(), round(2));
        assert_eq!(session.generation(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn loading_flag_is_raised_while_in_flight() {
        let service = ScriptedService::new();
        scripted_round(&service, 1, &["A"], Duration::from_secs(1));
        let controller = Arc::new(controller(service));

        let background = Arc::clone(&controller);
        let load = tokio::spawn(async move { background.select_race(round(1)).await });
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(controller.is_loading());

        load.await.unwrap().unwrap();
        assert!(!controller.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_load_keeps_previous_session_and_raises_notice() {
        let service = ScriptedService::new();
        scripted_round(&service, 1, &["A", "B"], Duration::ZERO);
        service
            .on_race(round(2), Reply::ok(race_detail(vec![driver("X", 1)])))
            .on_strategy(round(2), Reply::transport("connection reset"));
        let controller = controller(service);
        controller.select_race(round(1)).await.unwrap();

        let err = controller.select_race(round(2)).await.unwrap_err();
        assert_eq!(err.operation(), Some(Operation::StrategyLoad));
        assert_eq!(controller.session().unwrap().key(), round(1));
        assert!(!controller.is_loading());

        let notice = controller.take_notice().unwrap();
        assert_eq!(notice.operation, Operation::StrategyLoad);
        assert!(controller.take_notice().is_none(), "notices are one-shot");
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_race_payload_is_a_contract_failure() {
        let service = ScriptedService::new();
        service
            .on_race(round(1), Reply::ok(race_detail(vec![driver("A", 1), driver("B", 1)])))
            .on_strategy(round(1), Reply::ok(Vec::new()));
        let controller = controller(service);

        let err = controller.select_race(round(1)).await.unwrap_err();
        assert!(matches!(err, StrategistError::Contract { operation: Operation::RaceLoad, .. }));
        assert!(controller.session().is_none());
        assert!(controller.take_notice().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_load_is_retriable() {
        let service = ScriptedService::new();
        service
            .on_race(round(1), Reply::transport("service unreachable"))
            .on_strategy(round(1), Reply::ok(Vec::new()));
        let controller = controller(service);
        assert!(controller.select_race(round(1)).await.is_err());

        controller.service().on_race(round(1), Reply::ok(race_detail(vec![driver("A", 1)])));
        assert_eq!(controller.select_race(round(1)).await.unwrap(), Commit::Applied);
    }

    #[tokio::test(start_paused = true)]
    async fn edits_require_a_session() {
        let controller = controller(ScriptedService::new());
        assert!(matches!(
            controller.update_driver(0, DriverEdit::Stops(2)),
            Err(StrategistError::NoSession)
        ));
        assert!(matches!(controller.toggle_weather(), Err(StrategistError::NoSession)));
        assert!(matches!(controller.run_simulation().await, Err(StrategistError::NoSession)));
        assert!(controller.take_notice().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn update_driver_replaces_one_entry() {
        let service = ScriptedService::new();
        scripted_round(&service, 1, &["A", "B", "C"], Duration::ZERO);
        let controller = controller(service);
        controller.select_race(round(1)).await.unwrap();
        let before = controller.session().unwrap();

        controller.update_driver(1, DriverEdit::PaceDelta(-0.45)).unwrap();
        let after = controller.session().unwrap();

        assert_eq!(after.drivers()[1].pace_delta, -0.45);
        assert_eq!(before.drivers()[1].pace_delta, 0.0);
        assert!(Arc::ptr_eq(&before.drivers()[0], &after.drivers()[0]));
        assert!(Arc::ptr_eq(&before.drivers()[2], &after.drivers()[2]));

        let err = controller.update_driver(3, DriverEdit::Stops(1)).unwrap_err();
        assert!(matches!(err, StrategistError::DriverIndex { index: 3, len: 3 }));
        assert!(controller.take_notice().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn weather_toggle_is_sent_with_simulation() {
        let service = ScriptedService::new();
        scripted_round(&service, 1, &["A", "B"], Duration::ZERO);
        service.on_predict(Reply::ok(report(&[("A", 1, 1), ("B", 2, 2)], &[], Vec::new())));
        let controller = controller(service);
        controller.select_race(round(1)).await.unwrap();

        assert!(controller.toggle_weather().unwrap());
        assert!(!controller.toggle_weather().unwrap());
        assert!(controller.toggle_weather().unwrap());
        controller.run_simulation().await.unwrap();

        let requests = controller.service().predict_requests();
        assert!(requests[0].weather.is_wet);
        assert_eq!(requests[0].drivers.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn simulation_annotates_classification() {
        let service = ScriptedService::new();
        scripted_round(&service, 1, &["A", "B"], Duration::ZERO);
        service.on_predict(Reply::ok(report(
            &[("B", 1, 2), ("A", 2, 1)],
            &["B takes the win", "A struggles on the hards"],
            Vec::new(),
        )));
        let controller = controller(service);
        controller.select_race(round(1)).await.unwrap();

        assert_eq!(controller.run_simulation().await.unwrap(), Commit::Applied);

        let session = controller.session().unwrap();
        let prediction = session.prediction().unwrap();
        let classification = &prediction.classification;
        assert_eq!(classification.get("B").unwrap().gain_loss, 1);
        assert_eq!(classification.get("A").unwrap().movement(), Movement::Lost(1));
        assert_eq!(classification.climber().unwrap().code(), "B");
        let tones: Vec<_> = prediction.story_lines().map(|(tone, _)| tone).collect();
        assert_eq!(tones, vec![StoryTone::Win, StoryTone::Trouble]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_simulation_keeps_previous_prediction() {
        let service = ScriptedService::new();
        scripted_round(&service, 1, &["A", "B"], Duration::ZERO);
        service
            .on_predict(Reply::ok(report(&[("B", 1, 2), ("A", 2, 1)], &[], Vec::new())))
            .on_predict(Reply::transport("model not loaded"));
        let controller = controller(service);
        controller.select_race(round(1)).await.unwrap();
        controller.run_simulation().await.unwrap();

        let err = controller.run_simulation().await.unwrap_err();
        assert!(err.is_retryable());
        let session = controller.session().unwrap();
        assert_eq!(session.prediction().unwrap().classification.len(), 2);
        assert_eq!(controller.take_notice().unwrap().operation, Operation::Simulation);
        assert!(!controller.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_classification_is_rejected() {
        let service = ScriptedService::new();
        scripted_round(&service, 1, &["A", "B"], Duration::ZERO);
        service.on_predict(Reply::ok(report(&[("A", 1, 1), ("B", 1, 2)], &[], Vec::new())));
        let controller = controller(service);
        controller.select_race(round(1)).await.unwrap();

        let err = controller.run_simulation().await.unwrap_err();
        assert!(matches!(err, StrategistError::Contract { operation: Operation::Simulation, .. }));
        assert!(controller.session().unwrap().prediction().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn new_race_clears_prediction_and_supersedes_simulation() {
        let service = ScriptedService::new();
        scripted_round(&service, 1, &["A", "B"], Duration::ZERO);
        scripted_round(&service, 2, &["C", "D"], Duration::from_millis(10));
        service.on_predict(
            Reply::ok(report(&[("B", 1, 2), ("A", 2, 1)], &[], Vec::new()))
                .after(Duration::from_secs(1)),
        );
        let controller = controller(service);
        controller.select_race(round(1)).await.unwrap();

        let (simulation, load) =
            tokio::join!(controller.run_simulation(), controller.select_race(round(2)));

        assert_eq!(load.unwrap(), Commit::Applied);
        assert_eq!(simulation.unwrap(), Commit::Superseded);
        let session = controller.session().unwrap();
        assert_eq!(session.key(), round(2));
        assert!(session.prediction().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn edits_during_simulation_are_kept() {
        let service = ScriptedService::new();
        scripted_round(&service, 1, &["A", "B"], Duration::ZERO);
        service.on_predict(
            Reply::ok(report(&[("A", 1, 1), ("B", 2, 2)], &[], Vec::new()))
                .after(Duration::from_millis(200)),
        );
        let controller = controller(service);
        controller.select_race(round(1)).await.unwrap();

        let edit = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            controller.update_driver(0, DriverEdit::StartCompound(Compound::Hard))
        };
        let (simulation, edited) = tokio::join!(controller.run_simulation(), edit);

        assert_eq!(simulation.unwrap(), Commit::Applied);
        edited.unwrap();
        let session = controller.session().unwrap();
        assert_eq!(session.drivers()[0].start_compound, Compound::Hard);
        assert!(session.prediction().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn radio_batch_reaches_scheduler() {
        let service = ScriptedService::new();
        scripted_round(&service, 1, &["A", "B"], Duration::ZERO);
        service.on_predict(Reply::ok(report(
            &[("B", 1, 2), ("A", 2, 1)],
            &[],
            vec![RadioMessage::new("B", "Push now, gap is 1.2", 33)],
        )));
        let controller = controller(service);
        controller.select_race(round(1)).await.unwrap();
        controller.run_simulation().await.unwrap();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(controller.radio().current().unwrap().driver, "B");
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(controller.radio().current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn race_list_is_passed_through() {
        let service = ScriptedService::new();
        service.on_races(
            2023,
            Reply::ok(vec![RaceSummary {
                round_number: 1,
                event_name: "Bahrain Grand Prix".into(),
                location: Some("Sakhir".into()),
                country: Some("Bahrain".into()),
            }]),
        );
        let controller = controller(service);

        let races = controller.list_races(2023).await.unwrap();
        assert_eq!(races[0].event_name, "Bahrain Grand Prix");
        assert!(controller.session().is_none());
        assert!(!controller.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn undecodable_prediction_raises_notice() {
        let service = ScriptedService::new();
        scripted_round(&service, 1, &["A"], Duration::ZERO);
        service.on_predict(Reply::contract("expected a sequence"));
        let controller = controller(service);
        controller.select_race(round(1)).await.unwrap();

        let err = controller.run_simulation().await.unwrap_err();
        assert!(!err.is_retryable());
        let notice = controller.take_notice().unwrap();
        assert!(notice.to_string().starts_with("Simulation failed."));
    }

    #[tokio::test(start_paused = true)]
    async fn race_list_failure_leaves_session_alone() {
        let service = ScriptedService::new();
        scripted_round(&service, 1, &["A"], Duration::ZERO);
        let controller = controller(service);
        controller.select_race(round(1)).await.unwrap();

        let err = controller.list_races(2022).await.unwrap_err();
        assert_eq!(err.operation(), Some(Operation::RaceList));
        assert_eq!(controller.session().unwrap().key(), round(1));
        assert_eq!(controller.take_notice().unwrap().operation, Operation::RaceList);
    }
}
