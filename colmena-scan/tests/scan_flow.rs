//! End-to-end scan flows over scripted backends.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{Notify, mpsc};

use colmena_client::ClientError;
use colmena_model::{
    AccessCheckResponse, AccessSnapshot, CheckinReservation, CheckinResponse, EventStatus,
    EventSummary, ReservationStatus, messages,
};
use colmena_scan::{
    CameraControl, CameraError, OutcomePresenter, RejectionReason, ScanConfig, ScanDispatcher,
    ScanOutcome, ScanValidator, Tone,
};

/// Validator whose responses are queued up front. Optionally parks on a
/// `Notify` before answering, to hold a validation in flight.
#[derive(Default)]
struct ScriptedValidator {
    checkin_responses: Mutex<Vec<Result<CheckinResponse, ClientError>>>,
    access_responses: Mutex<Vec<Result<AccessCheckResponse, ClientError>>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl ScriptedValidator {
    fn with_checkins(responses: Vec<Result<CheckinResponse, ClientError>>) -> Self {
        Self {
            checkin_responses: Mutex::new(responses),
            ..Self::default()
        }
    }

    fn with_access(responses: Vec<Result<AccessCheckResponse, ClientError>>) -> Self {
        Self {
            access_responses: Mutex::new(responses),
            ..Self::default()
        }
    }

    fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn park(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl ScanValidator for ScriptedValidator {
    async fn checkin(&self, _code: &str) -> Result<CheckinResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.park().await;
        self.checkin_responses.lock().remove(0)
    }

    async fn check_access(&self, _code: &str) -> Result<AccessCheckResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.park().await;
        self.access_responses.lock().remove(0)
    }
}

#[derive(Default)]
struct RecordingCamera {
    starts: AtomicUsize,
    stops: AtomicUsize,
    /// One-shot: the first `stop` parks here until notified.
    stop_gate: Mutex<Option<Arc<Notify>>>,
}

#[async_trait]
impl CameraControl for RecordingCamera {
    async fn start(&self) -> Result<(), CameraError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) {
        let gate = self.stop_gate.lock().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct RecordingPresenter {
    outcomes: Mutex<Vec<ScanOutcome>>,
}

#[async_trait]
impl OutcomePresenter for RecordingPresenter {
    async fn present(&self, outcome: &ScanOutcome) {
        self.outcomes.lock().push(outcome.clone());
    }
}

fn build(
    validator: ScriptedValidator,
) -> (
    ScanDispatcher<ScriptedValidator, RecordingCamera, RecordingPresenter>,
    Arc<RecordingCamera>,
    Arc<RecordingPresenter>,
) {
    let camera = Arc::new(RecordingCamera::default());
    let presenter = Arc::new(RecordingPresenter::default());
    let dispatcher = ScanDispatcher::new(
        validator,
        Arc::clone(&camera),
        Arc::clone(&presenter),
        ScanConfig::default(),
    );
    (dispatcher, camera, presenter)
}

fn approved() -> CheckinResponse {
    CheckinResponse {
        ok: true,
        message: messages::OK.into(),
        reservation_id: Some(7),
        used_at: None,
        reservation: Some(CheckinReservation {
            id: 7,
            first_name: "Maria".into(),
            last_name: "Diaz".into(),
            status: ReservationStatus::CheckedIn,
            used_at: None,
        }),
    }
}

fn already_used() -> CheckinResponse {
    CheckinResponse {
        ok: false,
        message: messages::ALREADY_USED.into(),
        reservation_id: Some(7),
        used_at: Some(chrono::Utc::now()),
        reservation: None,
    }
}

fn access_granted() -> AccessCheckResponse {
    AccessCheckResponse {
        ok: true,
        message: messages::ACCESS_GRANTED.into(),
        event: Some(EventSummary {
            id: 3,
            name: "Launch".into(),
            status: EventStatus::Active,
            start_at: chrono::Utc::now(),
            end_at: chrono::Utc::now(),
        }),
        access: Some(AccessSnapshot {
            id: 10,
            event_id: 3,
            label: Some("Staff".into()),
            scan_count: 5,
            last_scan_at: Some(chrono::Utc::now()),
            is_enabled: true,
        }),
    }
}

#[tokio::test(start_paused = true)]
async fn checkin_scan_runs_full_cycle() {
    let (dispatcher, camera, presenter) =
        build(ScriptedValidator::with_checkins(vec![Ok(approved())]));

    dispatcher.start().await;
    assert_eq!(camera.starts.load(Ordering::SeqCst), 1);

    dispatcher
        .handle_code("https://club.example/checkin/R7KQ")
        .await;

    // Camera paused exactly once for the validation.
    assert_eq!(camera.stops.load(Ordering::SeqCst), 1);

    let outcomes = presenter.outcomes.lock().clone();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].tone(), Tone::Success);
    match &outcomes[0] {
        ScanOutcome::CheckinApproved { full_name, code, .. } => {
            assert_eq!(full_name, "Maria Diaz");
            assert_eq!(code, "R7KQ");
        }
        other => panic!("unexpected outcome {other:?}"),
    }

    // Restart fires on the fixed delay, not on dialog dismissal.
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_millis(700)).await;
    tokio::task::yield_now().await;
    assert_eq!(camera.starts.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn second_scan_of_used_reservation_warns() {
    let (dispatcher, _camera, presenter) = build(ScriptedValidator::with_checkins(vec![
        Ok(approved()),
        Ok(already_used()),
    ]));

    dispatcher.handle_code("R7KQ").await;
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_millis(3000)).await;
    tokio::task::yield_now().await;
    dispatcher.handle_code("R7KQ").await;

    let outcomes = presenter.outcomes.lock().clone();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[1].tone(), Tone::Warning);
    match &outcomes[1] {
        ScanOutcome::CheckinRejected { reason, .. } => {
            assert_eq!(*reason, RejectionReason::AlreadyUsed);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn access_url_reports_event_and_count() {
    let (dispatcher, _camera, presenter) =
        build(ScriptedValidator::with_access(vec![Ok(access_granted())]));

    dispatcher
        .handle_code("https://club.example/access/STAFF01")
        .await;

    let outcomes = presenter.outcomes.lock().clone();
    assert_eq!(outcomes.len(), 1);
    match &outcomes[0] {
        ScanOutcome::AccessGranted {
            event_name,
            scan_count,
            code,
            ..
        } => {
            assert_eq!(event_name, "Launch");
            assert_eq!(*scan_count, 5);
            assert_eq!(code, "STAFF01");
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test]
async fn concurrent_frames_admit_exactly_one_validation() {
    let gate = Arc::new(Notify::new());
    let validator =
        ScriptedValidator::with_checkins(vec![Ok(approved())]).gated(Arc::clone(&gate));
    let (dispatcher, _camera, presenter) = build(validator);

    let first = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            dispatcher.handle_code("AAA").await;
        })
    };
    // Let the first frame reach the parked validation.
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert!(dispatcher.status().busy);

    // A different code arrives while the first is in flight.
    dispatcher.handle_code("BBB").await;

    gate.notify_one();
    first.await.unwrap();

    let outcomes = presenter.outcomes.lock().clone();
    assert_eq!(outcomes.len(), 1);
    match &outcomes[0] {
        ScanOutcome::CheckinApproved { code, .. } => assert_eq!(code, "AAA"),
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[tokio::test]
async fn manual_restart_refused_while_validating() {
    let gate = Arc::new(Notify::new());
    let validator =
        ScriptedValidator::with_checkins(vec![Ok(approved())]).gated(Arc::clone(&gate));
    let (dispatcher, camera, _presenter) = build(validator);

    let scan = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            dispatcher.handle_code("AAA").await;
        })
    };
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }

    dispatcher.restart_camera().await;
    // Refused: no extra stop, no start.
    assert_eq!(camera.stops.load(Ordering::SeqCst), 1);
    assert_eq!(camera.starts.load(Ordering::SeqCst), 0);

    gate.notify_one();
    scan.await.unwrap();
}

#[tokio::test]
async fn scan_refused_while_camera_restarting() {
    let stop_gate = Arc::new(Notify::new());
    let validator = ScriptedValidator::with_checkins(vec![Ok(approved())]);
    let camera = Arc::new(RecordingCamera::default());
    *camera.stop_gate.lock() = Some(Arc::clone(&stop_gate));
    let presenter = Arc::new(RecordingPresenter::default());
    let dispatcher = ScanDispatcher::new(
        validator,
        Arc::clone(&camera),
        Arc::clone(&presenter),
        ScanConfig::default(),
    );

    let restart = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            dispatcher.restart_camera().await;
        })
    };
    // Let the restart reach the parked stop.
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }

    // A frame decoded mid-restart must not start a validation the restart
    // would then race.
    dispatcher.handle_code("AAA").await;
    assert!(presenter.outcomes.lock().is_empty());

    stop_gate.notify_one();
    restart.await.unwrap();
    assert_eq!(camera.starts.load(Ordering::SeqCst), 1);

    // Gate reopens once the restart completes.
    dispatcher.handle_code("AAA").await;
    assert_eq!(presenter.outcomes.lock().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn frame_stream_collapses_duplicates() {
    let (dispatcher, _camera, presenter) =
        build(ScriptedValidator::with_checkins(vec![Ok(approved())]));

    let (tx, rx) = mpsc::channel(8);
    let intake = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            dispatcher.run(rx).await;
        })
    };

    // The same badge decoded on three consecutive frames.
    for _ in 0..3 {
        tx.send("https://club.example/checkin/R7KQ".to_string())
            .await
            .unwrap();
    }
    drop(tx);
    intake.await.unwrap();

    // Spawned frame tasks settle under the paused clock.
    tokio::time::advance(Duration::from_millis(100)).await;
    assert_eq!(presenter.outcomes.lock().len(), 1);
    dispatcher.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn transport_error_still_releases_the_gate() {
    let (dispatcher, camera, presenter) = build(ScriptedValidator::with_checkins(vec![
        Err(ClientError::Status {
            status: 503,
            message: "Request failed (503)".into(),
        }),
        Ok(approved()),
    ]));

    dispatcher.handle_code("AAA").await;
    let outcomes = presenter.outcomes.lock().clone();
    assert!(matches!(&outcomes[0], ScanOutcome::Failure { .. }));
    assert_eq!(outcomes[0].tone(), Tone::Error);

    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_millis(700)).await;
    tokio::task::yield_now().await;
    assert_eq!(camera.starts.load(Ordering::SeqCst), 1);

    // Gate is open again for the next badge.
    dispatcher.handle_code("BBB").await;
    assert_eq!(presenter.outcomes.lock().len(), 2);
}
