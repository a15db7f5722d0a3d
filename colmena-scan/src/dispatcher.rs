use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};
use tracing::{debug, trace, warn};

use crate::camera::CameraControl;
use crate::outcome::ScanOutcome;
use crate::target::ScanTarget;
use crate::validate::ScanValidator;

/// Sink for resolved scans.
///
/// `present` models the blocking acknowledgment dialog: it must not return
/// until the operator has dismissed the outcome. The dispatcher awaits it
/// after re-arming timers are already scheduled, so a slow acknowledgment
/// never stalls the camera restart.
#[async_trait]
pub trait OutcomePresenter: Send + Sync {
    async fn present(&self, outcome: &ScanOutcome);
}

/// Timing knobs for scan admission and recovery.
#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// Suppression window for re-scans of the same code (same badge held
    /// in frame).
    pub cooldown: Duration,
    /// Delay between a validation settling and the camera restart / lock
    /// release.
    pub restart_delay: Duration,
    /// Delay between a validation settling and the last-code display field
    /// clearing. Independent of the lock.
    pub display_clear_delay: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_millis(2500),
            restart_delay: Duration::from_millis(600),
            display_clear_delay: Duration::from_millis(1500),
        }
    }
}

/// UI-facing snapshot of the scan screen state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanStatus {
    /// A validation is currently in flight.
    pub busy: bool,
    /// Most recently accepted code, cleared by timer.
    pub last_code: Option<String>,
    /// Persistent camera failure banner, `None` when the decode loop is
    /// healthy.
    pub camera_error: Option<String>,
}

#[derive(Debug)]
struct LastScan {
    code: String,
    at: Instant,
}

/// Debounce memory and hard lock, mutated only under one mutex so the
/// check-and-set at admission is atomic within a callback turn.
#[derive(Debug, Default)]
struct Admission {
    processing: bool,
    last_scan: Option<LastScan>,
}

struct Inner<V, C, P> {
    validator: V,
    camera: Arc<C>,
    presenter: Arc<P>,
    config: ScanConfig,
    admission: Mutex<Admission>,
    status: Mutex<ScanStatus>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl<V, C, P> Inner<V, C, P>
where
    C: CameraControl,
{
    /// Try to bring the decode loop up, recording the result in the
    /// inline banner state.
    async fn start_camera(&self) {
        match self.camera.start().await {
            Ok(()) => {
                self.status.lock().camera_error = None;
            }
            Err(err) => {
                warn!(error = %err, "camera start failed");
                self.status.lock().camera_error = Some(err.to_string());
            }
        }
    }
}

/// Owns the scan admission gate and drives each accepted scan through
/// validation, presentation, and timed recovery.
///
/// Cheap to clone; clones share one gate, so multiple instances in tests do
/// not interfere with each other only if built separately.
pub struct ScanDispatcher<V, C, P> {
    inner: Arc<Inner<V, C, P>>,
}

impl<V, C, P> Clone for ScanDispatcher<V, C, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, C, P> fmt::Debug for ScanDispatcher<V, C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("ScanDispatcher");
        debug.field("config", &self.inner.config);
        match self.inner.status.try_lock() {
            Some(status) => debug.field("status", &*status),
            None => debug.field("status", &"<locked>"),
        };
        debug.finish()
    }
}

impl<V, C, P> ScanDispatcher<V, C, P>
where
    V: ScanValidator + 'static,
    C: CameraControl + 'static,
    P: OutcomePresenter + 'static,
{
    pub fn new(validator: V, camera: Arc<C>, presenter: Arc<P>, config: ScanConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                validator,
                camera,
                presenter,
                config,
                admission: Mutex::new(Admission::default()),
                status: Mutex::new(ScanStatus::default()),
                tasks: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Screen-mount entry point: bring the camera up. A device or
    /// permission failure lands in [`ScanStatus::camera_error`] and leaves
    /// the admission gate untouched.
    pub async fn start(&self) {
        self.inner.start_camera().await;
    }

    /// Consume the camera's decoded-string stream until it closes.
    ///
    /// Each frame is handled on its own task, mirroring the fire-and-forget
    /// decode callback of the camera subsystem; the admission gate inside
    /// [`Self::handle_code`] keeps at most one validation in flight.
    pub async fn run(&self, mut frames: mpsc::Receiver<String>) {
        while let Some(raw) = frames.recv().await {
            let dispatcher = self.clone();
            let task = tokio::spawn(async move {
                dispatcher.handle_code(&raw).await;
            });
            self.push_task(task);
        }
        debug!("frame stream closed");
    }

    /// Process one decoded payload end to end.
    ///
    /// Returns without visible effect for parse misses and debounce skips.
    /// For an accepted target: camera paused, exactly one validation call,
    /// recovery timers scheduled at settle, then one blocking presentation.
    pub async fn handle_code(&self, raw: &str) {
        let Some(target) = ScanTarget::parse(raw) else {
            return;
        };
        let code = target.code().to_string();
        let now = Instant::now();

        // Admission gate. Check-and-set under the lock, before any await:
        // two frames decoded back to back must not both pass.
        {
            let mut admission = self.inner.admission.lock();
            if admission.processing {
                trace!(code, "scan dropped: validation in flight");
                return;
            }
            if let Some(last) = &admission.last_scan {
                if last.code == code
                    && now.duration_since(last.at) < self.inner.config.cooldown
                {
                    trace!(code, "scan dropped: within cooldown");
                    return;
                }
            }
            admission.processing = true;
            admission.last_scan = Some(LastScan {
                code: code.clone(),
                at: now,
            });
        }

        {
            let mut status = self.inner.status.lock();
            status.busy = true;
            status.last_code = Some(code.clone());
        }

        // Pause the decode loop while validating.
        self.inner.camera.stop().await;
        debug!(code, kind = ?target, "validating scan");

        let outcome = match &target {
            ScanTarget::Reservation { code } => match self.inner.validator.checkin(code).await {
                Ok(response) => ScanOutcome::from_checkin(code, response),
                Err(err) => ScanOutcome::failure(err),
            },
            ScanTarget::Access { code } => match self.inner.validator.check_access(code).await {
                Ok(response) => ScanOutcome::from_access_check(code, response),
                Err(err) => ScanOutcome::failure(err),
            },
        };

        // The call settled. Recovery runs on all paths from here: the lock
        // release and display clear are timer-driven and deliberately not
        // gated on the operator acknowledging the dialog.
        self.inner.status.lock().busy = false;
        self.schedule_release();
        self.schedule_display_clear();

        self.inner.presenter.present(&outcome).await;
    }

    /// Manual "restart camera" action. Advisory: refused while a
    /// validation is in flight so it cannot double-start the decode loop.
    ///
    /// Holds the admission gate for the whole stop/start bracket; a frame
    /// decoded mid-restart is dropped rather than validated against a
    /// camera that is about to come back up.
    pub async fn restart_camera(&self) {
        {
            let mut admission = self.inner.admission.lock();
            if admission.processing {
                debug!("manual camera restart ignored: validation in flight");
                return;
            }
            admission.processing = true;
        }
        self.inner.camera.stop().await;
        self.inner.start_camera().await;
        self.inner.admission.lock().processing = false;
    }

    /// Snapshot of the UI-facing state.
    pub fn status(&self) -> ScanStatus {
        self.inner.status.lock().clone()
    }

    /// Screen-unmount teardown: cancel pending timers and frame tasks and
    /// stop the camera. Timers hold only weak references, so one firing
    /// after teardown is a no-op either way.
    pub async fn shutdown(&self) {
        let tasks: Vec<JoinHandle<()>> = self.inner.tasks.lock().drain(..).collect();
        for task in tasks {
            task.abort();
        }
        self.inner.camera.stop().await;
    }

    /// One-shot: release the hard lock and restart the camera after the
    /// configured delay. Scheduled exactly once per accepted scan.
    fn schedule_release(&self) {
        let inner = Arc::downgrade(&self.inner);
        let delay = self.inner.config.restart_delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(inner) = inner.upgrade() else {
                return;
            };
            inner.admission.lock().processing = false;
            inner.start_camera().await;
        });
        self.push_task(task);
    }

    /// One-shot: clear the last-code display field. Does not gate re-scans.
    fn schedule_display_clear(&self) {
        let inner = Arc::downgrade(&self.inner);
        let delay = self.inner.config.display_clear_delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = inner.upgrade() {
                inner.status.lock().last_code = None;
            }
        });
        self.push_task(task);
    }

    fn push_task(&self, task: JoinHandle<()>) {
        let mut tasks = self.inner.tasks.lock();
        tasks.retain(|t| !t.is_finished());
        tasks.push(task);
    }
}
