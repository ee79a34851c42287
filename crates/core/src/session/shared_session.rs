use std::sync::{Arc, Mutex, TryLockError};

use uuid::Uuid;

use crate::anomaly::domain::alert::AlertInsight;
use crate::ledger::domain::detection_event::DetectionEvent;
use crate::scene::domain::frame_signature::FrameSignature;
use crate::scene::domain::scene_segmenter::SceneChange;
use crate::shared::error::CoreError;

use super::observation::FaceObservation;
use super::session::Session;
use super::session_report::SessionReport;

/// A [`Session`] shared between threads.
///
/// Mutations never wait: if another caller holds the session they fail with
/// [`CoreError::ConcurrentMutation`]. Reports wait for the lock.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn begin_frame(&self, signature: FrameSignature, frame_index: usize) -> Result<SceneChange, CoreError> {
        self.mutate(|s| s.begin_frame(signature, frame_index))
    }

    pub fn observe(&self, observation: FaceObservation) -> Result<Option<DetectionEvent>, CoreError> {
        self.mutate(|s| s.observe(observation))
    }

    pub fn finish(&self, frame_index: usize) -> Result<(), CoreError> {
        self.mutate(|s| s.finish(frame_index))
    }

    pub fn attach_insight(&self, alert_id: Uuid, insight: AlertInsight) -> Result<(), CoreError> {
        self.mutate(|s| s.attach_insight(alert_id, insight))
    }

    pub fn report(&self) -> Result<SessionReport, CoreError> {
        let session = self.inner.lock().map_err(|_| CoreError::Poisoned)?;
        Ok(session.report())
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut Session) -> Result<T, CoreError>) -> Result<T, CoreError> {
        let mut session = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return Err(CoreError::ConcurrentMutation),
            Err(TryLockError::Poisoned(_)) => return Err(CoreError::Poisoned),
        };
        f(&mut session)
    }
}
