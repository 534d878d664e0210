//! Echogram and snap message lists exposed to a presentation layer.
//!
//! Lists are fetched on first access per session and kept until the session
//! refreshes or invalidates them.

use crate::cache::SessionCache;
use crate::client::SnapMessageService;
use crate::error::Result;
use crate::models::{EchogramInfo, SessionId, SnapMessage};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

pub type EchogramList = Arc<Vec<EchogramInfo>>;
pub type SnapMessageList = Arc<Vec<SnapMessage>>;

pub struct EchogramViewModel<S> {
    service: Arc<S>,
    echograms: SessionCache<SessionId, Vec<EchogramInfo>>,
    snaps: SessionCache<(SessionId, bool), Vec<SnapMessage>>,
}

impl<S: SnapMessageService> EchogramViewModel<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            echograms: SessionCache::new(),
            snaps: SessionCache::new(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Echogram metadata for `session`, fetched once and then served from cache
    pub async fn echogram_infos(&self, session: &SessionId) -> Result<EchogramList> {
        self.echograms
            .get_or_fetch(session, || self.service.echogram_infos())
            .await
    }

    /// Re-fetch echogram metadata for `session`
    pub async fn refresh_echogram_list(&self, session: &SessionId) -> Result<EchogramList> {
        let list = self
            .echograms
            .refresh(session, || self.service.echogram_infos())
            .await?;
        info!("Refreshed {} echograms for session {}", list.len(), session);
        Ok(list)
    }

    /// Observe the echogram list of `session`
    pub async fn watch_echogram_infos(
        &self,
        session: &SessionId,
    ) -> watch::Receiver<Option<EchogramList>> {
        self.echograms.subscribe(session).await
    }

    /// Snap messages for `session`
    pub async fn snap_messages(
        &self,
        session: &SessionId,
        with_echogram: bool,
    ) -> Result<SnapMessageList> {
        self.snaps
            .get_or_fetch(&(session.clone(), with_echogram), || {
                self.service.snap_messages(with_echogram)
            })
            .await
    }

    /// Re-fetch snap messages for `session`
    pub async fn refresh_snap_messages(
        &self,
        session: &SessionId,
        with_echogram: bool,
    ) -> Result<SnapMessageList> {
        let list = self
            .snaps
            .refresh(&(session.clone(), with_echogram), || {
                self.service.snap_messages(with_echogram)
            })
            .await?;
        info!("Refreshed {} snap messages for session {}", list.len(), session);
        Ok(list)
    }

    /// Observe the snap message list of `session`
    pub async fn watch_snap_messages(
        &self,
        session: &SessionId,
        with_echogram: bool,
    ) -> watch::Receiver<Option<SnapMessageList>> {
        self.snaps.subscribe(&(session.clone(), with_echogram)).await
    }

    /// Send a snap message and drop cached snap lists for `session`
    pub async fn send_snap_message(
        &self,
        session: &SessionId,
        message: &SnapMessage,
    ) -> Result<SnapMessage> {
        let stored = self.service.send_snap_message(message).await?;
        for with_echogram in [false, true] {
            self.snaps.invalidate(&(session.clone(), with_echogram)).await;
        }
        Ok(stored)
    }

    /// Drop every cached list of `session`
    pub async fn invalidate(&self, session: &SessionId) {
        self.echograms.invalidate(session).await;
        for with_echogram in [false, true] {
            self.snaps.invalidate(&(session.clone(), with_echogram)).await;
        }
    }

    /// Forget `session` entirely once its consumer is gone. Watchers of the
    /// session stop receiving updates.
    pub async fn release(&self, session: &SessionId) {
        self.echograms.remove(session).await;
        for with_echogram in [false, true] {
            self.snaps.remove(&(session.clone(), with_echogram)).await;
        }
        debug!("Released session {}", session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeService {
        echogram_calls: AtomicUsize,
        snap_calls: AtomicUsize,
    }

    fn echogram(id: i64) -> EchogramInfo {
        EchogramInfo {
            id,
            timestamp: Utc.with_ymd_and_hms(2020, 3, 1, 12, 0, 0).unwrap(),
            latitude: 69.6,
            longitude: 18.9,
            source: None,
            echogram_url: None,
            data_url: None,
        }
    }

    fn snap(title: &str, with_echogram: bool) -> SnapMessage {
        SnapMessage {
            id: Some(1),
            title: title.to_string(),
            sender: "vessel@example.no".to_string(),
            receivers: vec![],
            comment: String::new(),
            sent_timestamp: None,
            echogram_info_id: Some(1),
            echogram_info: with_echogram.then(|| echogram(1)),
        }
    }

    #[async_trait]
    impl SnapMessageService for FakeService {
        async fn echogram_infos(&self) -> Result<Vec<EchogramInfo>> {
            let call = self.echogram_calls.fetch_add(1, Ordering::SeqCst) as i64;
            Ok(vec![echogram(call)])
        }

        async fn snap_messages(&self, with_echogram: bool) -> Result<Vec<SnapMessage>> {
            self.snap_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![snap("school", with_echogram)])
        }

        async fn send_snap_message(&self, message: &SnapMessage) -> Result<SnapMessage> {
            Ok(SnapMessage {
                id: Some(99),
                ..message.clone()
            })
        }
    }

    #[tokio::test]
    async fn test_echograms_fetched_once_per_session() {
        let view_model = EchogramViewModel::new(Arc::new(FakeService::default()));
        let session = SessionId::new("ui-1");

        let first = view_model.echogram_infos(&session).await.unwrap();
        let second = view_model.echogram_infos(&session).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(view_model.service().echogram_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_replaces_list() {
        let view_model = EchogramViewModel::new(Arc::new(FakeService::default()));
        let session = SessionId::new("ui-1");
        let mut updates = view_model.watch_echogram_infos(&session).await;

        view_model.echogram_infos(&session).await.unwrap();
        let refreshed = view_model.refresh_echogram_list(&session).await.unwrap();

        assert_eq!(refreshed[0].id, 1);
        updates.changed().await.unwrap();
        assert_eq!(updates.borrow().as_ref().unwrap()[0].id, 1);
    }

    #[tokio::test]
    async fn test_snap_lists_keyed_by_echogram_flag() {
        let view_model = EchogramViewModel::new(Arc::new(FakeService::default()));
        let session = SessionId::new("ui-1");

        let plain = view_model.snap_messages(&session, false).await.unwrap();
        let full = view_model.snap_messages(&session, true).await.unwrap();
        view_model.snap_messages(&session, true).await.unwrap();

        assert!(plain[0].echogram_info.is_none());
        assert!(full[0].echogram_info.is_some());
        assert_eq!(view_model.service().snap_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_send_invalidates_snap_lists() {
        let view_model = EchogramViewModel::new(Arc::new(FakeService::default()));
        let session = SessionId::new("ui-1");

        view_model.snap_messages(&session, false).await.unwrap();
        let stored = view_model
            .send_snap_message(&session, &snap("new", false))
            .await
            .unwrap();
        view_model.snap_messages(&session, false).await.unwrap();

        assert_eq!(stored.id, Some(99));
        assert_eq!(view_model.service().snap_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_session() {
        let view_model = EchogramViewModel::new(Arc::new(FakeService::default()));
        let session = SessionId::new("ui-1");
        let other = SessionId::new("ui-2");

        view_model.echogram_infos(&session).await.unwrap();
        view_model.echogram_infos(&other).await.unwrap();
        view_model.invalidate(&session).await;
        view_model.echogram_infos(&session).await.unwrap();
        view_model.echogram_infos(&other).await.unwrap();

        assert_eq!(view_model.service().echogram_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_release_drops_session_slots() {
        let view_model = EchogramViewModel::new(Arc::new(FakeService::default()));

        for n in 0..100 {
            let session = SessionId::new(format!("ui-{n}"));
            view_model.echogram_infos(&session).await.unwrap();
            view_model.snap_messages(&session, true).await.unwrap();
            view_model.watch_snap_messages(&session, false).await;
            view_model.release(&session).await;
        }

        assert_eq!(view_model.echograms.len().await, 0);
        assert!(view_model.snaps.is_empty().await);
    }

    #[tokio::test]
    async fn test_release_keeps_other_sessions() {
        let view_model = EchogramViewModel::new(Arc::new(FakeService::default()));
        let session = SessionId::new("ui-1");
        let other = SessionId::new("ui-2");

        view_model.echogram_infos(&session).await.unwrap();
        view_model.echogram_infos(&other).await.unwrap();
        view_model.release(&session).await;
        view_model.echogram_infos(&other).await.unwrap();
        view_model.echogram_infos(&session).await.unwrap();

        assert_eq!(view_model.echograms.len().await, 2);
        assert_eq!(view_model.service().echogram_calls.load(Ordering::SeqCst), 3);
    }
}
