//! In-Memory View Registry Implementation

use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

use crate::application::ports::{UiStateSink, View, ViewError, ViewHandle, ViewRegistryPort};
use crate::domain::assist::{TaskKind, TaskPhase, ViewId, ViewRunStates};
use crate::infrastructure::events::EventPublisher;

/// 视图状态写入口
///
/// 每次写入后向该视图的事件通道推送一次槽位状态
pub struct ViewStateSink {
    view_id: ViewId,
    states: Mutex<ViewRunStates>,
    attached: AtomicBool,
    event_publisher: Arc<EventPublisher>,
}

impl ViewStateSink {
    fn new(view_id: ViewId, event_publisher: Arc<EventPublisher>) -> Self {
        Self {
            view_id,
            states: Mutex::new(ViewRunStates::default()),
            attached: AtomicBool::new(true),
            event_publisher,
        }
    }

    fn states(&self) -> MutexGuard<'_, ViewRunStates> {
        self.states.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn snapshot(&self) -> ViewRunStates {
        self.states().clone()
    }

    fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }

    /// 在锁内修改槽位并推送修改后的状态
    fn update(&self, kind: TaskKind, apply: impl FnOnce(&mut ViewRunStates)) {
        if !self.is_attached() {
            return;
        }
        let mut states = self.states();
        apply(&mut states);
        self.event_publisher
            .publish_task_state(&self.view_id, kind, states.get(kind));
    }
}

impl UiStateSink for ViewStateSink {
    fn set_loading(&self, kind: TaskKind, loading: bool) {
        self.update(kind, |states| {
            let slot = states.get_mut(kind);
            slot.is_loading = loading;
            if loading {
                slot.phase = TaskPhase::Loading;
            }
        });
    }

    fn set_output(&self, kind: TaskKind, output: &str) {
        self.update(kind, |states| {
            states.get_mut(kind).output_text = output.to_string();
        });
    }

    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    fn enter_loading(&self, kind: TaskKind, epoch: u64) {
        self.update(kind, |states| states.get_mut(kind).enter_loading(epoch));
    }

    fn settle(&self, kind: TaskKind, output: &str, phase: TaskPhase) {
        self.update(kind, |states| states.get_mut(kind).settle(output, phase));
    }
}

struct ViewEntry {
    view: View,
    sink: Arc<ViewStateSink>,
    closed: CancellationToken,
}

/// 内存视图注册表
pub struct InMemoryViewRegistry {
    views: DashMap<ViewId, ViewEntry>,
    event_publisher: Arc<EventPublisher>,
}

impl InMemoryViewRegistry {
    pub fn new(event_publisher: Arc<EventPublisher>) -> Self {
        Self {
            views: DashMap::new(),
            event_publisher,
        }
    }
}

impl ViewRegistryPort for InMemoryViewRegistry {
    fn open(&self, view: View) -> Result<ViewId, ViewError> {
        let view_id = view.id.clone();
        if self.views.contains_key(&view_id) {
            return Err(ViewError::AlreadyExists(view_id));
        }
        let sink = Arc::new(ViewStateSink::new(
            view_id.clone(),
            self.event_publisher.clone(),
        ));
        self.views.insert(
            view_id.clone(),
            ViewEntry {
                view,
                sink,
                closed: CancellationToken::new(),
            },
        );
        tracing::debug!(view_id = %view_id, "View registered");
        Ok(view_id)
    }

    fn get(&self, id: &ViewId) -> Result<View, ViewError> {
        self.views
            .get(id)
            .map(|e| e.view.clone())
            .ok_or_else(|| ViewError::NotFound(id.clone()))
    }

    fn handle(&self, id: &ViewId) -> Result<ViewHandle, ViewError> {
        self.views
            .get(id)
            .map(|e| ViewHandle {
                view_id: id.clone(),
                document_id: e.view.document_id.clone(),
                sink: e.sink.clone(),
                closed: e.closed.clone(),
            })
            .ok_or_else(|| ViewError::NotFound(id.clone()))
    }

    fn snapshot(&self, id: &ViewId) -> Result<ViewRunStates, ViewError> {
        self.views
            .get(id)
            .map(|e| e.sink.snapshot())
            .ok_or_else(|| ViewError::NotFound(id.clone()))
    }

    fn is_open(&self, id: &ViewId) -> bool {
        self.views.contains_key(id)
    }

    fn close(&self, id: &ViewId) -> Result<(), ViewError> {
        let (_, entry) = self
            .views
            .remove(id)
            .ok_or_else(|| ViewError::NotFound(id.clone()))?;
        entry.sink.detach();
        entry.closed.cancel();
        tracing::debug!(view_id = %id, "View unregistered");
        Ok(())
    }

    fn touch(&self, id: &ViewId) {
        if let Some(mut entry) = self.views.get_mut(id) {
            entry.view.last_activity = Utc::now();
        }
    }

    fn get_idle_views(&self, idle_timeout_secs: u64) -> Vec<ViewId> {
        let now = Utc::now();
        let timeout = chrono::Duration::seconds(idle_timeout_secs as i64);

        self.views
            .iter()
            .filter_map(|entry| {
                let elapsed = now - entry.view.last_activity;
                if elapsed > timeout {
                    Some(entry.key().clone())
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assist::DocumentId;
    use crate::infrastructure::events::WsEvent;

    fn registry() -> (InMemoryViewRegistry, Arc<EventPublisher>) {
        let publisher = Arc::new(EventPublisher::new());
        (InMemoryViewRegistry::new(publisher.clone()), publisher)
    }

    fn view() -> View {
        View::new(DocumentId::new("doc1").unwrap())
    }

    #[test]
    fn test_view_lifecycle() {
        let (registry, _) = registry();
        let view_id = registry.open(view()).unwrap();

        assert!(registry.is_open(&view_id));
        assert_eq!(registry.get(&view_id).unwrap().document_id.as_str(), "doc1");
        assert_eq!(registry.snapshot(&view_id).unwrap(), ViewRunStates::default());
        assert!(registry.handle(&view_id).is_ok());

        registry.close(&view_id).unwrap();
        assert!(!registry.is_open(&view_id));
        assert!(matches!(registry.close(&view_id), Err(ViewError::NotFound(_))));
    }

    #[test]
    fn test_duplicate_open_rejected() {
        let (registry, _) = registry();
        let v = view();
        registry.open(v.clone()).unwrap();
        assert!(matches!(registry.open(v), Err(ViewError::AlreadyExists(_))));
    }

    #[test]
    fn test_sink_writes_visible_in_snapshot() {
        let (registry, _) = registry();
        let view_id = registry.open(view()).unwrap();
        let handle = registry.handle(&view_id).unwrap();

        handle.sink.enter_loading(TaskKind::Translate, 1);
        let states = registry.snapshot(&view_id).unwrap();
        assert!(states.translate.is_loading);
        assert_eq!(states.translate.phase, TaskPhase::Loading);
        assert!(!states.extract.is_loading);

        handle
            .sink
            .settle(TaskKind::Translate, "译文", TaskPhase::Succeeded);
        let states = registry.snapshot(&view_id).unwrap();
        assert!(!states.translate.is_loading);
        assert_eq!(states.translate.output_text, "译文");
        assert_eq!(states.extract, Default::default());
    }

    #[test]
    fn test_close_detaches_sink_and_cancels() {
        let (registry, _) = registry();
        let view_id = registry.open(view()).unwrap();
        let handle = registry.handle(&view_id).unwrap();

        registry.close(&view_id).unwrap();

        assert!(handle.closed.is_cancelled());
        assert!(!handle.sink.is_attached());
        // 关闭后的写入被忽略
        handle.sink.set_output(TaskKind::Extract, "late");
    }

    #[tokio::test]
    async fn test_each_write_publishes_one_event() {
        let (registry, publisher) = registry();
        let view_id = registry.open(view()).unwrap();
        let mut rx = publisher.register_view(&view_id);
        let handle = registry.handle(&view_id).unwrap();

        handle.sink.enter_loading(TaskKind::Extract, 3);
        handle.sink.settle(TaskKind::Extract, "OK", TaskPhase::Succeeded);

        match rx.recv().await.unwrap() {
            WsEvent::TaskStateChanged {
                epoch,
                is_loading,
                phase,
                ..
            } => {
                assert_eq!(epoch, 3);
                assert!(is_loading);
                assert_eq!(phase, TaskPhase::Loading);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        match rx.recv().await.unwrap() {
            WsEvent::TaskStateChanged {
                epoch,
                is_loading,
                output,
                ..
            } => {
                // 落定保留进入 Loading 时的调用编号
                assert_eq!(epoch, 3);
                assert!(!is_loading);
                assert_eq!(output, "OK");
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_idle_views() {
        let (registry, _) = registry();
        let mut stale = view();
        stale.last_activity = Utc::now() - chrono::Duration::seconds(600);
        let stale_id = registry.open(stale).unwrap();
        let fresh_id = registry.open(view()).unwrap();

        let idle = registry.get_idle_views(300);
        assert_eq!(idle, vec![stale_id.clone()]);

        registry.touch(&stale_id);
        assert!(registry.get_idle_views(300).is_empty());
        assert!(registry.is_open(&fresh_id));
    }
}
