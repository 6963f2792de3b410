//! Task Orchestrator - 任务状态机
//!
//! 每个 (视图, 任务类型) 的生命周期: Idle → Loading → {Succeeded, Failed}
//!
//! 每次触发分配一个单调递增的 epoch，只有最新 epoch 的结果会写入视图；
//! 被新调用取代的旧调用、以及视图已关闭后的结果都会被丢弃

use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    CompletionEnginePort, ContentSourcePort, UiStateSink, ViewHandle,
};
use crate::domain::assist::{DocumentId, TaskKind, TaskPhase, ViewId};

use super::request_builder::RequestBuilder;
use super::response_classifier::{Classified, OutcomeTag, ResponseClassifier};

/// 默认超时（毫秒）
pub const DEFAULT_TIMEOUT_MS: u64 = 150_000;

/// 一次调用
///
/// 超时时长在调用开始时确定，之后不再变化
pub struct Invocation {
    pub view_id: ViewId,
    pub document_id: DocumentId,
    pub kind: TaskKind,
    pub epoch: u64,
    pub timeout: Duration,
    sink: Arc<dyn UiStateSink>,
    closed: CancellationToken,
}

/// 调用结束后的去向
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// 结果已写入视图
    Applied { phase: TaskPhase, tag: OutcomeTag },
    /// 已被同类型的新调用取代，结果丢弃
    Superseded,
    /// 视图已关闭，结果丢弃
    Detached,
}

/// Task Orchestrator
pub struct TaskOrchestrator {
    content_source: Arc<dyn ContentSourcePort>,
    completion_engine: Arc<dyn CompletionEnginePort>,
    request_builder: RequestBuilder,
    classifier: ResponseClassifier,
    timeout: Duration,
    /// (view_id, kind) -> 最新 epoch
    epochs: DashMap<(ViewId, TaskKind), u64>,
}

impl TaskOrchestrator {
    pub fn new(
        content_source: Arc<dyn ContentSourcePort>,
        completion_engine: Arc<dyn CompletionEnginePort>,
        request_builder: RequestBuilder,
        classifier: ResponseClassifier,
        timeout: Duration,
    ) -> Self {
        Self {
            content_source,
            completion_engine,
            request_builder,
            classifier,
            timeout,
            epochs: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 开始一次调用：分配 epoch 并进入 Loading
    ///
    /// epoch 递增与 Loading 写入在同一把锁内完成，
    /// 与 [`Self::execute`] 的终态写入互斥。
    /// 视图已关闭时返回 None，不再为它创建 epoch 记录
    pub fn begin(&self, handle: &ViewHandle, kind: TaskKind) -> Option<Invocation> {
        let entry = self.epochs.entry((handle.view_id.clone(), kind));
        // 持有分片锁时检查，关闭方的 forget_view 只能排在这之后
        if handle.closed.is_cancelled() {
            tracing::debug!(
                view_id = %handle.view_id,
                kind = %kind,
                "View already closed, assist task not started"
            );
            return None;
        }
        let mut entry = entry.or_insert(0);
        *entry += 1;
        let epoch = *entry;
        handle.sink.enter_loading(kind, epoch);
        drop(entry);

        tracing::info!(
            view_id = %handle.view_id,
            document_id = %handle.document_id,
            kind = %kind,
            epoch = epoch,
            "Assist task started"
        );

        Some(Invocation {
            view_id: handle.view_id.clone(),
            document_id: handle.document_id.clone(),
            kind,
            epoch,
            timeout: self.timeout,
            sink: handle.sink.clone(),
            closed: handle.closed.clone(),
        })
    }

    /// 执行调用直到终态
    pub async fn execute(&self, invocation: Invocation) -> InvocationOutcome {
        let classified = tokio::select! {
            biased;
            _ = invocation.closed.cancelled() => {
                tracing::debug!(
                    view_id = %invocation.view_id,
                    kind = %invocation.kind,
                    epoch = invocation.epoch,
                    "View closed, assist task aborted"
                );
                return InvocationOutcome::Detached;
            }
            classified = self.produce(&invocation) => classified,
        };

        self.settle(&invocation, classified)
    }

    /// begin + execute
    pub async fn run(&self, handle: &ViewHandle, kind: TaskKind) -> InvocationOutcome {
        match self.begin(handle, kind) {
            Some(invocation) => self.execute(invocation).await,
            None => InvocationOutcome::Detached,
        }
    }

    /// 在后台执行，立即返回 epoch；视图已关闭时返回 None
    pub fn spawn(self: &Arc<Self>, handle: &ViewHandle, kind: TaskKind) -> Option<u64> {
        let invocation = self.begin(handle, kind)?;
        let epoch = invocation.epoch;
        let orchestrator = self.clone();
        tokio::spawn(async move {
            orchestrator.execute(invocation).await;
        });
        Some(epoch)
    }

    /// 当前 epoch（从未触发过为 0）
    pub fn current_epoch(&self, view_id: &ViewId, kind: TaskKind) -> u64 {
        self.epochs
            .get(&(view_id.clone(), kind))
            .map(|e| *e)
            .unwrap_or(0)
    }

    /// 视图关闭后清理 epoch 记录
    pub fn forget_view(&self, view_id: &ViewId) {
        for kind in TaskKind::ALL {
            self.epochs.remove(&(view_id.clone(), kind));
        }
    }

    /// 获取原文 → 组装请求 → 竞速调用 → 分类
    async fn produce(&self, invocation: &Invocation) -> Classified {
        let raw_content = match self
            .content_source
            .fetch_content(&invocation.document_id)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    view_id = %invocation.view_id,
                    document_id = %invocation.document_id,
                    kind = %invocation.kind,
                    error = %e,
                    "Failed to fetch document content"
                );
                return self.classifier.classify_fetch_error(&e);
            }
        };

        let task_request = self.request_builder.task_request(
            invocation.document_id.clone(),
            invocation.kind,
            raw_content,
        );
        let request = self.request_builder.build(&task_request);

        let outcome = self
            .completion_engine
            .complete(&request, invocation.timeout)
            .await;

        tracing::debug!(
            view_id = %invocation.view_id,
            kind = %invocation.kind,
            epoch = invocation.epoch,
            outcome = outcome.kind_str(),
            "Completion settled"
        );

        self.classifier.classify(outcome)
    }

    /// 写入终态（仅当 epoch 仍是最新且视图仍存在）
    fn settle(&self, invocation: &Invocation, classified: Classified) -> InvocationOutcome {
        let key = (invocation.view_id.clone(), invocation.kind);
        let Some(current) = self.epochs.get(&key) else {
            return InvocationOutcome::Detached;
        };

        if *current != invocation.epoch {
            tracing::debug!(
                view_id = %invocation.view_id,
                kind = %invocation.kind,
                epoch = invocation.epoch,
                current_epoch = *current,
                "Superseded result dropped"
            );
            return InvocationOutcome::Superseded;
        }

        if invocation.closed.is_cancelled() || !invocation.sink.is_attached() {
            tracing::debug!(
                view_id = %invocation.view_id,
                kind = %invocation.kind,
                "View detached, result dropped"
            );
            return InvocationOutcome::Detached;
        }

        let phase = classified.phase();
        invocation
            .sink
            .settle(invocation.kind, &classified.text, phase);
        drop(current);

        tracing::info!(
            view_id = %invocation.view_id,
            kind = %invocation.kind,
            epoch = invocation.epoch,
            phase = phase.as_str(),
            outcome = classified.tag.as_str(),
            output_chars = classified.text.chars().count(),
            "Assist task finished"
        );

        InvocationOutcome::Applied {
            phase,
            tag: classified.tag,
        }
    }
}
