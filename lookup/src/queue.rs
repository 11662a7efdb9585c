use futures::FutureExt;
use futures::future::BoxFuture;
use log::{debug, error};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;

use crate::error::QueueError;

pub type Priority = i64;

enum QueueCommand {
    Add(BoxFuture<'static, ()>, Priority), // Work and its priority
    Pending(oneshot::Sender<usize>),       // Reply with the number of queued tasks
}

struct QueuedTask {
    priority: Priority,
    sequence: u64,
    work: BoxFuture<'static, ()>,
}

// Highest priority first, then earliest added
impl Ord for QueuedTask {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueuedTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueuedTask {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedTask {}

/// Resolves to the outcome of a task added to a `PriorityQueue`.
pub struct TaskHandle<T> {
    rx: oneshot::Receiver<Result<T, QueueError>>,
}

impl<T> Future for TaskHandle<T> {
    type Output = Result<T, QueueError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(QueueError::SchedulerGone)))
    }
}

/// Runs at most `max_concurrent` tasks at once, starting queued tasks by
/// descending priority and, within a priority, in the order they were added.
///
/// Running tasks are never preempted or cancelled. Cloning gives another
/// handle onto the same scheduler.
#[derive(Clone)]
pub struct PriorityQueue {
    tx: UnboundedSender<QueueCommand>,
}

impl PriorityQueue {
    /// Spawns the scheduler onto the current tokio runtime.
    pub fn new(max_concurrent: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<QueueCommand>();
        let max_concurrent = max_concurrent.max(1);

        tokio::spawn(async move {
            scheduler(rx, max_concurrent).await;
        });

        PriorityQueue { tx }
    }

    /// Queues `work`. Nothing runs until the scheduler picks it up.
    pub fn add<F, T>(&self, work: F, priority: Priority) -> TaskHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (result_tx, result_rx) = oneshot::channel();
        let work = async move {
            let outcome = AssertUnwindSafe(work)
                .catch_unwind()
                .await
                .map_err(|_| QueueError::Panicked);
            let _ = result_tx.send(outcome);
        }
        .boxed();

        if self.tx.send(QueueCommand::Add(work, priority)).is_err() {
            error!("Scheduler is gone, dropping task with priority {}", priority);
        }
        TaskHandle { rx: result_rx }
    }

    /// Number of tasks waiting to start. Running tasks are not counted.
    pub async fn pending(&self) -> usize {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.tx.send(QueueCommand::Pending(reply_tx)).is_err() {
            return 0;
        }
        reply_rx.await.unwrap_or(0)
    }
}

async fn scheduler(mut rx: UnboundedReceiver<QueueCommand>, max_concurrent: usize) {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<()>();
    let mut queue: BinaryHeap<QueuedTask> = BinaryHeap::new();
    let mut active = 0;
    let mut sequence: u64 = 0;
    let mut accepting = true;

    loop {
        tokio::select! {
            command = rx.recv(), if accepting => match command {
                Some(QueueCommand::Add(work, priority)) => {
                    debug!("Queueing task {} with priority {}", sequence, priority);
                    queue.push(QueuedTask { priority, sequence, work });
                    sequence += 1;
                }
                Some(QueueCommand::Pending(reply)) => {
                    let _ = reply.send(queue.len());
                }
                None => accepting = false,
            },
            Some(()) = done_rx.recv() => {
                active -= 1;
            }
        }

        while active < max_concurrent {
            let Some(task) = queue.pop() else {
                break;
            };
            debug!(
                "Starting task {} with priority {} ({} active)",
                task.sequence,
                task.priority,
                active + 1
            );
            active += 1;
            let done_tx = done_tx.clone();
            tokio::spawn(async move {
                task.work.await;
                let _ = done_tx.send(());
            });
        }

        if !accepting && active == 0 && queue.is_empty() {
            debug!("All queue handles dropped, stopping scheduler");
            break;
        }
    }
}
