use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use tracing::debug;

use crate::error::Result;
use crate::solver::board::Board;
use crate::solver::engine::{expand, Completion, Executor, SearchContext, SolveConfig};

/// How long workers and the coordinating thread sleep between polls of the
/// shared termination state. Bounds the drain interval after a timeout.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// A scheduler for the search core: decides where the recursive step for
/// each surviving candidate runs. All strategies share the same
/// expand/prune/commit logic.
pub trait SearchStrategy: Sync {
    fn name(&self) -> &'static str;

    /// Runs the search from `root` to natural termination or cancellation,
    /// then classifies the outcome.
    fn run(&self, ctx: &SearchContext, root: Board, config: &SolveConfig) -> Result<Completion>;
}

/// Synchronous, single-threaded, depth-first search.
///
/// The only strategy with a deterministic solution order: permutations are
/// explored leftmost-first, so "first solution" is always the same board
/// for a given puzzle.
pub struct SequentialStrategy;

struct InlineExecutor<'a> {
    ctx: &'a SearchContext,
}

impl Executor for InlineExecutor<'_> {
    fn submit(&self, board: Board) {
        expand(self.ctx, self, board);
    }

    fn should_terminate(&self) -> bool {
        self.ctx.should_terminate()
    }
}

impl SearchStrategy for SequentialStrategy {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn run(&self, ctx: &SearchContext, root: Board, _config: &SolveConfig) -> Result<Completion> {
        expand(ctx, &InlineExecutor { ctx }, root);
        Ok(ctx.completion())
    }
}

/// Fixed-size worker pool with queue-depth backpressure.
///
/// Recursive steps are queued while the number of queued-but-not-started
/// tasks stays at or below the configured ceiling; beyond that they run
/// inline on the calling worker, which keeps the combinatorial branching
/// factor from exploding the queue. Workers poll the shared cancellation
/// token before every expansion and wind down cooperatively — nothing is
/// ever aborted mid-scan.
pub struct ThreadPoolStrategy;

struct PoolShared<'a> {
    ctx: &'a SearchContext,
    tx: Sender<Board>,
    rx: Receiver<Board>,
    queue_ceiling: usize,
    /// Tasks queued or currently expanding. Zero means the tree is drained.
    pending: AtomicUsize,
    shutdown: AtomicBool,
    drained: (Mutex<()>, Condvar),
}

impl<'a> PoolShared<'a> {
    fn new(ctx: &'a SearchContext, queue_ceiling: usize) -> Self {
        let (tx, rx) = unbounded();
        Self {
            ctx,
            tx,
            rx,
            queue_ceiling,
            pending: AtomicUsize::new(0),
            shutdown: AtomicBool::new(false),
            drained: (Mutex::new(()), Condvar::new()),
        }
    }

    fn enqueue(&self, board: Board) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if self.tx.send(board).is_err() {
            self.task_finished();
        }
    }

    fn task_finished(&self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            let (_lock, cvar) = &self.drained;
            cvar.notify_all();
        }
    }

    fn drained_out(&self) -> bool {
        self.pending.load(Ordering::SeqCst) == 0
    }
}

struct PoolExecutor<'p, 'a> {
    shared: &'p PoolShared<'a>,
}

impl Executor for PoolExecutor<'_, '_> {
    fn submit(&self, board: Board) {
        if self.shared.tx.len() <= self.shared.queue_ceiling {
            self.shared.enqueue(board);
        } else {
            // Backpressure: run the step on the calling worker instead.
            expand(self.shared.ctx, self, board);
        }
    }

    fn should_terminate(&self) -> bool {
        self.shared.ctx.should_terminate()
    }
}

fn pool_worker(shared: &PoolShared<'_>) {
    while !shared.shutdown.load(Ordering::Acquire) {
        match shared.rx.recv_timeout(POLL_INTERVAL) {
            Ok(board) => {
                if !shared.ctx.should_terminate() {
                    expand(shared.ctx, &PoolExecutor { shared }, board);
                }
                shared.task_finished();
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

impl SearchStrategy for ThreadPoolStrategy {
    fn name(&self) -> &'static str {
        "thread-pool"
    }

    fn run(&self, ctx: &SearchContext, root: Board, config: &SolveConfig) -> Result<Completion> {
        let shared = PoolShared::new(ctx, config.queue_ceiling);
        debug!(workers = config.workers, ceiling = config.queue_ceiling, "starting worker pool");

        thread::scope(|scope| {
            for _ in 0..config.workers {
                scope.spawn(|| pool_worker(&shared));
            }

            shared.enqueue(root);

            // Block until the tree is drained, the first solution lands, or
            // the deadline elapses. The condvar is only a wake-up hint; the
            // shared state is re-checked every interval.
            let (lock, cvar) = &shared.drained;
            let mut guard = lock.lock().expect("pool coordination poisoned");
            while !shared.drained_out() && !ctx.should_terminate() {
                let (g, _) = cvar
                    .wait_timeout(guard, POLL_INTERVAL)
                    .expect("pool coordination poisoned");
                guard = g;
            }
            drop(guard);

            shared.shutdown.store(true, Ordering::Release);
        });

        Ok(ctx.completion())
    }
}

/// Data-parallel fan-out: every surviving candidate is handed to a freshly
/// spawned scoped thread, with no queue ceiling.
///
/// Lower scheduling latency than the pool, but thread count grows with the
/// combinatorial width of the search — only suitable for small puzzles.
pub struct FanOutStrategy;

struct FanOutExecutor<'scope, 'env> {
    ctx: &'scope SearchContext,
    scope: &'scope thread::Scope<'scope, 'env>,
}

impl Executor for FanOutExecutor<'_, '_> {
    fn submit(&self, board: Board) {
        let ctx = self.ctx;
        let scope = self.scope;
        scope.spawn(move || {
            expand(ctx, &FanOutExecutor { ctx, scope }, board);
        });
    }

    fn should_terminate(&self) -> bool {
        self.ctx.should_terminate()
    }
}

impl SearchStrategy for FanOutStrategy {
    fn name(&self) -> &'static str {
        "fan-out"
    }

    fn run(&self, ctx: &SearchContext, root: Board, _config: &SolveConfig) -> Result<Completion> {
        thread::scope(|scope| {
            let executor = FanOutExecutor { ctx, scope };
            expand(ctx, &executor, root);
        });
        Ok(ctx.completion())
    }
}
