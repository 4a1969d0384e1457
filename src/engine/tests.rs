//! Engine Module Tests
//!
//! Unit and integration tests for the engine resource guard and the builtin
//! greedy engine.
//!
//! ## Test Scopes
//! - **Mutual exclusion**: Instrumented fake engines prove calls never overlap.
//! - **Ordering**: Queued jobs are served in arrival order.
//! - **Timeouts / backpressure**: Budget enforcement and the bounded queue.
//! - **Degradation**: Unrecoverable failures park the guard until reset.
//! - **Greedy engine**: Deterministic move selection.

#[cfg(test)]
mod tests {
    use crate::engine::guard::EngineGuard;
    use crate::engine::greedy::GreedyEngine;
    use crate::engine::types::SearchEngine;
    use crate::error::GatewayError;
    use crate::position::BoardPosition;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
    use std::time::Duration;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn start_position() -> BoardPosition {
        BoardPosition::parse(START_FEN).unwrap()
    }

    /// Fake engine that records whether any two calls ever ran concurrently.
    struct ProbeEngine {
        active: Arc<AtomicUsize>,
        overlaps: Arc<AtomicUsize>,
        completed: Arc<AtomicUsize>,
    }

    impl SearchEngine for ProbeEngine {
        fn best_move(&mut self, _position: &BoardPosition, _depth: u8) -> anyhow::Result<String> {
            if self.active.fetch_add(1, Ordering::SeqCst) > 0 {
                self.overlaps.fetch_add(1, Ordering::SeqCst);
            }
            std::thread::sleep(Duration::from_millis(10));
            self.active.fetch_sub(1, Ordering::SeqCst);
            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok("e2e4".to_string())
        }
    }

    /// Fake engine whose per-call delay is adjustable from the test.
    struct SleepEngine {
        delay_ms: Arc<AtomicU64>,
        served_depths: Arc<parking_lot::Mutex<Vec<u8>>>,
    }

    impl SearchEngine for SleepEngine {
        fn best_move(&mut self, _position: &BoardPosition, depth: u8) -> anyhow::Result<String> {
            self.served_depths.lock().push(depth);
            std::thread::sleep(Duration::from_millis(self.delay_ms.load(Ordering::SeqCst)));
            Ok("e2e4".to_string())
        }
    }

    /// Fake engine that fails its first call and reports unusable once, then
    /// recovers.
    struct RecoveringEngine {
        fail_next: AtomicBool,
        unready_next: AtomicBool,
    }

    impl SearchEngine for RecoveringEngine {
        fn best_move(&mut self, _position: &BoardPosition, _depth: u8) -> anyhow::Result<String> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                anyhow::bail!("engine crashed");
            }
            Ok("e2e4".to_string())
        }

        fn is_ready(&mut self) -> bool {
            !self.unready_next.swap(false, Ordering::SeqCst)
        }
    }

    // ============================================================
    // TEST 1: Mutual exclusion under concurrent callers
    // ============================================================

    #[tokio::test]
    async fn test_concurrent_calls_never_overlap() {
        // ARRANGE: 8 concurrent callers against an instrumented engine
        let active = Arc::new(AtomicUsize::new(0));
        let overlaps = Arc::new(AtomicUsize::new(0));
        let completed = Arc::new(AtomicUsize::new(0));
        let guard = EngineGuard::new(
            Box::new(ProbeEngine {
                active: active.clone(),
                overlaps: overlaps.clone(),
                completed: completed.clone(),
            }),
            Duration::from_secs(5),
            16,
        );

        // ACT
        let mut handles = Vec::new();
        for _ in 0..8 {
            let guard = guard.clone();
            let position = start_position();
            handles.push(tokio::spawn(async move {
                guard.best_move(position, 3).await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        // ASSERT: every call completed and no two ever ran at once
        assert_eq!(completed.load(Ordering::SeqCst), 8);
        assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    }

    // ============================================================
    // TEST 2: FIFO service order
    // ============================================================

    #[tokio::test]
    async fn test_jobs_served_in_arrival_order() {
        // ARRANGE: a slow-ish engine that records the depth of each job
        let served = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let guard = EngineGuard::new(
            Box::new(SleepEngine {
                delay_ms: Arc::new(AtomicU64::new(5)),
                served_depths: served.clone(),
            }),
            Duration::from_secs(5),
            16,
        );

        // ACT: stagger the submissions so arrival order is unambiguous
        let mut handles = Vec::new();
        for depth in 1..=5u8 {
            let guard = guard.clone();
            let position = start_position();
            handles.push(tokio::spawn(async move {
                guard.best_move(position, depth).await
            }));
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        // ASSERT
        assert_eq!(*served.lock(), vec![1, 2, 3, 4, 5]);
    }

    // ============================================================
    // TEST 3: Timeout releases the caller, guard stays usable
    // ============================================================

    #[tokio::test]
    async fn test_timeout_then_next_call_succeeds() {
        // ARRANGE: first call takes 200ms against a 50ms budget
        let delay = Arc::new(AtomicU64::new(200));
        let guard = EngineGuard::new(
            Box::new(SleepEngine {
                delay_ms: delay.clone(),
                served_depths: Arc::new(parking_lot::Mutex::new(Vec::new())),
            }),
            Duration::from_millis(50),
            8,
        );

        // ACT + ASSERT: the slow call times out
        let result = guard.best_move(start_position(), 3).await;
        assert!(matches!(result, Err(GatewayError::EngineTimeout)));

        // Let the worker finish the stale search it cannot interrupt.
        delay.store(0, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(250)).await;

        // ASSERT: the slot was released, an unrelated request succeeds
        let result = guard.best_move(start_position(), 3).await;
        assert_eq!(result.unwrap().0, "e2e4");
    }

    // ============================================================
    // TEST 4: Bounded queue fails fast
    // ============================================================

    #[tokio::test]
    async fn test_full_queue_rejects_with_busy() {
        // ARRANGE: queue depth 1 and a slow engine
        let guard = EngineGuard::new(
            Box::new(SleepEngine {
                delay_ms: Arc::new(AtomicU64::new(300)),
                served_depths: Arc::new(parking_lot::Mutex::new(Vec::new())),
            }),
            Duration::from_secs(5),
            1,
        );

        // ACT: first call occupies the worker, second fills the queue slot
        let first = {
            let guard = guard.clone();
            let position = start_position();
            tokio::spawn(async move { guard.best_move(position, 3).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = {
            let guard = guard.clone();
            let position = start_position();
            tokio::spawn(async move { guard.best_move(position, 3).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        // ASSERT: the third caller is turned away immediately
        let third = guard.best_move(start_position(), 3).await;
        assert!(matches!(third, Err(GatewayError::Busy)));

        // The queued calls still complete.
        assert!(first.await.unwrap().is_ok());
        assert!(second.await.unwrap().is_ok());
    }

    // ============================================================
    // TEST 5: Degraded mode and operator reset
    // ============================================================

    #[tokio::test]
    async fn test_unrecoverable_failure_degrades_until_reset() {
        // ARRANGE
        let guard = EngineGuard::new(
            Box::new(RecoveringEngine {
                fail_next: AtomicBool::new(true),
                unready_next: AtomicBool::new(true),
            }),
            Duration::from_secs(5),
            8,
        );

        // ACT + ASSERT: the failing call surfaces as an engine failure and
        // the post-failure health probe degrades the guard
        let result = guard.best_move(start_position(), 3).await;
        assert!(matches!(result, Err(GatewayError::EngineFailure(_))));
        assert!(guard.is_degraded());

        // Subsequent calls fail without touching the engine.
        let result = guard.best_move(start_position(), 3).await;
        assert!(matches!(result, Err(GatewayError::EngineUnavailable)));

        // ACT: operator reset
        guard.reset();
        assert!(!guard.is_degraded());

        // ASSERT: the recovered engine serves again
        let result = guard.best_move(start_position(), 3).await;
        assert_eq!(result.unwrap().0, "e2e4");
    }

    #[tokio::test]
    async fn test_non_move_result_is_an_engine_failure() {
        struct ResignEngine;
        impl SearchEngine for ResignEngine {
            fn best_move(
                &mut self,
                _position: &BoardPosition,
                _depth: u8,
            ) -> anyhow::Result<String> {
                Ok("resign".to_string())
            }
        }

        let guard = EngineGuard::new(Box::new(ResignEngine), Duration::from_secs(5), 8);

        let result = guard.best_move(start_position(), 3).await;
        assert!(matches!(result, Err(GatewayError::EngineFailure(_))));
        // The engine itself still reports ready, so the guard is not degraded.
        assert!(!guard.is_degraded());
    }

    // ============================================================
    // TEST 6: Determinism through the guard
    // ============================================================

    #[tokio::test]
    async fn test_identical_inputs_yield_identical_results() {
        let guard = EngineGuard::new(Box::new(GreedyEngine), Duration::from_secs(5), 8);

        let first = guard.best_move(start_position(), 3).await.unwrap();
        let second = guard.best_move(start_position(), 3).await.unwrap();

        assert_eq!(first, second);
    }

    // ============================================================
    // TEST 7: Greedy engine move selection
    // ============================================================

    #[test]
    fn test_greedy_start_position_is_deterministic() {
        let mut engine = GreedyEngine;
        let position = start_position();

        // No captures available: the lexicographically smallest quiet move.
        let chosen = engine.best_move(&position, 3).unwrap();
        assert_eq!(chosen, "a2a3");
    }

    #[test]
    fn test_greedy_prefers_biggest_capture() {
        // Queen on e4 can take the rook on d5.
        let fen = "k7/8/8/3r4/4Q3/8/8/K7 w - - 0 1";
        let position = BoardPosition::parse(fen).unwrap();

        let mut engine = GreedyEngine;
        assert_eq!(engine.best_move(&position, 1).unwrap(), "e4d5");
    }

    #[test]
    fn test_greedy_promotes_with_queen_suffix() {
        let fen = "8/P7/8/8/8/8/8/k6K w - - 0 1";
        let position = BoardPosition::parse(fen).unwrap();

        let mut engine = GreedyEngine;
        assert_eq!(engine.best_move(&position, 1).unwrap(), "a7a8q");
    }

    #[test]
    fn test_greedy_takes_en_passant() {
        // Black just played d7d5; the white e5 pawn may capture on d6.
        let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
        let position = BoardPosition::parse(fen).unwrap();

        let mut engine = GreedyEngine;
        assert_eq!(engine.best_move(&position, 1).unwrap(), "e5d6");
    }

    #[test]
    fn test_greedy_black_to_move() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1";
        let position = BoardPosition::parse(fen).unwrap();

        let mut engine = GreedyEngine;
        assert_eq!(engine.best_move(&position, 1).unwrap(), "a7a5");
    }
}
