use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::expression::{PrintStyle, evaluate_rpn};
use crate::pool::{PoolConfig, PoolError, WorkerPool, WorkerStatus};
use crate::solutions;
use crate::solver::{Game, TargetRange};

/// In-memory writer shared between the pool and the test
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().map(|bytes| bytes.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(String::from)
            .collect()
    }

    fn sorted_lines(&self) -> Vec<String> {
        let mut lines = self.lines();
        lines.sort();
        lines
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.0.lock() {
            Ok(mut bytes) => {
                bytes.extend_from_slice(buf);
                Ok(buf.len())
            }
            Err(_) => Err(io::Error::other("buffer poisoned")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn start_pool(threads: usize, style: PrintStyle) -> (WorkerPool, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let config = PoolConfig::default()
        .with_threads(threads)
        .with_capacity(6)
        .with_style(style);
    let pool = WorkerPool::with_writer(config, Box::new(buffer.clone()));
    assert!(pool.is_ok());
    match pool {
        Ok(pool) => (pool, buffer),
        Err(err) => panic!("pool failed to start: {}", err),
    }
}

fn game(numbers: &[u64], target: u64) -> Game {
    match Game::new(numbers.to_vec(), TargetRange::exact(target)) {
        Ok(game) => game,
        Err(err) => panic!("invalid test game: {}", err),
    }
}

fn expected(numbers: &[u64], target: TargetRange, style: PrintStyle) -> Vec<String> {
    let mut lines = solutions(numbers, target, style).unwrap_or_default();
    lines.sort();
    lines
}

#[test]
fn test_solve_prints_single_solution() {
    let (pool, buffer) = start_pool(2, PrintStyle::Expr);
    let found = pool.solve(game(&[1, 2], 3));
    assert!(matches!(found, Ok(1)));
    assert_eq!(buffer.lines(), vec!["2 + 1"]);
}

#[test]
fn test_solution_set_independent_of_thread_count() {
    let numbers = [2, 3, 5, 7, 11];
    let reference = expected(&numbers, TargetRange::exact(30), PrintStyle::Rpn);
    assert!(!reference.is_empty());

    for threads in [1, 2, 4] {
        let (pool, buffer) = start_pool(threads, PrintStyle::Rpn);
        let found = pool.solve(game(&numbers, 30));
        assert!(matches!(found, Ok(n) if n as usize == reference.len()));
        assert_eq!(buffer.sorted_lines(), reference, "threads = {}", threads);
        for line in buffer.lines() {
            assert_eq!(evaluate_rpn(&line), Ok(30));
        }
    }
}

#[test]
fn test_idle_workers_receive_forks() {
    let (pool, _buffer) = start_pool(4, PrintStyle::Rpn);
    assert!(pool.solve(game(&[2, 3, 5, 7, 11], 30)).is_ok());
    assert!(pool.stats().forks > 0);

    let (pool, _buffer) = start_pool(1, PrintStyle::Rpn);
    assert!(pool.solve(game(&[2, 3, 5, 7, 11], 30)).is_ok());
    assert_eq!(pool.stats().forks, 0);
}

#[test]
fn test_no_fork_below_slack() {
    let buffer = SharedBuffer::default();
    let config = PoolConfig::default().with_threads(4).with_capacity(6).with_slack(5);
    let pool = WorkerPool::with_writer(config, Box::new(buffer.clone()));
    assert!(pool.is_ok());
    if let Ok(pool) = pool {
        assert!(pool.solve(game(&[2, 3, 5, 7, 11], 30)).is_ok());
        assert_eq!(pool.stats().forks, 0);
    }
}

#[test]
fn test_range_target_through_pool() {
    let (pool, buffer) = start_pool(3, PrintStyle::Expr);
    let range = TargetRange::new(1, 3);
    assert!(range.is_ok());
    if let Ok(range) = range {
        let game = Game::new(vec![1, 2], range);
        assert!(game.is_ok());
        if let Ok(game) = game {
            assert!(matches!(pool.solve(game), Ok(3)));
        }
    }
    assert_eq!(buffer.sorted_lines(), vec!["1 = 1", "2 = 2", "3 = 2 + 1"]);
}

#[test]
fn test_game_over_capacity_is_rejected() {
    let (pool, buffer) = start_pool(2, PrintStyle::Expr);
    let result = pool.solve(game(&[1, 2, 3, 4, 5, 6, 7], 10));
    assert!(matches!(
        result,
        Err(PoolError::CapacityExceeded {
            count: 7,
            capacity: 6
        })
    ));
    assert!(buffer.lines().is_empty());
    assert_eq!(pool.stats().searches, 0);
}

#[test]
fn test_zero_threads_rejected() {
    let config = PoolConfig {
        threads: 0,
        ..PoolConfig::default()
    };
    let result = WorkerPool::with_writer(config, Box::new(SharedBuffer::default()));
    assert!(matches!(result, Err(PoolError::NoWorkers)));
}

#[test]
fn test_generate_batches_many_searches() {
    let games: [(&[u64], u64); 4] = [
        (&[1, 2], 3),
        (&[2, 2], 4),
        (&[2, 3, 5, 7, 11], 30),
        (&[25, 50, 3, 8, 1], 247),
    ];

    let mut reference = Vec::new();
    for (numbers, target) in games {
        reference.extend(expected(numbers, TargetRange::exact(target), PrintStyle::Rpn));
    }
    reference.sort();

    let (pool, buffer) = start_pool(3, PrintStyle::Rpn);
    for (numbers, target) in games {
        assert!(pool.generate(game(numbers, target)).is_ok());
    }
    pool.wait_idle();

    assert_eq!(buffer.sorted_lines(), reference);
    assert_eq!(pool.stats().searches, 4);
    assert!(
        pool.statuses()
            .iter()
            .all(|&status| status == WorkerStatus::Idle)
    );
}

#[test]
fn test_workers_are_reused_across_solves() {
    let (pool, buffer) = start_pool(2, PrintStyle::Expr);
    assert!(matches!(pool.solve(game(&[1, 2], 3)), Ok(1)));
    assert!(matches!(pool.solve(game(&[2, 2], 4)), Ok(4)));
    assert!(matches!(pool.solve(game(&[3], 5)), Ok(0)));

    let stats = pool.stats();
    assert_eq!(stats.searches, 3);
    assert_eq!(stats.solutions, 5);
    assert_eq!(buffer.lines().len(), 5);
    pool.shutdown();
}

#[test]
fn test_announce_goes_through_output() {
    let (pool, buffer) = start_pool(1, PrintStyle::Expr);
    pool.announce("numbers: 1 2");
    assert!(pool.solve(game(&[1, 2], 3)).is_ok());
    assert_eq!(buffer.lines(), vec!["numbers: 1 2", "2 + 1"]);
}
