//! Parallel triangulation worker pool.
//!
//! Worker threads perform pure Rust computation.
//! Results are sent via crossbeam channels back to the caller.

use crossbeam::channel::{bounded, Receiver, Sender};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::debug_log::log_mesh_stats;
use crate::error::TriangulationError;
use crate::marching_squares::MeshData;
use crate::occupancy_grid::OccupancyGrid;
use crate::triangulator::{triangulate_with_config, TriangulatorConfig};

/// Fraction of detected CPUs to use for worker threads (numerator).
const THREAD_CPU_NUMERATOR: usize = 3;
/// Fraction of detected CPUs to use for worker threads (denominator).
const THREAD_CPU_DENOMINATOR: usize = 4;
/// Minimum number of worker threads.
const MIN_WORKER_THREADS: usize = 2;
/// Minimum batch size for processing requests.
const MIN_BATCH_SIZE: usize = 16;
/// Default channel capacity for request/result channels.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;
/// Smallest accepted channel capacity; zero-capacity channels cannot `try_send`.
const MIN_CHANNEL_CAPACITY: usize = 1;

/// Request sent from the caller to workers
pub struct MeshRequest {
    pub id: u64,
    pub grid: Arc<OccupancyGrid>,
    pub config: TriangulatorConfig,
}

/// One finished triangulation, tagged with its request id.
pub struct MeshResponse {
    pub id: u64,
    pub result: Result<MeshData, TriangulationError>,
}

/// Worker pool for batch triangulation
pub struct MeshWorkerPool {
    thread_count: usize,
    pool: Option<rayon::ThreadPool>,
    request_tx: Sender<MeshRequest>,
    request_rx: Receiver<MeshRequest>,
    result_tx: Sender<MeshResponse>,
    result_rx: Receiver<MeshResponse>,
}

impl MeshWorkerPool {
    /// Create a pool with `num_threads` workers (0 picks from the CPU count).
    ///
    /// `channel_capacity` bounds the request queue and is raised to 1 if zero.
    /// The result queue always holds at least one full batch.
    pub fn new(num_threads: usize, channel_capacity: usize) -> Self {
        let detected_cpus = num_cpus::get();
        let threads = if num_threads == 0 {
            ((detected_cpus * THREAD_CPU_NUMERATOR) / THREAD_CPU_DENOMINATOR)
                .max(MIN_WORKER_THREADS)
        } else {
            num_threads
        };

        // Falls back to the global rayon pool if a dedicated one cannot start.
        let pool = match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => Some(pool),
            Err(err) => {
                warn!(%err, threads, "could not build worker pool, using global rayon pool");
                None
            }
        };

        if channel_capacity < MIN_CHANNEL_CAPACITY {
            warn!(channel_capacity, "channel capacity raised to {}", MIN_CHANNEL_CAPACITY);
        }
        let request_capacity = channel_capacity.max(MIN_CHANNEL_CAPACITY);
        let result_capacity = request_capacity.max(batch_size(threads));

        let (request_tx, request_rx) = bounded(request_capacity);
        let (result_tx, result_rx) = bounded(result_capacity);

        Self {
            thread_count: threads,
            pool,
            request_tx,
            request_rx,
            result_tx,
            result_rx,
        }
    }

    pub fn request_sender(&self) -> Sender<MeshRequest> {
        self.request_tx.clone()
    }

    pub fn result_receiver(&self) -> Receiver<MeshResponse> {
        self.result_rx.clone()
    }

    /// Drain one batch of pending requests and triangulate them in parallel.
    /// Returns the number of requests taken from the queue.
    ///
    /// One batch always fits in the result queue. Callers must drain
    /// `result_receiver()` between calls; a result that finds the queue
    /// full is dropped with a warning.
    pub fn process_requests(&self) -> usize {
        let limit = batch_size(self.thread_count);
        let mut batch = Vec::with_capacity(limit);

        while batch.len() < limit {
            match self.request_rx.try_recv() {
                Ok(req) => batch.push(req),
                Err(_) => break,
            }
        }

        let taken = batch.len();
        if batch.is_empty() {
            return 0;
        }
        debug!(requests = taken, "processing triangulation batch");

        let result_tx = self.result_tx.clone();
        let run = move || {
            rayon::scope(|scope| {
                for request in batch {
                    let tx = result_tx.clone();
                    scope.spawn(move |_| {
                        let response = generate_mesh_for_request(&request);
                        if tx.try_send(response).is_err() {
                            warn!(id = request.id, "result channel full, dropping mesh");
                        }
                    });
                }
            })
        };

        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
        taken
    }

    pub fn thread_count(&self) -> usize {
        self.thread_count
    }

    pub fn shutdown(&mut self) {
        while self.request_rx.try_recv().is_ok() {}
        while self.result_rx.try_recv().is_ok() {}
    }
}

impl Default for MeshWorkerPool {
    fn default() -> Self {
        Self::new(0, DEFAULT_CHANNEL_CAPACITY)
    }
}

fn batch_size(thread_count: usize) -> usize {
    thread_count.max(MIN_BATCH_SIZE)
}

fn generate_mesh_for_request(request: &MeshRequest) -> MeshResponse {
    let result = triangulate_with_config(&request.grid, &request.config);
    if cfg!(debug_assertions) {
        if let Ok(mesh) = &result {
            log_mesh_stats(&format!("request {}", request.id), mesh);
        }
    }
    MeshResponse {
        id: request.id,
        result,
    }
}

#[cfg(test)]
mod tests {
    use crossbeam::channel::TrySendError;

    use super::*;
    use crate::noise_field::NoiseField;
    use std::time::Duration;

    fn test_grid() -> Arc<OccupancyGrid> {
        Arc::new(NoiseField::new(42, 4, 0.1).to_occupancy(16, 1.0, 0.0))
    }

    fn request(id: u64, grid: Arc<OccupancyGrid>) -> MeshRequest {
        MeshRequest {
            id,
            grid,
            config: TriangulatorConfig::default(),
        }
    }

    #[test]
    fn test_worker_pool_creation() {
        let pool = MeshWorkerPool::new(2, 64);
        assert!(pool.thread_count() >= 1);
    }

    #[test]
    fn test_worker_pool_default() {
        let pool = MeshWorkerPool::default();
        assert!(pool.thread_count() >= MIN_WORKER_THREADS);
    }

    #[test]
    fn test_thread_count_matches_requested() {
        let requested = 4;
        let pool = MeshWorkerPool::new(requested, 64);

        assert_eq!(
            pool.thread_count(),
            requested,
            "Thread count should match requested"
        );
    }

    #[test]
    fn test_send_and_receive_mesh() {
        let pool = MeshWorkerPool::new(2, 64);
        let grid = test_grid();

        pool.request_sender()
            .send(request(7, Arc::clone(&grid)))
            .expect("Should send request");

        assert_eq!(pool.process_requests(), 1);

        let response = pool
            .result_receiver()
            .recv_timeout(Duration::from_secs(5))
            .expect("Should receive result");

        assert_eq!(response.id, 7);
        let expected = crate::triangulator::triangulate(&grid, 1.0, Default::default()).unwrap();
        assert_eq!(response.result.unwrap(), expected);
    }

    #[test]
    fn test_errors_are_delivered() {
        let pool = MeshWorkerPool::new(2, 64);
        let bad = Arc::new(OccupancyGrid::filled(5, 6, true));

        pool.request_sender().send(request(1, bad)).unwrap();
        pool.process_requests();

        let response = pool
            .result_receiver()
            .recv_timeout(Duration::from_secs(5))
            .expect("Should receive result");
        assert!(matches!(
            response.result,
            Err(TriangulationError::DimensionMismatch { width: 5, height: 6 })
        ));
    }

    #[test]
    fn test_multiple_requests_parallel() {
        let pool = MeshWorkerPool::new(4, 64);
        let grid = test_grid();

        for id in 0..4 {
            pool.request_sender()
                .send(request(id, Arc::clone(&grid)))
                .unwrap();
        }

        pool.process_requests();

        let mut received = Vec::new();
        while let Ok(response) = pool.result_receiver().try_recv() {
            received.push(response.id);
        }
        received.sort_unstable();

        assert_eq!(received, vec![0, 1, 2, 3], "Should receive all 4 results");
    }

    #[test]
    fn test_bounded_channels_dont_block() {
        let pool = MeshWorkerPool::new(1, 64);
        let grid = test_grid();

        let mut sent = 0;
        for id in 0..100 {
            match pool.request_sender().try_send(request(id, Arc::clone(&grid))) {
                Ok(_) => sent += 1,
                Err(TrySendError::Full(_)) => break,
                Err(TrySendError::Disconnected(_)) => panic!("Channel disconnected"),
            }
        }

        assert!(sent <= 64, "Should stop at channel capacity");
        assert!(sent > 0, "Should have sent some requests");
    }

    #[test]
    fn test_zero_capacity_still_delivers() {
        let pool = MeshWorkerPool::new(1, 0);
        let grid = test_grid();

        pool.request_sender()
            .try_send(request(3, Arc::clone(&grid)))
            .expect("Zero capacity is raised to one slot");
        assert_eq!(pool.process_requests(), 1);

        let response = pool
            .result_receiver()
            .recv_timeout(Duration::from_secs(5))
            .expect("Result should not be dropped");
        assert_eq!(response.id, 3);
    }

    #[test]
    fn test_full_batch_fits_small_result_queue() {
        let pool = MeshWorkerPool::new(1, 2);
        let grid = test_grid();

        let mut received = Vec::new();
        for round in 0..3u64 {
            for id in 0..2 {
                pool.request_sender()
                    .send(request(round * 2 + id, Arc::clone(&grid)))
                    .unwrap();
            }
            assert_eq!(pool.process_requests(), 2);
            while let Ok(response) = pool.result_receiver().try_recv() {
                received.push(response.id);
            }
        }
        received.sort_unstable();

        assert_eq!(received, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_shutdown_drains_queues() {
        let mut pool = MeshWorkerPool::new(1, 8);
        pool.request_sender().send(request(0, test_grid())).unwrap();
        pool.shutdown();
        assert_eq!(pool.process_requests(), 0);
    }
}
