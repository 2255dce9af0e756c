// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::{LoadCompletion, LoadTicket, TextureDecodeLane, TextureTask};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use orrery_core::asset::{ImageLoadError, ImageRef, ImageSource};
use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

struct LoadJob {
    task_id: u64,
    ticket: LoadTicket,
    image: ImageRef,
    width: u32,
    height: u32,
}

/// Fetches and decodes images on a pool of background threads.
///
/// [`load`](Self::load) never blocks. Results accumulate on a completion channel
/// and are collected by the owner with [`drain_completed`](Self::drain_completed),
/// once per frame. Nothing is cached: every load produces fresh pixels.
///
/// Dropping the loader abandons queued jobs and joins the workers.
pub struct TextureLoader {
    jobs: Option<Sender<LoadJob>>,
    // Keeps the completion channel connected even if every worker has exited.
    _completion_tx: Sender<LoadCompletion>,
    completion_rx: Receiver<LoadCompletion>,
    ready: VecDeque<LoadCompletion>,
    workers: Vec<JoinHandle<()>>,
    running: Arc<AtomicBool>,
    next_task_id: u64,
    in_flight: usize,
}

impl TextureLoader {
    /// Starts `workers` threads (at least one) resolving images through `source`.
    pub fn new(source: Arc<dyn ImageSource>, workers: usize) -> Self {
        let lane = TextureDecodeLane::new();
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<LoadJob>();
        let (completion_tx, completion_rx) = crossbeam_channel::unbounded();
        let running = Arc::new(AtomicBool::new(true));

        let workers = (0..workers.max(1))
            .map(|index| {
                let jobs = job_rx.clone();
                let completions = completion_tx.clone();
                let source = Arc::clone(&source);
                let running = Arc::clone(&running);
                thread::Builder::new()
                    .name(format!("orrery-texture-{index}"))
                    .spawn(move || worker_loop(jobs, completions, source, lane, running))
            })
            .filter_map(|spawned| match spawned {
                Ok(handle) => Some(handle),
                Err(e) => {
                    log::error!("Failed to spawn texture worker: {e}");
                    None
                }
            })
            .collect::<Vec<_>>();
        log::debug!("TextureLoader started with {} workers.", workers.len());

        Self {
            jobs: Some(job_tx),
            _completion_tx: completion_tx,
            completion_rx,
            ready: VecDeque::new(),
            workers,
            running,
            next_task_id: 0,
            in_flight: 0,
        }
    }

    /// Issues a load of `image`, scaled to `width` x `height`.
    ///
    /// A zero dimension resolves the task immediately with
    /// [`ImageLoadError::InvalidTarget`]; the failure is still delivered through
    /// [`drain_completed`](Self::drain_completed).
    pub fn load(
        &mut self,
        image: ImageRef,
        width: u32,
        height: u32,
        ticket: LoadTicket,
    ) -> TextureTask {
        let task_id = self.next_task_id;
        self.next_task_id += 1;
        self.in_flight += 1;
        let task = TextureTask {
            id: task_id,
            ticket,
            image: image.clone(),
        };

        if width == 0 || height == 0 {
            let error = ImageLoadError::InvalidTarget { width, height };
            self.resolve_now(task_id, ticket, image, error);
            return task;
        }

        let job = LoadJob {
            task_id,
            ticket,
            image,
            width,
            height,
        };
        let sent = match &self.jobs {
            Some(jobs) if !self.workers.is_empty() => jobs.send(job).map_err(|e| e.into_inner()),
            _ => Err(job),
        };
        if let Err(job) = sent {
            let error = ImageLoadError::Disconnected;
            self.resolve_now(job.task_id, job.ticket, job.image, error);
        } else {
            log::debug!("Queued texture load #{task_id} for '{}'.", task.image);
        }
        task
    }

    /// Returns every completion that has arrived since the last call. Never blocks.
    pub fn drain_completed(&mut self) -> Vec<LoadCompletion> {
        self.ready.extend(self.completion_rx.try_iter());
        self.in_flight = self.in_flight.saturating_sub(self.ready.len());
        self.ready.drain(..).collect()
    }

    /// Blocks until every issued load has completed or `timeout` elapses.
    ///
    /// Completions are kept for the next [`drain_completed`](Self::drain_completed).
    /// Returns `true` if nothing is left in flight.
    pub fn wait_until_settled(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.ready.len() < self.in_flight {
            match self.completion_rx.recv_deadline(deadline) {
                Ok(completion) => self.ready.push_back(completion),
                Err(RecvTimeoutError::Timeout) => return false,
                // The loader holds a sender itself, so this only happens mid-drop.
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    /// Loads issued but not yet returned by [`drain_completed`](Self::drain_completed).
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Number of live worker threads.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    fn resolve_now(
        &mut self,
        task_id: u64,
        ticket: LoadTicket,
        image: ImageRef,
        error: ImageLoadError,
    ) {
        log::debug!("Texture load #{task_id} for '{image}' resolved immediately: {error}");
        self.ready.push_back(LoadCompletion {
            task_id,
            ticket,
            image,
            result: Err(error),
        });
    }
}

impl std::fmt::Debug for TextureLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureLoader")
            .field("workers", &self.workers.len())
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl Drop for TextureLoader {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.jobs.take();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                log::error!("A texture worker panicked.");
            }
        }
        log::debug!("TextureLoader shut down.");
    }
}

fn worker_loop(
    jobs: Receiver<LoadJob>,
    completions: Sender<LoadCompletion>,
    source: Arc<dyn ImageSource>,
    lane: TextureDecodeLane,
    running: Arc<AtomicBool>,
) {
    while let Ok(job) = jobs.recv() {
        if !running.load(Ordering::Relaxed) {
            break;
        }
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            source.fetch(&job.image).and_then(|bytes| {
                lane.decode(&bytes, job.width, job.height)
                    .map_err(|e| ImageLoadError::Decode {
                        image: job.image.clone(),
                        reason: e.to_string(),
                    })
            })
        }))
        .unwrap_or_else(|payload| {
            let reason = panic_message(payload.as_ref());
            log::error!("Texture load for '{}' panicked: {reason}", job.image);
            Err(ImageLoadError::Panicked {
                image: job.image.clone(),
                reason,
            })
        });
        let completion = LoadCompletion {
            task_id: job.task_id,
            ticket: job.ticket,
            image: job.image,
            result,
        };
        if completions.send(completion).is_err() {
            break;
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
