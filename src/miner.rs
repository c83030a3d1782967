//! Proof-of-work nonce search
//!
//! The search starts at nonce 0 and resamples the wall-clock timestamp on
//! every attempt, so two searches over the same inputs will generally settle
//! on different nonces. The winning timestamp is returned with the nonce so the
//! sealed block can carry the exact preimage that met the target.
//!
//! A search has no natural upper bound. It observes a [`CancelToken`] on every
//! attempt and can optionally be capped with a maximum attempt count.

use crate::crypto::{block_hash, meets_difficulty, HASH_HEX_LEN};
use crate::error::{ChainError, Result};
use chrono::{SecondsFormat, Utc};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100_000;

/// Shared stop flag for an in-flight search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Clear the flag so the token can guard the next search.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// A nonce that satisfied the difficulty target, with the timestamp and hash it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub nonce: u64,
    pub timestamp: String,
    pub hash: String,
    pub attempts: u64,
}

#[derive(Debug, Clone)]
pub struct ProofOfWork {
    difficulty: u32,
    max_attempts: Option<u64>,
    progress_interval: u64,
}

impl ProofOfWork {
    /// Rejects difficulties above the number of hex digits in a hash, which could never be met.
    pub fn new(difficulty: u32) -> Result<Self> {
        if difficulty as usize > HASH_HEX_LEN {
            return Err(ChainError::InvalidDifficulty(difficulty));
        }
        Ok(Self {
            difficulty,
            max_attempts: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        })
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<u64>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Search for a nonce whose hash over `(timestamp || digest(commitment), nonce, previous_hash)`
    /// has `difficulty` leading zero hex digits.
    pub fn search(&self, previous_hash: &str, commitment: &str, cancel: &CancelToken) -> Result<Solution> {
        let mut nonce: u64 = 0;
        loop {
            if cancel.is_cancelled() {
                warn!("Mining cancelled after {} attempts", nonce);
                return Err(ChainError::MiningCancelled);
            }
            if let Some(max) = self.max_attempts {
                if nonce >= max {
                    warn!("Mining exhausted {} attempts at difficulty {}", max, self.difficulty);
                    return Err(ChainError::MiningExhausted(max));
                }
            }

            let timestamp = current_timestamp();
            let hash = block_hash(&timestamp, commitment, nonce, previous_hash);
            if meets_difficulty(&hash, self.difficulty) {
                info!(
                    "Found nonce {} at difficulty {} after {} attempts",
                    nonce,
                    self.difficulty,
                    nonce + 1
                );
                return Ok(Solution {
                    nonce,
                    timestamp,
                    hash,
                    attempts: nonce + 1,
                });
            }

            nonce += 1;
            if self.progress_interval > 0 && nonce % self.progress_interval == 0 {
                debug!("Mining attempt {} (difficulty {})", nonce, self.difficulty);
            }
        }
    }
}

/// Find a nonce chained off `previous_hash` with no payload commitment and no cancellation.
pub fn find_nonce(previous_hash: &str, difficulty: u32) -> Result<Solution> {
    ProofOfWork::new(difficulty)?.search(previous_hash, "", &CancelToken::new())
}

/// Wall-clock time in RFC 3339 with nanoseconds.
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// A search running on its own thread. Dropping the job cancels it.
pub struct MiningJob {
    cancel: CancelToken,
    receiver: Receiver<Result<Solution>>,
    handle: Option<JoinHandle<()>>,
}

impl MiningJob {
    pub fn spawn(pow: ProofOfWork, previous_hash: String, commitment: String) -> Self {
        let cancel = CancelToken::new();
        let (sender, receiver) = bounded(1);
        let worker_cancel = cancel.clone();
        let handle = std::thread::spawn(move || {
            let result = pow.search(&previous_hash, &commitment, &worker_cancel);
            // The receiver may already be gone if the job was dropped.
            let _ = sender.send(result);
        });
        Self {
            cancel,
            receiver,
            handle: Some(handle),
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Block until the search finishes or is cancelled.
    pub fn wait(&self) -> Result<Solution> {
        self.receiver.recv().map_err(|_| ChainError::MiningCancelled)?
    }

    /// `None` if the search is still running after `timeout`.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<Solution>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(ChainError::MiningCancelled)),
        }
    }
}

impl Drop for MiningJob {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::leading_zeros;

    #[test]
    fn test_difficulty_zero_accepts_first_nonce() {
        let solution = find_nonce("0000", 0).unwrap();
        assert_eq!(solution.nonce, 0);
        assert_eq!(solution.attempts, 1);
    }

    #[test]
    fn test_solution_meets_difficulty() {
        for difficulty in 0..=2 {
            let solution = find_nonce("0000", difficulty).unwrap();
            assert!(leading_zeros(&solution.hash) >= difficulty as usize);
            assert_eq!(
                solution.hash,
                block_hash(&solution.timestamp, "", solution.nonce, "0000")
            );
        }
    }

    #[test]
    fn test_commitment_is_bound_into_hash() {
        let pow = ProofOfWork::new(1).unwrap();
        let solution = pow.search("abcd", "[]", &CancelToken::new()).unwrap();
        assert_eq!(
            solution.hash,
            block_hash(&solution.timestamp, "[]", solution.nonce, "abcd")
        );
    }

    #[test]
    fn test_impossible_difficulty_rejected() {
        assert_eq!(
            ProofOfWork::new(65).unwrap_err(),
            ChainError::InvalidDifficulty(65)
        );
        assert!(ProofOfWork::new(64).is_ok());
    }

    #[test]
    fn test_cancelled_token_stops_search() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let pow = ProofOfWork::new(64).unwrap();
        assert_eq!(
            pow.search("0000", "", &cancel).unwrap_err(),
            ChainError::MiningCancelled
        );
        cancel.reset();
        assert!(!cancel.is_cancelled());
    }

    #[test]
    fn test_max_attempts_bounds_search() {
        let pow = ProofOfWork::new(64).unwrap().with_max_attempts(Some(50));
        assert_eq!(
            pow.search("0000", "", &CancelToken::new()).unwrap_err(),
            ChainError::MiningExhausted(50)
        );
    }

    #[test]
    fn test_background_job_can_be_cancelled() {
        let pow = ProofOfWork::new(64).unwrap();
        let job = MiningJob::spawn(pow, "0000".to_string(), String::new());
        assert!(job.wait_timeout(Duration::from_millis(20)).is_none());
        let token = job.cancel_token();
        token.cancel();
        assert!(token.is_cancelled());
        assert_eq!(job.wait().unwrap_err(), ChainError::MiningCancelled);
    }

    #[test]
    fn test_background_job_cancel_method() {
        let pow = ProofOfWork::new(64).unwrap();
        let job = MiningJob::spawn(pow, "0000".to_string(), String::new());
        job.cancel();
        assert_eq!(job.wait().unwrap_err(), ChainError::MiningCancelled);
    }

    #[test]
    fn test_background_job_delivers_solution() {
        let pow = ProofOfWork::new(1).unwrap();
        let job = MiningJob::spawn(pow, "0000".to_string(), "[]".to_string());
        let solution = job
            .wait_timeout(Duration::from_secs(30))
            .expect("search finished")
            .unwrap();
        assert!(solution.hash.starts_with('0'));
    }
}
