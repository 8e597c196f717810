//! Element id generation

use log::trace;
use rand::Rng;
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::element::ElementId;

/// Source of fresh element ids
///
/// Implemented for any `FnMut() -> ElementId` closure.
pub trait IdGenerator {
    /// Produce the next id
    fn next_id(&mut self) -> ElementId;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> ElementId,
{
    fn next_id(&mut self) -> ElementId {
        self()
    }
}

/// Generates `el-<nanos>-<counter>-<random>` ids
///
/// Practically collision-free within a process: the counter separates ids
/// minted within the same clock tick and the random suffix separates
/// generators.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    counter: u64,
}

impl TimestampIdGenerator {
    /// Create a new generator
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&mut self) -> ElementId {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        self.counter += 1;
        let suffix: u32 = rand::thread_rng().gen();
        ElementId::from(format!("el-{:x}-{}-{:08x}", nanos, self.counter, suffix))
    }
}

/// Generates `<prefix>1`, `<prefix>2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    /// Create a generator starting at 1
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    /// Create a generator starting at `start`
    pub fn starting_at(prefix: impl Into<String>, start: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: start,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> ElementId {
        let id = ElementId::from(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Draw an id from `generator` that is not in `taken`, and reserve it
///
/// The generator gets `max_attempts` tries. After that a `-<n>` suffix is
/// appended to its last answer until the id is free, so the result never
/// collides even with a degenerate generator.
pub fn fresh_id<G>(
    generator: &mut G,
    taken: &mut HashSet<ElementId>,
    max_attempts: usize,
) -> ElementId
where
    G: IdGenerator + ?Sized,
{
    let mut candidate = generator.next_id();
    let mut attempts = 1;
    while taken.contains(&candidate) && attempts < max_attempts {
        trace!("generated id {} is taken, retrying", candidate);
        candidate = generator.next_id();
        attempts += 1;
    }

    if taken.contains(&candidate) {
        let base = candidate.as_str().to_string();
        let mut n = 1u64;
        loop {
            candidate = ElementId::from(format!("{}-{}", base, n));
            if !taken.contains(&candidate) {
                break;
            }
            n += 1;
        }
    }

    taken.insert(candidate.clone());
    candidate
}
