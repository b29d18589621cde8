//! Concurrent walk.
//!
//! Each sibling list is evaluated by launching every subtree and deferred
//! leaf into an in-flight set without waiting for earlier siblings. Every
//! launched branch owns a slot reserved at launch time, so the joined
//! result keeps declaration order whatever order branches finish in. A
//! deferred leaf that bails is awaited before later siblings are looked
//! at, while branches already in flight keep running.

use std::panic::AssertUnwindSafe;
use std::pin::pin;

use futures::future::{BoxFuture, Either, select};
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use serde_json::Value;

use super::step::{Step, step};
use crate::config::ValidatorConfig;
use crate::constraints::Constraint;
use crate::foundation::{ConstraintError, DeferredCheck, Outcome, Path, Rejection, Violation};
use crate::provider::Provider;

type Branch<'a> = BoxFuture<'a, (usize, Result<Vec<Violation>, ConstraintError>)>;

/// Per-list bookkeeping: reserved slots and the branches still running.
struct Join<'a> {
    slots: Vec<Vec<Violation>>,
    in_flight: FuturesUnordered<Branch<'a>>,
}

impl<'a> Join<'a> {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            in_flight: FuturesUnordered::new(),
        }
    }

    fn reserve(&mut self) -> usize {
        self.slots.push(Vec::new());
        self.slots.len() - 1
    }

    fn record(&mut self, violation: Violation) {
        self.slots.push(vec![violation]);
    }

    fn launch(&mut self, branch: Branch<'a>) {
        self.in_flight.push(branch);
    }

    /// Waits for one branch and stores its result; `false` when none is left.
    async fn settle_one(&mut self) -> Result<bool, ConstraintError> {
        match self.in_flight.next().await {
            Some((slot, result)) => {
                self.slots[slot] = result?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Settles branches until fewer than `limit` are in flight.
    async fn make_room(&mut self, limit: Option<usize>) -> Result<(), ConstraintError> {
        if let Some(limit) = limit {
            while self.in_flight.len() >= limit && self.settle_one().await? {}
        }
        Ok(())
    }

    /// Awaits `leaf` while keeping in-flight branches progressing.
    async fn drive<F>(&mut self, leaf: F) -> Result<Option<Violation>, ConstraintError>
    where
        F: Future<Output = Option<Violation>>,
    {
        let mut leaf = pin!(leaf);
        loop {
            let next = match select(leaf.as_mut(), self.in_flight.next()).await {
                Either::Left((violation, _)) => return Ok(violation),
                Either::Right((next, _)) => next,
            };
            match next {
                Some((slot, result)) => self.slots[slot] = result?,
                None => return Ok(leaf.await),
            }
        }
    }

    /// Completes every branch and flattens the slots in order.
    async fn finish(mut self) -> Result<Vec<Violation>, ConstraintError> {
        while self.settle_one().await? {}
        Ok(self.slots.into_iter().flatten().collect())
    }
}

/// Walks a constraint tree, running deferred leaves concurrently.
pub(crate) struct ConcurrentWalker<'p> {
    provider: &'p dyn Provider,
    config: &'p ValidatorConfig,
}

impl<'p> ConcurrentWalker<'p> {
    pub(crate) fn new(provider: &'p dyn Provider, config: &'p ValidatorConfig) -> Self {
        Self { provider, config }
    }

    /// Evaluates one sibling list at one position.
    pub(crate) fn walk<'a>(
        &'a self,
        value: Option<&'a Value>,
        constraints: &'a [Constraint],
        path: Path,
    ) -> BoxFuture<'a, Result<Vec<Violation>, ConstraintError>> {
        async move {
            let limit = self.config.max_in_flight.map(|n| n.get());
            let mut join = Join::new();

            for constraint in constraints {
                match step(constraint, value, &path, self.provider)? {
                    Step::Descend(branches) => {
                        for branch in branches {
                            join.make_room(limit).await?;
                            let slot = join.reserve();
                            join.launch(
                                self.walk(branch.value, branch.constraints, branch.path)
                                    .map(move |result| (slot, result))
                                    .boxed(),
                            );
                        }
                    }
                    Step::Emit(violation) => join.record(violation),
                    Step::Halt(violation) => {
                        tracing::trace!(path = %path, "value absent, skipping remaining siblings");
                        join.record(violation);
                        break;
                    }
                    Step::Pass => {}
                    Step::Leaf { outcome, bail, fqn } => match outcome {
                        Outcome::Ready(None) => {}
                        Outcome::Ready(Some(violation)) => {
                            join.record(violation);
                            if bail {
                                tracing::trace!(path = %path, fqn, "bail");
                                break;
                            }
                        }
                        Outcome::Deferred(pending) => {
                            let leaf = self.resolve(pending, value, &path, fqn);
                            if bail {
                                let slot = join.reserve();
                                if let Some(violation) = join.drive(leaf).await? {
                                    join.slots[slot].push(violation);
                                    tracing::trace!(path = %path, fqn, "bail");
                                    break;
                                }
                            } else {
                                join.make_room(limit).await?;
                                let slot = join.reserve();
                                join.launch(
                                    leaf.map(move |violation| (slot, Ok(violation.into_iter().collect())))
                                        .boxed(),
                                );
                            }
                        }
                    },
                }
            }

            join.finish().await
        }
        .boxed()
    }

    /// Awaits a deferred check, turning a rejection or panic into a
    /// `reject` violation at the check's position.
    fn resolve(
        &self,
        pending: DeferredCheck,
        value: Option<&Value>,
        path: &Path,
        fqn: &str,
    ) -> impl Future<Output = Option<Violation>> + Send + use<> {
        let catch_panics = self.config.catch_panics;
        let value = value.cloned();
        let path = path.clone();
        let fqn = fqn.to_owned();

        async move {
            let result = if catch_panics {
                AssertUnwindSafe(pending)
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|panic| Err(Rejection::from_panic(panic)))
            } else {
                pending.await
            };

            result.unwrap_or_else(|rejection| {
                tracing::warn!(path = %path, fqn = %fqn, %rejection, "deferred check rejected");
                Some(Violation::rejected(value.as_ref(), &path, rejection.into_payload()))
            })
        }
    }
}
