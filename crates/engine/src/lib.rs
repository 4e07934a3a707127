//! Job queue and worker engine for the optimization subsystem.
//!
//! The API enqueues through the [`queue::JobQueue`] trait and returns
//! immediately; execution happens on a worker constructed per dispatch.
//! Two queue implementations exist: the in-process pool spawned by the API
//! binary, and the database-polling [`dispatcher::Dispatcher`] run by the
//! standalone worker binary. Both funnel into the same CAS claim, so any
//! mix of them preserves at-most-one-active-worker-per-job.

pub mod dispatcher;
pub mod queue;
pub mod snapshot;
pub mod worker;
