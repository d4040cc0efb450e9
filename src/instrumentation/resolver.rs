//! Resolver decorator recording invocation counts and durations.
//!
//! [`InstrumentedResolver`] wraps a [`FieldResolver`] the same way a retry
//! or cache decorator would: the caller keeps talking to a
//! `FieldResolver` and gets the inner resolver's value back untouched.
//!
//! Synchronous values are timed right after the call returns. Deferred
//! values are wrapped in [`TimedResolution`], which records when the inner
//! future yields its output, so the duration covers the actual data fetch
//! rather than the time it took to hand back the future.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, ready};

use metrics::Label;
use pin_project_lite::pin_project;
use tracing::trace;

use super::state::TimerSample;
use crate::Result;
use crate::tags::TagsProvider;
use crate::telemetry;
use crate::types::{FieldEnvironment, FieldFetchParameters, FieldResolver, FieldValue};

/// Timer for one resolver invocation, together with the tags it will be
/// recorded under.
#[derive(Debug)]
pub struct FieldTimer {
    sample: TimerSample,
    labels: Vec<Label>,
}

impl FieldTimer {
    pub fn start(labels: Vec<Label>) -> Self {
        Self {
            sample: TimerSample::start(),
            labels,
        }
    }

    /// Record to [`telemetry::RESOLVER_TIME`].
    pub fn record(self) {
        let elapsed = self.sample.stop(telemetry::RESOLVER_TIME, self.labels);
        trace!(elapsed_us = elapsed.as_micros() as u64, "resolver time recorded");
    }
}

pin_project! {
    /// Future recording a [`FieldTimer`] once the wrapped future completes.
    ///
    /// Dropping it before completion records nothing.
    pub struct TimedResolution<F> {
        #[pin]
        inner: F,
        timer: Option<FieldTimer>,
    }
}

impl<F> TimedResolution<F> {
    pub fn new(inner: F, timer: FieldTimer) -> Self {
        Self {
            inner,
            timer: Some(timer),
        }
    }
}

impl<F: Future> Future for TimedResolution<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let output = ready!(this.inner.poll(cx));
        if let Some(timer) = this.timer.take() {
            timer.record();
        }
        Poll::Ready(output)
    }
}

/// Decorator counting and timing every invocation of `inner`.
pub struct InstrumentedResolver<P: ?Sized> {
    inner: Arc<dyn FieldResolver>,
    field: String,
    params: FieldFetchParameters,
    tags_provider: Arc<P>,
}

impl<P: TagsProvider + ?Sized> InstrumentedResolver<P> {
    /// Wrap `inner`, identified by the field tag `field`.
    pub fn new(
        inner: Arc<dyn FieldResolver>,
        field: String,
        params: FieldFetchParameters,
        tags_provider: Arc<P>,
    ) -> Self {
        Self {
            inner,
            field,
            params,
            tags_provider,
        }
    }

    /// `gql.field` ∪ field-fetch tags ∪ environment tags.
    fn labels(&self) -> Vec<Label> {
        let mut labels = vec![Label::new(telemetry::TAG_FIELD, self.field.clone())];
        labels.extend(self.tags_provider.field_fetch_tags(&self.params));
        labels.extend(self.tags_provider.environment_tags());
        labels
    }
}

impl<P: TagsProvider + ?Sized> FieldResolver for InstrumentedResolver<P> {
    fn resolve(&self, env: &FieldEnvironment) -> Result<FieldValue> {
        let labels = self.labels();
        metrics::counter!(telemetry::RESOLVER_COUNT, labels.clone()).increment(1);

        let timer = FieldTimer::start(labels);
        // a synchronous failure drops the timer unrecorded
        match self.inner.resolve(env)? {
            FieldValue::Ready(value) => {
                timer.record();
                Ok(FieldValue::Ready(value))
            }
            FieldValue::Deferred(future) => {
                trace!(field = %self.field, "deferring resolver time until value settles");
                Ok(FieldValue::Deferred(Box::pin(TimedResolution::new(
                    future, timer,
                ))))
            }
        }
    }
}
