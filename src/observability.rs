use biometrics::{Collector, Counter};

pub(crate) static PROBE_REQUESTS: Counter = Counter::new("courier.probe.requests");
pub(crate) static PROBE_FAILURES: Counter = Counter::new("courier.probe.failures");

pub(crate) static ROUTE_REMOTE: Counter = Counter::new("courier.dispatch.remote");
pub(crate) static ROUTE_LOCAL: Counter = Counter::new("courier.dispatch.local");

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("courier.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("courier.client.request_errors");

pub(crate) static STREAM_FRAGMENTS: Counter = Counter::new("courier.stream.fragments");
pub(crate) static STREAM_SKIPPED_LINES: Counter = Counter::new("courier.stream.skipped_lines");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&PROBE_REQUESTS);
    collector.register_counter(&PROBE_FAILURES);

    collector.register_counter(&ROUTE_REMOTE);
    collector.register_counter(&ROUTE_LOCAL);

    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);

    collector.register_counter(&STREAM_FRAGMENTS);
    collector.register_counter(&STREAM_SKIPPED_LINES);
}
