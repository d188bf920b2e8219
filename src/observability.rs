use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("advisor_chat.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter =
    Counter::new("advisor_chat.client.request_errors");
pub(crate) static CLIENT_TIMEOUTS: Counter = Counter::new("advisor_chat.client.timeouts");
pub(crate) static CLIENT_CONNECTION_ERRORS: Counter =
    Counter::new("advisor_chat.client.connection_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("advisor_chat.client.request_duration_seconds");
pub(crate) static CLIENT_PROBES: Counter = Counter::new("advisor_chat.client.probes");
pub(crate) static CLIENT_PROBE_FAILURES: Counter =
    Counter::new("advisor_chat.client.probe_failures");

pub(crate) static SESSION_SENDS: Counter = Counter::new("advisor_chat.session.sends");
pub(crate) static SESSION_SEND_REJECTIONS: Counter =
    Counter::new("advisor_chat.session.send_rejections");
pub(crate) static SESSION_SEND_FAILURES: Counter =
    Counter::new("advisor_chat.session.send_failures");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_counter(&CLIENT_TIMEOUTS);
    collector.register_counter(&CLIENT_CONNECTION_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);
    collector.register_counter(&CLIENT_PROBES);
    collector.register_counter(&CLIENT_PROBE_FAILURES);

    collector.register_counter(&SESSION_SENDS);
    collector.register_counter(&SESSION_SEND_REJECTIONS);
    collector.register_counter(&SESSION_SEND_FAILURES);
}
