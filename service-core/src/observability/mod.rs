pub mod logging;
pub mod metrics;
pub mod trace_context;

pub use logging::init_tracing;
pub use self::metrics::{get_metrics, init_metrics};
pub use trace_context::{
    current_request_id, inject_trace_context, inject_trace_headers, with_request_id,
    TracedClientExt, TracedRequest, REQUEST_ID_HEADER, TRACEPARENT_HEADER, TRACESTATE_HEADER,
};
