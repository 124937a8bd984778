//! W3C `traceparent` extraction for incoming requests.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

/// The remote parent carried by `headers`, if any valid one is present.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    let context = global::get_text_map_propagator(|propagator| {
        propagator.extract_with_context(&Context::new(), &Headers(headers))
    });

    context.span().span_context().is_valid().then_some(context)
}

#[derive(Debug)]
struct Headers<'a>(&'a HeaderMap);

impl Extractor for Headers<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.to_str().ok()
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use opentelemetry_sdk::propagation::TraceContextPropagator;
    use salvo::http::header::HeaderValue;

    use super::*;

    #[test]
    fn valid_traceparent_becomes_parent() {
        global::set_text_map_propagator(TraceContextPropagator::new());

        let mut headers = HeaderMap::new();

        assert!(extract_parent_context(&headers).is_none(), "no header, no parent");

        headers.insert(
            "traceparent",
            HeaderValue::from_static("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"),
        );

        let parent = extract_parent_context(&headers);

        assert!(
            parent.is_some_and(|context| context.span().span_context().is_remote()),
            "expected a remote parent"
        );

        headers.insert("traceparent", HeaderValue::from_static("00-garbage"));

        assert!(extract_parent_context(&headers).is_none(), "malformed header ignored");
    }
}
