// self
use crate::{_prelude::*, obs::Operation};

/// Future returned by [`RequestSpan::instrument`]; the bare future without `tracing`.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`RequestSpan::instrument`]; the bare future without `tracing`.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// The `instagram_client.request` span for one API call.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Opens a span labeled with `operation` for a call to `endpoint`.
	///
	/// `endpoint` is the path relative to the API base, or the token endpoint's path for the
	/// code exchange. Query strings never reach the span, so tokens stay out of the logs.
	pub fn new(operation: Operation, endpoint: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			Self {
				span: tracing::info_span!(
					"instagram_client.request",
					operation = operation.as_str(),
					endpoint
				),
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, endpoint);

			Self {}
		}
	}

	/// Attaches the span to `call` so it is entered on every poll.
	pub fn instrument<F>(&self, call: F) -> InstrumentedRequest<F>
	where
		F: Future,
	{
		#[cfg(feature = "tracing")]
		{
			tracing::Instrument::instrument(call, self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			call
		}
	}
}
