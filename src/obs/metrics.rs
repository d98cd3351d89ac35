//! `sumsub_bridge_flow_total` counter, labeled by `flow` + `outcome`, plus `reason` on failures.

// self
use crate::{
	_prelude::*,
	error::{TransportError, UpstreamError},
	obs::{FlowKind, FlowOutcome},
};

/// Name of the per-flow counter.
pub const FLOW_COUNTER: &str = "sumsub_bridge_flow_total";

/// Records an attempt or success via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(FLOW_COUNTER, "flow" => kind.as_str(), "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records a failure of `kind`, labeled with the [`failure_reason`] of `err`.
pub fn record_flow_failure(kind: FlowKind, err: &Error) {
	let reason = failure_reason(err);

	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			FLOW_COUNTER,
			"flow" => kind.as_str(),
			"outcome" => FlowOutcome::Failure.as_str(),
			"reason" => reason
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, reason);
	}
}

/// Coarse failure class; provider statuses collapse to their class so label cardinality stays
/// bounded.
pub fn failure_reason(err: &Error) -> &'static str {
	match err {
		Error::Config(_) => "config",
		Error::Upstream(UpstreamError::Status { status, .. }) => match status / 100 {
			3 => "upstream_3xx",
			4 => "upstream_4xx",
			_ => "upstream_5xx",
		},
		Error::Upstream(UpstreamError::ResponseParse { .. }) => "response_parse",
		Error::Transport(TransportError::Timeout { .. }) => "timeout",
		Error::Transport(TransportError::Network { .. }) => "network",
		Error::Transport(TransportError::Io(_)) => "io",
	}
}
