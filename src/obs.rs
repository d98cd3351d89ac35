//! Optional observability helpers for bridge flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `sumsub_bridge.flow` with the `flow`
//!   (operation) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `sumsub_bridge_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`; failures also carry a `reason`
//!   (`upstream_4xx`, `timeout`, `network`, ...).
//! - Enable `server` to get [`init_tracing`], which installs the process-wide subscriber.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operations observed by the bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Full session bootstrap (applicant + token).
	Bootstrap,
	/// `POST /resources/applicants`.
	CreateApplicant,
	/// `POST /resources/accessTokens/sdk`.
	MintAccessToken,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Bootstrap => "bootstrap",
			FlowKind::CreateApplicant => "create_applicant",
			FlowKind::MintAccessToken => "mint_access_token",
		}
	}

	/// Returns the subject used when describing a failure of this operation.
	pub const fn failure_label(self) -> &'static str {
		match self {
			FlowKind::Bootstrap => "Session bootstrap",
			FlowKind::CreateApplicant => "Applicant creation",
			FlowKind::MintAccessToken => "Token creation",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a bridge operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside a [`FlowSpan`] and records attempt/success/failure for `kind`.
pub async fn observe<T, Fut>(kind: FlowKind, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = FlowSpan::new(kind, stage);

	record_flow_outcome(kind, FlowOutcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => record_flow_outcome(kind, FlowOutcome::Success),
		Err(e) => {
			#[cfg(feature = "tracing")]
			::tracing::warn!(
				flow = kind.as_str(),
				stage,
				reason = failure_reason(e),
				error = %e,
				"Flow failed."
			);

			record_flow_failure(kind, e)
		},
	}

	result
}
