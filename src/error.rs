/*!
# Tempo: Errors
*/

use std::fmt;



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Error.
///
/// This enum serves as the custom error type for `Tempo`.
pub enum TempoError {
	/// # Sample storage could not grow.
	Allocation,

	/// # No benchmarks were specified.
	NoBench,

	/// # The platform monotonic clock could not be acquired.
	TimerUnavailable,
}

impl std::error::Error for TempoError {}

impl fmt::Display for TempoError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Allocation => f.write_str("Unable to allocate sample storage."),
			Self::NoBench => f.write_str("At least one benchmark is required."),
			Self::TimerUnavailable => f.write_str("The monotonic clock is unavailable."),
		}
	}
}
