/*!
# Tempo: Clocks
*/

use crate::TempoError;
use std::time::{
	Duration,
	Instant,
};



/// # Monotonic Timer.
///
/// A session times its workload through this abstraction rather than
/// touching the platform clock directly, allowing tests (and exotic
/// platforms) to substitute their own source.
///
/// Implementations must be monotonic: [`Clock::read`] reports the time
/// elapsed since the last [`Clock::reset`], and can never go backward.
pub trait Clock {
	/// # Restart the Timer.
	fn reset(&mut self);

	/// # Elapsed Since Reset.
	fn read(&self) -> Duration;
}



#[derive(Debug, Clone, Copy)]
/// # Standard Monotonic Clock.
///
/// The default [`Clock`], backed by [`std::time::Instant`].
pub struct MonotonicClock {
	epoch: Instant,
}

impl MonotonicClock {
	/// # New Instance.
	///
	/// Acquire the platform monotonic clock and take a sanity reading.
	///
	/// ## Errors
	///
	/// Returns [`TempoError::TimerUnavailable`] if consecutive readings
	/// come back out of order.
	pub fn try_new() -> Result<Self, TempoError> {
		let epoch = Instant::now();
		if Instant::now() < epoch { return Err(TempoError::TimerUnavailable); }
		Ok(Self { epoch })
	}
}

impl Clock for MonotonicClock {
	fn reset(&mut self) { self.epoch = Instant::now(); }

	fn read(&self) -> Duration { self.epoch.elapsed() }
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_monotonic() {
		let mut clock = MonotonicClock::try_new().expect("Clock unavailable.");
		clock.reset();
		let a = clock.read();
		let b = clock.read();
		assert!(a <= b, "Clock went backward.");
	}
}
