/*!
# Tempo: Sample Buffer
*/

use crate::TempoError;



#[derive(Debug, Clone)]
/// # Sample Buffer.
///
/// An append-only store of per-invocation durations (in nanoseconds),
/// maintaining running aggregates alongside the raw values so sessions
/// and reports never have to re-walk the set for totals.
///
/// Each [`Session`](crate::Session) owns exactly one of these; it is
/// emptied at the start of every measurement pass.
pub struct SampleBuffer {
	durations: Vec<u64>,
	min: u64,
	max: u64,
	total: u128,
}

impl Default for SampleBuffer {
	fn default() -> Self { Self::new() }
}

impl SampleBuffer {
	#[must_use]
	/// # New (Empty) Buffer.
	///
	/// The min/max aggregates start pegged to the far ends of the range
	/// so the first sample always claims both.
	pub const fn new() -> Self {
		Self {
			durations: Vec::new(),
			min: u64::MAX,
			max: 0,
			total: 0,
		}
	}

	/// # Record a Sample.
	///
	/// Append one duration (in nanoseconds) and fold it into the running
	/// aggregates.
	///
	/// ## Errors
	///
	/// Returns [`TempoError::Allocation`] if the underlying storage
	/// cannot grow; the sample is dropped and the aggregates are left
	/// untouched in that case.
	pub fn push(&mut self, ns: u64) -> Result<(), TempoError> {
		self.durations.try_reserve(1).map_err(|_| TempoError::Allocation)?;
		self.durations.push(ns);

		if ns < self.min { self.min = ns; }
		if ns > self.max { self.max = ns; }
		self.total += u128::from(ns);

		Ok(())
	}

	/// # Reserve Capacity.
	///
	/// Make room for `additional` more samples up front so a measurement
	/// pass fails early rather than halfway through.
	///
	/// ## Errors
	///
	/// Returns [`TempoError::Allocation`] if the storage cannot grow.
	pub fn reserve(&mut self, additional: usize) -> Result<(), TempoError> {
		self.durations.try_reserve(additional).map_err(|_| TempoError::Allocation)
	}

	/// # Clear Everything.
	///
	/// Drop all samples and return the aggregates to their starting
	/// sentinels. (Capacity is retained.)
	pub fn reset(&mut self) {
		self.durations.clear();
		self.min = u64::MAX;
		self.max = 0;
		self.total = 0;
	}
}

impl SampleBuffer {
	#[must_use]
	/// # Sample Count.
	pub fn len(&self) -> usize { self.durations.len() }

	#[must_use]
	/// # Is Empty?
	pub fn is_empty(&self) -> bool { self.durations.is_empty() }

	#[must_use]
	/// # Smallest Sample.
	///
	/// Zero if the buffer is empty.
	pub const fn min(&self) -> u64 {
		if self.max < self.min { 0 }
		else { self.min }
	}

	#[must_use]
	/// # Largest Sample.
	///
	/// Zero if the buffer is empty.
	pub const fn max(&self) -> u64 { self.max }

	#[must_use]
	/// # Sum of All Samples.
	pub const fn total(&self) -> u128 { self.total }

	#[must_use]
	/// # The Raw Samples.
	///
	/// In append order, not sorted.
	pub fn as_slice(&self) -> &[u64] { &self.durations }
}
