/*!
# Tempo: Results
*/

use crate::{
	math,
	SampleBuffer,
	TempoError,
};
use dactyl::traits::SaturatingFrom;
use serde::{
	Deserialize,
	Serialize,
};
use std::{
	fs::File,
	io::Write,
	path::PathBuf,
};



#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
/// # Percentile Triple.
///
/// The p75/p99/p99.5 cuts of a sample set, in nanoseconds. All three
/// are zero when the set held fewer than two samples.
pub struct Percentiles {
	/// # 75th Percentile.
	pub p75: u64,

	/// # 99th Percentile.
	pub p99: u64,

	/// # 99.5th Percentile.
	pub p995: u64,
}



#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
/// # Benchmark Result.
///
/// The immutable summary of one completed measurement pass. All
/// durations are whole nanoseconds; the statistics use truncating
/// integer math throughout, so each figure may understate the "true"
/// value by up to a nanosecond.
pub struct BenchmarkResult {
	name: String,
	total_operations: u64,
	total_time: u64,
	average: u64,
	std_deviation: u64,
	min: u64,
	max: u64,
	percentiles: Percentiles,
}

impl BenchmarkResult {
	#[must_use]
	/// # From a Finished Buffer.
	///
	/// Reduce a sample buffer to its summary. The buffer is only read;
	/// the result carries no reference back to it.
	pub fn from_samples(name: &str, operations: u64, samples: &SampleBuffer) -> Self {
		let set = samples.as_slice();
		Self {
			name: name.to_owned(),
			total_operations: operations,
			total_time: u64::saturating_from(samples.total()),
			average: math::mean(set),
			std_deviation: math::std_deviation(set),
			min: samples.min(),
			max: samples.max(),
			percentiles: math::percentiles(set),
		}
	}

	#[must_use]
	/// # Benchmark Name.
	pub fn name(&self) -> &str { &self.name }

	#[must_use]
	/// # Workload Invocations in the Measured Pass.
	pub const fn total_operations(&self) -> u64 { self.total_operations }

	#[must_use]
	/// # Sum of All Measured Durations.
	pub const fn total_time(&self) -> u64 { self.total_time }

	#[must_use]
	/// # Mean Duration.
	pub const fn average(&self) -> u64 { self.average }

	#[must_use]
	/// # Standard Deviation.
	pub const fn std_deviation(&self) -> u64 { self.std_deviation }

	#[must_use]
	/// # Fastest Invocation.
	pub const fn min(&self) -> u64 { self.min }

	#[must_use]
	/// # Slowest Invocation.
	pub const fn max(&self) -> u64 { self.max }

	#[must_use]
	/// # Percentile Cuts.
	pub const fn percentiles(&self) -> Percentiles { self.percentiles }
}



#[derive(Debug, Default, Clone, Serialize, Deserialize)]
/// # Result Collection.
///
/// Holds the results of a batch of benchmarks in the order they were
/// appended, ready for rendering or export. The [`benches`](crate::benches)
/// macro builds one of these for you.
pub struct ResultSet(Vec<BenchmarkResult>);

impl Extend<BenchmarkResult> for ResultSet {
	fn extend<T: IntoIterator<Item=BenchmarkResult>>(&mut self, iter: T) {
		for r in iter { self.push(r); }
	}
}

impl<'a> IntoIterator for &'a ResultSet {
	type Item = &'a BenchmarkResult;
	type IntoIter = std::slice::Iter<'a, BenchmarkResult>;
	fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl IntoIterator for ResultSet {
	type Item = BenchmarkResult;
	type IntoIter = std::vec::IntoIter<BenchmarkResult>;
	fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl ResultSet {
	/// # Append a Result.
	pub fn push(&mut self, res: BenchmarkResult) { self.0.push(res); }

	#[must_use]
	/// # Result Count.
	pub fn len(&self) -> usize { self.0.len() }

	#[must_use]
	/// # Is Empty?
	pub fn is_empty(&self) -> bool { self.0.is_empty() }

	#[must_use]
	/// # The Results.
	///
	/// In append order.
	pub fn as_slice(&self) -> &[BenchmarkResult] { &self.0 }

	/// # Iterate.
	pub fn iter(&self) -> std::slice::Iter<'_, BenchmarkResult> { self.0.iter() }

	/// # Print (and Maybe Save) the Batch.
	///
	/// Render the results as a table on STDERR, and — if the
	/// `TEMPO_SAVE` environment variable names a writable path — dump
	/// the set there as JSON too.
	///
	/// An empty set prints an error instead.
	pub fn finish(&self) {
		if self.is_empty() {
			eprintln!("\x1b[1;91mError:\x1b[0m {}", TempoError::NoBench);
			return;
		}

		eprintln!("{}", crate::report::Table::from(self));
		self.save();
	}

	/// # Save as JSON.
	///
	/// A failed export is not worth aborting a finished run over, so
	/// any I/O trouble here is swallowed.
	fn save(&self) {
		if let Some(mut f) = export_path().and_then(|p| File::create(p).ok()) {
			if let Ok(out) = serde_json::to_vec(self) {
				let _res = f.write_all(&out).and_then(|()| f.flush());
			}
		}
	}
}



/// # Export Path.
///
/// The JSON destination, if the `TEMPO_SAVE` environment variable holds
/// a non-empty value.
fn export_path() -> Option<PathBuf> {
	let raw = std::env::var_os("TEMPO_SAVE")?;
	if raw.is_empty() { None }
	else { Some(PathBuf::from(raw)) }
}



#[cfg(test)]
mod tests {
	use super::*;

	/// # A Buffer With Known Numbers.
	fn t_buffer() -> SampleBuffer {
		let mut buf = SampleBuffer::new();
		for ns in [10, 20, 30, 40, 100] {
			buf.push(ns).expect("Push failed.");
		}
		buf
	}

	#[test]
	fn t_result() {
		let res = BenchmarkResult::from_samples("demo::five()", 5, &t_buffer());

		assert_eq!(res.name(), "demo::five()");
		assert_eq!(res.total_operations(), 5);
		assert_eq!(res.total_time(), 200);
		assert_eq!(res.average(), 40);
		assert_eq!(res.std_deviation(), 35);
		assert_eq!(res.min(), 10);
		assert_eq!(res.max(), 100);
		assert_eq!(
			res.percentiles(),
			Percentiles { p75: 40, p99: 100, p995: 100 },
		);
	}

	#[test]
	fn t_result_empty() {
		let res = BenchmarkResult::from_samples("demo::none()", 0, &SampleBuffer::new());

		assert_eq!(res.total_operations(), 0);
		assert_eq!(res.total_time(), 0);
		assert_eq!(res.average(), 0);
		assert_eq!(res.std_deviation(), 0);
		assert_eq!(res.min(), 0);
		assert_eq!(res.max(), 0);
		assert_eq!(res.percentiles(), Percentiles::default());
	}

	#[test]
	fn t_result_serde() {
		let res = BenchmarkResult::from_samples("demo::five()", 5, &t_buffer());

		let s = serde_json::to_string(&res).expect("Serialization failed.");
		let d: BenchmarkResult = serde_json::from_str(&s).expect("Deserialization failed.");

		assert_eq!(res, d, "Deserialization changed the result.");
	}

	#[test]
	fn t_set_order() {
		let mut set = ResultSet::default();
		for name in ["c", "a", "b"] {
			set.push(BenchmarkResult::from_samples(name, 5, &t_buffer()));
		}

		let names: Vec<&str> = set.iter().map(BenchmarkResult::name).collect();
		assert_eq!(names, vec!["c", "a", "b"], "Append order was not preserved.");
	}
}
