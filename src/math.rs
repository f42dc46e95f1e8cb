/*!
# Tempo: Math

Pure integer reductions over finalized sample sets. Everything in here
works on whole nanoseconds with truncating division; results are
deterministic and diff-friendly across platforms, at the cost of up to
one nanosecond of rounding per figure.
*/

use crate::Percentiles;



/// # Mean.
///
/// The truncated average of the set, or zero if it is empty.
pub(crate) fn mean(samples: &[u64]) -> u64 {
	if samples.is_empty() { return 0; }

	let total: u128 = samples.iter().map(|&n| u128::from(n)).sum();
	let avg = total / (samples.len() as u128);
	avg as u64
}

/// # Standard Deviation.
///
/// The integer square root of the unbiased sample variance
/// — `Σ(x − mean)² / (n − 1)` — or zero when fewer than two samples
/// exist and the variance is undefined.
///
/// The accumulator is 128 bits wide: with the full `65_536`-sample cap,
/// per-sample deviations up to about `2^56` nanoseconds (a couple of
/// years) fit without overflow. Beyond that the sum saturates, flooring
/// the result rather than wrapping it.
pub(crate) fn std_deviation(samples: &[u64]) -> u64 {
	let len = samples.len();
	if len < 2 { return 0; }

	let avg = i128::from(mean(samples));
	let squares = samples.iter()
		.fold(0_u128, |acc, &n| {
			let diff = i128::from(n) - avg;
			acc.saturating_add((diff * diff) as u128)
		});

	let variance = squares / ((len - 1) as u128);
	isqrt(variance) as u64
}

/// # Percentiles.
///
/// The p75/p99/p99.5 values of the set, by rank: the working copy is
/// sorted ascending and the entry at `floor(count * p)` (zero-based, no
/// interpolation) is the percentile.
///
/// Sets of zero or one sample have no meaningful distribution; those
/// come back all-zero.
pub(crate) fn percentiles(samples: &[u64]) -> Percentiles {
	let len = samples.len();
	if len < 2 { return Percentiles::default(); }

	let mut sorted = samples.to_vec();
	sort_samples(&mut sorted);

	Percentiles {
		p75: sorted[len * 75 / 100],
		p99: sorted[len * 99 / 100],
		p995: sorted[len * 995 / 1000],
	}
}

/// # Sort (Ascending).
///
/// A partition-exchange sort: the last entry of the active range serves
/// as the pivot, smaller entries are swapped left of a growing boundary,
/// and the pivot lands between the halves. Recursion always descends
/// into the smaller half, keeping the stack logarithmic even on sorted
/// input.
pub(crate) fn sort_samples(mut set: &mut [u64]) {
	while 1 < set.len() {
		let at = partition(set);
		let (lo, hi) = set.split_at_mut(at);
		let hi = &mut hi[1..];

		if lo.len() < hi.len() {
			sort_samples(lo);
			set = hi;
		}
		else {
			sort_samples(hi);
			set = lo;
		}
	}
}

/// # Partition.
///
/// Place the pivot (last entry) into its final sorted position and
/// return that index. Entries left of it are smaller; entries right of
/// it are greater or equal.
fn partition(set: &mut [u64]) -> usize {
	let last = set.len() - 1;
	let pivot = set[last];

	let mut boundary = 0;
	for idx in 0..last {
		if set[idx] < pivot {
			set.swap(idx, boundary);
			boundary += 1;
		}
	}

	set.swap(boundary, last);
	boundary
}

/// # Integer Square Root.
///
/// Newton's method, converging from above; the result is
/// `floor(sqrt(n))`.
fn isqrt(n: u128) -> u128 {
	if n < 2 { return n; }

	let bits = 128 - n.leading_zeros();
	let mut x = 1_u128 << ((bits + 1) / 2);
	loop {
		let y = (x + n / x) / 2;
		if x <= y { return x; }
		x = y;
	}
}
