/*!
# Tempo: Sessions
*/

use crate::{
	BenchmarkResult,
	Clock,
	MonotonicClock,
	SampleBuffer,
	TempoError,
};
use dactyl::traits::SaturatingFrom;
use std::time::Duration;



/// # Default Calibration Target (1s), in Nanoseconds.
const MIN_DURATION: u64 = 1_000_000_000;

/// # Smallest Allowed Calibration Target (1ms), in Nanoseconds.
const MIN_TARGET: u64 = 1_000_000;

/// # Repeat-Count Ceiling.
///
/// No measurement pass will ever run a workload more times than this,
/// no matter how fast it is.
pub const MAX_N: u64 = 65_536;

/// # Calibration Round Ceiling.
///
/// Calibration gives up growing the repeat count after this many
/// rounds, even if the time target was never reached.
const MAX_CALIBRATION_ITERATIONS: u32 = 16_384;



/// # A Unit of Work.
///
/// Anything a session can measure. Only [`Workload::invoke`] is
/// required; the lifecycle hooks default to no-ops and run *outside*
/// the timed windows, so state management never leaks into the numbers.
///
/// Plain `FnMut()` closures implement this automatically, which covers
/// most benchmarks:
///
/// ```no_run
/// use tempo::Session;
///
/// # fn main() -> Result<(), tempo::TempoError> {
/// let mut session = Session::new("u64::checked_add(2)")?;
/// let result = session.run(|| { tempo::black_box(2_u64.checked_add(2)); })?;
/// # Ok(()) }
/// ```
///
/// Implement the trait directly when the work needs setup or per-call
/// cleanup:
///
/// ```no_run
/// use tempo::{Session, Workload};
///
/// struct Drain { data: Vec<u64>, scratch: Vec<u64> }
///
/// impl Workload for Drain {
///     fn prepare(&mut self) { self.scratch = self.data.clone(); }
///     fn invoke(&mut self) { self.scratch.clear(); }
///     fn recycle(&mut self) { self.scratch.extend_from_slice(&self.data); }
/// }
/// ```
pub trait Workload {
	/// # Do the Work.
	///
	/// One measured invocation. Panics propagate straight through to
	/// whoever called [`Session::run`]; the harness makes no attempt to
	/// catch or retry.
	fn invoke(&mut self);

	/// # One-Time Setup.
	///
	/// Runs once, before calibration begins.
	fn prepare(&mut self) {}

	/// # Between-Invocation Cleanup.
	///
	/// Runs after each timed window closes — once per calibration round
	/// and once per measured invocation — never inside one.
	fn recycle(&mut self) {}

	/// # One-Time Teardown.
	///
	/// Runs once, after the last measurement.
	fn release(&mut self) {}
}

impl<F: FnMut()> Workload for F {
	fn invoke(&mut self) { self(); }
}



#[derive(Debug)]
/// # Benchmark Session.
///
/// One named workload slot: a clock, a sample buffer, and the repeat
/// count the calibrator settles on. A session may be reused for any
/// number of sequential [`Session::run`]/[`Session::run_bounded`] calls
/// — each starts from a clean buffer — but must never be shared across
/// threads; nothing in here locks.
pub struct Session<C = MonotonicClock> {
	name: String,
	target: u64,
	cap: u64,
	repeat_count: u64,
	clock: C,
	samples: SampleBuffer,
}

impl Session<MonotonicClock> {
	/// # New Session.
	///
	/// Instantiate a session against the platform monotonic clock. The
	/// name can be anything, but is intended to represent the method
	/// call itself, like `foo::bar(10)`.
	///
	/// ## Errors
	///
	/// Returns [`TempoError::TimerUnavailable`] if the clock cannot be
	/// acquired.
	///
	/// ## Panics
	///
	/// This method will panic if the name is empty.
	pub fn new<S>(name: S) -> Result<Self, TempoError>
	where S: AsRef<str> {
		Ok(Self::with_clock(name, MonotonicClock::try_new()?))
	}
}

impl<C: Clock> Session<C> {
	/// # New Session With a Custom Clock.
	///
	/// ## Panics
	///
	/// This method will panic if the name is empty.
	pub fn with_clock<S>(name: S, clock: C) -> Self
	where S: AsRef<str> {
		let name = name.as_ref().trim();
		assert!(! name.is_empty(), "Name is required.");

		Self {
			name: name.to_owned(),
			target: MIN_DURATION,
			cap: MAX_N,
			repeat_count: 1,
			clock,
			samples: SampleBuffer::new(),
		}
	}

	#[must_use]
	/// # Set the Calibration Target.
	///
	/// By default, calibration keeps growing the repeat count until a
	/// full second of workload time has accumulated, and sizes the
	/// measured pass to last about that long. Slow workloads may want a
	/// bigger window; trivial ones can get away with less.
	///
	/// Note: the minimum target is one millisecond.
	pub const fn with_target(mut self, target: Duration) -> Self {
		let ns = target.as_nanos();
		if ns < MIN_TARGET as u128 { self.target = MIN_TARGET; }
		else if (u64::MAX as u128) < ns { self.target = u64::MAX; }
		else { self.target = ns as u64; }
		self
	}

	#[must_use]
	/// # Lower the Repeat-Count Ceiling.
	///
	/// Calibration never chooses more than 65,536 repeats; this trims
	/// that ceiling further, useful when single invocations are
	/// expensive enough that tens of thousands would take all day.
	///
	/// Values are clamped to `1..=65_536`.
	pub const fn with_cap(mut self, cap: u64) -> Self {
		if cap == 0 { self.cap = 1; }
		else if MAX_N < cap { self.cap = MAX_N; }
		else { self.cap = cap; }
		self
	}

	#[must_use]
	/// # Session Name.
	pub fn name(&self) -> &str { &self.name }
}

impl<C: Clock> Session<C> {
	/// # Calibrate and Measure.
	///
	/// This is the full protocol. Calibration first: the workload runs
	/// in blocks of `N` sequential invocations, each block timed as one
	/// interval, with `N` doubling (up to the ceiling) round after round
	/// until the accumulated time reaches the target or the round limit
	/// trips. The last `N` is then rescaled so a single pass at it
	/// should last about one target's worth of wall-clock time.
	///
	/// The measured pass follows: the workload runs that many times,
	/// each invocation timed *individually*, one sample apiece. Those
	/// per-call samples — not the coarse calibration blocks — feed the
	/// returned summary; a block total could never say anything about
	/// percentiles or spread.
	///
	/// A workload too fast for the clock to register forces a full pass
	/// at the ceiling.
	///
	/// ## Errors
	///
	/// Returns [`TempoError::Allocation`] if the sample buffer cannot
	/// grow to hold the pass.
	pub fn run<W>(&mut self, mut workload: W) -> Result<BenchmarkResult, TempoError>
	where W: Workload {
		workload.prepare();

		// Calibration.
		self.repeat_count = 1;
		let mut accumulated: u64 = 0;
		let mut rounds: u32 = 0;

		while accumulated < self.target && rounds < MAX_CALIBRATION_ITERATIONS {
			self.samples.reset();

			self.clock.reset();
			for _ in 0..self.repeat_count { workload.invoke(); }
			let elapsed = self.elapsed_ns();

			self.repeat_count = (self.repeat_count * 2).min(self.cap);
			rounds += 1;
			accumulated = accumulated.saturating_add(elapsed);
			workload.recycle();
		}

		// A timer too coarse to see the workload reads zero; one fake
		// nanosecond keeps the projection divisible.
		if accumulated == 0 { accumulated = 1; }

		// Scale the last repeat count so the measured pass projects to
		// roughly one target's worth of time.
		let projected =
			u128::from(self.repeat_count) * u128::from(self.target)
			/ u128::from(accumulated);
		self.repeat_count = match u64::saturating_from(projected) {
			0 => 1,
			n if self.cap < n => self.cap,
			n => n,
		};

		// The measured pass.
		self.samples.reset();
		self.samples.reserve(self.repeat_count as usize)?;
		for _ in 0..self.repeat_count {
			self.clock.reset();
			workload.invoke();
			let elapsed = self.elapsed_ns();

			self.samples.push(elapsed)?;
			workload.recycle();
		}

		workload.release();
		Ok(BenchmarkResult::from_samples(&self.name, self.repeat_count, &self.samples))
	}

	/// # Measure Within Fixed Limits.
	///
	/// The no-calibration variant: invoke-and-time one call at a time
	/// until either the wall-clock `limit` or the `max_ops` count trips,
	/// whichever comes first. Every invocation lands in the summary as
	/// its own sample, same as the calibrated path.
	///
	/// A `max_ops` of zero produces a valid (all-zero) result.
	///
	/// ## Errors
	///
	/// Returns [`TempoError::Allocation`] if the sample buffer cannot
	/// grow.
	pub fn run_bounded<W>(
		&mut self,
		mut workload: W,
		limit: Duration,
		max_ops: u64,
	) -> Result<BenchmarkResult, TempoError>
	where W: Workload {
		workload.prepare();
		self.samples.reset();

		let limit = u64::saturating_from(limit.as_nanos());
		let mut operations: u64 = 0;
		let mut spent: u64 = 0;

		while spent < limit && operations < max_ops {
			self.clock.reset();
			workload.invoke();
			let elapsed = self.elapsed_ns();

			self.samples.push(elapsed)?;
			operations += 1;
			spent = spent.saturating_add(elapsed);
			workload.recycle();
		}

		workload.release();
		Ok(BenchmarkResult::from_samples(&self.name, operations, &self.samples))
	}

	/// # Clock Reading, Narrowed.
	fn elapsed_ns(&self) -> u64 {
		u64::saturating_from(self.clock.read().as_nanos())
	}
}



#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::RefCell;
	use std::collections::VecDeque;

	/// # Scripted Clock.
	///
	/// Returns the queued readings in order, then the fallback forever
	/// after, letting tests drive calibration arithmetic exactly.
	struct ScriptedClock {
		reads: RefCell<VecDeque<u64>>,
		fallback: u64,
	}

	impl ScriptedClock {
		fn new<I: IntoIterator<Item=u64>>(reads: I, fallback: u64) -> Self {
			Self {
				reads: RefCell::new(reads.into_iter().collect()),
				fallback,
			}
		}
	}

	impl Clock for ScriptedClock {
		fn reset(&mut self) {}
		fn read(&self) -> Duration {
			let ns = self.reads.borrow_mut().pop_front().unwrap_or(self.fallback);
			Duration::from_nanos(ns)
		}
	}

	/// # Hook Counter.
	#[derive(Default)]
	struct Counting {
		invoked: u32,
		prepared: u32,
		recycled: u32,
		released: u32,
	}

	impl Workload for &mut Counting {
		fn invoke(&mut self) { self.invoked += 1; }
		fn prepare(&mut self) { self.prepared += 1; }
		fn recycle(&mut self) { self.recycled += 1; }
		fn release(&mut self) { self.released += 1; }
	}

	#[test]
	/// # Four 250ms Rounds Against a 1s Target.
	///
	/// Calibration should stop with the doubled count at sixteen, and
	/// the rescale (16 × 1s / 1s) should keep it there.
	fn t_calibration_rescale() {
		let clock = ScriptedClock::new(
			[250_000_000, 250_000_000, 250_000_000, 250_000_000],
			1_000_000,
		);
		let mut session = Session::with_clock("t::rescale()", clock);
		let res = session.run(|| {}).expect("Run failed.");

		assert_eq!(res.total_operations(), 16);
		assert_eq!(res.average(), 1_000_000);
		assert_eq!(res.min(), 1_000_000);
		assert_eq!(res.max(), 1_000_000);
		assert_eq!(res.std_deviation(), 0);
		assert_eq!(res.total_time(), 16_000_000);
		assert_eq!(res.percentiles().p75, 1_000_000);
		assert_eq!(res.percentiles().p995, 1_000_000);
	}

	#[test]
	/// # Overshooting Rounds Scale the Count Back Down.
	///
	/// Three unreadably-fast rounds, then a 2s block: the doubled count
	/// of sixteen projects to 16 × 1s / 2s = 8.
	fn t_calibration_rescale_down() {
		let clock = ScriptedClock::new([0, 0, 0, 2_000_000_000], 5);
		let mut session = Session::with_clock("t::downscale()", clock);
		let res = session.run(|| {}).expect("Run failed.");

		assert_eq!(res.total_operations(), 8);
		assert_eq!(res.average(), 5);
		assert_eq!(res.total_time(), 40);
	}

	#[test]
	/// # A Millisecond Workload Converges Near a Thousand Repeats.
	///
	/// Each scripted round reads back its batch size in milliseconds,
	/// imitating a deterministic 1ms workload. The accumulator crosses
	/// the 1s target after ten rounds (1023ms), and 1024 × 1s / 1023ms
	/// truncates to an even thousand.
	fn t_calibration_converges() {
		let rounds = (0..10_u32).map(|n| 1_000_000 * (1_u64 << n));
		let clock = ScriptedClock::new(rounds, 1_000_000);
		let mut session = Session::with_clock("t::converge()", clock);
		let res = session.run(|| {}).expect("Run failed.");

		assert_eq!(res.total_operations(), 1_000);
		assert_eq!(res.average(), 1_000_000);
		assert_eq!(res.total_time(), 1_000_000_000);
	}

	#[test]
	/// # A Workload the Clock Can't See.
	///
	/// All-zero readings exhaust the round limit, and the forced
	/// one-nanosecond accumulator sends the projection sky-high, so the
	/// pass lands exactly on the ceiling. (The ceiling is lowered here
	/// to keep the sixteen-thousand calibration rounds cheap.)
	fn t_calibration_caps() {
		let clock = ScriptedClock::new([], 0);
		let mut session = Session::with_clock("t::caps()", clock).with_cap(4);
		let res = session.run(|| {}).expect("Run failed.");

		assert_eq!(res.total_operations(), 4);
		assert_eq!(res.average(), 0);
		assert_eq!(res.max(), 0);
	}

	#[test]
	fn t_knob_clamps() {
		let session = Session::with_clock("t::knobs()", ScriptedClock::new([], 0))
			.with_cap(0)
			.with_target(Duration::ZERO);
		assert_eq!(session.cap, 1);
		assert_eq!(session.target, 1_000_000);

		let session = Session::with_clock("t::knobs()", ScriptedClock::new([], 0))
			.with_cap(u64::MAX);
		assert_eq!(session.cap, MAX_N);
		assert_eq!(session.target, MIN_DURATION);
	}

	#[test]
	/// # Hook Cadence.
	///
	/// One 1s round ends calibration immediately; the rescaled pass is
	/// two invocations. Prepare/release fire once; recycle follows every
	/// timed window (one round, two samples).
	fn t_hooks() {
		let mut counting = Counting::default();
		let clock = ScriptedClock::new([1_000_000_000], 1_000);
		let mut session = Session::with_clock("t::hooks()", clock);
		let res = session.run(&mut counting).expect("Run failed.");

		assert_eq!(res.total_operations(), 2);
		assert_eq!(counting.prepared, 1);
		assert_eq!(counting.released, 1);
		assert_eq!(counting.invoked, 3, "One calibration call plus two measured.");
		assert_eq!(counting.recycled, 3);
	}

	#[test]
	fn t_bounded() {
		let clock = ScriptedClock::new([], 1_000_000);
		let mut session = Session::with_clock("t::bounded()", clock);

		// Ten milliseconds of 1ms samples: the time limit trips first.
		let res = session.run_bounded(|| {}, Duration::from_millis(10), 100)
			.expect("Run failed.");
		assert_eq!(res.total_operations(), 10);
		assert_eq!(res.average(), 1_000_000);

		// The op cap trips first; the session is reusable.
		let res = session.run_bounded(|| {}, Duration::from_secs(100), 7)
			.expect("Run failed.");
		assert_eq!(res.total_operations(), 7);
		assert_eq!(res.total_time(), 7_000_000);

		// Zero ops is degenerate but valid.
		let res = session.run_bounded(|| {}, Duration::from_secs(100), 0)
			.expect("Run failed.");
		assert_eq!(res.total_operations(), 0);
		assert_eq!(res.average(), 0);
		assert_eq!(res.percentiles(), crate::Percentiles::default());
	}

	#[test]
	/// # Slower Workloads, Bigger Averages.
	///
	/// Real clock, real sleeps. The gaps are wide enough (10x) that
	/// scheduler noise can't plausibly reorder them.
	fn t_ordering() {
		let mut set = crate::ResultSet::default();
		for (name, ms) in [("nap(1)", 1_u64), ("nap(10)", 10), ("nap(50)", 50)] {
			let mut session = Session::new(name)
				.expect("Clock unavailable.")
				.with_target(Duration::from_millis(5));
			let res = session.run(move || std::thread::sleep(Duration::from_millis(ms)))
				.expect("Run failed.");

			assert!(
				ms * 1_000_000 <= res.min(),
				"A sleep can't finish early.",
			);
			set.push(res);
		}

		let names: Vec<&str> = set.iter().map(crate::BenchmarkResult::name).collect();
		assert_eq!(names, vec!["nap(1)", "nap(10)", "nap(50)"]);

		let avgs: Vec<u64> = set.iter().map(crate::BenchmarkResult::average).collect();
		assert!(avgs[0] < avgs[1], "1ms should average under 10ms.");
		assert!(avgs[1] < avgs[2], "10ms should average under 50ms.");
	}
}
