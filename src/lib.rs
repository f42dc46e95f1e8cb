/*!
# Tempo

`Tempo` is a small, self-calibrating micro-benchmark runner. Point it at
a unit of work and it figures out the rest: how many repeats it takes to
drown out timer noise, a measured pass at that count with every
invocation timed individually, and a summary — mean, standard
deviation, min/max, and tail percentiles — crunched entirely in whole
nanoseconds so runs diff cleanly across machines.

As with all Rust benchmarking, there are a lot of caveats, and results
might be artificially fast or slow. For best results, build optimized,
keep setup out of the timed path (that's what the [`Workload`] hooks are
for), and test different shapes to find the most "honest"
representation.



## Installation

Add `tempo` to your `dev-dependencies` in `Cargo.toml`, like:

```text
[dev-dependencies]
tempo = "0.1.*"
```

Benchmarks are also defined in `Cargo.toml` the usual way. Just be sure
to set `harness = false`:

```text
[[bench]]
name = "encode"
harness = false
```



## Usage

Drop a call to the [`benches`] macro in the benchmark file. It will
generate a `main()` method, run the supplied workloads, and print the
results:

```no_run
use tempo::benches;

fn fibonacci(n: u64) -> u64 {
    if n < 2 { n }
    else { fibonacci(n - 1) + fibonacci(n - 2) }
}

benches!(
    "fibonacci(10)" => || { tempo::black_box(fibonacci(10)); },
    "fibonacci(20)" => || { tempo::black_box(fibonacci(20)); },
);
```

Set the `TEMPO_SAVE` environment variable to a file path to also export
the batch as JSON.

For direct control — custom calibration targets, repeat-count ceilings,
hard time/operation limits, or workloads with setup and teardown —
build a [`Session`] yourself:

```no_run
use std::time::Duration;
use tempo::Session;

# fn main() -> Result<(), tempo::TempoError> {
let mut session = Session::new("haystack::search()")?
    .with_target(Duration::from_secs(2));
let result = session.run(|| { /* the work */ })?;

assert!(result.min() <= result.average());
# Ok(()) }
```

Workloads are anything implementing [`Workload`] — most simply a plain
`FnMut()` closure. The trait's optional `prepare`/`recycle`/`release`
hooks run outside the timed windows for state that needs managing
between invocations.
*/

#![warn(clippy::filetype_is_file)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::suboptimal_flops)]
#![warn(clippy::unneeded_field_pattern)]
#![warn(macro_use_extern_crate)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(non_ascii_idents)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_crate_dependencies)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::integer_division)]
#![allow(clippy::map_err_ignore)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]



mod clock;
mod error;
#[macro_use]
mod macros;
mod math;
pub(crate) mod report;
mod samples;
mod session;
mod stats;
mod util;

pub use clock::{
	Clock,
	MonotonicClock,
};
pub use error::TempoError;
pub use samples::SampleBuffer;
pub use session::{
	MAX_N,
	Session,
	Workload,
};
pub use stats::{
	BenchmarkResult,
	Percentiles,
	ResultSet,
};



#[must_use]
/// # Black Box.
///
/// This pseudo-black box is stolen from [`easybench`](https://crates.io/crates/easybench), which
/// stole it from `Bencher`.
///
/// The gist is it mostly works, but may fail to prevent the compiler from
/// optimizing it away in some cases. Avoiding nightly, it is the best we've
/// got.
pub fn black_box<T>(dummy: T) -> T {
	unsafe {
		let ret = std::ptr::read_volatile(&dummy);
		std::mem::forget(dummy);
		ret
	}
}
