/*!
# Tempo: Macros
*/

#[macro_export(local_inner_macros)]
/// # Helper: Benchmarks
///
/// This will generate a `main()` function that runs each `name => workload`
/// pair through its own [`Session`](crate::Session), then prints the
/// collected results nice and neat.
///
/// Any fatal error — a missing clock, failed sample storage — kills the
/// whole batch with a non-zero exit; there are no partial results.
///
/// ## Examples
///
/// ```no_run
/// use tempo::benches;
///
/// fn fibonacci(n: u64) -> u64 {
///     if n < 2 { n }
///     else { fibonacci(n - 1) + fibonacci(n - 2) }
/// }
///
/// benches!(
///     "fibonacci(10)" => || { tempo::black_box(fibonacci(10)); },
///     "fibonacci(20)" => || { tempo::black_box(fibonacci(20)); },
/// );
/// ```
macro_rules! benches {
	($($name:expr => $work:expr),+ $(,)?) => {
		/// # Benchmarks!
		fn main() {
			// This can take a while; give 'em a message of hope.
			::std::eprint!("\x1b[1;38;5;199mStarting:\x1b[0m Running benchmark(s). Stand by!\n\n");

			let mut results = $crate::ResultSet::default();
			$(
				::std::eprint!("\x1b[1;38;5;4m\u{2022}\x1b[0m");
				match $crate::Session::new($name).and_then(|mut s| s.run($work)) {
					::std::result::Result::Ok(res) => { results.push(res); },
					::std::result::Result::Err(e) => {
						::std::eprintln!("\n\x1b[1;91mError:\x1b[0m {e}");
						::std::process::exit(1);
					},
				}
			)+
			::std::eprintln!("\n");

			results.finish();
		}
	};
}
