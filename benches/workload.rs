/*!
# Benchmark Demo: Stateful Workloads
*/

use tempo::{
	benches,
	black_box,
	Workload,
};



/// # Sort the Same Mess, Over and Over.
///
/// The scratch vector gets sorted in the timed window and re-scrambled
/// by the `recycle` hook in between, so every invocation sees identical
/// input.
struct SortScratch {
	data: Vec<u64>,
	scratch: Vec<u64>,
}

impl SortScratch {
	fn new(len: u64) -> Self {
		let data: Vec<u64> = (0..len)
			.map(|n| n.wrapping_mul(6_364_136_223_846_793_005).rotate_left(17))
			.collect();
		Self { data, scratch: Vec::new() }
	}
}

impl Workload for SortScratch {
	fn prepare(&mut self) { self.scratch = self.data.clone(); }

	fn invoke(&mut self) {
		self.scratch.sort_unstable();
		black_box(self.scratch.last().copied());
	}

	fn recycle(&mut self) { self.scratch.copy_from_slice(&self.data); }
}

benches!(
	"sort_unstable(1_000)" => SortScratch::new(1_000),
	"sort_unstable(10_000)" => SortScratch::new(10_000),
);
