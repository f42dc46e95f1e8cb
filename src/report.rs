/*!
# Tempo: Report
*/

use crate::{
	ResultSet,
	util,
};
use dactyl::{
	NiceFloat,
	NiceU64,
};
use num_traits::cast::FromPrimitive;
use std::fmt;



/// # Table Columns.
const COLS: usize = 7;

/// # Column Gap.
const GAP: &str = "    ";



#[derive(Debug, Clone)]
/// # Results Table.
///
/// This holds the rendered rows for a batch of results so everything
/// can be printed with consistent column widths.
pub(crate) struct Table(Vec<TableRow>);

#[derive(Debug, Clone)]
/// # Table Row.
enum TableRow {
	Cells(Box<[String; COLS]>),
	Spacer,
}

impl From<&ResultSet> for Table {
	fn from(src: &ResultSet) -> Self {
		let mut rows: Vec<TableRow> = Vec::with_capacity(src.len() + 2);
		rows.push(TableRow::Cells(Box::new([
			"\x1b[1;38;5;13mBenchmark".to_owned(),
			"Average".to_owned(),
			"Std. Dev.".to_owned(),
			"Min".to_owned(),
			"Max".to_owned(),
			"p99".to_owned(),
			"Ops\x1b[0m".to_owned(),
		])));
		rows.push(TableRow::Spacer);

		for res in src {
			rows.push(TableRow::Cells(Box::new([
				format_name(res.name()),
				format!("\x1b[1m{}\x1b[0m", nice_time(res.average())),
				format!("\x1b[2m\u{b1}\x1b[0m{}", nice_time(res.std_deviation())),
				format!("\x1b[2m{}\x1b[0m", nice_time(res.min())),
				format!("\x1b[2m{}\x1b[0m", nice_time(res.max())),
				nice_time(res.percentiles().p99),
				format!("\x1b[2m{}\x1b[0m", NiceU64::from(res.total_operations())),
			])));
		}

		Self(rows)
	}
}

impl fmt::Display for Table {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let widths = self.lens();

		// The spacer spans every column plus the gaps between them.
		let span: usize = widths.iter().sum::<usize>() + GAP.len() * (COLS - 1);
		let spacer = format!("\x1b[38;5;5m{}\x1b[0m\n", "-".repeat(span));

		// Worst-case padding, sliced to order as needed.
		let pad = " ".repeat(widths.iter().copied().max().unwrap_or(0));

		for row in &self.0 {
			match row {
				TableRow::Cells(cells) => {
					for (idx, cell) in cells.iter().enumerate() {
						let fill = &pad[..widths[idx] - util::width(cell)];
						// First column reads left-to-right; the numbers
						// line up on the right.
						if idx == 0 { write!(f, "{cell}{fill}")?; }
						else { write!(f, "{GAP}{fill}{cell}")?; }
					}
					writeln!(f)?;
				},
				TableRow::Spacer => f.write_str(&spacer)?,
			}
		}

		Ok(())
	}
}

impl Table {
	/// # Column Widths.
	///
	/// The maximum printable width of each column across all rows.
	fn lens(&self) -> [usize; COLS] {
		let mut out = [0_usize; COLS];
		for row in &self.0 {
			if let TableRow::Cells(cells) = row {
				for (w, cell) in out.iter_mut().zip(cells.iter()) {
					*w = (*w).max(util::width(cell));
				}
			}
		}
		out
	}
}



/// # Nice Duration.
///
/// Render a nanosecond count at the most readable scale, two decimals
/// for anything bigger than raw nanos.
pub(crate) fn nice_time(ns: u64) -> String {
	if ns < 1_000 {
		return format!("{} ns", NiceU64::from(ns));
	}

	let raw = f64::from_u64(ns).unwrap_or_default();
	let (scaled, unit) =
		if ns < 1_000_000 { (raw / 1_000.0, "\u{3bc}s") }
		else if ns < 1_000_000_000 { (raw / 1_000_000.0, "ms") }
		else { (raw / 1_000_000_000.0, "s ") };

	format!("{} {unit}", NiceFloat::from(scaled).precise_str(2))
}

/// # Format Name.
///
/// Dim the namespace-y portion of a benchmark name, leaving the method
/// and arguments bright.
fn format_name(name: &str) -> String {
	let cut = name.rfind('(').unwrap_or(name.len());
	match name[..cut].rfind("::") {
		Some(pos) => format!("\x1b[2m{}::\x1b[0m{}", &name[..pos], &name[pos + 2..]),
		None => name.to_owned(),
	}
}
