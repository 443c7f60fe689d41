use std::fmt::{self, Display};

use comfy_table::presets::UTF8_NO_BORDERS;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use itertools::Itertools;

use crate::analysis::Panel;
use crate::pool::Roll;

const BAR_WIDTH: usize = 40;
const BAR_CHAR: char = '█';

impl Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The wild die rolled {}.", self.wild.iter().join(", "))?;
        if !self.static_rolls.is_empty() {
            writeln!(
                f,
                "The other dice rolled {}.",
                self.static_rolls.iter().join(", ")
            )?;
        }
        if self.pips != 0 {
            writeln!(f, "Added {:+} pips.", self.pips)?;
        }
        if self.crit_failed() {
            writeln!(f, "Crit-1 removed {}.", self.removed.iter().join(", "))?;
        }
        writeln!(f, "Total without crit-1 = {}.", self.total_without_crit())?;
        write!(f, "Total with crit-1 = {}.", self.total)
    }
}

/// Renders one analysis panel as a value / density / bar table under its title.
///
/// Only tick values are labeled, as on a plotted axis.
#[must_use]
pub fn histogram_table(panel: &Panel) -> String {
    let hist = &panel.histogram;
    let peak = hist.peak();

    let mut table = Table::new();
    table
        .load_preset(UTF8_NO_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Total"), Cell::new("Density"), Cell::new("")]);
    for (value, density) in hist.bins() {
        let label = if hist.ticks.binary_search(&value).is_ok() {
            value.to_string()
        } else {
            String::new()
        };
        table.add_row(vec![
            Cell::new(label).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:6.2}%", density * 100.0)).set_alignment(CellAlignment::Right),
            Cell::new(bar(density, peak)),
        ]);
    }

    format!("{panel}\n\n{table}\n")
}

pub fn print_panels(panels: &[Panel]) {
    for panel in panels {
        println!("{}", histogram_table(panel));
    }
}

fn bar(density: f64, peak: f64) -> String {
    if peak <= 0.0 {
        return String::new();
    }
    let n = (density / peak * BAR_WIDTH as f64).round() as usize;
    std::iter::repeat(BAR_CHAR).take(n).collect()
}
