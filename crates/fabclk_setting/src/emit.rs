//! Rendering of the bitstream setting document.
//!
//! Output layout:
//!
//! ```text
//! <!-- Original XML: base.xml -->              (template only)
//! ...template lines before the closing tag...  (or a fresh root open tag)
//!   <overwrite_bitstream>
//!     <!-- Location: clk_a, SOC: 0, Value: 5, X: 3, Y: 1 -->
//!     <bit value="1" path="fpga_top.grid_io_bottom_3__1_.logical_tile_io_mode_io__0.mem_iopad_0_clk_0[0]"/>
//!     ... bits 1-3 ...
//!     <!-- Unknown location: clk_b, SOC: 1, Value: 2, X: 0, Y: 0 -->
//!   </overwrite_bitstream>
//! </openfpga_bitstream_setting>
//! ```

use crate::assign::CLOCK_SELECT_BITS;
use crate::pin_table::{LocatedClock, LocatedClocks};
use crate::template::{TemplatePrefix, ROOT_CLOSE_TAG};

/// Opening tag written when no template is used.
pub const ROOT_OPEN_TAG: &str = "<openfpga_bitstream_setting>";

/// Annotation used instead of the template path for reproducible output.
pub const UNIT_TEST_ORIGIN: &str = "Unit Test Input";

/// How the template origin comment names the template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OriginAnnotation {
    /// Record the template path as given.
    #[default]
    Path,
    /// Record [`UNIT_TEST_ORIGIN`].
    Placeholder,
}

/// Line-oriented builder for the output document.
///
/// Lines are bytes so template lines are copied without re-encoding.
#[derive(Debug, Default)]
pub struct SettingDocument {
    lines: Vec<Vec<u8>>,
}

impl SettingDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line.
    pub fn push(&mut self, line: impl Into<Vec<u8>>) {
        self.lines.push(line.into());
    }

    /// Returns the document contents, each line terminated by `\n`.
    pub fn render(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.extend_from_slice(line);
            out.push(b'\n');
        }
        out
    }
}

/// Returns the configuration-bit path for clock-select bit `bit` of the I/O
/// tile on `edge` at `(x, y)`.
pub fn bit_path(edge: &str, x: u32, y: u32, bit: u32) -> String {
    format!(
        "fpga_top.grid_io_{edge}_{x}__{y}_.logical_tile_io_mode_io__0.mem_iopad_0_clk_0[{bit}]"
    )
}

fn location_fields(identifier: &str, clock: &LocatedClock) -> String {
    format!(
        "{identifier}, SOC: {soc}, Value: {value}, X: {x}, Y: {y}",
        soc = u8::from(clock.assignment.domain.is_soc()),
        value = clock.assignment.clock_index,
        x = clock.x,
        y = clock.y,
    )
}

/// Appends the entries for one clock: an annotation plus four bit overrides,
/// or only an annotation when its edge is unknown.
pub fn push_clock(doc: &mut SettingDocument, identifier: &str, clock: &LocatedClock) {
    let fields = location_fields(identifier, clock);
    let Some(edge) = clock.edge.tile_name() else {
        doc.push(format!("    <!-- Unknown location: {fields} -->"));
        return;
    };

    doc.push(format!("    <!-- Location: {fields} -->"));
    for bit in 0..CLOCK_SELECT_BITS {
        let value = u8::from(clock.assignment.select_bit(bit));
        let path = bit_path(edge, clock.x, clock.y, bit);
        doc.push(format!("    <bit value=\"{value}\" path=\"{path}\"/>"));
    }
}

/// Renders the full setting document.
///
/// `clocks` must already be classified. Entries follow the map's ascending
/// identifier order.
pub fn render_setting(
    clocks: &LocatedClocks,
    template: Option<&TemplatePrefix>,
    origin: OriginAnnotation,
) -> Vec<u8> {
    let mut doc = SettingDocument::new();

    match template {
        Some(prefix) => {
            let name = match origin {
                OriginAnnotation::Path => prefix.path.display().to_string(),
                OriginAnnotation::Placeholder => UNIT_TEST_ORIGIN.to_string(),
            };
            doc.push(format!("<!-- Original XML: {name} -->"));
            for line in &prefix.lines {
                doc.push(line.as_slice());
            }
        }
        None => doc.push(ROOT_OPEN_TAG),
    }

    doc.push("  <overwrite_bitstream>");
    for (identifier, clock) in clocks {
        push_clock(&mut doc, identifier, clock);
    }
    doc.push("  </overwrite_bitstream>");
    doc.push(ROOT_CLOSE_TAG);

    doc.render()
}
