//! `fabclk generate`: write the bitstream setting file.

use fabclk_setting::GenerateOutcome;

use crate::options::build_options;
use crate::{GenerateArgs, GlobalArgs, EXIT_SKIPPED};

/// Runs the `fabclk generate` command.
///
/// Returns exit code 0 when the file was written and [`EXIT_SKIPPED`] when
/// the device size was malformed and nothing was generated.
pub fn run(args: &GenerateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let options = build_options(
        &args.inputs,
        args.template.as_deref(),
        args.output.as_deref(),
        args.unittest,
        global,
    )?;

    match fabclk_setting::generate(&options)? {
        GenerateOutcome::Written(summary) => {
            if !global.quiet {
                eprintln!(
                    "   Generated {} ({} clock(s) overridden, {} unknown location(s))",
                    summary.output.display(),
                    summary.classified,
                    summary.unknown
                );
            }
            Ok(0)
        }
        GenerateOutcome::Skipped { reason } => {
            eprintln!(
                "warning: nothing generated: device size `{}`: {reason}",
                options.device_size
            );
            Ok(EXIT_SKIPPED)
        }
    }
}
