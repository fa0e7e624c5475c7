//! Compare command - score one synthesized filename against a reference.

use clap::Args;

use rcpt_core::compare_filenames;

use super::process::format_flags;

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    /// Reference (ground-truth) filename
    reference: String,

    /// Synthesized filename
    computed: String,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: CompareArgs) -> anyhow::Result<()> {
    let result = compare_filenames(&args.reference, &args.computed)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", format_flags(&result));
    }

    Ok(())
}
