//! Update command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::domain::Config;
use crate::store::RecordIndex;

#[derive(Args)]
pub struct UpdateArgs {
    /// Input JSONLines file path
    #[arg(value_name = "INPUT_FILE")]
    pub input_file: PathBuf,

    /// Output JSONLines file path (parent directories are created)
    #[arg(value_name = "OUTPUT_FILE")]
    pub output_file: PathBuf,
}

pub fn run(args: UpdateArgs, config: &Config) -> Result<()> {
    let mut index = RecordIndex::new(config.fields.clone());
    let stats = index.transform(&args.input_file, &args.output_file)?;

    if stats.malformed_lines > 0 {
        tracing::warn!(
            "Skipped {} malformed line(s) in {}",
            stats.malformed_lines,
            args.input_file.display()
        );
    }

    println!(
        "Successfully updated {} to {}",
        args.input_file.display(),
        args.output_file.display()
    );
    println!("Records written: {}", stats.records_written);
    Ok(())
}
