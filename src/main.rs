use anyhow::Result;

fn main() -> Result<()> {
    bug_index::cli::run()
}
