use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "vecdraw", about = "Inspect and tidy vecdraw drawings")]
struct Cli {
    /// Drawing to load (JSON array of shapes).
    path: PathBuf,

    /// Simplify freehand paths with the configured tolerance and rewrite the file.
    #[arg(long)]
    simplify: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let report = vecdraw::run(&cli.path, cli.simplify)
        .with_context(|| format!("failed to process {}", cli.path.display()))?;
    println!("{} shapes loaded, {} skipped", report.loaded, report.skipped);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_and_simplify_flag() {
        let cli = Cli::try_parse_from(["vecdraw", "drawing.json", "--simplify"])
            .expect("arguments should parse");
        assert_eq!(cli.path, PathBuf::from("drawing.json"));
        assert!(cli.simplify);
    }

    #[test]
    fn path_is_required() {
        assert!(Cli::try_parse_from(["vecdraw"]).is_err());
        assert!(Cli::try_parse_from(["vecdraw", "a.json", "--bogus"]).is_err());
    }
}
