//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Generate `ToString` overrides for C# types marked `[ToStringGenerator]`
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// C# files, or directories searched recursively for `.cs` files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory generated sources are written to
    #[arg(short, long = "out-dir", default_value = "generated")]
    pub out_dir: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Run the generator and report diagnostics without writing anything
    #[arg(long)]
    pub check: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["reprgen", "src"]);
        assert_eq!(args.inputs, vec![PathBuf::from("src")]);
        assert_eq!(args.out_dir, PathBuf::from("generated"));
        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
        assert!(!args.check);
    }

    #[test]
    fn every_flag() {
        let args = Args::parse_from([
            "reprgen",
            "a.cs",
            "models",
            "-o",
            "out",
            "-c",
            "reprgen.toml",
            "--log-level",
            "debug",
            "--check",
        ]);
        assert_eq!(args.inputs.len(), 2);
        assert_eq!(args.out_dir, PathBuf::from("out"));
        assert_eq!(args.config, Some(PathBuf::from("reprgen.toml")));
        assert_eq!(args.log_level, "debug");
        assert!(args.check);
    }

    #[test]
    fn inputs_are_required() {
        assert!(Args::try_parse_from(["reprgen"]).is_err());
    }
}
