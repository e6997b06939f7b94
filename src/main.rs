use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use diff3merge::{
    split_lines, AlignOptions, Algorithm, CancelToken, Diff3LineVector, MergeResult, Reference,
    Source, StandardMarkers, TextSources,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReferenceArg {
    A,
    B,
}

impl From<ReferenceArg> for Reference {
    fn from(arg: ReferenceArg) -> Self {
        match arg {
            ReferenceArg::A => Reference::A,
            ReferenceArg::B => Reference::B,
        }
    }
}

#[derive(Parser)]
#[command(version, about = "Align and merge up to three versions of a text file")]
struct Args {
    /// Path to BASE (source A)
    base_path: PathBuf,

    /// Path to THIS (source B)
    this_path: PathBuf,

    /// Path to OTHER (source C); without it the comparison is two-way
    other_path: Option<PathBuf>,

    /// Source both pairwise diffs are computed against
    #[clap(long, value_enum, default_value = "a")]
    reference: ReferenceArg,

    #[cfg(feature = "patiencediff")]
    /// Use patiencediff for smaller diffs
    #[clap(long, short)]
    patiencediff: bool,

    /// Print the line alignment instead of the merge result
    #[clap(long)]
    align: bool,

    /// Skip character-level diffs
    #[clap(long)]
    no_fine: bool,

    /// Include BASE lines in conflict blocks
    #[clap(long)]
    show_base: bool,

    /// More logging; repeat for trace output
    #[clap(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn print_alignment(vector: &Diff3LineVector, sources: &TextSources<'_, &str>) -> Result<()> {
    let mut out = std::io::stdout().lock();
    for (row, line) in vector.iter().enumerate() {
        let column = |source: Source| match line.line(source) {
            Some(index) => format!("{:>5}", index + 1),
            None => "    -".to_string(),
        };
        let changes = vector.changes(row);
        let text = Source::ALL
            .into_iter()
            .find_map(|source| line.line(source).and_then(|i| sources.lines(source)?.get(i)))
            .map_or("", |text| text.trim_end_matches(&['\r', '\n'][..]));
        writeln!(
            out,
            "{} {} {} {:>2} {}",
            column(Source::A),
            column(Source::B),
            column(Source::C),
            changes.bits(),
            text
        )?;
    }
    Ok(())
}

fn run(args: Args) -> Result<ExitCode> {
    let base = read(&args.base_path)?;
    let this = read(&args.this_path)?;
    let other = args.other_path.as_deref().map(read).transpose()?;

    let base_lines = split_lines(&base);
    let this_lines = split_lines(&this);
    let other_lines = other.as_deref().map(split_lines);
    let sources = TextSources::new(&base_lines, &this_lines, other_lines.as_deref());

    #[cfg(feature = "patiencediff")]
    let algorithm = if args.patiencediff {
        Algorithm::Patience
    } else {
        Algorithm::Difflib
    };
    #[cfg(not(feature = "patiencediff"))]
    let algorithm = Algorithm::Difflib;
    let options = AlignOptions {
        reference: args.reference.into(),
        fine_diffs: !args.no_fine,
        algorithm,
    };

    let vector = Diff3LineVector::compare(&sources, &options, &CancelToken::new())?
        .context("alignment was cancelled")?;

    if args.align {
        print_alignment(&vector, &sources)?;
        return Ok(ExitCode::SUCCESS);
    }

    let merged = MergeResult::build(&vector, &sources);
    let base_name = args.base_path.display().to_string();
    let this_name = args.this_path.display().to_string();
    let other_name = args
        .other_path
        .as_ref()
        .map(|path| path.display().to_string());
    let markers = match &other_name {
        Some(other_name) => StandardMarkers::new(Some(this_name.as_str()), Some(other_name.as_str())),
        None => StandardMarkers::new(Some(base_name.as_str()), Some(this_name.as_str())),
    };
    let markers = if args.show_base {
        markers.with_base(Some(base_name.as_str()))
    } else {
        markers
    };

    let mut out = std::io::stdout().lock();
    for line in merged.merge_lines(&sources, &markers) {
        out.write_all(line.as_bytes())?;
    }
    out.flush()?;

    if merged.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::info!(conflicts = merged.unsolved_count(), "unresolved conflicts");
        Ok(ExitCode::from(1))
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("diff3merge: {e:#}");
            ExitCode::from(2)
        }
    }
}
