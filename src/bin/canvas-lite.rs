use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "canvas-lite", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a draw script and write the surface as a PNG.
    Render(RenderArgs),
    /// Run a draw script and print the surface as a PNG data URI.
    DataUrl(DataUrlArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input draw script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Override the script's PNG compression level.
    #[arg(long, value_enum)]
    compression: Option<CompressionChoice>,
}

#[derive(Parser, Debug)]
struct DataUrlArgs {
    /// Input draw script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CompressionChoice {
    Fast,
    Default,
    Best,
}

impl From<CompressionChoice> for canvas_lite::PngCompression {
    fn from(c: CompressionChoice) -> Self {
        match c {
            CompressionChoice::Fast => Self::Fast,
            CompressionChoice::Default => Self::Default,
            CompressionChoice::Best => Self::Best,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::DataUrl(args) => cmd_data_url(args),
    }
}

fn run_script(path: &Path) -> anyhow::Result<canvas_lite::Surface> {
    let script = canvas_lite::Script::from_path(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let surface = script
        .run(base_dir)
        .with_context(|| format!("run draw script '{}'", path.display()))?;
    Ok(surface)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut surface = run_script(&args.in_path)?;
    if let Some(compression) = args.compression {
        let mut opts = surface.export_opts();
        opts.compression = compression.into();
        surface.set_export_opts(opts);
    }

    let png = surface.to_png()?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_data_url(args: DataUrlArgs) -> anyhow::Result<()> {
    let surface = run_script(&args.in_path)?;
    let url = surface.to_data_url(None)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{url}").context("write data URI to stdout")?;
    Ok(())
}
