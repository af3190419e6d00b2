use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "picframe", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decorate a picture and write the result as PNG.
    Decorate(DecorateArgs),
    /// Decorate a picture and print the preview as a PNG data URL.
    Preview(SessionArgs),
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Input picture (PNG, JPEG, ...).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Decoration: banner, frame or overlay. Unknown values leave the picture undecorated.
    #[arg(long)]
    mode: Option<String>,

    /// Overlay graphic used by overlay mode.
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Bold font used for the banner caption.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Settings JSON file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DecorateArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Output PNG path. Defaults to the configured export file name.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Decorate(args) => cmd_decorate(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn open_session(args: &SessionArgs) -> anyhow::Result<picframe::EditorSession> {
    let mut settings = match &args.config {
        Some(path) => picframe::SessionSettings::from_path(path)?,
        None => picframe::SessionSettings::default(),
    };
    if let Some(overlay) = &args.overlay {
        settings.overlay_path = Some(overlay.clone());
    }
    if let Some(font) = &args.font {
        settings.font_path = Some(font.clone());
    }

    let mut session = picframe::EditorSession::new(settings)?;
    if let Some(mode) = &args.mode {
        session.set_mode(mode)?;
    }

    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read input '{}'", args.in_path.display()))?;
    session
        .load_source_bytes(&bytes)
        .with_context(|| format!("load input '{}'", args.in_path.display()))?;
    Ok(session)
}

fn cmd_decorate(args: DecorateArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.session)?;
    let export = session
        .export()?
        .context("no picture loaded (bug)")?;

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(&export.file_name));
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, &export.bytes)
        .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_preview(args: SessionArgs) -> anyhow::Result<()> {
    let session = open_session(&args)?;
    let preview = session.preview().context("no preview rendered (bug)")?;
    println!("{}", preview.to_data_url()?);
    Ok(())
}
