use clap::Parser;
use snapink::backend::{self, DEFAULT_CANVAS_SIZE, HeadlessOptions};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "snapink")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SNAPINK_GIT_HASH"), ")"),
    about = "Annotate screenshots by replaying scripted pointer gestures"
)]
struct Cli {
    /// Gesture script (TOML list of [[steps]])
    #[arg(long, short = 's', value_name = "FILE")]
    script: PathBuf,

    /// PNG to annotate (a blank canvas is used when omitted)
    #[arg(long, short = 'i', value_name = "FILE")]
    input: Option<PathBuf>,

    /// Where to write the annotated PNG (defaults to the configured save directory)
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Blank canvas width
    #[arg(long, default_value_t = DEFAULT_CANVAS_SIZE.0)]
    width: i32,

    /// Blank canvas height
    #[arg(long, default_value_t = DEFAULT_CANVAS_SIZE.1)]
    height: i32,

    /// Config file to use instead of ~/.config/snapink/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("{:?}", cli);

    let options = HeadlessOptions {
        input: cli.input,
        output: cli.output,
        width: cli.width,
        height: cli.height,
        config: cli.config,
        ..HeadlessOptions::new(cli.script)
    };

    let saved = backend::run(&options)?;
    println!("{}", saved.display());
    Ok(())
}
