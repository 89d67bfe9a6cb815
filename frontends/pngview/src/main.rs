mod cli;
mod error;
#[cfg(target_os = "linux")]
mod session;

use std::process::ExitCode;

use clap::Parser;
use letterbox::Image;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::error::ViewerError;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// RUST_LOG 优先，否则 info（`--verbose` 时 debug）
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn run(args: &Args) -> Result<(), ViewerError> {
    let config = args.config();
    // 解码失败在进入事件循环之前就退出
    let image = Image::open(&args.path).map_err(letterbox::Error::from)?;

    #[cfg(target_os = "linux")]
    {
        session::run(image, &config)
    }

    #[cfg(not(target_os = "linux"))]
    {
        let _ = (image, config);
        Err(ViewerError::Unsupported)
    }
}
