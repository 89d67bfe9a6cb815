use std::path::PathBuf;

use clap::Parser;
use letterbox::config::{DEFAULT_APP_ID, DEFAULT_INITIAL_SCALE, DEFAULT_TITLE};
use letterbox::ViewerConfig;

/// Display an image in a Wayland window, scaled by whole multiples
#[derive(Debug, Parser)]
#[command(name = "pngview", version, about)]
pub struct Args {
    /// Image file to display
    pub path: PathBuf,

    /// Window title
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Wayland application id
    #[arg(long = "app-id", default_value = DEFAULT_APP_ID)]
    pub app_id: String,

    /// Initial window size as a multiple of the image size
    #[arg(
        long,
        default_value_t = DEFAULT_INITIAL_SCALE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub initial_scale: u32,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn config(&self) -> ViewerConfig {
        ViewerConfig {
            title: self.title.clone(),
            app_id: self.app_id.clone(),
            initial_scale: self.initial_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_viewer_config() {
        let args = Args::try_parse_from(["pngview", "cat.png"]).unwrap();
        assert_eq!(args.path, PathBuf::from("cat.png"));
        assert!(!args.verbose);
        assert_eq!(args.config(), ViewerConfig::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "pngview",
            "--title",
            "Sprite",
            "--app-id",
            "org.example.sprite",
            "--initial-scale",
            "4",
            "-v",
            "sprite.png",
        ])
        .unwrap();

        assert!(args.verbose);
        assert_eq!(
            args.config(),
            ViewerConfig {
                title: "Sprite".to_string(),
                app_id: "org.example.sprite".to_string(),
                initial_scale: 4,
            }
        );
    }

    /// 测试：缺少图片路径是用法错误
    #[test]
    fn test_missing_path_is_rejected() {
        assert!(Args::try_parse_from(["pngview"]).is_err());
    }

    #[test]
    fn test_zero_scale_is_rejected() {
        assert!(Args::try_parse_from(["pngview", "--initial-scale", "0", "a.png"]).is_err());
    }
}
