//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use drepheus_config::{Config, ConfigError};
use drepheus_core::{ColorTheme, GlyphSet, RainSpeed};

/// Matrix rain portal for the terminal.
#[derive(Debug, Parser)]
#[command(name = "drepheus", version, about)]
pub struct Cli {
    /// Config file to use instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed the rain for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Word the rain locks in.
    #[arg(short, long)]
    pub word: Option<String>,

    /// Color theme: neon, green, blue, gold or white.
    #[arg(short, long)]
    pub theme: Option<ColorTheme>,

    /// Rain speed: slow, normal or fast.
    #[arg(short, long)]
    pub speed: Option<RainSpeed>,

    /// Glyph set: classic or katakana.
    #[arg(short, long)]
    pub glyphs: Option<GlyphSet>,
}

impl Cli {
    /// Load the config file, apply command-line overrides and validate.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        let config = self.apply(config);
        config.validate()?;
        Ok(config)
    }

    /// Overlay command-line values onto `config`.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(word) = &self.word {
            config.rain.word = word.clone();
        }
        if let Some(theme) = self.theme {
            config.rain.theme = theme;
        }
        if let Some(speed) = self.speed {
            config.rain.speed = speed;
        }
        if let Some(glyphs) = self.glyphs {
            config.rain.glyphs = glyphs;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win_over_config() {
        let cli = Cli::try_parse_from([
            "drepheus", "--word", "Trinity", "-t", "blue", "--speed", "slow", "--seed", "9",
        ])
        .unwrap();
        let config = cli.apply(Config::default());
        assert_eq!(config.rain.word, "Trinity");
        assert_eq!(config.rain.theme, ColorTheme::Blue);
        assert_eq!(config.rain.speed, RainSpeed::Slow);
        assert_eq!(config.rain.glyphs, GlyphSet::Classic);
        assert_eq!(cli.seed, Some(9));
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::try_parse_from(["drepheus"]).unwrap();
        assert_eq!(cli.apply(Config::default()), Config::default());
    }

    #[test]
    fn test_unknown_theme_rejected() {
        assert!(Cli::try_parse_from(["drepheus", "--theme", "purple"]).is_err());
    }

    #[test]
    fn test_config_path_missing_file() {
        let path = std::env::temp_dir().join("drepheus-cli-no-such-config.toml");
        let path = path.display().to_string();
        let cli = Cli::try_parse_from(["drepheus", "-c", &path]).unwrap();
        assert_eq!(cli.load_config().unwrap(), Config::default());
    }

    #[test]
    fn test_empty_word_fails_validation() {
        let cli = Cli::try_parse_from([
            "drepheus",
            "--config",
            "/nonexistent/drepheus.toml",
            "--word",
            "",
        ])
        .unwrap();
        assert!(cli.load_config().is_err());
    }
}
