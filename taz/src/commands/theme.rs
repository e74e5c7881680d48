use anyhow::bail;
use clap::Subcommand;
use taz_config::Config;
use taz_core_theme_contracts::ThemeFeatureService;
use taz_di::Provide;
use taz_models::{
    color::{has_enough_contrast, Rgb, MIN_TEXT_CONTRAST},
    theme::ThemeMode,
};

use crate::environment::{types::ThemeFeature, Provider};

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ThemeCommand {
    /// Print the selected theme
    #[command(aliases(["s"]))]
    Show,
    /// Switch between dark and light mode
    #[command(aliases(["t"]))]
    Toggle,
    /// Select a theme
    Set {
        /// dark or light
        mode: ThemeMode,
    },
    /// Check whether a text color is readable on the theme color
    #[command(aliases(["c"]))]
    Contrast {
        /// Text color, e.g. #ffffff
        foreground: Rgb,
        /// Background color [default: color of the selected theme]
        #[arg(long)]
        background: Option<Rgb>,
    },
}

impl ThemeCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let mut provider = Provider::from_config(&config);
        let theme: ThemeFeature = provider.provide();

        let mode = match self {
            ThemeCommand::Show => theme.get().await,
            ThemeCommand::Toggle => theme.toggle().await,
            ThemeCommand::Set { mode } => {
                theme.set(mode).await;
                mode
            }
            ThemeCommand::Contrast {
                foreground,
                background,
            } => {
                let background = match background {
                    Some(background) => background,
                    None => theme.get().await.theme_rgb(),
                };
                return check_contrast(foreground, background);
            }
        };

        println!("{mode} ({})", mode.theme_color());

        Ok(())
    }
}

fn check_contrast(foreground: Rgb, background: Rgb) -> anyhow::Result<()> {
    let ratio = foreground.contrast_ratio(background);
    println!("{foreground} on {background}: {ratio:.2}:1");

    if !has_enough_contrast(foreground, background) {
        bail!("Contrast is below the minimum of {MIN_TEXT_CONTRAST}:1 for normal text");
    }

    Ok(())
}
