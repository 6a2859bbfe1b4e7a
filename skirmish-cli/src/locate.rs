//! Locate command - convert a pixel position to a hex coordinate

use anyhow::Result;
use clap::Args;

use skirmish_core::{ClientConfig, Layout};

#[derive(Args)]
pub struct LocateArgs {
    /// Pixel x, relative to the origin hex center
    #[arg(long, allow_hyphen_values = true)]
    pub x: f64,

    /// Pixel y, relative to the origin hex center
    #[arg(long, allow_hyphen_values = true)]
    pub y: f64,

    /// Hex size in pixels (defaults to the configured size)
    #[arg(long)]
    pub hex_size: Option<f64>,
}

pub fn run(args: LocateArgs, config: &ClientConfig) -> Result<()> {
    let layout = layout(&args, config)?;
    let cc = layout.from_pixel(args.x, args.y);
    let (cx, cy) = layout.to_pixel(cc);
    println!("{} (center {:.1}, {:.1})", cc, cx, cy);
    Ok(())
}

fn layout(args: &LocateArgs, config: &ClientConfig) -> Result<Layout> {
    let hex_size = args.hex_size.unwrap_or(config.hex_size);
    if !(hex_size.is_finite() && hex_size > 0.0) {
        anyhow::bail!("hex size must be positive, got {}", hex_size);
    }
    Ok(Layout::new(hex_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::Cc;

    fn locate(args: &LocateArgs, config: &ClientConfig) -> Result<Cc> {
        Ok(layout(args, config)?.from_pixel(args.x, args.y))
    }

    fn args(x: f64, y: f64, hex_size: Option<f64>) -> LocateArgs {
        LocateArgs { x, y, hex_size }
    }

    #[test]
    fn test_locate_uses_config_size() {
        let config = ClientConfig::default();
        assert_eq!(locate(&args(0.0, 0.0, None), &config).unwrap(), Cc::ORIGIN);

        let (x, y) = config.layout().to_pixel(Cc::new(2, -1));
        assert_eq!(locate(&args(x, y, None), &config).unwrap(), Cc::new(2, -1));
    }

    #[test]
    fn test_rejects_bad_hex_size() {
        let config = ClientConfig::default();
        assert!(locate(&args(1.0, 1.0, Some(0.0)), &config).is_err());
    }
}
