pub mod config;
pub mod map;
pub mod replay;
pub mod snapshot;

use std::path::Path;

use anyhow::{Context, Result};
use arview_core::config::ArConfig;
use arview_core::geometry::Point;
use tracing::debug;

/// Parse `WIDTHxHEIGHT`, e.g. `400x800`.
pub fn parse_size(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|_| format!("invalid width '{w}'"))?;
    let h: f64 = h.trim().parse().map_err(|_| format!("invalid height '{h}'"))?;
    Ok((w, h))
}

/// Parse `X,Y`, e.g. `10,-5`.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|_| format!("invalid x '{x}'"))?;
    let y: f64 = y.trim().parse().map_err(|_| format!("invalid y '{y}'"))?;
    Ok(Point::new(x, y))
}

pub fn load_config(path: Option<&Path>) -> Result<ArConfig> {
    let config = match path {
        Some(path) => {
            let config = ArConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            debug!(path = %path.display(), "Loaded AR config");
            config
        }
        None => ArConfig::default(),
    };
    config.validate().context("Invalid AR config")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("400x800").unwrap(), (400.0, 800.0));
        assert_eq!(parse_size("1280X720").unwrap(), (1280.0, 720.0));
        assert!(parse_size("400").is_err());
        assert!(parse_size("ax800").is_err());
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("10,-5").unwrap(), Point::new(10.0, -5.0));
        assert_eq!(parse_point(" 1.5 , 2 ").unwrap(), Point::new(1.5, 2.0));
        assert!(parse_point("10").is_err());
    }
}
