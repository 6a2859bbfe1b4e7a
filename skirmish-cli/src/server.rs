//! Serve command - start the render bridge
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to skirmish-bridge crate)
//! - Level 4: configuration validation

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use skirmish_bridge::{run_server, ServerConfig};
use skirmish_core::ClientConfig;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// Unset flags fall back to the client configuration
#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory containing the renderer's static files
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Hex size in pixels for pixel/hex conversion
    #[arg(long)]
    pub hex_size: Option<f64>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run serve command
///
/// 1. Configure server
/// 2. Start server (blocking)
pub fn run(args: ServerArgs, config: &ClientConfig) -> Result<()> {
    let config = configure_server(&args, config)?;

    tracing::info!("Starting skirmish bridge on port {}", config.port);

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Merge command arguments over the client configuration
fn configure_server(args: &ServerArgs, config: &ClientConfig) -> Result<ServerConfig> {
    let static_dir = args.static_dir.as_ref().unwrap_or(&config.static_dir);
    validate_static_dir(static_dir)?;

    let hex_size = args.hex_size.unwrap_or(config.hex_size);
    if !(hex_size.is_finite() && hex_size > 0.0) {
        anyhow::bail!("hex size must be positive, got {}", hex_size);
    }

    Ok(ServerConfig {
        port: args.port.unwrap_or(config.port),
        static_dir: static_dir.to_string_lossy().to_string(),
        hex_size,
    })
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config).await })
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Validate that static directory exists
fn validate_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. Server will start but may not serve files.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "Static path exists but is not a directory: {}",
            path.display()
        );
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn no_flags() -> ServerArgs {
        ServerArgs {
            port: None,
            static_dir: None,
            hex_size: None,
        }
    }

    #[test]
    fn test_configure_server_defaults() {
        let config = configure_server(&no_flags(), &ClientConfig::default()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.static_dir, "web");
        assert_eq!(config.hex_size, 40.0);
    }

    #[test]
    fn test_flags_override_config() {
        let args = ServerArgs {
            port: Some(9100),
            static_dir: Some(PathBuf::from("test_static")),
            hex_size: Some(24.0),
        };
        let config = configure_server(&args, &ClientConfig::default()).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.static_dir, "test_static");
        assert_eq!(config.hex_size, 24.0);
    }

    #[test]
    fn test_rejects_bad_hex_size() {
        let args = ServerArgs {
            hex_size: Some(-3.0),
            ..no_flags()
        };
        assert!(configure_server(&args, &ClientConfig::default()).is_err());
    }

    #[test]
    fn test_validate_static_dir_nonexistent() {
        // Should not error, just warn
        let result = validate_static_dir(Path::new("/nonexistent/path"));
        assert!(result.is_ok());
    }
}
