use std::path::Path;

use dsg_lib::{Config, DsgError, Viewport};

/// Checks if a flag was present in the command-line arguments.
pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&format!("{flag}=")))
}

/// CLI viewport when `--viewport` was given explicitly, config otherwise.
pub fn resolve_viewport(args: &[String], cli_viewport: Viewport, config: &Config) -> Viewport {
    if flag_present(args, "--viewport") {
        cli_viewport
    } else {
        config.viewport
    }
}

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/dsg/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, DsgError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        DsgError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        DsgError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Format effective config as a single-line string.
pub fn format_effective_config(
    config: &Config,
    viewport: &Viewport,
    config_source: Option<&Path>,
) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    let fonts_dir = config
        .fonts
        .directory
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "none".to_string());
    format!(
        "Effective config [{source}]: viewport={}x{}, page=\"{}\", labels={}, sample_length={}, fonts: available={}, dir={}, timeout={}ms",
        viewport.width,
        viewport.height,
        config.report.page_name,
        config.report.label_family,
        config.report.sample_length,
        config.fonts.available.len(),
        fonts_dir,
        config.fonts.load_timeout.as_millis(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn resolve_viewport_prefers_config_when_flag_absent() {
        let mut cfg = Config::default();
        cfg.viewport = Viewport {
            width: 111,
            height: 222,
        };
        let args = vec!["dsg".to_string(), "generate".to_string()];
        let resolved = resolve_viewport(
            &args,
            Viewport {
                width: 999,
                height: 999,
            },
            &cfg,
        );
        assert_eq!((resolved.width, resolved.height), (111, 222));
    }

    #[test]
    fn resolve_viewport_prefers_cli_when_flag_present() {
        let cfg = Config::default();
        let args = vec!["dsg".to_string(), "--viewport=10x20".to_string()];
        let resolved = resolve_viewport(
            &args,
            Viewport {
                width: 10,
                height: 20,
            },
            &cfg,
        );
        assert_eq!((resolved.width, resolved.height), (10, 20));
    }

    #[test]
    fn load_config_reports_invalid_values() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("dsg.toml");
        std::fs::write(&path, "[report]\nsample_length = 0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Invalid config"), "got {message}");
        assert!(message.contains("sample_length"), "got {message}");
    }

    #[test]
    fn format_effective_config_includes_all_fields() {
        let mut cfg = Config::default();
        cfg.fonts.load_timeout = Duration::from_millis(750);
        let summary = format_effective_config(
            &cfg,
            &Viewport {
                width: 1280,
                height: 720,
            },
            Some(Path::new("dsg.toml")),
        );
        assert!(summary.contains("1280x720"));
        assert!(summary.contains("page=\"Auto Design System\""));
        assert!(summary.contains("labels=Inter"));
        assert!(summary.contains("sample_length=50"));
        assert!(summary.contains("available=7"));
        assert!(summary.contains("dir=none"));
        assert!(summary.contains("timeout=750ms"));
        assert!(summary.contains("dsg.toml"));
    }
}
