//! Config CLI command.

use crate::config::CasefinderConfig;
use std::io::{self, Write};

/// Writes the effective configuration, or usage hints when `show` is false.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn cmd_config<W: Write>(writer: &mut W, config: &CasefinderConfig, show: bool) -> io::Result<()> {
    if !show {
        return writeln!(writer, "Use --show to display configuration");
    }

    writeln!(writer, "Current Configuration")?;
    writeln!(writer, "=====================")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "Records File: {}",
        config
            .records_path
            .as_ref()
            .map_or_else(|| "(sample cases)".to_string(), |p| p.display().to_string())
    )?;
    writeln!(writer, "Default Format: {}", config.default_format)?;
    writeln!(writer)?;
    writeln!(writer, "Logging:")?;
    writeln!(
        writer,
        "  Level: {}",
        config.logging.level.as_deref().unwrap_or("(default)")
    )?;
    writeln!(
        writer,
        "  Format: {}",
        config.logging.format.as_deref().unwrap_or("pretty")
    )?;
    writeln!(
        writer,
        "  File: {}",
        config
            .logging
            .file
            .as_ref()
            .map_or_else(|| "(stderr)".to_string(), |p| p.display().to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_defaults() {
        let mut out = Vec::new();
        cmd_config(&mut out, &CasefinderConfig::default(), true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Records File: (sample cases)"));
        assert!(text.contains("Default Format: table"));
        assert!(text.contains("File: (stderr)"));
    }

    #[test]
    fn test_show_records_path() {
        let config = CasefinderConfig::default().with_records_path("/srv/cases.csv");
        let mut out = Vec::new();
        cmd_config(&mut out, &config, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Records File: /srv/cases.csv"));
    }

    #[test]
    fn test_without_show_prints_hint() {
        let mut out = Vec::new();
        cmd_config(&mut out, &CasefinderConfig::default(), false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Use --show to display configuration\n");
    }
}
