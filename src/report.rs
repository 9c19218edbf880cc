use crate::{error::ConfigError, outcome::LoadResult};
use colored::Colorize;
use std::fmt;

/// Aggregate view of a load: whether it fully succeeded, plus one message per failure
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    pub ok: bool,
    pub diagnostics: Vec<String>,
}

/// Turn a load result into an operator-facing summary
///
/// Each diagnostic names the key, the expected kind, the offending raw value
/// (for mismatches) and the example hint when the field carries one.
/// Diagnostics are plain text regardless of terminal coloring.
pub fn summarize(result: &LoadResult) -> Summary {
    Summary {
        ok: result.is_ok(),
        diagnostics: result
            .errors()
            .iter()
            .map(|e| e.plain_message().trim_end().to_string())
            .collect(),
    }
}

/// Helper to format multiple configuration errors into a single message
pub fn format_config_errors(errors: &[ConfigError]) -> String {
    let error_summary = errors
        .iter()
        .map(|e| format!("  - {}", e.to_string().trim_end()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Configuration failed with {} error(s):\n{}",
        errors.len().to_string().yellow().bold(),
        error_summary
    )
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ok {
            return write!(f, "Configuration loaded successfully");
        }

        write!(
            f,
            "Configuration failed with {} error(s):",
            self.diagnostics.len().to_string().yellow().bold()
        )?;
        for diagnostic in &self.diagnostics {
            write!(f, "\n  - {}", diagnostic)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        binder::bind,
        field::{FieldDescriptor, FieldKind},
        source::StaticSource,
    };
    use serial_test::serial;

    #[test]
    fn test_summarize_ok() {
        let source = StaticSource::new().with("HOST", "thepark");
        let result = bind(&[FieldDescriptor::string("host")], &source).unwrap();
        let summary = summarize(&result);

        assert!(summary.ok);
        assert!(summary.diagnostics.is_empty());
        assert_eq!(summary.to_string(), "Configuration loaded successfully");
    }

    #[test]
    #[serial]
    fn test_summarize_partial_failure() {
        colored::control::set_override(false);

        let source = StaticSource::new().with("PORT", "notanumber");
        let fields = [
            FieldDescriptor::string("host").with_example("localhost"),
            FieldDescriptor::integer("port").with_example("9000"),
            FieldDescriptor::boolean("debug"),
        ];
        let summary = summarize(&bind(&fields, &source).unwrap());

        assert!(!summary.ok);
        assert_eq!(summary.diagnostics.len(), 3);

        assert!(summary.diagnostics[0].contains("HOST"));
        assert!(summary.diagnostics[0].contains("Expected: string"));
        assert!(summary.diagnostics[0].contains("Example: HOST=localhost"));

        assert!(summary.diagnostics[1].contains("Invalid value 'notanumber'"));
        assert!(summary.diagnostics[1].contains("Expected: integer"));
        assert!(summary.diagnostics[1].contains("Example: PORT=9000"));

        assert!(summary.diagnostics[2].contains("DEBUG"));
        assert!(!summary.diagnostics[2].contains("Example:"));
    }

    #[test]
    #[serial]
    fn test_summary_display_lists_diagnostics() {
        colored::control::set_override(false);

        let summary = Summary {
            ok: false,
            diagnostics: vec!["first".to_string(), "second".to_string()],
        };

        assert_eq!(
            summary.to_string(),
            "Configuration failed with 2 error(s):\n  - first\n  - second"
        );
    }

    #[test]
    #[serial]
    fn test_format_config_errors_single() {
        colored::control::set_override(false);

        let errors = vec![ConfigError::MissingKey {
            key: "TEST_VAR".to_string(),
            kind: FieldKind::String,
            example: Some("example".to_string()),
        }];

        let formatted = format_config_errors(&errors);
        assert!(formatted.contains("Configuration failed with 1 error(s)"));
        assert!(formatted.contains("TEST_VAR"));
    }

    #[test]
    #[serial]
    fn test_format_config_errors_multiple() {
        colored::control::set_override(false);

        let errors = vec![
            ConfigError::MissingKey {
                key: "VAR1".to_string(),
                kind: FieldKind::Integer,
                example: None,
            },
            ConfigError::TypeMismatch {
                key: "VAR2".to_string(),
                kind: FieldKind::Boolean,
                value: "bad".to_string(),
                example: None,
            },
        ];

        let formatted = format_config_errors(&errors);
        assert!(formatted.contains("Configuration failed with 2 error(s)"));
        assert!(formatted.contains("VAR1"));
        assert!(formatted.contains("VAR2"));
    }

    #[test]
    #[serial]
    fn test_diagnostics_stay_plain_when_colored() {
        colored::control::set_override(true);

        let source = StaticSource::new().with("PORT", "abc");
        let fields = [
            FieldDescriptor::string("host").with_example("localhost"),
            FieldDescriptor::integer("port").with_example("9000"),
        ];
        let summary = summarize(&bind(&fields, &source).unwrap());

        colored::control::set_override(false);

        assert_eq!(
            summary.diagnostics,
            [
                "HOST: Is missing and is required\n\tExpected: string\n\tExample: HOST=localhost",
                "PORT: Invalid value 'abc'\n\tExpected: integer\n\tExample: PORT=9000",
            ]
        );
        assert!(summary.diagnostics.iter().all(|d| !d.contains('\x1b')));
    }
}
