//! Output formatting for CLI responses.

use std::fmt::Display;

use apihub_types::DiagnosticError;

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

/// Prints an error followed by its hint and fix, when it has them.
pub fn print_diagnostic<E: DiagnosticError + Display>(err: &E) {
    print_error(&err.to_string());
    for line in render_advice(err) {
        eprintln!("{line}");
    }
}

fn render_advice<E: DiagnosticError>(err: &E) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(hint) = err.hint() {
        lines.push(format!("  hint: {hint}"));
    }
    if let Some(fix) = err.fix() {
        lines.push(format!("  fix:  {fix}"));
    }
    lines
}

/// Pretty-prints a JSON value on stdout.
pub fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apihub_config::ConfigError;

    #[test]
    fn advice_lists_hint_and_fix() {
        let err = ConfigError::FileNotFound {
            path: "apihub.toml".into(),
        };
        let lines = render_advice(&err);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  hint:"));
        assert!(lines[1].starts_with("  fix:"));
    }

    #[test]
    fn invalid_field_has_fix_only() {
        let err = ConfigError::Invalid {
            field: "server.port",
            reason: "must not be 0".into(),
        };
        let lines = render_advice(&err);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("server.port"));
    }

    #[test]
    fn gateway_errors_render_advice() {
        let err = apihub_gateway::GatewayError::Config("invalid hub URL 'x'".into());
        let lines = render_advice(&err);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("APIHUB_BACKEND__"));
    }
}
