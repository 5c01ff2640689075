//! `apihub version` command.

use apihub_protocol::mcp::initialize::PROTOCOL_VERSION;

pub fn version_line() -> String {
    format!(
        "apihub {} (MCP {PROTOCOL_VERSION}, JSON-RPC {})",
        env!("CARGO_PKG_VERSION"),
        apihub_protocol::JSONRPC_VERSION
    )
}

/// Executes the version command.
pub fn execute() -> anyhow::Result<()> {
    println!("{}", version_line());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_package_and_protocol() {
        let line = version_line();
        assert!(line.starts_with("apihub "));
        assert!(line.contains(PROTOCOL_VERSION));
    }
}
