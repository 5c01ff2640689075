//! Property-based tests for JSON-RPC deserialization.
//!
//! The parser must never panic on arbitrary input and well-formed
//! requests must survive a serde round-trip with their id intact.

use apihub_protocol::jsonrpc::{JsonRpcRequest, RequestId};
use proptest::prelude::*;

proptest! {
    /// Arbitrary strings never cause a panic.
    #[test]
    fn no_panic_on_arbitrary_json(input in "\\PC{0,256}") {
        let _ = serde_json::from_str::<JsonRpcRequest>(&input);
    }

    /// Numeric ids round-trip unchanged.
    #[test]
    fn numeric_id_roundtrips(method in "[a-z/]{1,32}", id in any::<i64>()) {
        let json = serde_json::json!({"jsonrpc": "2.0", "id": id, "method": method});
        let req: JsonRpcRequest = serde_json::from_value(json)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(&req.id, &RequestId::Number(id));

        let s = serde_json::to_string(&req).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let back: JsonRpcRequest =
            serde_json::from_str(&s).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(back.id, RequestId::Number(id));
    }

    /// String ids round-trip unchanged.
    #[test]
    fn string_id_roundtrips(id in "[a-zA-Z0-9-]{1,24}") {
        let json = serde_json::json!({"jsonrpc": "2.0", "id": id.clone(), "method": "ping"});
        let req: JsonRpcRequest = serde_json::from_value(json)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(req.id, RequestId::String(id));
    }

    /// Missing "method" field causes parse failure.
    #[test]
    fn missing_method_field_fails(id in 1i64..1000) {
        let json = format!(r#"{{"jsonrpc":"2.0","id":{id}}}"#);
        prop_assert!(serde_json::from_str::<JsonRpcRequest>(&json).is_err());
    }

    /// Missing "id" field causes parse failure; such messages are notifications.
    #[test]
    fn missing_id_field_fails(method in "[a-z]{2,16}") {
        let json = format!(r#"{{"jsonrpc":"2.0","method":"{method}"}}"#);
        prop_assert!(serde_json::from_str::<JsonRpcRequest>(&json).is_err());
    }
}
