use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Single-character transaction type understood by the processor.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActionCode {
    Authorize,
    Purchase,
    Capture,
    Store,
    Unstore,
    Credit,
    Void,
    Verify,
}

/// Approval code per action. Anything not listed approves on `000`.
const SUCCESS_CODES: &[(ActionCode, &str)] = &[(ActionCode::Verify, "085")];

pub const DEFAULT_SUCCESS_CODE: &str = "000";

impl ActionCode {
    pub fn code(&self) -> &'static str {
        match self {
            ActionCode::Authorize => "P",
            ActionCode::Purchase => "D",
            ActionCode::Capture => "S",
            ActionCode::Store => "T",
            ActionCode::Unstore => "X",
            ActionCode::Credit => "C",
            ActionCode::Void => "V",
            ActionCode::Verify => "A",
        }
    }

    /// The `errorCode` the processor returns when this action is approved.
    pub fn success_code(&self) -> &'static str {
        SUCCESS_CODES
            .iter()
            .find(|(action, _)| action == self)
            .map(|(_, code)| *code)
            .unwrap_or(DEFAULT_SUCCESS_CODE)
    }

    /// Void never carries an amount, even when one is supplied.
    pub fn sends_amount(&self) -> bool {
        *self != ActionCode::Void
    }
}

impl fmt::Display for ActionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Default)]
pub struct AvsResult {
    pub code: Option<String>,
}

/// Normalized outcome of one processor call.
///
/// A decline is a result with `success == false`, not an error.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct TransactionResult {
    pub success: bool,
    pub message: String,
    /// Every field the processor sent back, decoded.
    pub params: HashMap<String, String>,
    /// Transaction id (or card id for `store`); feed it back into
    /// capture, void, credit or unstore.
    pub authorization: Option<String>,
    pub cvv_result: Option<String>,
    pub avs_result: AvsResult,
    pub test: bool,
}
