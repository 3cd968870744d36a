//! Amino JSON sign documents and legacy `StdTx` bodies.

use super::msg::StakingMsg;
use super::{TxError, TxResult};
use crate::amount;
use crate::chain::{ChainConfig, TxKind};
use crate::lcd::{AccountInfo, Coin};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const SECP256K1_PUB_KEY_TYPE: &str = "tendermint/PubKeySecp256k1";
const BROADCAST_MODE: &str = "sync";

static BASE64_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+/]+={0,2}$").expect("valid base64 regex"));

/// Fee attached to a transaction, in base units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    pub gas: String,
}

/// Document a wallet signs in amino JSON mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AminoSignDoc {
    pub account_number: String,
    pub chain_id: String,
    pub fee: StdFee,
    pub memo: String,
    pub msgs: Vec<Value>,
    pub sequence: String,
}

impl AminoSignDoc {
    /// Canonical bytes: compact JSON with lexicographically sorted keys and
    /// `<`, `>`, `&` escaped as `\u003c`, `\u003e`, `\u0026`, matching the
    /// node's own sign-bytes encoder.
    pub fn to_sign_bytes(&self) -> TxResult<Vec<u8>> {
        // serde_json's default map is ordered, so a Value round trip sorts keys.
        let value = serde_json::to_value(self)?;
        let text = serde_json::to_string(&value)?;
        Ok(escape_html_chars(&text).into_bytes())
    }
}

// The three characters only occur inside JSON strings, so escaping them in
// the serialized text never touches structure.
fn escape_html_chars(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(ch),
        }
    }
    out
}

/// Signature produced by an external wallet for an `AminoSignDoc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxSignature {
    /// Compressed secp256k1 public key, base64.
    pub pub_key: String,
    /// 64-byte `r || s` signature, base64.
    pub signature: String,
}

/// Computes fee and gas for `msgs`.
///
/// Messages of one kind use that kind's table row; reward withdrawals scale
/// linearly with the number of validators. Mixed batches fall back to the
/// `default` row.
pub fn fee_for(chain: &ChainConfig, msgs: &[StakingMsg]) -> TxResult<StdFee> {
    let first = msgs.first().ok_or(TxError::NoMessages)?;
    let kind = if msgs.iter().all(|msg| msg.tx_kind() == first.tx_kind()) {
        first.tx_kind()
    } else {
        TxKind::Default
    };
    let count = if kind == TxKind::WithdrawReward {
        msgs.len()
    } else {
        1
    };

    let display_fee = amount::times(chain.fee_amount(kind)?, Decimal::from(count))?;
    let fee_base = amount::to_base_amount(&display_fee.to_string(), chain.decimal)?;
    let gas = chain.gas_limit(kind).saturating_mul(count as u64);

    Ok(StdFee {
        amount: vec![Coin {
            denom: chain.denom.to_string(),
            amount: fee_base,
        }],
        gas: gas.to_string(),
    })
}

/// Builds the amino sign document for `msgs`.
pub fn build_sign_doc(
    chain: &ChainConfig,
    account: &AccountInfo,
    msgs: &[StakingMsg],
    memo: &str,
) -> TxResult<AminoSignDoc> {
    let fee = fee_for(chain, msgs)?;
    Ok(AminoSignDoc {
        account_number: account.account_number.clone(),
        chain_id: chain.chain_id.to_string(),
        fee,
        memo: memo.to_string(),
        msgs: msgs.iter().map(StakingMsg::to_amino_json).collect(),
        sequence: account.sequence.clone(),
    })
}

/// Wraps a signed document into a legacy `/txs` broadcast body.
pub fn build_std_tx(sign_doc: &AminoSignDoc, signature: &TxSignature) -> TxResult<Value> {
    for value in [&signature.pub_key, &signature.signature] {
        if !BASE64_RE.is_match(value.trim()) {
            return Err(TxError::InvalidSignature(value.clone()));
        }
    }

    Ok(json!({
        "tx": {
            "msg": sign_doc.msgs,
            "fee": sign_doc.fee,
            "signatures": [{
                "pub_key": {
                    "type": SECP256K1_PUB_KEY_TYPE,
                    "value": signature.pub_key.trim(),
                },
                "signature": signature.signature.trim(),
            }],
            "memo": sign_doc.memo,
        },
        "mode": BROADCAST_MODE,
    }))
}
