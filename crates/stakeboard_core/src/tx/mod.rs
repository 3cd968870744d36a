//! Transaction building for staking actions.
//!
//! # Responsibility
//! - Turn validated user intent into staking/distribution messages.
//! - Attach chain-table fee and gas, and produce amino sign documents.
//! - Assemble broadcast bodies from externally produced signatures.
//!
//! # Invariants
//! - Keys never enter this crate; signing is the wallet's job.
//! - Message amounts are positive integers in the chain's base denom.

mod msg;
mod sign_doc;

pub use msg::{MsgBuilder, StakingMsg};
pub use sign_doc::{build_sign_doc, build_std_tx, fee_for, AminoSignDoc, StdFee, TxSignature};

use crate::amount::AmountError;
use crate::chain::AddressError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TxResult<T> = Result<T, TxError>;

#[derive(Debug)]
pub enum TxError {
    Address(AddressError),
    Amount(AmountError),
    ZeroAmount,
    SameValidator(String),
    NoMessages,
    InvalidSignature(String),
    Encode(serde_json::Error),
}

impl Display for TxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address(err) => write!(f, "{err}"),
            Self::Amount(err) => write!(f, "{err}"),
            Self::ZeroAmount => write!(f, "amount must be greater than zero"),
            Self::SameValidator(address) => write!(
                f,
                "source and destination validator are the same: {address}"
            ),
            Self::NoMessages => write!(f, "transaction has no messages"),
            Self::InvalidSignature(value) => write!(f, "signature field is not base64: `{value}`"),
            Self::Encode(err) => write!(f, "failed to encode transaction: {err}"),
        }
    }
}

impl Error for TxError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Address(err) => Some(err),
            Self::Amount(err) => Some(err),
            Self::Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AddressError> for TxError {
    fn from(value: AddressError) -> Self {
        Self::Address(value)
    }
}

impl From<AmountError> for TxError {
    fn from(value: AmountError) -> Self {
        Self::Amount(value)
    }
}

impl From<serde_json::Error> for TxError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{build_sign_doc, build_std_tx, fee_for, MsgBuilder, TxError, TxSignature};
    use crate::chain::{chain_config, ChainKey};
    use crate::lcd::AccountInfo;
    use crate::staking::{WithdrawPlan, WithdrawScope};
    use rust_decimal::Decimal;

    const DELEGATOR: &str = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";
    const VAL_A: &str = "cosmosvaloper1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5hdmv4a";
    const VAL_B: &str = "cosmosvaloper1zg69v7ys40x77y352eufp27daufrg4nclyjh8x";

    fn account() -> AccountInfo {
        AccountInfo {
            address: DELEGATOR.to_string(),
            account_number: "12".to_string(),
            sequence: "3".to_string(),
        }
    }

    #[test]
    fn delegate_converts_amount_to_base_units() {
        let cosmos = chain_config(ChainKey::Cosmos);
        let builder = MsgBuilder::new(cosmos, DELEGATOR).unwrap();
        let msg = builder.delegate(VAL_A, "1.5").unwrap();
        let json = msg.to_amino_json();
        assert_eq!(json["type"], "cosmos-sdk/MsgDelegate");
        assert_eq!(json["value"]["amount"]["amount"], "1500000");
        assert_eq!(json["value"]["amount"]["denom"], "uatom");
    }

    #[test]
    fn rejects_zero_amount_and_same_validator_redelegation() {
        let cosmos = chain_config(ChainKey::Cosmos);
        let builder = MsgBuilder::new(cosmos, DELEGATOR).unwrap();
        assert!(matches!(
            builder.undelegate(VAL_A, "0").unwrap_err(),
            TxError::ZeroAmount
        ));
        assert!(matches!(
            builder.redelegate(VAL_A, VAL_A, "1").unwrap_err(),
            TxError::SameValidator(_)
        ));
        assert!(matches!(
            builder.delegate(VAL_A, "0.0000001").unwrap_err(),
            TxError::Amount(_)
        ));
    }

    #[test]
    fn rejects_delegator_from_another_chain() {
        let juno = chain_config(ChainKey::Juno);
        assert!(matches!(
            MsgBuilder::new(juno, DELEGATOR).err(),
            Some(TxError::Address(_))
        ));
    }

    #[test]
    fn withdraw_fee_and_gas_scale_with_validator_count() {
        let cosmos = chain_config(ChainKey::Cosmos);
        let builder = MsgBuilder::new(cosmos, DELEGATOR).unwrap();
        let plan = WithdrawPlan {
            scope: WithdrawScope::All,
            validator_addresses: vec![VAL_A.to_string(), VAL_B.to_string()],
            amount: Decimal::ONE,
        };
        let msgs = builder.withdraw_rewards(&plan).unwrap();
        assert_eq!(msgs.len(), 2);

        let fee = fee_for(cosmos, &msgs).unwrap();
        assert_eq!(fee.amount[0].amount, "10000");
        assert_eq!(fee.gas, "400000");
    }

    #[test]
    fn redelegate_uses_redelegate_gas() {
        let cosmos = chain_config(ChainKey::Cosmos);
        let builder = MsgBuilder::new(cosmos, DELEGATOR).unwrap();
        let msg = builder.redelegate(VAL_A, VAL_B, "2").unwrap();
        let fee = fee_for(cosmos, &[msg]).unwrap();
        assert_eq!(fee.gas, "300000");
        assert_eq!(fee.amount[0].amount, "5000");
    }

    #[test]
    fn sign_bytes_have_sorted_keys() {
        let cosmos = chain_config(ChainKey::Cosmos);
        let builder = MsgBuilder::new(cosmos, DELEGATOR).unwrap();
        let msg = builder.delegate(VAL_A, "1").unwrap();
        let doc = build_sign_doc(cosmos, &account(), &[msg], "").unwrap();

        let bytes = doc.to_sign_bytes().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with(r#"{"account_number":"12","chain_id":"cosmoshub-4","fee":{"amount":[{"amount":"5000","denom":"uatom"}],"gas":"200000"}"#));
        assert!(text.ends_with(r#""sequence":"3"}"#));
    }

    #[test]
    fn sign_bytes_escape_markup_characters_in_memo() {
        let cosmos = chain_config(ChainKey::Cosmos);
        let builder = MsgBuilder::new(cosmos, DELEGATOR).unwrap();
        let msg = builder.delegate(VAL_A, "1").unwrap();
        let doc = build_sign_doc(cosmos, &account(), &[msg], "a<b&c>d").unwrap();

        let text = String::from_utf8(doc.to_sign_bytes().unwrap()).unwrap();
        assert!(text.contains(r#""memo":"a\u003cb\u0026c\u003ed""#));
        assert!(!text.contains('<'));
        assert!(!text.contains('&'));

        let decoded: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded["memo"], "a<b&c>d");
    }

    #[test]
    fn std_tx_requires_base64_signature() {
        let cosmos = chain_config(ChainKey::Cosmos);
        let builder = MsgBuilder::new(cosmos, DELEGATOR).unwrap();
        let msg = builder.modify_withdraw_address(DELEGATOR).unwrap();
        let doc = build_sign_doc(cosmos, &account(), &[msg], "memo").unwrap();

        let body = build_std_tx(
            &doc,
            &TxSignature {
                pub_key: "A+2fq1zXx0bTj3zm3fZ2wK0o1c3Xh9Y2c3Vz0V0vY2Zx".to_string(),
                signature: "c2lnbmF0dXJl".to_string(),
            },
        )
        .unwrap();
        assert_eq!(body["mode"], "sync");
        assert_eq!(body["tx"]["memo"], "memo");
        assert_eq!(
            body["tx"]["msg"][0]["type"],
            "cosmos-sdk/MsgModifyWithdrawAddress"
        );

        let err = build_std_tx(
            &doc,
            &TxSignature {
                pub_key: "not base64!".to_string(),
                signature: "c2lnbmF0dXJl".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, TxError::InvalidSignature(_)));
    }

    #[test]
    fn empty_message_list_is_rejected() {
        let cosmos = chain_config(ChainKey::Cosmos);
        assert!(matches!(fee_for(cosmos, &[]).unwrap_err(), TxError::NoMessages));
    }
}
