//! # Key Extraction
//!
//! The host locks and fetches these accounts before `validate_state`.
//! `source_keys` are the accounts the signer controls; `target_keys` are
//! everything else the transaction reads or writes.

use super::config::InternalTxConfig;
use super::entities::{CrackedKeys, InternalTx};
use super::errors::CrackError;
use itx_01_addressing::{eth_address_to_shard_address, to_shard_address, AccountType};
use shared_types::ShardAddress;

fn plain(input: &str) -> Result<ShardAddress, CrackError> {
    Ok(to_shard_address(input.trim(), AccountType::Account)?)
}

fn node(input: &str) -> Result<ShardAddress, CrackError> {
    Ok(to_shard_address(input.trim(), AccountType::NodeAccount)?)
}

pub fn crack(tx: &InternalTx, config: &InternalTxConfig) -> Result<CrackedKeys, CrackError> {
    let network = config.network_account_id;
    let (source_keys, target_keys) = match tx {
        InternalTx::TransferFromSecureAccount(t) => {
            let entry = config
                .secure_account(&t.account_name)
                .ok_or_else(|| CrackError::UnknownSecureAccount(t.account_name.clone()))?;
            (
                vec![
                    entry.secure_account_address,
                    eth_address_to_shard_address(&entry.source_funds_address),
                ],
                vec![
                    eth_address_to_shard_address(&entry.recipient_funds_address),
                    network,
                ],
            )
        }
        InternalTx::Stake(t) => (vec![plain(&t.nominator)?], vec![node(&t.nominee)?, network]),
        InternalTx::Unstake(t) => (vec![plain(&t.nominator)?], vec![node(&t.nominee)?]),
        InternalTx::ClaimReward(t) => {
            (vec![node(&t.nominee)?], vec![plain(&t.nominator)?, network])
        }
        InternalTx::InitRewardTimes(t) => (vec![node(&t.nominee)?], Vec::new()),
        InternalTx::SetCertTime(t) => {
            (vec![node(&t.nominee)?], vec![plain(&t.nominator)?, network])
        }
        InternalTx::ChangeConfig(_) | InternalTx::ChangeNetworkParam(_) => {
            (vec![network], Vec::new())
        }
    };
    Ok(CrackedKeys {
        source_keys,
        target_keys,
    })
}
