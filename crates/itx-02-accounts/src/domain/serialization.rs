//! # Account Serialization
//!
//! `BinaryCodec` for every account record. Each top-level account writes its
//! stored hash first and its content after it; hashing reuses the content
//! half (`write_content`) so that the hash never covers itself.
//!
//! Root layout: `u16` type id, then the record (version byte + fields).

use super::codec::{BinaryCodec, BinaryReader, BinaryWriter};
use super::entities::*;
use super::errors::CodecError;
use itx_01_addressing::AccountType;

// =============================================================================
// ROOT
// =============================================================================

/// Encode an account with its root type identifier.
pub fn encode_account(account: &Account) -> Vec<u8> {
    let mut w = BinaryWriter::new();
    w.write_u16(account.kind().type_id());
    match account {
        Account::Account(a) | Account::Debug(a) => a.encode_record(&mut w),
        Account::ContractStorage(a) => a.encode_record(&mut w),
        Account::ContractCode(a) => a.encode_record(&mut w),
        Account::Receipt(a) => a.encode_record(&mut w),
        Account::NetworkAccount(a) => a.encode_record(&mut w),
        Account::NodeAccount(a) => a.encode_record(&mut w),
        Account::InternalTxReceipt(a) => a.encode_record(&mut w),
        Account::SecureAccount(a) => a.encode_record(&mut w),
    }
    w.into_bytes()
}

/// Decode a root account record. The whole input must be consumed.
pub fn decode_account(bytes: &[u8]) -> Result<Account, CodecError> {
    let mut r = BinaryReader::new(bytes);
    let type_id = r.read_u16()?;
    let kind = AccountType::from_type_id(type_id).ok_or(CodecError::UnknownTypeId(type_id))?;
    let account = match kind {
        AccountType::Account => Account::Account(EoaAccount::decode_record(&mut r)?),
        AccountType::Debug => Account::Debug(EoaAccount::decode_record(&mut r)?),
        AccountType::ContractStorage => {
            Account::ContractStorage(ContractStorageAccount::decode_record(&mut r)?)
        }
        AccountType::ContractCode => {
            Account::ContractCode(ContractCodeAccount::decode_record(&mut r)?)
        }
        AccountType::Receipt => Account::Receipt(ReceiptAccount::decode_record(&mut r)?),
        AccountType::NetworkAccount => {
            Account::NetworkAccount(NetworkAccount::decode_record(&mut r)?)
        }
        AccountType::NodeAccount => Account::NodeAccount(NodeAccount::decode_record(&mut r)?),
        AccountType::InternalTxReceipt => {
            Account::InternalTxReceipt(InternalTxReceipt::decode_record(&mut r)?)
        }
        AccountType::SecureAccount => {
            Account::SecureAccount(SecureAccount::decode_record(&mut r)?)
        }
    };
    r.finish()?;
    Ok(account)
}

// =============================================================================
// NESTED RECORDS
// =============================================================================

impl BinaryCodec for LedgerAccount {
    const VERSION: u8 = 1;

    fn encode_fields(&self, w: &mut BinaryWriter) {
        w.write_u256(&self.nonce);
        w.write_u256(&self.balance);
        w.write_hash(&self.storage_root);
        w.write_hash(&self.code_hash);
    }

    fn decode_fields(r: &mut BinaryReader<'_>, _version: u8) -> Result<Self, CodecError> {
        Ok(Self {
            nonce: r.read_u256()?,
            balance: r.read_u256()?,
            storage_root: r.read_hash()?,
            code_hash: r.read_hash()?,
        })
    }
}

fn write_history(w: &mut BinaryWriter, history: &[HistoryEntry]) {
    w.write_seq(history, |w, entry| {
        w.write_u64(entry.b);
        w.write_u64(entry.e);
    });
}

fn read_history(r: &mut BinaryReader<'_>) -> Result<Vec<HistoryEntry>, CodecError> {
    r.read_seq(|r| {
        Ok(HistoryEntry {
            b: r.read_u64()?,
            e: r.read_u64()?,
        })
    })
}

impl BinaryCodec for OperatorStats {
    // v2 appended `last_staked_node_key`
    const VERSION: u8 = 2;

    fn encode_fields(&self, w: &mut BinaryWriter) {
        w.write_u256(&self.total_node_reward);
        w.write_u256(&self.total_node_penalty);
        w.write_u64(self.total_node_time);
        write_history(w, &self.history);
        w.write_u256(&self.total_unstake_reward);
        w.write_u64(self.unstake_count);
        w.write_optional(self.last_staked_node_key.as_ref(), |w, v| w.write_string(v));
    }

    fn decode_fields(r: &mut BinaryReader<'_>, version: u8) -> Result<Self, CodecError> {
        let mut stats = Self {
            total_node_reward: r.read_u256()?,
            total_node_penalty: r.read_u256()?,
            total_node_time: r.read_u64()?,
            history: read_history(r)?,
            total_unstake_reward: r.read_u256()?,
            unstake_count: r.read_u64()?,
            last_staked_node_key: None,
        };
        if version >= 2 {
            stats.last_staked_node_key = r.read_optional(|r| r.read_string())?;
        }
        Ok(stats)
    }
}

impl BinaryCodec for OperatorAccountInfo {
    const VERSION: u8 = 1;

    fn encode_fields(&self, w: &mut BinaryWriter) {
        w.write_u256(&self.stake);
        w.write_optional(self.nominee.as_ref(), |w, v| w.write_string(v));
        w.write_u64(self.cert_exp);
        self.operator_stats.encode_record(w);
    }

    fn decode_fields(r: &mut BinaryReader<'_>, _version: u8) -> Result<Self, CodecError> {
        Ok(Self {
            stake: r.read_u256()?,
            nominee: r.read_optional(|r| r.read_string())?,
            cert_exp: r.read_u64()?,
            operator_stats: OperatorStats::decode_record(r)?,
        })
    }
}

impl BinaryCodec for NodeAccountStats {
    const VERSION: u8 = 1;

    fn encode_fields(&self, w: &mut BinaryWriter) {
        w.write_u256(&self.total_reward);
        w.write_u256(&self.total_penalty);
        write_history(w, &self.history);
        w.write_bool(self.is_slashed);
    }

    fn decode_fields(r: &mut BinaryReader<'_>, _version: u8) -> Result<Self, CodecError> {
        Ok(Self {
            total_reward: r.read_u256()?,
            total_penalty: r.read_u256()?,
            history: read_history(r)?,
            is_slashed: r.read_bool()?,
        })
    }
}

impl BinaryCodec for NetworkParameters {
    const VERSION: u8 = 1;

    fn encode_fields(&self, w: &mut BinaryWriter) {
        w.write_u64(self.node_reward_interval);
        w.write_u256(&self.node_reward_amount_usd);
        w.write_u256(&self.node_penalty_usd);
        w.write_u256(&self.stake_required_usd);
        w.write_u256(&self.max_stake_usd);
        w.write_u64(self.stability_scale_mul);
        w.write_u64(self.stability_scale_div);
        w.write_u64(self.cert_cycle_duration);
        w.write_u64(self.cycle_duration_ms);
        w.write_u64(self.secure_transfer_interval_ms);
    }

    fn decode_fields(r: &mut BinaryReader<'_>, _version: u8) -> Result<Self, CodecError> {
        Ok(Self {
            node_reward_interval: r.read_u64()?,
            node_reward_amount_usd: r.read_u256()?,
            node_penalty_usd: r.read_u256()?,
            stake_required_usd: r.read_u256()?,
            max_stake_usd: r.read_u256()?,
            stability_scale_mul: r.read_u64()?,
            stability_scale_div: r.read_u64()?,
            cert_cycle_duration: r.read_u64()?,
            cycle_duration_ms: r.read_u64()?,
            secure_transfer_interval_ms: r.read_u64()?,
        })
    }
}

impl BinaryCodec for ChangeRecord {
    const VERSION: u8 = 1;

    fn encode_fields(&self, w: &mut BinaryWriter) {
        w.write_u64(self.cycle);
        w.write_u8(self.kind.to_u8());
        // serde_json maps are sorted, so the text is canonical
        w.write_string(&self.change.to_string());
    }

    fn decode_fields(r: &mut BinaryReader<'_>, _version: u8) -> Result<Self, CodecError> {
        let cycle = r.read_u64()?;
        let raw_kind = r.read_u8()?;
        let kind = ChangeKind::from_u8(raw_kind).ok_or(CodecError::InvalidDiscriminant {
            field: "ChangeRecord.kind",
            value: raw_kind,
        })?;
        let text = r.read_string()?;
        let change =
            serde_json::from_str(&text).map_err(|e| CodecError::InvalidJson(e.to_string()))?;
        Ok(Self {
            cycle,
            kind,
            change,
        })
    }
}

// =============================================================================
// TOP-LEVEL ACCOUNTS
// =============================================================================

/// Hash-excluded half of a top-level record.
pub(crate) trait AccountContent {
    fn write_content(&self, w: &mut BinaryWriter);
}

macro_rules! hashed_record {
    ($ty:ty, $version:expr, |$r:ident, $v:ident, $hash:ident| $decode:expr) => {
        impl BinaryCodec for $ty {
            const VERSION: u8 = $version;

            fn encode_fields(&self, w: &mut BinaryWriter) {
                w.write_hash(&self.hash);
                self.write_content(w);
            }

            fn decode_fields($r: &mut BinaryReader<'_>, $v: u8) -> Result<Self, CodecError> {
                let $hash = $r.read_hash()?;
                $decode
            }
        }
    };
}

impl AccountContent for EoaAccount {
    fn write_content(&self, w: &mut BinaryWriter) {
        w.write_eth_address(&self.eth_address);
        w.write_u64(self.timestamp);
        self.account.encode_record(w);
        w.write_optional(self.operator_account_info.as_ref(), |w, v| v.encode_record(w));
    }
}

hashed_record!(EoaAccount, 1, |r, _version, hash| Ok(EoaAccount {
    eth_address: r.read_eth_address()?,
    hash,
    timestamp: r.read_u64()?,
    account: LedgerAccount::decode_record(r)?,
    operator_account_info: r.read_optional(OperatorAccountInfo::decode_record)?,
}));

impl AccountContent for ContractCodeAccount {
    fn write_content(&self, w: &mut BinaryWriter) {
        w.write_eth_address(&self.eth_address);
        w.write_u64(self.timestamp);
        w.write_hash(&self.code_hash);
        w.write_bytes(&self.code_byte);
    }
}

hashed_record!(ContractCodeAccount, 1, |r, _version, hash| Ok(
    ContractCodeAccount {
        eth_address: r.read_eth_address()?,
        hash,
        timestamp: r.read_u64()?,
        code_hash: r.read_hash()?,
        code_byte: r.read_bytes()?,
    }
));

impl AccountContent for ContractStorageAccount {
    fn write_content(&self, w: &mut BinaryWriter) {
        w.write_eth_address(&self.eth_address);
        w.write_u64(self.timestamp);
        w.write_hash(&self.key);
        w.write_bytes(&self.value);
    }
}

hashed_record!(ContractStorageAccount, 1, |r, _version, hash| Ok(
    ContractStorageAccount {
        eth_address: r.read_eth_address()?,
        hash,
        timestamp: r.read_u64()?,
        key: r.read_hash()?,
        value: r.read_bytes()?,
    }
));

impl AccountContent for ReceiptAccount {
    fn write_content(&self, w: &mut BinaryWriter) {
        w.write_hash(&self.tx_id);
        w.write_u64(self.timestamp);
        w.write_bytes(&self.receipt);
        w.write_optional(self.tx_from.as_ref(), |w, v| w.write_eth_address(v));
        w.write_optional(self.contract_address.as_ref(), |w, v| w.write_eth_address(v));
    }
}

hashed_record!(ReceiptAccount, 1, |r, _version, hash| Ok(ReceiptAccount {
    tx_id: r.read_hash()?,
    hash,
    timestamp: r.read_u64()?,
    receipt: r.read_bytes()?,
    tx_from: r.read_optional(|r| r.read_eth_address())?,
    contract_address: r.read_optional(|r| r.read_eth_address())?,
}));

impl AccountContent for NodeAccount {
    fn write_content(&self, w: &mut BinaryWriter) {
        w.write_shard_address(&self.id);
        w.write_u64(self.timestamp);
        w.write_optional(self.nominator.as_ref(), |w, v| w.write_eth_address(v));
        w.write_u256(&self.stake_lock);
        w.write_u256(&self.reward);
        w.write_u256(&self.penalty);
        w.write_u64(self.reward_start_time);
        w.write_u64(self.reward_end_time);
        w.write_u256(&self.reward_rate);
        w.write_bool(self.rewarded);
        self.node_account_stats.encode_record(w);
    }
}

hashed_record!(NodeAccount, 1, |r, _version, hash| Ok(NodeAccount {
    id: r.read_shard_address()?,
    hash,
    timestamp: r.read_u64()?,
    nominator: r.read_optional(|r| r.read_eth_address())?,
    stake_lock: r.read_u256()?,
    reward: r.read_u256()?,
    penalty: r.read_u256()?,
    reward_start_time: r.read_u64()?,
    reward_end_time: r.read_u64()?,
    reward_rate: r.read_u256()?,
    rewarded: r.read_bool()?,
    node_account_stats: NodeAccountStats::decode_record(r)?,
}));

impl AccountContent for NetworkAccount {
    fn write_content(&self, w: &mut BinaryWriter) {
        w.write_shard_address(&self.id);
        w.write_u64(self.timestamp);
        self.current.encode_record(w);
        w.write_optional(self.next.as_ref(), |w, v| v.encode_record(w));
        w.write_seq(&self.list_of_changes, |w, v| v.encode_record(w));
    }
}

hashed_record!(NetworkAccount, 1, |r, _version, hash| Ok(NetworkAccount {
    id: r.read_shard_address()?,
    hash,
    timestamp: r.read_u64()?,
    current: NetworkParameters::decode_record(r)?,
    next: r.read_optional(NetworkParameters::decode_record)?,
    list_of_changes: r.read_seq(ChangeRecord::decode_record)?,
}));

impl AccountContent for SecureAccount {
    fn write_content(&self, w: &mut BinaryWriter) {
        w.write_shard_address(&self.id);
        w.write_u64(self.timestamp);
        w.write_string(&self.name);
        w.write_u256(&self.next_transfer_amount);
        w.write_u64(self.next_transfer_time);
        w.write_u64(self.nonce);
    }
}

hashed_record!(SecureAccount, 1, |r, _version, hash| Ok(SecureAccount {
    id: r.read_shard_address()?,
    hash,
    timestamp: r.read_u64()?,
    name: r.read_string()?,
    next_transfer_amount: r.read_u256()?,
    next_transfer_time: r.read_u64()?,
    nonce: r.read_u64()?,
}));

impl AccountContent for InternalTxReceipt {
    fn write_content(&self, w: &mut BinaryWriter) {
        w.write_hash(&self.tx_id);
        w.write_u64(self.timestamp);
        w.write_string(&self.internal_tx_kind);
        w.write_bool(self.success);
        w.write_optional(self.reason.as_ref(), |w, v| w.write_string(v));
        w.write_seq(&self.changed_accounts, |w, v| w.write_shard_address(v));
    }
}

hashed_record!(InternalTxReceipt, 1, |r, _version, hash| Ok(
    InternalTxReceipt {
        tx_id: r.read_hash()?,
        hash,
        timestamp: r.read_u64()?,
        internal_tx_kind: r.read_string()?,
        success: r.read_bool()?,
        reason: r.read_optional(|r| r.read_string())?,
        changed_accounts: r.read_seq(|r| r.read_shard_address())?,
    }
));

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{EthAddress, ShardAddress, U256};

    fn eth(byte: u8) -> EthAddress {
        EthAddress([byte; 20])
    }

    fn populated_params() -> NetworkParameters {
        NetworkParameters {
            node_reward_interval: 3_600_000,
            node_reward_amount_usd: U256::from(1),
            node_penalty_usd: U256::from(10),
            stake_required_usd: U256::from(10),
            max_stake_usd: U256::from(1000),
            stability_scale_mul: 1000,
            stability_scale_div: 1000,
            cert_cycle_duration: 30,
            cycle_duration_ms: 60_000,
            secure_transfer_interval_ms: 86_400_000,
        }
    }

    fn populated_operator() -> OperatorAccountInfo {
        OperatorAccountInfo {
            stake: U256::from(500),
            nominee: Some("ab".repeat(32)),
            cert_exp: 99,
            operator_stats: OperatorStats {
                total_node_reward: U256::from(3),
                total_node_penalty: U256::from(1),
                total_node_time: 40,
                history: vec![HistoryEntry { b: 10, e: 50 }],
                total_unstake_reward: U256::from(2),
                unstake_count: 1,
                last_staked_node_key: Some("cd".repeat(32)),
            },
        }
    }

    /// One fully populated snapshot per kind.
    fn populated(kind: AccountType) -> Account {
        let eoa = EoaAccount {
            eth_address: eth(1),
            hash: [9; 32],
            timestamp: 1234,
            account: LedgerAccount {
                nonce: U256::from(4),
                balance: U256::from(1000),
                storage_root: [2; 32],
                code_hash: [3; 32],
            },
            operator_account_info: Some(populated_operator()),
        };
        match kind {
            AccountType::Account => Account::Account(eoa),
            AccountType::Debug => Account::Debug(eoa),
            AccountType::ContractStorage => Account::ContractStorage(ContractStorageAccount {
                eth_address: eth(2),
                hash: [1; 32],
                timestamp: 5,
                key: [4; 32],
                value: vec![1, 2, 3],
            }),
            AccountType::ContractCode => Account::ContractCode(ContractCodeAccount {
                eth_address: eth(2),
                hash: [1; 32],
                timestamp: 5,
                code_hash: [5; 32],
                code_byte: vec![0x60, 0x80],
            }),
            AccountType::Receipt => Account::Receipt(ReceiptAccount {
                tx_id: [6; 32],
                hash: [1; 32],
                timestamp: 5,
                receipt: vec![7; 10],
                tx_from: Some(eth(3)),
                contract_address: Some(eth(4)),
            }),
            AccountType::NetworkAccount => Account::NetworkAccount(NetworkAccount {
                id: ShardAddress([0x10; 32]),
                hash: [1; 32],
                timestamp: 5,
                current: populated_params(),
                next: Some(populated_params()),
                list_of_changes: vec![ChangeRecord {
                    cycle: 7,
                    kind: ChangeKind::NetworkParam,
                    change: serde_json::json!({"nodeRewardInterval": 7200000}),
                }],
            }),
            AccountType::NodeAccount => Account::NodeAccount(NodeAccount {
                id: ShardAddress([0x20; 32]),
                hash: [1; 32],
                timestamp: 5,
                nominator: Some(eth(5)),
                stake_lock: U256::from(500),
                reward: U256::from(8),
                penalty: U256::from(1),
                reward_start_time: 10,
                reward_end_time: 50,
                reward_rate: U256::from(2),
                rewarded: true,
                node_account_stats: NodeAccountStats {
                    total_reward: U256::from(8),
                    total_penalty: U256::from(1),
                    history: vec![HistoryEntry { b: 10, e: 50 }],
                    is_slashed: false,
                },
            }),
            AccountType::InternalTxReceipt => Account::InternalTxReceipt(InternalTxReceipt {
                tx_id: [8; 32],
                hash: [1; 32],
                timestamp: 5,
                internal_tx_kind: "TransferFromSecureAccount".to_string(),
                success: false,
                reason: Some("Invalid nonce".to_string()),
                changed_accounts: vec![ShardAddress([1; 32]), ShardAddress([2; 32])],
            }),
            AccountType::SecureAccount => Account::SecureAccount(SecureAccount {
                id: ShardAddress([0x30; 32]),
                hash: [1; 32],
                timestamp: 5,
                name: "Foundation".to_string(),
                next_transfer_amount: U256::from(100),
                next_transfer_time: 77,
                nonce: 3,
            }),
        }
    }

    /// Every optional absent, every sequence empty.
    fn minimal(kind: AccountType) -> Account {
        match populated(kind) {
            Account::Account(mut a) => {
                a.operator_account_info = None;
                Account::Account(a)
            }
            Account::Debug(mut a) => {
                a.operator_account_info = None;
                Account::Debug(a)
            }
            Account::Receipt(mut a) => {
                a.tx_from = None;
                a.contract_address = None;
                a.receipt.clear();
                Account::Receipt(a)
            }
            Account::NetworkAccount(mut a) => {
                a.next = None;
                a.list_of_changes.clear();
                Account::NetworkAccount(a)
            }
            Account::NodeAccount(mut a) => {
                a.nominator = None;
                a.node_account_stats.history.clear();
                Account::NodeAccount(a)
            }
            Account::InternalTxReceipt(mut a) => {
                a.reason = None;
                a.changed_accounts.clear();
                Account::InternalTxReceipt(a)
            }
            other => other,
        }
    }

    #[test]
    fn test_every_kind_round_trips_populated_and_minimal() {
        for kind in AccountType::ALL {
            for account in [populated(kind), minimal(kind)] {
                let bytes = encode_account(&account);
                let decoded = decode_account(&bytes).unwrap();
                assert_eq!(decoded, account, "{kind:?}");
                assert_eq!(decoded.kind(), kind);
                assert_eq!(encode_account(&decoded), bytes);
            }
        }
    }

    #[test]
    fn test_root_carries_type_id() {
        let bytes = encode_account(&populated(AccountType::SecureAccount));
        assert_eq!(
            u16::from_le_bytes([bytes[0], bytes[1]]),
            AccountType::SecureAccount.type_id()
        );
        assert_eq!(bytes[2], SecureAccount::VERSION);
    }

    #[test]
    fn test_unknown_type_id_rejected() {
        let mut bytes = encode_account(&populated(AccountType::SecureAccount));
        bytes[0] = 0xff;
        bytes[1] = 0xff;
        assert_eq!(
            decode_account(&bytes),
            Err(CodecError::UnknownTypeId(0xffff))
        );
    }

    #[test]
    fn test_newer_version_rejected() {
        let mut bytes = encode_account(&populated(AccountType::SecureAccount));
        bytes[2] = SecureAccount::VERSION + 1;
        assert_eq!(
            decode_account(&bytes),
            Err(CodecError::VersionMismatch {
                supported: 1,
                found: 2
            })
        );
    }

    #[test]
    fn test_truncated_input_rejected() {
        let bytes = encode_account(&populated(AccountType::NodeAccount));
        for cut in [1, 3, bytes.len() / 2, bytes.len() - 1] {
            assert!(
                matches!(
                    decode_account(&bytes[..cut]),
                    Err(CodecError::ReadPastEnd { .. })
                ),
                "cut at {cut}"
            );
        }
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = encode_account(&populated(AccountType::SecureAccount));
        bytes.push(0);
        assert_eq!(decode_account(&bytes), Err(CodecError::TrailingBytes(1)));
    }

    #[test]
    fn test_operator_stats_v1_still_decodes() {
        let stats = populated_operator().operator_stats;
        let mut w = BinaryWriter::new();
        w.write_u8(1);
        w.write_u256(&stats.total_node_reward);
        w.write_u256(&stats.total_node_penalty);
        w.write_u64(stats.total_node_time);
        write_history(&mut w, &stats.history);
        w.write_u256(&stats.total_unstake_reward);
        w.write_u64(stats.unstake_count);
        let bytes = w.into_bytes();

        let mut r = BinaryReader::new(&bytes);
        let decoded = OperatorStats::decode_record(&mut r).unwrap();
        r.finish().unwrap();
        assert_eq!(decoded.last_staked_node_key, None);
        assert_eq!(decoded.history, stats.history);
    }

    #[test]
    fn test_invalid_change_kind_rejected() {
        let mut w = BinaryWriter::new();
        w.write_u8(1);
        w.write_u64(1);
        w.write_u8(9);
        let bytes = w.into_bytes();
        let mut r = BinaryReader::new(&bytes);
        assert_eq!(
            ChangeRecord::decode_record(&mut r),
            Err(CodecError::InvalidDiscriminant {
                field: "ChangeRecord.kind",
                value: 9
            })
        );
    }

    #[test]
    fn test_json_snapshot_with_degraded_bytes_restores() {
        use crate::domain::fixup::{account_from_json, byte_fields};

        for kind in AccountType::ALL {
            let account = populated(kind);
            let mut json = serde_json::to_value(&account).unwrap();
            for field in byte_fields(kind) {
                let hex = json[*field].as_str().unwrap().to_string();
                let bytes = shared_types::decode_hex(&hex).unwrap();
                let indexed: serde_json::Map<String, serde_json::Value> = bytes
                    .iter()
                    .enumerate()
                    .map(|(i, b)| (i.to_string(), serde_json::Value::from(*b)))
                    .collect();
                json[*field] = serde_json::Value::Object(indexed);
            }
            assert_eq!(account_from_json(json).unwrap(), account, "{kind:?}");
        }
    }
}
