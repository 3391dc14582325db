//! # Derivation Rules
//!
//! One exhaustive `match` over [`AccountType`] per entry point so that a new
//! kind cannot be added without deciding how it is addressed.

use super::entities::{AccountType, AddressingConfig, MAX_SILO_PREFIX_BITS};
use super::errors::AddressError;
use super::silo::silo_key;
use shared_types::{strip_0x, EthAddress, ShardAddress};

/// Derive the shard address of an unkeyed account kind.
///
/// Network, node, secure-account and receipt ids keep their 32 bytes as
/// given. Hex case carries no information, so `"AB.."` and `"ab.."` are the
/// same address and render lowercase.
///
/// Storage and code kinds are rejected with [`AddressError::KeyRequired`].
pub fn to_shard_address(external_id: &str, kind: AccountType) -> Result<ShardAddress, AddressError> {
    match kind {
        AccountType::Account | AccountType::Debug => {
            let eth = parse_eth_address(external_id, kind)?;
            Ok(eth_address_to_shard_address(&eth))
        }
        AccountType::Receipt
        | AccountType::InternalTxReceipt
        | AccountType::NetworkAccount
        | AccountType::NodeAccount
        | AccountType::SecureAccount => parse_key(external_id, kind).map(ShardAddress),
        AccountType::ContractStorage | AccountType::ContractCode => {
            Err(AddressError::KeyRequired(kind))
        }
    }
}

/// Derive the shard address of a keyed account kind.
///
/// For `ContractStorage` the key is the 32-byte slot key; for
/// `ContractCode` it is the code hash. With siloing disabled the key is the
/// address. Unkeyed kinds ignore `key` and derive from `owner`.
pub fn to_shard_address_with_key(
    owner: &str,
    key: &str,
    kind: AccountType,
    config: &AddressingConfig,
) -> Result<ShardAddress, AddressError> {
    match kind {
        AccountType::ContractStorage | AccountType::ContractCode => {
            let key_bytes = parse_key(key, kind)?;
            if !config.contract_storage_key_silo {
                return Ok(ShardAddress(key_bytes));
            }
            if config.silo_prefix_bits > MAX_SILO_PREFIX_BITS {
                return Err(AddressError::InvalidSiloPrefix(config.silo_prefix_bits));
            }
            let owner = eth_address_to_shard_address(&parse_eth_address(owner, kind)?);
            Ok(ShardAddress(silo_key(
                owner.as_bytes(),
                &key_bytes,
                config.silo_prefix_bits,
            )))
        }
        AccountType::Account
        | AccountType::Debug
        | AccountType::Receipt
        | AccountType::InternalTxReceipt
        | AccountType::NetworkAccount
        | AccountType::NodeAccount
        | AccountType::SecureAccount => to_shard_address(owner, kind),
    }
}

/// Recover the Ethereum address embedded in a plain-account shard address.
pub fn shard_address_to_eth_address(address: &ShardAddress) -> EthAddress {
    let mut eth = [0u8; 20];
    eth.copy_from_slice(&address.as_bytes()[..20]);
    EthAddress(eth)
}

/// Shard address of a plain account: the 20-byte address followed by 12
/// zero bytes.
pub fn eth_address_to_shard_address(eth: &EthAddress) -> ShardAddress {
    let mut out = [0u8; 32];
    out[..20].copy_from_slice(eth.as_bytes());
    ShardAddress(out)
}

fn parse_eth_address(input: &str, kind: AccountType) -> Result<EthAddress, AddressError> {
    let digits = strip_0x(input);
    if digits.len() != 40 {
        return Err(AddressError::InvalidEthAddressLength {
            kind,
            len: digits.len(),
        });
    }
    decode_exact::<20>(digits, input, kind).map(EthAddress)
}

fn parse_key(input: &str, kind: AccountType) -> Result<[u8; 32], AddressError> {
    let digits = strip_0x(input);
    if digits.len() != 64 {
        return Err(AddressError::InvalidKeyLength {
            kind,
            len: digits.len(),
        });
    }
    decode_exact::<32>(digits, input, kind)
}

fn decode_exact<const N: usize>(
    digits: &str,
    original: &str,
    kind: AccountType,
) -> Result<[u8; N], AddressError> {
    shared_types::decode_hex_fixed::<N>(digits).map_err(|_| AddressError::InvalidHex {
        kind,
        input: original.to_string(),
    })
}
