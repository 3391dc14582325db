//! # Network Account Resolution
//!
//! Peers (archivers) each return their copy of the network account. Failed
//! peers are left out of the vote; the copy whose content hash a strict
//! majority of the responders report wins.

use super::errors::ResolutionError;
use itx_02_accounts::{content_hash, Account, NetworkAccount};
use shared_types::Hash;

/// Pick the majority copy among peer responses.
pub fn majority_network_account<E>(
    responses: Vec<Result<NetworkAccount, E>>,
) -> Result<NetworkAccount, ResolutionError> {
    if responses.is_empty() {
        return Err(ResolutionError::NoPeers);
    }
    let peers = responses.len();

    let mut tally: Vec<(Hash, usize, NetworkAccount)> = Vec::new();
    let mut responders = 0usize;
    for account in responses.into_iter().flatten() {
        responders += 1;
        let hash = content_hash(&Account::NetworkAccount(account.clone()));
        match tally.iter_mut().find(|(h, _, _)| *h == hash) {
            Some((_, count, _)) => *count += 1,
            None => tally.push((hash, 1, account)),
        }
    }

    if responders == 0 {
        return Err(ResolutionError::AllPeersFailed(peers));
    }

    let best = tally
        .into_iter()
        .max_by_key(|(_, count, _)| *count)
        .ok_or(ResolutionError::AllPeersFailed(peers))?;
    if best.1 * 2 <= responders {
        return Err(ResolutionError::NoMajority {
            best: best.1,
            responders,
        });
    }
    Ok(best.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy(timestamp: u64) -> NetworkAccount {
        NetworkAccount {
            timestamp,
            ..Default::default()
        }
    }

    #[test]
    fn test_majority_wins() {
        let responses: Vec<Result<_, String>> = vec![Ok(copy(1)), Ok(copy(1)), Ok(copy(2))];
        assert_eq!(majority_network_account(responses).unwrap().timestamp, 1);
    }

    #[test]
    fn test_failed_peers_excluded_from_vote() {
        let responses = vec![Ok(copy(1)), Err("timeout"), Err("timeout")];
        assert_eq!(majority_network_account(responses).unwrap().timestamp, 1);
    }

    #[test]
    fn test_tie_is_no_majority() {
        let responses: Vec<Result<_, String>> = vec![Ok(copy(1)), Ok(copy(2))];
        assert_eq!(
            majority_network_account(responses),
            Err(ResolutionError::NoMajority {
                best: 1,
                responders: 2
            })
        );
    }

    #[test]
    fn test_all_failed() {
        let responses: Vec<Result<NetworkAccount, &str>> = vec![Err("a"), Err("b")];
        assert_eq!(
            majority_network_account(responses),
            Err(ResolutionError::AllPeersFailed(2))
        );
    }

    #[test]
    fn test_no_peers() {
        let responses: Vec<Result<NetworkAccount, &str>> = vec![];
        assert_eq!(
            majority_network_account(responses),
            Err(ResolutionError::NoPeers)
        );
    }
}
