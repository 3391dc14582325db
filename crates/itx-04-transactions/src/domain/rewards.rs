//! # Node Rewards
//!
//! `reward = scale(nodeRewardAmountUsd) * duration / nodeRewardInterval`
//! where `scale` applies the stability factor and `duration` runs from the
//! reward start to deactivation. Seed nodes (start time zero) use the same
//! formula.

use super::errors::ValidationFailure;
use itx_02_accounts::NetworkParameters;
use shared_types::{Timestamp, U256};

/// Active time between reward start and deactivation.
pub fn reward_duration(
    reward_start_time: Timestamp,
    deactivation_time: Timestamp,
) -> Result<u64, ValidationFailure> {
    deactivation_time
        .checked_sub(reward_start_time)
        .ok_or(ValidationFailure::InvalidRewardWindow)
}

pub fn compute_reward(
    params: &NetworkParameters,
    reward_start_time: Timestamp,
    deactivation_time: Timestamp,
) -> Result<U256, ValidationFailure> {
    let duration = reward_duration(reward_start_time, deactivation_time)?;
    if params.node_reward_interval == 0 {
        return Err(ValidationFailure::InvalidNetworkParameters);
    }
    let rate = params
        .scale_usd(params.node_reward_amount_usd)
        .ok_or(ValidationFailure::InvalidNetworkParameters)?;
    rate.checked_mul(U256::from(duration))
        .map(|v| v / U256::from(params.node_reward_interval))
        .ok_or(ValidationFailure::RewardOverflow)
}

pub fn is_seed_node(reward_start_time: Timestamp) -> bool {
    reward_start_time == 0
}
