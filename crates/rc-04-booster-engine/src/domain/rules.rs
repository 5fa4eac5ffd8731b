//! Eligibility gates and pricing.

use chrono::{DateTime, Duration, Months, Utc};
use shared_types::{RetweetInfo, SocialProfile};

use crate::config::BoosterConfig;
use crate::error::BoosterError;

/// USD price of the next package, given how many parties already exist.
pub fn booster_price(total_parties: usize) -> u32 {
    match total_parties {
        0..=99 => 30,
        100..=199 => 40,
        _ => 50,
    }
}

/// PAC granted to an account with `followers` followers.
pub fn pac_amount(followers: u64, config: &BoosterConfig) -> i64 {
    if followers >= config.high_follower_threshold {
        config.pac_high
    } else {
        config.pac_standard
    }
}

/// Age and follower gates. Verified or whitelisted accounts skip both.
pub fn check_account(
    profile: &SocialProfile,
    whitelisted: bool,
    now: DateTime<Utc>,
    config: &BoosterConfig,
) -> Result<(), BoosterError> {
    if whitelisted || profile.verified {
        return Ok(());
    }

    let oldest_allowed = now
        .checked_sub_months(Months::new(config.min_account_age_years.saturating_mul(12)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    if profile.created_at > oldest_allowed {
        return Err(BoosterError::AccountTooNew {
            min_years: config.min_account_age_years,
        });
    }

    if profile.followers < config.min_followers {
        return Err(BoosterError::InsufficientFollowers {
            min: config.min_followers,
        });
    }

    Ok(())
}

/// Recency gate on the announcement share.
pub fn check_retweet(
    retweet: &RetweetInfo,
    now: DateTime<Utc>,
    config: &BoosterConfig,
) -> Result<(), BoosterError> {
    let max_age = Duration::days(i64::from(config.retweet_max_age_days));
    if now - retweet.created_at > max_age {
        return Err(BoosterError::RetweetTooOld {
            max_age_days: config.retweet_max_age_days,
        });
    }
    Ok(())
}
