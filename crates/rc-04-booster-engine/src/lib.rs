//! # Booster Eligibility Engine
//!
//! **Component ID:** 4
//!
//! ## Purpose
//!
//! Decides whether a social-media account may buy a discounted validator
//! stake package, prices it, opens a payment invoice and records the party.
//! Once the payment settles, [`BoosterService::booster_claim`] bonds the
//! stake.
//!
//! ## Eligibility
//!
//! | Gate | Rule | Bypass |
//! |------|------|--------|
//! | Program cap | fewer than `program_cap` parties | none |
//! | One package per account | no party for the handle | none |
//! | Fresh validator | address not yet a validator | none |
//! | Account age | at least `min_account_age_years` | verified or whitelisted |
//! | Followers | at least `min_followers` | verified or whitelisted |
//! | Retweet | announcement shared within `retweet_max_age_days` | none |
//!
//! ## Pricing
//!
//! | Parties so far | USD |
//! |----------------|-----|
//! | 0 - 99 | 30 |
//! | 100 - 199 | 40 |
//! | 200+ | 50 |
//!
//! Accounts with at least `high_follower_threshold` followers receive
//! `pac_high` PAC; everyone else receives `pac_standard`.

pub mod config;
pub mod domain;
pub mod error;
pub mod service;

pub use config::BoosterConfig;
pub use domain::{booster_price, check_account, check_retweet, pac_amount};
pub use error::BoosterError;
pub use service::{BoosterCollaborators, BoosterService};
