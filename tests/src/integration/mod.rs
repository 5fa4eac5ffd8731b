//! Integration flows.

#[cfg(test)]
mod fixtures;

mod booster_flow;
mod claim_flow;
