//! The persisted tables and their on-disk document names.

use std::fmt;

/// One independently persisted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// Claim records keyed by testnet address.
    Claims,
    /// Booster parties keyed by social account id.
    Parties,
    /// Whitelist entries keyed by social account id.
    Whitelist,
}

impl Table {
    /// Every table, in load order.
    pub const ALL: [Table; 3] = [Table::Claims, Table::Parties, Table::Whitelist];

    /// Document file name inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Table::Claims => "claimers.json",
            Table::Parties => "incentive_parties.json",
            Table::Whitelist => "whitelist.json",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Table::Claims => "claimers",
            Table::Parties => "incentive_parties",
            Table::Whitelist => "whitelist",
        };
        f.write_str(name)
    }
}
