/// Version byte prefixed to every derived-account seed list.
pub const ACCOUNT_SEED_VERSION: &[u8] = &[0x03];

/// Seed tag of the bridge-controlled token account derived per identity.
pub const CONTRACT_DATA_SEED: &[u8] = b"ContractData";

/// Seed tag of the per-identity external authority, the delegate target an
/// outside account owner approves so value can be pulled in for that
/// identity.
pub const AUTH_SEED: &[u8] = b"AUTH";
