use crate::ContractError;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Storage key symbols ──────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const DELEGATE: Symbol = symbol_short!("DELEGATE");
const DOCTOR: Symbol = symbol_short!("DOCTOR");

// ── Types ────────────────────────────────────────────────────────────────────

/// Role of a principal, derived from registry state on every call.
///
/// Classification precedence is Owner, then Delegate, then Doctor. A
/// principal that is both a delegate and a doctor acts as a delegate.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum Role {
    Unknown = 0,
    Doctor = 1,
    InactiveDelegate = 2,
    ActiveDelegate = 3,
    Owner = 4,
}

/// Classes of privileged operation gated by the role table.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum Capability {
    /// Add, delete, activate and deactivate delegates
    ManageDelegates = 1,
    /// Add and delete doctors
    ManageDoctors = 2,
    /// Deactivate and activate doctor certificates
    ManageCertificates = 3,
    /// Change registry-wide settings such as the window cap
    Configure = 4,
}

/// Stored delegate entry. Its presence in storage is what makes the
/// principal a delegate; deletion removes it outright.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegateRecord {
    pub active: bool,
}

// ── Storage key helpers ──────────────────────────────────────────────────────

pub(crate) fn delegate_key(principal: &Address) -> (Symbol, Address) {
    (DELEGATE, principal.clone())
}

pub(crate) fn doctor_key(principal: &Address) -> (Symbol, Address) {
    (DOCTOR, principal.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Capability table ─────────────────────────────────────────────────────────

/// The single place the authorization rules live.
pub fn allows(role: &Role, capability: &Capability) -> bool {
    matches!(
        (role, capability),
        (Role::Owner, Capability::ManageDelegates)
            | (Role::Owner, Capability::Configure)
            | (Role::ActiveDelegate, Capability::ManageDoctors)
            | (Role::ActiveDelegate, Capability::ManageCertificates)
    )
}

/// Lists every capability the role is granted, in table order.
pub fn capabilities(env: &Env, role: &Role) -> Vec<Capability> {
    let mut caps = Vec::new(env);
    for cap in [
        Capability::ManageDelegates,
        Capability::ManageDoctors,
        Capability::ManageCertificates,
        Capability::Configure,
    ] {
        if allows(role, &cap) {
            caps.push_back(cap);
        }
    }
    caps
}

// ── Owner ────────────────────────────────────────────────────────────────────

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

// ── Role resolution ──────────────────────────────────────────────────────────

pub fn role_of(env: &Env, principal: &Address) -> Role {
    if get_owner(env).as_ref() == Some(principal) {
        return Role::Owner;
    }
    if let Some(record) = get_delegate(env, principal) {
        return if record.active {
            Role::ActiveDelegate
        } else {
            Role::InactiveDelegate
        };
    }
    if is_doctor(env, principal) {
        return Role::Doctor;
    }
    Role::Unknown
}

pub fn has_capability(env: &Env, principal: &Address, capability: &Capability) -> bool {
    allows(&role_of(env, principal), capability)
}

pub fn require_capability(
    env: &Env,
    caller: &Address,
    capability: &Capability,
) -> Result<(), ContractError> {
    if !has_capability(env, caller, capability) {
        return Err(ContractError::Unauthorized);
    }
    touch_delegate(env, caller);
    Ok(())
}

// ── Delegates ────────────────────────────────────────────────────────────────

pub fn get_delegate(env: &Env, principal: &Address) -> Option<DelegateRecord> {
    env.storage().persistent().get(&delegate_key(principal))
}

pub fn is_delegate(env: &Env, principal: &Address) -> bool {
    env.storage().persistent().has(&delegate_key(principal))
}

/// Keeps a working delegate's record from expiring. No-op for non-delegates.
pub fn touch_delegate(env: &Env, principal: &Address) {
    let key = delegate_key(principal);
    if env.storage().persistent().has(&key) {
        extend_ttl(env, &key);
    }
}

pub fn add_delegate(env: &Env, principal: &Address) -> Result<(), ContractError> {
    if get_owner(env).as_ref() == Some(principal) {
        return Err(ContractError::OwnerCannotBeDelegate);
    }
    if is_delegate(env, principal) {
        return Err(ContractError::AlreadyExists);
    }

    let key = delegate_key(principal);
    env.storage()
        .persistent()
        .set(&key, &DelegateRecord { active: true });
    extend_ttl(env, &key);
    Ok(())
}

pub fn remove_delegate(env: &Env, principal: &Address) -> Result<(), ContractError> {
    if !is_delegate(env, principal) {
        return Err(ContractError::NotFound);
    }
    env.storage().persistent().remove(&delegate_key(principal));
    Ok(())
}

/// Setting the flag to its current value is not an error.
pub fn set_delegate_active(
    env: &Env,
    principal: &Address,
    active: bool,
) -> Result<(), ContractError> {
    let key = delegate_key(principal);
    let mut record = get_delegate(env, principal).ok_or(ContractError::NotFound)?;
    record.active = active;
    env.storage().persistent().set(&key, &record);
    extend_ttl(env, &key);
    Ok(())
}

// ── Doctors ──────────────────────────────────────────────────────────────────

pub fn is_doctor(env: &Env, principal: &Address) -> bool {
    env.storage().persistent().has(&doctor_key(principal))
}

/// Extends the membership entry of a doctor whose timeline is being changed.
pub fn touch_doctor(env: &Env, principal: &Address) -> Result<(), ContractError> {
    let key = doctor_key(principal);
    if !env.storage().persistent().has(&key) {
        return Err(ContractError::NotFound);
    }
    extend_ttl(env, &key);
    Ok(())
}

pub fn add_doctor(env: &Env, principal: &Address) -> Result<(), ContractError> {
    if is_doctor(env, principal) {
        return Err(ContractError::AlreadyExists);
    }
    let key = doctor_key(principal);
    env.storage().persistent().set(&key, &true);
    extend_ttl(env, &key);
    Ok(())
}

pub fn remove_doctor(env: &Env, principal: &Address) -> Result<(), ContractError> {
    if !is_doctor(env, principal) {
        return Err(ContractError::NotFound);
    }
    env.storage().persistent().remove(&doctor_key(principal));
    Ok(())
}
