#![no_std]

pub mod errors;
pub mod events;
pub mod roles;
pub mod timeline;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol, Vec};

pub use errors::{ContractError, ErrorCategory, ErrorSeverity};
pub use roles::{Capability, DelegateRecord, Role};
pub use timeline::{InvalidWindow, UNBOUNDED};

/// Storage keys for the contract
const INITIALIZED: Symbol = symbol_short!("INIT");
const WINDOW_LIMIT: Symbol = symbol_short!("WIN_LIM");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

/// Extends the TTL of instance storage, which holds the owner and settings.
fn extend_ttl_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn require_initialized(env: &Env) -> Result<(), ContractError> {
    if !env.storage().instance().has(&INITIALIZED) {
        return Err(ContractError::NotInitialized);
    }
    Ok(())
}

/// Authenticates `caller` and checks it holds `capability` in the role table.
fn authorize(env: &Env, caller: &Address, capability: Capability) -> Result<(), ContractError> {
    require_initialized(env)?;
    caller.require_auth();
    roles::require_capability(env, caller, &capability)?;
    extend_ttl_instance(env);
    Ok(())
}

fn require_doctor(env: &Env, doctor: &Address) -> Result<(), ContractError> {
    if !roles::is_doctor(env, doctor) {
        return Err(ContractError::NotFound);
    }
    Ok(())
}

#[contract]
pub struct CertificateRegistryContract;

#[contractimpl]
impl CertificateRegistryContract {
    /// Initialize the registry with its owner. The owner can never change.
    pub fn initialize(env: Env, owner: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        owner.require_auth();

        roles::set_owner(&env, &owner);
        env.storage().instance().set(&INITIALIZED, &true);
        extend_ttl_instance(&env);

        events::publish_initialized(&env, owner);

        Ok(())
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        roles::get_owner(&env).ok_or(ContractError::NotInitialized)
    }

    // ======================== Delegates ========================

    /// Register `delegate` as an active delegate. Owner only.
    pub fn add_delegate(env: Env, caller: Address, delegate: Address) -> Result<(), ContractError> {
        authorize(&env, &caller, Capability::ManageDelegates)?;
        roles::add_delegate(&env, &delegate)?;
        events::publish_delegate_added(&env, caller, delegate);
        Ok(())
    }

    /// Remove a delegate outright. The address may be added again later.
    pub fn delete_delegate(
        env: Env,
        caller: Address,
        delegate: Address,
    ) -> Result<(), ContractError> {
        authorize(&env, &caller, Capability::ManageDelegates)?;
        roles::remove_delegate(&env, &delegate)?;
        events::publish_delegate_removed(&env, caller, delegate);
        Ok(())
    }

    pub fn activate_delegate(
        env: Env,
        caller: Address,
        delegate: Address,
    ) -> Result<(), ContractError> {
        authorize(&env, &caller, Capability::ManageDelegates)?;
        roles::set_delegate_active(&env, &delegate, true)?;
        events::publish_delegate_status(&env, caller, delegate, true);
        Ok(())
    }

    pub fn deactivate_delegate(
        env: Env,
        caller: Address,
        delegate: Address,
    ) -> Result<(), ContractError> {
        authorize(&env, &caller, Capability::ManageDelegates)?;
        roles::set_delegate_active(&env, &delegate, false)?;
        events::publish_delegate_status(&env, caller, delegate, false);
        Ok(())
    }

    pub fn is_delegate(env: Env, principal: Address) -> bool {
        roles::is_delegate(&env, &principal)
    }

    /// False for unknown principals as well as inactive delegates.
    pub fn is_delegate_active(env: Env, principal: Address) -> bool {
        roles::get_delegate(&env, &principal).map_or(false, |record| record.active)
    }

    pub fn get_delegate(env: Env, principal: Address) -> Result<DelegateRecord, ContractError> {
        roles::get_delegate(&env, &principal).ok_or(ContractError::NotFound)
    }

    // ======================== Doctors ========================

    /// Register a doctor with an empty timeline, so the certificate starts
    /// out valid at every point in time. Active delegates only.
    pub fn add_doctor(env: Env, caller: Address, doctor: Address) -> Result<(), ContractError> {
        authorize(&env, &caller, Capability::ManageDoctors)?;
        roles::add_doctor(&env, &doctor)?;
        timeline::open(&env, &doctor);
        events::publish_doctor_added(&env, caller, doctor);
        Ok(())
    }

    /// Remove a doctor together with every recorded window.
    pub fn delete_doctor(env: Env, caller: Address, doctor: Address) -> Result<(), ContractError> {
        authorize(&env, &caller, Capability::ManageDoctors)?;
        roles::remove_doctor(&env, &doctor)?;
        timeline::discard(&env, &doctor);
        events::publish_doctor_removed(&env, caller, doctor);
        Ok(())
    }

    pub fn is_doctor(env: Env, principal: Address) -> bool {
        roles::is_doctor(&env, &principal)
    }

    // ======================== Certificates ========================

    /// Mark the doctor's certificate invalid over `[start, end)`, or from
    /// `start` onwards when `end` is 0. The window is stored as given.
    pub fn deactivate_doctor(
        env: Env,
        caller: Address,
        doctor: Address,
        start: u64,
        end: u64,
    ) -> Result<(), ContractError> {
        authorize(&env, &caller, Capability::ManageCertificates)?;
        roles::touch_doctor(&env, &doctor)?;
        let window = InvalidWindow::new(start, end)?;

        let limit = Self::get_window_limit(env.clone());
        timeline::revoke(&env, &doctor, window.clone(), limit)?;

        events::publish_certificate_revoked(&env, caller, doctor, window);
        Ok(())
    }

    /// Make the certificate valid again over `[start, end)`, or from `start`
    /// onwards when `end` is 0, by cutting that range out of every window.
    pub fn activate_doctor(
        env: Env,
        caller: Address,
        doctor: Address,
        start: u64,
        end: u64,
    ) -> Result<(), ContractError> {
        authorize(&env, &caller, Capability::ManageCertificates)?;
        roles::touch_doctor(&env, &doctor)?;
        let range = InvalidWindow::new(start, end)?;

        timeline::restore(&env, &doctor, &range);

        events::publish_certificate_restored(&env, caller, doctor, range);
        Ok(())
    }

    /// Whether the doctor's certificate is valid at logical time `time`.
    /// Open to any caller. Fails with `NotFound` for unknown doctors.
    pub fn check_certificate(env: Env, doctor: Address, time: u64) -> Result<bool, ContractError> {
        require_doctor(&env, &doctor)?;
        Ok(timeline::is_valid_at(&env, &doctor, time))
    }

    pub fn get_invalid_windows(
        env: Env,
        doctor: Address,
    ) -> Result<Vec<InvalidWindow>, ContractError> {
        require_doctor(&env, &doctor)?;
        Ok(timeline::windows(&env, &doctor))
    }

    // ======================== Roles ========================

    pub fn get_role(env: Env, principal: Address) -> Role {
        roles::role_of(&env, &principal)
    }

    pub fn has_capability(env: Env, principal: Address, capability: Capability) -> bool {
        roles::has_capability(&env, &principal, &capability)
    }

    /// Every capability the principal's current role grants. Empty for
    /// doctors, inactive delegates and unknown principals.
    pub fn get_capabilities(env: Env, principal: Address) -> Vec<Capability> {
        roles::capabilities(&env, &roles::role_of(&env, &principal))
    }

    // ======================== Settings ========================

    /// Cap the number of windows a single doctor may hold. 0 removes the cap.
    /// Owner only. Existing timelines above a new cap are left as they are.
    pub fn set_window_limit(env: Env, caller: Address, limit: u32) -> Result<(), ContractError> {
        authorize(&env, &caller, Capability::Configure)?;
        env.storage().instance().set(&WINDOW_LIMIT, &limit);
        events::publish_window_limit_set(&env, caller, limit);
        Ok(())
    }

    pub fn get_window_limit(env: Env) -> u32 {
        env.storage().instance().get(&WINDOW_LIMIT).unwrap_or(0)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }
}
