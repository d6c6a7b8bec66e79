use crate::InvalidWindow;
use soroban_sdk::{symbol_short, Address, Env};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub timestamp: u64,
}

/// Event published when the owner changes a delegate.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegateEvent {
    pub owner: Address,
    pub delegate: Address,
    pub timestamp: u64,
}

/// Event published when a delegate adds or deletes a doctor.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorEvent {
    pub delegate: Address,
    pub doctor: Address,
    pub timestamp: u64,
}

/// Event published when a certificate window is revoked or restored.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CertificateEvent {
    pub delegate: Address,
    pub doctor: Address,
    pub window: InvalidWindow,
    pub timestamp: u64,
}

/// Event published when the per-doctor window cap changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WindowLimitEvent {
    pub owner: Address,
    pub limit: u32,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, owner: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        owner,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

fn delegate_event(env: &Env, owner: Address, delegate: Address) -> DelegateEvent {
    DelegateEvent {
        owner,
        delegate,
        timestamp: env.ledger().timestamp(),
    }
}

pub fn publish_delegate_added(env: &Env, owner: Address, delegate: Address) {
    let topics = (symbol_short!("DLG_ADD"), delegate.clone());
    env.events()
        .publish(topics, delegate_event(env, owner, delegate));
}

pub fn publish_delegate_removed(env: &Env, owner: Address, delegate: Address) {
    let topics = (symbol_short!("DLG_DEL"), delegate.clone());
    env.events()
        .publish(topics, delegate_event(env, owner, delegate));
}

pub fn publish_delegate_status(env: &Env, owner: Address, delegate: Address, active: bool) {
    let topic = if active {
        symbol_short!("DLG_ACT")
    } else {
        symbol_short!("DLG_DEACT")
    };
    env.events().publish(
        (topic, delegate.clone()),
        delegate_event(env, owner, delegate),
    );
}

pub fn publish_doctor_added(env: &Env, delegate: Address, doctor: Address) {
    let topics = (symbol_short!("DOC_ADD"), doctor.clone());
    let data = DoctorEvent {
        delegate,
        doctor,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_doctor_removed(env: &Env, delegate: Address, doctor: Address) {
    let topics = (symbol_short!("DOC_DEL"), doctor.clone());
    let data = DoctorEvent {
        delegate,
        doctor,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_certificate_revoked(
    env: &Env,
    delegate: Address,
    doctor: Address,
    window: InvalidWindow,
) {
    let topics = (symbol_short!("CERT_REV"), doctor.clone());
    let data = CertificateEvent {
        delegate,
        doctor,
        window,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_certificate_restored(
    env: &Env,
    delegate: Address,
    doctor: Address,
    window: InvalidWindow,
) {
    let topics = (symbol_short!("CERT_RST"), doctor.clone());
    let data = CertificateEvent {
        delegate,
        doctor,
        window,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_window_limit_set(env: &Env, owner: Address, limit: u32) {
    let topics = (symbol_short!("WIN_LIM"),);
    let data = WindowLimitEvent {
        owner,
        limit,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
