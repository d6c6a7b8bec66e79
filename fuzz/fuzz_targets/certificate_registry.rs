#![no_main]

use arbitrary::Arbitrary;
use certificate_registry::{CertificateRegistryContract, CertificateRegistryContractClient};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Address as _, Address, Env};
use std::collections::HashMap;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    AddDelegate { caller: u8, target: u8 },
    DeleteDelegate { caller: u8, target: u8 },
    SetDelegateActive { caller: u8, target: u8, active: bool },
    AddDoctor { caller: u8, target: u8 },
    DeleteDoctor { caller: u8, target: u8 },
    DeactivateDoctor { caller: u8, target: u8, start: u64, end: u64 },
    ActivateDoctor { caller: u8, target: u8, start: u64, end: u64 },
    Check { target: u8, time: u64 },
}

/// Successful certificate operations per doctor, oldest first:
/// `(revoked, start, end)`.
type History = Vec<(bool, u64, u64)>;

fn covers(start: u64, end: u64, time: u64) -> bool {
    time >= start && (end == 0 || time < end)
}

/// The most recent operation covering `time` decides its validity.
fn model_valid(history: &History, time: u64) -> bool {
    history
        .iter()
        .rev()
        .find(|(_, start, end)| covers(*start, *end, time))
        .map_or(true, |(revoked, _, _)| !revoked)
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(CertificateRegistryContract, ());
    let client = CertificateRegistryContractClient::new(&env, &contract_id);

    // Index 0 is always the owner.
    let principals: Vec<Address> = (0..6).map(|_| Address::generate(&env)).collect();
    let _ = client.try_initialize(&principals[0]);
    let index = |i: u8| i as usize % principals.len();
    let pick = |i: u8| &principals[index(i)];
    let mut doctors: HashMap<usize, History> = HashMap::new();

    // Looking for panics, and for query results that disagree with a
    // replay of every successful certificate operation.
    for action in actions {
        match action {
            FuzzAction::AddDelegate { caller, target } => {
                let _ = client.try_add_delegate(pick(caller), pick(target));
            }
            FuzzAction::DeleteDelegate { caller, target } => {
                let _ = client.try_delete_delegate(pick(caller), pick(target));
            }
            FuzzAction::SetDelegateActive {
                caller,
                target,
                active,
            } => {
                if active {
                    let _ = client.try_activate_delegate(pick(caller), pick(target));
                } else {
                    let _ = client.try_deactivate_delegate(pick(caller), pick(target));
                }
            }
            FuzzAction::AddDoctor { caller, target } => {
                if let Ok(Ok(())) = client.try_add_doctor(pick(caller), pick(target)) {
                    doctors.insert(index(target), History::new());
                }
            }
            FuzzAction::DeleteDoctor { caller, target } => {
                if let Ok(Ok(())) = client.try_delete_doctor(pick(caller), pick(target)) {
                    doctors.remove(&index(target));
                }
            }
            FuzzAction::DeactivateDoctor {
                caller,
                target,
                start,
                end,
            } => {
                let result = client.try_deactivate_doctor(pick(caller), pick(target), &start, &end);
                if let Ok(Ok(())) = result {
                    if let Some(history) = doctors.get_mut(&index(target)) {
                        history.push((true, start, end));
                    }
                }
            }
            FuzzAction::ActivateDoctor {
                caller,
                target,
                start,
                end,
            } => {
                let result = client.try_activate_doctor(pick(caller), pick(target), &start, &end);
                if let Ok(Ok(())) = result {
                    if let Some(history) = doctors.get_mut(&index(target)) {
                        history.push((false, start, end));
                    }
                }
            }
            FuzzAction::Check { target, time } => {
                let outcome = client.try_check_certificate(pick(target), &time);
                match doctors.get(&index(target)) {
                    Some(history) => assert_eq!(outcome, Ok(Ok(model_valid(history, time)))),
                    None => assert!(outcome.is_err()),
                }
            }
        }
    }
});
