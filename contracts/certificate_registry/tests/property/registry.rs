//! Property-based tests for the role registry.
//!
//! Invariants tested:
//! - After any sequence of owner actions, a delegate can manage doctors iff
//!   it exists and its last status change was an activation
//! - Owner actions fail exactly when the delegate model says they must
//! - Principals without an active delegate record are always refused

use certificate_registry::{
    Capability, CertificateRegistryContract, CertificateRegistryContractClient, ContractError,
    Role,
};
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};

#[derive(Arbitrary, Clone, Copy, Debug)]
enum OwnerAction {
    Add,
    Delete,
    Activate,
    Deactivate,
}

/// What the registry should hold for one delegate: `None` when absent,
/// otherwise the active flag.
type DelegateModel = Option<bool>;

fn setup() -> (Env, CertificateRegistryContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(CertificateRegistryContract, ());
    let client = CertificateRegistryContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner);

    (env, client, owner)
}

fn expected(model: DelegateModel, action: OwnerAction) -> (DelegateModel, Option<ContractError>) {
    match (action, model) {
        (OwnerAction::Add, None) => (Some(true), None),
        (OwnerAction::Add, Some(_)) => (model, Some(ContractError::AlreadyExists)),
        (OwnerAction::Delete, Some(_)) => (None, None),
        (OwnerAction::Activate, Some(_)) => (Some(true), None),
        (OwnerAction::Deactivate, Some(_)) => (Some(false), None),
        (_, None) => (None, Some(ContractError::NotFound)),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The contract tracks the delegate model through any owner action sequence.
    #[test]
    fn prop_delegate_state_machine(actions in prop::collection::vec(any::<OwnerAction>(), 1..16)) {
        let (env, client, owner) = setup();
        let delegate = Address::generate(&env);
        let mut model: DelegateModel = None;

        for action in actions {
            let result = match action {
                OwnerAction::Add => client.try_add_delegate(&owner, &delegate),
                OwnerAction::Delete => client.try_delete_delegate(&owner, &delegate),
                OwnerAction::Activate => client.try_activate_delegate(&owner, &delegate),
                OwnerAction::Deactivate => client.try_deactivate_delegate(&owner, &delegate),
            };
            let (next, error) = expected(model, action);
            match error {
                Some(e) => prop_assert_eq!(result, Err(Ok(e))),
                None => prop_assert!(result.is_ok()),
            }
            model = next;

            let role = client.get_role(&delegate);
            let expected_role = match model {
                None => Role::Unknown,
                Some(true) => Role::ActiveDelegate,
                Some(false) => Role::InactiveDelegate,
            };
            prop_assert_eq!(role, expected_role);
            prop_assert_eq!(
                client.has_capability(&delegate, &Capability::ManageDoctors),
                model == Some(true)
            );
        }

        let doctor = Address::generate(&env);
        let outcome = client.try_add_doctor(&delegate, &doctor);
        if model == Some(true) {
            prop_assert!(outcome.is_ok());
        } else {
            prop_assert_eq!(outcome, Err(Ok(ContractError::Unauthorized)));
        }
    }

    /// Only an active delegate may touch certificates, whoever else asks.
    #[test]
    fn prop_non_delegates_are_refused(
        start in 1u64..1_000,
        length in 0u64..1_000,
        caller_kind in 0u8..4,
    ) {
        let (env, client, owner) = setup();
        let delegate = Address::generate(&env);
        let doctor = Address::generate(&env);
        client.add_delegate(&owner, &delegate);
        client.add_doctor(&delegate, &doctor);

        let caller = match caller_kind {
            0 => owner.clone(),
            1 => doctor.clone(),
            2 => {
                let inactive = Address::generate(&env);
                client.add_delegate(&owner, &inactive);
                client.deactivate_delegate(&owner, &inactive);
                inactive
            }
            _ => Address::generate(&env),
        };
        let end = if length == 0 { 0 } else { start + length };

        prop_assert_eq!(
            client.try_deactivate_doctor(&caller, &doctor, &start, &end),
            Err(Ok(ContractError::Unauthorized))
        );
        prop_assert_eq!(
            client.try_activate_doctor(&caller, &doctor, &start, &end),
            Err(Ok(ContractError::Unauthorized))
        );
        prop_assert_eq!(
            client.try_delete_doctor(&caller, &doctor),
            Err(Ok(ContractError::Unauthorized))
        );
        prop_assert!(client.check_certificate(&doctor, &start));
    }
}
