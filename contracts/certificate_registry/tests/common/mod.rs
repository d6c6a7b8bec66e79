#![allow(dead_code)]

use certificate_registry::{CertificateRegistryContract, CertificateRegistryContractClient};
use soroban_sdk::{testutils::Address as _, Address, Env};

pub struct TestContext {
    pub env: Env,
    pub client: CertificateRegistryContractClient<'static>,
    pub owner: Address,
}

/// Creates a mocked Soroban environment, deploys the contract, and initializes the owner.
pub fn setup_test_env() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(CertificateRegistryContract, ());
    let client = CertificateRegistryContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner);

    TestContext { env, client, owner }
}

/// Adds a fresh active delegate and returns its address.
pub fn create_delegate(ctx: &TestContext) -> Address {
    let delegate = Address::generate(&ctx.env);
    ctx.client.add_delegate(&ctx.owner, &delegate);
    delegate
}

/// Adds a fresh doctor through `delegate` and returns its address.
pub fn create_doctor(ctx: &TestContext, delegate: &Address) -> Address {
    let doctor = Address::generate(&ctx.env);
    ctx.client.add_doctor(delegate, &doctor);
    doctor
}

/// Asserts the certificate validity of `doctor` at every listed time.
pub fn assert_validity(ctx: &TestContext, doctor: &Address, expected: &[(u64, bool)]) {
    for (time, valid) in expected {
        assert_eq!(
            ctx.client.check_certificate(doctor, time),
            *valid,
            "unexpected validity at t={}",
            time
        );
    }
}
