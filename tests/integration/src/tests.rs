//! Integration tests for the beacon randomness oracle.
//!
//! Each contract runs against its own `cosmwasm_std::testing` mocks. Messages one
//! contract emits for another are delivered by hand through the receiving
//! contract's entry points, and cross-contract queries are answered with
//! `MockQuerier::update_wasm`.
//!
//! Run:
//! ```bash
//! cargo test -p beacon-rand-integration-tests
//! ```

use beacon_rand_common::{RequestRandomnessResponse, RequestStatus};
use beacon_rand_dice_consumer::contract as consumer;
use beacon_rand_dice_consumer::msg as consumer_msg;
use beacon_rand_oracle::contract as oracle;
use beacon_rand_oracle::msg as oracle_msg;
use beacon_rand_oracle::state::{ProtocolState, RandomnessRequest};
use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, Coin, ContractResult, CosmosMsg, Decimal,
    Env, HexBinary, MemoryStorage, OwnedDeps, Reply, SubMsgResult, SystemError, SystemResult,
    Timestamp, Uint128, Uint256, WasmMsg, WasmQuery,
};
use sha2::{Digest, Sha256};

type TestDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

// ─── Constants ───

/// Real drand quicknet public key
const QUICKNET_PK_HEX: &str = "83cf0f2896adee7eb8b5f01fcad3912212c437e0073e911fb90022d3e760183c8c4b450b6a0a6c3ac6a5776a2d1064510d1fec758c921cc22b0e17e63aaf4bcb5ed66304de9cf809bd274ca73bab4af5a6e9c76a4bc09e76eae8991ef5ece45a";
const GENESIS: u64 = 1692803367;

/// Real quicknet test vector: round 1000
const TEST_ROUND: u64 = 1000;
const TEST_SIG_HEX: &str = "b44679b9a59af2ec876b1a6b1ad52ea9b1615fc3982b19576350f93447cb1125e342b73a8dd2bacbe47e4b6b63ed5e39";
const TEST_RANDOMNESS_HEX: &str =
    "fe290beca10872ef2fb164d2aa4442de4566183ec51c56ff3cd603d930e54fdd";

const CALLBACK_GAS: u64 = 300_000;

const CONTRACT_INFO_JSON: &[u8] =
    br#"{"code_id":2,"creator":"creator","admin":null,"pinned":false,"ibc_port":null}"#;

// ─── Helpers ───

fn env_at(seconds: u64) -> Env {
    let mut env = mock_env();
    env.block.time = Timestamp::from_seconds(seconds);
    env
}

fn oracle_addr() -> Addr {
    MockApi::default().addr_make("oracle")
}

fn consumer_addr() -> Addr {
    MockApi::default().addr_make("dice")
}

fn setup_oracle() -> TestDeps {
    let mut deps = mock_dependencies();
    let admin = deps.api.addr_make("admin");
    oracle::instantiate(
        deps.as_mut(),
        mock_env(),
        message_info(&admin, &[]),
        oracle_msg::InstantiateMsg {
            public_key_hex: QUICKNET_PK_HEX.to_string(),
            genesis_time: GENESIS,
            period_seconds: 3,
            fee_denom: "inj".to_string(),
            base_request_fee: Uint128::new(1_000_000),
            gas_price: Decimal::from_ratio(1u128, 10u128),
            max_callback_gas: 1_000_000,
            max_deadline_delta: 600,
        },
    )
    .unwrap();

    // The dice consumer is the only contract the oracle knows about
    let dice = consumer_addr().to_string();
    deps.querier.update_wasm(move |query| match query {
        WasmQuery::ContractInfo { contract_addr } if *contract_addr == dice => {
            SystemResult::Ok(ContractResult::Ok(Binary::from(CONTRACT_INFO_JSON.to_vec())))
        }
        _ => SystemResult::Err(SystemError::NoSuchContract {
            addr: "unknown".to_string(),
        }),
    });
    deps
}

fn setup_consumer() -> TestDeps {
    let mut deps = mock_dependencies();
    let creator = deps.api.addr_make("creator");
    consumer::instantiate(
        deps.as_mut(),
        mock_env(),
        message_info(&creator, &[]),
        consumer_msg::InstantiateMsg {
            oracle: oracle_addr().to_string(),
        },
    )
    .unwrap();
    deps
}

/// Answer the consumer's `State {}` query with the oracle's current state.
fn sync_oracle_state(consumer_deps: &mut TestDeps, oracle_deps: &TestDeps) {
    let state: ProtocolState = from_json(
        oracle::query(
            oracle_deps.as_ref(),
            mock_env(),
            oracle_msg::QueryMsg::State {},
        )
        .unwrap(),
    )
    .unwrap();
    let snapshot = to_json_binary(&state).unwrap();
    consumer_deps.querier.update_wasm(move |query| match query {
        WasmQuery::Smart { .. } => SystemResult::Ok(ContractResult::Ok(snapshot.clone())),
        _ => SystemResult::Err(SystemError::NoSuchContract {
            addr: "unknown".to_string(),
        }),
    });
}

fn quote(deps: &TestDeps, callback_gas_limit: u64) -> Coin {
    from_json(
        oracle::query(
            deps.as_ref(),
            mock_env(),
            oracle_msg::QueryMsg::RequestPrice {
                callback_gas_limit,
                gas_price: None,
            },
        )
        .unwrap(),
    )
    .unwrap()
}

/// Run the consumer's `GetRandom` and deliver the resulting oracle request.
fn roll_dice(
    oracle_deps: &mut TestDeps,
    consumer_deps: &mut TestDeps,
    player: &Addr,
    now: u64,
    deadline_delta: u64,
) -> RequestRandomnessResponse {
    let price = quote(oracle_deps, CALLBACK_GAS);
    sync_oracle_state(consumer_deps, oracle_deps);

    let res = consumer::execute(
        consumer_deps.as_mut(),
        env_at(now),
        message_info(player, &[price]),
        consumer_msg::ExecuteMsg::GetRandom {
            deadline_delta,
            callback_gas_limit: CALLBACK_GAS,
        },
    )
    .unwrap();

    let (msg, funds) = match &res.messages[0].msg {
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr,
            msg,
            funds,
        }) => {
            assert_eq!(*contract_addr, oracle_addr().to_string());
            (msg.clone(), funds.clone())
        }
        other => panic!("unexpected message {other:?}"),
    };

    let res = oracle::execute(
        oracle_deps.as_mut(),
        env_at(now),
        message_info(&consumer_addr(), &funds),
        from_json(msg).unwrap(),
    )
    .unwrap();
    from_json(res.data.unwrap()).unwrap()
}

fn fulfill(
    oracle_deps: &mut TestDeps,
    request_id: u64,
    requester: &Addr,
    now: u64,
) -> cosmwasm_std::Response {
    let keeper = oracle_deps.api.addr_make("keeper");
    oracle::execute(
        oracle_deps.as_mut(),
        env_at(now),
        message_info(&keeper, &[]),
        oracle_msg::ExecuteMsg::FulfillRandomness {
            request_id,
            requester: requester.to_string(),
            round: TEST_ROUND,
            callback_gas_limit: CALLBACK_GAS,
            signature_hex: TEST_SIG_HEX.to_string(),
        },
    )
    .unwrap()
}

/// Execute the oracle's callback sub-message on the consumer and feed the
/// outcome back to the oracle's `reply`.
fn deliver_callback(
    oracle_deps: &mut TestDeps,
    consumer_deps: &mut TestDeps,
    fulfill_res: &cosmwasm_std::Response,
    now: u64,
) -> cosmwasm_std::Response {
    let sub = &fulfill_res.messages[0];
    assert_eq!(sub.gas_limit, Some(CALLBACK_GAS));
    let msg = match &sub.msg {
        CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr, msg, ..
        }) => {
            assert_eq!(*contract_addr, consumer_addr().to_string());
            msg.clone()
        }
        other => panic!("unexpected message {other:?}"),
    };

    let result = match consumer::execute(
        consumer_deps.as_mut(),
        env_at(now),
        message_info(&oracle_addr(), &[]),
        from_json(msg).unwrap(),
    ) {
        #[allow(deprecated)]
        Ok(_) => SubMsgResult::Ok(cosmwasm_std::SubMsgResponse {
            events: vec![],
            data: None,
            msg_responses: vec![],
        }),
        Err(err) => SubMsgResult::Err(err.to_string()),
    };

    oracle::reply(
        oracle_deps.as_mut(),
        env_at(now),
        Reply {
            id: sub.id,
            payload: Binary::default(),
            gas_used: 50_000,
            result,
        },
    )
    .unwrap()
}

fn load_request(deps: &TestDeps, request_id: u64) -> RandomnessRequest {
    let req: Option<RandomnessRequest> = from_json(
        oracle::query(
            deps.as_ref(),
            mock_env(),
            oracle_msg::QueryMsg::Request { request_id },
        )
        .unwrap(),
    )
    .unwrap();
    req.unwrap()
}

fn event_attr(res: &cosmwasm_std::Response, ty: &str, key: &str) -> Option<String> {
    res.events
        .iter()
        .find(|e| e.ty == ty)?
        .attributes
        .iter()
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}

// ─── Tests ───

#[test]
fn test_dice_roll_end_to_end() {
    let mut oracle_deps = setup_oracle();
    let mut consumer_deps = setup_consumer();
    let player = consumer_deps.api.addr_make("player");

    // Deadline GENESIS + 3000 lands on round 1000
    let requested = roll_dice(
        &mut oracle_deps,
        &mut consumer_deps,
        &player,
        GENESIS + 2990,
        10,
    );
    assert_eq!(requested.request_id, 0);
    assert_eq!(requested.round, TEST_ROUND);
    assert_eq!(
        load_request(&oracle_deps, 0).requester,
        consumer_addr()
    );

    let res = fulfill(&mut oracle_deps, 0, &consumer_addr(), GENESIS + 3000);
    let reply_res = deliver_callback(&mut oracle_deps, &mut consumer_deps, &res, GENESIS + 3000);

    assert_eq!(
        event_attr(&reply_res, "randomness_fulfilled", "callback_success").as_deref(),
        Some("true")
    );
    assert_eq!(
        event_attr(&reply_res, "randomness_fulfilled", "randomness").as_deref(),
        Some(TEST_RANDOMNESS_HEX)
    );

    let request = load_request(&oracle_deps, 0);
    assert_eq!(request.status, RequestStatus::Fulfilled);
    assert_eq!(request.callback_success, Some(true));

    // Consumer stored the same bytes the oracle derived
    let stored: Option<HexBinary> = from_json(
        consumer::query(
            consumer_deps.as_ref(),
            mock_env(),
            consumer_msg::QueryMsg::Randomness { request_id: 0 },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(stored.unwrap().to_hex(), TEST_RANDOMNESS_HEX);

    let face: Option<u8> = from_json(
        consumer::query(
            consumer_deps.as_ref(),
            mock_env(),
            consumer_msg::QueryMsg::DiceRoll { request_id: 0 },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(face, Some(6));

    let rolled_by: Option<Addr> = from_json(
        consumer::query(
            consumer_deps.as_ref(),
            mock_env(),
            consumer_msg::QueryMsg::Player { request_id: 0 },
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(rolled_by, Some(player));

    let oracle_value: Uint256 = from_json(
        oracle::query(
            oracle_deps.as_ref(),
            mock_env(),
            oracle_msg::QueryMsg::Randomness { request_id: 0 },
        )
        .unwrap(),
    )
    .unwrap();
    let sig = hex::decode(TEST_SIG_HEX).unwrap();
    let expected: [u8; 32] = Sha256::digest(&sig).into();
    assert_eq!(oracle_value, Uint256::from_be_bytes(expected));
}

#[test]
fn test_failed_callback_does_not_revert_fulfillment() {
    let mut oracle_deps = setup_oracle();
    let mut consumer_deps = setup_consumer();
    let player = consumer_deps.api.addr_make("player");

    roll_dice(&mut oracle_deps, &mut consumer_deps, &player, GENESIS + 2990, 10);
    let res = fulfill(&mut oracle_deps, 0, &consumer_addr(), GENESIS + 3000);

    // Consumer already holds randomness for id 0, so its handler rejects the delivery
    consumer::execute(
        consumer_deps.as_mut(),
        env_at(GENESIS + 3000),
        message_info(&oracle_addr(), &[]),
        consumer_msg::ExecuteMsg::ReceiveRandomness(beacon_rand_common::RandomnessCallback {
            request_id: 0,
            randomness: HexBinary::from(vec![0u8; 32]),
        }),
    )
    .unwrap();

    let reply_res = deliver_callback(&mut oracle_deps, &mut consumer_deps, &res, GENESIS + 3000);
    assert_eq!(
        event_attr(&reply_res, "randomness_fulfilled", "callback_success").as_deref(),
        Some("false")
    );

    let request = load_request(&oracle_deps, 0);
    assert_eq!(request.status, RequestStatus::Fulfilled);
    assert_eq!(request.callback_success, Some(false));

    // A second fulfillment attempt is still rejected
    let keeper = oracle_deps.api.addr_make("keeper");
    let err = oracle::execute(
        oracle_deps.as_mut(),
        env_at(GENESIS + 3001),
        message_info(&keeper, &[]),
        oracle_msg::ExecuteMsg::FulfillRandomness {
            request_id: 0,
            requester: consumer_addr().to_string(),
            round: TEST_ROUND,
            callback_gas_limit: CALLBACK_GAS,
            signature_hex: TEST_SIG_HEX.to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        beacon_rand_oracle::ContractError::AlreadyFulfilled { request_id: 0 }
    ));
}

#[test]
fn test_wallet_request_is_marked_failed() {
    let mut oracle_deps = setup_oracle();
    let wallet = oracle_deps.api.addr_make("wallet");
    let price = quote(&oracle_deps, CALLBACK_GAS);

    let res = oracle::execute(
        oracle_deps.as_mut(),
        env_at(GENESIS + 2990),
        message_info(&wallet, &[price]),
        oracle_msg::ExecuteMsg::RequestRandomness {
            deadline: GENESIS + 3000,
            callback_gas_limit: CALLBACK_GAS,
        },
    )
    .unwrap();
    let requested: RequestRandomnessResponse = from_json(res.data.unwrap()).unwrap();

    let res = fulfill(&mut oracle_deps, requested.request_id, &wallet, GENESIS + 3000);
    assert!(res.messages.is_empty());
    assert_eq!(
        event_attr(&res, "randomness_fulfilled", "callback_success").as_deref(),
        Some("false")
    );
    assert_eq!(
        load_request(&oracle_deps, requested.request_id).status,
        RequestStatus::Failed
    );
}

#[test]
fn test_many_rolls_share_one_round() {
    let mut oracle_deps = setup_oracle();
    let mut consumer_deps = setup_consumer();
    let alice = consumer_deps.api.addr_make("alice");
    let bob = consumer_deps.api.addr_make("bob");

    let first = roll_dice(&mut oracle_deps, &mut consumer_deps, &alice, GENESIS + 2990, 10);
    let second = roll_dice(&mut oracle_deps, &mut consumer_deps, &bob, GENESIS + 2992, 8);
    assert_eq!(first.round, second.round);
    assert_eq!(second.request_id, first.request_id + 1);

    for id in [first.request_id, second.request_id] {
        let res = fulfill(&mut oracle_deps, id, &consumer_addr(), GENESIS + 3000);
        deliver_callback(&mut oracle_deps, &mut consumer_deps, &res, GENESIS + 3000);
    }

    for id in [first.request_id, second.request_id] {
        let face: Option<u8> = from_json(
            consumer::query(
                consumer_deps.as_ref(),
                mock_env(),
                consumer_msg::QueryMsg::DiceRoll { request_id: id },
            )
            .unwrap(),
        )
        .unwrap();
        assert_eq!(face, Some(6));
    }

    // Both payments retained by the oracle
    let state: ProtocolState = from_json(
        oracle::query(oracle_deps.as_ref(), mock_env(), oracle_msg::QueryMsg::State {}).unwrap(),
    )
    .unwrap();
    assert_eq!(state.fee_balance, quote(&oracle_deps, CALLBACK_GAS).amount * Uint128::new(2));
}
