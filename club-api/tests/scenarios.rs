//! End-to-end scenarios through the `ClubApi` facade

use club_api::{
    ApiConfig, ClubApi, JoinTournamentRequest, SubmitScoreRequest, VerifyPaymentRequest,
    VerifyScoreRequest, WithdrawRequest,
};
use match_consensus::{MatchSpec, MatchStatus, Outcome, Side, VerifyAction};
use payment_gateway::MockGateway;
use registration::{
    Format, JoinMode, JoinStatus, Level, PaymentScope, PickupSpec, PickupStatus, RegStatus,
};
use std::sync::Arc;
use wallet_ledger::{Profile, TxFilter, TxMode};

fn api() -> (ClubApi, Arc<MockGateway>) {
    let gateway = Arc::new(MockGateway::new("test_secret"));
    let api = ClubApi::new(
        ApiConfig::default(),
        Arc::clone(&gateway) as Arc<dyn payment_gateway::PaymentGateway>,
    );
    (api, gateway)
}

fn seeded_user(api: &ClubApi, name: &str, phone: &str, balance: i64) -> wallet_ledger::Player {
    let player = api.register_user(name, phone, Profile::default()).unwrap();
    if balance > 0 {
        api.admin_credit(player.team_id.as_str(), balance, TxMode::WalletTopup, "seed")
            .unwrap();
    }
    player
}

fn beginner_level(fee: i64) -> Level {
    Level {
        name: "Beginner".to_string(),
        fee,
        prize_1: 100_000,
        prize_2: 50_000,
        prize_3: 25_000,
        per_match_prize: 0,
    }
}

#[tokio::test]
async fn test_topup_flow_credits_after_verification() {
    let (api, gateway) = api();
    let player = seeded_user(&api, "Asha", "9000000001", 0);

    let order = api.create_order(25_000).await.unwrap();
    assert_eq!(order.amount, 25_000);

    // Checkout completes; the signed callback credits the wallet
    let callback = gateway.complete_checkout(&order.order_id);
    let response = api
        .verify_payment(&VerifyPaymentRequest {
            order_id: callback.order_id,
            payment_id: callback.payment_id,
            signature: callback.signature,
            team_id: player.team_id.as_str().to_string(),
        })
        .unwrap();
    assert_eq!(response.new_balance, 25_000);
}

#[tokio::test]
async fn test_replayed_callback_credits_once() {
    let (api, gateway) = api();
    let player = seeded_user(&api, "Asha", "9000000001", 0);
    let order = api.create_order(25_000).await.unwrap();
    let callback = gateway.complete_checkout(&order.order_id);

    let req = VerifyPaymentRequest {
        order_id: callback.order_id,
        payment_id: callback.payment_id,
        signature: callback.signature,
        team_id: player.team_id.as_str().to_string(),
    };
    api.verify_payment(&req).unwrap();

    // Posting the same signed callback again moves no money
    let err = api.verify_payment(&req).unwrap_err();
    assert!(matches!(err, club_api::Error::DuplicatePayment(_)));
    assert_eq!(api.user(player.team_id.as_str()).unwrap().balance, 25_000);
}

#[tokio::test]
async fn test_callback_for_unminted_order_rejected() {
    let (api, gateway) = api();
    let player = seeded_user(&api, "Asha", "9000000001", 0);

    // Properly signed, but for an order this service never created
    let callback = gateway.complete_checkout("order_unseen");
    let err = api
        .verify_payment(&VerifyPaymentRequest {
            order_id: callback.order_id,
            payment_id: callback.payment_id,
            signature: callback.signature,
            team_id: player.team_id.as_str().to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, club_api::Error::UnknownOrder(_)));
    assert_eq!(api.user(player.team_id.as_str()).unwrap().balance, 0);
}

#[tokio::test]
async fn test_forged_callback_never_credits() {
    let (api, gateway) = api();
    let player = seeded_user(&api, "Asha", "9000000001", 0);
    let order = api.create_order(25_000).await.unwrap();
    let callback = gateway.complete_checkout(&order.order_id);

    let err = api
        .verify_payment(&VerifyPaymentRequest {
            order_id: callback.order_id,
            payment_id: callback.payment_id,
            signature: "0000deadbeef".to_string(),
            team_id: player.team_id.as_str().to_string(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        club_api::Error::Gateway(payment_gateway::Error::PaymentVerificationFailed { .. })
    ));
    assert_eq!(api.user(player.team_id.as_str()).unwrap().balance, 0);
}

#[test]
fn test_pickup_hosting_scenario() {
    let (api, _) = api();
    // Host with ₹150; platform fee is ₹100
    let host = seeded_user(&api, "Host", "9100000001", 15_000);

    let m = api
        .host_pickup(
            &host.phone,
            PickupSpec {
                sport: "Padel".to_string(),
                venue: "Court 3".to_string(),
                date: "2025-02-01".to_string(),
                time: "19:00".to_string(),
                total_slots: 4,
                total_cost: 20_000,
                join_mode: JoinMode::Open,
                description: String::new(),
            },
        )
        .unwrap();
    assert_eq!(api.user(host.team_id.as_str()).unwrap().balance, 5_000);

    // 4-slot ₹200-total match: each joiner pays ₹50
    for i in 0..4 {
        let p = seeded_user(&api, &format!("P{i}"), &format!("91000001{i:02}"), 10_000);
        let after = api.join_pickup(m.id, &p.phone).unwrap();
        assert_eq!(api.user(p.team_id.as_str()).unwrap().balance, 5_000);
        if i == 3 {
            assert_eq!(after.status, PickupStatus::Full);
        }
    }

    // 5th join fails cleanly
    let fifth = seeded_user(&api, "Fifth", "9100000900", 10_000);
    let err = api.join_pickup(m.id, &fifth.phone).unwrap_err();
    assert!(matches!(
        err,
        club_api::Error::Registration(registration::Error::SlotsFull)
    ));
    assert_eq!(api.user(fifth.team_id.as_str()).unwrap().balance, 10_000);
}

#[test]
fn test_score_consensus_flow() {
    let (api, _) = api();
    let p1 = seeded_user(&api, "Asha", "9000000001", 0);
    let p2 = seeded_user(&api, "Bala", "9000000002", 0);

    let m = api.create_match(MatchSpec {
        tournament: "Summer Open".to_string(),
        level: "Beginner".to_string(),
        group: "A".to_string(),
        team1: p1.team_id.clone(),
        team2: p2.team_id.clone(),
        stage: "Group".to_string(),
        date: "2025-02-01".to_string(),
        time: "10:00".to_string(),
    });

    // Malformed score rejected before any state change
    let err = api
        .submit_score(&SubmitScoreRequest {
            match_id: m.id,
            score: "6-4,abc".to_string(),
            submitted_by: p1.team_id.as_str().to_string(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        club_api::Error::Consensus(match_consensus::Error::ScoreParse(_))
    ));
    assert_eq!(api.match_details(m.id).unwrap().status, MatchStatus::Unscored);

    let pending = api
        .submit_score(&SubmitScoreRequest {
            match_id: m.id,
            score: "6-4,3-6,6-2".to_string(),
            submitted_by: p1.team_id.as_str().to_string(),
        })
        .unwrap();
    assert_eq!(pending.status, MatchStatus::PendingVerification);

    // Submitter cannot approve their own score
    let err = api
        .verify_score(&VerifyScoreRequest {
            match_id: m.id,
            team_id: p1.team_id.as_str().to_string(),
            action: VerifyAction::Approve,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        club_api::Error::Consensus(match_consensus::Error::SelfVerification(_))
    ));

    // A stranger cannot verify at all
    let stranger = seeded_user(&api, "Cena", "9000000003", 0);
    let err = api
        .verify_score(&VerifyScoreRequest {
            match_id: m.id,
            team_id: stranger.team_id.as_str().to_string(),
            action: VerifyAction::Approve,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        club_api::Error::Consensus(match_consensus::Error::Unauthorized(_))
    ));

    // The opponent approves; team1 wins 2 sets to 1
    let official = api
        .verify_score(&VerifyScoreRequest {
            match_id: m.id,
            team_id: p2.team_id.as_str().to_string(),
            action: VerifyAction::Approve,
        })
        .unwrap();
    assert_eq!(official.status, MatchStatus::Official);
    let score = official.score.unwrap();
    assert_eq!(score.outcome(), Outcome::Winner(Side::Team1));
    assert_eq!(score.sets_won(Side::Team1), 2);
}

#[test]
fn test_split_payment_doubles_entry() {
    let (api, _) = api();
    let payer = seeded_user(&api, "Asha", "9000000001", 100_000);
    let partner = seeded_user(&api, "Bala", "9000000002", 100_000);

    api.create_tournament(
        "Doubles Cup",
        "Mumbai",
        "Padel",
        Format::Doubles,
        16,
        vec![beginner_level(50_000)],
    )
    .unwrap();

    // ₹500/person, individual scope: payer debited ₹500 only
    let response = api
        .join_tournament(&JoinTournamentRequest {
            phone: payer.phone.clone(),
            tournament: "Doubles Cup".to_string(),
            level: "Beginner".to_string(),
            partner_team_id: Some(partner.team_id.as_str().to_string()),
            payment_scope: PaymentScope::Individual,
        })
        .unwrap();
    assert_eq!(response.status, JoinStatus::PendingPartner);
    assert_eq!(response.user.balance, 50_000);
    assert_eq!(api.user(partner.team_id.as_str()).unwrap().balance, 100_000);

    let pending = response
        .registrations
        .iter()
        .find(|reg| reg.status == RegStatus::PendingPartner)
        .unwrap();

    // Partner confirms with an independent ₹500 debit
    let confirmed = api.confirm_partner(pending.id).unwrap();
    assert_eq!(confirmed.status, RegStatus::Confirmed);
    assert_eq!(api.user(partner.team_id.as_str()).unwrap().balance, 50_000);

    // Two debits of ₹500 each, never one of ₹1000
    for team in [&payer.team_id, &partner.team_id] {
        let history = api
            .transactions(
                team.as_str(),
                &TxFilter {
                    mode: Some(TxMode::EventFee),
                    description_contains: None,
                },
            )
            .unwrap();
        assert_eq!(history.transactions.len(), 1);
        assert_eq!(history.transactions[0].amount, 50_000);
    }
}

#[test]
fn test_standings_from_official_matches_only() {
    let (api, _) = api();
    api.create_tournament(
        "Summer Open",
        "Mumbai",
        "Padel",
        Format::Singles,
        8,
        vec![beginner_level(50_000)],
    )
    .unwrap();

    let p1 = seeded_user(&api, "Asha", "9000000001", 100_000);
    let p2 = seeded_user(&api, "Bala", "9000000002", 100_000);
    for p in [&p1, &p2] {
        api.join_tournament(&JoinTournamentRequest {
            phone: p.phone.clone(),
            tournament: "Summer Open".to_string(),
            level: "Beginner".to_string(),
            partner_team_id: None,
            payment_scope: PaymentScope::Individual,
        })
        .unwrap();
    }

    let m = api.create_match(MatchSpec {
        tournament: "Summer Open".to_string(),
        level: "Beginner".to_string(),
        group: "A".to_string(),
        team1: p1.team_id.clone(),
        team2: p2.team_id.clone(),
        stage: "Group".to_string(),
        date: "2025-02-01".to_string(),
        time: "10:00".to_string(),
    });

    // Unverified scores contribute nothing
    api.submit_score(&SubmitScoreRequest {
        match_id: m.id,
        score: "6-4,6-2".to_string(),
        submitted_by: p1.team_id.as_str().to_string(),
    })
    .unwrap();
    let rows = api.standings("Summer Open", Some("Beginner")).unwrap();
    assert!(rows.iter().all(|row| row.played == 0 && row.points == 0));

    api.verify_score(&VerifyScoreRequest {
        match_id: m.id,
        team_id: p2.team_id.as_str().to_string(),
        action: VerifyAction::Approve,
    })
    .unwrap();

    let rows = api.standings("Summer Open", Some("Beginner")).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].team, p1.team_id);
    assert_eq!(rows[0].points, 3);
    assert_eq!(rows[0].games_won, 12);
    assert_eq!(rows[1].points, 0);

    // Deterministic ordering on repeated computation
    for _ in 0..5 {
        assert_eq!(api.standings("Summer Open", Some("Beginner")).unwrap(), rows);
    }
}

#[test]
fn test_withdrawal_reserve_and_reject() {
    let (api, _) = api();
    let player = seeded_user(&api, "Asha", "9000000001", 100_000);

    let tx_id = api
        .withdraw(&WithdrawRequest {
            team_id: player.team_id.as_str().to_string(),
            amount: 60_000,
            bank_details: "HDFC ****1234".to_string(),
        })
        .unwrap();
    // Reserved immediately; the remainder cannot cover another 60k
    assert_eq!(api.user(player.team_id.as_str()).unwrap().balance, 40_000);
    assert!(api
        .withdraw(&WithdrawRequest {
            team_id: player.team_id.as_str().to_string(),
            amount: 60_000,
            bank_details: "HDFC ****1234".to_string(),
        })
        .is_err());

    api.reject_withdrawal(tx_id).unwrap();
    assert_eq!(api.user(player.team_id.as_str()).unwrap().balance, 100_000);
}

#[test]
fn test_delete_tournament_cascades_matches() {
    let (api, _) = api();
    api.create_tournament(
        "Summer Open",
        "Mumbai",
        "Padel",
        Format::Singles,
        8,
        vec![beginner_level(50_000)],
    )
    .unwrap();
    let p1 = seeded_user(&api, "Asha", "9000000001", 100_000);
    let p2 = seeded_user(&api, "Bala", "9000000002", 100_000);

    let m = api.create_match(MatchSpec {
        tournament: "Summer Open".to_string(),
        level: "Beginner".to_string(),
        group: "A".to_string(),
        team1: p1.team_id.clone(),
        team2: p2.team_id.clone(),
        stage: "Group".to_string(),
        date: "2025-02-01".to_string(),
        time: "10:00".to_string(),
    });

    api.delete_tournament("Summer Open").unwrap();
    assert!(api.match_details(m.id).is_err());
    assert!(api.match_list("Summer Open", None, None).is_empty());
    assert!(api.standings("Summer Open", None).is_err());
}
