mod helpers;

use bettrackr::models::*;
use bettrackr::repositories::*;
use bettrackr::services::*;
use helpers::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

async fn controller(db: &TestDatabase) -> LedgerController {
    LedgerController::bootstrap(db.ledger_repo.clone()).await
}

/// Add → settle → remove, with every step visible after a reload
#[tokio::test]
async fn test_ledger_lifecycle_persists() {
    let db = TestDatabase::new().await;
    let mut ledger = controller(&db).await;

    let first = ledger
        .add(BetDraft::new("Over 2.5", "100", "1.50").with_result(BetResult::Win))
        .await
        .expect("Failed to add first bet");
    let second = ledger
        .add(
            BetDraft::new("Ambas Marcam", "50", "2.10")
                .with_sport("Basquete")
                .with_notes("  "),
        )
        .await
        .expect("Failed to add second bet");

    assert_eq!(first.profit, Decimal::from(50));
    assert_eq!(second.result, BetResult::Pending);
    assert_eq!(second.sport, "Basquete");
    assert_eq!(second.notes, None);

    // newest first
    let ids: Vec<Uuid> = ledger.snapshot().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let reloaded = controller(&db).await;
    assert_eq!(reloaded.snapshot(), ledger.snapshot());

    let settled = ledger
        .update_result(second.id, BetResult::Loss)
        .await
        .unwrap()
        .expect("bet should exist");
    assert_eq!(settled.profit, Decimal::from(-50));
    assert!(ledger.snapshot().iter().all(BetRecord::is_consistent));

    let stats = ledger.stats();
    assert_eq!(stats.net_profit, Decimal::ZERO);
    assert_eq!(stats.win_rate, Decimal::from(50));

    assert!(ledger.remove(first.id).await.unwrap());
    let reloaded = controller(&db).await;
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.get(second.id).map(|b| b.result), Some(BetResult::Loss));
}

#[tokio::test]
async fn test_invalid_stake_leaves_ledger_untouched() {
    let db = TestDatabase::new().await;
    let mut ledger = controller(&db).await;
    ledger.add(BetDraft::new("Over 2.5", "10", "1.90")).await.unwrap();
    let before = db.store.get(LEDGER_KEY).await.unwrap();

    let err = ledger
        .add(BetDraft::new("Under 1.5", "abc", "1.90"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(ledger.len(), 1);
    assert_eq!(db.store.get(LEDGER_KEY).await.unwrap(), before);
}

#[tokio::test]
async fn test_unknown_id_is_a_no_op() {
    let db = TestDatabase::new().await;
    let mut ledger = controller(&db).await;
    let bet = ledger.add(BetDraft::new("Over 2.5", "10", "1.90")).await.unwrap();

    assert!(ledger.remove(bet.id).await.unwrap());
    assert!(!ledger.remove(bet.id).await.unwrap());
    assert!(ledger
        .update_result(Uuid::new_v4(), BetResult::Win)
        .await
        .unwrap()
        .is_none());
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn test_result_round_trip_restores_profit() {
    let db = TestDatabase::new().await;
    let mut ledger = controller(&db).await;
    let bet = ledger
        .add(BetDraft::new("Handicap -1", "40", "1.85").with_result(BetResult::Win))
        .await
        .unwrap();

    for result in BetResult::ALL {
        let updated = ledger.update_result(bet.id, result).await.unwrap().unwrap();
        assert!(updated.is_consistent());
    }
    let back = ledger.update_result(bet.id, BetResult::Win).await.unwrap().unwrap();
    assert_eq!(back.profit, Decimal::from_str("34").unwrap());
}

#[tokio::test]
async fn test_failed_save_keeps_in_memory_change() {
    let db = TestDatabase::new().await;
    let mut ledger = controller(&db).await;
    db.pool.close().await;

    let result = ledger.add(BetDraft::new("Over 2.5", "10", "1.90")).await;

    assert!(result.is_err());
    assert_eq!(ledger.len(), 1);

    // retrying the same draft adds a second record
    assert!(ledger.add(BetDraft::new("Over 2.5", "10", "1.90")).await.is_err());
    assert_eq!(ledger.len(), 2);
}

#[tokio::test]
async fn test_mutations_are_audited() {
    let db = TestDatabase::new().await;
    let audit = Arc::new(AuditTrailService::new(db.dir.path().join("logs")).unwrap());
    let mut ledger = controller(&db).await.with_audit(audit.clone());

    let bet = ledger.add(BetDraft::new("Over 2.5", "10", "1.90")).await.unwrap();
    ledger.update_result(bet.id, BetResult::Loss).await.unwrap();
    ledger.remove(bet.id).await.unwrap();

    let contents = tokio::fs::read_to_string(audit.log_file()).await.unwrap();
    let events: Vec<String> = contents
        .lines()
        .map(|line| {
            let entry: AuditLogEntry = serde_json::from_str(line).unwrap();
            assert_eq!(entry.bet_id, Some(bet.id));
            entry.event_type
        })
        .collect();
    assert_eq!(events, vec!["bet_added", "result_updated", "bet_removed"]);
}
