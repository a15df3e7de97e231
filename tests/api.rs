mod helpers;

use helpers::setup::spawn_app;
use helpers::utils::{now_millis, test_subscription};
use push_reminder_sdk::{APIErrorVariant, CreateReminderInput, ReminderStatus, ID};
use serde_json::{json, Value};

#[actix_web::test]
async fn test_status_ok() {
    let (app, sdk, _) = spawn_app().await;
    let res = sdk.status.check_health().await.expect("Expected to be up");
    assert_eq!(res.push_enabled, app.ctx.config.vapid.is_some());
}

#[actix_web::test]
async fn test_subscribe_is_idempotent() {
    let (app, sdk, _) = spawn_app().await;
    let subscription = test_subscription("https://push.example.com/send/1");

    let res = sdk
        .subscription
        .subscribe(&subscription)
        .await
        .expect("Expected to subscribe");
    assert!(res.success);
    assert!(sdk.subscription.subscribe(&subscription).await.is_ok());
    assert_eq!(app.ctx.repos.subscriptions.count().await, 1);
}

#[actix_web::test]
async fn test_create_and_list_reminders() {
    let (_, sdk, _) = spawn_app().await;
    let timestamp = now_millis() + 1000 * 60;
    let res = sdk
        .reminder
        .create(CreateReminderInput {
            text: "Test".into(),
            timestamp,
        })
        .await
        .expect("Expected to create reminder");
    assert!(res.success);
    assert_eq!(res.item.text, "Test");
    assert_eq!(res.item.timestamp, timestamp);
    assert_eq!(res.item.status, ReminderStatus::Scheduled);

    let reminders = sdk
        .reminder
        .get_all()
        .await
        .expect("Expected to list reminders")
        .0;
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].id, res.item.id);
}

#[actix_web::test]
async fn test_reminder_json_layout() {
    let (_, _, address) = spawn_app().await;
    let client = reqwest::Client::new();
    let body = client
        .post(format!("{}/schedule", address))
        .json(&json!({ "text": "Test", "timestamp": now_millis() + 1000 * 60 }))
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    assert_eq!(body["success"], true);
    let item = &body["item"];
    assert!(item["id"].is_string());
    assert!(item["createdAt"].is_i64());
    assert_eq!(item["status"], "scheduled");

    let list = client
        .get(format!("{}/scheduled", address))
        .send()
        .await
        .unwrap()
        .json::<Value>()
        .await
        .unwrap();
    assert_eq!(list.as_array().map(|l| l.len()), Some(1));
}

#[actix_web::test]
async fn test_invalid_reminders_are_rejected() {
    let (app, _, address) = spawn_app().await;
    let client = reqwest::Client::new();
    let invalid_bodies = vec![
        json!({ "timestamp": now_millis() }),
        json!({ "text": "", "timestamp": now_millis() }),
        json!({ "text": "Test" }),
        json!({}),
        json!({ "text": "a".repeat(4000), "timestamp": now_millis() }),
    ];
    for body in invalid_bodies {
        let res = client
            .post(format!("{}/schedule", address))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 400);
        let error = res.json::<Value>().await.unwrap();
        assert!(error["error"].is_string());
    }

    let res = client
        .post(format!("{}/schedule", address))
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 400);

    assert!(app.ctx.repos.reminders.find_all().await.is_empty());
}

#[actix_web::test]
async fn test_cancel_reminder() {
    let (app, sdk, _) = spawn_app().await;
    let reminder = sdk
        .reminder
        .create(CreateReminderInput {
            text: "Test".into(),
            timestamp: now_millis() + 1000 * 60,
        })
        .await
        .expect("Expected to create reminder")
        .item;
    assert!(app.ctx.timers.is_armed(&reminder.id));

    let res = sdk.reminder.cancel(&reminder.id).await.expect("Expected to cancel");
    assert!(res.success);
    assert!(!app.ctx.timers.is_armed(&reminder.id));
    // Cancelling again is fine and changes nothing
    assert!(sdk.reminder.cancel(&reminder.id).await.is_ok());

    let reminders = sdk.reminder.get_all().await.unwrap().0;
    assert_eq!(reminders[0].status, ReminderStatus::Cancelled);
}

#[actix_web::test]
async fn test_cancel_unknown_reminder() {
    let (_, sdk, address) = spawn_app().await;
    let err = sdk
        .reminder
        .cancel(&ID::default())
        .await
        .expect_err("Expected unknown reminder to not be found");
    assert_eq!(err.variant, APIErrorVariant::NotFound);
    assert!(!err.message.is_empty());

    let res = reqwest::Client::new()
        .delete(format!("{}/scheduled/not-an-id", address))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);
}
