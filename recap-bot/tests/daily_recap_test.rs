mod common;

use channel_history::InMemoryHistoryClient;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use common::{fixture, item, MockBot, ScriptedLlm};
use recap_bot::{DailyRecapJob, PreferenceStore, RecapSettings};

async fn history() -> InMemoryHistoryClient {
    let client = InMemoryHistoryClient::new();
    let items = (1..=6)
        .map(|i| {
            item(
                i,
                Utc.with_ymd_and_hms(2024, 1, i as u32, 12, 0, 0).unwrap(),
                &format!("post {i}"),
            )
        })
        .collect();
    client.insert_channel(500, "daily", items).await;
    client
}

fn nine_am() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap()
}

#[tokio::test]
async fn test_next_run_is_today_or_tomorrow() {
    let fx = fixture(history().await, ScriptedLlm::answering(""), RecapSettings::default());
    let job = DailyRecapJob::new(MockBot::new(), fx.service, nine_am());

    let early = Utc.with_ymd_and_hms(2024, 1, 5, 8, 30, 0).unwrap();
    assert_eq!(
        job.next_run_after(early),
        Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap()
    );

    let exactly = Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap();
    assert_eq!(
        job.next_run_after(exactly),
        Utc.with_ymd_and_hms(2024, 1, 6, 9, 0, 0).unwrap()
    );

    let late = Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap();
    assert_eq!(
        job.next_run_after(late),
        Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn test_run_once_sends_to_users_with_a_channel() {
    let fx = fixture(history().await, ScriptedLlm::answering(""), RecapSettings::default());
    fx.preferences.set_channel(1, "@daily".into()).await.unwrap();
    fx.preferences.set_channel(2, "@daily".into()).await.unwrap();
    fx.preferences.set_topic(2, "weather".into()).await.unwrap();
    // topic without a channel gets nothing
    fx.preferences.set_topic(3, "rust".into()).await.unwrap();

    let bot = MockBot::new();
    let job = DailyRecapJob::new(bot.clone(), fx.service, nine_am());
    let delivered = job
        .run_once(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        .await;

    assert_eq!(delivered, 2);
    let sent = bot.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].chat_id, 1);
    assert_eq!(
        sent[0].text,
        "Daily recap for @daily:\n\n1. [2024-01-05 12:00] post 5"
    );
    assert_eq!(sent[1].chat_id, 2);
    assert_eq!(
        sent[1].text,
        "No messages related to 'weather' were found today in @daily."
    );
}

#[tokio::test]
async fn test_run_once_continues_after_a_failed_send() {
    let fx = fixture(history().await, ScriptedLlm::answering(""), RecapSettings::default());
    for user in [10, 20, 30] {
        fx.preferences.set_channel(user, "@daily".into()).await.unwrap();
    }

    let bot = MockBot::new();
    bot.fail_for_chat(20);
    let job = DailyRecapJob::new(bot.clone(), fx.service, nine_am());
    let delivered = job
        .run_once(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
        .await;

    assert_eq!(delivered, 2);
    let chats: Vec<i64> = bot.sent().iter().map(|s| s.chat_id).collect();
    assert_eq!(chats, vec![10, 30]);
    assert!(bot
        .texts()
        .iter()
        .all(|t| t == "No messages found today in @daily."));
}
