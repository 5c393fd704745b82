pub mod mock;

use mood_journal::config::ReplyConfig;
use mood_journal::modules::journal::MoodTag;
use mood_journal::modules::reply::{FallbackTable, ReplyClient, ReplySource, GENERIC_FALLBACK};

use mock::{MockChatBackend, SequenceRandom};

fn client(backend: MockChatBackend, picks: &[usize]) -> ReplyClient {
    ReplyClient::new(Box::new(backend), ReplyConfig::default())
        .with_random(Box::new(SequenceRandom::new(picks)))
}

#[tokio::test]
async fn test_unreachable_backend_falls_back_to_tag_sentences() {
    let mut client = client(MockChatBackend::unreachable(), &[0, 1, 2]);
    let happy = FallbackTable::new().candidates(&MoodTag::Happy);

    for _ in 0..3 {
        let reply = client.get_reply("今天考試考好了", &MoodTag::parse("🌞 開心")).await;
        assert!(happy.contains(&reply.as_str()), "unexpected reply {}", reply);
    }
}

#[tokio::test]
async fn test_unknown_tag_falls_back_to_generic_sentence() {
    let mut client = client(MockChatBackend::unreachable(), &[2]);
    let reply = client.get_reply("隨便說說", &MoodTag::parse("xyz")).await;
    assert_eq!(reply, GENERIC_FALLBACK);
}

#[tokio::test]
async fn test_remote_reply_is_trimmed() {
    let mut client = client(MockChatBackend::replying("\n  我在這裡陪你。 \n"), &[]);
    let reply = client.get_reply("下雨了", &MoodTag::Sad).await;
    assert_eq!(reply, "我在這裡陪你。");
}

#[tokio::test]
async fn test_blank_remote_reply_uses_fallback() {
    let mut client = client(MockChatBackend::replying("   "), &[1]);
    let reply = client.get_reply("好煩", &MoodTag::Angry).await;
    assert_eq!(reply, FallbackTable::new().candidates(&MoodTag::Angry)[1]);
}

#[tokio::test]
async fn test_request_carries_model_temperature_and_tag() {
    let backend = MockChatBackend::replying("好的");
    let requests = backend.requests.clone();
    let mut client = client(backend, &[]);

    client.get_reply("有點迷惘", &MoodTag::Lost).await;

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.model, "gpt-3.5-turbo");
    assert_eq!(request.temperature, 0.8);
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, "system");
    assert!(request.messages[0].content.contains("😵 迷茫"));
    assert_eq!(request.messages[1].role, "user");
    assert_eq!(request.messages[1].content, "有點迷惘");
}

#[test]
fn test_request_wire_format() {
    let client = ReplyClient::new(Box::new(MockChatBackend::unreachable()), ReplyConfig::default());
    let request = client.build_request("hi", &MoodTag::Happy);
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["model"], "gpt-3.5-turbo");
    assert_eq!(json["messages"][1], serde_json::json!({ "role": "user", "content": "hi" }));
    assert!((json["temperature"].as_f64().unwrap() - 0.8).abs() < 1e-6);
}
