//! End-to-end tests of the clarification handler against scripted LLM
//! completions.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use clarichat::{ChatReply, CompletionClient, DomainError, HandleChatUseCase, Message};

/// Scripted completion client: pops classifier/answer completions in order
/// and counts the calls made on each path.
struct ScriptedCompletion {
    completions: Mutex<Vec<Result<String, DomainError>>>,
    json_calls: Mutex<usize>,
    prose_calls: Mutex<usize>,
}

impl ScriptedCompletion {
    fn new(completions: Vec<Result<String, DomainError>>) -> Arc<Self> {
        Arc::new(Self {
            completions: Mutex::new(completions),
            json_calls: Mutex::new(0),
            prose_calls: Mutex::new(0),
        })
    }

    fn json_calls(&self) -> usize {
        *self.json_calls.lock().unwrap()
    }

    fn prose_calls(&self) -> usize {
        *self.prose_calls.lock().unwrap()
    }

    fn pop(&self) -> Result<String, DomainError> {
        self.completions.lock().unwrap().remove(0)
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(&self, _system: &str, _messages: &[Message]) -> Result<String, DomainError> {
        *self.prose_calls.lock().unwrap() += 1;
        self.pop()
    }

    async fn complete_json(
        &self,
        _system: &str,
        _messages: &[Message],
    ) -> Result<String, DomainError> {
        *self.json_calls.lock().unwrap() += 1;
        self.pop()
    }
}

fn use_case(client: &Arc<ScriptedCompletion>) -> HandleChatUseCase {
    HandleChatUseCase::new(Some(client.clone() as Arc<dyn CompletionClient>))
}

fn trip_request() -> Vec<Message> {
    vec![Message::user("Plan a trip")]
}

#[tokio::test]
async fn ambiguous_message_returns_questions_without_answering() {
    let client = ScriptedCompletion::new(vec![Ok(
        r#"{"needs_clarification": true, "questions": [{"id": 1, "question": "Which destination?"}]}"#
            .to_string(),
    )]);
    let reply = use_case(&client).execute(&trip_request()).await.unwrap();

    let ChatReply::Clarification(questions) = reply else {
        panic!("expected a clarification round");
    };
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].id, 1);
    assert_eq!(questions[0].question, "Which destination?");
    assert_eq!(questions[0].category, "general");

    // The answer call must not have been made.
    assert_eq!(client.json_calls(), 1);
    assert_eq!(client.prose_calls(), 0);
}

#[tokio::test]
async fn unambiguous_message_gets_a_direct_answer() {
    let client = ScriptedCompletion::new(vec![
        Ok(r#"{"needs_clarification": false, "questions": []}"#.to_string()),
        Ok("Here is a plan.".to_string()),
    ]);
    let reply = use_case(&client).execute(&trip_request()).await.unwrap();

    assert_eq!(reply, ChatReply::Answer("Here is a plan.".to_string()));
    assert_eq!(client.json_calls(), 1);
    assert_eq!(client.prose_calls(), 1);
}

#[tokio::test]
async fn true_flag_with_no_questions_falls_back_to_answer() {
    let client = ScriptedCompletion::new(vec![
        Ok(r#"{"needs_clarification": true, "questions": []}"#.to_string()),
        Ok("Answering anyway.".to_string()),
    ]);
    let reply = use_case(&client).execute(&trip_request()).await.unwrap();

    assert!(reply.is_answer());
    assert_eq!(client.prose_calls(), 1);
}

#[tokio::test]
async fn unparseable_classifier_output_falls_back_to_answer() {
    let client = ScriptedCompletion::new(vec![
        Ok("I think you should clarify, maybe?".to_string()),
        Ok("Best-effort answer.".to_string()),
    ]);
    let reply = use_case(&client).execute(&trip_request()).await.unwrap();

    assert_eq!(reply, ChatReply::Answer("Best-effort answer.".to_string()));
}

#[tokio::test]
async fn empty_messages_are_rejected_before_any_call() {
    let client = ScriptedCompletion::new(vec![]);
    let err = use_case(&client).execute(&[]).await.unwrap_err();

    assert!(err.is_invalid_request());
    assert_eq!(err.status_code(), 400);
    assert_eq!(client.json_calls() + client.prose_calls(), 0);
}

#[tokio::test]
async fn missing_credential_is_rejected_before_any_call() {
    let use_case = HandleChatUseCase::new(None);
    let err = use_case.execute(&trip_request()).await.unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(err.status_code(), 500);
    assert_eq!(err.to_string(), "OpenAI API key is not configured");
}

#[tokio::test]
async fn classifier_call_failure_propagates() {
    let client = ScriptedCompletion::new(vec![Err(DomainError::upstream(
        Some(429),
        "rate limited",
    ))]);
    let err = use_case(&client).execute(&trip_request()).await.unwrap_err();

    assert!(err.is_upstream());
    assert_eq!(err.status_code(), 429);
    assert_eq!(client.prose_calls(), 0);
}

#[tokio::test]
async fn answer_call_failure_propagates() {
    let client = ScriptedCompletion::new(vec![
        Ok(r#"{"needs_clarification": false, "questions": []}"#.to_string()),
        Err(DomainError::upstream(None, "connection reset")),
    ]);
    let err = use_case(&client).execute(&trip_request()).await.unwrap_err();

    assert!(err.is_upstream());
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn reply_is_always_exactly_one_shape() {
    let scripts = [
        vec![Ok(
            r#"{"needs_clarification": true, "questions": [{"question": "When?"}]}"#.to_string(),
        )],
        vec![
            Ok(r#"{"needs_clarification": false, "questions": []}"#.to_string()),
            Ok("answer".to_string()),
        ],
    ];

    for script in scripts {
        let client = ScriptedCompletion::new(script);
        let reply = use_case(&client).execute(&trip_request()).await.unwrap();
        assert!(reply.is_clarification() ^ reply.is_answer());
    }
}
