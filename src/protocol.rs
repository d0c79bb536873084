//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{ChallengeSet, Evaluation, ItemSource};

pub const GENERAL_TIP: &str = "All answers should be based on the uploaded document content.";

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    UploadDocument {
        #[serde(rename = "fileName")]
        file_name: String,
        #[serde(default)]
        mime: String,
        #[serde(rename = "contentBase64")]
        content_base64: String,
    },
    Summarize,
    Ask {
        question: String,
    },
    GenerateChallenge,
    RegenerateChallenge,
    SubmitAnswers {
        answers: Vec<String>,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Session {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Document {
        document: DocumentOut,
    },
    Summary {
        summary: String,
    },
    Answer {
        answer: String,
        justification: String,
    },
    Challenge {
        challenge: ChallengeOut,
    },
    ChallengeCleared,
    Evaluation {
        results: Vec<ItemResultOut>,
        tip: String,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Serialize)]
pub struct DocumentOut {
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub chars: usize,
    pub preview: String,
}

/// Challenge item as shown to the user. The grounding snippet stays server-side
/// until answers are evaluated.
#[derive(Debug, Serialize)]
pub struct QuestionOut {
    pub index: usize,
    pub question: String,
    pub source: ItemSource,
}

/// DTO used by both WS and HTTP for challenge delivery.
#[derive(Debug, Serialize)]
pub struct ChallengeOut {
    pub id: String,
    pub questions: Vec<QuestionOut>,
}

/// Convert a challenge set (internal) to the public DTO.
pub fn to_out(set: &ChallengeSet) -> ChallengeOut {
    ChallengeOut {
        id: set.id.clone(),
        questions: set
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| QuestionOut {
                index,
                question: item.question.clone(),
                source: item.source.clone(),
            })
            .collect(),
    }
}

#[derive(Debug, Serialize)]
pub struct ItemResultOut {
    pub index: usize,
    pub question: String,
    pub answer: String,
    #[serde(flatten)]
    pub evaluation: Evaluation,
}

/// Pair each evaluation with its question and the answer text that was scored.
pub fn to_results_out(set: &ChallengeSet, answers: &[String], evaluations: Vec<Evaluation>) -> Vec<ItemResultOut> {
    set.items()
        .iter()
        .zip(evaluations)
        .enumerate()
        .map(|(index, (item, evaluation))| ItemResultOut {
            index,
            question: item.question.clone(),
            answer: answers.get(index).cloned().unwrap_or_default(),
            evaluation,
        })
        .collect()
}

//
// HTTP request/response DTOs
//

#[derive(Serialize)]
pub struct SessionOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AskIn {
    pub question: String,
}
#[derive(Serialize)]
pub struct AskOut {
    pub answer: String,
    pub justification: String,
}

#[derive(Serialize)]
pub struct SummaryOut {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswersIn {
    pub answers: Vec<String>,
}
#[derive(Serialize)]
pub struct EvaluationOut {
    pub results: Vec<ItemResultOut>,
    pub tip: String,
}

#[derive(Serialize)]
pub struct ClearedOut {
    pub cleared: bool,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
