//! Command dispatch for the consultation page.
//!
//! Evaluation order on the trimmed query: validation, "clear chat",
//! "see <specialty>", then everything else is a patient message. Empty input
//! renders current state without mutation.

pub mod prompt;
pub mod validate;

use crate::error::AppError;
use crate::llm;
use crate::persona::DoctorId;
use crate::session::Message;
use crate::state::AppState;

/// Exact command that wipes the consultation.
const CLEAR_COMMAND: &str = "clear chat";
/// Prefix that hands the consultation to another doctor.
const SWITCH_PREFIX: &str = "see ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Empty query; nothing changed.
    Idle,
    /// History wiped, persona reset, session id regenerated.
    Cleared { new_session_id: String },
    /// Consultation handed to another doctor.
    Switched(DoctorId),
    /// "see <unknown>": deliberately neither an error nor a mutation.
    Ignored,
    /// Patient turn appended and answered.
    Answered,
}

pub async fn handle_query(
    state: &AppState,
    session_id: &str,
    raw: &str,
) -> Result<Dispatch, AppError> {
    let query = raw.trim();
    if query.is_empty() {
        return Ok(Dispatch::Idle);
    }

    validate::check(query)?;

    let normalized = query.to_lowercase();
    if normalized == CLEAR_COMMAND {
        let new_session_id = state.store.reset(session_id).await;
        tracing::info!("consultation cleared, session regenerated");
        return Ok(Dispatch::Cleared { new_session_id });
    }

    if let Some(key) = normalized.strip_prefix(SWITCH_PREFIX) {
        return Ok(match DoctorId::lookup(key) {
            Some(doctor) => {
                switch_doctor(state, session_id, doctor).await;
                Dispatch::Switched(doctor)
            }
            None => Dispatch::Ignored,
        });
    }

    consult(state, session_id, query).await?;
    Ok(Dispatch::Answered)
}

async fn switch_doctor(state: &AppState, session_id: &str, doctor: DoctorId) {
    state
        .store
        .mutate(session_id, |session| {
            session.active_doctor = doctor;
            let profile = doctor.profile();
            session.history.push(Message::system(format!(
                "{} ({}) has joined your consultation.",
                profile.name, profile.title
            )));
        })
        .await;
    tracing::info!("consultation handed to {}", doctor);
}

/// One patient turn: append the message, ask the active doctor's model for a
/// reply, append the reply. A failed completion leaves the already-appended
/// patient turn in place and surfaces a transient error; the next successful
/// turn simply continues from there.
async fn consult(state: &AppState, session_id: &str, query: &str) -> Result<(), AppError> {
    state
        .store
        .mutate(session_id, |session| {
            session.history.push(Message::patient(query));
        })
        .await;

    let session = state.store.get_or_create(session_id).await;
    let messages = prompt::build(&session);

    let reply = state.provider.complete(&messages).await?;
    let reply = llm::normalize_reply(&reply);

    let doctor = session.active_doctor;
    state
        .store
        .mutate(session_id, |session| {
            session.history.push(Message::doctor(doctor, reply));
        })
        .await;

    Ok(())
}
