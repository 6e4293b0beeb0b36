//! Prompt assembly for the completion collaborator.

use crate::llm::ChatMessage;
use crate::persona::DoctorProfile;
use crate::session::{Role, Session};

/// System instruction parameterized by the active doctor's profile. Scope is
/// constrained to healthcare; out-of-scope questions get redirected by the
/// model itself rather than filtered here.
pub fn system_instruction(profile: &DoctorProfile) -> String {
    format!(
        "You are {name}, {title} with {years} years of experience in {specialty}. {bio} \
         You are speaking with a patient in a virtual consultation. Only respond with \
         healthcare-related information within your scope of practice; if a question \
         falls outside it, say so and name the specialist who should take it. Keep \
         answers clear and calm, and remind the patient that a chat consultation does \
         not replace an in-person examination when that matters.",
        name = profile.name,
        title = profile.title,
        years = profile.years_experience,
        specialty = profile.specialty,
        bio = profile.bio,
    )
}

/// Maps the session into the ordered message list the completion API expects:
/// the system instruction first, then every non-system turn oldest to newest.
/// The just-appended patient turn therefore arrives as the final user message.
pub fn build(session: &Session) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(session.history.len() + 1);
    messages.push(ChatMessage::system(system_instruction(
        session.active_doctor.profile(),
    )));

    for entry in &session.history {
        match entry.role {
            Role::Patient => messages.push(ChatMessage::user(entry.body.clone())),
            Role::Doctor => messages.push(ChatMessage::assistant(entry.body.clone())),
            // Local notices never reach the model.
            Role::System => {}
        }
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatRole;
    use crate::persona::DoctorId;
    use crate::session::Message;

    fn session_with_history() -> Session {
        let mut session = Session {
            id: "s1".to_string(),
            active_doctor: DoctorId::Cardiologist,
            history: Vec::new(),
            consultation_start: chrono::Utc::now(),
        };
        session.history.push(Message::patient("my chest hurts"));
        session.history.push(Message::doctor(DoctorId::Cardiologist, "tell me more"));
        session.history.push(Message::system("Dr. Vasquez has joined"));
        session.history.push(Message::patient("when I climb stairs"));
        session
    }

    #[test]
    fn system_instruction_carries_the_profile_fields() {
        let text = system_instruction(DoctorId::Cardiologist.profile());
        assert!(text.contains("Dr. Elena Vasquez"));
        assert!(text.contains("Cardiologist"));
        assert!(text.contains("18 years"));
    }

    #[test]
    fn build_orders_turns_and_drops_system_notices() {
        let messages = build(&session_with_history());

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[1].content, "my chest hurts");
        assert_eq!(messages[2].role, ChatRole::Assistant);
        assert_eq!(messages[3].role, ChatRole::User);
        assert_eq!(messages[3].content, "when I climb stairs");
    }
}
