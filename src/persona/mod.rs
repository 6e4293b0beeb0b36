// src/persona/mod.rs
// Fixed catalog of consulting doctors. Read-only; looked up by id.

mod catalog;

pub use catalog::DoctorProfile;
use catalog::{CARDIOLOGIST, DERMATOLOGIST, GENERAL, NEUROLOGIST, PEDIATRICIAN, PSYCHIATRIST};

/// The doctors a patient can ask to see. Every consultation starts with the
/// general practitioner; "see <specialty>" hands it to someone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoctorId {
    #[default]
    General,
    Cardiologist,
    Dermatologist,
    Neurologist,
    Pediatrician,
    Psychiatrist,
}

impl DoctorId {
    /// All catalog entries, in display order.
    pub const ALL: [DoctorId; 6] = [
        DoctorId::General,
        DoctorId::Cardiologist,
        DoctorId::Dermatologist,
        DoctorId::Neurologist,
        DoctorId::Pediatrician,
        DoctorId::Psychiatrist,
    ];

    /// Resolves a free-text lookup key to a catalog entry. Unknown keys
    /// resolve to nothing; callers decide what that means.
    pub fn lookup(key: &str) -> Option<DoctorId> {
        match key.trim().to_lowercase().as_str() {
            "general" => Some(DoctorId::General),
            "cardiologist" => Some(DoctorId::Cardiologist),
            "dermatologist" => Some(DoctorId::Dermatologist),
            "neurologist" => Some(DoctorId::Neurologist),
            "pediatrician" => Some(DoctorId::Pediatrician),
            "psychiatrist" => Some(DoctorId::Psychiatrist),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            DoctorId::General => "general",
            DoctorId::Cardiologist => "cardiologist",
            DoctorId::Dermatologist => "dermatologist",
            DoctorId::Neurologist => "neurologist",
            DoctorId::Pediatrician => "pediatrician",
            DoctorId::Psychiatrist => "psychiatrist",
        }
    }

    pub fn profile(&self) -> &'static DoctorProfile {
        match self {
            DoctorId::General => &GENERAL,
            DoctorId::Cardiologist => &CARDIOLOGIST,
            DoctorId::Dermatologist => &DERMATOLOGIST,
            DoctorId::Neurologist => &NEUROLOGIST,
            DoctorId::Pediatrician => &PEDIATRICIAN,
            DoctorId::Psychiatrist => &PSYCHIATRIST,
        }
    }
}

impl std::fmt::Display for DoctorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_and_trimmed() {
        assert_eq!(DoctorId::lookup("Cardiologist"), Some(DoctorId::Cardiologist));
        assert_eq!(DoctorId::lookup("  PSYCHIATRIST  "), Some(DoctorId::Psychiatrist));
    }

    #[test]
    fn unknown_keys_resolve_to_nothing() {
        assert_eq!(DoctorId::lookup("boguspecialty"), None);
        assert_eq!(DoctorId::lookup(""), None);
    }

    #[test]
    fn default_is_the_general_practitioner() {
        assert_eq!(DoctorId::default(), DoctorId::General);
    }

    #[test]
    fn every_entry_round_trips_through_its_key() {
        for doctor in DoctorId::ALL {
            assert_eq!(DoctorId::lookup(doctor.key()), Some(doctor));
            assert!(!doctor.profile().name.is_empty());
        }
    }
}
