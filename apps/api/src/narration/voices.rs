//! Narakeet voice recommendations per language and gender.
//!
//! Table order matters: the first entry of each list is the deterministic
//! default when the caller names no voice. Sanskrit reuses the Hindi voice
//! family (read slower, see the speed cap in the orchestrator).

use crate::narration::models::Gender;
use crate::verses::models::LangCode;

const EN_MALE: &[&str] = &["ravi", "dev", "rajesh", "manish", "himesh"];
const EN_FEMALE: &[&str] = &["anushka", "deepika", "neerja", "pooja", "vidya"];

const HI_MALE: &[&str] = &["amitabh", "sanjay", "ranbir", "varun", "sunil"];
const HI_FEMALE: &[&str] = &["madhuri", "kareena", "rashmi", "janhvi", "shreya"];

const SA_MALE: &[&str] = &["amitabh", "sanjay", "ranbir"];
const SA_FEMALE: &[&str] = &["madhuri", "kareena", "rashmi"];

const GU_MALE: &[&str] = &["dhruv", "jigar", "parth"];
const GU_FEMALE: &[&str] = &["diya", "charmi", "krupa"];

/// All recommended voices for a language/gender pair.
pub fn voices_for(lang: LangCode, gender: Gender) -> &'static [&'static str] {
    match (lang, gender) {
        (LangCode::En, Gender::Male) => EN_MALE,
        (LangCode::En, Gender::Female) => EN_FEMALE,
        (LangCode::Hi, Gender::Male) => HI_MALE,
        (LangCode::Hi, Gender::Female) => HI_FEMALE,
        (LangCode::Sa, Gender::Male) => SA_MALE,
        (LangCode::Sa, Gender::Female) => SA_FEMALE,
        (LangCode::Gu, Gender::Male) => GU_MALE,
        (LangCode::Gu, Gender::Female) => GU_FEMALE,
    }
}

/// The default voice used when no override is given. Every table is
/// non-empty, so indexing the first entry cannot fail.
pub fn recommended_voice(lang: LangCode, gender: Gender) -> &'static str {
    voices_for(lang, gender)[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommended_voice_is_first_table_entry() {
        assert_eq!(recommended_voice(LangCode::En, Gender::Male), "ravi");
        assert_eq!(recommended_voice(LangCode::En, Gender::Female), "anushka");
        assert_eq!(recommended_voice(LangCode::Hi, Gender::Male), "amitabh");
        assert_eq!(recommended_voice(LangCode::Gu, Gender::Female), "diya");
    }

    #[test]
    fn test_sanskrit_voices_are_a_subset_of_hindi() {
        for voice in voices_for(LangCode::Sa, Gender::Male) {
            assert!(voices_for(LangCode::Hi, Gender::Male).contains(voice));
        }
        for voice in voices_for(LangCode::Sa, Gender::Female) {
            assert!(voices_for(LangCode::Hi, Gender::Female).contains(voice));
        }
    }

    #[test]
    fn test_every_pair_has_voices() {
        for lang in LangCode::ALL {
            for gender in [Gender::Male, Gender::Female] {
                assert!(!voices_for(lang, gender).is_empty());
            }
        }
    }
}
