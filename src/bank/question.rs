//! @ai:module:intent Question records for the quiz ladder
//! @ai:module:layer domain
//! @ai:module:public_api Question, QuestionRecord
//! @ai:module:stateless true

use crate::answer::ParsedAnswer;

/// Raw record from the question file:
/// [question, option A, option B, option C, option D, correct answer].
pub type QuestionRecord = [String; 6];

/// @ai:intent One multiple-choice question with its ground-truth answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub options: [String; 4],
    /// Ground truth as the full option text, not a letter.
    pub correct: String,
}

impl Question {
    /// @ai:intent Format the question with lettered options as the model prompt
    /// @ai:effects pure
    pub fn prompt(&self) -> String {
        format!(
            "{}\nA: {}\nB: {}\nC: {}\nD: {}",
            self.text, self.options[0], self.options[1], self.options[2], self.options[3]
        )
    }

    /// @ai:intent Letter of the option slot holding the ground-truth text
    /// @ai:effects pure
    ///
    /// None means the record is internally inconsistent (data error).
    pub fn correct_choice(&self) -> Option<ParsedAnswer> {
        let index = self.options.iter().position(|option| *option == self.correct)?;
        Some(match index {
            0 => ParsedAnswer::A,
            1 => ParsedAnswer::B,
            2 => ParsedAnswer::C,
            _ => ParsedAnswer::D,
        })
    }
}

impl From<QuestionRecord> for Question {
    fn from(record: QuestionRecord) -> Self {
        let [text, a, b, c, d, correct] = record;
        Question {
            text,
            options: [a, b, c, d],
            correct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn question(correct: &str) -> Question {
        Question {
            text: "Which planet is known as the red planet?".to_string(),
            options: [
                "Venus".to_string(),
                "Mars".to_string(),
                "Jupiter".to_string(),
                "Saturn".to_string(),
            ],
            correct: correct.to_string(),
        }
    }

    #[test]
    fn test_prompt_format() {
        let q = question("Mars");
        assert_eq!(
            q.prompt(),
            "Which planet is known as the red planet?\nA: Venus\nB: Mars\nC: Jupiter\nD: Saturn"
        );
    }

    #[test]
    fn test_correct_choice_maps_to_letter() {
        assert_eq!(question("Venus").correct_choice(), Some(ParsedAnswer::A));
        assert_eq!(question("Mars").correct_choice(), Some(ParsedAnswer::B));
        assert_eq!(question("Saturn").correct_choice(), Some(ParsedAnswer::D));
    }

    #[test]
    fn test_correct_choice_detects_data_error() {
        assert_eq!(question("Pluto").correct_choice(), None);
    }

    #[test]
    fn test_from_record() {
        let record: QuestionRecord = [
            "Q".to_string(),
            "a1".to_string(),
            "a2".to_string(),
            "a3".to_string(),
            "a4".to_string(),
            "a3".to_string(),
        ];
        let q = Question::from(record);
        assert_eq!(q.text, "Q");
        assert_eq!(q.correct_choice(), Some(ParsedAnswer::C));
    }
}
