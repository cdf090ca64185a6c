//! @ai:module:intent Statistical aggregation over round results
//! @ai:module:layer domain
//! @ai:module:public_api average_final_amount, average_correctness_percentage, million_wins
//! @ai:module:stateless true

use crate::ladder::{PrizeLadder, ZERO_AMOUNT};
use crate::results::types::RoundResult;

/// @ai:intent Mean winnings over all rounds, formatted as a Euro label
/// @ai:effects pure
///
/// Unknown amount labels count as zero rather than failing the aggregate.
pub fn average_final_amount(rounds: &[RoundResult]) -> String {
    if rounds.is_empty() {
        return ZERO_AMOUNT.to_string();
    }

    let total: u64 = rounds
        .iter()
        .map(|round| PrizeLadder::value_of_label(&round.final_amount).unwrap_or(0))
        .sum();

    format_euro(total as f64 / rounds.len() as f64)
}

/// @ai:intent Correct answers over questions attempted, as a percentage
/// @ai:effects pure
///
/// Rounded to two decimals. The attempted count per round includes the one
/// wrongly answered question that ended it (see RoundResult).
pub fn average_correctness_percentage(rounds: &[RoundResult]) -> f64 {
    let total_correct: u32 = rounds.iter().map(|round| round.correct_answers).sum();
    let total_attempted: u32 = rounds.iter().map(|round| round.questions_attempted()).sum();

    if total_attempted == 0 {
        return 0.0;
    }

    let percentage = total_correct as f64 / total_attempted as f64 * 100.0;
    (percentage * 100.0).round_ties_even() / 100.0
}

/// @ai:intent Count of rounds that cleared the full ladder
/// @ai:effects pure
pub fn million_wins(rounds: &[RoundResult]) -> u32 {
    rounds.iter().filter(|round| round.is_million_win()).count() as u32
}

/// @ai:intent Format a Euro amount with German-style thousands grouping
/// @ai:effects pure
///
/// Means of a million or more keep one decimal digit; four to six figure
/// means round to whole Euros; anything below a thousand truncates.
fn format_euro(average: f64) -> String {
    if average >= 1_000_000.0 {
        let tenths = (average * 10.0).round_ties_even();
        let whole = (tenths / 10.0).trunc() as u64;
        let decimal = (tenths as u64) % 10;
        format!("{}.{decimal}€", group_thousands(whole))
    } else if average >= 1000.0 {
        format!("{}€", group_thousands(average.round_ties_even() as u64))
    } else {
        format!("{}€", average as u64)
    }
}

/// @ai:intent Insert a dot between every three digits from the right
/// @ai:effects pure
fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    grouped
}
