//! Scam Detective quiz rules.

use super::state::{Answer, AnswerOutcome, QuestionKind, QuizState, Rank, STARTING_LIVES};

/// Answer the current question.
///
/// Returns `None` (and changes nothing) when the quiz is over, when the
/// answer does not fit the question, or when a choice index is out of range.
pub fn answer(state: &mut QuizState, given: Answer) -> Option<AnswerOutcome> {
    let question = state.current()?;

    let correct = match (question.kind, given) {
        (QuestionKind::Binary { correct }, Answer::YesNo(yes)) => yes == correct,
        (
            QuestionKind::Single {
                options,
                correct_index,
            },
            Answer::Choice(i),
        ) if i < options.len() => i == correct_index,
        _ => return None,
    };

    let points = if correct {
        let pts = question.points();
        state.score += pts;
        pts
    } else {
        state.lives = state.lives.saturating_sub(1);
        0
    };

    let outcome = AnswerOutcome {
        correct,
        points,
        explanation: question.explanation,
    };
    state.last_feedback = Some(outcome.clone());
    state.feedback_flash = 10;
    advance(state);
    Some(outcome)
}

/// Move to the next question, or finish.
fn advance(state: &mut QuizState) {
    if state.lives == 0 || state.index + 1 >= state.questions.len() {
        state.finished = true;
        if state.score > state.best {
            state.best = state.score;
        }
        return;
    }
    state.index += 1;
}

pub fn rank(score: u32) -> Rank {
    if score >= 100 {
        Rank::SuperAgent
    } else if score >= 70 {
        Rank::Agent
    } else {
        Rank::Rookie
    }
}

/// Share of questions already behind the player, 0..=100.
pub fn progress_percent(state: &QuizState) -> u32 {
    if state.finished || state.questions.is_empty() {
        return 100;
    }
    let pct = state.index as f64 / state.questions.len() as f64 * 100.0;
    pct.round() as u32
}

/// Start over from the first question. The best score is kept.
pub fn reset(state: &mut QuizState) {
    state.index = 0;
    state.score = 0;
    state.lives = STARTING_LIVES;
    state.finished = state.questions.is_empty();
    state.last_feedback = None;
    state.feedback_flash = 0;
}

pub fn tick(state: &mut QuizState, delta_ticks: u32) {
    state.feedback_flash = state.feedback_flash.saturating_sub(delta_ticks);
}

/// The right answer to the current question.
#[cfg(test)]
pub fn correct_answer(state: &QuizState) -> Option<Answer> {
    state.current().map(|q| match q.kind {
        QuestionKind::Binary { correct } => Answer::YesNo(correct),
        QuestionKind::Single { correct_index, .. } => Answer::Choice(correct_index),
    })
}

/// A wrong answer to the current question.
#[cfg(test)]
pub fn wrong_answer(state: &QuizState) -> Option<Answer> {
    state.current().map(|q| match q.kind {
        QuestionKind::Binary { correct } => Answer::YesNo(!correct),
        QuestionKind::Single { correct_index, .. } => Answer::Choice((correct_index + 1) % 2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::detective::questions::QUESTIONS;

    fn quiz() -> QuizState {
        QuizState::new(QUESTIONS)
    }

    #[test]
    fn all_correct_scores_115_with_full_lives() {
        let mut s = quiz();
        while let Some(a) = correct_answer(&s) {
            assert!(answer(&mut s, a).unwrap().correct);
        }
        assert!(s.finished);
        assert_eq!(s.score, 115);
        assert_eq!(s.lives, 3);
        assert_eq!(s.best, 115);
        assert_eq!(rank(s.score), Rank::SuperAgent);
    }

    #[test]
    fn three_mistakes_end_the_quiz() {
        let mut s = quiz();
        for _ in 0..3 {
            let a = wrong_answer(&s).unwrap();
            let outcome = answer(&mut s, a).unwrap();
            assert!(!outcome.correct);
            assert_eq!(outcome.points, 0);
            assert!(!outcome.explanation.is_empty());
        }
        assert!(s.finished);
        assert_eq!(s.lives, 0);
        assert_eq!(s.index, 2);
        assert_eq!(s.best, 0);
    }

    #[test]
    fn answers_after_finish_are_ignored() {
        let mut s = quiz();
        s.finished = true;
        assert_eq!(answer(&mut s, Answer::YesNo(true)), None);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn mismatched_answer_kind_is_ignored() {
        let mut s = quiz();
        // First question is yes/no.
        assert_eq!(answer(&mut s, Answer::Choice(0)), None);
        assert_eq!(s.index, 0);
        assert_eq!(s.lives, 3);

        s.index = 2; // single choice
        assert_eq!(answer(&mut s, Answer::YesNo(true)), None);
        assert_eq!(answer(&mut s, Answer::Choice(7)), None);
        assert_eq!(s.index, 2);
    }

    #[test]
    fn correct_single_choice_gives_its_points() {
        let mut s = quiz();
        s.index = 2;
        let outcome = answer(&mut s, Answer::Choice(1)).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.points, 15);
        assert_eq!(s.score, 15);
        assert_eq!(s.index, 3);
    }

    #[test]
    fn best_only_rises() {
        let mut s = quiz();
        s.best = 90;
        for _ in 0..3 {
            let a = wrong_answer(&s).unwrap();
            answer(&mut s, a);
        }
        assert_eq!(s.best, 90);
    }

    #[test]
    fn rank_thresholds() {
        assert_eq!(rank(0), Rank::Rookie);
        assert_eq!(rank(69), Rank::Rookie);
        assert_eq!(rank(70), Rank::Agent);
        assert_eq!(rank(99), Rank::Agent);
        assert_eq!(rank(100), Rank::SuperAgent);
    }

    #[test]
    fn progress_tracks_index() {
        let mut s = quiz();
        assert_eq!(progress_percent(&s), 0);
        s.index = 3;
        assert_eq!(progress_percent(&s), 30);
        s.finished = true;
        assert_eq!(progress_percent(&s), 100);
    }

    #[test]
    fn reset_keeps_best() {
        let mut s = quiz();
        while let Some(a) = correct_answer(&s) {
            answer(&mut s, a);
        }
        reset(&mut s);
        assert_eq!(s.index, 0);
        assert_eq!(s.score, 0);
        assert_eq!(s.lives, 3);
        assert!(!s.finished);
        assert_eq!(s.last_feedback, None);
        assert_eq!(s.best, 115);
    }

    #[test]
    fn tick_fades_feedback() {
        let mut s = quiz();
        let a = correct_answer(&s).unwrap();
        answer(&mut s, a);
        assert!(s.feedback_flash > 0);
        tick(&mut s, 100);
        assert_eq!(s.feedback_flash, 0);
        assert!(s.last_feedback.is_some());
    }
}
