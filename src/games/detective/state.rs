//! Scam Detective state definitions.

/// Points for a question that does not set its own.
pub const DEFAULT_POINTS: u32 = 10;
pub const STARTING_LIVES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Yes / no. `correct` is the right answer.
    Binary { correct: bool },
    /// Pick one of `options`.
    Single {
        options: &'static [&'static str],
        correct_index: usize,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: &'static str,
    pub title: &'static str,
    pub story: &'static str,
    pub question: &'static str,
    pub kind: QuestionKind,
    pub explanation: &'static str,
    pub points: Option<u32>,
}

impl Question {
    pub fn points(&self) -> u32 {
        self.points.unwrap_or(DEFAULT_POINTS)
    }
}

/// A player's answer to the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    YesNo(bool),
    Choice(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Points awarded (0 when wrong).
    pub points: u32,
    pub explanation: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Rookie,
    Agent,
    SuperAgent,
}

impl Rank {
    pub fn label(&self) -> &str {
        match self {
            Rank::Rookie => "Rookie",
            Rank::Agent => "Agent",
            Rank::SuperAgent => "Super Agent",
        }
    }
}

pub struct QuizState {
    pub questions: &'static [Question],
    /// Index of the question being asked.
    pub index: usize,
    pub score: u32,
    pub lives: u32,
    pub finished: bool,
    pub best: u32,
    /// Result of the most recent answer, shown above the next question.
    pub last_feedback: Option<AnswerOutcome>,
    /// Ticks remaining for the answer highlight.
    pub feedback_flash: u32,
}

impl QuizState {
    pub fn new(questions: &'static [Question]) -> Self {
        Self {
            questions,
            index: 0,
            score: 0,
            lives: STARTING_LIVES,
            finished: questions.is_empty(),
            best: 0,
            last_feedback: None,
            feedback_flash: 0,
        }
    }

    pub fn current(&self) -> Option<&'static Question> {
        if self.finished {
            None
        } else {
            self.questions.get(self.index)
        }
    }

    /// Highest score the quiz can award.
    pub fn max_score(&self) -> u32 {
        self.questions.iter().map(Question::points).sum()
    }
}
