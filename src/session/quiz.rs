use rand::Rng;

use crate::{
    catalog::{StudyItem, Topic},
    filter::{filter_items, SessionFilter},
    random::IntoIterShuffled,
};

use super::SessionError;

pub const OPTIONS_PER_QUESTION: usize = 4;

///One rendered answer choice. Carries the id of the item it was built from
///so correctness is decided by identity, not display text: two pool items
///may legitimately share a name, and a string search would then award the
///wrong option.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AnswerOption {
    item_id: String,
    name: String,
}

impl AnswerOption {
    fn of(item: &StudyItem) -> Self {
        Self {
            item_id: item.id.clone(),
            name: item.name.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }
}

///A synthesized multiple-choice question: the prompted item, four options
///(three distractors plus the item's own name), and the post-shuffle
///position of the correct option.
#[derive(Clone, Debug)]
pub struct QuizQuestion {
    item: StudyItem,
    options: Vec<AnswerOption>,
    correct_index: usize,
}

impl QuizQuestion {
    pub fn item(&self) -> &StudyItem {
        &self.item
    }

    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }
}

///Derives the filtered pool and synthesizes `question_count` questions.
///
///Fails with `InsufficientPool` when fewer than four items match; a count
///larger than the pool is clamped to the pool size. Pure function of its
///inputs and the supplied generator.
pub fn build_quiz(
    items: &[StudyItem],
    topics: &[Topic],
    filter: &SessionFilter,
    question_count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<QuizQuestion>, SessionError> {
    assert!(
        question_count > 0,
        "question_count must be positive, given: {question_count}"
    );

    let pool = filter_items(items, topics, filter);

    if pool.len() < OPTIONS_PER_QUESTION {
        return Err(SessionError::InsufficientPool {
            have: pool.len(),
            need: OPTIONS_PER_QUESTION,
        });
    }

    let count = question_count.min(pool.len());

    let prompts = pool
        .clone()
        .into_iter_shuffled(rng)
        .take(count)
        .collect::<Vec<_>>();

    prompts
        .into_iter()
        .map(|item| build_question(&pool, item, rng))
        .collect()
}

fn build_question(
    pool: &[StudyItem],
    item: StudyItem,
    rng: &mut impl Rng,
) -> Result<QuizQuestion, SessionError> {
    let others = pool
        .iter()
        .filter(|other| other.id != item.id)
        .collect::<Vec<_>>();

    //Checked per question, not just up front: a caller reusing the builder
    //against a shrunk pool must still fail cleanly here
    if others.len() < OPTIONS_PER_QUESTION - 1 {
        return Err(SessionError::InsufficientPool {
            have: others.len() + 1,
            need: OPTIONS_PER_QUESTION,
        });
    }

    let mut options = others
        .into_iter_shuffled(rng)
        .take(OPTIONS_PER_QUESTION - 1)
        .map(AnswerOption::of)
        .collect::<Vec<_>>();
    options.push(AnswerOption::of(&item));

    let options = options.into_iter_shuffled(rng).collect::<Vec<_>>();

    let correct_index = options
        .iter()
        .position(|option| option.item_id == item.id)
        .expect("Unable to find correct option after shuffling");

    Ok(QuizQuestion {
        item,
        options,
        correct_index,
    })
}

///The pre-session configuration a quiz run is started from. Restart is a
///full re-entry into the builder with the retained filter, never a rewind
///of a finished session.
#[derive(Clone, Debug)]
pub struct QuizConfig {
    pub filter: SessionFilter,
    pub question_count: usize,
}

impl QuizConfig {
    pub fn new(filter: SessionFilter, question_count: usize) -> Self {
        Self {
            filter,
            question_count,
        }
    }

    pub fn build(
        &self,
        items: &[StudyItem],
        topics: &[Topic],
        rng: &mut impl Rng,
    ) -> Result<QuizSession, SessionError> {
        build_quiz(items, topics, &self.filter, self.question_count, rng)
            .and_then(QuizSession::new)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    Awaiting,
    Revealed { selected: usize, correct: bool },
    Complete,
}

///Drives answering and scoring over a built question sequence.
///
///Phases move `Awaiting -> Revealed -> Awaiting` per question and end in
///`Complete` once `next` is called on the last revealed question. The score
///increments exactly once per question, at the first accepted answer.
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    index: usize,
    score: usize,
    phase: Phase,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyDeck);
        }

        Ok(Self {
            questions,
            index: 0,
            score: 0,
            phase: Phase::Awaiting,
        })
    }

    ///The question currently shown, or `None` once the session completed.
    pub fn current(&self) -> Option<&QuizQuestion> {
        match self.phase {
            Phase::Complete => None,
            _ => Some(&self.questions[self.index]),
        }
    }

    ///Accepts an answer for the current question and reports whether it was
    ///correct. Only valid while the question is unanswered.
    pub fn select_answer(&mut self, index: usize) -> Result<bool, SessionError> {
        match self.phase {
            Phase::Complete => Err(SessionError::SessionComplete),
            Phase::Revealed { .. } => Err(SessionError::AlreadyAnswered),
            Phase::Awaiting => {
                let len = self.questions[self.index].options.len();
                if index >= len {
                    return Err(SessionError::AnswerOutOfRange { index, len });
                }

                let correct = index == self.questions[self.index].correct_index;
                if correct {
                    self.score += 1;
                }
                self.phase = Phase::Revealed {
                    selected: index,
                    correct,
                };

                Ok(correct)
            }
        }
    }

    ///Moves on from a revealed question, completing the session when the
    ///last question has been answered.
    pub fn next(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Complete => Err(SessionError::SessionComplete),
            Phase::Awaiting => Err(SessionError::NotYetAnswered),
            Phase::Revealed { .. } => {
                if self.index + 1 < self.questions.len() {
                    self.index += 1;
                    self.phase = Phase::Awaiting;
                } else {
                    self.phase = Phase::Complete;
                }
                Ok(())
            }
        }
    }

    pub fn revealed(&self) -> Option<(usize, bool)> {
        match self.phase {
            Phase::Revealed { selected, correct } => Some((selected, correct)),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    ///One-based question number and total, for the progress gauge.
    pub fn progress(&self) -> (usize, usize) {
        (self.index + 1, self.questions.len())
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{
        catalog::ItemType,
        filter::SessionFilter,
        session::SessionError,
        test_support::{item, pool, topic},
    };

    use super::{build_quiz, QuizConfig, QuizSession, OPTIONS_PER_QUESTION};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn pool_of_five_count_three_yields_three_questions() {
        let (items, topics) = pool();
        let questions = build_quiz(&items, &topics, &SessionFilter::default(), 3, &mut rng())
            .expect("Unable to build quiz from five-item pool");

        assert_eq!(questions.len(), 3);
        for question in &questions {
            assert_eq!(question.options().len(), OPTIONS_PER_QUESTION);

            //The prompted item's name appears exactly once by identity
            let own = question
                .options()
                .iter()
                .filter(|option| option.item_id() == question.item().id)
                .count();
            assert_eq!(own, 1);
            assert_eq!(
                question.options()[question.correct_index()].name(),
                question.item().name
            );
        }
    }

    #[test]
    fn options_come_from_four_distinct_items() {
        let (items, topics) = pool();
        let questions = build_quiz(&items, &topics, &SessionFilter::default(), 5, &mut rng())
            .expect("Unable to build quiz");

        for question in &questions {
            let mut ids = question
                .options()
                .iter()
                .map(|option| option.item_id())
                .collect::<Vec<_>>();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), OPTIONS_PER_QUESTION);
        }
    }

    #[test]
    fn pool_of_three_fails_regardless_of_count() {
        let (items, topics) = pool();
        let result = build_quiz(&items[..3], &topics, &SessionFilter::default(), 5, &mut rng());
        assert_eq!(
            result.err(),
            Some(SessionError::InsufficientPool { have: 3, need: 4 })
        );
    }

    #[test]
    fn count_larger_than_pool_is_clamped() {
        let (items, topics) = pool();
        let questions = build_quiz(&items, &topics, &SessionFilter::default(), 50, &mut rng())
            .expect("Unable to build quiz");
        assert_eq!(questions.len(), items.len());
    }

    #[test]
    fn filters_apply_before_the_pool_check() {
        let (items, topics) = pool();
        let filter = SessionFilter::default().kind(ItemType::Medication);
        assert!(matches!(
            build_quiz(&items, &topics, &filter, 3, &mut rng()),
            Err(SessionError::InsufficientPool { have: 1, .. })
        ));
    }

    #[test]
    fn duplicate_display_names_resolve_by_identity() {
        let topics = vec![topic("tp-1", "ch-1", 0)];
        //Two distinct items sharing a display name; data-quality edge case
        let items = vec![
            item("a", "tp-1", ItemType::Medication, "Aspirin"),
            item("b", "tp-1", ItemType::Molecule, "Aspirin"),
            item("c", "tp-1", ItemType::Medication, "Ibuprofen"),
            item("d", "tp-1", ItemType::Medication, "Naproxen"),
        ];

        for seed in 0..50 {
            let questions = build_quiz(
                &items,
                &topics,
                &SessionFilter::default(),
                4,
                &mut StdRng::seed_from_u64(seed),
            )
            .expect("Unable to build quiz");

            for question in &questions {
                let correct = &question.options()[question.correct_index()];
                assert_eq!(correct.item_id(), question.item().id);
            }
        }
    }

    #[test]
    fn builder_is_deterministic_under_fixed_seed() {
        let (items, topics) = pool();
        let build = |seed: u64| {
            build_quiz(
                &items,
                &topics,
                &SessionFilter::default(),
                5,
                &mut StdRng::seed_from_u64(seed),
            )
            .expect("Unable to build quiz")
            .iter()
            .map(|q| q.item().id.clone())
            .collect::<Vec<_>>()
        };

        assert_eq!(build(9), build(9));
    }

    fn built_session() -> QuizSession {
        let (items, topics) = pool();
        QuizConfig::new(SessionFilter::default(), 5)
            .build(&items, &topics, &mut rng())
            .expect("Unable to build quiz session")
    }

    #[test]
    fn always_correct_run_scores_total() {
        let mut session = built_session();

        while let Some(question) = session.current() {
            let correct_index = question.correct_index();
            assert!(session
                .select_answer(correct_index)
                .expect("Unable to select answer"));
            session.next().expect("Unable to advance");
        }

        assert!(session.is_complete());
        assert_eq!(session.score(), session.total());
    }

    #[test]
    fn always_wrong_run_scores_zero() {
        let mut session = built_session();

        while let Some(question) = session.current() {
            let wrong_index = (question.correct_index() + 1) % OPTIONS_PER_QUESTION;
            assert!(!session
                .select_answer(wrong_index)
                .expect("Unable to select answer"));
            session.next().expect("Unable to advance");
        }

        assert!(session.is_complete());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn second_answer_is_rejected_and_does_not_rescore() {
        let mut session = built_session();
        let correct_index = session
            .current()
            .expect("Session unexpectedly complete")
            .correct_index();

        session
            .select_answer(correct_index)
            .expect("Unable to select answer");
        assert_eq!(session.score(), 1);

        assert_eq!(
            session.select_answer(correct_index),
            Err(SessionError::AlreadyAnswered)
        );
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn next_requires_an_answer() {
        let mut session = built_session();
        assert_eq!(session.next(), Err(SessionError::NotYetAnswered));
    }

    #[test]
    fn out_of_range_answer_is_rejected() {
        let mut session = built_session();
        assert_eq!(
            session.select_answer(OPTIONS_PER_QUESTION),
            Err(SessionError::AnswerOutOfRange {
                index: OPTIONS_PER_QUESTION,
                len: OPTIONS_PER_QUESTION
            })
        );
        //A rejected answer leaves the question unanswered
        assert!(session.revealed().is_none());
    }

    #[test]
    fn completed_session_rejects_further_calls() {
        let mut session = built_session();

        while let Some(question) = session.current() {
            let correct_index = question.correct_index();
            session
                .select_answer(correct_index)
                .expect("Unable to select answer");
            session.next().expect("Unable to advance");
        }

        assert_eq!(session.select_answer(0), Err(SessionError::SessionComplete));
        assert_eq!(session.next(), Err(SessionError::SessionComplete));
        assert!(session.current().is_none());
    }

    #[test]
    fn restart_rebuilds_from_retained_config() {
        let (items, topics) = pool();
        let config = QuizConfig::new(SessionFilter::default().chapter("ch-1"), 4);

        //ch-1 only has three items, so both the first start and the restart
        //report the same recoverable failure
        assert!(matches!(
            config.build(&items, &topics, &mut rng()),
            Err(SessionError::InsufficientPool { have: 3, .. })
        ));

        let config = QuizConfig::new(SessionFilter::default(), 4);
        let mut session = config
            .build(&items, &topics, &mut rng())
            .expect("Unable to build quiz session");

        while let Some(question) = session.current() {
            let correct_index = question.correct_index();
            session
                .select_answer(correct_index)
                .expect("Unable to select answer");
            session.next().expect("Unable to advance");
        }
        assert!(session.is_complete());

        let fresh = config
            .build(&items, &topics, &mut rng())
            .expect("Unable to rebuild quiz session");
        assert_eq!(fresh.score(), 0);
        assert!(!fresh.is_complete());
        assert_eq!(fresh.total(), 4);
    }

    #[test]
    fn score_never_exceeds_total() {
        for seed in 0..20 {
            let (items, topics) = pool();
            let mut session = QuizConfig::new(SessionFilter::default(), 5)
                .build(&items, &topics, &mut StdRng::seed_from_u64(seed))
                .expect("Unable to build quiz session");

            let mut pick = seed as usize;
            while session.current().is_some() {
                pick = (pick + 3) % OPTIONS_PER_QUESTION;
                session.select_answer(pick).expect("Unable to select answer");
                session.next().expect("Unable to advance");
            }

            assert!(session.score() <= session.total());
        }
    }
}
