use crate::catalog::Catalog;
use crate::domain::answers::{Answer, AnswerSet};
use crate::domain::plan::Plan;
use crate::engine::{DeterministicRecommendationEngine, RecommendationEngine};
use crate::errors::DomainError;
use crate::wizard::steps::{Step, STEP_SEQUENCE};

/// Linear, single-session wizard controller. Exactly one step is
/// current at a time; transitions move one step at a time, and the
/// jump from the last question into the result runs the engine
/// synchronously.
#[derive(Clone, Debug)]
pub struct Wizard<E = DeterministicRecommendationEngine> {
    engine: E,
    catalog: Catalog,
    current: usize,
    answers: AnswerSet,
    plan: Option<Plan>,
}

impl Wizard<DeterministicRecommendationEngine> {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_engine(DeterministicRecommendationEngine, catalog)
    }
}

impl<E> Wizard<E>
where
    E: RecommendationEngine,
{
    pub fn with_engine(engine: E, catalog: Catalog) -> Self {
        Self { engine, catalog, current: 0, answers: AnswerSet::default(), plan: None }
    }

    pub fn current_step(&self) -> Step {
        STEP_SEQUENCE[self.current]
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Computed plan, present only after the wizard reached the result
    /// step. Replaced wholesale on every recomputation.
    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    /// Stores one answer. Never fails: an invalid value (such as a
    /// non-positive area) is kept and surfaces as `can_go_next` being
    /// false for its step.
    pub fn set_answer(&mut self, answer: Answer) {
        self.answers.apply(answer);
    }

    pub fn can_go_next(&self) -> bool {
        match self.current_step() {
            Step::Welcome => true,
            Step::Area => self.answers.has_valid_area(),
            Step::Implanting => self.answers.implanting.is_some(),
            Step::Objective => self.answers.objective.is_some(),
            Step::Climate => self.answers.climate.is_some(),
            Step::Sunlight => self.answers.sunlight.is_some(),
            Step::Irrigation => self.answers.irrigation.is_some(),
            Step::Traffic => self.answers.traffic.is_some(),
            Step::Condition => self.answers.condition.is_some(),
            Step::Result => false,
        }
    }

    pub fn can_go_prev(&self) -> bool {
        self.current > 0
    }

    /// Advances one step when the current step allows it; a blocked
    /// step is a no-op, not an error. Leaving the last question step
    /// computes the plan; only a catalog gap can fail here.
    pub fn next_step(&mut self) -> Result<Step, DomainError> {
        if !self.can_go_next() {
            return Ok(self.current_step());
        }

        if self.current_step() == Step::last_question() {
            let completed = self.answers.complete()?;
            let plan = self.engine.recommend(&completed, &self.catalog)?;
            self.plan = Some(plan);
        }

        self.current += 1;
        Ok(self.current_step())
    }

    pub fn prev_step(&mut self) -> Step {
        if self.can_go_prev() {
            self.current -= 1;
        }
        self.current_step()
    }

    /// Clears the session back to its initial state.
    pub fn reset(&mut self) {
        self.current = 0;
        self.answers = AnswerSet::default();
        self.plan = None;
    }

    pub fn progress(&self) -> u8 {
        self.current_step().progress_percent()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::Wizard;
    use crate::catalog::default_catalog;
    use crate::domain::answers::{
        Answer, Climate, Condition, Irrigation, Objective, Sunlight, Traffic,
    };
    use crate::wizard::steps::Step;

    fn answer_for(step: Step) -> Option<Answer> {
        match step {
            Step::Area => Some(Answer::Area(Decimal::from(60))),
            Step::Implanting => Some(Answer::Implanting(false)),
            Step::Objective => Some(Answer::Objective(Objective::GreenVigor)),
            Step::Climate => Some(Answer::Climate(Climate::Mild)),
            Step::Sunlight => Some(Answer::Sunlight(Sunlight::FullSun)),
            Step::Irrigation => Some(Answer::Irrigation(Irrigation::ThreeTimesAWeek)),
            Step::Traffic => Some(Answer::Traffic(Traffic::Medium)),
            Step::Condition => Some(Answer::Condition(Condition::Lush)),
            Step::Welcome | Step::Result => None,
        }
    }

    fn walk_to_result(wizard: &mut Wizard) {
        while wizard.current_step() != Step::Result {
            if let Some(answer) = answer_for(wizard.current_step()) {
                wizard.set_answer(answer);
            }
            wizard.next_step().expect("valid session must advance");
        }
    }

    #[test]
    fn welcome_advances_without_any_answer() {
        let mut wizard = Wizard::new(default_catalog());
        assert_eq!(wizard.current_step(), Step::Welcome);
        assert!(wizard.can_go_next());

        let step = wizard.next_step().expect("welcome advances freely");
        assert_eq!(step, Step::Area);
    }

    #[test]
    fn area_gate_requires_strictly_positive_area() {
        let mut wizard = Wizard::new(default_catalog());
        wizard.next_step().expect("enter area step");

        for blocked in [Decimal::ZERO, Decimal::from(-5)] {
            wizard.set_answer(Answer::Area(blocked));
            assert!(!wizard.can_go_next(), "area {blocked} must block");
            let step = wizard.next_step().expect("blocked advance is a no-op");
            assert_eq!(step, Step::Area);
        }

        wizard.set_answer(Answer::Area(Decimal::from(60)));
        assert!(wizard.can_go_next());
        assert_eq!(wizard.next_step().expect("valid area advances"), Step::Implanting);
    }

    #[test]
    fn unanswered_choice_steps_block_advancement() {
        let mut wizard = Wizard::new(default_catalog());
        wizard.next_step().expect("welcome");
        wizard.set_answer(Answer::Area(Decimal::from(60)));
        wizard.next_step().expect("area");

        assert_eq!(wizard.current_step(), Step::Implanting);
        assert!(!wizard.can_go_next());
        assert_eq!(wizard.next_step().expect("no-op"), Step::Implanting);
    }

    #[test]
    fn prev_step_is_a_no_op_at_the_first_step() {
        let mut wizard = Wizard::new(default_catalog());
        assert!(!wizard.can_go_prev());
        assert_eq!(wizard.prev_step(), Step::Welcome);

        wizard.next_step().expect("welcome");
        assert!(wizard.can_go_prev());
        assert_eq!(wizard.prev_step(), Step::Welcome);
    }

    #[test]
    fn full_session_computes_a_plan_at_the_result_step() {
        let mut wizard = Wizard::new(default_catalog());
        assert!(wizard.plan().is_none());

        walk_to_result(&mut wizard);

        assert_eq!(wizard.current_step(), Step::Result);
        assert!(!wizard.can_go_next(), "result has no next step");
        assert_eq!(wizard.progress(), 100);

        let plan = wizard.plan().expect("plan computed on entry to result");
        assert_eq!(plan.area_m2, Decimal::from(60));
        assert!(!plan.items.is_empty());
    }

    #[test]
    fn revisiting_and_recomputing_replaces_the_plan_wholesale() {
        let mut wizard = Wizard::new(default_catalog());
        walk_to_result(&mut wizard);
        let first = wizard.plan().expect("first plan").clone();

        wizard.prev_step();
        assert_eq!(wizard.current_step(), Step::Condition);
        wizard.set_answer(Answer::Irrigation(Irrigation::AlmostNever));
        wizard.next_step().expect("recompute");

        let second = wizard.plan().expect("second plan");
        assert_ne!(&first, second);
        assert!(second.alerts.len() > first.alerts.len());
    }

    #[test]
    fn progress_moves_through_the_fixed_table() {
        let mut wizard = Wizard::new(default_catalog());
        assert_eq!(wizard.progress(), 0);

        wizard.next_step().expect("welcome");
        assert_eq!(wizard.progress(), 10);

        wizard.set_answer(Answer::Area(Decimal::from(60)));
        wizard.next_step().expect("area");
        assert_eq!(wizard.progress(), 25);
    }

    #[test]
    fn reset_returns_to_a_fresh_session() {
        let mut wizard = Wizard::new(default_catalog());
        walk_to_result(&mut wizard);

        wizard.reset();
        assert_eq!(wizard.current_step(), Step::Welcome);
        assert_eq!(wizard.progress(), 0);
        assert!(wizard.plan().is_none());
        assert_eq!(wizard.answers().area_m2, None);
    }
}
