use serde::{Deserialize, Serialize};

/// Named stages of the calculator wizard, in their fixed order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Welcome,
    Area,
    Implanting,
    Objective,
    Climate,
    Sunlight,
    Irrigation,
    Traffic,
    Condition,
    Result,
}

pub const STEP_SEQUENCE: [Step; 10] = [
    Step::Welcome,
    Step::Area,
    Step::Implanting,
    Step::Objective,
    Step::Climate,
    Step::Sunlight,
    Step::Irrigation,
    Step::Traffic,
    Step::Condition,
    Step::Result,
];

/// Progress bar percentage per step. Deliberately non-linear: front
/// steps jump quickly to pull the user in, late steps crawl. Welcome
/// pins 0 and result pins 100, so the bar only ever reflects question
/// steps.
const PROGRESS_PERCENT: [u8; 10] = [0, 10, 25, 40, 52, 64, 76, 86, 94, 100];

impl Step {
    pub fn index(self) -> usize {
        STEP_SEQUENCE
            .iter()
            .position(|step| *step == self)
            .unwrap_or(0)
    }

    pub fn progress_percent(self) -> u8 {
        PROGRESS_PERCENT[self.index()]
    }

    pub fn is_question(self) -> bool {
        !matches!(self, Step::Welcome | Step::Result)
    }

    pub fn last_question() -> Step {
        Step::Condition
    }
}
