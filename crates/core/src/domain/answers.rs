use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, ParseAnswerError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Objective {
    #[serde(rename = "implantacao")]
    Establishment,
    #[serde(rename = "verde_vigor")]
    GreenVigor,
    #[serde(rename = "plano_completo")]
    FullPlan,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Climate {
    #[serde(rename = "quente")]
    Hot,
    #[serde(rename = "ameno")]
    Mild,
    #[serde(rename = "frio")]
    Cold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sunlight {
    #[serde(rename = "sol_pleno")]
    FullSun,
    #[serde(rename = "meia_sombra")]
    PartialShade,
    #[serde(rename = "sombra")]
    HeavyShade,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Irrigation {
    #[serde(rename = "todo_dia")]
    Daily,
    #[serde(rename = "3x_semana")]
    ThreeTimesAWeek,
    #[serde(rename = "1x_semana")]
    OnceAWeek,
    #[serde(rename = "quase_nao")]
    AlmostNever,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Traffic {
    #[serde(rename = "baixo")]
    Low,
    #[serde(rename = "medio")]
    Medium,
    #[serde(rename = "alto")]
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "bonito")]
    Lush,
    #[serde(rename = "normal")]
    Average,
    #[serde(rename = "fraco_amarelado")]
    WeakYellowing,
    #[serde(rename = "ralo_falhas")]
    SparsePatchy,
}

macro_rules! answer_from_str {
    ($enum_name:ident, $field:literal, $expected:literal, { $($wire:literal => $variant:ident),+ $(,)? }) => {
        impl std::str::FromStr for $enum_name {
            type Err = ParseAnswerError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim() {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(ParseAnswerError::new($field, other, $expected)),
                }
            }
        }

        impl $enum_name {
            pub fn wire_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }
    };
}

answer_from_str!(Objective, "objective", "implantacao|verde_vigor|plano_completo", {
    "implantacao" => Establishment,
    "verde_vigor" => GreenVigor,
    "plano_completo" => FullPlan,
});

answer_from_str!(Climate, "climate", "quente|ameno|frio", {
    "quente" => Hot,
    "ameno" => Mild,
    "frio" => Cold,
});

answer_from_str!(Sunlight, "sunlight", "sol_pleno|meia_sombra|sombra", {
    "sol_pleno" => FullSun,
    "meia_sombra" => PartialShade,
    "sombra" => HeavyShade,
});

answer_from_str!(Irrigation, "irrigation", "todo_dia|3x_semana|1x_semana|quase_nao", {
    "todo_dia" => Daily,
    "3x_semana" => ThreeTimesAWeek,
    "1x_semana" => OnceAWeek,
    "quase_nao" => AlmostNever,
});

answer_from_str!(Traffic, "traffic", "baixo|medio|alto", {
    "baixo" => Low,
    "medio" => Medium,
    "alto" => High,
});

answer_from_str!(Condition, "condition", "bonito|normal|fraco_amarelado|ralo_falhas", {
    "bonito" => Lush,
    "normal" => Average,
    "fraco_amarelado" => WeakYellowing,
    "ralo_falhas" => SparsePatchy,
});

/// One committed user response. The wizard routes every answer through
/// `AnswerSet::apply`, so each variant writes exactly one field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Answer {
    Area(Decimal),
    Implanting(bool),
    Objective(Objective),
    Climate(Climate),
    Sunlight(Sunlight),
    Irrigation(Irrigation),
    Traffic(Traffic),
    Condition(Condition),
}

/// Accumulator for one wizard session. Fields stay optional until their
/// step commits; invalid values (for example a non-positive area) are
/// stored as-is and surfaced through the wizard's `can_go_next`, never
/// rejected here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerSet {
    pub area_m2: Option<Decimal>,
    pub implanting: Option<bool>,
    pub objective: Option<Objective>,
    pub climate: Option<Climate>,
    pub sunlight: Option<Sunlight>,
    pub irrigation: Option<Irrigation>,
    pub traffic: Option<Traffic>,
    pub condition: Option<Condition>,
}

/// Fully answered set handed to the recommendation engine. Constructing
/// one through `AnswerSet::complete` is the only path, which is what
/// lets the engine assume `area_m2 > 0` and every enum present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletedAnswers {
    pub area_m2: Decimal,
    pub implanting: bool,
    pub objective: Objective,
    pub climate: Climate,
    pub sunlight: Sunlight,
    pub irrigation: Irrigation,
    pub traffic: Traffic,
    pub condition: Condition,
}

impl AnswerSet {
    pub fn apply(&mut self, answer: Answer) {
        match answer {
            Answer::Area(area) => self.area_m2 = Some(area),
            Answer::Implanting(implanting) => self.implanting = Some(implanting),
            Answer::Objective(objective) => self.objective = Some(objective),
            Answer::Climate(climate) => self.climate = Some(climate),
            Answer::Sunlight(sunlight) => self.sunlight = Some(sunlight),
            Answer::Irrigation(irrigation) => self.irrigation = Some(irrigation),
            Answer::Traffic(traffic) => self.traffic = Some(traffic),
            Answer::Condition(condition) => self.condition = Some(condition),
        }
    }

    pub fn has_valid_area(&self) -> bool {
        self.area_m2.is_some_and(|area| area > Decimal::ZERO)
    }

    pub fn complete(&self) -> Result<CompletedAnswers, DomainError> {
        let mut missing = Vec::new();

        if !self.has_valid_area() {
            missing.push("area_m2");
        }
        if self.implanting.is_none() {
            missing.push("implanting");
        }
        if self.objective.is_none() {
            missing.push("objective");
        }
        if self.climate.is_none() {
            missing.push("climate");
        }
        if self.sunlight.is_none() {
            missing.push("sunlight");
        }
        if self.irrigation.is_none() {
            missing.push("irrigation");
        }
        if self.traffic.is_none() {
            missing.push("traffic");
        }
        if self.condition.is_none() {
            missing.push("condition");
        }

        match (
            self.area_m2,
            self.implanting,
            self.objective,
            self.climate,
            self.sunlight,
            self.irrigation,
            self.traffic,
            self.condition,
        ) {
            (
                Some(area_m2),
                Some(implanting),
                Some(objective),
                Some(climate),
                Some(sunlight),
                Some(irrigation),
                Some(traffic),
                Some(condition),
            ) if missing.is_empty() => Ok(CompletedAnswers {
                area_m2,
                implanting,
                objective,
                climate,
                sunlight,
                irrigation,
                traffic,
                condition,
            }),
            _ => Err(DomainError::IncompleteAnswers { missing }),
        }
    }
}
