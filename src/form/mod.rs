use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::context::ReferenceFile;
use crate::errors::PlannerError;

pub const MAX_PLANS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeLevel {
    #[serde(rename = "Grade 7")]
    Grade7,
    #[serde(rename = "Grade 8")]
    Grade8,
    #[serde(rename = "Grade 9")]
    Grade9,
    #[serde(rename = "Grade 10")]
    Grade10,
    #[serde(rename = "Grade 11")]
    Grade11,
    #[serde(rename = "Grade 12")]
    Grade12,
}

impl GradeLevel {
    pub const ALL: [GradeLevel; 6] = [
        GradeLevel::Grade7,
        GradeLevel::Grade8,
        GradeLevel::Grade9,
        GradeLevel::Grade10,
        GradeLevel::Grade11,
        GradeLevel::Grade12,
    ];

    pub fn number(self) -> u8 {
        match self {
            GradeLevel::Grade7 => 7,
            GradeLevel::Grade8 => 8,
            GradeLevel::Grade9 => 9,
            GradeLevel::Grade10 => 10,
            GradeLevel::Grade11 => 11,
            GradeLevel::Grade12 => 12,
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grade {}", self.number())
    }
}

/// Accepts "Grade 9", "grade9", "g9" or a bare "9".
impl FromStr for GradeLevel {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_lowercase();
        let digits = t
            .trim_start_matches("grade")
            .trim_start_matches('g')
            .trim();
        GradeLevel::ALL
            .into_iter()
            .find(|g| digits == g.number().to_string())
            .ok_or_else(|| {
                PlannerError::Usage(format!("unknown grade level '{}' (expected Grade 7 to Grade 12)", s.trim()))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Framework {
    #[serde(rename = "4A's DLP")]
    Dlp4A,
    #[serde(rename = "7E's DLP")]
    Dlp7E,
    #[serde(rename = "4A's DLL")]
    Dll4A,
    #[serde(rename = "7E's DLL")]
    Dll7E,
}

impl Framework {
    pub const ALL: [Framework; 4] = [
        Framework::Dlp4A,
        Framework::Dlp7E,
        Framework::Dll4A,
        Framework::Dll7E,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Framework::Dlp4A => "Daily Lesson Plan (4A's Strategy)",
            Framework::Dlp7E => "Daily Lesson Plan (7E's Strategy)",
            Framework::Dll4A => "Daily Lesson Log (4A's Framework)",
            Framework::Dll7E => "Daily Lesson Log (7E's Framework)",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            Framework::Dlp4A => "4A's DLP",
            Framework::Dlp7E => "7E's DLP",
            Framework::Dll4A => "4A's DLL",
            Framework::Dll7E => "7E's DLL",
        }
    }

    /// Daily Lesson Logs cover a whole week.
    pub fn is_log(self) -> bool {
        matches!(self, Framework::Dll4A | Framework::Dll7E)
    }

    pub fn is_seven_e(self) -> bool {
        matches!(self, Framework::Dlp7E | Framework::Dll7E)
    }

    fn normalized(s: &str) -> String {
        s.to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect()
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short())
    }
}

/// Accepts the short names ("4A's DLL", "7Es DLL", "4a-dlp") as well as the full labels.
impl FromStr for Framework {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = Framework::normalized(s);
        Framework::ALL
            .into_iter()
            .find(|fw| {
                let code = if fw.is_seven_e() { "7e" } else { "4a" };
                let kind = if fw.is_log() { "dll" } else { "dlp" };
                key == format!("{code}{kind}")
                    || key == format!("{code}s{kind}")
                    || key == format!("{kind}{code}")
                    || key == format!("{kind}{code}s")
                    || key == Framework::normalized(fw.label())
            })
            .ok_or_else(|| PlannerError::Usage(format!("unknown framework '{}'", s.trim())))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    School,
    Instructor,
    Grade,
    Area,
    Framework,
    Topic,
}

impl FromStr for Field {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "school" => Ok(Field::School),
            "instructor" | "teacher" => Ok(Field::Instructor),
            "grade" | "grade-level" | "gradelevel" => Ok(Field::Grade),
            "area" | "subject" | "learning-area" => Ok(Field::Area),
            "framework" | "format" => Ok(Field::Framework),
            "topic" => Ok(Field::Topic),
            other => Err(PlannerError::Usage(format!(
                "unknown field '{other}' (school, instructor, grade, area, framework, topic)"
            ))),
        }
    }
}

/// Everything the user fills in on the workspace screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub school: String,
    pub instructor: String,
    pub grade: GradeLevel,
    pub area: String,
    pub framework: Framework,
    /// Plan 1 topic, or the weekly theme for a DLL.
    pub topic: String,
    /// Topics for plans 2..=n of a multi-day DLP.
    #[serde(default)]
    pub plan_topics: Vec<String>,
    #[serde(skip)]
    pub references: Vec<ReferenceFile>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            school: "Araibo National High School".into(),
            instructor: "Jay-Art T. Sadjail".into(),
            grade: GradeLevel::Grade8,
            area: "Mathematics".into(),
            framework: Framework::Dlp4A,
            topic: String::new(),
            plan_topics: Vec::new(),
            references: Vec::new(),
        }
    }
}

impl FormState {
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), PlannerError> {
        match field {
            Field::School => self.school = value.to_string(),
            Field::Instructor => self.instructor = value.to_string(),
            Field::Grade => self.grade = value.parse()?,
            Field::Area => self.area = value.to_string(),
            Field::Framework => self.framework = value.parse()?,
            Field::Topic => self.topic = value.to_string(),
        }
        Ok(())
    }

    pub fn plan_count(&self) -> usize {
        1 + self.plan_topics.len()
    }

    /// Grows or shrinks the extra plan topics so the form covers `n` plans.
    /// Only a DLP has separate daily plans.
    pub fn set_plan_count(&mut self, n: usize) -> Result<(), PlannerError> {
        if self.framework.is_log() {
            return Err(PlannerError::Usage(format!(
                "{} covers one weekly theme; switch to a DLP framework to plan several days",
                self.framework.label()
            )));
        }
        if n == 0 || n > MAX_PLANS {
            return Err(PlannerError::Usage(format!(
                "number of plans must be between 1 and {MAX_PLANS}"
            )));
        }
        self.plan_topics.resize(n - 1, String::new());
        Ok(())
    }

    /// Sets the topic of plan `index` (1-based); plan 1 is the main topic.
    pub fn set_plan_topic(&mut self, index: usize, value: &str) -> Result<(), PlannerError> {
        match index {
            0 => Err(PlannerError::Usage("plan numbers start at 1".into())),
            1 => {
                self.topic = value.to_string();
                Ok(())
            }
            i if i <= self.plan_count() => {
                self.plan_topics[i - 2] = value.to_string();
                Ok(())
            }
            i => Err(PlannerError::Usage(format!(
                "plan {i} does not exist; the form has {} plan(s)",
                self.plan_count()
            ))),
        }
    }

    /// Clears the topic side of the form, keeping metadata and framework.
    pub fn reset_topics(&mut self) {
        self.topic.clear();
        self.plan_topics.clear();
    }
}
