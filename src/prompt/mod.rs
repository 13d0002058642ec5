use crate::context;
use crate::errors::PlannerError;
use crate::form::{Framework, FormState};

pub const MISSING_TOPIC: &str = "Please specify a topic to proceed.";

pub fn system_instruction() -> &'static str {
r#"You are an elite Instructional Design Specialist for the Philippine Department of Education (DepEd).

### STRICT ARCHITECTURE MANDATE:
You MUST output exactly TWO Markdown tables. DO NOT include any text, headers, or lists outside these tables.

1. **TABLE 1: OFFICIAL METADATA**
   - Contains: School, Teacher, Grade Level, Learning Area, Teaching Date/Time, Quarter.
   - Use a compact 2-column or 4-column layout to mimic the official header.

2. **TABLE 2: INSTRUCTIONAL CONTENT**
   - **FOR DLL (Daily Lesson Log)**:
     - Format: 6-column grid (**Component | MONDAY | TUESDAY | WEDNESDAY | THURSDAY | FRIDAY**).
     - MUST cover a full 5-day progression of the given topic.
     - **DEPTH RULE**: The **Abstraction** component (for 4A's framework) or the **Explain** component (for 7E's framework) MUST be highly detailed, extensive, and contain all the key concepts required for the week's lessons.
   - **FOR DLP (Daily Lesson Plan)**:
     - Format: 2-column portrait layout (**Field | Content**).
     - **STRICT RULE**: A DLP is for ONE DAY ONLY.
     - **SEQUENCE (DLP 4A's)**: Standards, Competencies, Objectives (Cognitive, Psychomotor, Affective), Content, Resources, **Interdisciplinary Integration**, **Intradisciplinary Integration**, Procedures (Review, Motivation, Activity, Analysis, Abstraction, Application), Assessment, Assignment, Reflection.
     - **SEQUENCE (DLP 7E's)**: Standards, Competencies, Objectives (Cognitive, Psychomotor, Affective), Content, Resources, **Interdisciplinary Integration**, **Intradisciplinary Integration**, Procedures (Elicit, Engage, Explore, Explain, Elaborate, Evaluate, Extend), Assessment, Assignment, Reflection.
     - **DLP LABELLING RULE**: DO NOT include the word "Procedure:" or "Procedures:" before the names of the strategy components (e.g., Activity, Elicit, Engage, etc.). Use the component names directly as headers.

### INTEGRATION MANDATE:
- **Interdisciplinary/Intradisciplinary Integration**: In DLP, these are dedicated fields before the Procedures. In DLL, they should be integrated within the content.
- State clearly as "Integration: [Subject Area]".

### LANGUAGE & TRANSLATION RULES:
- **Language Selection**: Analyze the provided reference documents. If the attached content is in Filipino, you MUST generate the entire output in Filipino.
- **Component Translation**: If generating in Filipino, translate all framework components:
  - Activity -> Gawain
  - Analysis -> Pagsusuri
  - Abstraction -> Paghahalaw
  - Application -> Paglalapat
  - Elicit -> Pagpukaw
  - Engage -> Paghikayat
  - Explore -> Paggalugad
  - Explain -> Pagpapaliwanag
  - Elaborate -> Pagpapalawak
  - Evaluate -> Pagtataya
  - Extend -> Pagpapalawig
  - Review -> Balik-aral
  - Motivation -> Pagganyak
  - Assessment -> Pagtataya
  - Assignment -> Takdang-aralin
  - Reflection -> Pagninilay
  - Interdisciplinary Integration -> Interdisiplinaryong Integrasyon
  - Intradisciplinary Integration -> Intradisimplinaryong Integrasyon
- **Default**: Use English only if no reference material is provided or if the provided material is in English.

### PEDAGOGICAL RULES:
- **Math Symbols**: Use Unicode (√, x², ±, ÷, ×, π, ≤, ≥). DO NOT use LaTeX ($ or \().
- **Depth**: Objectives must be SMART and procedures must be highly detailed and specific.
- **CONTENT DEPTH**:
  - For **DLP 4A's**: The **Analysis** and **Abstraction** sections must be highly extensive.
  - For **DLP 7E's**: The **Explain** section must be highly extensive, containing all major concepts.
  - For **DLL 4A's**: The **Abstraction** section must be the most detailed and longest part.
  - For **DLL 7E's**: The **Explain** section must be the most detailed and longest part."#
}

const LANGUAGE_MANDATE: &str = "\
1. Check the language of 'REFERENCE DOCUMENTS'. If Filipino, generate EVERYTHING in Filipino.
2. Translate all component headers to formal Filipino DepEd terms.";

const SPECIAL_REQUIREMENTS: &str = "\
- **FOR ALL DLPs**: Explicitly add \"Interdisciplinary Integration\" and \"Intradisciplinary Integration\" as dedicated rows in the content table before the Procedures.
- **FOR ALL 7E FRAMEWORKS (DLP or DLL)**: Ensure the **Explain** section is significantly lengthened and contains comprehensive, detailed explanations of the key concepts.
- **FOR ALL 4A FRAMEWORKS (DLP or DLL)**: Ensure the **Abstraction** section is significantly lengthened and detailed.
- **CRITICAL**: For DLP, ensure the Analysis/Abstraction or Explain parts (depending on framework) are highly detailed and incorporate specific discussion points.
- **DLP FORMAT RULE**: For strategy components, DO NOT use the prefix \"Procedure:\" or \"Procedures:\".";

fn topic_block(form: &FormState) -> String {
    let topic = form.topic.trim();
    if form.framework.is_log() {
        return format!("WEEKLY THEME: {topic}");
    }
    if form.plan_topics.is_empty() {
        return format!("DAILY TOPIC: {topic}");
    }
    std::iter::once(topic)
        .chain(form.plan_topics.iter().map(|t| t.trim()))
        .enumerate()
        .map(|(i, t)| {
            let t = if t.is_empty() { "Progressive topic" } else { t };
            format!("Plan {} Topic: {}", i + 1, t)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_specifics(framework: Framework) -> &'static str {
    if framework.is_log() {
        "DLL: 5-day progression (MONDAY to FRIDAY) in a 6-column table."
    } else {
        "DLP: Detailed vertical plan for ONE day."
    }
}

fn strategy(framework: Framework) -> &'static str {
    if framework.is_seven_e() {
        "7Es: Elicit, Engage, Explore, Explain, Elaborate, Evaluate, Extend"
    } else {
        "4As: Review, Motivation, Activity, Analysis, Abstraction, Application"
    }
}

/// Generation needs at least the main topic.
pub fn validate(form: &FormState) -> Result<(), PlannerError> {
    if form.topic.trim().is_empty() {
        return Err(PlannerError::Validation(MISSING_TOPIC.into()));
    }
    Ok(())
}

/// Assemble the user prompt. Pure: the same form always yields the same text.
pub fn build_prompt(form: &FormState) -> String {
    let grade = form.grade.to_string();
    let metadata = [
        ("School", form.school.trim()),
        ("Teacher", form.instructor.trim()),
        ("Grade", grade.as_str()),
        ("Subject", form.area.trim()),
    ]
    .into_iter()
    .filter(|(_, v)| !v.is_empty())
    .map(|(k, v)| format!("{k}: {v}"))
    .collect::<Vec<_>>()
    .join("\n");

    format!(
        "TASK: GENERATE {task}\n\
         \n\
         METADATA:\n\
         {metadata}\n\
         \n\
         TOPIC CONTEXT:\n\
         {topics}\n\
         \n\
         REFERENCE DOCUMENTS:\n\
         {references}\n\
         \n\
         LANGUAGE MANDATE:\n\
         {LANGUAGE_MANDATE}\n\
         \n\
         SPECIAL REQUIREMENTS:\n\
         {SPECIAL_REQUIREMENTS}\n\
         \n\
         FORMAT SPECIFICS:\n\
         - {specifics}\n\
         - Standards: Content Standard, Performance Standard, Learning Competencies.\n\
         - Objectives: List Cognitive, Psychomotor, and Affective objectives separately.\n\
         - Procedures: MUST follow the assigned strategy ({strategy}).\n\
         \n\
         CONSTRAINTS:\n\
         1. TWO TABLES ONLY.\n\
         2. NO LATEX. Use Unicode for math.",
        task = form.framework.label().to_uppercase(),
        topics = topic_block(form),
        references = context::reference_block(&form.references),
        specifics = format_specifics(form.framework),
        strategy = strategy(form.framework),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ReferenceFile, ReferenceKind};
    use crate::form::GradeLevel;

    fn fractions_form() -> FormState {
        FormState {
            grade: GradeLevel::Grade9,
            area: "Mathematics".into(),
            framework: Framework::Dll4A,
            topic: "Fractions".into(),
            ..FormState::default()
        }
    }

    #[test]
    fn weekly_log_prompt_matches_template() {
        let expected = r#"TASK: GENERATE DAILY LESSON LOG (4A'S FRAMEWORK)

METADATA:
School: Araibo National High School
Teacher: Jay-Art T. Sadjail
Grade: Grade 9
Subject: Mathematics

TOPIC CONTEXT:
WEEKLY THEME: Fractions

REFERENCE DOCUMENTS:
None. Use DepEd K-12 Curriculum Standards.

LANGUAGE MANDATE:
1. Check the language of 'REFERENCE DOCUMENTS'. If Filipino, generate EVERYTHING in Filipino.
2. Translate all component headers to formal Filipino DepEd terms.

SPECIAL REQUIREMENTS:
- **FOR ALL DLPs**: Explicitly add "Interdisciplinary Integration" and "Intradisciplinary Integration" as dedicated rows in the content table before the Procedures.
- **FOR ALL 7E FRAMEWORKS (DLP or DLL)**: Ensure the **Explain** section is significantly lengthened and contains comprehensive, detailed explanations of the key concepts.
- **FOR ALL 4A FRAMEWORKS (DLP or DLL)**: Ensure the **Abstraction** section is significantly lengthened and detailed.
- **CRITICAL**: For DLP, ensure the Analysis/Abstraction or Explain parts (depending on framework) are highly detailed and incorporate specific discussion points.
- **DLP FORMAT RULE**: For strategy components, DO NOT use the prefix "Procedure:" or "Procedures:".

FORMAT SPECIFICS:
- DLL: 5-day progression (MONDAY to FRIDAY) in a 6-column table.
- Standards: Content Standard, Performance Standard, Learning Competencies.
- Objectives: List Cognitive, Psychomotor, and Affective objectives separately.
- Procedures: MUST follow the assigned strategy (4As: Review, Motivation, Activity, Analysis, Abstraction, Application).

CONSTRAINTS:
1. TWO TABLES ONLY.
2. NO LATEX. Use Unicode for math."#;
        assert_eq!(build_prompt(&fractions_form()), expected);
    }

    #[test]
    fn daily_plan_7e_prompt_matches_template() {
        let form = FormState {
            grade: GradeLevel::Grade9,
            area: "Science".into(),
            framework: Framework::Dlp7E,
            topic: "Cells".into(),
            ..FormState::default()
        };
        let expected = r#"TASK: GENERATE DAILY LESSON PLAN (7E'S STRATEGY)

METADATA:
School: Araibo National High School
Teacher: Jay-Art T. Sadjail
Grade: Grade 9
Subject: Science

TOPIC CONTEXT:
DAILY TOPIC: Cells

REFERENCE DOCUMENTS:
None. Use DepEd K-12 Curriculum Standards.

LANGUAGE MANDATE:
1. Check the language of 'REFERENCE DOCUMENTS'. If Filipino, generate EVERYTHING in Filipino.
2. Translate all component headers to formal Filipino DepEd terms.

SPECIAL REQUIREMENTS:
- **FOR ALL DLPs**: Explicitly add "Interdisciplinary Integration" and "Intradisciplinary Integration" as dedicated rows in the content table before the Procedures.
- **FOR ALL 7E FRAMEWORKS (DLP or DLL)**: Ensure the **Explain** section is significantly lengthened and contains comprehensive, detailed explanations of the key concepts.
- **FOR ALL 4A FRAMEWORKS (DLP or DLL)**: Ensure the **Abstraction** section is significantly lengthened and detailed.
- **CRITICAL**: For DLP, ensure the Analysis/Abstraction or Explain parts (depending on framework) are highly detailed and incorporate specific discussion points.
- **DLP FORMAT RULE**: For strategy components, DO NOT use the prefix "Procedure:" or "Procedures:".

FORMAT SPECIFICS:
- DLP: Detailed vertical plan for ONE day.
- Standards: Content Standard, Performance Standard, Learning Competencies.
- Objectives: List Cognitive, Psychomotor, and Affective objectives separately.
- Procedures: MUST follow the assigned strategy (7Es: Elicit, Engage, Explore, Explain, Elaborate, Evaluate, Extend).

CONSTRAINTS:
1. TWO TABLES ONLY.
2. NO LATEX. Use Unicode for math."#;
        assert_eq!(build_prompt(&form), expected);
    }

    #[test]
    fn prompt_is_deterministic() {
        let form = fractions_form();
        let first = build_prompt(&form);
        for _ in 0..3 {
            assert_eq!(build_prompt(&form), first);
        }
    }

    #[test]
    fn blank_metadata_lines_are_omitted() {
        let form = FormState {
            school: "   ".into(),
            instructor: String::new(),
            ..fractions_form()
        };
        let prompt = build_prompt(&form);
        assert!(prompt.contains("METADATA:\nGrade: Grade 9\nSubject: Mathematics\n"));
        assert!(!prompt.contains("School:"));
        assert!(!prompt.contains("Teacher:"));
    }

    #[test]
    fn single_daily_plan_uses_daily_topic() {
        let form = FormState {
            framework: Framework::Dlp7E,
            topic: "  Photosynthesis ".into(),
            ..FormState::default()
        };
        let prompt = build_prompt(&form);
        assert!(prompt.starts_with("TASK: GENERATE DAILY LESSON PLAN (7E'S STRATEGY)\n"));
        assert!(prompt.contains("TOPIC CONTEXT:\nDAILY TOPIC: Photosynthesis\n"));
        assert!(prompt.contains("- DLP: Detailed vertical plan for ONE day.\n"));
        assert!(prompt.contains("(7Es: Elicit, Engage, Explore, Explain, Elaborate, Evaluate, Extend)"));
    }

    #[test]
    fn multi_day_plan_lists_each_topic() {
        let mut form = FormState {
            topic: "Fractions".into(),
            ..FormState::default()
        };
        form.set_plan_count(3).unwrap();
        form.set_plan_topic(3, "Mixed numbers").unwrap();
        assert!(build_prompt(&form).contains(
            "TOPIC CONTEXT:\nPlan 1 Topic: Fractions\nPlan 2 Topic: Progressive topic\nPlan 3 Topic: Mixed numbers\n"
        ));
    }

    #[test]
    fn log_ignores_extra_plan_topics() {
        let mut form = FormState {
            framework: Framework::Dlp4A,
            ..fractions_form()
        };
        form.set_plan_count(2).unwrap();
        form.set_plan_topic(2, "Decimals").unwrap();
        form.framework = Framework::Dll4A;
        let prompt = build_prompt(&form);
        assert!(prompt.contains("WEEKLY THEME: Fractions\n"));
        assert!(!prompt.contains("Decimals"));
    }

    #[test]
    fn references_are_embedded() {
        let mut form = fractions_form();
        form.references.push(ReferenceFile {
            name: "melc.txt".into(),
            kind: ReferenceKind::Text,
            bytes: 12,
            text: Some("MELC week 3".into()),
        });
        assert!(build_prompt(&form)
            .contains("REFERENCE DOCUMENTS:\nFILE: melc.txt\nCONTENT: MELC week 3\n\nLANGUAGE MANDATE:"));
    }

    #[test]
    fn validate_requires_topic() {
        let mut form = fractions_form();
        assert!(validate(&form).is_ok());
        form.topic = " \t\n".into();
        assert_eq!(validate(&form), Err(PlannerError::Validation(MISSING_TOPIC.into())));
    }

    #[test]
    fn validate_ignores_optional_fields() {
        let form = FormState {
            school: String::new(),
            instructor: String::new(),
            area: String::new(),
            ..fractions_form()
        };
        assert!(validate(&form).is_ok());
    }

    #[test]
    fn system_instruction_covers_both_document_types() {
        let s = system_instruction();
        assert!(s.contains("TWO Markdown tables"));
        assert!(s.contains("FOR DLL"));
        assert!(s.contains("FOR DLP"));
    }

    #[test]
    fn system_instruction_keeps_translation_and_depth_rules() {
        let s = system_instruction();
        for line in [
            "  - Assessment -> Pagtataya",
            "  - Interdisciplinary Integration -> Interdisiplinaryong Integrasyon",
            "  - Intradisciplinary Integration -> Intradisimplinaryong Integrasyon",
            "- **CONTENT DEPTH**:",
            "  - For **DLP 4A's**: The **Analysis** and **Abstraction** sections must be highly extensive.",
            "  - For **DLL 7E's**: The **Explain** section must be the most detailed and longest part.",
            "**DEPTH RULE**: The **Abstraction** component (for 4A's framework) or the **Explain** component (for 7E's framework) MUST be highly detailed",
            "**DLP LABELLING RULE**",
        ] {
            assert!(s.contains(line), "missing: {line}");
        }
        assert!(s.starts_with("You are an elite Instructional Design Specialist"));
        assert!(s.ends_with("must be the most detailed and longest part."));
    }
}
