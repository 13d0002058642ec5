use clap::Parser;
use std::path::PathBuf;

use crate::form::{Framework, GradeLevel};

#[derive(Parser, Debug)]
#[command(name = "ace_planner", version, about = "DepEd lesson plan generator backed by Gemini")]
pub struct Args {
    /// TOML config file (defaults to $ACE_PLANNER_CONFIG, then ./ace-planner.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Save each request/response under <out_dir>/tx/<id>/
    #[arg(long, default_value_t = false)]
    pub save_artifacts: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,

    #[arg(long)]
    pub school: Option<String>,

    #[arg(long, alias = "teacher")]
    pub instructor: Option<String>,

    #[arg(long)]
    pub grade: Option<GradeLevel>,

    #[arg(long, alias = "subject")]
    pub area: Option<String>,

    #[arg(long)]
    pub framework: Option<Framework>,

    #[arg(long)]
    pub topic: Option<String>,

    /// Reference file to attach (.txt, .md, .pdf, .docx); repeatable
    #[arg(long = "reference")]
    pub references: Vec<PathBuf>,

    /// Generate once from the flags above, print the plan and exit
    #[arg(long, default_value_t = false)]
    pub generate: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_flags_parse() {
        let args = Args::try_parse_from([
            "ace_planner",
            "--generate",
            "--grade",
            "Grade 9",
            "--subject",
            "Mathematics",
            "--framework",
            "4A's DLL",
            "--topic",
            "Fractions",
            "--reference",
            "a.txt",
            "--reference",
            "b.pdf",
        ])
        .unwrap();
        assert!(args.generate);
        assert_eq!(args.grade, Some(GradeLevel::Grade9));
        assert_eq!(args.area.as_deref(), Some("Mathematics"));
        assert_eq!(args.framework, Some(Framework::Dll4A));
        assert_eq!(args.references, vec![PathBuf::from("a.txt"), PathBuf::from("b.pdf")]);
    }

    #[test]
    fn bad_grade_is_rejected() {
        assert!(Args::try_parse_from(["ace_planner", "--grade", "Grade 3"]).is_err());
    }
}
