// Prompt constants for the two analysis stages.
// Placeholders are filled in one pass by `fill_template`, so text substituted
// into a prompt is never scanned for placeholders again.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").unwrap());

/// Replaces every `{name}` in `template` with its value from `values`.
/// Unknown placeholders are left as written.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    RE_PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// System prompt for job analysis.
pub const JOB_ANALYSIS_SYSTEM: &str =
    "You are a helpful assistant that formats job data cleanly. \
    You are an expert job description analyst preparing a candidate for interviews.";

/// Job analysis prompt. Placeholders: `{job_text}`, `{json_only}`.
pub const JOB_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this job posting and extract comprehensive information.

JOB POSTING TEXT:
{job_text}

Return a JSON object with these sections (omit a field only if the posting gives no signal for it):
{
  "basic_information": {
    "job_title": "exact title",
    "company_name": "string",
    "location": "city, state, country; remote / hybrid / onsite",
    "experience_level": "entry | mid | senior | staff | principal",
    "employment_type": "full-time | part-time | contract",
    "salary_range": "string or null"
  },
  "technical_requirements": {
    "required_skills": ["languages, frameworks, tools"],
    "nice_to_have_skills": ["preferred but not mandatory"],
    "tools_and_technologies": ["specific software, platforms, systems"],
    "certifications_required": ["string"],
    "years_of_experience_required": "string"
  },
  "role_details": {
    "key_responsibilities": ["string"],
    "daily_tasks": ["string"],
    "team_structure": "who they will work with",
    "reporting_structure": "string",
    "growth_opportunities": ["string"]
  },
  "company_information": {
    "company_size": "string",
    "industry": "string",
    "culture_and_values": ["string"],
    "mission_statement": "string",
    "benefits_and_perks": ["string"],
    "work_environment": "string"
  },
  "interview_preparation_insights": {
    "likely_technical_topics": ["string"],
    "behavioral_questions_to_expect": ["string"],
    "skills_assessment_areas": ["string"],
    "portfolio_or_project_requirements": ["string"],
    "success_metrics": ["key metrics / KPIs for the role"]
  },
  "candidate_profile": {
    "ideal_candidate": "string",
    "educational_requirements": ["string"],
    "soft_skills": ["string"],
    "leadership_requirements": ["string"],
    "communication_skills": ["string"]
  }
}

{json_only}"#;

/// System prompt for resume-vs-job analysis.
pub const RESUME_ANALYSIS_SYSTEM: &str =
    "You are a helpful assistant that provides structured resume-job analysis. \
    You are an expert career coach and interview preparation specialist.";

/// Resume analysis prompt. Placeholders: `{job_analysis_json}`, `{resume_text}`, `{json_only}`.
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this candidate's resume against the job description and create a comprehensive interview preparation report.

JOB DESCRIPTION:
{job_analysis_json}

CANDIDATE RESUME:
{resume_text}

Return a JSON object with these sections:
{
  "executive_summary": {
    "overall_match_percentage": 0,
    "key_strengths": ["string"],
    "primary_gaps": ["string"],
    "preparation_focus_areas": ["string"]
  },
  "skills_analysis": {
    "required_skills_assessment": [{"skill": "string", "status": "match | partial | missing", "evidence": "string"}],
    "technical_gap_analysis": ["string"],
    "soft_skills_evaluation": ["string"],
    "certifications_and_education_alignment": "string",
    "experience_level_comparison": "string"
  },
  "introduction_strategy": {
    "elevator_pitch_30_seconds": "string",
    "detailed_introduction_2_minutes": "string",
    "value_propositions": ["string"],
    "unique_selling_points": ["string"],
    "career_story": "string"
  },
  "technical_preparation": {
    "skills_to_brush_up": ["string"],
    "coding_challenges": ["string"],
    "system_design_topics": ["string"],
    "architecture_questions": ["string"],
    "tools_to_research": ["string"],
    "portfolio_projects_to_highlight": ["string"]
  },
  "behavioral_preparation": {
    "star_examples": ["string"],
    "leadership_stories": ["string"],
    "problem_solving_examples": ["string"],
    "teamwork_scenarios": ["string"],
    "failure_and_learning_stories": ["string"],
    "relevant_success_stories": ["string"]
  },
  "interview_questions_bank": {
    "technical": ["at least 20 questions"],
    "behavioral": ["at least 15 questions"],
    "company_specific": ["at least 10 questions"],
    "role_specific": ["at least 10 questions"],
    "situational": ["at least 10 questions"]
  },
  "questions_to_ask_interviewer": {
    "technical": ["string"],
    "team_and_culture": ["string"],
    "growth_and_development": ["string"],
    "role_specific": ["string"]
  },
  "keywords_and_phrases": {
    "technical_keywords": ["string"],
    "industry_terms": ["string"],
    "company_values_to_reference": ["string"],
    "action_verbs": ["string"],
    "achievements_to_highlight": ["string"]
  },
  "red_flags_and_concerns": {
    "weaknesses_to_address": ["string"],
    "gaps_to_explain": ["string"],
    "difficult_questions": ["string"],
    "salary_negotiation_points": ["string"],
    "timeline_concerns": ["string"]
  },
  "success_strategies": {
    "interview_day_preparation": ["string"],
    "body_language_tips": ["string"],
    "communication_adjustments": ["string"],
    "follow_up_strategy": ["string"],
    "negotiation_preparation": ["string"]
  },
  "company_research_points": {
    "recent_news": ["string"],
    "products_and_services": ["string"],
    "competitors": ["string"],
    "industry_trends": ["string"],
    "culture_insights": ["string"]
  },
  "role_specific_preparation": {
    "daily_responsibilities": ["string"],
    "team_dynamics": ["string"],
    "tools_and_processes": ["string"],
    "metrics_and_kpis": ["string"],
    "anticipated_challenges": ["string"]
  }
}

Make it comprehensive and actionable. Ground every claim about the candidate in the resume text.

{json_only}"#;
