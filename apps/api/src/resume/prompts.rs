use crate::resume::handlers::ResumeRequest;

pub const RESUME_MAX_TOKENS: u32 = 2000;

pub const RESUME_SYSTEM: &str = "\
You are an expert military-to-civilian career translator with deep knowledge of both \
military operations and corporate hiring practices. Your task is to translate military \
experience into compelling civilian resume content that:

1. Eliminates military jargon and acronyms
2. Quantifies achievements with specific numbers and percentages
3. Highlights transferable leadership, technical, and soft skills
4. Uses action verbs that resonate with civilian recruiters
5. Aligns experience with the target industry/role

Be specific, professional, and focus on impact and results. Format your response clearly \
with sections for Summary, Skills, and Experience bullets.";

const DELIVERABLES: &str = "\
## Please Provide

### 1. Professional Summary (2-3 sentences)
A compelling summary that positions this veteran for civilian roles, highlighting leadership, \
technical skills, and quantifiable impact.

### 2. Core Competencies / Skills Section
List 8-12 transferable skills that are relevant to the target industry. Group them logically \
(e.g., Leadership, Technical, Operations).

### 3. Translated Experience Bullets
For each accomplishment provided, create 1-2 professional resume bullets that:
- Start with a strong action verb
- Eliminate all military jargon
- Include specific metrics where possible (numbers, percentages, dollar amounts)
- Connect to civilian business outcomes

### 4. Additional Resume Tips
2-3 specific recommendations for this candidate's resume, tailored to their target industry.";

/// Builds the user turn for a validated request.
pub fn build_resume_prompt(req: &ResumeRequest) -> String {
    let target_role = req
        .target_role
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .map(|r| format!(" (targeting {r} roles)"))
        .unwrap_or_default();

    let rank = req
        .rank
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or("Not specified");

    let years = req
        .years_of_service
        .filter(|y| *y > 0)
        .map(|y| y.to_string())
        .unwrap_or_else(|| "Not specified".to_string());

    let accomplishments = req
        .accomplishments
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{}. {}", i + 1, a.trim()))
        .collect::<Vec<_>>()
        .join("\n");

    let additional = req
        .additional_context
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(|c| format!("## Additional Context\n{c}\n\n"))
        .unwrap_or_default();

    format!(
        "Please translate the following military experience into civilian resume content \
for the {industry} industry{target_role}.

## Military Background
- **Branch:** {branch}
- **Rank:** {rank}
- **MOS/AFSC/Rating:** {mos}
- **Years of Service:** {years}

## Key Accomplishments (translate these into civilian terms)
{accomplishments}

{additional}{DELIVERABLES}",
        industry = req.target_industry.trim(),
        branch = req.branch.trim(),
        mos = req.mos_afsc.trim(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ResumeRequest {
        ResumeRequest {
            branch: "Army".to_string(),
            rank: Some("E-6".to_string()),
            mos_afsc: "92Y".to_string(),
            years_of_service: Some(8),
            accomplishments: vec![
                "Managed $2M equipment inventory".to_string(),
                "Trained 14 soldiers".to_string(),
            ],
            target_industry: "Logistics".to_string(),
            target_role: None,
            additional_context: None,
        }
    }

    #[test]
    fn test_prompt_numbers_accomplishments() {
        let prompt = build_resume_prompt(&request());
        assert!(prompt.contains("1. Managed $2M equipment inventory\n2. Trained 14 soldiers"));
        assert!(prompt.contains("for the Logistics industry."));
        assert!(prompt.contains("- **Rank:** E-6"));
    }

    #[test]
    fn test_optional_fields_fall_back() {
        let mut req = request();
        req.rank = None;
        req.years_of_service = None;
        let prompt = build_resume_prompt(&req);
        assert!(prompt.contains("- **Rank:** Not specified"));
        assert!(prompt.contains("- **Years of Service:** Not specified"));
        assert!(!prompt.contains("Additional Context"));
    }

    #[test]
    fn test_target_role_and_context_included() {
        let mut req = request();
        req.target_role = Some("Supply Chain Analyst".to_string());
        req.additional_context = Some("Holds a Secret clearance".to_string());
        let prompt = build_resume_prompt(&req);
        assert!(prompt.contains("Logistics industry (targeting Supply Chain Analyst roles)."));
        assert!(prompt.contains("## Additional Context\nHolds a Secret clearance"));
    }
}
