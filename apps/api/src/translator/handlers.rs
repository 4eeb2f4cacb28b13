use std::collections::BTreeMap;

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{AppError, CalcError};
use crate::translator::catalog::{
    all_industries, section, sections_for_industry, Branch, BranchInfo, CareerPath,
    CorporateRole, RoleLevel, StaffSection, CAREER_PATHS, STAFF_SECTIONS,
};

#[derive(Debug, Default, Deserialize)]
pub struct MappingQuery {
    pub section: Option<String>,
    pub industry: Option<String>,
    pub paths: Option<String>,
    pub branch: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageSalaries {
    pub entry: f64,
    pub mid: f64,
    pub senior: f64,
    pub executive: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionWithDesignations {
    #[serde(flatten)]
    pub section: &'static StaffSection,
    pub designations: BTreeMap<&'static str, String>,
    pub average_salaries: AverageSalaries,
}

#[derive(Debug, Serialize)]
pub struct SectionDetail {
    pub section: SectionWithDesignations,
    pub branches: BTreeMap<&'static str, BranchInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustrySection {
    pub number: u8,
    pub name: &'static str,
    pub corporate_equivalents: &'static [CorporateRole],
    pub key_skills: &'static [&'static str],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryMatches {
    pub industry: String,
    pub sections: Vec<IndustrySection>,
    pub total_sections: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionOverview {
    pub number: u8,
    pub name: &'static str,
    pub military_description: &'static str,
    pub top_roles: Vec<&'static CorporateRole>,
    pub key_skills: &'static [&'static str],
    pub industry_fit: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct BranchDesignation {
    pub designation: String,
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingOverview {
    pub branches: BTreeMap<&'static str, BranchInfo>,
    pub sections: Vec<SectionOverview>,
    pub industries: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_paths: Option<&'static [CareerPath]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_designations: Option<Vec<BranchDesignation>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MappingResponse {
    Section(SectionDetail),
    Industry(IndustryMatches),
    Overview(MappingOverview),
}

fn branches() -> BTreeMap<&'static str, BranchInfo> {
    Branch::ALL.into_iter().map(|b| (b.key(), b.info())).collect()
}

/// First `n` items of a static slice, or all of them when shorter.
fn head<T>(items: &'static [T], n: usize) -> &'static [T] {
    &items[..items.len().min(n)]
}

fn section_detail(raw: &str) -> Result<SectionDetail, CalcError> {
    let out_of_range = || CalcError::out_of_range("section", "must be a number between 1 and 9");
    let number: u8 = raw.trim().parse().map_err(|_| out_of_range())?;
    let found = section(number).ok_or_else(out_of_range)?;

    Ok(SectionDetail {
        section: SectionWithDesignations {
            section: found,
            designations: Branch::ALL
                .into_iter()
                .map(|b| (b.key(), b.designation(number)))
                .collect(),
            average_salaries: AverageSalaries {
                entry: found.average_salary(RoleLevel::Entry),
                mid: found.average_salary(RoleLevel::Mid),
                senior: found.average_salary(RoleLevel::Senior),
                executive: found.average_salary(RoleLevel::Executive),
            },
        },
        branches: branches(),
    })
}

fn industry_matches(industry: &str) -> IndustryMatches {
    let sections: Vec<IndustrySection> = sections_for_industry(industry)
        .into_iter()
        .map(|s| IndustrySection {
            number: s.number,
            name: s.name,
            corporate_equivalents: head(s.corporate_equivalents, 3),
            key_skills: head(s.key_skills, 5),
        })
        .collect();
    IndustryMatches {
        industry: industry.to_string(),
        total_sections: sections.len(),
        sections,
    }
}

fn overview(include_paths: bool, branch: Option<Branch>) -> MappingOverview {
    MappingOverview {
        branches: branches(),
        sections: STAFF_SECTIONS
            .iter()
            .map(|s| SectionOverview {
                number: s.number,
                name: s.name,
                military_description: s.military_description,
                top_roles: s
                    .corporate_equivalents
                    .iter()
                    .filter(|r| matches!(r.level, RoleLevel::Mid | RoleLevel::Senior))
                    .take(2)
                    .collect(),
                key_skills: head(s.key_skills, 4),
                industry_fit: s.industry_fit,
            })
            .collect(),
        industries: all_industries(),
        career_paths: include_paths.then_some(&CAREER_PATHS[..]),
        branch_designations: branch.map(|b| {
            STAFF_SECTIONS
                .iter()
                .map(|s| BranchDesignation {
                    designation: b.designation(s.number),
                    name: s.name,
                })
                .collect()
        }),
    }
}

/// `section` wins over `industry`, which wins over the overview. An unknown
/// branch is ignored.
pub fn mapping(query: &MappingQuery) -> Result<MappingResponse, CalcError> {
    let non_empty = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(raw) = non_empty(&query.section) {
        return section_detail(&raw).map(MappingResponse::Section);
    }
    if let Some(industry) = non_empty(&query.industry) {
        return Ok(MappingResponse::Industry(industry_matches(&industry)));
    }
    let include_paths = query.paths.as_deref() == Some("true");
    let branch = query.branch.as_deref().and_then(Branch::from_key);
    Ok(MappingResponse::Overview(overview(include_paths, branch)))
}

/// GET /api/translator/mapping
pub async fn handle_mapping(
    Query(query): Query<MappingQuery>,
) -> Result<Json<MappingResponse>, AppError> {
    let response = mapping(&query)?;
    debug!(
        section = ?query.section,
        industry = ?query.industry,
        branch = ?query.branch,
        "Translator mapping served"
    );
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(section: Option<&str>, industry: Option<&str>) -> MappingQuery {
        MappingQuery {
            section: section.map(str::to_string),
            industry: industry.map(str::to_string),
            ..MappingQuery::default()
        }
    }

    #[test]
    fn test_section_detail_has_every_designation() {
        let Ok(MappingResponse::Section(detail)) = mapping(&query(Some("3"), None)) else {
            panic!("expected a section");
        };
        assert_eq!(detail.section.section.name, "Operations / Training");
        assert_eq!(detail.section.designations["army"], "G-3");
        assert_eq!(detail.section.designations["marines"], "S-3");
        assert_eq!(detail.section.designations.len(), 5);
        // Program Manager 115,000 and Operations Manager 100,000.
        assert_eq!(detail.section.average_salaries.mid, 107_500.0);
    }

    #[test]
    fn test_section_out_of_range() {
        for raw in ["0", "10", "abc", "-1"] {
            assert!(mapping(&query(Some(raw), None)).is_err(), "{raw}");
        }
    }

    #[test]
    fn test_industry_filter_trims_lists() {
        let Ok(MappingResponse::Industry(matches)) = mapping(&query(None, Some("Defense"))) else {
            panic!("expected industry matches");
        };
        assert_eq!(matches.total_sections, matches.sections.len());
        assert!(matches.total_sections > 0);
        for s in &matches.sections {
            assert_eq!(s.corporate_equivalents.len(), 3);
            assert_eq!(s.key_skills.len(), 5);
        }
    }

    #[test]
    fn test_overview_options() {
        let plain = mapping(&MappingQuery::default()).unwrap();
        let json = serde_json::to_value(&plain).unwrap();
        assert_eq!(json["sections"].as_array().map(Vec::len), Some(9));
        assert!(json.get("careerPaths").is_none());
        assert!(json.get("branchDesignations").is_none());
        assert_eq!(json["sections"][0]["topRoles"][0]["level"], "mid");

        let with_extras = mapping(&MappingQuery {
            paths: Some("true".to_string()),
            branch: Some("navy".to_string()),
            ..MappingQuery::default()
        })
        .unwrap();
        let json = serde_json::to_value(&with_extras).unwrap();
        assert_eq!(json["careerPaths"].as_array().map(Vec::len), Some(5));
        assert_eq!(json["branchDesignations"][5]["designation"], "N-6");
    }

    #[test]
    fn test_unknown_branch_is_ignored() {
        let response = mapping(&MappingQuery {
            branch: Some("coastguard".to_string()),
            ..MappingQuery::default()
        })
        .unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("branchDesignations").is_none());
        assert_eq!(json["branches"]["airforce"]["prefix"], "A");
    }
}
