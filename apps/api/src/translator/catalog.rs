//! Military staff sections (G/J/A/N/S-1 through -9) and the corporate roles
//! they map to. Section numbers mean the same function in every branch;
//! only the letter prefix differs.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// ────────────────────────────────────────────────────────────────────────────
// Branches and designations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Army,
    Joint,
    #[serde(rename = "airforce")]
    AirForce,
    Navy,
    Marines,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BranchInfo {
    pub name: &'static str,
    pub prefix: char,
    pub description: &'static str,
}

impl Branch {
    pub const ALL: [Branch; 5] = [
        Branch::Army,
        Branch::Joint,
        Branch::AirForce,
        Branch::Navy,
        Branch::Marines,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Branch::Army => "army",
            Branch::Joint => "joint",
            Branch::AirForce => "airforce",
            Branch::Navy => "navy",
            Branch::Marines => "marines",
        }
    }

    pub fn from_key(key: &str) -> Option<Branch> {
        Branch::ALL.into_iter().find(|b| b.key() == key)
    }

    pub fn info(self) -> BranchInfo {
        let (name, prefix, description) = match self {
            Branch::Army => ("Army", 'G', "Division, Corps, and higher echelons"),
            Branch::Joint => ("Joint", 'J', "Joint Commands, Combatant Commands"),
            Branch::AirForce => ("Air Force", 'A', "Wing, MAJCOM, and higher"),
            Branch::Navy => ("Navy", 'N', "Fleet, Type Command, and higher"),
            Branch::Marines => ("Marines", 'S', "Battalion, Regiment, and MEF"),
        };
        BranchInfo {
            name,
            prefix,
            description,
        }
    }

    /// `G-3`, `S-1`, ...
    pub fn designation(self, section: u8) -> String {
        format!("{}-{section}", self.info().prefix)
    }
}

static DESIGNATION_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?i)^([GJANS])-(\d)$"));

/// Inverse of [`Branch::designation`], case-insensitive. Section 0 and
/// anything not shaped like `X-n` yield `None`.
pub fn parse_designation(designation: &str) -> Option<(Branch, u8)> {
    let pattern = DESIGNATION_PATTERN.as_ref().ok()?;
    let caps = pattern.captures(designation.trim())?;
    let prefix = caps.get(1)?.as_str().chars().next()?.to_ascii_uppercase();
    let section: u8 = caps.get(2)?.as_str().parse().ok()?;
    if !(1..=9).contains(&section) {
        return None;
    }
    let branch = Branch::ALL.into_iter().find(|b| b.info().prefix == prefix)?;
    Some((branch, section))
}

// ────────────────────────────────────────────────────────────────────────────
// Staff sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleLevel {
    Entry,
    Mid,
    Senior,
    Executive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Demand {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorporateRole {
    pub title: &'static str,
    pub level: RoleLevel,
    pub description: &'static str,
    pub salary_range: SalaryRange,
    pub demand_level: Demand,
}

const fn role(
    title: &'static str,
    level: RoleLevel,
    description: &'static str,
    min: f64,
    max: f64,
    demand_level: Demand,
) -> CorporateRole {
    CorporateRole {
        title,
        level,
        description,
        salary_range: SalaryRange { min, max },
        demand_level,
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffSection {
    pub number: u8,
    pub name: &'static str,
    pub military_description: &'static str,
    pub corporate_equivalents: &'static [CorporateRole],
    pub key_skills: &'static [&'static str],
    pub typical_military_titles: &'static [&'static str],
    pub industry_fit: &'static [&'static str],
}

impl StaffSection {
    pub fn roles_at(&self, level: RoleLevel) -> impl Iterator<Item = &'static CorporateRole> {
        self.corporate_equivalents
            .iter()
            .filter(move |r| r.level == level)
    }

    /// Mean salary-range midpoint of the roles at `level`, whole dollars.
    /// Zero when no role sits at that level.
    pub fn average_salary(&self, level: RoleLevel) -> f64 {
        let (count, total) = self.roles_at(level).fold((0u32, 0.0), |(n, sum), r| {
            (n + 1, sum + (r.salary_range.min + r.salary_range.max) / 2.0)
        });
        if count == 0 {
            0.0
        } else {
            (total / f64::from(count)).round()
        }
    }

    pub fn fits_industry(&self, industry: &str) -> bool {
        self.industry_fit.contains(&industry)
    }
}

use Demand::{High, Low, Medium};
use RoleLevel::{Entry, Executive, Mid, Senior};

pub static STAFF_SECTIONS: [StaffSection; 9] = [
    StaffSection {
        number: 1,
        name: "Personnel / Manpower",
        military_description: "Manages personnel readiness, assignments, promotions, awards, and human resources administration. Oversees manning levels, casualty reporting, and personnel services.",
        corporate_equivalents: &[
            role("HR Coordinator", Entry, "Handles employee onboarding, benefits administration, and HR operations", 45_000.0, 60_000.0, High),
            role("HR Business Partner", Mid, "Partners with business units on talent strategy, employee relations, and organizational development", 70_000.0, 100_000.0, High),
            role("People Operations Manager", Mid, "Leads HR operations, HRIS management, and process improvement", 80_000.0, 120_000.0, High),
            role("Director of Human Resources", Senior, "Oversees HR strategy, compliance, and organizational development", 120_000.0, 180_000.0, Medium),
            role("Chief Human Resources Officer (CHRO)", Executive, "Executive leadership of all people functions, talent strategy, and culture", 200_000.0, 400_000.0, Low),
        ],
        key_skills: &[
            "Talent acquisition and retention",
            "Performance management",
            "Employee relations",
            "HRIS systems (Workday, SAP)",
            "Compliance and policy",
            "Workforce planning",
            "Change management",
        ],
        typical_military_titles: &[
            "Personnel Officer (S-1/G-1)",
            "Human Resources Specialist",
            "Personnel NCO",
            "Adjutant",
            "Admin Chief",
        ],
        industry_fit: &["Tech", "Healthcare", "Finance", "Consulting", "Government Contractors"],
    },
    StaffSection {
        number: 2,
        name: "Intelligence / Security",
        military_description: "Collects, analyzes, and disseminates intelligence. Manages security clearances, counterintelligence, and threat assessments. Provides situational awareness to commanders.",
        corporate_equivalents: &[
            role("Security Analyst", Entry, "Monitors security systems, investigates incidents, and maintains compliance", 55_000.0, 75_000.0, High),
            role("Competitive Intelligence Analyst", Mid, "Researches competitors, market trends, and provides strategic insights", 70_000.0, 100_000.0, Medium),
            role("Cybersecurity Analyst", Mid, "Protects digital assets, conducts threat analysis, and implements security measures", 80_000.0, 130_000.0, High),
            role("Director of Security", Senior, "Leads physical and information security programs, risk management", 130_000.0, 200_000.0, Medium),
            role("Chief Information Security Officer (CISO)", Executive, "Executive responsibility for enterprise security strategy and risk", 200_000.0, 450_000.0, Medium),
        ],
        key_skills: &[
            "Threat analysis and assessment",
            "Security clearance management",
            "Risk analysis",
            "Data analytics",
            "Report writing and briefing",
            "OSINT and research",
            "Cybersecurity frameworks",
        ],
        typical_military_titles: &[
            "Intelligence Officer (S-2/G-2)",
            "Intelligence Analyst",
            "Counterintelligence Agent",
            "All-Source Analyst",
            "SIGINT Specialist",
        ],
        industry_fit: &["Defense Contractors", "Tech", "Finance", "Consulting", "Government"],
    },
    StaffSection {
        number: 3,
        name: "Operations / Training",
        military_description: "Plans and executes operations. Manages training programs, exercises, and readiness. Coordinates battle rhythm, orders production, and operational planning.",
        corporate_equivalents: &[
            role("Operations Coordinator", Entry, "Supports daily operations, scheduling, and coordination", 45_000.0, 65_000.0, High),
            role("Program Manager", Mid, "Manages complex programs, timelines, budgets, and cross-functional teams", 90_000.0, 140_000.0, High),
            role("Operations Manager", Mid, "Oversees operational processes, efficiency, and team performance", 80_000.0, 120_000.0, High),
            role("Director of Operations", Senior, "Leads operational strategy, process improvement, and organizational efficiency", 140_000.0, 200_000.0, Medium),
            role("Chief Operating Officer (COO)", Executive, "Executive leadership of all operations, often second-in-command", 250_000.0, 500_000.0, Low),
        ],
        key_skills: &[
            "Strategic planning",
            "Project/Program management",
            "Process improvement",
            "Cross-functional coordination",
            "Risk management",
            "Decision-making under pressure",
            "Resource allocation",
        ],
        typical_military_titles: &[
            "Operations Officer (S-3/G-3)",
            "Battle Captain",
            "Plans Officer",
            "Training Officer",
            "Executive Officer",
        ],
        industry_fit: &["Tech", "Consulting", "Manufacturing", "Logistics", "Healthcare"],
    },
    StaffSection {
        number: 4,
        name: "Logistics / Supply Chain",
        military_description: "Manages supply, maintenance, transportation, and services. Oversees equipment readiness, distribution, and sustainment operations.",
        corporate_equivalents: &[
            role("Supply Chain Coordinator", Entry, "Coordinates procurement, inventory, and distribution activities", 45_000.0, 60_000.0, High),
            role("Logistics Manager", Mid, "Manages warehousing, transportation, and distribution operations", 70_000.0, 100_000.0, High),
            role("Supply Chain Manager", Mid, "Oversees end-to-end supply chain, vendor relationships, and optimization", 85_000.0, 130_000.0, High),
            role("Director of Supply Chain", Senior, "Leads supply chain strategy, global logistics, and procurement", 140_000.0, 200_000.0, Medium),
            role("VP of Operations / Supply Chain", Executive, "Executive oversight of global supply chain and logistics operations", 200_000.0, 350_000.0, Low),
        ],
        key_skills: &[
            "Inventory management",
            "Vendor/contract management",
            "Distribution planning",
            "ERP systems (SAP, Oracle)",
            "Cost optimization",
            "Quality control",
            "Demand forecasting",
        ],
        typical_military_titles: &[
            "Logistics Officer (S-4/G-4)",
            "Supply Officer",
            "Maintenance Officer",
            "Transportation Officer",
            "Property Book Officer",
        ],
        industry_fit: &["Manufacturing", "Retail", "E-commerce", "Defense", "Healthcare"],
    },
    StaffSection {
        number: 5,
        name: "Plans / Strategy",
        military_description: "Develops long-range plans, policies, and strategies. Conducts future operations planning, exercises, and strategic assessments.",
        corporate_equivalents: &[
            role("Business Analyst", Entry, "Analyzes business processes, data, and recommends improvements", 55_000.0, 75_000.0, High),
            role("Strategy Analyst", Mid, "Supports strategic initiatives, market analysis, and business planning", 80_000.0, 120_000.0, Medium),
            role("Business Development Manager", Mid, "Identifies growth opportunities, partnerships, and new markets", 90_000.0, 140_000.0, High),
            role("Director of Strategy", Senior, "Leads corporate strategy development and strategic planning", 150_000.0, 220_000.0, Medium),
            role("Chief Strategy Officer (CSO)", Executive, "Executive leadership of corporate strategy and long-term planning", 220_000.0, 400_000.0, Low),
        ],
        key_skills: &[
            "Strategic planning",
            "Market analysis",
            "Scenario planning",
            "Business case development",
            "Stakeholder management",
            "Data-driven decision making",
            "Presentation and communication",
        ],
        typical_military_titles: &[
            "Plans Officer (S-5/G-5)",
            "Strategic Planner",
            "Future Operations Officer",
            "Policy Officer",
            "Civil-Military Operations Officer",
        ],
        industry_fit: &["Consulting", "Tech", "Finance", "Healthcare", "Defense"],
    },
    StaffSection {
        number: 6,
        name: "Communications / IT",
        military_description: "Manages communications systems, networks, and information technology. Oversees cybersecurity, spectrum management, and digital infrastructure.",
        corporate_equivalents: &[
            role("IT Support Specialist", Entry, "Provides technical support, troubleshooting, and system maintenance", 45_000.0, 65_000.0, High),
            role("Network Engineer", Mid, "Designs, implements, and maintains network infrastructure", 75_000.0, 110_000.0, High),
            role("IT Manager", Mid, "Manages IT operations, team, and technology projects", 90_000.0, 130_000.0, High),
            role("Director of IT / Infrastructure", Senior, "Leads IT strategy, infrastructure, and digital transformation", 140_000.0, 200_000.0, Medium),
            role("Chief Technology Officer (CTO)", Executive, "Executive leadership of technology strategy and innovation", 200_000.0, 450_000.0, Medium),
        ],
        key_skills: &[
            "Network administration",
            "Systems engineering",
            "Cybersecurity",
            "Cloud platforms (AWS, Azure)",
            "IT service management",
            "Project management",
            "Vendor management",
        ],
        typical_military_titles: &[
            "Signal Officer (S-6/G-6)",
            "Communications Officer",
            "Information Systems Officer",
            "Network Operations Chief",
            "Cyber Officer",
        ],
        industry_fit: &["Tech", "Defense", "Finance", "Healthcare", "Consulting"],
    },
    StaffSection {
        number: 7,
        name: "Training / Exercises",
        military_description: "Develops and manages training programs, doctrine, and professional development. Oversees exercises, certifications, and readiness training.",
        corporate_equivalents: &[
            role("Training Coordinator", Entry, "Coordinates training programs, schedules, and logistics", 45_000.0, 60_000.0, Medium),
            role("Instructional Designer", Mid, "Designs learning programs, e-learning content, and curricula", 65_000.0, 95_000.0, Medium),
            role("Learning & Development Manager", Mid, "Manages corporate training programs and employee development", 85_000.0, 120_000.0, Medium),
            role("Director of Learning & Development", Senior, "Leads organizational learning strategy and talent development", 130_000.0, 180_000.0, Medium),
            role("Chief Learning Officer (CLO)", Executive, "Executive leadership of organizational learning and development", 180_000.0, 300_000.0, Low),
        ],
        key_skills: &[
            "Curriculum development",
            "Adult learning theory",
            "LMS administration",
            "Performance assessment",
            "Facilitation",
            "Program evaluation",
            "Change management",
        ],
        typical_military_titles: &[
            "Training Officer (S-7/G-7)",
            "Master Trainer",
            "Instructor",
            "Doctrine Developer",
            "Exercise Planner",
        ],
        industry_fit: &["Tech", "Healthcare", "Finance", "Consulting", "Education"],
    },
    StaffSection {
        number: 8,
        name: "Finance / Resource Management",
        military_description: "Manages budgets, financial planning, and resource allocation. Oversees funding, cost analysis, and financial reporting.",
        corporate_equivalents: &[
            role("Financial Analyst", Entry, "Analyzes financial data, builds models, and supports planning", 55_000.0, 75_000.0, High),
            role("Budget Manager", Mid, "Manages departmental budgets, forecasting, and variance analysis", 75_000.0, 110_000.0, Medium),
            role("FP&A Manager", Mid, "Leads financial planning, analysis, and business partnering", 100_000.0, 150_000.0, High),
            role("Director of Finance", Senior, "Oversees financial operations, reporting, and strategic finance", 150_000.0, 220_000.0, Medium),
            role("Chief Financial Officer (CFO)", Executive, "Executive leadership of all financial functions", 250_000.0, 500_000.0, Low),
        ],
        key_skills: &[
            "Financial modeling",
            "Budget management",
            "Cost analysis",
            "Excel/financial software",
            "Forecasting",
            "Variance analysis",
            "Strategic planning",
        ],
        typical_military_titles: &[
            "Resource Manager (G-8)",
            "Comptroller",
            "Budget Officer",
            "Financial Management Officer",
            "Cost Analyst",
        ],
        industry_fit: &["Finance", "Tech", "Consulting", "Healthcare", "Defense"],
    },
    StaffSection {
        number: 9,
        name: "Civil Affairs / Analysis",
        military_description: "Manages civil-military operations, public affairs, and external relations. Conducts operational analysis, studies, and assessments.",
        corporate_equivalents: &[
            role("Public Relations Specialist", Entry, "Manages media relations, communications, and public image", 45_000.0, 65_000.0, Medium),
            role("Government Relations Analyst", Mid, "Manages government relationships, policy analysis, and compliance", 70_000.0, 100_000.0, Medium),
            role("Business Intelligence Analyst", Mid, "Analyzes data, creates dashboards, and provides business insights", 75_000.0, 110_000.0, High),
            role("Director of External Affairs", Senior, "Leads government relations, community engagement, and partnerships", 130_000.0, 190_000.0, Medium),
            role("VP of Corporate Affairs", Executive, "Executive leadership of external relations and corporate communications", 180_000.0, 350_000.0, Low),
        ],
        key_skills: &[
            "Stakeholder engagement",
            "Data analysis and visualization",
            "Public speaking",
            "Report writing",
            "Policy analysis",
            "Research methods",
            "Cross-cultural communication",
        ],
        typical_military_titles: &[
            "Civil Affairs Officer (G-9)",
            "Public Affairs Officer",
            "Operations Research Analyst",
            "Assessment Officer",
            "External Affairs Officer",
        ],
        industry_fit: &["Government", "Defense", "Consulting", "Tech", "Non-profit"],
    },
];

pub fn section(number: u8) -> Option<&'static StaffSection> {
    STAFF_SECTIONS.iter().find(|s| s.number == number)
}

pub fn sections_for_industry(industry: &str) -> Vec<&'static StaffSection> {
    STAFF_SECTIONS
        .iter()
        .filter(|s| s.fits_industry(industry))
        .collect()
}

/// Every industry any section fits, sorted and deduplicated.
pub fn all_industries() -> Vec<&'static str> {
    let mut industries: Vec<&'static str> = STAFF_SECTIONS
        .iter()
        .flat_map(|s| s.industry_fit.iter().copied())
        .collect();
    industries.sort_unstable();
    industries.dedup();
    industries
}

// ────────────────────────────────────────────────────────────────────────────
// Career paths
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CareerStep {
    pub year: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub skills: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPath {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub military_background: &'static str,
    pub steps: &'static [CareerStep],
    pub timeline_years: u32,
    pub potential_salary: f64,
}

const fn step(
    year: u32,
    title: &'static str,
    description: &'static str,
    skills: &'static [&'static str],
) -> CareerStep {
    CareerStep {
        year,
        title,
        description,
        skills,
    }
}

pub static CAREER_PATHS: [CareerPath; 5] = [
    CareerPath {
        id: "ops-to-pm",
        name: "Operations to Program Management",
        description: "Leverage operational planning experience into tech program management",
        military_background: "S-3/G-3 Operations Officer",
        steps: &[
            step(1, "Program Coordinator", "Entry role managing project schedules, documentation, and stakeholder communication", &["Project coordination", "Documentation", "Stakeholder management"]),
            step(2, "Project Manager", "Own smaller projects end-to-end, manage timelines and budgets", &["Budget management", "Risk mitigation", "Agile/Scrum"]),
            step(4, "Senior Program Manager", "Lead complex, cross-functional programs with multiple workstreams", &["Strategic planning", "Executive communication", "Organizational change"]),
        ],
        timeline_years: 4,
        potential_salary: 150_000.0,
    },
    CareerPath {
        id: "intel-to-cyber",
        name: "Intelligence to Cybersecurity",
        description: "Transition intelligence analysis skills to cybersecurity and threat intelligence",
        military_background: "S-2/G-2 Intelligence Officer or Analyst",
        steps: &[
            step(1, "Security Operations Analyst", "Monitor security systems, investigate alerts, and document incidents", &["SIEM tools", "Incident response", "Threat analysis"]),
            step(2, "Threat Intelligence Analyst", "Analyze threat actors, TTPs, and provide actionable intelligence", &["Threat modeling", "OSINT", "Report writing"]),
            step(4, "Cybersecurity Manager", "Lead security team, develop strategy, and manage security programs", &["Team leadership", "Security architecture", "Risk management"]),
        ],
        timeline_years: 4,
        potential_salary: 140_000.0,
    },
    CareerPath {
        id: "logistics-to-supply",
        name: "Logistics to Supply Chain Leadership",
        description: "Apply military logistics expertise to corporate supply chain management",
        military_background: "S-4/G-4 Logistics Officer",
        steps: &[
            step(1, "Supply Chain Analyst", "Analyze supply chain data, optimize inventory, support operations", &["Data analysis", "Inventory management", "Process improvement"]),
            step(2, "Logistics Manager", "Manage distribution operations, vendor relationships, and team", &["Vendor management", "Operations leadership", "Cost optimization"]),
            step(4, "Director of Supply Chain", "Lead global supply chain strategy, procurement, and logistics", &["Strategic sourcing", "Global logistics", "Digital transformation"]),
        ],
        timeline_years: 4,
        potential_salary: 160_000.0,
    },
    CareerPath {
        id: "hr-to-people-ops",
        name: "Personnel to People Operations",
        description: "Transition HR administration to modern people operations in tech",
        military_background: "S-1/G-1 Personnel Officer",
        steps: &[
            step(1, "HR Coordinator", "Support HR operations, onboarding, and employee services", &["HRIS systems", "Employee relations", "Compliance"]),
            step(2, "HR Business Partner", "Partner with business units on talent strategy and employee experience", &["Talent management", "Performance coaching", "Change management"]),
            step(4, "Director of People Operations", "Lead HR strategy, culture initiatives, and organizational development", &["Strategic HR", "Culture building", "Executive partnership"]),
        ],
        timeline_years: 4,
        potential_salary: 145_000.0,
    },
    CareerPath {
        id: "plans-to-strategy",
        name: "Plans to Corporate Strategy",
        description: "Apply strategic planning skills to corporate strategy and consulting",
        military_background: "S-5/G-5 Plans Officer",
        steps: &[
            step(1, "Strategy Analyst", "Support strategic initiatives, conduct research, and build analyses", &["Market research", "Financial modeling", "Presentation skills"]),
            step(2, "Strategy Manager", "Lead strategic projects, M&A support, and business planning", &["Project leadership", "Stakeholder management", "Business case development"]),
            step(4, "Director of Corporate Strategy", "Shape company direction, lead strategic planning, and advise executives", &["Executive influence", "Long-range planning", "Portfolio strategy"]),
        ],
        timeline_years: 4,
        potential_salary: 180_000.0,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_designation_round_trip_for_every_branch() {
        for branch in Branch::ALL {
            for number in 1..=9u8 {
                let designation = branch.designation(number);
                assert_eq!(parse_designation(&designation), Some((branch, number)));
            }
        }
        assert_eq!(Branch::Army.designation(3), "G-3");
    }

    #[test]
    fn test_parse_designation_rejects_junk() {
        assert_eq!(parse_designation("g-3"), Some((Branch::Army, 3)));
        assert_eq!(parse_designation("G-0"), None);
        assert_eq!(parse_designation("G-10"), None);
        assert_eq!(parse_designation("X-3"), None);
        assert_eq!(parse_designation("G3"), None);
    }

    #[test]
    fn test_sections_are_numbered_in_order() {
        for (i, s) in STAFF_SECTIONS.iter().enumerate() {
            assert_eq!(usize::from(s.number), i + 1);
            assert!(!s.corporate_equivalents.is_empty());
        }
        assert!(section(0).is_none());
        assert_eq!(section(4).map(|s| s.name), Some("Logistics / Supply Chain"));
    }

    #[test]
    fn test_average_salary_by_level() {
        let personnel = section(1).unwrap();
        // Midpoints 85,000 and 100,000.
        assert_eq!(personnel.average_salary(RoleLevel::Mid), 92_500.0);
        assert_eq!(personnel.average_salary(RoleLevel::Entry), 52_500.0);
    }

    #[test]
    fn test_industry_lookup() {
        let industries = all_industries();
        assert!(industries.windows(2).all(|w| w[0] < w[1]));
        assert!(industries.contains(&"Non-profit"));

        let numbers: Vec<u8> = sections_for_industry("Logistics")
            .iter()
            .map(|s| s.number)
            .collect();
        assert_eq!(numbers, vec![3]);
        assert!(sections_for_industry("Astronomy").is_empty());
    }

    #[test]
    fn test_branch_keys() {
        assert_eq!(Branch::from_key("airforce"), Some(Branch::AirForce));
        assert_eq!(Branch::from_key("coastguard"), None);
        assert_eq!(serde_json::to_value(Branch::AirForce).unwrap(), "airforce");
    }
}
