//! Degrees, certifications and bootcamps with their cost, duration and
//! expected salary impact. Ranges are shown to users; calculations use
//! their midpoints.

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialKind {
    Degree,
    Certification,
    Bootcamp,
}

impl CredentialKind {
    pub fn display_name(self) -> &'static str {
        match self {
            CredentialKind::Degree => "Degree",
            CredentialKind::Certification => "Professional Certification",
            CredentialKind::Bootcamp => "Bootcamp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeLevel {
    Bachelors,
    Masters,
    Mba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Technology,
    Business,
    Finance,
    ProjectManagement,
    DataAnalytics,
    Cybersecurity,
    SupplyChain,
    Hr,
}

impl Industry {
    pub fn display_name(self) -> &'static str {
        match self {
            Industry::Technology => "Technology",
            Industry::Business => "Business",
            Industry::Finance => "Finance",
            Industry::ProjectManagement => "Project Management",
            Industry::DataAnalytics => "Data Analytics",
            Industry::Cybersecurity => "Cybersecurity",
            Industry::SupplyChain => "Supply Chain & Operations",
            Industry::Hr => "Human Resources",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobDemand {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Entry,
    Experienced,
}

impl ExperienceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Experienced => "experienced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

const fn range(min: f64, max: f64) -> Range {
    Range { min, max }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalaryIncrease {
    pub entry: Range,
    pub experienced: Range,
}

impl SalaryIncrease {
    pub fn for_level(&self, level: ExperienceLevel) -> Range {
        match level {
            ExperienceLevel::Entry => self.entry,
            ExperienceLevel::Experienced => self.experienced,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: CredentialKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<DegreeLevel>,
    pub industry: Industry,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<&'static str>,
    pub total_cost: Range,
    pub months_to_complete: Range,
    pub hours_per_week: Range,
    pub salary_increase: SalaryIncrease,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_rate: Option<f64>,
    pub jobs_available: JobDemand,
    pub remote_eligible: bool,
    pub prerequisites: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_education: Option<&'static str>,
}

impl Credential {
    pub fn average_cost(&self) -> f64 {
        self.total_cost.midpoint()
    }

    pub fn average_months(&self) -> f64 {
        self.months_to_complete.midpoint()
    }

    pub fn average_annual_increase(&self, level: ExperienceLevel) -> f64 {
        self.salary_increase.for_level(level).midpoint()
    }
}

pub fn find_credential(id: &str) -> Result<&'static Credential, CalcError> {
    CREDENTIALS
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| CalcError::UnknownCredential(id.to_string()))
}

pub static CREDENTIALS: [Credential; 15] = [
    Credential {
        id: "bachelors-cs",
        name: "Bachelor's in Computer Science",
        kind: CredentialKind::Degree,
        level: Some(DegreeLevel::Bachelors),
        industry: Industry::Technology,
        description: "Four-year degree covering programming, algorithms, data structures, and software engineering",
        provider: None,
        total_cost: range(40_000.0, 160_000.0),
        months_to_complete: range(36.0, 48.0),
        hours_per_week: range(20.0, 40.0),
        salary_increase: SalaryIncrease {
            entry: range(25_000.0, 45_000.0),
            experienced: range(35_000.0, 60_000.0),
        },
        pass_rate: None,
        completion_rate: None,
        employment_rate: Some(0.92),
        jobs_available: JobDemand::High,
        remote_eligible: true,
        prerequisites: &[],
        minimum_education: None,
    },
    Credential {
        id: "bachelors-business",
        name: "Bachelor's in Business Administration",
        kind: CredentialKind::Degree,
        level: Some(DegreeLevel::Bachelors),
        industry: Industry::Business,
        description: "Four-year degree covering management, finance, marketing, and operations",
        provider: None,
        total_cost: range(35_000.0, 140_000.0),
        months_to_complete: range(36.0, 48.0),
        hours_per_week: range(15.0, 30.0),
        salary_increase: SalaryIncrease {
            entry: range(15_000.0, 30_000.0),
            experienced: range(25_000.0, 45_000.0),
        },
        pass_rate: None,
        completion_rate: None,
        employment_rate: Some(0.88),
        jobs_available: JobDemand::High,
        remote_eligible: true,
        prerequisites: &[],
        minimum_education: None,
    },
    Credential {
        id: "masters-mba",
        name: "MBA (Master of Business Administration)",
        kind: CredentialKind::Degree,
        level: Some(DegreeLevel::Mba),
        industry: Industry::Business,
        description: "Graduate business degree for leadership and management roles",
        provider: Some("Various universities"),
        total_cost: range(50_000.0, 200_000.0),
        months_to_complete: range(18.0, 24.0),
        hours_per_week: range(25.0, 50.0),
        salary_increase: SalaryIncrease {
            entry: range(30_000.0, 50_000.0),
            experienced: range(50_000.0, 100_000.0),
        },
        pass_rate: None,
        completion_rate: None,
        employment_rate: Some(0.94),
        jobs_available: JobDemand::High,
        remote_eligible: true,
        prerequisites: &[],
        minimum_education: Some("Bachelor's degree"),
    },
    Credential {
        id: "masters-cybersecurity",
        name: "Master's in Cybersecurity",
        kind: CredentialKind::Degree,
        level: Some(DegreeLevel::Masters),
        industry: Industry::Cybersecurity,
        description: "Graduate degree focusing on information security, risk management, and cyber defense",
        provider: None,
        total_cost: range(30_000.0, 100_000.0),
        months_to_complete: range(18.0, 24.0),
        hours_per_week: range(20.0, 35.0),
        salary_increase: SalaryIncrease {
            entry: range(25_000.0, 40_000.0),
            experienced: range(40_000.0, 70_000.0),
        },
        pass_rate: None,
        completion_rate: None,
        employment_rate: Some(0.96),
        jobs_available: JobDemand::High,
        remote_eligible: true,
        prerequisites: &[],
        minimum_education: Some("Bachelor's degree"),
    },
    Credential {
        id: "pmp",
        name: "PMP (Project Management Professional)",
        kind: CredentialKind::Certification,
        level: None,
        industry: Industry::ProjectManagement,
        description: "Industry-standard project management certification from PMI",
        provider: Some("Project Management Institute"),
        total_cost: range(2_000.0, 4_000.0),
        months_to_complete: range(2.0, 6.0),
        hours_per_week: range(10.0, 20.0),
        salary_increase: SalaryIncrease {
            entry: range(8_000.0, 15_000.0),
            experienced: range(15_000.0, 25_000.0),
        },
        pass_rate: Some(0.60),
        completion_rate: None,
        employment_rate: None,
        jobs_available: JobDemand::High,
        remote_eligible: true,
        prerequisites: &["35 hours PM education", "3-5 years PM experience"],
        minimum_education: None,
    },
    Credential {
        id: "cissp",
        name: "CISSP (Certified Information Systems Security Professional)",
        kind: CredentialKind::Certification,
        level: None,
        industry: Industry::Cybersecurity,
        description: "Gold standard cybersecurity certification for experienced professionals",
        provider: Some("ISC²"),
        total_cost: range(2_500.0, 5_000.0),
        months_to_complete: range(3.0, 6.0),
        hours_per_week: range(15.0, 25.0),
        salary_increase: SalaryIncrease {
            entry: range(15_000.0, 25_000.0),
            experienced: range(25_000.0, 40_000.0),
        },
        pass_rate: Some(0.70),
        completion_rate: None,
        employment_rate: None,
        jobs_available: JobDemand::High,
        remote_eligible: true,
        prerequisites: &["5 years security experience"],
        minimum_education: None,
    },
    Credential {
        id: "aws-solutions-architect",
        name: "AWS Solutions Architect Associate",
        kind: CredentialKind::Certification,
        level: None,
        industry: Industry::Technology,
        description: "Entry-level AWS cloud certification for architects",
        provider: Some("Amazon Web Services"),
        total_cost: range(500.0, 2_000.0),
        months_to_complete: range(1.0, 3.0),
        hours_per_week: range(10.0, 20.0),
        salary_increase: SalaryIncrease {
            entry: range(10_000.0, 18_000.0),
            experienced: range(15_000.0, 25_000.0),
        },
        pass_rate: Some(0.72),
        completion_rate: None,
        employment_rate: None,
        jobs_available: JobDemand::High,
        remote_eligible: true,
        prerequisites: &[],
        minimum_education: None,
    },
    Credential {
        id: "comptia-security-plus",
        name: "CompTIA Security+",
        kind: CredentialKind::Certification,
        level: None,
        industry: Industry::Cybersecurity,
        description: "Entry-level cybersecurity certification, DoD 8570 compliant",
        provider: Some("CompTIA"),
        total_cost: range(400.0, 1_500.0),
        months_to_complete: range(1.0, 3.0),
        hours_per_week: range(10.0, 15.0),
        salary_increase: SalaryIncrease {
            entry: range(8_000.0, 12_000.0),
            experienced: range(10_000.0, 18_000.0),
        },
        pass_rate: Some(0.75),
        completion_rate: None,
        employment_rate: None,
        jobs_available: JobDemand::High,
        remote_eligible: true,
        prerequisites: &[],
        minimum_education: None,
    },
    Credential {
        id: "cpa",
        name: "CPA (Certified Public Accountant)",
        kind: CredentialKind::Certification,
        level: None,
        industry: Industry::Finance,
        description: "Professional accounting certification required for many finance roles",
        provider: Some("State Boards of Accountancy"),
        total_cost: range(3_000.0, 6_000.0),
        months_to_complete: range(6.0, 18.0),
        hours_per_week: range(15.0, 25.0),
        salary_increase: SalaryIncrease {
            entry: range(15_000.0, 25_000.0),
            experienced: range(25_000.0, 45_000.0),
        },
        pass_rate: Some(0.50),
        completion_rate: None,
        employment_rate: None,
        jobs_available: JobDemand::High,
        remote_eligible: true,
        prerequisites: &["150 semester hours", "Bachelor's degree in accounting preferred"],
        minimum_education: None,
    },
    Credential {
        id: "six-sigma-black-belt",
        name: "Six Sigma Black Belt",
        kind: CredentialKind::Certification,
        level: None,
        industry: Industry::SupplyChain,
        description: "Process improvement and quality management certification",
        provider: Some("ASQ / IASSC"),
        total_cost: range(2_000.0, 5_000.0),
        months_to_complete: range(3.0, 6.0),
        hours_per_week: range(10.0, 20.0),
        salary_increase: SalaryIncrease {
            entry: range(10_000.0, 18_000.0),
            experienced: range(18_000.0, 30_000.0),
        },
        pass_rate: Some(0.65),
        completion_rate: None,
        employment_rate: None,
        jobs_available: JobDemand::Medium,
        remote_eligible: true,
        prerequisites: &["Green Belt recommended", "Project experience"],
        minimum_education: None,
    },
    Credential {
        id: "shrm-cp",
        name: "SHRM-CP (HR Certification)",
        kind: CredentialKind::Certification,
        level: None,
        industry: Industry::Hr,
        description: "Society for Human Resource Management certification for HR professionals",
        provider: Some("SHRM"),
        total_cost: range(500.0, 2_000.0),
        months_to_complete: range(2.0, 4.0),
        hours_per_week: range(8.0, 15.0),
        salary_increase: SalaryIncrease {
            entry: range(6_000.0, 12_000.0),
            experienced: range(12_000.0, 20_000.0),
        },
        pass_rate: Some(0.68),
        completion_rate: None,
        employment_rate: None,
        jobs_available: JobDemand::Medium,
        remote_eligible: true,
        prerequisites: &["HR experience recommended"],
        minimum_education: None,
    },
    Credential {
        id: "google-data-analytics",
        name: "Google Data Analytics Certificate",
        kind: CredentialKind::Certification,
        level: None,
        industry: Industry::DataAnalytics,
        description: "Entry-level data analytics certification covering spreadsheets, SQL, and visualization",
        provider: Some("Google / Coursera"),
        total_cost: range(300.0, 500.0),
        months_to_complete: range(3.0, 6.0),
        hours_per_week: range(10.0, 15.0),
        salary_increase: SalaryIncrease {
            entry: range(8_000.0, 15_000.0),
            experienced: range(12_000.0, 20_000.0),
        },
        pass_rate: None,
        completion_rate: Some(0.40),
        employment_rate: None,
        jobs_available: JobDemand::High,
        remote_eligible: true,
        prerequisites: &[],
        minimum_education: None,
    },
    Credential {
        id: "bootcamp-fullstack",
        name: "Full-Stack Web Development Bootcamp",
        kind: CredentialKind::Bootcamp,
        level: None,
        industry: Industry::Technology,
        description: "Intensive coding bootcamp covering front-end, back-end, and deployment",
        provider: None,
        total_cost: range(10_000.0, 20_000.0),
        months_to_complete: range(3.0, 6.0),
        hours_per_week: range(40.0, 60.0),
        salary_increase: SalaryIncrease {
            entry: range(20_000.0, 40_000.0),
            experienced: range(30_000.0, 50_000.0),
        },
        pass_rate: None,
        completion_rate: Some(0.75),
        employment_rate: Some(0.80),
        jobs_available: JobDemand::High,
        remote_eligible: true,
        prerequisites: &[],
        minimum_education: None,
    },
    Credential {
        id: "bootcamp-data-science",
        name: "Data Science Bootcamp",
        kind: CredentialKind::Bootcamp,
        level: None,
        industry: Industry::DataAnalytics,
        description: "Intensive program covering Python, statistics, machine learning, and data visualization",
        provider: None,
        total_cost: range(12_000.0, 25_000.0),
        months_to_complete: range(3.0, 6.0),
        hours_per_week: range(40.0, 60.0),
        salary_increase: SalaryIncrease {
            entry: range(25_000.0, 45_000.0),
            experienced: range(35_000.0, 60_000.0),
        },
        pass_rate: None,
        completion_rate: Some(0.70),
        employment_rate: Some(0.78),
        jobs_available: JobDemand::High,
        remote_eligible: true,
        prerequisites: &["Basic math/statistics helpful"],
        minimum_education: None,
    },
    Credential {
        id: "bootcamp-cybersecurity",
        name: "Cybersecurity Bootcamp",
        kind: CredentialKind::Bootcamp,
        level: None,
        industry: Industry::Cybersecurity,
        description: "Intensive security training covering penetration testing, incident response, and compliance",
        provider: None,
        total_cost: range(10_000.0, 18_000.0),
        months_to_complete: range(3.0, 6.0),
        hours_per_week: range(40.0, 50.0),
        salary_increase: SalaryIncrease {
            entry: range(20_000.0, 35_000.0),
            experienced: range(30_000.0, 50_000.0),
        },
        pass_rate: None,
        completion_rate: Some(0.78),
        employment_rate: Some(0.82),
        jobs_available: JobDemand::High,
        remote_eligible: true,
        prerequisites: &[],
        minimum_education: None,
    },
];
