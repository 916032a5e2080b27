use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConsoleError, Result};
use crate::forms::{personnel, rental, schedule, stats, FieldSpec, ParamForm};
use crate::model::ParameterSet;

/// Every query the console knows about. The set is closed; dispatch is an
/// exhaustive match, never a string lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    EmployeesByPosition,
    FreeEmployeesByRole,
    TopActors,
    LeastJob,
    LocationOnDates,
    LocationUse,
    ActivitiesOnDates,
    MusicRelease,
    UpcomingProduction,
    EmployeesAssign,
    ContractOverlap,
    ProductionExpense,
    AllPerformer,
    PerformerPartner,
}

impl QueryKind {
    /// Display order in the selector
    pub const ALL: [QueryKind; 14] = [
        QueryKind::EmployeesByPosition,
        QueryKind::FreeEmployeesByRole,
        QueryKind::TopActors,
        QueryKind::LeastJob,
        QueryKind::LocationOnDates,
        QueryKind::LocationUse,
        QueryKind::ActivitiesOnDates,
        QueryKind::MusicRelease,
        QueryKind::UpcomingProduction,
        QueryKind::EmployeesAssign,
        QueryKind::ContractOverlap,
        QueryKind::ProductionExpense,
        QueryKind::AllPerformer,
        QueryKind::PerformerPartner,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QueryKind::EmployeesByPosition => "employees_by_position",
            QueryKind::FreeEmployeesByRole => "free_employees_by_role",
            QueryKind::TopActors => "top_actors",
            QueryKind::LeastJob => "least_job",
            QueryKind::LocationOnDates => "location_on_dates",
            QueryKind::LocationUse => "location_use",
            QueryKind::ActivitiesOnDates => "activities_on_dates",
            QueryKind::MusicRelease => "music_release",
            QueryKind::UpcomingProduction => "upcoming_production",
            QueryKind::EmployeesAssign => "employees_assign",
            QueryKind::ContractOverlap => "contract_overlap",
            QueryKind::ProductionExpense => "production_expense",
            QueryKind::AllPerformer => "all_performer",
            QueryKind::PerformerPartner => "performer_partner",
        }
    }

    pub fn descriptor(self) -> &'static QueryDescriptor {
        match self {
            QueryKind::EmployeesByPosition => &personnel::EMPLOYEES_BY_POSITION,
            QueryKind::FreeEmployeesByRole => &personnel::FREE_EMPLOYEES_BY_ROLE,
            QueryKind::TopActors => &personnel::TOP_ACTORS,
            QueryKind::LeastJob => &personnel::LEAST_JOB,
            QueryKind::LocationOnDates => &rental::LOCATION_ON_DATES,
            QueryKind::LocationUse => &rental::LOCATION_USE,
            QueryKind::ActivitiesOnDates => &schedule::ACTIVITIES_ON_DATES,
            QueryKind::MusicRelease => &schedule::MUSIC_RELEASE,
            QueryKind::UpcomingProduction => &schedule::UPCOMING_PRODUCTION,
            QueryKind::EmployeesAssign => &stats::EMPLOYEES_ASSIGN,
            QueryKind::ContractOverlap => &stats::CONTRACT_OVERLAP,
            QueryKind::ProductionExpense => &stats::PRODUCTION_EXPENSE,
            QueryKind::AllPerformer => &stats::ALL_PERFORMER,
            QueryKind::PerformerPartner => &stats::PERFORMER_PARTNER,
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryKind {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        QueryKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| ConsoleError::UnknownQuery(s.to_string()))
    }
}

/// Registry entry binding a query to its label, form and backend route
#[derive(Debug, Clone, Copy)]
pub struct QueryDescriptor {
    pub kind: QueryKind,
    pub label: &'static str,
    pub path: &'static str,
    pub fields: &'static [FieldSpec],
    pub(crate) form: fn() -> Box<dyn ParamForm>,
}

impl QueryDescriptor {
    pub fn id(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Fresh, unmounted form for this query
    pub fn form(&self) -> Box<dyn ParamForm> {
        (self.form)()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|field| field.required)
    }

    /// Query-string pairs in the shape this endpoint expects: form field
    /// names are mapped to wire names and list values repeat their name.
    pub fn query_pairs(&self, params: &ParameterSet) -> Vec<(String, String)> {
        params
            .query_pairs()
            .into_iter()
            .map(|(name, value)| {
                let wire = self
                    .fields
                    .iter()
                    .find(|field| field.name == name)
                    .map(|field| field.wire.to_string())
                    .unwrap_or(name);
                (wire, value)
            })
            .collect()
    }
}

/// Ordered view over all descriptors, in display order
#[derive(Debug, Clone)]
pub struct QueryRegistry {
    descriptors: Vec<&'static QueryDescriptor>,
}

impl Default for QueryRegistry {
    fn default() -> Self {
        Self {
            descriptors: QueryKind::ALL.iter().map(|kind| kind.descriptor()).collect(),
        }
    }
}

impl QueryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static QueryDescriptor> + '_ {
        self.descriptors.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Look up a descriptor by its textual id
    pub fn resolve(&self, id: &str) -> Result<&'static QueryDescriptor> {
        let kind: QueryKind = id.parse()?;
        Ok(kind.descriptor())
    }

    /// 1-based position as shown in the selector menu
    pub fn nth(&self, position: usize) -> Option<&'static QueryDescriptor> {
        position
            .checked_sub(1)
            .and_then(|index| self.descriptors.get(index).copied())
    }
}
