use crate::admin::error::AdminError;
use crate::database::dao;
use crate::error::Result;
use crate::membership::season::{MembershipWindow, membership_year};
use crate::tools::normalize;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use derive_getters::Getters;
use diesel::SqliteConnection;
use dto::application::MembershipApplication;
use dto::listing::{ApplicationListing, ApplicationOverview, ApplicationStats};
use dto::membership_type::MembershipType;
use dto::payment::PaymentStatus;
use dto::profile::Profile;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

// region Filters
/// Which applications to keep, according to their creation date.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum DateRange {
    All,
    /// Calendar year of today.
    CurrentYear,
    /// Membership window containing today.
    #[default]
    CurrentSeason,
    /// A given calendar year.
    Year(i32),
    /// Membership window of a given membership year.
    Season(i32),
}

impl DateRange {
    fn includes(&self, created_at: &NaiveDateTime, today: &NaiveDate) -> bool {
        match self {
            DateRange::All => true,
            DateRange::CurrentYear => created_at.year() == today.year(),
            DateRange::CurrentSeason => MembershipWindow::containing(today).contains(created_at),
            DateRange::Year(year) => created_at.year() == *year,
            DateRange::Season(year) => {
                MembershipWindow::for_membership_year(*year).contains(created_at)
            }
        }
    }
}

impl FromStr for DateRange {
    type Err = AdminError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(DateRange::All),
            "current-year" => Ok(DateRange::CurrentYear),
            "current-season" => Ok(DateRange::CurrentSeason),
            _ => {
                let parse_year = |prefix: &str| {
                    value
                        .strip_prefix(prefix)
                        .and_then(|year| year.parse::<i32>().ok())
                };
                parse_year("year-")
                    .map(DateRange::Year)
                    .or_else(|| parse_year("season-").map(DateRange::Season))
                    .ok_or_else(|| AdminError::invalid_filter("date_range", value))
            }
        }
    }
}

/// Whether the application has been fully paid.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Complete,
    Pending,
}

impl StatusFilter {
    fn includes(&self, overview: &ApplicationOverview) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Complete => overview.is_complete(),
            StatusFilter::Pending => !overview.is_complete(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = AdminError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(StatusFilter::All),
            "complete" => Ok(StatusFilter::Complete),
            "pending" => Ok(StatusFilter::Pending),
            _ => Err(AdminError::invalid_filter("status", value)),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum SortField {
    #[default]
    Lastname,
    Firstname,
    Email,
    City,
    MembershipType,
    LicenseType,
    CreatedAt,
}

impl FromStr for SortField {
    type Err = AdminError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "lastname" => Ok(SortField::Lastname),
            "firstname" => Ok(SortField::Firstname),
            "email" => Ok(SortField::Email),
            "city" => Ok(SortField::City),
            "membership_type" => Ok(SortField::MembershipType),
            "license_type" => Ok(SortField::LicenseType),
            "created_at" => Ok(SortField::CreatedAt),
            _ => Err(AdminError::invalid_filter("sort", value)),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = AdminError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(AdminError::invalid_filter("order", value)),
        }
    }
}
// endregion

/// How the administration dashboard wants its applications.
#[derive(Debug, Getters, PartialEq, Clone, Default)]
pub struct ListingQuery {
    search: Option<String>,
    membership_type: Option<MembershipType>,
    status: StatusFilter,
    date_range: DateRange,
    sort_field: SortField,
    sort_order: SortOrder,
}

fn parse_or_default<T>(value: Option<&str>) -> Result<T, AdminError>
where
    T: FromStr<Err = AdminError> + Default,
{
    match value {
        None | Some("") => Ok(T::default()),
        Some(value) => T::from_str(value),
    }
}

impl ListingQuery {
    pub fn new(
        search: Option<String>,
        membership_type: Option<MembershipType>,
        status: StatusFilter,
        date_range: DateRange,
        sort_field: SortField,
        sort_order: SortOrder,
    ) -> Self {
        Self {
            search,
            membership_type,
            status,
            date_range,
            sort_field,
            sort_order,
        }
    }

    /// Build a query from raw request parameters. Missing parameters get their default value.
    pub fn parse(
        search: Option<&str>,
        membership_type: Option<&str>,
        status: Option<&str>,
        date_range: Option<&str>,
        sort_field: Option<&str>,
        sort_order: Option<&str>,
    ) -> Result<Self, AdminError> {
        let search = search
            .map(str::trim)
            .filter(|search| !search.is_empty())
            .map(str::to_owned);
        let membership_type = match membership_type {
            None | Some("") | Some("all") => None,
            Some(code) => Some(
                MembershipType::from_str(code)
                    .map_err(|_| AdminError::invalid_filter("membership_type", code))?,
            ),
        };

        Ok(Self::new(
            search,
            membership_type,
            parse_or_default(status)?,
            parse_or_default(date_range)?,
            parse_or_default(sort_field)?,
            parse_or_default(sort_order)?,
        ))
    }
}

/// Join applications with their member's profile and the payment status of their membership year.
pub fn build_overviews(
    applications: Vec<MembershipApplication>,
    profiles: Vec<Profile>,
    payments: Vec<PaymentStatus>,
) -> Vec<ApplicationOverview> {
    let profiles = profiles
        .into_iter()
        .map(|profile| (profile.id().clone(), profile))
        .collect::<HashMap<_, _>>();
    let payments = payments
        .into_iter()
        .map(|payment| ((payment.profile_id().clone(), *payment.year()), payment))
        .collect::<HashMap<_, _>>();

    applications
        .into_iter()
        .filter_map(|application| {
            let Some(profile) = profiles.get(application.user_id()) else {
                warn!("Application without profile [id: {}]", application.id());
                return None;
            };
            let year = membership_year(&application.created_at().date());
            let payment = payments
                .get(&(application.user_id().clone(), year))
                .cloned();

            Some(ApplicationOverview::new(
                application,
                profile.email().clone(),
                *profile.role(),
                profile.personal_info().clone(),
                year,
                payment,
            ))
        })
        .collect()
}

fn matches_search(overview: &ApplicationOverview, search: &str) -> bool {
    let info = overview.personal_info();
    let fields = [
        Some(overview.email()),
        info.firstname().as_ref(),
        info.lastname().as_ref(),
        info.phone().as_ref(),
        info.ffglicense().as_ref(),
        info.city().as_ref(),
        info.birthplace().as_ref(),
    ];

    fields
        .into_iter()
        .flatten()
        .any(|field| normalize(field).contains(search))
}

fn compare_text(a: &Option<String>, b: &Option<String>) -> Ordering {
    let a = a.as_deref().map(normalize).unwrap_or_default();
    let b = b.as_deref().map(normalize).unwrap_or_default();
    a.cmp(&b)
}

fn compare(a: &ApplicationOverview, b: &ApplicationOverview, field: SortField) -> Ordering {
    let (info_a, info_b) = (a.personal_info(), b.personal_info());
    let (application_a, application_b) = (a.application(), b.application());
    match field {
        SortField::Lastname => compare_text(info_a.lastname(), info_b.lastname()),
        SortField::Firstname => compare_text(info_a.firstname(), info_b.firstname()),
        SortField::Email => normalize(a.email()).cmp(&normalize(b.email())),
        SortField::City => compare_text(info_a.city(), info_b.city()),
        SortField::MembershipType => application_a
            .membership_type()
            .code()
            .cmp(application_b.membership_type().code()),
        SortField::LicenseType => application_a
            .license_type()
            .code()
            .cmp(application_b.license_type().code()),
        SortField::CreatedAt => application_a.created_at().cmp(application_b.created_at()),
    }
}

/// Keep the applications matching the query, sorted as it asks.
/// Equal elements are ordered by creation date then id, whatever the sort order.
pub fn filter_and_sort(
    overviews: Vec<ApplicationOverview>,
    query: &ListingQuery,
    today: &NaiveDate,
) -> Vec<ApplicationOverview> {
    let search = query.search().as_deref().map(normalize);
    let mut overviews = overviews
        .into_iter()
        .filter(|overview| {
            search
                .as_deref()
                .is_none_or(|search| matches_search(overview, search))
        })
        .filter(|overview| {
            query
                .membership_type()
                .is_none_or(|membership_type| {
                    *overview.application().membership_type() == membership_type
                })
        })
        .filter(|overview| query.status().includes(overview))
        .filter(|overview| {
            query
                .date_range()
                .includes(overview.application().created_at(), today)
        })
        .collect::<Vec<_>>();

    overviews.sort_by(|a, b| {
        let ordering = compare(a, b, *query.sort_field());
        let ordering = match query.sort_order() {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        ordering
            .then_with(|| a.application().created_at().cmp(b.application().created_at()))
            .then_with(|| a.application().id().cmp(b.application().id()))
    });

    overviews
}

/// Count applications, overall and per membership type.
pub fn compute_stats(overviews: &[ApplicationOverview]) -> ApplicationStats {
    let mut per_membership_type = MembershipType::ALL
        .iter()
        .map(|membership_type| (membership_type.code().to_owned(), 0))
        .collect::<BTreeMap<_, _>>();
    for overview in overviews {
        *per_membership_type
            .entry(overview.application().membership_type().code().to_owned())
            .or_default() += 1;
    }

    ApplicationStats::new(overviews.len(), per_membership_type)
}

pub fn retrieve_overviews(connection: &mut SqliteConnection) -> Result<Vec<ApplicationOverview>> {
    let applications = dao::application::retrieve_all_applications(connection)?;
    let profiles = dao::profile::retrieve_all_profiles(connection)?;
    let payments = dao::payment::retrieve_all_payments(connection)?;

    Ok(build_overviews(applications, profiles, payments))
}

pub fn list_applications(
    connection: &mut SqliteConnection,
    query: &ListingQuery,
    today: &NaiveDate,
) -> Result<ApplicationListing> {
    let overviews = filter_and_sort(retrieve_overviews(connection)?, query, today);
    let stats = compute_stats(&overviews);

    Ok(ApplicationListing::new(overviews, stats))
}
