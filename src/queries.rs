//! GraphQL query strings sent to the Jolt API.

/// Locations scoped by a mode descriptor such as a content group.
///
/// Expects a `$mode: ModeInput!` variable and returns `data.locations`.
pub const LOCATIONS_QUERY: &str = r"
query GetLocations($mode: ModeInput!) {
    locations(mode: $mode) {
        id
        name
    }
}
";

/// Every location the company can see. Takes no variables and returns
/// `data.company.locations`.
pub const COMPANY_LOCATIONS_QUERY: &str = r"
query GetCompanyLocations {
    company {
        locations {
            id
            name
        }
    }
}
";
