//! State identity tables: Census FIPS codes to USPS abbreviations and USPS
//! abbreviations to full names. Lookups fail loudly; a map must never ship
//! with a fabricated label.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

#[rustfmt::skip]
const FIPS_TO_USPS: &[(u32, &str)] = &[
    (1, "AL"), (2, "AK"), (4, "AZ"), (5, "AR"), (6, "CA"), (8, "CO"),
    (9, "CT"), (10, "DE"), (11, "DC"), (12, "FL"), (13, "GA"), (15, "HI"),
    (16, "ID"), (17, "IL"), (18, "IN"), (19, "IA"), (20, "KS"), (21, "KY"),
    (22, "LA"), (23, "ME"), (24, "MD"), (25, "MA"), (26, "MI"), (27, "MN"),
    (28, "MS"), (29, "MO"), (30, "MT"), (31, "NE"), (32, "NV"), (33, "NH"),
    (34, "NJ"), (35, "NM"), (36, "NY"), (37, "NC"), (38, "ND"), (39, "OH"),
    (40, "OK"), (41, "OR"), (42, "PA"), (44, "RI"), (45, "SC"), (46, "SD"),
    (47, "TN"), (48, "TX"), (49, "UT"), (50, "VT"), (51, "VA"), (53, "WA"),
    (54, "WV"), (55, "WI"), (56, "WY"), (60, "AS"), (66, "GU"), (69, "MP"),
    (72, "PR"), (78, "VI"),
];

#[rustfmt::skip]
const USPS_TO_NAME: &[(&str, &str)] = &[
    ("AL", "Alabama"), ("AK", "Alaska"), ("AS", "American Samoa"),
    ("AZ", "Arizona"), ("AR", "Arkansas"), ("CA", "California"),
    ("CO", "Colorado"), ("CT", "Connecticut"), ("DE", "Delaware"),
    ("DC", "District of Columbia"), ("FM", "Federated States of Micronesia"),
    ("FL", "Florida"), ("GA", "Georgia"), ("GU", "Guam"), ("HI", "Hawaii"),
    ("ID", "Idaho"), ("IL", "Illinois"), ("IN", "Indiana"), ("IA", "Iowa"),
    ("KS", "Kansas"), ("KY", "Kentucky"), ("LA", "Louisiana"), ("ME", "Maine"),
    ("MH", "Marshall Islands"), ("MD", "Maryland"), ("MA", "Massachusetts"),
    ("MI", "Michigan"), ("MN", "Minnesota"), ("MS", "Mississippi"),
    ("MO", "Missouri"), ("MT", "Montana"), ("NE", "Nebraska"), ("NV", "Nevada"),
    ("NH", "New Hampshire"), ("NJ", "New Jersey"), ("NM", "New Mexico"),
    ("NY", "New York"), ("NC", "North Carolina"), ("ND", "North Dakota"),
    ("MP", "Northern Mariana Islands"), ("OH", "Ohio"), ("OK", "Oklahoma"),
    ("OR", "Oregon"), ("PW", "Palau"), ("PA", "Pennsylvania"),
    ("PR", "Puerto Rico"), ("RI", "Rhode Island"), ("SC", "South Carolina"),
    ("SD", "South Dakota"), ("TN", "Tennessee"), ("TX", "Texas"),
    ("UT", "Utah"), ("VT", "Vermont"), ("VI", "Virgin Islands"),
    ("VA", "Virginia"), ("WA", "Washington"), ("WV", "West Virginia"),
    ("WI", "Wisconsin"), ("WY", "Wyoming"),
];

static FIPS_MAP: Lazy<HashMap<u32, &'static str>> =
    Lazy::new(|| FIPS_TO_USPS.iter().copied().collect());

static NAME_MAP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| USPS_TO_NAME.iter().copied().collect());

/// USPS abbreviation for a Census state FIPS code.
pub fn usps_for_fips(fips: u32) -> Result<&'static str> {
    FIPS_MAP
        .get(&fips)
        .copied()
        .ok_or_else(|| Error::UnknownState(format!("FIPS {:02}", fips)))
}

/// Full state name for a USPS abbreviation.
pub fn name_for_usps(usps: &str) -> Result<&'static str> {
    NAME_MAP
        .get(usps)
        .copied()
        .ok_or_else(|| Error::UnknownState(usps.to_string()))
}
