//! Recognized incident-record fields.
//!
//! Every merged row carries all of these columns, synthesized as null
//! when a source never supplied them, so the cleaning passes can reason
//! about all three sources uniformly.

/// Fields guaranteed present on every row after merge.
pub const RECOGNIZED_FIELDS: [&str; 14] = [
    "incident_date",
    "incident_time",
    "incident_type",
    "severity",
    "description",
    "client_name",
    "organization",
    "reporter",
    "emotion",
    "actions_taken",
    "dob",
    "ndis_id",
    "recurrence",
    "resolution_time",
];

/// Columns the assisted variant sends to the enrichment collaborator.
pub const ENRICHED_COLUMNS: [&str; 3] = ["incident_type", "actions_taken", "severity"];

/// Cap on distinct values sent per enrichment request, to bound prompt
/// size.
pub const ENRICHMENT_VALUE_CAP: usize = 120;
