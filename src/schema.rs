//! Column types of the GTFS schedule tables.

use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Text,
    Integer,
    Float,
}

impl ColumnType {
    pub const fn name(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
        }
    }
}

use ColumnType::{Float, Integer};

// Columns not listed here, including every identifier, time and date, load as text.
const AGENCY: &[(&str, ColumnType)] = &[];
const CALENDAR: &[(&str, ColumnType)] = &[
    ("monday", Integer),
    ("tuesday", Integer),
    ("wednesday", Integer),
    ("thursday", Integer),
    ("friday", Integer),
    ("saturday", Integer),
    ("sunday", Integer),
];
const CALENDAR_DATES: &[(&str, ColumnType)] = &[("exception_type", Integer)];
const ROUTES: &[(&str, ColumnType)] = &[
    ("route_type", Integer),
    ("route_sort_order", Integer),
    ("continuous_pickup", Integer),
    ("continuous_drop_off", Integer),
];
const STOPS: &[(&str, ColumnType)] = &[
    ("stop_lat", Float),
    ("stop_lon", Float),
    ("location_type", Integer),
    ("wheelchair_boarding", Integer),
];
const STOP_TIMES: &[(&str, ColumnType)] = &[
    ("stop_sequence", Integer),
    ("pickup_type", Integer),
    ("drop_off_type", Integer),
    ("continuous_pickup", Integer),
    ("continuous_drop_off", Integer),
    ("shape_dist_traveled", Float),
    ("timepoint", Integer),
];
const TRIPS: &[(&str, ColumnType)] = &[
    ("direction_id", Integer),
    ("wheelchair_accessible", Integer),
    ("bikes_allowed", Integer),
];
const SHAPES: &[(&str, ColumnType)] = &[
    ("shape_pt_lat", Float),
    ("shape_pt_lon", Float),
    ("shape_pt_sequence", Integer),
    ("shape_dist_traveled", Float),
];
const FREQUENCIES: &[(&str, ColumnType)] = &[("headway_secs", Integer), ("exact_times", Integer)];
const TRANSFERS: &[(&str, ColumnType)] = &[("transfer_type", Integer), ("min_transfer_time", Integer)];
const PATHWAYS: &[(&str, ColumnType)] = &[
    ("pathway_mode", Integer),
    ("is_bidirectional", Integer),
    ("length", Float),
    ("traversal_time", Integer),
    ("stair_count", Integer),
    ("max_slope", Float),
    ("min_width", Float),
];
const LEVELS: &[(&str, ColumnType)] = &[("level_index", Float)];
const FARE_ATTRIBUTES: &[(&str, ColumnType)] = &[
    ("price", Float),
    ("payment_method", Integer),
    ("transfers", Integer),
    ("transfer_duration", Integer),
];

/// Column types per table name. Lookups for unknown tables or columns return
/// [ColumnType::Text].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldTypes {
    tables: HashMap<String, HashMap<String, ColumnType>>,
}

impl FieldTypes {
    /// No typed columns; every value loads as text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The GTFS reference tables.
    pub fn gtfs() -> Self {
        let mut types = Self::empty();
        for (table, columns) in [
            ("agency", AGENCY),
            ("calendar", CALENDAR),
            ("calendar_dates", CALENDAR_DATES),
            ("routes", ROUTES),
            ("stops", STOPS),
            ("stop_times", STOP_TIMES),
            ("trips", TRIPS),
            ("shapes", SHAPES),
            ("frequencies", FREQUENCIES),
            ("transfers", TRANSFERS),
            ("pathways", PATHWAYS),
            ("levels", LEVELS),
            ("fare_attributes", FARE_ATTRIBUTES),
        ] {
            let entry = types.tables.entry(table.to_owned()).or_default();
            for (column, ty) in columns {
                entry.insert((*column).to_owned(), *ty);
            }
        }
        types
    }

    pub fn with_column(mut self, table: &str, column: &str, ty: ColumnType) -> Self {
        self.tables
            .entry(table.to_owned())
            .or_default()
            .insert(column.to_owned(), ty);
        self
    }

    pub fn column_type(&self, table: &str, column: &str) -> ColumnType {
        self.tables
            .get(table)
            .and_then(|columns| columns.get(column))
            .copied()
            .unwrap_or(ColumnType::Text)
    }
}
