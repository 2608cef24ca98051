//! Shared record fixtures
//!
//! - Calendar events edited by four family members
//! - Rental listings
//! - A property matrix crossing every field kind with every presence state

use std::sync::Arc;

use fieldmerge_core::{Date, FieldKind, FieldSpec, ReconcileResult, Record, Schema, Value};
use fieldmerge_reconcile::{conflict, ConflictResolver, Resolution};

// ============================================================================
// CALENDAR EVENTS
// ============================================================================

pub fn calendar_schema() -> Arc<Schema> {
    Schema::builder("calendar_event")
        .identity("title")
        .standard("day")
        .field(FieldSpec::standard("time").with_default("All Day"))
        .standard("location")
        .standard("description")
        .build()
}

pub fn dads_entry() -> ReconcileResult<Record> {
    Record::builder(&calendar_schema())
        .set("title", "Family Picnic")
        .set("day", Date::new(2025, 6, 20))
        .set("time", "11:00 AM")
        .set("location", "Central Park")
        .set("description", "Annual family picnic with games and BBQ.")
        .build()
}

pub fn moms_entry() -> ReconcileResult<Record> {
    Record::builder(&calendar_schema())
        .set("title", "Family Picnic")
        .set("day", Date::new(2025, 6, 20))
        .set("time", "12:00 PM")
        .set("location", "Central Park")
        .set("description", "Picnic with family and friends, do not forget the salads!")
        .build()
}

pub fn sons_entry() -> ReconcileResult<Record> {
    Record::builder(&calendar_schema())
        .set("title", "Family Picnic")
        .set("day", Date::new(2025, 6, 19))
        .set("time", "12:00 PM")
        .set("description", "Bring your football and frisbee!")
        .build()
}

/// Assigns `time` to its default, which does not count as an edit
pub fn daughters_entry() -> ReconcileResult<Record> {
    Record::builder(&calendar_schema())
        .set("title", "Family Picnic")
        .set("day", Date::new(2025, 6, 20))
        .set("time", "All Day")
        .set("location", "Central Park")
        .build()
}

pub fn unrelated_entry() -> ReconcileResult<Record> {
    Record::builder(&calendar_schema())
        .set("title", "Dentist Appointment")
        .set("day", Date::new(2025, 7, 1))
        .build()
}

/// Event policy: latest day, earliest time, target location, and both
/// descriptions with the target's first
#[derive(Debug, Default)]
pub struct EventResolver;

impl ConflictResolver for EventResolver {
    fn resolve_conflict(&self, field: &str, values: &[Value]) -> ReconcileResult<Resolution> {
        let [baseline, target] = values else {
            return Err(conflict(field, values));
        };
        let resolution = match field {
            "day" => std::cmp::max(baseline, target).clone(),
            "time" => std::cmp::min(baseline, target).clone(),
            "location" => target.clone(),
            "description" => match (baseline.as_text(), target.as_text()) {
                (Some(b), Some(t)) => Value::from(format!("{}\n\n{}", t, b)),
                _ => return Err(conflict(field, values)),
            },
            _ => return Err(conflict(field, values)),
        };
        Ok(Resolution::Value(resolution))
    }
}

// ============================================================================
// RENTALS
// ============================================================================

pub fn rental_schema() -> Arc<Schema> {
    Schema::builder("rental")
        .identity("address")
        .identity("apt")
        .standard("dwelling_type")
        .standard("sqft")
        .standard("bedrooms")
        .field(FieldSpec::standard("garage_parking").with_default(0))
        .field(FieldSpec::standard("laundry").with_default(Value::Null))
        .standard("cost")
        .build()
}

/// Listing description for [`rental`]
#[derive(Clone, Debug)]
pub struct Listing<'a> {
    pub address: &'a str,
    pub apt: Option<&'a str>,
    pub dwelling_type: &'a str,
    pub sqft: i64,
    pub bedrooms: i64,
    pub garage_parking: Option<i64>,
    pub laundry: Option<&'a str>,
    pub cost: i64,
}

pub fn rental(listing: &Listing<'_>) -> ReconcileResult<Record> {
    let mut builder = Record::builder(&rental_schema())
        .set("address", listing.address)
        .set("dwelling_type", listing.dwelling_type)
        .set("sqft", listing.sqft)
        .set("bedrooms", listing.bedrooms)
        .set("cost", listing.cost);
    if let Some(apt) = listing.apt {
        builder = builder.set("apt", apt);
    }
    if let Some(garage) = listing.garage_parking {
        builder = builder.set("garage_parking", garage);
    }
    if let Some(laundry) = listing.laundry {
        builder = builder.set("laundry", laundry);
    }
    builder.build()
}

pub fn dorm() -> ReconcileResult<Record> {
    rental(&Listing {
        address: "123 College Ave",
        apt: Some("12"),
        dwelling_type: "Dormitory",
        sqft: 200,
        bedrooms: 1,
        garage_parking: None,
        laundry: Some("Public"),
        cost: 0,
    })
}

pub fn apartment(apt: &str) -> ReconcileResult<Record> {
    rental(&Listing {
        address: "456 City Plaza",
        apt: Some(apt),
        dwelling_type: "Apartment",
        sqft: 850,
        bedrooms: 2,
        garage_parking: Some(1),
        laundry: Some("Shared"),
        cost: 1200,
    })
}

pub fn town_home() -> ReconcileResult<Record> {
    rental(&Listing {
        address: "321 Maple Dr",
        apt: None,
        dwelling_type: "Town home",
        sqft: 1400,
        bedrooms: 3,
        garage_parking: Some(1),
        laundry: Some("Private"),
        cost: 2200,
    })
}

// ============================================================================
// PROPERTY MATRIX
// ============================================================================

/// Every combination of kind and presence:
/// `set`, `unset`, `default`, `set_default`, `default_none`, `set_none`,
/// `set_default_none`, each as identity (`_pk`), reference (`_fk`) and
/// standard field
pub fn property_schema() -> Arc<Schema> {
    let mut builder = Schema::builder("property_model");
    for (suffix, kind) in [
        ("_pk", FieldKind::Identity),
        ("_fk", FieldKind::Reference),
        ("", FieldKind::Standard),
    ] {
        let spec = |base: &str| FieldSpec::new(format!("{}{}", base, suffix), kind);
        builder = builder
            .field(spec("set"))
            .field(spec("unset"))
            .field(spec("default").with_default(0))
            .field(spec("set_default").with_default(0))
            .field(spec("default_none").with_default(Value::Null))
            .field(spec("set_none"))
            .field(spec("set_default_none").with_default(Value::Null));
    }
    builder.build()
}

pub fn property_record() -> ReconcileResult<Record> {
    let mut builder = Record::builder(&property_schema());
    for suffix in ["_pk", "_fk", ""] {
        builder = builder
            .set(format!("set{}", suffix), 1)
            .set(format!("set_default{}", suffix), 0)
            .set(format!("set_none{}", suffix), Value::Null)
            .set(format!("set_default_none{}", suffix), Value::Null);
    }
    builder.build()
}
